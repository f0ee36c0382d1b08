//! Location (node) type

use crate::entity::{LocationId, LocationKind, SegmentId};
use crate::notify::Notifier;
use crate::segment::Endpoint;

/// Observer of a single location's segment lists
pub trait LocationNotifiee {
    /// A segment was added to one of the location's lists
    fn on_segment_new(&self, _location: &Location, _segment: SegmentId, _endpoint: Endpoint) {}

    /// A segment was removed from one of the location's lists
    fn on_segment_del(&self, _location: &Location, _segment: SegmentId, _endpoint: Endpoint) {}
}

/// A node in the network
///
/// The outbound list holds the segments whose source is this location and
/// the inbound list the segments whose destination is this location. Both
/// are kept in insertion order without duplicates by the manager; a
/// location never owns the segments it lists.
#[derive(Debug)]
pub struct Location {
    id: LocationId,
    name: String,
    kind: LocationKind,
    outbound: Vec<SegmentId>,
    inbound: Vec<SegmentId>,
    notifier: Notifier<dyn LocationNotifiee>,
}

impl Location {
    pub(crate) fn new(name: impl Into<String>, kind: LocationKind) -> Self {
        Self {
            id: LocationId::new(),
            name: name.into(),
            kind,
            outbound: Vec::new(),
            inbound: Vec::new(),
            notifier: Notifier::new(),
        }
    }

    pub fn id(&self) -> LocationId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> LocationKind {
        self.kind
    }

    /// Segments for which this location is the source
    pub fn outbound_segments(&self) -> &[SegmentId] {
        &self.outbound
    }

    /// Segments for which this location is the destination
    pub fn inbound_segments(&self) -> &[SegmentId] {
        &self.inbound
    }

    pub fn outbound_segment(&self, index: usize) -> Option<SegmentId> {
        self.outbound.get(index).copied()
    }

    pub fn inbound_segment(&self, index: usize) -> Option<SegmentId> {
        self.inbound.get(index).copied()
    }

    /// The list that mirrors the given segment endpoint
    pub fn segments(&self, endpoint: Endpoint) -> &[SegmentId] {
        match endpoint {
            Endpoint::Source => &self.outbound,
            Endpoint::Destination => &self.inbound,
        }
    }

    pub fn notifier(&self) -> &Notifier<dyn LocationNotifiee> {
        &self.notifier
    }

    /// Append `segment` unless already listed; returns whether it was added
    pub(crate) fn segment_add(&mut self, endpoint: Endpoint, segment: SegmentId) -> bool {
        let list = self.segments_mut(endpoint);
        if list.contains(&segment) {
            return false;
        }
        list.push(segment);
        true
    }

    /// Remove `segment` if listed; returns whether it was removed
    pub(crate) fn segment_remove(&mut self, endpoint: Endpoint, segment: SegmentId) -> bool {
        let list = self.segments_mut(endpoint);
        match list.iter().position(|s| *s == segment) {
            Some(pos) => {
                list.remove(pos);
                true
            }
            None => false,
        }
    }

    fn segments_mut(&mut self, endpoint: Endpoint) -> &mut Vec<SegmentId> {
        match endpoint {
            Endpoint::Source => &mut self.outbound,
            Endpoint::Destination => &mut self.inbound,
        }
    }
}
