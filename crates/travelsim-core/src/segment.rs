//! Segment (directed edge) type

use crate::entity::{LocationId, SegmentId, SegmentKind};
use crate::notify::Notifier;
use crate::value::Miles;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which end of a segment a location is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endpoint {
    Source,
    Destination,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Source => f.write_str("source"),
            Endpoint::Destination => f.write_str("destination"),
        }
    }
}

/// Observer of a single segment
pub trait SegmentNotifiee {
    /// The source changed; `previous` is the source before the change
    fn on_source(&self, _segment: &Segment, _previous: Option<LocationId>) {}

    /// The destination changed; `previous` is the destination before the change
    fn on_destination(&self, _segment: &Segment, _previous: Option<LocationId>) {}

    fn on_length(&self, _segment: &Segment) {}
}

/// A directed, length-weighted edge between two locations
///
/// Endpoints are non-owning handles. They are only changed through
/// [`crate::TravelManager::source_is`] and
/// [`crate::TravelManager::destination_is`], which keep the matching
/// location lists in step.
#[derive(Debug)]
pub struct Segment {
    id: SegmentId,
    name: String,
    kind: SegmentKind,
    source: Option<LocationId>,
    destination: Option<LocationId>,
    length: Miles,
    notifier: Notifier<dyn SegmentNotifiee>,
}

impl Segment {
    pub(crate) fn new(name: impl Into<String>, kind: SegmentKind) -> Self {
        Self {
            id: SegmentId::new(),
            name: name.into(),
            kind,
            source: None,
            destination: None,
            length: Miles::ZERO,
            notifier: Notifier::new(),
        }
    }

    pub fn id(&self) -> SegmentId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> SegmentKind {
        self.kind
    }

    pub fn source(&self) -> Option<LocationId> {
        self.source
    }

    pub fn destination(&self) -> Option<LocationId> {
        self.destination
    }

    pub fn endpoint(&self, endpoint: Endpoint) -> Option<LocationId> {
        match endpoint {
            Endpoint::Source => self.source,
            Endpoint::Destination => self.destination,
        }
    }

    pub fn length(&self) -> Miles {
        self.length
    }

    pub fn length_is(&mut self, length: Miles) {
        if self.length != length {
            self.length = length;
            self.notifier.post(|n| n.on_length(self));
        }
    }

    pub fn notifier(&self) -> &Notifier<dyn SegmentNotifiee> {
        &self.notifier
    }

    /// Set an endpoint without touching any location; returns the previous value
    pub(crate) fn endpoint_set(
        &mut self,
        endpoint: Endpoint,
        location: Option<LocationId>,
    ) -> Option<LocationId> {
        match endpoint {
            Endpoint::Source => std::mem::replace(&mut self.source, location),
            Endpoint::Destination => std::mem::replace(&mut self.destination, location),
        }
    }

    pub(crate) fn post_endpoint_change(&self, endpoint: Endpoint, previous: Option<LocationId>) {
        match endpoint {
            Endpoint::Source => self.notifier.post(|n| n.on_source(self, previous)),
            Endpoint::Destination => self.notifier.post(|n| n.on_destination(self, previous)),
        }
    }
}
