//! Bidirectional segment/location link maintenance
//!
//! A link is stored twice: as the segment's endpoint handle and as an
//! entry in the matching location list (outbound for the source, inbound
//! for the destination). Both halves have an entry point. Each entry
//! point updates its own half and calls the other only if the other half
//! does not already agree, so a logical change costs exactly two hops
//! whichever side starts it.

use super::TravelManager;
use crate::entity::{LocationId, SegmentId};
use crate::error::{Error, Result};
use crate::segment::Endpoint;

impl TravelManager {
    /// Set (or clear) the source of a segment
    pub fn source_is(&mut self, segment: SegmentId, source: Option<LocationId>) -> Result<()> {
        self.endpoint_is(Endpoint::Source, segment, source)
    }

    /// Set (or clear) the destination of a segment
    pub fn destination_is(
        &mut self,
        segment: SegmentId,
        destination: Option<LocationId>,
    ) -> Result<()> {
        self.endpoint_is(Endpoint::Destination, segment, destination)
    }

    /// Segment-side entry point
    ///
    /// Fails with [`Error::IncompatibleSegment`] when the location kind
    /// does not accept the segment kind; the segment then keeps its
    /// current endpoint.
    pub fn endpoint_is(
        &mut self,
        endpoint: Endpoint,
        segment: SegmentId,
        location: Option<LocationId>,
    ) -> Result<()> {
        let current = self
            .segments
            .get(&segment)
            .ok_or_else(|| Error::UnknownSegment(segment.to_string()))?
            .endpoint(endpoint);
        if current == location {
            return Ok(());
        }
        if let Some(location) = location {
            self.check_compatible(location, segment)?;
        }
        self.set_endpoint(endpoint, segment, location);
        Ok(())
    }

    /// Location-side entry point: list `segment` as an outbound segment of `location`
    pub fn outbound_segment_is(&mut self, location: LocationId, segment: SegmentId) -> Result<()> {
        self.segment_list(Endpoint::Source, location, segment)
    }

    /// Location-side entry point: list `segment` as an inbound segment of `location`
    pub fn inbound_segment_is(&mut self, location: LocationId, segment: SegmentId) -> Result<()> {
        self.segment_list(Endpoint::Destination, location, segment)
    }

    pub fn outbound_segment_del(&mut self, location: LocationId, segment: SegmentId) -> Result<()> {
        self.segment_unlist(Endpoint::Source, location, segment)
    }

    pub fn inbound_segment_del(&mut self, location: LocationId, segment: SegmentId) -> Result<()> {
        self.segment_unlist(Endpoint::Destination, location, segment)
    }

    fn segment_list(
        &mut self,
        endpoint: Endpoint,
        location: LocationId,
        segment: SegmentId,
    ) -> Result<()> {
        self.check_compatible(location, segment)?;
        self.link(endpoint, location, segment);
        Ok(())
    }

    fn segment_unlist(
        &mut self,
        endpoint: Endpoint,
        location: LocationId,
        segment: SegmentId,
    ) -> Result<()> {
        if !self.locations.contains_key(&location) {
            return Err(Error::UnknownLocation(location.to_string()));
        }
        if !self.segments.contains_key(&segment) {
            return Err(Error::UnknownSegment(segment.to_string()));
        }
        self.unlink(endpoint, location, segment);
        Ok(())
    }

    fn check_compatible(&self, location: LocationId, segment: SegmentId) -> Result<()> {
        let loc = self
            .locations
            .get(&location)
            .ok_or_else(|| Error::UnknownLocation(location.to_string()))?;
        let seg = self
            .segments
            .get(&segment)
            .ok_or_else(|| Error::UnknownSegment(segment.to_string()))?;

        if !loc.kind().accepts(seg.kind()) {
            tracing::warn!(
                "{} '{}' cannot be an endpoint of {} '{}', link not made",
                loc.kind(),
                loc.name(),
                seg.kind(),
                seg.name()
            );
            return Err(Error::IncompatibleSegment {
                location: loc.name().to_string(),
                location_kind: loc.kind().to_string(),
                segment: seg.name().to_string(),
                segment_kind: seg.kind().to_string(),
            });
        }
        Ok(())
    }

    /// Segment half: move the endpoint, then fix up both location lists
    pub(super) fn set_endpoint(
        &mut self,
        endpoint: Endpoint,
        segment: SegmentId,
        location: Option<LocationId>,
    ) {
        let Some(seg) = self.segments.get_mut(&segment) else {
            return;
        };
        if seg.endpoint(endpoint) == location {
            return;
        }
        let previous = seg.endpoint_set(endpoint, location);
        tracing::trace!(
            "Segment '{}' {}: {:?} -> {:?}",
            seg.name(),
            endpoint,
            previous,
            location
        );

        if let Some(previous) = previous {
            self.unlink(endpoint, previous, segment);
        }
        if let Some(location) = location {
            self.link(endpoint, location, segment);
        }

        if let Some(seg) = self.segments.get(&segment) {
            seg.post_endpoint_change(endpoint, previous);
        }
    }

    /// Location half: list the segment, then point the segment here if it doesn't already
    fn link(&mut self, endpoint: Endpoint, location: LocationId, segment: SegmentId) {
        if let Some(loc) = self.locations.get_mut(&location) {
            if loc.segment_add(endpoint, segment) {
                let loc = &*loc;
                loc.notifier()
                    .post(|n| n.on_segment_new(loc, segment, endpoint));
            }
        }

        let attached = self.segments.get(&segment).and_then(|s| s.endpoint(endpoint));
        if attached != Some(location) {
            self.set_endpoint(endpoint, segment, Some(location));
        }
    }

    /// Location half: unlist the segment, then clear its endpoint if it still points here
    fn unlink(&mut self, endpoint: Endpoint, location: LocationId, segment: SegmentId) {
        if let Some(loc) = self.locations.get_mut(&location) {
            if loc.segment_remove(endpoint, segment) {
                let loc = &*loc;
                loc.notifier()
                    .post(|n| n.on_segment_del(loc, segment, endpoint));
            }
        }

        let attached = self.segments.get(&segment).and_then(|s| s.endpoint(endpoint));
        if attached == Some(location) {
            self.set_endpoint(endpoint, segment, None);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::entity::{LocationId, SegmentId};
    use crate::error::Error;
    use crate::location::{Location, LocationNotifiee};
    use crate::manager::TravelManager;
    use crate::segment::{Endpoint, Segment, SegmentNotifiee};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct EndpointLog {
        events: RefCell<Vec<(Endpoint, Option<LocationId>)>>,
    }

    impl SegmentNotifiee for EndpointLog {
        fn on_source(&self, _segment: &Segment, previous: Option<LocationId>) {
            self.events.borrow_mut().push((Endpoint::Source, previous));
        }

        fn on_destination(&self, _segment: &Segment, previous: Option<LocationId>) {
            self.events
                .borrow_mut()
                .push((Endpoint::Destination, previous));
        }
    }

    #[derive(Default)]
    struct ListLog {
        events: RefCell<Vec<String>>,
    }

    impl LocationNotifiee for ListLog {
        fn on_segment_new(&self, location: &Location, _segment: SegmentId, endpoint: Endpoint) {
            self.events
                .borrow_mut()
                .push(format!("+{} {}", endpoint, location.name()));
        }

        fn on_segment_del(&self, location: &Location, _segment: SegmentId, endpoint: Endpoint) {
            self.events
                .borrow_mut()
                .push(format!("-{} {}", endpoint, location.name()));
        }
    }

    fn network() -> (TravelManager, LocationId, LocationId, LocationId, SegmentId) {
        let mut manager = TravelManager::new();
        let sfo = manager.airport_new("sfo").unwrap();
        let lax = manager.airport_new("lax").unwrap();
        let stanford = manager.residence_new("stanford").unwrap();
        let seg = manager.road_new("carSeg1").unwrap();
        (manager, sfo, lax, stanford, seg)
    }

    #[test]
    fn test_source_is_updates_outbound_list() {
        let (mut manager, sfo, _, _, seg) = network();

        manager.source_is(seg, Some(sfo)).unwrap();

        assert_eq!(manager.segment_by_id(seg).unwrap().source(), Some(sfo));
        assert_eq!(manager.location("sfo").unwrap().outbound_segments(), &[seg]);
        assert!(manager.location("sfo").unwrap().inbound_segments().is_empty());
    }

    #[test]
    fn test_reassign_moves_between_lists() {
        let (mut manager, sfo, lax, _, seg) = network();

        manager.destination_is(seg, Some(sfo)).unwrap();
        manager.destination_is(seg, Some(lax)).unwrap();

        assert!(manager.location("sfo").unwrap().inbound_segments().is_empty());
        assert_eq!(manager.location("lax").unwrap().inbound_segments(), &[seg]);

        manager.destination_is(seg, None).unwrap();
        assert!(manager.location("lax").unwrap().inbound_segments().is_empty());
        assert_eq!(manager.segment_by_id(seg).unwrap().destination(), None);
    }

    #[test]
    fn test_location_side_entry_sets_segment_endpoint() {
        let (mut manager, sfo, lax, _, seg) = network();

        manager.outbound_segment_is(sfo, seg).unwrap();
        assert_eq!(manager.segment_by_id(seg).unwrap().source(), Some(sfo));
        assert_eq!(manager.location("sfo").unwrap().outbound_segments(), &[seg]);

        // Claiming the segment from another location releases the first
        manager.outbound_segment_is(lax, seg).unwrap();
        assert_eq!(manager.segment_by_id(seg).unwrap().source(), Some(lax));
        assert!(manager.location("sfo").unwrap().outbound_segments().is_empty());
        assert_eq!(manager.location("lax").unwrap().outbound_segments(), &[seg]);

        manager.outbound_segment_del(lax, seg).unwrap();
        assert_eq!(manager.segment_by_id(seg).unwrap().source(), None);
        assert!(manager.location("lax").unwrap().outbound_segments().is_empty());
    }

    #[test]
    fn test_repeated_set_is_idempotent() {
        let (mut manager, sfo, _, _, seg) = network();
        let log = Rc::new(EndpointLog::default());
        manager.segment_by_id(seg).unwrap().notifier().attach(log.clone());

        manager.source_is(seg, Some(sfo)).unwrap();
        manager.source_is(seg, Some(sfo)).unwrap();
        manager.outbound_segment_is(sfo, seg).unwrap();

        assert_eq!(manager.location("sfo").unwrap().outbound_segments(), &[seg]);
        assert_eq!(*log.events.borrow(), vec![(Endpoint::Source, None)]);
    }

    #[test]
    fn test_endpoint_change_posts_once_with_previous() {
        let (mut manager, sfo, lax, _, seg) = network();
        let log = Rc::new(EndpointLog::default());
        manager.segment_by_id(seg).unwrap().notifier().attach(log.clone());

        manager.source_is(seg, Some(sfo)).unwrap();
        manager.outbound_segment_is(lax, seg).unwrap();
        manager.destination_is(seg, Some(sfo)).unwrap();

        assert_eq!(
            *log.events.borrow(),
            vec![
                (Endpoint::Source, None),
                (Endpoint::Source, Some(sfo)),
                (Endpoint::Destination, None),
            ]
        );
    }

    #[test]
    fn test_location_notifiee_sees_list_changes() {
        let (mut manager, sfo, lax, _, seg) = network();
        let log = Rc::new(ListLog::default());
        manager.location("sfo").unwrap().notifier().attach(log.clone());
        manager.location("lax").unwrap().notifier().attach(log.clone());

        manager.source_is(seg, Some(sfo)).unwrap();
        manager.source_is(seg, Some(lax)).unwrap();
        manager.delete("carSeg1");

        assert_eq!(
            *log.events.borrow(),
            vec!["+source sfo", "-source sfo", "+source lax", "-source lax"]
        );
    }

    #[test]
    fn test_residence_rejects_flight() {
        let mut manager = TravelManager::new();
        let stanford = manager.residence_new("stanford").unwrap();
        let sfo = manager.airport_new("sfo").unwrap();
        let f1 = manager.flight_new("f1").unwrap();

        let err = manager.source_is(f1, Some(stanford)).unwrap_err();
        assert!(matches!(err, Error::IncompatibleSegment { .. }));
        assert_eq!(manager.segment_by_id(f1).unwrap().source(), None);
        assert!(manager.location("stanford").unwrap().outbound_segments().is_empty());

        // The location-side entry point applies the same rule
        assert!(manager.inbound_segment_is(stanford, f1).is_err());
        assert_eq!(manager.segment_by_id(f1).unwrap().destination(), None);

        // A rejected change leaves an existing link alone
        manager.destination_is(f1, Some(sfo)).unwrap();
        assert!(manager.destination_is(f1, Some(stanford)).is_err());
        assert_eq!(manager.segment_by_id(f1).unwrap().destination(), Some(sfo));
        assert_eq!(manager.location("sfo").unwrap().inbound_segments(), &[f1]);
    }

    #[test]
    fn test_residence_accepts_road() {
        let (mut manager, _, _, stanford, seg) = network();
        manager.source_is(seg, Some(stanford)).unwrap();
        assert_eq!(
            manager.location("stanford").unwrap().outbound_segments(),
            &[seg]
        );
    }

    #[test]
    fn test_self_loop_listed_on_both_sides() {
        let (mut manager, sfo, _, _, seg) = network();
        manager.source_is(seg, Some(sfo)).unwrap();
        manager.destination_is(seg, Some(sfo)).unwrap();

        let location = manager.location("sfo").unwrap();
        assert_eq!(location.outbound_segments(), &[seg]);
        assert_eq!(location.inbound_segments(), &[seg]);

        manager.location_del("sfo").unwrap();
        let segment = manager.segment_by_id(seg).unwrap();
        assert_eq!(segment.source(), None);
        assert_eq!(segment.destination(), None);
    }

    #[test]
    fn test_stale_handles_rejected() {
        let (mut manager, sfo, _, _, seg) = network();
        manager.location_del("sfo").unwrap();

        assert!(matches!(
            manager.source_is(seg, Some(sfo)),
            Err(Error::UnknownLocation(_))
        ));
        assert!(matches!(
            manager.outbound_segment_del(sfo, seg),
            Err(Error::UnknownLocation(_))
        ));

        manager.segment_del("carSeg1").unwrap();
        assert!(matches!(
            manager.source_is(seg, None),
            Err(Error::UnknownSegment(_))
        ));
    }

    #[test]
    fn test_unlisting_and_registry_delete_are_distinct() {
        let (mut manager, sfo, lax, _, seg) = network();
        manager.source_is(seg, Some(sfo)).unwrap();
        manager.destination_is(seg, Some(lax)).unwrap();

        // Unlisting only clears the link; the segment stays registered
        manager.inbound_segment_del(lax, seg).unwrap();
        assert_eq!(manager.segment_by_id(seg).unwrap().destination(), None);
        assert!(manager.segment("carSeg1").is_some());

        // Deleting by name removes the segment and its remaining link
        let removed = manager.segment_del("carSeg1").unwrap();
        assert_eq!(removed.id(), seg);
        assert_eq!(removed.source(), None);
        assert!(manager.location("sfo").unwrap().outbound_segments().is_empty());
        assert!(manager.segment_by_id(seg).is_none());
    }
}
