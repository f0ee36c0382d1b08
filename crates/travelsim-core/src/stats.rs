//! Live entity counts maintained from manager lifecycle events

use crate::entity::{Entity, EntityClass, EntityKind, EntityRef};
use crate::manager::TravelManagerNotifiee;
use serde::Serialize;
use std::cell::Cell;

/// Per-kind counters
///
/// Counts change only in response to `on_entity_new` / `on_entity_del`,
/// never by rescanning the manager. The manager attaches one of these on
/// construction; see [`crate::TravelManager::stats`]. An extra tracker
/// must be attached before the entities it will see deleted are created.
#[derive(Debug, Default)]
pub struct Stats {
    counts: [Cell<usize>; 6],
}

/// Point-in-time copy of the counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub airports: usize,
    pub residences: usize,
    pub roads: usize,
    pub flights: usize,
    pub cars: usize,
    pub airplanes: usize,
    pub locations: usize,
    pub segments: usize,
    pub vehicles: usize,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.counts[Self::slot(kind)].get()
    }

    /// Sum of the counters of every kind in `class`
    pub fn class_count(&self, class: EntityClass) -> usize {
        EntityKind::ALL
            .into_iter()
            .filter(|k| k.class() == class)
            .map(|k| self.count(k))
            .sum()
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            airports: self.count(EntityKind::AIRPORT),
            residences: self.count(EntityKind::RESIDENCE),
            roads: self.count(EntityKind::ROAD),
            flights: self.count(EntityKind::FLIGHT),
            cars: self.count(EntityKind::CAR),
            airplanes: self.count(EntityKind::AIRPLANE),
            locations: self.class_count(EntityClass::Location),
            segments: self.class_count(EntityClass::Segment),
            vehicles: self.class_count(EntityClass::Vehicle),
        }
    }

    fn slot(kind: EntityKind) -> usize {
        use crate::entity::{LocationKind, SegmentKind, VehicleKind};

        match kind {
            EntityKind::Location(LocationKind::Airport) => 0,
            EntityKind::Location(LocationKind::Residence) => 1,
            EntityKind::Segment(SegmentKind::Road) => 2,
            EntityKind::Segment(SegmentKind::Flight) => 3,
            EntityKind::Vehicle(VehicleKind::Car) => 4,
            EntityKind::Vehicle(VehicleKind::Airplane) => 5,
        }
    }
}

impl TravelManagerNotifiee for Stats {
    fn on_entity_new(&self, entity: EntityRef<'_>) {
        let counter = &self.counts[Self::slot(entity.kind())];
        counter.set(counter.get() + 1);
    }

    fn on_entity_del(&self, entity: &Entity) {
        let counter = &self.counts[Self::slot(entity.kind())];
        let count = counter.get();
        debug_assert!(
            count > 0,
            "{} '{}' deleted without a matching creation",
            entity.kind(),
            entity.name()
        );
        counter.set(count.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager::TravelManager;
    use std::rc::Rc;

    #[test]
    fn test_counts_follow_lifecycle() {
        let mut manager = TravelManager::new();
        manager.residence_new("stanford").unwrap();
        manager.residence_new("menlopark").unwrap();
        manager.airport_new("sfo").unwrap();
        manager.road_new("carSeg1").unwrap();
        manager.flight_new("flightSeg1").unwrap();
        manager.car_new("car").unwrap();

        let stats = manager.stats();
        assert_eq!(stats.count(EntityKind::RESIDENCE), 2);
        assert_eq!(stats.count(EntityKind::AIRPORT), 1);
        assert_eq!(stats.class_count(EntityClass::Location), 3);
        assert_eq!(stats.class_count(EntityClass::Segment), 2);
        assert_eq!(stats.count(EntityKind::AIRPLANE), 0);

        manager.delete("stanford");
        manager.delete("car");
        manager.delete("nowhere");

        let snapshot = manager.stats().snapshot();
        assert_eq!(snapshot.residences, 1);
        assert_eq!(snapshot.locations, 2);
        assert_eq!(snapshot.cars, 0);
        assert_eq!(snapshot.vehicles, 0);
    }

    #[test]
    fn test_failed_creation_not_counted() {
        let mut manager = TravelManager::new();
        manager.airport_new("sfo").unwrap();
        assert!(manager.road_new("sfo").is_err());

        assert_eq!(manager.stats().count(EntityKind::ROAD), 0);
        assert_eq!(manager.stats().count(EntityKind::AIRPORT), 1);
    }

    #[test]
    fn test_external_stats_on_fresh_manager() {
        let mut manager = TravelManager::new();
        let stats = Rc::new(Stats::new());
        let id = manager.attach(stats.clone());

        manager.airplane_new("plane").unwrap();
        assert_eq!(stats.count(EntityKind::AIRPLANE), 1);

        manager.detach(id);
        manager.airplane_new("plane2").unwrap();
        assert_eq!(stats.count(EntityKind::AIRPLANE), 1);
        assert_eq!(manager.stats().count(EntityKind::AIRPLANE), 2);
    }

    #[test]
    fn test_snapshot_serializes() {
        let stats = Stats::new();
        let json = serde_json::to_value(stats.snapshot()).unwrap();
        assert_eq!(json["airports"], 0);
        assert_eq!(json["vehicles"], 0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "deleted without a matching creation")]
    fn test_delete_without_creation_is_caught() {
        use crate::entity::LocationKind;
        use crate::location::Location;

        let stats = Stats::new();
        let orphan = Entity::Location(Location::new("sfo", LocationKind::Airport));
        stats.on_entity_del(&orphan);
    }

    #[test]
    fn test_late_tracker_sees_only_later_entities() {
        let mut manager = TravelManager::new();
        manager.road_new("carSeg1").unwrap();

        let stats = Rc::new(Stats::new());
        manager.attach(stats.clone());
        manager.road_new("carSeg2").unwrap();
        manager.delete("carSeg2");

        assert_eq!(stats.count(EntityKind::ROAD), 0);
        assert_eq!(manager.stats().count(EntityKind::ROAD), 1);
    }
}
