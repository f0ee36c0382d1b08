//! Vehicle type

use crate::entity::{VehicleId, VehicleKind};
use crate::notify::Notifier;
use crate::value::{DollarsPerMile, MilesPerHour, PassengerCount};

/// Observer of a single vehicle's attributes
pub trait VehicleNotifiee {
    fn on_capacity(&self, _vehicle: &Vehicle) {}

    fn on_speed(&self, _vehicle: &Vehicle) {}

    fn on_cost(&self, _vehicle: &Vehicle) {}
}

/// A car or airplane; not attached to the network graph
#[derive(Debug)]
pub struct Vehicle {
    id: VehicleId,
    name: String,
    kind: VehicleKind,
    capacity: PassengerCount,
    speed: MilesPerHour,
    cost: DollarsPerMile,
    notifier: Notifier<dyn VehicleNotifiee>,
}

impl Vehicle {
    pub(crate) fn new(name: impl Into<String>, kind: VehicleKind) -> Self {
        Self {
            id: VehicleId::new(),
            name: name.into(),
            kind,
            capacity: PassengerCount::default(),
            speed: MilesPerHour::default(),
            cost: DollarsPerMile::default(),
            notifier: Notifier::new(),
        }
    }

    pub fn id(&self) -> VehicleId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> VehicleKind {
        self.kind
    }

    pub fn capacity(&self) -> PassengerCount {
        self.capacity
    }

    pub fn speed(&self) -> MilesPerHour {
        self.speed
    }

    pub fn cost(&self) -> DollarsPerMile {
        self.cost
    }

    pub fn capacity_is(&mut self, capacity: PassengerCount) {
        if self.capacity != capacity {
            self.capacity = capacity;
            self.notifier.post(|n| n.on_capacity(self));
        }
    }

    pub fn speed_is(&mut self, speed: MilesPerHour) {
        if self.speed != speed {
            self.speed = speed;
            self.notifier.post(|n| n.on_speed(self));
        }
    }

    pub fn cost_is(&mut self, cost: DollarsPerMile) {
        if self.cost != cost {
            self.cost = cost;
            self.notifier.post(|n| n.on_cost(self));
        }
    }

    pub fn notifier(&self) -> &Notifier<dyn VehicleNotifiee> {
        &self.notifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct ChangeLog {
        events: RefCell<Vec<&'static str>>,
    }

    impl VehicleNotifiee for ChangeLog {
        fn on_capacity(&self, _vehicle: &Vehicle) {
            self.events.borrow_mut().push("capacity");
        }

        fn on_speed(&self, _vehicle: &Vehicle) {
            self.events.borrow_mut().push("speed");
        }

        fn on_cost(&self, _vehicle: &Vehicle) {
            self.events.borrow_mut().push("cost");
        }
    }

    #[test]
    fn test_vehicle_defaults() {
        let vehicle = Vehicle::new("plane", VehicleKind::Airplane);

        assert_eq!(vehicle.name(), "plane");
        assert_eq!(vehicle.capacity().value(), 0);
        assert_eq!(vehicle.speed().value(), 0.0);
        assert_eq!(vehicle.cost().value(), 0.0);
    }

    #[test]
    fn test_attribute_changes_post_once() {
        let mut vehicle = Vehicle::new("car", VehicleKind::Car);
        let log = Rc::new(ChangeLog::default());
        vehicle.notifier().attach(log.clone());

        vehicle.speed_is(MilesPerHour::new(70.0).unwrap());
        vehicle.capacity_is(PassengerCount::new(5).unwrap());
        vehicle.cost_is(DollarsPerMile::new(0.75).unwrap());

        // Unchanged values do not post
        vehicle.speed_is(MilesPerHour::new(70.0).unwrap());
        vehicle.cost_is(DollarsPerMile::new(0.75001).unwrap());

        assert_eq!(*log.events.borrow(), vec!["speed", "capacity", "cost"]);
        assert_eq!(vehicle.capacity().value(), 5);
    }
}
