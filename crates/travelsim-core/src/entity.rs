//! Entity identifiers and kind tags

use crate::error::Error;
use crate::location::Location;
use crate::segment::Segment;
use crate::vehicle::Vehicle;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

/// Unique identifier for a location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LocationId(pub Ulid);

impl LocationId {
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for LocationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SegmentId(pub Ulid);

impl SegmentId {
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for SegmentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VehicleId(pub Ulid);

impl VehicleId {
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for VehicleId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle to any registered entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityId {
    Location(LocationId),
    Segment(SegmentId),
    Vehicle(VehicleId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LocationKind {
    Airport,
    Residence,
}

impl LocationKind {
    /// Whether a segment of `kind` may use a location of this kind as an endpoint
    pub fn accepts(self, kind: SegmentKind) -> bool {
        match (self, kind) {
            (LocationKind::Airport, _) => true,
            (LocationKind::Residence, SegmentKind::Road) => true,
            (LocationKind::Residence, SegmentKind::Flight) => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LocationKind::Airport => "Airport",
            LocationKind::Residence => "Residence",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SegmentKind {
    Road,
    Flight,
}

impl SegmentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SegmentKind::Road => "Road",
            SegmentKind::Flight => "Flight",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VehicleKind {
    Car,
    Airplane,
}

impl VehicleKind {
    pub fn as_str(self) -> &'static str {
        match self {
            VehicleKind::Car => "Car",
            VehicleKind::Airplane => "Airplane",
        }
    }
}

/// Coarse entity classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityClass {
    Location,
    Segment,
    Vehicle,
}

impl EntityClass {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityClass::Location => "Location",
            EntityClass::Segment => "Segment",
            EntityClass::Vehicle => "Vehicle",
        }
    }
}

impl fmt::Display for EntityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityClass {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Location" => Ok(EntityClass::Location),
            "Segment" => Ok(EntityClass::Segment),
            "Vehicle" => Ok(EntityClass::Vehicle),
            other => Err(Error::UnknownKind(other.to_string())),
        }
    }
}

/// Concrete entity kind, the tag passed to [`crate::TravelManager::create`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    Location(LocationKind),
    Segment(SegmentKind),
    Vehicle(VehicleKind),
}

impl EntityKind {
    pub const AIRPORT: EntityKind = EntityKind::Location(LocationKind::Airport);
    pub const RESIDENCE: EntityKind = EntityKind::Location(LocationKind::Residence);
    pub const ROAD: EntityKind = EntityKind::Segment(SegmentKind::Road);
    pub const FLIGHT: EntityKind = EntityKind::Segment(SegmentKind::Flight);
    pub const CAR: EntityKind = EntityKind::Vehicle(VehicleKind::Car);
    pub const AIRPLANE: EntityKind = EntityKind::Vehicle(VehicleKind::Airplane);

    /// All concrete kinds
    pub const ALL: [EntityKind; 6] = [
        Self::AIRPORT,
        Self::RESIDENCE,
        Self::ROAD,
        Self::FLIGHT,
        Self::CAR,
        Self::AIRPLANE,
    ];

    pub fn class(self) -> EntityClass {
        match self {
            EntityKind::Location(_) => EntityClass::Location,
            EntityKind::Segment(_) => EntityClass::Segment,
            EntityKind::Vehicle(_) => EntityClass::Vehicle,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Location(k) => k.as_str(),
            EntityKind::Segment(k) => k.as_str(),
            EntityKind::Vehicle(k) => k.as_str(),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| Error::UnknownKind(s.to_string()))
    }
}

impl From<LocationKind> for EntityKind {
    fn from(k: LocationKind) -> Self {
        EntityKind::Location(k)
    }
}

impl From<SegmentKind> for EntityKind {
    fn from(k: SegmentKind) -> Self {
        EntityKind::Segment(k)
    }
}

impl From<VehicleKind> for EntityKind {
    fn from(k: VehicleKind) -> Self {
        EntityKind::Vehicle(k)
    }
}

impl fmt::Display for LocationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for VehicleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Borrowed view of a registered entity, returned by name lookup
#[derive(Debug, Clone, Copy)]
pub enum EntityRef<'a> {
    Location(&'a Location),
    Segment(&'a Segment),
    Vehicle(&'a Vehicle),
}

impl<'a> EntityRef<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            EntityRef::Location(l) => l.name(),
            EntityRef::Segment(s) => s.name(),
            EntityRef::Vehicle(v) => v.name(),
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            EntityRef::Location(l) => l.kind().into(),
            EntityRef::Segment(s) => s.kind().into(),
            EntityRef::Vehicle(v) => v.kind().into(),
        }
    }
}

/// An entity removed from the manager, handed back by value
#[derive(Debug)]
pub enum Entity {
    Location(Location),
    Segment(Segment),
    Vehicle(Vehicle),
}

impl Entity {
    pub fn name(&self) -> &str {
        match self {
            Entity::Location(l) => l.name(),
            Entity::Segment(s) => s.name(),
            Entity::Vehicle(v) => v.name(),
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Location(l) => l.kind().into(),
            Entity::Segment(s) => s.kind().into(),
            Entity::Vehicle(v) => v.kind().into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip_names() {
        for kind in EntityKind::ALL {
            assert_eq!(kind.as_str().parse::<EntityKind>().unwrap(), kind);
        }
        assert_eq!(
            "Stats".parse::<EntityKind>(),
            Err(Error::UnknownKind("Stats".into()))
        );
    }

    #[test]
    fn test_compatibility_table() {
        assert!(LocationKind::Airport.accepts(SegmentKind::Road));
        assert!(LocationKind::Airport.accepts(SegmentKind::Flight));
        assert!(LocationKind::Residence.accepts(SegmentKind::Road));
        assert!(!LocationKind::Residence.accepts(SegmentKind::Flight));
    }

    #[test]
    fn test_kind_class() {
        assert_eq!(EntityKind::AIRPORT.class(), EntityClass::Location);
        assert_eq!(EntityKind::FLIGHT.class(), EntityClass::Segment);
        assert_eq!(EntityKind::CAR.class(), EntityClass::Vehicle);
    }
}
