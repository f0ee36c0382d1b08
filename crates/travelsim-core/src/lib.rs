//! Travelsim Core - Transportation network model
//!
//! This crate provides the entity registry, the segment/location link
//! maintenance, lifecycle notification, live statistics and bounded path
//! enumeration for the travelsim simulator.

pub mod conn;
pub mod entity;
pub mod error;
pub mod limits;
pub mod location;
pub mod manager;
pub mod notify;
pub mod segment;
pub mod stats;
pub mod value;
pub mod vehicle;

pub use conn::{Conn, ExploreQuery, ExploreResult, ExploreStats, Path};
pub use entity::{
    Entity, EntityClass, EntityId, EntityKind, EntityRef, LocationId, LocationKind, SegmentId,
    SegmentKind, VehicleId, VehicleKind,
};
pub use error::{Error, Result};
pub use location::{Location, LocationNotifiee};
pub use manager::{TravelManager, TravelManagerNotifiee};
pub use notify::{Notifier, SubscriptionId};
pub use segment::{Endpoint, Segment, SegmentNotifiee};
pub use stats::{Stats, StatsSnapshot};
pub use value::{DollarsPerMile, Miles, MilesPerHour, PassengerCount};
pub use vehicle::{Vehicle, VehicleNotifiee};
