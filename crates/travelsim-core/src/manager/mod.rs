//! The travel manager: owner of every location, segment and vehicle
//!
//! All entities live in one flat namespace. Creation and deletion go
//! through the manager, which posts lifecycle events to its attached
//! [`TravelManagerNotifiee`]s after the structural change is complete.

mod link;

use crate::entity::{
    Entity, EntityId, EntityKind, EntityRef, LocationId, LocationKind, SegmentId, SegmentKind,
    VehicleId, VehicleKind,
};
use crate::error::{Error, Result};
use crate::limits::validate_name;
use crate::location::Location;
use crate::notify::{Notifier, SubscriptionId};
use crate::segment::{Endpoint, Segment};
use crate::stats::Stats;
use crate::vehicle::Vehicle;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

/// Observer of entity creation and deletion
pub trait TravelManagerNotifiee {
    /// An entity was created and registered under its name
    fn on_entity_new(&self, _entity: EntityRef<'_>) {}

    /// An entity was deleted; its links have already been cleared
    fn on_entity_del(&self, _entity: &Entity) {}
}

/// Registry of the whole network
#[derive(Debug)]
pub struct TravelManager {
    names: BTreeMap<String, EntityId>,
    locations: HashMap<LocationId, Location>,
    segments: HashMap<SegmentId, Segment>,
    vehicles: HashMap<VehicleId, Vehicle>,
    notifier: Rc<Notifier<dyn TravelManagerNotifiee>>,
    stats: Rc<Stats>,
}

impl TravelManager {
    /// Create an empty manager with its stats tracker attached
    pub fn new() -> Self {
        let notifier: Rc<Notifier<dyn TravelManagerNotifiee>> = Rc::new(Notifier::new());
        let stats = Rc::new(Stats::new());
        notifier.attach(stats.clone());

        Self {
            names: BTreeMap::new(),
            locations: HashMap::new(),
            segments: HashMap::new(),
            vehicles: HashMap::new(),
            notifier,
            stats,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Notification
    // ─────────────────────────────────────────────────────────────────────────

    /// Shared handle to the lifecycle notifier
    pub fn notifier(&self) -> &Rc<Notifier<dyn TravelManagerNotifiee>> {
        &self.notifier
    }

    pub fn attach(&self, notifiee: Rc<dyn TravelManagerNotifiee>) -> SubscriptionId {
        self.notifier.attach(notifiee)
    }

    pub fn detach(&self, id: SubscriptionId) -> bool {
        self.notifier.detach(id)
    }

    /// Live per-kind entity counts
    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Creation
    // ─────────────────────────────────────────────────────────────────────────

    /// Create an entity of the given kind under `name`
    pub fn create(&mut self, name: &str, kind: EntityKind) -> Result<EntityId> {
        match kind {
            EntityKind::Location(k) => self.location_new(name, k).map(EntityId::Location),
            EntityKind::Segment(k) => self.segment_new(name, k).map(EntityId::Segment),
            EntityKind::Vehicle(k) => self.vehicle_new(name, k).map(EntityId::Vehicle),
        }
    }

    pub fn airport_new(&mut self, name: &str) -> Result<LocationId> {
        self.location_new(name, LocationKind::Airport)
    }

    pub fn residence_new(&mut self, name: &str) -> Result<LocationId> {
        self.location_new(name, LocationKind::Residence)
    }

    pub fn road_new(&mut self, name: &str) -> Result<SegmentId> {
        self.segment_new(name, SegmentKind::Road)
    }

    pub fn flight_new(&mut self, name: &str) -> Result<SegmentId> {
        self.segment_new(name, SegmentKind::Flight)
    }

    pub fn car_new(&mut self, name: &str) -> Result<VehicleId> {
        self.vehicle_new(name, VehicleKind::Car)
    }

    pub fn airplane_new(&mut self, name: &str) -> Result<VehicleId> {
        self.vehicle_new(name, VehicleKind::Airplane)
    }

    pub fn location_new(&mut self, name: &str, kind: LocationKind) -> Result<LocationId> {
        self.check_name_free(name)?;
        let location = Location::new(name, kind);
        let id = location.id();
        self.locations.insert(id, location);
        self.register(name, EntityId::Location(id));
        Ok(id)
    }

    pub fn segment_new(&mut self, name: &str, kind: SegmentKind) -> Result<SegmentId> {
        self.check_name_free(name)?;
        let segment = Segment::new(name, kind);
        let id = segment.id();
        self.segments.insert(id, segment);
        self.register(name, EntityId::Segment(id));
        Ok(id)
    }

    pub fn vehicle_new(&mut self, name: &str, kind: VehicleKind) -> Result<VehicleId> {
        self.check_name_free(name)?;
        let vehicle = Vehicle::new(name, kind);
        let id = vehicle.id();
        self.vehicles.insert(id, vehicle);
        self.register(name, EntityId::Vehicle(id));
        Ok(id)
    }

    /// Check if `name` is already used by any entity
    pub fn is_name_in_use(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    fn check_name_free(&self, name: &str) -> Result<()> {
        validate_name(name)?;
        if self.is_name_in_use(name) {
            tracing::debug!("Name '{}' already in use, skipping creation", name);
            return Err(Error::NameInUse(name.to_string()));
        }
        Ok(())
    }

    fn register(&mut self, name: &str, id: EntityId) {
        self.names.insert(name.to_string(), id);
        if let Some(entity) = self.entity(id) {
            tracing::debug!("Created {} '{}'", entity.kind(), name);
            self.notifier.post(|n| n.on_entity_new(entity));
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lookup
    // ─────────────────────────────────────────────────────────────────────────

    /// Look up any entity by name
    pub fn lookup(&self, name: &str) -> Option<EntityRef<'_>> {
        self.names.get(name).and_then(|id| self.entity(*id))
    }

    /// Handle of the entity registered under `name`
    pub fn entity_id(&self, name: &str) -> Option<EntityId> {
        self.names.get(name).copied()
    }

    /// Resolve a handle to the entity it denotes, if still registered
    pub fn entity(&self, id: EntityId) -> Option<EntityRef<'_>> {
        match id {
            EntityId::Location(id) => self.locations.get(&id).map(EntityRef::Location),
            EntityId::Segment(id) => self.segments.get(&id).map(EntityRef::Segment),
            EntityId::Vehicle(id) => self.vehicles.get(&id).map(EntityRef::Vehicle),
        }
    }

    pub fn location(&self, name: &str) -> Option<&Location> {
        match self.names.get(name)? {
            EntityId::Location(id) => self.locations.get(id),
            _ => None,
        }
    }

    pub fn airport(&self, name: &str) -> Option<&Location> {
        self.location(name)
            .filter(|l| l.kind() == LocationKind::Airport)
    }

    pub fn residence(&self, name: &str) -> Option<&Location> {
        self.location(name)
            .filter(|l| l.kind() == LocationKind::Residence)
    }

    pub fn location_by_id(&self, id: LocationId) -> Option<&Location> {
        self.locations.get(&id)
    }

    pub fn segment(&self, name: &str) -> Option<&Segment> {
        match self.names.get(name)? {
            EntityId::Segment(id) => self.segments.get(id),
            _ => None,
        }
    }

    pub fn segment_mut(&mut self, name: &str) -> Option<&mut Segment> {
        match self.names.get(name)? {
            EntityId::Segment(id) => self.segments.get_mut(id),
            _ => None,
        }
    }

    pub fn road(&self, name: &str) -> Option<&Segment> {
        self.segment(name).filter(|s| s.kind() == SegmentKind::Road)
    }

    pub fn flight(&self, name: &str) -> Option<&Segment> {
        self.segment(name).filter(|s| s.kind() == SegmentKind::Flight)
    }

    pub fn segment_by_id(&self, id: SegmentId) -> Option<&Segment> {
        self.segments.get(&id)
    }

    pub fn segment_by_id_mut(&mut self, id: SegmentId) -> Option<&mut Segment> {
        self.segments.get_mut(&id)
    }

    pub fn vehicle(&self, name: &str) -> Option<&Vehicle> {
        match self.names.get(name)? {
            EntityId::Vehicle(id) => self.vehicles.get(id),
            _ => None,
        }
    }

    pub fn vehicle_mut(&mut self, name: &str) -> Option<&mut Vehicle> {
        match self.names.get(name)? {
            EntityId::Vehicle(id) => self.vehicles.get_mut(id),
            _ => None,
        }
    }

    pub fn car(&self, name: &str) -> Option<&Vehicle> {
        self.vehicle(name).filter(|v| v.kind() == VehicleKind::Car)
    }

    pub fn airplane(&self, name: &str) -> Option<&Vehicle> {
        self.vehicle(name)
            .filter(|v| v.kind() == VehicleKind::Airplane)
    }

    pub fn vehicle_by_id(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.get(&id)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Iteration (name order)
    // ─────────────────────────────────────────────────────────────────────────

    pub fn entities(&self) -> impl Iterator<Item = EntityRef<'_>> + '_ {
        self.names.values().filter_map(|id| self.entity(*id))
    }

    pub fn locations(&self) -> impl Iterator<Item = &Location> + '_ {
        self.names.values().filter_map(|id| match id {
            EntityId::Location(id) => self.locations.get(id),
            _ => None,
        })
    }

    pub fn segments(&self) -> impl Iterator<Item = &Segment> + '_ {
        self.names.values().filter_map(|id| match id {
            EntityId::Segment(id) => self.segments.get(id),
            _ => None,
        })
    }

    pub fn vehicles(&self) -> impl Iterator<Item = &Vehicle> + '_ {
        self.names.values().filter_map(|id| match id {
            EntityId::Vehicle(id) => self.vehicles.get(id),
            _ => None,
        })
    }

    /// Number of registered entities of any kind
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Deletion
    // ─────────────────────────────────────────────────────────────────────────

    /// Delete the entity registered under `name`, clearing every link to it
    ///
    /// Returns `None` without side effects if the name is unknown.
    pub fn delete(&mut self, name: &str) -> Option<Entity> {
        let id = self.entity_id(name)?;
        self.remove(name, id)
    }

    /// Delete a location; `None` if `name` is unknown or not a location
    pub fn location_del(&mut self, name: &str) -> Option<Location> {
        match self.entity_id(name)? {
            id @ EntityId::Location(_) => match self.remove(name, id)? {
                Entity::Location(location) => Some(location),
                _ => None,
            },
            _ => None,
        }
    }

    /// Delete a segment; `None` if `name` is unknown or not a segment
    pub fn segment_del(&mut self, name: &str) -> Option<Segment> {
        match self.entity_id(name)? {
            id @ EntityId::Segment(_) => match self.remove(name, id)? {
                Entity::Segment(segment) => Some(segment),
                _ => None,
            },
            _ => None,
        }
    }

    /// Delete a vehicle; `None` if `name` is unknown or not a vehicle
    pub fn vehicle_del(&mut self, name: &str) -> Option<Vehicle> {
        match self.entity_id(name)? {
            id @ EntityId::Vehicle(_) => match self.remove(name, id)? {
                Entity::Vehicle(vehicle) => Some(vehicle),
                _ => None,
            },
            _ => None,
        }
    }

    fn remove(&mut self, name: &str, id: EntityId) -> Option<Entity> {
        let entity = match id {
            EntityId::Location(id) => {
                // Detach through the segment-side entry point so that each
                // segment posts its endpoint change
                for endpoint in [Endpoint::Source, Endpoint::Destination] {
                    let attached = self
                        .locations
                        .get(&id)
                        .map(|l| l.segments(endpoint).to_vec())
                        .unwrap_or_default();
                    for segment in attached {
                        self.set_endpoint(endpoint, segment, None);
                    }
                }
                Entity::Location(self.locations.remove(&id)?)
            }
            EntityId::Segment(id) => {
                self.set_endpoint(Endpoint::Source, id, None);
                self.set_endpoint(Endpoint::Destination, id, None);
                Entity::Segment(self.segments.remove(&id)?)
            }
            EntityId::Vehicle(id) => Entity::Vehicle(self.vehicles.remove(&id)?),
        };

        self.names.remove(name);
        tracing::debug!("Deleted {} '{}'", entity.kind(), name);
        self.notifier.post(|n| n.on_entity_del(&entity));
        Some(entity)
    }
}

impl Default for TravelManager {
    fn default() -> Self {
        Self::new()
    }
}
