//! Attribute shim over the travel manager
//!
//! Every entity, plus the stats tracker and the path explorer, is
//! addressed by name and read or written through string attributes. The
//! stats tracker and the explorer are singletons; `new <name> Stats` and
//! `new <name> Conn` only register another alias for them.

use std::collections::BTreeSet;

use serde::Serialize;
use travelsim_core::limits::validate_name;
use travelsim_core::{
    Conn, DollarsPerMile, Endpoint, EntityClass, EntityId, EntityKind, Error, ExploreQuery,
    Miles, MilesPerHour, PassengerCount, Path, TravelManager,
};

const STATS_KIND: &str = "Stats";
const CONN_KIND: &str = "Conn";

/// Token that clears a segment endpoint in `set`
pub const NO_LOCATION: &str = "-";

/// Result of reading an attribute
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Text(String),
    Count(usize),
    Paths(Vec<PathView>),
}

/// A path resolved to names for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathView {
    pub description: String,
    pub length: f64,
    pub segments: Vec<String>,
}

impl PathView {
    fn new(path: &Path, manager: &TravelManager) -> Self {
        Self {
            description: path.describe(manager),
            length: path.length().value(),
            segments: path
                .segments()
                .iter()
                .filter_map(|id| manager.segment_by_id(*id))
                .map(|s| s.name().to_string())
                .collect(),
        }
    }
}

/// What a name refers to
#[derive(Debug, Clone, Copy)]
enum Target {
    Entity(EntityId),
    Stats,
    Conn,
}

/// Name-addressed access to one travel network
#[derive(Debug, Default)]
pub struct InstanceManager {
    manager: TravelManager,
    stats_aliases: BTreeSet<String>,
    conn_aliases: BTreeSet<String>,
    max_paths: Option<usize>,
}

impl InstanceManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the number of paths returned by each exploration
    pub fn with_max_paths(mut self, max_paths: Option<usize>) -> Self {
        self.max_paths = max_paths;
        self
    }

    pub fn manager(&self) -> &TravelManager {
        &self.manager
    }

    /// Create an instance; `kind` is an entity kind, `Stats` or `Conn`
    pub fn instance_new(&mut self, name: &str, kind: &str) -> anyhow::Result<()> {
        if self.is_alias(name) {
            return Err(Error::NameInUse(name.to_string()).into());
        }

        match kind {
            STATS_KIND | CONN_KIND => {
                validate_name(name).map_err(Error::from)?;
                if self.manager.is_name_in_use(name) {
                    return Err(Error::NameInUse(name.to_string()).into());
                }
                let aliases = if kind == STATS_KIND {
                    &mut self.stats_aliases
                } else {
                    &mut self.conn_aliases
                };
                aliases.insert(name.to_string());
                tracing::debug!("Registered {} alias '{}'", kind, name);
            }
            _ => {
                let kind: EntityKind = kind.parse()?;
                self.manager.create(name, kind)?;
            }
        }
        Ok(())
    }

    /// Delete an instance or drop an alias
    pub fn instance_del(&mut self, name: &str) -> anyhow::Result<()> {
        if self.stats_aliases.remove(name) || self.conn_aliases.remove(name) {
            return Ok(());
        }
        match self.manager.delete(name) {
            Some(_) => Ok(()),
            None => anyhow::bail!("Unknown instance '{}'", name),
        }
    }

    /// Read `attribute` of the instance called `name`
    pub fn attribute(&self, name: &str, attribute: &str) -> anyhow::Result<AttributeValue> {
        match self.resolve(name)? {
            Target::Entity(EntityId::Location(id)) => {
                let index = segment_number(attribute)
                    .ok_or_else(|| invalid_attribute(attribute, EntityClass::Location.as_str()))?;
                let name = self
                    .manager
                    .location_by_id(id)
                    .and_then(|l| l.outbound_segment(index - 1))
                    .and_then(|s| self.manager.segment_by_id(s))
                    .map(|s| s.name().to_string())
                    .unwrap_or_default();
                Ok(AttributeValue::Text(name))
            }
            Target::Entity(EntityId::Segment(id)) => {
                let Some(segment) = self.manager.segment_by_id(id) else {
                    anyhow::bail!("Unknown instance '{}'", name);
                };
                let text = match attribute {
                    "source" => self.location_name(segment.source()),
                    "destination" => self.location_name(segment.destination()),
                    "length" => segment.length().to_string(),
                    other => return Err(invalid_attribute(other, EntityClass::Segment.as_str())),
                };
                Ok(AttributeValue::Text(text))
            }
            Target::Entity(EntityId::Vehicle(id)) => {
                let Some(vehicle) = self.manager.vehicle_by_id(id) else {
                    anyhow::bail!("Unknown instance '{}'", name);
                };
                let text = match attribute {
                    "capacity" => vehicle.capacity().to_string(),
                    "speed" => vehicle.speed().to_string(),
                    "cost" => vehicle.cost().to_string(),
                    other => return Err(invalid_attribute(other, EntityClass::Vehicle.as_str())),
                };
                Ok(AttributeValue::Text(text))
            }
            Target::Stats => {
                let stats = self.manager.stats();
                if let Ok(kind) = attribute.parse::<EntityKind>() {
                    Ok(AttributeValue::Count(stats.count(kind)))
                } else if let Ok(class) = attribute.parse::<EntityClass>() {
                    Ok(AttributeValue::Count(stats.class_count(class)))
                } else {
                    Err(invalid_attribute(attribute, STATS_KIND))
                }
            }
            Target::Conn => self.explore(attribute),
        }
    }

    /// Write `attribute` of the instance called `name`
    pub fn attribute_is(&mut self, name: &str, attribute: &str, value: &str) -> anyhow::Result<()> {
        match self.resolve(name)? {
            Target::Entity(EntityId::Location(_)) => {
                anyhow::bail!("All attributes of Location are read-only")
            }
            Target::Stats => anyhow::bail!("All attributes of Stats are read-only"),
            Target::Conn => anyhow::bail!("All attributes of Conn are read-only"),
            Target::Entity(EntityId::Segment(id)) => {
                let endpoint = match attribute {
                    "source" => Endpoint::Source,
                    "destination" => Endpoint::Destination,
                    "length" => {
                        let length = Miles::new(parse_number(value, "length")?)?;
                        if let Some(segment) = self.manager.segment_by_id_mut(id) {
                            segment.length_is(length);
                        }
                        return Ok(());
                    }
                    other => return Err(invalid_attribute(other, EntityClass::Segment.as_str())),
                };

                let location = if value == NO_LOCATION {
                    None
                } else {
                    let location = self
                        .manager
                        .location(value)
                        .ok_or_else(|| anyhow::anyhow!("Unknown location '{}'", value))?;
                    Some(location.id())
                };
                self.manager.endpoint_is(endpoint, id, location)?;
                Ok(())
            }
            Target::Entity(EntityId::Vehicle(_)) => {
                let Some(vehicle) = self.manager.vehicle_mut(name) else {
                    anyhow::bail!("Unknown instance '{}'", name);
                };
                match attribute {
                    "capacity" => {
                        let capacity: i64 = value
                            .trim()
                            .parse()
                            .map_err(|_| anyhow::anyhow!("Invalid capacity ('{}')", value))?;
                        vehicle.capacity_is(PassengerCount::new(capacity)?);
                    }
                    "speed" => vehicle.speed_is(MilesPerHour::new(parse_number(value, "speed")?)?),
                    "cost" => vehicle.cost_is(DollarsPerMile::new(parse_number(value, "cost")?)?),
                    other => return Err(invalid_attribute(other, EntityClass::Vehicle.as_str())),
                }
                Ok(())
            }
        }
    }

    /// `explore <location> distance <miles>`
    fn explore(&self, query: &str) -> anyhow::Result<AttributeValue> {
        let tokens: Vec<&str> = query.split_whitespace().collect();
        let [explore, location, distance, budget] = tokens.as_slice() else {
            return Err(invalid_attribute(query, CONN_KIND));
        };
        if *explore != "explore" || *distance != "distance" {
            return Err(invalid_attribute(query, CONN_KIND));
        }

        let start = self
            .manager
            .location(location)
            .ok_or_else(|| anyhow::anyhow!("Unknown location '{}'", location))?;
        let budget = Miles::new(parse_number(budget, "distance")?)?;

        let mut explore_query = ExploreQuery::new(start.id(), budget);
        if let Some(max) = self.max_paths {
            explore_query = explore_query.with_max_paths(max);
        }
        let result = Conn::explore(&self.manager, &explore_query);
        if result.stats.truncated {
            tracing::info!(
                "Exploration from '{}' stopped after {} paths",
                location,
                result.paths.len()
            );
        }

        Ok(AttributeValue::Paths(
            result
                .paths
                .iter()
                .map(|p| PathView::new(p, &self.manager))
                .collect(),
        ))
    }

    fn resolve(&self, name: &str) -> anyhow::Result<Target> {
        if self.stats_aliases.contains(name) {
            return Ok(Target::Stats);
        }
        if self.conn_aliases.contains(name) {
            return Ok(Target::Conn);
        }
        self.manager
            .entity_id(name)
            .map(Target::Entity)
            .ok_or_else(|| anyhow::anyhow!("Unknown instance '{}'", name))
    }

    fn is_alias(&self, name: &str) -> bool {
        self.stats_aliases.contains(name) || self.conn_aliases.contains(name)
    }

    fn location_name(&self, id: Option<travelsim_core::LocationId>) -> String {
        id.and_then(|id| self.manager.location_by_id(id))
            .map(|l| l.name().to_string())
            .unwrap_or_default()
    }
}

fn invalid_attribute(attribute: &str, class: &str) -> anyhow::Error {
    anyhow::anyhow!("Invalid attribute ('{}') specified for {}", attribute, class)
}

/// `segmentN` with N counted from 1
fn segment_number(attribute: &str) -> Option<usize> {
    attribute
        .strip_prefix("segment")
        .and_then(|n| n.parse::<usize>().ok())
        .filter(|n| *n >= 1)
}

fn parse_number(value: &str, what: &str) -> anyhow::Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| anyhow::anyhow!("Invalid {} ('{}')", what, value))
}
