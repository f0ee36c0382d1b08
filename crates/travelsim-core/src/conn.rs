//! Bounded path enumeration
//!
//! [`Conn`] lists every loop-free path leaving a location whose total
//! length stays within a budget. Every qualifying prefix is reported, not
//! only maximal paths: if `A->B` and `A->B->C` both fit, both are returned.

use crate::entity::{LocationId, SegmentId};
use crate::manager::TravelManager;
use crate::value::Miles;
use serde::Serialize;
use std::collections::HashSet;

/// A contiguous chain of segments
///
/// Built only by the enumerator, so consecutive segments always share an
/// endpoint. Holds segment handles, not copies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Path {
    segments: Vec<SegmentId>,
    length: Miles,
}

impl Path {
    pub fn segments(&self) -> &[SegmentId] {
        &self.segments
    }

    pub fn segment(&self, index: usize) -> Option<SegmentId> {
        self.segments.get(index).copied()
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Sum of the segment lengths
    pub fn length(&self) -> Miles {
        self.length
    }

    /// Render as `sfo(carSeg4:20) menlopark(carSeg3:20) stanford`
    ///
    /// Entities deleted since the path was produced render as `?`.
    pub fn describe(&self, manager: &TravelManager) -> String {
        let location_name = |id: Option<LocationId>| {
            id.and_then(|id| manager.location_by_id(id))
                .map_or("?", |l| l.name())
        };

        let mut out = String::new();
        for id in &self.segments {
            match manager.segment_by_id(*id) {
                Some(segment) => out.push_str(&format!(
                    "{}({}:{}) ",
                    location_name(segment.source()),
                    segment.name(),
                    segment.length()
                )),
                None => out.push_str("?(?) "),
            }
        }

        if let Some(last) = self.segments.last() {
            let destination = manager.segment_by_id(*last).and_then(|s| s.destination());
            out.push_str(location_name(destination));
        }
        out
    }
}

/// Exploration query builder: start, budget and an optional path cap
#[derive(Debug, Clone, Serialize)]
pub struct ExploreQuery {
    /// Starting location
    pub start: LocationId,

    /// Maximum total length of a returned path
    pub max_length: Miles,

    /// Stop after this many paths (None = all)
    pub max_paths: Option<usize>,
}

impl ExploreQuery {
    pub fn new(start: LocationId, max_length: Miles) -> Self {
        Self {
            start,
            max_length,
            max_paths: None,
        }
    }

    /// Cap the number of paths returned
    pub fn with_max_paths(mut self, max: usize) -> Self {
        self.max_paths = Some(max);
        self
    }
}

/// Exploration statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExploreStats {
    pub locations_visited: usize,
    pub segments_considered: usize,
    pub pruned_by_length: usize,
    pub pruned_as_revisit: usize,
    /// The path cap was hit before the search finished
    pub truncated: bool,
}

/// Result of an exploration
#[derive(Debug, Clone, Serialize)]
pub struct ExploreResult {
    pub paths: Vec<Path>,
    pub stats: ExploreStats,
}

/// Path enumeration engine; reads the network, never mutates it
pub struct Conn;

impl Conn {
    /// All simple paths from `start` with total length at most `max_length`
    pub fn paths(manager: &TravelManager, start: LocationId, max_length: Miles) -> Vec<Path> {
        Self::explore(manager, &ExploreQuery::new(start, max_length)).paths
    }

    /// Execute an exploration query
    pub fn explore(manager: &TravelManager, query: &ExploreQuery) -> ExploreResult {
        tracing::debug!(
            "Exploring: start={}, max_length={}, max_paths={:?}",
            query.start,
            query.max_length,
            query.max_paths
        );

        let mut walk = Walk {
            manager,
            max_length: query.max_length,
            max_paths: query.max_paths,
            visited: HashSet::from([query.start]),
            segments: Vec::new(),
            length: Miles::ZERO,
            paths: Vec::new(),
            stats: ExploreStats::default(),
        };

        // Only non-empty paths are reported, and with a zero budget the
        // empty path is the only candidate
        if !query.max_length.is_zero() && manager.location_by_id(query.start).is_some() {
            walk.extend_from(query.start);
        }

        tracing::debug!(
            "Exploration found {} paths, visited {} locations, considered {} segments",
            walk.paths.len(),
            walk.stats.locations_visited,
            walk.stats.segments_considered
        );

        ExploreResult {
            paths: walk.paths,
            stats: walk.stats,
        }
    }
}

/// Depth-first search state
///
/// `segments`, `length` and `visited` describe the path currently being
/// extended and are restored after each recursive call.
struct Walk<'a> {
    manager: &'a TravelManager,
    max_length: Miles,
    max_paths: Option<usize>,
    visited: HashSet<LocationId>,
    segments: Vec<SegmentId>,
    length: Miles,
    paths: Vec<Path>,
    stats: ExploreStats,
}

impl Walk<'_> {
    /// Returns false once the path cap stops the search
    fn extend_from(&mut self, location: LocationId) -> bool {
        let manager = self.manager;
        let Some(location) = manager.location_by_id(location) else {
            return true;
        };
        self.stats.locations_visited += 1;

        for &id in location.outbound_segments() {
            let Some(segment) = manager.segment_by_id(id) else {
                continue;
            };
            self.stats.segments_considered += 1;

            let candidate = self.length + segment.length();
            if candidate > self.max_length {
                self.stats.pruned_by_length += 1;
                continue;
            }
            let Some(destination) = segment.destination() else {
                continue;
            };
            if self.visited.contains(&destination) {
                self.stats.pruned_as_revisit += 1;
                continue;
            }

            if self.max_paths.is_some_and(|max| self.paths.len() >= max) {
                self.stats.truncated = true;
                return false;
            }

            let previous_length = self.length;
            self.segments.push(id);
            self.length = candidate;
            self.visited.insert(destination);
            self.paths.push(Path {
                segments: self.segments.clone(),
                length: candidate,
            });

            let keep_going = self.extend_from(destination);

            self.visited.remove(&destination);
            self.length = previous_length;
            self.segments.pop();

            if !keep_going {
                return false;
            }
        }
        true
    }
}
