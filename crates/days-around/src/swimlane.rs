//! Partition events into swimlanes keyed by a caller-supplied group label.
//!
//! A swimlane is bound to a *label* (a person, a room, a resource), not to a
//! free track: the number of lanes is the number of distinct labels, and
//! overlapping events that share a label stay in the same lane. Lanes appear
//! in first-occurrence order of their label, which fixes their left-to-right
//! position. Inside a lane, events are ordered by start time with ties kept
//! in input order.

use crate::error::{LayoutError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, trace};

/// Anything with a start and an end that can be placed in a lane.
pub trait Scheduled {
    fn start(&self) -> DateTime<Utc>;
    fn end(&self) -> DateTime<Utc>;
}

impl<T: Scheduled + ?Sized> Scheduled for &T {
    fn start(&self) -> DateTime<Utc> {
        (**self).start()
    }

    fn end(&self) -> DateTime<Utc> {
        (**self).end()
    }
}

/// A concrete (already expanded) event occurrence.
///
/// `id` is the event's identity; the times are used only for ordering.
/// Zero-duration events are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawConcreteEvent")]
pub struct ConcreteEvent {
    id: String,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

#[derive(Deserialize)]
struct RawConcreteEvent {
    id: String,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TryFrom<RawConcreteEvent> for ConcreteEvent {
    type Error = LayoutError;

    fn try_from(raw: RawConcreteEvent) -> Result<Self> {
        Self::new(raw.id, raw.start, raw.end)
    }
}

impl ConcreteEvent {
    /// # Errors
    /// Returns `LayoutError::InvalidEvent` if `end` is before `start`.
    pub fn new(id: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        let id = id.into();
        if end < start {
            return Err(LayoutError::InvalidEvent(format!(
                "event '{}' ends ({}) before it starts ({})",
                id, end, start
            )));
        }
        Ok(Self { id, start, end })
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Scheduled for ConcreteEvent {
    fn start(&self) -> DateTime<Utc> {
        self.start
    }

    fn end(&self) -> DateTime<Utc> {
        self.end
    }
}

/// A labelled lane of events, borrowed from the caller's event list.
pub struct Swimlane<'a, E> {
    label: String,
    events: Vec<&'a E>,
}

impl<'a, E> Swimlane<'a, E> {
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Events in this lane, ascending by start time.
    pub fn events(&self) -> &[&'a E] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a E> + '_ {
        self.events.iter().copied()
    }
}

// Manual impls: deriving would demand `E: Clone` / `E: Debug` for a
// container of references.
impl<E> Clone for Swimlane<'_, E> {
    fn clone(&self) -> Self {
        Self {
            label: self.label.clone(),
            events: self.events.clone(),
        }
    }
}

impl<E: fmt::Debug> fmt::Debug for Swimlane<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Swimlane")
            .field("label", &self.label)
            .field("events", &self.events)
            .finish()
    }
}

/// Group events into lanes and remember each label's lane position.
fn partition<'a, E, I, F>(
    events: I,
    label_of: &F,
) -> (Vec<Swimlane<'a, E>>, HashMap<String, usize>)
where
    E: Scheduled + 'a,
    I: IntoIterator<Item = &'a E>,
    F: Fn(&E) -> String,
{
    let mut lanes: Vec<Swimlane<'a, E>> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut total = 0usize;

    for event in events {
        total += 1;
        let label = label_of(event);
        match positions.get(&label) {
            Some(&position) => lanes[position].events.push(event),
            None => {
                positions.insert(label.clone(), lanes.len());
                lanes.push(Swimlane {
                    label,
                    events: vec![event],
                });
            }
        }
    }

    for lane in &mut lanes {
        // `sort_by_key` is stable: equal starts keep input order.
        lane.events.sort_by_key(|event| event.start());
        trace!(label = %lane.label, events = lane.events.len(), "filled swimlane");
    }

    debug!(events = total, lanes = lanes.len(), "calculated swimlanes");

    (lanes, positions)
}

/// Partition `events` into one swimlane per distinct `label_of(event)`.
///
/// Lanes come out in first-occurrence order of their label. Within a lane,
/// events are sorted by start time ascending; equal start times keep input
/// order. Same-label events that overlap are kept together in one lane.
/// Every input event appears in exactly one lane.
pub fn calculate_swimlanes<'a, E, I, F>(events: I, label_of: F) -> Vec<Swimlane<'a, E>>
where
    E: Scheduled + 'a,
    I: IntoIterator<Item = &'a E>,
    F: Fn(&E) -> String,
{
    partition(events, &label_of).0
}

/// Find the swimlane whose label equals `label_of(event)`.
///
/// # Errors
/// Returns `LayoutError::Lookup` if no lane carries that label, meaning
/// `swimlanes` was computed from a different event set.
pub fn swimlane_for<'s, 'a, E, F>(
    event: &E,
    swimlanes: &'s [Swimlane<'a, E>],
    label_of: F,
) -> Result<&'s Swimlane<'a, E>>
where
    F: Fn(&E) -> String,
{
    let label = label_of(event);
    swimlanes
        .iter()
        .find(|lane| lane.label == label)
        .ok_or(LayoutError::Lookup { label })
}

/// Computed swimlanes together with the label function that produced them,
/// indexed for constant-time lookup.
pub struct SwimlaneLayout<'a, E, F> {
    lanes: Vec<Swimlane<'a, E>>,
    positions: HashMap<String, usize>,
    label_of: F,
}

impl<'a, E, F> SwimlaneLayout<'a, E, F>
where
    E: Scheduled + 'a,
    F: Fn(&E) -> String,
{
    pub fn new<I>(events: I, label_of: F) -> Self
    where
        I: IntoIterator<Item = &'a E>,
    {
        let (lanes, positions) = partition(events, &label_of);
        Self {
            lanes,
            positions,
            label_of,
        }
    }

    pub fn lanes(&self) -> &[Swimlane<'a, E>] {
        &self.lanes
    }

    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Swimlane<'a, E>> {
        self.lanes.iter()
    }

    /// The label this layout assigns to `event`.
    pub fn label_of(&self, event: &E) -> String {
        (self.label_of)(event)
    }

    /// Left-to-right position of `event`'s lane.
    ///
    /// # Errors
    /// Returns `LayoutError::Lookup` if the event's label has no lane.
    pub fn position_of(&self, event: &E) -> Result<usize> {
        let label = self.label_of(event);
        self.positions
            .get(&label)
            .copied()
            .ok_or(LayoutError::Lookup { label })
    }

    /// The lane holding `event`'s label.
    ///
    /// # Errors
    /// Returns `LayoutError::Lookup` if the event's label has no lane.
    pub fn lane_for(&self, event: &E) -> Result<&Swimlane<'a, E>> {
        let position = self.position_of(event)?;
        Ok(&self.lanes[position])
    }

    pub fn into_lanes(self) -> Vec<Swimlane<'a, E>> {
        self.lanes
    }
}

impl<'l, 'a, E, F> IntoIterator for &'l SwimlaneLayout<'a, E, F> {
    type Item = &'l Swimlane<'a, E>;
    type IntoIter = std::slice::Iter<'l, Swimlane<'a, E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.lanes.iter()
    }
}

impl<E: fmt::Debug, F> fmt::Debug for SwimlaneLayout<'_, E, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwimlaneLayout")
            .field("lanes", &self.lanes)
            .finish_non_exhaustive()
    }
}
