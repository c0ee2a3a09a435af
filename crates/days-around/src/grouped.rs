//! Grouped day layout: a day window whose columns all share one swimlane
//! layout.
//!
//! Lanes are computed once per render from the full event set and reused by
//! every column, so a label keeps the same lane position across days. Picking
//! which events touch a given day is left to the renderer.

use crate::error::Result;
use crate::swimlane::{Scheduled, Swimlane, SwimlaneLayout};
use crate::window::{day_columns, DayColumn, DayWindow};
use chrono::{DateTime, TimeZone};
use std::fmt;

pub struct GroupedDays<'a, T: TimeZone, E, F> {
    columns: Vec<DayColumn<T>>,
    layout: SwimlaneLayout<'a, E, F>,
}

impl<'a, T, E, F> GroupedDays<'a, T, E, F>
where
    T: TimeZone,
    E: Scheduled + 'a,
    F: Fn(&E) -> String,
{
    /// Build the day columns around `focal` and the swimlane layout for
    /// `events`.
    ///
    /// # Errors
    /// Returns `LayoutError::OutOfRange` if the window leaves chrono's date
    /// range.
    pub fn compute<I>(
        focal: &DateTime<T>,
        window: DayWindow,
        events: I,
        label_of: F,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = &'a E>,
    {
        let columns = day_columns(focal, window)?;
        let layout = SwimlaneLayout::new(events, label_of);
        Ok(Self { columns, layout })
    }

    pub fn columns(&self) -> &[DayColumn<T>] {
        &self.columns
    }

    pub fn layout(&self) -> &SwimlaneLayout<'a, E, F> {
        &self.layout
    }

    pub fn swimlanes(&self) -> &[Swimlane<'a, E>] {
        self.layout.lanes()
    }

    /// The lane `event` is drawn in, identical in every column.
    ///
    /// # Errors
    /// Returns `LayoutError::Lookup` if the event's label has no lane.
    pub fn lane_for(&self, event: &E) -> Result<&Swimlane<'a, E>> {
        self.layout.lane_for(event)
    }

    /// # Errors
    /// Returns `LayoutError::Lookup` if the event's label has no lane.
    pub fn position_of(&self, event: &E) -> Result<usize> {
        self.layout.position_of(event)
    }

    pub fn into_parts(self) -> (Vec<DayColumn<T>>, SwimlaneLayout<'a, E, F>) {
        (self.columns, self.layout)
    }
}

impl<T, E, F> fmt::Debug for GroupedDays<'_, T, E, F>
where
    T: TimeZone + fmt::Debug,
    E: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupedDays")
            .field("columns", &self.columns)
            .field("layout", &self.layout)
            .finish()
    }
}
