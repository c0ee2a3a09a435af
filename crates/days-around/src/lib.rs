//! # days-around
//!
//! Day-window generation and swimlane layout for horizontal calendar views.
//!
//! A view shows a window of civil days around a focal date and, inside each
//! day column, places events in lanes keyed by a caller-supplied group label
//! (a person, a room, a resource). Both kernels are pure functions: rendering,
//! labels, and per-day event filtering belong to the caller.
//!
//! ## Modules
//!
//! - [`range`] — Inclusive integer ranges used to walk day offsets
//! - [`civil`] — Timezone parsing and civil-midnight resolution across DST
//! - [`window`] — Day window options, generator, and day-column view model
//! - [`swimlane`] — Partition events into label-ordered swimlanes
//! - [`grouped`] — Day columns plus one shared swimlane layout
//! - [`error`] — Error types

pub mod civil;
pub mod error;
pub mod grouped;
pub mod range;
pub mod swimlane;
pub mod window;

pub use civil::{civil_midnight, parse_timezone};
pub use error::{LayoutError, Result};
pub use grouped::GroupedDays;
pub use range::ClosedRange;
pub use swimlane::{
    calculate_swimlanes, swimlane_for, ConcreteEvent, Scheduled, Swimlane, SwimlaneLayout,
};
pub use window::{day_columns, generate_day_window, is_alternate, DayColumn, DayWindow};
