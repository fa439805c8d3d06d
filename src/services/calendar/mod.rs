//! Calendar date-selection engine.
//!
//! Leaf to root: [`grid`] lays out a month, [`policy`] turns one event into
//! the next selection, [`drag`] tracks Range-mode pointer drags,
//! [`publisher`] pushes committed selections to subscribers and [`engine`]
//! owns the state and wires the pieces together.

pub mod drag;
pub mod engine;
pub mod grid;
pub mod policy;
pub mod publisher;

pub use drag::{DragController, DragSession};
pub use engine::CalendarEngine;
pub use grid::{build_grid, build_six_week_grid, weeks};
pub use publisher::{SelectionListener, SelectionPublisher, SubscriptionId};
