//! Board state, control population and table rendering.

pub mod board;
pub mod controls;
pub mod format;
pub mod table;

pub use board::DirectorBoard;
pub use controls::{to_label, Controls, FieldOption};
pub use table::{RenderedTable, TableRow};
