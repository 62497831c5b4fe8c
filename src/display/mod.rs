//! Output formatting for rate rows, option sets, and filter values.

pub mod table;

pub use table::TableDisplay;
