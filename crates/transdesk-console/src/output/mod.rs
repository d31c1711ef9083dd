//! Terminal output.

mod format;
mod table;

pub use format::{print_json, OutputFormat};
pub use table::{Alignment, Column, Table};
