//! Craftable extraction for the compendium builder.
//!
//! Reads the facilities document and the tool tables, normalises every item
//! name found in them, and produces the sorted, de-duplicated list of names
//! the compendium should contain.

mod consts;
mod craftables;
pub mod error;
mod input;
mod normalize;

pub use crate::craftables::craftables;
pub use crate::input::{
    Facilities, Facility, Function, FunctionOption, ToolTable, Tools, load_facilities, load_json, load_tools,
};
pub use crate::normalize::{normalize_display, normalize_key};
