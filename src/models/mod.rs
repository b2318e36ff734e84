mod graveyard;
mod group;
mod history;
mod plant;
mod task;

use serde::Serialize;

pub use graveyard::*;
pub use group::*;
pub use history::*;
pub use plant::*;
pub use task::*;

pub const PAGE_SIZE: u32 = 25;

#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

/// Splits a `sort` query value into its column part and direction.
/// A leading `-` means descending, e.g. `-name`.
pub fn split_sort(raw: &str) -> (&str, bool) {
    match raw.strip_prefix('-') {
        Some(rest) => (rest, true),
        None => (raw, false),
    }
}
