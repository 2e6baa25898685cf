use crate::model::Entry;
use anyhow::Result;

/// Entries known ahead of time, independent of the query.
pub trait Source {
    fn scan(&self) -> Result<Vec<Entry>>;
}

pub mod custom;
pub mod desktop;
