//! Memory accounting for object graphs
//!
//! [`Object::mem_usage`](super::Object::mem_usage) walks data properties and
//! charges each reachable object once per [`MemUsageContext`].

use super::property::PropertyKey;
use super::value::Value;
use crate::error::{Error, Result};
use rustc_hash::FxHashSet as HashSet;

/// Base charge for an object or a symbol
pub const EMPTY_SIZE: u64 = 16;
/// Charge for a number
pub const NUMBER_SIZE: u64 = 8;
/// Charge for a boolean
pub const BOOLEAN_SIZE: u64 = 1;

/// Visited set and running total for one measurement
#[derive(Debug, Default)]
pub struct MemUsageContext {
    visited: HashSet<usize>,
    total: u64,
    limit: Option<u64>,
}

impl MemUsageContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail once more than `limit` bytes have been charged
    pub fn with_limit(limit: u64) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Record an object; `false` if it was already counted
    pub fn visit(&mut self, identity: usize) -> bool {
        self.visited.insert(identity)
    }

    pub fn is_visited(&self, identity: usize) -> bool {
        self.visited.contains(&identity)
    }

    /// Bytes charged so far
    pub fn total(&self) -> u64 {
        self.total
    }

    pub(crate) fn charge(&mut self, bytes: u64) -> Result<()> {
        self.total = self.total.saturating_add(bytes);
        match self.limit {
            Some(limit) if self.total > limit => Err(Error::range_error(format!(
                "memory usage limit of {} bytes exceeded",
                limit
            ))),
            _ => Ok(()),
        }
    }
}

/// Size of a property name
pub fn key_size(key: &PropertyKey) -> u64 {
    match key {
        PropertyKey::String(s) => s.len() as u64,
        PropertyKey::Symbol(sym) => {
            EMPTY_SIZE + sym.description().map_or(0, |d| d.len() as u64)
        }
    }
}

/// Size of a non-object value; objects are walked separately
pub fn primitive_size(value: &Value) -> u64 {
    match value {
        Value::Undefined | Value::Null | Value::Object(_) => 0,
        Value::Boolean(_) => BOOLEAN_SIZE,
        Value::Number(_) => NUMBER_SIZE,
        Value::String(s) => s.len() as u64,
        Value::Symbol(sym) => EMPTY_SIZE + sym.description().map_or(0, |d| d.len() as u64),
    }
}
