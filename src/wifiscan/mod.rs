//! Implement wifi scan parsing.
//!
//! Only linux exposes a scan (`iwlist <iface> scanning`), other platforms
//! answer with an empty [`WifiScanResult`].

mod linux_parse;

pub use linux_parse::parse_iwlist;

use crate::error::ParseError;
use serde::{Serialize, Serializer};

/// Insertion ordered map. A recurring key replaces the value in place.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Ordered<V>(Vec<(String, V)>);

impl<V> Default for Ordered<V> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<V> Ordered<V> {
    fn insert(&mut self, key: String, value: V) {
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some((_, old)) => *old = value,
            None => self.0.push((key, value)),
        }
    }

    fn get(&self, key: &str) -> Option<&V> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

impl<V: Serialize> Serialize for Ordered<V> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.0.iter().map(|(k, v)| (k, v)))
    }
}

/// Fields of a single cell, in scan order, keyed by their `iwlist` names
/// (`Address`, `Quality`, `Signal level`, `ESSID`, ...).
#[derive(Serialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct WifiNetwork(Ordered<String>);

impl WifiNetwork {
    /// Create a network without fields
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `field`, keeping its first position when already present
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    /// Value of `field`
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// `true` when `field` was reported
    pub fn contains_key(&self, field: &str) -> bool {
        self.0.get(field).is_some()
    }

    /// Fields and values in scan order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k, v.as_str()))
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` when no field was reported
    pub fn is_empty(&self) -> bool {
        self.0.len() == 0
    }
}

/// Networks of a scan keyed by cell identifier (e.g. `Cell 01`), in scan order.
#[derive(Serialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct WifiScanResult(Ordered<WifiNetwork>);

impl WifiScanResult {
    /// Create an empty scan result
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a network. A recurring `cell` replaces the previous network but
    /// keeps its position.
    pub fn insert(&mut self, cell: String, network: WifiNetwork) {
        self.0.insert(cell, network);
    }

    /// Network stored under `cell`
    pub fn get(&self, cell: &str) -> Option<&WifiNetwork> {
        self.0.get(cell)
    }

    /// Cell identifiers in scan order
    pub fn cells(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(cell, _)| cell)
    }

    /// Number of networks
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` when the scan found no cell
    pub fn is_empty(&self) -> bool {
        self.0.len() == 0
    }
}

/// Parser used on platforms without a wifi scan command.
pub fn parse_unsupported(_stdout: &str) -> Result<WifiScanResult, ParseError> {
    Ok(WifiScanResult::new())
}
