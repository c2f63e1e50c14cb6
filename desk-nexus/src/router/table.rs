//! Route records and the ordered table they live in.

use crate::component::ComponentRef;
use crate::error::{DuplicateRouteSnafu, InvalidRoutePathSnafu};
use crate::history::path_key;
use snafu::ensure;

/// Association of a path with the component rendered for it.
#[derive(Debug, Clone)]
pub struct RouteRecord {
    path: String,
    component: ComponentRef,
}

impl RouteRecord {
    pub fn new(path: impl Into<String>, component: ComponentRef) -> Self {
        Self {
            path: path.into(),
            component,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn component(&self) -> &ComponentRef {
        &self.component
    }
}

/// Ordered, immutable route table. The first matching record wins.
#[derive(Debug, Clone)]
pub struct RouteTable {
    records: Vec<RouteRecord>,
    keys: Vec<String>,
}

impl RouteTable {
    /// Validate and freeze a list of records.
    ///
    /// Every path must start with `/` and no two paths may match the same
    /// location.
    pub fn new(records: Vec<RouteRecord>) -> crate::Result<Self> {
        let mut keys: Vec<String> = Vec::with_capacity(records.len());
        for record in &records {
            ensure!(
                record.path.starts_with('/'),
                InvalidRoutePathSnafu { path: record.path.clone() }
            );
            let key = path_key(&record.path);
            ensure!(
                !keys.contains(&key),
                DuplicateRouteSnafu { path: record.path.clone() }
            );
            keys.push(key);
        }
        Ok(Self { records, keys })
    }

    pub fn records(&self) -> &[RouteRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Find the record for `location`, returning its position and the record.
    pub fn find(&self, location: &str) -> Option<(usize, &RouteRecord)> {
        let key = path_key(location);
        self.keys
            .iter()
            .position(|k| *k == key)
            .map(|index| (index, &self.records[index]))
    }
}
