//! Port map: front-panel interface names to hardware lane sets.
//!
//! Loaded once at startup and handed to the RPC layer, which uses it to
//! resolve interface names in management requests. This process attaches
//! no behavior beyond loading.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{Result, ServerError};

/// A set of hardware lanes backing one front-panel interface.
pub type LaneSet = BTreeSet<u32>;

/// Mapping from lane sets to front-panel interface names.
#[derive(Debug, Default)]
pub struct PortMap {
    entries: Vec<(LaneSet, String)>,
}

impl PortMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a mapping; a duplicate lane set keeps the last name.
    pub fn insert(&mut self, lanes: LaneSet, name: impl Into<String>) {
        let name = name.into();
        match self.entries.iter_mut().find(|(l, _)| *l == lanes) {
            Some((_, existing)) => *existing = name,
            None => self.entries.push((lanes, name)),
        }
    }

    /// Looks up the interface name for a lane set.
    pub fn get(&self, lanes: &LaneSet) -> Option<&str> {
        self.entries
            .iter()
            .find(|(l, _)| l == lanes)
            .map(|(_, name)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates mappings in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&LaneSet, &str)> {
        self.entries.iter().map(|(l, n)| (l, n.as_str()))
    }
}

/// Loads the port map file.
///
/// No path yields an empty map; an unreadable file is an error. Lines are
/// `front_panel_interface:lane,lane,...` with `#`/`;` comments. A line
/// with no `:` or an unparsable lane number is skipped with a diagnostic.
pub fn load_port_map(path: Option<&Path>) -> Result<PortMap> {
    let mut map = PortMap::new();

    let Some(path) = path.filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(map);
    };

    let content = fs::read_to_string(path).map_err(|e| {
        ServerError::Config(format!(
            "failed to open port map file {}: {}",
            path.display(),
            e
        ))
    })?;

    for line in content.lines() {
        if line.is_empty() {
            continue;
        }
        if line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        let Some((name, lanes_str)) = line.split_once(':') else {
            warn!("no ':' in port map line: {}", line);
            continue;
        };

        let mut lanes = LaneSet::new();
        let mut malformed = false;
        for token in lanes_str.split(',') {
            match token.trim().parse::<u32>() {
                Ok(lane) => {
                    lanes.insert(lane);
                }
                Err(_) => {
                    warn!("bad lane '{}' in port map line: {}", token, line);
                    malformed = true;
                    break;
                }
            }
        }
        if malformed || lanes.is_empty() {
            continue;
        }

        debug!("insert port mapping {} -> {:?}", name, lanes);
        map.insert(lanes, name);
    }

    info!("loaded {} port mappings from {}", map.len(), path.display());
    Ok(map)
}
