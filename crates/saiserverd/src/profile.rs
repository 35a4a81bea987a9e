//! Profile map: the key/value configuration handed to the HAL.
//!
//! The profile is loaded once from a line-oriented file before the HAL is
//! initialized and is read-only afterwards; the HAL may cache values it
//! reads during its own init. [`ProfileService`] adapts the store to the
//! two-call configuration service the HAL pulls from, including the shared
//! enumeration cursor.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use sai_hal::{NextValueStatus, ProfileId, ProfileProvider};

use crate::error::{Result, ServerError};

/// Insertion-ordered key/value store for profile variables.
///
/// Later writes to an existing key overwrite the value but keep the
/// original position, so enumeration order is deterministic.
#[derive(Debug, Default)]
pub struct ProfileStore {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites a variable.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.index.get(&key) {
            Some(&pos) => self.entries[pos].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    /// Exact-match lookup.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.index
            .get(key)
            .map(|&pos| self.entries[pos].1.as_str())
    }

    /// Entry at a position in insertion order.
    pub fn entry(&self, pos: usize) -> Option<(&str, &str)> {
        self.entries
            .get(pos)
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Loads the profile map file.
///
/// No path means no profile was supplied and yields an empty store. An
/// unreadable file is an error; the caller treats it as fatal. Within the
/// file, `#`/`;` lines are comments, each other non-blank line splits at
/// the first `=` (the value keeps any further `=` verbatim), and a line
/// with no `=` is skipped with a diagnostic.
pub fn load_profile(path: Option<&Path>) -> Result<ProfileStore> {
    let mut store = ProfileStore::new();

    // No path or an empty path means no profile was supplied.
    let Some(path) = path.filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(store);
    };

    let content = fs::read_to_string(path).map_err(|e| {
        ServerError::Config(format!(
            "failed to open profile map file {}: {}",
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

        match line.split_once('=') {
            Some((key, value)) => {
                debug!("insert profile variable {}={}", key, value);
                store.insert(key, value);
            }
            None => {
                warn!("no '=' in profile line: {}", line);
            }
        }
    }

    info!(
        "loaded {} profile variables from {}",
        store.len(),
        path.display()
    );
    Ok(store)
}

/// The configuration service handed to the HAL at `api_initialize`.
///
/// Wraps the immutable [`ProfileStore`] with the single shared enumeration
/// cursor the service protocol requires. The cursor is the only mutable
/// state and is serialized behind a mutex, since the HAL gives no
/// guarantee about which thread invokes the callbacks.
pub struct ProfileService {
    store: Arc<ProfileStore>,
    cursor: Mutex<usize>,
}

impl ProfileService {
    pub fn new(store: Arc<ProfileStore>) -> Self {
        Self {
            store,
            cursor: Mutex::new(0),
        }
    }
}

impl ProfileProvider for ProfileService {
    fn get_value(&self, _profile_id: ProfileId, name: Option<&str>) -> Option<String> {
        let Some(name) = name else {
            warn!("profile variable name is null");
            return None;
        };

        match self.store.get(name) {
            Some(value) => Some(value.to_string()),
            None => {
                debug!("profile variable {}: not found", name);
                None
            }
        }
    }

    fn get_next_value(
        &self,
        _profile_id: ProfileId,
        name_out: Option<&mut String>,
        value_out: Option<&mut String>,
    ) -> NextValueStatus {
        // A null value sink restarts the enumeration.
        let Some(value_out) = value_out else {
            debug!("resetting profile map iterator");
            *self.cursor.lock() = 0;
            return NextValueStatus::Continue;
        };

        // A null name sink with a value requested is a usage error; the
        // cursor is left untouched.
        let Some(name_out) = name_out else {
            warn!("profile variable name sink is null");
            return NextValueStatus::End;
        };

        let mut cursor = self.cursor.lock();
        match self.store.entry(*cursor) {
            Some((key, value)) => {
                name_out.clear();
                name_out.push_str(key);
                value_out.clear();
                value_out.push_str(value);
                *cursor += 1;
                NextValueStatus::Continue
            }
            None => {
                debug!("profile map iterator reached end");
                NextValueStatus::End
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_profile(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("create temp profile");
        file.write_all(content.as_bytes()).expect("write profile");
        file
    }

    fn service(store: ProfileStore) -> ProfileService {
        ProfileService::new(Arc::new(store))
    }

    /// Drains the enumeration from wherever the cursor currently is.
    fn drain(service: &ProfileService) -> Vec<(String, String)> {
        let mut out = Vec::new();
        let mut name = String::new();
        let mut value = String::new();
        while service.get_next_value(ProfileId::DEFAULT, Some(&mut name), Some(&mut value))
            == NextValueStatus::Continue
        {
            out.push((name.clone(), value.clone()));
        }
        out
    }

    #[test]
    fn test_load_comments_and_order() {
        let file = write_profile("switch_type=1\n# comment\nmode=warm\n");
        let store = load_profile(Some(file.path())).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.get("switch_type"), Some("1"));
        assert_eq!(store.get("mode"), Some("warm"));
        let keys: Vec<&str> = store.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["switch_type", "mode"]);
    }

    #[test]
    fn test_load_semicolon_comment_and_blank_lines() {
        let file = write_profile("; header\n\na=1\n");
        let store = load_profile(Some(file.path())).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("a"), Some("1"));
    }

    #[test]
    fn test_load_line_without_equals_is_skipped() {
        let file = write_profile("a=1\nnovalue\nb=2\n");
        let store = load_profile(Some(file.path())).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("novalue"), None);
        assert_eq!(store.get("b"), Some("2"));
    }

    #[test]
    fn test_load_duplicate_key_last_write_wins() {
        let file = write_profile("a=1\nb=x\na=2\n");
        let store = load_profile(Some(file.path())).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("a"), Some("2"));
        // Overwrite keeps the original position.
        assert_eq!(store.entry(0), Some(("a", "2")));
    }

    #[test]
    fn test_load_value_keeps_embedded_equals() {
        let file = write_profile("opts=a=b=c\ntrailing=\n");
        let store = load_profile(Some(file.path())).unwrap();
        assert_eq!(store.get("opts"), Some("a=b=c"));
        assert_eq!(store.get("trailing"), Some(""));
    }

    #[test]
    fn test_load_no_path_is_empty() {
        let store = load_profile(None).unwrap();
        assert!(store.is_empty());
        let store = load_profile(Some(Path::new(""))).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_unreadable_path_is_error() {
        let err = load_profile(Some(Path::new("/nonexistent/profile.ini"))).unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }

    #[test]
    fn test_get_value_lookup() {
        let mut store = ProfileStore::new();
        store.insert("switch_type", "1");
        let svc = service(store);

        assert_eq!(
            svc.get_value(ProfileId::DEFAULT, Some("switch_type")),
            Some("1".to_string())
        );
        assert_eq!(svc.get_value(ProfileId::DEFAULT, Some("absent")), None);
        assert_eq!(svc.get_value(ProfileId::DEFAULT, None), None);
    }

    #[test]
    fn test_enumeration_visits_all_in_order_then_ends() {
        let mut store = ProfileStore::new();
        store.insert("a", "1");
        store.insert("b", "2");
        store.insert("c", "3");
        let svc = service(store);

        let pairs = drain(&svc);
        assert_eq!(
            pairs,
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "2".to_string()),
                ("c".to_string(), "3".to_string()),
            ]
        );

        // End is idempotent.
        let mut name = String::new();
        let mut value = String::new();
        assert_eq!(
            svc.get_next_value(ProfileId::DEFAULT, Some(&mut name), Some(&mut value)),
            NextValueStatus::End
        );
        assert_eq!(
            svc.get_next_value(ProfileId::DEFAULT, Some(&mut name), Some(&mut value)),
            NextValueStatus::End
        );
    }

    #[test]
    fn test_null_value_sink_resets_cursor() {
        let mut store = ProfileStore::new();
        store.insert("a", "1");
        store.insert("b", "2");
        let svc = service(store);

        // Advance past the first entry, then reset.
        let mut name = String::new();
        let mut value = String::new();
        svc.get_next_value(ProfileId::DEFAULT, Some(&mut name), Some(&mut value));
        assert_eq!(
            svc.get_next_value(ProfileId::DEFAULT, None, None),
            NextValueStatus::Continue
        );

        let pairs = drain(&svc);
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].0, "a");
    }

    #[test]
    fn test_null_name_sink_is_usage_error() {
        let mut store = ProfileStore::new();
        store.insert("a", "1");
        let svc = service(store);

        let mut value = String::new();
        assert_eq!(
            svc.get_next_value(ProfileId::DEFAULT, None, Some(&mut value)),
            NextValueStatus::End
        );
        // The cursor was not consumed by the malformed call.
        assert_eq!(drain(&svc).len(), 1);
    }

    #[test]
    fn test_empty_store_enumeration_ends_immediately() {
        let svc = service(ProfileStore::new());
        assert_eq!(svc.get_value(ProfileId::DEFAULT, Some("anything")), None);
        assert!(drain(&svc).is_empty());
    }
}
