//! The configuration service the host supplies to the HAL.
//!
//! At `api_initialize` time the host hands the HAL a two-function service
//! table (`sai_service_method_table_t`): a direct key lookup and a stateful
//! enumeration over all key/value pairs. The HAL is written against these
//! exact signatures and may call either function at any point during or
//! after its own initialization, so the protocol below is fixed.
//!
//! The C table passes out-parameters by nullable pointer; here the same
//! nullability is expressed with `Option`:
//!
//! - `get_next_value` with `value_out == None` means **reset**: rewind the
//!   enumeration to the first entry and report success without producing a
//!   pair.
//! - `name_out == None` while a value sink is present is a usage error and
//!   reports [`NextValueStatus::End`] without touching the cursor.
//! - At the end of the enumeration the call keeps reporting `End`.

use crate::types::ProfileId;

/// Outcome of a [`ProfileProvider::get_next_value`] call, matching the
/// `0` / `-1` return convention of the C service table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextValueStatus {
    /// A pair was produced (or the cursor was reset); more may follow.
    Continue,
    /// Enumeration is exhausted, or the call was malformed.
    End,
}

impl NextValueStatus {
    /// Returns the raw return value of the C service table.
    pub fn as_raw(&self) -> i32 {
        match self {
            NextValueStatus::Continue => 0,
            NextValueStatus::End => -1,
        }
    }
}

/// Pull-based configuration service consumed by the HAL.
///
/// Implementations own the backing store and the shared enumeration cursor.
/// The HAL may invoke these callbacks from its own threads, so
/// implementations must be `Send + Sync` and must serialize cursor access.
pub trait ProfileProvider: Send + Sync {
    /// Exact-match lookup of a profile variable.
    ///
    /// A `None` name is a degenerate lookup and reports not-found rather
    /// than failing; absent keys likewise return `None`.
    fn get_value(&self, profile_id: ProfileId, name: Option<&str>) -> Option<String>;

    /// Stateful enumeration over all profile variables.
    ///
    /// Writes the current pair into `name_out`/`value_out`, advances the
    /// shared cursor, and reports [`NextValueStatus::Continue`]. See the
    /// module docs for the `None`-sentinel reset and error conventions.
    fn get_next_value(
        &self,
        profile_id: ProfileId,
        name_out: Option<&mut String>,
        value_out: Option<&mut String>,
    ) -> NextValueStatus;
}
