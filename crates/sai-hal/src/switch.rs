//! The HAL initialization and switch-control contract.
//!
//! The host drives the HAL through two narrow traits:
//!
//! - [`SwitchHal`]: the library-level entry points (`sai_api_initialize`,
//!   `sai_api_query`, `sai_log_set`),
//! - [`SwitchApi`]: the switch-control table obtained from the query
//!   (`initialize_switch`, `set_switch_attribute`).
//!
//! [`StubSwitch`] is a software backend implementing both, standing in
//! until the vendor library is linked. It honors the same ordering rules
//! the vendor enforces (query before initialize fails, switch operations
//! before switch init fail) and exercises the configuration service the
//! way a vendor HAL does during bring-up.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, info};
use parking_lot::Mutex;

use crate::error::{SaiError, SaiResult, SaiStatus};
use crate::notify::SwitchEventHandler;
use crate::profile::{NextValueStatus, ProfileProvider};
use crate::types::{profile_keys, ProfileId, SaiApi, SaiAttribute, SaiLogLevel, SwitchOperStatus};

/// Switch-control operations, obtained from [`SwitchHal::switch_api`].
pub trait SwitchApi: Send + Sync {
    /// Initializes the switch, binding the notification table.
    ///
    /// The handler table must be fully wired before this call: the HAL may
    /// invoke any slot synchronously during initialization.
    fn initialize_switch(
        &self,
        profile_id: ProfileId,
        hardware_id: &str,
        firmware_path: &str,
        handler: Arc<dyn SwitchEventHandler>,
    ) -> SaiResult<()>;

    /// Sets a switch-level attribute.
    fn set_switch_attribute(&self, attr: &SaiAttribute) -> SaiResult<()>;
}

/// Library-level HAL entry points.
pub trait SwitchHal: Send + Sync {
    /// Initializes the HAL, handing it the configuration service.
    ///
    /// The service's backing store must be fully populated before this
    /// call; the HAL may cache values it reads during initialization.
    fn api_initialize(&self, flags: u64, services: Arc<dyn ProfileProvider>) -> SaiResult<()>;

    /// Queries the switch-control API table.
    ///
    /// Fails with [`SaiStatus::Uninitialized`] before `api_initialize`.
    fn switch_api(&self) -> SaiResult<Arc<dyn SwitchApi>>;

    /// Sets the log verbosity of one API category.
    fn log_set(&self, api: SaiApi, level: SaiLogLevel) -> SaiResult<()>;
}

/// Fault injection knobs for [`StubSwitch`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StubFaults {
    /// `api_initialize` reports failure.
    pub fail_api_initialize: bool,
    /// `initialize_switch` reports failure.
    pub fail_switch_init: bool,
    /// `set_switch_attribute` reports failure.
    pub fail_attribute: bool,
}

struct StubState {
    faults: StubFaults,
    api_initialized: AtomicBool,
    switch_initialized: AtomicBool,
    services: Mutex<Option<Arc<dyn ProfileProvider>>>,
    handler: Mutex<Option<Arc<dyn SwitchEventHandler>>>,
    log_levels: Mutex<HashMap<SaiApi, SaiLogLevel>>,
    attributes_set: Mutex<Vec<SaiAttribute>>,
    profile_entries_seen: Mutex<usize>,
}

/// Software switch backend.
///
/// Implements the full [`SwitchHal`]/[`SwitchApi`] contract in memory.
/// During `initialize_switch` it pulls configuration through the supplied
/// service the way a vendor HAL does: a couple of well-known direct
/// lookups, then a reset-and-enumerate pass over the whole profile. After
/// a successful init it reports the switch operational state as up through
/// the bound notification table.
pub struct StubSwitch {
    state: Arc<StubState>,
}

impl StubSwitch {
    pub fn new() -> Self {
        Self::with_faults(StubFaults::default())
    }

    pub fn with_faults(faults: StubFaults) -> Self {
        Self {
            state: Arc::new(StubState {
                faults,
                api_initialized: AtomicBool::new(false),
                switch_initialized: AtomicBool::new(false),
                services: Mutex::new(None),
                handler: Mutex::new(None),
                log_levels: Mutex::new(HashMap::new()),
                attributes_set: Mutex::new(Vec::new()),
                profile_entries_seen: Mutex::new(0),
            }),
        }
    }

    /// True once `api_initialize` has succeeded.
    pub fn api_initialized(&self) -> bool {
        self.state.api_initialized.load(Ordering::SeqCst)
    }

    /// True once `initialize_switch` has succeeded.
    pub fn switch_initialized(&self) -> bool {
        self.state.switch_initialized.load(Ordering::SeqCst)
    }

    /// Verbosity last set for an API category, if any.
    pub fn log_level(&self, api: SaiApi) -> Option<SaiLogLevel> {
        self.state.log_levels.lock().get(&api).copied()
    }

    /// Number of `set_switch_attribute` calls accepted.
    pub fn attributes_set(&self) -> usize {
        self.state.attributes_set.lock().len()
    }

    /// Number of profile entries observed during the init enumeration.
    pub fn profile_entries_seen(&self) -> usize {
        *self.state.profile_entries_seen.lock()
    }

    /// Delivers a shutdown request through the bound notification table,
    /// as a vendor HAL does when the ASIC asks for a restart. Returns
    /// false when no table has been bound yet.
    pub fn inject_shutdown_request(&self) -> bool {
        match self.state.handler.lock().as_ref() {
            Some(handler) => {
                handler.on_shutdown_request();
                true
            }
            None => false,
        }
    }
}

impl Default for StubSwitch {
    fn default() -> Self {
        Self::new()
    }
}

impl SwitchHal for StubSwitch {
    fn api_initialize(&self, flags: u64, services: Arc<dyn ProfileProvider>) -> SaiResult<()> {
        if self.state.faults.fail_api_initialize {
            return SaiStatus::Failure.into_result();
        }

        debug!("api_initialize: flags={:#x}", flags);
        *self.state.services.lock() = Some(services);
        self.state.api_initialized.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn switch_api(&self) -> SaiResult<Arc<dyn SwitchApi>> {
        if !self.api_initialized() {
            return Err(SaiError::Uninitialized);
        }

        Ok(Arc::new(StubSwitchApi {
            state: Arc::clone(&self.state),
        }))
    }

    fn log_set(&self, api: SaiApi, level: SaiLogLevel) -> SaiResult<()> {
        if !self.api_initialized() {
            return Err(SaiError::Uninitialized);
        }

        self.state.log_levels.lock().insert(api, level);
        Ok(())
    }
}

struct StubSwitchApi {
    state: Arc<StubState>,
}

impl StubSwitchApi {
    /// Pulls configuration through the service table the way a vendor HAL
    /// does at switch init: direct lookups for well-known keys, then a
    /// reset followed by a full enumeration.
    fn consume_profile(&self, profile_id: ProfileId, services: &Arc<dyn ProfileProvider>) -> usize {
        if let Some(path) = services.get_value(profile_id, Some(profile_keys::INIT_CONFIG_FILE)) {
            debug!("init config file: {}", path);
        }
        if let Some(boot) = services.get_value(profile_id, Some(profile_keys::BOOT_TYPE)) {
            debug!("boot type: {}", boot);
        }

        services.get_next_value(profile_id, None, None);

        let mut seen = 0;
        let mut name = String::new();
        let mut value = String::new();
        while services.get_next_value(profile_id, Some(&mut name), Some(&mut value))
            == NextValueStatus::Continue
        {
            debug!("profile variable {}={}", name, value);
            seen += 1;
        }
        seen
    }
}

impl SwitchApi for StubSwitchApi {
    fn initialize_switch(
        &self,
        profile_id: ProfileId,
        hardware_id: &str,
        firmware_path: &str,
        handler: Arc<dyn SwitchEventHandler>,
    ) -> SaiResult<()> {
        if !self.state.api_initialized.load(Ordering::SeqCst) {
            return Err(SaiError::Uninitialized);
        }
        if self.state.faults.fail_switch_init {
            return SaiStatus::Failure.into_result();
        }

        let services = self
            .state
            .services
            .lock()
            .clone()
            .ok_or(SaiError::Uninitialized)?;

        let seen = self.consume_profile(profile_id, &services);
        *self.state.profile_entries_seen.lock() = seen;

        info!(
            "switch initialized: hardware_id={:?} firmware={:?} profile_entries={}",
            hardware_id, firmware_path, seen
        );

        *self.state.handler.lock() = Some(Arc::clone(&handler));
        self.state.switch_initialized.store(true, Ordering::SeqCst);

        handler.on_switch_state_change(SwitchOperStatus::Up);
        Ok(())
    }

    fn set_switch_attribute(&self, attr: &SaiAttribute) -> SaiResult<()> {
        if !self.state.switch_initialized.load(Ordering::SeqCst) {
            return Err(SaiError::Uninitialized);
        }
        if self.state.faults.fail_attribute {
            return SaiStatus::Failure.into_result();
        }

        self.state.attributes_set.lock().push(attr.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FdbEvent, PortEvent, PortStateChange};
    use std::sync::atomic::AtomicUsize;

    /// Minimal provider over a fixed entry list, with a shared cursor.
    struct FixedProvider {
        entries: Vec<(String, String)>,
        cursor: Mutex<usize>,
    }

    impl FixedProvider {
        fn new(entries: &[(&str, &str)]) -> Self {
            Self {
                entries: entries
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                cursor: Mutex::new(0),
            }
        }
    }

    impl ProfileProvider for FixedProvider {
        fn get_value(&self, _profile_id: ProfileId, name: Option<&str>) -> Option<String> {
            let name = name?;
            self.entries
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.clone())
        }

        fn get_next_value(
            &self,
            _profile_id: ProfileId,
            name_out: Option<&mut String>,
            value_out: Option<&mut String>,
        ) -> NextValueStatus {
            let Some(value_out) = value_out else {
                *self.cursor.lock() = 0;
                return NextValueStatus::Continue;
            };
            let Some(name_out) = name_out else {
                return NextValueStatus::End;
            };

            let mut cursor = self.cursor.lock();
            match self.entries.get(*cursor) {
                Some((k, v)) => {
                    *name_out = k.clone();
                    *value_out = v.clone();
                    *cursor += 1;
                    NextValueStatus::Continue
                }
                None => NextValueStatus::End,
            }
        }
    }

    #[derive(Default)]
    struct CountingHandler {
        state_changes: AtomicUsize,
        shutdown_requests: AtomicUsize,
    }

    impl SwitchEventHandler for CountingHandler {
        fn on_switch_state_change(&self, _status: SwitchOperStatus) {
            self.state_changes.fetch_add(1, Ordering::SeqCst);
        }
        fn on_fdb_event(&self, _events: &[FdbEvent]) {}
        fn on_port_state_change(&self, _events: &[PortStateChange]) {}
        fn on_port_event(&self, _events: &[PortEvent]) {}
        fn on_shutdown_request(&self) {
            self.shutdown_requests.fetch_add(1, Ordering::SeqCst);
        }
        fn on_packet_event(&self, _packet: &[u8], _attrs: &[SaiAttribute]) {}
    }

    fn provider() -> Arc<dyn ProfileProvider> {
        Arc::new(FixedProvider::new(&[
            ("SAI_INIT_CONFIG_FILE", "/etc/sai.d/sai.xml"),
            ("SAI_BOOT_TYPE", "0"),
        ]))
    }

    #[test]
    fn test_query_before_initialize_fails() {
        let hal = StubSwitch::new();
        let err = hal.switch_api().err().unwrap();
        assert_eq!(err.status(), Some(SaiStatus::Uninitialized));
    }

    #[test]
    fn test_full_bring_up_sequence() {
        let hal = StubSwitch::new();
        hal.api_initialize(0, provider()).unwrap();

        let switch = hal.switch_api().unwrap();
        let handler = Arc::new(CountingHandler::default());
        switch
            .initialize_switch(ProfileId::DEFAULT, "", "", handler.clone())
            .unwrap();

        assert!(hal.switch_initialized());
        // Init enumerates the whole profile and reports oper-status up.
        assert_eq!(hal.profile_entries_seen(), 2);
        assert_eq!(handler.state_changes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_injected_api_initialize_failure() {
        let hal = StubSwitch::with_faults(StubFaults {
            fail_api_initialize: true,
            ..Default::default()
        });
        let err = hal.api_initialize(0, provider()).unwrap_err();
        assert_eq!(err.status(), Some(SaiStatus::Failure));
        assert!(!hal.api_initialized());
    }

    #[test]
    fn test_injected_switch_init_failure() {
        let hal = StubSwitch::with_faults(StubFaults {
            fail_switch_init: true,
            ..Default::default()
        });
        hal.api_initialize(0, provider()).unwrap();
        let switch = hal.switch_api().unwrap();
        let handler = Arc::new(CountingHandler::default());
        assert!(switch
            .initialize_switch(ProfileId::DEFAULT, "", "", handler.clone())
            .is_err());
        assert!(!hal.switch_initialized());
        assert_eq!(handler.state_changes.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_attribute_requires_switch_init() {
        let hal = StubSwitch::new();
        hal.api_initialize(0, provider()).unwrap();
        let switch = hal.switch_api().unwrap();

        let attr = SaiAttribute::new(1);
        let err = switch.set_switch_attribute(&attr).unwrap_err();
        assert_eq!(err.status(), Some(SaiStatus::Uninitialized));

        switch
            .initialize_switch(ProfileId::DEFAULT, "", "", Arc::new(CountingHandler::default()))
            .unwrap();
        switch.set_switch_attribute(&attr).unwrap();
        assert_eq!(hal.attributes_set(), 1);
    }

    #[test]
    fn test_shutdown_request_reaches_bound_table() {
        let hal = StubSwitch::new();
        hal.api_initialize(0, provider()).unwrap();

        // No table bound yet.
        assert!(!hal.inject_shutdown_request());

        let switch = hal.switch_api().unwrap();
        let handler = Arc::new(CountingHandler::default());
        switch
            .initialize_switch(ProfileId::DEFAULT, "", "", handler.clone())
            .unwrap();

        assert!(hal.inject_shutdown_request());
        assert_eq!(handler.shutdown_requests.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_log_set_recorded() {
        let hal = StubSwitch::new();
        hal.api_initialize(0, provider()).unwrap();
        hal.log_set(SaiApi::Switch, SaiLogLevel::Notice).unwrap();
        assert_eq!(hal.log_level(SaiApi::Switch), Some(SaiLogLevel::Notice));
        assert_eq!(hal.log_level(SaiApi::Fdb), None);
    }
}
