//! Asynchronous switch event notifications.
//!
//! The HAL delivers hardware events through a fixed table of six callbacks
//! (`sai_switch_notification_t`), bound once at switch initialization and
//! immutable afterwards. The HAL may invoke any slot synchronously during
//! `initialize_switch`, so the whole table must be wired before that call.

use crate::types::{FdbEvent, PortEvent, PortStateChange, SaiAttribute, SwitchOperStatus};

/// The six-slot switch notification table.
///
/// Every method is a required slot: binding a handler means providing all
/// six callbacks, even if individual slots take no action. Handlers are
/// invoked from HAL-owned threads and must be `Send + Sync`.
pub trait SwitchEventHandler: Send + Sync {
    /// Switch operational-state change. Only delivered after switch
    /// initialization has completed.
    fn on_switch_state_change(&self, status: SwitchOperStatus);

    /// A batch of forwarding-table (address learning) events.
    fn on_fdb_event(&self, events: &[FdbEvent]);

    /// A batch of port operational-state changes.
    fn on_port_state_change(&self, events: &[PortStateChange]);

    /// A batch of port hotplug events.
    fn on_port_event(&self, events: &[PortEvent]);

    /// HAL-initiated request for a graceful teardown.
    fn on_shutdown_request(&self);

    /// An inbound control-plane packet: raw buffer plus its attributes.
    fn on_packet_event(&self, packet: &[u8], attrs: &[SaiAttribute]);
}
