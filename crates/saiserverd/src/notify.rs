//! The switch notification sink bound at bring-up.
//!
//! All six slots are deliberate no-ops: reacting to hardware events is the
//! orchestration agent's concern, not this host's. The table still has to
//! be fully wired before switch initialization, because the HAL may invoke
//! any slot synchronously during that call.

use tracing::debug;

use sai_hal::{
    FdbEvent, PortEvent, PortStateChange, SaiAttribute, SwitchEventHandler, SwitchOperStatus,
};

/// No-op implementation of the six-slot notification table.
#[derive(Debug, Default)]
pub struct ServerEventHandler;

impl ServerEventHandler {
    pub fn new() -> Self {
        Self
    }
}

impl SwitchEventHandler for ServerEventHandler {
    fn on_switch_state_change(&self, status: SwitchOperStatus) {
        debug!("switch state change: {:?}", status);
    }

    fn on_fdb_event(&self, events: &[FdbEvent]) {
        debug!("fdb event batch: {} entries", events.len());
    }

    fn on_port_state_change(&self, events: &[PortStateChange]) {
        debug!("port state change batch: {} entries", events.len());
    }

    fn on_port_event(&self, events: &[PortEvent]) {
        debug!("port event batch: {} entries", events.len());
    }

    fn on_shutdown_request(&self) {
        debug!("shutdown request from HAL");
    }

    fn on_packet_event(&self, packet: &[u8], attrs: &[SaiAttribute]) {
        debug!(
            "packet event: {} bytes, {} attributes",
            packet.len(),
            attrs.len()
        );
    }
}
