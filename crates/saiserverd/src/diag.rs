//! Broadcom diagnostic shell keep-alive loop.
//!
//! Compiled in with the `brcm-diag` feature. Once the switch is
//! initialized, a detached task pokes the vendor diagnostic attribute on a
//! fixed interval; the vendor SDK uses the write to keep its diag shell
//! session alive. The loop stops when the attribute write is rejected or
//! the process is shutting down. It touches nothing but the switch handle.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use sai_hal::{SaiAttribute, SwitchApi, SWITCH_ATTR_CUSTOM_RANGE_BASE};

/// Vendor diagnostic attribute.
pub const DIAG_ATTR_ID: u32 = SWITCH_ATTR_CUSTOM_RANGE_BASE + 1;

const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Spawns the keep-alive loop as a detached task.
pub fn spawn_diag_loop(
    switch: Arc<dyn SwitchApi>,
    shutdown: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let attr = SaiAttribute::new(DIAG_ATTR_ID);
        loop {
            if let Err(e) = switch.set_switch_attribute(&attr) {
                warn!("diag attribute rejected, stopping keep-alive: {}", e);
                break;
            }

            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = tokio::time::sleep(POLL_INTERVAL) => {}
            }
        }
        debug!("diag keep-alive loop exited");
    })
}
