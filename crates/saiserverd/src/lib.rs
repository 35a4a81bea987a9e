//! SAI switch bring-up server.
//!
//! `saiserverd` boots a switching ASIC through the SAI hardware
//! abstraction layer and exposes switch control to management clients over
//! an RPC endpoint. Startup is a single linear pass; afterwards the
//! process is a passive event host.
//!
//! # Bring-up sequence
//!
//! 1. Load the profile map (`--profile`) and port map (`--portmap`)
//! 2. Initialize the HAL, handing it the configuration service
//! 3. Query the switch API and initialize the switch with the
//!    notification table
//! 4. Optionally start the vendor diag keep-alive (`brcm-diag` feature)
//! 5. Bind the control port and start the RPC endpoint
//! 6. Raise HAL log verbosity and block until terminated
//!
//! Any failure before step 5 is fatal: the control port is never bound on
//! a switch that did not come up.
//!
//! # Components
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`profile`] | Profile store, loader, and the HAL configuration service |
//! | [`portmap`] | Front-panel port to lane-set mapping loader |
//! | [`notify`] | The six-slot notification sink (all no-ops) |
//! | [`rpc`] | Control-port lifecycle for the RPC endpoint |
//! | [`bringup`] | The orchestrator and its state machine |

pub mod bringup;
#[cfg(feature = "brcm-diag")]
pub mod diag;
pub mod error;
pub mod notify;
pub mod portmap;
pub mod profile;
pub mod rpc;

pub use bringup::{BringUpOptions, BringUpState, Orchestrator};
pub use error::{Result, ServerError};
pub use notify::ServerEventHandler;
pub use portmap::{load_port_map, LaneSet, PortMap};
pub use profile::{load_profile, ProfileService, ProfileStore};
pub use rpc::{RpcServer, DEFAULT_RPC_PORT};
