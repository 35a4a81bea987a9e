//! The bring-up orchestrator.
//!
//! A single pass: load configuration, initialize the HAL with the
//! configuration service, query and initialize the switch with the
//! notification table, start the RPC endpoint, raise HAL log verbosity,
//! then hold until externally terminated. Every HAL-layer failure is
//! terminal; a half-initialized switch is not retried.

use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use sai_hal::{ProfileId, SaiApi, SaiLogLevel, SwitchApi, SwitchHal};

use crate::error::Result;
use crate::notify::ServerEventHandler;
use crate::portmap::load_port_map;
use crate::profile::{load_profile, ProfileService};
use crate::rpc::{RpcServer, DEFAULT_RPC_PORT};

/// Bring-up progress. `Failed` is terminal and reachable from any step;
/// `Running` is the steady state and is only left by process termination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BringUpState {
    Unstarted,
    ProfileLoaded,
    HalInitialized,
    SwitchInitialized,
    RpcServing,
    Running,
    Failed,
}

impl BringUpState {
    pub fn as_str(&self) -> &'static str {
        match self {
            BringUpState::Unstarted => "unstarted",
            BringUpState::ProfileLoaded => "profile-loaded",
            BringUpState::HalInitialized => "hal-initialized",
            BringUpState::SwitchInitialized => "switch-initialized",
            BringUpState::RpcServing => "rpc-serving",
            BringUpState::Running => "running",
            BringUpState::Failed => "failed",
        }
    }
}

impl fmt::Display for BringUpState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Startup inputs, straight from the command line.
#[derive(Debug, Clone)]
pub struct BringUpOptions {
    /// Profile map file; `None` means no profile supplied.
    pub profile_path: Option<PathBuf>,
    /// Port map file; `None` means no map supplied.
    pub port_map_path: Option<PathBuf>,
    /// Control port for the RPC endpoint.
    pub rpc_port: u16,
}

impl Default for BringUpOptions {
    fn default() -> Self {
        Self {
            profile_path: None,
            port_map_path: None,
            rpc_port: DEFAULT_RPC_PORT,
        }
    }
}

/// Owns the bring-up sequence and everything it produces: the switch
/// handle for the process lifetime, the RPC endpoint, and the state
/// machine position.
pub struct Orchestrator {
    hal: Arc<dyn SwitchHal>,
    options: BringUpOptions,
    state: BringUpState,
    switch: Option<Arc<dyn SwitchApi>>,
    rpc: Option<RpcServer>,
    diag_shutdown: CancellationToken,
}

impl Orchestrator {
    pub fn new(hal: Arc<dyn SwitchHal>, options: BringUpOptions) -> Self {
        Self {
            hal,
            options,
            state: BringUpState::Unstarted,
            switch: None,
            rpc: None,
            diag_shutdown: CancellationToken::new(),
        }
    }

    /// Current state machine position.
    pub fn state(&self) -> BringUpState {
        self.state
    }

    /// The switch-control handle, once the switch is initialized.
    pub fn switch(&self) -> Option<&Arc<dyn SwitchApi>> {
        self.switch.as_ref()
    }

    /// The bound RPC address, once the endpoint is serving.
    pub fn rpc_addr(&self) -> Option<SocketAddr> {
        self.rpc.as_ref().map(|rpc| rpc.local_addr())
    }

    /// Runs the whole sequence: bring-up, then serve until `shutdown`
    /// fires. A fatal bring-up error is returned before the control port
    /// is ever bound.
    pub async fn run(&mut self, shutdown: CancellationToken) -> Result<()> {
        self.bring_up().await?;
        self.serve(shutdown).await
    }

    /// Executes the transitions up to `RpcServing`. On any error the
    /// orchestrator lands in `Failed` and downstream steps never run.
    pub async fn bring_up(&mut self) -> Result<()> {
        match self.bring_up_inner().await {
            Ok(()) => Ok(()),
            Err(e) => {
                warn!("bring-up aborted after reaching state {}", self.state);
                self.state = BringUpState::Failed;
                Err(e)
            }
        }
    }

    async fn bring_up_inner(&mut self) -> Result<()> {
        // Both files load before the HAL sees the provider; the store is
        // immutable from here on and the HAL may cache what it reads.
        let store = Arc::new(load_profile(self.options.profile_path.as_deref())?);
        let port_map = load_port_map(self.options.port_map_path.as_deref())?;
        self.state = BringUpState::ProfileLoaded;

        let services = Arc::new(ProfileService::new(Arc::clone(&store)));
        self.hal.api_initialize(0, services)?;
        self.state = BringUpState::HalInitialized;
        info!("HAL initialized, {} profile variables", store.len());

        let switch = self.hal.switch_api()?;
        let handler = Arc::new(ServerEventHandler::new());
        switch.initialize_switch(ProfileId::DEFAULT, "", "", handler)?;
        self.state = BringUpState::SwitchInitialized;
        self.switch = Some(Arc::clone(&switch));
        info!("switch initialized");

        #[cfg(feature = "brcm-diag")]
        {
            crate::diag::spawn_diag_loop(Arc::clone(&switch), self.diag_shutdown.child_token());
            info!("vendor diag keep-alive started");
        }

        let rpc = RpcServer::spawn(self.options.rpc_port, switch, port_map).await?;
        self.rpc = Some(rpc);
        self.state = BringUpState::RpcServing;

        for api in SaiApi::ALL {
            if let Err(e) = self.hal.log_set(api, SaiLogLevel::Notice) {
                warn!("failed to set log level for {}: {}", api, e);
            }
        }
        info!(
            "verbosity {} set on {} API categories",
            SaiLogLevel::Notice.name(),
            SaiApi::ALL.len()
        );

        Ok(())
    }

    /// The terminal steady state: hold until the shutdown token fires,
    /// then release the endpoint.
    pub async fn serve(&mut self, shutdown: CancellationToken) -> Result<()> {
        debug_assert_eq!(self.state, BringUpState::RpcServing);
        self.state = BringUpState::Running;
        info!("bring-up complete, serving until terminated");

        shutdown.cancelled().await;

        info!("termination requested");
        self.diag_shutdown.cancel();
        if let Some(rpc) = self.rpc.take() {
            rpc.shutdown();
        }
        Ok(())
    }
}
