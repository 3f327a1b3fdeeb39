use crate::handlers;
use actix_web::dev::ServerHandle;
use actix_web::{web, App, HttpServer};
use common::FileMetadata;
use sdk::{Client, ClientConfig};
use std::io;
use std::net::SocketAddr;
use std::sync::{mpsc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;
use tracing::{error, info};

/// Behaviour switches of a [`MockNode`]
#[derive(Debug, Clone)]
pub struct NodeOptions {
    pub zkp_enabled: bool,
    /// Report the blockchain component as failing
    pub degraded: bool,
    /// Serve `/metrics`; otherwise it answers 404 with an empty body
    pub metrics: bool,
}

impl Default for NodeOptions {
    fn default() -> Self {
        Self {
            zkp_enabled: true,
            degraded: false,
            metrics: false,
        }
    }
}

pub struct StoredFile {
    pub meta: FileMetadata,
    pub content: Vec<u8>,
}

pub struct NodeState {
    pub options: NodeOptions,
    files: Mutex<Vec<StoredFile>>,
}

impl NodeState {
    pub fn new(options: NodeOptions) -> Self {
        Self {
            options,
            files: Mutex::new(Vec::new()),
        }
    }

    /// Stored files in upload order
    pub fn files(&self) -> MutexGuard<'_, Vec<StoredFile>> {
        self.files.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A node listening on an ephemeral localhost port, stopped on drop
pub struct MockNode {
    addr: SocketAddr,
    handle: ServerHandle,
    state: web::Data<NodeState>,
}

impl MockNode {
    pub fn start() -> io::Result<Self> {
        Self::start_with(NodeOptions::default())
    }

    pub fn start_with(options: NodeOptions) -> io::Result<Self> {
        crate::init_tracing();
        let state = web::Data::new(NodeState::new(options));
        let server_state = state.clone();
        let (tx, rx) = mpsc::channel::<io::Result<(SocketAddr, ServerHandle)>>();

        thread::spawn(move || {
            let system = actix_web::rt::System::new();
            let result = system.block_on(async move {
                let server = match HttpServer::new(move || {
                    App::new()
                        .app_data(server_state.clone())
                        .configure(handlers::configure)
                })
                .workers(1)
                .bind(("127.0.0.1", 0))
                {
                    Ok(server) => server,
                    Err(e) => {
                        let _ = tx.send(Err(e));
                        return Ok(());
                    }
                };
                let Some(addr) = server.addrs().first().copied() else {
                    let _ = tx.send(Err(io::Error::new(
                        io::ErrorKind::AddrNotAvailable,
                        "server bound no address",
                    )));
                    return Ok(());
                };
                let running = server.run();
                let _ = tx.send(Ok((addr, running.handle())));
                running.await
            });
            if let Err(e) = result {
                error!("Mock node stopped with error: {}", e);
            }
        });

        let (addr, handle) = rx.recv().map_err(|_| {
            io::Error::new(io::ErrorKind::Other, "mock node thread exited before binding")
        })??;
        info!("Mock node listening on {}", addr);
        Ok(Self {
            addr,
            handle,
            state,
        })
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// HTTP client pointed at this node
    pub fn client(&self) -> sdk::Result<Client> {
        Client::new(ClientConfig::new(self.url(), Duration::from_secs(10)))
    }

    pub fn stored_count(&self) -> usize {
        self.state.files().len()
    }
}

impl Drop for MockNode {
    fn drop(&mut self) {
        // The stop command is sent when called; completion is not awaited
        let _ = self.handle.stop(false);
    }
}
