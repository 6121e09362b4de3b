//! # Servidor TCP con pool de workers
//! src/server/tcp.rs
//!
//! El accept loop corre en el thread que llama a [`Server::run`]. Cada
//! socket aceptado recibe su timeout de lectura y se entrega al pool; el
//! loop nunca espera a que una conexión termine.

use std::io;
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::time::Duration;

use super::connection::serve_connection;
use super::pool::WorkerPool;
use crate::config::Config;
use crate::resources::{DirectorySource, ResourceStore};
use crate::router::Router;

/// Servidor de archivos estáticos
pub struct Server {
    config: Config,
    listener: TcpListener,
    store: Arc<ResourceStore>,
    router: Arc<Router>,
}

impl Server {
    /// Hace bind sobre `config.address()` sirviendo `config.static_dir`
    pub fn bind(config: Config) -> io::Result<Self> {
        let store = ResourceStore::new(DirectorySource::new(&config.static_dir));
        Self::bind_with_store(config, store)
    }

    /// Igual que [`Server::bind`] pero con un store ya construido
    pub fn bind_with_store(config: Config, store: ResourceStore) -> io::Result<Self> {
        config
            .validate()
            .map_err(|message| io::Error::new(io::ErrorKind::InvalidInput, message))?;

        let address = config.address();
        let listener = TcpListener::bind(&address)?;
        tracing::info!(address = %address, "Server listening");

        Ok(Self {
            config,
            listener,
            store: Arc::new(store),
            router: Arc::new(Router::default()),
        })
    }

    /// Dirección real del listener (útil con puerto 0)
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub fn store(&self) -> &Arc<ResourceStore> {
        &self.store
    }

    /// Accept loop. Solo retorna si no se pudo crear el pool.
    pub fn run(self) -> io::Result<()> {
        let store = Arc::clone(&self.store);
        let router = Arc::clone(&self.router);
        let pool = WorkerPool::new(self.config.pool_size, move |stream: TcpStream| {
            serve_connection(stream, &store, &router)
        })?;

        tracing::info!(
            workers = pool.size(),
            static_dir = %self.config.static_dir.display(),
            "Accepting connections"
        );

        let read_timeout = self.config.read_timeout();
        for stream in self.listener.incoming() {
            let stream = match stream {
                Ok(stream) => stream,
                Err(error) => {
                    tracing::warn!(%error, "Error accepting socket connection");
                    continue;
                }
            };

            if let Some(stream) = prepare(stream, read_timeout) {
                if pool.submit(stream).is_err() {
                    break;
                }
            }
        }

        Ok(())
    }
}

/// Aplica el timeout de lectura; sin timeout la conexión se descarta
fn prepare(stream: TcpStream, read_timeout: Duration) -> Option<TcpStream> {
    match stream.set_read_timeout(Some(read_timeout)) {
        Ok(()) => Some(stream),
        Err(error) => {
            tracing::warn!(%error, "Unable to set socket read timeout, dropping connection");
            None
        }
    }
}
