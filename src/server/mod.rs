//! # Módulo del Servidor
//! src/server/mod.rs
//!
//! Este módulo implementa el servidor TCP que:
//! 1. Escucha en un puerto
//! 2. Acepta conexiones y les aplica el timeout de lectura
//! 3. Entrega cada socket a un pool fijo de workers
//! 4. Cada worker parsea el request, lo despacha y escribe la respuesta

pub mod connection;
pub mod pool;
pub mod tcp;

pub use connection::{serve_connection, Connection, ConnectionState};
pub use pool::{WorkQueue, WorkerPool};
pub use tcp::Server;
