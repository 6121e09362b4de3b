//! # File Server
//! src/lib.rs
//!
//! Servidor de archivos estáticos HTTP/1.1 sobre sockets bloqueantes y un
//! pool fijo de workers.
//!
//! ## Arquitectura
//!
//! El servidor está dividido en módulos especializados:
//! - `http`: parsing de requests, decodificación y construcción de responses
//! - `resources`: lectura de archivos, tipos MIME y cache en memoria
//! - `router`: método HTTP → handler, y el handler GET con páginas de respaldo
//! - `server`: accept loop, pool de workers y ciclo de vida de cada conexión
//! - `config`: opciones CLI / variables de entorno
//! - `error`: errores que terminan una conexión
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use file_server::config::Config;
//! use file_server::server::Server;
//!
//! let server = Server::bind(Config::default()).expect("bind");
//! server.run().expect("run");
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod resources;
pub mod router;
pub mod server;
