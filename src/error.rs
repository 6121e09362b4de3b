//! # Errores de conexión
//! src/error.rs
//!
//! Cada variante de [`ServerError`] termina la conexión en curso. Ninguna
//! detiene el servidor: el accept loop sigue atendiendo otras conexiones.

use std::io;

use thiserror::Error;

use crate::http::{Method, RequestError};
use crate::resources::ResourceError;

/// Condiciones que terminan una conexión
#[derive(Debug, Error)]
pub enum ServerError {
    /// No se pudo obtener el stream de entrada o salida del socket
    #[error("error getting {stream} stream from connection: {source}")]
    StreamAcquire {
        stream: &'static str,
        #[source]
        source: io::Error,
    },

    /// El request no se pudo parsear, decodificar o leer
    #[error(transparent)]
    Request(#[from] RequestError),

    /// El router no tiene handler para el método
    #[error("no handler registered for method {0}")]
    NoHandler(Method),

    /// Un recurso existente no se pudo leer
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// Ni el recurso, ni la página 404, ni la página 500 existen
    #[error("no fallback page could be resolved while handling {path}")]
    ResourceExhaustion { path: String },

    /// Falló la escritura de la respuesta
    #[error("unable to write response: {0}")]
    Io(#[from] io::Error),
}

/// Result para operaciones de una conexión
pub type ServerResult<T> = Result<T, ServerError>;
