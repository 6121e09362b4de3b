//! # Handler GET
//! src/router/get.rs
//!
//! Sirve el recurso pedido o, si no existe, la primera página de respaldo
//! que se pueda resolver:
//!
//! ```text
//! recurso pedido   → 200
//! 404.html         → 404
//! internal_error   → 500
//! ninguna          → ServerError::ResourceExhaustion
//! ```

use std::io::Write;
use std::sync::Arc;

use super::RequestHandler;
use crate::error::{ServerError, ServerResult};
use crate::http::{Request, Response, StatusCode};
use crate::resources::{Resource, ResourceStore};

/// Páginas de respaldo en orden de intento
pub const FALLBACK_PAGES: [(&str, StatusCode); 2] = [
    ("404.html", StatusCode::NotFound),
    ("internal_error.html", StatusCode::InternalServerError),
];

/// Handler para GET (y HEAD)
#[derive(Debug, Clone, Copy, Default)]
pub struct GetHandler;

impl RequestHandler for GetHandler {
    fn handle(
        &self,
        request: &Request,
        store: &ResourceStore,
        out: &mut dyn Write,
    ) -> ServerResult<StatusCode> {
        let path = request.path();

        if let Some(resource) = store.resolve(path)? {
            send(resource, StatusCode::Ok, out)?;
            return Ok(StatusCode::Ok);
        }

        tracing::info!(path, "File not found");
        send_fallback(path, store, out)
    }
}

/// Recorre [`FALLBACK_PAGES`] y envía la primera que exista
fn send_fallback(
    path: &str,
    store: &ResourceStore,
    out: &mut dyn Write,
) -> ServerResult<StatusCode> {
    for (page, status) in FALLBACK_PAGES {
        if let Some(resource) = store.resolve(page)? {
            send(resource, status, out)?;
            return Ok(status);
        }
        tracing::warn!(page, "Fallback page not found");
    }

    tracing::error!(path, "Multiple problems occurred while handling the request");
    Err(ServerError::ResourceExhaustion {
        path: path.to_string(),
    })
}

/// Headers y flush antes del body
fn send(resource: Arc<Resource>, status: StatusCode, out: &mut dyn Write) -> ServerResult<()> {
    let response = Response::build(resource, status.as_u16());
    response.write_head(out)?;
    response.write_body(out)?;
    Ok(())
}
