//! # Sistema de Routing
//! src/router/mod.rs
//!
//! Este módulo mapea el método HTTP de un request al handler que lo atiende.
//!
//! ## Arquitectura
//!
//! ```text
//! Request → Router → RequestHandler → Response (escrita al socket)
//! ```
//!
//! El router no mira el path: todos los paths los resuelve el
//! [`ResourceStore`]. GET tiene su handler y cualquier otro método aceptado
//! por el parser (hoy solo HEAD) cae en el handler default, que también es
//! [`GetHandler`]. HEAD recibe el body igual que GET.

pub mod get;

pub use get::{GetHandler, FALLBACK_PAGES};

use std::io::Write;

use crate::error::ServerResult;
use crate::http::{Method, Request, StatusCode};
use crate::resources::ResourceStore;

/// Estrategia que atiende un request ya parseado
///
/// El handler escribe la respuesta completa en `out` y retorna el status
/// que envió.
pub trait RequestHandler: Send + Sync {
    fn handle(
        &self,
        request: &Request,
        store: &ResourceStore,
        out: &mut dyn Write,
    ) -> ServerResult<StatusCode>;
}

/// Router que mapea métodos a handlers
pub struct Router {
    /// Lista de método → handler
    routes: Vec<(Method, Box<dyn RequestHandler>)>,

    /// Handler para métodos sin registro propio
    default: Option<Box<dyn RequestHandler>>,
}

impl Router {
    /// Crea un router vacío
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            default: None,
        }
    }

    /// Handler que atiende los métodos no registrados
    pub fn set_default(&mut self, handler: impl RequestHandler + 'static) {
        self.default = Some(Box::new(handler));
    }

    /// Registra un handler para un método. Un registro posterior para el
    /// mismo método reemplaza al anterior.
    ///
    /// # Ejemplo
    /// ```
    /// use file_server::http::Method;
    /// use file_server::router::{GetHandler, Router};
    ///
    /// let mut router = Router::new();
    /// router.register(Method::GET, GetHandler);
    /// assert!(router.handler_for(Method::GET).is_some());
    /// ```
    pub fn register(&mut self, method: Method, handler: impl RequestHandler + 'static) {
        self.routes.retain(|(registered, _)| *registered != method);
        self.routes.push((method, Box::new(handler)));
    }

    /// Busca el handler de un método, o el default si no hay uno propio
    pub fn handler_for(&self, method: Method) -> Option<&dyn RequestHandler> {
        self.routes
            .iter()
            .find(|(registered, _)| *registered == method)
            .map(|(_, handler)| handler.as_ref())
            .or(self.default.as_deref())
    }

    /// Número de métodos registrados
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl Default for Router {
    /// Router del servidor de archivos: GET → [`GetHandler`], y el resto
    /// (HEAD) cae en el mismo handler
    fn default() -> Self {
        let mut router = Self::new();
        router.register(Method::GET, GetHandler);
        router.set_default(GetHandler);
        router
    }
}
