//! # Store de recursos con cache
//! src/resources/store.rs
//!
//! Resuelve un path de URL a un [`Resource`]:
//!
//! ```text
//! "/docs/"      → clave "docs/index.html"
//! "/index.html" → clave "index.html"
//! ```
//!
//! El cache se consulta antes de cualquier I/O y sus entradas viven lo que
//! vive el proceso: no hay TTL, invalidación ni chequeo de frescura. Los
//! resultados negativos y los errores de lectura nunca se cachean.
//!
//! El store es el único estado compartido entre workers. Dos workers que
//! fallan el cache para el mismo path leen el archivo dos veces y gana la
//! última escritura; el contenido es el mismo, así que no importa.

use std::collections::HashMap;
use std::io;
use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;

use super::mime::mime_type_for;
use super::resource::Resource;
use super::source::ResourceSource;

/// Página que se sirve para un path terminado en `/`
pub const INDEX_PAGE: &str = "index.html";

/// Errores del store
#[derive(Debug, Error)]
pub enum ResourceError {
    /// El recurso existe pero no pudo leerse. Un request futuro puede
    /// tener éxito.
    #[error("unable to read contents of {path}: {source}")]
    ReadFailure {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Mapea paths de URL a recursos, con cache en memoria
pub struct ResourceStore {
    source: Box<dyn ResourceSource>,
    cache: RwLock<HashMap<String, Arc<Resource>>>,
}

impl ResourceStore {
    pub fn new(source: impl ResourceSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Convierte un path de URL en la clave relativa al directorio estático
    ///
    /// # Ejemplo
    /// ```
    /// use file_server::resources::ResourceStore;
    ///
    /// assert_eq!(ResourceStore::storage_key("/"), "index.html");
    /// assert_eq!(ResourceStore::storage_key("/docs/"), "docs/index.html");
    /// assert_eq!(ResourceStore::storage_key("/app.js"), "app.js");
    /// assert_eq!(ResourceStore::storage_key("404.html"), "404.html");
    /// ```
    pub fn storage_key(path: &str) -> String {
        let with_index = if path.ends_with('/') {
            format!("{}{}", path, INDEX_PAGE)
        } else {
            path.to_string()
        };

        match with_index.strip_prefix('/') {
            Some(stripped) => stripped.to_string(),
            None => with_index,
        }
    }

    /// Resuelve un path a su recurso
    ///
    /// * `Ok(Some(resource))` - desde el cache o recién leído
    /// * `Ok(None)` - no existe (no se cachea)
    /// * `Err(ResourceError)` - existe pero falló la lectura (no se cachea)
    pub fn resolve(&self, path: &str) -> Result<Option<Arc<Resource>>, ResourceError> {
        if let Some(cached) = self.cache.read().get(path) {
            return Ok(Some(Arc::clone(cached)));
        }

        let key = Self::storage_key(path);
        let content = match self.source.load(&key) {
            Ok(Some(content)) => content,
            Ok(None) => return Ok(None),
            Err(source) => {
                tracing::warn!(path = %key, error = %source, "Unable to read contents of the file");
                return Err(ResourceError::ReadFailure { path: key, source });
            }
        };

        let resource = Resource::new(content, mime_type_for(&key));
        Ok(Some(self.get_or_insert(path, resource)))
    }

    /// Inserta un recurso recién cargado; la última escritura gana.
    ///
    /// Es el único punto que modifica el cache.
    fn get_or_insert(&self, path: &str, resource: Resource) -> Arc<Resource> {
        let resource = Arc::new(resource);
        self.cache
            .write()
            .insert(path.to_string(), Arc::clone(&resource));
        resource
    }

    /// Número de paths cacheados
    pub fn cached_len(&self) -> usize {
        self.cache.read().len()
    }

    /// Verifica si un path ya está en el cache
    pub fn is_cached(&self, path: &str) -> bool {
        self.cache.read().contains_key(path)
    }
}

impl std::fmt::Debug for ResourceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceStore")
            .field("cached", &self.cached_len())
            .finish()
    }
}
