//! # Orígenes de contenido estático
//! src/resources/source.rs
//!
//! El [`ResourceStore`](super::ResourceStore) no toca el filesystem
//! directamente: pide los bytes a un [`ResourceSource`]. En producción es un
//! [`DirectorySource`] sobre el directorio estático; en los tests suele ser
//! un [`MemorySource`].

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Origen de bytes para una clave de almacenamiento relativa
/// (ej: `"index.html"`, `"css/site.css"`).
pub trait ResourceSource: Send + Sync {
    /// Retorna `Ok(None)` si la clave no existe.
    ///
    /// Un `Err` significa que el contenido existe pero no pudo leerse.
    fn load(&self, key: &str) -> io::Result<Option<Vec<u8>>>;
}

/// Archivos bajo un directorio raíz
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

}

impl ResourceSource for DirectorySource {
    fn load(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        let relative = Path::new(key);

        // Solo componentes normales: nada de "..", "." ni rutas absolutas
        if relative
            .components()
            .any(|component| !matches!(component, Component::Normal(_)))
        {
            return Ok(None);
        }

        let full_path = self.root.join(relative);
        match fs::metadata(&full_path) {
            Ok(metadata) if metadata.is_file() => fs::read(&full_path).map(Some),
            _ => Ok(None),
        }
    }
}

/// Archivos en memoria, indexados por clave
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<String, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Agrega un archivo (versión builder)
    pub fn with_file(mut self, key: &str, content: impl Into<Vec<u8>>) -> Self {
        self.files.insert(key.to_string(), content.into());
        self
    }
}

impl ResourceSource for MemorySource {
    fn load(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        Ok(self.files.get(key).cloned())
    }
}
