//! # Recurso estático
//! src/resources/resource.rs

/// Contenido de un archivo estático y su MIME type.
///
/// Inmutable. La longitud siempre es `content.len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    content: Vec<u8>,
    mime_type: String,
}

impl Resource {
    pub fn new(content: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            content,
            mime_type: mime_type.into(),
        }
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
