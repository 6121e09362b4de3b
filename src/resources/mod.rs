//! # Recursos estáticos
//! src/resources/mod.rs
//!
//! Carga contenido estático por path lógico, lo cachea y reporta su MIME type.
//!
//! ```text
//! path → ResourceStore ─┬─ cache (hit) ───────────────→ Resource
//!                       └─ ResourceSource (miss) → mime → Resource
//! ```

pub mod mime;
pub mod resource;
pub mod source;
pub mod store;

pub use resource::Resource;
pub use source::{DirectorySource, MemorySource, ResourceSource};
pub use store::{ResourceError, ResourceStore};
