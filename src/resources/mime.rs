//! # Tabla de MIME types
//! src/resources/mime.rs
//!
//! Mapea la extensión del archivo a su MIME type con una tabla fija.
//! La búsqueda distingue mayúsculas (`INDEX.HTML` no es `text/html`).
//!
//! Referencia: lista de MIME types comunes de MDN.

use std::path::Path;

/// MIME type genérico para extensiones desconocidas
pub const OCTET_STREAM: &str = "application/octet-stream";

const MIME_TYPES: &[(&str, &str)] = &[
    ("css", "text/css"),
    ("csv", "text/csv"),
    ("htm", "text/html"),
    ("html", "text/html"),
    ("jpeg", "image/jpeg"),
    ("jpg", "image/jpeg"),
    ("js", "text/javascript"),
    ("json", "application/json"),
    ("jsonld", "application/ld+json"),
    ("png", "image/png"),
    ("pdf", "application/pdf"),
    ("svg", "image/svg+xml"),
    ("swf", "application/x-shockwave-flash"),
    ("webp", "image/webp"),
    ("xhtml", "application/xhtml+xml"),
    ("xml", "application/xml"),
    ("zip", "application/zip"),
    ("7z", "application/x-7z-compressed"),
];

/// Busca el MIME type de una extensión (sin el punto)
pub fn lookup(extension: &str) -> Option<&'static str> {
    MIME_TYPES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, mime)| *mime)
}

/// Determina el MIME type de una clave de almacenamiento.
///
/// Sin extensión o con una extensión desconocida retorna [`OCTET_STREAM`]
/// y deja un diagnóstico en el log.
pub fn mime_type_for(key: &str) -> &'static str {
    let extension = Path::new(key).extension().and_then(|ext| ext.to_str());

    match extension.and_then(lookup) {
        Some(mime) => mime,
        None => {
            tracing::warn!(
                file = key,
                default = OCTET_STREAM,
                "Could not find the content type for file, using default"
            );
            OCTET_STREAM
        }
    }
}
