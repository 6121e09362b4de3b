//! # Construcción de Respuestas HTTP
//! src/http/response.rs
//!
//! Convierte un [`Resource`] y un código de estado en una respuesta completa.
//!
//! ## Formato de una respuesta
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Date: Sun, 06 Nov 1994 08:49:37 GMT\r\n
//! Server: RedUnix File Server\r\n
//! Content-type: text/html\r\n
//! Content-length: 13\r\n
//! \r\n
//! <html></html>
//! ```
//!
//! Los cuatro headers se emiten siempre y en ese orden. Los headers
//! agregados con [`Response::add_header`] van después. El body son los bytes
//! del recurso sin transformar (sin compresión ni chunking).
//!
//! ## Ejemplo de uso
//!
//! ```
//! use std::sync::Arc;
//! use file_server::http::Response;
//! use file_server::resources::Resource;
//!
//! let resource = Arc::new(Resource::new(b"<html></html>".to_vec(), "text/html"));
//! let response = Response::build(resource, 200);
//!
//! assert_eq!(response.status_line(), "HTTP/1.1 200 OK");
//! assert_eq!(response.header("Content-length"), Some("13"));
//! ```

use std::io::{self, Write};
use std::sync::Arc;
use std::time::SystemTime;

use super::parser::HTTP_VERSION;
use super::status::reason_phrase_for;
use crate::resources::Resource;

/// Valor fijo del header `Server`
pub const SERVER_NAME: &str = "RedUnix File Server";

/// Representa una respuesta HTTP/1.1 completa
#[derive(Debug, Clone)]
pub struct Response {
    /// Primera línea (ej: "HTTP/1.1 404 Not Found")
    status_line: String,

    /// Código numérico tal como lo pidió el handler
    status: u16,

    /// Headers en orden de emisión
    headers: Vec<(String, String)>,

    /// Recurso cuyo contenido es el body
    resource: Arc<Resource>,
}

impl Response {
    /// Construye la respuesta con la hora actual en el header `Date`
    pub fn build(resource: Arc<Resource>, status: u16) -> Self {
        Self::build_at(resource, status, SystemTime::now())
    }

    /// Igual que [`Response::build`] pero con una hora fija
    pub fn build_at(resource: Arc<Resource>, status: u16, now: SystemTime) -> Self {
        let status_line = format!("{} {} {}", HTTP_VERSION, status, reason_phrase_for(status));

        let headers = vec![
            ("Date".to_string(), httpdate::fmt_http_date(now)),
            ("Server".to_string(), SERVER_NAME.to_string()),
            ("Content-type".to_string(), resource.mime_type().to_string()),
            ("Content-length".to_string(), resource.len().to_string()),
        ];

        Self {
            status_line,
            status,
            headers,
            resource,
        }
    }

    /// Agrega un header al final, antes de transmitir
    pub fn add_header(&mut self, name: &str, value: &str) {
        self.headers.push((name.to_string(), value.to_string()));
    }

    /// Bytes del status line, headers y línea vacía
    pub fn head_bytes(&self) -> Vec<u8> {
        let mut head = String::with_capacity(128);

        head.push_str(&self.status_line);
        head.push_str("\r\n");

        for (name, value) in &self.headers {
            head.push_str(name);
            head.push_str(": ");
            head.push_str(value);
            head.push_str("\r\n");
        }

        head.push_str("\r\n");
        head.into_bytes()
    }

    /// Escribe el bloque de headers y hace flush antes de cualquier byte del body
    pub fn write_head<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(&self.head_bytes())?;
        out.flush()
    }

    /// Escribe exactamente `len()` bytes del recurso y hace flush
    pub fn write_body<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(self.resource.content())?;
        out.flush()
    }

    /// Respuesta completa en un solo buffer
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = self.head_bytes();
        bytes.extend_from_slice(self.resource.content());
        bytes
    }

    pub fn status_line(&self) -> &str {
        &self.status_line
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Busca un header por nombre exacto
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn body(&self) -> &[u8] {
        self.resource.content()
    }

    /// Longitud del body en bytes
    pub fn len(&self) -> usize {
        self.resource.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resource.is_empty()
    }
}
