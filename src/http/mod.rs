//! # Módulo HTTP
//!
//! Implementa el subconjunto de HTTP/1.1 que acepta el servidor de archivos:
//!
//! - Parsing de requests línea por línea desde el socket
//! - Decodificación de paths y query parameters
//! - Construcción de responses con headers fijos
//! - Tabla de status codes
//!
//! No hay keep-alive, chunked transfer encoding, rangos ni métodos distintos
//! de GET/HEAD: cada conexión es un solo ciclo request/response.
//!
//! ### Formato de Request
//!
//! ```text
//! GET /path?query=value HTTP/1.1\r\n
//! Header-Name: Header-Value\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Date: <fecha GMT>\r\n
//! Server: RedUnix File Server\r\n
//! Content-type: text/html\r\n
//! Content-length: 13\r\n
//! \r\n
//! <html></html>
//! ```

pub mod encoding;
pub mod parser;
pub mod request;
pub mod response;
pub mod status;

pub use parser::{parse_request, ParseError, RequestError};
pub use request::{Method, Request};
pub use response::Response;
pub use status::StatusCode;
