//! # Códigos de Estado HTTP
//! src/http/status.rs
//!
//! Tabla fija de códigos que el servidor de archivos puede emitir:
//!
//! - **2xx**: Éxito (200 OK)
//! - **3xx**: Redirección (302 Found, solo como texto de respaldo)
//! - **4xx**: Error del cliente (404 Not Found)
//! - **5xx**: Error del servidor (500 Internal Server Error)

/// Texto de razón usado cuando el código no está en la tabla.
///
/// Se reutiliza la frase del 302, igual que el servidor histórico.
pub const UNKNOWN_REASON_PHRASE: &str = "Found";

/// Códigos de estado HTTP que conoce el servidor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    /// 200 OK - El recurso existe y se envía completo
    Ok = 200,

    /// 302 Found
    Found = 302,

    /// 404 Not Found - El recurso pedido no existe
    NotFound = 404,

    /// 500 Internal Server Error - Ni el recurso ni la página 404 existen
    InternalServerError = 500,
}

impl StatusCode {
    /// Convierte el código a su valor numérico
    ///
    /// # Ejemplo
    /// ```
    /// use file_server::http::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// ```
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }

    /// Busca el código en la tabla fija
    ///
    /// # Ejemplo
    /// ```
    /// use file_server::http::StatusCode;
    /// assert_eq!(StatusCode::from_u16(404), Some(StatusCode::NotFound));
    /// assert_eq!(StatusCode::from_u16(418), None);
    /// ```
    pub fn from_u16(code: u16) -> Option<Self> {
        match code {
            200 => Some(StatusCode::Ok),
            302 => Some(StatusCode::Found),
            404 => Some(StatusCode::NotFound),
            500 => Some(StatusCode::InternalServerError),
            _ => None,
        }
    }

    /// Retorna el texto de razón (reason phrase) asociado al código
    ///
    /// # Ejemplo
    /// ```
    /// use file_server::http::StatusCode;
    /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Found => "Found",
            StatusCode::NotFound => "Not Found",
            StatusCode::InternalServerError => "Internal Server Error",
        }
    }
}

/// Texto de razón para un código numérico arbitrario.
///
/// Los códigos fuera de la tabla reciben [`UNKNOWN_REASON_PHRASE`].
pub fn reason_phrase_for(code: u16) -> &'static str {
    StatusCode::from_u16(code)
        .map(|status| status.reason_phrase())
        .unwrap_or(UNKNOWN_REASON_PHRASE)
}

impl std::fmt::Display for StatusCode {
    /// Formato: "200 OK"
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason_phrase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_values() {
        assert_eq!(StatusCode::Ok.as_u16(), 200);
        assert_eq!(StatusCode::Found.as_u16(), 302);
        assert_eq!(StatusCode::NotFound.as_u16(), 404);
        assert_eq!(StatusCode::InternalServerError.as_u16(), 500);
    }

    #[test]
    fn test_from_u16_roundtrips_table() {
        for status in [
            StatusCode::Ok,
            StatusCode::Found,
            StatusCode::NotFound,
            StatusCode::InternalServerError,
        ] {
            assert_eq!(StatusCode::from_u16(status.as_u16()), Some(status));
        }
    }

    #[test]
    fn test_unknown_code_reuses_found_phrase() {
        assert_eq!(reason_phrase_for(418), "Found");
        assert_eq!(reason_phrase_for(201), "Found");
        assert_eq!(reason_phrase_for(500), "Internal Server Error");
    }

    #[test]
    fn test_display() {
        assert_eq!(StatusCode::Ok.to_string(), "200 OK");
        assert_eq!(StatusCode::NotFound.to_string(), "404 Not Found");
        assert_eq!(StatusCode::InternalServerError.to_string(), "500 Internal Server Error");
    }
}
