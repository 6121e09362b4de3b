//! # Requests HTTP/1.1
//! src/http/request.rs
//!
//! Modelo inmutable de un request ya parseado. El parsing en sí vive en
//! [`crate::http::parser`].
//!
//! ## Componentes
//!
//! 1. **Method**: solo `GET` y `HEAD`
//! 2. **Path**: sin query string, siempre empieza con `/`
//! 3. **Headers**: claves en minúsculas, gana la primera aparición
//! 4. **Query params**: `key=value`, `key=` vale `""`, `key` se descarta

use std::collections::HashMap;

/// Métodos HTTP soportados
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET - Obtener un recurso
    GET,

    /// HEAD - Se atiende igual que GET
    HEAD,
}

impl Method {
    /// Parsea un método HTTP desde un string
    ///
    /// Retorna `None` para cualquier otro verbo (POST, PUT, ...).
    /// La comparación distingue mayúsculas.
    pub fn from_token(s: &str) -> Option<Self> {
        match s {
            "GET" => Some(Method::GET),
            "HEAD" => Some(Method::HEAD),
            _ => None,
        }
    }

    /// Convierte el método a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::HEAD => "HEAD",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Representa un request HTTP/1.1 parseado
#[derive(Debug, Clone)]
pub struct Request {
    /// Método HTTP (GET, HEAD)
    method: Method,

    /// Path de la petición sin query string (ej: "/index.html")
    path: String,

    /// Headers HTTP con claves en minúsculas (ej: {"host": "localhost"})
    headers: HashMap<String, String>,

    /// Query parameters decodificados (ej: {"lang": "es"})
    query_params: HashMap<String, String>,
}

impl Request {
    pub(crate) fn new(
        method: Method,
        path: String,
        headers: HashMap<String, String>,
        query_params: HashMap<String, String>,
    ) -> Self {
        Self {
            method,
            path,
            headers,
            query_params,
        }
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> Method {
        self.method
    }

    /// Obtiene el path del request
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Obtiene todos los headers (claves en minúsculas)
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Obtiene un header específico sin distinguir mayúsculas
    ///
    /// # Ejemplo
    /// ```
    /// use file_server::http::parser::parse_request;
    ///
    /// let raw = b"GET / HTTP/1.1\nHost: localhost\n\n";
    /// let request = parse_request(&mut &raw[..]).unwrap();
    ///
    /// assert_eq!(request.header("HOST"), Some("localhost"));
    /// assert_eq!(request.header("host"), Some("localhost"));
    /// ```
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(|s| s.as_str())
    }

    /// Obtiene todos los query parameters
    pub fn query_params(&self) -> &HashMap<String, String> {
        &self.query_params
    }

    /// Obtiene un query parameter específico
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query_params.get(name).map(|s| s.as_str())
    }
}
