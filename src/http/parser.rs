//! # Parser de Requests HTTP/1.1
//! src/http/parser.rs
//!
//! Lee un request línea por línea desde cualquier [`BufRead`] (en producción,
//! el socket envuelto en un `BufReader`) y produce un [`Request`] o un error
//! clasificado. Nunca lee más allá de la línea vacía que cierra los headers.
//!
//! ## Formato aceptado
//!
//! ```text
//! GET /path?param1=value1&param2=value2 HTTP/1.1\r\n
//! Host: localhost:8000\r\n
//! \r\n
//! ```
//!
//! Los finales de línea pueden ser `\r\n` o `\n`.
//!
//! ## Orden de validación de la primera línea
//!
//! 1. Línea ausente, vacía o que empieza con espacio → `MalformedRequestLine`
//! 2. Distinto de 3 tokens separados por un espacio → `WrongArgumentCount`
//!    (los tokens vacíos al final no cuentan: `"GET / HTTP/1.1 "` son 3)
//! 3. Versión distinta de `HTTP/1.1` → `UnsupportedVersion`
//! 4. Método distinto de GET/HEAD → `UnsupportedMethod`
//!
//! ## Path y query string
//!
//! El path solo se decodifica cuando hay `?` en el target. Sin `?` se
//! devuelve tal cual llegó.

use std::collections::HashMap;
use std::io::{self, BufRead, Read};

use thiserror::Error;

use super::encoding::{decode_component, EncodingError};
use super::request::{Method, Request};

/// Única versión de protocolo aceptada
pub const HTTP_VERSION: &str = "HTTP/1.1";

/// Largo máximo de una línea del request, terminador incluido
pub const MAX_LINE_LENGTH: usize = 8 * 1024;

/// Errores de formato del request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// La primera línea falta, está vacía o empieza con espacio
    #[error("initial line of HTTP request does not follow the correct format")]
    MalformedRequestLine,

    /// La primera línea no tiene exactamente 3 tokens
    #[error("first line of HTTP request has {0} arguments instead of 3")]
    WrongArgumentCount(usize),

    /// Versión HTTP distinta de HTTP/1.1
    #[error("unsupported HTTP version: {0}")]
    UnsupportedVersion(String),

    /// Método HTTP no soportado
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// Header sin ':'
    #[error("header not correctly formatted: {0:?}")]
    MalformedHeader(String),

    /// El stream terminó antes de la línea vacía
    #[error("header block is not terminated by a blank line")]
    UnterminatedHeaders,
}

/// Cualquier falla al derivar un [`Request`] del stream.
///
/// Todas son fatales para la conexión.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error("I/O error while reading request: {0}")]
    Io(#[from] io::Error),
}

/// Parsea un request HTTP/1.1 desde un reader
///
/// # Ejemplo
///
/// ```
/// use file_server::http::parser::parse_request;
///
/// let raw = b"GET /index.html?lang=es HTTP/1.1\r\nHost: localhost\r\n\r\n";
/// let request = parse_request(&mut &raw[..]).unwrap();
///
/// assert_eq!(request.path(), "/index.html");
/// assert_eq!(request.query_param("lang"), Some("es"));
/// ```
pub fn parse_request<R: BufRead + ?Sized>(reader: &mut R) -> Result<Request, RequestError> {
    // 1. Request line
    let first_line = read_line(reader, |_| ParseError::MalformedRequestLine)?;
    let (method, target) = parse_first_line(first_line.as_deref())?;

    // 2. Path y query parameters
    let (path, query_params) = split_target(target)?;

    // 3. Headers hasta la línea vacía
    let headers = parse_headers(reader)?;

    Ok(Request::new(method, path, headers, query_params))
}

/// Lee una línea sin su terminador. `None` al final del stream.
///
/// Una línea sin `\n` dentro de [`MAX_LINE_LENGTH`] bytes se rechaza con el
/// error que arma `too_long` a partir del prefijo leído.
fn read_line<R: BufRead + ?Sized>(
    reader: &mut R,
    too_long: impl FnOnce(String) -> ParseError,
) -> Result<Option<String>, RequestError> {
    let mut line = String::new();
    let read = reader.take(MAX_LINE_LENGTH as u64).read_line(&mut line)?;
    if read == 0 {
        return Ok(None);
    }

    if !line.ends_with('\n') {
        if read == MAX_LINE_LENGTH {
            let prefix: String = line.chars().take(64).collect();
            return Err(too_long(prefix).into());
        }
        return Ok(Some(line));
    }

    line.pop();
    if line.ends_with('\r') {
        line.pop();
    }

    Ok(Some(line))
}

/// Valida la primera línea y retorna el método y el target sin procesar
fn parse_first_line(line: Option<&str>) -> Result<(Method, &str), ParseError> {
    let line = match line {
        Some(line) if !line.is_empty() && !line.starts_with(char::is_whitespace) => line,
        _ => return Err(ParseError::MalformedRequestLine),
    };

    let mut parts: Vec<&str> = line.split(' ').collect();
    while parts.last() == Some(&"") {
        parts.pop();
    }
    if parts.len() != 3 {
        return Err(ParseError::WrongArgumentCount(parts.len()));
    }

    if parts[2] != HTTP_VERSION {
        return Err(ParseError::UnsupportedVersion(parts[2].to_string()));
    }

    let method = Method::from_token(parts[0])
        .ok_or_else(|| ParseError::UnsupportedMethod(parts[0].to_string()))?;

    Ok((method, parts[1]))
}

/// Separa el target en path y query parameters
///
/// Ejemplo: "/index.html?a=1&b=" → ("/index.html", {"a": "1", "b": ""})
fn split_target(target: &str) -> Result<(String, HashMap<String, String>), EncodingError> {
    match target.split_once('?') {
        Some((raw_path, query)) => {
            let path = decode_component(raw_path)?;
            let query_params = parse_query_string(query)?;
            Ok((path, query_params))
        }
        // Sin '?' el path no se decodifica
        None => Ok((target.to_string(), HashMap::new())),
    }
}

/// Parsea una query string en un HashMap
///
/// - `key=value` → se guarda decodificado (la última aparición gana)
/// - `key=` → se guarda con valor vacío
/// - `key` → se descarta, aunque su clave igual debe decodificar bien
fn parse_query_string(query: &str) -> Result<HashMap<String, String>, EncodingError> {
    let mut params = HashMap::new();

    for token in query.split('&') {
        match token.split_once('=') {
            Some((key, value)) => {
                let key = decode_component(key)?;
                let value = if value.is_empty() {
                    String::new()
                } else {
                    decode_component(value)?
                };
                params.insert(key, value);
            }
            None => {
                decode_component(token)?;
            }
        }
    }

    Ok(params)
}

/// Lee headers `Name: Value` hasta la línea vacía
fn parse_headers<R: BufRead + ?Sized>(
    reader: &mut R,
) -> Result<HashMap<String, String>, RequestError> {
    let mut headers = HashMap::new();

    loop {
        let line = read_line(reader, ParseError::MalformedHeader)?
            .ok_or(ParseError::UnterminatedHeaders)?;

        if line.is_empty() {
            break;
        }

        let (name, value) = line
            .split_once(':')
            .ok_or_else(|| ParseError::MalformedHeader(line.clone()))?;

        headers
            .entry(name.to_ascii_lowercase())
            .or_insert_with(|| value.trim().to_string());
    }

    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BROWSER_HEADERS: &str = "Host: www.redunix.test\n\
        Accept: image/gif, image/jpeg, */*\n\
        Accept-Language: en-us\n\
        Accept-Encoding: gzip, deflate\n\
        User-Agent: Mozilla/4.0 (compatible; MSIE 6.0; Windows NT 5.1)\n";

    fn parse(raw: &str) -> Result<Request, RequestError> {
        parse_request(&mut raw.as_bytes())
    }

    fn parse_error(raw: &str) -> ParseError {
        match parse(raw) {
            Err(RequestError::Parse(e)) => e,
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_simple_get() {
        let request = parse("GET / HTTP/1.1\r\n\r\n").unwrap();

        assert_eq!(request.method(), Method::GET);
        assert_eq!(request.path(), "/");
        assert!(request.headers().is_empty());
        assert!(request.query_params().is_empty());
    }

    #[test]
    fn test_parse_head() {
        let request = parse("HEAD /index.html HTTP/1.1\n\n").unwrap();
        assert_eq!(request.method(), Method::HEAD);
    }

    #[test]
    fn test_parse_browser_request() {
        let raw = format!("GET /index.html HTTP/1.1\n{}\n", BROWSER_HEADERS);
        let request = parse(&raw).unwrap();

        assert_eq!(request.path(), "/index.html");
        assert_eq!(request.headers().len(), 5);
        assert_eq!(request.header("Host"), Some("www.redunix.test"));
        assert_eq!(request.header("Accept"), Some("image/gif, image/jpeg, */*"));
        assert_eq!(request.header("accept-language"), Some("en-us"));
        assert_eq!(
            request.header("User-Agent"),
            Some("Mozilla/4.0 (compatible; MSIE 6.0; Windows NT 5.1)")
        );
    }

    #[test]
    fn test_first_header_occurrence_wins() {
        let request = parse("GET / HTTP/1.1\nX-Tag: first\nx-tag: second\n\n").unwrap();
        assert_eq!(request.header("X-Tag"), Some("first"));
    }

    #[test]
    fn test_header_value_is_trimmed() {
        let request = parse("GET / HTTP/1.1\nHost:    spaced.test   \n\n").unwrap();
        assert_eq!(request.header("host"), Some("spaced.test"));
    }

    #[test]
    fn test_query_params() {
        let raw = format!(
            "GET /index.html?param=test&param2=test2&param3= HTTP/1.1\n{}\n",
            BROWSER_HEADERS
        );
        let request = parse(&raw).unwrap();

        assert_eq!(request.path(), "/index.html");
        assert_eq!(request.query_params().len(), 3);
        assert_eq!(request.query_param("param"), Some("test"));
        assert_eq!(request.query_param("param2"), Some("test2"));
        assert_eq!(request.query_param("param3"), Some(""));
    }

    #[test]
    fn test_bare_query_key_is_dropped() {
        let request = parse("GET /index.html?param=test&param2=test2&param3 HTTP/1.1\n\n").unwrap();

        assert_eq!(request.query_params().len(), 2);
        assert_eq!(request.query_param("param3"), None);
    }

    #[test]
    fn test_later_query_key_overwrites() {
        let request = parse("GET /?k=1&k=2 HTTP/1.1\n\n").unwrap();
        assert_eq!(request.query_param("k"), Some("2"));
    }

    #[test]
    fn test_query_values_are_decoded() {
        let request = parse("GET /search?text=hello%20world&q=a+b HTTP/1.1\n\n").unwrap();

        assert_eq!(request.query_param("text"), Some("hello world"));
        assert_eq!(request.query_param("q"), Some("a b"));
    }

    #[test]
    fn test_path_decoded_only_with_query() {
        let with_query = parse("GET /my%20page.html?x=1 HTTP/1.1\n\n").unwrap();
        assert_eq!(with_query.path(), "/my page.html");

        let without_query = parse("GET /my%20page.html HTTP/1.1\n\n").unwrap();
        assert_eq!(without_query.path(), "/my%20page.html");
    }

    #[test]
    fn test_empty_stream_is_malformed_request_line() {
        assert_eq!(parse_error(""), ParseError::MalformedRequestLine);
    }

    #[test]
    fn test_blank_first_line_is_malformed() {
        assert_eq!(parse_error("\r\n\r\n"), ParseError::MalformedRequestLine);
    }

    #[test]
    fn test_leading_whitespace_is_malformed() {
        assert_eq!(
            parse_error(" GET / HTTP/1.1\n\n"),
            ParseError::MalformedRequestLine
        );
    }

    #[test]
    fn test_wrong_argument_count() {
        assert_eq!(
            parse_error("GET /index.html HTTP/1.1 EXTRA\n\n"),
            ParseError::WrongArgumentCount(4)
        );
        assert_eq!(parse_error("GET\n\n"), ParseError::WrongArgumentCount(1));
    }

    #[test]
    fn test_trailing_spaces_on_first_line_are_ignored() {
        let request = parse("GET /index.html HTTP/1.1 \n\n").unwrap();
        assert_eq!(request.path(), "/index.html");

        let request = parse("GET /index.html HTTP/1.1   \r\n\r\n").unwrap();
        assert_eq!(request.method(), Method::GET);
    }

    #[test]
    fn test_interior_empty_token_still_counts() {
        assert_eq!(
            parse_error("GET  /index.html HTTP/1.1\n\n"),
            ParseError::WrongArgumentCount(4)
        );
    }

    #[test]
    fn test_overlong_first_line_is_malformed() {
        let raw = format!("GET /{} HTTP/1.1\n\n", "a".repeat(MAX_LINE_LENGTH));
        assert_eq!(parse_error(&raw), ParseError::MalformedRequestLine);
    }

    #[test]
    fn test_overlong_header_is_malformed() {
        let raw = format!("GET / HTTP/1.1\nX-Big: {}\n\n", "b".repeat(MAX_LINE_LENGTH));
        match parse_error(&raw) {
            ParseError::MalformedHeader(prefix) => {
                assert!(prefix.starts_with("X-Big: bbb"));
                assert_eq!(prefix.len(), 64);
            }
            other => panic!("expected MalformedHeader, got {:?}", other),
        }
    }

    #[test]
    fn test_line_at_limit_is_accepted() {
        // "GET /" + relleno + " HTTP/1.1\n" ocupa justo MAX_LINE_LENGTH
        let filler = "a".repeat(MAX_LINE_LENGTH - "GET / HTTP/1.1\n".len());
        let raw = format!("GET /{} HTTP/1.1\n\n", filler);

        let request = parse(&raw).unwrap();
        assert_eq!(request.path().len(), 1 + filler.len());
    }

    #[test]
    fn test_unsupported_version() {
        assert_eq!(
            parse_error("GET /index.html HTTP/1.2\n\n"),
            ParseError::UnsupportedVersion("HTTP/1.2".to_string())
        );
        assert_eq!(
            parse_error("GET / HTTP/1.0\n\n"),
            ParseError::UnsupportedVersion("HTTP/1.0".to_string())
        );
    }

    #[test]
    fn test_version_checked_before_method() {
        assert_eq!(
            parse_error("POST / HTTP/2.0\n\n"),
            ParseError::UnsupportedVersion("HTTP/2.0".to_string())
        );
    }

    #[test]
    fn test_post_is_unsupported() {
        let raw = format!("POST /index.html HTTP/1.1\n{}\n", BROWSER_HEADERS);
        assert_eq!(
            parse_error(&raw),
            ParseError::UnsupportedMethod("POST".to_string())
        );
    }

    #[test]
    fn test_header_without_colon() {
        let raw = "GET /index.html HTTP/1.1\nHost: x\nAccept-Language en-us\n\n";
        assert_eq!(
            parse_error(raw),
            ParseError::MalformedHeader("Accept-Language en-us".to_string())
        );
    }

    #[test]
    fn test_missing_blank_line() {
        let raw = format!("GET /index.html HTTP/1.1\n{}", BROWSER_HEADERS);
        assert_eq!(parse_error(&raw), ParseError::UnterminatedHeaders);
    }

    #[test]
    fn test_bad_query_escape_is_encoding_error() {
        let result = parse("GET /index.html?param=test&param2=% HTTP/1.1\n\n");
        assert!(matches!(result, Err(RequestError::Encoding(_))));
    }

    #[test]
    fn test_bad_escape_in_dropped_key_is_encoding_error() {
        let result = parse("GET /index1.html?param=ttt&% HTTP/1.1\n\n");
        assert!(matches!(result, Err(RequestError::Encoding(_))));
    }

    #[test]
    fn test_does_not_consume_past_headers() {
        let raw = b"GET / HTTP/1.1\nHost: a\n\nleftover body";
        let mut reader = &raw[..];

        parse_request(&mut reader).unwrap();
        assert_eq!(reader, b"leftover body");
    }
}
