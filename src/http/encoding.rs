//! # Decodificación de URLs
//! src/http/encoding.rs
//!
//! Decodifica paths y query parameters con las reglas de formularios:
//! `+` es un espacio y `%XX` es el byte `0xXX`.
//!
//! A diferencia de un decodificador tolerante, un `%` sin dos dígitos
//! hexadecimales detrás es un error. El parser lo propaga como
//! [`EncodingError`], fuera de la familia de `ParseError`.

use thiserror::Error;

/// Errores de decodificación de URL
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    /// Un `%` sin dos dígitos hexadecimales
    #[error("malformed percent-escape at byte {position} in {input:?}")]
    MalformedEscape { input: String, position: usize },

    /// Los bytes decodificados no son UTF-8
    #[error("percent-decoded bytes are not valid UTF-8 in {0:?}")]
    InvalidUtf8(String),
}

/// Decodifica un componente de URL
///
/// # Ejemplo
/// ```
/// use file_server::http::encoding::decode_component;
///
/// assert_eq!(decode_component("hello%20world").unwrap(), "hello world");
/// assert_eq!(decode_component("a+b").unwrap(), "a b");
/// assert!(decode_component("100%").is_err());
/// ```
pub fn decode_component(raw: &str) -> Result<String, EncodingError> {
    validate_escapes(raw)?;

    // '+' se reemplaza antes de decodificar para que "%2B" siga siendo '+'
    let spaced = raw.replace('+', " ");

    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .map_err(|_| EncodingError::InvalidUtf8(raw.to_string()))
}

/// Verifica que cada `%` vaya seguido de dos dígitos hexadecimales
fn validate_escapes(raw: &str) -> Result<(), EncodingError> {
    let bytes = raw.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            let well_formed = bytes.len() >= i + 3
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();

            if !well_formed {
                return Err(EncodingError::MalformedEscape {
                    input: raw.to_string(),
                    position: i,
                });
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(decode_component("/index.html").unwrap(), "/index.html");
    }

    #[test]
    fn test_decodes_escapes_and_plus() {
        assert_eq!(decode_component("dlrow%20olleh").unwrap(), "dlrow olleh");
        assert_eq!(decode_component("a+b+c").unwrap(), "a b c");
        assert_eq!(decode_component("1%2B1").unwrap(), "1+1");
    }

    #[test]
    fn test_decodes_multibyte_utf8() {
        assert_eq!(decode_component("caf%C3%A9").unwrap(), "café");
    }

    #[test]
    fn test_lone_percent_is_malformed() {
        let err = decode_component("%").unwrap_err();
        assert_eq!(
            err,
            EncodingError::MalformedEscape { input: "%".to_string(), position: 0 }
        );
    }

    #[test]
    fn test_non_hex_escape_is_malformed() {
        assert!(matches!(
            decode_component("ab%zz"),
            Err(EncodingError::MalformedEscape { position: 2, .. })
        ));
        assert!(matches!(
            decode_component("ab%4"),
            Err(EncodingError::MalformedEscape { position: 2, .. })
        ));
    }

    #[test]
    fn test_invalid_utf8_rejected() {
        assert!(matches!(
            decode_component("%FF%FE"),
            Err(EncodingError::InvalidUtf8(_))
        ));
    }
}
