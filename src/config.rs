//! # Configuración del Servidor
//! src/config.rs
//!
//! Configuración del servidor de archivos desde argumentos CLI y variables
//! de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./file_server --port 8080 \
//!   --pool-size 16 \
//!   --read-timeout-ms 5000 \
//!   --static-dir ./public
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! FILE_SERVER_PORT=8080 FILE_SERVER_POOL_SIZE=16 ./file_server
//! ```
//!
//! Un valor numérico que no se puede parsear no detiene el arranque: se
//! reemplaza por el default y se emite un `warn`.

use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use clap::Parser;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_POOL_SIZE: usize = 50;
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_FALLBACK_HOST: &str = "redunix";
pub const DEFAULT_STATIC_DIR: &str = "./static";

/// Configuración del servidor de archivos
#[derive(Debug, Clone, Parser)]
#[command(name = "file_server")]
#[command(about = "Servidor de archivos estáticos HTTP/1.1")]
#[command(version)]
pub struct Config {
    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "FILE_SERVER_PORT", value_parser = parse_port)]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = DEFAULT_HOST, env = "FILE_SERVER_HOST")]
    pub host: String,

    /// Número de workers atendiendo conexiones
    #[arg(long = "pool-size", default_value_t = DEFAULT_POOL_SIZE, env = "FILE_SERVER_POOL_SIZE", value_parser = parse_pool_size)]
    pub pool_size: usize,

    /// Timeout de lectura por socket en milisegundos
    #[arg(long = "read-timeout-ms", default_value_t = DEFAULT_READ_TIMEOUT_MS, env = "FILE_SERVER_READ_TIMEOUT_MS", value_parser = parse_read_timeout)]
    pub read_timeout_ms: u64,

    /// Nombre que se muestra al arrancar si no se puede obtener el hostname
    #[arg(long = "fallback-host", default_value = DEFAULT_FALLBACK_HOST, env = "FILE_SERVER_FALLBACK_HOST")]
    pub fallback_host: String,

    /// Directorio raíz del contenido estático
    #[arg(long = "static-dir", default_value = DEFAULT_STATIC_DIR, env = "FILE_SERVER_STATIC_DIR")]
    pub static_dir: PathBuf,
}

impl Config {
    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use file_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "0.0.0.0:8000");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    /// Valida la configuración
    ///
    /// Los valores que llegan por CLI ya fueron corregidos por los parsers;
    /// esto atrapa configuraciones construidas en código.
    pub fn validate(&self) -> Result<(), String> {
        if self.pool_size == 0 {
            return Err("Pool size must be >= 1".to_string());
        }
        if self.read_timeout_ms == 0 {
            return Err("Read timeout must be > 0".to_string());
        }
        Ok(())
    }

    /// Nombre de la máquina para el log de arranque
    ///
    /// Usa el nombre que reporta el sistema operativo; si no se puede leer
    /// o no es UTF-8 válido usa `fallback_host`.
    pub fn host_label(&self) -> String {
        label_or_fallback(gethostname::gethostname().into_string().ok(), &self.fallback_host)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            host: DEFAULT_HOST.to_string(),
            pool_size: DEFAULT_POOL_SIZE,
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
            fallback_host: DEFAULT_FALLBACK_HOST.to_string(),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }
}

fn label_or_fallback(name: Option<String>, fallback: &str) -> String {
    name.map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

/// Parsea `raw` o cae al default si no es válido
fn parse_or_default<T>(raw: &str, option: &str, default: T, valid: impl Fn(&T) -> bool) -> T
where
    T: FromStr + Display,
{
    match raw.trim().parse::<T>() {
        Ok(value) if valid(&value) => value,
        _ => {
            tracing::warn!(option, value = raw, default = %default, "Invalid option value, using default");
            default
        }
    }
}

fn parse_port(raw: &str) -> Result<u16, String> {
    Ok(parse_or_default(raw, "port", DEFAULT_PORT, |_| true))
}

fn parse_pool_size(raw: &str) -> Result<usize, String> {
    Ok(parse_or_default(raw, "pool-size", DEFAULT_POOL_SIZE, |n| *n > 0))
}

fn parse_read_timeout(raw: &str) -> Result<u64, String> {
    Ok(parse_or_default(raw, "read-timeout-ms", DEFAULT_READ_TIMEOUT_MS, |n| *n > 0))
}
