//! # Ciclo de vida de una conexión
//! src/server/connection.rs
//!
//! Cada socket aceptado pasa por una máquina de estados:
//!
//! ```text
//! Init → Parsing → Dispatching → Responding → Done
//!   ↘        ↘           ↘             ↘
//!                    Closed (error)
//! ```
//!
//! - `Init`: obtiene los streams de entrada y salida del socket
//! - `Parsing`: lee el request hasta la línea vacía
//! - `Dispatching`: elige el handler según el método
//! - `Responding`: el handler escribe headers y body
//!
//! Un error de parsing o de respuesta hace shutdown del socket sin enviar
//! nada más. Si falla `Init` no se escribe nada y el socket se suelta tal
//! cual. Después de una respuesta normal la conexión no se cierra
//! explícitamente: se libera cuando el worker suelta el socket.

use std::io::BufReader;
use std::net::{Shutdown, TcpStream};

use crate::error::{ServerError, ServerResult};
use crate::http::{parse_request, Request, StatusCode};
use crate::resources::ResourceStore;
use crate::router::{RequestHandler, Router};

/// Estado de una conexión
pub enum ConnectionState<'a> {
    Init,
    Parsing {
        reader: BufReader<TcpStream>,
        writer: TcpStream,
    },
    Dispatching {
        request: Request,
        writer: TcpStream,
    },
    Responding {
        request: Request,
        handler: &'a dyn RequestHandler,
        writer: TcpStream,
    },
    Done(StatusCode),
    Closed(ServerError),
}

/// Una conexión aceptada, atendida por un worker
pub struct Connection<'a> {
    stream: TcpStream,
    peer: String,
    store: &'a ResourceStore,
    router: &'a Router,
}

impl<'a> Connection<'a> {
    pub fn new(stream: TcpStream, store: &'a ResourceStore, router: &'a Router) -> Self {
        let peer = stream
            .peer_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        Self {
            stream,
            peer,
            store,
            router,
        }
    }

    /// Dirección del cliente, o "unknown"
    pub fn peer(&self) -> &str {
        &self.peer
    }

    /// Ejecuta la máquina de estados hasta `Done` o `Closed`
    pub fn run(self) -> ServerResult<StatusCode> {
        let mut state = ConnectionState::Init;

        loop {
            state = match state {
                ConnectionState::Init => self.acquire_streams(),

                ConnectionState::Parsing { mut reader, writer } => {
                    match parse_request(&mut reader) {
                        Ok(request) => ConnectionState::Dispatching { request, writer },
                        Err(error) => self.abort(error.into()),
                    }
                }

                ConnectionState::Dispatching { request, writer } => {
                    let router: &'a Router = self.router;
                    match router.handler_for(request.method()) {
                        Some(handler) => ConnectionState::Responding {
                            request,
                            handler,
                            writer,
                        },
                        None => self.abort(ServerError::NoHandler(request.method())),
                    }
                }

                ConnectionState::Responding {
                    request,
                    handler,
                    mut writer,
                } => {
                    tracing::debug!(
                        peer = %self.peer,
                        method = %request.method(),
                        path = request.path(),
                        "Dispatching request"
                    );
                    match handler.handle(&request, self.store, &mut writer) {
                        Ok(status) => ConnectionState::Done(status),
                        Err(error) => self.abort(error),
                    }
                }

                ConnectionState::Done(status) => return Ok(status),
                ConnectionState::Closed(error) => return Err(error),
            };
        }
    }

    /// Obtiene un stream de lectura y otro de escritura sobre el socket
    fn acquire_streams(&self) -> ConnectionState<'a> {
        let input = match self.stream.try_clone() {
            Ok(input) => input,
            Err(source) => {
                return ConnectionState::Closed(ServerError::StreamAcquire {
                    stream: "input",
                    source,
                })
            }
        };

        let writer = match self.stream.try_clone() {
            Ok(output) => output,
            Err(source) => {
                return ConnectionState::Closed(ServerError::StreamAcquire {
                    stream: "output",
                    source,
                })
            }
        };

        ConnectionState::Parsing {
            reader: BufReader::new(input),
            writer,
        }
    }

    /// Cierra ambos sentidos del socket sin escribir nada más
    fn abort(&self, error: ServerError) -> ConnectionState<'a> {
        if let Err(shutdown_error) = self.stream.shutdown(Shutdown::Both) {
            tracing::warn!(peer = %self.peer, error = %shutdown_error, "Unable to close socket");
        }
        ConnectionState::Closed(error)
    }
}

/// Atiende un socket de principio a fin y registra el resultado
pub fn serve_connection(stream: TcpStream, store: &ResourceStore, router: &Router) {
    let connection = Connection::new(stream, store, router);
    let peer = connection.peer().to_string();

    tracing::debug!(peer = %peer, "Started handling request");

    match connection.run() {
        Ok(status) => {
            tracing::debug!(peer = %peer, status = status.as_u16(), "Finished handling request");
        }
        Err(error @ ServerError::Request(_)) | Err(error @ ServerError::NoHandler(_)) => {
            tracing::warn!(peer = %peer, %error, "Invalid request, connection closed");
        }
        Err(error) => {
            tracing::error!(peer = %peer, %error, "Error handling request, connection closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{Method, ParseError, RequestError};
    use crate::resources::MemorySource;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;
    use std::time::Duration;

    fn site() -> ResourceStore {
        ResourceStore::new(
            MemorySource::new()
                .with_file("index.html", "<html></html>")
                .with_file("404.html", "<h1>not found</h1>"),
        )
    }

    /// Acepta una conexión, la atiende y retorna el resultado del servidor
    /// junto con lo que recibió el cliente.
    fn exchange(
        router: Router,
        client_bytes: &'static [u8],
        close_write: bool,
    ) -> (ServerResult<StatusCode>, Vec<u8>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let server = thread::spawn(move || {
            let store = site();
            let (stream, _) = listener.accept().unwrap();
            stream
                .set_read_timeout(Some(Duration::from_secs(2)))
                .unwrap();
            Connection::new(stream, &store, &router).run()
        });

        let mut client = TcpStream::connect(addr).unwrap();
        client.write_all(client_bytes).unwrap();
        if close_write {
            client.shutdown(Shutdown::Write).unwrap();
        }

        let mut received = Vec::new();
        let _ = client.read_to_end(&mut received);

        (server.join().unwrap(), received)
    }

    #[test]
    fn test_serves_existing_file() {
        let (result, received) = exchange(
            Router::default(),
            b"GET /index.html HTTP/1.1\r\nHost: localhost\r\n\r\n",
            false,
        );
        let text = String::from_utf8(received).unwrap();

        assert_eq!(result.unwrap(), StatusCode::Ok);
        assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(text.contains("Server: RedUnix File Server\r\n"));
        assert!(text.ends_with("\r\n\r\n<html></html>"));
    }

    #[test]
    fn test_missing_file_gets_404_page() {
        let (result, received) =
            exchange(Router::default(), b"GET /nope.html HTTP/1.1\r\n\r\n", false);
        let text = String::from_utf8(received).unwrap();

        assert_eq!(result.unwrap(), StatusCode::NotFound);
        assert!(text.starts_with("HTTP/1.1 404 Not Found\r\n"));
        assert!(text.ends_with("<h1>not found</h1>"));
    }

    #[test]
    fn test_unsupported_method_closes_without_response() {
        let (result, received) =
            exchange(Router::default(), b"POST /index.html HTTP/1.1\r\n\r\n", false);

        assert!(matches!(
            result,
            Err(ServerError::Request(RequestError::Parse(
                ParseError::UnsupportedMethod(_)
            )))
        ));
        assert!(received.is_empty());
    }

    #[test]
    fn test_missing_blank_line_closes_without_response() {
        let (result, received) = exchange(
            Router::default(),
            b"GET /index.html HTTP/1.1\r\nHost: localhost\r\n",
            true,
        );

        assert!(matches!(
            result,
            Err(ServerError::Request(RequestError::Parse(
                ParseError::UnterminatedHeaders
            )))
        ));
        assert!(received.is_empty());
    }

    #[test]
    fn test_unregistered_method_closes_without_response() {
        let mut router = Router::new();
        router.register(Method::GET, crate::router::GetHandler);

        let (result, received) = exchange(router, b"HEAD / HTTP/1.1\r\n\r\n", false);

        assert!(matches!(result, Err(ServerError::NoHandler(Method::HEAD))));
        assert!(received.is_empty());
    }

    #[test]
    fn test_silent_client_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let server = thread::spawn(move || {
            let store = site();
            let router = Router::default();
            let (stream, _) = listener.accept().unwrap();
            stream
                .set_read_timeout(Some(Duration::from_millis(100)))
                .unwrap();
            Connection::new(stream, &store, &router).run()
        });

        let _client = TcpStream::connect(addr).unwrap();
        let result = server.join().unwrap();

        assert!(matches!(
            result,
            Err(ServerError::Request(RequestError::Io(_)))
        ));
    }
}
