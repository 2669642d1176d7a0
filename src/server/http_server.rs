//! HTTP server implementation.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use log::{debug, error, info, warn};

use crate::parser::{request_from_reader_with_capacity, Error as ParserError};
use crate::response::{ResponseWriter, StatusCode};
use crate::server::config::ServerConfig;
use crate::server::error::Error;
use crate::server::handler::{Handler, HandlerError};

/// Pause before accepting again after a failed accept.
const ACCEPT_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Start a server on all interfaces at `port`.
pub async fn serve<H: Handler>(port: u16, handler: H) -> Result<HttpServer, Error> {
    HttpServer::serve(ServerConfig::with_port(port), handler).await
}

/// Handle to a running HTTP server.
///
/// The acceptance loop runs in its own task and spawns one task per
/// connection. Closing (or dropping) the handle stops accepting new
/// connections; connections already being served run to completion.
pub struct HttpServer {
    local_addr: SocketAddr,
    closed: Arc<AtomicBool>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    accept_task: Option<JoinHandle<()>>,
}

impl HttpServer {
    /// Bind the listener and start accepting connections.
    ///
    /// Returns as soon as the listener is bound.
    pub async fn serve<H: Handler>(config: ServerConfig, handler: H) -> Result<Self, Error> {
        let listener = TcpListener::bind(config.addr)
            .await
            .map_err(|source| Error::Bind { addr: config.addr, source })?;
        let local_addr = listener.local_addr()?;
        info!("Server listening on http://{local_addr}");

        let closed = Arc::new(AtomicBool::new(false));
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let accept_task = tokio::spawn(Self::accept_loop(
            listener,
            Arc::new(handler),
            closed.clone(),
            shutdown_rx,
            config.read_buffer_size,
            config.max_buffer_size,
        ));

        Ok(Self {
            local_addr,
            closed,
            shutdown_tx: Some(shutdown_tx),
            accept_task: Some(accept_task),
        })
    }

    /// The address the listener is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Whether `close` has been called or the handle is being dropped.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Stop accepting connections and close the listener.
    ///
    /// Waits until the acceptance loop has released the listener. In-flight
    /// connections are not interrupted.
    pub async fn close(&mut self) -> Result<(), Error> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Err(Error::AlreadyClosed);
        }

        if let Some(shutdown_tx) = self.shutdown_tx.take() {
            // The loop only goes away early if its task panicked; join reports that
            let _ = shutdown_tx.send(());
        }
        if let Some(accept_task) = self.accept_task.take() {
            accept_task.await?;
        }

        info!("Server on {} closed", self.local_addr);
        Ok(())
    }

    /// Accept connections until the server is closed.
    async fn accept_loop(
        listener: TcpListener,
        handler: Arc<dyn Handler>,
        closed: Arc<AtomicBool>,
        mut shutdown_rx: oneshot::Receiver<()>,
        read_buffer_size: usize,
        max_buffer_size: usize,
    ) {
        while !closed.load(Ordering::Acquire) {
            tokio::select! {
                // Fires on close() and when the handle is dropped
                _ = &mut shutdown_rx => break,

                accept_result = listener.accept() => {
                    match accept_result {
                        Ok((socket, addr)) => {
                            debug!("Accepted connection from {addr}");
                            tokio::spawn(Self::handle_new_connection(
                                socket,
                                addr,
                                handler.clone(),
                                read_buffer_size,
                                max_buffer_size,
                            ));
                        }
                        Err(e) => {
                            if closed.load(Ordering::Acquire) {
                                break;
                            }
                            error!("Error accepting connection: {e}");
                            tokio::time::sleep(ACCEPT_RETRY_DELAY).await;
                        }
                    }
                }
            }
        }

        info!("Stopped accepting connections");
    }

    /// Serve one accepted connection; the socket is closed when this returns.
    async fn handle_new_connection(
        mut socket: TcpStream,
        addr: SocketAddr,
        handler: Arc<dyn Handler>,
        read_buffer_size: usize,
        max_buffer_size: usize,
    ) {
        let result = Self::handle_connection(
            &mut socket,
            handler.as_ref(),
            read_buffer_size,
            max_buffer_size,
        )
        .await;
        if let Err(e) = result {
            error!("Error handling connection from {addr}: {e}");
        }
    }

    /// Handle a single connection.
    ///
    /// Parses one request, passes it to `handler` together with a writer
    /// bound to `stream`, renders a [`HandlerError`] if one is returned, and
    /// shuts down the write half so the peer sees the end of the response.
    /// A malformed request is answered with 400 Bad Request and reported as
    /// [`Error::ParseError`], as is a request whose head outgrows
    /// `max_buffer_size`.
    pub async fn handle_connection<S>(
        stream: &mut S,
        handler: &dyn Handler,
        read_buffer_size: usize,
        max_buffer_size: usize,
    ) -> Result<(), Error>
    where
        S: AsyncRead + AsyncWrite + Unpin + Send,
    {
        let parsed =
            request_from_reader_with_capacity(stream, read_buffer_size, max_buffer_size).await;
        let request = match parsed {
            Ok(request) => request,
            Err(ParserError::IoError(e)) => return Err(Error::IoError(e)),
            Err(e) => {
                warn!("Rejecting malformed request: {e}");
                let handler_error =
                    HandlerError::new(StatusCode::BAD_REQUEST, format!("Bad Request: {e}"));
                handler_error.write_to(&mut ResponseWriter::new(&mut *stream)).await?;
                stream.shutdown().await?;
                return Err(Error::ParseError(e));
            }
        };

        debug!(
            "{} {}",
            request.request_line.method, request.request_line.request_target
        );

        let mut writer = ResponseWriter::new(&mut *stream);
        if let Err(handler_error) = handler.handle(&mut writer, &request).await {
            warn!(
                "Handler failed for {}: {handler_error}",
                request.request_line.request_target
            );
            handler_error.write_to(&mut writer).await?;
        }

        stream.shutdown().await?;
        Ok(())
    }
}

impl Drop for HttpServer {
    fn drop(&mut self) {
        // Dropping shutdown_tx wakes the acceptance loop
        self.closed.store(true, Ordering::Release);
    }
}
