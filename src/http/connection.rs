use std::sync::Arc;
use std::time::Duration;

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};
use tokio::time::timeout;

use crate::error::GatewayError;
use crate::gateway::Gateway;
use crate::http::parser::{ParseError, parse_http_request};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;

/// Limits applied while reading a request.
#[derive(Debug, Clone, Copy)]
pub struct ReadLimits {
    pub max_request_bytes: usize,
    pub read_timeout: Duration,
}

/// One client connection: read a single request, answer it, close.
pub struct Connection<S> {
    stream: S,
    buffer: BytesMut,
    state: ConnectionState,
    gateway: Arc<Gateway>,
    limits: ReadLimits,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter),
    Closed,
}

/// Outcome of the read phase.
enum ReadOutcome {
    Request(Request),
    /// Client sent something we will not parse; answer and close.
    Rejected(ParseError),
    /// Client went away (or stalled) before sending a full request.
    Gone,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, gateway: Arc<Gateway>, limits: ReadLimits) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(4096),
            state: ConnectionState::Reading,
            gateway,
            limits,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => {
                    self.state = match self.read_request().await? {
                        ReadOutcome::Request(req) => ConnectionState::Processing(req),
                        // A method we do not know is a route we do not serve.
                        ReadOutcome::Rejected(ParseError::InvalidMethod) => {
                            tracing::debug!("Unknown method, answering 404");
                            ConnectionState::Writing(ResponseWriter::new(&Response::not_found()))
                        }
                        ReadOutcome::Rejected(e) => {
                            tracing::warn!(error = %e, "Rejecting malformed request");
                            ConnectionState::Writing(ResponseWriter::new(&Response::bad_request()))
                        }
                        ReadOutcome::Gone => ConnectionState::Closed,
                    };
                }

                ConnectionState::Processing(req) => {
                    let response = self.gateway.route(req);
                    self.state = ConnectionState::Writing(ResponseWriter::new(&response));
                }

                ConnectionState::Writing(writer) => {
                    writer.write_to_stream(&mut self.stream).await?;
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    async fn read_request(&mut self) -> anyhow::Result<ReadOutcome> {
        let read_timeout = self.limits.read_timeout;
        match timeout(read_timeout, self.read_until_parsed()).await {
            Ok(outcome) => outcome,
            Err(_) => {
                tracing::debug!(timeout = ?read_timeout, "Timed out waiting for request");
                Ok(ReadOutcome::Gone)
            }
        }
    }

    async fn read_until_parsed(&mut self) -> anyhow::Result<ReadOutcome> {
        loop {
            // Try parsing whatever we already have
            match parse_http_request(&self.buffer) {
                Ok((request, consumed)) => {
                    let _ = self.buffer.split_to(consumed);
                    return Ok(ReadOutcome::Request(request));
                }

                Err(ParseError::Incomplete) => {
                    // Need more data → fall through to read
                }

                Err(e) => return Ok(ReadOutcome::Rejected(e)),
            }

            if self.buffer.len() >= self.limits.max_request_bytes {
                return Ok(ReadOutcome::Rejected(ParseError::InvalidRequest));
            }

            let n = self
                .stream
                .read_buf(&mut self.buffer)
                .await
                .map_err(GatewayError::Transport)?;

            if n == 0 {
                // Client closed connection
                return Ok(ReadOutcome::Gone);
            }
        }
    }
}
