//! Streaming HTTP exchange with the daemon.
//!
//! Each exchange is one POST. The request envelope is serialized on a
//! blocking task that feeds a bounded channel of chunks, so encoding overlaps
//! the network write and large arguments never sit fully buffered in memory.
//! The encoder is joined before the exchange reports its outcome, on every
//! path, and an encoding failure invalidates the exchange even when the HTTP
//! side succeeded.

use std::io::{self, BufWriter, Write};
use std::sync::Arc;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Body, Client, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::ReceiverStream;
use tracing::debug;

use crate::error::{ProtocolViolation, RpcError, RpcResult};
use crate::payload::{RESULT_SUCCESS, RequestEnvelope, ResponseEnvelope};
use crate::session::SessionStore;

/// Header carrying the daemon's rotating anti-forgery token.
pub(crate) const SESSION_HEADER: &str = "X-Transmission-Session-Id";

/// Chunk size the encoder hands to the body stream.
const PAYLOAD_CHUNK_BYTES: usize = 8 * 1024;
/// Chunks buffered between the encoder and the network write.
const PAYLOAD_CHANNEL_CHUNKS: usize = 16;

/// Result of one exchange: a decoded value, or the rotation signal that the
/// orchestrator turns into the single retry.
pub(crate) enum Outcome<R> {
    Success(R),
    TokenExpired,
}

/// One-request-at-a-time HTTP transport bound to a single daemon endpoint.
#[derive(Debug)]
pub(crate) struct Transport {
    pub(crate) http: Client,
    pub(crate) url: Url,
    pub(crate) username: String,
    pub(crate) password: String,
    pub(crate) debug: bool,
    pub(crate) session: SessionStore,
}

impl Transport {
    /// Perform one request/response exchange for `method` under `tag`.
    ///
    /// A 409 rotates the session token and yields `Outcome::TokenExpired`;
    /// every other failure is terminal for this attempt.
    pub(crate) async fn exchange<A, R>(
        &self,
        method: &str,
        arguments: Option<Arc<A>>,
        tag: i64,
    ) -> RpcResult<Outcome<R>>
    where
        A: Serialize + Send + Sync + 'static,
        R: DeserializeOwned,
    {
        let (body, encoder) = stream_payload(method.to_string(), arguments, tag);
        let request = self
            .http
            .post(self.url.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(SESSION_HEADER, self.session.get())
            .basic_auth(&self.username, Some(&self.password))
            .body(body);

        let response = match request.send().await {
            Ok(response) => response,
            Err(source) => {
                // The network error is primary; a concurrent encoding failure
                // only makes it to the debug log.
                if let Err(encode_err) = join_encoder(encoder).await {
                    debug!(method, error = %encode_err, "payload encoding also failed");
                }
                return Err(RpcError::Network {
                    method: method.to_string(),
                    source,
                });
            }
        };

        join_encoder(encoder).await.map_err(|source| RpcError::Encode {
            method: method.to_string(),
            source,
        })?;

        let status = response.status();
        if status == StatusCode::CONFLICT {
            let token = response
                .headers()
                .get(SESSION_HEADER)
                .and_then(|value| value.to_str().ok())
                .unwrap_or_default()
                .to_string();
            self.session.set(token);
            return Ok(Outcome::TokenExpired);
        }
        if status != StatusCode::OK {
            return Err(RpcError::HttpStatus {
                method: method.to_string(),
                code: status.as_u16(),
                phrase: status.canonical_reason().unwrap_or("unknown status"),
            });
        }

        let bytes = response.bytes().await.map_err(|source| RpcError::Network {
            method: method.to_string(),
            source,
        })?;
        if self.debug {
            debug!(method, body = %String::from_utf8_lossy(&bytes), "raw rpc response");
        }

        let envelope: ResponseEnvelope<R> =
            serde_json::from_slice(&bytes).map_err(|source| RpcError::Decode {
                method: method.to_string(),
                source,
            })?;

        let Some(actual) = envelope.tag else {
            return Err(RpcError::Protocol {
                method: method.to_string(),
                violation: ProtocolViolation::MissingTag,
            });
        };
        if actual != tag {
            return Err(RpcError::Protocol {
                method: method.to_string(),
                violation: ProtocolViolation::TagMismatch {
                    expected: tag,
                    actual,
                },
            });
        }
        if envelope.result != RESULT_SUCCESS {
            return Err(RpcError::Protocol {
                method: method.to_string(),
                violation: ProtocolViolation::Failure {
                    result: envelope.result,
                },
            });
        }
        Ok(Outcome::Success(envelope.arguments))
    }
}

/// Spawn the encoder task and hand its output to reqwest as a streamed body.
fn stream_payload<A>(
    method: String,
    arguments: Option<Arc<A>>,
    tag: i64,
) -> (Body, JoinHandle<Result<(), serde_json::Error>>)
where
    A: Serialize + Send + Sync + 'static,
{
    let (tx, rx) = mpsc::channel::<Result<Vec<u8>, io::Error>>(PAYLOAD_CHANNEL_CHUNKS);
    let encoder = tokio::task::spawn_blocking(move || {
        let mut writer = BufWriter::with_capacity(PAYLOAD_CHUNK_BYTES, ChannelWriter { tx });
        let envelope = RequestEnvelope {
            method: &method,
            arguments: arguments.as_deref(),
            tag,
        };
        serde_json::to_writer(&mut writer, &envelope)?;
        writer.flush().map_err(serde_json::Error::io)
    });
    (Body::wrap_stream(ReceiverStream::new(rx)), encoder)
}

/// Wait for the encoder; the producer is never left running past the call.
async fn join_encoder(
    encoder: JoinHandle<Result<(), serde_json::Error>>,
) -> Result<(), serde_json::Error> {
    match encoder.await {
        Ok(result) => result,
        Err(join_err) => Err(serde_json::Error::io(io::Error::other(join_err))),
    }
}

/// `io::Write` adapter pushing encoded chunks into the body channel.
///
/// Runs on the blocking encoder task; when the HTTP side drops the body (call
/// cancelled or connection lost) the send fails and encoding stops instead of
/// blocking forever.
struct ChannelWriter {
    tx: mpsc::Sender<Result<Vec<u8>, io::Error>>,
}

impl Write for ChannelWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.tx
            .blocking_send(Ok(data.to_vec()))
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "request body reader dropped"))?;
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
