//! WebSocket session to the game server.
//!
//! The socket lives on its own thread with a current-thread tokio runtime.
//! The frame loop never touches it directly: outbound messages and inbound
//! events cross over unbounded channels, so the loop never blocks on I/O.

use futures_util::{SinkExt, StreamExt};
use log::{debug, info, warn};
use pong_shared::{ClientMessage, ServerMessage, DEFAULT_PORT};
use std::thread::JoinHandle;
use thiserror::Error;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("invalid endpoint {0:?}")]
    InvalidEndpoint(String),
    #[error("failed to start network thread: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Open,
    Closed,
}

/// What the network thread reports back, in arrival order
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionEvent {
    Opened,
    Message(ServerMessage),
    Closed { reason: String },
}

/// Destination for outbound messages. Fire-and-forget: no delivery result.
pub trait MessageSink {
    fn send(&mut self, message: ClientMessage);
}

/// Collects messages instead of transmitting them
impl MessageSink for Vec<ClientMessage> {
    fn send(&mut self, message: ClientMessage) {
        self.push(message);
    }
}

/// Accepts `ws://` / `wss://` URLs as-is and promotes a bare `host[:port]`.
pub fn normalize_endpoint(raw: &str) -> Result<String, ConnectionError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ConnectionError::InvalidEndpoint(raw.to_string()));
    }

    if raw.starts_with("ws://") || raw.starts_with("wss://") {
        return Ok(raw.to_string());
    }

    if raw.contains("://") {
        return Err(ConnectionError::InvalidEndpoint(raw.to_string()));
    }

    if raw.contains(':') {
        Ok(format!("ws://{}", raw))
    } else {
        Ok(format!("ws://{}:{}", raw, DEFAULT_PORT))
    }
}

/// Decodes one text frame. Anything unparseable or without a known `type`
/// is dropped here so a bad frame can never take the client down.
pub fn decode_frame(text: &str) -> Option<ServerMessage> {
    match ServerMessage::from_json(text) {
        Ok(message) => Some(message),
        Err(e) => {
            debug!("Dropping malformed frame ({}): {:.120}", e, text);
            None
        }
    }
}

pub struct Connection {
    endpoint: String,
    state: ConnectionState,
    outbound: Option<UnboundedSender<ClientMessage>>,
    inbound: UnboundedReceiver<ConnectionEvent>,
    _worker: JoinHandle<()>,
}

impl Connection {
    /// Starts connecting in the background. The result is reported later as
    /// an `Opened` or `Closed` event.
    pub fn connect(endpoint: &str) -> Result<Self, ConnectionError> {
        let url = normalize_endpoint(endpoint)?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();

        let session_url = url.clone();
        let worker = std::thread::Builder::new()
            .name("pong-net".to_string())
            .spawn(move || runtime.block_on(run_session(session_url, outbound_rx, inbound_tx)))?;

        Ok(Connection {
            endpoint: url,
            state: ConnectionState::Connecting,
            outbound: Some(outbound_tx),
            inbound: inbound_rx,
            _worker: worker,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Drains every event that has arrived since the last call
    pub fn poll(&mut self) -> Vec<ConnectionEvent> {
        let mut events = Vec::new();

        while let Ok(event) = self.inbound.try_recv() {
            match &event {
                ConnectionEvent::Opened => self.state = ConnectionState::Open,
                ConnectionEvent::Closed { .. } => {
                    self.state = ConnectionState::Closed;
                    self.outbound = None;
                }
                ConnectionEvent::Message(_) => {}
            }
            events.push(event);
        }

        events
    }

    /// Teardown hook: the network thread sends a close frame and exits
    pub fn close(&mut self) {
        if self.outbound.take().is_some() {
            debug!("Closing connection to {}", self.endpoint);
        }
    }
}

impl MessageSink for Connection {
    fn send(&mut self, message: ClientMessage) {
        match &self.outbound {
            Some(tx) => {
                if tx.send(message).is_err() {
                    debug!("Network thread gone, message dropped");
                }
            }
            None => debug!("Connection closed, dropping {:?}", message),
        }
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.close();
    }
}

async fn run_session(
    url: String,
    mut outbound: UnboundedReceiver<ClientMessage>,
    events: UnboundedSender<ConnectionEvent>,
) {
    info!("Connecting to {}", url);

    let stream = match connect_async(url.as_str()).await {
        Ok((stream, _)) => stream,
        Err(e) => {
            warn!("Could not connect to {}: {}", url, e);
            let _ = events.send(ConnectionEvent::Closed {
                reason: e.to_string(),
            });
            return;
        }
    };

    info!("Connected to {}", url);
    if events.send(ConnectionEvent::Opened).is_err() {
        return;
    }

    let (mut write, mut read) = stream.split();

    let reason = loop {
        tokio::select! {
            frame = read.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    if let Some(message) = decode_frame(text.as_str()) {
                        if events.send(ConnectionEvent::Message(message)).is_err() {
                            break "client went away".to_string();
                        }
                    }
                }
                Some(Ok(Message::Close(frame))) => {
                    break frame
                        .map(|f| f.reason.as_str().to_string())
                        .filter(|r| !r.is_empty())
                        .unwrap_or_else(|| "closed by server".to_string());
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => break e.to_string(),
                None => break "connection ended".to_string(),
            },

            outgoing = outbound.recv() => match outgoing {
                Some(message) => match message.to_json() {
                    Ok(json) => {
                        if let Err(e) = write.send(Message::Text(json.into())).await {
                            break e.to_string();
                        }
                    }
                    Err(e) => warn!("Failed to encode {:?}: {}", message, e),
                },
                None => {
                    let _ = write.send(Message::Close(None)).await;
                    break "closed by client".to_string();
                }
            },
        }
    };

    info!("Connection closed: {}", reason);
    let _ = events.send(ConnectionEvent::Closed { reason });
}
