//! Wire protocol shared by the pong client and its tests.
//!
//! Every frame on the socket is a JSON text object carrying a `type`
//! discriminator. The server pushes [`ServerMessage`]s, the client answers with
//! [`ClientMessage`]s.

use serde::{Deserialize, Serialize};

pub const WORLD_WIDTH: f32 = 900.0;
pub const WORLD_HEIGHT: f32 = 600.0;
pub const PADDLE_WIDTH: f32 = 14.0;
pub const PADDLE_HEIGHT: f32 = 110.0;
pub const EDGE_PADDING: f32 = 30.0;
pub const BALL_SIZE: f32 = 14.0;
pub const DEFAULT_PORT: u16 = 8765;

/// Largest world extent accepted from the server.
pub const MAX_WORLD_EXTENT: f32 = 10_000.0;

/// Returns `value` if it is a usable world extent, `fallback` otherwise.
pub fn world_extent(value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value > 0.0 && value <= MAX_WORLD_EXTENT {
        value
    } else {
        fallback
    }
}

/// Event tag the server interprets as "no event".
pub const CLEAR_EVENT: &str = "clear";

/// Side assigned to this connection by the server.
///
/// Values outside the three known ones are kept verbatim in `Unknown` rather
/// than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Side {
    Left,
    Right,
    Spectator,
    Unknown(String),
}

impl Side {
    pub fn as_str(&self) -> &str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
            Side::Spectator => "spectator",
            Side::Unknown(raw) => raw,
        }
    }
}

impl From<String> for Side {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "left" => Side::Left,
            "right" => Side::Right,
            "spectator" => Side::Spectator,
            _ => Side::Unknown(raw),
        }
    }
}

impl From<Side> for String {
    fn from(side: Side) -> Self {
        match side {
            Side::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

/// Server-declared transient modifier. Open-ended: the server may introduce
/// tags this client has never heard of.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventKind(String);

impl EventKind {
    pub const INVERT: &'static str = "invert";
    pub const DISCO: &'static str = "disco";

    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_invert(&self) -> bool {
        self.0 == Self::INVERT
    }

    pub fn is_disco(&self) -> bool {
        self.0 == Self::DISCO
    }

    /// Tags the server treats as "no event"
    pub fn is_clear(&self) -> bool {
        self.0.is_empty() || self.0 == CLEAR_EVENT
    }
}

/// Full authoritative snapshot as pushed by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub left_y: f32,
    pub right_y: f32,
    pub ball_x: f32,
    pub ball_y: f32,
    pub score_l: u32,
    pub score_r: u32,
    pub paused: bool,
    #[serde(default)]
    pub event: Option<EventKind>,
    pub w: f32,
    pub h: f32,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            left_y: WORLD_HEIGHT / 2.0 - PADDLE_HEIGHT / 2.0,
            right_y: WORLD_HEIGHT / 2.0 - PADDLE_HEIGHT / 2.0,
            ball_x: WORLD_WIDTH / 2.0 - BALL_SIZE / 2.0,
            ball_y: WORLD_HEIGHT / 2.0 - BALL_SIZE / 2.0,
            score_l: 0,
            score_r: 0,
            paused: false,
            event: None,
            w: WORLD_WIDTH,
            h: WORLD_HEIGHT,
        }
    }
}

impl GameState {
    /// World size with unusable dimensions replaced by the defaults
    pub fn world_size(&self) -> (f32, f32) {
        (
            world_extent(self.w, WORLD_WIDTH),
            world_extent(self.h, WORLD_HEIGHT),
        )
    }

    pub fn is_inverted(&self) -> bool {
        self.event.as_ref().is_some_and(EventKind::is_invert)
    }

    pub fn is_disco(&self) -> bool {
        self.event.as_ref().is_some_and(EventKind::is_disco)
    }
}

/// Messages pushed from the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Role {
        side: Side,
    },
    State(GameState),
    Broadcast {
        message: String,
    },
    AdminResult {
        ok: bool,
    },
    Event {
        #[serde(default)]
        event: Option<EventKind>,
    },
}

impl ServerMessage {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

/// Privileged commands, sent inside the `admin` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum AdminCommand {
    Broadcast { message: String },
    Event { event: String },
    PauseToggle,
    ResetScores,
}

/// Messages sent from the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Input { up: bool, down: bool },
    Pause,
    AdminAuth { code: String },
    Admin(AdminCommand),
}

impl ClientMessage {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Directional intent derived from held keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Intent {
    pub up: bool,
    pub down: bool,
}

impl From<Intent> for ClientMessage {
    fn from(intent: Intent) -> Self {
        ClientMessage::Input {
            up: intent.up,
            down: intent.down,
        }
    }
}
