use log::debug;
use pong_shared::{EventKind, GameState, Side};

/// Score labels shown in the HUD, refreshed whenever a snapshot lands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreBoard {
    pub left: String,
    pub right: String,
}

impl Default for ScoreBoard {
    fn default() -> Self {
        Self {
            left: "0".to_string(),
            right: "0".to_string(),
        }
    }
}

/// Role assignment plus the latest authoritative snapshot.
///
/// The snapshot is only ever swapped out whole; nothing here predicts,
/// interpolates or merges positions.
#[derive(Debug, Default)]
pub struct ClientGameState {
    side: Option<Side>,
    snapshot: Option<GameState>,
    scores: ScoreBoard,
}

impl ClientGameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_side(&mut self, side: Side) {
        if let Side::Unknown(raw) = &side {
            debug!("Server assigned unrecognized side {:?}", raw);
        }
        self.side = Some(side);
    }

    pub fn side(&self) -> Option<&Side> {
        self.side.as_ref()
    }

    pub fn apply_server_state(&mut self, state: GameState) {
        self.scores = ScoreBoard {
            left: state.score_l.to_string(),
            right: state.score_r.to_string(),
        };
        self.snapshot = Some(state);
    }

    /// Applies a standalone event announcement. The next snapshot carries
    /// the server's view and overrides this.
    pub fn set_event(&mut self, event: Option<EventKind>) {
        self.snapshot.get_or_insert_with(GameState::default).event = event;
    }

    pub fn snapshot(&self) -> Option<&GameState> {
        self.snapshot.as_ref()
    }

    pub fn event(&self) -> Option<&EventKind> {
        self.snapshot.as_ref().and_then(|s| s.event.as_ref())
    }

    pub fn is_inverted(&self) -> bool {
        self.snapshot.as_ref().is_some_and(GameState::is_inverted)
    }

    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    /// Forgets everything tied to the previous session
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
