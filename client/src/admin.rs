//! Admin privilege tracking and the gate in front of privileged commands.
//!
//! The gate only guards the local user. The server re-checks authorization
//! on every admin frame.

use pong_shared::{AdminCommand, ClientMessage, EventKind, CLEAR_EVENT};

/// Event tags offered in the admin panel. Clearing is a separate action.
pub const EVENT_PALETTE: [&str; 2] = [EventKind::DISCO, EventKind::INVERT];

/// The server keeps at most this many characters of a broadcast
pub const MAX_BROADCAST_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminAction {
    Broadcast(String),
    SetEvent(String),
    ClearEvent,
    PauseToggle,
    ResetScores,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminOutcome {
    /// Authorized and well-formed; ready for the wire
    Send(ClientMessage),
    /// Session still locked, nothing leaves the client
    Locked,
    /// Authorized but nothing to send (blank broadcast)
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthTransition {
    Unlocked,
    Rejected,
    AlreadyUnlocked,
}

#[derive(Debug, Default)]
pub struct AdminSession {
    authorized: bool,
}

impl AdminSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_authorized(&self) -> bool {
        self.authorized
    }

    /// Builds the challenge frame. Always allowed, retries are unlimited.
    pub fn auth_request(&self, code: &str) -> ClientMessage {
        ClientMessage::AdminAuth {
            code: code.trim().to_string(),
        }
    }

    /// Applies an `admin_result`. There is no revoke: once unlocked the
    /// session stays unlocked until it is reset.
    pub fn handle_result(&mut self, ok: bool) -> AuthTransition {
        match (self.authorized, ok) {
            (true, _) => AuthTransition::AlreadyUnlocked,
            (false, true) => {
                self.authorized = true;
                AuthTransition::Unlocked
            }
            (false, false) => AuthTransition::Rejected,
        }
    }

    pub fn authorize(&self, action: AdminAction) -> AdminOutcome {
        if !self.authorized {
            return AdminOutcome::Locked;
        }

        let command = match action {
            AdminAction::Broadcast(text) => {
                let message = text.trim();
                if message.is_empty() {
                    return AdminOutcome::Empty;
                }
                AdminCommand::Broadcast {
                    message: message.chars().take(MAX_BROADCAST_CHARS).collect(),
                }
            }
            AdminAction::SetEvent(event) => AdminCommand::Event { event },
            AdminAction::ClearEvent => AdminCommand::Event {
                event: CLEAR_EVENT.to_string(),
            },
            AdminAction::PauseToggle => AdminCommand::PauseToggle,
            AdminAction::ResetScores => AdminCommand::ResetScores,
        };

        AdminOutcome::Send(ClientMessage::Admin(command))
    }

    pub fn reset(&mut self) {
        self.authorized = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_actions() -> Vec<AdminAction> {
        vec![
            AdminAction::Broadcast("hello".to_string()),
            AdminAction::SetEvent("disco".to_string()),
            AdminAction::ClearEvent,
            AdminAction::PauseToggle,
            AdminAction::ResetScores,
        ]
    }

    #[test]
    fn test_locked_session_blocks_everything() {
        let session = AdminSession::new();
        for action in all_actions() {
            assert_eq!(session.authorize(action), AdminOutcome::Locked);
        }
    }

    #[test]
    fn test_unlocked_session_shapes_commands() {
        let mut session = AdminSession::new();
        assert_eq!(session.handle_result(true), AuthTransition::Unlocked);

        let sent: Vec<_> = all_actions()
            .into_iter()
            .map(|a| session.authorize(a))
            .collect();

        assert_eq!(
            sent,
            vec![
                AdminOutcome::Send(ClientMessage::Admin(AdminCommand::Broadcast {
                    message: "hello".to_string()
                })),
                AdminOutcome::Send(ClientMessage::Admin(AdminCommand::Event {
                    event: "disco".to_string()
                })),
                AdminOutcome::Send(ClientMessage::Admin(AdminCommand::Event {
                    event: "clear".to_string()
                })),
                AdminOutcome::Send(ClientMessage::Admin(AdminCommand::PauseToggle)),
                AdminOutcome::Send(ClientMessage::Admin(AdminCommand::ResetScores)),
            ]
        );
    }

    #[test]
    fn test_blank_broadcast_not_sent() {
        let mut session = AdminSession::new();
        session.handle_result(true);
        assert_eq!(
            session.authorize(AdminAction::Broadcast("   \t ".to_string())),
            AdminOutcome::Empty
        );
        assert_eq!(
            session.authorize(AdminAction::Broadcast("  hi  ".to_string())),
            AdminOutcome::Send(ClientMessage::Admin(AdminCommand::Broadcast {
                message: "hi".to_string()
            }))
        );
    }

    #[test]
    fn test_rejection_then_success() {
        let mut session = AdminSession::new();
        assert_eq!(session.handle_result(false), AuthTransition::Rejected);
        assert!(!session.is_authorized());
        assert_eq!(session.handle_result(false), AuthTransition::Rejected);
        assert_eq!(session.handle_result(true), AuthTransition::Unlocked);
        assert!(session.is_authorized());
    }

    #[test]
    fn test_no_revoke_within_session() {
        let mut session = AdminSession::new();
        session.handle_result(true);
        assert_eq!(session.handle_result(false), AuthTransition::AlreadyUnlocked);
        assert!(session.is_authorized());

        session.reset();
        assert!(!session.is_authorized());
    }

    #[test]
    fn test_auth_request_trims_code() {
        let session = AdminSession::new();
        assert_eq!(
            session.auth_request(" 100\n"),
            ClientMessage::AdminAuth {
                code: "100".to_string()
            }
        );
    }

    #[test]
    fn test_broadcast_capped_at_server_limit() {
        let mut session = AdminSession::new();
        session.handle_result(true);

        let long = "é".repeat(MAX_BROADCAST_CHARS + 50);
        match session.authorize(AdminAction::Broadcast(long)) {
            AdminOutcome::Send(ClientMessage::Admin(AdminCommand::Broadcast { message })) => {
                assert_eq!(message.chars().count(), MAX_BROADCAST_CHARS);
            }
            other => panic!("Expected broadcast, got {:?}", other),
        }
    }

    #[test]
    fn test_palette_holds_known_events() {
        assert_eq!(EVENT_PALETTE, ["disco", "invert"]);
        assert!(!EVENT_PALETTE.contains(&CLEAR_EVENT));
    }
}
