//! Application context tying the client components together.
//!
//! One `App` owns every piece of mutable client state. Each field has a
//! single writer: network events touch role, snapshot and admin state,
//! keyboard events touch the held-key set. Renderers only read.

use crate::admin::{AdminAction, AdminOutcome, AdminSession, AuthTransition};
use crate::game::ClientGameState;
use crate::input::{ControlKey, InputMapper, KeyboardFrame};
use crate::network::{ConnectionEvent, ConnectionState, MessageSink};
use crate::notification::Notifier;
use log::{debug, info};
use pong_shared::{ServerMessage, Side};
use std::time::{Duration, Instant};

pub struct App<S: MessageSink> {
    sink: S,
    connection_state: ConnectionState,
    game: ClientGameState,
    input: InputMapper,
    admin: AdminSession,
    notifier: Notifier,
    panel_open: bool,
}

impl<S: MessageSink> App<S> {
    pub fn new(sink: S, notify_duration: Duration) -> Self {
        Self {
            sink,
            connection_state: ConnectionState::Connecting,
            game: ClientGameState::new(),
            input: InputMapper::new(),
            admin: AdminSession::new(),
            notifier: Notifier::new(notify_duration),
            panel_open: false,
        }
    }

    pub fn handle_connection_event(&mut self, event: ConnectionEvent, now: Instant) {
        match event {
            ConnectionEvent::Opened => {
                self.connection_state = ConnectionState::Open;
                self.notifier.show("Connected", now);
            }
            ConnectionEvent::Message(message) => self.handle_server_message(message, now),
            ConnectionEvent::Closed { reason } => {
                info!("Session over: {}", reason);
                self.connection_state = ConnectionState::Closed;
                self.notifier.show("Disconnected (press R to reconnect)", now);
            }
        }
    }

    pub fn handle_server_message(&mut self, message: ServerMessage, now: Instant) {
        match message {
            ServerMessage::Role { side } => {
                let notice = match &side {
                    Side::Left => "You are the LEFT paddle (W/S)".to_string(),
                    Side::Right => "You are the RIGHT paddle (Up/Down)".to_string(),
                    Side::Spectator => "Spectating".to_string(),
                    Side::Unknown(raw) => format!("Assigned side: {}", raw),
                };
                self.game.set_side(side);
                self.notifier.show(notice, now);
            }
            ServerMessage::State(state) => self.game.apply_server_state(state),
            ServerMessage::Broadcast { message } => self.notifier.show(message, now),
            ServerMessage::AdminResult { ok } => match self.admin.handle_result(ok) {
                AuthTransition::Unlocked => self.notifier.show("Admin unlocked", now),
                AuthTransition::Rejected => self.notifier.show("Wrong admin code", now),
                AuthTransition::AlreadyUnlocked => debug!("Ignoring admin_result ok={}", ok),
            },
            ServerMessage::Event { event } => {
                let event = event.filter(|kind| !kind.is_clear());
                let notice = match &event {
                    Some(kind) => format!("Event: {}", kind.as_str().to_uppercase()),
                    None => "Event cleared".to_string(),
                };
                self.game.set_event(event);
                self.notifier.show(notice, now);
            }
        }
    }

    /// Applies one frame of keyboard state. The held set is brought in line
    /// with the keys physically down, so a tap shorter than a frame leaves
    /// nothing held. Returns true when the user asked for a fresh session.
    pub fn handle_keyboard(&mut self, frame: &KeyboardFrame) -> bool {
        let (released, pressed) = self.input.transitions(&frame.down);
        for key in released {
            self.key_up(key);
        }
        for key in pressed {
            self.key_down(key);
        }
        if frame.pause {
            self.pause_key();
        }

        if frame.toggle_panel {
            self.panel_open = !self.panel_open;
        } else if frame.close_panel {
            self.panel_open = false;
        }

        frame.reconnect && !self.panel_open && self.connection_state == ConnectionState::Closed
    }

    /// Key-downs are swallowed while the admin panel has the keyboard. A key
    /// still down after the panel closes is picked up on the next frame.
    pub fn key_down(&mut self, key: ControlKey) {
        if self.panel_open {
            return;
        }
        let message = self
            .input
            .key_down(key, self.game.side(), self.game.is_inverted());
        self.sink.send(message);
    }

    pub fn key_up(&mut self, key: ControlKey) {
        let message = self
            .input
            .key_up(key, self.game.side(), self.game.is_inverted());
        self.sink.send(message);
    }

    pub fn pause_key(&mut self) {
        if self.panel_open {
            return;
        }
        self.sink.send(self.input.pause_pressed());
    }

    pub fn submit_admin_code(&mut self, code: &str) {
        let request = self.admin.auth_request(code);
        self.sink.send(request);
    }

    pub fn admin_action(&mut self, action: AdminAction, now: Instant) {
        match self.admin.authorize(action) {
            AdminOutcome::Send(message) => self.sink.send(message),
            AdminOutcome::Locked => self.notifier.show("Unlock admin first", now),
            AdminOutcome::Empty => debug!("Blank broadcast not sent"),
        }
    }

    /// Swaps in a brand-new transport and forgets the old session
    pub fn reset_session(&mut self, sink: S, now: Instant) {
        self.sink = sink;
        self.connection_state = ConnectionState::Connecting;
        self.game.reset();
        self.input.clear();
        self.admin.reset();
        self.notifier.show("Reconnecting...", now);
    }

    pub fn notify(&mut self, message: impl Into<String>, now: Instant) {
        self.notifier.show(message, now);
    }

    pub fn set_panel_open(&mut self, open: bool) {
        self.panel_open = open;
    }

    pub fn panel_open(&self) -> bool {
        self.panel_open
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.connection_state
    }

    pub fn game(&self) -> &ClientGameState {
        &self.game
    }

    pub fn input(&self) -> &InputMapper {
        &self.input
    }

    pub fn is_admin(&self) -> bool {
        self.admin.is_authorized()
    }

    pub fn notification(&self, now: Instant) -> Option<&str> {
        self.notifier.visible(now)
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}
