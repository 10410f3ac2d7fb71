//! # Pong Client Library
//!
//! Player-facing client for a server-authoritative two-paddle game. The
//! server owns physics and scoring; this crate keeps a local view of what the
//! server pushes, turns held keys into movement intent, and draws the result
//! every frame.
//!
//! ## Architecture Overview
//!
//! ### Pure Observer
//! The client never predicts or interpolates. Each `state` frame replaces the
//! cached snapshot whole, and the renderer reads only that snapshot.
//!
//! ### Intent, Not Position
//! Movement is sent as `{up, down}` flags recomputed from scratch on every
//! key transition. The mapping depends on the assigned side and on whether
//! the server has declared an `invert` event.
//!
//! ### Single Writer
//! All mutable state lives in one [`app::App`] driven by a single-threaded
//! frame loop. The socket runs on its own thread and is reached only through
//! channels, so nothing needs a lock.
//!
//! ## Module Organization
//!
//! - `network`: WebSocket session, lenient frame decoding, lifecycle events
//! - `input`: held-key tracking and the side/inversion mapping
//! - `game`: role assignment and the authoritative snapshot cache
//! - `admin`: privilege state and the local gate for admin commands
//! - `notification`: two-second status messages, last write wins
//! - `rendering`: paddles, ball, scores, disco background, pause scrim
//! - `panel`: the admin panel widgets
//! - `app`: the context object wiring all of the above together
//!
//! ## Usage Example
//!
//! ```no_run
//! use pong_client::app::App;
//! use pong_client::network::Connection;
//! use std::time::{Duration, Instant};
//!
//! let connection = Connection::connect("ws://127.0.0.1:8765")?;
//! let mut app = App::new(connection, Duration::from_secs(2));
//!
//! // Once per frame
//! let now = Instant::now();
//! for event in app.sink_mut().poll() {
//!     app.handle_connection_event(event, now);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod admin;
pub mod app;
pub mod game;
pub mod input;
pub mod network;
pub mod notification;
pub mod panel;
pub mod rendering;
