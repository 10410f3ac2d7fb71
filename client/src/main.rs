use clap::Parser;
use log::{error, info};
use macroquad::prelude::*;
use pong_client::app::App;
use pong_client::input::sample_keyboard;
use pong_client::network::{self, Connection};
use pong_client::panel::{AdminPanel, PanelAction};
use pong_client::rendering::{RenderView, Renderer};
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server endpoint (ws://host:port, wss://..., or bare host:port)
    #[arg(short = 's', long, default_value = "ws://127.0.0.1:8765")]
    server: String,

    /// Window width
    #[arg(short = 'w', long, default_value = "900")]
    width: usize,

    /// Window height (no short flag to avoid conflict with --help)
    #[arg(long, default_value = "600")]
    height: usize,

    /// How long notifications stay on screen, in milliseconds
    #[arg(long, default_value = "2000")]
    notify_ms: u64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Set RUST_LOG=info for detailed logging");
    }

    let args = Args::parse();
    let endpoint = network::normalize_endpoint(&args.server)?;

    info!("Starting client...");
    info!("Connecting to: {}", endpoint);
    info!("Controls: W/S or Up/Down to move, P to pause, Tab for admin, R to reconnect");

    let conf = Conf {
        window_title: "Pong".to_string(),
        window_width: args.width as i32,
        window_height: args.height as i32,
        ..Default::default()
    };

    macroquad::Window::from_config(
        conf,
        run(endpoint, Duration::from_millis(args.notify_ms)),
    );

    Ok(())
}

async fn run(endpoint: String, notify_duration: Duration) {
    let connection = match Connection::connect(&endpoint) {
        Ok(connection) => connection,
        Err(e) => {
            error!("Failed to start connection: {}", e);
            return;
        }
    };

    let mut app = App::new(connection, notify_duration);
    let mut renderer = Renderer::new();
    let mut panel = AdminPanel::new();

    prevent_quit();

    while renderer.is_active() {
        let now = Instant::now();

        for event in app.sink_mut().poll() {
            app.handle_connection_event(event, now);
        }

        if app.handle_keyboard(&sample_keyboard()) {
            match Connection::connect(&endpoint) {
                Ok(connection) => {
                    info!("Reconnecting to {}", connection.endpoint());
                    app.reset_session(connection, now);
                }
                Err(e) => app.notify(format!("Reconnect failed: {}", e), now),
            }
        }

        let game = app.game();
        renderer.render(&RenderView {
            snapshot: game.snapshot(),
            side: game.side(),
            event: game.event(),
            scores: game.scores(),
            notification: app.notification(now),
            connection: app.connection_state(),
            admin: app.is_admin(),
        });

        if app.panel_open() {
            for action in panel.draw(app.is_admin()) {
                match action {
                    PanelAction::SubmitCode(code) => app.submit_admin_code(&code),
                    PanelAction::Admin(action) => app.admin_action(action, now),
                    PanelAction::Close => app.set_panel_open(false),
                }
            }
        }

        if is_quit_requested() {
            renderer.stop();
        }

        next_frame().await;
    }

    app.sink_mut().close();
    info!("Client stopped");
}
