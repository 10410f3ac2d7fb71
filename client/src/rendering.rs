use crate::game::ScoreBoard;
use crate::network::ConnectionState;
use macroquad::color::hsl_to_rgb;
use macroquad::prelude::*;
use pong_shared::{
    world_extent, EventKind, GameState, Side, BALL_SIZE, EDGE_PADDING, PADDLE_HEIGHT,
    PADDLE_WIDTH, WORLD_HEIGHT, WORLD_WIDTH,
};

const BACKGROUND: Color = Color::new(0.04, 0.04, 0.06, 1.0);
const DASH_LENGTH: f32 = 16.0;
const DASH_GAP: f32 = 14.0;

/// Everything the renderer reads for one frame
#[derive(Debug, Clone)]
pub struct RenderView<'a> {
    pub snapshot: Option<&'a GameState>,
    pub side: Option<&'a Side>,
    pub event: Option<&'a EventKind>,
    pub scores: &'a ScoreBoard,
    pub notification: Option<&'a str>,
    pub connection: ConnectionState,
    pub admin: bool,
}

/// Uniform world-to-screen mapping, letterboxed and centered
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldLayout {
    pub world_w: f32,
    pub world_h: f32,
    pub scale: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl WorldLayout {
    pub fn fit(screen_w: f32, screen_h: f32, world_w: f32, world_h: f32) -> Self {
        let world_w = world_extent(world_w, WORLD_WIDTH);
        let world_h = world_extent(world_h, WORLD_HEIGHT);
        let scale = (screen_w / world_w).min(screen_h / world_h);

        Self {
            world_w,
            world_h,
            scale,
            offset_x: (screen_w - world_w * scale) / 2.0,
            offset_y: (screen_h - world_h * scale) / 2.0,
        }
    }

    pub fn to_screen(&self, x: f32, y: f32) -> (f32, f32) {
        (self.offset_x + x * self.scale, self.offset_y + y * self.scale)
    }
}

/// Hue, saturation and lightness of the disco fill at `t` seconds.
/// Hue turns once every five seconds; lightness swings 40%..60%.
pub fn disco_hsl(t: f64) -> (f32, f32, f32) {
    let hue = (t * 0.2).rem_euclid(1.0) as f32;
    let lightness = 0.5 + 0.1 * (t * 6.0).sin() as f32;
    (hue, 0.7, lightness)
}

/// Top-left corners of the left and right paddles in world coordinates
pub fn paddle_origins(state: &GameState) -> [(f32, f32); 2] {
    let (world_w, _) = state.world_size();
    [
        (EDGE_PADDING, state.left_y),
        (world_w - EDGE_PADDING - PADDLE_WIDTH, state.right_y),
    ]
}

/// Vertical extents of the center line dashes for a world of `height`
pub fn dash_spans(height: f32) -> Vec<(f32, f32)> {
    let height = world_extent(height, WORLD_HEIGHT);
    let stride = DASH_LENGTH + DASH_GAP;
    let count = (height / stride).ceil() as usize;

    (0..count)
        .map(|i| {
            let top = i as f32 * stride;
            (top, (top + DASH_LENGTH).min(height))
        })
        .collect()
}

/// Continuous draw loop state. Stays active until `stop` is called.
pub struct Renderer {
    active: bool,
}

impl Renderer {
    pub fn new() -> Self {
        Self { active: true }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Teardown hook for the frame loop
    pub fn stop(&mut self) {
        self.active = false;
    }

    pub fn render(&self, view: &RenderView) {
        let fallback = GameState::default();
        let state = view.snapshot.unwrap_or(&fallback);
        let layout = WorldLayout::fit(screen_width(), screen_height(), state.w, state.h);

        clear_background(BLACK);
        self.draw_background(state, &layout);
        self.draw_center_line(&layout);
        self.draw_paddles(state, &layout);
        self.draw_ball(state, &layout);
        self.draw_scores(view.scores, &layout);

        if state.paused {
            self.draw_pause_overlay(&layout);
        }

        self.draw_status(view);

        if let Some(message) = view.notification {
            self.draw_notification(message);
        }
    }

    fn draw_background(&self, state: &GameState, layout: &WorldLayout) {
        let fill = if state.is_disco() {
            let (h, s, l) = disco_hsl(get_time());
            hsl_to_rgb(h, s, l)
        } else {
            BACKGROUND
        };

        let (x, y) = layout.to_screen(0.0, 0.0);
        draw_rectangle(
            x,
            y,
            layout.world_w * layout.scale,
            layout.world_h * layout.scale,
            fill,
        );
    }

    fn draw_center_line(&self, layout: &WorldLayout) {
        let color = Color::from_rgba(255, 255, 255, 80);
        let mid = layout.world_w / 2.0;

        for (top, bottom) in dash_spans(layout.world_h) {
            let (x0, y0) = layout.to_screen(mid, top);
            let (x1, y1) = layout.to_screen(mid, bottom);
            draw_line(x0, y0, x1, y1, 2.0 * layout.scale, color);
        }
    }

    fn draw_paddles(&self, state: &GameState, layout: &WorldLayout) {
        for (px, py) in paddle_origins(state) {
            let (x, y) = layout.to_screen(px, py);
            draw_rectangle(
                x,
                y,
                PADDLE_WIDTH * layout.scale,
                PADDLE_HEIGHT * layout.scale,
                WHITE,
            );
        }
    }

    fn draw_ball(&self, state: &GameState, layout: &WorldLayout) {
        let (x, y) = layout.to_screen(state.ball_x, state.ball_y);
        let size = BALL_SIZE * layout.scale;
        draw_rectangle(x, y, size, size, WHITE);
    }

    fn draw_scores(&self, scores: &ScoreBoard, layout: &WorldLayout) {
        let font_size = (48.0 * layout.scale).max(12.0);
        let (cx, top) = layout.to_screen(layout.world_w / 2.0, 0.0);
        let baseline = top + font_size + 8.0;

        let left = measure_text(&scores.left, None, font_size as u16, 1.0);
        draw_text(&scores.left, cx - 40.0 - left.width, baseline, font_size, WHITE);
        draw_text(&scores.right, cx + 40.0, baseline, font_size, WHITE);
    }

    fn draw_pause_overlay(&self, layout: &WorldLayout) {
        let (x, y) = layout.to_screen(0.0, 0.0);
        let w = layout.world_w * layout.scale;
        let h = layout.world_h * layout.scale;
        draw_rectangle(x, y, w, h, Color::new(0.0, 0.0, 0.0, 0.55));

        let font_size = (64.0 * layout.scale).max(16.0);
        let dims = measure_text("PAUSED", None, font_size as u16, 1.0);
        draw_text(
            "PAUSED",
            x + (w - dims.width) / 2.0,
            y + (h + dims.offset_y) / 2.0,
            font_size,
            WHITE,
        );
    }

    fn draw_status(&self, view: &RenderView) {
        let connection_color = match view.connection {
            ConnectionState::Connecting => YELLOW,
            ConnectionState::Open => GREEN,
            ConnectionState::Closed => RED,
        };
        draw_rectangle(10.0, 10.0, 8.0, 8.0, connection_color);
        draw_text("CON", 22.0, 18.0, 14.0, WHITE);

        let side = view.side.map(Side::as_str).unwrap_or("unassigned");
        let mut label = format!("side: {}", side);
        if let Some(event) = view.event {
            label.push_str(&format!("  event: {}", event.as_str()));
        }
        if view.admin {
            label.push_str("  [admin]");
        }
        draw_text(&label, 10.0, screen_height() - 10.0, 16.0, LIGHTGRAY);
    }

    fn draw_notification(&self, message: &str) {
        let font_size = 22.0;
        let dims = measure_text(message, None, font_size as u16, 1.0);
        let padding = 10.0;
        let w = dims.width + padding * 2.0;
        let h = dims.height + padding * 2.0;
        let x = (screen_width() - w) / 2.0;
        let y = screen_height() - h - 40.0;

        draw_rectangle(x, y, w, h, Color::new(0.0, 0.0, 0.0, 0.75));
        draw_rectangle_lines(x, y, w, h, 1.0, GRAY);
        draw_text(message, x + padding, y + padding + dims.offset_y, font_size, WHITE);
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
