//! Key-hold tracking and translation into directional intent

use macroquad::prelude::{is_key_down, is_key_pressed, KeyCode};
use pong_shared::{ClientMessage, Intent, Side};
use std::collections::HashSet;

/// Keys that take part in paddle movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKey {
    ArrowUp,
    ArrowDown,
    W,
    S,
}

impl ControlKey {
    pub const ALL: [ControlKey; 4] = [
        ControlKey::ArrowUp,
        ControlKey::ArrowDown,
        ControlKey::W,
        ControlKey::S,
    ];

    pub fn key_code(self) -> KeyCode {
        match self {
            ControlKey::ArrowUp => KeyCode::Up,
            ControlKey::ArrowDown => KeyCode::Down,
            ControlKey::W => KeyCode::W,
            ControlKey::S => KeyCode::S,
        }
    }
}

pub const PAUSE_KEY: KeyCode = KeyCode::P;
pub const PANEL_TOGGLE_KEY: KeyCode = KeyCode::Tab;
pub const PANEL_CLOSE_KEY: KeyCode = KeyCode::Escape;
pub const RECONNECT_KEY: KeyCode = KeyCode::R;

/// Computes intent from the held keys, the assigned side and the inversion flag.
///
/// Pure: the result depends on these three inputs only. An unassigned or
/// unrecognized side takes the spectator branch (arrows or WASD).
pub fn compute_intent(
    held: &HashSet<ControlKey>,
    side: Option<&Side>,
    inverted: bool,
) -> Intent {
    let pressed = |key: ControlKey| held.contains(&key);
    let arrow_up = pressed(ControlKey::ArrowUp);
    let arrow_down = pressed(ControlKey::ArrowDown);
    let w = pressed(ControlKey::W);
    let s = pressed(ControlKey::S);

    let (up, down) = match (side, inverted) {
        (Some(Side::Left), false) => (w, s),
        (Some(Side::Right), false) => (arrow_up, arrow_down),
        (_, false) => (arrow_up || w, arrow_down || s),
        (Some(Side::Left), true) => (s, w),
        (Some(Side::Right), true) => (arrow_down, arrow_up),
        (_, true) => (arrow_down || s, arrow_up || w),
    };

    Intent { up, down }
}

/// Owns the set of currently held control keys.
///
/// Every transition recomputes intent from scratch and produces an `input`
/// message, whatever the side. Filtering input from non-playing sides is the
/// server's job.
#[derive(Debug, Default)]
pub struct InputMapper {
    held: HashSet<ControlKey>,
}

impl InputMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(
        &mut self,
        key: ControlKey,
        side: Option<&Side>,
        inverted: bool,
    ) -> ClientMessage {
        self.held.insert(key);
        self.intent(side, inverted).into()
    }

    pub fn key_up(
        &mut self,
        key: ControlKey,
        side: Option<&Side>,
        inverted: bool,
    ) -> ClientMessage {
        self.held.remove(&key);
        self.intent(side, inverted).into()
    }

    /// One pause request per key-down edge, independent of side and events
    pub fn pause_pressed(&self) -> ClientMessage {
        ClientMessage::Pause
    }

    pub fn intent(&self, side: Option<&Side>, inverted: bool) -> Intent {
        compute_intent(&self.held, side, inverted)
    }

    /// Splits the difference between the held set and the keys physically
    /// down into releases and presses, in `ControlKey::ALL` order.
    pub fn transitions(&self, down: &HashSet<ControlKey>) -> (Vec<ControlKey>, Vec<ControlKey>) {
        let released = ControlKey::ALL
            .into_iter()
            .filter(|key| self.held.contains(key) && !down.contains(key))
            .collect();
        let pressed = ControlKey::ALL
            .into_iter()
            .filter(|key| down.contains(key) && !self.held.contains(key))
            .collect();
        (released, pressed)
    }

    pub fn held(&self) -> &HashSet<ControlKey> {
        &self.held
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }
}

/// Keyboard state observed during one frame. Movement keys are sampled as
/// levels; the remaining keys are key-down edges.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct KeyboardFrame {
    pub down: HashSet<ControlKey>,
    pub pause: bool,
    pub toggle_panel: bool,
    pub close_panel: bool,
    pub reconnect: bool,
}

/// Samples macroquad's keyboard for the current frame
pub fn sample_keyboard() -> KeyboardFrame {
    KeyboardFrame {
        down: ControlKey::ALL
            .into_iter()
            .filter(|key| is_key_down(key.key_code()))
            .collect(),
        pause: is_key_pressed(PAUSE_KEY),
        toggle_panel: is_key_pressed(PANEL_TOGGLE_KEY),
        close_panel: is_key_pressed(PANEL_CLOSE_KEY),
        reconnect: is_key_pressed(RECONNECT_KEY),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(list: &[ControlKey]) -> HashSet<ControlKey> {
        list.iter().copied().collect()
    }

    fn subsets() -> Vec<HashSet<ControlKey>> {
        (0..16u8)
            .map(|mask| {
                ControlKey::ALL
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| mask & (1u8 << *i) != 0)
                    .map(|(_, k)| *k)
                    .collect()
            })
            .collect()
    }

    /// Reference mapping written out as the two-step provisional/override rule
    fn reference(
        held: &HashSet<ControlKey>,
        side: Option<&Side>,
        inverted: bool,
    ) -> (bool, bool) {
        let k = |key: ControlKey| held.contains(&key);
        let (mut up, mut down);
        if inverted {
            up = k(ControlKey::ArrowDown) || k(ControlKey::S);
            down = k(ControlKey::ArrowUp) || k(ControlKey::W);
            if side == Some(&Side::Left) {
                up = k(ControlKey::S);
                down = k(ControlKey::W);
            } else if side == Some(&Side::Right) {
                up = k(ControlKey::ArrowDown);
                down = k(ControlKey::ArrowUp);
            }
        } else {
            up = k(ControlKey::ArrowUp) || k(ControlKey::W);
            down = k(ControlKey::ArrowDown) || k(ControlKey::S);
            if side == Some(&Side::Left) {
                up = k(ControlKey::W);
                down = k(ControlKey::S);
            } else if side == Some(&Side::Right) {
                up = k(ControlKey::ArrowUp);
                down = k(ControlKey::ArrowDown);
            }
        }
        (up, down)
    }

    #[test]
    fn test_intent_matches_reference_for_every_combination() {
        let sides = [
            None,
            Some(Side::Left),
            Some(Side::Right),
            Some(Side::Spectator),
            Some(Side::Unknown("referee".to_string())),
        ];

        for held in subsets() {
            for side in &sides {
                for inverted in [false, true] {
                    let intent = compute_intent(&held, side.as_ref(), inverted);
                    assert_eq!(
                        (intent.up, intent.down),
                        reference(&held, side.as_ref(), inverted),
                        "held={:?} side={:?} inverted={}",
                        held,
                        side,
                        inverted
                    );
                }
            }
        }
    }

    #[test]
    fn test_left_player_holding_w_moves_up() {
        let mut mapper = InputMapper::new();
        let msg = mapper.key_down(ControlKey::W, Some(&Side::Left), false);
        assert_eq!(msg, ClientMessage::Input { up: true, down: false });
    }

    #[test]
    fn test_left_player_ignores_arrows() {
        let intent = compute_intent(&keys(&[ControlKey::ArrowUp]), Some(&Side::Left), false);
        assert_eq!(intent, Intent::default());
    }

    #[test]
    fn test_inverted_right_player_arrow_down_moves_up() {
        let mut mapper = InputMapper::new();
        let msg = mapper.key_down(ControlKey::ArrowDown, Some(&Side::Right), true);
        assert_eq!(msg, ClientMessage::Input { up: true, down: false });
    }

    #[test]
    fn test_spectator_union_keys_swap_under_inversion() {
        let held = keys(&[ControlKey::W]);
        let normal = compute_intent(&held, Some(&Side::Spectator), false);
        let inverted = compute_intent(&held, Some(&Side::Spectator), true);
        assert_eq!(normal, Intent { up: true, down: false });
        assert_eq!(inverted, Intent { up: false, down: true });
    }

    #[test]
    fn test_opposite_keys_both_reported() {
        let held = keys(&[ControlKey::W, ControlKey::S]);
        let intent = compute_intent(&held, Some(&Side::Left), false);
        assert_eq!(intent, Intent { up: true, down: true });
    }

    #[test]
    fn test_key_up_recomputes_from_held_set() {
        let mut mapper = InputMapper::new();
        mapper.key_down(ControlKey::ArrowUp, None, false);
        mapper.key_down(ControlKey::ArrowDown, None, false);
        let msg = mapper.key_up(ControlKey::ArrowUp, None, false);
        assert_eq!(msg, ClientMessage::Input { up: false, down: true });

        let msg = mapper.key_up(ControlKey::ArrowDown, None, false);
        assert_eq!(msg, ClientMessage::Input { up: false, down: false });
        assert!(mapper.held().is_empty());
    }

    #[test]
    fn test_releasing_unheld_key_still_emits() {
        let mut mapper = InputMapper::new();
        let msg = mapper.key_up(ControlKey::S, Some(&Side::Right), false);
        assert_eq!(msg, ClientMessage::Input { up: false, down: false });
    }

    #[test]
    fn test_pause_is_independent_of_movement() {
        let mut mapper = InputMapper::new();
        mapper.key_down(ControlKey::W, Some(&Side::Left), true);
        assert_eq!(mapper.pause_pressed(), ClientMessage::Pause);
        assert!(mapper.held().contains(&ControlKey::W));
    }

    #[test]
    fn test_transitions_against_held_set() {
        let mut mapper = InputMapper::new();
        mapper.key_down(ControlKey::W, None, false);
        mapper.key_down(ControlKey::ArrowUp, None, false);

        let (released, pressed) = mapper.transitions(&keys(&[ControlKey::ArrowUp, ControlKey::S]));
        assert_eq!(released, vec![ControlKey::W]);
        assert_eq!(pressed, vec![ControlKey::S]);

        let (released, pressed) = mapper.transitions(mapper.held());
        assert!(released.is_empty() && pressed.is_empty());
    }

    #[test]
    fn test_key_code_mapping() {
        assert_eq!(ControlKey::ArrowUp.key_code(), KeyCode::Up);
        assert_eq!(ControlKey::ArrowDown.key_code(), KeyCode::Down);
        assert_eq!(ControlKey::W.key_code(), KeyCode::W);
        assert_eq!(ControlKey::S.key_code(), KeyCode::S);
    }
}
