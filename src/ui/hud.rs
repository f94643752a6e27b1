// Text the host layers over the match: seat names, key hints, bracket status

use crate::config::KeyBindings;
use crate::game::Side;
use crate::tournament::Tournament;

/// Key names as shown on screen, taken from the configured bindings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyHints {
    /// Movement pair per side, in side order ("W/S", "O/L", ...)
    pub moves: [String; 4],
    pub start: String,
    pub pause: String,
    pub quit: String,
    pub difficulty: String,
}

impl From<&KeyBindings> for KeyHints {
    fn from(keys: &KeyBindings) -> Self {
        let pair = |a: &str, b: &str| format!("{}/{}", key_label(a), key_label(b));
        Self {
            moves: [
                pair(&keys.left_paddle_up, &keys.left_paddle_down),
                pair(&keys.right_paddle_up, &keys.right_paddle_down),
                pair(&keys.top_paddle_left, &keys.top_paddle_right),
                pair(&keys.bottom_paddle_left, &keys.bottom_paddle_right),
            ],
            start: key_label(&keys.start),
            pause: key_label(&keys.pause),
            quit: key_label(&keys.quit),
            difficulty: key_label(&keys.cycle_difficulty),
        }
    }
}

impl KeyHints {
    pub fn moves_for(&self, side: Side) -> &str {
        &self.moves[side.index()]
    }
}

/// Single letters are shown uppercase, named keys as configured
fn key_label(name: &str) -> String {
    let name = name.trim();
    if name.chars().count() == 1 {
        name.to_uppercase()
    } else {
        name.to_string()
    }
}

/// Where a local tournament stands between matches
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BracketStatus {
    /// The pairing that plays next and the round it belongs to
    Next {
        round: usize,
        left: String,
        right: String,
    },
    Champion(String),
}

impl BracketStatus {
    pub fn of(bracket: &Tournament) -> Option<Self> {
        if let Some(champion) = bracket.champion() {
            return Some(Self::Champion(champion.to_string()));
        }
        bracket.current_match().map(|pairing| Self::Next {
            round: bracket.round_number(),
            left: pairing.left.clone(),
            right: pairing.right.clone().unwrap_or_else(|| "BYE".to_string()),
        })
    }
}

/// Everything drawn around the match that the engine does not know about
#[derive(Debug, Clone)]
pub struct Hud {
    /// Seat names in side order
    pub labels: [String; 4],
    pub keys: KeyHints,
    pub bracket: Option<BracketStatus>,
}

impl Hud {
    pub fn new(keys: KeyHints) -> Self {
        Self {
            labels: default_labels(),
            keys,
            bracket: None,
        }
    }

    pub fn label(&self, side: Side) -> &str {
        &self.labels[side.index()]
    }

    pub fn reset_labels(&mut self) {
        self.labels = default_labels();
    }
}

fn default_labels() -> [String; 4] {
    Side::ALL.map(|side| format!("P{}", side.player_number()))
}
