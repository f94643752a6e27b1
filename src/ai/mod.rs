// AI module for computer-controlled paddles

mod bot;
mod tracking_bot;

use serde::{Deserialize, Serialize};

pub use bot::Bot;
pub use tracking_bot::TrackingBot;

/// Difficulty selection
///
/// Each level maps to a fixed dead zone (error margin) in arena units: the
/// AI ignores any gap to its target up to that size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Impossible,
}

impl Difficulty {
    /// Dead zone for this level; strictly decreasing from Easy to Impossible
    pub fn error_margin(&self) -> f32 {
        match self {
            Difficulty::Easy => 70.0,
            Difficulty::Medium => 50.0,
            Difficulty::Hard => 15.0,
            Difficulty::Impossible => 0.0,
        }
    }

    /// Get display name for difficulty
    pub fn display_name(&self) -> &str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Impossible => "Impossible",
        }
    }

    /// Get all difficulty levels, easiest first
    pub fn all() -> Vec<Difficulty> {
        vec![
            Difficulty::Easy,
            Difficulty::Medium,
            Difficulty::Hard,
            Difficulty::Impossible,
        ]
    }

    /// Next level, wrapping back to Easy
    pub fn next(&self) -> Difficulty {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Impossible,
            Difficulty::Impossible => Difficulty::Easy,
        }
    }
}

/// Create a bot instance for a difficulty level
pub fn create_bot(difficulty: Difficulty) -> Box<dyn Bot> {
    Box::new(TrackingBot::new(difficulty))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_margin_decreases_with_difficulty() {
        let margins: Vec<f32> = Difficulty::all().iter().map(|d| d.error_margin()).collect();
        assert!(margins.windows(2).all(|w| w[0] > w[1]));
        assert_eq!(Difficulty::Impossible.error_margin(), 0.0);
    }

    #[test]
    fn test_next_cycles_through_all_levels() {
        let mut level = Difficulty::Easy;
        for expected in Difficulty::all().iter().skip(1) {
            level = level.next();
            assert_eq!(level, *expected);
        }
        assert_eq!(level.next(), Difficulty::Easy);
    }

    #[test]
    fn test_create_bot_uses_difficulty_name() {
        assert_eq!(create_bot(Difficulty::Hard).name(), "Hard");
    }
}
