use serde::{Deserialize, Serialize};

use crate::ai::Difficulty;
use crate::game::{GameMode, Score};

/// Completed match as handed to the results sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub mode: GameMode,
    /// Only meaningful against the AI
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    /// 1-based player number; `None` for a draw by mutual elimination
    pub winner: Option<usize>,
    pub score: Score,
    pub frames: u64,
    pub duration_ms: u64,
}

impl MatchRecord {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
