//! Local single-elimination bracket.
//!
//! Entrants are shuffled into pairs; an odd one out gets a bye and advances
//! without playing. Winners of a round are paired in order for the next one
//! until a single champion remains. Every bracket match is played as a
//! classic two-player match: the first name takes the left paddle.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::info;

use crate::error::EngineError;
use crate::game::Side;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pairing {
    pub left: String,
    /// `None` is a bye
    pub right: Option<String>,
    pub winner: Option<String>,
}

impl Pairing {
    fn new(left: String, right: Option<String>) -> Self {
        // A bye is decided before it is played
        let winner = right.is_none().then(|| left.clone());
        Self {
            left,
            right,
            winner,
        }
    }

    pub fn is_bye(&self) -> bool {
        self.right.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TournamentState {
    InProgress,
    Finished,
}

#[derive(Debug)]
pub struct Tournament {
    rounds: Vec<Vec<Pairing>>,
    champion: Option<String>,
}

impl Tournament {
    /// Draw the first round. Needs at least two distinct, non-empty names.
    pub fn new<R: Rng + ?Sized>(names: Vec<String>, rng: &mut R) -> Result<Self, EngineError> {
        let mut entrants: Vec<String> = names.into_iter().map(|n| n.trim().to_string()).collect();
        if entrants.len() < 2 {
            return Err(EngineError::InvalidConfig(
                "a tournament needs at least two players".into(),
            ));
        }
        if entrants.iter().any(|n| n.is_empty()) {
            return Err(EngineError::InvalidConfig("player names cannot be empty".into()));
        }
        let mut sorted = entrants.clone();
        sorted.sort();
        sorted.dedup();
        if sorted.len() != entrants.len() {
            return Err(EngineError::InvalidConfig("player names must be unique".into()));
        }

        entrants.shuffle(rng);
        info!(players = entrants.len(), "tournament drawn");

        let mut tournament = Self {
            rounds: vec![pair_up(entrants)],
            champion: None,
        };
        tournament.advance_if_round_complete();
        Ok(tournament)
    }

    pub fn state(&self) -> TournamentState {
        if self.champion.is_some() {
            TournamentState::Finished
        } else {
            TournamentState::InProgress
        }
    }

    /// 1-based number of the round being played
    pub fn round_number(&self) -> usize {
        self.rounds.len()
    }

    pub fn current_round(&self) -> &[Pairing] {
        self.rounds.last().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Next pairing that still has to be played
    pub fn current_match(&self) -> Option<&Pairing> {
        if self.champion.is_some() {
            return None;
        }
        self.current_round().iter().find(|p| p.winner.is_none())
    }

    /// Record the result of [`Tournament::current_match`]; `Side::Left`
    /// means the first name won.
    pub fn record_result(&mut self, winner: Side) -> Result<(), EngineError> {
        let round_number = self.rounds.len();
        let round = self
            .rounds
            .last_mut()
            .ok_or_else(|| EngineError::InvalidConfig("tournament has no rounds".into()))?;
        let pairing = round
            .iter_mut()
            .find(|p| p.winner.is_none())
            .ok_or_else(|| EngineError::InvalidConfig("no match left to play".into()))?;

        let name = match (winner, &pairing.right) {
            (Side::Left, _) => pairing.left.clone(),
            (Side::Right, Some(right)) => right.clone(),
            _ => {
                return Err(EngineError::InvalidConfig(format!(
                    "{winner:?} is not a seat in a bracket match"
                )))
            }
        };
        info!(round = round_number, winner = %name, "bracket match decided");
        pairing.winner = Some(name);

        self.advance_if_round_complete();
        Ok(())
    }

    pub fn champion(&self) -> Option<&str> {
        self.champion.as_deref()
    }

    fn advance_if_round_complete(&mut self) {
        loop {
            let round = self.current_round();
            if round.iter().any(|p| p.winner.is_none()) {
                return;
            }
            let winners: Vec<String> = round.iter().filter_map(|p| p.winner.clone()).collect();
            if winners.len() == 1 {
                info!(champion = %winners[0], "tournament finished");
                self.champion = winners.into_iter().next();
                return;
            }
            self.rounds.push(pair_up(winners));
        }
    }
}

fn pair_up(players: Vec<String>) -> Vec<Pairing> {
    let mut pairings = Vec::with_capacity(players.len().div_ceil(2));
    let mut players = players.into_iter();
    while let Some(left) = players.next() {
        pairings.push(Pairing::new(left, players.next()));
    }
    pairings
}
