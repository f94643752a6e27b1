use serde::{Deserialize, Serialize};

use super::state::Side;

/// Logical movement direction along a paddle's axis.
///
/// `Negative` is up for vertical paddles and left for horizontal ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Negative,
    Positive,
}

/// Directions currently held for one paddle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Hold {
    pub negative: bool,
    pub positive: bool,
}

impl Hold {
    /// -1, 0 or +1; opposite keys held together cancel out
    pub fn axis(&self) -> f32 {
        (self.positive as i8 - self.negative as i8) as f32
    }
}

/// Read side of the host's input state, sampled once per frame.
pub trait InputSurface {
    fn held(&self, side: Side) -> Hold;
}

/// Held-direction table the host updates from key down/up events.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HeldInput {
    holds: [Hold; 4],
}

impl HeldInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, side: Side, direction: Direction) {
        self.set(side, direction, true);
    }

    pub fn release(&mut self, side: Side, direction: Direction) {
        self.set(side, direction, false);
    }

    pub fn set(&mut self, side: Side, direction: Direction, down: bool) {
        let hold = &mut self.holds[side.index()];
        match direction {
            Direction::Negative => hold.negative = down,
            Direction::Positive => hold.positive = down,
        }
    }

    pub fn clear(&mut self) {
        self.holds = [Hold::default(); 4];
    }
}

impl InputSurface for HeldInput {
    fn held(&self, side: Side) -> Hold {
        self.holds[side.index()]
    }
}

/// No keys held; used for AI-only frames and tests
pub struct NoInput;

impl InputSurface for NoInput {
    fn held(&self, _side: Side) -> Hold {
        Hold::default()
    }
}
