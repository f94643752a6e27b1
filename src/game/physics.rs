// Per-frame match state machine
//
// Menu → Playing ⇄ Scored → GameOver. Only `Playing` moves the ball;
// `Scored` still moves paddles so players can reposition during the serve
// pause. The transition out of `Scored` is deferred to the caller, which
// must hand back the epoch it captured (see `resume_serve`).

use tracing::{debug, info};

use super::bounce::bounce;
use super::collision::overlaps;
use super::input::InputSurface;
use super::state::{Control, MatchState, Phase, Score, Side};

/// What happened during one frame; the scheduler turns these into host
/// callbacks.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FrameEvents {
    pub paddle_hit: Option<Side>,
    pub wall_bounce: bool,
    pub score_changed: bool,
    pub eliminated: Option<Side>,
    pub phase_change: Option<Phase>,
}

impl FrameEvents {
    pub fn any(&self) -> bool {
        self.paddle_hit.is_some()
            || self.wall_bounce
            || self.score_changed
            || self.eliminated.is_some()
            || self.phase_change.is_some()
    }
}

/// Leave the menu and serve.
///
/// An arena with a single occupied seat has already been won; it goes
/// straight to `GameOver`.
pub fn start(state: &mut MatchState) -> FrameEvents {
    let mut events = FrameEvents::default();
    if state.phase != Phase::Menu {
        return events;
    }

    let alive = state.alive_sides();
    assert!(!alive.is_empty(), "match started with no live paddles");
    if alive.len() == 1 {
        end_match(state, Some(alive[0]), &mut events);
        return events;
    }

    state.serve();
    set_phase(state, Phase::Playing, &mut events);
    events
}

/// Deferred end of the serve pause.
///
/// Applies only if `epoch` is the epoch of the current match and the match
/// is still waiting in `Scored`; anything else is a stale timer and is
/// dropped. Returns whether the transition happened.
pub fn resume_serve(state: &mut MatchState, epoch: u64) -> bool {
    if epoch != state.epoch() || state.phase != Phase::Scored {
        debug!(
            epoch,
            current = state.epoch(),
            phase = ?state.phase,
            "discarding stale serve timer"
        );
        return false;
    }
    state.phase = Phase::Playing;
    debug!(epoch, "serve pause over");
    true
}

/// Advance one frame.
pub fn step(state: &mut MatchState, input: &impl InputSurface) -> FrameEvents {
    let mut events = FrameEvents::default();

    match state.phase {
        Phase::Menu | Phase::GameOver => return events,
        Phase::Playing | Phase::Scored => move_paddles(state, input),
    }
    if state.phase != Phase::Playing {
        return events;
    }

    state.ball.x += state.ball.dx;
    state.ball.y += state.ball.dy;

    reflect_walls(state, &mut events);
    resolve_paddle_hit(state, &mut events);
    check_scoring(state, &mut events);

    events
}

fn move_paddles(state: &mut MatchState, input: &impl InputSurface) {
    let speed = state.mode.paddle_speed;

    for paddle in state.paddles.iter_mut() {
        if !paddle.alive {
            paddle.velocity = 0.0;
            continue;
        }

        paddle.velocity = match paddle.control {
            Control::Human => input.held(paddle.side).axis() * speed,
            Control::Ai => state
                .bots
                .iter_mut()
                .find(|(side, _)| *side == paddle.side)
                .map(|(_, bot)| bot.steer(paddle, &state.ball, speed))
                .unwrap_or(0.0),
        };

        paddle.slide(paddle.velocity, state.mode.travel_extent(paddle.side));
    }
}

/// Bounce off walls that cannot score: top/bottom in classic modes, the
/// walls of eliminated players in the arena.
fn reflect_walls(state: &mut MatchState, events: &mut FrameEvents) {
    let width = state.mode.arena_width;
    let height = state.mode.arena_height;
    let ball = &mut state.ball;
    let r = ball.radius;

    match state.score {
        Score::Classic { .. } => {
            if (ball.y - r < 0.0 && ball.dy < 0.0) || (ball.y + r > height && ball.dy > 0.0) {
                ball.dy = -ball.dy;
                events.wall_bounce = true;
            }
        }
        Score::Arena { .. } => {
            for paddle in state.paddles.iter().filter(|p| !p.alive) {
                let hit = match paddle.side {
                    Side::Left if ball.x - r < 0.0 => {
                        ball.dx = ball.dx.abs();
                        ball.x = r;
                        true
                    }
                    Side::Right if ball.x + r > width => {
                        ball.dx = -ball.dx.abs();
                        ball.x = width - r;
                        true
                    }
                    Side::Top if ball.y - r < 0.0 => {
                        ball.dy = ball.dy.abs();
                        ball.y = r;
                        true
                    }
                    Side::Bottom if ball.y + r > height => {
                        ball.dy = -ball.dy.abs();
                        ball.y = height - r;
                        true
                    }
                    _ => false,
                };
                events.wall_bounce |= hit;
            }
        }
    }
}

/// Paddles are tested in canonical order; the first overlap wins and no
/// second collision is resolved in the same frame.
fn resolve_paddle_hit(state: &mut MatchState, events: &mut FrameEvents) {
    let hit = state.paddles.iter().position(|p| overlaps(&state.ball, p));
    if let Some(index) = hit {
        let paddle = &state.paddles[index];
        bounce(&mut state.ball, paddle, &state.mode.physics);
        events.paddle_hit = Some(paddle.side);
    }
}

fn check_scoring(state: &mut MatchState, events: &mut FrameEvents) {
    let width = state.mode.arena_width;
    let height = state.mode.arena_height;
    let (x, y) = (state.ball.x, state.ball.y);

    match state.score {
        Score::Classic {
            ref mut left,
            ref mut right,
            target,
        } => {
            let scorer = if x < 0.0 {
                *right += 1;
                Side::Right
            } else if x > width {
                *left += 1;
                Side::Left
            } else {
                return;
            };
            events.score_changed = true;

            let (left, right) = (*left, *right);
            info!(scorer = ?scorer, left, right, "point scored");
            if left >= target || right >= target {
                end_match(state, Some(scorer), events);
            } else {
                begin_serve_pause(state, events);
            }
        }
        Score::Arena { .. } => {
            let alive = |side: Side| state.paddle(side).map(|p| p.alive).unwrap_or(false);
            let loser = if x < 0.0 && alive(Side::Left) {
                Side::Left
            } else if x > width && alive(Side::Right) {
                Side::Right
            } else if y < 0.0 && alive(Side::Top) {
                Side::Top
            } else if y > height && alive(Side::Bottom) {
                Side::Bottom
            } else {
                return;
            };
            lose_life(state, loser, events);
        }
    }
}

fn lose_life(state: &mut MatchState, side: Side, events: &mut FrameEvents) {
    let remaining = match state.score {
        Score::Arena { ref mut lives } => {
            let slot = &mut lives[side.index()];
            *slot = slot.saturating_sub(1);
            *slot
        }
        Score::Classic { .. } => return,
    };
    events.score_changed = true;
    info!(player = side.player_number(), remaining, "life lost");

    if remaining == 0 {
        if let Some(paddle) = state.paddle_mut(side) {
            paddle.alive = false;
            paddle.velocity = 0.0;
        }
        events.eliminated = Some(side);
        info!(player = side.player_number(), "player eliminated");
    }

    let alive = state.alive_sides();
    if alive.len() <= 1 {
        end_match(state, alive.first().copied(), events);
    } else {
        begin_serve_pause(state, events);
    }
}

fn begin_serve_pause(state: &mut MatchState, events: &mut FrameEvents) {
    state.serve();
    set_phase(state, Phase::Scored, events);
}

fn end_match(state: &mut MatchState, winner: Option<Side>, events: &mut FrameEvents) {
    state.winner = winner;
    set_phase(state, Phase::GameOver, events);
    info!(winner = ?winner.map(Side::player_number), "match over");
}

fn set_phase(state: &mut MatchState, phase: Phase, events: &mut FrameEvents) {
    debug!(from = ?state.phase, to = ?phase, "phase change");
    state.phase = phase;
    events.phase_change = Some(phase);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::Difficulty;
    use crate::game::input::{Direction, HeldInput, NoInput};
    use crate::game::mode::{GameMode, MatchConfig};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn new_match(config: MatchConfig) -> MatchState {
        MatchState::new(&config, StdRng::seed_from_u64(42)).unwrap()
    }

    fn playing(mode: GameMode) -> MatchState {
        let mut state = new_match(MatchConfig::new(mode, Difficulty::Easy));
        start(&mut state);
        state
    }

    fn place_ball(state: &mut MatchState, x: f32, y: f32, dx: f32, dy: f32) {
        state.ball.x = x;
        state.ball.y = y;
        state.ball.dx = dx;
        state.ball.dy = dy;
    }

    #[test]
    fn test_menu_and_game_over_do_not_simulate() {
        let mut state = new_match(MatchConfig::new(GameMode::ClassicTwoPlayer, Difficulty::Easy));
        let mut input = HeldInput::new();
        input.press(Side::Left, Direction::Positive);
        let before = state.paddle(Side::Left).unwrap().y;

        assert!(!step(&mut state, &input).any());
        assert_eq!(state.paddle(Side::Left).unwrap().y, before);

        state.phase = Phase::GameOver;
        assert!(!step(&mut state, &input).any());
        assert_eq!(state.paddle(Side::Left).unwrap().y, before);
    }

    #[test]
    fn test_start_serves_from_center() {
        let mut state = new_match(MatchConfig::new(GameMode::ClassicVsAi, Difficulty::Easy));
        let events = start(&mut state);
        assert_eq!(events.phase_change, Some(Phase::Playing));
        assert_eq!(state.phase, Phase::Playing);
        assert!((state.ball.speed() - 5.0).abs() < 1e-4);

        // second start is ignored
        assert_eq!(start(&mut state), FrameEvents::default());
    }

    #[test]
    fn test_human_paddle_moves_and_clamps() {
        let mut state = playing(GameMode::ClassicTwoPlayer);
        place_ball(&mut state, 400.0, 300.0, 0.0, 0.0);
        let mut input = HeldInput::new();
        input.press(Side::Left, Direction::Negative);

        step(&mut state, &input);
        let left = state.paddle(Side::Left).unwrap();
        assert_eq!(left.y, 242.0);
        assert_eq!(left.velocity, -8.0);

        for _ in 0..100 {
            step(&mut state, &input);
        }
        assert_eq!(state.paddle(Side::Left).unwrap().y, 0.0);
    }

    #[test]
    fn test_classic_wall_reflection() {
        let mut state = playing(GameMode::ClassicTwoPlayer);
        place_ball(&mut state, 400.0, 12.0, 3.0, -4.0);
        let events = step(&mut state, &NoInput);
        assert!(events.wall_bounce);
        assert_eq!(state.ball.dy, 4.0);
    }

    #[test]
    fn test_right_paddle_scenario_half_impact() {
        // Paddle spans y 250..350, face at x 780; ball center lands at y 325
        let mut state = playing(GameMode::ClassicTwoPlayer);
        place_ball(&mut state, 767.0, 320.0, 5.0, 5.0);
        let speed = (50.0f32).sqrt() * 1.05;

        let events = step(&mut state, &NoInput);

        assert_eq!(events.paddle_hit, Some(Side::Right));
        let angle = 0.5 * state.mode.physics.max_bounce_angle();
        assert!(state.ball.dx < 0.0);
        assert!((state.ball.dy - speed * angle.sin()).abs() < 1e-4);
        assert_eq!(state.ball.x, 770.0);
    }

    #[test]
    fn test_first_paddle_in_canonical_order_wins() {
        let mut state = playing(GameMode::Arena);
        // Ball overlapping both the left and top paddles at once
        for paddle in state.paddles.iter_mut() {
            match paddle.side {
                Side::Left => paddle.y = 0.0,
                Side::Top => paddle.x = 0.0,
                _ => {}
            }
        }
        place_ball(&mut state, 25.0, 25.0, -1.0, -1.0);
        let events = step(&mut state, &NoInput);
        assert_eq!(events.paddle_hit, Some(Side::Left));
        assert!(state.ball.dx > 0.0);
    }

    #[test]
    fn test_classic_point_enters_serve_pause() {
        let mut state = playing(GameMode::ClassicTwoPlayer);
        place_ball(&mut state, 3.0, 550.0, -5.0, 0.0);

        let events = step(&mut state, &NoInput);

        assert!(events.score_changed);
        assert_eq!(events.phase_change, Some(Phase::Scored));
        assert_eq!(state.score.points(Side::Right), Some(1));
        assert_eq!(state.score.points(Side::Left), Some(0));
        assert_eq!((state.ball.x, state.ball.y), (400.0, 300.0));

        // ball frozen during the pause
        step(&mut state, &NoInput);
        assert_eq!((state.ball.x, state.ball.y), (400.0, 300.0));
    }

    #[test]
    fn test_classic_match_ends_at_target() {
        let mut state = playing(GameMode::ClassicVsAi);
        state.score = Score::Classic {
            left: 2,
            right: 1,
            target: 3,
        };
        place_ball(&mut state, 797.0, 20.0, 5.0, 0.0);
        // keep the AI paddle out of the way
        state.paddle_mut(Side::Right).unwrap().y = 500.0;

        let events = step(&mut state, &NoInput);

        assert_eq!(events.phase_change, Some(Phase::GameOver));
        assert_eq!(state.winner, Some(Side::Left));
        assert_eq!(state.score.points(Side::Left), Some(3));
    }

    #[test]
    fn test_resume_serve_checks_epoch_and_phase() {
        let mut state = playing(GameMode::ClassicTwoPlayer);
        state.phase = Phase::Scored;
        let epoch = state.epoch();

        assert!(!resume_serve(&mut state, epoch + 1));
        assert_eq!(state.phase, Phase::Scored);
        assert!(resume_serve(&mut state, epoch));
        assert_eq!(state.phase, Phase::Playing);

        state.phase = Phase::GameOver;
        assert!(!resume_serve(&mut state, epoch));
        assert_eq!(state.phase, Phase::GameOver);
    }

    #[test]
    fn test_arena_life_loss_and_elimination() {
        let mut state = playing(GameMode::Arena);
        state.score = Score::Arena { lives: [3, 3, 1, 3] };
        state.paddle_mut(Side::Top).unwrap().x = 0.0;
        place_ball(&mut state, 600.0, 2.0, 0.0, -5.0);

        let events = step(&mut state, &NoInput);

        assert_eq!(events.eliminated, Some(Side::Top));
        assert_eq!(state.score.lives(Side::Top), Some(0));
        assert!(!state.paddle(Side::Top).unwrap().alive);
        assert_eq!(state.phase, Phase::Scored);

        // Dead wall now reflects instead of costing a life
        state.phase = Phase::Playing;
        place_ball(&mut state, 600.0, 12.0, 1.0, -5.0);
        let events = step(&mut state, &NoInput);
        assert!(events.wall_bounce);
        assert!(!events.score_changed);
        assert_eq!(state.ball.dy, 5.0);
        assert_eq!(state.ball.y, 10.0);
        assert_eq!(state.score.lives(Side::Top), Some(0));
        assert!(!state.paddle(Side::Top).unwrap().alive);
    }

    #[test]
    fn test_arena_last_player_standing_wins() {
        let mut state = playing(GameMode::Arena);
        state.score = Score::Arena { lives: [1, 2, 0, 0] };
        for side in [Side::Top, Side::Bottom] {
            state.paddle_mut(side).unwrap().alive = false;
        }
        state.paddle_mut(Side::Left).unwrap().y = 0.0;
        place_ball(&mut state, 2.0, 700.0, -5.0, 0.0);

        let events = step(&mut state, &NoInput);

        assert_eq!(events.phase_change, Some(Phase::GameOver));
        assert_eq!(state.winner, Some(Side::Right));
    }

    #[test]
    fn test_single_occupied_seat_wins_on_start() {
        let config = MatchConfig::new(GameMode::Arena, Difficulty::Easy)
            .with_vacant(Side::Left)
            .with_vacant(Side::Right)
            .with_vacant(Side::Top);
        let mut state = new_match(config);

        let events = start(&mut state);

        assert_eq!(events.phase_change, Some(Phase::GameOver));
        assert_eq!(state.winner, Some(Side::Bottom));
    }

    #[test]
    fn test_ai_paddle_converges_on_impossible() {
        let config = MatchConfig::new(GameMode::ClassicVsAi, Difficulty::Impossible);
        let mut state = new_match(config);
        start(&mut state);
        place_ball(&mut state, 400.0, 120.0, 2.0, 0.0);

        for _ in 0..40 {
            step(&mut state, &NoInput);
            let paddle = state.paddle(Side::Right).unwrap();
            let target = (state.ball.y - paddle.height / 2.0).clamp(0.0, 500.0);
            let gap = (paddle.y - target).abs();
            assert!(gap <= 8.0 * 40.0);
        }
        let paddle = state.paddle(Side::Right).unwrap();
        assert_eq!(paddle.y, 70.0);
    }
}
