// Whole-match behaviour driven through the public API

use std::time::{Duration, Instant};

use pong_arena::ai::Difficulty;
use pong_arena::engine::{Engine, HeadlessSurface, MatchObserver};
use pong_arena::game::{
    self, Direction, GameMode, HeldInput, MatchConfig, MatchState, NoInput, Phase, Score, Side,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const FRAME: Duration = Duration::from_millis(16);

fn new_match(mode: GameMode, difficulty: Difficulty, seed: u64) -> MatchState {
    MatchState::new(&MatchConfig::new(mode, difficulty), StdRng::seed_from_u64(seed)).unwrap()
}

/// Human seats follow the ball with a small dead zone
fn chase(state: &MatchState) -> HeldInput {
    let mut input = HeldInput::new();
    for paddle in &state.paddles {
        let (cx, cy) = paddle.center();
        let (target, center) = if paddle.side.is_vertical() {
            (state.ball.y, cy)
        } else {
            (state.ball.x, cx)
        };
        if target < center - 4.0 {
            input.press(paddle.side, Direction::Negative);
        } else if target > center + 4.0 {
            input.press(paddle.side, Direction::Positive);
        }
    }
    input
}

/// Serve pause ends immediately; the timer itself is covered by the engine tests
fn skip_serve_pause(state: &mut MatchState) {
    if state.phase == Phase::Scored {
        let epoch = state.epoch();
        assert!(game::resume_serve(state, epoch));
    }
}

#[test]
fn reset_twice_yields_identical_entities() {
    let config = MatchConfig::new(GameMode::Arena, Difficulty::Easy).with_vacant(Side::Bottom);
    let mut played = new_match(GameMode::ClassicVsAi, Difficulty::Hard, 1);
    let mut fresh = new_match(GameMode::ClassicTwoPlayer, Difficulty::Easy, 2);

    game::start(&mut played);
    for _ in 0..200 {
        let input = chase(&played);
        game::step(&mut played, &input);
        skip_serve_pause(&mut played);
    }

    played.reset(&config).unwrap();
    fresh.reset(&config).unwrap();
    let first = (played.ball.clone(), played.paddles.clone(), played.score.clone());
    played.reset(&config).unwrap();

    for state in [&played, &fresh] {
        assert_eq!(state.phase, Phase::Menu);
        assert_eq!(state.winner, None);
        assert_eq!(state.ball, first.0);
        assert_eq!(state.paddles, first.1);
        assert_eq!(state.score, first.2);
    }
}

#[test]
fn speed_never_drops_within_a_rally() {
    let mut state = new_match(GameMode::ClassicTwoPlayer, Difficulty::Easy, 11);
    game::start(&mut state);
    let max = state.mode.physics.max_ball_speed;
    let mut rally_speed = state.ball.speed();
    let mut hits = 0;

    for _ in 0..20_000 {
        let input = chase(&state);
        let events = game::step(&mut state, &input);
        if state.phase == Phase::GameOver {
            break;
        }

        let speed = state.ball.speed();
        assert!(speed <= max + 1e-3, "speed {speed} above cap");
        if events.phase_change.is_some() {
            // new serve, new rally
            skip_serve_pause(&mut state);
            rally_speed = state.ball.speed();
            continue;
        }
        if events.paddle_hit.is_some() {
            hits += 1;
        }
        assert!(speed >= rally_speed - 1e-3, "speed fell from {rally_speed} to {speed}");
        rally_speed = speed;
    }

    assert!(hits > 0, "chasing paddles should return the ball at least once");
}

#[test]
fn paddles_stay_on_their_edge() {
    let mut state = new_match(GameMode::Arena, Difficulty::Easy, 5);
    let mut rng = StdRng::seed_from_u64(99);
    game::start(&mut state);

    for _ in 0..5_000 {
        let mut input = HeldInput::new();
        for side in Side::ALL {
            match rng.gen_range(0..3) {
                0 => input.press(side, Direction::Negative),
                1 => input.press(side, Direction::Positive),
                _ => {}
            }
        }
        game::step(&mut state, &input);
        skip_serve_pause(&mut state);

        for paddle in &state.paddles {
            let extent = state.mode.travel_extent(paddle.side);
            let pos = paddle.position();
            assert!(
                (0.0..=extent - paddle.length()).contains(&pos),
                "{:?} paddle at {pos} outside [0, {}]",
                paddle.side,
                extent - paddle.length()
            );
        }
        if state.phase == Phase::GameOver {
            break;
        }
    }
}

#[test]
fn classic_points_arrive_one_at_a_time() {
    let mut state = new_match(GameMode::ClassicVsAi, Difficulty::Easy, 21);
    game::start(&mut state);
    let total = |score: &Score| match score {
        Score::Classic { left, right, .. } => left + right,
        Score::Arena { .. } => unreachable!(),
    };

    for _ in 0..50_000 {
        let before = total(&state.score);
        let events = game::step(&mut state, &NoInput);
        let after = total(&state.score);

        assert!(after == before || after == before + 1);
        assert_eq!(events.score_changed, after == before + 1);

        let reached = [Side::Left, Side::Right]
            .iter()
            .any(|&side| state.score.points(side) == Some(3));
        assert_eq!(state.phase == Phase::GameOver, reached);
        if reached {
            break;
        }
        skip_serve_pause(&mut state);
    }

    assert_eq!(state.phase, Phase::GameOver);
}

#[test]
fn arena_lives_only_fall_and_the_dead_stay_dead() {
    let mut state = new_match(GameMode::Arena, Difficulty::Easy, 8);
    game::start(&mut state);
    let mut lives = [3u32; 4];
    let mut dead = [false; 4];

    for _ in 0..30_000 {
        game::step(&mut state, &NoInput);

        for side in Side::ALL {
            let now = state.score.lives(side).unwrap();
            let alive = state.paddle(side).unwrap().alive;
            assert!(now <= lives[side.index()]);
            assert_eq!(alive, now > 0);
            assert!(!(dead[side.index()] && alive), "{side:?} came back to life");
            lives[side.index()] = now;
            dead[side.index()] = !alive;
        }
        if state.phase == Phase::GameOver {
            assert!(state.alive_sides().len() <= 1);
            break;
        }
        skip_serve_pause(&mut state);
    }
}

#[derive(Default)]
struct Tally {
    score_changes: usize,
    endings: Vec<Option<Side>>,
    serves_resumed: usize,
}

impl MatchObserver for Tally {
    fn on_score_changed(&mut self, _score: &Score) {
        self.score_changes += 1;
    }

    fn on_match_ended(&mut self, winner: Option<Side>) {
        self.endings.push(winner);
    }

    fn on_phase_changed(&mut self, phase: Phase) {
        if phase == Phase::Playing {
            self.serves_resumed += 1;
        }
    }
}

#[test]
fn engine_plays_ai_match_to_completion() {
    let config = MatchConfig::new(GameMode::ClassicVsAi, Difficulty::Impossible);
    let mut engine = Engine::with_rng(
        config,
        HeadlessSurface,
        Tally::default(),
        StdRng::seed_from_u64(4),
    )
    .unwrap();

    let mut now = Instant::now();
    engine.start(now).unwrap();
    for _ in 0..200_000 {
        now += FRAME;
        engine.tick(now, &NoInput).unwrap();
        if !engine.is_running() {
            break;
        }
    }

    assert_eq!(engine.state().phase, Phase::GameOver);
    let tally = engine.observer();
    assert_eq!(tally.endings.len(), 1);
    assert_eq!(tally.score_changes as u32, {
        let s = &engine.state().score;
        s.points(Side::Left).unwrap() + s.points(Side::Right).unwrap()
    });
    // one Playing for the opening serve, one per point except the last
    assert_eq!(tally.serves_resumed, tally.score_changes);

    let record = engine.record().unwrap();
    let json: serde_json::Value = serde_json::from_str(&record.to_json().unwrap()).unwrap();
    assert_eq!(json["mode"], "classic_vs_ai");
    assert_eq!(json["difficulty"], "impossible");
    assert_eq!(record.winner, engine.state().winner.map(|s| s.player_number()));
}

#[test]
fn reset_during_serve_pause_is_never_resumed() {
    let config = MatchConfig::new(GameMode::ClassicTwoPlayer, Difficulty::Easy);
    let mut engine = Engine::with_rng(
        config.clone(),
        HeadlessSurface,
        Tally::default(),
        StdRng::seed_from_u64(6),
    )
    .unwrap();

    let mut now = Instant::now();
    engine.start(now).unwrap();
    for _ in 0..100_000 {
        now += FRAME;
        engine.tick(now, &NoInput).unwrap();
        if engine.serve_pending() {
            break;
        }
    }
    assert_eq!(engine.state().phase, Phase::Scored);

    engine.reset(config).unwrap();
    for _ in 0..200 {
        now += FRAME;
        engine.tick(now, &NoInput).unwrap();
    }

    assert_eq!(engine.state().phase, Phase::Menu);
    assert_eq!(engine.state().score.points(Side::Left), Some(0));
    assert_eq!(engine.state().score.points(Side::Right), Some(0));
}
