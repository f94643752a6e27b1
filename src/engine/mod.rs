//! Frame scheduler: drives a [`MatchState`] from host ticks.
//!
//! The host owns the loop and calls [`Engine::tick`] once per frame with the
//! current time and its input surface. The engine steps the simulation,
//! fires the serve timer, forwards events to the [`MatchObserver`] and draws
//! through the [`DrawSurface`].

pub mod host;
pub mod pacing;
pub mod record;
pub mod timer;

use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::ai::Difficulty;
use crate::error::EngineError;
use crate::game::{physics, FrameEvents, GameMode, InputSurface, MatchConfig, MatchState, Phase};

pub use host::{ArenaSize, DrawSurface, FrameView, HeadlessSurface, MatchObserver, NullObserver};
pub use record::MatchRecord;
pub use timer::ServeTimer;

pub struct Engine<D: DrawSurface, O: MatchObserver> {
    state: MatchState,
    config: MatchConfig,
    surface: D,
    observer: O,
    serve_timer: ServeTimer,
    running: bool,
    /// Set while paused; the serve timer is pushed back by the time spent here
    paused_at: Option<Instant>,
    disposed: bool,
    frames: u64,
    started_at: Option<Instant>,
    ended_at: Option<Instant>,
}

impl<D: DrawSurface, O: MatchObserver> Engine<D, O> {
    pub fn new(config: MatchConfig, surface: D, observer: O) -> Result<Self, EngineError> {
        Self::with_rng(config, surface, observer, StdRng::from_entropy())
    }

    /// Same as [`Engine::new`] with a caller-supplied RNG (seeded in tests)
    pub fn with_rng(
        config: MatchConfig,
        mut surface: D,
        observer: O,
        rng: StdRng,
    ) -> Result<Self, EngineError> {
        let state = MatchState::new(&config, rng)?;
        surface.prepare(arena_size(&state))?;
        info!(mode = ?config.mode, difficulty = ?config.difficulty, "engine created");

        Ok(Self {
            state,
            config,
            surface,
            observer,
            serve_timer: ServeTimer::new(),
            running: false,
            paused_at: None,
            disposed: false,
            frames: 0,
            started_at: None,
            ended_at: None,
        })
    }

    /// Leave the menu and begin simulating on the next tick.
    pub fn start(&mut self, now: Instant) -> Result<(), EngineError> {
        self.ensure_live()?;
        if self.state.phase != Phase::Menu {
            debug!(phase = ?self.state.phase, "start ignored outside menu");
            return Ok(());
        }

        self.running = true;
        self.paused_at = None;
        self.started_at = Some(now);
        let events = physics::start(&mut self.state);
        self.dispatch(&events, now);
        Ok(())
    }

    /// Freeze the simulation without leaving the current phase.
    ///
    /// A pending serve pause is frozen too: it resumes with whatever was
    /// left of it when the match was paused.
    pub fn pause(&mut self, now: Instant) {
        if self.running && !self.disposed && self.paused_at.is_none() {
            self.paused_at = Some(now);
            debug!(serve_pending = self.serve_timer.is_pending(), "paused");
        }
    }

    pub fn resume(&mut self, now: Instant) {
        if let Some(since) = self.paused_at.take() {
            self.serve_timer.postpone(now.saturating_duration_since(since));
            debug!("resumed");
        }
    }

    /// Discard the current match and rebuild it from `config`, back in the menu.
    ///
    /// A rejected config leaves the running match untouched.
    pub fn reset(&mut self, config: MatchConfig) -> Result<(), EngineError> {
        self.ensure_live()?;
        self.state.reset(&config)?;
        self.config = config;
        self.serve_timer.cancel();
        self.running = false;
        self.paused_at = None;
        self.frames = 0;
        self.started_at = None;
        self.ended_at = None;
        self.surface.prepare(arena_size(&self.state))?;

        info!(mode = ?self.config.mode, epoch = self.state.epoch(), "match reset");
        self.observer.on_phase_changed(Phase::Menu);
        self.observer.on_score_changed(&self.state.score);
        Ok(())
    }

    /// Rebuilds the match with a new AI level. Switching mid-match forfeits it.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Result<(), EngineError> {
        let mut config = self.config.clone();
        config.difficulty = difficulty;
        self.reset(config)
    }

    /// Switch game mode, keeping difficulty and physics
    pub fn set_mode(&mut self, mode: GameMode) -> Result<(), EngineError> {
        let mut config = self.config.clone();
        config.mode = mode;
        config.vacant.clear();
        self.reset(config)
    }

    /// Stop ticking for good. Pending timers are invalidated and every later
    /// call returns [`EngineError::Disposed`].
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.state.bump_epoch();
        self.serve_timer.cancel();
        self.running = false;
        self.disposed = true;
        info!("engine disposed");
    }

    /// Advance one frame and draw it.
    pub fn tick(&mut self, now: Instant, input: &impl InputSurface) -> Result<(), EngineError> {
        self.ensure_live()?;

        if self.running && self.paused_at.is_none() {
            if let Some(epoch) = self.serve_timer.take_due(now) {
                if physics::resume_serve(&mut self.state, epoch) {
                    self.observer.on_phase_changed(Phase::Playing);
                }
            }

            let events = physics::step(&mut self.state, input);
            self.frames += 1;
            self.dispatch(&events, now);
        }

        let frame = frame_view(&self.state, self.is_paused());
        self.surface.draw(&frame).map_err(|e| {
            warn!(error = %e, "draw failed");
            EngineError::from(e)
        })
    }

    pub fn view(&self) -> FrameView<'_> {
        frame_view(&self.state, self.is_paused())
    }

    /// Result payload for the finished match, `None` until `GameOver`
    pub fn record(&self) -> Option<MatchRecord> {
        if self.state.phase != Phase::GameOver {
            return None;
        }
        let duration = match (self.started_at, self.ended_at) {
            (Some(start), Some(end)) => end.saturating_duration_since(start),
            _ => Default::default(),
        };

        Some(MatchRecord {
            mode: self.state.mode.mode,
            difficulty: (self.state.mode.mode == GameMode::ClassicVsAi)
                .then_some(self.state.difficulty),
            winner: self.state.winner.map(|side| side.player_number()),
            score: self.state.score.clone(),
            frames: self.frames,
            duration_ms: duration.as_millis() as u64,
        })
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Whether the frame subscription is active
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn serve_pending(&self) -> bool {
        self.serve_timer.is_pending()
    }

    pub fn surface(&self) -> &D {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut D {
        &mut self.surface
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    fn ensure_live(&self) -> Result<(), EngineError> {
        if self.disposed {
            Err(EngineError::Disposed)
        } else {
            Ok(())
        }
    }

    fn dispatch(&mut self, events: &FrameEvents, now: Instant) {
        if events.wall_bounce {
            self.observer.on_wall_bounce();
        }
        if let Some(side) = events.paddle_hit {
            self.observer.on_paddle_hit(side);
        }
        if let Some(side) = events.eliminated {
            self.observer.on_player_eliminated(side);
        }
        if events.score_changed {
            self.observer.on_score_changed(&self.state.score);
        }

        let Some(phase) = events.phase_change else {
            return;
        };
        match phase {
            Phase::Scored => {
                let due = now + self.state.mode.serve_delay;
                self.serve_timer.schedule(self.state.epoch(), due);
            }
            Phase::GameOver => {
                self.serve_timer.cancel();
                self.running = false;
                self.ended_at = Some(now);
            }
            Phase::Menu | Phase::Playing => {}
        }

        self.observer.on_phase_changed(phase);
        if phase == Phase::GameOver {
            self.observer.on_match_ended(self.state.winner);
        }
    }
}

fn frame_view(state: &MatchState, paused: bool) -> FrameView<'_> {
    let ball = match state.phase {
        Phase::Playing | Phase::Scored => Some(&state.ball),
        Phase::Menu | Phase::GameOver => None,
    };

    FrameView {
        arena: arena_size(state),
        mode: state.mode.mode,
        difficulty: state.difficulty,
        phase: state.phase,
        paused,
        paddles: &state.paddles,
        ball,
        score: &state.score,
        winner: state.winner,
    }
}

fn arena_size(state: &MatchState) -> ArenaSize {
    ArenaSize {
        width: state.mode.arena_width,
        height: state.mode.arena_height,
    }
}
