use std::io::{self, Stdout};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use crossterm::{
    cursor::Show,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::thread_rng;
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};

use pong_arena::ai::Difficulty;
use pong_arena::config::{self, Config};
use pong_arena::debug;
use pong_arena::engine::pacing::{frame_duration, limit_frame_rate};
use pong_arena::engine::{Engine, MatchObserver};
use pong_arena::game::{GameMode, MatchConfig, Phase, Score, Side};
use pong_arena::tournament::{Tournament, TournamentState};
use pong_arena::ui::{BracketStatus, Command, KeyHints, KeyLatch, Palette, TerminalSurface};

type Surface = TerminalSurface<CrosstermBackend<Stdout>>;

#[derive(Debug)]
struct Args {
    mode: GameMode,
    difficulty: Option<Difficulty>,
    debug: bool,
    players: Vec<String>,
}

fn main() -> Result<()> {
    let argv: Vec<String> = std::env::args().collect();
    let args = parse_args(&argv)?;

    debug::init(args.debug).context("failed to start debug logging")?;
    info!(?args, "pong-arena starting");

    let config = config::load_config().unwrap_or_else(|e| {
        warn!(error = %e, "could not read or create config, using defaults");
        Config::default()
    });

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = run(terminal, &config, &args);

    // Restore terminal
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture, Show)?;

    result
}

fn parse_args(args: &[String]) -> Result<Args> {
    let mut parsed = Args {
        mode: GameMode::ClassicVsAi,
        difficulty: None,
        debug: false,
        players: Vec::new(),
    };

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--mode" | "-m" => {
                let value = iter.next().context("--mode requires a value")?;
                parsed.mode = match value.as_str() {
                    "classic-ai" | "ai" => GameMode::ClassicVsAi,
                    "classic-2p" | "2p" => GameMode::ClassicTwoPlayer,
                    "arena" | "4p" => GameMode::Arena,
                    other => bail!("unknown mode '{other}'"),
                };
            }
            "--difficulty" | "-d" => {
                let value = iter.next().context("--difficulty requires a value")?;
                parsed.difficulty = Some(parse_difficulty(value)?);
            }
            "--tournament" | "-t" => {
                let value = iter.next().context("--tournament requires player names")?;
                parsed.players = value.split(',').map(str::to_string).collect();
            }
            "--debug" => parsed.debug = true,
            "--help" | "-h" => {
                print_usage(&args[0]);
                std::process::exit(0);
            }
            other => {
                print_usage(&args[0]);
                bail!("unknown argument '{other}'");
            }
        }
    }

    // Bracket matches are always played head to head
    if !parsed.players.is_empty() {
        parsed.mode = GameMode::ClassicTwoPlayer;
    }

    Ok(parsed)
}

fn parse_difficulty(value: &str) -> Result<Difficulty> {
    Difficulty::all()
        .into_iter()
        .find(|d| d.display_name().eq_ignore_ascii_case(value))
        .with_context(|| format!("unknown difficulty '{value}'"))
}

fn print_usage(program: &str) {
    println!("pong-arena - terminal Pong: classic, vs AI, and 4-player arena");
    println!();
    println!("Usage:");
    println!("  {}                                # 1 player vs AI", program);
    println!("  {} --mode classic-2p              # 2 players, one keyboard", program);
    println!("  {} --mode arena                   # 4 player arena", program);
    println!("  {} --difficulty hard              # easy|medium|hard|impossible", program);
    println!("  {} --tournament ana,ben,cid       # local bracket", program);
    println!("  {} --debug                        # log to {}", program, debug::log_path().display());
    println!();
    println!("Config: {}", config::get_config_path().display());
}

/// Collects match results for the host loop
#[derive(Default)]
struct ResultsLog {
    ended: Option<Option<Side>>,
}

impl MatchObserver for ResultsLog {
    fn on_score_changed(&mut self, score: &Score) {
        tracing::debug!(?score, "score changed");
    }

    fn on_match_ended(&mut self, winner: Option<Side>) {
        self.ended = Some(winner);
    }

    fn on_phase_changed(&mut self, phase: Phase) {
        tracing::debug!(?phase, "phase changed");
    }

    fn on_player_eliminated(&mut self, side: Side) {
        info!(player = side.player_number(), "knocked out of the arena");
    }
}

fn run(terminal: Terminal<CrosstermBackend<Stdout>>, config: &Config, args: &Args) -> Result<()> {
    let difficulty = args.difficulty.unwrap_or(config.ai.difficulty);
    let match_config = MatchConfig::new(args.mode, difficulty).with_physics(config.physics.clone());
    let surface = TerminalSurface::new(
        terminal,
        Palette::from(&config.display),
        KeyHints::from(&config.keybindings),
    );
    let mut engine = Engine::new(match_config, surface, ResultsLog::default())?;

    let mut tournament = if args.players.is_empty() {
        None
    } else {
        let bracket = Tournament::new(args.players.clone(), &mut thread_rng())?;
        seat_next_pairing(&mut engine, &bracket);
        Some(bracket)
    };

    let mut keys = KeyLatch::new(&config.keybindings);
    let frame = frame_duration(config.display.target_fps);

    loop {
        let now = Instant::now();

        for command in keys.poll(now)? {
            match command {
                Command::Quit => {
                    engine.dispose();
                    return Ok(());
                }
                Command::Start => match engine.state().phase {
                    Phase::Menu => engine.start(now)?,
                    Phase::GameOver => {
                        keys.clear();
                        match tournament.as_ref().map(Tournament::state) {
                            Some(TournamentState::InProgress) => {
                                if let Some(bracket) = tournament.as_ref() {
                                    seat_next_pairing(&mut engine, bracket);
                                }
                                engine.reset(engine.config().clone())?;
                                engine.start(now)?;
                            }
                            Some(TournamentState::Finished) => {
                                tournament = None;
                                engine.surface_mut().reset_labels();
                                engine.surface_mut().set_bracket(None);
                                engine.reset(engine.config().clone())?;
                            }
                            None => {
                                engine.reset(engine.config().clone())?;
                                engine.start(now)?;
                            }
                        }
                    }
                    Phase::Playing | Phase::Scored => {}
                },
                Command::Pause => {
                    if engine.is_paused() {
                        engine.resume(now);
                    } else {
                        engine.pause(now);
                    }
                }
                Command::CycleDifficulty => {
                    if engine.config().mode == GameMode::ClassicVsAi {
                        let next = engine.config().difficulty.next();
                        engine.set_difficulty(next)?;
                    }
                }
                Command::SwitchMode(mode) => {
                    if tournament.is_none() && mode != engine.config().mode {
                        engine.set_mode(mode)?;
                    }
                }
            }
        }

        engine.tick(now, &keys)?;

        if let Some(winner) = engine.observer_mut().ended.take() {
            if let Some(record) = engine.record() {
                info!(record = %record.to_json()?, "match finished");
            }
            if let (Some(bracket), Some(side)) = (tournament.as_mut(), winner) {
                bracket.record_result(side)?;
                if let Some(champion) = bracket.champion() {
                    info!(%champion, "tournament champion");
                }
                let status = BracketStatus::of(bracket);
                engine.surface_mut().set_bracket(status);
            }
        }

        limit_frame_rate(now, frame);
    }
}

/// Put the next bracket pairing on the left and right paddles
fn seat_next_pairing(engine: &mut Engine<Surface, ResultsLog>, bracket: &Tournament) {
    if let Some(pairing) = bracket.current_match() {
        let right = pairing.right.clone().unwrap_or_else(|| "BYE".to_string());
        engine
            .surface_mut()
            .set_labels([pairing.left.clone(), right, "P3".into(), "P4".into()]);
    }
    engine.surface_mut().set_bracket(BracketStatus::of(bracket));
}

