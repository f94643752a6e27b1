// Keyboard handling for the terminal host
//
// Terminals report key presses (and auto-repeat) but most never report
// releases, so a press latches its direction for a short window and every
// repeat extends it. When the terminal does send Release events the latch is
// dropped immediately.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::config::KeyBindings;
use crate::game::{Direction, GameMode, HeldInput, Hold, InputSurface, Side};

/// How long one press keeps a paddle moving without a repeat
pub const HOLD_WINDOW: Duration = Duration::from_millis(120);

/// Non-movement keys
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Quit,
    CycleDifficulty,
    SwitchMode(GameMode),
}

/// Parse a key name from the config file ("W", "Space", "Up", "Esc", ...)
pub fn parse_key(name: &str) -> Option<KeyCode> {
    match name.trim().to_ascii_lowercase().as_str() {
        "space" => Some(KeyCode::Char(' ')),
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "left" => Some(KeyCode::Left),
        "right" => Some(KeyCode::Right),
        "enter" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "tab" => Some(KeyCode::Tab),
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(KeyCode::Char(c)),
                _ => None,
            }
        }
    }
}

/// Letters compare case-insensitively
fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

/// Key bindings resolved to key codes, plus the latched paddle state.
#[derive(Debug)]
pub struct KeyLatch {
    moves: Vec<(KeyCode, Side, Direction)>,
    commands: Vec<(KeyCode, Command)>,
    until: [[Option<Instant>; 2]; 4],
    held: HeldInput,
}

impl KeyLatch {
    pub fn new(bindings: &KeyBindings) -> Self {
        let moves = [
            (&bindings.left_paddle_up, Side::Left, Direction::Negative),
            (&bindings.left_paddle_down, Side::Left, Direction::Positive),
            (&bindings.right_paddle_up, Side::Right, Direction::Negative),
            (&bindings.right_paddle_down, Side::Right, Direction::Positive),
            (&bindings.top_paddle_left, Side::Top, Direction::Negative),
            (&bindings.top_paddle_right, Side::Top, Direction::Positive),
            (&bindings.bottom_paddle_left, Side::Bottom, Direction::Negative),
            (&bindings.bottom_paddle_right, Side::Bottom, Direction::Positive),
        ]
        .into_iter()
        .filter_map(|(name, side, dir)| match parse_key(name) {
            Some(code) => Some((normalize(code), side, dir)),
            None => {
                tracing::warn!(key = %name, "unrecognised key binding ignored");
                None
            }
        })
        .collect();

        let mut commands: Vec<(KeyCode, Command)> = [
            (&bindings.start, Command::Start),
            (&bindings.pause, Command::Pause),
            (&bindings.quit, Command::Quit),
            (&bindings.cycle_difficulty, Command::CycleDifficulty),
        ]
        .into_iter()
        .filter_map(|(name, cmd)| parse_key(name).map(|code| (normalize(code), cmd)))
        .collect();
        commands.push((KeyCode::Esc, Command::Quit));
        commands.push((KeyCode::Char('1'), Command::SwitchMode(GameMode::ClassicVsAi)));
        commands.push((
            KeyCode::Char('2'),
            Command::SwitchMode(GameMode::ClassicTwoPlayer),
        ));
        commands.push((KeyCode::Char('4'), Command::SwitchMode(GameMode::Arena)));

        Self {
            moves,
            commands,
            until: [[None; 2]; 4],
            held: HeldInput::new(),
        }
    }

    /// Feed one key event; returns the command it maps to, if any
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Option<Command> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Command::Quit);
        }
        let code = normalize(key.code);

        if let Some(&(_, side, dir)) = self.moves.iter().find(|(c, _, _)| *c == code) {
            let slot = &mut self.until[side.index()][dir_index(dir)];
            *slot = match key.kind {
                KeyEventKind::Press | KeyEventKind::Repeat => Some(now + HOLD_WINDOW),
                KeyEventKind::Release => None,
            };
            return None;
        }

        if key.kind != KeyEventKind::Press {
            return None;
        }
        self.commands
            .iter()
            .find(|(c, _)| *c == code)
            .map(|&(_, cmd)| cmd)
    }

    /// Drop expired latches; call once per frame before ticking the engine
    pub fn refresh(&mut self, now: Instant) {
        for side in Side::ALL {
            for dir in [Direction::Negative, Direction::Positive] {
                let slot = &mut self.until[side.index()][dir_index(dir)];
                let down = matches!(slot, Some(deadline) if *deadline > now);
                if !down {
                    *slot = None;
                }
                self.held.set(side, dir, down);
            }
        }
    }

    pub fn clear(&mut self) {
        self.until = [[None; 2]; 4];
        self.held.clear();
    }

    /// Drain pending terminal events without blocking
    pub fn poll(&mut self, now: Instant) -> Result<Vec<Command>, io::Error> {
        let mut commands = Vec::new();
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                if let Some(cmd) = self.handle_key(key, now) {
                    commands.push(cmd);
                }
            }
        }
        self.refresh(now);
        Ok(commands)
    }
}

impl InputSurface for KeyLatch {
    fn held(&self, side: Side) -> Hold {
        self.held.held(side)
    }
}

fn dir_index(dir: Direction) -> usize {
    match dir {
        Direction::Negative => 0,
        Direction::Positive => 1,
    }
}
