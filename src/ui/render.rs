// Terminal draw surface: ratatui Braille canvas scaled to the arena

use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Circle, Line as CanvasLine, Rectangle},
        Block, Borders, Paragraph,
    },
    Frame, Terminal,
};

use super::hud::{BracketStatus, Hud, KeyHints};
use super::overlay::{overlay_for, render_overlay};
use crate::config::DisplayConfig;
use crate::engine::{ArenaSize, DrawSurface, FrameView};
use crate::error::SurfaceError;
use crate::game::{GameMode, Score, Side};

// Layout: score line, status line, bordered playfield
const UI_HEADER_ROWS: u16 = 2;
const MIN_WIDTH: u16 = 30;
const MIN_HEIGHT: u16 = 12;

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub paddle: Color,
    pub dead_paddle: Color,
    pub ball: Color,
    pub score: Color,
}

impl From<&DisplayConfig> for Palette {
    fn from(display: &DisplayConfig) -> Self {
        let rgb = |[r, g, b]: [u8; 3]| Color::Rgb(r, g, b);
        Self {
            paddle: rgb(display.paddle_color),
            dead_paddle: rgb(display.dead_paddle_color),
            ball: rgb(display.ball_color),
            score: rgb(display.score_color),
        }
    }
}

/// [`DrawSurface`] backed by a ratatui terminal.
pub struct TerminalSurface<B: Backend> {
    terminal: Terminal<B>,
    palette: Palette,
    hud: Hud,
}

impl<B: Backend> TerminalSurface<B> {
    pub fn new(terminal: Terminal<B>, palette: Palette, keys: KeyHints) -> Self {
        Self {
            terminal,
            palette,
            hud: Hud::new(keys),
        }
    }

    /// Seat names shown on the scoreboard, in side order
    pub fn set_labels(&mut self, labels: [String; 4]) {
        self.hud.labels = labels;
    }

    pub fn reset_labels(&mut self) {
        self.hud.reset_labels();
    }

    /// Tournament progress shown in the menu and game-over overlays
    pub fn set_bracket(&mut self, bracket: Option<BracketStatus>) {
        self.hud.bracket = bracket;
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }
}

impl<B: Backend> DrawSurface for TerminalSurface<B> {
    fn prepare(&mut self, arena: ArenaSize) -> Result<(), SurfaceError> {
        let size = self.terminal.size()?;
        if size.width < MIN_WIDTH || size.height < MIN_HEIGHT {
            return Err(SurfaceError::new(format!(
                "terminal is {}x{}, need at least {}x{}",
                size.width, size.height, MIN_WIDTH, MIN_HEIGHT
            )));
        }
        tracing::debug!(
            arena_width = arena.width,
            arena_height = arena.height,
            cols = size.width,
            rows = size.height,
            "surface prepared"
        );
        self.terminal.clear()?;
        Ok(())
    }

    fn draw(&mut self, view: &FrameView<'_>) -> Result<(), SurfaceError> {
        self.terminal
            .draw(|f| render(f, view, &self.palette, &self.hud))?;
        Ok(())
    }
}

pub fn render(frame: &mut Frame, view: &FrameView<'_>, palette: &Palette, hud: &Hud) {
    let area = frame.area();

    // True black background, not terminal default
    let bg = Block::default().style(Style::default().bg(Color::Rgb(0, 0, 0)));
    frame.render_widget(bg, area);

    let [score_area, status_area, field_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(UI_HEADER_ROWS - 1),
        Constraint::Min(0),
    ])
    .areas(area);

    draw_scores(frame, view, palette, hud, score_area);
    draw_status(frame, view, &hud.keys, status_area);
    draw_field(frame, view, palette, field_area);

    if let Some(message) = overlay_for(view, hud) {
        render_overlay(frame, &message, field_area);
    }
}

fn draw_scores(
    frame: &mut Frame,
    view: &FrameView<'_>,
    palette: &Palette,
    hud: &Hud,
    area: Rect,
) {
    let style = Style::default().fg(palette.score);
    let text = match view.score {
        Score::Classic { left, right, .. } => {
            let right_label = if view.mode == GameMode::ClassicVsAi {
                "AI"
            } else {
                hud.label(Side::Right)
            };
            format!(
                "{}  {}  :  {}  {}",
                hud.label(Side::Left),
                left,
                right,
                right_label
            )
        }
        Score::Arena { lives } => Side::ALL
            .iter()
            .map(|side| format!("{} ♥{}", hud.label(*side), lives[side.index()]))
            .collect::<Vec<_>>()
            .join("   "),
    };

    let paragraph = Paragraph::new(Line::from(Span::styled(text, style))).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn draw_status(frame: &mut Frame, view: &FrameView<'_>, keys: &KeyHints, area: Rect) {
    let moves = match view.mode {
        GameMode::ClassicVsAi => format!(
            "{}: Move  {}: AI {}",
            keys.moves_for(Side::Left),
            keys.difficulty,
            view.difficulty.display_name()
        ),
        GameMode::ClassicTwoPlayer => format!(
            "{}: Left  {}: Right",
            keys.moves_for(Side::Left),
            keys.moves_for(Side::Right)
        ),
        GameMode::Arena => Side::ALL
            .iter()
            .map(|side| keys.moves_for(*side))
            .collect::<Vec<_>>()
            .join("  "),
    };
    let controls = format!("{}  {}: Pause  {}: Quit", moves, keys.pause, keys.quit);

    let paragraph = Paragraph::new(controls)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn draw_field(frame: &mut Frame, view: &FrameView<'_>, palette: &Palette, area: Rect) {
    let width = f64::from(view.arena.width);
    let height = f64::from(view.arena.height);
    // Canvas y grows upward; arena y grows downward
    let flip = |y: f32, extent: f32| height - f64::from(y) - f64::from(extent);

    let canvas = Canvas::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .background_color(Color::Rgb(0, 0, 0))
        .marker(Marker::Braille)
        .x_bounds([0.0, width])
        .y_bounds([0.0, height])
        .paint(|ctx| {
            if view.mode != GameMode::Arena {
                // Dotted center line
                let mut y = 0.0;
                while y < height {
                    ctx.draw(&CanvasLine {
                        x1: width / 2.0,
                        y1: y,
                        x2: width / 2.0,
                        y2: (y + height / 60.0).min(height),
                        color: Color::DarkGray,
                    });
                    y += height / 30.0;
                }
            }

            for paddle in view.paddles {
                let color = if paddle.alive {
                    palette.paddle
                } else {
                    palette.dead_paddle
                };
                ctx.draw(&Rectangle {
                    x: f64::from(paddle.x),
                    y: flip(paddle.y, paddle.height),
                    width: f64::from(paddle.width),
                    height: f64::from(paddle.height),
                    color,
                });
            }

            if let Some(ball) = view.ball {
                ctx.draw(&Circle {
                    x: f64::from(ball.x),
                    y: flip(ball.y, 0.0),
                    radius: f64::from(ball.radius),
                    color: palette.ball,
                });
            }
        });

    frame.render_widget(canvas, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::Difficulty;
    use crate::config::KeyBindings;
    use crate::engine::{Engine, NullObserver};
    use crate::game::MatchConfig;
    use ratatui::backend::TestBackend;
    use std::time::Instant;

    fn surface(width: u16, height: u16) -> TerminalSurface<TestBackend> {
        let terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        TerminalSurface::new(
            terminal,
            Palette::from(&DisplayConfig::default()),
            KeyHints::from(&KeyBindings::default()),
        )
    }

    fn buffer_text(surface: &mut TerminalSurface<TestBackend>) -> String {
        let buffer = surface.terminal_mut().backend().buffer().clone();
        buffer.content.iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_tiny_terminal_is_rejected() {
        let result = Engine::new(
            MatchConfig::new(GameMode::ClassicVsAi, Difficulty::Easy),
            surface(10, 5),
            NullObserver,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_menu_frame_shows_title_and_score() {
        let mut engine = Engine::new(
            MatchConfig::new(GameMode::ClassicVsAi, Difficulty::Hard),
            surface(80, 30),
            NullObserver,
        )
        .unwrap();
        engine.tick(Instant::now(), &crate::game::NoInput).unwrap();

        let text = buffer_text(engine.surface_mut());
        assert!(text.contains("PONG ARENA"));
        assert!(text.contains("P1  0  :  0  AI"));
    }

    #[test]
    fn test_arena_scoreboard_uses_labels() {
        let mut surface = surface(100, 30);
        surface.set_labels(["Ana".into(), "Ben".into(), "Cid".into(), "Dee".into()]);
        let mut engine = Engine::new(
            MatchConfig::new(GameMode::Arena, Difficulty::Easy),
            surface,
            NullObserver,
        )
        .unwrap();
        engine.tick(Instant::now(), &crate::game::NoInput).unwrap();

        let text = buffer_text(engine.surface_mut());
        assert!(text.contains("Dee ♥3"));
    }

    #[test]
    fn test_status_line_uses_configured_keys() {
        let terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let mut keys = KeyBindings::default();
        keys.left_paddle_up = "Up".to_string();
        keys.left_paddle_down = "Down".to_string();
        let surface = TerminalSurface::new(
            terminal,
            Palette::from(&DisplayConfig::default()),
            KeyHints::from(&keys),
        );
        let mut engine = Engine::new(
            MatchConfig::new(GameMode::ClassicTwoPlayer, Difficulty::Easy),
            surface,
            NullObserver,
        )
        .unwrap();
        engine.tick(Instant::now(), &crate::game::NoInput).unwrap();

        let text = buffer_text(engine.surface_mut());
        assert!(text.contains("Up/Down: Left  O/L: Right  P: Pause  Q: Quit"));
    }
}
