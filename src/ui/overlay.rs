// Overlay message system for displaying centered text on screen

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::hud::{BracketStatus, Hud};
use crate::engine::FrameView;
use crate::game::{GameMode, Phase};

/// A message to display as an overlay in the center of the screen
#[derive(Debug, Clone)]
pub struct OverlayMessage {
    /// Lines of text to display
    pub lines: Vec<String>,
    /// Optional title for the overlay box
    pub title: Option<String>,
    /// Style preset for the overlay
    pub style: OverlayStyle,
}

/// Predefined styles for overlay messages
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverlayStyle {
    /// Informational message (white/gray)
    Info,
    /// Warning message (yellow)
    Warning,
    /// Success message (green)
    Success,
}

impl OverlayMessage {
    pub fn info(lines: Vec<String>) -> Self {
        Self {
            lines,
            title: None,
            style: OverlayStyle::Info,
        }
    }

    pub fn warning(lines: Vec<String>) -> Self {
        Self {
            lines,
            title: None,
            style: OverlayStyle::Warning,
        }
    }

    pub fn success(lines: Vec<String>) -> Self {
        Self {
            lines,
            title: None,
            style: OverlayStyle::Success,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    fn border_color(&self) -> Color {
        match self.style {
            OverlayStyle::Info => Color::Cyan,
            OverlayStyle::Warning => Color::Yellow,
            OverlayStyle::Success => Color::Green,
        }
    }

    fn text_color(&self) -> Color {
        match self.style {
            OverlayStyle::Info => Color::White,
            OverlayStyle::Warning => Color::Yellow,
            OverlayStyle::Success => Color::LightGreen,
        }
    }
}

/// Message for the current phase, if the phase needs one.
pub fn overlay_for(view: &FrameView<'_>, hud: &Hud) -> Option<OverlayMessage> {
    let keys = &hud.keys;
    if view.paused {
        return Some(
            OverlayMessage::warning(vec![format!(
                "{} to resume  |  {} to quit",
                keys.pause, keys.quit
            )])
            .with_title("PAUSED"),
        );
    }

    match view.phase {
        Phase::Menu => {
            let mut lines = vec![view.mode.display_name().to_string()];
            if view.mode == GameMode::ClassicVsAi {
                lines.push(format!("AI: {}", view.difficulty.display_name()));
            }
            if let Some(BracketStatus::Next { round, left, right }) = &hud.bracket {
                lines.push(format!("Round {}: {} vs {}", round, left, right));
            }
            lines.push(String::new());
            lines.push(format!("{} to start  |  {} to quit", keys.start, keys.quit));
            if hud.bracket.is_none() {
                lines.push(format!("1/2/4 change mode  |  {} difficulty", keys.difficulty));
            }
            Some(OverlayMessage::info(lines).with_title("PONG ARENA"))
        }
        Phase::GameOver => {
            let headline = match view.winner {
                Some(side) => format!("{} WINS", hud.label(side).to_uppercase()),
                None => "DRAW".to_string(),
            };
            let message = match &hud.bracket {
                None => OverlayMessage::success(vec![
                    headline,
                    String::new(),
                    format!("{} for rematch  |  {} to quit", keys.start, keys.quit),
                ]),
                Some(BracketStatus::Next { round, left, right }) => OverlayMessage::success(vec![
                    headline,
                    String::new(),
                    format!("Next up, round {}: {} vs {}", round, left, right),
                    format!("{} for next match  |  {} to quit", keys.start, keys.quit),
                ])
                .with_title("TOURNAMENT"),
                Some(BracketStatus::Champion(name)) => OverlayMessage::success(vec![
                    headline,
                    format!("{} is the champion!", name),
                    String::new(),
                    format!("{} for menu  |  {} to quit", keys.start, keys.quit),
                ])
                .with_title("TOURNAMENT OVER"),
            };
            Some(message)
        }
        Phase::Playing | Phase::Scored => None,
    }
}

/// Render an overlay message in the center of the screen
pub fn render_overlay(frame: &mut Frame, message: &OverlayMessage, area: Rect) {
    let max_line_length = message
        .lines
        .iter()
        .chain(message.title.iter())
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);

    // Padding for borders and spacing
    let overlay_width = (max_line_length as u16 + 6).min(area.width.saturating_sub(4));
    let overlay_height = (message.lines.len() as u16 + 4).min(area.height.saturating_sub(4));

    let overlay_area = Rect {
        x: area.x + (area.width.saturating_sub(overlay_width)) / 2,
        y: area.y + (area.height.saturating_sub(overlay_height)) / 2,
        width: overlay_width,
        height: overlay_height,
    };

    frame.render_widget(Clear, overlay_area);

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(message.border_color()))
        .style(Style::default().bg(Color::Rgb(20, 20, 20)));

    if let Some(ref title) = message.title {
        block = block.title(format!(" {} ", title));
    }

    frame.render_widget(block, overlay_area);

    let inner_area = overlay_area.inner(ratatui::layout::Margin::new(2, 1));

    let text_lines: Vec<Line> = message
        .lines
        .iter()
        .map(|line| {
            Line::from(Span::styled(
                line.clone(),
                Style::default().fg(message.text_color()),
            ))
        })
        .collect();

    let paragraph = Paragraph::new(text_lines).alignment(Alignment::Center);

    frame.render_widget(paragraph, inner_area);
}
