#[cfg(test)]
#[path = "transcript_test.rs"]
mod tests;

use ratatui::prelude::Backend;
use ratatui::prelude::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::domain::models::ChatTurn;
use crate::domain::models::Role;

/// Indent applied to turn content under the speaker label.
const CONTENT_INDENT: &str = "  ";

/// Word wraps `text` to `width` columns. Words longer than a line are split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines: Vec<String> = vec![];

    for full_line in text.split('\n') {
        if full_line.trim().is_empty() {
            lines.push("".to_string());
            continue;
        }

        let mut current = String::new();
        let mut current_len = 0;

        for word in full_line.split(' ') {
            let mut word_chars = word.chars().collect::<Vec<char>>();
            while word_chars.len() > width {
                if current_len > 0 {
                    lines.push(current.trim_end().to_string());
                    current = String::new();
                    current_len = 0;
                }
                lines.push(word_chars.drain(..width).collect());
            }

            let word_len = word_chars.len();
            if current_len > 0 && current_len + 1 + word_len > width {
                lines.push(current.trim_end().to_string());
                current = String::new();
                current_len = 0;
            }

            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.extend(word_chars);
            current_len += word_len;
        }

        lines.push(current.trim_end().to_string());
    }

    return lines;
}

fn label_style(role: Role) -> Style {
    let colour = match role {
        Role::User => Color::Cyan,
        Role::Assistant => Color::Green,
    };

    return Style::default().fg(colour).add_modifier(Modifier::BOLD);
}

/// Rendered chat history plus its scroll position.
#[derive(Default)]
pub struct Transcript {
    lines: Vec<Line<'static>>,
    viewport_height: u16,
    pub position: u16,
}

impl Transcript {
    pub fn set_turns(&mut self, turns: &[ChatTurn], width: u16) {
        let content_width = usize::from(width).saturating_sub(CONTENT_INDENT.len());

        self.lines = turns
            .iter()
            .flat_map(|turn| {
                let mut lines = vec![Line::from(Span::styled(
                    format!("{}:", turn.role().label()),
                    label_style(turn.role()),
                ))];
                lines.extend(
                    wrap_text(turn.content(), content_width)
                        .into_iter()
                        .map(|line| return Line::from(format!("{CONTENT_INDENT}{line}"))),
                );
                lines.push(Line::from(""));

                return lines;
            })
            .collect();

        self.position = self.position.min(self.max_position());
    }

    pub fn set_viewport(&mut self, height: u16) {
        self.viewport_height = height;
        self.position = self.position.min(self.max_position());
    }

    pub fn len(&self) -> usize {
        return self.lines.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.lines.is_empty();
    }

    pub fn lines(&self) -> &[Line<'static>] {
        return &self.lines;
    }

    fn max_position(&self) -> u16 {
        let len = u16::try_from(self.lines.len()).unwrap_or(u16::MAX);
        return len.saturating_sub(self.viewport_height);
    }

    pub fn up(&mut self) {
        self.position = self.position.saturating_sub(1);
    }

    pub fn up_page(&mut self) {
        for _ in 0..10 {
            self.up();
        }
    }

    pub fn down(&mut self) {
        self.position = self.position.saturating_add(1).min(self.max_position());
    }

    pub fn down_page(&mut self) {
        for _ in 0..10 {
            self.down();
        }
    }

    pub fn last(&mut self) {
        self.position = self.max_position();
    }

    pub fn render<B: Backend>(&self, frame: &mut Frame<B>, rect: Rect) {
        frame.render_widget(
            Paragraph::new(self.lines.clone())
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .title("Chat"),
                )
                .scroll((self.position, 0)),
            rect,
        );
    }
}
