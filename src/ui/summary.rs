use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::view::GameSummary;

/// Centred end-of-game box drawn over the board.
pub struct SummaryPopup {
    pub summary: GameSummary,
}

impl Widget for SummaryPopup {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let headline = format!(
            "You reached level {} with {} points!",
            self.summary.level, self.summary.score
        );
        let hint = "(enter) play again";

        let mut lines = vec![
            Line::from(Span::styled(
                headline.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        if self.summary.new_best {
            lines.push(Line::from(Span::styled(
                "New best score!",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )));
        }
        lines.push(Line::from(Span::styled(
            hint,
            Style::default().add_modifier(Modifier::ITALIC),
        )));

        let width = (headline.width().max(hint.width()) as u16 + 4).min(area.width);
        let height = (lines.len() as u16 + 2).min(area.height);
        let popup = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        };

        Clear.render(popup, buf);
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Game Over ")
                    .title_alignment(Alignment::Center)
                    .border_style(Style::default().fg(Color::Red)),
            )
            .render(popup, buf);
    }
}
