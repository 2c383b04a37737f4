pub mod board;
pub mod summary;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
    Frame,
};

use crate::{app::App, session::Phase};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

pub fn draw(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let view = self.view();

        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_style = Style::default().add_modifier(Modifier::DIM);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1), // scoreboard
                Constraint::Length(1), // padding
                Constraint::Min(4),    // pads
                Constraint::Length(1), // padding
                Constraint::Length(1), // status
                Constraint::Length(1), // legend
            ])
            .split(area);

        let strict_span = if view.strict() {
            Span::styled("strict ON", bold_style.fg(Color::Magenta))
        } else {
            Span::styled("strict off", dim_style)
        };

        let scoreboard = Paragraph::new(Line::from(vec![
            Span::styled(format!("level {}", view.level()), bold_style),
            Span::raw("   "),
            Span::styled(format!("score {}", view.score()), bold_style),
            Span::raw("   "),
            Span::styled(
                format!("best {}", view.best_score()),
                bold_style.fg(Color::Cyan),
            ),
            Span::raw("   "),
            strict_span,
        ]))
        .alignment(Alignment::Center);
        scoreboard.render(chunks[0], buf);

        board::Board {
            view,
            accepting: self.game.phase() == Phase::AwaitingInput,
        }
        .render(chunks[2], buf);

        let status_style = match self.game.phase() {
            Phase::AwaitingInput => bold_style.fg(Color::Green),
            Phase::GameOver => bold_style.fg(Color::Red),
            _ => bold_style,
        };
        Paragraph::new(Span::styled(view.status().to_string(), status_style))
            .alignment(Alignment::Center)
            .render(chunks[4], buf);

        Paragraph::new(Span::styled(
            "(1-4 / q w a s) pads   (t)oggle strict   (r)eset   (esc)ape",
            italic_style,
        ))
        .alignment(Alignment::Center)
        .render(chunks[5], buf);

        if let Some(result) = view.summary() {
            summary::SummaryPopup { summary: result }.render(area, buf);
        }
    }
}
