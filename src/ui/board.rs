use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::{input::key_hint, signal::Signal, view::TuiPresenter};

/// The four pads as a 2x2 grid.
pub struct Board<'a> {
    pub view: &'a TuiPresenter,
    /// Whether presses are currently accepted; pads look dimmer otherwise.
    pub accepting: bool,
}

impl Widget for Board<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 4 || area.height < 2 {
            return;
        }

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
            .split(area);

        for (row_idx, row) in rows.iter().enumerate() {
            let cells = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
                .split(*row);

            for (col_idx, cell) in cells.iter().enumerate() {
                if let Some(signal) = Signal::from_index(row_idx * 2 + col_idx) {
                    Pad {
                        signal,
                        lit: self.view.is_lit(signal),
                        accepting: self.accepting,
                    }
                    .render(*cell, buf);
                }
            }
        }
    }
}

struct Pad {
    signal: Signal,
    lit: bool,
    accepting: bool,
}

impl Widget for Pad {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (border_style, fill) = if self.lit {
            (
                Style::default()
                    .fg(self.signal.lit_color())
                    .add_modifier(Modifier::BOLD),
                Style::default().bg(self.signal.lit_color()).fg(Color::Black),
            )
        } else if self.accepting {
            (
                Style::default().fg(self.signal.color()),
                Style::default().fg(self.signal.color()),
            )
        } else {
            (
                Style::default()
                    .fg(self.signal.color())
                    .add_modifier(Modifier::DIM),
                Style::default()
                    .fg(self.signal.color())
                    .add_modifier(Modifier::DIM),
            )
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(if self.lit {
                BorderType::Thick
            } else {
                BorderType::Rounded
            })
            .border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        if self.lit {
            buf.set_style(inner, fill);
        }

        if inner.height == 0 {
            return;
        }
        let label_row = Rect {
            y: inner.y + inner.height / 2,
            height: 1,
            ..inner
        };
        Paragraph::new(Line::from(vec![
            Span::styled(self.signal.to_string(), fill.add_modifier(Modifier::BOLD)),
            Span::styled(format!(" [{}]", key_hint(self.signal)), fill),
        ]))
        .alignment(Alignment::Center)
        .render(label_row, buf);
    }
}
