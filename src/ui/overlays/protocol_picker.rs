//! Protocol picker overlay.
//!
//! Opened from the Settings tab on the protocol row.

use crate::constants;
use crate::state::Protocol;
use crate::theme;
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
    Frame,
};

/// Render the protocol picker overlay
#[allow(clippy::cast_possible_truncation)]
pub fn render(frame: &mut Frame, list_state: &mut ListState) {
    let max_name_len = Protocol::ALL
        .iter()
        .map(|p| p.to_string().len())
        .max()
        .unwrap_or(8);
    let max_desc_len = Protocol::ALL
        .iter()
        .map(|p| p.description().len())
        .max()
        .unwrap_or(20);
    let width = (max_name_len + max_desc_len + 10).min(70) as u16;
    let height = (Protocol::ALL.len() + 2) as u16;

    let area = centered_rect(width, height, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER_FOCUSED))
        .title(format!(" {} ", constants::TITLE_PROTOCOL_PICKER));

    let items: Vec<ListItem> = Protocol::ALL
        .iter()
        .map(|protocol| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!(" {:<width$} ", protocol.to_string(), width = max_name_len),
                    Style::default()
                        .fg(theme::ACCENT_PRIMARY)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    protocol.description(),
                    Style::default().fg(theme::TEXT_SECONDARY),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(theme::ROW_SELECTED_BG)
                .fg(theme::ROW_SELECTED_FG)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");
    frame.render_stateful_widget(list, area, list_state);
}

/// Create a centered rectangle with fixed dimensions
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Length(width)]).flex(Flex::Center);

    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}
