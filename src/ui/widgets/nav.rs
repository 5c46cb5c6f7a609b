//! Bottom navigation bar

use crate::app::Tab;
use crate::theme;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Tabs},
    Frame,
};

/// Render the tab bar with `active` highlighted
pub fn render(frame: &mut Frame, active: Tab, area: Rect) {
    let titles: Vec<Line> = Tab::ALL
        .iter()
        .enumerate()
        .map(|(i, tab)| Line::from(format!(" {} {} ", i + 1, tab.label())))
        .collect();

    let tabs = Tabs::new(titles)
        .select(active.index())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::BORDER_DEFAULT)),
        )
        .style(Style::default().fg(theme::TEXT_SECONDARY))
        .highlight_style(
            Style::default()
                .fg(theme::ACCENT_PRIMARY)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        )
        .divider("│");

    frame.render_widget(tabs, area);
}
