//! Settings tab

use crate::app::App;
use crate::constants;
use crate::core::ConnectScheduler;
use crate::state::{SettingField, Settings};
use crate::theme;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

/// Render the settings list into `area`
pub fn render<S: ConnectScheduler>(frame: &mut Frame, app: &mut App<S>, area: Rect) {
    let [list_area, help_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(4)]).areas(area);

    let settings = app.ctx.settings();
    let items: Vec<ListItem> = SettingField::ALL
        .iter()
        .map(|field| setting_item(*field, &settings))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::BORDER_DEFAULT))
                .title(constants::TITLE_SETTINGS),
        )
        .highlight_style(
            Style::default()
                .bg(theme::ROW_SELECTED_BG)
                .fg(theme::ROW_SELECTED_FG)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(list, list_area, &mut app.settings_list_state);

    let field = app.highlighted_field();
    let help = Paragraph::new(vec![
        Line::from(Span::styled(
            field.hint(),
            Style::default().fg(theme::TEXT_SECONDARY),
        )),
        Line::from(Span::styled(
            constants::CLI_MSG_NOT_SAVED,
            Style::default().fg(theme::TEXT_SECONDARY),
        )),
    ])
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(theme::BORDER_DEFAULT)),
    );
    frame.render_widget(help, help_area);
}

fn setting_item(field: SettingField, settings: &Settings) -> ListItem<'static> {
    let value = match settings.flag(field) {
        Some(true) => Span::styled(
            "ON",
            Style::default()
                .fg(theme::SUCCESS)
                .add_modifier(Modifier::BOLD),
        ),
        Some(false) => Span::styled("OFF", Style::default().fg(theme::ERROR)),
        None => Span::styled(
            format!("{} ▾", settings.protocol),
            Style::default()
                .fg(theme::ACCENT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        ),
    };

    ListItem::new(Line::from(vec![
        Span::styled(
            format!("{:<24}", field.label()),
            Style::default().fg(theme::TEXT_PRIMARY),
        ),
        value,
    ]))
}
