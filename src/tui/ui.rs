use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};

use super::state::{AppScreen, AppState, ScanView, MENU_ITEMS};
use crate::{sack_lane, SackLane};

/// Main render function that dispatches to the appropriate screen renderer.
pub fn render(f: &mut Frame, state: &AppState) {
    match state.screen {
        AppScreen::Home => render_home(f, state),
        AppScreen::Scanner => render_scanner(f, state),
    }

    if state.show_exit_dialog {
        render_exit_dialog(f);
    }
}

/// Render the home menu.
fn render_home(f: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(2),
            Constraint::Length(2),
        ])
        .split(f.area());

    let title = Paragraph::new("CBY Helper")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let rows: Vec<Row> = MENU_ITEMS
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let style = if i == state.menu_index {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else if i == 0 {
                Style::default()
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Row::new(vec![Cell::from(label.to_string())]).style(style)
        })
        .collect();

    let table = Table::new(rows, [Constraint::Min(20)])
        .block(Block::default().borders(Borders::ALL).title(" Menu "));
    f.render_widget(table, chunks[1]);

    let help = Paragraph::new("Enter: Open | Esc/q: Exit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(help, chunks[2]);

    render_status_bar(f, chunks[3], state);
}

/// Render the shipment scanning screen.
fn render_scanner(f: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(7),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Length(2),
        ])
        .split(f.area());

    let (hub, sack, osa) = match &state.view {
        ScanView::Resolved(record) => (
            record.hub_name.as_str(),
            record.sack_code.as_str(),
            record.osa_lane.as_str(),
        ),
        _ => ("", "", ""),
    };

    let header_text = if state.is_loading() {
        "Refreshing data...".to_string()
    } else if hub.is_empty() {
        format!("{} hubs loaded", state.directory.len())
    } else {
        hub.to_string()
    };
    let header = Paragraph::new(header_text)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" Shipment Scanning "));
    f.render_widget(header, chunks[0]);

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    render_lane_panel(f, panels[0], "Sack Segregation", sack);
    render_lane_panel(f, panels[1], "OSA Lane", osa);

    let input_style = if state.is_loading() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };
    let typed = state.input[..state.cursor_position].chars().count();
    let (scroll_x, cursor_offset) = input_scroll(typed, chunks[2].width.saturating_sub(2));
    let input = Paragraph::new(state.input.as_str())
        .style(input_style)
        .scroll((0, scroll_x))
        .block(
            Block::default()
                .title(" Scan AWB ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        );
    f.render_widget(input, chunks[2]);

    if state.view != ScanView::Invalid && !state.is_loading() {
        let cursor_x = chunks[2].x.saturating_add(1).saturating_add(cursor_offset);
        let cursor_y = chunks[2].y + 1;
        f.set_cursor_position((cursor_x, cursor_y));
    }

    let help = Paragraph::new("Enter: Resolve | F5/Ctrl+R: Refresh Data | Esc: Back")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(help, chunks[3]);

    render_status_bar(f, chunks[4], state);

    if state.view == ScanView::Invalid {
        render_invalid_overlay(f);
    }
}

/// Render one coloured lane panel.
fn render_lane_panel(f: &mut Frame, area: Rect, label: &str, value: &str) {
    let bg = lane_color(sack_lane(value));
    let body = vec![
        Line::from(""),
        Line::from(Span::styled(
            value.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(label.to_string()),
    ];
    let panel = Paragraph::new(body)
        .style(Style::default().fg(Color::Black).bg(bg))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(panel, area);
}

/// Background colour for a lane family.
fn lane_color(lane: SackLane) -> Color {
    match lane {
        SackLane::A => Color::Rgb(0xE6, 0x9F, 0x00),
        SackLane::B => Color::Rgb(0x56, 0xB4, 0xE9),
        SackLane::C => Color::Rgb(0x00, 0x9E, 0x73),
        SackLane::D => Color::Rgb(0xF0, 0xE4, 0x42),
        SackLane::Other => Color::Rgb(0x99, 0x99, 0x99),
    }
}

fn render_invalid_overlay(f: &mut Frame) {
    let area = centered_rect(40, 7, f.area());
    f.render_widget(Clear, area);
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "✖ Invalid Barcode",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Scan again or press Esc",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let popup = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(popup, area);
}

fn render_exit_dialog(f: &mut Frame) {
    let area = centered_rect(44, 7, f.area());
    f.render_widget(Clear, area);
    let text = vec![
        Line::from(""),
        Line::from("Are you sure you want to close the app?"),
        Line::from(""),
        Line::from(Span::styled(
            "y/Enter: Exit | n/Esc: Cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let popup = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Exit CBY Helper? "),
    );
    f.render_widget(popup, area);
}

/// Render the status bar at the bottom of the screen.
fn render_status_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let status_text = if let Some(ref error) = state.error_message {
        format!(" Error: {}", error)
    } else if let Some(ref success) = state.success_message {
        format!(" Status: {}", success)
    } else {
        format!(" Source: {}", state.loader.client().endpoint())
    };

    let style = if state.error_message.is_some() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Green)
    };

    let status = Paragraph::new(status_text)
        .style(style)
        .alignment(Alignment::Left)
        .block(Block::default().borders(Borders::TOP));
    f.render_widget(status, area);
}

/// Horizontal scroll and cursor column for a single-line input.
///
/// Keeps the cursor inside a box `inner_width` cells wide by scrolling the
/// text left once it fills the box.
fn input_scroll(typed: usize, inner_width: u16) -> (u16, u16) {
    let typed = u16::try_from(typed).unwrap_or(u16::MAX);
    let last_col = inner_width.saturating_sub(1);
    let scroll = typed.saturating_sub(last_col);
    (scroll, typed - scroll)
}

/// A `width` x `height` rectangle centred in `area`, clamped to fit.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
