use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::data::{Priority, Status, Ticket};

use super::app::{App, CreateFlow, FormField, LoadState, ModalState, NoticeKind, UpdateFlow};

mod icons {
    // Status - fractional circles
    pub const STATUS_OPEN: &str = "○";
    pub const STATUS_IN_PROGRESS: &str = "◑";
    pub const STATUS_RESOLVED: &str = "●";

    // Priority - signal bar style
    pub const PRIORITY_LOW: &str = "▮╌╌";
    pub const PRIORITY_MEDIUM: &str = "▮▮╌";
    pub const PRIORITY_HIGH: &str = "▮▮▮";
}

pub fn status_icon(status: Status) -> &'static str {
    match status {
        Status::Open => icons::STATUS_OPEN,
        Status::InProgress => icons::STATUS_IN_PROGRESS,
        Status::Resolved => icons::STATUS_RESOLVED,
    }
}

pub fn status_color(status: Status) -> Color {
    match status {
        Status::Open => Color::Yellow,
        Status::InProgress => Color::Cyan,
        Status::Resolved => Color::Green,
    }
}

pub fn priority_icon(priority: Priority) -> &'static str {
    match priority {
        Priority::Low => icons::PRIORITY_LOW,
        Priority::Medium => icons::PRIORITY_MEDIUM,
        Priority::High => icons::PRIORITY_HIGH,
    }
}

pub fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::Low => Color::DarkGray,
        Priority::Medium => Color::Yellow,
        Priority::High => Color::Red,
    }
}

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header/search
            Constraint::Min(0),    // Ticket list
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    draw_header(f, app, chunks[0]);
    draw_tickets(f, app, chunks[1]);
    draw_status_bar(f, app, chunks[2]);

    // Overlays
    match app.modal {
        ModalState::Help => draw_help_popup(f),
        ModalState::NewTicket => draw_form_popup(f, app),
        ModalState::Detail => draw_detail_popup(f, app),
        ModalState::FilterMenu => draw_filter_popup(f, app),
        ModalState::None => {}
    }
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let border_style = if app.search_mode {
        Style::default().fg(Color::Yellow)
    } else if app.is_busy() {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let text = if app.search_mode {
        Line::from(vec![
            Span::styled("Search: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                &app.filter.search,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("▏", Style::default().fg(Color::Yellow)),
        ])
    } else {
        let mut spans = vec![
            Span::styled(
                "Helpdeck ",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("{}/{} tickets", app.visible.len(), app.repository.len()),
                Style::default().fg(Color::Green),
            ),
        ];
        let active = app.filter.active_filter_count();
        if active > 0 {
            spans.push(Span::styled(
                format!("  [{} filters]", active),
                Style::default().fg(Color::Magenta),
            ));
        }
        if app.is_busy() {
            spans.push(Span::styled(
                format!("  {} working...", app.spinner_char()),
                Style::default().fg(Color::Cyan),
            ));
        }
        Line::from(spans)
    };

    let paragraph = Paragraph::new(text).alignment(Alignment::Center);
    f.render_widget(paragraph, inner);
}

fn draw_tickets(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let header_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let sep_style = Style::default().fg(Color::DarkGray);

    let title_width = (inner.width as usize).saturating_sub(42).max(12);

    let mut items: Vec<ListItem> = Vec::new();
    items.push(ListItem::new(Line::from(vec![
        Span::styled("  ◐ ", header_style),
        Span::styled("│ ", sep_style),
        Span::styled("Pri ", header_style),
        Span::styled("│ ", sep_style),
        Span::styled(format!("{:>5} ", "ID"), header_style),
        Span::styled("│ ", sep_style),
        Span::styled(format!("{:<10} ", "Category"), header_style),
        Span::styled("│ ", sep_style),
        Span::styled(format!("{:<width$} ", "Title", width = title_width), header_style),
        Span::styled("│ ", sep_style),
        Span::styled("Created", header_style),
    ])));

    if app.visible.is_empty() {
        let hint = if app.repository.is_empty() && app.load_state == LoadState::Loading {
            "Loading tickets..."
        } else if app.repository.is_empty() {
            "No tickets. Press n to create one, r to refresh."
        } else {
            "No tickets match the active filters. Press c to clear them."
        };
        items.push(ListItem::new(Line::from(Span::styled(
            format!("  {}", hint),
            Style::default().fg(Color::DarkGray),
        ))));
    }

    for (row, &idx) in app.visible.iter().enumerate() {
        let Some(ticket) = app.repository.tickets().get(idx) else {
            continue;
        };
        let selected = row == app.selected;
        let base = if selected {
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        items.push(ListItem::new(Line::from(vec![
            Span::styled(if selected { "> " } else { "  " }, base.fg(Color::Yellow)),
            Span::styled(status_icon(ticket.status), base.fg(status_color(ticket.status))),
            Span::styled(" │ ", sep_style),
            Span::styled(priority_icon(ticket.priority), base.fg(priority_color(ticket.priority))),
            Span::styled(" │ ", sep_style),
            Span::styled(format!("{:>5} ", ticket.id), base.fg(Color::White)),
            Span::styled("│ ", sep_style),
            Span::styled(format!("{:<10} ", ticket.category.label()), base),
            Span::styled("│ ", sep_style),
            Span::styled(
                format!("{:<width$} ", truncate(&ticket.title, title_width), width = title_width),
                base,
            ),
            Span::styled("│ ", sep_style),
            Span::styled(display_date(ticket), base.fg(Color::DarkGray)),
        ])));
    }

    f.render_widget(List::new(items), inner);
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let line = if let Some(notice) = &app.notice {
        let color = match notice.kind {
            NoticeKind::Success => Color::Green,
            NoticeKind::Error => Color::Red,
        };
        Line::from(Span::styled(
            format!(" {}", notice.text),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(Span::styled(
            " j/k move  enter detail  n new  / search  f filters  o sort  c clear  r refresh  ? help  q quit",
            Style::default().fg(Color::DarkGray),
        ))
    };
    f.render_widget(Paragraph::new(line), area);
}

// ─────────────────────────────────────────────────────────────────────────────
// Popups
// ─────────────────────────────────────────────────────────────────────────────

fn draw_help_popup(f: &mut Frame) {
    let area = centered_rect(60, 60, f.area());
    f.render_widget(Clear, area);

    let lines = vec![
        Line::from(Span::styled("Keys", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from("  j / k       move selection"),
        Line::from("  g / G       jump to top / bottom"),
        Line::from("  enter       open ticket detail"),
        Line::from("  1 / 2 / 3   (in detail) set Open / In Progress / Resolved"),
        Line::from("  n           new ticket"),
        Line::from("  /           search title and description"),
        Line::from("  f           filter menu"),
        Line::from("  o           toggle newest/oldest"),
        Line::from("  c           clear all filters"),
        Line::from("  r           refresh from server"),
        Line::from("  q           quit"),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .border_style(Style::default().fg(Color::Cyan));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_filter_popup(f: &mut Frame, app: &App) {
    let area = centered_rect(44, 40, f.area());
    f.render_widget(Clear, area);

    let value_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let wildcard = "All".to_string();

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::raw("  s  Status:    "),
            Span::styled(
                app.filter.status.map(|s| s.label().to_string()).unwrap_or_else(|| wildcard.clone()),
                value_style,
            ),
        ]),
        Line::from(vec![
            Span::raw("  p  Priority:  "),
            Span::styled(
                app.filter.priority.map(|p| p.label().to_string()).unwrap_or_else(|| wildcard.clone()),
                value_style,
            ),
        ]),
        Line::from(vec![
            Span::raw("  c  Category:  "),
            Span::styled(
                app.filter.category.map(|c| c.label().to_string()).unwrap_or(wildcard),
                value_style,
            ),
        ]),
        Line::from(vec![
            Span::raw("  o  Sort:      "),
            Span::styled(app.filter.sort.label(), value_style),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "  x clear all   esc close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Filters ")
        .border_style(Style::default().fg(Color::Magenta));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_form_popup(f: &mut Frame, app: &App) {
    let area = centered_rect(60, 50, f.area());
    f.render_widget(Clear, area);

    let focused = |field: FormField| {
        if app.form_focus == field {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        }
    };
    let cursor = |field: FormField| if app.form_focus == field { "▏" } else { "" };

    let submitting = app.create_flow == CreateFlow::Submitting;
    let footer = if submitting {
        Line::from(Span::styled(
            format!("  {} submitting...", app.spinner_char()),
            Style::default().fg(Color::Cyan),
        ))
    } else {
        Line::from(Span::styled(
            "  enter submit   tab next field   ←/→ change value   esc cancel",
            Style::default().fg(Color::DarkGray),
        ))
    };

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  Title:       ", focused(FormField::Title)),
            Span::raw(app.draft.title.clone()),
            Span::styled(cursor(FormField::Title), Style::default().fg(Color::Yellow)),
        ]),
        Line::from(vec![
            Span::styled("  Description: ", focused(FormField::Description)),
            Span::raw(app.draft.description.clone()),
            Span::styled(cursor(FormField::Description), Style::default().fg(Color::Yellow)),
        ]),
        Line::from(vec![
            Span::styled("  Category:    ", focused(FormField::Category)),
            Span::styled(
                format!("< {} >", app.draft.category.label()),
                focused(FormField::Category).fg(Color::Cyan),
            ),
        ]),
        Line::from(vec![
            Span::styled("  Priority:    ", focused(FormField::Priority)),
            Span::styled(
                format!("< {} >", app.draft.priority.label()),
                focused(FormField::Priority).fg(priority_color(app.draft.priority)),
            ),
        ]),
        Line::from(""),
        footer,
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" New Ticket ")
        .border_style(Style::default().fg(Color::Green));
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }).block(block), area);
}

fn draw_detail_popup(f: &mut Frame, app: &App) {
    let Some(ticket) = &app.detail else { return };

    let area = centered_rect(70, 60, f.area());
    f.render_widget(Clear, area);

    let updating = app.update_flow == UpdateFlow::Updating;
    let status_keys = if updating {
        Line::from(Span::styled(
            format!("  {} updating status...", app.spinner_char()),
            Style::default().fg(Color::Cyan),
        ))
    } else {
        let key_for = |status: Status| match status {
            Status::Open => "1",
            Status::InProgress => "2",
            Status::Resolved => "3",
        };
        let mut spans = vec![Span::raw("  Set status: ")];
        for status in Status::all() {
            let current = ticket.status == status;
            let style = if current {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().fg(status_color(status))
            };
            spans.push(Span::styled(
                format!("[{}] {}{}  ", key_for(status), status.label(), if current { " (current)" } else { "" }),
                style,
            ));
        }
        Line::from(spans)
    };

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("  #{} ", ticket.id),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                ticket.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::raw("  Status:   "),
            Span::styled(
                format!("{} {}", status_icon(ticket.status), ticket.status.label()),
                Style::default().fg(status_color(ticket.status)),
            ),
        ]),
        Line::from(vec![
            Span::raw("  Priority: "),
            Span::styled(
                format!("{} {}", priority_icon(ticket.priority), ticket.priority.label()),
                Style::default().fg(priority_color(ticket.priority)),
            ),
        ]),
        Line::from(format!("  Category: {}", ticket.category.label())),
        Line::from(format!("  Created:  {}", ticket.created_at)),
        Line::from(""),
        Line::from(format!("  {}", ticket.description)),
        Line::from(""),
        status_keys,
        Line::from(""),
        Line::from(Span::styled(
            "  esc close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Ticket ")
        .border_style(Style::default().fg(Color::Cyan));
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }).block(block), area);
}

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn display_date(ticket: &Ticket) -> String {
    // The server string is opaque; show just the date part when it looks
    // like an ISO timestamp.
    ticket
        .created_at
        .split('T')
        .next()
        .unwrap_or(&ticket.created_at)
        .to_string()
}

fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut width = 0;
    for c in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if width + w > max_width.saturating_sub(1) {
            break;
        }
        width += w;
        out.push(c);
    }
    out.push('…');
    out
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
