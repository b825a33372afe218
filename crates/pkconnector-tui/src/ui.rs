//! Rendering

use pkconnector_core::storage::KeyValueStore;
use pkconnector_core::users::{
    delete_confirmation_message, role_badge, Avatar, AvatarSize, PaletteColor, User,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::{App, FormField, LoginField, Screen};

const ACCENT: Color = Color::Cyan;

fn color(c: PaletteColor) -> Color {
    let (r, g, b) = c.rgb();
    Color::Rgb(r, g, b)
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn avatar_span(user: &User, size: AvatarSize) -> Span<'static> {
    let avatar = Avatar::for_name(&user.name, size);
    let width = usize::from(avatar.size.width());
    Span::styled(
        format!("{:^width$}", avatar.initials, width = width),
        Style::default()
            .fg(Color::White)
            .bg(color(avatar.color))
            .add_modifier(Modifier::BOLD),
    )
}

fn badge_span(user: &User) -> Span<'static> {
    Span::styled(
        format!(" {} ", user.role),
        Style::default().fg(Color::Black).bg(color(role_badge(user.role))),
    )
}

pub fn draw<S: KeyValueStore>(frame: &mut Frame, app: &App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(8),    // Main content
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);

    match app.screen() {
        Screen::Login => draw_login(frame, app, chunks[1]),
        screen => {
            let body = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(18), Constraint::Min(20)])
                .split(chunks[1]);
            draw_sidebar(frame, screen, body[0]);
            match screen {
                Screen::Users => draw_users(frame, app, body[1]),
                _ => draw_dashboard(frame, app, body[1]),
            }
        }
    }

    draw_footer(frame, app, chunks[2]);

    if app.console().form().is_some() {
        draw_form(frame, app, frame.area());
    }
    if let Some(user) = &app.pending_delete {
        draw_confirm(frame, user, frame.area());
    }
    if app.dropdown_open {
        draw_dropdown(frame, app, chunks[1]);
    }
}

fn draw_header<S: KeyValueStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let mut spans = vec![
        Span::styled("pkConnector", Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::styled(
            format!(" {} ", app.environment_label),
            Style::default().fg(Color::Black).bg(Color::Yellow),
        ),
    ];
    if let Some(user) = app.session().current_user() {
        spans.push(Span::raw("   "));
        spans.push(avatar_span(user, app.avatar_size));
        spans.push(Span::raw(format!(" {} ▾", user.name)));
    }

    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn draw_sidebar(frame: &mut Frame, screen: Screen, area: Rect) {
    let entry = |key: &str, label: &str, active: bool| {
        let style = if active {
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        Line::from(Span::styled(format!(" {} {}", key, label), style))
    };
    let lines = vec![
        entry("1", "Dashboard", screen == Screen::Dashboard),
        entry("2", "Users", screen == Screen::Users),
    ];
    let sidebar =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Menu"));
    frame.render_widget(sidebar, area);
}

fn draw_login<S: KeyValueStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let login = &app.login;
    let field = |label: &str, value: String, focused: bool| {
        let marker = if focused { ">" } else { " " };
        let style = if focused {
            Style::default().fg(ACCENT)
        } else {
            Style::default()
        };
        Line::from(vec![
            Span::styled(format!("{} {:<9}", marker, label), style),
            Span::raw(value),
        ])
    };

    let mut lines = vec![
        field("Email", login.email.clone(), login.focus == LoginField::Email),
        field(
            "Password",
            "*".repeat(login.password.chars().count()),
            login.focus == LoginField::Password,
        ),
        Line::raw(""),
    ];
    if let Some(errors) = &login.errors {
        for error in errors.errors() {
            lines.push(Line::styled(error.message.clone(), Style::default().fg(Color::Red)));
        }
    }
    if let Some(message) = login.rejection {
        lines.push(Line::styled(message, Style::default().fg(Color::Red)));
    }
    if let Some(status) = &app.status {
        lines.push(Line::styled(status.clone(), Style::default().fg(Color::DarkGray)));
    }

    let rect = centered(area, 50, 10);
    let form = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Sign in"));
    frame.render_widget(form, rect);
}

fn draw_dashboard<S: KeyValueStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let registry = app.console().registry();
    let active = registry.list().iter().filter(|u| u.status.is_active()).count();
    let name = app
        .current_user()
        .map(|u| u.name.as_str())
        .unwrap_or_default();

    let lines = vec![
        Line::styled(format!("Welcome, {}", name), Style::default().add_modifier(Modifier::BOLD)),
        Line::raw(""),
        Line::raw(format!("Users: {}", registry.len())),
        Line::raw(format!("Active: {}", active)),
        Line::raw(format!("Inactive: {}", registry.len() - active)),
    ];
    let dashboard =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Dashboard"));
    frame.render_widget(dashboard, area);
}

fn draw_users<S: KeyValueStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let rows: Vec<Row> = app
        .console()
        .registry()
        .list()
        .iter()
        .map(|user| {
            let status_style = if user.status.is_active() {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Row::new(vec![
                Cell::from(Line::from(avatar_span(user, app.avatar_size))),
                Cell::from(user.name.clone()),
                Cell::from(user.email.clone()),
                Cell::from(user.company.clone()),
                Cell::from(Line::from(badge_span(user))),
                Cell::from(Span::styled(user.status.as_str(), status_style)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(app.avatar_size.width()),
        Constraint::Percentage(22),
        Constraint::Percentage(30),
        Constraint::Percentage(15),
        Constraint::Length(14),
        Constraint::Length(8),
    ];
    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["", "Name", "Email", "Company", "Role", "Status"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .block(Block::default().borders(Borders::ALL).title("Users"));

    let mut state = TableState::default().with_selected(Some(app.selected));
    frame.render_stateful_widget(table, area, &mut state);
}

fn draw_form<S: KeyValueStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let Some(form) = app.console().form() else {
        return;
    };
    let title = if form.is_edit() { "Edit user" } else { "New user" };

    let mut lines = Vec::new();
    for field in FormField::ALL {
        let value = match field {
            FormField::Name => form.data.name.clone(),
            FormField::Email => form.data.email.clone(),
            FormField::Company => form.data.company.clone(),
            FormField::Role => format!("< {} >", form.data.role),
            FormField::Status => format!("< {} >", form.data.status),
        };
        let focused = app.form_focus == field;
        let style = if focused {
            Style::default().fg(ACCENT)
        } else {
            Style::default()
        };
        let marker = if focused { ">" } else { " " };
        lines.push(Line::from(vec![
            Span::styled(format!("{} {:<8}", marker, field.label()), style),
            Span::raw(value),
        ]));
        if let Some(message) = app
            .form_errors
            .as_ref()
            .and_then(|e| e.for_field(field.key()))
        {
            lines.push(Line::styled(
                format!("  {}", message),
                Style::default().fg(Color::Red),
            ));
        }
    }
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        "Enter: Save | Esc: Cancel | Space: Change",
        Style::default().fg(Color::DarkGray),
    ));

    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(2);
    let rect = centered(area, 60, height);
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title)),
        rect,
    );
}

fn draw_confirm(frame: &mut Frame, user: &User, area: Rect) {
    let lines = vec![
        Line::raw(delete_confirmation_message(user)),
        Line::raw(""),
        Line::styled("y: Delete | n: Keep", Style::default().fg(Color::DarkGray)),
    ];
    let rect = centered(area, 56, 5);
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Confirm")
                .border_style(Style::default().fg(Color::Red)),
        ),
        rect,
    );
}

fn draw_dropdown<S: KeyValueStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let Some(user) = app.current_user() else {
        return;
    };
    let lines = vec![
        Line::raw(user.name.clone()),
        Line::styled(user.email.clone(), Style::default().fg(Color::DarkGray)),
        Line::from(badge_span(user)),
        Line::raw(""),
        Line::styled("l: Log out", Style::default().fg(Color::Red)),
    ];
    let width = 32.min(area.width);
    let rect = Rect {
        x: area.x + area.width - width,
        y: area.y,
        width,
        height: 7.min(area.height),
    };
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Account")),
        rect,
    );
}

fn draw_footer<S: KeyValueStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let hints = match app.screen() {
        Screen::Login => "Tab: Next field | Enter: Sign in | Esc: Quit",
        Screen::Dashboard => "1: Dashboard | 2: Users | u: Account | q: Quit",
        Screen::Users => "n: New | e: Edit | d: Delete | u: Account | q: Quit",
    };
    let location = app
        .router()
        .current()
        .map(|n| n.to_string())
        .unwrap_or_default();
    let footer = Paragraph::new(Line::from(vec![
        Span::raw(hints),
        Span::styled(format!("   {}", location), Style::default().fg(ACCENT)),
    ]))
    .style(Style::default().fg(Color::DarkGray))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
