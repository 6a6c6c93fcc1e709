//! Rendering routines for the reelshelf TUI.

use crate::app::{App, Focus};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap,
};
use reelshelf_core::catalog::DELETE_CONFIRM_PROMPT;
use reelshelf_core::render::NO_RESULTS_MESSAGE;
use reelshelf_core::{EditForm, FormField, ListView, NoticeKind, RowState, RowView};

// ── Theme colors ──────────────────────────────────────────────────────

const PRIMARY: Color = Color::Rgb(236, 91, 43); // #EC5B2B
const SECONDARY: Color = Color::Rgb(238, 121, 72); // #EE7948
const TEXT: Color = Color::Rgb(238, 238, 238); // #eeeeee
const TEXT_MUTED: Color = Color::Rgb(128, 128, 128); // #808080
const BORDER: Color = Color::Rgb(60, 60, 60); // #3c3c3c
const BORDER_ACTIVE: Color = Color::Rgb(238, 121, 72); // #EE7948
const YELLOW: Color = Color::Rgb(229, 192, 123); // #e5c07b
const RED: Color = Color::Rgb(255, 110, 110);
const MODAL_BG: Color = Color::Rgb(20, 20, 20);

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Draw the entire TUI frame.
pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Length(3), // search
            Constraint::Length(3), // add form
            Constraint::Min(0),    // list
            Constraint::Length(1), // status bar
        ])
        .split(area);

    draw_header(frame, app, root[0]);
    draw_search(frame, app, root[1]);
    draw_add_form(frame, app, root[2]);
    draw_list(frame, app, root[3]);
    draw_status_bar(frame, app, root[4]);

    // Dialogs stack in input priority order, so the one taking keys is on top.
    if let Some(form) = app.catalog.edit() {
        draw_edit_dialog(frame, form, area);
    }
    if app.catalog.pending_delete().is_some() {
        draw_confirm_dialog(frame, app, area);
    }
    if app.catalog.current_notice().is_some() {
        draw_notice(frame, app, area);
    }
}

fn draw_header(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let count = app.catalog.movies().len();
    let line = Line::from(vec![
        Span::styled(
            " reelshelf",
            Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" v{VERSION}"), Style::default().fg(TEXT_MUTED)),
        Span::styled("  endpoint ", Style::default().fg(TEXT_MUTED)),
        Span::styled(app.endpoint.as_str(), Style::default().fg(TEXT)),
        Span::styled("  movies ", Style::default().fg(TEXT_MUTED)),
        Span::styled(count.to_string(), Style::default().fg(TEXT)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn focus_block(title: &'static str, active: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(if active { BORDER_ACTIVE } else { BORDER }))
        .title(Span::styled(
            title,
            Style::default().fg(if active { SECONDARY } else { TEXT_MUTED }),
        ))
}

fn draw_search(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let active = app.focus == Focus::Search;
    let block = focus_block(" Search ", active);
    let inner = block.inner(area);
    let search = app.catalog.search();
    let line = if search.is_empty() && !active {
        Line::from(Span::styled(
            " Filter by title or genre...",
            Style::default().fg(TEXT_MUTED),
        ))
    } else {
        Line::from(Span::styled(format!(" {search}"), Style::default().fg(TEXT)))
    };
    frame.render_widget(block, area);
    frame.render_widget(Paragraph::new(line), inner);
    if active {
        frame.set_cursor_position((inner.x + 1 + search.chars().count() as u16, inner.y));
    }
}

fn draw_add_form(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let active_field = match app.focus {
        Focus::Add(field) => Some(field),
        _ => None,
    };
    let block = focus_block(" Add movie ", active_field.is_some());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(50),
            Constraint::Percentage(30),
            Constraint::Percentage(20),
        ])
        .split(inner);

    for (field, column) in FormField::ALL.into_iter().zip(columns.iter()) {
        let value = app.add_form.field(field);
        let focused = active_field == Some(field);
        let label_style = if focused {
            Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(TEXT_MUTED)
        };
        let label = format!(" {}: ", field.label());
        let cursor_x = column.x + (label.len() + value.chars().count()) as u16;
        let line = Line::from(vec![
            Span::styled(label, label_style),
            Span::styled(value, Style::default().fg(TEXT)),
        ]);
        frame.render_widget(Paragraph::new(line), *column);
        if focused {
            frame.set_cursor_position((cursor_x, column.y));
        }
    }
}

fn draw_list(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let active = app.focus == Focus::List;
    let block = focus_block(" Movies ", active);

    match app.catalog.view() {
        ListView::Failed(message) => {
            let paragraph = Paragraph::new(Line::from(Span::styled(
                format!(" {message}"),
                Style::default().fg(RED),
            )))
            .wrap(Wrap { trim: false })
            .block(block);
            frame.render_widget(paragraph, area);
        }
        ListView::Empty => {
            let message = if app.catalog.is_loaded() {
                NO_RESULTS_MESSAGE
            } else {
                "Loading..."
            };
            let paragraph = Paragraph::new(Line::from(Span::styled(
                format!(" {message}"),
                Style::default().fg(TEXT_MUTED),
            )))
            .block(block);
            frame.render_widget(paragraph, area);
        }
        ListView::Rows(rows) => {
            let items: Vec<ListItem<'_>> = rows.iter().map(row_item).collect();
            let list = List::new(items)
                .block(block)
                .highlight_symbol("> ")
                .highlight_style(if active {
                    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().add_modifier(Modifier::BOLD)
                });
            let mut state = ListState::default().with_selected(Some(app.selected));
            frame.render_stateful_widget(list, area, &mut state);
        }
    }
}

fn row_item(row: &RowView) -> ListItem<'static> {
    let (marker, marker_color) = match row.state {
        RowState::Displayed => ("", TEXT_MUTED),
        RowState::PendingUpdate => ("  [saving]", YELLOW),
        RowState::PendingDelete => ("  [deleting]", YELLOW),
        RowState::Stale => ("  [stale]", RED),
    };
    let mut spans = vec![
        Span::styled(
            row.title.clone(),
            Style::default().fg(TEXT).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" ({})", row.year), Style::default().fg(TEXT)),
        Span::styled(" - ", Style::default().fg(TEXT_MUTED)),
        Span::styled(row.genre.clone(), Style::default().fg(SECONDARY)),
    ];
    if !marker.is_empty() {
        spans.push(Span::styled(marker, Style::default().fg(marker_color)));
    }
    ListItem::new(Line::from(spans))
}

/// Draw the status bar at the bottom.
fn draw_status_bar(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let status_color = if app.in_flight > 0 { PRIMARY } else { TEXT_MUTED };

    let shortcuts = vec![
        Span::styled(" Ctrl+C", Style::default().fg(TEXT_MUTED)),
        Span::styled(" quit", Style::default().fg(BORDER)),
        Span::styled("  Tab", Style::default().fg(TEXT_MUTED)),
        Span::styled(" focus", Style::default().fg(BORDER)),
        Span::styled("  e/d", Style::default().fg(TEXT_MUTED)),
        Span::styled(" edit/delete", Style::default().fg(BORDER)),
        Span::styled("  r/F5", Style::default().fg(TEXT_MUTED)),
        Span::styled(" reload", Style::default().fg(BORDER)),
    ];

    let right_text = format!(" {} {} ", app.spinner(), app.status);
    let right_len = right_text.len() as u16;
    let left_area = Rect {
        width: area.width.saturating_sub(right_len),
        ..area
    };
    let right_area = Rect {
        x: area.x + area.width.saturating_sub(right_len),
        width: right_len,
        ..area
    };

    frame.render_widget(Paragraph::new(Line::from(shortcuts)), left_area);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            right_text,
            Style::default().fg(status_color),
        ))),
        right_area,
    );
}

fn draw_edit_dialog(frame: &mut Frame<'_>, form: &EditForm, area: Rect) {
    let dialog = centered(area, 60, 8);
    let block = modal_block(format!(" Edit movie {} ", form.id), PRIMARY);
    let inner = block.inner(dialog);

    let mut lines = Vec::new();
    for field in FormField::ALL {
        let focused = form.focus == field;
        let label_style = if focused {
            Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(TEXT_MUTED)
        };
        lines.push(Line::from(vec![
            Span::styled(format!(" {:<6} ", field.label()), label_style),
            Span::styled(form.field(field).to_string(), Style::default().fg(TEXT)),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " Tab next field  Enter save  Esc cancel",
        Style::default().fg(TEXT_MUTED),
    )));

    frame.render_widget(Clear, dialog);
    frame.render_widget(Paragraph::new(lines).block(block), dialog);

    let row = FormField::ALL
        .iter()
        .position(|field| *field == form.focus)
        .unwrap_or_default() as u16;
    let cursor_x = inner.x + 8 + form.field(form.focus).chars().count() as u16;
    frame.set_cursor_position((cursor_x, inner.y + row));
}

fn draw_confirm_dialog(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let dialog = centered(area, 50, 5);
    let target = app
        .catalog
        .pending_delete()
        .and_then(|id| app.catalog.find(id))
        .map(|movie| format!(" {} ({})", movie.title, movie.year))
        .unwrap_or_default();
    let lines = vec![
        Line::from(Span::styled(
            format!(" {DELETE_CONFIRM_PROMPT}"),
            Style::default().fg(TEXT).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(target, Style::default().fg(SECONDARY))),
        Line::from(Span::styled(
            " y confirm  n cancel",
            Style::default().fg(TEXT_MUTED),
        )),
    ];
    frame.render_widget(Clear, dialog);
    frame.render_widget(
        Paragraph::new(lines).block(modal_block(" Delete ".to_string(), YELLOW)),
        dialog,
    );
}

fn draw_notice(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(notice) = app.catalog.current_notice() else {
        return;
    };
    let color = match notice.kind {
        NoticeKind::Validation | NoticeKind::NotFound => YELLOW,
        NoticeKind::Request => RED,
    };
    let dialog = centered(area, 60, 7);
    let remaining = app.catalog.notice_count().saturating_sub(1);
    let footer = if remaining > 0 {
        format!(" Enter to dismiss (+{remaining} more)")
    } else {
        " Enter to dismiss".to_string()
    };
    let lines = vec![
        Line::from(Span::styled(
            format!(" {}", notice.message),
            Style::default().fg(TEXT),
        )),
        Line::from(""),
        Line::from(Span::styled(footer, Style::default().fg(TEXT_MUTED))),
    ];
    frame.render_widget(Clear, dialog);
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(modal_block(format!(" {} ", notice.title()), color)),
        dialog,
    );
}

fn modal_block(title: String, color: Color) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
        .title(Span::styled(
            title,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(MODAL_BG))
}

/// Rect of at most `width` x `height` centered in `area`.
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
