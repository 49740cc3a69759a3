//! Layout components (sidebar, status bar)

use super::components::{render_category_button, BUTTON_HEIGHT};
use crate::app::App;
use crate::engine::section_progress;
use crate::platform::Shortcut;
use crate::schema::FormCategory;
use crate::state::{FormSession, StatusKind, View};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Create the main layout with sidebar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(20), // Sidebar
            Constraint::Min(0),     // Main content
        ])
        .split(area);

    // Reserve bottom line for status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(chunks[1]);

    let sidebar_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Sidebar content
            Constraint::Length(1), // Status bar continuation
        ])
        .split(chunks[0]);

    (sidebar_chunks[0], main_chunks[0])
}

/// Draw the sidebar: category tabs in the catalog, sections in a form
pub fn draw_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    match (&app.state.current_view, &app.session) {
        (View::Form, Some(session)) => draw_section_list(frame, area, session),
        _ => draw_category_buttons(frame, area, app),
    }
}

fn draw_category_buttons(frame: &mut Frame, area: Rect, app: &App) {
    let mut constraints = vec![Constraint::Min(0)]; // Top padding (flex)
    constraints.extend(FormCategory::ALL.iter().map(|_| Constraint::Length(BUTTON_HEIGHT)));
    constraints.push(Constraint::Min(0)); // Bottom padding (flex)

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let current = app.state.category();
    for (idx, category) in FormCategory::ALL.iter().enumerate() {
        let forms = app.registry.by_category(*category);
        let has_drafts = forms.iter().any(|schema| app.has_draft(&schema.id));
        render_category_button(
            frame,
            chunks[idx + 1],
            *category,
            forms.len(),
            has_drafts,
            *category == current,
        );
    }
}

fn draw_section_list(frame: &mut Frame, area: Rect, session: &FormSession) {
    let schema = session.controller.schema();
    let values = &session.controller.state().values;
    let active_id = session.active_field().map(|f| f.id.as_str());

    let lines: Vec<Line> = match &schema.sections {
        Some(sections) => sections
            .iter()
            .map(|section| {
                let percent = section_progress(schema, section, values);
                let is_current =
                    active_id.is_some_and(|id| section.field_ids.iter().any(|f| f == id));
                let style = if is_current {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                let marker = if is_current { "▸" } else { " " };
                Line::from(vec![
                    Span::styled(
                        format!("{marker} {percent:>3.0}% "),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(section.title.as_str(), style),
                ])
            })
            .collect(),
        None => vec![Line::from(Span::styled(
            format!("{} fields", schema.fields.len()),
            Style::default().fg(Color::DarkGray),
        ))],
    };

    let block = Block::default()
        .title(" Sections ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    // Build status bar content
    let mut spans = vec![Span::raw(" ")];

    // View-specific hints
    let hints = get_view_hints(&app.state.current_view);
    spans.push(Span::styled(hints, Style::default().fg(Color::Gray)));

    if let Some(message) = &app.state.status_message {
        let color = match message.kind {
            StatusKind::Info => Color::White,
            StatusKind::Success => Color::Green,
            StatusKind::Error => Color::Red,
        };
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            message.text.as_str(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
    }

    let quit_hint = " ^C:quit ";

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    // Render quit hint on the right
    let quit_area = Rect {
        x: area.width.saturating_sub(quit_hint.len() as u16),
        y: area.height.saturating_sub(1),
        width: quit_hint.len() as u16,
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current view
fn get_view_hints(view: &View) -> String {
    match view {
        View::Catalog => "j/k:nav  h/l:category  1-4:jump  Enter:open  q:quit".to_string(),
        View::Form => format!(
            "Tab:next  ←/→:choose  {}:save  {}:submit  Esc:back",
            Shortcut::SAVE,
            Shortcut::SUBMIT
        ),
    }
}
