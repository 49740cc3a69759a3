//! Open form rendering: header, grouped fields, action panel

use super::field_renderer::{draw_field, field_height, FieldView};
use crate::app::App;
use crate::engine::section_progress;
use crate::schema::{FormField, FormSchema};
use crate::state::{FormAction, FormSession};
use crate::ui::components::{render_action_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Height of the header block (borders + description + link)
const HEADER_HEIGHT: u16 = 4;
const SECTION_HEADER_HEIGHT: u16 = 1;

/// One row of the scrolling field list
enum Row<'a> {
    Section { title: &'a str, percent: Option<f64> },
    Field(&'a FormField),
}

impl Row<'_> {
    fn height(&self) -> u16 {
        match self {
            Row::Section { .. } => SECTION_HEADER_HEIGHT,
            Row::Field(field) => field_height(field),
        }
    }
}

/// Draw the open form with action sidebar
pub fn draw_form(frame: &mut Frame, area: Rect, app: &App) {
    let Some(session) = &app.session else {
        return;
    };

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(40),    // Form area
            Constraint::Length(20), // Action panel
        ])
        .split(area);

    let form_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Length(1), // Progress
            Constraint::Min(0),    // Fields
        ])
        .split(main_chunks[0]);

    draw_header(frame, form_chunks[0], session.controller.schema());
    draw_progress(frame, form_chunks[1], session);
    draw_fields(frame, form_chunks[2], session, app.config.show_help_text());
    draw_action_panel(frame, main_chunks[1], session);
}

fn draw_header(frame: &mut Frame, area: Rect, schema: &FormSchema) {
    let mut lines = vec![Line::from(Span::styled(
        schema.description.as_str(),
        Style::default().fg(Color::White),
    ))];
    if let Some(link) = &schema.reference_link {
        lines.push(Line::from(Span::styled(
            link.as_str(),
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED),
        )));
    }

    let block = Block::default()
        .title(format!(" {} ", schema.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_progress(frame: &mut Frame, area: Rect, session: &FormSession) {
    let percent = session.controller.progress();
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Green).bg(Color::Black))
        .ratio((percent / 100.0).clamp(0.0, 1.0))
        .label(format!("{percent:.0}% complete"));
    frame.render_widget(gauge, area);
}

fn build_rows<'a>(schema: &'a FormSchema, session: &FormSession) -> Vec<Row<'a>> {
    let values = &session.controller.state().values;
    let mut rows = Vec::new();
    for (index, (title, fields)) in schema.groups().into_iter().enumerate() {
        if let Some(title) = title {
            let percent = schema
                .sections
                .as_ref()
                .and_then(|sections| sections.get(index))
                .map(|section| section_progress(schema, section, values));
            rows.push(Row::Section { title, percent });
        }
        rows.extend(fields.into_iter().map(Row::Field));
    }
    rows
}

/// Scroll offset keeping the active field fully visible
fn scroll_offset(rows: &[Row], session: &FormSession, visible: u16) -> u16 {
    let mut top = 0u16;
    for row in rows {
        let height = row.height();
        if let Row::Field(field) = row {
            if session.is_active(&field.id) {
                let bottom = top + height;
                return bottom.saturating_sub(visible);
            }
        }
        top += height;
    }
    // Actions row focused: keep the top of the form in view
    0
}

fn draw_fields(frame: &mut Frame, area: Rect, session: &FormSession, show_help: bool) {
    let schema = session.controller.schema();
    let rows = build_rows(schema, session);
    let offset = scroll_offset(&rows, session, area.height);

    let mut top = 0u16;
    for row in &rows {
        let height = row.height();
        let row_top = top;
        top += height;
        if row_top < offset {
            continue;
        }
        let y = row_top - offset;
        if y + height > area.height {
            break;
        }
        let row_area = Rect {
            x: area.x,
            y: area.y + y,
            width: area.width,
            height,
        };

        match row {
            Row::Section { title, percent } => {
                let mut spans = vec![Span::styled(
                    format!("── {title} "),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )];
                if let Some(percent) = percent {
                    spans.push(Span::styled(
                        format!("({percent:.0}%)"),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                frame.render_widget(Paragraph::new(Line::from(spans)), row_area);
            }
            Row::Field(field) => {
                let view = FieldView {
                    field: *field,
                    value: session.controller.value(&field.id),
                    error: session.controller.visible_error(&field.id),
                    is_active: session.is_active(&field.id),
                    show_help,
                };
                draw_field(frame, row_area, &view);
            }
        }
    }
}

/// Draw the action panel sidebar
fn draw_action_panel(frame: &mut Frame, area: Rect, session: &FormSession) {
    let is_focused = session.is_actions_row_active();
    let border_color = if is_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .title(" Actions ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let mut constraints: Vec<Constraint> = FormAction::ALL
        .iter()
        .map(|_| Constraint::Length(BUTTON_HEIGHT))
        .collect();
    constraints.push(Constraint::Min(0));
    let button_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner_area);

    // Reset has nothing to undo on an unedited form
    let is_dirty = session.controller.is_dirty();
    for (idx, action) in FormAction::ALL.iter().enumerate() {
        render_action_button(
            frame,
            button_chunks[idx],
            *action,
            is_focused && session.selected_action() == *action,
            *action != FormAction::Reset || is_dirty,
        );
    }

    let errors = session.controller.error_count();
    if errors > 0 {
        let last = button_chunks[FormAction::ALL.len()];
        let note = Paragraph::new(format!("{errors} field(s) need attention"))
            .style(Style::default().fg(Color::Red));
        frame.render_widget(note, last);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::builtin_registry;
    use crate::state::FormController;

    fn session(id: &str) -> FormSession {
        let registry = builtin_registry().unwrap();
        FormSession::new(FormController::new(registry.get(id).unwrap()))
    }

    #[test]
    fn test_rows_include_section_headers() {
        let s = session("w2");
        let rows = build_rows(s.controller.schema(), &s);
        assert!(matches!(rows[0], Row::Section { title: "Employer and Employee", .. }));
        let fields = rows.iter().filter(|r| matches!(r, Row::Field(_))).count();
        assert_eq!(fields, s.position_count() - 1);
    }

    #[test]
    fn test_flat_schema_has_no_headers() {
        let s = session("1099-nec");
        let rows = build_rows(s.controller.schema(), &s);
        assert!(rows.iter().all(|r| matches!(r, Row::Field(_))));
    }

    #[test]
    fn test_scroll_keeps_active_field_visible() {
        let mut s = session("1099-nec");
        let rows = build_rows(s.controller.schema(), &s);
        assert_eq!(scroll_offset(&rows, &s, 10), 0);

        s.focus(5);
        let rows = build_rows(s.controller.schema(), &s);
        let offset = scroll_offset(&rows, &s, 10);
        let top: u16 = rows[..5].iter().map(Row::height).sum();
        let bottom = top + rows[5].height();
        assert!(offset <= top);
        assert!(bottom - offset <= 10);
    }
}
