//! Field rendering: one control per field type

use crate::engine::FieldValue;
use crate::schema::FormField;
use crate::state::{display_value, Control};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows used by a single-line control (border + content + border)
pub const FIELD_HEIGHT: u16 = 3;
/// Rows used by a text area
pub const TEXTAREA_HEIGHT: u16 = 6;

/// What a control needs from the form to draw itself
#[derive(Debug, Clone, Copy)]
pub struct FieldView<'a> {
    pub field: &'a FormField,
    pub value: Option<&'a FieldValue>,
    /// Error as returned by the controller's touched-gated lookup
    pub error: Option<&'a str>,
    pub is_active: bool,
    pub show_help: bool,
}

pub fn field_height(field: &FormField) -> u16 {
    match Control::for_type(field.field_type) {
        Control::TextArea => TEXTAREA_HEIGHT,
        Control::TextInput
        | Control::NumericInput
        | Control::MaskedInput
        | Control::Checkbox
        | Control::Select => FIELD_HEIGHT,
    }
}

/// Draw a form field with its label, value, and error or help line
pub fn draw_field(frame: &mut Frame, area: Rect, view: &FieldView) {
    let field = view.field;
    let border_style = if view.error.is_some() {
        Style::default().fg(Color::Red)
    } else if view.is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let label = if field.required {
        format!(" {} * ", field.label)
    } else {
        format!(" {} ", field.label)
    };

    let mut block = Block::default()
        .title(label)
        .borders(Borders::ALL)
        .border_style(border_style);

    if let Some(bottom) = bottom_line(view) {
        block = block.title_bottom(bottom);
    }

    let content = Paragraph::new(content_lines(view)).wrap(Wrap { trim: false });
    frame.render_widget(content.block(block), area);
}

fn content_lines<'a>(view: &FieldView<'a>) -> Vec<Line<'a>> {
    let field = view.field;
    let value_style = if view.is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let cursor = if view.is_active {
        Span::styled("▌", Style::default().fg(Color::Cyan))
    } else {
        Span::raw("")
    };
    let shown = display_value(field, view.value);

    match Control::for_type(field.field_type) {
        Control::TextInput | Control::NumericInput | Control::MaskedInput => {
            if shown.is_empty() {
                let hint = field.placeholder.clone().unwrap_or_default();
                vec![Line::from(vec![
                    cursor,
                    Span::styled(hint, Style::default().fg(Color::DarkGray)),
                ])]
            } else {
                vec![Line::from(vec![Span::styled(shown, value_style), cursor])]
            }
        }
        Control::TextArea => {
            let mut lines: Vec<Line> = shown
                .split('\n')
                .map(|l| Line::from(Span::styled(l.to_string(), value_style)))
                .collect();
            if let Some(last) = lines.last_mut() {
                last.spans.push(cursor);
            }
            lines
        }
        Control::Checkbox => {
            let hint = if view.is_active { "  Space to toggle" } else { "" };
            vec![Line::from(vec![
                Span::styled(shown, value_style.add_modifier(Modifier::BOLD)),
                Span::styled(hint, Style::default().fg(Color::DarkGray)),
            ])]
        }
        Control::Select => {
            let options = field.options();
            let position = view
                .value
                .and_then(|v| options.iter().position(|o| o.value == v.as_text()));
            let label = if shown.is_empty() {
                Span::styled("(choose)", Style::default().fg(Color::DarkGray))
            } else {
                Span::styled(shown, value_style)
            };
            if view.is_active {
                let counter = match position {
                    Some(i) => format!("  {}/{}", i + 1, options.len()),
                    None => format!("  -/{}", options.len()),
                };
                vec![Line::from(vec![
                    Span::styled("◀ ", Style::default().fg(Color::Cyan)),
                    label,
                    Span::styled(" ▶", Style::default().fg(Color::Cyan)),
                    Span::styled(counter, Style::default().fg(Color::DarkGray)),
                ])]
            } else {
                vec![Line::from(label)]
            }
        }
    }
}

/// Error wins over help text; help text only when enabled
fn bottom_line<'a>(view: &FieldView<'a>) -> Option<Line<'a>> {
    if let Some(error) = view.error {
        return Some(Line::from(Span::styled(
            format!(" {error} "),
            Style::default().fg(Color::Red),
        )));
    }
    if !view.show_help {
        return None;
    }
    let field = view.field;
    let text = match (&field.help_text, &field.reference_link) {
        (Some(help), Some(link)) => format!(" {help} ({link}) "),
        (Some(help), None) => format!(" {help} "),
        (None, Some(link)) => format!(" {link} "),
        (None, None) => return None,
    };
    Some(Line::from(Span::styled(
        text,
        Style::default().fg(Color::DarkGray),
    )))
}
