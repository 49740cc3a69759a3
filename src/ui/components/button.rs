//! Bordered buttons for the category tabs and the form action panel

use crate::schema::FormCategory;
use crate::state::FormAction;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

fn render_button(frame: &mut Frame, area: Rect, content: Line, accent: Color, is_selected: bool) {
    let border_style = if is_selected {
        Style::default().fg(accent)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(Paragraph::new(content).block(block), area);
}

fn label_style(accent: Color, is_selected: bool, is_enabled: bool) -> Style {
    if is_selected {
        Style::default().fg(accent).add_modifier(Modifier::BOLD)
    } else if !is_enabled {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    }
}

/// Category tab: jump key, label and the number of forms, right-aligned.
/// The count turns yellow while any form of the category has a draft.
pub fn render_category_button(
    frame: &mut Frame,
    area: Rect,
    category: FormCategory,
    form_count: usize,
    has_drafts: bool,
    is_selected: bool,
) {
    let key = FormCategory::ALL
        .iter()
        .position(|c| *c == category)
        .map_or(0, |i| i + 1);
    let left = format!(" {key} {}", category.label());
    let count = form_count.to_string();
    let inner = usize::from(area.width.saturating_sub(2));
    let gap = inner.saturating_sub(left.chars().count() + count.len()).max(1);

    let count_color = if has_drafts {
        Color::Yellow
    } else {
        Color::DarkGray
    };
    let line = Line::from(vec![
        Span::styled(left, label_style(Color::Cyan, is_selected, form_count > 0)),
        Span::raw(" ".repeat(gap)),
        Span::styled(count, Style::default().fg(count_color)),
    ]);
    render_button(frame, area, line, Color::Cyan, is_selected);
}

/// Colour an action button is tinted with when selected
fn action_accent(action: FormAction) -> Color {
    match action {
        FormAction::Submit => Color::Green,
        FormAction::Save => Color::Yellow,
        FormAction::Reset => Color::Magenta,
        FormAction::Cancel => Color::Gray,
    }
}

/// Action-panel button. A disabled action is dimmed but stays selectable.
pub fn render_action_button(
    frame: &mut Frame,
    area: Rect,
    action: FormAction,
    is_selected: bool,
    is_enabled: bool,
) {
    let accent = action_accent(action);
    let line = Line::from(Span::styled(
        format!(" {} ", action.label()),
        label_style(accent, is_selected, is_enabled),
    ));
    render_button(frame, area, line, accent, is_selected);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn draw(width: u16, render: impl FnOnce(&mut Frame, Rect)) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, BUTTON_HEIGHT)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render(frame, area);
            })
            .unwrap();
        terminal.backend().buffer().clone()
    }

    fn row(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol())
            .collect()
    }

    #[test]
    fn test_category_button_shows_key_and_count() {
        let buffer = draw(20, |frame, area| {
            render_category_button(frame, area, FormCategory::Authorization, 2, false, false)
        });
        assert_eq!(row(&buffer, 1), "│ 3 Authorization 2│");
    }

    #[test]
    fn test_draft_count_is_yellow() {
        let buffer = draw(20, |frame, area| {
            render_category_button(frame, area, FormCategory::Income, 3, true, true)
        });
        assert_eq!(buffer[(18, 1)].symbol(), "3");
        assert_eq!(buffer[(18, 1)].fg, Color::Yellow);
        assert_eq!(buffer[(0, 0)].fg, Color::Cyan);
    }

    #[test]
    fn test_selected_action_uses_its_accent() {
        let buffer = draw(16, |frame, area| {
            render_action_button(frame, area, FormAction::Submit, true, true)
        });
        assert!(row(&buffer, 1).contains("Submit"));
        assert_eq!(buffer[(2, 1)].fg, Color::Green);
    }

    #[test]
    fn test_disabled_action_is_dimmed() {
        let buffer = draw(16, |frame, area| {
            render_action_button(frame, area, FormAction::Reset, false, false)
        });
        assert_eq!(buffer[(2, 1)].fg, Color::DarkGray);
    }
}
