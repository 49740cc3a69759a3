//! Catalog view: forms of the selected category and a short preview

use crate::app::App;
use crate::schema::FormSchema;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

/// Draw the form list with a preview of the selected form
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    draw_form_list(frame, chunks[0], app);
    draw_preview(frame, chunks[1], app);
}

fn draw_form_list(frame: &mut Frame, area: Rect, app: &App) {
    let forms = app.catalog_forms();
    let title = format!(" {} ({}) ", app.state.category().label(), forms.len());
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if forms.is_empty() {
        let content = Paragraph::new("No forms in this category.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(content, area);
        return;
    }

    let items: Vec<ListItem> = forms
        .iter()
        .enumerate()
        .map(|(idx, schema)| {
            let is_selected = idx == app.state.selected_index;
            let prefix = if is_selected { "▸ " } else { "  " };
            let style = if is_selected {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            let mut spans = vec![
                Span::styled(prefix, style),
                Span::styled(schema.title.clone(), style),
            ];
            if app.has_draft(&schema.id) {
                spans.push(Span::styled(" [draft]", Style::default().fg(Color::Yellow)));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn draw_preview(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Details ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let Some(schema) = app.selected_form() else {
        frame.render_widget(block, area);
        return;
    };

    let content = Paragraph::new(preview_lines(&schema))
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(content, area);
}

fn preview_lines(schema: &FormSchema) -> Vec<Line<'_>> {
    let required = schema.fields.iter().filter(|f| f.required).count();
    let mut lines = vec![
        Line::from(Span::styled(
            schema.title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(schema.description.as_str()),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} fields, {required} required", schema.fields.len()),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    if let Some(sections) = &schema.sections {
        for section in sections {
            lines.push(Line::from(Span::styled(
                format!("  • {}", section.title),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }
    if let Some(link) = &schema.reference_link {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            link.as_str(),
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED),
        )));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::builtin_registry;

    #[test]
    fn test_preview_counts_required_fields() {
        let registry = builtin_registry().unwrap();
        let w2 = registry.get("w2").unwrap();
        let text: String = preview_lines(&w2)
            .iter()
            .map(|line| line.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        let required = w2.fields.iter().filter(|f| f.required).count();
        assert!(text.contains(&format!("{required} required")));
        assert!(text.contains("Employer and Employee"));
    }
}
