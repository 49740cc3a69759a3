//! UI module for rendering the TUI

mod catalog;
mod components;
mod forms;
mod layout;

use crate::app::App;
use crate::state::View;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Draw the main layout with sidebar
    let (sidebar_area, main_area) = layout::create_layout(area);

    // Draw sidebar
    layout::draw_sidebar(frame, sidebar_area, app);

    // Draw main content based on current view
    match app.state.current_view {
        View::Catalog => catalog::draw(frame, main_area, app),
        View::Form => forms::draw_form(frame, main_area, app),
    }

    // Draw status bar
    layout::draw_status_bar(frame, app);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TuiConfig;
    use crate::schema::builtin_registry;
    use crate::sink::MockFormSink;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn app() -> App {
        App::new(
            builtin_registry().unwrap(),
            TuiConfig::default(),
            Box::new(MockFormSink::new()),
        )
    }

    #[test]
    fn test_catalog_screen() {
        let app = app();
        let text = screen(&app);
        assert!(text.contains("Income"));
        assert!(text.contains("1099-NEC"));
        assert!(text.contains("Enter:open"));
    }

    #[test]
    fn test_form_screen() {
        let mut app = app();
        app.open_selected_form();
        let text = screen(&app);
        assert!(text.contains("Submit"));
        assert!(text.contains("Save Draft"));
        assert!(text.contains("% complete"));
    }
}
