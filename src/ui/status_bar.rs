use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let theme = &app.config.theme;
    let layout = &app.layout;

    let left = format!(
        " {}  {}  {}/{} ",
        app.current_map().name,
        layout.signature,
        layout.panes.len(),
        layout.capacity
    );
    let (right, right_style) = match &app.status {
        Some(message) => (
            format!("{} ", message),
            Style::default().fg(theme.border_focused),
        ),
        None => (
            format!("split {:?} ", layout.split_side).to_lowercase(),
            Style::default().fg(theme.dim),
        ),
    };

    let padding = (area.width as usize)
        .saturating_sub(left.chars().count() + right.chars().count());

    let line = Line::from(vec![
        Span::styled(
            left,
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" ".repeat(padding)),
        Span::styled(right, right_style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::config::Config;
    use crate::keys::Action;
    use crate::ui::testing::buffer_lines;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    async fn line_for(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 1)).unwrap();
        terminal
            .draw(|frame| render(app, frame, frame.area()))
            .unwrap();
        buffer_lines(terminal.backend().buffer()).remove(0)
    }

    #[tokio::test]
    async fn test_shows_signature_and_count() {
        let mut app = App::new(Catalog::builtin(), Config::default(), None)
            .await
            .unwrap();
        app.handle_action(Action::ToggleLevel(1)).await.unwrap();
        let line = line_for(&app).await;
        assert!(line.contains("Chalet"));
        assert!(line.contains("3/4"));
        assert!(line.trim_end().ends_with("split left"));
    }

    #[tokio::test]
    async fn test_status_message_replaces_hint() {
        let mut app = App::new(Catalog::builtin(), Config::default(), None)
            .await
            .unwrap();
        app.status = Some("nothing to see".to_string());
        let line = line_for(&app).await;
        assert!(line.contains("nothing to see"));
        assert!(!line.contains("split left"));
    }
}
