use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, LevelState};
use crate::catalog::MapInfo;

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let theme = &app.config.theme;
    let map = app.current_map();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border))
        .title(Line::styled(
            format!(" {} ", map.name),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let level_rows = map.levels.len() as u16 + 2;
    let [info_area, levels_area, keys_area] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(level_rows),
        Constraint::Length(6),
    ])
    .areas(inner);

    let info = Paragraph::new(info_lines(app, map)).wrap(Wrap { trim: true });
    frame.render_widget(info, info_area);
    frame.render_widget(Paragraph::new(level_lines(app, map)), levels_area);
    frame.render_widget(Paragraph::new(key_lines(app)), keys_area);
}

fn info_lines(app: &App, map: &MapInfo) -> Vec<Line<'static>> {
    let dim = Style::default().fg(app.config.theme.dim);
    let mut lines = Vec::new();
    if !map.location.is_empty() {
        lines.push(Line::styled(map.location.clone(), dim));
    }
    lines.push(Line::styled(
        format!("released {}", map.released.format("%b %Y")),
        dim,
    ));
    if let Some(reworked) = map.reworked {
        lines.push(Line::styled(
            format!("reworked {}", reworked.format("%b %Y")),
            dim,
        ));
    }
    if !map.description.is_empty() {
        lines.push(Line::raw(""));
        lines.push(Line::raw(map.description.clone()));
    }
    lines
}

fn level_lines(app: &App, map: &MapInfo) -> Vec<Line<'static>> {
    let theme = &app.config.theme;
    let mut lines = vec![Line::styled(
        "Levels",
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
    )];

    for (i, &id) in map.levels.iter().enumerate() {
        let name = app
            .level(id)
            .map(|l| l.kind.label().to_string())
            .unwrap_or_else(|| format!("level {}", id));
        let (marker, style) = match app.level_state(id) {
            LevelState::Open => (
                "●",
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            ),
            LevelState::Available => ("○", Style::default().fg(Color::White)),
            LevelState::Disabled => ("○", Style::default().fg(theme.disabled)),
        };
        // Only 1-9 have a key.
        let key = if i < 9 {
            format!(" {} ", i + 1)
        } else {
            "   ".to_string()
        };
        lines.push(Line::from(vec![
            Span::styled(key, Style::default().fg(theme.border_focused)),
            Span::styled(format!("{} {}", marker, name), style),
        ]));
    }
    lines
}

fn key_lines(app: &App) -> Vec<Line<'static>> {
    let key = Style::default().fg(app.config.theme.border_focused);
    let desc = Style::default().fg(app.config.theme.dim);
    [
        ("1-9", "toggle level"),
        ("[ ]", "previous/next map"),
        ("tab", "focus pane"),
        ("x", "close pane"),
        ("s", "flip split side"),
        ("q", "quit"),
    ]
    .into_iter()
    .map(|(k, d)| {
        Line::from(vec![
            Span::styled(format!(" {:<4}", k), key),
            Span::styled(d, desc),
        ])
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, Level, LevelId, LevelKind};
    use crate::config::Config;
    use crate::ui::testing::buffer_lines;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    async fn draw(app: &App) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(32, 30)).unwrap();
        terminal
            .draw(|frame| render(app, frame, frame.area()))
            .unwrap();
        buffer_lines(terminal.backend().buffer())
    }

    #[tokio::test]
    async fn test_sidebar_lists_levels_with_state() {
        let mut catalog = Catalog::builtin();
        catalog.levels.push(Level {
            id: LevelId(50),
            kind: LevelKind::ThirdFloor,
            blueprint: "chalet/3.jpg".to_string(),
        });
        catalog.maps[0].levels.push(LevelId(50));
        let app = App::new(catalog, Config::default(), None).await.unwrap();
        assert_eq!(app.level_state(LevelId(50)), LevelState::Disabled);

        let text = draw(&app).await.join("\n");
        assert!(text.contains("Chalet"));
        assert!(text.contains("reworked Sep 2020"));
        assert!(text.contains("1 ● Basement"));
        assert!(text.contains("5 ○ 3rd floor"));
    }

    #[tokio::test]
    async fn test_sidebar_without_rework() {
        let app = App::new(Catalog::builtin(), Config::default(), Some("bank"))
            .await
            .unwrap();
        let text = draw(&app).await.join("\n");
        assert!(text.contains("released Dec 2015"));
        assert!(!text.contains("reworked"));
    }
}
