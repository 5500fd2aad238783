use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::catalog::LevelId;
use crate::tiling::{PlacedPane, SlotRect};

/// Map a unit-square rectangle onto `area`.
///
/// Edges are rounded independently, so neighbouring slots share their
/// boundary cell column/row and the projections of a full layout tile
/// `area` exactly, whatever its size.
pub fn project(rect: &SlotRect, area: Rect) -> Rect {
    let edge = |frac: f64, origin: u16, len: u16| origin + (frac * f64::from(len)).round() as u16;
    let x0 = edge(rect.x, area.x, area.width);
    let x1 = edge(rect.right(), area.x, area.width);
    let y0 = edge(rect.y, area.y, area.height);
    let y1 = edge(rect.bottom(), area.y, area.height);
    Rect::new(x0, y0, x1 - x0, y1 - y0)
}

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    if app.layout.panes.is_empty() {
        render_empty(app, frame, area);
        return;
    }
    for pane in &app.layout.panes {
        let is_focused = app.focused == Some(pane.pane_id);
        render_pane(app, pane, is_focused, frame, project(&pane.rect, area));
    }
}

fn render_pane(
    app: &App,
    pane: &PlacedPane<LevelId>,
    is_focused: bool,
    frame: &mut Frame,
    area: Rect,
) {
    let theme = &app.config.theme;
    let level = app.level(pane.content);
    let name = level
        .map(|l| l.kind.label().to_string())
        .unwrap_or_else(|| format!("level {}", pane.content));
    let title = if app.config.viewer.show_slot_labels {
        format!(" {} · {} ", name, pane.slot.short_name())
    } else {
        format!(" {} ", name)
    };

    let (border_style, title_style) = if is_focused {
        (
            Style::default().fg(theme.border_focused),
            Style::default()
                .fg(theme.border_focused)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (Style::default().fg(theme.border), Style::default().fg(theme.accent))
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style)
        .title(Line::styled(title, title_style));

    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let blueprint = level.map(|l| l.blueprint.as_str()).unwrap_or("no blueprint");
    let lines = vec![
        Line::raw(""),
        Line::styled(blueprint.to_string(), Style::default().fg(theme.dim)),
    ];
    let body = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(body, inner);
}

fn render_empty(app: &App, frame: &mut Frame, area: Rect) {
    let theme = &app.config.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let hint = Paragraph::new(vec![
        Line::raw(""),
        Line::styled("no levels open", Style::default().fg(theme.dim)),
        Line::styled("press 1-9 to open one", Style::default().fg(theme.dim)),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(hint, inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::config::Config;
    use crate::keys::Action;
    use crate::tiling::{Signature, Slot};
    use crate::ui::testing::buffer_lines;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn cells(r: Rect) -> u32 {
        u32::from(r.width) * u32::from(r.height)
    }

    fn assert_tiles(signature: Signature, area: Rect) {
        let rects: Vec<Rect> = signature
            .slots()
            .iter()
            .map(|s| project(&s.rect(), area))
            .collect();
        let total: u32 = rects.iter().copied().map(cells).sum();
        assert_eq!(total, cells(area), "{signature} on {area:?}");
        for (i, a) in rects.iter().enumerate() {
            assert_eq!(area.union(*a), area, "{signature}: {a:?} outside {area:?}");
            for b in &rects[i + 1..] {
                assert!(!a.intersects(*b), "{signature}: {a:?} overlaps {b:?}");
            }
        }
    }

    #[test]
    fn test_project_full() {
        let area = Rect::new(5, 2, 80, 24);
        assert_eq!(project(&Slot::Full.rect(), area), area);
    }

    #[test]
    fn test_project_halves_even() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(project(&Slot::HalfLeft.rect(), area), Rect::new(0, 0, 40, 24));
        assert_eq!(project(&Slot::HalfRight.rect(), area), Rect::new(40, 0, 40, 24));
        assert_eq!(
            project(&Slot::QuadBottomRight.rect(), area),
            Rect::new(40, 12, 40, 12)
        );
    }

    #[test]
    fn test_projection_tiles_odd_areas() {
        for area in [
            Rect::new(0, 0, 81, 25),
            Rect::new(28, 0, 93, 39),
            Rect::new(3, 7, 1, 1),
            Rect::new(0, 0, 7, 3),
        ] {
            for signature in Signature::ALL {
                if signature != Signature::Empty {
                    assert_tiles(signature, area);
                }
            }
        }
    }

    #[test]
    fn test_project_zero_area() {
        let r = project(&Slot::QuadTopLeft.rect(), Rect::new(4, 4, 0, 0));
        assert_eq!(r.width, 0);
        assert_eq!(r.height, 0);
    }

    #[tokio::test]
    async fn test_render_titles_and_slots() {
        let mut app = App::new(Catalog::builtin(), Config::default(), None)
            .await
            .unwrap();
        app.handle_action(Action::ToggleLevel(3)).await.unwrap();

        let mut terminal = Terminal::new(TestBackend::new(90, 30)).unwrap();
        terminal
            .draw(|frame| render(&app, frame, frame.area()))
            .unwrap();
        let lines = buffer_lines(terminal.backend().buffer());

        // Closing the roof leaves TL, BL and a full-height HR.
        assert!(lines[0].contains("Basement · TL"));
        assert!(lines[0].contains("1st floor · HR"));
        assert!(lines[15].contains("2nd floor · BL"));
        assert!(!lines.join("\n").contains("Roof"));
    }

    #[tokio::test]
    async fn test_render_empty_hint() {
        let mut app = App::new(Catalog::builtin(), Config::default(), None)
            .await
            .unwrap();
        for n in 0..4 {
            app.handle_action(Action::ToggleLevel(n)).await.unwrap();
        }
        assert!(app.layout.panes.is_empty());

        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        terminal
            .draw(|frame| render(&app, frame, frame.area()))
            .unwrap();
        let text = buffer_lines(terminal.backend().buffer()).join("\n");
        assert!(text.contains("no levels open"));
    }
}
