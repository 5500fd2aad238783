pub mod sidebar;
pub mod status_bar;
pub mod viewport;

use ratatui::layout::{Constraint, Layout};
use ratatui::Frame;

use crate::app::App;

pub fn render(app: &App, frame: &mut Frame) {
    let [main, footer] = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)])
        .areas(frame.area());
    let [side, canvas] = Layout::horizontal([
        Constraint::Length(app.config.viewer.sidebar_width),
        Constraint::Fill(1),
    ])
    .areas(main);

    sidebar::render(app, frame, side);
    viewport::render(app, frame, canvas);
    status_bar::render(app, frame, footer);
}
