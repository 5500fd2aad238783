use anyhow::{anyhow, bail, Result};
use tokio::sync::mpsc;
use tracing::info;

use crate::catalog::{Catalog, Level, LevelId, MapInfo};
use crate::config::Config;
use crate::event::{self, AppEvent};
use crate::keys::{self, Action};
use crate::service::{LayoutSnapshot, ServiceError, TilingHandle};
use crate::tiling::{PaneId, TilingEngine, Toggled, CAPACITY};
use crate::tui::Tui;
use crate::ui;

/// How a level of the current map shows up in the sidebar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LevelState {
    Open,
    Available,
    /// Not open, and every pane is taken.
    Disabled,
}

pub struct App {
    pub catalog: Catalog,
    pub config: Config,
    pub map_index: usize,
    pub tiling: TilingHandle<LevelId>,
    /// Last layout fetched from the tiling service; what gets drawn.
    pub layout: LayoutSnapshot<LevelId>,
    pub focused: Option<PaneId>,
    pub status: Option<String>,
    pub should_quit: bool,
}

impl App {
    /// Must be called inside a tokio runtime: the tiling service is spawned here.
    pub async fn new(catalog: Catalog, config: Config, initial_map: Option<&str>) -> Result<Self> {
        if catalog.maps.is_empty() {
            bail!("catalog has no maps");
        }
        let map_index = match initial_map {
            Some(slug) => catalog
                .maps
                .iter()
                .position(|m| m.slug == slug)
                .ok_or_else(|| anyhow!("no map named `{}`", slug))?,
            None => 0,
        };

        let engine = TilingEngine::with_split_side(config.viewer.split_side);
        let layout = LayoutSnapshot::from(&engine);
        let tiling = TilingHandle::spawn(engine);

        let mut app = Self {
            catalog,
            config,
            map_index,
            tiling,
            layout,
            focused: None,
            status: None,
            should_quit: false,
        };
        app.select_map(map_index).await?;
        Ok(app)
    }

    /// Connect the viewer to the terminal and run until the user quits.
    pub async fn run(catalog: Catalog, config: Config, initial_map: Option<&str>) -> Result<()> {
        let mut app = App::new(catalog, config, initial_map).await?;

        let mut tui = Tui::new()?;
        tui.enter()?;

        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        event::start_event_loop(event_tx);

        loop {
            tui.draw(|frame| ui::render(&app, frame))?;

            match event_rx.recv().await {
                Some(AppEvent::Key(key)) => {
                    if let Some(action) = keys::action_for(key) {
                        app.handle_action(action).await?;
                    }
                }
                Some(AppEvent::Resize(_, _)) => {}
                None => break,
            }

            if app.should_quit {
                break;
            }
        }

        tui.exit();
        let _ = app.tiling.shutdown().await;
        Ok(())
    }

    pub fn current_map(&self) -> &MapInfo {
        &self.catalog.maps[self.map_index]
    }

    pub fn level(&self, id: LevelId) -> Option<&Level> {
        self.catalog.level(id)
    }

    pub fn level_state(&self, id: LevelId) -> LevelState {
        if self.layout.panes.iter().any(|p| p.content == id) {
            LevelState::Open
        } else if self.layout.is_full() {
            LevelState::Disabled
        } else {
            LevelState::Available
        }
    }

    /// Switch maps and show the first levels of the new one.
    pub async fn select_map(&mut self, index: usize) -> Result<()> {
        self.map_index = index;
        let desired: Vec<LevelId> = self
            .current_map()
            .levels
            .iter()
            .take(CAPACITY)
            .copied()
            .collect();
        let report = self.tiling.sync(desired).await?;
        info!(
            map = %self.current_map().slug,
            closed = report.closed.len(),
            opened = report.opened.len(),
            "selected map"
        );
        self.status = None;
        self.refresh().await
    }

    pub async fn handle_action(&mut self, action: Action) -> Result<()> {
        let maps = self.catalog.maps.len();
        match action {
            Action::Quit => self.should_quit = true,
            Action::ToggleLevel(n) => self.toggle_level(n).await?,
            Action::NextMap => self.select_map((self.map_index + 1) % maps).await?,
            Action::PrevMap => self.select_map((self.map_index + maps - 1) % maps).await?,
            Action::FocusNext => self.cycle_focus(true),
            Action::FocusPrev => self.cycle_focus(false),
            Action::CloseFocused => {
                if let Some(id) = self.focused {
                    let result = self.tiling.close(id).await;
                    self.absorb(result)?;
                    self.refresh().await?;
                }
            }
            Action::FlipSplitSide => {
                let side = self.layout.split_side.flipped();
                self.tiling.set_split_side(side).await?;
                self.status = Some(format!("new panes now split the {:?} half", side).to_lowercase());
                self.refresh().await?;
            }
        }
        Ok(())
    }

    async fn toggle_level(&mut self, n: usize) -> Result<()> {
        let Some(&level) = self.current_map().levels.get(n) else {
            return Ok(());
        };
        if self.level_state(level) == LevelState::Disabled {
            self.status = Some(format!("{} levels open; close a pane first", CAPACITY));
            return Ok(());
        }

        let result = self.tiling.toggle(level).await;
        if let Ok(Toggled::Opened(id)) = result {
            self.focused = Some(id);
        }
        self.absorb(result.map(|_| ()))?;
        self.refresh().await
    }

    /// Caller-facing tiling errors become a status message; anything else is fatal.
    fn absorb(&mut self, result: Result<(), ServiceError>) -> Result<()> {
        match result {
            Ok(()) => {
                self.status = None;
                Ok(())
            }
            Err(ServiceError::Tiling(e)) if !e.is_internal() => {
                self.status = Some(e.to_string());
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn cycle_focus(&mut self, forward: bool) {
        let ids: Vec<PaneId> = self.layout.panes.iter().map(|p| p.pane_id).collect();
        if ids.is_empty() {
            self.focused = None;
            return;
        }
        let current = self.focused.and_then(|f| ids.iter().position(|&id| id == f));
        let next = match (current, forward) {
            (None, _) => 0,
            (Some(i), true) => (i + 1) % ids.len(),
            (Some(i), false) => (i + ids.len() - 1) % ids.len(),
        };
        self.focused = Some(ids[next]);
    }

    async fn refresh(&mut self) -> Result<()> {
        self.layout = self.tiling.snapshot().await?;
        let panes = &self.layout.panes;
        if !self.focused.is_some_and(|f| panes.iter().any(|p| p.pane_id == f)) {
            self.focused = panes.last().map(|p| p.pane_id);
        }
        Ok(())
    }
}
