use crate::simulation::engine::ReplayEngine;

pub enum SortMode {
    Rate,
    Schedule,
}

pub struct App {
    pub engine: ReplayEngine,
    pub running: bool,
    pub sort_mode: SortMode,
}

impl App {
    pub fn new(engine: ReplayEngine) -> Self {
        Self {
            engine,
            running: true,
            sort_mode: SortMode::Rate,
        }
    }

    pub fn toggle_sort(&mut self) {
        self.sort_mode = match self.sort_mode {
            SortMode::Rate => SortMode::Schedule,
            SortMode::Schedule => SortMode::Rate,
        };
    }
}

impl Drop for App {
    fn drop(&mut self) {
        ratatui::restore();
    }
}
