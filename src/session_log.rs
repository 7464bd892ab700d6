use crate::{Algorithm, SearchStatus};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;

/// Action phase - whether the action is starting or finishing
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionPhase {
    Start,
    Finish,
}

/// User actions taken in the visualizer
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Paint a wall on a cell
    PaintWall { cell: usize },
    /// Erase a wall
    Erase { cell: usize },
    /// Drag the start cell
    MoveStart { cell: usize },
    /// Drag the end cell
    MoveEnd { cell: usize },
    /// Remove every wall
    ClearWalls { cleared: usize },
    /// Launch a search
    Run { algorithm: Algorithm, start: usize, end: usize },
    /// A search reached a terminal state
    RunFinished {
        algorithm: Algorithm,
        status: SearchStatus,
        steps: usize,
        path_len: Option<usize>,
    },
    /// Paste a text layout from the clipboard
    PasteLayout { size: usize },
    /// Copy the layout to the clipboard
    CopyLayout,
    SaveLayout { path: String },
    LoadLayout { path: String },
}

/// Logged action with timestamp and phase
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggedAction {
    /// Milliseconds since start
    pub timestamp_ms: u64,
    pub action: Action,
    pub phase: ActionPhase,
}

/// Session logger
pub struct SessionLog {
    start_time: Instant,
    actions: Vec<LoggedAction>,
}

impl Default for SessionLog {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionLog {
    pub fn new() -> Self {
        SessionLog {
            start_time: Instant::now(),
            actions: Vec::new(),
        }
    }

    /// Log an action with current timestamp and phase
    pub fn log(&mut self, action: Action, phase: ActionPhase) {
        let timestamp_ms = self.start_time.elapsed().as_millis() as u64;
        self.actions.push(LoggedAction {
            timestamp_ms,
            action,
            phase,
        });
    }

    pub fn log_start(&mut self, action: Action) {
        self.log(action, ActionPhase::Start);
    }

    pub fn log_finish(&mut self, action: Action) {
        self.log(action, ActionPhase::Finish);
    }

    /// Log an instantaneous action as a start/finish pair
    pub fn log_instant(&mut self, action: Action) {
        self.log_start(action.clone());
        self.log_finish(action);
    }

    pub fn actions(&self) -> &[LoggedAction] {
        &self.actions
    }

    /// Save log to JSON file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(&self.actions)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Vec<LoggedAction>, Box<dyn std::error::Error>> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Get summary statistics
    pub fn summary(&self) -> String {
        let mut walls = 0;
        let mut erased = 0;
        let mut moves = 0;
        let mut runs = 0;
        let mut found = 0;
        let mut exhausted = 0;

        // Only count finish events to get actual completed action counts
        for logged in self.actions.iter().filter(|a| a.phase == ActionPhase::Finish) {
            match &logged.action {
                Action::PaintWall { .. } => walls += 1,
                Action::Erase { .. } => erased += 1,
                Action::MoveStart { .. } | Action::MoveEnd { .. } => moves += 1,
                Action::Run { .. } => runs += 1,
                Action::RunFinished { status, .. } => match status {
                    SearchStatus::Found => found += 1,
                    SearchStatus::Exhausted => exhausted += 1,
                    SearchStatus::Searching => {}
                },
                _ => {}
            }
        }

        let duration = self.actions.last().map_or(0, |last| last.timestamp_ms);

        format!(
            "Session Duration: {}ms\n\
             Total Events: {}\n\
             Grid Edits: {} walls painted, {} erased, {} endpoint moves\n\
             Searches: {} started, {} found a path, {} exhausted",
            duration,
            self.actions.len(),
            walls,
            erased,
            moves,
            runs,
            found,
            exhausted
        )
    }
}
