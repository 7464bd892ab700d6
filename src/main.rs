use arboard::Clipboard;
use macroquad::prelude::*;
use pathviz::config::Config;
use pathviz::layout::{parse_layout, to_text, Layout, LayoutFile};
use pathviz::logging::init_tracing;
use pathviz::session_log::{Action, SessionLog};
use pathviz::{Algorithm, CellKind, CellStatus, Grid, Search, SearchStatus};
use tracing::{error, info, warn};

/// Height of the status bar above the canvas
const BAR_HEIGHT: f32 = 60.0;

/// What the current mouse drag is doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Drag {
    Idle,
    Paint,
    Erase,
    Start,
    End,
}

/// Visualization state
struct App {
    config: Config,
    layout: Layout,
    algorithm: Algorithm,
    search: Option<Search>,
    /// Latest reported status per cell
    overlay: Vec<Option<CellStatus>>,
    drag: Drag,
    log: SessionLog,
    message: String,
}

fn color([r, g, b]: [u8; 3]) -> Color {
    Color::from_rgba(r, g, b, 255)
}

impl App {
    fn new(config: Config) -> Self {
        let mut grid = Grid::new(config.grid.size);
        let (start, end) = (config.grid.start, config.grid.end);
        // Config normalization keeps both endpoints in bounds and distinct
        if let Err(e) = grid
            .set_kind(start, CellKind::Start)
            .and_then(|_| grid.set_kind(end, CellKind::End))
        {
            error!("invalid endpoints in configuration: {}", e);
        }

        let algorithm = config.algorithm();
        let overlay = vec![None; grid.len()];
        App {
            config,
            layout: Layout { grid, start, end },
            algorithm,
            search: None,
            overlay,
            drag: Drag::Idle,
            log: SessionLog::new(),
            message: String::new(),
        }
    }

    fn cell_size(&self) -> f32 {
        self.config.visual.canvas_size / self.layout.grid.size() as f32
    }

    fn is_running(&self) -> bool {
        self.search
            .as_ref()
            .is_some_and(|s| s.status() == SearchStatus::Searching)
    }

    fn cell_at(&self, mouse_x: f32, mouse_y: f32) -> Option<usize> {
        let y = mouse_y - BAR_HEIGHT;
        if mouse_x < 0.0 || y < 0.0 {
            return None;
        }
        let col = (mouse_x / self.cell_size()) as usize;
        let row = (y / self.cell_size()) as usize;
        let size = self.layout.grid.size();
        (row < size && col < size).then(|| self.layout.grid.index(row, col))
    }

    fn handle_mouse(&mut self) {
        if is_mouse_button_released(MouseButton::Left) || is_mouse_button_released(MouseButton::Right) {
            self.drag = Drag::Idle;
            return;
        }
        // Grid edits are locked while a search is running
        if self.is_running() {
            return;
        }

        let (mouse_x, mouse_y) = mouse_position();
        let Some(cell) = self.cell_at(mouse_x, mouse_y) else {
            return;
        };

        if is_mouse_button_pressed(MouseButton::Left) {
            self.drag = match self.layout.grid.kind_of(cell) {
                Ok(CellKind::Start) => Drag::Start,
                Ok(CellKind::End) => Drag::End,
                _ => Drag::Paint,
            };
        } else if is_mouse_button_pressed(MouseButton::Right) {
            self.drag = Drag::Erase;
        }

        let grid = &mut self.layout.grid;
        let (edit, action) = match self.drag {
            Drag::Idle => return,
            Drag::Paint => (grid.paint_wall(cell), Action::PaintWall { cell }),
            Drag::Erase => (grid.erase(cell), Action::Erase { cell }),
            Drag::Start => (grid.move_start(cell), Action::MoveStart { cell }),
            Drag::End => (grid.move_end(cell), Action::MoveEnd { cell }),
        };

        match edit {
            Ok(true) => {
                match action {
                    Action::MoveStart { .. } => self.layout.start = cell,
                    Action::MoveEnd { .. } => self.layout.end = cell,
                    _ => {}
                }
                self.clear_marks();
                self.log.log_instant(action);
            }
            Ok(false) => {}
            Err(e) => warn!("grid edit failed: {}", e),
        }
    }

    /// Forget the previous run's overlay, keeping walls
    fn clear_marks(&mut self) {
        self.search = None;
        self.overlay = vec![None; self.layout.grid.len()];
    }

    fn run(&mut self) {
        if self.is_running() {
            return;
        }
        self.clear_marks();

        let (start, end) = (self.layout.start, self.layout.end);
        match Search::new(&self.layout.grid, self.algorithm, start, end) {
            Ok(search) => {
                self.log.log_start(Action::Run {
                    algorithm: self.algorithm,
                    start,
                    end,
                });
                self.search = Some(search);
                self.message = format!("Running {}", self.algorithm);
            }
            Err(e) => {
                warn!("cannot start search: {}", e);
                self.message = e.to_string();
            }
        }
    }

    /// Advance the active search and fold its change reports into the overlay
    fn advance(&mut self) {
        let Some(search) = self.search.as_mut() else {
            return;
        };
        if search.status().is_terminal() {
            return;
        }

        for _ in 0..self.config.search.steps_per_frame {
            let outcome = search.step();
            for (cell, status) in &outcome.changes {
                self.overlay[cell] = Some(status);
            }
            if outcome.status.is_terminal() {
                break;
            }
        }

        let status = search.status();
        if status.is_terminal() {
            let stats = search.stats();
            let algorithm = search.algorithm();
            self.log.log_finish(Action::Run {
                algorithm,
                start: search.start(),
                end: search.end(),
            });
            self.log.log_instant(Action::RunFinished {
                algorithm,
                status,
                steps: stats.steps,
                path_len: stats.path_len,
            });
            self.message = match status {
                SearchStatus::Found => format!("Path found ({} cells)", stats.path_len.unwrap_or(0)),
                _ => "No path: every reachable cell was checked".to_string(),
            };
        }
    }

    fn clear_walls(&mut self) {
        if self.is_running() {
            return;
        }
        let cleared = self.layout.grid.clear_walls();
        self.clear_marks();
        self.log.log_instant(Action::ClearWalls { cleared });
    }

    fn copy_to_clipboard(&mut self) {
        let text = to_text(&self.layout.grid);
        match Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text)) {
            Ok(()) => {
                self.message = "Layout copied to clipboard".to_string();
                self.log.log_instant(Action::CopyLayout);
                // Keep clipboard alive for a moment to ensure clipboard managers can capture it
                std::thread::sleep(std::time::Duration::from_millis(100));
            }
            Err(e) => {
                warn!("failed to copy to clipboard: {}", e);
                self.message = format!("Clipboard error: {}", e);
            }
        }
    }

    fn paste_from_clipboard(&mut self) {
        if self.is_running() {
            return;
        }
        let text = match Clipboard::new().and_then(|mut clipboard| clipboard.get_text()) {
            Ok(text) => text,
            Err(e) => {
                warn!("failed to read clipboard: {}", e);
                self.message = format!("Clipboard error: {}", e);
                return;
            }
        };
        match parse_layout(&text) {
            Ok(layout) => {
                let size = layout.grid.size();
                self.replace_layout(layout);
                self.log.log_instant(Action::PasteLayout { size });
                self.message = format!("Pasted {}x{} layout", size, size);
            }
            Err(e) => {
                warn!("clipboard does not hold a layout: {}", e);
                self.message = format!("Paste failed: {}", e);
            }
        }
    }

    fn save_layout(&mut self) {
        let path = self.config.logging.layout_path.clone();
        match LayoutFile::from_layout(&self.layout).save_to_file(&path) {
            Ok(()) => {
                info!(path = %path, "layout saved");
                self.message = format!("Saved layout to {}", path);
                self.log.log_instant(Action::SaveLayout { path });
            }
            Err(e) => {
                warn!("failed to save layout: {}", e);
                self.message = format!("Save failed: {}", e);
            }
        }
    }

    fn load_layout(&mut self) {
        if self.is_running() {
            return;
        }
        let path = self.config.logging.layout_path.clone();
        match LayoutFile::load_from_file(&path).and_then(|file| file.restore()) {
            Ok(layout) => {
                self.replace_layout(layout);
                self.message = format!("Loaded layout from {}", path);
                self.log.log_instant(Action::LoadLayout { path });
            }
            Err(e) => {
                warn!("failed to load layout: {}", e);
                self.message = format!("Load failed: {}", e);
            }
        }
    }

    fn replace_layout(&mut self, layout: Layout) {
        self.layout = layout;
        self.clear_marks();
    }

    fn cell_color(&self, cell: usize, kind: CellKind) -> Color {
        let visual = &self.config.visual;
        match (kind, self.overlay[cell]) {
            (_, Some(CellStatus::OnPath)) => color(visual.path),
            (CellKind::Start, _) => color(visual.start),
            (CellKind::End, _) => color(visual.end),
            (CellKind::Wall, _) => color(visual.wall),
            (CellKind::Open, Some(CellStatus::Checked)) => color(visual.checked),
            (CellKind::Open, Some(CellStatus::Queued)) => color(visual.queued),
            (CellKind::Open, None) => color(visual.open),
        }
    }

    fn draw(&self) {
        clear_background(color(self.config.visual.background));

        let cell_size = self.cell_size();
        let size = self.layout.grid.size();
        for (cell, kind) in self.layout.grid.iter() {
            let px = (cell % size) as f32 * cell_size;
            let py = (cell / size) as f32 * cell_size + BAR_HEIGHT;
            draw_rectangle(px, py, cell_size - 1.0, cell_size - 1.0, self.cell_color(cell, kind));
        }

        let status = match &self.search {
            Some(search) => {
                let stats = search.stats();
                format!(
                    "{:?} | steps {} | checked {} | path {} | {:.1?}",
                    search.status(),
                    stats.steps,
                    stats.checked,
                    stats.path_len.map_or("-".to_string(), |n| n.to_string()),
                    stats.elapsed
                )
            }
            None => "Ready".to_string(),
        };

        draw_text(
            &format!("Algorithm: {} (Tab)   {}", self.algorithm, status),
            10.0,
            20.0,
            20.0,
            WHITE,
        );
        draw_text(
            "Space: run  R: reset  X: clear walls  C/V: copy/paste  S/L: save/load  Esc: quit",
            10.0,
            38.0,
            16.0,
            LIGHTGRAY,
        );
        draw_text(&self.message, 10.0, 54.0, 16.0, YELLOW);
    }
}

fn window_conf() -> Conf {
    let config = Config::load();
    let side = config.visual.canvas_size as i32;
    Conf {
        window_title: config.visual.window_title,
        window_width: side,
        window_height: side + BAR_HEIGHT as i32,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let config = Config::load();
    if let Err(e) = init_tracing(&config.logging.level) {
        eprintln!("Failed to initialize logging: {}", e);
    }
    info!(
        size = config.grid.size,
        algorithm = %config.algorithm(),
        "starting visualizer"
    );

    let mut app = App::new(config);

    loop {
        app.handle_mouse();

        if is_key_pressed(KeyCode::Tab) && !app.is_running() {
            app.algorithm = app.algorithm.next();
        }
        if is_key_pressed(KeyCode::Space) || is_key_pressed(KeyCode::Enter) {
            app.run();
        }
        if is_key_pressed(KeyCode::R) && !app.is_running() {
            app.clear_marks();
        }
        if is_key_pressed(KeyCode::X) {
            app.clear_walls();
        }
        if is_key_pressed(KeyCode::C) {
            app.copy_to_clipboard();
        }
        if is_key_pressed(KeyCode::V) {
            app.paste_from_clipboard();
        }
        if is_key_pressed(KeyCode::S) {
            app.save_layout();
        }
        if is_key_pressed(KeyCode::L) {
            app.load_layout();
        }
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        app.advance();
        app.draw();

        next_frame().await
    }

    info!("{}", app.log.summary().replace('\n', "; "));
    if app.config.logging.enable_session_log {
        let path = &app.config.logging.session_log_path;
        if let Err(e) = app.log.save_to_file(path) {
            error!("failed to write session log {}: {}", path, e);
        }
    }
}
