use crate::Algorithm;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub visual: VisualConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GridConfig {
    /// Side length; the grid is always square
    #[serde(default = "default_size")]
    pub size: usize,
    #[serde(default = "default_start")]
    pub start: usize,
    #[serde(default = "default_end")]
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchConfig {
    /// Selector literal: "BFS", "A*" or "DFS"
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    /// Number of `step` calls per rendered frame
    #[serde(default = "default_steps_per_frame")]
    pub steps_per_frame: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VisualConfig {
    #[serde(default = "default_window_title")]
    pub window_title: String,
    /// Width and height of the square grid canvas in pixels
    #[serde(default = "default_canvas_size")]
    pub canvas_size: f32,
    #[serde(default = "default_background")]
    pub background: [u8; 3],
    #[serde(default = "default_open_color")]
    pub open: [u8; 3],
    #[serde(default = "default_wall_color")]
    pub wall: [u8; 3],
    #[serde(default = "default_start_color")]
    pub start: [u8; 3],
    #[serde(default = "default_end_color")]
    pub end: [u8; 3],
    #[serde(default = "default_queued_color")]
    pub queued: [u8; 3],
    #[serde(default = "default_checked_color")]
    pub checked: [u8; 3],
    #[serde(default = "default_path_color")]
    pub path: [u8; 3],
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when neither PATHVIZ_LOG nor RUST_LOG is set
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_enable_session_log")]
    pub enable_session_log: bool,
    #[serde(default = "default_session_log_path")]
    pub session_log_path: String,
    #[serde(default = "default_layout_path")]
    pub layout_path: String,
}

// Default values
fn default_size() -> usize { 50 }
fn default_start() -> usize { 0 }
fn default_end() -> usize { 2499 }
fn default_algorithm() -> String { "BFS".to_string() }
fn default_steps_per_frame() -> usize { 1 }
fn default_window_title() -> String { "Pathviz - Grid Search Visualizer".to_string() }
fn default_canvas_size() -> f32 { 750.0 }
fn default_background() -> [u8; 3] { [0, 0, 0] }
fn default_open_color() -> [u8; 3] { [255, 255, 255] }
fn default_wall_color() -> [u8; 3] { [20, 20, 20] }
fn default_start_color() -> [u8; 3] { [40, 80, 230] }
fn default_end_color() -> [u8; 3] { [220, 40, 40] }
fn default_queued_color() -> [u8; 3] { [229, 229, 229] }
fn default_checked_color() -> [u8; 3] { [191, 191, 191] }
fn default_path_color() -> [u8; 3] { [40, 170, 60] }
fn default_log_level() -> String { "info".to_string() }
fn default_enable_session_log() -> bool { true }
fn default_session_log_path() -> String { "session_log.json".to_string() }
fn default_layout_path() -> String { "layout.json".to_string() }

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            start: default_start(),
            end: default_end(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            algorithm: default_algorithm(),
            steps_per_frame: default_steps_per_frame(),
        }
    }
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            window_title: default_window_title(),
            canvas_size: default_canvas_size(),
            background: default_background(),
            open: default_open_color(),
            wall: default_wall_color(),
            start: default_start_color(),
            end: default_end_color(),
            queued: default_queued_color(),
            checked: default_checked_color(),
            path: default_path_color(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            enable_session_log: default_enable_session_log(),
            session_log_path: default_session_log_path(),
            layout_path: default_layout_path(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            search: SearchConfig::default(),
            visual: VisualConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from config.toml, or use defaults if it is missing or invalid
    pub fn load() -> Self {
        Self::load_from(CONFIG_PATH)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                    eprintln!("Using default configuration");
                    Config::default()
                }
            },
            Err(_) => Config::default(),
        }
    }

    /// Parse and normalize a TOML document
    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        let mut config: Config = toml::from_str(contents)?;
        config.normalize();
        Ok(config)
    }

    /// Keep values usable: grid at least 2x2, endpoints in bounds and distinct,
    /// a known algorithm and at least one step per frame
    fn normalize(&mut self) {
        self.grid.size = self.grid.size.max(2);
        let last = self.grid.size * self.grid.size - 1;
        self.grid.start = self.grid.start.min(last);
        self.grid.end = self.grid.end.min(last);
        if self.grid.start == self.grid.end {
            self.grid.start = 0;
            self.grid.end = last;
        }
        if self.search.algorithm.parse::<Algorithm>().is_err() {
            self.search.algorithm = default_algorithm();
        }
        self.search.steps_per_frame = self.search.steps_per_frame.max(1);
    }

    /// Algorithm preselected in the menu
    pub fn algorithm(&self) -> Algorithm {
        self.search.algorithm.parse().unwrap_or(Algorithm::Bfs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.grid.end, 2499);
        assert_eq!(config.algorithm(), Algorithm::Bfs);
    }

    #[test]
    fn test_partial_document() {
        let config = Config::parse(
            r#"
            [grid]
            size = 10

            [search]
            algorithm = "A*"
            steps_per_frame = 4
            "#,
        )
        .unwrap();
        // End is clamped into the smaller grid
        assert_eq!(config.grid.end, 99);
        assert_eq!(config.algorithm(), Algorithm::AStar);
        assert_eq!(config.search.steps_per_frame, 4);
        assert_eq!(config.visual.canvas_size, 750.0);
    }

    #[test]
    fn test_invalid_values_are_normalized() {
        let config = Config::parse(
            r#"
            [grid]
            size = 3
            start = 20
            end = 30

            [search]
            algorithm = "Dijkstra"
            steps_per_frame = 0
            "#,
        )
        .unwrap();
        assert_eq!((config.grid.start, config.grid.end), (0, 8));
        assert_eq!(config.search.algorithm, "BFS");
        assert_eq!(config.search.steps_per_frame, 1);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let config = Config::load_from("/nonexistent/pathviz/config.toml");
        assert_eq!(config, Config::default());
    }
}
