use crate::{CellKind, Grid, SearchError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors from reading or writing grid layouts
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("layout is empty")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("layout has {rows} rows of {cols} cells, grid must be square")]
    NotSquare { rows: usize, cols: usize },
    #[error("unknown character '{ch}' at row {row}, column {col}")]
    UnknownChar { ch: char, row: usize, col: usize },
    #[error("layout has no {0} cell")]
    Missing(&'static str),
    #[error("layout has more than one {0} cell")]
    Duplicate(&'static str),
    #[error(transparent)]
    Grid(#[from] SearchError),
    #[error("failed to access layout file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse layout file: {0}")]
    Json(#[from] serde_json::Error),
}

/// A grid together with its start and end cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub grid: Grid,
    pub start: usize,
    pub end: usize,
}

impl Layout {
    /// Build a layout from a grid that carries exactly one start and one end
    pub fn from_grid(grid: Grid) -> Result<Self, LayoutError> {
        let start = single(&grid, CellKind::Start, "start")?;
        let end = single(&grid, CellKind::End, "end")?;
        Ok(Layout { grid, start, end })
    }
}

fn single(grid: &Grid, kind: CellKind, name: &'static str) -> Result<usize, LayoutError> {
    let mut found = grid.iter().filter(|&(_, k)| k == kind).map(|(i, _)| i);
    let first = found.next().ok_or(LayoutError::Missing(name))?;
    if found.next().is_some() {
        return Err(LayoutError::Duplicate(name));
    }
    Ok(first)
}

/// Parse a text layout
/// Format:
/// - s: start cell
/// - e: end cell
/// - ■ or #: wall
/// - □ or . or *: open cell (* marks a path in rendered output)
pub fn parse_layout(text: &str) -> Result<Layout, LayoutError> {
    let rows: Vec<&str> = text
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .collect();

    if rows.is_empty() {
        return Err(LayoutError::Empty);
    }

    let size = rows[0].chars().count();
    if rows.len() != size {
        return Err(LayoutError::NotSquare {
            rows: rows.len(),
            cols: size,
        });
    }

    let mut cells = Vec::with_capacity(size * size);
    for (row, line) in rows.iter().enumerate() {
        let found = line.chars().count();
        if found != size {
            return Err(LayoutError::Ragged {
                row,
                expected: size,
                found,
            });
        }

        for (col, ch) in line.chars().enumerate() {
            let kind = match ch {
                's' => CellKind::Start,
                'e' => CellKind::End,
                '■' | '#' => CellKind::Wall,
                '□' | '.' | '*' => CellKind::Open,
                _ => return Err(LayoutError::UnknownChar { ch, row, col }),
            };
            cells.push(kind);
        }
    }

    Layout::from_grid(Grid::from_kinds(size, cells)?)
}

/// Render a grid in the text layout format
pub fn to_text(grid: &Grid) -> String {
    to_text_with_path(grid, &[])
}

/// Render a grid, marking open cells on `path` with '*'
pub fn to_text_with_path(grid: &Grid, path: &[usize]) -> String {
    let mut result = String::new();

    for (cell, kind) in grid.iter() {
        let symbol = match kind {
            CellKind::Start => 's',
            CellKind::End => 'e',
            CellKind::Wall => '■',
            CellKind::Open if path.contains(&cell) => '*',
            CellKind::Open => '□',
        };
        result.push(symbol);
        if cell % grid.size() == grid.size() - 1 {
            result.push('\n');
        }
    }

    result
}

/// Layout saved to disk: dimensions, endpoints and wall cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutFile {
    pub size: usize,
    pub start: usize,
    pub end: usize,
    /// Wall cells (stored as cell indices)
    pub walls: Vec<usize>,
}

impl LayoutFile {
    pub fn from_layout(layout: &Layout) -> Self {
        let walls = layout
            .grid
            .iter()
            .filter(|&(_, kind)| kind == CellKind::Wall)
            .map(|(cell, _)| cell)
            .collect();

        LayoutFile {
            size: layout.grid.size(),
            start: layout.start,
            end: layout.end,
            walls,
        }
    }

    /// Rebuild the grid, validating every stored index
    pub fn restore(&self) -> Result<Layout, LayoutError> {
        let mut grid = Grid::new(self.size);
        for &cell in &self.walls {
            grid.set_kind(cell, CellKind::Wall)?;
        }
        grid.set_kind(self.start, CellKind::Start)?;
        grid.set_kind(self.end, CellKind::End)?;
        Layout::from_grid(grid)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), LayoutError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, LayoutError> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}
