use crate::SearchError;
use serde::{Deserialize, Serialize};

/// Kind of a single grid cell
/// Codes match the driver's snapshot encoding: 0=open, 1=wall, 2=start, 3=end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    Open,
    Wall,
    Start,
    End,
}

impl CellKind {
    /// Numeric code used in grid snapshots
    pub fn code(self) -> u8 {
        match self {
            CellKind::Open => 0,
            CellKind::Wall => 1,
            CellKind::Start => 2,
            CellKind::End => 3,
        }
    }

    /// Decode a snapshot code
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(CellKind::Open),
            1 => Some(CellKind::Wall),
            2 => Some(CellKind::Start),
            3 => Some(CellKind::End),
            _ => None,
        }
    }

    /// Whether a search may step into a cell of this kind
    pub fn is_traversable(self) -> bool {
        matches!(self, CellKind::Open | CellKind::End)
    }
}

/// Square grid stored row-major: index = row * size + col
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<CellKind>,
    /// Revision number - incremented whenever grid cells change
    revision: u64,
}

impl Grid {
    /// Create a new grid with every cell open
    pub fn new(size: usize) -> Self {
        Grid {
            size,
            cells: vec![CellKind::Open; size * size],
            revision: 0,
        }
    }

    /// Create a grid from already decoded cell kinds
    pub fn from_kinds(size: usize, cells: Vec<CellKind>) -> Result<Self, SearchError> {
        let expected = size * size;
        if cells.len() != expected {
            return Err(SearchError::InvalidDimensions {
                size,
                expected,
                actual: cells.len(),
            });
        }
        Ok(Grid {
            size,
            cells,
            revision: 0,
        })
    }

    /// Create a grid from a driver snapshot of cell codes
    pub fn from_codes(size: usize, codes: &[u8]) -> Result<Self, SearchError> {
        let cells = codes
            .iter()
            .enumerate()
            .map(|(index, &code)| {
                CellKind::from_code(code).ok_or(SearchError::InvalidCellCode { index, code })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_kinds(size, cells)
    }

    /// Encode the grid back into snapshot codes
    pub fn to_codes(&self) -> Vec<u8> {
        self.cells.iter().map(|kind| kind.code()).collect()
    }

    /// Side length of the grid
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of cells (size²)
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, cell: usize) -> bool {
        cell < self.cells.len()
    }

    fn check(&self, cell: usize) -> Result<(), SearchError> {
        if self.contains(cell) {
            Ok(())
        } else {
            Err(SearchError::InvalidIndex {
                index: cell,
                len: self.cells.len(),
            })
        }
    }

    /// Kind of the cell at `cell`
    pub fn kind_of(&self, cell: usize) -> Result<CellKind, SearchError> {
        self.check(cell)?;
        Ok(self.cells[cell])
    }

    /// Convert (row, col) to a cell index
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    /// Convert a cell index to (row, col)
    pub fn coords(&self, cell: usize) -> (usize, usize) {
        (cell / self.size, cell % self.size)
    }

    /// Traversable neighbors in fixed order: up, left, right, down.
    ///
    /// Left/right never wrap across a row boundary. Only Open and End cells
    /// are returned, so walls and the start cell are never entered.
    pub fn neighbors(&self, cell: usize) -> Result<Vec<usize>, SearchError> {
        self.check(cell)?;
        Ok(self.neighbors_unchecked(cell))
    }

    /// `neighbors` for an index already known to be in bounds
    pub(crate) fn neighbors_unchecked(&self, cell: usize) -> Vec<usize> {
        let r = self.size;
        let mut candidates = Vec::with_capacity(4);

        // Up
        if cell >= r {
            candidates.push(cell - r);
        }
        // Left
        if cell % r != 0 {
            candidates.push(cell - 1);
        }
        // Right
        if cell % r != r - 1 {
            candidates.push(cell + 1);
        }
        // Down
        if cell + r < self.cells.len() {
            candidates.push(cell + r);
        }

        candidates.retain(|&n| self.cells[n].is_traversable());
        candidates
    }

    /// Index of the first cell of the given kind
    pub fn find(&self, kind: CellKind) -> Option<usize> {
        self.cells.iter().position(|&k| k == kind)
    }

    /// Iterate over (index, kind) pairs
    pub fn iter(&self) -> impl Iterator<Item = (usize, CellKind)> + '_ {
        self.cells.iter().copied().enumerate()
    }

    /// Get current grid revision number
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Set a cell kind, bumping the revision when it actually changes
    pub fn set_kind(&mut self, cell: usize, kind: CellKind) -> Result<(), SearchError> {
        self.check(cell)?;
        if self.cells[cell] != kind {
            self.cells[cell] = kind;
            self.revision += 1;
        }
        Ok(())
    }

    /// Turn an open cell into a wall. Start and end are never overwritten.
    /// Returns true if the grid changed.
    pub fn paint_wall(&mut self, cell: usize) -> Result<bool, SearchError> {
        if self.kind_of(cell)? != CellKind::Open {
            return Ok(false);
        }
        self.set_kind(cell, CellKind::Wall)?;
        Ok(true)
    }

    /// Turn a wall back into an open cell. Returns true if the grid changed.
    pub fn erase(&mut self, cell: usize) -> Result<bool, SearchError> {
        if self.kind_of(cell)? != CellKind::Wall {
            return Ok(false);
        }
        self.set_kind(cell, CellKind::Open)?;
        Ok(true)
    }

    /// Move the start cell. Refused when the target is the end cell.
    pub fn move_start(&mut self, cell: usize) -> Result<bool, SearchError> {
        self.move_special(cell, CellKind::Start, CellKind::End)
    }

    /// Move the end cell. Refused when the target is the start cell.
    pub fn move_end(&mut self, cell: usize) -> Result<bool, SearchError> {
        self.move_special(cell, CellKind::End, CellKind::Start)
    }

    fn move_special(
        &mut self,
        cell: usize,
        kind: CellKind,
        other: CellKind,
    ) -> Result<bool, SearchError> {
        let target = self.kind_of(cell)?;
        if target == kind || target == other {
            return Ok(false);
        }
        if let Some(previous) = self.find(kind) {
            self.set_kind(previous, CellKind::Open)?;
        }
        self.set_kind(cell, kind)?;
        Ok(true)
    }

    /// Reset every wall to open, keeping start and end in place
    pub fn clear_walls(&mut self) -> usize {
        let mut cleared = 0;
        for kind in self.cells.iter_mut().filter(|k| **k == CellKind::Wall) {
            *kind = CellKind::Open;
            cleared += 1;
        }
        if cleared > 0 {
            self.revision += 1;
        }
        cleared
    }

    /// Number of wall cells
    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|&&k| k == CellKind::Wall).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbor_order_center() {
        let grid = Grid::new(3);
        // Center of a 3x3 grid: up, left, right, down
        assert_eq!(grid.neighbors(4).unwrap(), vec![1, 3, 5, 7]);
    }

    #[test]
    fn test_neighbors_do_not_wrap_rows() {
        let grid = Grid::new(4);
        // Cell 4 is the first column of row 1: no left neighbor (3 is on row 0)
        assert_eq!(grid.neighbors(4).unwrap(), vec![0, 5, 8]);
        // Cell 7 is the last column of row 1: no right neighbor (8 is on row 2)
        assert_eq!(grid.neighbors(7).unwrap(), vec![3, 6, 11]);
    }

    #[test]
    fn test_neighbors_skip_walls_and_start() {
        let mut grid = Grid::new(3);
        grid.set_kind(1, CellKind::Wall).unwrap();
        grid.set_kind(3, CellKind::Start).unwrap();
        grid.set_kind(5, CellKind::End).unwrap();
        assert_eq!(grid.neighbors(4).unwrap(), vec![5, 7]);
    }

    #[test]
    fn test_out_of_bounds_queries_fail() {
        let grid = Grid::new(3);
        assert_eq!(
            grid.kind_of(9),
            Err(SearchError::InvalidIndex { index: 9, len: 9 })
        );
        assert!(grid.neighbors(42).is_err());
    }

    #[test]
    fn test_from_codes_rejects_bad_input() {
        assert_eq!(
            Grid::from_codes(2, &[0, 1, 2, 7]),
            Err(SearchError::InvalidCellCode { index: 3, code: 7 })
        );
        assert!(matches!(
            Grid::from_codes(3, &[0, 0, 0]),
            Err(SearchError::InvalidDimensions { expected: 9, actual: 3, .. })
        ));
        let grid = Grid::from_codes(2, &[2, 1, 0, 3]).unwrap();
        assert_eq!(grid.kind_of(0).unwrap(), CellKind::Start);
        assert_eq!(grid.to_codes(), vec![2, 1, 0, 3]);
    }

    #[test]
    fn test_editing_protects_special_cells() {
        let mut grid = Grid::new(3);
        grid.set_kind(0, CellKind::Start).unwrap();
        grid.set_kind(8, CellKind::End).unwrap();

        assert!(!grid.paint_wall(0).unwrap());
        assert!(grid.paint_wall(4).unwrap());
        assert!(!grid.paint_wall(4).unwrap());

        // Start cannot be dropped onto the end
        assert!(!grid.move_start(8).unwrap());
        // Moving onto a wall clears it
        assert!(grid.move_start(4).unwrap());
        assert_eq!(grid.kind_of(4).unwrap(), CellKind::Start);
        assert_eq!(grid.kind_of(0).unwrap(), CellKind::Open);
        assert_eq!(grid.find(CellKind::Start), Some(4));
    }

    #[test]
    fn test_revision_tracks_changes() {
        let mut grid = Grid::new(3);
        assert_eq!(grid.revision(), 0);
        grid.paint_wall(2).unwrap();
        grid.paint_wall(2).unwrap();
        assert_eq!(grid.revision(), 1);
        grid.paint_wall(5).unwrap();
        assert_eq!(grid.clear_walls(), 2);
        assert_eq!(grid.wall_count(), 0);
        assert_eq!(grid.revision(), 3);
    }
}
