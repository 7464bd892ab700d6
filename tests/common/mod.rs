#![allow(dead_code)]

use pathviz::layout::{parse_layout, Layout};
use pathviz::{Algorithm, CellKind, CellStatus, Grid, Search, SearchStatus, StepOutcome};

/// Left column down, then along the bottom row
pub const MAZE_COLUMN: &str = "\
s.#...
..#.#.
.##.#.
....#.
.####.
.....e
";

/// Serpentine corridor
pub const MAZE_SERPENTINE: &str = "\
s......
######.
.......
.######
.......
######.
e......
";

/// Open field with a short wall between start and end
pub const OPEN_WITH_WALL: &str = "\
s.......
........
...#....
...#....
...#..e.
...#....
........
........
";

/// Start and end separated by a complete wall row
pub const SEALED: &str = "\
s..
###
..e
";

pub const SOLVABLE: [&str; 3] = [MAZE_COLUMN, MAZE_SERPENTINE, OPEN_WITH_WALL];

pub fn layout(text: &str) -> Layout {
    parse_layout(text).expect("fixture layout should parse")
}

pub fn start_search(layout: &Layout, algorithm: Algorithm) -> Search {
    Search::new(&layout.grid, algorithm, layout.start, layout.end).expect("fixture endpoints are valid")
}

/// Run a search to completion and return it with every step outcome
pub fn run(layout: &Layout, algorithm: Algorithm) -> (Search, Vec<StepOutcome>) {
    let mut search = start_search(layout, algorithm);
    let outcomes = search.run_to_end();
    (search, outcomes)
}

/// Path found by `algorithm`, end to start; panics if none was found
pub fn solve(layout: &Layout, algorithm: Algorithm) -> Vec<usize> {
    let (search, _) = run(layout, algorithm);
    assert_eq!(search.status(), SearchStatus::Found, "{} should find a path", algorithm);
    search.path().expect("found search has a path").to_vec()
}

/// Cells marked Checked, in step order, across all outcomes
pub fn checked_cells(outcomes: &[StepOutcome]) -> Vec<usize> {
    outcomes
        .iter()
        .flat_map(|o| o.changes.iter())
        .filter(|&(_, status)| status == CellStatus::Checked)
        .map(|(cell, _)| cell)
        .collect()
}

/// Assert `path` runs from end to start over adjacent, non-wall, distinct cells
pub fn assert_valid_path(layout: &Layout, path: &[usize]) {
    let grid = &layout.grid;
    assert_eq!(path.first(), Some(&layout.end), "path must begin at end");
    assert_eq!(path.last(), Some(&layout.start), "path must finish at start");

    for pair in path.windows(2) {
        let (r1, c1) = grid.coords(pair[0]);
        let (r2, c2) = grid.coords(pair[1]);
        assert_eq!(
            r1.abs_diff(r2) + c1.abs_diff(c2),
            1,
            "{} and {} are not adjacent",
            pair[0],
            pair[1]
        );
    }

    for &cell in path {
        assert_ne!(grid.kind_of(cell).unwrap(), CellKind::Wall, "path crosses wall {}", cell);
    }

    let mut unique = path.to_vec();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), path.len(), "path revisits a cell");
}

fn mirror(layout: &Layout, map: impl Fn(usize, usize, usize) -> (usize, usize)) -> Layout {
    let grid = &layout.grid;
    let size = grid.size();
    let mut kinds = vec![CellKind::Open; grid.len()];
    for (cell, kind) in grid.iter() {
        let (row, col) = grid.coords(cell);
        let (new_row, new_col) = map(size, row, col);
        kinds[new_row * size + new_col] = kind;
    }
    let flipped = Grid::from_kinds(size, kinds).expect("same dimensions");
    let cell = |c: usize| {
        let (row, col) = grid.coords(c);
        let (new_row, new_col) = map(size, row, col);
        new_row * size + new_col
    };
    Layout {
        start: cell(layout.start),
        end: cell(layout.end),
        grid: flipped,
    }
}

/// Flip layout horizontally (mirror left-right)
pub fn flip_horizontal(layout: &Layout) -> Layout {
    mirror(layout, |size, row, col| (row, size - 1 - col))
}

/// Flip layout vertically (mirror top-bottom)
pub fn flip_vertical(layout: &Layout) -> Layout {
    mirror(layout, |size, row, col| (size - 1 - row, col))
}

/// Flip layout both horizontally and vertically
pub fn flip_both(layout: &Layout) -> Layout {
    mirror(layout, |size, row, col| (size - 1 - row, size - 1 - col))
}

/// Original layout plus its three mirrored variants
pub fn variants(layout: &Layout) -> Vec<(&'static str, Layout)> {
    vec![
        ("original", layout.clone()),
        ("h_flip", flip_horizontal(layout)),
        ("v_flip", flip_vertical(layout)),
        ("hv_flip", flip_both(layout)),
    ]
}
