mod common;

use common::*;
use pathviz::{manhattan, Algorithm, CellKind, CellStatus, Grid, Search, SearchStatus};

#[test]
fn test_three_by_three_open_grid() {
    let grid = layout("s..\n...\n..e");
    let (search, outcomes) = run(&grid, Algorithm::Bfs);

    assert_eq!(search.path().unwrap(), &[8, 5, 2, 1, 0]);
    assert_eq!(outcomes.len(), 9);

    // FIFO order with up, left, right, down expansion
    let checked = checked_cells(&outcomes[..outcomes.len() - 1]);
    assert_eq!(checked, vec![0, 1, 3, 2, 4, 6, 5, 7]);

    let last = outcomes.last().unwrap();
    assert!(last.is_complete());
    let entries: Vec<_> = last.changes.iter().collect();
    assert_eq!(
        entries,
        vec![
            (8, CellStatus::OnPath),
            (5, CellStatus::OnPath),
            (2, CellStatus::OnPath),
            (1, CellStatus::OnPath),
            (0, CellStatus::OnPath),
        ]
    );
}

#[test]
fn test_already_queued_cells_are_not_requeued() {
    let grid = layout("s..\n...\n..e");
    let mut search = start_search(&grid, Algorithm::Bfs);

    search.step(); // checks 0, queues 1 and 3
    search.step(); // checks 1, queues 2 and 4
    let third = search.step(); // checks 3: 4 is already queued

    let entries: Vec<_> = third.changes.iter().collect();
    assert_eq!(entries, vec![(3, CellStatus::Checked), (6, CellStatus::Queued)]);
    assert_eq!(search.parent_of(4), Some(1));
}

#[test]
fn test_straight_corridor_matches_manhattan_distance() {
    let corridors = [
        "s....e\n######\n......\n......\n......\n......",
        "#s####\n#.####\n#.####\n#.####\n#e####\n######",
        "......\n.#..#.\n.s...e\n.#..#.\n......\n......",
    ];

    for text in corridors {
        let grid = layout(text);
        for (variant, flipped) in variants(&grid) {
            let path = solve(&flipped, Algorithm::Bfs);
            let distance = manhattan(flipped.grid.size(), flipped.start, flipped.end) as usize;
            assert_eq!(path.len() - 1, distance, "corridor {:?} [{}]", text, variant);
            assert_valid_path(&flipped, &path);
        }
    }
}

#[test]
fn test_wall_row_exhausts_search() {
    let grid = layout(SEALED);
    let mut search = start_search(&grid, Algorithm::Bfs);

    let mut steps = 0;
    while search.status() == SearchStatus::Searching {
        let outcome = search.step();
        assert!(!outcome.is_complete());
        steps += 1;
        assert!(steps < 100, "exhausted search must terminate");
    }

    assert_eq!(search.status(), SearchStatus::Exhausted);
    assert!(search.path().is_none());

    // Every later call is empty, never complete, and still reports exhaustion
    for _ in 0..5 {
        let outcome = search.step();
        assert!(outcome.changes.is_empty());
        assert!(!outcome.is_complete());
        assert_eq!(outcome.status, SearchStatus::Exhausted);
    }
}

#[test]
fn test_exhaustion_reported_after_last_cell_checked() {
    let grid = layout(SEALED);
    let (search, outcomes) = run(&grid, Algorithm::Bfs);

    // Cells 0, 1, 2 are checked, then one empty call reports exhaustion
    assert_eq!(checked_cells(&outcomes), vec![0, 1, 2]);
    assert_eq!(outcomes.len(), 4);
    assert!(outcomes[3].changes.is_empty());
    assert_eq!(outcomes[3].status, SearchStatus::Exhausted);
    assert_eq!(search.stats().checked, 3);
}

#[test]
fn test_bfs_never_checks_walls() {
    for text in SOLVABLE {
        let grid = layout(text);
        let (_, outcomes) = run(&grid, Algorithm::Bfs);
        for cell in checked_cells(&outcomes) {
            assert_ne!(grid.grid.kind_of(cell).unwrap(), CellKind::Wall);
        }
    }
}

#[test]
fn test_snapshot_isolated_from_later_edits() {
    let fixture = layout("s..\n...\n..e");
    let mut grid: Grid = fixture.grid.clone();
    let mut search = Search::new(&grid, Algorithm::Bfs, fixture.start, fixture.end).unwrap();

    // Painting walls on the driver's grid does not affect the running search
    grid.paint_wall(1).unwrap();
    grid.paint_wall(3).unwrap();
    search.run_to_end();

    assert_eq!(search.path().unwrap(), &[8, 5, 2, 1, 0]);
    assert_eq!(search.grid().wall_count(), 0);
}
