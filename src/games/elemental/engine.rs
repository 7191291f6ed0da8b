//! Move resolution: traversal order, sliding and merging.

use super::grid::Grid;
use super::rules::{self, Merge};
use super::tile::Tile;
use super::types::{Direction, Kind, Position, Vector};
use tracing::{debug, info, instrument};

/// Per-axis visiting order for one move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Traversals {
    /// Column order.
    pub x: Vec<usize>,
    /// Row order.
    pub y: Vec<usize>,
}

/// Result of sliding one tile as far as it goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FarthestPosition {
    /// Last empty cell reached (the start cell if the tile cannot slide).
    pub farthest: Position,
    /// Occupied cell that stopped the slide, `None` if the edge of the grid did.
    pub next: Option<Position>,
}

/// What a single move did to the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveReport {
    /// True if any tile ended up away from its starting cell.
    pub moved: bool,
    /// Sum of the values of all tiles created by merges.
    pub points: u64,
    /// Number of merges performed.
    pub merges: usize,
    /// True if a numeric merge reached the win value.
    pub reached_win: bool,
}

/// Slides and merges tiles on a [`Grid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveEngine {
    win_value: u32,
}

impl MoveEngine {
    /// Creates an engine that reports a win when a numeric merge reaches `win_value`.
    pub fn new(win_value: u32) -> Self {
        Self { win_value }
    }

    /// Unit delta for `direction`.
    pub fn vector(direction: Direction) -> Vector {
        direction.vector()
    }

    /// Builds the visiting order so tiles nearest the target edge go first.
    pub fn build_traversals(size: usize, vector: Vector) -> Traversals {
        let mut traversals = Traversals {
            x: (0..size).collect(),
            y: (0..size).collect(),
        };
        if vector.x == 1 {
            traversals.x.reverse();
        }
        if vector.y == 1 {
            traversals.y.reverse();
        }
        traversals
    }

    /// Walks from `cell` along `vector` while the next cell is on the grid and empty.
    pub fn find_farthest_position(grid: &Grid, cell: Position, vector: Vector) -> FarthestPosition {
        let mut farthest = cell;
        loop {
            match farthest.offset(vector) {
                Some(step) if grid.cell_available(step) => farthest = step,
                Some(step) if grid.within_bounds(step) => {
                    return FarthestPosition {
                        farthest,
                        next: Some(step),
                    };
                }
                _ => {
                    return FarthestPosition {
                        farthest,
                        next: None,
                    };
                }
            }
        }
    }

    /// Resolves one move in `direction`, mutating `grid`.
    ///
    /// Every tile's merge metadata is reset and its position snapshotted first.
    /// Tiles are then visited in traversal order; each either merges into the tile
    /// that blocks it or slides to the farthest empty cell.
    #[instrument(skip(self, grid), fields(tiles = grid.tile_count()))]
    pub fn execute(&self, grid: &mut Grid, direction: Direction) -> MoveReport {
        let vector = Self::vector(direction);
        let traversals = Self::build_traversals(grid.size(), vector);
        let mut report = MoveReport::default();

        grid.prepare_tiles();

        for &x in &traversals.x {
            for &y in &traversals.y {
                let cell = Position::new(x, y);
                let Some(tile) = grid.cell_content(cell) else {
                    continue;
                };

                let positions = Self::find_farthest_position(grid, cell, vector);
                let merge = positions.next.and_then(|next| {
                    grid.cell_content(next)
                        .and_then(|neighbour| rules::merge_outcome(tile, neighbour))
                        .map(|merge| (next, merge))
                });

                let destination = match merge {
                    Some((target, merge)) => {
                        self.merge_into(grid, cell, target, merge, &mut report);
                        target
                    }
                    None => {
                        grid.move_tile(cell, positions.farthest);
                        positions.farthest
                    }
                };

                if destination != cell {
                    report.moved = true;
                }
            }
        }

        debug!(?report, "Move resolved");
        report
    }

    fn merge_into(
        &self,
        grid: &mut Grid,
        from: Position,
        target: Position,
        merge: Merge,
        report: &mut MoveReport,
    ) {
        let Some(mut source) = grid.take_tile(from) else {
            return;
        };
        let Some(mut resident) = grid.take_tile(target) else {
            grid.insert_tile(source);
            return;
        };

        source.update_position(target);
        if merge == Merge::Elemental {
            // Both sources converge on the merge cell.
            resident.update_position(target);
        }

        let value = merge.value();
        let mut merged = Tile::new(target, value, Kind::Number);
        merged.set_merged_from([source, resident]);
        grid.insert_tile(merged);

        report.points += u64::from(value);
        report.merges += 1;
        debug!(%from, %target, ?merge, "Tiles merged");

        if matches!(merge, Merge::Numeric { .. }) && value >= self.win_value {
            info!(value, "Win value reached");
            report.reached_win = true;
        }
    }
}

impl Default for MoveEngine {
    fn default() -> Self {
        Self::new(2048)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(grid: &mut Grid, x: usize, y: usize, value: u32, kind: Kind) {
        grid.insert_tile(Tile::new(Position::new(x, y), value, kind));
    }

    fn value_at(grid: &Grid, x: usize, y: usize) -> Option<(u32, Kind)> {
        grid.cell_content(Position::new(x, y))
            .map(|tile| (tile.value(), tile.kind()))
    }

    #[test]
    fn test_traversals_reverse_towards_target() {
        let right = MoveEngine::build_traversals(4, Direction::Right.vector());
        assert_eq!(right.x, vec![3, 2, 1, 0]);
        assert_eq!(right.y, vec![0, 1, 2, 3]);

        let down = MoveEngine::build_traversals(4, Direction::Down.vector());
        assert_eq!(down.x, vec![0, 1, 2, 3]);
        assert_eq!(down.y, vec![3, 2, 1, 0]);

        let up = MoveEngine::build_traversals(4, Direction::Up.vector());
        assert_eq!(up.y, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_farthest_position_stops_at_wall() {
        let grid = Grid::new(4);
        let positions = MoveEngine::find_farthest_position(
            &grid,
            Position::new(2, 1),
            Direction::Left.vector(),
        );
        assert_eq!(positions.farthest, Position::new(0, 1));
        assert_eq!(positions.next, None);

        let positions = MoveEngine::find_farthest_position(
            &grid,
            Position::new(2, 1),
            Direction::Down.vector(),
        );
        assert_eq!(positions.farthest, Position::new(2, 3));
        assert_eq!(positions.next, None);
    }

    #[test]
    fn test_farthest_position_stops_at_tile() {
        let mut grid = Grid::new(4);
        place(&mut grid, 0, 1, 2, Kind::Number);
        let positions = MoveEngine::find_farthest_position(
            &grid,
            Position::new(3, 1),
            Direction::Left.vector(),
        );
        assert_eq!(positions.farthest, Position::new(1, 1));
        assert_eq!(positions.next, Some(Position::new(0, 1)));
    }

    #[test]
    fn test_numeric_merge() {
        let mut grid = Grid::new(4);
        place(&mut grid, 0, 0, 2, Kind::Number);
        place(&mut grid, 1, 0, 2, Kind::Number);

        let report = MoveEngine::default().execute(&mut grid, Direction::Left);

        assert!(report.moved);
        assert_eq!(report.points, 4);
        assert_eq!(grid.tile_count(), 1);
        assert_eq!(value_at(&grid, 0, 0), Some((4, Kind::Number)));

        let merged = grid.cell_content(Position::new(0, 0)).unwrap();
        let sources = merged.merged_from().unwrap();
        assert!(sources.iter().all(|t| t.position() == Position::new(0, 0)));
    }

    #[test]
    fn test_elemental_merge_produces_four() {
        let mut grid = Grid::new(4);
        place(&mut grid, 2, 0, 1, Kind::Grass);
        place(&mut grid, 3, 0, 1, Kind::Water);

        let report = MoveEngine::default().execute(&mut grid, Direction::Right);

        assert!(report.moved);
        assert_eq!(report.points, 4);
        assert_eq!(grid.tile_count(), 1);
        assert_eq!(value_at(&grid, 3, 0), Some((4, Kind::Number)));
    }

    #[test]
    fn test_same_elements_only_slide() {
        let mut grid = Grid::new(4);
        place(&mut grid, 2, 0, 1, Kind::Fire);
        place(&mut grid, 3, 0, 1, Kind::Fire);

        let report = MoveEngine::default().execute(&mut grid, Direction::Left);

        assert!(report.moved);
        assert_eq!(report.points, 0);
        assert_eq!(value_at(&grid, 0, 0), Some((1, Kind::Fire)));
        assert_eq!(value_at(&grid, 1, 0), Some((1, Kind::Fire)));
    }

    #[test]
    fn test_merged_tile_does_not_merge_again() {
        let mut grid = Grid::new(4);
        place(&mut grid, 0, 0, 2, Kind::Number);
        place(&mut grid, 1, 0, 2, Kind::Number);
        place(&mut grid, 2, 0, 4, Kind::Number);

        let report = MoveEngine::default().execute(&mut grid, Direction::Left);

        // [2 2 4 .] -> [4 4 . .], never [8 . . .]
        assert_eq!(report.merges, 1);
        assert_eq!(report.points, 4);
        assert_eq!(value_at(&grid, 0, 0), Some((4, Kind::Number)));
        assert_eq!(value_at(&grid, 1, 0), Some((4, Kind::Number)));
        assert_eq!(grid.tile_count(), 2);
    }

    #[test]
    fn test_four_equal_numbers_make_two_pairs() {
        let mut grid = Grid::new(4);
        for y in 0..4 {
            place(&mut grid, 1, y, 8, Kind::Number);
        }

        let report = MoveEngine::default().execute(&mut grid, Direction::Down);

        assert_eq!(report.merges, 2);
        assert_eq!(report.points, 32);
        assert_eq!(value_at(&grid, 1, 3), Some((16, Kind::Number)));
        assert_eq!(value_at(&grid, 1, 2), Some((16, Kind::Number)));
        assert_eq!(grid.tile_count(), 2);
    }

    #[test]
    fn test_blocked_move_reports_no_change() {
        let mut grid = Grid::new(4);
        place(&mut grid, 0, 0, 2, Kind::Number);
        place(&mut grid, 1, 0, 4, Kind::Number);

        let report = MoveEngine::default().execute(&mut grid, Direction::Left);

        assert!(!report.moved);
        assert_eq!(report.points, 0);
        assert_eq!(grid.tile_count(), 2);
    }

    #[test]
    fn test_stuck_board_unchanged_in_every_direction() {
        let mut grid = Grid::new(4);
        for x in 0..4 {
            for y in 0..4 {
                if (x + y) % 2 == 0 {
                    let value = if x % 2 == 0 { 2 } else { 8 };
                    place(&mut grid, x, y, value, Kind::Number);
                } else {
                    place(&mut grid, x, y, 1, Kind::Grass);
                }
            }
        }
        assert!(!grid.cells_available());

        let engine = MoveEngine::default();
        for direction in Direction::ALL {
            let before = grid.clone();
            let report = engine.execute(&mut grid, direction);

            assert!(!report.moved, "{direction} moved a stuck board");
            assert_eq!(report.points, 0);
            assert_eq!(report.merges, 0);
            assert_eq!(grid, before);
        }
    }

    #[test]
    fn test_win_value_reported() {
        let mut grid = Grid::new(4);
        place(&mut grid, 0, 0, 1024, Kind::Number);
        place(&mut grid, 0, 2, 1024, Kind::Number);

        let report = MoveEngine::new(2048).execute(&mut grid, Direction::Up);

        assert!(report.reached_win);
        assert_eq!(value_at(&grid, 0, 0), Some((2048, Kind::Number)));
    }

    #[test]
    fn test_previous_positions_recorded() {
        let mut grid = Grid::new(4);
        place(&mut grid, 3, 2, 2, Kind::Number);

        MoveEngine::default().execute(&mut grid, Direction::Left);

        let tile = grid.cell_content(Position::new(0, 2)).unwrap();
        assert_eq!(tile.previous_position(), Some(Position::new(3, 2)));
        assert!(tile.merged_from().is_none());
    }
}
