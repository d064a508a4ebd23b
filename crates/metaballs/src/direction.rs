//! Marching-squares directions and the corner-pattern case table.
//!
//! A cell `(x, y)` has corners numbered clockwise from the top-left:
//!
//! ```text
//!   0 ----- 1
//!   |       |
//!   3 ----- 2
//! ```
//!
//! Corner `i` contributes bit `2^i` to the case value when it is inside the
//! surface. Leaving a cell in direction `d` crosses the edge from corner `d`
//! to corner `(d + 1) % 4`, so each direction owns exactly one edge.

use glam::{DVec2, IVec2};

/// Corner offsets from the cell origin, indexed by corner number.
pub const CORNERS: [IVec2; 4] = [
    IVec2::new(0, 0),
    IVec2::new(1, 0),
    IVec2::new(1, 1),
    IVec2::new(0, 1),
];

/// Exit direction from a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

/// Geometry of one direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionRecord {
    /// Offset to the neighbouring cell in this direction.
    pub step: IVec2,
    /// Corner where the crossed edge starts; interpolation measures from here.
    pub edge_start: usize,
    /// Corner where the crossed edge ends.
    pub edge_end: usize,
    /// Unit vector from `edge_start` toward `edge_end`.
    pub along: DVec2,
}

const DIRECTIONS: [DirectionRecord; 4] = [
    DirectionRecord {
        step: IVec2::new(0, -1),
        edge_start: 0,
        edge_end: 1,
        along: DVec2::new(1.0, 0.0),
    },
    DirectionRecord {
        step: IVec2::new(1, 0),
        edge_start: 1,
        edge_end: 2,
        along: DVec2::new(0.0, 1.0),
    },
    DirectionRecord {
        step: IVec2::new(0, 1),
        edge_start: 2,
        edge_end: 3,
        along: DVec2::new(-1.0, 0.0),
    },
    DirectionRecord {
        step: IVec2::new(-1, 0),
        edge_start: 3,
        edge_end: 0,
        along: DVec2::new(0.0, -1.0),
    },
];

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    pub fn record(self) -> &'static DirectionRecord {
        &DIRECTIONS[self as usize]
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// What the walk does with a cell, by corner pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellCase {
    /// Exactly one way out.
    Exit(Direction),
    /// Two diagonal corners inside; the way out depends on the way in.
    Saddle(SaddleKind),
    /// Every corner inside: climb one row and look again.
    Interior,
}

/// The two diagonal saddle patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaddleKind {
    /// Corners 0 and 2 inside (case 5).
    MainDiagonal,
    /// Corners 1 and 3 inside (case 10).
    AntiDiagonal,
}

impl SaddleKind {
    /// Exit direction given the direction the walk arrived with.
    pub fn resolve(self, entry: Direction) -> Direction {
        match (self, entry) {
            (SaddleKind::MainDiagonal, Direction::Down) => Direction::Left,
            (SaddleKind::MainDiagonal, _) => Direction::Right,
            (SaddleKind::AntiDiagonal, Direction::Left) => Direction::Up,
            (SaddleKind::AntiDiagonal, _) => Direction::Down,
        }
    }
}

use Direction::{Down, Left, Right, Up};

/// Case table for corner patterns 0..=15.
///
/// Case 0 (no corner inside) keeps searching upward.
pub const CASES: [CellCase; 16] = [
    CellCase::Exit(Up),
    CellCase::Exit(Left),
    CellCase::Exit(Up),
    CellCase::Exit(Left),
    CellCase::Exit(Right),
    CellCase::Saddle(SaddleKind::MainDiagonal),
    CellCase::Exit(Up),
    CellCase::Exit(Left),
    CellCase::Exit(Down),
    CellCase::Exit(Down),
    CellCase::Saddle(SaddleKind::AntiDiagonal),
    CellCase::Exit(Down),
    CellCase::Exit(Right),
    CellCase::Exit(Right),
    CellCase::Exit(Up),
    CellCase::Interior,
];

/// Case value from the four corner inside-flags.
pub fn case_index(inside: [bool; 4]) -> usize {
    inside
        .iter()
        .enumerate()
        .fold(0, |acc, (i, &is_in)| if is_in { acc | 1 << i } else { acc })
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::Direction::{Down, Left, Right, Up};

    #[test]
    fn every_case_value_is_handled() {
        for (value, case) in CASES.iter().enumerate() {
            match case {
                CellCase::Exit(d) => assert!(d.index() < 4, "case {value}"),
                CellCase::Saddle(_) => assert!(value == 5 || value == 10),
                CellCase::Interior => assert_eq!(value, 15),
            }
        }
    }

    #[test]
    fn case_index_weights_corners_by_power_of_two() {
        assert_eq!(case_index([false; 4]), 0);
        assert_eq!(case_index([true, false, false, false]), 1);
        assert_eq!(case_index([false, false, true, true]), 12);
        assert_eq!(case_index([true, false, true, false]), 5);
        assert_eq!(case_index([false, true, false, true]), 10);
        assert_eq!(case_index([true; 4]), 15);
    }

    #[test]
    fn single_exit_crosses_an_edge_with_one_inside_corner() {
        // For every single-exit case except the empty one, the exit edge must
        // separate an inside corner from an outside corner.
        for (value, case) in CASES.iter().enumerate().skip(1) {
            if let CellCase::Exit(d) = case {
                let r = d.record();
                let start_in = value & (1 << r.edge_start) != 0;
                let end_in = value & (1 << r.edge_end) != 0;
                assert_ne!(start_in, end_in, "case {value} exits {d:?} along a uniform edge");
            }
        }
    }

    #[test]
    fn saddle_resolution_depends_on_entry() {
        assert_eq!(SaddleKind::MainDiagonal.resolve(Down), Left);
        for entry in [Up, Right, Left] {
            assert_eq!(SaddleKind::MainDiagonal.resolve(entry), Right);
        }
        assert_eq!(SaddleKind::AntiDiagonal.resolve(Left), Up);
        for entry in [Up, Right, Down] {
            assert_eq!(SaddleKind::AntiDiagonal.resolve(entry), Down);
        }
    }

    #[test]
    fn saddle_exits_cross_mixed_edges() {
        for (kind, value) in [(SaddleKind::MainDiagonal, 5usize), (SaddleKind::AntiDiagonal, 10)] {
            for entry in Direction::ALL {
                let r = kind.resolve(entry).record();
                let start_in = value & (1 << r.edge_start) != 0;
                let end_in = value & (1 << r.edge_end) != 0;
                assert_ne!(start_in, end_in);
            }
        }
    }

    #[test]
    fn direction_records_are_consistent() {
        for d in Direction::ALL {
            let r = d.record();
            assert_eq!(r.edge_end, (r.edge_start + 1) % 4);
            let delta = CORNERS[r.edge_end] - CORNERS[r.edge_start];
            assert_eq!(DVec2::new(delta.x as f64, delta.y as f64), r.along);
            // The neighbour lies on the far side of the crossed edge.
            let mid = (CORNERS[r.edge_start] + CORNERS[r.edge_end]).as_dvec2() * 0.5;
            let cell_center = DVec2::splat(0.5);
            let outward = mid - cell_center;
            assert_eq!(outward * 2.0, r.step.as_dvec2());
        }
    }
}
