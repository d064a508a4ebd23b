//! Marching-squares contour walk over a [`Lattice`].

use glam::{DVec2, IVec2};

use crate::ball::Ball;
use crate::direction::{case_index, CellCase, Direction, CASES, CORNERS};
use crate::lattice::{is_inside, Lattice, THRESHOLD};

/// Smallest denominator used when interpolating a crossing.
pub const MIN_CROSSING_SPREAD: f64 = 1e-9;

/// Vertices of one traced contour, in walk order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContourPath {
    vertices: Vec<DVec2>,
}

impl ContourPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a vertex. Non-finite points are dropped.
    pub fn push(&mut self, v: DVec2) {
        if v.is_finite() {
            self.vertices.push(v);
        }
    }

    pub fn vertices(&self) -> &[DVec2] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    /// Mean of the vertices, `None` for an empty path.
    pub fn centroid(&self) -> Option<DVec2> {
        if self.vertices.is_empty() {
            return None;
        }
        let sum: DVec2 = self.vertices.iter().copied().sum();
        Some(sum / self.vertices.len() as f64)
    }
}

/// How a walk ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceOutcome {
    /// Cells processed, including the final one that stopped the walk.
    pub steps: usize,
    /// The walk was cut off by the step cap instead of stopping on its own.
    pub capped: bool,
}

/// Distance along an edge of length `step` from the corner with force `near`
/// to where the field crosses the threshold, assuming linear variation toward
/// the corner with force `far`. Always within `[0, step]`.
pub fn crossing_offset(step: f64, near: f64, far: f64) -> f64 {
    let d_near = (near.abs() - THRESHOLD).abs();
    let d_far = (far.abs() - THRESHOLD).abs();
    let offset = step * d_near / (d_near + d_far).max(MIN_CROSSING_SPREAD);
    if offset.is_nan() {
        return 0.0;
    }
    offset.clamp(0.0, step)
}

/// Processes one cell of the walk.
///
/// `entry` is the direction the walk arrived with; it only matters for the
/// two saddle patterns. Appends at most one vertex to `path` and returns the
/// next cell with its entry direction, or `None` when the walk is over: the
/// cell was already walked this iteration or lies off the lattice.
///
/// A cell with no corner inside (case 0) is stamped and the walk moves up,
/// but no vertex is appended: a plain table lookup would interpolate a
/// crossing along the top edge that the field does not have.
pub fn step(
    lattice: &mut Lattice,
    balls: &[Ball],
    cell: IVec2,
    entry: Direction,
    path: &mut ContourPath,
) -> Option<(IVec2, Direction)> {
    if !lattice.contains_cell(cell.x as i64, cell.y as i64) {
        return None;
    }
    let (x, y) = (cell.x as usize, cell.y as usize);
    if lattice.is_visited(x, y) {
        return None;
    }

    let mut forces = [0.0; 4];
    for (force, corner) in forces.iter_mut().zip(CORNERS) {
        *force = lattice.force_at(x + corner.x as usize, y + corner.y as usize, balls);
    }
    let case = case_index(forces.map(is_inside));

    let exit = match CASES[case] {
        CellCase::Interior => return Some((cell + Direction::Up.record().step, Direction::Up)),
        CellCase::Saddle(kind) => kind.resolve(entry),
        CellCase::Exit(d) => {
            lattice.mark_visited(x, y);
            d
        }
    };

    let record = exit.record();
    if case != 0 {
        let origin = cell + CORNERS[record.edge_start];
        let origin = DVec2::new(origin.x as f64, origin.y as f64) * lattice.step();
        let offset = crossing_offset(
            lattice.step(),
            forces[record.edge_start],
            forces[record.edge_end],
        );
        path.push(origin + record.along * offset);
    }

    Some((cell + record.step, exit))
}

/// Walks from `seed` until the walk stops, appending crossings to `path`.
///
/// The walk starts heading up and is cut off after `columns * rows` cells.
pub fn trace(
    lattice: &mut Lattice,
    balls: &[Ball],
    seed: IVec2,
    path: &mut ContourPath,
) -> TraceOutcome {
    let cap = lattice.columns() * lattice.rows();
    trace_with_cap(lattice, balls, seed, path, cap)
}

/// [`trace`] with an explicit step cap.
pub(crate) fn trace_with_cap(
    lattice: &mut Lattice,
    balls: &[Ball],
    seed: IVec2,
    path: &mut ContourPath,
    cap: usize,
) -> TraceOutcome {
    let mut state = Some((seed, Direction::Up));
    let mut steps = 0;

    while let Some((cell, entry)) = state {
        if steps >= cap {
            tracing::warn!(
                steps,
                seed_x = seed.x,
                seed_y = seed.y,
                "contour walk hit its step cap"
            );
            return TraceOutcome { steps, capped: true };
        }
        steps += 1;
        state = step(lattice, balls, cell, entry, path);
    }

    TraceOutcome {
        steps,
        capped: false,
    }
}
