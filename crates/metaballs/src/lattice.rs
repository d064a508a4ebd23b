//! Lazily evaluated scalar field sampled on a regular lattice.
//!
//! Nodes live in a flat arena indexed by `i + j * columns`. Each node carries
//! two epoch stamps compared against the lattice's iteration counter:
//! `computed_at` says whether the cached force is current, and `visited_at`
//! says whether the contour walk already passed through the cell whose
//! top-left corner is this node. Bumping the counter invalidates both for
//! every node at once.

use glam::DVec2;
use lava_lamp_core::error::EngineError;

use crate::ball::Ball;

/// Field magnitude above which a node is inside the surface.
pub const THRESHOLD: f64 = 1.0;
/// Magnitude pinned on the lattice border. Below the threshold, so contours
/// always close before reaching the viewport edge.
pub const BORDER_FORCE: f64 = 0.6;
/// Smallest squared distance used in a contribution, so a node sitting on a
/// source center stays finite.
pub const MIN_DISTANCE_SQUARED: f64 = 1e-6;

/// Stamp value no iteration can equal; iterations start at 1.
const NEVER: u64 = 0;

/// One lattice sample.
#[derive(Debug, Clone, PartialEq)]
pub struct LatticeNode {
    pos: DVec2,
    magnitude: f64,
    force: f64,
    computed_at: u64,
    visited_at: u64,
}

impl LatticeNode {
    fn new(pos: DVec2) -> Self {
        Self {
            pos,
            magnitude: pos.length_squared(),
            force: 0.0,
            computed_at: NEVER,
            visited_at: NEVER,
        }
    }

    /// Pixel position `(i * step, j * step)`.
    pub fn pos(&self) -> DVec2 {
        self.pos
    }

    /// `|pos|^2`, kept to avoid recomputing it per source.
    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    /// Last cached force. Only meaningful when `computed_at` is current.
    pub fn force(&self) -> f64 {
        self.force
    }

    pub fn computed_at(&self) -> u64 {
        self.computed_at
    }

    pub fn visited_at(&self) -> u64 {
        self.visited_at
    }
}

/// Scalar field over the viewport, sampled every `step` pixels.
///
/// `columns = floor(width / step) + 2` and likewise for rows, so the lattice
/// overhangs the viewport by one step on the right and bottom.
#[derive(Debug, Clone)]
pub struct Lattice {
    step: f64,
    columns: usize,
    rows: usize,
    nodes: Vec<LatticeNode>,
    sign: f64,
    iteration: u64,
}

impl Lattice {
    /// Builds a lattice covering a `width x height` viewport.
    ///
    /// Returns `EngineError::InvalidDimensions` for an empty viewport or a
    /// step that is not a positive finite number.
    pub fn new(width: usize, height: usize, step: f64) -> Result<Self, EngineError> {
        let mut lattice = Self {
            step,
            columns: 0,
            rows: 0,
            nodes: Vec::new(),
            sign: 1.0,
            iteration: NEVER + 1,
        };
        lattice.rebuild(width, height)?;
        Ok(lattice)
    }

    /// Re-samples the lattice for a new viewport size.
    ///
    /// The iteration counter carries over and is bumped, so no stamp from
    /// before the rebuild can match. Polarity is left alone.
    pub fn rebuild(&mut self, width: usize, height: usize) -> Result<(), EngineError> {
        if width == 0 || height == 0 || !(self.step.is_finite() && self.step > 0.0) {
            return Err(EngineError::InvalidDimensions);
        }
        let columns = (width as f64 / self.step).floor() as usize + 2;
        let rows = (height as f64 / self.step).floor() as usize + 2;
        let len = columns
            .checked_mul(rows)
            .ok_or(EngineError::InvalidDimensions)?;

        let step = self.step;
        self.nodes = (0..len)
            .map(|k| {
                let (i, j) = (k % columns, k / columns);
                LatticeNode::new(DVec2::new(i as f64 * step, j as f64 * step))
            })
            .collect();
        self.columns = columns;
        self.rows = rows;
        self.invalidate();
        Ok(())
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Current polarity, `1.0` or `-1.0`.
    pub fn sign(&self) -> f64 {
        self.sign
    }

    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    pub fn nodes(&self) -> &[LatticeNode] {
        &self.nodes
    }

    pub fn node(&self, i: usize, j: usize) -> Option<&LatticeNode> {
        self.index(i, j).map(|k| &self.nodes[k])
    }

    /// Starts a new frame: bumps the iteration and flips the polarity.
    pub fn begin_iteration(&mut self) {
        self.iteration += 1;
        self.sign = -self.sign;
    }

    /// Bumps the iteration without touching polarity, dropping every cached
    /// force and visit mark.
    pub fn invalidate(&mut self) {
        self.iteration += 1;
    }

    fn index(&self, i: usize, j: usize) -> Option<usize> {
        (i < self.columns && j < self.rows).then(|| i + j * self.columns)
    }

    fn is_border(&self, i: usize, j: usize) -> bool {
        i == 0 || j == 0 || i + 2 >= self.columns || j + 2 >= self.rows
    }

    /// Whether `(x, y)` names a cell whose four corners are all on the lattice.
    pub fn contains_cell(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as u64) + 1 < self.columns as u64 && (y as u64) + 1 < self.rows as u64
    }

    /// Field value at node `(i, j)`, computed on first use this iteration.
    ///
    /// Border nodes read `BORDER_FORCE * sign`. Interior nodes read
    /// `sign * sum(size^2 / d^2)` over `balls`, with `d^2` clamped to
    /// [`MIN_DISTANCE_SQUARED`]. Coordinates off the lattice read like the
    /// border and are not cached.
    pub fn force_at(&mut self, i: usize, j: usize, balls: &[Ball]) -> f64 {
        let Some(k) = self.index(i, j) else {
            return BORDER_FORCE * self.sign;
        };
        if self.nodes[k].computed_at == self.iteration {
            return self.nodes[k].force;
        }

        let force = if self.is_border(i, j) {
            BORDER_FORCE * self.sign
        } else {
            let node = &self.nodes[k];
            let sum: f64 = balls
                .iter()
                .map(|ball| {
                    let c = ball.pos();
                    let d2 = c.length_squared() + node.magnitude - 2.0 * node.pos.dot(c);
                    ball.size() * ball.size() / d2.max(MIN_DISTANCE_SQUARED)
                })
                .sum();
            sum * self.sign
        };

        let node = &mut self.nodes[k];
        node.force = force;
        node.computed_at = self.iteration;
        force
    }

    /// Whether the cell at node `(i, j)` was walked this iteration.
    pub fn is_visited(&self, i: usize, j: usize) -> bool {
        self.index(i, j)
            .is_some_and(|k| self.nodes[k].visited_at == self.iteration)
    }

    pub fn mark_visited(&mut self, i: usize, j: usize) {
        if let Some(k) = self.index(i, j) {
            self.nodes[k].visited_at = self.iteration;
        }
    }
}

/// Whether a force value lies inside the surface, regardless of polarity.
pub fn is_inside(force: f64) -> bool {
    force.abs() > THRESHOLD
}
