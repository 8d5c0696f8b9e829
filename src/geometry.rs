//! Planar geometric types and truss nodes.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Position in the plane.
///
/// Deserializes from either `[x, y]` or `{ "x": .., "y": .. }`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Distance along the global X axis.
    pub x: f64,
    /// Distance along the global Y axis.
    pub y: f64,
}

impl Point {
    /// Create a [`Point`] with explicit coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Convert the point into an algebraic vector.
    #[must_use]
    pub fn to_vector(self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }
}

impl From<Vector2<f64>> for Point {
    fn from(value: Vector2<f64>) -> Self {
        Self::new(value.x, value.y)
    }
}

/// In-plane translation of a node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Displacement {
    /// Displacement component along the global X axis.
    pub x: f64,
    /// Displacement component along the global Y axis.
    pub y: f64,
}

impl Displacement {
    /// Create a [`Displacement`] with explicit components.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean magnitude of the translation.
    #[must_use]
    pub fn magnitude(self) -> f64 {
        self.x.hypot(self.y)
    }
}

/// Endpoint of an element together with its pair of global DOF indices.
///
/// Degree-of-freedom indices are 0-based: node number `i` (1-based) owns
/// `2i - 2` along X and `2i - 1` along Y.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Node {
    /// Location on the X axis.
    pub x: f64,
    /// Location on the Y axis.
    pub y: f64,
    /// Global index of the X displacement.
    pub dofx: usize,
    /// Global index of the Y displacement.
    pub dofy: usize,
}

impl Node {
    /// Create a node with explicit DOF indices.
    #[must_use]
    pub const fn new(x: f64, y: f64, dofx: usize, dofy: usize) -> Self {
        Self { x, y, dofx, dofy }
    }

    /// Create the node for a 1-based node number, reserving its DOF pair.
    ///
    /// `number` must be at least 1; callers validate it against the node count.
    #[must_use]
    pub const fn numbered(number: usize, position: Point) -> Self {
        Self::new(position.x, position.y, 2 * number - 2, 2 * number - 1)
    }

    /// The node's location.
    #[must_use]
    pub const fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// The `[dofx, dofy]` pair.
    #[must_use]
    pub const fn dofs(&self) -> [usize; 2] {
        [self.dofx, self.dofy]
    }
}

/// Convenience helper for creating [`Point`] instances.
///
/// # Examples
/// ```
/// use planar_truss::point;
///
/// let origin = point(0.0, 0.0);
/// assert_eq!(origin.x, 0.0);
/// ```
#[must_use]
pub const fn point(x: f64, y: f64) -> Point {
    Point::new(x, y)
}
