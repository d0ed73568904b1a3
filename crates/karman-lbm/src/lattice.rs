//! D2Q9 discrete velocity set.
//!
//! Nine velocity directions on 2D square lattice:
//! ```text
//!   6   2   5
//!    \  |  /
//!   3 - 0 - 1
//!    /  |  \
//!   7   4   8
//! ```
//!
//! `x` is the streamwise axis (direction 1 points downstream), `y` the
//! cross-stream axis (direction 2 points up).

/// Number of discrete velocities.
pub const Q: usize = 9;

const W_REST: f64 = 4.0 / 9.0;
const W_AXIS: f64 = 1.0 / 9.0;
const W_DIAG: f64 = 1.0 / 36.0;

/// One discrete velocity of the lattice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeDirection {
    /// Position in the velocity set (0..9).
    pub index: usize,
    /// Integer displacement per timestep `[dx, dy]`.
    pub velocity: [i32; 2],
    /// Quadrature weight w_i.
    pub weight: f64,
    /// Index of the direction with negated velocity.
    pub opposite: usize,
}

impl LatticeDirection {
    const fn new(index: usize, dx: i32, dy: i32, weight: f64, opposite: usize) -> Self {
        Self {
            index,
            velocity: [dx, dy],
            weight,
            opposite,
        }
    }

    pub fn is_rest(&self) -> bool {
        self.velocity == [0, 0]
    }

    pub fn is_rightward(&self) -> bool {
        self.velocity[0] > 0
    }

    pub fn is_leftward(&self) -> bool {
        self.velocity[0] < 0
    }

    pub fn is_upward(&self) -> bool {
        self.velocity[1] > 0
    }

    pub fn is_downward(&self) -> bool {
        self.velocity[1] < 0
    }

    /// No vertical component (includes the rest vector).
    pub fn is_pure_horizontal(&self) -> bool {
        self.velocity[1] == 0
    }

    /// No horizontal component (includes the rest vector).
    pub fn is_pure_vertical(&self) -> bool {
        self.velocity[0] == 0
    }

    /// Projection c_i · u.
    #[inline]
    pub fn dot(&self, u: [f64; 2]) -> f64 {
        self.velocity[0] as f64 * u[0] + self.velocity[1] as f64 * u[1]
    }
}

/// Immutable description of a velocity set and its directional subsets.
///
/// Subsets are stored as small fixed index sets so the boundary stage can
/// address e.g. "every leftward direction" without building masks.
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    pub directions: [LatticeDirection; Q],
    pub rightward: [usize; 3],
    pub upward: [usize; 3],
    pub leftward: [usize; 3],
    pub downward: [usize; 3],
    pub pure_horizontal: [usize; 3],
    pub pure_vertical: [usize; 3],
}

/// The D2Q9 velocity set, built once and shared by reference by every stage.
pub static D2Q9: Lattice = Lattice {
    directions: [
        LatticeDirection::new(0, 0, 0, W_REST, 0),
        LatticeDirection::new(1, 1, 0, W_AXIS, 3),
        LatticeDirection::new(2, 0, 1, W_AXIS, 4),
        LatticeDirection::new(3, -1, 0, W_AXIS, 1),
        LatticeDirection::new(4, 0, -1, W_AXIS, 2),
        LatticeDirection::new(5, 1, 1, W_DIAG, 7),
        LatticeDirection::new(6, -1, 1, W_DIAG, 8),
        LatticeDirection::new(7, -1, -1, W_DIAG, 5),
        LatticeDirection::new(8, 1, -1, W_DIAG, 6),
    ],
    rightward: [1, 5, 8],
    upward: [2, 5, 6],
    leftward: [3, 6, 7],
    downward: [4, 7, 8],
    pure_horizontal: [0, 1, 3],
    pure_vertical: [0, 2, 4],
};

impl Lattice {
    /// Shared D2Q9 instance.
    pub fn d2q9() -> &'static Lattice {
        &D2Q9
    }

    #[inline]
    pub fn velocity(&self, i: usize) -> [i32; 2] {
        self.directions[i].velocity
    }

    #[inline]
    pub fn weight(&self, i: usize) -> f64 {
        self.directions[i].weight
    }

    #[inline]
    pub fn opposite(&self, i: usize) -> usize {
        self.directions[i].opposite
    }

    pub fn iter(&self) -> impl Iterator<Item = &LatticeDirection> {
        self.directions.iter()
    }
}
