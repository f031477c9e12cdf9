//! Index-space and world-space bounding boxes.

use glam::{DVec3, IVec3, U64Vec3};
use serde::{Deserialize, Serialize};

/// An inclusive, axis-aligned box of integer voxel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexBBox {
    /// Minimum corner (inclusive).
    pub min: IVec3,
    /// Maximum corner (inclusive).
    pub max: IVec3,
}

impl IndexBBox {
    /// Creates a box from its inclusive corners.
    #[must_use]
    pub const fn new(min: IVec3, max: IVec3) -> Self {
        Self { min, max }
    }

    /// Creates an empty box that any [`expand`](Self::expand) will overwrite.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            min: IVec3::MAX,
            max: IVec3::MIN,
        }
    }

    /// Returns true if `min > max` on any axis.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.cmpgt(self.max).any()
    }

    /// Grows the box to contain `ijk`.
    pub fn expand(&mut self, ijk: IVec3) {
        self.min = self.min.min(ijk);
        self.max = self.max.max(ijk);
    }

    /// Returns true if `ijk` lies inside the box.
    #[must_use]
    pub fn contains(&self, ijk: IVec3) -> bool {
        ijk.cmpge(self.min).all() && ijk.cmple(self.max).all()
    }

    /// Number of voxels along each axis (`max - min + 1`), zero when empty.
    #[must_use]
    pub fn dim(&self) -> U64Vec3 {
        if self.is_empty() {
            return U64Vec3::ZERO;
        }
        let axis = |lo: i32, hi: i32| (i64::from(hi) - i64::from(lo) + 1).unsigned_abs();
        U64Vec3::new(
            axis(self.min.x, self.max.x),
            axis(self.min.y, self.max.y),
            axis(self.min.z, self.max.z),
        )
    }

    /// Total number of voxels in the box.
    #[must_use]
    pub fn volume(&self) -> u64 {
        let dim = self.dim();
        dim.x.saturating_mul(dim.y).saturating_mul(dim.z)
    }

    /// The eight corners of the box.
    #[must_use]
    pub fn corners(&self) -> [IVec3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            IVec3::new(lo.x, lo.y, lo.z),
            IVec3::new(hi.x, lo.y, lo.z),
            IVec3::new(lo.x, hi.y, lo.z),
            IVec3::new(hi.x, hi.y, lo.z),
            IVec3::new(lo.x, lo.y, hi.z),
            IVec3::new(hi.x, lo.y, hi.z),
            IVec3::new(lo.x, hi.y, hi.z),
            IVec3::new(hi.x, hi.y, hi.z),
        ]
    }
}

impl Default for IndexBBox {
    fn default() -> Self {
        Self::empty()
    }
}

/// An axis-aligned box in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBBox {
    /// Minimum corner.
    pub min: DVec3,
    /// Maximum corner.
    pub max: DVec3,
}

impl WorldBBox {
    /// Creates a box from its corners.
    #[must_use]
    pub const fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Returns the tightest box around `points`, or `None` if there are none.
    pub fn from_points(points: impl IntoIterator<Item = DVec3>) -> Option<Self> {
        points.into_iter().fold(None, |acc, p| match acc {
            None => Some(Self::new(p, p)),
            Some(b) => Some(Self::new(b.min.min(p), b.max.max(p))),
        })
    }

    /// Per-axis extents (`max - min`).
    #[must_use]
    pub fn extents(&self) -> DVec3 {
        self.max - self.min
    }

    /// Returns the smallest box containing both boxes.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self::new(self.min.min(other.min), self.max.max(other.max))
    }

    /// Maps a point in `[0, 1]^3` to world space.
    #[inline]
    #[must_use]
    pub fn lerp(&self, t: DVec3) -> DVec3 {
        self.min + t * self.extents()
    }
}
