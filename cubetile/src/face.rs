//! Cube face identifiers.
//!
//! A cube map is made of six square face images. Faces are identified by
//! their index (0–5), which is also the leading number in the top-level
//! source image name (`{face}_0_0.png`).

use std::fmt;
use std::str::FromStr;

use crate::grid::GridError;

/// Number of faces on a cube.
pub const FACE_COUNT: u8 = 6;

/// Index of one cube face, always in `0..FACE_COUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FaceIndex(u8);

impl FaceIndex {
    /// Create a face index, rejecting values outside 0–5.
    ///
    /// # Examples
    ///
    /// ```
    /// use cubetile::face::FaceIndex;
    ///
    /// assert_eq!(FaceIndex::new(3).unwrap().index(), 3);
    /// assert!(FaceIndex::new(6).is_err());
    /// ```
    pub fn new(index: u8) -> Result<Self, GridError> {
        if index < FACE_COUNT {
            Ok(Self(index))
        } else {
            Err(GridError::InvalidFace(index))
        }
    }

    /// Raw face number.
    pub fn index(self) -> u8 {
        self.0
    }

    /// All six faces in ascending order.
    pub fn all() -> impl Iterator<Item = FaceIndex> {
        (0..FACE_COUNT).map(FaceIndex)
    }
}

impl fmt::Display for FaceIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FaceIndex {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let index = s
            .trim()
            .parse::<u8>()
            .map_err(|_| GridError::InvalidFaceValue(s.to_string()))?;
        FaceIndex::new(index)
    }
}
