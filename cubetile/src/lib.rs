//! Cubetile - cube-map texture preparation
//!
//! This library prepares the six face images of a cube-mapped planet texture
//! for a quadtree renderer:
//!
//! - [`tiler`] splits each face into a `2^(L-1)` × `2^(L-1)` grid of square
//!   tiles named `{level}_{face}_{row}_{col}.png`
//! - [`thumbnail`] shrinks a selection of tiles to fixed-size `thumb_*` images
//!
//! The grid arithmetic lives in [`grid`] and every filename convention in
//! [`naming`].

pub mod config;
pub mod face;
pub mod grid;
pub mod logging;
pub mod naming;
pub mod thumbnail;
pub mod tiler;
