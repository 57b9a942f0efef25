//! Tile grid arithmetic.
//!
//! Maps a subdivision level to a grid of non-overlapping square pixel
//! regions on a face image. At level `L` the face is split into
//! `n = 2^(L-1)` rows and `n` columns, each tile `S / n` pixels wide.
//!
//! ```text
//!  level 1        level 2          level 3
//! ┌───────┐    ┌───┬───┐    ┌─┬─┬─┬─┐
//! │       │    │0,0│0,1│    ├─┼─┼─┼─┤
//! │  0,0  │    ├───┼───┤    ├─┼─┼─┼─┤
//! │       │    │1,0│1,1│    ├─┼─┼─┼─┤
//! └───────┘    └───┴───┘    └─┴─┴─┴─┘
//! ```
//!
//! The side length must split evenly. A face that does not divide into the
//! grid is reported as [`GridError::NotDivisible`] instead of producing
//! tiles of the wrong size.

mod types;

pub use types::{
    GridError, SubdivisionLevel, TileCoord, TileGrid, TileRegion, TileRegions, MAX_LEVEL,
    MIN_LEVEL,
};

/// Parse a level list such as `"2"`, `"1-4"` or `"1,3-4"`.
///
/// Ranges are inclusive. The result is sorted and free of duplicates.
///
/// # Examples
///
/// ```
/// use cubetile::grid::parse_levels;
///
/// let levels: Vec<u8> = parse_levels("1-3,5").unwrap().iter().map(|l| l.value()).collect();
/// assert_eq!(levels, vec![1, 2, 3, 5]);
/// ```
pub fn parse_levels(s: &str) -> Result<Vec<SubdivisionLevel>, GridError> {
    let mut levels = Vec::new();

    for part in s.split(',').map(str::trim) {
        if part.is_empty() {
            return Err(GridError::InvalidLevelValue(s.to_string()));
        }

        match part.split_once('-') {
            Some((start, end)) => {
                let start: SubdivisionLevel = start.parse()?;
                let end: SubdivisionLevel = end.parse()?;
                if start > end {
                    return Err(GridError::InvalidLevelValue(part.to_string()));
                }
                for level in start.value()..=end.value() {
                    levels.push(SubdivisionLevel::new(level)?);
                }
            }
            None => levels.push(part.parse()?),
        }
    }

    levels.sort();
    levels.dedup();
    Ok(levels)
}

/// Format a level list back into the compact form accepted by [`parse_levels`].
pub fn format_levels(levels: &[SubdivisionLevel]) -> String {
    let mut sorted = levels.to_vec();
    sorted.sort();
    sorted.dedup();

    let mut parts: Vec<String> = Vec::new();
    let mut i = 0;
    while i < sorted.len() {
        let start = sorted[i].value();
        let mut end = start;
        while i + 1 < sorted.len() && sorted[i + 1].value() == end + 1 {
            end += 1;
            i += 1;
        }
        if start == end {
            parts.push(start.to_string());
        } else {
            parts.push(format!("{}-{}", start, end));
        }
        i += 1;
    }
    parts.join(",")
}
