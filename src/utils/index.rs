//! Index normalization shared by vector and matrix accessors.

use crate::error::{SpError, SpResult};

/// Resolve a possibly negative index against `len`.
///
/// Negative values count from the end (`-1` is the last element). Anything
/// that still falls outside `0..len` is `OutOfRange`.
pub fn normalize(index: isize, len: usize) -> SpResult<usize> {
    let resolved = if index < 0 {
        len as isize + index
    } else {
        index
    };
    if resolved < 0 || resolved as usize >= len {
        return Err(SpError::OutOfRange { index, len });
    }
    Ok(resolved as usize)
}
