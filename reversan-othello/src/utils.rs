//! Miscellaneous project utilities.

use crate::EDGE_LENGTH;
use std::fmt::{self, Formatter};

const COLUMN_HEADER: &str = "  A B C D E F G H";

/// Format 64 cells into a labelled 8x8 grid, upper-left first.
/// `cells` must yield exactly 64 items.
pub fn format_grid<T: Iterator<Item = char>>(mut cells: T, f: &mut Formatter) -> fmt::Result {
    write!(f, "{}", COLUMN_HEADER)?;

    for row in 1..=EDGE_LENGTH {
        write!(f, "\n{}", row)?;
        for _ in 0..EDGE_LENGTH {
            write!(f, " {}", cells.next().ok_or(fmt::Error)?)?;
        }
        write!(f, " {}", row)?;
    }
    write!(f, "\n{}", COLUMN_HEADER)?;

    match cells.next() {
        None => Ok(()),
        _ => Err(fmt::Error),
    }
}
