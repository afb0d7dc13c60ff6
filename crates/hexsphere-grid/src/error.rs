//! Grid construction and lookup errors.

/// Errors that can occur when building a grid or addressing its cells.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// The subdivision frequency is below 1.
    #[error("invalid grid frequency {0}: must be at least 1")]
    InvalidFrequency(i64),

    /// The subdivision frequency would overflow the cell or mesh index space.
    #[error("grid frequency {frequency} is too large (maximum {max})")]
    FrequencyTooLarge {
        /// The requested frequency.
        frequency: i64,
        /// The largest supported frequency.
        max: u32,
    },

    /// A cell index does not exist in the grid of the given frequency.
    #[error("cell index {index} out of range for frequency {frequency} ({count} cells)")]
    CellOutOfRange {
        /// Frequency of the grid being addressed.
        frequency: u32,
        /// The offending index.
        index: u32,
        /// Number of cells in that grid.
        count: u32,
    },
}
