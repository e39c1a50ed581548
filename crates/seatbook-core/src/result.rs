//! Result type aliases for Seatbook.

use crate::SeatbookError;

/// A specialized `Result` type for Seatbook operations.
pub type SeatbookResult<T> = Result<T, SeatbookError>;
