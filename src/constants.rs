//! Format constants for Dst index bulletins
//!
//! This module holds the fixed-width record layout and the special values
//! used by the bulletin format.

// =============================================================================
// Record Format
// =============================================================================

/// Literal marker opening every record
pub const RECORD_MARKER: &[u8] = b"DST";

/// Minimum number of bytes a record line must carry
pub const MIN_RECORD_WIDTH: usize = 120;

/// Hourly readings per record (one calendar day)
pub const HOURS_PER_RECORD: usize = 24;

/// Width of each hourly value field
pub const HOURLY_FIELD_WIDTH: usize = 4;

/// Missing-data marker; ends extraction for the rest of the line
pub const MISSING_VALUE: i32 = 9999;

/// Smallest year accepted as a calendar year
pub const MIN_YEAR: i32 = 1;

// =============================================================================
// Field Layout
// =============================================================================

/// Byte ranges of every field in a record line
///
/// | bytes   | field       | content                     |
/// |---------|-------------|-----------------------------|
/// | 0..3    | marker      | `DST`                       |
/// | 3..5    | year (low)  | 2 digits                    |
/// | 5..7    | month       | 2 digits                    |
/// | 7       | `*`         | literal                     |
/// | 8..10   | day         | 2 digits                    |
/// | 10..12  | (ignored)   | letters or spaces           |
/// | 12      | `X`         | literal                     |
/// | 13      | version     | digit or space              |
/// | 14..16  | year (high) | 2 digits                    |
/// | 16..20  | base        | `[ 0-9]{4}`, ignored        |
/// | 20..116 | hourly      | 24 x `[- 0-9]{4}`           |
/// | 116..120| mean        | `[- 0-9]{4}`, ignored       |
pub mod layout {
    use std::ops::Range;

    pub const MARKER: Range<usize> = 0..3;
    pub const YEAR_LOW: Range<usize> = 3..5;
    pub const MONTH: Range<usize> = 5..7;
    pub const STAR: usize = 7;
    pub const DAY: Range<usize> = 8..10;
    pub const FILLER: Range<usize> = 10..12;
    pub const X_MARK: usize = 12;
    pub const VERSION: usize = 13;
    pub const YEAR_HIGH: Range<usize> = 14..16;
    pub const BASE: Range<usize> = 16..20;
    pub const HOURLY: Range<usize> = 20..116;
    pub const MEAN: Range<usize> = 116..120;

    /// Byte range of the hourly field at `index` (0-based)
    pub const fn hourly_field(index: usize) -> Range<usize> {
        let start = HOURLY.start + index * super::HOURLY_FIELD_WIDTH;
        start..start + super::HOURLY_FIELD_WIDTH
    }
}
