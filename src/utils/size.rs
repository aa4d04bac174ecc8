//! Size formatting utilities.
//!
//! This module turns raw byte counts into the strings printed by the
//! dispatcher and the aggregator, either as plain decimal integers or with a
//! decimal (1000-based) unit suffix.

/// Decimal unit scales paired with their suffixes, smallest first.
const UNITS: &[(u64, &str)] = &[
    (1_000, "K"),
    (1_000_000, "M"),
    (1_000_000_000, "G"),
    (1_000_000_000_000, "T"),
    (1_000_000_000_000_000, "P"),
];

/// Format a byte count for display.
///
/// When `human` is `false` the value is printed unchanged. When `true`, the
/// largest unit among K, M, G, T and P whose scale does not exceed the value
/// is selected, the value is integer-divided by that scale (truncating, no
/// rounding) and the suffix is appended. Values below 1000 carry no suffix,
/// and values of 1000P or more stay expressed in P.
///
/// # Examples
///
/// ```
/// # use dir_sizer::utils::format_size;
/// assert_eq!(format_size(2_500, false), "2500");
/// assert_eq!(format_size(2_500, true), "2K");
/// assert_eq!(format_size(999, true), "999");
/// ```
#[must_use]
pub fn format_size(size: u64, human: bool) -> String {
    if !human {
        return size.to_string();
    }

    UNITS
        .iter()
        .rev()
        .find(|(scale, _)| size >= *scale)
        .map_or_else(
            || size.to_string(),
            |(scale, suffix)| format!("{}{suffix}", size / scale),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_plain_is_unchanged() {
        assert_eq!(format_size(0, false), "0");
        assert_eq!(format_size(999, false), "999");
        assert_eq!(format_size(1_000, false), "1000");
        assert_eq!(format_size(123_456_789, false), "123456789");
        assert_eq!(format_size(u64::MAX, false), u64::MAX.to_string());
    }

    #[test]
    fn test_format_size_human_below_one_kilo() {
        assert_eq!(format_size(0, true), "0");
        assert_eq!(format_size(1, true), "1");
        assert_eq!(format_size(500, true), "500");
        assert_eq!(format_size(999, true), "999");
    }

    #[test]
    fn test_format_size_human_unit_boundaries() {
        assert_eq!(format_size(1_000, true), "1K");
        assert_eq!(format_size(999_999, true), "999K");
        assert_eq!(format_size(1_000_000, true), "1M");
        assert_eq!(format_size(999_999_999, true), "999M");
        assert_eq!(format_size(1_000_000_000, true), "1G");
        assert_eq!(format_size(1_000_000_000_000, true), "1T");
        assert_eq!(format_size(1_000_000_000_000_000, true), "1P");
    }

    #[test]
    fn test_format_size_human_truncates() {
        // 2500 bytes is 2.5K, which truncates rather than rounds
        assert_eq!(format_size(2_500, true), "2K");
        assert_eq!(format_size(1_999, true), "1K");
        assert_eq!(format_size(304_000, true), "304K");
        assert_eq!(format_size(1_999_999, true), "1M");
    }

    #[test]
    fn test_format_size_human_is_decimal_not_binary() {
        assert_eq!(format_size(1_023, true), "1K");
        assert_eq!(format_size(1_024, true), "1K");
        assert_eq!(format_size(1_048_576, true), "1M");
    }

    #[test]
    fn test_format_size_human_stays_in_peta() {
        assert_eq!(format_size(1_000_000_000_000_000_000, true), "1000P");
        assert_eq!(format_size(u64::MAX, true), "18446P");
    }
}
