//! Booking window arithmetic.
//!
//! Booking windows are half-open date ranges `[start, end)`: the start day is
//! rented, the end day is free again. Two windows conflict exactly when each
//! one starts before the other ends.

use chrono::NaiveDate;

/// Returns true when the window is well-formed (`start < end`).
///
/// A zero-length window rents nothing and is rejected.
pub fn is_valid_window(start: NaiveDate, end: NaiveDate) -> bool {
    start < end
}

/// Half-open overlap test for two booking windows.
///
/// Windows that merely touch (one ends the day the other starts) do not
/// overlap.
pub fn windows_overlap(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    a_start < b_end && a_end > b_start
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_valid_window() {
        assert!(is_valid_window(date(2024, 1, 5), date(2024, 1, 10)));
    }

    #[test]
    fn test_inverted_window_is_invalid() {
        assert!(!is_valid_window(date(2024, 1, 10), date(2024, 1, 5)));
    }

    #[test]
    fn test_zero_length_window_is_invalid() {
        assert!(!is_valid_window(date(2024, 1, 5), date(2024, 1, 5)));
    }

    #[test]
    fn test_overlapping_windows() {
        // [03-01, 03-10) vs [03-05, 03-15) overlap on [03-05, 03-10)
        assert!(windows_overlap(
            date(2024, 3, 1),
            date(2024, 3, 10),
            date(2024, 3, 5),
            date(2024, 3, 15),
        ));
    }

    #[test]
    fn test_contained_window_overlaps() {
        assert!(windows_overlap(
            date(2024, 3, 1),
            date(2024, 3, 31),
            date(2024, 3, 10),
            date(2024, 3, 12),
        ));
    }

    #[test]
    fn test_boundary_touch_does_not_overlap() {
        // [03-01, 03-10) vs [03-10, 03-20): the device is handed back on the
        // 10th and picked up the same day.
        assert!(!windows_overlap(
            date(2024, 3, 1),
            date(2024, 3, 10),
            date(2024, 3, 10),
            date(2024, 3, 20),
        ));
    }

    #[test]
    fn test_disjoint_windows_do_not_overlap() {
        assert!(!windows_overlap(
            date(2024, 3, 1),
            date(2024, 3, 5),
            date(2024, 3, 20),
            date(2024, 3, 25),
        ));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let (a1, a2) = (date(2024, 3, 1), date(2024, 3, 10));
        let (b1, b2) = (date(2024, 3, 5), date(2024, 3, 15));
        assert_eq!(
            windows_overlap(a1, a2, b1, b2),
            windows_overlap(b1, b2, a1, a2)
        );
    }
}
