//! Night counting for hotel stays.

use chrono::NaiveDateTime;

/// Seconds in a day.
pub const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Counts the billable nights between check-in and check-out.
///
/// The stay length is rounded up to whole days, and never drops below one
/// night. A check-out at or before check-in still bills a single night.
///
/// # Examples
///
/// ```
/// use booking_engine::calculation::count_nights;
/// use chrono::NaiveDateTime;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap();
///
/// // 15:00 to 11:00 two days later is 1 day 20 hours, billed as 2 nights.
/// assert_eq!(count_nights(at("2026-03-01 15:00"), at("2026-03-03 11:00")), 2);
///
/// // Same-day or reversed dates still bill one night.
/// assert_eq!(count_nights(at("2026-03-01 00:00"), at("2026-03-01 00:00")), 1);
/// assert_eq!(count_nights(at("2026-03-05 00:00"), at("2026-03-01 00:00")), 1);
/// ```
pub fn count_nights(check_in: NaiveDateTime, check_out: NaiveDateTime) -> u32 {
    let seconds = (check_out - check_in).num_seconds();
    if seconds <= 0 {
        return 1;
    }
    let days = (seconds + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY;
    u32::try_from(days).unwrap_or(u32::MAX).max(1)
}
