//! Stopwatch time formatting

/// Display text for a zeroed stopwatch
pub const ZERO_TIME: &str = "00:00.000";

/// Format a duration in seconds as `[-]MM:SS.mmm`.
///
/// Every component is truncated, never rounded. Negative input gets a leading
/// minus sign unless `force_positive` is set, in which case the magnitude is
/// shown. Minutes grow past two digits instead of wrapping.
pub fn format_time(seconds: f64, force_positive: bool) -> String {
    let seconds = if seconds.is_finite() { seconds } else { 0.0 };
    let sign = if seconds < 0.0 && !force_positive { "-" } else { "" };

    let total_millis = (seconds.abs() * 1000.0).floor() as u64;
    let mins = total_millis / 60_000;
    let secs = (total_millis / 1000) % 60;
    let millis = total_millis % 1000;

    format!("{}{:02}:{:02}.{:03}", sign, mins, secs, millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_known_values() {
        assert_eq!(format_time(65.4321, false), "01:05.432");
        assert_eq!(format_time(0.0, false), ZERO_TIME);
        assert_eq!(format_time(-1.5, false), "-00:01.500");
        assert_eq!(format_time(105.0, true), "01:45.000");
    }

    #[test]
    fn truncates_instead_of_rounding() {
        assert_eq!(format_time(59.9999, false), "00:59.999");
        assert_eq!(format_time(119.9996, false), "01:59.999");
    }

    #[test]
    fn negative_is_prefixed_positive_form() {
        for d in [0.25, 1.0, 42.123, 600.5, 3599.999] {
            assert_eq!(format_time(-d, false), format!("-{}", format_time(d, false)));
            assert_eq!(format_time(-d, true), format_time(d, false));
        }
    }

    #[test]
    fn minutes_do_not_wrap() {
        assert_eq!(format_time(6000.0, false), "100:00.000");
    }

    #[test]
    fn non_finite_formats_as_zero() {
        assert_eq!(format_time(f64::NAN, false), ZERO_TIME);
        assert_eq!(format_time(f64::INFINITY, true), ZERO_TIME);
    }

    #[test]
    fn non_negative_output_has_fixed_shape() {
        for d in [0.0, 0.001, 9.5, 61.25, 599.999] {
            let text = format_time(d, false);
            let bytes = text.as_bytes();
            assert_eq!(text.len(), 9, "{}", text);
            assert_eq!(bytes[2], b':');
            assert_eq!(bytes[5], b'.');
            assert!(text.chars().filter(|c| *c != ':' && *c != '.').all(|c| c.is_ascii_digit()));
        }
    }
}
