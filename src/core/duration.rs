use chrono::Duration;

use crate::core::error::{TodoError, TodoResult};

/// Parses a compact deadline offset like "1d 2h 30m" into a single duration.
///
/// A token is an integer immediately followed by `d`, `h`, or `m`. Anything
/// else is skipped, repeated units accumulate, and an input with no tokens is
/// a zero offset. The only failure is a magnitude too large for the duration
/// arithmetic.
pub fn parse_offset(spec: &str) -> TodoResult<Duration> {
    let mut total = Duration::zero();
    let mut rest = spec;

    while let Some(start) = rest.find(|c: char| c.is_ascii_digit()) {
        let after = &rest[start..];
        let digits_len = after
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(after.len());
        let digits = &after[..digits_len];

        match after[digits_len..].chars().next() {
            Some(unit @ ('d' | 'h' | 'm')) => {
                let value: i64 = digits
                    .parse()
                    .map_err(|_| TodoError::InvalidOffset(digits.to_string()))?;
                let piece = match unit {
                    'd' => Duration::try_days(value),
                    'h' => Duration::try_hours(value),
                    _ => Duration::try_minutes(value),
                }
                .ok_or_else(|| TodoError::InvalidOffset(digits.to_string()))?;
                total = total
                    .checked_add(&piece)
                    .ok_or_else(|| TodoError::InvalidOffset(spec.to_string()))?;
                rest = &after[digits_len + 1..];
            }
            _ => rest = &after[digits_len..],
        }
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_combined_tokens() {
        let parsed = parse_offset("1d 2h 30m").unwrap();
        let expected = Duration::days(1) + Duration::hours(2) + Duration::minutes(30);
        assert_eq!(parsed, expected);
    }

    #[test]
    fn token_order_does_not_matter() {
        assert_eq!(parse_offset("30m 1d 2h").unwrap(), parse_offset("1d 2h 30m").unwrap());
    }

    #[test]
    fn empty_and_garbage_inputs_are_zero() {
        assert_eq!(parse_offset("").unwrap(), Duration::zero());
        assert_eq!(parse_offset("garbage").unwrap(), Duration::zero());
    }

    #[test]
    fn repeated_units_accumulate() {
        assert_eq!(parse_offset("1h 2h").unwrap(), Duration::hours(3));
    }

    #[test]
    fn unit_must_immediately_follow_the_digits() {
        assert_eq!(parse_offset("1 d").unwrap(), Duration::zero());
        assert_eq!(parse_offset("2h5").unwrap(), Duration::hours(2));
    }

    #[test]
    fn surrounding_noise_is_ignored() {
        assert_eq!(parse_offset("due in 3h tops").unwrap(), Duration::hours(3));
    }

    #[test]
    fn oversized_magnitudes_are_an_error() {
        // Too wide for i64.
        assert!(matches!(
            parse_offset("99999999999999999999d"),
            Err(TodoError::InvalidOffset(_))
        ));
        // Parses as i64 but overflows the duration.
        assert!(matches!(
            parse_offset("9223372036854775807d"),
            Err(TodoError::InvalidOffset(_))
        ));
    }
}
