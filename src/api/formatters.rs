//! Masking rules for the card inputs.
//!
//! Every function here is pure: the html form posts whatever the user typed and
//! the server answers with the masked display string.

use crate::consts;

/// Keeps only the ascii digits of `value`
pub fn digits_only(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Groups the card digits in chunks of four separated by a single space.
///
/// Only the first run of 4 to 16 digits is kept. Fewer than four digits are
/// returned as they are, without grouping.
pub fn format_card_number(raw: &str) -> String {
    let digits = digits_only(raw);
    if digits.len() < consts::CARD_NUMBER_MIN_RUN {
        return digits;
    }

    digits
        .as_bytes()
        .chunks(consts::CARD_NUMBER_GROUP_SIZE)
        .take(consts::CARD_NUMBER_MAX_DIGITS / consts::CARD_NUMBER_GROUP_SIZE)
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .collect::<Vec<String>>()
        .join(" ")
}

/// Renders the expiry as `MM / YY`, or a prefix of it while typing
pub fn format_expiry(raw: &str) -> String {
    let digits: String = digits_only(raw)
        .chars()
        .take(consts::EXPIRY_DIGITS)
        .collect();

    if digits.len() < 2 {
        return digits;
    }

    let (month, year) = digits.split_at(2);
    format!("{month}{}{year}", consts::EXPIRY_SEPARATOR)
}

pub fn format_cvv(raw: &str) -> String {
    digits_only(raw).chars().take(consts::CVV_DIGITS).collect()
}

/// `MM / YY` display into the `YYYY-MM` value the confirmation api expects.
///
/// Only meaningful for a complete expiry, validation rejects anything shorter.
pub fn expiry_to_year_month(expiry_display: &str) -> String {
    let digits = digits_only(expiry_display);
    let split = digits.len().min(2);
    let (month, year) = digits.split_at(split);

    format!("20{year}-{month}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_format_card_number_groups_by_four() {
        assert_eq!(format_card_number("4111111111111111"), "4111 1111 1111 1111");
        assert_eq!(format_card_number("411111"), "4111 11");
        assert_eq!(format_card_number("4111"), "4111");
    }

    #[test]
    fn test_format_card_number_strips_separators() {
        assert_eq!(format_card_number("4111-1111 1111.1111"), "4111 1111 1111 1111");
        assert_eq!(format_card_number("4111 1111 1"), "4111 1111 1");
    }

    #[test]
    fn test_format_card_number_caps_at_sixteen_digits() {
        assert_eq!(
            format_card_number("41111111111111119999"),
            "4111 1111 1111 1111"
        );
    }

    #[test]
    fn test_format_card_number_short_or_non_numeric_input() {
        assert_eq!(format_card_number("41"), "41");
        assert_eq!(format_card_number("4a1"), "41");
        assert_eq!(format_card_number("abcd"), "");
        assert_eq!(format_card_number(""), "");
    }

    #[test]
    fn test_format_expiry() {
        assert_eq!(format_expiry("1225"), "12 / 25");
        assert_eq!(format_expiry("1"), "1");
        assert_eq!(format_expiry("12"), "12 / ");
        assert_eq!(format_expiry("12 / 2"), "12 / 2");
        assert_eq!(format_expiry("12/2599"), "12 / 25");
        assert_eq!(format_expiry("ab"), "");
    }

    #[test]
    fn test_format_cvv() {
        assert_eq!(format_cvv("12a3"), "123");
        assert_eq!(format_cvv("98765"), "987");
        assert_eq!(format_cvv("x"), "");
    }

    #[test]
    fn test_expiry_to_year_month() {
        assert_eq!(expiry_to_year_month("12 / 25"), "2025-12");
        assert_eq!(expiry_to_year_month("07 / 31"), "2031-07");
    }

    proptest! {
        #[test]
        fn card_number_groups_preserve_digits(digits in "[0-9]{0,16}") {
            let formatted = format_card_number(&digits);
            let groups: Vec<&str> = formatted.split(' ').filter(|g| !g.is_empty()).collect();

            prop_assert_eq!(digits_only(&formatted), digits.clone());
            prop_assert!(digits_only(&formatted).len() <= 16);

            if let Some((last, head)) = groups.split_last() {
                prop_assert!(head.iter().all(|g| g.len() == 4));
                prop_assert!(!last.is_empty() && last.len() <= 4);
            }
        }

        #[test]
        fn expiry_never_consumes_more_than_four_digits(raw in "[0-9a-z /]{0,12}") {
            let formatted = format_expiry(&raw);
            prop_assert!(digits_only(&formatted).len() <= 4);
        }
    }
}
