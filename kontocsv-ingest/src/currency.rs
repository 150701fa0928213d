//! Decode statement amounts like `"1.234,56-"` into exact decimals.

use std::str::FromStr;

use bigdecimal::BigDecimal;

use crate::error::ParseError;

/// Parse an amount as the statement prints it: `.` as thousands separator,
/// `,` as decimal mark, and a mandatory trailing sign character.
pub fn decode_amount(text: &str) -> Result<BigDecimal, ParseError> {
    let negative = match text.chars().last() {
        Some('+') => false,
        Some('-') => true,
        _ => return Err(ParseError::MalformedCurrency(text.to_string())),
    };

    let magnitude: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    let amount = BigDecimal::from_str(&magnitude)
        .map_err(|_| ParseError::MalformedCurrency(text.to_string()))?;

    Ok(if negative { -amount } else { amount })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_amount() {
        assert_eq!(decode_amount("100,00+").unwrap(), BigDecimal::from_str("100.00").unwrap());
    }

    #[test]
    fn test_negative_amount() {
        assert_eq!(
            decode_amount("1.234,56-").unwrap(),
            BigDecimal::from_str("-1234.56").unwrap()
        );
    }

    #[test]
    fn test_thousands_separator_dropped() {
        assert_eq!(
            decode_amount("1.500,00+").unwrap(),
            BigDecimal::from_str("1500.00").unwrap()
        );
    }

    #[test]
    fn test_missing_sign_suffix_is_rejected() {
        assert_eq!(
            decode_amount("50,00"),
            Err(ParseError::MalformedCurrency("50,00".to_string()))
        );
        assert_eq!(decode_amount(""), Err(ParseError::MalformedCurrency(String::new())));
    }

    #[test]
    fn test_sign_without_digits_is_rejected() {
        assert_eq!(decode_amount("+"), Err(ParseError::MalformedCurrency("+".to_string())));
    }

    #[test]
    fn test_sign_roundtrips_through_formatting() {
        use crate::types::format_amount;

        assert_eq!(format_amount(&decode_amount("100,00+").unwrap()), "100.00");
        assert_eq!(format_amount(&decode_amount("100,00-").unwrap()), "-100.00");
    }
}
