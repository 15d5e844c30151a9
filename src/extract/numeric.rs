//! Numeric cell parsing for the sources' locale: "." groups thousands and
//! "," is the decimal separator, so "1.234,56" means 1234.56.

/// Parse a price cell into a float, or `None` when the cell carries no
/// number. Never errors: a blank or decorative cell is an absent value, not
/// a failed row.
///
/// The thousands dots must be stripped before the comma is reinterpreted as
/// a decimal point; handing "1.234,56" to the stock float parser as-is is
/// invalid in its grammar.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .replace('\u{a0}', "")
        .replace('.', "")
        .replace(',', ".")
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    if !cleaned.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_thousands_dot_decimal_comma() {
        assert_eq!(parse_decimal("1.234,56"), Some(1234.56));
        assert_eq!(parse_decimal("48.000,00"), Some(48000.0));
    }

    #[test]
    fn plain_integers_pass_through() {
        assert_eq!(parse_decimal("42"), Some(42.0));
        assert_eq!(parse_decimal("45,50"), Some(45.5));
    }

    #[test]
    fn strips_currency_symbols_and_nbsp() {
        assert_eq!(parse_decimal("U$S\u{a0}2.35"), Some(235.0));
        assert_eq!(parse_decimal("$ 1.500"), Some(1500.0));
    }

    #[test]
    fn empty_and_non_numeric_are_absent() {
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("   "), None);
        assert_eq!(parse_decimal("s/d"), None);
        assert_eq!(parse_decimal("-"), None);
    }

    #[test]
    fn negative_values_keep_their_sign() {
        assert_eq!(parse_decimal("-3,5"), Some(-3.5));
    }
}
