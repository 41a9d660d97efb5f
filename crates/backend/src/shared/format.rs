/// Inserts comma separators into the integer part of a plain decimal string
fn group_thousands(digits: &str) -> String {
    let (sign, unsigned) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::new();
    for (i, ch) in integer.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let mut result: String = sign.to_string();
    result.extend(grouped.chars().rev());
    if let Some(fraction) = fraction {
        result.push('.');
        result.push_str(fraction);
    }
    result
}

/// Formats a count with thousands separators
///
/// # Examples
/// ```
/// use backend::shared::format::format_number;
/// assert_eq!(format_number(1234567), "1,234,567");
/// assert_eq!(format_number(42), "42");
/// ```
pub fn format_number(n: usize) -> String {
    group_thousands(&n.to_string())
}

/// Fixed-point text of `value`; non-finite becomes 0 and a rounded negative zero loses its sign
fn fixed(value: f64, decimals: usize) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let text = format!("{:.*}", decimals, value);
    match text.strip_prefix('-') {
        Some(unsigned) if unsigned.chars().all(|c| c == '0' || c == '.') => unsigned.to_string(),
        _ => text,
    }
}

/// "$1,234" rounded to whole dollars; missing or non-finite values render as "$0"
pub fn format_currency(value: Option<f64>) -> String {
    format!("${}", group_thousands(&fixed(value.unwrap_or(0.0), 0)))
}

/// "$1,234.56"
pub fn format_currency_cents(value: Option<f64>) -> String {
    format!("${}", group_thousands(&fixed(value.unwrap_or(0.0), 2)))
}

/// "1,234" without a currency symbol
pub fn format_amount(value: f64) -> String {
    group_thousands(&fixed(value, 0))
}

/// "12.50%" for `decimals == 2`, "13%" for `decimals == 0`
pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{}%", fixed(value, decimals))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567890), "1,234,567,890");
    }

    #[test]
    fn currency_rounds_to_whole_dollars() {
        assert_eq!(format_currency(Some(1234567.4)), "$1,234,567");
        assert_eq!(format_currency(Some(999.6)), "$1,000");
        assert_eq!(format_currency(Some(0.0)), "$0");
        assert_eq!(format_currency(Some(-1234.0)), "$-1,234");
        assert_eq!(format_currency(None), "$0");
        assert_eq!(format_currency(Some(f64::NAN)), "$0");
    }

    #[test]
    fn currency_with_cents() {
        assert_eq!(format_currency_cents(Some(1500.25)), "$1,500.25");
        assert_eq!(format_currency_cents(Some(12.0)), "$12.00");
        assert_eq!(format_currency_cents(None), "$0.00");
    }

    #[test]
    fn plain_amounts_and_percentages() {
        assert_eq!(format_amount(98765.4), "98,765");
        assert_eq!(format_amount(f64::INFINITY), "0");
        assert_eq!(format_percent(16.6666, 2), "16.67%");
        assert_eq!(format_percent(100.0, 2), "100.00%");
        assert_eq!(format_percent(66.6, 0), "67%");
        assert_eq!(format_percent(f64::NAN, 2), "0.00%");
    }

    #[test]
    fn negative_zero_renders_unsigned() {
        let empty: f64 = std::iter::empty::<f64>().sum();
        assert_eq!(format_currency(Some(empty)), "$0");
        assert_eq!(format_currency(Some(-0.0)), "$0");
        assert_eq!(format_currency(Some(-0.4)), "$0");
        assert_eq!(format_currency_cents(Some(-0.0)), "$0.00");
        assert_eq!(format_currency_cents(Some(-0.004)), "$0.00");
        assert_eq!(format_amount(-0.0), "0");
        assert_eq!(format_percent(-0.0, 2), "0.00%");
        assert_eq!(format_currency(Some(-0.6)), "$-1");
        assert_eq!(format_currency_cents(Some(-12.5)), "$-12.50");
    }
}
