/// Format a floating-point number with thousands separators and a fixed number
/// of decimal places.
///
/// # Examples
///
/// ```
/// use sales_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5,  1), "1,234.5");
/// assert_eq!(format_number(1234567.0, 0), "1,234,567");
/// assert_eq!(format_number(0.0, 2), "0.00");
/// assert_eq!(format_number(-9876.5, 1), "-9,876.5");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    if !value.is_finite() {
        return "n/a".to_string();
    }

    let negative = value < 0.0;
    let abs_value = value.abs();

    // Nudge by half an ULP at the target precision so exact midpoints round up.
    let factor = 10_f64.powi(decimals as i32);
    let epsilon = f64::EPSILON * abs_value * factor;
    let rounded = ((abs_value * factor) + epsilon).round() / factor;

    let integer_part = rounded.trunc() as u64;
    let grouped = group_thousands(&integer_part.to_string());

    let result = if decimals == 0 {
        grouped
    } else {
        let frac_str = format!("{:.prec$}", rounded.fract(), prec = decimals as usize);
        // "0.50" -> ".50"
        format!("{}{}", grouped, &frac_str[1..])
    };

    if negative {
        format!("-{}", result)
    } else {
        result
    }
}

/// Format a sales figure given in millions of units, e.g. `"41.36M"`.
///
/// ```
/// use sales_core::formatting::format_sales;
///
/// assert_eq!(format_sales(41.36), "41.36M");
/// assert_eq!(format_sales(1520.0), "1,520.00M");
/// ```
pub fn format_sales(millions: f64) -> String {
    if !millions.is_finite() {
        return "n/a".to_string();
    }
    format!("{}M", format_number(millions, 2))
}

/// Calculate `(part / whole) * 100`, rounded to `decimal_places`.
///
/// Returns `0.0` if `whole` is zero.
///
/// ```
/// use sales_core::formatting::percentage;
///
/// assert!((percentage(50.0, 200.0, 1) - 25.0).abs() < 1e-9);
/// assert_eq!(percentage(0.0, 0.0, 2), 0.0);
/// ```
pub fn percentage(part: f64, whole: f64, decimal_places: u32) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }
    let raw = (part / whole) * 100.0;
    let factor = 10_f64.powi(decimal_places as i32);
    (raw * factor).round() / factor
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let remainder = s.len() % 3;
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().enumerate() {
        if i != 0 && i % 3 == remainder {
            result.push(',');
        }
        result.push(c);
    }
    result
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_zero() {
        assert_eq!(format_number(0.0, 0), "0");
    }

    #[test]
    fn test_format_number_with_thousands() {
        assert_eq!(format_number(16719.0, 0), "16,719");
        assert_eq!(format_number(1_000_000.0, 0), "1,000,000");
    }

    #[test]
    fn test_format_number_rounds_half_up() {
        assert_eq!(format_number(2.345, 2), "2.35");
    }

    #[test]
    fn test_format_number_nan() {
        assert_eq!(format_number(f64::NAN, 2), "n/a");
    }

    #[test]
    fn test_format_sales_small() {
        assert_eq!(format_sales(0.1), "0.10M");
        assert_eq!(format_sales(0.0), "0.00M");
    }

    #[test]
    fn test_format_sales_nan() {
        assert_eq!(format_sales(f64::NAN), "n/a");
    }

    #[test]
    fn test_percentage_rounding() {
        assert!((percentage(1.0, 3.0, 1) - 33.3).abs() < 1e-9);
    }

    #[test]
    fn test_group_thousands_boundaries() {
        assert_eq!(group_thousands("7"), "7");
        assert_eq!(group_thousands("1234"), "1,234");
        assert_eq!(group_thousands("1234567"), "1,234,567");
    }
}
