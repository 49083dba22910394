use serde::{Deserialize, Deserializer};

/// Deserializes a field, substituting its default when the stored value is unusable.
pub fn ok_or_default<'a, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: Deserialize<'a> + Default,
    D: Deserializer<'a>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// Two decimals of the exact binary value, like JavaScript's `toFixed(2)`.
///
/// Exact ties round away from zero and negative values keep their sign even
/// when they round to zero (`-0.001` is `-0.00`).
pub fn format_price(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();

    // a tie at the third decimal is exactly representable only as an odd multiple of 1/8
    let scaled = abs * 8.0;
    let is_tie = scaled.fract() == 0.0 && scaled % 2.0 == 1.0 && abs < 1e15;

    if is_tie {
        let cents = (abs * 100.0).ceil() as u64;
        format!("{sign}{}.{:02}", cents / 100, cents % 100)
    } else {
        format!("{sign}{abs:.2}")
    }
}

/// Fixed decimals with `,` between thousands: `1234.5` at 1 decimal is `1,234.5`.
pub fn format_with_commas(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(formatted.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let is_zero = formatted.chars().all(|c| c == '0' || c == '.');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prices_use_two_decimals() {
        assert_eq!(format_price(105.0), "105.00");
        assert_eq!(format_price(-10.0), "-10.00");
        assert_eq!(format_price(1.005_1), "1.01");
        assert_eq!(format_price(f64::NAN), "NaN");
    }

    #[test]
    fn prices_round_the_exact_binary_value() {
        // 0.015 and 170.105 are stored just below the tie
        assert_eq!(format_price(0.015), "0.01");
        assert_eq!(format_price(170.105), "170.10");
        assert_eq!(format_price(2.675), "2.67");

        // exact ties round away from zero
        assert_eq!(format_price(0.125), "0.13");
        assert_eq!(format_price(0.375), "0.38");
        assert_eq!(format_price(-1.625), "-1.63");
        assert_eq!(format_price(2.5), "2.50");
    }

    #[test]
    fn price_signs_and_infinities() {
        assert_eq!(format_price(-0.001), "-0.00");
        assert_eq!(format_price(0.0), "0.00");
        assert_eq!(format_price(-0.0), "0.00");
        assert_eq!(format_price(f64::INFINITY), "Infinity");
        assert_eq!(format_price(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn thousands_are_grouped() {
        assert_eq!(format_with_commas(0.0, 0), "0");
        assert_eq!(format_with_commas(999.0, 0), "999");
        assert_eq!(format_with_commas(1000.0, 0), "1,000");
        assert_eq!(format_with_commas(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_with_commas(-1234.5, 1), "-1,234.5");
        assert_eq!(format_with_commas(-0.01, 0), "0");
    }
}
