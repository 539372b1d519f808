/// Formats `value` with exactly `digits` fractional digits.
///
/// Exact ties round away from zero (`0.125` -> `0.13`), negative zero prints
/// without a sign, and non-finite values print as `NaN`, `Infinity` or
/// `-Infinity`.
pub fn to_fixed(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let magnitude = value.abs();
    match round_exact_tie(magnitude, digits) {
        Some(units) => format!("{}{}", sign, insert_point(units, digits)),
        None => format!("{}{:.*}", sign, digits, magnitude),
    }
}

/// Returns the scaled integer when `magnitude` sits exactly halfway between
/// two representable outputs, rounded up. `None` for every other value.
fn round_exact_tie(magnitude: f64, digits: usize) -> Option<u128> {
    // Past this, fixed-point output switches to exponent form anyway.
    const FIXED_LIMIT: f64 = 1e21;

    let shift = u32::try_from(digits + 1).ok()?;
    if shift > 16 || magnitude >= FIXED_LIMIT {
        return None;
    }
    // A decimal tie with `digits + 1` places has at most that many binary places.
    let halves = magnitude * 2f64.powi(shift as i32);
    if halves.fract() != 0.0 {
        return None;
    }
    let scaled = (halves as u128) * 5u128.pow(shift);
    if scaled % 10 == 5 {
        Some(scaled / 10 + 1)
    } else {
        None
    }
}

fn insert_point(units: u128, digits: usize) -> String {
    let raw = format!("{:0>width$}", units, width = digits + 1);
    if digits == 0 {
        return raw;
    }
    let (whole, frac) = raw.split_at(raw.len() - digits);
    format!("{}.{}", whole, frac)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_to_requested_digits() {
        assert_eq!(to_fixed(0.0, 2), "0.00");
        assert_eq!(to_fixed(1.0, 4), "1.0000");
        assert_eq!(to_fixed(-1.0, 4), "-1.0000");
        assert_eq!(to_fixed(0.75, 2), "0.75");
    }

    #[test]
    fn exact_ties_round_away_from_zero() {
        assert_eq!(to_fixed(0.125, 2), "0.13");
        assert_eq!(to_fixed(0.375, 2), "0.38");
        assert_eq!(to_fixed(-0.125, 2), "-0.13");
        assert_eq!(to_fixed(2.5, 0), "3");
    }

    #[test]
    fn large_exact_ties_still_round_away_from_zero() {
        assert_eq!(to_fixed(10000000000000.125, 2), "10000000000000.13");
        assert_eq!(to_fixed(-4503599627370495.5, 0), "-4503599627370496");
        assert_eq!(to_fixed(12345678901234.0625, 3), "12345678901234.063");
    }

    #[test]
    fn inexact_near_ties_keep_nearest_rounding() {
        // 1.005 is stored slightly below the tie.
        assert_eq!(to_fixed(1.005, 2), "1.00");
        assert_eq!(to_fixed(0.123456, 4), "0.1235");
    }

    #[test]
    fn negative_zero_loses_its_sign_but_tiny_negatives_keep_it() {
        assert_eq!(to_fixed(-0.0, 4), "0.0000");
        assert_eq!(to_fixed(-1e-17, 4), "-0.0000");
        assert_eq!(to_fixed(1.2e-16, 4), "0.0000");
    }

    #[test]
    fn non_finite_values_print_literally() {
        assert_eq!(to_fixed(f64::NAN, 2), "NaN");
        assert_eq!(to_fixed(f64::INFINITY, 2), "Infinity");
        assert_eq!(to_fixed(f64::NEG_INFINITY, 4), "-Infinity");
    }
}
