use tracing::debug;

/// Largest supported number of fractional digits
pub const MAX_DECIMAL_PLACES: u8 = 5;

/// Decimal-place choices offered for number fields
pub const DECIMAL_OPTIONS: [u8; 6] = [0, 1, 2, 3, 4, 5];

/// Render numeric input with a fixed number of fractional digits
///
/// Ties round half up at every precision (`0.125` at 2 places is `0.13`).
/// Anything that does not parse as a finite number is returned unchanged.
/// Places above [`MAX_DECIMAL_PLACES`] are clamped.
pub fn format_number(input: &str, decimal_places: u8) -> String {
    let Some(value) = parse_number(input) else {
        debug!(input, "non-numeric input, keeping raw value");
        return input.to_string();
    };

    let places = decimal_places.min(MAX_DECIMAL_PLACES);
    let rendered = normalize_zero(round_half_up(value, places));
    format!("{:.*}", usize::from(places), rendered)
}

/// Round to `places` fractional digits, ties toward positive infinity
fn round_half_up(value: f64, places: u8) -> f64 {
    let factor = 10f64.powi(i32::from(places));
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    let rounded = if scaled - scaled.floor() == 0.5 {
        scaled.ceil()
    } else {
        scaled.round()
    };
    rounded / factor
}

fn parse_number(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Fold `-0.0` into `0.0` so it never renders with a sign
fn normalize_zero(value: f64) -> f64 {
    if value == 0.0 { 0.0 } else { value }
}
