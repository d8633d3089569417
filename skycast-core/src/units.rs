//! Celsius to display conversion.

use crate::model::TemperatureUnit;

/// A temperature ready to be printed in the active unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayValue {
    /// Rounded to one decimal place.
    Celsius(f64),
    /// Rounded to the nearest whole degree.
    Fahrenheit(i64),
}

impl DisplayValue {
    pub fn unit(&self) -> TemperatureUnit {
        match self {
            DisplayValue::Celsius(_) => TemperatureUnit::C,
            DisplayValue::Fahrenheit(_) => TemperatureUnit::F,
        }
    }

    pub fn as_f64(&self) -> f64 {
        match *self {
            DisplayValue::Celsius(v) => v,
            DisplayValue::Fahrenheit(v) => v as f64,
        }
    }
}

/// `21.5°C`, `21°C` (no trailing `.0`), `71°F`.
impl std::fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayValue::Celsius(v) => write!(f, "{v}°C"),
            DisplayValue::Fahrenheit(v) => write!(f, "{v}°F"),
        }
    }
}

pub fn convert(temp_c: f64, unit: TemperatureUnit) -> DisplayValue {
    match unit {
        TemperatureUnit::C => DisplayValue::Celsius(round1(temp_c)),
        TemperatureUnit::F => DisplayValue::Fahrenheit(round_half_up(temp_c * 9.0 / 5.0 + 32.0)),
    }
}

/// Rounds the exact stored value, so `0.15` (really `0.1499…`) becomes `0.1`.
///
/// The only decimals that sit exactly halfway at one place are odd multiples
/// of `0.25`; those round away from zero.
fn round1(value: f64) -> f64 {
    let quarters = value * 4.0;
    let rounded = if quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
        (value * 10.0).round() / 10.0
    } else {
        format!("{value:.1}").parse().unwrap_or(value)
    };
    // avoid rendering "-0"
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Halves round towards positive infinity, so `-0.5` becomes `0` and `2.5` becomes `3`.
fn round_half_up(value: f64) -> i64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor as i64 + 1
    } else {
        floor as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn celsius_keeps_one_decimal() {
        assert_eq!(convert(21.46, TemperatureUnit::C), DisplayValue::Celsius(21.5));
        assert_eq!(convert(-3.04, TemperatureUnit::C), DisplayValue::Celsius(-3.0));
        assert_eq!(convert(18.0, TemperatureUnit::C), DisplayValue::Celsius(18.0));
    }

    #[test]
    fn fahrenheit_rounds_to_integer() {
        assert_eq!(convert(0.0, TemperatureUnit::F), DisplayValue::Fahrenheit(32));
        assert_eq!(convert(100.0, TemperatureUnit::F), DisplayValue::Fahrenheit(212));
        assert_eq!(convert(-40.0, TemperatureUnit::F), DisplayValue::Fahrenheit(-40));
        // 21.5 * 9 / 5 + 32 = 70.7
        assert_eq!(convert(21.5, TemperatureUnit::F), DisplayValue::Fahrenheit(71));
    }

    #[test]
    fn fahrenheit_matches_formula_over_a_range() {
        let mut t: f64 = -60.0;
        while t <= 60.0 {
            let f = t * 9.0 / 5.0 + 32.0;
            let expected = f.floor() as i64 + i64::from(f - f.floor() >= 0.5);
            assert_eq!(convert(t, TemperatureUnit::F), DisplayValue::Fahrenheit(expected));
            t += 0.37;
        }
    }

    #[test]
    fn celsius_rounds_the_stored_value_not_the_product() {
        // each of these is stored just below the written half
        assert_eq!(convert(0.15, TemperatureUnit::C), DisplayValue::Celsius(0.1));
        assert_eq!(convert(21.15, TemperatureUnit::C), DisplayValue::Celsius(21.1));
        assert_eq!(convert(4.35, TemperatureUnit::C), DisplayValue::Celsius(4.3));
        assert_eq!(convert(-0.15, TemperatureUnit::C), DisplayValue::Celsius(-0.1));
    }

    #[test]
    fn celsius_exact_halves_round_away_from_zero() {
        assert_eq!(convert(0.25, TemperatureUnit::C), DisplayValue::Celsius(0.3));
        assert_eq!(convert(1.75, TemperatureUnit::C), DisplayValue::Celsius(1.8));
        assert_eq!(convert(-1.25, TemperatureUnit::C), DisplayValue::Celsius(-1.3));
        assert_eq!(convert(-0.25, TemperatureUnit::C), DisplayValue::Celsius(-0.3));
    }

    #[test]
    fn whole_degree_rounding_has_no_carry_error() {
        assert_eq!(round_half_up(0.49999999999999994), 0);
        assert_eq!(round_half_up(0.5), 1);
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-0.5), 0);
        assert_eq!(round_half_up(-0.6), -1);
    }

    #[test]
    fn negative_halves_round_up() {
        // -17.5 °C is 0.5 °F
        assert_eq!(convert(-17.5, TemperatureUnit::F), DisplayValue::Fahrenheit(1));
        // -18.5 °C is -1.3 °F
        assert_eq!(convert(-18.5, TemperatureUnit::F), DisplayValue::Fahrenheit(-1));
    }

    #[test]
    fn display_formats() {
        assert_eq!(convert(21.46, TemperatureUnit::C).to_string(), "21.5°C");
        assert_eq!(convert(18.0, TemperatureUnit::C).to_string(), "18°C");
        assert_eq!(convert(21.5, TemperatureUnit::F).to_string(), "71°F");
        assert_eq!(convert(-0.02, TemperatureUnit::C).to_string(), "0°C");
    }
}
