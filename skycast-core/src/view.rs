//! What a renderer needs, already converted to the active unit.

use crate::{
    controller::ResolutionState,
    error::FailureReason,
    model::{ConditionCategory, ForecastDay, TemperatureUnit, WeatherSnapshot},
    units::{DisplayValue, convert},
};

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Loading,
    /// Ask the user to search. Carries the reason when the last cycle failed.
    Prompt(Option<FailureReason>),
    Weather(SnapshotView),
}

impl Screen {
    pub fn from_state(state: &ResolutionState, unit: TemperatureUnit) -> Self {
        match state {
            ResolutionState::Idle => Screen::Prompt(None),
            ResolutionState::Loading => Screen::Loading,
            ResolutionState::Failed(reason) => Screen::Prompt(Some(*reason)),
            ResolutionState::Ready(snapshot) => Screen::Weather(SnapshotView::new(snapshot, unit)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotView {
    pub unit: TemperatureUnit,
    pub temperature: DisplayValue,
    pub humidity_pct: u8,
    pub wind_speed_ms: f64,
    pub pressure_hpa: f64,
    pub condition: ConditionCategory,
    pub forecast: Vec<ForecastView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastView {
    pub label: String,
    pub temperature: DisplayValue,
    pub condition: ConditionCategory,
}

impl SnapshotView {
    pub fn new(snapshot: &WeatherSnapshot, unit: TemperatureUnit) -> Self {
        Self {
            unit,
            temperature: convert(snapshot.temperature_c, unit),
            humidity_pct: snapshot.humidity_pct,
            wind_speed_ms: snapshot.wind_speed_ms,
            pressure_hpa: snapshot.pressure_hpa,
            condition: snapshot.condition,
            forecast: snapshot
                .forecast
                .iter()
                .map(|day| ForecastView::new(day, unit))
                .collect(),
        }
    }
}

impl ForecastView {
    fn new(day: &ForecastDay, unit: TemperatureUnit) -> Self {
        Self {
            label: day.label.clone(),
            temperature: convert(day.temperature_c, unit),
            condition: day.condition,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> WeatherSnapshot {
        WeatherSnapshot {
            temperature_c: 20.04,
            humidity_pct: 70,
            wind_speed_ms: 4.1,
            pressure_hpa: 998.0,
            condition: ConditionCategory::Clouds,
            forecast: vec![
                ForecastDay {
                    label: "pt.".into(),
                    temperature_c: -2.0,
                    condition: ConditionCategory::Snow,
                },
                ForecastDay {
                    label: "sob.".into(),
                    temperature_c: 0.0,
                    condition: ConditionCategory::Mist,
                },
            ],
        }
    }

    #[test]
    fn states_map_to_screens() {
        assert_eq!(
            Screen::from_state(&ResolutionState::Idle, TemperatureUnit::C),
            Screen::Prompt(None)
        );
        assert_eq!(
            Screen::from_state(&ResolutionState::Loading, TemperatureUnit::C),
            Screen::Loading
        );
        assert_eq!(
            Screen::from_state(
                &ResolutionState::Failed(FailureReason::NotFound),
                TemperatureUnit::C
            ),
            Screen::Prompt(Some(FailureReason::NotFound))
        );
    }

    #[test]
    fn ready_converts_every_temperature() {
        let state = ResolutionState::Ready(snapshot());

        let Screen::Weather(view) = Screen::from_state(&state, TemperatureUnit::F) else {
            panic!("expected weather screen");
        };

        assert_eq!(view.temperature, DisplayValue::Fahrenheit(68));
        assert_eq!(view.forecast[0].temperature, DisplayValue::Fahrenheit(28));
        assert_eq!(view.forecast[1].temperature, DisplayValue::Fahrenheit(32));
        assert_eq!(view.humidity_pct, 70);
        assert_eq!(view.condition, ConditionCategory::Clouds);
        assert_eq!(view.forecast[1].label, "sob.");

        let Screen::Weather(view) = Screen::from_state(&state, TemperatureUnit::C) else {
            panic!("expected weather screen");
        };
        assert_eq!(view.temperature, DisplayValue::Celsius(20.0));
    }
}
