use std::fmt::Write;

use skycast_core::{Screen, SnapshotView};

pub const PROMPT: &str = "Enter a location to see the weather.";

/// Text for one screen, without a trailing newline.
pub fn render(screen: &Screen) -> String {
    match screen {
        Screen::Loading => "Loading...".to_string(),
        Screen::Prompt(None) => PROMPT.to_string(),
        Screen::Prompt(Some(reason)) => format!("{}\n{PROMPT}", reason.user_message()),
        Screen::Weather(view) => render_snapshot(view),
    }
}

fn render_snapshot(view: &SnapshotView) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(
        out,
        "{}  {} {}",
        view.temperature,
        view.condition.glyph(),
        view.condition
    );
    let _ = write!(
        out,
        "Humidity {}%   Wind {} m/s   Pressure {} hPa",
        view.humidity_pct, view.wind_speed_ms, view.pressure_hpa
    );

    if !view.forecast.is_empty() {
        out.push('\n');
    }
    for day in &view.forecast {
        let _ = write!(
            out,
            "\n{:<7}{}  {}",
            day.label,
            day.condition.glyph(),
            day.temperature
        );
    }

    out
}
