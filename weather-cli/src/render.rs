use chrono::{DateTime, Datelike, Utc};
use colored::Colorize;
use unicode_width::UnicodeWidthStr;
use weather_core::{CurrentWeather, ForecastSeries, Granularity};

use crate::colour::TempColour;

/// Minimum visible width of every column, gutter included.
const MIN_COL_WIDTH: usize = 16;
/// Spacing between the end of a cell and the next column.
const GUTTER: usize = 2;

/// One table cell: the rendered text (ANSI escapes included) and its
/// visible width. Widths are computed on the plain text because escape
/// sequences would throw the column maths off.
struct Cell {
    text: String,
    width: usize,
}

impl Cell {
    fn value(text: &str) -> Self {
        Self {
            width: text.width(),
            text: text.bright_white().bold().to_string(),
        }
    }

    fn temp(temp_c: f64) -> Self {
        let plain = format!("● {}", degrees(temp_c));
        Self {
            width: plain.width(),
            text: TempColour::for_temp(temp_c).paint(&plain).to_string(),
        }
    }

    fn temp_range(min_c: f64, max_c: f64) -> Self {
        let min = degrees(min_c);
        let max = degrees(max_c);
        Self {
            width: min.width() + " | ".width() + max.width(),
            text: format!(
                "{} | {}",
                TempColour::for_temp(min_c).paint(&min),
                TempColour::for_temp(max_c).paint(&max),
            ),
        }
    }
}

struct Row {
    label: &'static str,
    cells: Vec<Cell>,
}

impl Row {
    fn new(label: &'static str, cells: Vec<Cell>) -> Self {
        Self { label, cells }
    }
}

/// Render a single current-conditions reading as a label/value table.
pub fn current(report: &CurrentWeather) -> String {
    let reading = &report.reading;
    let rows = [
        Row::new("Location:", vec![Cell::value(&report.place_name)]),
        Row::new("Weather:", vec![Cell::value(&reading.description)]),
        Row::new("Temperature:", vec![Cell::temp(reading.temperature_c)]),
        Row::new("Feels Like:", vec![Cell::temp(reading.feels_like_c)]),
        Row::new(
            "Min | Max:",
            vec![Cell::temp_range(report.temp_min_c, report.temp_max_c)],
        ),
        Row::new(
            "Wind Speed:",
            vec![Cell::value(&format!("{}m/s", reading.wind_speed_mps))],
        ),
        Row::new(
            "Humidity:",
            vec![Cell::value(&format!("{}%", reading.humidity_pct))],
        ),
    ];

    layout(&rows)
}

/// Render a forecast window, one column per reading.
///
/// Hourly tables share a single date line and get a time line instead;
/// daily tables date every column. An empty window renders a hint telling
/// the user which ranges would still work.
pub fn forecast(series: &ForecastSeries, granularity: Granularity) -> String {
    let Some(first) = series.readings.first() else {
        return empty_window_message(&series.place_name, granularity);
    };

    let mut rows = vec![Row::new("Location:", vec![Cell::value(&series.place_name)])];

    match granularity {
        Granularity::Hourly => {
            rows.push(Row::new(
                "Date:",
                vec![Cell::value(&format_date(first.timestamp))],
            ));
            rows.push(Row::new(
                "Time:",
                series
                    .readings
                    .iter()
                    .map(|reading| Cell::value(&format_time(reading.timestamp)))
                    .collect(),
            ));
        }
        Granularity::Daily => {
            rows.push(Row::new(
                "Date:",
                series
                    .readings
                    .iter()
                    .map(|reading| Cell::value(&format_date(reading.timestamp)))
                    .collect(),
            ));
        }
    }

    rows.push(Row::new(
        "Weather:",
        series
            .readings
            .iter()
            .map(|reading| Cell::value(&reading.description))
            .collect(),
    ));
    rows.push(Row::new(
        "Temperature:",
        series
            .readings
            .iter()
            .map(|reading| Cell::temp(reading.temperature_c))
            .collect(),
    ));
    rows.push(Row::new(
        "Feels Like:",
        series
            .readings
            .iter()
            .map(|reading| Cell::temp(reading.feels_like_c))
            .collect(),
    ));
    rows.push(Row::new(
        "Wind Speed:",
        series
            .readings
            .iter()
            .map(|reading| Cell::value(&format!("{}m/s", reading.wind_speed_mps)))
            .collect(),
    ));
    rows.push(Row::new(
        "Humidity:",
        series
            .readings
            .iter()
            .map(|reading| Cell::value(&format!("{}%", reading.humidity_pct)))
            .collect(),
    ));

    layout(&rows)
}

fn empty_window_message(place: &str, granularity: Granularity) -> String {
    let message = match granularity {
        Granularity::Hourly => format!(
            "Cannot get 3 hour weather for {place}. Try using 'weather <city> tomorrow' or 'weather <city> now'."
        ),
        Granularity::Daily => format!(
            "Cannot get week weather for {place}. Try using 'weather <city> now|today|tomorrow'."
        ),
    };

    message.bright_red().bold().to_string()
}

/// Lay rows out with a label column and per-column value widths.
///
/// Rows with fewer cells than the widest row span the table (the single
/// date line above an hourly table) and are left out of the width maths.
fn layout(rows: &[Row]) -> String {
    let columns = rows.iter().map(|row| row.cells.len()).max().unwrap_or(0);

    let mut label_width = MIN_COL_WIDTH;
    for row in rows {
        label_width = label_width.max(row.label.width() + GUTTER);
    }

    let mut widths = vec![MIN_COL_WIDTH; columns];
    for row in rows.iter().filter(|row| row.cells.len() == columns) {
        for (cell, width) in row.cells.iter().zip(widths.iter_mut()) {
            *width = (*width).max(cell.width + GUTTER);
        }
    }

    let mut lines = Vec::with_capacity(rows.len());
    for row in rows {
        let mut line = String::new();
        line.push_str(row.label);
        pad_to(&mut line, row.label.width(), label_width);
        for (cell, width) in row.cells.iter().zip(widths.iter()) {
            line.push_str(&cell.text);
            pad_to(&mut line, cell.width, *width);
        }
        lines.push(line.trim_end().to_string());
    }

    lines.join("\n")
}

fn pad_to(line: &mut String, used: usize, want: usize) {
    for _ in 0..want.saturating_sub(used) {
        line.push(' ');
    }
}

/// Rounded whole-degree rendering, normalising -0 away.
fn degrees(temp_c: f64) -> String {
    let rounded = temp_c.round();
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded}°C")
}

fn format_time(ts: DateTime<Utc>) -> String {
    ts.format("%-I %P").to_string()
}

fn format_date(ts: DateTime<Utc>) -> String {
    format!("{} {} {}", ts.format("%a"), ordinal(ts.day()), ts.format("%b %Y"))
}

fn ordinal(day: u32) -> String {
    let suffix = match day % 100 {
        11..=13 => "th",
        _ => match day % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    };

    format!("{day}{suffix}")
}
