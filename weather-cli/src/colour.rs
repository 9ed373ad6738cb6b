use colored::{ColoredString, Colorize};

/// Terminal colour for a temperature value, colder bands first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TempColour {
    Blue,
    BrightBlue,
    Cyan,
    BrightCyan,
    Green,
    BrightGreen,
    Yellow,
    BrightYellow,
    Red,
    White,
}

impl TempColour {
    /// Classify a Celsius temperature into its 5-degree band.
    ///
    /// Bands are half-open: a boundary value belongs to the warmer band,
    /// so 0 is bright blue and 40 is white.
    pub fn for_temp(temp_c: f64) -> Self {
        if temp_c < 0.0 {
            TempColour::Blue
        } else if temp_c < 5.0 {
            TempColour::BrightBlue
        } else if temp_c < 10.0 {
            TempColour::Cyan
        } else if temp_c < 15.0 {
            TempColour::BrightCyan
        } else if temp_c < 20.0 {
            TempColour::Green
        } else if temp_c < 25.0 {
            TempColour::BrightGreen
        } else if temp_c < 30.0 {
            TempColour::Yellow
        } else if temp_c < 35.0 {
            TempColour::BrightYellow
        } else if temp_c < 40.0 {
            TempColour::Red
        } else {
            TempColour::White
        }
    }

    /// Paint a rendered value in this colour, bold.
    pub fn paint(&self, text: &str) -> ColoredString {
        match self {
            TempColour::Blue => text.blue().bold(),
            TempColour::BrightBlue => text.bright_blue().bold(),
            TempColour::Cyan => text.cyan().bold(),
            TempColour::BrightCyan => text.bright_cyan().bold(),
            TempColour::Green => text.green().bold(),
            TempColour::BrightGreen => text.bright_green().bold(),
            TempColour::Yellow => text.yellow().bold(),
            TempColour::BrightYellow => text.bright_yellow().bold(),
            TempColour::Red => text.red().bold(),
            TempColour::White => text.white().bold(),
        }
    }
}
