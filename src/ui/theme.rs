use ratatui::style::{Color, Modifier, Style};

pub struct Theme;

impl Theme {
    // Base colors
    pub const FG: Color = Color::White;
    pub const DIM: Color = Color::DarkGray;
    pub const ACCENT: Color = Color::Green;
    pub const HIGHLIGHT: Color = Color::Cyan;

    // Status colors
    pub const SUCCESS: Color = Color::Green;
    pub const WARNING: Color = Color::Yellow;

    // Field readings
    pub const TEMP_COLD: Color = Color::LightBlue;
    pub const TEMP_MILD: Color = Color::Green;
    pub const TEMP_HOT: Color = Color::Red;
    pub const MOISTURE_DRY: Color = Color::Yellow;
    pub const MOISTURE_OK: Color = Color::Green;
    pub const MOISTURE_WET: Color = Color::LightBlue;
    pub const PH_ACIDIC: Color = Color::Yellow;
    pub const PH_NEUTRAL: Color = Color::Green;
    pub const PH_ALKALINE: Color = Color::Magenta;

    // Styles
    pub fn title() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn header() -> Style {
        Style::default().fg(Self::FG).add_modifier(Modifier::BOLD)
    }

    pub fn normal() -> Style {
        Style::default().fg(Self::FG)
    }

    pub fn dim() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn highlight() -> Style {
        Style::default()
            .fg(Self::HIGHLIGHT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected() -> Style {
        Style::default()
            .bg(Color::DarkGray)
            .fg(Self::FG)
            .add_modifier(Modifier::BOLD)
    }

    pub fn success() -> Style {
        Style::default().fg(Self::SUCCESS)
    }

    pub fn warning() -> Style {
        Style::default().fg(Self::WARNING)
    }

    pub fn ph_color(ph: f64) -> Color {
        if ph < 6.0 {
            Self::PH_ACIDIC
        } else if ph <= 7.0 {
            Self::PH_NEUTRAL
        } else {
            Self::PH_ALKALINE
        }
    }

    /// Moisture as a percentage of field capacity.
    pub fn moisture_color(percent: f64) -> Color {
        if percent < 20.0 {
            Self::MOISTURE_DRY
        } else if percent <= 40.0 {
            Self::MOISTURE_OK
        } else {
            Self::MOISTURE_WET
        }
    }

    /// Share of the best crop's score, 0.0 to 1.0.
    pub fn score_color(ratio: f64) -> Color {
        if ratio >= 0.75 {
            Self::SUCCESS
        } else if ratio >= 0.4 {
            Self::WARNING
        } else {
            Self::DIM
        }
    }

    pub fn nav_key() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn nav_label() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(Self::ACCENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ph_bands() {
        assert_eq!(Theme::ph_color(5.5), Theme::PH_ACIDIC);
        assert_eq!(Theme::ph_color(6.5), Theme::PH_NEUTRAL);
        assert_eq!(Theme::ph_color(7.0), Theme::PH_NEUTRAL);
        assert_eq!(Theme::ph_color(7.8), Theme::PH_ALKALINE);
    }

    #[test]
    fn moisture_bands() {
        assert_eq!(Theme::moisture_color(10.0), Theme::MOISTURE_DRY);
        assert_eq!(Theme::moisture_color(30.0), Theme::MOISTURE_OK);
        assert_eq!(Theme::moisture_color(55.0), Theme::MOISTURE_WET);
    }
}
