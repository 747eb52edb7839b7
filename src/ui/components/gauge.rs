use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Boxed reading with a horizontal fill bar underneath.
pub struct GaugeWidget<'a> {
    title: &'a str,
    value: Option<f64>,
    unit: &'a str,
    min: f64,
    max: f64,
    thresholds: Vec<(f64, Color)>,
    precision: usize,
}

impl<'a> GaugeWidget<'a> {
    pub fn new(title: &'a str, value: Option<f64>, unit: &'a str) -> Self {
        Self {
            title,
            value,
            unit,
            min: 0.0,
            max: 100.0,
            thresholds: Vec::new(),
            precision: 1,
        }
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn thresholds(mut self, thresholds: Vec<(f64, Color)>) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    fn color_for(&self, value: f64) -> Color {
        self.thresholds
            .iter()
            .rev()
            .find(|(threshold, _)| value >= *threshold)
            .map(|(_, color)| *color)
            .unwrap_or(Theme::FG)
    }

    /// Filled cells out of `width` for `value`.
    fn filled(&self, value: f64, width: u16) -> u16 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 0;
        }
        let ratio = ((value - self.min) / span).clamp(0.0, 1.0);
        (width as f64 * ratio) as u16
    }
}

impl Widget for GaugeWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 || area.width < 10 {
            return;
        }

        let block = Block::default()
            .title(self.title)
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let Some(value) = self.value else {
            Paragraph::new(Span::styled("N/A", Theme::dim())).render(inner, buf);
            return;
        };

        let color = self.color_for(value);
        let value_str = format!("{:.prec$}{}", value, self.unit, prec = self.precision);
        Paragraph::new(Line::from(Span::styled(value_str, Style::default().fg(color))))
            .render(inner, buf);

        if inner.height >= 2 {
            let y = inner.y + 1;
            let filled = self.filled(value, inner.width);
            for x in inner.x..inner.x + inner.width {
                let ch = if x < inner.x + filled { '█' } else { '░' };
                buf[(x, y)].set_char(ch).set_fg(color);
            }
        }
    }
}

pub fn temperature_gauge(title: &str, value: Option<f64>) -> GaugeWidget<'_> {
    GaugeWidget::new(title, value, "°F")
        .range(0.0, 110.0)
        .thresholds(vec![
            (f64::MIN, Theme::TEMP_COLD),
            (50.0, Theme::TEMP_MILD),
            (90.0, Theme::TEMP_HOT),
        ])
}

pub fn moisture_gauge(title: &str, value: Option<f64>) -> GaugeWidget<'_> {
    GaugeWidget::new(title, value, "%")
        .range(0.0, 60.0)
        .precision(0)
        .thresholds(vec![
            (f64::MIN, Theme::MOISTURE_DRY),
            (20.0, Theme::MOISTURE_OK),
            (40.000_1, Theme::MOISTURE_WET),
        ])
}

pub fn ph_gauge(title: &str, value: Option<f64>) -> GaugeWidget<'_> {
    GaugeWidget::new(title, value, "")
        .range(4.0, 9.0)
        .thresholds(vec![
            (f64::MIN, Theme::PH_ACIDIC),
            (6.0, Theme::PH_NEUTRAL),
            (7.000_1, Theme::PH_ALKALINE),
        ])
}

pub fn rainfall_gauge(title: &str, value: Option<f64>) -> GaugeWidget<'_> {
    GaugeWidget::new(title, value, " mm")
        .range(0.0, 100.0)
        .precision(0)
        .thresholds(vec![
            (f64::MIN, Theme::WARNING),
            (10.0, Theme::SUCCESS),
        ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ph_thresholds_match_theme() {
        let gauge = ph_gauge("pH", None);
        for ph in [5.2, 6.0, 6.8, 7.0, 7.5] {
            assert_eq!(gauge.color_for(ph), Theme::ph_color(ph), "pH {}", ph);
        }
    }

    #[test]
    fn fill_is_clamped() {
        let gauge = moisture_gauge("Moisture", None);
        assert_eq!(gauge.filled(30.0, 10), 5);
        assert_eq!(gauge.filled(-5.0, 10), 0);
        assert_eq!(gauge.filled(500.0, 10), 10);
        assert_eq!(GaugeWidget::new("x", None, "").range(1.0, 1.0).filled(1.0, 10), 0);
    }

    #[test]
    fn missing_value_renders_na() {
        let area = Rect::new(0, 0, 12, 4);
        let mut buf = Buffer::empty(area);
        temperature_gauge("Temp", None).render(area, &mut buf);
        let row: String = (1..4).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert_eq!(row, "N/A");
    }
}
