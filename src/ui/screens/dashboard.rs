use crate::app::Screen;
use crate::models::{CurrentWeather, FarmRecord, Recommendation};
use crate::ui::components::{
    moisture_gauge, nav_bar, ph_gauge, rainfall_gauge, status_line, temperature_gauge,
};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
};

pub struct DashboardScreen<'a> {
    pub greeting: String,
    pub record: Option<&'a FarmRecord>,
    pub weather: Option<&'a CurrentWeather>,
    pub recommendations: &'a [Recommendation],
    pub status_message: Option<&'a str>,
}

impl<'a> DashboardScreen<'a> {
    pub fn new(
        greeting: String,
        record: Option<&'a FarmRecord>,
        recommendations: &'a [Recommendation],
    ) -> Self {
        Self {
            greeting,
            record,
            weather: None,
            recommendations,
            status_message: None,
        }
    }

    pub fn with_weather(mut self, weather: Option<&'a CurrentWeather>) -> Self {
        self.weather = weather;
        self
    }

    pub fn with_status(mut self, status: Option<&'a str>) -> Self {
        self.status_message = status;
        self
    }
}

impl Widget for DashboardScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(5), // Gauges
                Constraint::Min(8),    // Suggestions and alerts
                Constraint::Length(1), // Status message
                Constraint::Length(1), // Nav bar
            ])
            .split(area);

        self.render_header(chunks[0], buf);
        self.render_gauges(chunks[1], buf);

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(chunks[2]);

        self.render_suggestions(middle[0], buf);
        self.render_alerts(middle[1], buf);

        Paragraph::new(status_line(self.status_message)).render(chunks[3], buf);
        Paragraph::new(nav_bar(Screen::Dashboard, &[("r", "Refresh weather")]))
            .render(chunks[4], buf);
    }
}

impl DashboardScreen<'_> {
    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled(
                format!("Cropwise - {}", self.greeting),
                Theme::title(),
            ))
            .borders(Borders::BOTTOM)
            .border_style(Theme::border());

        let submitted = self
            .record
            .map(|r| r.submitted_at.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "Never".to_string());
        let soil = self
            .record
            .and_then(|r| r.soil_type.as_deref())
            .unwrap_or("Unknown soil");

        let info = Line::from(vec![
            Span::styled(format!("Last submission: {}", submitted), Theme::dim()),
            Span::styled(format!("  Soil: {}", soil), Theme::dim()),
        ]);
        Paragraph::new(info).block(block).render(area, buf);
    }

    fn render_gauges(&self, area: Rect, buf: &mut Buffer) {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(20); 5])
            .split(area);

        ph_gauge("Soil pH", self.record.and_then(|r| r.soil_ph)).render(cells[0], buf);
        moisture_gauge("Moisture", self.record.and_then(|r| r.soil_moisture))
            .render(cells[1], buf);
        temperature_gauge("Field Temp", self.record.and_then(|r| r.temperature))
            .render(cells[2], buf);
        rainfall_gauge("Rainfall", self.record.and_then(|r| r.rainfall)).render(cells[3], buf);

        let live_title = self
            .weather
            .map(|w| format!("Live: {}", w.city))
            .unwrap_or_else(|| "Live".to_string());
        temperature_gauge(&live_title, self.weather.map(|w| w.temperature_f))
            .render(cells[4], buf);
    }

    fn render_suggestions(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled("Suggested Crops", Theme::header()))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let suggestions = self.record.map(|r| r.suggestions.as_slice()).unwrap_or(&[]);
        if suggestions.is_empty() {
            Paragraph::new(Span::styled(
                "No suggestions yet. Run `cropwise submit`.",
                Theme::dim(),
            ))
            .render(inner, buf);
            return;
        }

        let items: Vec<ListItem> = suggestions
            .iter()
            .enumerate()
            .map(|(i, crop)| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{}. ", i + 1), Theme::dim()),
                    Span::styled(crop.as_str(), Theme::normal()),
                ]))
            })
            .collect();
        List::new(items).render(inner, buf);
    }

    fn render_alerts(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled("Advice", Theme::header()))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        if self.recommendations.is_empty() {
            Paragraph::new(Span::styled("Nothing to report", Theme::dim())).render(inner, buf);
            return;
        }

        // Two lines per item, so only the most urgent few fit
        let items: Vec<ListItem> = self
            .recommendations
            .iter()
            .take(4)
            .map(|r| {
                let severity_style = Style::default().fg(r.severity.color());
                let title_line = Line::from(vec![
                    Span::styled(format!("{} ", r.severity.symbol()), severity_style),
                    Span::styled(r.title.as_str(), severity_style),
                ]);
                let desc_line = Line::from(vec![
                    Span::raw("  "),
                    Span::styled(r.description.as_str(), Theme::dim()),
                ]);
                ListItem::new(vec![title_line, desc_line])
            })
            .collect();
        List::new(items).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut out = String::new();
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn renders_record_suggestions() {
        let record = FarmRecord::new("f")
            .with_soil(Some("Loamy".into()), 6.5, 30.0)
            .with_city(Some("Lancaster".into()))
            .with_suggestions(vec!["Tomato".into(), "Okra".into()]);
        let area = Rect::new(0, 0, 100, 20);
        let mut buf = Buffer::empty(area);
        DashboardScreen::new(record.greeting(), Some(&record), &[]).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("Hello farmer from Lancaster!"));
        assert!(text.contains("1. Tomato"));
        assert!(text.contains("2. Okra"));
        assert!(text.contains("Nothing to report"));
    }

    #[test]
    fn renders_without_record() {
        let area = Rect::new(0, 0, 100, 20);
        let mut buf = Buffer::empty(area);
        DashboardScreen::new("Hello Farmer!".into(), None, &[])
            .with_status(Some("Weather unavailable"))
            .render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("No suggestions yet"));
        assert!(text.contains("Weather unavailable"));
    }
}
