use crate::app::Screen;
use crate::models::Recommendation;
use crate::ui::components::nav_bar;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget, Wrap},
};

pub struct AdviceScreen<'a> {
    pub recommendations: &'a [Recommendation],
    pub selected_index: usize,
}

impl<'a> AdviceScreen<'a> {
    pub fn new(recommendations: &'a [Recommendation]) -> Self {
        Self {
            recommendations,
            selected_index: 0,
        }
    }

    pub fn with_selection(mut self, index: usize) -> Self {
        self.selected_index = index;
        self
    }
}

impl Widget for AdviceScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Min(10),   // Content
                Constraint::Length(1), // Nav
            ])
            .split(area);

        let title = Line::from(vec![
            Span::styled("Advice", Theme::title()),
            Span::styled(format!(" ({} items)", self.recommendations.len()), Theme::dim()),
        ]);
        Paragraph::new(title).render(chunks[0], buf);

        let content = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(chunks[1]);

        self.render_list(content[0], buf);
        self.render_details(content[1], buf);

        Paragraph::new(nav_bar(
            Screen::Advice,
            &[("↑↓", "Navigate"), ("r", "Refresh weather")],
        ))
        .render(chunks[2], buf);
    }
}

impl AdviceScreen<'_> {
    fn render_list(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Items")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        if self.recommendations.is_empty() {
            Paragraph::new(Span::styled("No advice right now", Theme::dim())).render(inner, buf);
            return;
        }

        let items: Vec<ListItem> = self
            .recommendations
            .iter()
            .enumerate()
            .map(|(i, rec)| {
                let style = if i == self.selected_index {
                    Theme::selected()
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{} ", rec.severity.symbol()),
                        Style::default().fg(rec.severity.color()),
                    ),
                    Span::styled(
                        rec.category.as_str(),
                        Style::default().fg(rec.category.color()),
                    ),
                    Span::styled(format!(": {}", rec.title), Theme::normal()),
                ]))
                .style(style)
            })
            .collect();

        List::new(items).render(inner, buf);
    }

    fn render_details(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Details")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let Some(rec) = self.recommendations.get(self.selected_index) else {
            Paragraph::new(Span::styled("Select an item to view details", Theme::dim()))
                .render(inner, buf);
            return;
        };

        let mut lines = vec![
            Line::from(Span::styled(rec.title.as_str(), Theme::header())),
            Line::default(),
            Line::from(vec![
                Span::styled("Severity: ", Theme::dim()),
                Span::styled(
                    rec.severity.as_str(),
                    Style::default().fg(rec.severity.color()),
                ),
                Span::styled("  Category: ", Theme::dim()),
                Span::styled(
                    rec.category.as_str(),
                    Style::default().fg(rec.category.color()),
                ),
            ]),
            Line::default(),
            Line::from(Span::styled(rec.description.as_str(), Theme::normal())),
            Line::default(),
        ];

        if !rec.data_points.is_empty() {
            lines.push(Line::from(Span::styled("Data Points:", Theme::dim())));
            for dp in &rec.data_points {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {}: ", dp.label), Theme::dim()),
                    Span::styled(dp.value.as_str(), Theme::highlight()),
                    Span::styled(format!(" ({})", dp.source), Theme::dim()),
                ]));
            }
            lines.push(Line::default());
        }

        if !rec.explanation.is_empty() {
            lines.push(Line::from(Span::styled("Why:", Theme::dim())));
            lines.push(Line::from(Span::styled(
                rec.explanation.as_str(),
                Theme::normal(),
            )));
            lines.push(Line::default());
        }

        if let Some(action) = &rec.suggested_action {
            lines.push(Line::from(Span::styled("Suggested Action:", Theme::dim())));
            lines.push(Line::from(Span::styled(action.as_str(), Theme::success())));
        }

        if let Some(link) = &rec.link {
            lines.push(Line::from(vec![
                Span::styled("More: ", Theme::dim()),
                Span::styled(link.as_str(), Theme::highlight()),
            ]));
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RecommendationCategory, Severity};

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
    fn details_follow_selection() {
        let recs = vec![
            Recommendation::new(
                "soil_ph_low",
                RecommendationCategory::SoilHealth,
                Severity::Warning,
                "Soil pH Is Low",
                "Apply lime.",
            ),
            Recommendation::new(
                "subsidy_programs",
                RecommendationCategory::Subsidy,
                Severity::Info,
                "Programs You May Qualify For",
                "Check EQIP.",
            )
            .with_link("https://www.fsa.usda.gov/"),
        ];

        let area = Rect::new(0, 0, 110, 20);
        let mut buf = Buffer::empty(area);
        AdviceScreen::new(&recs).with_selection(1).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("(2 items)"));
        assert!(text.contains("Check EQIP."));
        assert!(text.contains("https://www.fsa.usda.gov/"));
        assert!(!text.contains("Apply lime."));
    }
}
