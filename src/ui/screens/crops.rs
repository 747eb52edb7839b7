use crate::app::Screen;
use crate::logic::scoring::{CropScore, ScoreSheet};
use crate::models::MAX_SUGGESTIONS;
use crate::ui::components::nav_bar;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget, Wrap},
};

/// Full ranking of the latest submission with a per-rule breakdown.
pub struct CropsScreen<'a> {
    pub sheet: Option<&'a ScoreSheet>,
    pub selected_index: usize,
}

impl<'a> CropsScreen<'a> {
    pub fn new(sheet: Option<&'a ScoreSheet>) -> Self {
        Self {
            sheet,
            selected_index: 0,
        }
    }

    pub fn with_selection(mut self, index: usize) -> Self {
        self.selected_index = index;
        self
    }

    fn ranked(&self) -> Vec<&'a CropScore> {
        self.sheet.map(ScoreSheet::ranked).unwrap_or_default()
    }
}

impl Widget for CropsScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Min(10),   // Content
                Constraint::Length(1), // Nav
            ])
            .split(area);

        let scored = self.sheet.map(ScoreSheet::scored_count).unwrap_or(0);
        let title = Line::from(vec![
            Span::styled("Crop Suitability", Theme::title()),
            Span::styled(format!(" ({} crops scored)", scored), Theme::dim()),
        ]);
        Paragraph::new(title).render(chunks[0], buf);

        let content = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(chunks[1]);

        let ranked = self.ranked();
        self.render_list(&ranked, content[0], buf);
        self.render_breakdown(&ranked, content[1], buf);

        Paragraph::new(nav_bar(Screen::Crops, &[("↑↓", "Navigate")])).render(chunks[2], buf);
    }
}

impl CropsScreen<'_> {
    fn render_list(&self, ranked: &[&CropScore], area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Ranking")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        if ranked.is_empty() {
            Paragraph::new(Span::styled(
                "No scored submission. Run `cropwise submit`.",
                Theme::dim(),
            ))
            .wrap(Wrap { trim: true })
            .render(inner, buf);
            return;
        }

        let best = ranked.first().map(|s| s.points).unwrap_or(0).max(1);

        // Keep the selection visible on short terminals
        let visible = inner.height as usize;
        let skip = (self.selected_index + 1).saturating_sub(visible);

        let items: Vec<ListItem> = ranked
            .iter()
            .enumerate()
            .skip(skip)
            .map(|(i, score)| {
                let style = if i == self.selected_index {
                    Theme::selected()
                } else {
                    Style::default()
                };
                let rank_style = if i < MAX_SUGGESTIONS {
                    Theme::highlight()
                } else {
                    Theme::dim()
                };
                let color = Theme::score_color(score.points as f64 / best as f64);
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:>2}. ", i + 1), rank_style),
                    Span::styled(format!("{:>3} ", score.points), Style::default().fg(color)),
                    Span::styled(score.crop, Theme::normal()),
                ]))
                .style(style)
            })
            .collect();

        List::new(items).render(inner, buf);
    }

    fn render_breakdown(&self, ranked: &[&CropScore], area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Breakdown")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let Some(score) = ranked.get(self.selected_index) else {
            Paragraph::new(Span::styled("Select a crop to see its points", Theme::dim()))
                .render(inner, buf);
            return;
        };

        let mut lines = vec![
            Line::from(Span::styled(score.crop, Theme::header())),
            Line::from(vec![
                Span::styled("Total: ", Theme::dim()),
                Span::styled(score.points.to_string(), Theme::highlight()),
                Span::styled(format!("  Rank: {}", self.selected_index + 1), Theme::dim()),
            ]),
            Line::default(),
        ];

        if score.awards.is_empty() {
            lines.push(Line::from(Span::styled("No rule matched", Theme::dim())));
        } else if let Some(sheet) = self.sheet {
            let mut rules: Vec<&str> = Vec::new();
            for award in &score.awards {
                if !rules.contains(&award.rule) {
                    rules.push(award.rule);
                }
            }
            for rule in rules {
                let points = sheet.points_from(score.crop, rule);
                lines.push(Line::from(vec![
                    Span::styled(format!("  +{:<3}", points), Theme::success()),
                    Span::styled(rule, Theme::normal()),
                ]));
            }
        }

        if self.selected_index < MAX_SUGGESTIONS {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled("In your suggestions", Theme::success())));
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
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
    fn shows_selected_breakdown() {
        let mut sheet = ScoreSheet::new();
        sheet.award("Okra", "nitrogen", 10);
        sheet.award("Okra", "soil_ph", 8);
        sheet.award("Peas", "soil_ph", 8);

        let area = Rect::new(0, 0, 90, 16);
        let mut buf = Buffer::empty(area);
        CropsScreen::new(Some(&sheet)).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("(2 crops scored)"));
        assert!(text.contains(" 1.  18 Okra"));
        assert!(text.contains("+10 nitrogen"));
        assert!(text.contains("+8  soil_ph"));
    }

    #[test]
    fn repeated_awards_from_one_rule_show_as_one_line() {
        let mut sheet = ScoreSheet::new();
        sheet.award("Beets", "sowing_window", 8);
        sheet.award("Beets", "sowing_window", 8);
        sheet.award("Beets", "soil_ph", 8);

        let area = Rect::new(0, 0, 90, 16);
        let mut buf = Buffer::empty(area);
        CropsScreen::new(Some(&sheet)).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("+16 sowing_window"));
        assert!(!text.contains("+8  sowing_window"));
        assert!(text.contains("+8  soil_ph"));
    }

    #[test]
    fn empty_sheet_prompts_for_submission() {
        let area = Rect::new(0, 0, 90, 16);
        let mut buf = Buffer::empty(area);
        CropsScreen::new(None).render(area, &mut buf);
        assert!(buffer_text(&buf).contains("No scored submission"));
    }
}
