use crate::app::Screen;
use crate::logic::FeaturePage;
use crate::models::Feature;
use crate::ui::components::nav_bar;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget, Wrap},
};

pub struct FeaturesScreen<'a> {
    pub page: &'a FeaturePage,
    pub selected_index: usize,
    pub scroll: u16,
}

impl<'a> FeaturesScreen<'a> {
    pub fn new(page: &'a FeaturePage) -> Self {
        Self {
            page,
            selected_index: 0,
            scroll: 0,
        }
    }

    pub fn with_selection(mut self, index: usize) -> Self {
        self.selected_index = index;
        self
    }

    pub fn with_scroll(mut self, scroll: u16) -> Self {
        self.scroll = scroll;
        self
    }
}

impl Widget for FeaturesScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Min(10),   // Content
                Constraint::Length(1), // Nav
            ])
            .split(area);

        Paragraph::new(Span::styled("Features", Theme::title())).render(chunks[0], buf);

        let content = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(42), Constraint::Min(20)])
            .split(chunks[1]);

        self.render_menu(content[0], buf);
        self.render_page(content[1], buf);

        Paragraph::new(nav_bar(
            Screen::Features,
            &[("↑↓", "Select"), ("PgUp/PgDn", "Scroll"), ("r", "Refresh weather")],
        ))
        .render(chunks[2], buf);
    }
}

impl FeaturesScreen<'_> {
    fn render_menu(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Menu")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let items: Vec<ListItem> = Feature::all()
            .iter()
            .enumerate()
            .map(|(i, feature)| {
                let style = if i == self.selected_index {
                    Theme::selected()
                } else {
                    Style::default()
                };
                ListItem::new(Span::styled(feature.as_str(), Theme::normal())).style(style)
            })
            .collect();

        List::new(items).render(inner, buf);
    }

    fn render_page(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled(self.page.title.as_str(), Theme::header()))
            .borders(Borders::ALL)
            .border_style(Theme::border_focused());

        let mut lines: Vec<Line> = self
            .page
            .lines
            .iter()
            .map(|l| Line::from(Span::styled(l.as_str(), Theme::normal())))
            .collect();

        let links: Vec<&str> = self
            .page
            .recommendations
            .iter()
            .filter_map(|r| r.link.as_deref())
            .collect();
        if !links.is_empty() {
            lines.push(Line::default());
            for link in links {
                lines.push(Line::from(vec![
                    Span::styled("More: ", Theme::dim()),
                    Span::styled(link, Theme::highlight()),
                ]));
            }
        }

        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            self.page.feature.benefit(),
            Theme::dim(),
        )));

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0))
            .render(area, buf);
    }
}
