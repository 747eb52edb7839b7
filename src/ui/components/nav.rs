use crate::app::Screen;
use crate::ui::Theme;
use ratatui::text::{Line, Span};

const SCREENS: [(char, &str, Screen); 4] = [
    ('1', "Dashboard", Screen::Dashboard),
    ('2', "Crops", Screen::Crops),
    ('3', "Advice", Screen::Advice),
    ('4', "Features", Screen::Features),
];

/// Screen switcher plus any screen-specific keys, current screen highlighted.
pub fn nav_bar<'a>(current: Screen, extra: &[(&'a str, &'a str)]) -> Line<'a> {
    let mut spans = Vec::new();
    for (key, label, screen) in SCREENS {
        spans.push(Span::styled(format!("[{}]", key), Theme::nav_key()));
        let style = if screen == current {
            Theme::highlight()
        } else {
            Theme::nav_label()
        };
        spans.push(Span::styled(format!("{} ", label), style));
    }
    for (key, label) in extra {
        spans.push(Span::styled(format!("[{}]", key), Theme::nav_key()));
        spans.push(Span::styled(format!("{} ", label), Theme::nav_label()));
    }
    spans.push(Span::styled("[q]", Theme::nav_key()));
    spans.push(Span::styled("Quit", Theme::nav_label()));
    Line::from(spans)
}

pub fn status_line(message: Option<&str>) -> Line<'_> {
    match message {
        Some(msg) => {
            let lower = msg.to_lowercase();
            let style = if lower.contains("failed") || lower.contains("unavailable") {
                Theme::warning()
            } else {
                Theme::success()
            };
            Line::from(Span::styled(msg, style))
        }
        None => Line::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn nav_lists_screens_and_extras() {
        let line = nav_bar(Screen::Crops, &[("r", "Refresh")]);
        assert_eq!(
            text(&line),
            "[1]Dashboard [2]Crops [3]Advice [4]Features [r]Refresh [q]Quit"
        );
        assert_eq!(line.spans[3].style, Theme::highlight());
    }

    #[test]
    fn failures_are_warnings() {
        let line = status_line(Some("Weather refresh failed: timeout"));
        assert_eq!(line.spans[0].style, Theme::warning());
        assert!(status_line(None).spans.is_empty());
    }
}
