use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::ui::theme::Theme;

pub struct MenuItem {
    pub key: String,
    pub label: String,
}

/// Horizontal tab strip across the top of the screen.
pub struct Menu<'a> {
    pub items: Vec<MenuItem>,
    pub selected: usize,
    pub theme: &'a Theme,
}

impl<'a> Menu<'a> {
    pub fn new(labels: &[&str], selected: usize, theme: &'a Theme) -> Self {
        Self {
            items: labels
                .iter()
                .enumerate()
                .map(|(i, label)| MenuItem {
                    key: (i + 1).to_string(),
                    label: label.to_string(),
                })
                .collect(),
            selected,
            theme,
        }
    }
}

impl Widget for &Menu<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut spans = Vec::new();
        for (i, item) in self.items.iter().enumerate() {
            let is_selected = i == self.selected;
            let style = if is_selected {
                Style::default()
                    .fg(colors.header_fg())
                    .bg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg())
            };
            spans.push(Span::styled(format!(" [{}] {} ", item.key, item.label), style));
            spans.push(Span::raw(" "));
        }
        Paragraph::new(Line::from(spans)).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_numbered_from_one() {
        let theme = Theme::default();
        let menu = Menu::new(&["Learn", "Words", "Quiz"], 1, &theme);
        let keys: Vec<_> = menu.items.iter().map(|i| i.key.as_str()).collect();
        assert_eq!(keys, vec!["1", "2", "3"]);
    }
}
