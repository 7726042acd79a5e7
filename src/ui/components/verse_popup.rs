use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget, Wrap};

use nahw::verse::highlight::split_highlight;

use crate::ui::theme::Theme;

/// Full verse with the studied phrase highlighted.
pub struct VersePopup<'a> {
    pub reference: String,
    pub arabic: &'a str,
    pub translation: &'a str,
    pub phrase: &'a str,
    pub audio_url: Option<String>,
    pub theme: &'a Theme,
}

impl<'a> VersePopup<'a> {
    fn lines(&self) -> Vec<Line<'a>> {
        let colors = &self.theme.colors;
        let muted = Style::default().fg(colors.text_muted());
        let arabic_style = Style::default().fg(colors.arabic());

        let mut lines = Vec::new();
        if self.arabic.is_empty() {
            lines.push(Line::from(Span::styled("Verse text unavailable.", muted)));
        } else {
            let (before, hit, after) = split_highlight(self.arabic, self.phrase);
            lines.push(Line::from(vec![
                Span::styled(before, arabic_style),
                Span::styled(
                    hit,
                    arabic_style
                        .bg(colors.highlight_bg())
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(after, arabic_style),
            ]));
        }
        lines.push(Line::from(""));
        if !self.translation.is_empty() {
            lines.push(Line::from(Span::styled(self.translation, Style::default().fg(colors.fg()))));
            lines.push(Line::from(""));
        }
        if let Some(url) = &self.audio_url {
            lines.push(Line::from(Span::styled(format!("Recitation: {url}"), muted)));
        }
        lines
    }
}

impl Widget for VersePopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        Clear.render(area, buf);
        let block = Block::bordered()
            .title(format!(" {} ", self.reference))
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        Paragraph::new(self.lines())
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}
