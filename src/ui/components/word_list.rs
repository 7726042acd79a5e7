use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use nahw::engine::ProgressTracker;

use crate::ui::theme::Theme;

/// The Words tab. Each learned word is coloured by its quiz performance.
pub struct WordList<'a> {
    progress: &'a ProgressTracker,
    selected: usize,
    expanded: bool,
    theme: &'a Theme,
}

impl<'a> WordList<'a> {
    pub fn new(progress: &'a ProgressTracker, selected: usize, expanded: bool, theme: &'a Theme) -> Self {
        Self {
            progress,
            selected,
            expanded,
            theme,
        }
    }

    fn lines(&self, height: usize) -> Vec<Line<'a>> {
        let colors = &self.theme.colors;
        let muted = Style::default().fg(colors.text_muted());
        let learned = self.progress.learned();
        if learned.is_empty() {
            return vec![Line::from(Span::styled(
                "No words yet. Study some examples in the Learn tab.",
                muted,
            ))];
        }

        let summary = self.progress.results().summary();
        let mut lines = vec![
            Line::from(vec![
                Span::styled(format!("{} learned  ", learned.len()), Style::default().fg(colors.fg())),
                Span::styled(format!("{} correct  ", summary.fully_correct), Style::default().fg(colors.correct())),
                Span::styled(format!("{} partial  ", summary.partial), Style::default().fg(colors.partial())),
                Span::styled(format!("{} missed", summary.fully_incorrect), Style::default().fg(colors.incorrect())),
            ]),
            Line::from(""),
        ];

        // Keep the selection on screen; details take up to six rows.
        let reserved = if self.expanded { 6 } else { 0 };
        let visible = height.saturating_sub(lines.len() + reserved).max(1);
        let first = self.selected.saturating_sub(visible - 1);

        for (i, word) in learned.iter().enumerate().skip(first).take(visible) {
            let is_selected = i == self.selected;
            let indicator = if is_selected { ">" } else { " " };
            let color = colors.performance(self.progress.performance(&word.arabic));
            let mut style = Style::default().fg(color);
            if is_selected {
                style = style.add_modifier(Modifier::BOLD).bg(colors.accent_dim());
            }
            lines.push(Line::from(vec![
                Span::styled(format!(" {indicator} {}", word.arabic), style),
                Span::styled(format!("  {}", word.translation), muted),
            ]));

            if is_selected && self.expanded {
                let answers = self.progress.results().get(&word.arabic).unwrap_or(&[]);
                let record = if answers.is_empty() {
                    "not quizzed yet".to_string()
                } else {
                    let right = answers.iter().filter(|a| **a).count();
                    format!("{right} of {} answers correct", answers.len())
                };
                lines.push(Line::from(Span::styled(format!("     {}", word.rule), Style::default().fg(colors.fg()))));
                lines.push(Line::from(Span::styled(format!("     {}", word.explanation), muted)));
                lines.push(Line::from(Span::styled(format!("     {} {}", word.surah, word.ayah), muted)));
                lines.push(Line::from(Span::styled(format!("     {record}"), muted)));
            }
        }
        lines
    }
}

impl Widget for WordList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let block = Block::bordered()
            .title(" Learned words ")
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        Paragraph::new(self.lines(inner.height as usize))
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}
