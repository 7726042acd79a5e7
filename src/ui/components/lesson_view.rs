use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use nahw::corpus::Corpus;
use nahw::engine::{IntroOffer, LearnerState, Phase};

use crate::ui::theme::Theme;

/// The Learn tab: rule intro, one example, or the end-of-rule word summary.
pub struct LessonView<'a> {
    state: &'a LearnerState,
    corpus: &'a Corpus,
    theme: &'a Theme,
}

impl<'a> LessonView<'a> {
    pub fn new(state: &'a LearnerState, corpus: &'a Corpus, theme: &'a Theme) -> Self {
        Self { state, corpus, theme }
    }

    fn lines(&self) -> Vec<Line<'a>> {
        let colors = &self.theme.colors;
        let muted = Style::default().fg(colors.text_muted());
        let Some(rule) = self.state.current_rule(self.corpus) else {
            return vec![Line::from(Span::styled("The corpus has no rules.", muted))];
        };

        let heading = Line::from(Span::styled(
            format!(
                "Rule {} of {}",
                self.state.cursor.rule_index + 1,
                self.corpus.rule_count()
            ),
            Style::default().fg(colors.accent()).add_modifier(Modifier::BOLD),
        ));
        let rule_line = Line::from(Span::styled(rule.text.as_str(), Style::default().fg(colors.fg())));

        match self.state.cursor.phase {
            Phase::RuleIntro => {
                let offer = match self.state.intro_offer(self.corpus) {
                    IntroOffer::ShowExamples => format!("{} examples to study", rule.examples.len()),
                    IntroOffer::AllLearned => "You have learned every example of this rule.".to_string(),
                };
                vec![heading, Line::from(""), rule_line, Line::from(""), Line::from(Span::styled(offer, muted))]
            }
            Phase::ExampleBrowsing => {
                let Some(example) = self.state.current_example(self.corpus) else {
                    return vec![heading, rule_line];
                };
                vec![
                    heading,
                    rule_line,
                    Line::from(""),
                    Line::from(Span::styled(
                        format!(
                            "Example {} of {}",
                            self.state.cursor.example_index + 1,
                            rule.examples.len()
                        ),
                        muted,
                    )),
                    Line::from(""),
                    Line::from(Span::styled(
                        example.arabic.as_str(),
                        Style::default().fg(colors.arabic()).add_modifier(Modifier::BOLD),
                    ))
                    .alignment(Alignment::Center),
                    Line::from(Span::styled(example.translation.as_str(), Style::default().fg(colors.fg())))
                        .alignment(Alignment::Center),
                    Line::from(""),
                    Line::from(Span::styled(example.explanation.as_str(), Style::default().fg(colors.fg()))),
                    Line::from(""),
                    Line::from(Span::styled(format!("{} {}", example.surah, example.ayah), muted)),
                ]
            }
            Phase::WordSummary => {
                let mut lines = vec![
                    heading,
                    rule_line,
                    Line::from(""),
                    Line::from(Span::styled(
                        "Words you met in this rule",
                        Style::default().fg(colors.accent()),
                    )),
                    Line::from(""),
                ];
                for vocab in self.state.summary_vocabulary(self.corpus) {
                    lines.push(Line::from(vec![
                        Span::styled(
                            format!("  {}", vocab.word),
                            Style::default().fg(colors.arabic()).add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(format!("  {}", vocab.translation), Style::default().fg(colors.fg())),
                        Span::styled(format!("  ({})", vocab.part_of_speech), muted),
                    ]));
                }
                lines
            }
        }
    }
}

impl Widget for LessonView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let block = Block::bordered()
            .title(" Learn ")
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        Paragraph::new(self.lines())
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}
