use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use nahw::session::{QuizReport, QuizSession, QuizStatus};

use crate::ui::components::progress_bar::ProgressBar;
use crate::ui::theme::Theme;

pub struct QuizView<'a> {
    quiz: Option<&'a QuizSession>,
    report: Option<&'a QuizReport>,
    learned_count: usize,
    theme: &'a Theme,
}

impl<'a> QuizView<'a> {
    pub fn new(
        quiz: Option<&'a QuizSession>,
        report: Option<&'a QuizReport>,
        learned_count: usize,
        theme: &'a Theme,
    ) -> Self {
        Self {
            quiz,
            report,
            learned_count,
            theme,
        }
    }

    fn idle_lines(&self) -> Vec<Line<'a>> {
        let colors = &self.theme.colors;
        let muted = Style::default().fg(colors.text_muted());
        let mut lines = Vec::new();
        if let Some(report) = self.report {
            lines.push(Line::from(Span::styled(
                "Quiz complete",
                Style::default().fg(colors.accent()).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(
                format!(
                    "{} of {} correct ({:.0}%) in {:.0}s",
                    report.correct,
                    report.asked,
                    report.accuracy(),
                    report.elapsed_secs()
                ),
                Style::default().fg(colors.fg()),
            )));
            lines.push(Line::from(""));
        }
        let prompt = if self.learned_count == 0 {
            "Learn a few examples first, then come back to practise.".to_string()
        } else {
            format!("Press Enter to practise all {} learned words.", self.learned_count)
        };
        lines.push(Line::from(Span::styled(prompt, muted)));
        lines
    }

    fn question_lines(&self, quiz: &'a QuizSession) -> Vec<Line<'a>> {
        let colors = &self.theme.colors;
        let muted = Style::default().fg(colors.text_muted());
        match quiz.status() {
            QuizStatus::NoQuestions => {
                return vec![
                    Line::from(Span::styled(
                        "No questions available for these words yet.",
                        Style::default().fg(colors.fg()),
                    )),
                    Line::from(Span::styled("Learn more examples to unlock questions.", muted)),
                ];
            }
            QuizStatus::Complete => return self.idle_lines(),
            QuizStatus::Asking | QuizStatus::Answered => {}
        }
        let Some(question) = quiz.current() else {
            return Vec::new();
        };

        let mut lines = vec![
            Line::from(Span::styled(
                format!("Question {} of {}  ·  {}", quiz.index() + 1, quiz.len(), question.kind.label()),
                muted,
            )),
            Line::from(""),
            Line::from(Span::styled(
                question.prompt.as_str(),
                Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        let selected = quiz.selected();
        for (i, option) in question.options.iter().enumerate() {
            let style = match selected {
                None => Style::default().fg(colors.fg()),
                Some(_) if question.is_correct(option) => {
                    Style::default().fg(colors.correct()).add_modifier(Modifier::BOLD)
                }
                Some(chosen) if chosen == i => Style::default().fg(colors.incorrect()),
                Some(_) => muted,
            };
            lines.push(Line::from(Span::styled(format!("  [{}] {option}", i + 1), style)));
        }

        if let Some(chosen) = selected {
            lines.push(Line::from(""));
            let verdict = match question.options.get(chosen) {
                Some(answer) if question.is_correct(answer) => {
                    Span::styled("Correct!", Style::default().fg(colors.correct()))
                }
                _ => Span::styled(
                    format!("Incorrect. The answer is: {}", question.correct_answer),
                    Style::default().fg(colors.incorrect()),
                ),
            };
            lines.push(Line::from(verdict));
        }
        lines
    }
}

impl Widget for QuizView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let block = Block::bordered()
            .title(" Quiz ")
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let Some(quiz) = self.quiz else {
            Paragraph::new(self.idle_lines())
                .wrap(Wrap { trim: false })
                .render(inner, buf);
            return;
        };

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(inner);
        ProgressBar::new("Progress", quiz.progress(), self.theme).render(layout[0], buf);
        Paragraph::new(self.question_lines(quiz))
            .wrap(Wrap { trim: false })
            .render(layout[1], buf);
    }
}

#[cfg(test)]
mod tests {
    use nahw::corpus::Corpus;
    use nahw::engine::LearnedWord;
    use nahw::generator::FixedOrder;

    use super::*;

    fn text(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn empty_quiz_says_so() {
        let quiz = QuizSession::new(Vec::new());
        let theme = Theme::default();
        let view = QuizView::new(Some(&quiz), None, 0, &theme);
        assert!(text(&view.question_lines(&quiz)).contains("No questions available"));
    }

    #[test]
    fn wrong_answer_reveals_correct_one() {
        let corpus = Corpus::bundled().unwrap();
        let learned: Vec<LearnedWord> = corpus.rules[1]
            .examples
            .iter()
            .map(|ex| LearnedWord::snapshot(ex, &corpus.rules[1]))
            .collect();
        let mut quiz = QuizSession::targeted(&learned[0], &learned, &corpus, 4, &mut FixedOrder::default());
        let wrong = quiz
            .current()
            .and_then(|q| q.options.iter().position(|o| !q.is_correct(o)))
            .unwrap();
        quiz.select_answer(wrong);
        let theme = Theme::default();
        let view = QuizView::new(Some(&quiz), None, learned.len(), &theme);
        assert!(text(&view.question_lines(&quiz)).contains("Incorrect. The answer is:"));
    }
}
