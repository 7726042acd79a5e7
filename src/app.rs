use std::sync::mpsc::Sender;
use std::thread;

use rand::SeedableRng;
use rand::rngs::SmallRng;

use nahw::config::Config;
use nahw::corpus::Corpus;
use nahw::engine::{Action, IntroOffer, LearnedWord, LearnerState, NavAction, Phase};
use nahw::generator::RngRandomizer;
use nahw::session::{QuizReport, QuizSession, QuizStatus};
use nahw::verse::{VerseTable, surah};
use nahw::waitlist::{self, SignupError, WaitlistEntry};

use crate::event::AppEvent;
use crate::ui::line_input::{InputResult, LineInput};
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Learn,
    Words,
    Quiz,
}

impl AppScreen {
    pub const ALL: [AppScreen; 3] = [AppScreen::Learn, AppScreen::Words, AppScreen::Quiz];

    pub fn title(self) -> &'static str {
        match self {
            AppScreen::Learn => "Learn",
            AppScreen::Words => "Words",
            AppScreen::Quiz => "Quiz",
        }
    }

    pub fn index(self) -> usize {
        match self {
            AppScreen::Learn => 0,
            AppScreen::Words => 1,
            AppScreen::Quiz => 2,
        }
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SignupStatus {
    Editing,
    Sending,
    Joined(String),
    Failed(String),
}

pub struct SignupDialog {
    pub input: LineInput,
    pub status: SignupStatus,
}

/// Modal drawn over the current tab. Keys go to the overlay first.
pub enum Overlay {
    None,
    Verse { surah: String, ayah: u32, phrase: String },
    ConfirmDelete { arabic: String },
    Signup(SignupDialog),
}

pub struct App {
    pub screen: AppScreen,
    pub corpus: Corpus,
    pub verses: VerseTable,
    pub state: LearnerState,
    pub config: Config,
    pub theme: &'static Theme,
    pub quiz: Option<QuizSession>,
    pub last_report: Option<QuizReport>,
    pub words_selected: usize,
    pub words_expanded: bool,
    pub overlay: Overlay,
    pub should_quit: bool,
    rng: RngRandomizer<SmallRng>,
}

impl App {
    pub fn new(config: Config, corpus: Corpus, theme: &'static Theme) -> Self {
        Self::with_rng(config, corpus, theme, SmallRng::from_entropy())
    }

    fn with_rng(config: Config, corpus: Corpus, theme: &'static Theme, rng: SmallRng) -> Self {
        Self {
            screen: AppScreen::Learn,
            corpus,
            verses: VerseTable::bundled(),
            state: LearnerState::new(),
            config,
            theme,
            quiz: None,
            last_report: None,
            words_selected: 0,
            words_expanded: false,
            overlay: Overlay::None,
            should_quit: false,
            rng: RngRandomizer(rng),
        }
    }

    fn dispatch(&mut self, action: impl Into<Action>) {
        self.state.dispatch(action, &self.corpus);
        let count = self.state.progress.learned_count();
        self.words_selected = self.words_selected.min(count.saturating_sub(1));
    }

    pub fn next_screen(&mut self) {
        self.screen = self.screen.next();
    }

    pub fn prev_screen(&mut self) {
        self.screen = self.screen.prev();
    }

    // Learn tab

    /// The one forward button: start, next example, or continue past the summary.
    pub fn learn_primary(&mut self) {
        let action = match self.state.cursor.phase {
            Phase::RuleIntro => match self.state.intro_offer(&self.corpus) {
                IntroOffer::ShowExamples => NavAction::Start,
                IntroOffer::AllLearned => NavAction::Skip,
            },
            Phase::ExampleBrowsing => NavAction::Advance,
            Phase::WordSummary => NavAction::Acknowledge,
        };
        self.dispatch(action);
    }

    pub fn learn_skip(&mut self) {
        if self.state.cursor.phase != Phase::WordSummary {
            self.dispatch(NavAction::Skip);
        }
    }

    pub fn open_current_verse(&mut self) {
        if let Some(example) = self.state.current_example(&self.corpus) {
            if self.state.cursor.showing_examples() {
                self.overlay = Overlay::Verse {
                    surah: example.surah.clone(),
                    ayah: example.ayah,
                    phrase: example.arabic.clone(),
                };
            }
        }
    }

    // Words tab

    pub fn selected_word(&self) -> Option<&LearnedWord> {
        self.state.progress.learned().get(self.words_selected)
    }

    pub fn words_next(&mut self) {
        let count = self.state.progress.learned_count();
        if count > 0 {
            self.words_selected = (self.words_selected + 1).min(count - 1);
        }
    }

    pub fn words_prev(&mut self) {
        self.words_selected = self.words_selected.saturating_sub(1);
    }

    pub fn toggle_expanded(&mut self) {
        if self.selected_word().is_some() {
            self.words_expanded = !self.words_expanded;
        }
    }

    pub fn request_delete(&mut self) {
        if let Some(word) = self.selected_word() {
            self.overlay = Overlay::ConfirmDelete {
                arabic: word.arabic.clone(),
            };
        }
    }

    pub fn confirm_delete(&mut self) {
        if let Overlay::ConfirmDelete { arabic } = std::mem::replace(&mut self.overlay, Overlay::None) {
            tracing::info!(%arabic, "learned word deleted");
            self.dispatch(Action::RemoveLearned(arabic));
        }
    }

    pub fn jump_to_selected_rule(&mut self) {
        if let Some(rule) = self.selected_word().map(|w| w.rule.clone()) {
            self.dispatch(NavAction::NavigateToRule(rule));
            self.screen = AppScreen::Learn;
        }
    }

    pub fn open_selected_verse(&mut self) {
        if let Some(word) = self.selected_word() {
            self.overlay = Overlay::Verse {
                surah: word.surah.clone(),
                ayah: word.ayah,
                phrase: word.arabic.clone(),
            };
        }
    }

    pub fn practice_selected(&mut self) {
        let Some(word) = self.selected_word().cloned() else {
            return;
        };
        let quiz = QuizSession::targeted(
            &word,
            self.state.progress.learned(),
            &self.corpus,
            self.config.quiz_option_count,
            &mut self.rng,
        );
        self.replace_quiz(quiz);
    }

    // Quiz tab

    pub fn start_practice(&mut self) {
        let quiz = QuizSession::practice_all(
            self.state.progress.learned(),
            &self.corpus,
            self.config.quiz_option_count,
            &mut self.rng,
        );
        self.replace_quiz(quiz);
    }

    fn replace_quiz(&mut self, quiz: QuizSession) {
        if let Some(old) = self.quiz.replace(quiz) {
            old.abandon();
        }
        self.last_report = None;
        self.screen = AppScreen::Quiz;
    }

    pub fn quiz_select(&mut self, option: usize) {
        if let Some(quiz) = self.quiz.as_mut() {
            quiz.select_answer(option);
        }
    }

    pub fn quiz_next(&mut self) {
        let Some(quiz) = self.quiz.as_mut() else {
            return;
        };
        if let Some(results) = quiz.advance() {
            self.last_report = quiz.report();
            self.quiz = None;
            self.dispatch(Action::MergeResults(results));
        }
    }

    pub fn close_quiz(&mut self) {
        if let Some(quiz) = self.quiz.take() {
            quiz.abandon();
        }
        self.last_report = None;
    }

    pub fn quiz_status(&self) -> Option<QuizStatus> {
        self.quiz.as_ref().map(QuizSession::status)
    }

    // Overlays

    pub fn close_overlay(&mut self) {
        self.overlay = Overlay::None;
    }

    pub fn audio_url(&self, surah_name: &str, ayah: u32) -> Option<String> {
        surah::audio_url(&self.config.audio_host, surah_name, ayah)
    }

    pub fn cycle_theme(&mut self) {
        let themes = Theme::available_themes();
        match themes.iter().position(|t| *t == self.config.theme) {
            Some(idx) => self.config.theme = themes[(idx + 1) % themes.len()].clone(),
            None => {
                if let Some(first) = themes.first() {
                    self.config.theme = first.clone();
                }
            }
        }
        if let Some(theme) = Theme::load(&self.config.theme) {
            self.theme = Box::leak(Box::new(theme));
        }
    }

    pub fn open_signup(&mut self) {
        self.overlay = Overlay::Signup(SignupDialog {
            input: LineInput::new(""),
            status: SignupStatus::Editing,
        });
    }

    pub fn handle_signup_key(&mut self, key: crossterm::event::KeyEvent, tx: &Sender<AppEvent>) {
        let Overlay::Signup(dialog) = &mut self.overlay else {
            return;
        };
        if dialog.status == SignupStatus::Sending {
            return;
        }
        if matches!(dialog.status, SignupStatus::Joined(_)) {
            self.overlay = Overlay::None;
            return;
        }
        match dialog.input.handle(key) {
            InputResult::Continue => {}
            InputResult::Cancel => self.overlay = Overlay::None,
            InputResult::Submit => match waitlist::check_email(dialog.input.value()).map(str::to_string) {
                Err(err) => dialog.status = SignupStatus::Failed(err.to_string()),
                Ok(email) => {
                    let url = self.config.waitlist_url.clone();
                    let tx = tx.clone();
                    dialog.status = SignupStatus::Sending;
                    thread::spawn(move || {
                        let outcome = waitlist::submit(&url, &email);
                        let _ = tx.send(AppEvent::Signup(outcome));
                    });
                }
            },
        }
    }

    pub fn on_signup_result(&mut self, outcome: Result<WaitlistEntry, SignupError>) {
        if let Overlay::Signup(dialog) = &mut self.overlay {
            dialog.status = match outcome {
                Ok(entry) => SignupStatus::Joined(entry.email),
                Err(err) => SignupStatus::Failed(err.to_string()),
            };
        }
    }
}
