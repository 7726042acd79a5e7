mod app;
mod event;
mod ui;

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget, Wrap};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use nahw::config::Config;
use nahw::corpus::Corpus;
use nahw::engine::Phase;
use nahw::engine::progress::TOTAL_QURAN_WORDS;
use nahw::session::QuizStatus;

use app::{App, AppScreen, Overlay, SignupStatus};
use event::{AppEvent, EventHandler};
use ui::components::lesson_view::LessonView;
use ui::components::menu::Menu;
use ui::components::progress_bar::ProgressBar;
use ui::components::quiz_view::QuizView;
use ui::components::verse_popup::VersePopup;
use ui::components::word_list::WordList;
use ui::layout::{AppLayout, centered_rect, pack_hint_lines};
use ui::theme::Theme;

#[derive(Parser)]
#[command(name = "nahw", version, about = "Terminal tutor for Arabic grammar through Quranic examples")]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Corpus JSON file to use instead of the bundled one")]
    corpus: Option<PathBuf>,

    #[arg(long, help = "Write logs to this file")]
    log_file: Option<PathBuf>,

    #[arg(long, help = "Validate the corpus, print any problems and exit")]
    check_corpus: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_else(|err| {
        eprintln!("warning: ignoring unreadable config: {err:#}");
        Config::default()
    });
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if let Some(path) = cli.corpus {
        config.corpus_path = Some(path);
    }
    if let Some(path) = cli.log_file {
        config.log_file = path;
    }

    if let Err(err) = init_logging(&config.log_file) {
        eprintln!("warning: logging disabled: {err:#}");
    }

    let corpus = load_corpus(&config)?;
    if cli.check_corpus {
        return check_corpus(&corpus);
    }
    if let Err(err) = corpus.validate() {
        tracing::warn!(%err, "continuing with a corpus that failed validation");
    }

    let theme = Theme::load(&config.theme).unwrap_or_else(|| {
        tracing::warn!(theme = %config.theme, "unknown theme, using default");
        Theme::default()
    });
    let theme: &'static Theme = Box::leak(Box::new(theme));
    let mut app = App::new(config, corpus, theme);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(100));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

/// Logs go to a file so nothing is printed over the TUI.
fn init_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    let filter = EnvFilter::try_from_env("NAHW_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .try_init()?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "nahw starting");
    Ok(())
}

fn load_corpus(config: &Config) -> Result<Corpus> {
    match &config.corpus_path {
        Some(path) => {
            let corpus = Corpus::load(path)?;
            tracing::info!(path = %path.display(), rules = corpus.rule_count(), "loaded corpus");
            Ok(corpus)
        }
        None => Ok(Corpus::bundled()?),
    }
}

fn check_corpus(corpus: &Corpus) -> Result<()> {
    let violations = corpus.violations();
    println!(
        "{} rules, {} examples",
        corpus.rule_count(),
        corpus.example_count()
    );
    for violation in &violations {
        println!("  - {violation}");
    }
    if violations.is_empty() {
        println!("corpus OK");
        Ok(())
    } else {
        anyhow::bail!("corpus has {} problem(s)", violations.len())
    }
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key, events),
            AppEvent::Signup(outcome) => app.on_signup_result(outcome),
            AppEvent::Tick | AppEvent::Resize(_, _) => {}
        }

        if app.should_quit {
            tracing::info!(learned = app.state.progress.learned_count(), "nahw exiting");
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent, events: &EventHandler) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match &app.overlay {
        Overlay::None => {}
        Overlay::Verse { .. } => {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('v') | KeyCode::Char('q')
            ) {
                app.close_overlay();
            }
            return;
        }
        Overlay::ConfirmDelete { .. } => {
            match key.code {
                KeyCode::Char('y') => app.confirm_delete(),
                KeyCode::Char('n') | KeyCode::Esc => app.close_overlay(),
                _ => {}
            }
            return;
        }
        Overlay::Signup(_) => {
            app.handle_signup_key(key, &events.sender());
            return;
        }
    }

    // Digits answer questions while a quiz is running.
    let quiz_running = app.screen == AppScreen::Quiz && app.quiz.is_some();

    match key.code {
        KeyCode::Char('q') if !quiz_running => {
            app.should_quit = true;
            return;
        }
        KeyCode::Tab => {
            app.next_screen();
            return;
        }
        KeyCode::BackTab => {
            app.prev_screen();
            return;
        }
        KeyCode::Char('w') => {
            app.open_signup();
            return;
        }
        KeyCode::Char('t') => {
            app.cycle_theme();
            if let Err(err) = app.config.save() {
                tracing::warn!(error = %err, "could not save config");
            }
            return;
        }
        KeyCode::Char(ch @ '1'..='3') if !quiz_running => {
            let index = ch as usize - '1' as usize;
            app.screen = AppScreen::ALL[index];
            return;
        }
        _ => {}
    }

    match app.screen {
        AppScreen::Learn => handle_learn_key(app, key),
        AppScreen::Words => handle_words_key(app, key),
        AppScreen::Quiz => handle_quiz_key(app, key),
    }
}

fn handle_learn_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Right | KeyCode::Char('l') => {
            app.learn_primary()
        }
        KeyCode::Char('n') => app.learn_skip(),
        KeyCode::Char('v') => app.open_current_verse(),
        _ => {}
    }
}

fn handle_words_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.words_next(),
        KeyCode::Char('k') | KeyCode::Up => app.words_prev(),
        KeyCode::Enter => app.toggle_expanded(),
        KeyCode::Char('x') | KeyCode::Delete => app.request_delete(),
        KeyCode::Char('r') => app.jump_to_selected_rule(),
        KeyCode::Char('p') => app.practice_selected(),
        KeyCode::Char('v') => app.open_selected_verse(),
        _ => {}
    }
}

fn handle_quiz_key(app: &mut App, key: KeyEvent) {
    match app.quiz_status() {
        None => {
            if key.code == KeyCode::Enter {
                app.start_practice();
            }
        }
        Some(QuizStatus::NoQuestions) | Some(QuizStatus::Complete) => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                app.close_quiz();
            }
        }
        Some(QuizStatus::Asking) => match key.code {
            KeyCode::Char(ch @ '1'..='9') => app.quiz_select(ch as usize - '1' as usize),
            KeyCode::Esc => app.close_quiz(),
            _ => {}
        },
        Some(QuizStatus::Answered) => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Right => app.quiz_next(),
            KeyCode::Esc => app.close_quiz(),
            _ => {}
        },
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    let layout = AppLayout::new(area);
    render_header(frame, app, layout.header);

    let titles: Vec<&str> = AppScreen::ALL.iter().map(|s| s.title()).collect();
    let menu = Menu::new(&titles, app.screen.index(), app.theme);
    frame.render_widget(&menu, layout.tabs);

    let mut main = layout.main;
    if layout.tier.show_progress_bar(area.height) {
        let split = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(main);
        frame.render_widget(words_progress(app), split[0]);
        main = split[1];
    }

    match app.screen {
        AppScreen::Learn => {
            frame.render_widget(LessonView::new(&app.state, &app.corpus, app.theme), main)
        }
        AppScreen::Words => frame.render_widget(
            WordList::new(
                &app.state.progress,
                app.words_selected,
                app.words_expanded,
                app.theme,
            ),
            main,
        ),
        AppScreen::Quiz => frame.render_widget(
            QuizView::new(
                app.quiz.as_ref(),
                app.last_report.as_ref(),
                app.state.progress.learned_count(),
                app.theme,
            ),
            main,
        ),
    }

    if let Some(sidebar) = layout.sidebar {
        render_sidebar(frame, app, sidebar);
    }

    let hints = footer_hints(app);
    let lines: Vec<Line> = pack_hint_lines(&hints, layout.footer.width as usize)
        .into_iter()
        .map(|l| Line::from(Span::styled(l, Style::default().fg(colors.text_muted()))))
        .collect();
    frame.render_widget(Paragraph::new(lines), layout.footer);

    render_overlay(frame, app);
}

fn render_header(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let colors = &app.theme.colors;
    let info = format!(
        " {} words learned | {} quizzed",
        app.state.progress.learned_count(),
        app.state.progress.results().len()
    );
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " nahw ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(info, Style::default().fg(colors.header_fg()).bg(colors.header_bg())),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, area);
}

fn words_progress(app: &App) -> ProgressBar<'_> {
    let learned = app.state.progress.learned_count();
    ProgressBar::new("Quran words", app.state.progress.progress_ratio(), app.theme)
        .caption(format!("{learned} / {TOTAL_QURAN_WORDS}"))
}

fn render_sidebar(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let colors = &app.theme.colors;
    let split = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);
    frame.render_widget(words_progress(app), split[0]);

    let summary = app.state.progress.results().summary();
    let lines = vec![
        Line::from(Span::styled(
            format!("Examples in corpus: {}", app.corpus.example_count()),
            Style::default().fg(colors.fg()),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("Fully correct: {}", summary.fully_correct),
            Style::default().fg(colors.correct()),
        )),
        Line::from(Span::styled(
            format!("Partial: {}", summary.partial),
            Style::default().fg(colors.partial()),
        )),
        Line::from(Span::styled(
            format!("Fully incorrect: {}", summary.fully_incorrect),
            Style::default().fg(colors.incorrect()),
        )),
    ];
    let block = Block::bordered()
        .title(" Progress ")
        .border_style(Style::default().fg(colors.border()));
    frame.render_widget(Paragraph::new(lines).block(block), split[1]);
}

fn footer_hints(app: &App) -> Vec<&'static str> {
    let mut hints = match app.screen {
        AppScreen::Learn => match app.state.cursor.phase {
            Phase::RuleIntro => vec!["[Enter] Continue", "[n] Next rule"],
            Phase::ExampleBrowsing => vec!["[Enter] Next example", "[n] Skip rule", "[v] Verse"],
            Phase::WordSummary => vec!["[Enter] Next rule"],
        },
        AppScreen::Words => vec![
            "[j/k] Move",
            "[Enter] Details",
            "[p] Practise",
            "[r] Go to rule",
            "[v] Verse",
            "[x] Delete",
        ],
        AppScreen::Quiz => match app.quiz_status() {
            None => vec!["[Enter] Practise all"],
            Some(QuizStatus::Asking) => vec!["[1-4] Answer", "[Esc] Stop"],
            Some(QuizStatus::Answered) => vec!["[Enter] Next", "[Esc] Stop"],
            Some(QuizStatus::NoQuestions) | Some(QuizStatus::Complete) => vec!["[Esc] Close"],
        },
    };
    hints.extend(["[Tab] Switch tab", "[t] Theme", "[w] Waitlist", "[q] Quit"]);
    hints
}

fn render_overlay(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;
    match &app.overlay {
        Overlay::None => {}
        Overlay::Verse { surah, ayah, phrase } => {
            let popup = VersePopup {
                reference: format!("{surah} {ayah}"),
                arabic: app.verses.arabic_or_empty(surah, *ayah),
                translation: app.verses.translation_or_empty(surah, *ayah),
                phrase,
                audio_url: app.audio_url(surah, *ayah),
                theme: app.theme,
            };
            frame.render_widget(popup, centered_rect(70, 50, area));
        }
        Overlay::ConfirmDelete { arabic } => {
            let rect = centered_rect(40, 20, area);
            let lines = vec![
                Line::from(Span::styled(
                    format!("Remove {arabic} and its quiz history?"),
                    Style::default().fg(colors.fg()),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "[y] Remove  [n] Keep",
                    Style::default().fg(colors.text_muted()),
                )),
            ];
            render_dialog(frame, app, rect, " Delete word ", lines);
        }
        Overlay::Signup(dialog) => {
            let rect = centered_rect(50, 25, area);
            let (before, cursor, after) = dialog.input.render_parts();
            let cursor_text = cursor.map_or(" ".to_string(), |c| c.to_string());
            let mut lines = vec![
                Line::from(Span::styled(
                    "Get notified when new lessons arrive.",
                    Style::default().fg(colors.fg()),
                )),
                Line::from(""),
                Line::from(vec![
                    Span::styled("Email: ", Style::default().fg(colors.text_muted())),
                    Span::styled(before, Style::default().fg(colors.fg())),
                    Span::styled(cursor_text, Style::default().fg(colors.bg()).bg(colors.fg())),
                    Span::styled(after, Style::default().fg(colors.fg())),
                ]),
                Line::from(""),
            ];
            let status = match &dialog.status {
                SignupStatus::Editing => {
                    Span::styled("[Enter] Join  [Esc] Cancel", Style::default().fg(colors.text_muted()))
                }
                SignupStatus::Sending => {
                    Span::styled("Joining...", Style::default().fg(colors.text_muted()))
                }
                SignupStatus::Joined(email) => Span::styled(
                    format!("Thanks! {email} is on the waitlist. Press any key."),
                    Style::default().fg(colors.correct()),
                ),
                SignupStatus::Failed(message) => {
                    Span::styled(message.clone(), Style::default().fg(colors.error()))
                }
            };
            lines.push(Line::from(status));
            render_dialog(frame, app, rect, " Join the waitlist ", lines);
        }
    }
}

fn render_dialog(frame: &mut ratatui::Frame, app: &App, rect: Rect, title: &str, lines: Vec<Line>) {
    let colors = &app.theme.colors;
    let buf = frame.buffer_mut();
    Clear.render(rect, buf);
    let block = Block::bordered()
        .title(title)
        .border_style(Style::default().fg(colors.accent()))
        .style(Style::default().bg(colors.bg()));
    let inner = block.inner(rect);
    block.render(rect, buf);
    Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .render(inner, buf);
}
