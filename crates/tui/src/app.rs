use std::{
    io, thread,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use hangman_core::{AppConfig, Difficulty, Game, GameError, Outcome};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::gallows;

const MAX_INPUT_LEN: usize = 16;
const QUIT_COMMAND: &str = "quit";
const MENU_QUIT_INDEX: usize = Difficulty::ALL.len();

#[derive(Debug, Clone)]
struct Theme {
    primary_fg: Color,
    accent: Color,
    muted: Color,
    success: Color,
    warning: Color,
    danger: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_fg: Color::White,
            accent: Color::Cyan,
            muted: Color::DarkGray,
            success: Color::Green,
            warning: Color::Yellow,
            danger: Color::Red,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Menu,
    Play,
    Result,
}

enum AppEvent {
    Input(Event),
    Tick,
}

/// Terminal front end driving a [`Game`].
pub struct HangmanApp {
    config: AppConfig,
    theme: Theme,
    state: UiState,
    screen: Screen,
    game: Option<Game>,
    pause_until: Option<Instant>,
}

impl HangmanApp {
    pub fn new(config: AppConfig) -> Self {
        let mut state = UiState::default();
        if let Some(difficulty) = config.default_difficulty {
            state.menu_cursor = Difficulty::ALL
                .iter()
                .position(|candidate| *candidate == difficulty)
                .unwrap_or(0);
        }
        Self {
            config,
            theme: Theme::default(),
            state,
            screen: Screen::Menu,
            game: None,
            pause_until: None,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enter raw mode")?;
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to create terminal")?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(128);
        spawn_input_thread(event_tx, self.config.tick_rate());

        let outcome = self.event_loop(&mut terminal, &mut event_rx).await;
        restore_terminal(&mut terminal)?;
        outcome
    }

    async fn event_loop<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        event_rx: &mut mpsc::Receiver<AppEvent>,
    ) -> Result<()> {
        loop {
            terminal.draw(|frame| self.draw(frame))?;
            if self.state.should_quit {
                break;
            }

            match event_rx.recv().await {
                Some(AppEvent::Input(Event::Key(key))) => self.handle_key(key),
                Some(AppEvent::Input(_)) => {}
                Some(AppEvent::Tick) => self.handle_tick(Instant::now()),
                None => break,
            }

            if self.state.should_quit {
                break;
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit();
            return;
        }
        match self.screen {
            Screen::Menu => self.handle_menu_key(key),
            Screen::Play => self.handle_play_key(key),
            Screen::Result => self.handle_result_key(key),
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => self.quit(),
            KeyCode::Char('j') | KeyCode::Down => self.state.move_menu_cursor(1),
            KeyCode::Char('k') | KeyCode::Up => self.state.move_menu_cursor(-1),
            KeyCode::Char('1') => self.start_game(Difficulty::Basic),
            KeyCode::Char('2') => self.start_game(Difficulty::Intermediate),
            KeyCode::Enter => match Difficulty::ALL.get(self.state.menu_cursor) {
                Some(&difficulty) => self.start_game(difficulty),
                None => self.quit(),
            },
            KeyCode::Char(_) => self
                .state
                .set_status("Invalid choice! Please enter 1 or 2.".to_string()),
            _ => {}
        }
    }

    fn handle_play_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            self.quit();
            return;
        }
        if self.pause_until.is_some() {
            return;
        }
        match key.code {
            KeyCode::Enter => self.submit_guess(Instant::now()),
            KeyCode::Backspace => {
                self.state.input.pop();
            }
            KeyCode::Char(ch) => self.state.push_input(ch),
            _ => {}
        }
    }

    fn handle_result_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.quit(),
            KeyCode::Backspace => {
                self.state.input.pop();
            }
            KeyCode::Char(ch) => self.state.push_input(ch),
            KeyCode::Enter => {
                let answer = self.state.take_input();
                match answer.as_str() {
                    "y" | "yes" => {
                        info!("Starting another round");
                        self.game = None;
                        self.screen = Screen::Menu;
                        self.state.set_status("Choose difficulty level".to_string());
                    }
                    "n" | "no" => self.quit(),
                    _ => self
                        .state
                        .set_status("Please enter 'y' for yes or 'n' for no.".to_string()),
                }
            }
            _ => {}
        }
    }

    fn handle_tick(&mut self, now: Instant) {
        if self.screen != Screen::Play {
            return;
        }
        if let Some(until) = self.pause_until {
            if now >= until {
                self.next_turn();
            }
            return;
        }
        if self
            .game
            .as_ref()
            .is_some_and(|game| game.is_time_up_at(now))
        {
            self.expire_turn(now);
        }
    }

    fn start_game(&mut self, difficulty: Difficulty) {
        let mut game = Game::new(difficulty);
        game.start_turn_timer();
        let seconds = game.turn_duration().as_secs();
        info!(%difficulty, "Game started");
        self.game = Some(game);
        self.pause_until = None;
        self.screen = Screen::Play;
        self.state.input.clear();
        self.state
            .set_status(format!("You have {seconds} seconds to guess..."));
    }

    fn submit_guess(&mut self, now: Instant) {
        let input = self.state.take_input();
        if input == QUIT_COMMAND {
            self.quit();
            return;
        }

        let timed_out = self
            .game
            .as_ref()
            .is_some_and(|game| game.is_time_up_at(now));
        if timed_out {
            debug!(%input, "Guess arrived after the turn ran out");
            self.expire_turn(now);
            return;
        }

        let result = match self.game.as_mut() {
            Some(game) => game.submit_guess(&input),
            None => return,
        };
        match result {
            Ok(true) => {
                self.state
                    .set_status("Great guess! Letter found!".to_string());
                self.finish_turn(now);
            }
            Ok(false) => {
                self.state
                    .set_status("Sorry, that letter is not in the word.".to_string());
                self.finish_turn(now);
            }
            Err(GameError::InvalidInput { .. }) => {
                self.state
                    .set_status("Please enter exactly one letter!".to_string());
            }
            Err(err) => {
                warn!(?err, "Guess rejected");
                self.next_turn();
            }
        }
    }

    fn expire_turn(&mut self, now: Instant) {
        let result = match self.game.as_mut() {
            Some(game) => game.expire_turn(),
            None => return,
        };
        match result {
            Ok(()) => {
                self.state.input.clear();
                self.state
                    .set_status("Time's up! You lose a life.".to_string());
                self.finish_turn(now);
            }
            Err(err) => {
                warn!(?err, "Timeout ignored");
                self.next_turn();
            }
        }
    }

    fn finish_turn(&mut self, now: Instant) {
        let pause = self.config.result_pause();
        if pause.is_zero() {
            self.next_turn();
        } else {
            self.pause_until = Some(now + pause);
        }
    }

    fn next_turn(&mut self) {
        self.pause_until = None;
        let Some(game) = self.game.as_mut() else {
            return;
        };
        if game.is_over() {
            info!(outcome = %game.outcome(), secret = game.secret(), "Round over");
            self.screen = Screen::Result;
            self.state.input.clear();
            self.state.set_status("Play again? (y/n)".to_string());
        } else {
            game.start_turn_timer();
        }
    }

    fn quit(&mut self) {
        info!("Player quit");
        self.state.should_quit = true;
    }

    fn draw(&self, frame: &mut Frame) {
        match self.screen {
            Screen::Menu => self.draw_menu(frame),
            Screen::Play => self.draw_play(frame),
            Screen::Result => self.draw_result(frame),
        }
    }

    fn draw_menu(&self, frame: &mut Frame) {
        let area = frame.size();
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(6),
                Constraint::Min(5),
                Constraint::Length(3),
            ])
            .split(area);

        self.render_title(frame, layout[0], "WELCOME TO HANGMAN!");

        let rules = vec![
            Line::from("• Guess the hidden word/phrase letter by letter"),
            Line::from("• You have 6 lives (wrong guesses)"),
            Line::from("• You have 15 seconds per guess"),
            Line::from("• Find the word before your lives run out!"),
        ];
        let rules = Paragraph::new(rules)
            .block(Block::default().borders(Borders::ALL).title("Rules"))
            .wrap(Wrap { trim: true });
        frame.render_widget(rules, layout[1]);

        let labels: Vec<String> = Difficulty::ALL
            .iter()
            .enumerate()
            .map(|(idx, difficulty)| format!("{}. {}", idx + 1, difficulty.description()))
            .chain(std::iter::once("q. Quit".to_string()))
            .collect();
        let menu_lines: Vec<Line> = labels
            .iter()
            .enumerate()
            .map(|(idx, label)| {
                if idx == self.state.menu_cursor {
                    Line::from(Span::styled(
                        format!("▶ {label}"),
                        Style::default()
                            .fg(self.theme.accent)
                            .add_modifier(Modifier::BOLD),
                    ))
                } else {
                    Line::from(Span::styled(
                        format!("  {label}"),
                        Style::default().fg(self.theme.primary_fg),
                    ))
                }
            })
            .collect();
        let menu_height = (labels.len() as u16).saturating_add(2);
        let menu_area = centered_rect(36, menu_height, layout[2]);
        let menu = Paragraph::new(menu_lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Choose difficulty level"),
        );
        frame.render_widget(menu, menu_area);

        self.render_status(frame, layout[3]);
    }

    fn draw_play(&self, frame: &mut Frame) {
        let Some(game) = self.game.as_ref() else {
            return;
        };
        let area = frame.size();
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(9),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(area);

        let lives = usize::from(game.lives());
        let lost = usize::from(game.max_lives()).saturating_sub(lives);
        let header = Line::from(vec![
            Span::styled(
                format!("Level: {}", game.difficulty()),
                Style::default().fg(self.theme.accent),
            ),
            Span::raw("   Lives: "),
            Span::styled("♥ ".repeat(lives), Style::default().fg(self.theme.danger)),
            Span::styled("♡ ".repeat(lost), Style::default().fg(self.theme.muted)),
            Span::raw(format!("({}/{})", lives, game.max_lives())),
        ]);
        frame.render_widget(
            Paragraph::new(header).block(Block::default().borders(Borders::ALL).title("Hangman")),
            layout[0],
        );

        self.render_timer(frame, layout[1], game);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(13), Constraint::Min(20)])
            .split(layout[2]);

        let gallows_lines: Vec<Line> = gallows::render(lost as u8)
            .into_iter()
            .map(Line::from)
            .collect();
        frame.render_widget(
            Paragraph::new(gallows_lines).block(Block::default().borders(Borders::ALL)),
            body[0],
        );

        let guessed = game.guessed_letters();
        let guessed_text = if guessed.is_empty() {
            "(none yet)".to_string()
        } else {
            join_letters(&guessed)
        };
        let word_lines = vec![
            Line::from(Span::styled(
                game.render_display(),
                Style::default()
                    .fg(self.theme.primary_fg)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(format!("Guessed: {guessed_text}")),
            Line::from(Span::styled(
                format!("Misses:  {}", join_letters(&game.missed_letters())),
                Style::default().fg(self.theme.muted),
            )),
        ];
        frame.render_widget(
            Paragraph::new(word_lines)
                .block(Block::default().borders(Borders::ALL).title("Word"))
                .wrap(Wrap { trim: false }),
            body[1],
        );

        let prompt = format!("> {}", self.state.input);
        frame.render_widget(
            Paragraph::new(prompt.clone()).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Your guess (a single letter, or 'quit')"),
            ),
            layout[3],
        );
        if self.pause_until.is_none() {
            frame.set_cursor(layout[3].x + 1 + prompt.chars().count() as u16, layout[3].y + 1);
        }

        self.render_status(frame, layout[4]);
    }

    fn draw_result(&self, frame: &mut Frame) {
        let Some(game) = self.game.as_ref() else {
            return;
        };
        let area = frame.size();
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(7), Constraint::Length(3), Constraint::Length(3)])
            .split(area);

        let (headline, detail, color) = match game.outcome() {
            Outcome::Won => (
                "CONGRATULATIONS! YOU WON!",
                format!("You guessed: {}", game.secret()),
                self.theme.success,
            ),
            _ => (
                "GAME OVER!",
                format!("The answer was: {}", game.secret()),
                self.theme.danger,
            ),
        };
        let lines = vec![
            Line::from(Span::styled(
                headline,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(detail),
        ];
        let message_area = centered_rect(48, 5, layout[0]);
        frame.render_widget(
            Paragraph::new(lines)
                .block(Block::default().borders(Borders::ALL))
                .alignment(Alignment::Center),
            message_area,
        );

        frame.render_widget(
            Paragraph::new(format!("> {}", self.state.input))
                .block(Block::default().borders(Borders::ALL).title("Play again? (y/n)")),
            layout[1],
        );
        self.render_status(frame, layout[2]);
    }

    fn render_title(&self, frame: &mut Frame, area: Rect, title: &str) {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            title.to_string(),
            Style::default()
                .fg(self.theme.accent)
                .add_modifier(Modifier::BOLD),
        )))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
    }

    fn render_timer(&self, frame: &mut Frame, area: Rect, game: &Game) {
        let total = game.turn_duration().as_secs().max(1);
        let (ratio, label) = match game.remaining_time() {
            Some(seconds) if self.pause_until.is_none() => (
                (seconds as f64 / total as f64).clamp(0.0, 1.0),
                format!("{seconds}s"),
            ),
            _ => (0.0, "--".to_string()),
        };
        let color = if ratio > 0.33 {
            self.theme.success
        } else {
            self.theme.warning
        };
        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title("Time"))
            .gauge_style(Style::default().fg(color))
            .ratio(ratio)
            .label(label);
        frame.render_widget(gauge, area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Status");
        let paragraph = Paragraph::new(Line::from(self.state.status.clone()))
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}

fn join_letters(letters: &[char]) -> String {
    letters
        .iter()
        .map(char::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor()?;
    Ok(())
}

fn spawn_input_thread(sender: mpsc::Sender<AppEvent>, tick_rate: Duration) {
    thread::spawn(move || loop {
        match event::poll(tick_rate) {
            Ok(true) => match event::read() {
                Ok(evt) => {
                    if sender.blocking_send(AppEvent::Input(evt)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            },
            Ok(false) => {
                if sender.blocking_send(AppEvent::Tick).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });
}

struct UiState {
    menu_cursor: usize,
    input: String,
    status: String,
    should_quit: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            menu_cursor: 0,
            input: String::new(),
            status: "Choose difficulty level".to_string(),
            should_quit: false,
        }
    }
}

impl UiState {
    fn move_menu_cursor(&mut self, delta: isize) {
        let max = MENU_QUIT_INDEX as isize;
        self.menu_cursor = (self.menu_cursor as isize + delta).clamp(0, max) as usize;
    }

    fn push_input(&mut self, ch: char) {
        if self.input.chars().count() < MAX_INPUT_LEN && !ch.is_control() {
            self.input.push(ch);
        }
    }

    fn take_input(&mut self) -> String {
        let value = self.input.trim().to_lowercase();
        self.input.clear();
        value
    }

    fn set_status(&mut self, message: String) {
        self.status = message;
    }
}
