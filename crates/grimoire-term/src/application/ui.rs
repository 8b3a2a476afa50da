#[cfg(test)]
#[path = "ui_test.rs"]
mod tests;

use std::io;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::execute;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::Backend;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Alignment;
use ratatui::layout::Constraint;
use ratatui::layout::Layout;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Wrap;
use ratatui::Frame;
use ratatui::Terminal;
use strum::IntoEnumIterator;
use tokio::sync::mpsc;
use tokio::task;
use tui_textarea::TextArea;

use crate::domain::models::Action;
use crate::domain::models::Agent;
use crate::domain::models::AgentClientBox;
use crate::domain::models::Event;
use crate::domain::models::Sender;
use crate::domain::services::ActionsService;
use crate::domain::services::EventsService;
use crate::domain::services::SessionState;

const TITLE: &str = "Maître du Jeu IA";
const SUBTITLE: &str = "Votre compagnon d'aventure numérique";
const AGENT_LABEL: &str = " Choisir l'Agent (Tab) ";
const INPUT_LABEL: &str = " Votre Action ";
const INPUT_PLACEHOLDER: &str = "Que faites-vous, aventurier ?";
const TRANSCRIPT_LABEL: &str = " Chronique ";
const THINKING_TEXT: &str = "Le Maître du Jeu réfléchit...";
const SEND_IDLE_TEXT: &str = "Envoyer au Maître (Entrée)";
const SEND_BUSY_TEXT: &str = "Envoi en cours...";
const QUIT_HINT: &str = "Ctrl+C pour quitter";
const USER_NAME: &str = "Vous";
const AGENT_NAME: &str = "Maître du Jeu";
const PAGE_SIZE: usize = 10;

/// Vertical scroll of the transcript. Sticks to the newest entry until the
/// player scrolls up.
#[derive(Debug)]
pub struct Scroll {
    position: usize,
    max: usize,
    follow: bool,
}

impl Default for Scroll {
    fn default() -> Scroll {
        Scroll {
            position: 0,
            max: 0,
            follow: true,
        }
    }
}

impl Scroll {
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn set_bounds(&mut self, content_height: usize, viewport_height: usize) {
        self.max = content_height.saturating_sub(viewport_height);
        if self.follow || self.position > self.max {
            self.position = self.max;
        }
    }

    pub fn up(&mut self, lines: usize) {
        self.follow = false;
        self.position = self.position.saturating_sub(lines);
    }

    pub fn down(&mut self, lines: usize) {
        self.position = (self.position + lines).min(self.max);
        if self.position == self.max {
            self.follow = true;
        }
    }

    pub fn last(&mut self) {
        self.follow = true;
        self.position = self.max;
    }
}

fn new_textarea() -> TextArea<'static> {
    let mut textarea = TextArea::default();
    textarea.set_placeholder_text(INPUT_PLACEHOLDER);
    textarea.set_cursor_line_style(Style::default());
    textarea.set_block(Block::default().borders(Borders::ALL).title(INPUT_LABEL));
    textarea
}

fn transcript_lines(state: &SessionState) -> Vec<Line<'static>> {
    let mut lines = vec![];

    for message in state.messages() {
        let (alignment, name, name_style) = match message.sender {
            Sender::User => (
                Alignment::Right,
                USER_NAME,
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Sender::Agent => (
                Alignment::Left,
                AGENT_NAME,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        };

        let text_style = if message.is_error() {
            Style::default().fg(Color::LightRed)
        } else {
            Style::default()
        };

        lines.push(Line::from(Span::styled(name, name_style)).alignment(alignment));
        for text_line in message.text.split('\n') {
            lines.push(Line::from(Span::styled(text_line.to_string(), text_style)).alignment(alignment));
        }
        lines.push(Line::default());
    }

    if state.is_busy() {
        lines.push(
            Line::from(Span::styled(
                THINKING_TEXT,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            ))
            .alignment(Alignment::Left),
        );
    }

    lines
}

fn agent_selector(selected: Agent) -> Line<'static> {
    let mut spans = vec![];
    for agent in Agent::iter() {
        let style = if agent == selected {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} ", agent.label()), style));
        spans.push(Span::raw(" "));
    }

    Line::from(spans)
}

fn status_line(state: &SessionState) -> Line<'static> {
    let send_text = if state.can_send() {
        Span::styled(SEND_IDLE_TEXT, Style::default().fg(Color::Yellow))
    } else {
        Span::styled(SEND_BUSY_TEXT, Style::default().fg(Color::DarkGray))
    };

    Line::from(vec![
        send_text,
        Span::raw("  ·  "),
        Span::styled(QUIT_HINT, Style::default().fg(Color::DarkGray)),
    ])
    .alignment(Alignment::Center)
}

pub fn render(frame: &mut Frame, state: &SessionState, textarea: &TextArea, scroll: &mut Scroll) {
    let [header_area, agent_area, transcript_area, input_area, status_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            TITLE,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(SUBTITLE, Style::default().fg(Color::Gray))),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(header, header_area);

    let selector = Paragraph::new(agent_selector(state.agent()))
        .block(Block::default().borders(Borders::ALL).title(AGENT_LABEL));
    frame.render_widget(selector, agent_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(TRANSCRIPT_LABEL);
    let inner = block.inner(transcript_area);
    // Counted before the block is attached so borders are not included.
    let transcript = Paragraph::new(transcript_lines(state)).wrap(Wrap { trim: false });
    scroll.set_bounds(transcript.line_count(inner.width), inner.height.into());

    let offset = u16::try_from(scroll.position()).unwrap_or(u16::MAX);
    let transcript = transcript.block(block).scroll((offset, 0));
    frame.render_widget(transcript, transcript_area);

    frame.render_widget(textarea, input_area);
    frame.render_widget(Paragraph::new(status_line(state)), status_area);
}

pub fn destruct_terminal_for_panic() {
    let _ = disable_raw_mode();
    let _ = execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste,
        cursor::Show
    );
}

fn sync_input(state: &mut SessionState, textarea: &TextArea) {
    state.set_input(&textarea.lines().join("\n"));
}

pub async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    mut state: SessionState,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut events_service = EventsService::new(rx);
    let mut textarea = new_textarea();
    let mut scroll = Scroll::default();

    loop {
        terminal.draw(|frame| render(frame, &state, &textarea, &mut scroll))?;

        match events_service.next().await? {
            Event::AgentReply(outcome) => {
                state.complete_send(outcome);
                scroll.last();
            }
            Event::KeyboardCharInput(input) => {
                textarea.input(input);
                sync_input(&mut state, &textarea);
            }
            Event::KeyboardPaste(text) => {
                textarea.insert_str(text);
                sync_input(&mut state, &textarea);
            }
            Event::KeyboardEnter => {
                if let Some(request) = state.begin_send() {
                    textarea = new_textarea();
                    scroll.last();
                    tx.send(Action::AgentRequest(request))?;
                }
            }
            Event::KeyboardTab => state.set_agent(state.agent().next()),
            Event::KeyboardBackTab => state.set_agent(state.agent().previous()),
            Event::KeyboardCTRLC => {
                let _ = tx.send(Action::Quit);
                break;
            }
            Event::UIScrollUp => scroll.up(1),
            Event::UIScrollDown => scroll.down(1),
            Event::UIScrollPageUp => scroll.up(PAGE_SIZE),
            Event::UIScrollPageDown => scroll.down(PAGE_SIZE),
            Event::UITick => {}
        }
    }

    Ok(())
}

/// Sets up the terminal, runs the actions worker next to the UI loop and
/// restores the terminal on the way out.
pub async fn run(state: SessionState, agent_client: AgentClientBox) -> Result<()> {
    std::panic::set_hook(Box::new(|panic_info| {
        destruct_terminal_for_panic();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (event_tx, event_rx) = mpsc::unbounded_channel::<Event>();

    let mut background_futures = task::JoinSet::new();
    background_futures
        .spawn(async move { ActionsService::start(agent_client, event_tx, &mut action_rx).await });

    enable_raw_mode()?;
    execute!(
        io::stdout(),
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;

    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    let result = start_loop(&mut terminal, state, action_tx, event_rx).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste,
        cursor::Show
    )?;

    background_futures.abort_all();

    result
}
