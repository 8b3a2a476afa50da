use anyhow::Result;
use crossterm::event::Event as CrosstermEvent;
use crossterm::event::EventStream;
use crossterm::event::KeyCode;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::event::MouseEventKind;
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time;
use tui_textarea::Input;
use tui_textarea::Key;

use crate::domain::models::Event;

pub struct EventsService {
    crossterm_events: EventStream,
    events: mpsc::UnboundedReceiver<Event>,
}

pub(crate) fn handle_crossterm(event: CrosstermEvent) -> Option<Event> {
    match event {
        CrosstermEvent::Paste(text) => Some(Event::KeyboardPaste(text)),
        CrosstermEvent::Mouse(mouseevent) => match mouseevent.kind {
            MouseEventKind::ScrollUp => Some(Event::UIScrollUp),
            MouseEventKind::ScrollDown => Some(Event::UIScrollDown),
            _ => None,
        },
        CrosstermEvent::Key(keyevent) => {
            if keyevent.kind == KeyEventKind::Release {
                return None;
            }

            let key = match keyevent.code {
                KeyCode::BackTab => return Some(Event::KeyboardBackTab),
                KeyCode::Char(c) => Key::Char(c),
                KeyCode::Enter => Key::Enter,
                KeyCode::Left => Key::Left,
                KeyCode::Right => Key::Right,
                KeyCode::Up => Key::Up,
                KeyCode::Down => Key::Down,
                KeyCode::Home => Key::Home,
                KeyCode::End => Key::End,
                KeyCode::PageUp => Key::PageUp,
                KeyCode::PageDown => Key::PageDown,
                KeyCode::Tab => Key::Tab,
                KeyCode::Delete => Key::Delete,
                KeyCode::Backspace => Key::Backspace,
                KeyCode::Esc => Key::Esc,
                _ => return None,
            };

            let input = Input {
                key,
                ctrl: keyevent.modifiers.contains(KeyModifiers::CONTROL),
                alt: keyevent.modifiers.contains(KeyModifiers::ALT),
                shift: keyevent.modifiers.contains(KeyModifiers::SHIFT),
            };

            match input {
                Input { key: Key::Up, .. } => Some(Event::UIScrollUp),
                Input { key: Key::Down, .. } => Some(Event::UIScrollDown),
                Input {
                    key: Key::PageUp, ..
                } => Some(Event::UIScrollPageUp),
                Input {
                    key: Key::PageDown, ..
                } => Some(Event::UIScrollPageDown),
                Input {
                    key: Key::Char('u'),
                    ctrl: true,
                    ..
                } => Some(Event::UIScrollPageUp),
                Input {
                    key: Key::Char('d'),
                    ctrl: true,
                    ..
                } => Some(Event::UIScrollPageDown),
                Input {
                    key: Key::Char('c'),
                    ctrl: true,
                    ..
                } => Some(Event::KeyboardCTRLC),
                Input { key: Key::Tab, .. } => Some(Event::KeyboardTab),
                Input {
                    key: Key::Enter, ..
                } => Some(Event::KeyboardEnter),
                input => Some(Event::KeyboardCharInput(input)),
            }
        }
        _ => None,
    }
}

impl EventsService {
    pub fn new(events: mpsc::UnboundedReceiver<Event>) -> EventsService {
        EventsService {
            crossterm_events: EventStream::new(),
            events,
        }
    }

    pub async fn next(&mut self) -> Result<Event> {
        loop {
            let evt = tokio::select! {
                event = self.events.recv() => event,
                event = self.crossterm_events.next() => match event {
                    Some(Ok(input)) => handle_crossterm(input),
                    Some(Err(_)) => None,
                    None => None
                },
                _ = time::sleep(time::Duration::from_millis(500)) => Some(Event::UITick)
            };

            if let Some(event) = evt {
                return Ok(event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> CrosstermEvent {
        CrosstermEvent::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn it_maps_send_and_agent_keys() {
        assert!(matches!(
            handle_crossterm(key(KeyCode::Enter, KeyModifiers::NONE)),
            Some(Event::KeyboardEnter)
        ));
        assert!(matches!(
            handle_crossterm(key(KeyCode::Tab, KeyModifiers::NONE)),
            Some(Event::KeyboardTab)
        ));
        assert!(matches!(
            handle_crossterm(key(KeyCode::BackTab, KeyModifiers::SHIFT)),
            Some(Event::KeyboardBackTab)
        ));
        assert!(matches!(
            handle_crossterm(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Event::KeyboardCTRLC)
        ));
    }

    #[test]
    fn it_forwards_text_input() {
        match handle_crossterm(key(KeyCode::Char('x'), KeyModifiers::NONE)) {
            Some(Event::KeyboardCharInput(input)) => assert_eq!(input.key, Key::Char('x')),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn it_forwards_paste() {
        assert!(matches!(
            handle_crossterm(CrosstermEvent::Paste("1d20".to_string())),
            Some(Event::KeyboardPaste(text)) if text == "1d20"
        ));
    }
}
