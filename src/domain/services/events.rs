#[cfg(test)]
#[path = "events_test.rs"]
mod tests;

use anyhow::Result;
use crossterm::event::Event as CrosstermEvent;
use crossterm::event::EventStream;
use crossterm::event::KeyEventKind;
use crossterm::event::MouseEventKind;
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time;
use tui_textarea::Input;
use tui_textarea::Key;

use crate::domain::models::Event;

/// Maps a key press to a console event. Keys without a dedicated event are
/// passed through for the input box or the settings panel to handle.
pub fn map_input(input: Input) -> Event {
    match input {
        Input { key: Key::Down, .. } | Input {
            key: Key::MouseScrollDown,
            ..
        } => {
            return Event::UIScrollDown();
        }
        Input { key: Key::Up, .. } | Input {
            key: Key::MouseScrollUp,
            ..
        } => {
            return Event::UIScrollUp();
        }
        Input {
            key: Key::PageDown, ..
        }
        | Input {
            key: Key::Char('d'),
            ctrl: true,
            ..
        } => {
            return Event::UIScrollPageDown();
        }
        Input {
            key: Key::PageUp, ..
        }
        | Input {
            key: Key::Char('u'),
            ctrl: true,
            ..
        } => {
            return Event::UIScrollPageUp();
        }
        Input {
            key: Key::Char('c'),
            ctrl: true,
            ..
        } => {
            return Event::KeyboardCTRLC();
        }
        Input {
            key: Key::Enter, ..
        } => {
            return Event::KeyboardEnter();
        }
        input => {
            return Event::KeyboardCharInput(input);
        }
    }
}

pub struct EventsService {
    crossterm_events: EventStream,
    events: mpsc::UnboundedReceiver<Event>,
}

impl EventsService {
    pub fn new(events: mpsc::UnboundedReceiver<Event>) -> EventsService {
        return EventsService {
            crossterm_events: EventStream::new(),
            events,
        };
    }

    fn handle_crossterm(&self, event: CrosstermEvent) -> Option<Event> {
        match event {
            CrosstermEvent::Paste(text) => {
                return Some(Event::KeyboardPaste(text));
            }
            CrosstermEvent::Mouse(mouseevent) => match mouseevent.kind {
                MouseEventKind::ScrollUp => return Some(Event::UIScrollUp()),
                MouseEventKind::ScrollDown => return Some(Event::UIScrollDown()),
                _ => return None,
            },
            // Windows reports releases too, only presses count.
            CrosstermEvent::Key(keyevent) if keyevent.kind != KeyEventKind::Release => {
                return Some(map_input(keyevent.into()));
            }
            _ => return None,
        }
    }

    /// Waits for the next backend result, terminal event, or tick. A tick is
    /// emitted after 500ms of silence so the UI redraws periodically.
    pub async fn next(&mut self) -> Result<Event> {
        loop {
            let evt = tokio::select! {
                event = self.events.recv() => event,
                event = self.crossterm_events.next() => match event {
                    Some(Ok(input)) => self.handle_crossterm(input),
                    Some(Err(err)) => {
                        tracing::error!(error = %err, "Failed to read terminal event");
                        None
                    },
                    None => None
                },
                _ = time::sleep(time::Duration::from_millis(500)) => Some(Event::UITick())
            };

            if let Some(event) = evt {
                return Ok(event);
            }
        }
    }
}
