use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Which input a finished suggestion request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionSlot {
    /// The page's goal/task text input.
    Input,
    /// The auxiliary resources panel (financeira, social).
    Resources,
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    Key(KeyEvent),
    Tick,
    Resize(u16, u16),
    /// Completed AI request, re-entering the single event loop. The
    /// error side is already a user-displayable message.
    Suggestion {
        page: String,
        slot: SuggestionSlot,
        result: Result<String, String>,
    },
}

/// Input pump: a dedicated thread polls the terminal and forwards
/// key/resize events plus a steady tick; async completions land on
/// the same channel so the main loop stays single-threaded.
pub struct EventPump {
    sender: mpsc::Sender<UiEvent>,
    receiver: mpsc::Receiver<UiEvent>,
}

impl EventPump {
    pub fn new(tick_rate: Duration) -> Self {
        let (sender, receiver) = mpsc::channel();
        let event_sender = sender.clone();

        thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                let timeout = tick_rate
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or(Duration::ZERO);

                if matches!(crossterm::event::poll(timeout), Ok(true)) {
                    match crossterm::event::read() {
                        Ok(Event::Key(key)) => {
                            // Windows terminals emit press and release.
                            if key.kind == KeyEventKind::Press
                                && event_sender.send(UiEvent::Key(key)).is_err()
                            {
                                break;
                            }
                        }
                        Ok(Event::Resize(w, h)) => {
                            if event_sender.send(UiEvent::Resize(w, h)).is_err() {
                                break;
                            }
                        }
                        Ok(_) => {}
                        Err(_) => break,
                    }
                }

                if last_tick.elapsed() >= tick_rate {
                    if event_sender.send(UiEvent::Tick).is_err() {
                        break;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        EventPump { sender, receiver }
    }

    pub fn next(&self) -> Result<UiEvent, mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Cloneable handle for async tasks to report back with.
    pub fn sender(&self) -> mpsc::Sender<UiEvent> {
        self.sender.clone()
    }
}

/// Quit chord, honored regardless of page focus.
pub fn is_quit(key: &KeyEvent) -> bool {
    matches!(
        (key.code, key.modifiers),
        (KeyCode::Char('c'), KeyModifiers::CONTROL)
    )
}
