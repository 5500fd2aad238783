use crossterm::event::{Event, EventStream, KeyEvent};
use futures::StreamExt;
use tokio::sync::mpsc;
use tracing::warn;

#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize(u16, u16),
}

impl AppEvent {
    fn from_terminal(event: Event) -> Option<Self> {
        match event {
            Event::Key(key) => Some(AppEvent::Key(key)),
            Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
            _ => None,
        }
    }
}

/// Forward terminal input to `event_tx` until the receiver goes away.
pub fn start_event_loop(event_tx: mpsc::UnboundedSender<AppEvent>) {
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        while let Some(next) = reader.next().await {
            let event = match next {
                Ok(event) => event,
                Err(e) => {
                    warn!(error = %e, "terminal event stream failed");
                    break;
                }
            };
            let Some(app_event) = AppEvent::from_terminal(event) else {
                continue;
            };
            if event_tx.send(app_event).is_err() {
                break;
            }
        }
    });
}
