//! Input plumbing between crossterm and the form.
//!
//! A background task polls the terminal and forwards only the events the
//! form cares about; when the terminal is quiet it emits a tick instead so
//! time-based state (the copy acknowledgement) still ages out.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use tokio::sync::mpsc;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    Tick,
}

/// Spawns a background task that polls the terminal for events and sends
/// them through the returned channel.  Key releases/repeats and mouse
/// motion are dropped here so the handler only ever sees driving input.
pub fn spawn_event_reader(tick_rate: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        loop {
            let pending = event::poll(tick_rate).unwrap_or(false);
            let app_event = if pending {
                match event::read() {
                    Ok(CtEvent::Key(k)) if k.kind == KeyEventKind::Press => AppEvent::Key(k),
                    Ok(CtEvent::Mouse(m)) => match m.kind {
                        MouseEventKind::Moved
                        | MouseEventKind::Drag(_)
                        | MouseEventKind::Up(_) => continue,
                        _ => AppEvent::Mouse(m),
                    },
                    Ok(CtEvent::Resize(w, h)) => AppEvent::Resize(w, h),
                    _ => continue,
                }
            } else {
                // No event within tick_rate — send a tick.
                AppEvent::Tick
            };
            if tx.send(app_event).is_err() {
                break; // receiver dropped
            }
        }
    });

    rx
}
