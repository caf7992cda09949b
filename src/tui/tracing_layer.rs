// src/tui/tracing_layer.rs
// A tracing layer that forwards formatted events to the TUI's Logs view over
// an mpsc channel.

use chrono::Local;
use tokio::sync::mpsc;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;

use crate::tui::UILogEntry;

struct LogEntryVisitor {
    message: Option<String>,
}

impl tracing::field::Visit for LogEntryVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{:?}", value));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        }
    }
}

pub struct LogCollectorLayer {
    sender: mpsc::UnboundedSender<UILogEntry>,
}

impl LogCollectorLayer {
    pub fn new(sender: mpsc::UnboundedSender<UILogEntry>) -> Self {
        Self { sender }
    }
}

impl<S: Subscriber> Layer<S> for LogCollectorLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let meta = event.metadata();
        let level: Level = *meta.level();

        let mut visitor = LogEntryVisitor { message: None };
        event.record(&mut visitor);

        if let Some(message) = visitor.message {
            let entry = UILogEntry {
                timestamp: Local::now().format("%H:%M:%S").to_string(),
                level,
                target: meta.target().to_string(),
                message,
            };
            // If the TUI side is gone the entry is simply dropped.
            let _ = self.sender.send(entry);
        }
    }
}
