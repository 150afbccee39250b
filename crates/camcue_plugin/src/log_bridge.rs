// SPDX-License-Identifier: MIT OR Apache-2.0
//! Forwards tracing output to the host's console sink.
//!
//! The engine logs through `tracing` like any other crate; the host
//! only offers a fire-and-forget `log(message)` call. This layer
//! captures formatted events on an `mpsc` channel, and the plugin
//! drains the channel into the host sink at the end of every entry
//! point.

use std::sync::mpsc;

/// A `tracing_subscriber::Layer` that forwards formatted events over an
/// `mpsc` channel for the plugin shell to drain.
pub struct HostLogBridge {
    sender: mpsc::Sender<String>,
}

impl HostLogBridge {
    /// Create a new bridge and return `(layer, receiver)`.
    pub fn new() -> (Self, mpsc::Receiver<String>) {
        let (sender, receiver) = mpsc::channel();
        (Self { sender }, receiver)
    }
}

impl<S> tracing_subscriber::Layer<S> for HostLogBridge
where
    S: tracing::Subscriber,
{
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        // Extract the message using a visitor
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let message = if visitor.message.is_empty() {
            "(empty)".to_string()
        } else {
            visitor.message
        };

        let level = event.metadata().level();
        let _ = self.sender.send(format!("[CamCue] [{level}] {message}"));
    }
}

/// Visitor that extracts the `message` field from a tracing event.
#[derive(Default)]
struct MessageVisitor {
    message: String,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else if self.message.is_empty() {
            self.message = format!("{} = {:?}", field.name(), value);
        } else {
            self.message
                .push_str(&format!(", {} = {:?}", field.name(), value));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else if self.message.is_empty() {
            self.message = format!("{} = {}", field.name(), value);
        } else {
            self.message
                .push_str(&format!(", {} = {}", field.name(), value));
        }
    }
}
