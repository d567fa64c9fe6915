//! Forwards `tracing` events from the runtime crates to the browser console.

use std::fmt::{self, Write as _};

use leptos::logging;
use tracing::{
    field::{Field, Visit},
    level_filters::LevelFilter,
    Event, Level, Subscriber,
};
use tracing_subscriber::{
    layer::{Context, SubscriberExt},
    Layer,
};

/// Layer that writes each event as one console line through `leptos::logging`.
pub struct ConsoleLayer;

impl<S: Subscriber> Layer<S> for ConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut line = ConsoleLine::default();
        event.record(&mut line);
        let metadata = event.metadata();
        let text = line.finish(*metadata.level(), metadata.target());
        match *metadata.level() {
            Level::ERROR => logging::error!("{text}"),
            Level::WARN => logging::warn!("{text}"),
            _ => logging::log!("{text}"),
        }
    }
}

/// Installs [`ConsoleLayer`] as the global subscriber. Later calls are ignored.
pub fn install_console_tracing(max_level: LevelFilter) {
    let subscriber = tracing_subscriber::registry()
        .with(max_level)
        .with(ConsoleLayer);
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        logging::warn!("a tracing subscriber is already installed");
    }
}

#[derive(Default)]
struct ConsoleLine {
    message: String,
    fields: String,
}

impl ConsoleLine {
    fn finish(self, level: Level, target: &str) -> String {
        let mut text = format!("{level} {target}: {}", self.message);
        if !self.fields.is_empty() {
            text.push_str(" {");
            text.push_str(&self.fields);
            text.push_str(" }");
        }
        text
    }
}

impl Visit for ConsoleLine {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={value}", field.name());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{value:?}");
        } else {
            let _ = write!(self.fields, " {}={value:?}", field.name());
        }
    }
}
