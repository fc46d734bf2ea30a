//! tracing subscriber setup.
//!
//! - application logs: `fmt` layer (text or JSON), filtered by `RUST_LOG`, else `LOG_LEVEL`
//! - `audit` target: each event's message is already a JSON object; written
//!   bare (no timestamp/level/span prefix) so every line parses as JSON.
//!   Always enabled at `info`, whatever the filter says.
use std::fmt;

use tracing::{Event, Subscriber};
use tracing_subscriber::{
    EnvFilter, Layer,
    filter::filter_fn,
    fmt::{FmtContext, FormatEvent, FormatFields, MakeWriter, format::Writer},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

use crate::config::{Config, LogFormat};
use crate::services::events::AUDIT_TARGET;

pub fn init(config: &Config) {
    // Ex:
    // RUST_LOG=info,policy_gate=debug,tower_http=debug cargo run
    let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("{},tower_http=info", config.log_level))
    });
    if let Ok(directive) = format!("{AUDIT_TARGET}=info").parse() {
        filter = filter.add_directive(directive);
    }

    let audit = audit_layer(std::io::stdout);

    let json = config.log_format == LogFormat::Json;
    let app_json = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_filter(filter_fn(|meta| meta.target() != AUDIT_TARGET))
    });
    let app_text = (!json).then(|| {
        tracing_subscriber::fmt::layer()
            .with_filter(filter_fn(|meta| meta.target() != AUDIT_TARGET))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(audit)
        .with(app_json)
        .with(app_text)
        .init();
}

/// Audit events only, one bare JSON object per line, to `writer`.
fn audit_layer<S, W>(writer: W) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt::layer()
        .event_format(MessageOnly)
        .with_writer(writer)
        .with_filter(filter_fn(|meta| meta.target() == AUDIT_TARGET))
}

/// Writes only the event's fields (for audit events: the JSON message) and a newline.
struct MessageOnly;

impl<S, N> FormatEvent<S, N> for MessageOnly
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        ctx.format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}
