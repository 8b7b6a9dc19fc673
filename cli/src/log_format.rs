//! Plain-text event formatter that tags each line with the `trace_id` / `span_id` of
//! the enclosing span, so the log lines of one generate action can be grouped.

use std::fmt;

use tracing_core::Subscriber;
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::time::{FormatTime, SystemTime};
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::registry::{LookupSpan, SpanRef};

/// Line format: `[TIMESTAMP] [trace_id=X span_id=Y] LEVEL target: fields`.
///
/// The id pair is written only inside a span; `trace_id` is the outermost span's id.
pub struct TextWithSpanIds {
    timer: SystemTime,
    with_timestamp: bool,
}

impl Default for TextWithSpanIds {
    fn default() -> Self {
        Self {
            timer: SystemTime,
            with_timestamp: true,
        }
    }
}

impl TextWithSpanIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stderr output under `-v` leaves the timestamp out.
    pub fn with_timestamp(mut self, on: bool) -> Self {
        self.with_timestamp = on;
        self
    }
}

impl<S, N> FormatEvent<S, N> for TextWithSpanIds
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &tracing_core::Event<'_>,
    ) -> fmt::Result {
        let mut sep = "";
        if self.with_timestamp {
            self.timer.format_time(&mut writer)?;
            sep = " ";
        }
        if let Some(span) = ctx.parent_span() {
            let span_id = span.id().into_u64();
            let trace_id = span
                .scope()
                .from_root()
                .next()
                .map(|root: SpanRef<'_, S>| root.id().into_u64())
                .unwrap_or(span_id);
            write!(writer, "{}trace_id={} span_id={}", sep, trace_id, span_id)?;
            sep = " ";
        }
        let meta = event.metadata();
        write!(writer, "{}{} {}: ", sep, meta.level(), meta.target())?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::layer::SubscriberExt;

    #[derive(Clone)]
    struct VecWriter(Arc<Mutex<Vec<u8>>>);

    impl Write for VecWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn capture(formatter: TextWithSpanIds, f: impl FnOnce()) -> String {
        let sink = Arc::new(Mutex::new(Vec::<u8>::new()));
        let writer = {
            let sink = Arc::clone(&sink);
            move || VecWriter(Arc::clone(&sink))
        };
        let subscriber = tracing_subscriber::registry().with(
            tracing_subscriber::fmt::layer()
                .event_format(formatter)
                .with_writer(writer)
                .with_ansi(false),
        );
        tracing::subscriber::with_default(subscriber, f);
        let out = sink.lock().unwrap().clone();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn nested_spans_share_trace_id() {
        let output = capture(TextWithSpanIds::new(), || {
            let outer = tracing::info_span!("generate");
            let _o = outer.enter();
            let inner = tracing::info_span!("invoke");
            let _i = inner.enter();
            tracing::info!(total_tokens = 42, "model output parsed");
        });
        assert!(output.contains("trace_id="));
        assert!(output.contains("span_id="));
        assert!(output.contains("INFO"));
        assert!(output.contains("model output parsed"));
        assert!(output.contains("total_tokens=42"));
        let ids: Vec<&str> = output
            .split_whitespace()
            .filter(|w| w.starts_with("trace_id=") || w.starts_with("span_id="))
            .collect();
        assert_eq!(ids.len(), 2);
        assert_ne!(&ids[0]["trace_id=".len()..], &ids[1]["span_id=".len()..]);
    }

    #[test]
    fn no_span_and_no_timestamp_starts_with_level() {
        let output = capture(TextWithSpanIds::new().with_timestamp(false), || {
            tracing::warn!("fallback");
        });
        assert!(output.starts_with("WARN "));
        assert!(!output.contains("trace_id="));
    }
}
