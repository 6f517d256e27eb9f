use colored::Color;
use std::fmt;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Write;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, FormattedFields};
use tracing_subscriber::registry::LookupSpan;

/// `[time LVL] target@trace_id{span fields}: message key=value`
pub(super) struct Formatter {
    use_colors: bool,
}

impl Formatter {
    pub(super) fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }
}

impl<S, N> FormatEvent<S, N> for Formatter
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
        let meta = event.metadata();
        let now = chrono::Local::now();
        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let mut trace_id = String::new();
        let mut span_fields = Vec::new();
        for span in ctx
            .event_scope()
            .into_iter()
            .flat_map(tracing_subscriber::registry::Scope::from_root)
        {
            let exts = span.extensions();
            let Some(fields) = exts.get::<FormattedFields<N>>() else {
                continue;
            };
            if fields.is_empty() {
                continue;
            }
            match fields.strip_prefix("trace_id=") {
                Some(id) => {
                    trace_id.push('@');
                    trace_id.push_str(id);
                }
                None => span_fields.push(fields.to_string()),
            }
        }
        let mut location = meta.target().replace("device_registry", "devreg");
        location.push_str(&trace_id);
        if !span_fields.is_empty() {
            write!(location, "{{{}}}", span_fields.join(" "))?;
        }

        let level = LevelLabel::new(meta.level(), self.use_colors);
        if self.use_colors {
            write!(
                writer,
                "[{} {}] {}",
                Paint::new(now.format("%X%.3f"), Color::BrightBlack),
                level,
                Paint::new(format!("{location}:"), Color::BrightBlack),
            )?;
        } else {
            write!(writer, "{} {} {}:", now.format("%F %X%.3f"), level, location)?;
        }
        writeln!(writer, " {}", visitor)
    }
}

#[derive(Default)]
struct EventVisitor {
    message: String,
    fields: String,
}

impl Visit for EventVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            write!(self.fields, " {}={}", field.name(), value).ok();
        }
    }
    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        if field.name() == "message" {
            write!(self.message, "{:?}", value).ok();
        } else {
            write!(self.fields, " {}={:?}", field.name(), value).ok();
        }
    }
}

impl Display for EventVisitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        f.write_str(&self.fields)
    }
}

struct LevelLabel {
    label: &'static str,
    color: Option<Color>,
}

impl LevelLabel {
    fn new(level: &Level, use_colors: bool) -> Self {
        let (label, color) = match *level {
            Level::ERROR => ("ERR", Color::BrightRed),
            Level::WARN => ("WRN", Color::BrightYellow),
            Level::INFO => ("INF", Color::BrightBlue),
            Level::DEBUG => ("DBG", Color::BrightMagenta),
            Level::TRACE => ("TRC", Color::BrightWhite),
        };
        Self {
            label,
            color: use_colors.then_some(color),
        }
    }
}

impl Display for LevelLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.color {
            Some(color) => Paint::new(self.label, color).fmt(f),
            None => f.write_str(self.label),
        }
    }
}

struct Paint<T> {
    content: T,
    color: Color,
}

impl<T> Paint<T> {
    fn new(content: T, color: Color) -> Self {
        Self { content, color }
    }
}

impl<T: Display> Display for Paint<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\x1B[{}m{}\x1B[0m", self.color.to_fg_str(), self.content)
    }
}
