use clap::ValueEnum;
use owo_colors::OwoColorize;
use serde::Serialize;
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "json-pretty")]
    JsonPretty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Success,
    Error,
    Info,
    Warning,
}

impl Level {
    fn label(self) -> &'static str {
        match self {
            Level::Success => "success",
            Level::Error => "error",
            Level::Info => "info",
            Level::Warning => "warning",
        }
    }
}

fn report_line(ok: bool, what: &str) -> (Level, String) {
    if ok {
        (Level::Success, format!("Cleared {}", what))
    } else {
        (Level::Error, format!("Failed to clear {}", what))
    }
}

/// Everything user-facing goes through here so `--output json` and `--quiet`
/// apply uniformly. Errors are shown even in quiet mode.
pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Whether human-readable blocks such as tables should be printed
    pub fn shows_human(&self) -> bool {
        self.is_human() && !self.quiet
    }

    fn message(&self, level: Level, msg: &str) {
        if self.quiet && !matches!(level, Level::Error) {
            return;
        }

        match self.format {
            OutputFormat::Human => match level {
                Level::Success => println!("{} {}", "✓".green(), msg),
                Level::Error => eprintln!("{} {}", "✗".red(), msg),
                Level::Info => println!("{}", msg),
                Level::Warning => println!("{} {}", "⚠".yellow(), msg),
            },
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({ "type": level.label(), "message": msg }));
            }
        }
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        self.message(Level::Success, msg.as_ref());
    }

    pub fn error(&self, msg: impl AsRef<str>) {
        self.message(Level::Error, msg.as_ref());
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        self.message(Level::Info, msg.as_ref());
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        self.message(Level::Warning, msg.as_ref());
    }

    /// Success or failure line for a store operation that reports a bool
    pub fn report(&self, ok: bool, what: &str) {
        let (level, msg) = report_line(ok, what);
        self.message(level, &msg);
    }

    /// A notice for humans, or only `value` for JSON consumers, never both
    pub fn info_or_data<T: Serialize + ?Sized>(&self, msg: &str, value: &T) {
        if let Some(line) = self.info_or_data_line(msg, value) {
            println!("{}", line);
        }
    }

    fn info_or_data_line<T: Serialize + ?Sized>(&self, msg: &str, value: &T) -> Option<String> {
        if self.quiet {
            return None;
        }
        if self.is_human() {
            return Some(msg.to_string());
        }
        match serde_json::to_value(value) {
            Ok(json) => Some(self.encode_json(&json)),
            Err(e) => {
                self.error(format!("Failed to serialize output: {}", e));
                None
            }
        }
    }

    /// Plain line in human mode; nothing in JSON mode, where `data` carries the payload
    pub fn println(&self, msg: impl AsRef<str>) {
        if self.shows_human() {
            println!("{}", msg.as_ref());
        }
    }

    /// Emit a structured payload. Ignored in human mode.
    pub fn data<T: Serialize + ?Sized>(&self, value: &T) {
        if self.is_human() || self.quiet {
            return;
        }
        match serde_json::to_value(value) {
            Ok(json) => self.print_json(&json),
            Err(e) => self.error(format!("Failed to serialize output: {}", e)),
        }
    }

    fn encode_json(&self, data: &serde_json::Value) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string(data).unwrap_or_default(),
            OutputFormat::JsonPretty => serde_json::to_string_pretty(data).unwrap_or_default(),
            OutputFormat::Human => data.to_string(),
        }
    }

    fn print_json(&self, data: &serde_json::Value) {
        println!("{}", self.encode_json(data));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_line_reflects_store_result() {
        assert_eq!(report_line(true, "chat history"), (Level::Success, "Cleared chat history".to_string()));
        assert_eq!(
            report_line(false, "chat history"),
            (Level::Error, "Failed to clear chat history".to_string())
        );
    }

    #[test]
    fn test_info_or_data_emits_single_document() {
        let empty: Vec<u32> = Vec::new();
        let json = Output::new(OutputFormat::Json, false);
        assert_eq!(json.info_or_data_line("Nothing yet", &empty).as_deref(), Some("[]"));

        let human = Output::new(OutputFormat::Human, false);
        assert_eq!(human.info_or_data_line("Nothing yet", &empty).as_deref(), Some("Nothing yet"));

        let quiet = Output::new(OutputFormat::Json, true);
        assert_eq!(quiet.info_or_data_line("Nothing yet", &empty), None);
    }
}
