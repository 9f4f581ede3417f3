/*!
 * Diagnostic reporting for the lint engine.
 *
 * Every issue the engine finds is turned into a formatted, positional
 * message and handed to a `DiagnosticSink` immediately. The engine itself
 * never prints or fails; the sink is the single effect seam, which keeps
 * the passes pure and lets tests capture everything with `CollectingSink`.
 */

use log::error;

/// Severity tag attached to every message sent to the sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Style or syntax finding from the normal lint flow
    Syntax,
    /// Input problem outside the rule flow (e.g. a bad leading byte)
    Error,
}

/// A single positional finding
///
/// Produced, formatted and emitted in one step; never mutated afterwards.
/// `page` is only set for scenario files, and selects the scenario message
/// format over the catalog one.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// File the issue was found in
    pub file: String,
    /// Line number as printed (zero-based for scenario, one-based for catalog)
    pub line: usize,
    /// Current page number (scenario files only)
    pub page: Option<usize>,
    /// Human-readable description of the issue
    pub message: String,
    /// Source line excerpt, at most 70 characters
    pub excerpt: String,
    /// Column of the issue within the excerpt, when known
    pub column: Option<usize>,
}

impl Diagnostic {
    /// Render the message string handed to the sink
    pub fn format(&self) -> String {
        let mut message = match self.page {
            Some(page) => format!(
                "{:>20} : #{:4} @ page {:3} : {}\n{}\n",
                self.file, self.line, page, self.message, self.excerpt
            ),
            None => format!("{}:{}: {}\n{}\n", self.file, self.line, self.message, self.excerpt),
        };
        if let Some(column) = self.column {
            message.push_str(&" ".repeat(column));
            message.push('*');
        }
        message
    }
}

/// Receiver for formatted diagnostic messages
///
/// The engine emits synchronously at the point of detection, so the order
/// seen by the sink is exactly discovery order: line-major, left-to-right
/// within a line, rule-declaration order for catalog matches.
pub trait DiagnosticSink {
    fn emit(&mut self, severity: Severity, message: &str);
}

/// Sink that prints findings to stdout and routes errors through the logger
#[derive(Debug, Default)]
pub struct ConsoleSink {
    /// Number of messages emitted so far
    pub emitted: usize,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DiagnosticSink for ConsoleSink {
    fn emit(&mut self, severity: Severity, message: &str) {
        self.emitted += 1;
        match severity {
            Severity::Syntax => println!("{}", message),
            Severity::Error => error!("{}", message),
        }
    }
}

/// Sink that stores everything it receives, for tests
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub messages: Vec<(Severity, String)>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages with the given substring, ignoring the severity tag
    pub fn containing(&self, needle: &str) -> usize {
        self.messages.iter().filter(|(_, m)| m.contains(needle)).count()
    }
}

impl DiagnosticSink for CollectingSink {
    fn emit(&mut self, severity: Severity, message: &str) {
        self.messages.push((severity, message.to_string()));
    }
}

/// Column of a byte offset within `s`, counted in characters
pub(crate) fn char_col(s: &str, byte_offset: usize) -> usize {
    s[..byte_offset].chars().count()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReportStyle {
    Scenario,
    Catalog,
}

/// Per-file reporting context threaded through a lint pass
///
/// Holds the pieces of mutable state a diagnostic needs (current line text,
/// line and page counters) so the fixers only have to pass a message and a
/// column. Columns are character offsets into the current context line.
pub(crate) struct Reporter<'a> {
    sink: &'a mut dyn DiagnosticSink,
    file: &'a str,
    style: ReportStyle,
    pub line_number: usize,
    pub page_number: usize,
    context: String,
}

impl<'a> Reporter<'a> {
    pub fn scenario(sink: &'a mut dyn DiagnosticSink, file: &'a str) -> Self {
        Self {
            sink,
            file,
            style: ReportStyle::Scenario,
            line_number: 0,
            page_number: 0,
            context: String::new(),
        }
    }

    pub fn catalog(sink: &'a mut dyn DiagnosticSink, file: &'a str) -> Self {
        Self {
            sink,
            file,
            style: ReportStyle::Catalog,
            line_number: 0,
            page_number: 0,
            context: String::new(),
        }
    }

    /// Advance to the next input line and make it the excerpt context
    pub fn next_line(&mut self, line: &str) {
        self.line_number += 1;
        self.context = line.to_string();
    }

    /// Replace the excerpt context mid-pipeline (after a fixer rewrote the line)
    pub fn set_context(&mut self, line: &str) {
        self.context = line.to_string();
    }

    /// Report a finding at an optional character column of the context line
    pub fn report(&mut self, message: &str, column: Option<usize>) {
        let (excerpt, column) = self.window(column);
        let diagnostic = Diagnostic {
            file: self.file.to_string(),
            line: match self.style {
                // scenario reports are zero-based
                ReportStyle::Scenario => self.line_number.saturating_sub(1),
                ReportStyle::Catalog => self.line_number,
            },
            page: match self.style {
                ReportStyle::Scenario => Some(self.page_number),
                ReportStyle::Catalog => None,
            },
            message: message.to_string(),
            excerpt,
            column,
        };
        self.sink.emit(Severity::Syntax, &diagnostic.format());
    }

    /// Report an out-of-band input problem, bypassing the positional format
    pub fn input_error(&mut self, message: &str) {
        self.sink.emit(Severity::Error, message);
    }

    /// 70-character excerpt window centered on the column when the line is longer
    fn window(&self, column: Option<usize>) -> (String, Option<usize>) {
        let chars: Vec<char> = self.context.chars().collect();
        if chars.len() <= 70 {
            return (self.context.clone(), column);
        }
        let col = column.unwrap_or(0);
        let start = col.saturating_sub(35);
        let end = (start + 70).min(chars.len());
        let start = end - 70;
        let excerpt: String = chars[start..end].iter().collect();
        (excerpt, column.map(|c| c.saturating_sub(start)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_withPage_shouldUseScenarioLayout() {
        let diagnostic = Diagnostic {
            file: "prologue.ks".to_string(),
            line: 12,
            page: Some(3),
            message: "bad quotes".to_string(),
            excerpt: "  \"Hello\"".to_string(),
            column: Some(2),
        };

        let message = diagnostic.format();

        assert!(message.starts_with("         prologue.ks : #  12 @ page   3 : bad quotes\n"));
        assert!(message.ends_with("  *"));
    }

    #[test]
    fn test_format_withoutPage_shouldUseCatalogLayout() {
        let diagnostic = Diagnostic {
            file: "fr.po".to_string(),
            line: 4,
            page: None,
            message: "entry not finished".to_string(),
            excerpt: "msgid \"x\"".to_string(),
            column: None,
        };

        assert_eq!(diagnostic.format(), "fr.po:4: entry not finished\nmsgid \"x\"\n");
    }

    #[test]
    fn test_report_withLongLine_shouldWindowExcerptAroundColumn() {
        let mut sink = CollectingSink::new();
        let mut reporter = Reporter::catalog(&mut sink, "long.po");
        let line = "x".repeat(100);
        reporter.next_line(&line);

        reporter.report("doubled whitespace", Some(90));

        let (_, message) = &sink.messages[0];
        let excerpt = message.lines().nth(1).unwrap();
        assert_eq!(excerpt.chars().count(), 70);
        // caret column is shifted by the window start (100 - 70 = 30)
        let caret = message.lines().nth(2).unwrap();
        assert_eq!(caret.len(), 90 - 30 + 1);
    }

    #[test]
    fn test_report_withShortLine_shouldKeepWholeLine() {
        let mut sink = CollectingSink::new();
        let mut reporter = Reporter::catalog(&mut sink, "short.po");
        reporter.next_line("short line");

        reporter.report("issue", Some(3));

        let (_, message) = &sink.messages[0];
        assert!(message.contains("\nshort line\n"));
        assert!(message.ends_with("   *"));
    }
}
