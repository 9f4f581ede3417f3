/*!
 * Translation catalog pass.
 *
 * Streams a gettext-style catalog through a small entry state machine:
 * `#:` location comments open an entry, `msgctxt`/`msgid`/`msgstr` lines
 * advance it, bare strings continue the current field. Only translation
 * text is rewritten; the typographic fixers run on each `msgstr` payload
 * as it is read, and the style catalog runs over the assembled
 * translation when the next entry opens.
 */

use log::debug;

use crate::diagnostics::{char_col, DiagnosticSink, Reporter};
use crate::normalize::{fix_apostrophes, fix_nbsp, fix_suspension_points};
use crate::rules::report_style_issues;

/// Which field of the current entry the parser is filling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    None,
    Location,
    Context,
    Id,
    Translation,
}

/// The entry being assembled, accumulated across continuation lines
#[derive(Debug, Default)]
struct TranslationEntry {
    location: String,
    context: String,
    id: String,
    translation: String,
    /// Line the `msgstr` keyword was read on, for the deferred style scan
    translation_line: usize,
}

/// Byte offsets of the first and last double quote, when they differ
fn quote_span(line: &str) -> Option<(usize, usize)> {
    let first = line.find('"')?;
    let last = line.rfind('"')?;
    (last > first).then_some((first, last))
}

/// Rebuild the line with `content` in place of the original quoted payload,
/// newlines re-escaped to the catalog form
fn splice(line: &str, (first, last): (usize, usize), content: &str) -> String {
    format!("{}\"{}\"{}", &line[..first], content.replace('\n', "\\n"), &line[last + 1..])
}

/// Run the typographic fixers over one translation payload
fn normalize_translation(text: &str, reporter: &mut Reporter) -> String {
    reporter.set_context(text);
    let text = fix_nbsp(text);
    let text = fix_apostrophes(&text, reporter);
    fix_suspension_points(&text, reporter)
}

/// Style-scan the stored translation once the entry is complete.
///
/// Every part reports at the line the `msgstr` keyword was on; the caller's
/// line counter is restored afterwards.
fn rescan_translation(entry: &TranslationEntry, reporter: &mut Reporter) {
    let saved = reporter.line_number;
    reporter.line_number = entry.translation_line;
    for part in entry.translation.lines() {
        reporter.set_context(part);
        report_style_issues(part, reporter);
    }
    reporter.line_number = saved;
}

/// Fix a whole translation catalog, returning the corrected text.
///
/// The last entry of the file is stored but never style-scanned; only a
/// following `#:` line triggers the scan.
pub fn fix_translation_file(file_name: &str, text: &str, sink: &mut dyn DiagnosticSink) -> String {
    let mut out = String::with_capacity(text.len());
    let mut entry = TranslationEntry::default();
    let mut state = ParseState::None;
    let mut reporter = Reporter::catalog(sink, file_name);

    for raw_line in text.lines() {
        let mut line = raw_line.to_string();
        reporter.next_line(&line);

        if line.starts_with("#:") {
            if state == ParseState::Location {
                // a second location comment extends the previous one
                entry.location.push_str(&line["#:".len()..]);
            } else {
                match state {
                    ParseState::Context | ParseState::Id => {
                        reporter.report("entry not finished", None);
                    }
                    ParseState::Translation => {
                        rescan_translation(&entry, &mut reporter);
                        debug!(
                            "catalog entry{}: msgctxt \"{}\", msgid \"{}\"",
                            entry.location.trim_start_matches("#:"),
                            entry.context,
                            entry.id
                        );
                    }
                    _ => {}
                }
                entry = TranslationEntry { location: line.clone(), ..Default::default() };
                state = ParseState::Location;
            }
        } else {
            let span = quote_span(&line);
            let line_text =
                span.map(|(first, last)| line[first + 1..last].replace("\\n", "\n"));

            if line.starts_with("msg") {
                let keyword = line.split_whitespace().next().unwrap_or("");
                match state {
                    ParseState::None => {}
                    ParseState::Location => match keyword {
                        "msgctxt" => {
                            entry.context = line_text.unwrap_or_default();
                            state = ParseState::Context;
                        }
                        "msgid" => {
                            entry.id = line_text.unwrap_or_default();
                            state = ParseState::Id;
                        }
                        _ => reporter
                            .report("line should start with '#:', 'msgctxt' or 'msgid'", None),
                    },
                    ParseState::Context => match keyword {
                        "msgid" => {
                            entry.id = line_text.unwrap_or_default();
                            state = ParseState::Id;
                        }
                        _ => reporter.report("line should be a string or start with 'msgid'", None),
                    },
                    ParseState::Id => match keyword {
                        "msgstr" => {
                            entry.translation_line = reporter.line_number;
                            state = ParseState::Translation;
                            if let (Some(span), Some(text)) = (span, line_text) {
                                let fixed = normalize_translation(&text, &mut reporter);
                                line = splice(&line, span, &fixed);
                                entry.translation = fixed;
                            }
                        }
                        // plural forms are not handled yet
                        "msgid_plural" => {}
                        _ => reporter.report("line should be a string or start with 'msgstr'", None),
                    },
                    ParseState::Translation => {
                        // plural forms included; their content is never stored
                        reporter.report("current entry not finished", None);
                    }
                }
            } else if let (Some(span), Some(text)) = (span, line_text) {
                match state {
                    ParseState::None => {}
                    ParseState::Location => {
                        reporter.report(
                            "unexpected string for a file location",
                            Some(char_col(&line, span.0)),
                        );
                        entry.location.push_str(&text);
                    }
                    ParseState::Context => entry.context.push_str(&text),
                    ParseState::Id => entry.id.push_str(&text),
                    ParseState::Translation => {
                        let fixed = normalize_translation(&text, &mut reporter);
                        line = splice(&line, span, &fixed);
                        entry.translation.push_str(&fixed);
                    }
                }
            }
        }

        out.push_str(&line);
        out.push('\n');
    }

    out.trim_end().to_string()
}
