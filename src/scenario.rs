/*!
 * Scenario file pass.
 *
 * Drives a single forward pass over a narrative script: classifies each
 * line (comment, page marker, directive, blank, text), interprets the
 * handful of directives the engine understands, runs the typographic
 * fixers and the quote tracker over text lines, and checks conditional
 * branches for consistent narrative state.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::diagnostics::{DiagnosticSink, Reporter};
use crate::normalize::{fix_alinea, fix_apostrophes, fix_nbsp, fix_suspension_points};
use crate::quotes::{fix_quotes, track_citations, track_dialogue, NarrativeState};
use crate::rules::report_style_issues;

// strict speaker identifier for @say storage= values
static TALKER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z\d]+_[a-z\d]+(_[0-9a-z]+)+$").unwrap());

/// Snapshots taken around an `@if`/`@else`/`@endif` group.
///
/// `before` is the state at `@if`; `end_of_if` the state reached when
/// `@else` closed the first branch. The kind is deliberately not reset at
/// `@endif`, so a stray second `@endif` re-compares against the same
/// snapshot.
#[derive(Debug, Clone, Copy)]
enum BranchTracker {
    None,
    If { before: NarrativeState },
    IfElse { before: NarrativeState, end_of_if: NarrativeState },
}

impl BranchTracker {
    fn before(&self) -> NarrativeState {
        match *self {
            BranchTracker::None => NarrativeState::new(),
            BranchTracker::If { before } | BranchTracker::IfElse { before, .. } => before,
        }
    }
}

/// Fix a whole scenario file, returning the corrected text.
///
/// All findings go to the sink; the function always returns the
/// best-effort corrected text, even when consistency checks fail.
pub fn fix_scenario_file(file_name: &str, text: &str, sink: &mut dyn DiagnosticSink) -> String {
    let mut out = String::with_capacity(text.len() + 4);
    let mut state = NarrativeState::new();
    let mut branch = BranchTracker::None;
    let mut deferred_report: Option<&'static str> = None;
    let mut reporter = Reporter::scenario(sink, file_name);

    // BOM pre-pass: a printable ASCII first code point means the marker is
    // plausibly missing; anything else but the marker itself is suspect
    match text.chars().next() {
        Some(first) if (32..128).contains(&(first as u32)) => out.push('\u{feff}'),
        Some(first) if first != '\u{feff}' => {
            reporter.input_error(&format!(
                "{:>20} : unexpected leading character, code: {:x}",
                file_name, first as u32
            ));
        }
        _ => {}
    }

    for raw_line in text.lines() {
        let mut line = raw_line.to_string();
        reporter.next_line(&line);

        if line.starts_with(';') {
            // comment, ignored
        } else if line.starts_with("*page") {
            let digits_end = line.find('|').unwrap_or_else(|| {
                line["*page".len()..]
                    .find(|c: char| !c.is_ascii_digit())
                    .map_or(line.len(), |found| "*page".len() + found)
            });
            if let Ok(page) = line["*page".len()..digits_end].parse::<usize>() {
                reporter.page_number = page + 1;
            }
        } else if line.starts_with('@') {
            if line.chars().next_back().is_some_and(char::is_whitespace) {
                reporter.report("trailing whitespace after @ command", None);
            }
            if line.starts_with("@r") || line.starts_with("@lr") {
                state.need_alinea = true;
            } else if line.starts_with("@pg") {
                state.need_alinea = true;
                deferred_report = None;
                if state.talking {
                    reporter.report("dialogue unterminated at end of page", None);
                }
                if state.in_quote {
                    reporter.report("citation unterminated at end of page", None);
                }
            } else if line.starts_with("@say") {
                match line.find("storage=") {
                    None => reporter.report("@say without \"storage=\"", None),
                    Some(found) => {
                        let start = found + "storage=".len();
                        let end =
                            line[start..].find(' ').map_or(line.len(), |space| start + space);
                        if !TALKER_REGEX.is_match(&line[start..end]) {
                            reporter.report("malformed @say identifier", None);
                        }
                    }
                }
            } else if line.starts_with("@if") {
                branch = BranchTracker::If { before: state };
            } else if line.starts_with("@else") {
                let before = branch.before();
                branch = BranchTracker::IfElse { before, end_of_if: state };
                state = before;
            } else if line.starts_with("@endif") {
                match branch {
                    BranchTracker::IfElse { end_of_if, .. } => {
                        if state.talking != end_of_if.talking {
                            reporter.report("dialogue mismatch between if and else branches", None);
                        }
                        if state.in_quote != end_of_if.in_quote {
                            reporter.report("citation mismatch between if and else branches", None);
                        }
                        if state.need_alinea != end_of_if.need_alinea {
                            deferred_report =
                                Some("paragraph mismatch around the previous if/else");
                        }
                    }
                    BranchTracker::If { before } => {
                        if state.talking != before.talking {
                            reporter.report("dialogue mismatch across the if branch", None);
                        }
                        if state.in_quote != before.in_quote {
                            reporter.report("citation mismatch across the if branch", None);
                        }
                        if state.need_alinea != before.need_alinea {
                            deferred_report =
                                Some("paragraph mismatch across the previous if branch");
                        }
                    }
                    BranchTracker::None => {}
                }
            }
        } else if !line.trim().is_empty() {
            // an alinea mismatch at @endif only means something once text resumes
            if let Some(message) = deferred_report.take() {
                reporter.report(message, None);
            }

            line = fix_nbsp(&line);
            line = fix_apostrophes(&line, &mut reporter);
            line = fix_suspension_points(&line, &mut reporter);
            reporter.set_context(&line);

            let needed_alinea = if state.need_alinea {
                if state.talking || state.in_quote { 3 } else { 2 }
            } else {
                0
            };
            line = fix_alinea(&line, needed_alinea, &mut reporter);
            reporter.set_context(&line);

            line = fix_quotes(&line, state.in_quote, &mut reporter);
            track_dialogue(&line, &mut state, &mut reporter);
            track_citations(&line, &mut state, &mut reporter);
            report_style_issues(&line, &mut reporter);

            // an inline [r]/[lr] line break opens a fresh paragraph
            state.need_alinea = line.ends_with("r]");
        }

        out.push_str(&line);
        out.push('\n');
    }

    if state.talking {
        reporter.report("dialogue unterminated at end of file", None);
    }
    if state.in_quote {
        reporter.report("citation unterminated at end of file", None);
    }

    out
}
