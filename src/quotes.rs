/*!
 * Quote and dialogue balance tracking.
 *
 * Two halves: line-local reclassification of straight quotes into their
 * curly/guillemet forms, and cross-line tracking of open dialogue (curly
 * double quotes) and open citations (French guillemets) over a
 * `NarrativeState`.
 */

use crate::diagnostics::{char_col, Reporter};

/// Cross-line narrative state of a scenario pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NarrativeState {
    /// Inside an open dialogue quotation (“ without its ”)
    pub talking: bool,
    /// Inside an open citation block (« without its »)
    pub in_quote: bool,
    /// The next text line must carry a paragraph-opening indent
    pub need_alinea: bool,
}

impl NarrativeState {
    pub fn new() -> Self {
        Self { talking: false, in_quote: false, need_alinea: true }
    }
}

impl Default for NarrativeState {
    fn default() -> Self {
        Self::new()
    }
}

/// Occurrences of `token` in `text` that are not escaped with a backslash
fn count_unescaped(text: &str, token: char) -> usize {
    text.match_indices(token)
        .filter(|&(index, _)| index == 0 || text.as_bytes()[index - 1] != b'\\')
        .count()
}

/// Whether the byte offset `index` lies inside an open `open`..`close` span.
///
/// For identical delimiters the parity of the opens before the offset
/// decides; for distinct delimiters a strictly greater open count does.
pub(crate) fn is_in_block(line: &str, index: usize, open: char, close: char) -> bool {
    let before = &line[..index];
    let opens = count_unescaped(before, open);
    if open == close {
        opens % 2 == 1
    } else if opens > 0 {
        opens > count_unescaped(before, close)
    } else {
        false
    }
}

fn leading_whitespace_bytes(line: &str) -> usize {
    line.char_indices()
        .find(|&(_, c)| !c.is_whitespace())
        .map_or(line.len(), |(index, _)| index)
}

/// Reclassify straight double quotes and apostrophes on the line.
///
/// Quotes inside an unescaped `[`..`]` span are reserved for embedded
/// formulas and left alone. A `"` that is the first non-blank character
/// opens a dialogue; one with only blanks after it closes one; anything
/// else is ambiguous. A `'` is only reclassified inside an open citation,
/// by its adjacent whitespace.
pub(crate) fn fix_quotes(line: &str, in_quote: bool, reporter: &mut Reporter) -> String {
    let mut line = line.to_string();

    let mut search_from = 0;
    while let Some(found) = line[search_from..].find('"') {
        let index = search_from + found;
        let mut advance = 1;
        let alinea = leading_whitespace_bytes(&line);
        if is_in_block(&line, index, '[', ']') {
            // quote inside brackets, leave as is
        } else if index == alinea {
            reporter.report("bad quotes (auto-fixed)", Some(char_col(&line, index)));
            line.replace_range(index..index + 1, "“");
            advance = "“".len();
        } else if line[index + 1..].trim().is_empty() {
            reporter.report("bad quotes (auto-fixed)", Some(char_col(&line, index)));
            line.replace_range(index..index + 1, "”");
            advance = "”".len();
        } else {
            reporter.report("bad quotes", Some(char_col(&line, index)));
        }
        search_from = index + advance;
    }

    let mut search_from = 0;
    while let Some(found) = line[search_from..].find('\'') {
        let index = search_from + found;
        let mut advance = 1;
        if is_in_block(&line, index, '[', ']') {
            // only a conflict when nested in a straight-double-quote span
            if is_in_block(&line, index, '"', '"') {
                reporter.report("bad quotes", Some(char_col(&line, index)));
            }
        } else {
            let last_open = line[..index].rfind('«').map_or(-1, |i| i as isize);
            let last_close = line[..index].rfind('»').map_or(-1, |i| i as isize);
            // at a citation boundary the comparison depends on whether one is open
            let inside_citation =
                if in_quote { last_open >= last_close } else { last_open > last_close };
            if !inside_citation {
                reporter.report("bad quotes", Some(char_col(&line, index)));
            } else {
                let before_is_blank =
                    line[..index].chars().next_back().is_some_and(char::is_whitespace);
                let after_is_blank =
                    line[index + 1..].chars().next().is_some_and(char::is_whitespace);
                let apostrophe = if before_is_blank {
                    Some("‘")
                } else if after_is_blank {
                    Some("’")
                } else {
                    None
                };
                match apostrophe {
                    Some(curly) => {
                        reporter.report("bad apostrophe (auto-fixed)", Some(char_col(&line, index)));
                        line.replace_range(index..index + 1, curly);
                        advance = curly.len();
                    }
                    None => reporter.report("bad apostrophe", Some(char_col(&line, index))),
                }
            }
        }
        search_from = index + advance;
    }

    line
}

/// Track curly dialogue marks across lines
pub(crate) fn track_dialogue(line: &str, state: &mut NarrativeState, reporter: &mut Reporter) {
    let start = line.find('“');
    let end = line.rfind('”');
    if let Some(start) = start {
        if !line[..start].trim().is_empty() {
            reporter.report("bad quotes", Some(char_col(line, start)));
        }
        if state.talking {
            reporter.report("previous dialogue unterminated", Some(char_col(line, start)));
            if end.is_some() {
                state.talking = false;
            }
        } else {
            if end.is_none_or(|end| end < start) {
                state.talking = true;
            }
            if state.in_quote {
                reporter.report("dialogue inside a citation", Some(char_col(line, start)));
                state.in_quote = false;
            }
        }
    } else if let Some(end) = end {
        if state.talking {
            state.talking = false;
        } else {
            reporter.report("no dialogue to close", Some(char_col(line, end)));
        }
    }
}

/// Track guillemet balance across lines
pub(crate) fn track_citations(line: &str, state: &mut NarrativeState, reporter: &mut Reporter) {
    let lefts: Vec<usize> = line.match_indices('«').map(|(i, _)| i).collect();
    let rights: Vec<usize> = line.match_indices('»').map(|(i, _)| i).collect();
    if lefts.len() != rights.len() {
        if lefts.len().abs_diff(rights.len()) > 1 {
            reporter.report("unbalanced « » guillemets", None);
        } else if lefts.is_empty() && !state.in_quote {
            reporter.report("no citation (« ») to close", None);
        } else if rights.is_empty() && state.in_quote {
            reporter.report("citation (« ») already open", None);
        } else {
            // other imbalances are easy to spot by reading
            state.in_quote = !state.in_quote;
        }
    } else {
        let out_of_order = lefts
            .iter()
            .zip(&rights)
            .any(|(&left, &right)| state.in_quote != (right < left));
        if out_of_order {
            let message = format!(
                "guillemets « » out of order, line starts {} a citation",
                if state.in_quote { "inside" } else { "outside" }
            );
            reporter.report(&message, None);
        }
    }
}
