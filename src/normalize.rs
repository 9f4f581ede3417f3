/*!
 * Line-local typographic fixers.
 *
 * Four independent operations, each taking the current line and returning
 * the corrected line: non-breaking-space insertion, suspension-point fixing,
 * straight-apostrophe fixing and alinea (indent) fixing. None of them keeps
 * state across lines; the scenario and catalog passes decide when to call
 * them and in what order.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::diagnostics::{char_col, Reporter};

// plain space right after « or right before », :, ;, ? or !
static MISSING_NBSP_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"« | [»:;?!]").unwrap());

/// Replace plain spaces around citation marks and tall punctuation with
/// non-breaking spaces. Purely mechanical, no diagnostic.
pub(crate) fn fix_nbsp(line: &str) -> String {
    MISSING_NBSP_REGEX
        .replace_all(line, |caps: &regex::Captures| caps[0].replace(' ', "\u{a0}"))
        .into_owned()
}

/// Replace exact dot triples with the ellipsis glyph; longer runs are
/// reported once and left untouched.
pub(crate) fn fix_suspension_points(line: &str, reporter: &mut Reporter) -> String {
    let mut line = line.to_string();
    let mut index = 0;
    while index < line.len() {
        let Some(found) = line[index..].find("..") else {
            break;
        };
        index += found;
        let rest = &line[index..];
        if rest.starts_with("...") && !rest.starts_with("....") {
            reporter.report("bad ellipsis (auto-fixed)", Some(char_col(&line, index)));
            line.replace_range(index..index + 3, "…");
        } else {
            reporter.report("consecutive dots", Some(char_col(&line, index)));
            // skip past the whole dot run
            loop {
                index += 2;
                if index >= line.len() || line.as_bytes()[index] != b'.' {
                    break;
                }
            }
        }
    }
    line
}

// the letter classes the apostrophe fixer accepts around a straight quote
fn is_letter_before(c: char) -> bool {
    matches!(c, 'A'..='Z' | 'a'..='z' | 'À'..='ÿ')
}

fn is_letter_after(c: char) -> bool {
    is_letter_before(c) || matches!(c, 'Œ' | 'œ')
}

/// Replace straight apostrophes between two letters with the curly form
pub(crate) fn fix_apostrophes(line: &str, reporter: &mut Reporter) -> String {
    let mut fixed = String::with_capacity(line.len());
    let mut prev: Option<char> = None;
    let mut iter = line.char_indices().peekable();
    while let Some((index, c)) = iter.next() {
        let next = iter.peek().map(|&(_, n)| n);
        if c == '\''
            && prev.is_some_and(is_letter_before)
            && next.is_some_and(is_letter_after)
        {
            reporter.report("straight apostrophe (auto-fixed)", Some(char_col(line, index)));
            fixed.push('’');
        } else {
            fixed.push(c);
        }
        prev = Some(c);
    }
    fixed
}

/// Rewrite a 2- or 3-space indent to the required paragraph indent.
///
/// Required widths: 0 mid-script, 2 for a new paragraph, 3 when the same
/// speaker continues. Indents of 0, 1 or 4+ are left alone, and a required
/// indent of 0 never rewrites. The mismatch reports stay disabled; the
/// correction is silent.
pub(crate) fn fix_alinea(line: &str, needed_alinea: usize, _reporter: &mut Reporter) -> String {
    let alinea = line.chars().take_while(|c| c.is_whitespace()).count();
    if alinea != needed_alinea && needed_alinea != 0 && (alinea == 2 || alinea == 3) {
        let rest: String = line.chars().skip(alinea).collect();
        let mut fixed = " ".repeat(needed_alinea);
        fixed.push_str(&rest);
        return fixed;
    }
    line.to_string()
}
