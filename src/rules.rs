/*!
 * Style rule catalog.
 *
 * Static table of named regex patterns for the issues the engine flags but
 * never rewrites. Rules are data: the scan evaluates every rule against the
 * line independently, in declaration order, and reports every match.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::diagnostics::{char_col, Reporter};

/// One named pattern of the catalog
///
/// The `regex` crate has no lookaround, so the handful of lookaround
/// exceptions in the source patterns are expressed as optional guards,
/// both zero-width: a match is dropped when `unless_preceded_by` (anchored
/// with `$`) matches the text before the reported offset, or when
/// `unless_followed_by` (anchored with `^`) matches the text after the
/// match end. `group` selects which capture the offset is taken from when
/// the pattern has to consume leading context.
pub struct DiagnosticRule {
    pub message: &'static str,
    pub pattern: Regex,
    group: usize,
    unless_preceded_by: Option<Regex>,
    unless_followed_by: Option<Regex>,
}

impl DiagnosticRule {
    fn new(message: &'static str, pattern: &str) -> Self {
        Self {
            message,
            pattern: Regex::new(pattern).expect("invalid style rule pattern"),
            group: 0,
            unless_preceded_by: None,
            unless_followed_by: None,
        }
    }

    fn with_guard(message: &'static str, pattern: &str, group: usize, guard: &str) -> Self {
        Self {
            message,
            pattern: Regex::new(pattern).expect("invalid style rule pattern"),
            group,
            unless_preceded_by: Some(Regex::new(guard).expect("invalid style rule guard")),
            unless_followed_by: None,
        }
    }

    fn with_trailing_guard(message: &'static str, pattern: &str, guard: &str) -> Self {
        Self {
            message,
            pattern: Regex::new(pattern).expect("invalid style rule pattern"),
            group: 0,
            unless_preceded_by: None,
            unless_followed_by: Some(Regex::new(guard).expect("invalid style rule guard")),
        }
    }

    /// Byte offsets of every reported match of this rule on the line
    pub fn matches(&self, line: &str) -> Vec<usize> {
        self.pattern
            .captures_iter(line)
            .filter_map(|caps| {
                let m = caps.get(self.group).or_else(|| caps.get(0))?;
                if let Some(guard) = &self.unless_preceded_by {
                    if guard.is_match(&line[..m.start()]) {
                        return None;
                    }
                }
                if let Some(guard) = &self.unless_followed_by {
                    if guard.is_match(&line[m.end()..]) {
                        return None;
                    }
                }
                Some(m.start())
            })
            .collect()
    }
}

/// The rule catalog, in evaluation order
pub static STYLE_RULES: Lazy<Vec<DiagnosticRule>> = Lazy::new(|| {
    vec![
        // '!?' should be '?!'; '.…'/'….' should collapse; '…' wants a space
        // before the next letter; '[lineN].' doubles the full stop
        DiagnosticRule::new("punctuation issue", r"!\?|\.\s*…|…\s*\.|…\w|\[line\d+\]\."),
        // plain space (or none) before ?/!/;/: where a non-breaking space
        // belongs; ':' right before '=' is an inline script assignment
        DiagnosticRule::with_trailing_guard("punctuation issue", r"[^“\x{A0}\]?!][?!;:]", r"^="),
        DiagnosticRule::new(
            "misused phrase",
            r"[Ss]imilaires?\s*(à|aux?)\b|(\W\s+|^)[Dd]u coup|[Aa]u final|[Pp]allier\s+(à|au)",
        ),
        // closing dialogue mark after anything but ., !, ?, …, —, “ or [lineN]
        DiagnosticRule::with_guard(
            "unfinished sentence",
            r"”",
            0,
            r"(\.|“|!|\?|…|—|\[line\d{1,2}\])$",
        ),
        DiagnosticRule::new(
            "misspelled canonical name",
            r"\b(Sabre|Bellerophon|Ga[eé] Bolg|Bedivere|Cu\s?chulain|Hassan Sabbah|Hercule|Héraklês|Kojiro|Mato|Medea|Maeve|Perseus|Ryuu?do|Shiro|Sou?ichiro|Vivian|Tōsaka|[ÉéEe]v[ée]nement|[Pp]éron\b|[Dd]inner\b|[Ss]ceaux?\s[Mm]agiques?)",
        ),
        DiagnosticRule::new(
            "style rule inconsistency",
            r"\bQ-Qu|\b[Gg]eez\b|\b[Hh]ey\b|\b[Ss]igh*\b|[Hh][ée]ro de [Jj]ustice|n°|\dh\b|\b([Uu]ne|[LlSs]a)\s(Master|Servant)",
        ),
        DiagnosticRule::new("lowercase proper noun", r"\b(masters?|défenseur de la justice)\b"),
        DiagnosticRule::with_guard("lowercase proper noun", r"\bservants?\b", 0, r"se\s$"),
        DiagnosticRule::with_guard(
            "unwanted capital letter",
            r"([\w\]«]\s|\])(Magi?e)",
            2,
            r"Vraies?\s$",
        ),
        DiagnosticRule::new("doubled whitespace", r"\S\s\s+\S"),
        // [(l)r] belongs at the end of the line
        DiagnosticRule::new("inline script marker error", r"r\][^\[]"),
    ]
});

/// Run the whole catalog against a line, reporting every match of every rule
pub(crate) fn report_style_issues(line: &str, reporter: &mut Reporter) {
    for rule in STYLE_RULES.iter() {
        for offset in rule.matches(line) {
            reporter.report(rule.message, Some(char_col(line, offset)));
        }
    }
}
