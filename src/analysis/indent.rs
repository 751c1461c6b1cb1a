// src/analysis/indent.rs
// Heuristic re-indentation for indentation-significant source

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::Language;

/// Fixed indentation unit.
const INDENT_UNIT: &str = "    ";

/// Keywords that re-open a block at the level of their matching header.
static DEDENT_KEYWORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(else|elif|except|finally)\b").unwrap());

/// Re-indent `source` with a single forward pass.
///
/// Returns the input unchanged for languages whose block structure is not
/// whitespace-carried. The pass does not validate syntax: unbalanced block
/// markers produce the clamped-at-zero indentation of the walk, silently.
pub fn reformat(source: &str, language: Language) -> String {
    if !language.is_indentation_significant() {
        return source.to_string();
    }

    let mut indent_level: usize = 0;
    let mut formatted: Vec<String> = Vec::new();

    for line in source.split('\n') {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            formatted.push(String::new());
            continue;
        }

        if DEDENT_KEYWORD.is_match(trimmed) {
            indent_level = indent_level.saturating_sub(1);
        }

        formatted.push(format!("{}{}", INDENT_UNIT.repeat(indent_level), trimmed));

        if trimmed.ends_with(':') {
            indent_level += 1;
        }
    }

    formatted.join("\n")
}
