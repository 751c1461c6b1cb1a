// src/analysis/complexity.rs
// Advisory complexity classification over raw source text

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{ComplexityMetrics, Language};

/// Per-language keyword patterns for the four counted construct categories.
/// One match per qualifying line, no cross-line matching.
struct PatternSet {
    functions: Regex,
    loops: Regex,
    conditions: Regex,
    classes: Regex,
}

static PYTHON: Lazy<PatternSet> = Lazy::new(|| PatternSet {
    functions: Regex::new(r"\bdef\s+\w+").unwrap(),
    loops: Regex::new(r"\b(for|while)\b.*:").unwrap(),
    conditions: Regex::new(r"\b(if|elif)\b.*:").unwrap(),
    classes: Regex::new(r"\bclass\s+\w+").unwrap(),
});

static JAVASCRIPT: Lazy<PatternSet> = Lazy::new(|| PatternSet {
    functions: Regex::new(r"\bfunction\b|=>").unwrap(),
    loops: Regex::new(r"\b(for|while)\s*\(").unwrap(),
    conditions: Regex::new(r"\bif\s*\(").unwrap(),
    classes: Regex::new(r"\bclass\s+\w+").unwrap(),
});

static CPP: Lazy<PatternSet> = Lazy::new(|| PatternSet {
    functions: Regex::new(r"\b(void|int|float|double|bool|char|auto|std::\w+)\s+\w+\s*\(").unwrap(),
    loops: Regex::new(r"\b(for|while)\s*\(").unwrap(),
    conditions: Regex::new(r"\bif\s*\(").unwrap(),
    classes: Regex::new(r"\b(class|struct)\s+\w+").unwrap(),
});

static JAVA: Lazy<PatternSet> = Lazy::new(|| PatternSet {
    functions: Regex::new(r"\b(public|private|protected|static)\b[\w\s<>\[\],]*\s\w+\s*\(").unwrap(),
    loops: Regex::new(r"\b(for|while)\s*\(").unwrap(),
    conditions: Regex::new(r"\bif\s*\(").unwrap(),
    classes: Regex::new(r"\b(class|interface)\s+\w+").unwrap(),
});

fn patterns_for(language: Language) -> &'static PatternSet {
    match language {
        Language::Python => &PYTHON,
        Language::JavaScript => &JAVASCRIPT,
        Language::Cpp => &CPP,
        Language::Java => &JAVA,
    }
}

/// Classify `source` with shallow line-pattern counts. Pure, total,
/// deterministic; a known-approximate heuristic, never a gate.
pub fn analyze(source: &str, language: Language) -> ComplexityMetrics {
    let patterns = patterns_for(language);

    let mut line_count = 0usize;
    let mut function_count = 0usize;
    let mut loop_count = 0usize;
    let mut condition_count = 0usize;
    let mut class_count = 0usize;

    for line in source.lines() {
        if line.trim().is_empty() {
            continue;
        }
        line_count += 1;
        if patterns.functions.is_match(line) {
            function_count += 1;
        }
        if patterns.loops.is_match(line) {
            loop_count += 1;
        }
        if patterns.conditions.is_match(line) {
            condition_count += 1;
        }
        if patterns.classes.is_match(line) {
            class_count += 1;
        }
    }

    let score = function_count + loop_count + condition_count + class_count;
    ComplexityMetrics {
        line_count,
        function_count,
        loop_count,
        condition_count,
        class_count,
        score,
        level: ComplexityMetrics::level_for(score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ComplexityLevel;

    const PYTHON_SAMPLE: &str = "\
class Greeter:
    def greet(self, names):
        for name in names:
            if name:
                print(name)

greeter = Greeter()
";

    #[test]
    fn counts_python_constructs_per_line() {
        let metrics = analyze(PYTHON_SAMPLE, Language::Python);
        assert_eq!(metrics.line_count, 6);
        assert_eq!(metrics.function_count, 1);
        assert_eq!(metrics.loop_count, 1);
        assert_eq!(metrics.condition_count, 1);
        assert_eq!(metrics.class_count, 1);
        assert_eq!(metrics.score, 4);
        assert_eq!(metrics.level, ComplexityLevel::Moderate);
    }

    #[test]
    fn analyze_is_deterministic() {
        let first = analyze(PYTHON_SAMPLE, Language::Python);
        let second = analyze(PYTHON_SAMPLE, Language::Python);
        assert_eq!(first, second);
    }

    #[test]
    fn score_boundaries_map_to_levels() {
        // Each "if x:" line contributes exactly one condition.
        let source_of = |n: usize| "if x:\n".repeat(n);
        assert_eq!(analyze(&source_of(3), Language::Python).level, ComplexityLevel::Simple);
        assert_eq!(analyze(&source_of(4), Language::Python).level, ComplexityLevel::Moderate);
        assert_eq!(analyze(&source_of(8), Language::Python).level, ComplexityLevel::Moderate);
        assert_eq!(analyze(&source_of(9), Language::Python).level, ComplexityLevel::Complex);
    }

    #[test]
    fn blank_lines_are_not_counted() {
        let metrics = analyze("\n\n  \nprint(1)\n\n", Language::Python);
        assert_eq!(metrics.line_count, 1);
        assert_eq!(metrics.score, 0);
        assert_eq!(metrics.level, ComplexityLevel::Simple);
    }

    #[test]
    fn empty_input_is_simple() {
        let metrics = analyze("", Language::Python);
        assert_eq!(metrics.line_count, 0);
        assert_eq!(metrics.score, 0);
        assert_eq!(metrics.level, ComplexityLevel::Simple);
    }

    #[test]
    fn javascript_patterns_hit_brace_syntax() {
        let source = "\
function add(a, b) {
    return a + b;
}
for (let i = 0; i < 3; i++) {
    if (i % 2 === 0) {
        console.log(i);
    }
}
";
        let metrics = analyze(source, Language::JavaScript);
        assert_eq!(metrics.function_count, 1);
        assert_eq!(metrics.loop_count, 1);
        assert_eq!(metrics.condition_count, 1);
        assert_eq!(metrics.class_count, 0);
    }
}
