// src/types.rs
// Request/outcome types shared across the orchestration engine

use std::time::Duration;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Languages served by the transformation service (see /api/languages).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lower")]
pub enum Language {
    Python,
    JavaScript,
    Cpp,
    Java,
}

impl Language {
    /// Name used on the wire ("source_language" / "target_language" fields).
    pub fn wire_name(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::Cpp => "cpp",
            Language::Java => "java",
        }
    }

    /// File extension for saving transformed output.
    pub fn extension(&self) -> &'static str {
        match self {
            Language::Python => "py",
            Language::JavaScript => "js",
            Language::Cpp => "cpp",
            Language::Java => "java",
        }
    }

    /// Whether block structure is carried by leading whitespace.
    /// Drives the re-indentation pass; everything else is brace-delimited.
    pub fn is_indentation_significant(&self) -> bool {
        matches!(self, Language::Python)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Named intent sent to the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lower")]
pub enum OperationKind {
    Transform,
    Optimize,
    Explain,
    Convert,
}

impl OperationKind {
    pub fn wire_name(&self) -> &'static str {
        match self {
            OperationKind::Transform => "transform",
            OperationKind::Optimize => "optimize",
            OperationKind::Explain => "explain",
            OperationKind::Convert => "convert",
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// One operation request as submitted by the caller.
///
/// `target_language` is meaningful only for `Convert`, where it must be
/// present and differ from `source_language`; the controller enforces this
/// before any network activity.
#[derive(Debug, Clone)]
pub struct OperationRequest {
    pub source_code: String,
    pub source_language: Language,
    pub target_language: Option<Language>,
    pub kind: OperationKind,
}

/// Normalized result of one operation, success or failure.
///
/// Exactly one of `transformed_code` / `error_message` is present;
/// `complexity` is advisory metadata attached to accepted operations.
#[derive(Debug, Clone, Serialize)]
pub struct OperationOutcome {
    pub success: bool,
    pub transformed_code: Option<String>,
    pub explanations: Vec<String>,
    pub suggestions: Vec<String>,
    pub error_message: Option<String>,
    pub complexity: Option<ComplexityMetrics>,
}

impl OperationOutcome {
    pub fn succeeded(
        transformed_code: String,
        explanations: Vec<String>,
        suggestions: Vec<String>,
    ) -> Self {
        Self {
            success: true,
            transformed_code: Some(transformed_code),
            explanations,
            suggestions,
            error_message: None,
            complexity: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            transformed_code: None,
            explanations: Vec::new(),
            suggestions: Vec::new(),
            error_message: Some(message.into()),
            complexity: None,
        }
    }
}

/// Advisory classification of the input's structural weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ComplexityLevel {
    Simple,
    Moderate,
    Complex,
}

/// Shallow line-pattern metrics over the source text.
///
/// `score` sums the four construct counts (line count is reported but not
/// scored). Telemetry only: never blocks or reroutes a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComplexityMetrics {
    pub line_count: usize,
    pub function_count: usize,
    pub loop_count: usize,
    pub condition_count: usize,
    pub class_count: usize,
    pub score: usize,
    pub level: ComplexityLevel,
}

impl ComplexityMetrics {
    pub fn level_for(score: usize) -> ComplexityLevel {
        match score {
            0..=3 => ComplexityLevel::Simple,
            4..=8 => ComplexityLevel::Moderate,
            _ => ComplexityLevel::Complex,
        }
    }
}

/// Bounded exponential backoff for transport retries.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            // A policy that never attempts is useless; floor at one.
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Delay before attempt `n` (0-indexed, n >= 1): base_delay * 2^(n-1).
    pub fn delay_before(&self, attempt: u32) -> Duration {
        debug_assert!(attempt >= 1);
        self.base_delay * 2u32.saturating_pow(attempt.saturating_sub(1))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(1))
    }
}
