use std::{error::Error, fmt, str::FromStr};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output format requested by a tool caller.
#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// Human-readable markdown with status glyphs.
    #[default]
    Markdown,
    /// Structured JSON for machine consumption.
    Json,
}

/// Deployment staging mode accepted by WLST `deploy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StageMode {
    #[default]
    Stage,
    NoStage,
    ExternalStage,
}

impl StageMode {
    pub const VALUES: [&'static str; 3] = ["stage", "nostage", "external_stage"];

    pub fn as_str(&self) -> &'static str {
        match self {
            StageMode::Stage => "stage",
            StageMode::NoStage => "nostage",
            StageMode::ExternalStage => "external_stage",
        }
    }
}

impl FromStr for StageMode {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stage" => Ok(Self::Stage),
            "nostage" => Ok(Self::NoStage),
            "external_stage" => Ok(Self::ExternalStage),
            _ => Err(ParseOptionError::new("stage_mode", s, &Self::VALUES)),
        }
    }
}

impl fmt::Display for StageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metric category collected by the server metrics tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MetricType {
    #[default]
    All,
    Jvm,
    Threads,
    Jdbc,
    Jms,
}

impl MetricType {
    pub const VALUES: [&'static str; 5] = ["all", "jvm", "threads", "jdbc", "jms"];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricType::All => "all",
            MetricType::Jvm => "jvm",
            MetricType::Threads => "threads",
            MetricType::Jdbc => "jdbc",
            MetricType::Jms => "jms",
        }
    }

    /// Whether this selection includes the given concrete category.
    pub fn includes(&self, category: MetricType) -> bool {
        *self == MetricType::All || *self == category
    }
}

impl FromStr for MetricType {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "jvm" => Ok(Self::Jvm),
            "threads" => Ok(Self::Threads),
            "jdbc" => Ok(Self::Jdbc),
            "jms" => Ok(Self::Jms),
            _ => Err(ParseOptionError::new("metric_type", s, &Self::VALUES)),
        }
    }
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when an option string is not one of the accepted values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptionError {
    pub field: &'static str,
    pub value: String,
    pub expected: &'static [&'static str],
}

impl ParseOptionError {
    fn new(field: &'static str, value: &str, expected: &'static [&'static str]) -> Self {
        Self {
            field,
            value: value.to_string(),
            expected,
        }
    }
}

impl fmt::Display for ParseOptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} must be one of: {}", self.field, self.expected.join(", "))
    }
}

impl Error for ParseOptionError {}
