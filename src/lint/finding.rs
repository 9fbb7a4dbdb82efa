use crate::error::Location;
use std::fmt;

/// Where a [Finding] points to: the schema's source name, when it's known, and a 1-based
/// line and column inside it.
#[derive(Debug, PartialEq, Eq, Clone, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct FindingLocation {
    #[cfg_attr(feature = "json", serde(skip_serializing_if = "Option::is_none"))]
    pub file: Option<String>,
    pub line: usize,
    pub column: usize,
}

impl FindingLocation {
    pub fn new(file: Option<&str>, location: Location) -> Self {
        FindingLocation {
            file: file.map(str::to_owned),
            line: location.line,
            column: location.column,
        }
    }
}

impl fmt::Display for FindingLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.file {
            Some(ref file) => write!(f, "{}:{}:{}", file, self.line, self.column),
            None => write!(f, "{}:{}", self.line, self.column),
        }
    }
}

/// A single reported problem.
///
/// Findings are plain values which own their data, so they outlive the
/// [`SchemaContext`](crate::schema::SchemaContext) of the schema they were produced from.
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct Finding {
    pub message: String,
    pub rule: String,
    pub location: FindingLocation,
}

impl Finding {
    pub fn new<M: Into<String>, R: Into<String>>(
        message: M,
        rule: R,
        location: FindingLocation,
    ) -> Self {
        Finding {
            message: message.into(),
            rule: rule.into(),
            location,
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.location, self.message, self.rule)
    }
}
