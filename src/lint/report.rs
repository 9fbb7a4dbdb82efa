//! Rendering of findings for people and for tools.

use super::Finding;

/// Render findings as text, one finding per line in the form `file:line:column: message (rule)`.
pub fn render_text(findings: &[Finding]) -> String {
    let mut out = String::new();
    for finding in findings {
        out.push_str(&finding.to_string());
        out.push('\n');
    }
    out
}

/// Render findings as a pretty-printed JSON array.
#[cfg(feature = "json")]
pub fn render_json(findings: &[Finding]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(findings)
}
