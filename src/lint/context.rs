use super::finding::{Finding, FindingLocation};
use crate::error::Location;

/// The `LintContext` collects the findings of a single rule run on a single schema.
///
/// Every reported finding is stamped with the running rule's name and the schema's source
/// name, so rules only ever supply a message and a position.
pub struct LintContext<'r> {
    rule: &'r str,
    file: Option<&'r str>,
    findings: Vec<Finding>,
}

impl<'r> LintContext<'r> {
    /// Create a new `LintContext` for the given rule name and schema source name.
    pub fn new(rule: &'r str, file: Option<&'r str>) -> Self {
        LintContext {
            rule,
            file,
            findings: Vec::new(),
        }
    }

    /// Add a finding at the given position.
    ///
    /// This is called inside of lint rules and never stops the rule that's running.
    pub fn report<S: Into<String>>(&mut self, location: Location, message: S) {
        self.findings.push(Finding::new(
            message,
            self.rule,
            FindingLocation::new(self.file, location),
        ));
    }

    #[inline]
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Convert the context into the list of findings in the order they were reported.
    #[inline]
    pub fn into_findings(self) -> Vec<Finding> {
        self.findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stamps_findings() {
        let mut ctx = LintContext::new("my-rule", Some("a.graphql"));
        ctx.report(Location::new(1, 6), "first");
        ctx.report(Location::new(4, 1), String::from("second"));
        assert_eq!(ctx.findings().len(), 2);

        let findings = ctx.into_findings();
        assert_eq!(findings[0].rule, "my-rule");
        assert_eq!(findings[0].message, "first");
        assert_eq!(findings[1].location.file.as_deref(), Some("a.graphql"));
        assert_eq!(findings[1].location.line, 4);
    }
}
