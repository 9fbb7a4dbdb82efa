use super::{config::LintConfig, rules::default_rules, Finding, LintRule};
use crate::error::Result;
use crate::schema::{Schema, SchemaContext};
use hashbrown::HashSet;
use rayon::prelude::*;
use tracing::{debug, debug_span, trace};

/// The `Linter` runs a list of registered [`LintRule`]s against schemas.
///
/// Rules run in the order they were registered and their findings are concatenated in that
/// order. When rules have been [enabled](Linter::enable) explicitly only those run, and names
/// that don't match any registered rule are ignored.
///
/// ```
/// use graphql_schema_lint::{lint::Linter, schema::*};
///
/// let ctx = SchemaContext::new();
/// let schema = Schema::parse(&ctx, "type Query { x: Int } type Orphan { y: String }").unwrap();
///
/// let findings = Linter::with_default_rules().lint(schema);
/// assert_eq!(findings.len(), 1);
/// assert_eq!(findings[0].rule, "defined-types-are-used");
/// ```
pub struct Linter {
    rules: Vec<Box<dyn LintRule>>,
    enabled: HashSet<String>,
    parallel: bool,
}

impl Linter {
    /// Create a `Linter` without any rules.
    pub fn new() -> Self {
        Linter {
            rules: Vec::new(),
            enabled: HashSet::new(),
            parallel: true,
        }
    }

    /// Create a `Linter` with every rule of [`rules`](super::rules) registered.
    pub fn with_default_rules() -> Self {
        let mut linter = Linter::new();
        for rule in default_rules() {
            linter.register_boxed(rule);
        }
        linter
    }

    /// Create a `Linter` with every default rule registered and the configuration applied.
    pub fn from_config(config: &LintConfig) -> Self {
        let mut linter = Linter::with_default_rules();
        linter.enable(&config.rules).set_parallel(config.parallel);
        linter
    }

    pub fn register<R: LintRule + 'static>(&mut self, rule: R) -> &mut Self {
        self.register_boxed(Box::new(rule))
    }

    pub fn register_boxed(&mut self, rule: Box<dyn LintRule>) -> &mut Self {
        self.rules.push(rule);
        self
    }

    /// Restrict the run to the named rules. May be called several times to enable more rules.
    pub fn enable<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            let name = name.as_ref();
            if !self.rules.iter().any(|rule| rule.name() == name) {
                debug!(rule = name, "enabled rule is not registered");
            }
            self.enabled.insert(name.to_owned());
        }
        self
    }

    /// Set whether [`Linter::lint_sources`] lints documents concurrently.
    pub fn set_parallel(&mut self, parallel: bool) -> &mut Self {
        self.parallel = parallel;
        self
    }

    #[inline]
    fn is_enabled(&self, name: &str) -> bool {
        self.enabled.is_empty() || self.enabled.contains(name)
    }

    /// Iterates the rules that will run, in registration order.
    pub fn rules(&self) -> impl Iterator<Item = &dyn LintRule> + '_ {
        self.rules
            .iter()
            .map(|rule| rule.as_ref())
            .filter(move |rule| self.is_enabled(rule.name()))
    }

    /// Run every applicable rule against the schema and return all findings.
    pub fn lint(&self, schema: &Schema) -> Vec<Finding> {
        let span = debug_span!("lint", source = schema.source_name().unwrap_or("<unnamed>"));
        let _enter = span.enter();

        let mut findings = Vec::new();
        for rule in self.rules.iter() {
            if !self.is_enabled(rule.name()) {
                trace!(rule = rule.name(), "skipping rule that isn't enabled");
                continue;
            }
            let rule_findings = rule.check(schema);
            debug!(
                rule = rule.name(),
                findings = rule_findings.len(),
                "rule finished"
            );
            findings.extend(rule_findings);
        }
        findings
    }

    /// Load a single SDL document and lint it.
    pub fn lint_source(&self, name: &str, source: &str) -> Result<Vec<Finding>> {
        let ctx = SchemaContext::new();
        let schema = Schema::parse_with_name(&ctx, name, source)?;
        Ok(self.lint(schema))
    }

    /// Load and lint several independent SDL documents, given as `(name, source)` pairs.
    ///
    /// Every document gets its own [`SchemaContext`]. The results are returned in the order of
    /// the input, no matter whether the documents were linted concurrently.
    pub fn lint_sources<N, S>(&self, sources: &[(N, S)]) -> Vec<Result<Vec<Finding>>>
    where
        N: AsRef<str> + Sync,
        S: AsRef<str> + Sync,
    {
        if self.parallel {
            sources
                .par_iter()
                .map(|(name, source)| self.lint_source(name.as_ref(), source.as_ref()))
                .collect()
        } else {
            sources
                .iter()
                .map(|(name, source)| self.lint_source(name.as_ref(), source.as_ref()))
                .collect()
        }
    }
}

impl Default for Linter {
    fn default() -> Self {
        Linter::with_default_rules()
    }
}
