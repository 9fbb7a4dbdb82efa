use super::{context::LintContext, finding::Finding};
use crate::schema::Schema;

/// Trait for a `LintRule` that checks a loaded [Schema] and reports [Finding]s.
///
/// A rule is identified by its [`name`](LintRule::name), which is used to enable it selectively
/// and is stamped on every finding it reports. Rules implement [`LintRule::run`], which reads
/// the schema and reports to the passed [`LintContext`]. A rule never fails: anything it can't
/// interpret is reported as a finding as well.
///
/// Rules carry no state between runs and must be `Send + Sync`, so that a single
/// [`Linter`](super::Linter) can be shared by threads linting different documents.
pub trait LintRule: Send + Sync {
    /// A unique and stable identifier for this rule, e.g. `defined-types-are-used`.
    fn name(&self) -> &str;

    /// A short human readable summary of what the rule checks.
    fn description(&self) -> &str;

    /// Check the schema and report every violation to the context.
    fn run(&self, ctx: &mut LintContext, schema: &Schema);

    /// Run this `LintRule` against the given schema and return its findings in the order they
    /// were reported.
    #[inline]
    fn check(&self, schema: &Schema) -> Vec<Finding> {
        let mut ctx = LintContext::new(self.name(), schema.source_name());
        self.run(&mut ctx, schema);
        ctx.into_findings()
    }
}

impl<R: LintRule + ?Sized> LintRule for Box<R> {
    #[inline]
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline]
    fn description(&self) -> &str {
        (**self).description()
    }

    #[inline]
    fn run(&self, ctx: &mut LintContext, schema: &Schema) {
        (**self).run(ctx, schema)
    }
}
