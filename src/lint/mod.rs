//! # Lint Rules for GraphQL Schemas
//!
//! This module contains logic to run lint rules on a loaded [Schema](crate::schema::Schema).
//! A rule reads the schema and reports [`Finding`s](Finding), each of which carries a message,
//! the rule's name and the position in the schema document it refers to. Linting never fails;
//! anything a rule can't interpret is reported as a finding as well.
//!
//! The rules this module comes with are:
//!
//! - [`rules::DefinedTypesAreUsed`]: reports types that can't be reached from a root type
//! - [`rules::KeyDirectiveFields`]: validates the field sets of `@key` directives
//! - [`rules::RelayConnectionTypes`]: validates the shape of `*Connection` types
//! - [`rules::RelayEdgeTypes`]: validates the shape of edge types
//! - [`rules::RelayPageInfo`]: validates the fields of the `PageInfo` type
//!
//! Rules are run by a [`Linter`], which holds the registered rules and, optionally, the names of
//! the rules that are enabled. Custom rules implement the [`LintRule`] trait and are registered
//! with [`Linter::register`].
//!
//! ```
//! use graphql_schema_lint::{lint::*, schema::*};
//!
//! let ctx = SchemaContext::new();
//! let schema = Schema::parse(&ctx, "type Query { users: [UserEdge] } type UserEdge { node: ID }").unwrap();
//!
//! let findings = rules::RelayEdgeTypes.check(schema);
//! assert_eq!(
//!     findings[0].message,
//!     "Edge type `UserEdge` must have a `cursor` field that returns `String`."
//! );
//! ```

mod config;
mod context;
mod driver;
mod finding;
mod rule;

pub mod field_set;
pub mod report;
pub mod rules;

pub use config::LintConfig;
pub use context::LintContext;
pub use driver::Linter;
pub use finding::{Finding, FindingLocation};
pub use rule::LintRule;

#[cfg(test)]
pub(crate) mod tests {
    use super::{Finding, LintRule};
    use crate::schema::{ParseSdl, Schema, SchemaContext};

    /// Loads the SDL document and runs a single rule against it.
    pub(crate) fn check_sdl(rule: &dyn LintRule, source: &str) -> Vec<Finding> {
        let ctx = SchemaContext::new();
        let schema = Schema::parse(&ctx, source).unwrap();
        rule.check(schema)
    }

    pub(crate) fn messages(findings: &[Finding]) -> Vec<&str> {
        findings
            .iter()
            .map(|finding| finding.message.as_str())
            .collect()
    }
}
