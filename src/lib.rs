//! `graphql_schema_lint`
//! =========
//!
//! _Fast structural linting for GraphQL Schema Definition Language documents._
//!
//! The **`graphql_schema_lint`** library follows two goals:
//!
//! - To find the structural problems in a schema that a GraphQL server happily accepts, such as
//!   types nothing can reach, `@key` directives selecting fields that can't identify an entity,
//!   or paginated types that don't follow the Relay connection pattern
//! - To be fast enough to run on every change of every schema in a repository
//!
//! A schema document is loaded into an arena-allocated, read-only model, which every lint rule
//! then reads independently. Rules never fail and never depend on each other; they only report
//! findings pointing to positions in the document. Many documents can be linted concurrently,
//! each with its own arena.
//!
//! ```
//! use graphql_schema_lint::{lint::Linter, schema::*};
//!
//! let ctx = SchemaContext::new();
//! let schema = Schema::parse_with_name(&ctx, "schema.graphql", "type Query { x: Int }").unwrap();
//! assert!(Linter::with_default_rules().lint(schema).is_empty());
//! ```
//!
//! [A good place to start learning more about this crate is the `lint` module...](lint)

pub mod error;
pub mod lint;
pub mod schema;

pub use bumpalo;
