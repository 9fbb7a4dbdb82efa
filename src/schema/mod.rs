//! # The Schema Model
//!
//! The `graphql_schema_lint::schema` module contains the read-only model every lint rule
//! operates on. A [Schema] is allocated into a [SchemaContext]'s arena, either by loading SDL
//! text with the [ParseSdl] trait or by assembling the definitions directly:
//!
//! ```
//! use graphql_schema_lint::schema::*;
//!
//! let ctx = SchemaContext::new();
//! let schema = Schema::parse(&ctx, "type Query { hello: String }").unwrap();
//!
//! assert_eq!(schema.query_type(), Some("Query"));
//! assert_eq!(schema.get_type("Query").unwrap().fields.len(), 1);
//! ```
//!
//! [More information on the Schema struct.](Schema)

mod context;
#[allow(clippy::module_inception)]
mod schema;
mod type_ref;

pub mod sdl;

pub use context::{DefaultIn, SchemaContext};
pub use schema::*;
pub use sdl::ParseSdl;
pub use type_ref::TypeRef;
