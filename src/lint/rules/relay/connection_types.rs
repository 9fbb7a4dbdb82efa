use super::super::super::{LintContext, LintRule};
use super::{
    strip_suffix_ignore_case, CONNECTION_SUFFIX, EDGES_FIELD, EDGE_SUFFIX, PAGE_INFO_FIELD,
    PAGE_INFO_TYPE,
};
use crate::schema::{Schema, TypeDefinition, TypeRef};

/// Validate that every `*Connection` type follows the Relay connection type shape.
///
/// A connection must be an object type with an `edges` field returning a list of edges and a
/// `pageInfo` field of type `PageInfo!`. The edges of `UserConnection` must be `UserEdge`s.
///
/// See [`LintRule`]
/// [Reference](https://relay.dev/graphql/connections.htm#sec-Connection-Types)
#[derive(Debug, Default, Clone, Copy)]
pub struct RelayConnectionTypes;

impl LintRule for RelayConnectionTypes {
    fn name(&self) -> &str {
        "relay-connection-types-spec"
    }

    fn description(&self) -> &str {
        "Validates that *Connection types have `edges` and `pageInfo` fields of the right shape."
    }

    fn run(&self, ctx: &mut LintContext, schema: &Schema) {
        for definition in schema.types() {
            if let Some(prefix) = strip_suffix_ignore_case(definition.name, CONNECTION_SUFFIX) {
                check_connection(ctx, definition, prefix);
            }
        }
    }
}

fn check_connection(ctx: &mut LintContext, definition: &TypeDefinition, prefix: &str) {
    if !definition.is_object() {
        ctx.report(
            definition.location,
            format!(
                "Connection type `{}` must be an object type, found {}.",
                definition.name, definition.kind
            ),
        );
        return;
    }

    match definition.get_field(EDGES_FIELD) {
        None => ctx.report(
            definition.location,
            format!(
                "Connection type `{}` must have an `edges` field that returns a list of edges.",
                definition.name
            ),
        ),
        Some(edges) => match edges.field_type.list_item() {
            None => ctx.report(
                edges.location,
                format!(
                    "The `edges` field of `{}` must return a list of edges, found `{}`.",
                    definition.name, edges.field_type
                ),
            ),
            Some(item) if item.is_list() => ctx.report(
                edges.location,
                format!(
                    "The `edges` field of `{}` must return a list of edges, not a nested list, found `{}`.",
                    definition.name, edges.field_type
                ),
            ),
            Some(item) => {
                let expected = format!("{}{}", prefix, EDGE_SUFFIX);
                let actual = item.named_type();
                if actual != expected {
                    ctx.report(
                        edges.location,
                        format!(
                            "The `edges` field of `{}` must return a list of `{}`, found `{}`.",
                            definition.name, expected, actual
                        ),
                    );
                }
            }
        },
    }

    let page_info = definition.get_field(PAGE_INFO_FIELD);
    let is_valid = page_info.map_or(false, |field| {
        field.field_type.is_non_null()
            && *field.field_type.nullable() == TypeRef::Named(PAGE_INFO_TYPE)
    });
    if !is_valid {
        ctx.report(
            page_info.map_or(definition.location, |field| field.location),
            format!(
                "Connection type `{}` must have a `pageInfo` field of type `PageInfo!`.",
                definition.name
            ),
        );
    }
}
