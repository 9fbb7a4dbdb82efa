use super::super::super::{LintContext, LintRule};
use super::{
    strip_suffix_ignore_case, CONNECTION_SUFFIX, CURSOR_FIELD, EDGES_FIELD, EDGE_SUFFIX,
    NODE_FIELD, NODE_INTERFACE,
};
use crate::schema::{Schema, TypeDefinition, TypeKind};
use hashbrown::HashSet;

/// Validate that edge types follow the Relay edge type shape.
///
/// Edge types are all `*Edge` types plus every type a `*Connection`'s `edges` field lists. An
/// edge must be an object type with a `node` field that isn't a list and a `cursor` field
/// returning `String`. When the schema declares a `Node` interface, the node type, or every
/// member of it if it's a union, must implement `Node`.
///
/// See [`LintRule`]
/// [Reference](https://relay.dev/graphql/connections.htm#sec-Edge-Types)
#[derive(Debug, Default, Clone, Copy)]
pub struct RelayEdgeTypes;

impl LintRule for RelayEdgeTypes {
    fn name(&self) -> &str {
        "relay-edge-types-spec"
    }

    fn description(&self) -> &str {
        "Validates that edge types have a `node` and a `cursor` field of the right shape."
    }

    fn run(&self, ctx: &mut LintContext, schema: &Schema) {
        let has_node_interface = schema
            .get_type(NODE_INTERFACE)
            .map_or(false, |node| node.kind == TypeKind::Interface);
        for definition in edge_types(schema) {
            check_edge(ctx, schema, definition, has_node_interface);
        }
    }
}

/// Collects the declared edge types of the schema in declaration order.
pub fn edge_types<'a>(schema: &Schema<'a>) -> Vec<&'a TypeDefinition<'a>> {
    let mut names: HashSet<&'a str> = HashSet::new();
    for definition in schema.types() {
        if strip_suffix_ignore_case(definition.name, EDGE_SUFFIX).is_some() {
            names.insert(definition.name);
        } else if strip_suffix_ignore_case(definition.name, CONNECTION_SUFFIX).is_some() {
            if let Some(edges) = definition.get_field(EDGES_FIELD) {
                if edges.field_type.is_list() {
                    names.insert(edges.field_type.named_type());
                }
            }
        }
    }

    schema
        .types()
        .filter(|definition| names.contains(definition.name))
        .collect()
}

fn check_edge(
    ctx: &mut LintContext,
    schema: &Schema,
    definition: &TypeDefinition,
    has_node_interface: bool,
) {
    if !definition.is_object() {
        ctx.report(
            definition.location,
            format!(
                "Edge type `{}` must be an object type, found {}.",
                definition.name, definition.kind
            ),
        );
        return;
    }

    match definition.get_field(NODE_FIELD) {
        None => ctx.report(
            definition.location,
            format!("Edge type `{}` must have a `node` field.", definition.name),
        ),
        Some(node) if node.field_type.is_list() => ctx.report(
            node.location,
            format!(
                "The `node` field of `{}` must not return a list, found `{}`.",
                definition.name, node.field_type
            ),
        ),
        Some(node) => {
            let node_type = node.field_type.named_type();
            match schema.kind_of(node_type) {
                Some(TypeKind::InputObject) => ctx.report(
                    node.location,
                    format!(
                        "The `node` field of `{}` must return a scalar, enum, object, interface or union type, but `{}` is INPUT_OBJECT.",
                        definition.name, node_type
                    ),
                ),
                Some(TypeKind::Object | TypeKind::Interface) if has_node_interface => {
                    if !implements_node(schema, node_type) {
                        ctx.report(
                            node.location,
                            format!(
                                "The `node` field of `{}` must return a type that implements the `Node` interface, but `{}` doesn't.",
                                definition.name, node_type
                            ),
                        );
                    }
                }
                Some(TypeKind::Union) if has_node_interface => {
                    let members = schema
                        .get_type(node_type)
                        .map(|union| union.members.iter().copied());
                    for member in members.into_iter().flatten() {
                        if !implements_node(schema, member) {
                            ctx.report(
                                node.location,
                                format!(
                                    "The `node` field of `{}` returns the union `{}`, whose member `{}` doesn't implement the `Node` interface.",
                                    definition.name, node_type, member
                                ),
                            );
                        }
                    }
                }
                _ => {}
            }
        }
    }

    match definition.get_field(CURSOR_FIELD) {
        None => ctx.report(
            definition.location,
            format!(
                "Edge type `{}` must have a `cursor` field that returns `String`.",
                definition.name
            ),
        ),
        Some(cursor) if cursor.field_type.named_type() != "String" => ctx.report(
            cursor.location,
            format!(
                "The `cursor` field of `{}` must return `String`, found `{}`.",
                definition.name, cursor.field_type
            ),
        ),
        Some(_) => {}
    }
}

#[inline]
fn implements_node(schema: &Schema, name: &str) -> bool {
    name == NODE_INTERFACE || schema.implements_interface(name, NODE_INTERFACE)
}

#[cfg(test)]
mod tests {
    use super::super::super::super::tests::{check_sdl, messages};
    use super::*;
    use crate::schema::{ParseSdl, SchemaContext};
    use indoc::indoc;

    fn check(source: &str) -> Vec<String> {
        messages(&check_sdl(&RelayEdgeTypes, source))
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn valid_edges() {
        let findings = check(indoc! {"
            interface Node { id: ID! }
            type Query { users: UserConnection }
            type User implements Node { id: ID! }
            type UserConnection { edges: [UserEdge] }
            type UserEdge { node: User! cursor: String! }
            type TagEdge { node: String cursor: String }
            type StatusEdge { node: Status cursor: String }
            enum Status { ON OFF }
            type NodeEdge { node: Node cursor: String }
        "});
        assert_eq!(findings, Vec::<String>::new());
    }

    #[test]
    fn discovers_edges() {
        let ctx = SchemaContext::new();
        let schema = Schema::parse(
            &ctx,
            indoc! {"
                type Query { users: UserConnection }
                type Member { id: ID }
                type UserConnection { edges: [Member] }
                type OtherConnection { edges: [String] }
                type UserEdge { node: Member cursor: String }
                input FilterEdge { id: ID }
            "},
        )
        .unwrap();
        let names: Vec<&str> = edge_types(schema).iter().map(|edge| edge.name).collect();
        assert_eq!(names, ["Member", "UserEdge", "FilterEdge"]);
    }

    #[test]
    fn must_be_object() {
        let findings = check(indoc! {"
            type Query { a: Int }
            input FilterEdge { id: ID }
            interface NamedEdge { node: String cursor: String }
        "});
        assert_eq!(
            findings,
            [
                "Edge type `FilterEdge` must be an object type, found INPUT_OBJECT.",
                "Edge type `NamedEdge` must be an object type, found INTERFACE.",
            ]
        );
    }

    #[test]
    fn node_must_not_be_a_list() {
        let findings = check(indoc! {"
            type Query { a: Int }
            type User { id: ID }
            type UserEdge { node: [User!]! cursor: String }
        "});
        assert_eq!(
            findings,
            ["The `node` field of `UserEdge` must not return a list, found `[User!]!`."]
        );
    }

    #[test]
    fn node_list_skips_interface_check() {
        let findings = check(indoc! {"
            interface Node { id: ID! }
            type Query { a: Int }
            type User { id: ID }
            type UserEdge { node: [User] cursor: String }
        "});
        assert_eq!(findings.len(), 1);
    }

    #[test]
    fn missing_fields() {
        let findings = check(indoc! {"
            type Query { a: Int }
            type UserEdge { id: ID }
        "});
        assert_eq!(
            findings,
            [
                "Edge type `UserEdge` must have a `node` field.",
                "Edge type `UserEdge` must have a `cursor` field that returns `String`.",
            ]
        );
    }

    #[test]
    fn cursor_must_be_string() {
        let findings = check(indoc! {"
            type Query { a: Int }
            type UserEdge { node: ID cursor: Int! }
            type PostEdge { node: ID cursor: String! }
        "});
        assert_eq!(
            findings,
            ["The `cursor` field of `UserEdge` must return `String`, found `Int!`."]
        );
    }

    #[test]
    fn node_must_implement_node_interface() {
        let findings = check(indoc! {"
            interface Node { id: ID! }
            interface Named { name: String }
            type Query { a: Int }
            type User implements Node { id: ID! }
            type Post { id: ID! }
            type Group { id: ID! }
            union Actor = User | Post | Group
            type PostEdge { node: Post cursor: String }
            type NamedEdge { node: Named cursor: String }
            type ActorEdge { node: Actor cursor: String }
        "});
        assert_eq!(
            findings,
            [
                "The `node` field of `PostEdge` must return a type that implements the `Node` interface, but `Post` doesn't.",
                "The `node` field of `NamedEdge` must return a type that implements the `Node` interface, but `Named` doesn't.",
                "The `node` field of `ActorEdge` returns the union `Actor`, whose member `Post` doesn't implement the `Node` interface.",
                "The `node` field of `ActorEdge` returns the union `Actor`, whose member `Group` doesn't implement the `Node` interface.",
            ]
        );
    }

    #[test]
    fn node_interface_is_optional() {
        let findings = check(indoc! {"
            type Query { a: Int }
            type Post { id: ID! }
            type PostEdge { node: Post cursor: String }
        "});
        assert_eq!(findings, Vec::<String>::new());
    }
}
