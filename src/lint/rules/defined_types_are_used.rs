use super::super::{LintContext, LintRule};
use crate::schema::{is_builtin_scalar, Schema, BUILTIN_SCALARS};
use hashbrown::HashSet;
use std::collections::VecDeque;

/// Validate that every type a schema defines can be reached from one of its root operation
/// types.
///
/// Types are reachable through field types, field argument types, implemented interfaces,
/// union members and the argument types of directive definitions. An object type that only
/// implements a reachable interface isn't reachable itself.
///
/// See [`LintRule`]
#[derive(Debug, Default, Clone, Copy)]
pub struct DefinedTypesAreUsed;

impl LintRule for DefinedTypesAreUsed {
    fn name(&self) -> &str {
        "defined-types-are-used"
    }

    fn description(&self) -> &str {
        "Reports types that aren't reachable from the schema's root operation types."
    }

    fn run(&self, ctx: &mut LintContext, schema: &Schema) {
        let used = used_types(schema);
        for definition in schema.types() {
            if is_builtin_scalar(definition.name) || used.contains(definition.name) {
                continue;
            }
            ctx.report(
                definition.location,
                format!(
                    "The type `{}` is defined in the schema but not used anywhere.",
                    definition.name
                ),
            );
        }
    }
}

/// Computes the names of all types reachable from the schema's root operation types, the
/// built-in scalars and the argument types of directive definitions.
pub fn used_types<'a>(schema: &Schema<'a>) -> HashSet<&'a str> {
    let mut used = HashSet::new();
    let mut queue = VecDeque::new();

    let mut seeds: Vec<&'a str> = schema.root_types().collect();
    seeds.extend_from_slice(&BUILTIN_SCALARS);
    seeds.extend(
        schema
            .directive_definitions()
            .flat_map(|directive| directive.arguments.iter())
            .map(|argument| argument.value_type.named_type()),
    );
    for name in seeds {
        if used.insert(name) {
            queue.push_back(name);
        }
    }

    while let Some(name) = queue.pop_front() {
        let definition = match schema.get_type(name) {
            Some(definition) => definition,
            None => continue,
        };

        let references = definition
            .fields
            .iter()
            .flat_map(|field| {
                std::iter::once(field.field_type.named_type()).chain(
                    field
                        .arguments
                        .iter()
                        .map(|argument| argument.value_type.named_type()),
                )
            })
            .chain(definition.interfaces.iter().copied())
            .chain(definition.members.iter().copied());

        for reference in references {
            if used.insert(reference) {
                queue.push_back(reference);
            }
        }
    }

    used
}

#[cfg(test)]
mod tests {
    use super::super::super::tests::{check_sdl, messages};
    use super::*;
    use crate::schema::{ParseSdl, SchemaContext};
    use indoc::indoc;

    #[test]
    fn reports_orphans() {
        let findings = check_sdl(
            &DefinedTypesAreUsed,
            indoc! {"
                type Query { x: Int }
                type Orphan { y: String }
            "},
        );
        assert_eq!(
            messages(&findings),
            ["The type `Orphan` is defined in the schema but not used anywhere."]
        );
        assert_eq!(findings[0].rule, "defined-types-are-used");
        assert_eq!(findings[0].location.line, 2);
        assert_eq!(findings[0].location.column, 6);
    }

    #[test]
    fn roots_are_exempt() {
        let findings = check_sdl(
            &DefinedTypesAreUsed,
            indoc! {"
                schema { query: Root, mutation: Actions, subscription: Events }
                type Root { a: Int }
                type Actions { b: Int }
                type Events { c: Int }
            "},
        );
        assert!(findings.is_empty());
    }

    #[test]
    fn follows_every_reference() {
        let findings = check_sdl(
            &DefinedTypesAreUsed,
            indoc! {"
                directive @cache(scope: CacheScope) on FIELD_DEFINITION
                enum CacheScope { PUBLIC PRIVATE }

                interface Node { id: ID! }
                type Query { search(filter: Filter): [Result!]! node: Node }
                input Filter { nested: NestedFilter }
                input NestedFilter { term: String }
                union Result = User | Post
                type User implements Node { id: ID! avatar: Image }
                type Post { id: ID! }
                type Image { url: Url }
                scalar Url
            "},
        );
        assert!(findings.is_empty(), "{:?}", findings);
    }

    #[test]
    fn unreachable_cycles_and_implementations() {
        let findings = check_sdl(
            &DefinedTypesAreUsed,
            indoc! {"
                interface Node { id: ID! }
                type Query { node: Node }
                type Implementation implements Node { id: ID! }
                type A { b: B }
                type B { a: A }
            "},
        );
        assert_eq!(
            messages(&findings),
            [
                "The type `Implementation` is defined in the schema but not used anywhere.",
                "The type `A` is defined in the schema but not used anywhere.",
                "The type `B` is defined in the schema but not used anywhere.",
            ]
        );
    }

    #[test]
    fn no_roots() {
        let findings = check_sdl(&DefinedTypesAreUsed, "type A { a: Int } scalar Date");
        assert_eq!(findings.len(), 2);
    }

    #[test]
    fn repeated_runs_are_stable() {
        let ctx = SchemaContext::new();
        let schema = Schema::parse(
            &ctx,
            "type Query { a: A } type A { id: ID } type Orphan { id: ID }",
        )
        .unwrap();
        assert_eq!(used_types(schema), used_types(schema));
        assert_eq!(
            DefinedTypesAreUsed.check(schema),
            DefinedTypesAreUsed.check(schema)
        );
        assert!(used_types(schema).contains("A"));
        assert!(!used_types(schema).contains("Orphan"));
    }

    #[test]
    fn referencing_an_orphan_makes_it_used() {
        let before = check_sdl(
            &DefinedTypesAreUsed,
            "type Query { a: A } type A { id: ID } type T { id: ID }",
        );
        assert_eq!(before.len(), 1);

        let after = check_sdl(
            &DefinedTypesAreUsed,
            "type Query { a: A } type A { id: ID t: T } type T { id: ID }",
        );
        assert!(after.is_empty());
    }
}
