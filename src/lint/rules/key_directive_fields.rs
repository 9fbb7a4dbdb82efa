use super::super::{
    field_set::{FieldSet, FieldSetError},
    LintContext, LintRule,
};
use crate::schema::{Directive, Schema, TypeDefinition, TypeKind, Value};
use bumpalo::Bump;
use hashbrown::HashSet;

const KEY_DIRECTIVE: &str = "key";
const FIELDS_ARGUMENT: &str = "fields";
const RESOLVABLE_ARGUMENT: &str = "resolvable";

/// Validate the field sets of `@key` directives on object types.
///
/// Every `@key(fields: "...")` must be a space separated field set that only selects fields the
/// type declares, and every selected field must be a scalar that's not wrapped in a list.
/// A type that's marked with `resolvable: false` must carry exactly one `@key`, and that key
/// must select every field of the type.
///
/// See [`LintRule`]
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyDirectiveFields;

impl LintRule for KeyDirectiveFields {
    fn name(&self) -> &str {
        "key-directive-fields"
    }

    fn description(&self) -> &str {
        "Validates the field sets selected by @key directives on object types."
    }

    fn run(&self, ctx: &mut LintContext, schema: &Schema) {
        let arena = Bump::new();
        for definition in schema.types().filter(|definition| definition.is_object()) {
            let keys: Vec<_> = definition
                .directives_named(KEY_DIRECTIVE)
                .map(|directive| {
                    let field_set = check_key(ctx, schema, definition, directive, &arena);
                    (directive, field_set)
                })
                .collect();
            check_unresolvable_key(ctx, definition, &keys);
        }
    }
}

/// Runs the checks of a single `@key` usage, stopping at the first one that fails to read the
/// field set. Returns the field set when it could be parsed.
fn check_key<'a>(
    ctx: &mut LintContext,
    schema: &Schema<'a>,
    definition: &TypeDefinition<'a>,
    directive: &Directive<'a>,
    arena: &'a Bump,
) -> Option<FieldSet<'a>> {
    let fields = match directive.argument(FIELDS_ARGUMENT) {
        Some(Value::String(fields)) => *fields,
        Some(value) => {
            ctx.report(
                directive.location,
                format!(
                    "The `fields` argument of the @key directive on `{}` must be a string, found {}.",
                    definition.name,
                    value.kind_name()
                ),
            );
            return None;
        }
        None => {
            ctx.report(
                directive.location,
                format!(
                    "The @key directive on `{}` is missing its `fields` argument.",
                    definition.name
                ),
            );
            return None;
        }
    };

    let field_set = match FieldSet::parse(arena, fields) {
        Ok(field_set) => field_set,
        Err(error @ FieldSetError::TopLevelComma(_)) => {
            ctx.report(
                directive.location,
                format!(
                    "The @key directive on `{}` has an invalid field set \"{}\": {}.",
                    definition.name, fields, error
                ),
            );
            return None;
        }
        Err(error) => {
            ctx.report(
                directive.location,
                format!(
                    "The @key directive on `{}` has a field set \"{}\" that can't be parsed: {}.",
                    definition.name, fields, error
                ),
            );
            return None;
        }
    };

    for name in field_set.field_names() {
        let field = match definition.get_field(name) {
            Some(field) => field,
            None => {
                ctx.report(
                    directive.location,
                    format!(
                        "The @key directive on `{}` selects the field `{}`, which doesn't exist on the type.",
                        definition.name, name
                    ),
                );
                continue;
            }
        };

        if field.field_type.is_list() {
            ctx.report(
                directive.location,
                format!(
                    "The @key directive on `{}` selects the field `{}` of list type `{}`, but key fields can't be lists.",
                    definition.name, name, field.field_type
                ),
            );
            continue;
        }

        let named_type = field.field_type.named_type();
        match schema.kind_of(named_type) {
            Some(TypeKind::Scalar) => {}
            Some(kind) => ctx.report(
                directive.location,
                format!(
                    "The @key directive on `{}` selects the field `{}` of type `{}`, which is {} but key fields must be scalars.",
                    definition.name, name, named_type, kind
                ),
            ),
            None => ctx.report(
                directive.location,
                format!(
                    "The @key directive on `{}` selects the field `{}` of unknown type `{}`.",
                    definition.name, name, named_type
                ),
            ),
        }
    }

    Some(field_set)
}

#[inline]
fn is_unresolvable(directive: &Directive) -> bool {
    directive
        .argument(RESOLVABLE_ARGUMENT)
        .and_then(Value::as_bool)
        == Some(false)
}

/// A type that can't be resolved through its key is only ever referenced, so its single key has
/// to identify the whole type.
fn check_unresolvable_key(
    ctx: &mut LintContext,
    definition: &TypeDefinition,
    keys: &[(&Directive, Option<FieldSet>)],
) {
    if !keys.iter().any(|(directive, _)| is_unresolvable(directive)) {
        return;
    }

    if keys.len() > 1 {
        ctx.report(
            definition.location,
            format!(
                "The type `{}` has a @key directive with `resolvable: false` and must only have one @key directive, but has {}.",
                definition.name,
                keys.len()
            ),
        );
        return;
    }

    let field_set = match keys.first() {
        Some((_, Some(field_set))) => field_set,
        _ => return,
    };

    let selected: HashSet<&str> = field_set.field_names().collect();
    let mut missing: Vec<&str> = definition
        .fields
        .iter()
        .map(|field| field.name)
        .filter(|name| !selected.contains(name))
        .collect();
    if missing.is_empty() {
        return;
    }

    missing.sort_unstable();
    ctx.report(
        definition.location,
        format!(
            "The @key directive with `resolvable: false` on `{}` must select every field of the type, but is missing: {}.",
            definition.name,
            missing.join(", ")
        ),
    );
}

#[cfg(test)]
mod tests {
    use super::super::super::tests::{check_sdl, messages};
    use super::*;
    use indoc::indoc;

    fn check(source: &str) -> Vec<String> {
        messages(&check_sdl(&KeyDirectiveFields, source))
            .into_iter()
            .map(String::from)
            .collect()
    }

    const PREAMBLE: &str = indoc! {"
        scalar FieldSet
        directive @key(fields: FieldSet!, resolvable: Boolean = true) repeatable on OBJECT | INTERFACE
        type Query { users: [User] }
    "};

    fn with_user(user: &str) -> String {
        format!("{}{}", PREAMBLE, user)
    }

    #[test]
    fn valid_keys() {
        let source = with_user(indoc! {r#"
            type User @key(fields: "id") @key(fields: "id name") @key(fields: "  name\n id ") {
              id: ID!
              name: String
              org: Org
            }
            type Org { id: ID! name: String }
        "#});
        assert_eq!(check(&source), Vec::<String>::new());
    }

    #[test]
    fn field_separators() {
        let source = with_user(indoc! {r#"
            type User @key(fields: "id, name") @key(fields: "org { id, name }") @key(fields: "name, org { id }") {
              id: ID!
              name: String
              org: Org
            }
            type Org { id: ID! name: String }
        "#});
        assert_eq!(
            check(&source),
            [
                "The @key directive on `User` has an invalid field set \"id, name\": fields must be separated by spaces, found a comma at offset 2.",
                "The @key directive on `User` selects the field `org` of type `Org`, which is OBJECT but key fields must be scalars.",
                "The @key directive on `User` has an invalid field set \"name, org { id }\": fields must be separated by spaces, found a comma at offset 4.",
            ]
        );
    }

    #[test]
    fn missing_fields() {
        let source = with_user(indoc! {r#"
            type User @key(fields: "id missing") @key(fields: "id name") {
              id: ID
              name: String
            }
        "#});
        assert_eq!(
            check(&source),
            ["The @key directive on `User` selects the field `missing`, which doesn't exist on the type."]
        );
    }

    #[test]
    fn scalar_fields_only() {
        let source = with_user(indoc! {r#"
            type User @key(fields: "profile") @key(fields: "role") @key(fields: "uuid") {
              profile: Profile
              role: Role
              uuid: UUID
            }
            type Profile { id: ID }
            enum Role { ADMIN }
            scalar UUID
        "#});
        assert_eq!(
            check(&source),
            [
                "The @key directive on `User` selects the field `profile` of type `Profile`, which is OBJECT but key fields must be scalars.",
                "The @key directive on `User` selects the field `role` of type `Role`, which is ENUM but key fields must be scalars.",
            ]
        );
    }

    #[test]
    fn list_fields() {
        let source = with_user(indoc! {r#"
            type User @key(fields: "ids") @key(fields: "profiles") {
              ids: [[ID!]]!
              profiles: [Profile]
            }
            type Profile { id: ID }
        "#});
        assert_eq!(
            check(&source),
            [
                "The @key directive on `User` selects the field `ids` of list type `[[ID!]]!`, but key fields can't be lists.",
                "The @key directive on `User` selects the field `profiles` of list type `[Profile]`, but key fields can't be lists.",
            ]
        );
    }

    #[test]
    fn malformed_arguments() {
        let source = with_user(indoc! {r#"
            type User @key @key(fields: 1) @key(fields: "id {") @key(fields: "") {
              id: ID
            }
        "#});
        let findings = check(&source);
        assert_eq!(findings.len(), 4);
        assert_eq!(
            findings[0],
            "The @key directive on `User` is missing its `fields` argument."
        );
        assert_eq!(
            findings[1],
            "The `fields` argument of the @key directive on `User` must be a string, found int."
        );
        assert!(findings[2].starts_with("The @key directive on `User` has a field set \"id {\" that can't be parsed"));
        assert_eq!(
            findings[3],
            "The @key directive on `User` has a field set \"\" that can't be parsed: the field set selects no fields."
        );
    }

    #[test]
    fn deeply_nested_field_set() {
        for closing in ["", " }"] {
            let fields = format!("id a {{ {}b{}", "a { ".repeat(10_000), closing.repeat(10_001));
            let source = with_user(&format!(
                "type User @key(fields: \"{}\") {{\n  id: ID\n  a: User\n}}\n",
                fields
            ));
            let findings = check(&source);
            assert_eq!(findings.len(), 1);
            assert!(findings[0].ends_with(
                "that can't be parsed: the field set is nested too deeply, at most 64 levels are supported."
            ));
        }
    }

    #[test]
    fn only_object_types() {
        let source = with_user(indoc! {r#"
            type User { id: ID }
            interface Entity @key(fields: "missing") { id: ID }
        "#});
        assert_eq!(check(&source), Vec::<String>::new());
    }

    #[test]
    fn unresolvable_key_must_be_exclusive() {
        let source = with_user(indoc! {r#"
            type User @key(fields: "id", resolvable: false) @key(fields: "id") {
              id: ID
            }
        "#});
        assert_eq!(
            check(&source),
            ["The type `User` has a @key directive with `resolvable: false` and must only have one @key directive, but has 2."]
        );
    }

    #[test]
    fn unresolvable_key_must_cover_fields() {
        let source = with_user(indoc! {r#"
            type User @key(fields: "id", resolvable: false) {
              id: ID
              zip: String
              name: String
            }
        "#});
        let findings = check_sdl(&KeyDirectiveFields, &source);
        assert_eq!(
            messages(&findings),
            ["The @key directive with `resolvable: false` on `User` must select every field of the type, but is missing: name, zip."]
        );
        assert_eq!(findings[0].location.line, 4);
        assert_eq!(findings[0].location.column, 6);

        let source = with_user(indoc! {r#"
            type User @key(fields: "zip id name", resolvable: false) {
              id: ID
              zip: String
              name: String
            }
        "#});
        assert_eq!(check(&source), Vec::<String>::new());
    }

    #[test]
    fn coverage_runs_after_field_errors() {
        let source = with_user(indoc! {r#"
            type User @key(fields: "id other", resolvable: false) {
              id: ID
              name: String
            }
        "#});
        assert_eq!(
            check(&source),
            [
                "The @key directive on `User` selects the field `other`, which doesn't exist on the type.",
                "The @key directive with `resolvable: false` on `User` must select every field of the type, but is missing: name.",
            ]
        );

        let source = with_user(indoc! {r#"
            type User @key(fields: "id, name", resolvable: false) {
              id: ID
              name: String
            }
        "#});
        assert_eq!(check(&source).len(), 1);
    }
}
