use super::super::super::{LintContext, LintRule};
use super::PAGE_INFO_TYPE;
use crate::schema::{Schema, TypeRef};

/// Validate that a `PageInfo` type, if the schema declares one, has the fields Relay expects.
///
/// `hasPreviousPage` and `hasNextPage` must be `Boolean!`, `startCursor` and `endCursor` must
/// be `String` or `String!`. Any other field is allowed.
///
/// See [`LintRule`]
/// [Reference](https://relay.dev/graphql/connections.htm#sec-undefined.PageInfo)
#[derive(Debug, Default, Clone, Copy)]
pub struct RelayPageInfo;

const BOOLEAN_FIELDS: [&str; 2] = ["hasPreviousPage", "hasNextPage"];
const CURSOR_FIELDS: [&str; 2] = ["startCursor", "endCursor"];

impl LintRule for RelayPageInfo {
    fn name(&self) -> &str {
        "relay-page-info-spec"
    }

    fn description(&self) -> &str {
        "Validates the fields of the PageInfo type."
    }

    fn run(&self, ctx: &mut LintContext, schema: &Schema) {
        let page_info = match schema.get_type(PAGE_INFO_TYPE) {
            Some(page_info) => page_info,
            None => return,
        };

        if !page_info.is_object() {
            ctx.report(
                page_info.location,
                format!(
                    "`PageInfo` must be an object type, found {}.",
                    page_info.kind
                ),
            );
            return;
        }

        for name in BOOLEAN_FIELDS {
            let field = page_info.get_field(name);
            let is_valid = field.map_or(false, |field| {
                *field.field_type == TypeRef::NonNull(&TypeRef::Named("Boolean"))
            });
            if !is_valid {
                ctx.report(
                    field.map_or(page_info.location, |field| field.location),
                    format!("`PageInfo` must have a `{}` field of type `Boolean!`.", name),
                );
            }
        }

        for name in CURSOR_FIELDS {
            let field = page_info.get_field(name);
            let is_valid = field.map_or(false, |field| {
                *field.field_type.nullable() == TypeRef::Named("String")
            });
            if !is_valid {
                ctx.report(
                    field.map_or(page_info.location, |field| field.location),
                    format!(
                        "`PageInfo` must have a `{}` field of type `String` or `String!`.",
                        name
                    ),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::super::super::tests::{check_sdl, messages};
    use super::*;
    use indoc::indoc;

    #[test]
    fn valid_page_info() {
        let findings = check_sdl(
            &RelayPageInfo,
            indoc! {"
                type Query { a: Int }
                type PageInfo {
                  hasPreviousPage: Boolean!
                  hasNextPage: Boolean!
                  startCursor: String
                  endCursor: String!
                  totalPages: Int
                }
            "},
        );
        assert!(findings.is_empty(), "{:?}", findings);
    }

    #[test]
    fn absent_page_info() {
        assert!(check_sdl(&RelayPageInfo, "type Query { a: Int }").is_empty());
    }

    #[test]
    fn must_be_object() {
        let findings = check_sdl(&RelayPageInfo, "type Query { a: Int } scalar PageInfo");
        assert_eq!(
            messages(&findings),
            ["`PageInfo` must be an object type, found SCALAR."]
        );
    }

    #[test]
    fn invalid_fields() {
        let findings = check_sdl(
            &RelayPageInfo,
            indoc! {"
                type Query { a: Int }
                type PageInfo {
                  hasPreviousPage: Boolean
                  startCursor: [String]
                  endCursor: ID
                }
            "},
        );
        assert_eq!(
            messages(&findings),
            [
                "`PageInfo` must have a `hasPreviousPage` field of type `Boolean!`.",
                "`PageInfo` must have a `hasNextPage` field of type `Boolean!`.",
                "`PageInfo` must have a `startCursor` field of type `String` or `String!`.",
                "`PageInfo` must have a `endCursor` field of type `String` or `String!`.",
            ]
        );
        assert_eq!(findings[0].location.line, 3);
        assert_eq!(findings[1].location.line, 2);
    }
}
