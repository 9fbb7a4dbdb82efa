use super::context::{DefaultIn, SchemaContext};
use super::type_ref::TypeRef;
use crate::error::Location;
use bumpalo::collections::Vec;
use bumpalo::Bump;
use hashbrown::hash_map::DefaultHashBuilder;
use hashbrown::HashMap;
use std::fmt;

/// The scalars every GraphQL schema provides without declaring them.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Scalars.Built-in-Scalars)
pub const BUILTIN_SCALARS: [&str; 5] = ["String", "Int", "Float", "Boolean", "ID"];

/// Returns whether the given name refers to one of the [`BUILTIN_SCALARS`].
#[inline]
pub fn is_builtin_scalar(name: &str) -> bool {
    BUILTIN_SCALARS.contains(&name)
}

/// Schema Definition
///
/// A schema is the read-only model a lint run operates on. It holds every declared type in
/// declaration order, the directive definitions, and the names of the root operation types.
/// Built-in scalars aren't stored as declarations but are still resolvable through
/// [`Schema::kind_of`].
/// [Reference](https://spec.graphql.org/October2021/#sec-Schema)
#[derive(Debug, Clone)]
pub struct Schema<'a> {
    pub(crate) source_name: Option<&'a str>,
    pub(crate) query_type: Option<&'a str>,
    pub(crate) mutation_type: Option<&'a str>,
    pub(crate) subscription_type: Option<&'a str>,
    pub(crate) types: Vec<'a, &'a TypeDefinition<'a>>,
    pub(crate) type_index: HashMap<&'a str, &'a TypeDefinition<'a>, DefaultHashBuilder, &'a Bump>,
    pub(crate) directives: Vec<'a, &'a DirectiveDefinition<'a>>,
}

impl<'a> DefaultIn<'a> for Schema<'a> {
    fn default_in(arena: &'a Bump) -> Self {
        Schema {
            source_name: None,
            query_type: None,
            mutation_type: None,
            subscription_type: None,
            types: Vec::new_in(arena),
            type_index: HashMap::new_in(arena),
            directives: Vec::new_in(arena),
        }
    }
}

impl<'a> Schema<'a> {
    /// Create an empty schema whose collections live in the given context.
    #[inline]
    pub fn new(ctx: &'a SchemaContext) -> Self {
        Schema::default_in(&ctx.arena)
    }

    /// Returns whether the schema declares no types and no root operation types.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
            && self.query_type.is_none()
            && self.mutation_type.is_none()
            && self.subscription_type.is_none()
    }

    /// Returns the name of the document this schema was loaded from, if known.
    #[inline]
    pub fn source_name(&self) -> Option<&'a str> {
        self.source_name
    }

    /// Sets the name of the document this schema was loaded from.
    #[inline]
    pub fn set_source_name(&mut self, name: &'a str) {
        self.source_name = Some(name);
    }

    /// Returns the name of the root type for query operations
    #[inline]
    pub fn query_type(&self) -> Option<&'a str> {
        self.query_type
    }

    /// Returns the name of the root type for mutation operations
    #[inline]
    pub fn mutation_type(&self) -> Option<&'a str> {
        self.mutation_type
    }

    /// Returns the name of the root type for subscription operations
    #[inline]
    pub fn subscription_type(&self) -> Option<&'a str> {
        self.subscription_type
    }

    /// Returns the root type name for the passed operation kind
    #[inline]
    pub fn get_root_type(&self, operation_kind: OperationKind) -> Option<&'a str> {
        match operation_kind {
            OperationKind::Query => self.query_type,
            OperationKind::Mutation => self.mutation_type,
            OperationKind::Subscription => self.subscription_type,
        }
    }

    /// Sets the root type name for the passed operation kind
    pub fn set_root_type(&mut self, operation_kind: OperationKind, name: &'a str) {
        match operation_kind {
            OperationKind::Query => self.query_type = Some(name),
            OperationKind::Mutation => self.mutation_type = Some(name),
            OperationKind::Subscription => self.subscription_type = Some(name),
        }
    }

    /// Iterates the names of all root operation types that are set, in query, mutation,
    /// subscription order.
    pub fn root_types(&self) -> impl Iterator<Item = &'a str> + '_ {
        OperationKind::ALL
            .into_iter()
            .filter_map(|operation_kind| self.get_root_type(operation_kind))
    }

    /// Adds a type definition. Returns `false` and leaves the schema unchanged when a type of
    /// the same name was already added.
    pub fn add_type(&mut self, definition: &'a TypeDefinition<'a>) -> bool {
        if self.type_index.contains_key(definition.name) {
            return false;
        }
        self.type_index.insert(definition.name, definition);
        self.types.push(definition);
        true
    }

    /// Adds a directive definition.
    pub fn add_directive_definition(&mut self, definition: &'a DirectiveDefinition<'a>) {
        self.directives.push(definition);
    }

    /// Iterates all declared types in declaration order.
    #[inline]
    pub fn types(&self) -> impl Iterator<Item = &'a TypeDefinition<'a>> + '_ {
        self.types.iter().copied()
    }

    /// Iterates all directive definitions in declaration order.
    #[inline]
    pub fn directive_definitions(&self) -> impl Iterator<Item = &'a DirectiveDefinition<'a>> + '_ {
        self.directives.iter().copied()
    }

    /// Retrieves a declared type by name.
    #[inline]
    pub fn get_type(&self, name: &str) -> Option<&'a TypeDefinition<'a>> {
        self.type_index.get(name).copied()
    }

    /// Resolves the kind of a type name, treating undeclared built-in scalars as scalars.
    pub fn kind_of(&self, name: &str) -> Option<TypeKind> {
        match self.get_type(name) {
            Some(definition) => Some(definition.kind),
            None if is_builtin_scalar(name) => Some(TypeKind::Scalar),
            None => None,
        }
    }

    /// Returns whether the type name is known to the schema, either declared or built in.
    #[inline]
    pub fn has_type(&self, name: &str) -> bool {
        self.kind_of(name).is_some()
    }

    /// Returns whether the named type lists `interface` among the interfaces it implements.
    pub fn implements_interface(&self, name: &str, interface: &str) -> bool {
        self.get_type(name)
            .map_or(false, |definition| definition.implements_interface(interface))
    }
}

/// The operation kind a root type serves.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

impl OperationKind {
    /// Every operation kind, in the order root types are declared in a schema definition.
    pub const ALL: [OperationKind; 3] = [
        OperationKind::Query,
        OperationKind::Mutation,
        OperationKind::Subscription,
    ];

    /// Returns the conventional root type name used when no schema definition is present.
    pub fn default_type_name(&self) -> &'static str {
        match self {
            OperationKind::Query => "Query",
            OperationKind::Mutation => "Mutation",
            OperationKind::Subscription => "Subscription",
        }
    }
}

/// The kind of a named type definition.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Types)
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum TypeKind {
    Object,
    Interface,
    Union,
    Enum,
    Scalar,
    InputObject,
}

impl TypeKind {
    /// Returns whether values of this kind may be returned by fields.
    #[inline]
    pub fn is_output_type(&self) -> bool {
        !matches!(self, TypeKind::InputObject)
    }

    /// Returns whether values of this kind may be passed as arguments or input fields.
    #[inline]
    pub fn is_input_type(&self) -> bool {
        matches!(
            self,
            TypeKind::Scalar | TypeKind::Enum | TypeKind::InputObject
        )
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeKind::Object => "OBJECT",
            TypeKind::Interface => "INTERFACE",
            TypeKind::Union => "UNION",
            TypeKind::Enum => "ENUM",
            TypeKind::Scalar => "SCALAR",
            TypeKind::InputObject => "INPUT_OBJECT",
        };
        f.write_str(name)
    }
}

/// A named type definition.
///
/// Fields are only populated for objects, interfaces and input objects, implemented interfaces
/// only for objects and interfaces, members only for unions and values only for enums.
/// A definition is never mutated once it's been added to a [Schema].
#[derive(Debug, Clone)]
pub struct TypeDefinition<'a> {
    pub kind: TypeKind,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub fields: Vec<'a, FieldDefinition<'a>>,
    pub directives: Vec<'a, Directive<'a>>,
    pub interfaces: Vec<'a, &'a str>,
    pub members: Vec<'a, &'a str>,
    pub values: Vec<'a, EnumValueDefinition<'a>>,
    pub location: Location,
}

impl<'a> TypeDefinition<'a> {
    #[inline]
    pub fn new(ctx: &'a SchemaContext, kind: TypeKind, name: &'a str) -> Self {
        TypeDefinition {
            kind,
            name,
            description: None,
            fields: Vec::new_in(&ctx.arena),
            directives: Vec::new_in(&ctx.arena),
            interfaces: Vec::new_in(&ctx.arena),
            members: Vec::new_in(&ctx.arena),
            values: Vec::new_in(&ctx.arena),
            location: Location::default(),
        }
    }

    #[inline]
    pub fn is_object(&self) -> bool {
        self.kind == TypeKind::Object
    }

    /// Get a field by name
    pub fn get_field(&self, name: &str) -> Option<&FieldDefinition<'a>> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Checks whether this type lists the given interface in its `implements` clause.
    #[inline]
    pub fn implements_interface(&self, interface: &str) -> bool {
        self.interfaces.iter().any(|name| *name == interface)
    }

    /// Iterates every usage of the named directive on this type.
    pub fn directives_named<'b>(
        &'b self,
        name: &'b str,
    ) -> impl Iterator<Item = &'b Directive<'a>> + 'b {
        self.directives
            .iter()
            .filter(move |directive| directive.name == name)
    }
}

/// A field definition on an object, interface, or input object type.
///
/// [Reference](https://spec.graphql.org/October2021/#FieldsDefinition)
#[derive(Debug, Clone)]
pub struct FieldDefinition<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub arguments: Vec<'a, InputValueDefinition<'a>>,
    pub field_type: &'a TypeRef<'a>,
    pub directives: Vec<'a, Directive<'a>>,
    pub location: Location,
}

impl<'a> FieldDefinition<'a> {
    #[inline]
    pub fn new(ctx: &'a SchemaContext, name: &'a str, field_type: &'a TypeRef<'a>) -> Self {
        FieldDefinition {
            name,
            description: None,
            arguments: Vec::new_in(&ctx.arena),
            field_type,
            directives: Vec::new_in(&ctx.arena),
            location: Location::default(),
        }
    }

    #[inline]
    pub fn get_argument(&self, name: &str) -> Option<&InputValueDefinition<'a>> {
        self.arguments.iter().find(|argument| argument.name == name)
    }
}

/// An argument definition on a field or directive definition.
///
/// [Reference](https://spec.graphql.org/October2021/#ArgumentsDefinition)
#[derive(Debug, Clone)]
pub struct InputValueDefinition<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub value_type: &'a TypeRef<'a>,
    pub default_value: Option<Value<'a>>,
    pub directives: Vec<'a, Directive<'a>>,
    pub location: Location,
}

impl<'a> InputValueDefinition<'a> {
    #[inline]
    pub fn new(ctx: &'a SchemaContext, name: &'a str, value_type: &'a TypeRef<'a>) -> Self {
        InputValueDefinition {
            name,
            description: None,
            value_type,
            default_value: None,
            directives: Vec::new_in(&ctx.arena),
            location: Location::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EnumValueDefinition<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub directives: Vec<'a, Directive<'a>>,
    pub location: Location,
}

/// A directive definition, e.g. `directive @key(fields: String!) repeatable on OBJECT`.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Type-System.Directives)
#[derive(Debug, Clone)]
pub struct DirectiveDefinition<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub arguments: Vec<'a, InputValueDefinition<'a>>,
    pub is_repeatable: bool,
    pub locations: Vec<'a, &'a str>,
    pub location: Location,
}

/// A directive usage on a type, field, argument or enum value.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Language.Directives)
#[derive(Debug, Clone)]
pub struct Directive<'a> {
    pub name: &'a str,
    pub arguments: Vec<'a, Argument<'a>>,
    pub location: Location,
}

impl<'a> Directive<'a> {
    #[inline]
    pub fn new(ctx: &'a SchemaContext, name: &'a str) -> Self {
        Directive {
            name,
            arguments: Vec::new_in(&ctx.arena),
            location: Location::default(),
        }
    }

    /// Returns the value passed for the named argument, if present.
    pub fn argument(&self, name: &str) -> Option<&Value<'a>> {
        self.arguments
            .iter()
            .find(|argument| argument.name == name)
            .map(|argument| &argument.value)
    }
}

#[derive(Debug, Clone)]
pub struct Argument<'a> {
    pub name: &'a str,
    pub value: Value<'a>,
    pub location: Location,
}

/// A constant value as written in a directive argument or default value.
///
/// Values are self-describing; numbers are kept as written in the source.
/// [Reference](https://spec.graphql.org/October2021/#sec-Input-Values)
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    String(&'a str),
    Boolean(bool),
    Int(&'a str),
    Float(&'a str),
    Enum(&'a str),
    List(Vec<'a, Value<'a>>),
    Object(Vec<'a, (&'a str, Value<'a>)>),
    Null,
}

impl<'a> Value<'a> {
    #[inline]
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::String(value) => Some(*value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the name of this value's kind, as used in messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Boolean(_) => "boolean",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Enum(_) => "enum",
            Value::List(_) => "list",
            Value::Object(_) => "object",
            Value::Null => "null",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_schema() {
        let ctx = SchemaContext::new();
        let id = ctx.alloc(TypeRef::Named("ID"));
        let mut user = TypeDefinition::new(&ctx, TypeKind::Object, "User");
        user.fields.push(FieldDefinition::new(&ctx, "id", id));
        user.interfaces.push("Node");

        let mut schema = Schema::new(&ctx);
        assert!(schema.is_empty());
        assert!(schema.add_type(ctx.alloc(user)));
        assert!(!schema.add_type(ctx.alloc(TypeDefinition::new(
            &ctx,
            TypeKind::Scalar,
            "User"
        ))));
        schema.set_root_type(OperationKind::Query, "User");

        assert_eq!(schema.types().count(), 1);
        assert_eq!(schema.kind_of("User"), Some(TypeKind::Object));
        assert_eq!(schema.kind_of("Boolean"), Some(TypeKind::Scalar));
        assert_eq!(schema.kind_of("Missing"), None);
        assert!(schema.implements_interface("User", "Node"));
        assert_eq!(schema.root_types().collect::<std::vec::Vec<_>>(), ["User"]);
        assert_eq!(schema.get_root_type(OperationKind::Query), Some("User"));
        assert_eq!(schema.get_root_type(OperationKind::Mutation), None);
        assert!(schema
            .get_type("User")
            .and_then(|user| user.get_field("id"))
            .is_some());
    }

    #[test]
    fn directive_arguments() {
        let ctx = SchemaContext::new();
        let mut directive = Directive::new(&ctx, "key");
        directive.arguments.push(Argument {
            name: "fields",
            value: Value::String("id"),
            location: Location::default(),
        });
        directive.arguments.push(Argument {
            name: "resolvable",
            value: Value::Boolean(false),
            location: Location::default(),
        });

        assert_eq!(directive.argument("fields").and_then(Value::as_str), Some("id"));
        assert_eq!(
            directive.argument("resolvable").and_then(Value::as_bool),
            Some(false)
        );
        assert_eq!(directive.argument("other"), None);
        assert_eq!(TypeKind::InputObject.to_string(), "INPUT_OBJECT");
    }
}
