use super::error::{syntax, syntax_err, validation, SchemaError};
use super::lexer::{next_token, Extras, Token};
use crate::{
    error::{print_span, Error, ErrorType, LineIndex, Location, Result},
    schema::{
        Argument, DefaultIn, Directive, DirectiveDefinition, EnumValueDefinition, FieldDefinition,
        InputValueDefinition, OperationKind, Schema, SchemaContext, TypeDefinition, TypeKind,
        TypeRef, Value,
    },
};
use bumpalo::collections::Vec;
use logos::{Lexer, Logos, Span};

pub type ParseResult<T> = std::result::Result<T, SchemaError>;

pub(crate) mod private {
    use super::*;

    /// Private Parser context state that's kept to keep track of the current parser's progress and
    /// state. This contains the schema context and a [Lexer].
    pub struct ParserContext<'a> {
        pub(crate) ctx: &'a SchemaContext,
        pub(crate) peek: Option<(Token<'a>, Span)>,
        pub(crate) iter: Lexer<'a, Token<'a>>,
        pub(crate) last: Span,
        pub(crate) lines: LineIndex,
    }

    impl<'a> ParserContext<'a> {
        /// Create a new Parser context for a given schema context and initialize it with an input
        /// source string to parse from.
        pub(crate) fn new(ctx: &'a SchemaContext, source: &'a str) -> Self {
            let extras = Extras { arena: &ctx.arena };
            ParserContext {
                ctx,
                peek: None,
                iter: Token::lexer_with_extras(source, extras),
                last: 0..0,
                lines: LineIndex::new(source),
            }
        }

        #[inline]
        pub(crate) fn next(&mut self) -> Token<'a> {
            let (token, span) = match self.peek.take() {
                Some(peeked) => peeked,
                None => next_token(&mut self.iter),
            };
            self.last = span;
            token
        }

        #[inline]
        pub(crate) fn peek(&mut self) -> &Token<'a> {
            let iter = &mut self.iter;
            &self.peek.get_or_insert_with(|| next_token(iter)).0
        }

        #[inline]
        pub(crate) fn source(&self) -> &'a str {
            self.iter.source()
        }

        /// The span of the token the parser is looking at, which is where errors are reported.
        #[inline]
        pub(crate) fn span(&self) -> Span {
            match self.peek {
                Some((_, ref span)) => span.clone(),
                None => self.last.clone(),
            }
        }

        /// The location of the most recently consumed token.
        #[inline]
        pub(crate) fn location(&self) -> Location {
            self.lines.location(self.source(), self.last.start)
        }

        pub(crate) fn expect(&mut self, expected: Token<'a>, display: &str) -> ParseResult<()> {
            match self.next() {
                token if token == expected => Ok(()),
                t => syntax_err!("Expected `{}`, got {:?}", display, t),
            }
        }

        /// Consumes a name and returns it together with its location.
        pub(crate) fn name(&mut self, what: &str) -> ParseResult<(&'a str, Location)> {
            match self.next() {
                Token::Name(name) => Ok((name, self.location())),
                t => syntax_err!("Expected {}, got {:?}", what, t),
            }
        }

        /// Consumes an optional leading description string.
        pub(crate) fn description(&mut self) -> Option<&'a str> {
            let token = *self.peek();
            match token {
                Token::String(description) => {
                    self.next();
                    Some(description)
                }
                _ => None,
            }
        }

        pub(crate) fn get_implements_interfaces(&mut self) -> ParseResult<Vec<'a, &'a str>> {
            let mut interfaces = Vec::new_in(&self.ctx.arena);
            if self.peek() == &Token::Name("implements") {
                // Skip `implements`
                self.next();

                // Skip optional leading `&`
                if self.peek() == &Token::Ampersand {
                    self.next();
                }

                interfaces.push(self.name("interface name")?.0);
                while self.peek() == &Token::Ampersand {
                    self.next();
                    interfaces.push(self.name("interface name")?.0);
                }
            }

            Ok(interfaces)
        }

        pub(crate) fn get_directives(&mut self) -> ParseResult<Vec<'a, Directive<'a>>> {
            let mut directives = Vec::new_in(&self.ctx.arena);
            while let Token::DirectiveName(_) = self.peek() {
                directives.push(Directive::parse_from_ctx(self)?);
            }
            Ok(directives)
        }

        /// Parses an optional parenthesised list of argument definitions.
        pub(crate) fn get_argument_definitions(
            &mut self,
        ) -> ParseResult<Vec<'a, InputValueDefinition<'a>>> {
            let mut arguments = Vec::new_in(&self.ctx.arena);
            if self.peek() == &Token::ParenOpen {
                self.next();
                while !matches!(self.peek(), Token::ParenClose | Token::End) {
                    arguments.push(InputValueDefinition::parse_from_ctx(self)?);
                }
                self.expect(Token::ParenClose, ")")?;
            }
            Ok(arguments)
        }

        pub(crate) fn type_ref(&mut self) -> ParseResult<&'a TypeRef<'a>> {
            let type_ref = TypeRef::parse_from_ctx(self)?;
            Ok(self.ctx.alloc(type_ref))
        }
    }

    /// (Private) Trait for parsing SDL nodes from a Parser Context.
    /// The [`super::ParseSdl`] trait implements the public `parse` method instead.
    pub trait ParseFromCtx<'a>: Sized {
        fn parse_from_ctx(ctx: &mut ParserContext<'a>) -> ParseResult<Self>;
    }
}

use private::{ParseFromCtx, ParserContext};

impl<'a, T: private::ParseFromCtx<'a>> ParseSdl<'a> for T {}

/// Trait for parsing SDL nodes from source text using recursive descent and a lexer.
///
/// This trait is implemented by the schema model's nodes and can hence be used to granularly
/// parse GraphQL SDL. However, mostly this will be used via `Schema::parse`.
pub trait ParseSdl<'a>: private::ParseFromCtx<'a> {
    /// Parse an input source text into the implementor's node structure and allocate the
    /// resulting model into the context arena.
    fn parse<T: AsRef<str>>(ctx: &'a SchemaContext, source: T) -> Result<&'a Self> {
        let source = ctx.alloc_str(source.as_ref());
        let mut parser_ctx = ParserContext::new(ctx, source);
        match Self::parse_from_ctx(&mut parser_ctx) {
            Ok(value) => Ok(ctx.alloc(value)),
            Err(SchemaError::ValidationError(message)) => {
                Err(Error::new(message, Some(ErrorType::Schema)))
            }
            Err(error) => {
                let span = parser_ctx.span();
                let snippet = print_span(parser_ctx.source(), span.clone());
                let location = parser_ctx.lines.location(parser_ctx.source(), span.start);
                Err(Error::new_with_context(
                    error.to_string(),
                    Some(location),
                    snippet,
                    Some(ErrorType::Syntax),
                ))
            }
        }
    }
}

impl<'a> Schema<'a> {
    /// Parse a schema document and remember `name` as the source reported in findings.
    pub fn parse_with_name<N: AsRef<str>, T: AsRef<str>>(
        ctx: &'a SchemaContext,
        name: N,
        source: T,
    ) -> Result<&'a Schema<'a>> {
        let name = ctx.alloc_str(name.as_ref());
        let source = ctx.alloc_str(source.as_ref());
        let mut parser_ctx = ParserContext::new(ctx, source);
        let mut schema = match Schema::parse_from_ctx(&mut parser_ctx) {
            Ok(schema) => schema,
            Err(SchemaError::ValidationError(message)) => {
                return Err(Error::new(message, Some(ErrorType::Schema)))
            }
            Err(error) => {
                let span = parser_ctx.span();
                return Err(Error::new_with_context(
                    format!("{} in {}", error, name),
                    Some(parser_ctx.lines.location(source, span.start)),
                    print_span(source, span),
                    Some(ErrorType::Syntax),
                ));
            }
        };
        schema.set_source_name(name);
        Ok(ctx.alloc(schema))
    }
}

impl<'a> ParseFromCtx<'a> for Schema<'a> {
    fn parse_from_ctx(ctx: &mut ParserContext<'a>) -> ParseResult<Self> {
        let mut schema = Schema::default_in(&ctx.ctx.arena);
        let mut schema_def: Option<[Option<&'a str>; 3]> = None;
        loop {
            let description = ctx.description();
            let token = *ctx.peek();
            match token {
                Token::End if description.is_none() => break,
                Token::Name("schema") => {
                    if schema_def.is_some() {
                        return syntax_err!("Must not specify more than one Schema Definition.");
                    }
                    schema_def = Some(parse_schema_definition(ctx)?);
                }
                Token::Name("directive") => {
                    let definition = parse_directive_definition(ctx, description)?;
                    schema.add_directive_definition(ctx.ctx.alloc(definition));
                }
                Token::Name("extend") => {
                    return syntax_err!("Type system extensions are not supported.");
                }
                _ => {
                    let definition = parse_type_definition(ctx, description)?;
                    let location = definition.location;
                    let name = definition.name;
                    if !schema.add_type(ctx.ctx.alloc(definition)) {
                        return Err(validation!(
                            "Type `{}` at {} is defined more than once.",
                            name,
                            location
                        ));
                    }
                }
            }
        }

        validate_references(&schema)?;

        for (index, operation) in OperationKind::ALL.into_iter().enumerate() {
            let root_name = match schema_def {
                Some(names) => names[index],
                None => Some(operation.default_type_name()).filter(|name| schema.has_type(name)),
            };
            if let Some(root_name) = root_name {
                match schema.get_type(root_name) {
                    Some(definition) if definition.is_object() => {
                        schema.set_root_type(operation, definition.name)
                    }
                    Some(definition) => {
                        return Err(validation!(
                            "Root type `{}` must be an object type, found {}.",
                            root_name,
                            definition.kind
                        ))
                    }
                    None => {
                        return Err(validation!(
                            "Root type `{}` is not defined in the schema.",
                            root_name
                        ))
                    }
                }
            }
        }

        Ok(schema)
    }
}

/// Enforces the invariants the lint rules rely on: every referenced type exists, fields and
/// arguments use types of the right direction, interfaces and union members have the right kind.
fn validate_references<'a>(schema: &Schema<'a>) -> ParseResult<()> {
    let input_type = |type_ref: &TypeRef<'a>, owner: &str, location: Location| {
        let name = type_ref.named_type();
        match schema.kind_of(name) {
            Some(kind) if kind.is_input_type() => Ok(()),
            Some(kind) => Err(validation!(
                "`{}` at {} must be an input type, but `{}` is {}.",
                owner,
                location,
                name,
                kind
            )),
            None => Err(validation!(
                "`{}` at {} references unknown type `{}`.",
                owner,
                location,
                name
            )),
        }
    };

    for definition in schema.types() {
        for field in definition.fields.iter() {
            let owner = format!("{}.{}", definition.name, field.name);
            if definition.kind == TypeKind::InputObject {
                input_type(field.field_type, &owner, field.location)?;
                continue;
            }

            let name = field.field_type.named_type();
            match schema.kind_of(name) {
                Some(kind) if kind.is_output_type() => {}
                Some(kind) => {
                    return Err(validation!(
                        "`{}` at {} must be an output type, but `{}` is {}.",
                        owner,
                        field.location,
                        name,
                        kind
                    ))
                }
                None => {
                    return Err(validation!(
                        "`{}` at {} references unknown type `{}`.",
                        owner,
                        field.location,
                        name
                    ))
                }
            }

            for argument in field.arguments.iter() {
                let owner = format!("{}.{}({}:)", definition.name, field.name, argument.name);
                input_type(argument.value_type, &owner, argument.location)?;
            }
        }

        for interface in definition.interfaces.iter() {
            match schema.get_type(interface) {
                Some(implemented) if implemented.kind == TypeKind::Interface => {}
                _ => {
                    return Err(validation!(
                        "`{}` at {} implements `{}`, which is not a defined interface.",
                        definition.name,
                        definition.location,
                        interface
                    ))
                }
            }
        }

        for member in definition.members.iter() {
            match schema.get_type(member) {
                Some(member_type) if member_type.is_object() => {}
                _ => {
                    return Err(validation!(
                        "Union `{}` at {} includes `{}`, which is not a defined object type.",
                        definition.name,
                        definition.location,
                        member
                    ))
                }
            }
        }
    }

    for directive in schema.directive_definitions() {
        for argument in directive.arguments.iter() {
            let owner = format!("@{}({}:)", directive.name, argument.name);
            input_type(argument.value_type, &owner, argument.location)?;
        }
    }

    Ok(())
}

fn parse_schema_definition<'a>(
    ctx: &mut ParserContext<'a>,
) -> ParseResult<[Option<&'a str>; 3]> {
    if ctx.next() != Token::Name("schema") {
        return syntax_err!("Schema definition must start with the `schema` keyword.");
    }

    // Directives on the schema definition carry no information the rules use.
    ctx.get_directives()?;
    ctx.expect(Token::BraceOpen, "{")?;

    let mut names = [None; 3];
    while !matches!(ctx.peek(), Token::BraceClose | Token::End) {
        let index = match ctx.next() {
            Token::Name("query") => 0,
            Token::Name("mutation") => 1,
            Token::Name("subscription") => 2,
            t => return syntax_err!("Expected operation type, got {:?}", t),
        };

        ctx.expect(Token::Colon, ":")?;
        names[index] = Some(ctx.name("named type")?.0);
    }

    ctx.expect(Token::BraceClose, "}")?;
    Ok(names)
}

const DIRECTIVE_LOCATIONS: [&str; 19] = [
    "QUERY",
    "MUTATION",
    "SUBSCRIPTION",
    "FIELD",
    "FRAGMENT_DEFINITION",
    "FRAGMENT_SPREAD",
    "INLINE_FRAGMENT",
    "VARIABLE_DEFINITION",
    "SCHEMA",
    "SCALAR",
    "OBJECT",
    "FIELD_DEFINITION",
    "ARGUMENT_DEFINITION",
    "INTERFACE",
    "UNION",
    "ENUM",
    "ENUM_VALUE",
    "INPUT_OBJECT",
    "INPUT_FIELD_DEFINITION",
];

fn parse_directive_definition<'a>(
    ctx: &mut ParserContext<'a>,
    description: Option<&'a str>,
) -> ParseResult<DirectiveDefinition<'a>> {
    if ctx.next() != Token::Name("directive") {
        return syntax_err!("Directive definition must start with the `directive` keyword.");
    }

    let name = match ctx.next() {
        Token::DirectiveName(name) => name,
        t => return syntax_err!("Expected directive name, got {:?}", t),
    };
    let location = ctx.location();
    let arguments = ctx.get_argument_definitions()?;

    let is_repeatable = if ctx.peek() == &Token::Name("repeatable") {
        ctx.next();
        true
    } else {
        false
    };

    if ctx.next() != Token::Name("on") {
        return syntax_err!("Expected `on` followed by directive locations");
    }

    // Skip optional leading `|`
    if ctx.peek() == &Token::Pipe {
        ctx.next();
    }

    let mut locations = Vec::new_in(&ctx.ctx.arena);
    loop {
        match ctx.next() {
            Token::Name(location) if DIRECTIVE_LOCATIONS.contains(&location) => {
                locations.push(location)
            }
            t => return syntax_err!("Expected directive location, got {:?}", t),
        }

        if ctx.peek() == &Token::Pipe {
            ctx.next();
        } else {
            break;
        }
    }

    Ok(DirectiveDefinition {
        name,
        description,
        arguments,
        is_repeatable,
        locations,
        location,
    })
}

impl<'a> ParseFromCtx<'a> for DirectiveDefinition<'a> {
    #[inline]
    fn parse_from_ctx(ctx: &mut ParserContext<'a>) -> ParseResult<Self> {
        let description = ctx.description();
        parse_directive_definition(ctx, description)
    }
}

fn parse_type_definition<'a>(
    ctx: &mut ParserContext<'a>,
    description: Option<&'a str>,
) -> ParseResult<TypeDefinition<'a>> {
    let kind = match ctx.next() {
        Token::Name("type") => TypeKind::Object,
        Token::Name("interface") => TypeKind::Interface,
        Token::Name("union") => TypeKind::Union,
        Token::Name("enum") => TypeKind::Enum,
        Token::Name("scalar") => TypeKind::Scalar,
        Token::Name("input") => TypeKind::InputObject,
        t => return syntax_err!("Expected valid type definition, got {:?}.", t),
    };

    let (name, location) = ctx.name("type name")?;
    let mut definition = TypeDefinition::new(ctx.ctx, kind, name);
    definition.description = description;
    definition.location = location;

    if matches!(kind, TypeKind::Object | TypeKind::Interface) {
        definition.interfaces = ctx.get_implements_interfaces()?;
    }

    definition.directives = ctx.get_directives()?;

    match kind {
        TypeKind::Object | TypeKind::Interface => {
            if ctx.peek() == &Token::BraceOpen {
                ctx.next();
                while !matches!(ctx.peek(), Token::BraceClose | Token::End) {
                    let field = FieldDefinition::parse_from_ctx(ctx)?;
                    if definition.get_field(field.name).is_some() {
                        return syntax_err!("Field `{}.{}` is defined more than once.", name, field.name);
                    }
                    definition.fields.push(field);
                }
                ctx.expect(Token::BraceClose, "}")?;
            }
        }
        TypeKind::InputObject => {
            if ctx.peek() == &Token::BraceOpen {
                ctx.next();
                while !matches!(ctx.peek(), Token::BraceClose | Token::End) {
                    let input = InputValueDefinition::parse_from_ctx(ctx)?;
                    if definition.get_field(input.name).is_some() {
                        return syntax_err!("Field `{}.{}` is defined more than once.", name, input.name);
                    }
                    definition.fields.push(FieldDefinition {
                        name: input.name,
                        description: input.description,
                        arguments: Vec::new_in(&ctx.ctx.arena),
                        field_type: input.value_type,
                        directives: input.directives,
                        location: input.location,
                    });
                }
                ctx.expect(Token::BraceClose, "}")?;
            }
        }
        TypeKind::Union => {
            if ctx.peek() == &Token::Equal {
                // Skip `=`
                ctx.next();

                // Skip optional leading `|`
                if ctx.peek() == &Token::Pipe {
                    ctx.next();
                }

                definition.members.push(ctx.name("member type name")?.0);
                while ctx.peek() == &Token::Pipe {
                    ctx.next();
                    definition.members.push(ctx.name("member type name")?.0);
                }
            }
        }
        TypeKind::Enum => {
            if ctx.peek() == &Token::BraceOpen {
                ctx.next();
                while !matches!(ctx.peek(), Token::BraceClose | Token::End) {
                    definition.values.push(EnumValueDefinition::parse_from_ctx(ctx)?);
                }
                ctx.expect(Token::BraceClose, "}")?;
            }
        }
        TypeKind::Scalar => {}
    }

    Ok(definition)
}

impl<'a> ParseFromCtx<'a> for TypeDefinition<'a> {
    #[inline]
    fn parse_from_ctx(ctx: &mut ParserContext<'a>) -> ParseResult<Self> {
        let description = ctx.description();
        parse_type_definition(ctx, description)
    }
}

impl<'a> ParseFromCtx<'a> for FieldDefinition<'a> {
    fn parse_from_ctx(ctx: &mut ParserContext<'a>) -> ParseResult<Self> {
        let description = ctx.description();
        let (name, location) = ctx.name("field name")?;
        let arguments = ctx.get_argument_definitions()?;
        ctx.expect(Token::Colon, ":")?;
        let field_type = ctx.type_ref()?;
        let directives = ctx.get_directives()?;

        Ok(FieldDefinition {
            name,
            description,
            arguments,
            field_type,
            directives,
            location,
        })
    }
}

impl<'a> ParseFromCtx<'a> for InputValueDefinition<'a> {
    fn parse_from_ctx(ctx: &mut ParserContext<'a>) -> ParseResult<Self> {
        let description = ctx.description();
        let (name, location) = ctx.name("input value name")?;
        ctx.expect(Token::Colon, ":")?;
        let value_type = ctx.type_ref()?;

        let default_value = if ctx.peek() == &Token::Equal {
            ctx.next();
            Some(Value::parse_from_ctx(ctx)?)
        } else {
            None
        };

        let directives = ctx.get_directives()?;
        Ok(InputValueDefinition {
            name,
            description,
            value_type,
            default_value,
            directives,
            location,
        })
    }
}

impl<'a> ParseFromCtx<'a> for EnumValueDefinition<'a> {
    fn parse_from_ctx(ctx: &mut ParserContext<'a>) -> ParseResult<Self> {
        let description = ctx.description();
        let (name, location) = match ctx.next() {
            Token::Name("true" | "false" | "null") => {
                return syntax_err!("Enum values must not be named `true`, `false` or `null`.")
            }
            Token::Name(name) => (name, ctx.location()),
            t => return syntax_err!("Expected either closing brace or value name, got {:?}", t),
        };
        let directives = ctx.get_directives()?;

        Ok(EnumValueDefinition {
            name,
            description,
            directives,
            location,
        })
    }
}

impl<'a> ParseFromCtx<'a> for Directive<'a> {
    fn parse_from_ctx(ctx: &mut ParserContext<'a>) -> ParseResult<Self> {
        let name = match ctx.next() {
            Token::DirectiveName(name) => name,
            t => return syntax_err!("Expected directive, got {:?}", t),
        };
        let mut directive = Directive::new(ctx.ctx, name);
        directive.location = ctx.location();

        if ctx.peek() == &Token::ParenOpen {
            ctx.next();
            while !matches!(ctx.peek(), Token::ParenClose | Token::End) {
                let (name, location) = ctx.name("argument name")?;
                ctx.expect(Token::Colon, ":")?;
                let value = Value::parse_from_ctx(ctx)?;
                directive.arguments.push(Argument {
                    name,
                    value,
                    location,
                });
            }
            ctx.expect(Token::ParenClose, ")")?;
        }

        Ok(directive)
    }
}

impl<'a> ParseFromCtx<'a> for Value<'a> {
    fn parse_from_ctx(ctx: &mut ParserContext<'a>) -> ParseResult<Self> {
        match ctx.next() {
            Token::String(value) => Ok(Value::String(value)),
            Token::Integer(value) => Ok(Value::Int(value)),
            Token::Float(value) => Ok(Value::Float(value)),
            Token::Name("true") => Ok(Value::Boolean(true)),
            Token::Name("false") => Ok(Value::Boolean(false)),
            Token::Name("null") => Ok(Value::Null),
            Token::Name(value) => Ok(Value::Enum(value)),
            Token::BracketOpen => {
                let mut values = Vec::new_in(&ctx.ctx.arena);
                while !matches!(ctx.peek(), Token::BracketClose | Token::End) {
                    values.push(Value::parse_from_ctx(ctx)?);
                }
                ctx.expect(Token::BracketClose, "]")?;
                Ok(Value::List(values))
            }
            Token::BraceOpen => {
                let mut fields = Vec::new_in(&ctx.ctx.arena);
                while !matches!(ctx.peek(), Token::BraceClose | Token::End) {
                    let (name, _) = ctx.name("object field name")?;
                    ctx.expect(Token::Colon, ":")?;
                    fields.push((name, Value::parse_from_ctx(ctx)?));
                }
                ctx.expect(Token::BraceClose, "}")?;
                Ok(Value::Object(fields))
            }
            Token::Dollar => Err(syntax!("Variables are not allowed in constant values")),
            t => syntax_err!("Expected value, got {:?}", t),
        }
    }
}

impl<'a> ParseFromCtx<'a> for TypeRef<'a> {
    fn parse_from_ctx(ctx: &mut ParserContext<'a>) -> ParseResult<Self> {
        let type_ref = match ctx.next() {
            Token::Name(name) => TypeRef::Named(name),
            Token::BracketOpen => {
                let of_type = ctx.type_ref()?;
                if ctx.next() != Token::BracketClose {
                    return syntax_err!("Unterminated list");
                }
                TypeRef::List(of_type)
            }
            t => return syntax_err!("Expected type name or list type start `[`, got {:?}", t),
        };

        match ctx.peek() {
            Token::Exclam => {
                ctx.next();
                Ok(TypeRef::NonNull(ctx.ctx.alloc(type_ref)))
            }
            _ => Ok(type_ref),
        }
    }
}
