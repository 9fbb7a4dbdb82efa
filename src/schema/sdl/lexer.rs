use logos::{internal::LexerInternal, Lexer, Logos, Span};

#[derive(Clone)]
pub(crate) struct Extras<'a> {
    pub arena: &'a bumpalo::Bump,
}

/// Tokens of the GraphQL Schema Definition Language.
///
/// Commas, whitespace and comments are insignificant in GraphQL and are skipped entirely.
#[derive(Logos, Debug, PartialEq, Clone, Copy)]
#[logos(extras = Extras<'s>)]
pub(crate) enum Token<'a> {
    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    #[token("{")]
    BraceOpen,

    #[token("}")]
    BraceClose,

    #[token("(")]
    ParenOpen,

    #[token(")")]
    ParenClose,

    #[token(":")]
    Colon,

    #[token("=")]
    Equal,

    #[token("!")]
    Exclam,

    #[token("&")]
    Ampersand,

    #[token("|")]
    Pipe,

    #[token("$")]
    Dollar,

    #[token("...")]
    Ellipsis,

    #[regex(r"@[_a-zA-Z][_0-9a-zA-Z]*", |lex| &lex.slice()[1..])]
    DirectiveName(&'a str),

    #[regex(r"[_a-zA-Z][_0-9a-zA-Z]*", |lex| lex.slice())]
    Name(&'a str),

    #[regex(r"-?([1-9][0-9]*|0)[.][0-9]+([eE][+-]?[0-9]+)?")]
    #[regex("-?([1-9][0-9]*|0)[eE][+-]?[0-9]+")]
    Float(&'a str),

    #[regex(r"-?([1-9][0-9]*|0)")]
    Integer(&'a str),

    #[regex(r#"""?"?"#, parse_string)]
    String(&'a str),

    #[error]
    #[regex(r"([ ,\t\n\r\f\u{FEFF}]+|#[^\n\r]*)+", logos::skip)]
    Error,

    /// Token indicates the end of the input
    End,
}

/// Pulls the next significant token and its span, yielding [`Token::End`] with an empty span at
/// the end of the source.
#[inline]
pub(crate) fn next_token<'a>(lexer: &mut Lexer<'a, Token<'a>>) -> (Token<'a>, Span) {
    match lexer.next() {
        Some(token) => (token, lexer.span()),
        None => {
            let end = lexer.source().len();
            (Token::End, end..end)
        }
    }
}

#[derive(Logos, Debug, PartialEq)]
enum BlockPart {
    #[regex(r#"[^"\\\r\n]+"#)]
    #[regex(r#""+"#)]
    Text,

    #[regex(r"(\r|\n|\r\n)[\t ]*")]
    Newline,

    #[regex(r#"\\""""#)]
    EscapedEndBlock,

    #[regex(r#"\\."#)]
    EscapedSequence,

    #[token(r#"""""#)]
    EndBlock,

    #[error]
    Error,
}

#[derive(Logos, Debug, PartialEq)]
enum StringPart {
    #[regex(r#"[^\n\r\\"]+"#)]
    Text,

    #[regex(r"\\u[0-9a-fA-F][0-9a-fA-F][0-9a-fA-F][0-9a-fA-F]")]
    EscapedCodepoint,

    #[token(r#"\""#)]
    EscapedQuote,
    #[token(r#"\\"#)]
    EscapedBackslash,
    #[token(r#"\/"#)]
    EscapedSlash,
    #[token(r#"\b"#)]
    EscapedBackspace,
    #[token(r#"\f"#)]
    EscapedFormFeed,
    #[token(r#"\n"#)]
    EscapedNewline,
    #[token(r#"\r"#)]
    EscapedReturn,
    #[token(r#"\t"#)]
    EscapedTab,

    #[token("\"")]
    EndString,

    #[error]
    Error,
}

#[inline]
fn lex_string<'a>(lex: &mut Lexer<'a, Token<'a>>, mut output: String) -> Option<&'a str> {
    let mut sublex = StringPart::lexer(lex.remainder());
    while let Some(token) = sublex.next() {
        match token {
            StringPart::Error => break,
            StringPart::Text => output.push_str(sublex.slice()),
            StringPart::EscapedQuote => output.push('"'),
            StringPart::EscapedBackslash => output.push('\\'),
            StringPart::EscapedSlash => output.push('/'),
            StringPart::EscapedBackspace => output.push(8 as char),
            StringPart::EscapedFormFeed => output.push(12 as char),
            StringPart::EscapedNewline => output.push('\n'),
            StringPart::EscapedReturn => output.push('\r'),
            StringPart::EscapedTab => output.push('\t'),
            StringPart::EscapedCodepoint => {
                use lexical_core::*;
                const FORMAT: u128 = NumberFormatBuilder::hexadecimal();
                const OPTIONS: ParseIntegerOptions = ParseIntegerOptions::new();
                output.push(
                    parse_with_options::<u32, FORMAT>(sublex.slice()[2..].as_bytes(), &OPTIONS)
                        .ok()
                        .and_then(std::char::from_u32)?,
                );
            }
            StringPart::EndString => {
                lex.bump_unchecked(sublex.span().end);
                return Some(lex.extras.arena.alloc_str(&output));
            }
        }
    }
    None
}

/// Block strings are mostly found as descriptions in SDL, so their common indentation is
/// removed the same way GraphQL.js' `dedentBlockStringLines` does.
#[inline]
fn lex_block_string<'a>(lex: &mut Lexer<'a, Token<'a>>) -> Option<&'a str> {
    let mut output = String::new();
    let mut sublex = BlockPart::lexer(lex.remainder());
    let mut min_indent: usize = usize::MAX;
    while let Some(token) = sublex.next() {
        match token {
            BlockPart::EscapedSequence | BlockPart::Text => output.push_str(sublex.slice()),
            BlockPart::EscapedEndBlock => output.push_str("\"\"\""),
            BlockPart::Newline => {
                let mut slice = &sublex.slice()[1..];
                if !slice.is_empty() && &slice[0..1] == "\n" {
                    slice = &slice[1..];
                };
                let indent = slice.len();
                if indent > 0 && indent < min_indent {
                    min_indent = indent;
                }
                output.push('\n');
                output.push_str(slice);
            }
            BlockPart::EndBlock => {
                lex.bump_unchecked(sublex.span().end);
                if min_indent == usize::MAX {
                    min_indent = 0;
                }
                let mut lines = output.lines();
                let mut dedented: Vec<&str> = Vec::new();
                if let Some(first) = lines.next() {
                    dedented.push(first.trim());
                }
                for line in lines {
                    dedented.push(line.get(min_indent..).unwrap_or(""));
                }
                while dedented.first().map_or(false, |line| line.trim().is_empty()) {
                    dedented.remove(0);
                }
                while dedented.last().map_or(false, |line| line.trim().is_empty()) {
                    dedented.pop();
                }
                return Some(lex.extras.arena.alloc_str(&dedented.join("\n")));
            }
            BlockPart::Error => break,
        }
    }
    None
}

fn parse_string<'a>(lex: &mut Lexer<'a, Token<'a>>) -> Option<&'a str> {
    match lex.slice() {
        r#""""# => Some(""),
        r#"""""# => lex_block_string(lex),
        "\"" => {
            // Strings without escape sequences are borrowed straight from the source, only
            // "complex strings" go through the StringPart lexer
            let remainder = lex.remainder();
            for (i, c) in remainder.char_indices() {
                match c {
                    '\n' | '\r' => return None,
                    '\\' => {
                        lex.bump_unchecked(i);
                        return lex_string(lex, remainder[0..i].to_string());
                    }
                    '"' => {
                        lex.bump_unchecked(i + 1);
                        return Some(&remainder[0..i]);
                    }
                    _ => {}
                }
            }
            None
        }
        _ => None,
    }
}
