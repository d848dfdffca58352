//! Request document parsing
//!
//! Covers the executable subset the engine runs: `query` and `mutation`
//! operations (named or anonymous), variable definitions with defaults,
//! fields with aliases and arguments, and nested selection sets. Fragments,
//! directives and subscriptions are rejected as syntax errors.
//!
//! Selection sets, list and object values and list types share one nesting
//! counter; documents deeper than [`MAX_DEPTH`] are rejected.

use nom::{
    branch::alt,
    bytes::complete::{escaped_transform, is_not, tag, take_until, take_while, take_while_m_n},
    character::complete::{alpha1, alphanumeric1, char, digit1, multispace1, one_of},
    combinator::{all_consuming, cut, map, map_opt, opt, recognize, value},
    error::{context, ContextError, ErrorKind, ParseError as NomParseError, VerboseError, VerboseErrorKind},
    multi::{many0, many1},
    sequence::{delimited, pair, preceded, terminated, tuple},
    IResult, Parser,
};
use serde_json::{Map, Number, Value};

use cgql_domain::value_objects::OperationKind;

/// Parse failure with the position of the offending token
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid syntax: {message} at line {line} column {column}")]
pub struct DocumentError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

/// Literal or variable reference in argument position
#[derive(Debug, Clone, PartialEq)]
pub enum InputValue {
    Null,
    Int(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    Enum(String),
    List(Vec<InputValue>),
    Object(Vec<(String, InputValue)>),
    Variable(String),
}

impl InputValue {
    /// JSON value with variables substituted; unknown variables become `null`
    pub fn resolve(&self, variables: &Map<String, Value>) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Int(i) => Value::from(*i),
            Self::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
            Self::String(s) | Self::Enum(s) => Value::String(s.clone()),
            Self::Boolean(b) => Value::Bool(*b),
            Self::List(items) => Value::Array(items.iter().map(|v| v.resolve(variables)).collect()),
            Self::Object(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.resolve(variables)))
                    .collect(),
            ),
            Self::Variable(name) => variables.get(name).cloned().unwrap_or(Value::Null),
        }
    }

    /// Names of the variables referenced anywhere in this value
    pub fn collect_variables<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Variable(name) => out.push(name),
            Self::List(items) => items.iter().for_each(|v| v.collect_variables(out)),
            Self::Object(fields) => fields.iter().for_each(|(_, v)| v.collect_variables(out)),
            _ => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDefinition {
    pub name: String,
    /// Type as written, e.g. `Int!` or `[String]`
    pub type_name: String,
    pub default: Option<InputValue>,
}

impl VariableDefinition {
    pub fn is_non_null(&self) -> bool {
        self.type_name.ends_with('!')
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub alias: Option<String>,
    pub name: String,
    pub arguments: Vec<(String, InputValue)>,
    pub selection_set: Vec<Field>,
}

impl Field {
    /// Key of this field in the response
    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    pub fn argument(&self, name: &str) -> Option<&InputValue> {
        self.arguments
            .iter()
            .find_map(|(n, v)| (n == name).then_some(v))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub kind: OperationKind,
    pub name: Option<String>,
    pub variables: Vec<VariableDefinition>,
    pub selection_set: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub operations: Vec<Operation>,
}

impl Document {
    /// The operation to run: the one named `name`, or the only one
    pub fn select(&self, name: Option<&str>) -> Result<&Operation, String> {
        match name {
            Some(name) => self
                .operations
                .iter()
                .find(|op| op.name.as_deref() == Some(name))
                .ok_or_else(|| format!("Unknown operation named '{name}'")),
            None => match self.operations.as_slice() {
                [only] => Ok(only),
                _ => Err("Must provide operation name if query contains multiple operations".to_owned()),
            },
        }
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Deepest nesting of selection sets, list or object values and list types
pub const MAX_DEPTH: usize = 64;

const DEPTH_EXCEEDED: &str = "maximum nesting depth exceeded";

/// Parse a request document
pub fn parse(source: &str) -> Result<Document, DocumentError> {
    match all_consuming(document::<VerboseError<&str>>)(source) {
        Ok((_, document)) => Ok(document),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(DocumentError::from_verbose(source, &e)),
        Err(nom::Err::Incomplete(_)) => Err(DocumentError::at(source, "", "incomplete document".to_owned())),
    }
}

impl DocumentError {
    fn at(source: &str, remaining: &str, message: String) -> Self {
        let consumed = &source[..source.len().saturating_sub(remaining.len())];
        let line = consumed.matches('\n').count() + 1;
        let column = consumed.rsplit('\n').next().map_or(0, |l| l.chars().count()) + 1;
        Self {
            message,
            line,
            column,
        }
    }

    /// Innermost failure position, described by the innermost context label
    fn from_verbose(source: &str, error: &VerboseError<&str>) -> Self {
        let remaining = error.errors.first().map_or("", |(input, _)| *input);
        let expectation = error
            .errors
            .iter()
            .find_map(|(_, kind)| match kind {
                VerboseErrorKind::Context(label) => Some((*label).to_owned()),
                _ => None,
            })
            .or_else(|| {
                error.errors.iter().find_map(|(_, kind)| match kind {
                    VerboseErrorKind::Char(c) => Some(format!("expected '{c}'")),
                    _ => None,
                })
            })
            .unwrap_or_else(|| "unexpected input".to_owned());
        let message = format!("{expectation}, offending token {}", offending_token(remaining));
        Self::at(source, remaining, message)
    }
}

fn offending_token(remaining: &str) -> String {
    let remaining = remaining.trim_start_matches(|c: char| c.is_whitespace() || c == ',');
    let token: String = match remaining.chars().next() {
        None => return "end of document".to_owned(),
        Some(c) if is_name_char(c) => remaining.chars().take_while(|c| is_name_char(*c)).collect(),
        Some('.') if remaining.starts_with("...") => "...".to_owned(),
        Some(c) => c.to_string(),
    };
    format!("'{token}'")
}

fn is_name_char(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric()
}

// ============================================================================
// Lexical helpers
// ============================================================================

/// Whitespace, commas, the byte order mark and `#` comments
fn ignored<'a, E: NomParseError<&'a str>>(input: &'a str) -> IResult<&'a str, (), E> {
    value(
        (),
        many0(alt((
            value((), multispace1),
            value((), char(',')),
            value((), char('\u{feff}')),
            value((), pair(char('#'), take_while(|c| c != '\n'))),
        ))),
    )(input)
}

fn lexeme<'a, O, E: NomParseError<&'a str>, F: Parser<&'a str, O, E>>(
    parser: F,
) -> impl FnMut(&'a str) -> IResult<&'a str, O, E> {
    preceded(ignored, parser)
}

fn name<'a, E: NomParseError<&'a str>>(input: &'a str) -> IResult<&'a str, &'a str, E> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ))(input)
}

/// Hard failure labelled with `message`
fn failure<'a, E: NomParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
    message: &'static str,
    kind: ErrorKind,
) -> nom::Err<E> {
    nom::Err::Failure(E::add_context(input, message, E::from_error_kind(input, kind)))
}

/// One level deeper, or a hard failure past [`MAX_DEPTH`]
fn descend<'a, E: NomParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
    depth: usize,
) -> Result<usize, nom::Err<E>> {
    if depth >= MAX_DEPTH {
        return Err(failure(input, DEPTH_EXCEEDED, ErrorKind::TooLarge));
    }
    Ok(depth + 1)
}

fn expect<'a, E: NomParseError<&'a str> + ContextError<&'a str>>(
    c: char,
    label: &'static str,
) -> impl FnMut(&'a str) -> IResult<&'a str, char, E> {
    cut(context(label, lexeme(char(c))))
}

fn reject_directives<'a, E: NomParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, (), E> {
    let (rest, _) = ignored(input)?;
    if rest.starts_with('@') {
        return Err(failure(rest, "directives are not supported", ErrorKind::Verify));
    }
    Ok((input, ()))
}

// ============================================================================
// Operations
// ============================================================================

fn document<'a, E: NomParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, Document, E> {
    let (mut input, _) = ignored(input)?;
    let mut operations = Vec::new();
    while !input.is_empty() {
        let (rest, op) = cut(operation)(input)?;
        operations.push(op);
        let (rest, _) = ignored(rest)?;
        input = rest;
    }
    if operations.is_empty() {
        return Err(failure(input, "document contains no operations", ErrorKind::Eof));
    }
    Ok((input, Document { operations }))
}

fn operation<'a, E: NomParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, Operation, E> {
    if input.starts_with('{') {
        let (input, selection_set) = selection_set(input, 0)?;
        return Ok((
            input,
            Operation {
                kind: OperationKind::Query,
                name: None,
                variables: Vec::new(),
                selection_set,
            },
        ));
    }
    let (rest, keyword) = context("expected 'query', 'mutation' or '{'", name)(input)?;
    let kind = match keyword {
        "query" => OperationKind::Query,
        "mutation" => OperationKind::Mutation,
        "subscription" => return Err(failure(input, "subscriptions are not supported", ErrorKind::Verify)),
        "fragment" => return Err(failure(input, "fragments are not supported", ErrorKind::Verify)),
        _ => return Err(failure(input, "expected 'query', 'mutation' or '{'", ErrorKind::Tag)),
    };
    let (input, name) = opt(lexeme(name))(rest)?;
    let (input, variables) = opt(variable_definitions)(input)?;
    let (input, _) = reject_directives(input)?;
    let (input, selection_set) = cut(context("expected selection set", |i| selection_set(i, 0)))(input)?;
    Ok((
        input,
        Operation {
            kind,
            name: name.map(str::to_owned),
            variables: variables.unwrap_or_default(),
            selection_set,
        },
    ))
}

fn variable_definitions<'a, E: NomParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, Vec<VariableDefinition>, E> {
    let (input, _) = lexeme(char('('))(input)?;
    let (input, definitions) = many0(variable_definition)(input)?;
    let (input, _) = expect(')', "expected variable definition or ')'")(input)?;
    Ok((input, definitions))
}

fn variable_definition<'a, E: NomParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, VariableDefinition, E> {
    let (input, _) = lexeme(char('$'))(input)?;
    let (input, name) = cut(context("expected variable name", lexeme(name)))(input)?;
    let (input, _) = expect(':', "expected ':'")(input)?;
    let (input, type_name) = cut(context("expected type", |i| type_reference(i, 0)))(input)?;
    let (input, default) = opt(preceded(
        lexeme(char('=')),
        cut(context("expected default value", |i| input_value(i, true, 0))),
    ))(input)?;
    Ok((
        input,
        VariableDefinition {
            name: name.to_owned(),
            type_name,
            default,
        },
    ))
}

fn type_reference<'a, E: NomParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
    depth: usize,
) -> IResult<&'a str, String, E> {
    let (input, mut rendered) = alt((
        |i| list_type(i, depth),
        map(lexeme(name), str::to_owned),
    ))(input)?;
    let (input, non_null) = opt(lexeme(char('!')))(input)?;
    if non_null.is_some() {
        rendered.push('!');
    }
    Ok((input, rendered))
}

fn list_type<'a, E: NomParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
    depth: usize,
) -> IResult<&'a str, String, E> {
    let (input, _) = lexeme(char('['))(input)?;
    let depth = descend(input, depth)?;
    let (input, inner) = cut(context("expected type", |i| type_reference(i, depth)))(input)?;
    let (input, _) = expect(']', "expected ']'")(input)?;
    Ok((input, format!("[{inner}]")))
}

// ============================================================================
// Selections
// ============================================================================

fn selection_set<'a, E: NomParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
    depth: usize,
) -> IResult<&'a str, Vec<Field>, E> {
    let (input, _) = lexeme(char('{'))(input)?;
    let depth = descend(input, depth)?;
    let (input, fields) = cut(context("expected field", many1(|i| selection(i, depth))))(input)?;
    let (input, _) = expect('}', "expected field or '}'")(input)?;
    Ok((input, fields))
}

fn selection<'a, E: NomParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
    depth: usize,
) -> IResult<&'a str, Field, E> {
    let (input, _) = ignored(input)?;
    if input.starts_with("...") {
        return Err(failure(input, "fragments are not supported", ErrorKind::Verify));
    }
    field(input, depth)
}

fn field<'a, E: NomParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
    depth: usize,
) -> IResult<&'a str, Field, E> {
    let (input, first) = name(input)?;
    let (input, aliased) = opt(preceded(
        lexeme(char(':')),
        cut(context("expected field name", lexeme(name))),
    ))(input)?;
    let (alias, name) = match aliased {
        Some(name) => (Some(first.to_owned()), name),
        None => (None, first),
    };
    let (input, arguments) = opt(|i| arguments(i, depth))(input)?;
    let (input, _) = reject_directives(input)?;
    let (input, selection_set) = opt(|i| selection_set(i, depth))(input)?;
    Ok((
        input,
        Field {
            alias,
            name: name.to_owned(),
            arguments: arguments.unwrap_or_default(),
            selection_set: selection_set.unwrap_or_default(),
        },
    ))
}

fn arguments<'a, E: NomParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
    depth: usize,
) -> IResult<&'a str, Vec<(String, InputValue)>, E> {
    let (input, _) = lexeme(char('('))(input)?;
    let (input, arguments) = many0(|i| argument(i, depth))(input)?;
    let (input, _) = expect(')', "expected argument or ')'")(input)?;
    Ok((input, arguments))
}

fn argument<'a, E: NomParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
    depth: usize,
) -> IResult<&'a str, (String, InputValue), E> {
    let (input, key) = lexeme(name)(input)?;
    let (input, _) = expect(':', "expected ':'")(input)?;
    let (input, value) = cut(context("expected value", |i| input_value(i, false, depth)))(input)?;
    Ok((input, (key.to_owned(), value)))
}

// ============================================================================
// Values
// ============================================================================

/// Literal or variable; `constant` forbids variables, as in default values
fn input_value<'a, E: NomParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
    constant: bool,
    depth: usize,
) -> IResult<&'a str, InputValue, E> {
    let (input, _) = ignored(input)?;
    alt((
        |i| variable(i, constant),
        |i| list_value(i, constant, depth),
        |i| object_value(i, constant, depth),
        map(string_literal, InputValue::String),
        number_literal,
        map(name, |n| match n {
            "true" => InputValue::Boolean(true),
            "false" => InputValue::Boolean(false),
            "null" => InputValue::Null,
            _ => InputValue::Enum(n.to_owned()),
        }),
    ))(input)
}

fn variable<'a, E: NomParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
    constant: bool,
) -> IResult<&'a str, InputValue, E> {
    let (rest, _) = char('$')(input)?;
    if constant {
        return Err(failure(input, "variables are not allowed in constant values", ErrorKind::Verify));
    }
    let (rest, name) = cut(context("expected variable name", name))(rest)?;
    Ok((rest, InputValue::Variable(name.to_owned())))
}

fn list_value<'a, E: NomParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
    constant: bool,
    depth: usize,
) -> IResult<&'a str, InputValue, E> {
    let (input, _) = char('[')(input)?;
    let depth = descend(input, depth)?;
    let (input, items) = many0(|i| input_value(i, constant, depth))(input)?;
    let (input, _) = expect(']', "expected value or ']'")(input)?;
    Ok((input, InputValue::List(items)))
}

fn object_value<'a, E: NomParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
    constant: bool,
    depth: usize,
) -> IResult<&'a str, InputValue, E> {
    let (input, _) = char('{')(input)?;
    let depth = descend(input, depth)?;
    let (input, fields) = many0(|i| object_field(i, constant, depth))(input)?;
    let (input, _) = expect('}', "expected object field or '}'")(input)?;
    Ok((input, InputValue::Object(fields)))
}

fn object_field<'a, E: NomParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
    constant: bool,
    depth: usize,
) -> IResult<&'a str, (String, InputValue), E> {
    let (input, key) = lexeme(name)(input)?;
    let (input, _) = expect(':', "expected ':'")(input)?;
    let (input, value) = cut(context("expected value", |i| input_value(i, constant, depth)))(input)?;
    Ok((input, (key.to_owned(), value)))
}

fn string_literal<'a, E: NomParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, String, E> {
    alt((block_string, quoted_string))(input)
}

/// `"""raw"""` with surrounding whitespace trimmed
fn block_string<'a, E: NomParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, String, E> {
    let (input, _) = tag("\"\"\"")(input)?;
    let (input, raw) = cut(context(
        "unterminated block string",
        terminated(take_until("\"\"\""), tag("\"\"\"")),
    ))(input)?;
    Ok((input, raw.trim().to_owned()))
}

fn quoted_string<'a, E: NomParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, String, E> {
    // escaped_transform rejects empty input, hence the opt
    let body = map(
        opt(escaped_transform(
            is_not("\"\\\n\r"),
            '\\',
            alt((
                value('"', char('"')),
                value('\\', char('\\')),
                value('/', char('/')),
                value('\u{8}', char('b')),
                value('\u{c}', char('f')),
                value('\n', char('n')),
                value('\r', char('r')),
                value('\t', char('t')),
                preceded(
                    char('u'),
                    map_opt(take_while_m_n(4, 4, |c: char| c.is_ascii_hexdigit()), |hex| {
                        u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
                    }),
                ),
            )),
        )),
        Option::unwrap_or_default,
    );
    delimited(
        char('"'),
        body,
        cut(context("unterminated string or invalid escape", char('"'))),
    )(input)
}

fn number_literal<'a, E: NomParseError<&'a str> + ContextError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, InputValue, E> {
    let (rest, text) = recognize(tuple((
        opt(char('-')),
        digit1,
        opt(pair(char('.'), digit1)),
        opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
    )))(input)?;
    if rest.starts_with(|c: char| is_name_char(c) || c == '.') {
        return Err(failure(input, "invalid number", ErrorKind::Digit));
    }
    let parsed = if text.contains(['.', 'e', 'E']) {
        text.parse().map(InputValue::Float).ok()
    } else {
        text.parse().map(InputValue::Int).ok()
    };
    match parsed {
        Some(number) => Ok((rest, number)),
        None => Err(failure(input, "number out of range", ErrorKind::Digit)),
    }
}
