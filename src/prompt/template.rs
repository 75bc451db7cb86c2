//! Segment template language
//!
//! A small subset of Go template syntax as used by prompt themes:
//!
//! - `{{ .Field }}` and `{{ .Object.Field }}` substitutions
//! - `{{ if .Field }}...{{ else }}...{{ end }}` conditionals, which may nest
//!
//! Templates are tokenized, parsed into a tree by recursive descent and then
//! evaluated against a [`TemplateData`] record. Evaluation never fails:
//! missing fields render as empty strings and anything that does not parse
//! as a tag is emitted literally.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;

static FIELD_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*\.([A-Za-z0-9_]+)(?:\.([A-Za-z0-9_]+))?\s*$").expect("field tag regex is valid")
});

static IF_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*if\s+\.([A-Za-z0-9_]+)(?:\.([A-Za-z0-9_]+))?\s*$")
        .expect("if tag regex is valid")
});

static ELSE_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*else\s*$").expect("else tag regex is valid"));

static END_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*end\s*$").expect("end tag regex is valid"));

/// Field record a template is evaluated against
pub type TemplateData = BTreeMap<String, Value>;

/// A value stored in a [`TemplateData`] record
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Int(i64),
    Bool(bool),
    Record(TemplateData),
}

impl Value {
    /// Go-template style truthiness
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Str(s) => !s.is_empty(),
            Value::Int(n) => *n != 0,
            Value::Bool(b) => *b,
            Value::Record(fields) => !fields.is_empty(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::Int(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
            // Records have no printable form
            Value::Record(_) => Ok(()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<TemplateData> for Value {
    fn from(record: TemplateData) -> Self {
        Value::Record(record)
    }
}

/// Build a [`TemplateData`] record from `key => value` pairs
#[macro_export]
macro_rules! template_data {
    () => { $crate::prompt::template::TemplateData::new() };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut data = $crate::prompt::template::TemplateData::new();
        $( data.insert($key.to_string(), $crate::prompt::template::Value::from($value)); )+
        data
    }};
}

/// Field reference used by a conditional
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Field(String),
    NestedField(String, String),
}

impl Condition {
    fn lookup<'a>(&self, data: &'a TemplateData) -> Option<&'a Value> {
        match self {
            Condition::Field(name) => lookup(data, name, None),
            Condition::NestedField(object, field) => lookup(data, object, Some(field)),
        }
    }
}

/// Parsed template node
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Literal(String),
    Field(String),
    NestedField(String, String),
    If {
        condition: Condition,
        then: Vec<Node>,
        otherwise: Vec<Node>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Tag<'a> {
    Field(&'a str, Option<&'a str>),
    If(&'a str, Option<&'a str>),
    Else,
    End,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token<'a> {
    Text(&'a str),
    Tag { raw: &'a str, tag: Tag<'a> },
}

/// How a nested sequence of nodes ended
enum Terminator<'a> {
    Else(&'a str),
    End,
    Eof,
}

/// A parsed template, reusable across renders
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    nodes: Vec<Node>,
}

impl Template {
    /// Parse template source. Never fails; malformed tags become literals.
    pub fn parse(source: &str) -> Self {
        let tokens = tokenize(source);
        let mut pos = 0;
        let mut nodes = Vec::new();
        while pos < tokens.len() {
            match tokens[pos] {
                Token::Tag {
                    raw,
                    tag: Tag::Else | Tag::End,
                } => {
                    // Stray else/end at top level
                    nodes.push(Node::Literal(raw.to_string()));
                    pos += 1;
                }
                _ => {
                    let (mut block, _) = parse_block(&tokens, &mut pos, false);
                    nodes.append(&mut block);
                }
            }
        }
        Self { nodes }
    }

    /// Parsed node tree
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Evaluate against `data` and trim surrounding whitespace
    pub fn render(&self, data: &TemplateData) -> String {
        let mut out = String::new();
        eval_nodes(&self.nodes, data, &mut out);
        out.trim().to_string()
    }
}

/// Parse and render in one step
pub fn render(template: &str, data: &TemplateData) -> String {
    if template.is_empty() {
        return String::new();
    }
    Template::parse(template).render(data)
}

fn tokenize(source: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < source.len() {
        let Some(open) = source[pos..].find("{{").map(|i| pos + i) else {
            tokens.push(Token::Text(&source[pos..]));
            break;
        };
        let Some(close) = source[open + 2..].find("}}").map(|i| open + 2 + i) else {
            // Unterminated tag, the rest is literal
            tokens.push(Token::Text(&source[pos..]));
            break;
        };

        // A later `{{` before the close means this opener is just text
        if let Some(reopen) = source[open + 2..close].find("{{").map(|i| open + 2 + i) {
            tokens.push(Token::Text(&source[pos..reopen]));
            pos = reopen;
            continue;
        }

        if open > pos {
            tokens.push(Token::Text(&source[pos..open]));
        }
        tokens.push(Token::Tag {
            raw: &source[open..close + 2],
            tag: classify(&source[open + 2..close]),
        });
        pos = close + 2;
    }

    tokens
}

fn classify(inner: &str) -> Tag<'_> {
    if let Some(caps) = FIELD_TAG.captures(inner) {
        match (caps.get(1), caps.get(2)) {
            (Some(name), member) => Tag::Field(name.as_str(), member.map(|m| m.as_str())),
            _ => Tag::Unknown,
        }
    } else if let Some(caps) = IF_TAG.captures(inner) {
        match (caps.get(1), caps.get(2)) {
            (Some(name), member) => Tag::If(name.as_str(), member.map(|m| m.as_str())),
            _ => Tag::Unknown,
        }
    } else if ELSE_TAG.is_match(inner) {
        Tag::Else
    } else if END_TAG.is_match(inner) {
        Tag::End
    } else {
        Tag::Unknown
    }
}

/// Parse nodes until an `else`/`end` that belongs to the enclosing `if`.
///
/// With `in_branch` false (top level) the sequence stops before a stray
/// else/end and leaves it to the caller.
fn parse_block<'a>(
    tokens: &[Token<'a>],
    pos: &mut usize,
    in_branch: bool,
) -> (Vec<Node>, Terminator<'a>) {
    let mut nodes = Vec::new();

    while *pos < tokens.len() {
        let token = tokens[*pos];
        match token {
            Token::Text(text) => {
                push_literal(&mut nodes, text);
                *pos += 1;
            }
            Token::Tag { raw, tag } => match tag {
                Tag::Field(name, None) => {
                    nodes.push(Node::Field(name.to_string()));
                    *pos += 1;
                }
                Tag::Field(object, Some(field)) => {
                    nodes.push(Node::NestedField(object.to_string(), field.to_string()));
                    *pos += 1;
                }
                Tag::If(name, member) => {
                    *pos += 1;
                    let condition = match member {
                        None => Condition::Field(name.to_string()),
                        Some(field) => Condition::NestedField(name.to_string(), field.to_string()),
                    };
                    nodes.extend(parse_if(tokens, pos, raw, condition));
                }
                Tag::Else | Tag::End if !in_branch => {
                    return (nodes, Terminator::Eof);
                }
                Tag::Else => {
                    *pos += 1;
                    return (nodes, Terminator::Else(raw));
                }
                Tag::End => {
                    *pos += 1;
                    return (nodes, Terminator::End);
                }
                Tag::Unknown => {
                    push_literal(&mut nodes, raw);
                    *pos += 1;
                }
            },
        }
    }

    (nodes, Terminator::Eof)
}

/// Parse the branches of an `if` whose opening tag was just consumed.
///
/// An `if` without a matching `end` degrades to its literal tag text
/// followed by the branch contents.
fn parse_if(tokens: &[Token<'_>], pos: &mut usize, if_raw: &str, condition: Condition) -> Vec<Node> {
    let (then, terminator) = parse_block(tokens, pos, true);
    match terminator {
        Terminator::End => vec![Node::If {
            condition,
            then,
            otherwise: Vec::new(),
        }],
        Terminator::Else(else_raw) => {
            let (otherwise, terminator) = parse_else_branch(tokens, pos);
            if terminator {
                vec![Node::If {
                    condition,
                    then,
                    otherwise,
                }]
            } else {
                let mut nodes = vec![Node::Literal(if_raw.to_string())];
                nodes.extend(then);
                nodes.push(Node::Literal(else_raw.to_string()));
                nodes.extend(otherwise);
                nodes
            }
        }
        Terminator::Eof => {
            let mut nodes = vec![Node::Literal(if_raw.to_string())];
            nodes.extend(then);
            nodes
        }
    }
}

/// Parse an else branch; a second `else` inside it is literal text.
/// Returns whether the branch was closed by `end`.
fn parse_else_branch(tokens: &[Token<'_>], pos: &mut usize) -> (Vec<Node>, bool) {
    let mut otherwise = Vec::new();
    loop {
        let (mut nodes, terminator) = parse_block(tokens, pos, true);
        otherwise.append(&mut nodes);
        match terminator {
            Terminator::End => return (otherwise, true),
            Terminator::Else(raw) => push_literal(&mut otherwise, raw),
            Terminator::Eof => return (otherwise, false),
        }
    }
}

fn push_literal(nodes: &mut Vec<Node>, text: &str) {
    if let Some(Node::Literal(last)) = nodes.last_mut() {
        last.push_str(text);
    } else {
        nodes.push(Node::Literal(text.to_string()));
    }
}

fn lookup<'a>(data: &'a TemplateData, name: &str, member: Option<&str>) -> Option<&'a Value> {
    let value = data.get(name)?;
    match member {
        None => Some(value),
        Some(field) => match value {
            Value::Record(record) => record.get(field),
            _ => None,
        },
    }
}

fn eval_nodes(nodes: &[Node], data: &TemplateData, out: &mut String) {
    for node in nodes {
        match node {
            Node::Literal(text) => out.push_str(text),
            Node::Field(name) => {
                if let Some(value) = lookup(data, name, None) {
                    out.push_str(&value.to_string());
                }
            }
            Node::NestedField(object, field) => {
                if let Some(value) = lookup(data, object, Some(field)) {
                    out.push_str(&value.to_string());
                }
            }
            Node::If {
                condition,
                then,
                otherwise,
            } => {
                let truthy = condition.lookup(data).is_some_and(Value::is_truthy);
                eval_nodes(if truthy { then } else { otherwise }, data, out);
            }
        }
    }
}
