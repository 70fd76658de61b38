//! yq-style queries against YAML documents
//!
//! Supported expressions:
//! - `.` identity
//! - `.a.b`, `."quoted key"`, `.["key"]` mapping lookup
//! - `.a[0]`, `.a[-1]` sequence index
//! - `keys` mapping keys (or sequence indices)
//! - `|` pipes the result of one stage into the next
//!
//! Missing keys evaluate to `null`, as yq does.

use std::iter::Peekable;
use std::path::PathBuf;
use std::str::Chars;

use serde_yaml::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML in {}: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid expression '{expr}': {reason}")]
    Parse { expr: String, reason: String },

    #[error("cannot index {kind} with '{key}'")]
    Index { kind: &'static str, key: String },

    #[error("cannot get keys of {kind}")]
    Keys { kind: &'static str },

    #[error("cannot render result: {0}")]
    Render(#[source] serde_yaml::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Step {
    Key(String),
    Index(i64),
    Keys,
}

/// A parsed query, applied as a flat sequence of steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    steps: Vec<Step>,
}

impl Query {
    pub fn parse(expr: &str) -> Result<Self, QueryError> {
        let err = |reason: String| QueryError::Parse {
            expr: expr.to_string(),
            reason,
        };

        let mut chars = expr.chars().peekable();
        let mut steps = Vec::new();

        loop {
            skip_whitespace(&mut chars);
            match chars.peek() {
                Some('.') => parse_path(&mut chars, &mut steps).map_err(err)?,
                Some(c) if c.is_ascii_alphabetic() => {
                    let name = take_while(&mut chars, |c| c.is_ascii_alphanumeric() || c == '_');
                    if name != "keys" {
                        return Err(err(format!("unknown function '{name}'")));
                    }
                    steps.push(Step::Keys);
                }
                Some(c) => return Err(err(format!("unexpected '{c}'"))),
                None => return Err(err("expected expression".into())),
            }

            skip_whitespace(&mut chars);
            match chars.next() {
                None => break,
                Some('|') => continue,
                Some(c) => return Err(err(format!("unexpected '{c}'"))),
            }
        }

        Ok(Self { steps })
    }

    pub fn evaluate(&self, document: &Value) -> Result<Value, QueryError> {
        self.steps
            .iter()
            .try_fold(document.clone(), |current, step| apply(step, current))
    }
}

/// Parse `expr`, evaluate it against `document` and render the result as text.
pub fn evaluate_to_string(expr: &str, document: &Value) -> Result<String, QueryError> {
    let query = Query::parse(expr)?;
    render(&query.evaluate(document)?)
}

/// Render a value the way yq prints it: scalars raw, collections as YAML.
pub fn render(value: &Value) -> Result<String, QueryError> {
    let text = match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Tagged(tagged) => return render(&tagged.value),
        // an empty document has no keys to print
        Value::Sequence(seq) if seq.is_empty() => String::new(),
        Value::Sequence(_) | Value::Mapping(_) => {
            serde_yaml::to_string(value).map_err(QueryError::Render)?
        }
    };
    Ok(text.trim_end_matches('\n').to_string())
}

fn apply(step: &Step, value: Value) -> Result<Value, QueryError> {
    let value = untag(value);
    match (step, value) {
        (Step::Key(_) | Step::Index(_), Value::Null) => Ok(Value::Null),
        (Step::Key(key), Value::Mapping(map)) => {
            Ok(map.get(key.as_str()).cloned().unwrap_or(Value::Null))
        }
        (Step::Index(index), Value::Sequence(seq)) => {
            let resolved = if *index < 0 {
                seq.len() as i64 + index
            } else {
                *index
            };
            if resolved < 0 {
                return Ok(Value::Null);
            }
            Ok(seq.get(resolved as usize).cloned().unwrap_or(Value::Null))
        }
        (Step::Index(index), Value::Mapping(map)) => Ok(map
            .get(Value::Number((*index).into()))
            .cloned()
            .unwrap_or(Value::Null)),
        (Step::Key(key), other) => Err(QueryError::Index {
            kind: kind_of(&other),
            key: key.clone(),
        }),
        (Step::Index(index), other) => Err(QueryError::Index {
            kind: kind_of(&other),
            key: index.to_string(),
        }),
        (Step::Keys, Value::Null) => Ok(Value::Sequence(Vec::new())),
        (Step::Keys, Value::Mapping(map)) => Ok(Value::Sequence(map.keys().cloned().collect())),
        (Step::Keys, Value::Sequence(seq)) => Ok(Value::Sequence(
            (0..seq.len() as u64).map(|i| Value::Number(i.into())).collect(),
        )),
        (Step::Keys, other) => Err(QueryError::Keys {
            kind: kind_of(&other),
        }),
    }
}

fn untag(value: Value) -> Value {
    match value {
        Value::Tagged(tagged) => untag(tagged.value),
        other => other,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

fn parse_path(chars: &mut Peekable<Chars<'_>>, steps: &mut Vec<Step>) -> Result<(), String> {
    loop {
        match chars.peek() {
            Some('.') => {
                chars.next();
                match chars.peek() {
                    Some('"') => steps.push(Step::Key(parse_quoted(chars)?)),
                    Some(&c) if is_key_char(c) => {
                        steps.push(Step::Key(take_while(chars, is_key_char)));
                    }
                    // bare `.` or `.[`
                    _ => {}
                }
            }
            Some('[') => {
                chars.next();
                skip_whitespace(chars);
                if chars.peek() == Some(&'"') {
                    steps.push(Step::Key(parse_quoted(chars)?));
                } else {
                    let digits = take_while(chars, |c| c.is_ascii_digit() || c == '-');
                    let index = digits
                        .parse::<i64>()
                        .map_err(|_| format!("invalid index '{digits}'"))?;
                    steps.push(Step::Index(index));
                }
                skip_whitespace(chars);
                if chars.next() != Some(']') {
                    return Err("expected ']'".into());
                }
            }
            _ => return Ok(()),
        }
    }
}

fn parse_quoted(chars: &mut Peekable<Chars<'_>>) -> Result<String, String> {
    chars.next(); // opening quote
    let mut out = String::new();
    while let Some(c) = chars.next() {
        match c {
            '"' => return Ok(out),
            '\\' => match chars.next() {
                Some(escaped) => out.push(escaped),
                None => break,
            },
            c => out.push(c),
        }
    }
    Err("unterminated string".into())
}

fn is_key_char(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, '.' | '[' | ']' | '|' | '"')
}

fn take_while(chars: &mut Peekable<Chars<'_>>, pred: impl Fn(char) -> bool) -> String {
    let mut out = String::new();
    while let Some(&c) = chars.peek() {
        if !pred(c) {
            break;
        }
        out.push(c);
        chars.next();
    }
    out
}

fn skip_whitespace(chars: &mut Peekable<Chars<'_>>) {
    while chars.peek().is_some_and(|c| c.is_whitespace()) {
        chars.next();
    }
}
