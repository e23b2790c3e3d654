//! Prioritized dotted-path lookup over arbitrary JSON trees.
//!
//! Every canonical field declares an ordered list of candidate paths. The first path whose walk
//! reaches its final segment wins, even when the value found there is `null`; later candidates
//! are never consulted. Missing keys, non-object intermediates and empty paths all read as
//! [`Lookup::NotFound`].

use serde_json::Value;

/// Outcome of resolving one field against a tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lookup<'a> {
    Found(&'a Value),
    FoundNull,
    NotFound,
}

impl<'a> Lookup<'a> {
    /// Collapse the null/missing outcomes into `None`.
    pub fn value(self) -> Option<&'a Value> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::FoundNull | Lookup::NotFound => None,
        }
    }

    pub fn is_resolved(self) -> bool {
        !matches!(self, Lookup::NotFound)
    }

    pub fn or_default(self, default: &FieldDefault) -> Value {
        self.value()
            .cloned()
            .unwrap_or_else(|| default.to_value())
    }
}

/// Per-field substitute applied when no candidate yields a non-null value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldDefault {
    Null,
    EmptyString,
    Zero,
    False,
    EmptyList,
    Text(&'static str),
}

impl FieldDefault {
    pub fn to_value(&self) -> Value {
        match self {
            FieldDefault::Null => Value::Null,
            FieldDefault::EmptyString => Value::String(String::new()),
            FieldDefault::Zero => Value::from(0),
            FieldDefault::False => Value::Bool(false),
            FieldDefault::EmptyList => Value::Array(Vec::new()),
            FieldDefault::Text(text) => Value::String((*text).to_string()),
        }
    }
}

/// A canonical field expressed as data: its name, candidate paths in priority order and the
/// default used on a miss.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRule {
    pub name: &'static str,
    pub paths: &'static [&'static str],
    pub default: FieldDefault,
}

impl FieldRule {
    pub const fn new(
        name: &'static str,
        paths: &'static [&'static str],
        default: FieldDefault,
    ) -> Self {
        Self {
            name,
            paths,
            default,
        }
    }

    pub fn lookup<'a>(&self, tree: &'a Value) -> Lookup<'a> {
        resolve_value(tree, self.paths)
    }

    pub fn resolve(&self, tree: &Value) -> Value {
        self.lookup(tree).or_default(&self.default)
    }

    pub fn resolve_list(&self, tree: &Value) -> Vec<Value> {
        resolve_list(tree, self.paths)
            .map(|items| items.to_vec())
            .unwrap_or_default()
    }
}

/// Walk `paths` in order and return the first successful lookup.
pub fn resolve_value<'a, P: AsRef<str>>(tree: &'a Value, paths: &[P]) -> Lookup<'a> {
    for path in paths {
        if let Some(found) = walk(tree, path.as_ref()) {
            return if found.is_null() {
                Lookup::FoundNull
            } else {
                Lookup::Found(found)
            };
        }
    }

    Lookup::NotFound
}

/// Same precedence as [`resolve_value`], but the winning value must be an array. A winning
/// null, scalar or object is absent and ends the search; it is not wrapped into a list.
pub fn resolve_list<'a, P: AsRef<str>>(tree: &'a Value, paths: &[P]) -> Option<&'a Vec<Value>> {
    match resolve_value(tree, paths) {
        Lookup::Found(Value::Array(items)) => Some(items),
        _ => None,
    }
}

fn walk<'a>(tree: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return None;
    }

    path.split('.')
        .try_fold(tree, |node, segment| node.as_object()?.get(segment))
}

/// Null and empty strings count as unset for layered fallbacks.
pub(crate) fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.trim().is_empty(),
        _ => false,
    }
}

/// First non-blank value among direct keys of `entity`.
pub(crate) fn direct_key<'a>(entity: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    let object = entity.as_object()?;
    keys.iter()
        .filter_map(|key| object.get(*key))
        .find(|value| !is_blank(value))
}

/// Lenient numeric reading for loosely typed payloads: numbers, numeric strings (commas and `$`
/// ignored) and booleans as 0/1.
pub(crate) fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => {
            let cleaned: String = text
                .trim()
                .chars()
                .filter(|c| !matches!(c, ',' | '$' | '_'))
                .collect();
            cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
        }
        Value::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
        _ => None,
    }
}

pub(crate) fn as_flag(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(_) => as_number(value).map(|n| n != 0.0).unwrap_or(false),
        Value::String(text) => matches!(
            text.trim().to_ascii_lowercase().as_str(),
            "true" | "yes" | "y" | "1"
        ),
        _ => false,
    }
}
