//! Turns the upstream answer into [`SynthesisMethod`] records.
//!
//! The upstream service may wrap its JSON in prose or markdown fences, so the
//! payload is located by scanning every `{` / `[` offset left to right. The
//! first decoded value that carries methods (a method-list key, or method
//! fields of its own) wins; failing that, the first JSON object or array
//! holding an object. Bare citation markers such as `[1]` never qualify.
//!
//! Decoding is field-by-field. A missing or mistyped field becomes an empty
//! value; only a wholly absent payload is an error. Empty `temp` / `time`
//! fall back to values mentioned in the conditions text.

use crate::domain::model::{Source, SynthesisMethod};
use crate::utils::error::{Result, SynthesisError};
use regex::Regex;
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::sync::LazyLock;

const METHOD_LIST_KEYS: [&str; 4] = ["synthesis_methods", "methods", "articles", "results"];
const METHOD_MARKER_KEYS: [&str; 7] = [
    "reagents",
    "conditions",
    "yield",
    "source",
    "temp",
    "temperature",
    "time",
];

static TEMPERATURE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d+(?:\.\d+)?\s*°?[CK]\b").expect("temperature pattern is a valid regex")
});

static DURATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\d+(?:\.\d+)?\s*(?:hour|hr|h|minute|min)s?\b")
        .expect("duration pattern is a valid regex")
});

pub fn parse_response(raw: &str) -> Result<Vec<SynthesisMethod>> {
    let text = answer_text(raw)?;
    let payload = extract_payload(&text).ok_or_else(|| SynthesisError::ParseError {
        message: "no JSON object found in upstream answer".to_string(),
    })?;

    let methods = decode_methods(&payload);
    tracing::debug!("Decoded {} synthesis methods from upstream answer", methods.len());
    Ok(methods)
}

/// Unwraps `choices[0].message.content` from a chat-completion envelope.
/// Anything that is not an envelope is treated as the answer text itself.
fn answer_text(raw: &str) -> Result<Cow<'_, str>> {
    let envelope = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(envelope)) if envelope.contains_key("choices") => envelope,
        _ => return Ok(Cow::Borrowed(raw)),
    };

    envelope
        .get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.pointer("/message/content"))
        .and_then(Value::as_str)
        .map(|content| Cow::Owned(content.to_string()))
        .ok_or_else(|| SynthesisError::ParseError {
            message: "completion envelope has no choices[0].message.content".to_string(),
        })
}

pub fn extract_payload(text: &str) -> Option<Value> {
    let mut first_structured = None;
    for value in structured_values(text) {
        if carries_methods(&value) {
            return Some(value);
        }
        first_structured.get_or_insert(value);
    }
    first_structured
}

fn structured_values(text: &str) -> impl Iterator<Item = Value> + '_ {
    text.char_indices()
        .filter(|(_, c)| *c == '{' || *c == '[')
        .filter_map(move |(offset, _)| {
            let mut values =
                serde_json::Deserializer::from_str(&text[offset..]).into_iter::<Value>();
            match values.next() {
                Some(Ok(value)) if is_structured(&value) => Some(value),
                _ => None,
            }
        })
}

fn is_structured(value: &Value) -> bool {
    match value {
        Value::Object(_) => true,
        Value::Array(items) => items.iter().any(Value::is_object),
        _ => false,
    }
}

fn carries_methods(value: &Value) -> bool {
    match value {
        Value::Object(obj) => {
            METHOD_LIST_KEYS
                .iter()
                .any(|key| obj.get(*key).is_some_and(Value::is_array))
                || looks_like_method(obj)
        }
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_object)
            .any(looks_like_method),
        _ => false,
    }
}

fn decode_methods(payload: &Value) -> Vec<SynthesisMethod> {
    match payload {
        Value::Array(items) => decode_method_list(items),
        Value::Object(obj) => {
            let listed = METHOD_LIST_KEYS
                .iter()
                .find_map(|key| obj.get(*key).and_then(Value::as_array));
            match listed {
                Some(items) => decode_method_list(items),
                None if looks_like_method(obj) => vec![decode_method(obj)],
                None => Vec::new(),
            }
        }
        _ => Vec::new(),
    }
}

fn decode_method_list(items: &[Value]) -> Vec<SynthesisMethod> {
    items
        .iter()
        .filter_map(Value::as_object)
        .map(decode_method)
        .collect()
}

fn looks_like_method(obj: &Map<String, Value>) -> bool {
    METHOD_MARKER_KEYS.iter().any(|key| obj.contains_key(*key))
}

fn decode_method(obj: &Map<String, Value>) -> SynthesisMethod {
    let mut reagents = list_field(obj, "reagents");
    // solvents are reported alongside the starting materials
    reagents.extend(list_field(obj, "solvents"));

    let source = match obj.get("source").and_then(Value::as_object) {
        Some(source) => decode_source(source),
        None => decode_source(obj),
    };

    let conditions = text_field(obj, &["conditions", "reaction_conditions"]);
    let mut time = text_field(obj, &["time", "reaction_time"]);
    if time.is_empty() {
        time = first_match(&DURATION_PATTERN, &conditions);
    }
    let mut temp = text_field(obj, &["temp", "temperature"]);
    if temp.is_empty() {
        temp = first_match(&TEMPERATURE_PATTERN, &conditions);
    }

    SynthesisMethod {
        reagents,
        conditions,
        time,
        temp,
        yield_: text_field(obj, &["yield"]),
        source,
    }
}

fn first_match(pattern: &Regex, text: &str) -> String {
    pattern
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

fn decode_source(obj: &Map<String, Value>) -> Source {
    Source {
        title: text_field(obj, &["title"]),
        authors: text_field(obj, &["authors"]),
        journal: text_field(obj, &["journal"]),
        year: text_field(obj, &["year"]),
        doi: text_field(obj, &["doi"]),
        paper_url: text_field(obj, &["paper_url", "url"]),
        summary: text_field(obj, &["summary", "experimental_method"]),
    }
}

/// First key holding a usable scalar, rendered as a trimmed string.
fn text_field(obj: &Map<String, Value>, keys: &[&str]) -> String {
    keys.iter()
        .find_map(|key| obj.get(*key).and_then(as_text))
        .unwrap_or_default()
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(scalar_text).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(", "))
            }
        }
        _ => None,
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn list_field(obj: &Map<String, Value>, key: &str) -> Vec<String> {
    match obj.get(key) {
        Some(Value::Array(items)) => items.iter().filter_map(scalar_text).collect(),
        Some(Value::String(s)) => s
            .split([',', ';'])
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}
