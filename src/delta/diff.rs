use indexmap::IndexMap;
use serde_json::{Number, Value};

use super::{Addition, DeltaDocument, FlatDocument, Update};

/// Where a key landed when comparing two documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyClass {
    Unchanged,
    Updated,
    Deleted,
    Added,
}

/// Classify every key of `base ∪ patched`.
///
/// Base keys come first in base order, then keys only present in `patched`
/// in patched order.
pub fn classify(base: &FlatDocument, patched: &FlatDocument) -> IndexMap<String, KeyClass> {
    let mut classes = IndexMap::with_capacity(base.len() + patched.len());

    for (key, old) in base {
        let class = match patched.get(key) {
            Some(new) if values_equal(old, new) => KeyClass::Unchanged,
            Some(_) => KeyClass::Updated,
            None => KeyClass::Deleted,
        };
        classes.insert(key.clone(), class);
    }
    for key in patched.keys() {
        if !classes.contains_key(key) {
            classes.insert(key.clone(), KeyClass::Added);
        }
    }

    classes
}

/// Structural equality where numbers compare by value, so `40` equals `40.0`.
///
/// Arrays compare element-wise in order, objects key by key regardless of order.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => numbers_equal(x, y),
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(key, x)| ys.get(key).is_some_and(|y| values_equal(x, y)))
        }
        _ => a == b,
    }
}

fn numbers_equal(x: &Number, y: &Number) -> bool {
    if let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (x.as_u64(), y.as_u64()) {
        return x == y;
    }

    // Integers past u64 are kept as text; f64 would merge neighbours
    let (x_text, y_text) = (x.to_string(), y.to_string());
    if is_integer_literal(&x_text) && is_integer_literal(&y_text) {
        return x_text == y_text;
    }
    match (x.as_f64(), y.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => x_text == y_text,
    }
}

fn is_integer_literal(text: &str) -> bool {
    !text.contains(['.', 'e', 'E'])
}

/// Compute the delta that turns `base` into `patched`.
pub fn diff(base: &FlatDocument, patched: &FlatDocument) -> DeltaDocument {
    let mut delta = DeltaDocument::default();
    let mut unchanged = 0usize;

    for (key, class) in classify(base, patched) {
        match class {
            KeyClass::Unchanged => unchanged += 1,
            KeyClass::Updated => delta.updates.push(Update {
                from: base[&key].clone(),
                to: patched[&key].clone(),
                key,
            }),
            KeyClass::Deleted => delta.deletions.push(key),
            KeyClass::Added => delta.additions.push(Addition {
                value: patched[&key].clone(),
                key,
            }),
        }
    }

    tracing::info!(
        "[delta] {} added, {} deleted, {} updated, {} unchanged",
        delta.additions.len(),
        delta.deletions.len(),
        delta.updates.len(),
        unchanged
    );
    delta
}
