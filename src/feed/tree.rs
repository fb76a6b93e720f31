//! Client-side copy of the subscribed collection.
//!
//! The stream sends a full `put` at `/` on connect and then incremental
//! `put`/`patch` events. Applying them here lets every change be handed on as
//! the whole collection.

use serde_json::{Map, Value};

#[derive(Debug, Default, Clone)]
pub struct SnapshotTree {
    root: Value,
}

impl SnapshotTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the value at `path`. `null` removes it, along with any parent
    /// left empty (the database has no empty nodes).
    pub fn put(&mut self, path: &str, data: Value) {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        if segments.is_empty() {
            self.root = data;
            return;
        }

        if data.is_null() {
            remove_at(&mut self.root, &segments);
            if self.root.as_object().is_some_and(Map::is_empty) {
                self.root = Value::Null;
            }
        } else {
            insert_at(&mut self.root, &segments, data);
        }
    }

    /// Merge the children of `data` into the node at `path`.
    pub fn patch(&mut self, path: &str, data: Value) {
        let Value::Object(children) = data else {
            log::warn!("Ignoring non-object patch at '{path}'");
            return;
        };
        let base = path.trim_end_matches('/');
        for (key, value) in children {
            self.put(&format!("{base}/{key}"), value);
        }
    }

    pub fn snapshot(&self) -> Value {
        self.root.clone()
    }
}

fn insert_at(node: &mut Value, segments: &[&str], data: Value) {
    let Some((first, rest)) = segments.split_first() else {
        *node = data;
        return;
    };
    let Some(map) = object_mut(node) else {
        return;
    };
    let child = map.entry(first.to_string()).or_insert(Value::Null);
    insert_at(child, rest, data);
}

fn remove_at(node: &mut Value, segments: &[&str]) {
    let Some((first, rest)) = segments.split_first() else {
        return;
    };
    if !node.is_object() && !node.is_array() {
        return;
    }
    let Some(map) = object_mut(node) else {
        return;
    };
    if rest.is_empty() {
        map.remove(*first);
        return;
    }
    let now_empty = match map.get_mut(*first) {
        Some(child) => {
            remove_at(child, rest);
            child.as_object().is_some_and(Map::is_empty)
        }
        None => false,
    };
    if now_empty {
        map.remove(*first);
    }
}

/// View `node` as an object, converting scalars and arrays in place.
fn object_mut(node: &mut Value) -> Option<&mut Map<String, Value>> {
    if !node.is_object() {
        let converted = match node.take() {
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .filter(|(_, v)| !v.is_null())
                .map(|(i, v)| (i.to_string(), v))
                .collect(),
            _ => Map::new(),
        };
        *node = Value::Object(converted);
    }
    node.as_object_mut()
}
