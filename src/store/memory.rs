use crate::error::Result;
use crate::store::{BatchOp, StorePath, TreeStore};
use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

/// In-memory `TreeStore` holding the whole document tree as one JSON
/// value behind an async lock. Batches run under a single write guard, so
/// they are atomic with respect to every other operation. Used by the
/// integration tests and as the offline backend.
pub struct MemoryStore {
    tree: RwLock<Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            tree: RwLock::new(Value::Object(Map::new())),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        MemoryStore::new()
    }
}

fn subtree<'a>(mut node: &'a Value, segments: &[String]) -> Option<&'a Value> {
    for segment in segments {
        node = node.as_object()?.get(segment)?;
    }
    Some(node)
}

fn put_at(node: &mut Value, segments: &[String], value: Value) {
    let Some((head, rest)) = segments.split_first() else {
        *node = value;
        return;
    };
    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    if let Value::Object(map) = node {
        let child = map.entry(head.clone()).or_insert(Value::Null);
        put_at(child, rest, value);
    }
}

fn merge_at(node: &mut Value, segments: &[String], fields: Map<String, Value>) {
    let Some((head, rest)) = segments.split_first() else {
        if !node.is_object() {
            *node = Value::Object(Map::new());
        }
        if let Value::Object(map) = node {
            for (key, value) in fields {
                map.insert(key, value);
            }
        }
        return;
    };
    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    if let Value::Object(map) = node {
        let child = map.entry(head.clone()).or_insert(Value::Null);
        merge_at(child, rest, fields);
    }
}

/// Removes the subtree, then prunes parents left without children so an
/// emptied node reads as absent, matching remote null-deletion semantics.
fn remove_at(node: &mut Value, segments: &[String]) {
    let Some((head, rest)) = segments.split_first() else {
        *node = Value::Null;
        return;
    };
    if let Value::Object(map) = node {
        if rest.is_empty() {
            map.remove(head);
        } else if let Some(child) = map.get_mut(head) {
            remove_at(child, rest);
            let emptied = child.is_null()
                || child.as_object().is_some_and(|children| children.is_empty());
            if emptied {
                map.remove(head);
            }
        }
    }
}

fn apply(tree: &mut Value, op: BatchOp) {
    match op {
        BatchOp::Put(path, value) => put_at(tree, path.segments(), value),
        BatchOp::Merge(path, fields) => merge_at(tree, path.segments(), fields),
        BatchOp::Remove(path) => remove_at(tree, path.segments()),
    }
}

#[async_trait]
impl TreeStore for MemoryStore {
    async fn get(&self, path: &StorePath) -> Result<Option<Value>> {
        let tree = self.tree.read().await;
        Ok(subtree(&tree, path.segments())
            .filter(|value| !value.is_null())
            .cloned())
    }

    async fn put(&self, path: &StorePath, value: Value) -> Result<()> {
        let mut tree = self.tree.write().await;
        put_at(&mut tree, path.segments(), value);
        Ok(())
    }

    async fn write_batch(&self, ops: Vec<BatchOp>) -> Result<()> {
        let mut tree = self.tree.write().await;
        for op in ops {
            apply(&mut tree, op);
        }
        Ok(())
    }
}
