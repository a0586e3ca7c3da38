pub mod memory;
pub mod paths;

pub use memory::MemoryStore;
pub use paths::{StorePath, TreePaths};

use crate::error::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// One mutation inside an atomic batch.
#[derive(Clone, Debug, PartialEq)]
pub enum BatchOp {
    /// Replace the whole subtree at the path.
    Put(StorePath, Value),
    /// Set the given fields on the node at the path, leaving its other
    /// children (such as a customer's `entries`) untouched.
    Merge(StorePath, Map<String, Value>),
    /// Delete the subtree at the path.
    Remove(StorePath),
}

/// The remote document tree. Values are JSON subtrees addressed by path;
/// a missing node and an explicit null are the same thing. Writes follow
/// last-write-wins, there is no conflict resolution.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TreeStore: Send + Sync {
    /// Reads the subtree at the path, `None` when nothing is stored there.
    async fn get(&self, path: &StorePath) -> Result<Option<Value>>;

    /// Replaces the subtree at the path.
    async fn put(&self, path: &StorePath, value: Value) -> Result<()>;

    /// Applies all operations or none of them.
    async fn write_batch(&self, ops: Vec<BatchOp>) -> Result<()>;

    /// Deletes the subtree at the path.
    async fn remove(&self, path: &StorePath) -> Result<()> {
        self.write_batch(vec![BatchOp::Remove(path.clone())]).await
    }
}
