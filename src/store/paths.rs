use crate::types::{EntryId, NodeKey, UserId};
use std::fmt;

pub const KHATABOOKS_NODE: &str = "khatabooks";
pub const CUSTOMERS_NODE: &str = "customers";
pub const ENTRIES_NODE: &str = "entries";

/// A slash-joined location in the document tree, held as validated
/// segments. Only `TreePaths` mints these, so every path is scoped to one
/// user and every user-supplied segment went through `NodeKey`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StorePath {
    segments: Vec<String>,
}

impl StorePath {
    fn new(segments: Vec<String>) -> Self {
        StorePath { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    fn child(&self, segment: impl Into<String>) -> StorePath {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        StorePath::new(segments)
    }
}

impl fmt::Display for StorePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

/// Path builder for one user's slice of the tree:
///
/// ```text
/// {userId}/khatabooks/{bookName}
/// {userId}/customers/{bookName}/{customerName}
/// {userId}/customers/{bookName}/{customerName}/entries/{entryId}
/// ```
#[derive(Clone, Debug)]
pub struct TreePaths {
    root: StorePath,
}

impl TreePaths {
    pub fn new(user: UserId) -> Self {
        TreePaths {
            root: StorePath::new(vec![user.to_string()]),
        }
    }

    pub fn khatabooks(&self) -> StorePath {
        self.root.child(KHATABOOKS_NODE)
    }

    pub fn khatabook(&self, book: &NodeKey) -> StorePath {
        self.khatabooks().child(book.as_ref())
    }

    pub fn customers(&self, book: &NodeKey) -> StorePath {
        self.root.child(CUSTOMERS_NODE).child(book.as_ref())
    }

    pub fn customer(&self, book: &NodeKey, customer: &NodeKey) -> StorePath {
        self.customers(book).child(customer.as_ref())
    }

    pub fn entries(&self, book: &NodeKey, customer: &NodeKey) -> StorePath {
        self.customer(book, customer).child(ENTRIES_NODE)
    }

    pub fn entry(&self, book: &NodeKey, customer: &NodeKey, entry: &EntryId) -> StorePath {
        self.entries(book, customer).child(entry.to_string())
    }
}
