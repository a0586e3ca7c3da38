use crate::config::LedgerConfig;
use crate::error::{Error, Result};
use crate::ledger::{
    BookRecord, Customer, CustomerLedger, CustomerRecord, DateRange, DirectorySummary, Entry,
    EntryDraft, EntryRecord, KhataBook, Totals,
};
use crate::observability;
use crate::render::{DocumentRenderer, RenderedDocument};
use crate::statement::{html, StatementTable};
use crate::store::{paths, BatchOp, TreePaths, TreeStore};
use crate::types::{EntryId, NodeKey, Timestamp, UserId};
use futures::try_join;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::Instrument;

/// The authenticated identity. Every store path and every operation is
/// scoped to exactly this user; there is no ambient current-user state.
#[derive(Clone, Debug)]
pub struct Session {
    pub user_id: UserId,
}

impl Session {
    pub fn new(user_id: UserId) -> Self {
        Session { user_id }
    }
}

/// One khatabook's customer listing with its headline figures.
#[derive(Clone, Debug)]
pub struct BookOverview {
    /// Ledgers ordered by most recent activity first.
    pub customers: Vec<CustomerLedger>,
    pub summary: DirectorySummary,
}

/// Front door to the ledger: owns every store round-trip for one user's
/// khatabooks, customers and entries, and drives statement exports.
pub struct KhataDirectory {
    store: Arc<dyn TreeStore>,
    session: Session,
    paths: TreePaths,
    config: LedgerConfig,
}

impl KhataDirectory {
    pub fn new(store: Arc<dyn TreeStore>, session: Session, config: LedgerConfig) -> Self {
        let paths = TreePaths::new(session.user_id);
        KhataDirectory {
            store,
            session,
            paths,
            config,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    // ---- khatabooks ----

    /// All of the user's khatabooks, ordered by name.
    pub async fn books(&self) -> Result<Vec<KhataBook>> {
        let node = self.store.get(&self.paths.khatabooks()).await?;
        let mut books: Vec<KhataBook> = match node {
            None => Vec::new(),
            Some(node) => decode_children::<BookRecord>(node)?
                .into_iter()
                .map(BookRecord::into_book)
                .collect(),
        };
        books.sort_by(|a, b| a.name.as_str().cmp(b.name.as_str()));
        tracing::debug!(count = books.len(), "khatabooks loaded");
        Ok(books)
    }

    pub async fn create_book(&self, name: &str) -> Result<KhataBook> {
        let name = NodeKey::new(name)?;
        let path = self.paths.khatabook(&name);
        if self.store.get(&path).await?.is_some() {
            return Err(Error::AlreadyExists(name.to_string()));
        }

        let book = KhataBook::new(name);
        self.store
            .put(&path, serde_json::to_value(book.to_record())?)
            .await?;
        tracing::info!(book = %book.name, "khatabook created");
        Ok(book)
    }

    /// Moves the book record and its whole customer subtree under the new
    /// name in one batch.
    pub async fn rename_book(&self, old: &str, new: &str) -> Result<KhataBook> {
        let old = NodeKey::new(old)?;
        let new = NodeKey::new(new)?;

        let old_path = self.paths.khatabook(&old);
        let record = self
            .store
            .get(&old_path)
            .await?
            .ok_or_else(|| Error::NotFound {
                kind: "khatabook",
                name: old.to_string(),
            })?;
        if self.store.get(&self.paths.khatabook(&new)).await?.is_some() {
            return Err(Error::AlreadyExists(new.to_string()));
        }

        let mut record: BookRecord = serde_json::from_value(record)?;
        record.name = new.clone();

        let mut ops = vec![
            BatchOp::Put(
                self.paths.khatabook(&new),
                serde_json::to_value(&record)?,
            ),
            BatchOp::Remove(old_path),
        ];
        if let Some(customers) = self.store.get(&self.paths.customers(&old)).await? {
            ops.push(BatchOp::Put(self.paths.customers(&new), customers));
            ops.push(BatchOp::Remove(self.paths.customers(&old)));
        }
        self.store.write_batch(ops).await?;

        tracing::info!(from = %old, to = %new, "khatabook renamed");
        Ok(record.into_book())
    }

    /// Removes the book record and its customer subtree together, so a
    /// failure can never leave orphaned customers behind.
    pub async fn delete_book(&self, name: &str) -> Result<()> {
        let name = NodeKey::new(name)?;
        let path = self.paths.khatabook(&name);
        if self.store.get(&path).await?.is_none() {
            return Err(Error::NotFound {
                kind: "khatabook",
                name: name.to_string(),
            });
        }

        self.store
            .write_batch(vec![
                BatchOp::Remove(path),
                BatchOp::Remove(self.paths.customers(&name)),
            ])
            .await?;
        tracing::info!(book = %name, "khatabook deleted");
        Ok(())
    }

    // ---- customers ----

    /// Loads every customer of a khatabook with their entries, newest
    /// activity first, plus the summed headline figures. A book with no
    /// customers yet reads as an empty overview.
    pub async fn customers(&self, book: &str) -> Result<BookOverview> {
        let book = NodeKey::new(book)?;
        let node = self.store.get(&self.paths.customers(&book)).await?;
        let mut customers: Vec<CustomerLedger> = match node {
            None => Vec::new(),
            Some(Value::Object(children)) => children
                .into_values()
                .map(decode_customer)
                .collect::<Result<Vec<_>>>()?,
            Some(other) => {
                return Err(Error::Validation(format!(
                    "customer listing is not a tree node: {}",
                    other
                )));
            }
        };
        customers.sort_by(|a, b| b.customer.date.cmp(&a.customer.date));
        let summary = DirectorySummary::over(customers.iter().map(|ledger| &ledger.customer));
        tracing::debug!(book = %book, count = customers.len(), "customers loaded");
        Ok(BookOverview { customers, summary })
    }

    /// Case-insensitive substring search over customer names, keeping the
    /// newest-first ordering.
    pub async fn search_customers(&self, book: &str, query: &str) -> Result<Vec<CustomerLedger>> {
        let needle = query.to_lowercase();
        let overview = self.customers(book).await?;
        Ok(overview
            .customers
            .into_iter()
            .filter(|ledger| ledger.customer.name.as_str().to_lowercase().contains(&needle))
            .collect())
    }

    pub async fn create_customer(&self, book: &str, name: &str) -> Result<Customer> {
        let book = NodeKey::new(book)?;
        let name = NodeKey::new(name)?;

        if self.store.get(&self.paths.khatabook(&book)).await?.is_none() {
            return Err(Error::NotFound {
                kind: "khatabook",
                name: book.to_string(),
            });
        }
        let path = self.paths.customer(&book, &name);
        if self.store.get(&path).await?.is_some() {
            return Err(Error::AlreadyExists(name.to_string()));
        }

        let customer = Customer::new(name, Timestamp::now());
        self.store
            .put(&path, serde_json::to_value(customer.to_record())?)
            .await?;
        tracing::info!(book = %book, customer = %customer.name, "customer created");
        Ok(customer)
    }

    /// Moves the customer node, entries included, under the new name in
    /// one batch.
    pub async fn rename_customer(&self, book: &str, old: &str, new: &str) -> Result<Customer> {
        let book = NodeKey::new(book)?;
        let old = NodeKey::new(old)?;
        let new = NodeKey::new(new)?;

        let old_path = self.paths.customer(&book, &old);
        let mut node = self
            .store
            .get(&old_path)
            .await?
            .ok_or_else(|| Error::NotFound {
                kind: "customer",
                name: old.to_string(),
            })?;
        let new_path = self.paths.customer(&book, &new);
        if self.store.get(&new_path).await?.is_some() {
            return Err(Error::AlreadyExists(new.to_string()));
        }

        if let Some(fields) = node.as_object_mut() {
            fields.insert("name".to_string(), Value::String(new.to_string()));
        }
        let renamed = decode_customer(node.clone())?.customer;

        self.store
            .write_batch(vec![
                BatchOp::Put(new_path, node),
                BatchOp::Remove(old_path),
            ])
            .await?;
        tracing::info!(book = %book, from = %old, to = %new, "customer renamed");
        Ok(renamed)
    }

    /// Removes the customer record together with every entry under it.
    pub async fn delete_customer(&self, book: &str, name: &str) -> Result<()> {
        let book = NodeKey::new(book)?;
        let name = NodeKey::new(name)?;
        let path = self.paths.customer(&book, &name);
        if self.store.get(&path).await?.is_none() {
            return Err(Error::NotFound {
                kind: "customer",
                name: name.to_string(),
            });
        }
        self.store.remove(&path).await?;
        tracing::info!(book = %book, customer = %name, "customer deleted");
        Ok(())
    }

    // ---- entries ----

    /// One customer's full ledger. The record and the entry subtree are
    /// fetched concurrently.
    pub async fn ledger(&self, book: &str, customer: &str) -> Result<CustomerLedger> {
        let book = NodeKey::new(book)?;
        let customer = NodeKey::new(customer)?;
        let span = observability::trace_ledger_load(&book, &customer);

        let record_path = self.paths.customer(&book, &customer);
        let entries_path = self.paths.entries(&book, &customer);
        async {
            let (record, entries) = try_join!(
                self.store.get(&record_path),
                self.store.get(&entries_path)
            )?;

            let record = record.ok_or_else(|| Error::NotFound {
                kind: "customer",
                name: customer.to_string(),
            })?;
            let record: CustomerRecord = serde_json::from_value(record)?;
            let entries = match entries {
                None => Vec::new(),
                Some(node) => decode_entries(node)?,
            };
            Ok(CustomerLedger::from_parts(record.into_customer(), entries))
        }
        .instrument(span)
        .await
    }

    /// Validates and records a new entry: the entry node and the updated
    /// customer aggregates go to the store in one batch. Returns the
    /// recomputed totals.
    pub async fn record_entry(
        &self,
        book: &str,
        customer: &str,
        draft: EntryDraft,
    ) -> Result<Totals> {
        draft.validate()?;
        let book_key = NodeKey::new(book)?;
        let customer_key = NodeKey::new(customer)?;
        let span = observability::trace_entry_record(&book_key, &customer_key);

        async {
            let mut ledger = self.ledger(book, customer).await?;
            let entry = draft.into_entry(EntryId::new(), Timestamp::now());
            let entry_path = self.paths.entry(&book_key, &customer_key, &entry.id);
            let record = entry.to_record();
            let totals = ledger.add_entry(entry);

            // A put of the whole customer node would drop the entries
            // child, so the aggregates go in as a field merge.
            self.store
                .write_batch(vec![
                    BatchOp::Put(entry_path, serde_json::to_value(record)?),
                    BatchOp::Merge(
                        self.paths.customer(&book_key, &customer_key),
                        aggregate_fields(&ledger.customer)?,
                    ),
                ])
                .await?;

            tracing::info!(
                book = %book_key,
                customer = %customer_key,
                got = %totals.got,
                gave = %totals.gave,
                "entry recorded"
            );
            Ok(totals)
        }
        .instrument(span)
        .await
    }

    // ---- statement export ----

    /// Renders one customer's statement over the range. An empty filtered
    /// set still renders, as a table with zero totals.
    pub async fn export_statement(
        &self,
        book: &str,
        customer: &str,
        range: &DateRange,
        renderer: &dyn DocumentRenderer,
    ) -> Result<RenderedDocument> {
        let book_key = NodeKey::new(book)?;
        let span = observability::trace_export(&book_key);

        async {
            let ledger = self.ledger(book, customer).await?;
            let table =
                StatementTable::for_customer(&ledger, range, self.config.balance.policy);
            let labels = self.config.display.locale.labels();
            renderer.render(&html::render_statement(&table, labels)).await
        }
        .instrument(span)
        .await
    }

    /// Renders one table per customer with entries in the range. With no
    /// customer surviving the filter there is nothing to render and the
    /// export fails as `EmptyStatement`.
    pub async fn export_book_statement(
        &self,
        book: &str,
        range: &DateRange,
        renderer: &dyn DocumentRenderer,
    ) -> Result<RenderedDocument> {
        let book_key = NodeKey::new(book)?;
        let span = observability::trace_export(&book_key);

        async {
            let overview = self.customers(book).await?;
            let tables =
                StatementTable::for_book(&overview.customers, range, self.config.balance.policy);
            if tables.is_empty() {
                return Err(Error::EmptyStatement);
            }
            let labels = self.config.display.locale.labels();
            renderer.render(&html::render_document(&tables, labels)).await
        }
        .instrument(span)
        .await
    }
}

fn decode_children<T: DeserializeOwned>(node: Value) -> Result<Vec<T>> {
    match node {
        Value::Object(children) => children
            .into_values()
            .map(|child| Ok(serde_json::from_value(child)?))
            .collect(),
        other => Err(Error::Validation(format!(
            "expected a tree node with children, got {}",
            other
        ))),
    }
}

/// Splits a customer node into its record fields and the `entries` child.
fn decode_customer(mut node: Value) -> Result<CustomerLedger> {
    let entries_node = node
        .as_object_mut()
        .and_then(|fields| fields.remove(paths::ENTRIES_NODE));
    let record: CustomerRecord = serde_json::from_value(node)?;
    let entries = match entries_node {
        None => Vec::new(),
        Some(node) => decode_entries(node)?,
    };
    Ok(CustomerLedger::from_parts(record.into_customer(), entries))
}

fn decode_entries(node: Value) -> Result<Vec<Entry>> {
    match node {
        Value::Object(children) => children
            .into_iter()
            .map(|(key, child)| {
                let id = EntryId::from_string(&key)
                    .map_err(|_| Error::Validation(format!("malformed entry id: {}", key)))?;
                let record: EntryRecord = serde_json::from_value(child)?;
                record.into_entry(id)
            })
            .collect(),
        other => Err(Error::Validation(format!(
            "entry listing is not a tree node: {}",
            other
        ))),
    }
}

fn aggregate_fields(customer: &Customer) -> Result<Map<String, Value>> {
    let mut fields = Map::new();
    fields.insert("date".to_string(), serde_json::to_value(customer.date)?);
    fields.insert(
        "totalGave".to_string(),
        serde_json::to_value(customer.total_gave)?,
    );
    fields.insert(
        "totalGot".to_string(),
        serde_json::to_value(customer.total_got)?,
    );
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MockTreeStore;
    use crate::types::Money;
    use chrono::NaiveDate;

    fn directory(store: MockTreeStore) -> KhataDirectory {
        KhataDirectory::new(
            Arc::new(store),
            Session::new(UserId::new()),
            LedgerConfig::default(),
        )
    }

    #[tokio::test]
    async fn store_failure_surfaces_as_network_error() {
        let mut store = MockTreeStore::new();
        store
            .expect_get()
            .returning(|_| Err(Error::Network("offline".to_string())));

        let err = directory(store).books().await.unwrap_err();
        assert!(matches!(err, Error::Network(_)));
    }

    #[tokio::test]
    async fn missing_customer_is_not_found() {
        let mut store = MockTreeStore::new();
        store.expect_get().returning(|_| Ok(None));

        let err = directory(store)
            .ledger("shop", "Raju")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::NotFound {
                kind: "customer",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn duplicate_book_is_rejected_without_a_write() {
        let mut store = MockTreeStore::new();
        // No put/write_batch expectations: any write would fail the test.
        store
            .expect_get()
            .returning(|_| Ok(Some(serde_json::json!({"id": "00000000-0000-0000-0000-000000000000", "name": "shop"}))));

        let err = directory(store).create_book("shop").await.unwrap_err();
        assert!(matches!(err, Error::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn invalid_draft_never_reaches_the_store() {
        let store = MockTreeStore::new();
        let draft = EntryDraft::got(
            Money::from_paise(-5),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        );

        let err = directory(store)
            .record_entry("shop", "Raju", draft)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn invalid_name_never_reaches_the_store() {
        let store = MockTreeStore::new();
        let err = directory(store).create_book("a/b").await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}
