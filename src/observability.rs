use crate::types::NodeKey;
use tracing::Span;
use tracing_subscriber::EnvFilter;

/// Installs the process-wide JSON subscriber, filtered through `RUST_LOG`.
/// Safe to call more than once; later calls are no-ops.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

pub fn trace_ledger_load(book: &NodeKey, customer: &NodeKey) -> Span {
    tracing::info_span!(
        "ledger_load",
        book = %book,
        customer = %customer,
    )
}

pub fn trace_entry_record(book: &NodeKey, customer: &NodeKey) -> Span {
    tracing::info_span!(
        "entry_record",
        book = %book,
        customer = %customer,
    )
}

pub fn trace_export(book: &NodeKey) -> Span {
    tracing::info_span!(
        "statement_export",
        book = %book,
    )
}
