use chrono::NaiveDate;
use khata_ledger::*;
use std::sync::Arc;

fn directory() -> KhataDirectory {
    KhataDirectory::new(
        Arc::new(MemoryStore::new()),
        Session::new(UserId::new()),
        LedgerConfig::default(),
    )
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[tokio::test]
async fn test_book_listing_and_duplicates() -> anyhow::Result<()> {
    let directory = directory();
    directory.create_book("kirana shop").await?;
    directory.create_book("dairy").await?;

    let books = directory.books().await?;
    let names: Vec<&str> = books.iter().map(|book| book.name.as_str()).collect();
    assert_eq!(names, vec!["dairy", "kirana shop"]);

    let err = directory.create_book("dairy").await.unwrap_err();
    assert!(matches!(err, Error::AlreadyExists(_)));
    Ok(())
}

#[tokio::test]
async fn test_customer_lifecycle() -> anyhow::Result<()> {
    let directory = directory();
    directory.create_book("shop").await?;
    directory.create_customer("shop", "Raju").await?;
    directory.create_customer("shop", "Mina").await?;

    let overview = directory.customers("shop").await?;
    assert_eq!(overview.customers.len(), 2);

    let err = directory.create_customer("shop", "Raju").await.unwrap_err();
    assert!(matches!(err, Error::AlreadyExists(_)));

    directory.delete_customer("shop", "Mina").await?;
    let overview = directory.customers("shop").await?;
    assert_eq!(overview.customers.len(), 1);
    assert_eq!(overview.customers[0].customer.name.as_str(), "Raju");

    let err = directory.ledger("shop", "Mina").await.unwrap_err();
    assert!(matches!(err, Error::NotFound { kind: "customer", .. }));
    Ok(())
}

#[tokio::test]
async fn test_customer_requires_existing_book() {
    let directory = directory();
    let err = directory.create_customer("ghost", "Raju").await.unwrap_err();
    assert!(matches!(err, Error::NotFound { kind: "khatabook", .. }));
}

#[tokio::test]
async fn test_record_entry_updates_totals_across_reloads() -> anyhow::Result<()> {
    let directory = directory();
    directory.create_book("shop").await?;
    directory.create_customer("shop", "Raju").await?;

    let totals = directory
        .record_entry(
            "shop",
            "Raju",
            EntryDraft::got(Money::from_rupees(500), d(2024, 1, 10)),
        )
        .await?;
    assert_eq!(totals.got, Money::from_rupees(500));

    let totals = directory
        .record_entry(
            "shop",
            "Raju",
            EntryDraft::gave(Money::from_rupees(200), d(2024, 1, 12)).with_details("seed bags"),
        )
        .await?;
    assert_eq!(totals.got, Money::from_rupees(500));
    assert_eq!(totals.gave, Money::from_rupees(200));

    // A fresh load must see the same aggregates and both entries.
    let ledger = directory.ledger("shop", "Raju").await?;
    assert_eq!(ledger.customer.total_got, Money::from_rupees(500));
    assert_eq!(ledger.customer.total_gave, Money::from_rupees(200));
    assert_eq!(ledger.entries().len(), 2);

    let net = ledger.net_balance(NetBalancePolicy::Difference);
    assert_eq!(net.amount, Money::from_rupees(300));
    assert_eq!(net.direction, BalanceDirection::WillGet);
    Ok(())
}

#[tokio::test]
async fn test_customers_sorted_by_latest_activity() -> anyhow::Result<()> {
    let directory = directory();
    directory.create_book("shop").await?;
    directory.create_customer("shop", "Raju").await?;
    directory.create_customer("shop", "Mina").await?;

    // Raju was created first; recording now makes that ledger the most recent.
    directory
        .record_entry(
            "shop",
            "Raju",
            EntryDraft::got(Money::from_rupees(10), d(2024, 1, 1)),
        )
        .await?;

    let overview = directory.customers("shop").await?;
    let names: Vec<&str> = overview
        .customers
        .iter()
        .map(|ledger| ledger.customer.name.as_str())
        .collect();
    assert_eq!(names, vec!["Raju", "Mina"]);
    assert_eq!(overview.summary.total_got, Money::from_rupees(10));
    Ok(())
}

#[tokio::test]
async fn test_search_is_case_insensitive_substring() -> anyhow::Result<()> {
    let directory = directory();
    directory.create_book("shop").await?;
    directory.create_customer("shop", "Rajesh Kumar").await?;
    directory.create_customer("shop", "Mina").await?;

    let hits = directory.search_customers("shop", "raj").await?;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].customer.name.as_str(), "Rajesh Kumar");

    let none = directory.search_customers("shop", "xyz").await?;
    assert!(none.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_rename_customer_keeps_entries_and_totals() -> anyhow::Result<()> {
    let directory = directory();
    directory.create_book("shop").await?;
    directory.create_customer("shop", "Raju").await?;
    directory
        .record_entry(
            "shop",
            "Raju",
            EntryDraft::got(Money::from_rupees(500), d(2024, 1, 10)),
        )
        .await?;

    let renamed = directory.rename_customer("shop", "Raju", "Raju bhai").await?;
    assert_eq!(renamed.name.as_str(), "Raju bhai");

    let err = directory.ledger("shop", "Raju").await.unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));

    let ledger = directory.ledger("shop", "Raju bhai").await?;
    assert_eq!(ledger.entries().len(), 1);
    assert_eq!(ledger.customer.total_got, Money::from_rupees(500));
    Ok(())
}

#[tokio::test]
async fn test_rename_customer_onto_existing_name_is_rejected() -> anyhow::Result<()> {
    let directory = directory();
    directory.create_book("shop").await?;
    directory.create_customer("shop", "Raju").await?;
    directory.create_customer("shop", "Mina").await?;
    directory
        .record_entry(
            "shop",
            "Raju",
            EntryDraft::got(Money::from_rupees(500), d(2024, 1, 10)),
        )
        .await?;

    let err = directory
        .rename_customer("shop", "Raju", "Mina")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::AlreadyExists(_)));

    // The refused rename leaves both customers readable under their old names.
    let ledger = directory.ledger("shop", "Raju").await?;
    assert_eq!(ledger.entries().len(), 1);
    assert_eq!(ledger.customer.total_got, Money::from_rupees(500));
    assert!(directory.ledger("shop", "Mina").await.is_ok());
    Ok(())
}

#[tokio::test]
async fn test_rename_book_moves_customers() -> anyhow::Result<()> {
    let directory = directory();
    directory.create_book("shop").await?;
    directory.create_customer("shop", "Raju").await?;
    directory
        .record_entry(
            "shop",
            "Raju",
            EntryDraft::got(Money::from_rupees(500), d(2024, 1, 10)),
        )
        .await?;

    let book = directory.rename_book("shop", "kirana").await?;
    assert_eq!(book.name.as_str(), "kirana");

    let names: Vec<String> = directory
        .books()
        .await?
        .into_iter()
        .map(|book| book.name.to_string())
        .collect();
    assert_eq!(names, vec!["kirana"]);

    let ledger = directory.ledger("kirana", "Raju").await?;
    assert_eq!(ledger.customer.total_got, Money::from_rupees(500));
    assert!(directory.customers("shop").await?.customers.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_rename_book_onto_existing_name_is_rejected() -> anyhow::Result<()> {
    let directory = directory();
    directory.create_book("shop").await?;
    directory.create_book("dairy").await?;

    let err = directory.rename_book("shop", "dairy").await.unwrap_err();
    assert!(matches!(err, Error::AlreadyExists(_)));

    // The refused rename leaves both books in place.
    let books = directory.books().await?;
    let names: Vec<&str> = books.iter().map(|book| book.name.as_str()).collect();
    assert_eq!(names, vec!["dairy", "shop"]);
    Ok(())
}

#[tokio::test]
async fn test_delete_book_cascades_to_customers() -> anyhow::Result<()> {
    let directory = directory();
    directory.create_book("shop").await?;
    directory.create_customer("shop", "Raju").await?;
    directory
        .record_entry(
            "shop",
            "Raju",
            EntryDraft::got(Money::from_rupees(500), d(2024, 1, 10)),
        )
        .await?;

    directory.delete_book("shop").await?;

    assert!(directory.books().await?.is_empty());
    assert!(directory.customers("shop").await?.customers.is_empty());
    let err = directory.ledger("shop", "Raju").await.unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
    Ok(())
}

#[tokio::test]
async fn test_sessions_do_not_see_each_other() -> anyhow::Result<()> {
    let store = Arc::new(MemoryStore::new());
    let first = KhataDirectory::new(
        store.clone(),
        Session::new(UserId::new()),
        LedgerConfig::default(),
    );
    let second = KhataDirectory::new(
        store,
        Session::new(UserId::new()),
        LedgerConfig::default(),
    );

    first.create_book("shop").await?;
    assert_eq!(first.books().await?.len(), 1);
    assert!(second.books().await?.is_empty());
    Ok(())
}

#[test]
fn test_subscriber_init_is_safe_to_repeat() {
    observability::init();
    observability::init();
}

#[tokio::test]
async fn test_path_unsafe_names_are_rejected() {
    let directory = directory();
    for name in ["a/b", "a.b", "a#b", "a$b", "a[b]", ""] {
        let err = directory.create_book(name).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)), "accepted {:?}", name);
    }
}
