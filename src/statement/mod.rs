pub mod html;

use crate::ledger::{
    BalanceDirection, CustomerLedger, DateRange, NetBalance, NetBalancePolicy, SortOrder, Totals,
};
use crate::locale::StatementLabels;
use crate::types::Money;
use chrono::NaiveDate;

/// One statement line: a filtered entry with its 1-based serial number.
/// Exactly one of `received`/`given` is set; `net` is the entry's own
/// amount under its direction label.
#[derive(Clone, Debug, PartialEq)]
pub struct StatementRow {
    pub index: usize,
    pub date: NaiveDate,
    pub details: Option<String>,
    pub received: Option<Money>,
    pub given: Option<Money>,
    pub net: NetBalance,
}

/// The closing row: column sums over the data rows plus the policy-derived
/// headline. Sums over zero rows are zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StatementTotals {
    pub received: Money,
    pub given: Money,
    pub net: NetBalance,
}

/// A fully assembled statement for one customer, ready for rendering.
/// Locale-independent; labels are applied by the renderer.
#[derive(Clone, Debug)]
pub struct StatementTable {
    /// Customer name, the table caption.
    pub caption: String,
    /// Date span shown under the heading. Bounds come from the range where
    /// given, otherwise from the oldest/newest included entry; absent when
    /// neither side can be resolved.
    pub period: Option<(NaiveDate, NaiveDate)>,
    pub rows: Vec<StatementRow>,
    pub totals: StatementTotals,
}

impl StatementTable {
    /// Builds the statement for one customer: filtered entries oldest
    /// first, then a totals row summed over exactly those entries. An
    /// empty filtered set yields zero rows and zero totals.
    pub fn for_customer(
        ledger: &CustomerLedger,
        range: &DateRange,
        policy: NetBalancePolicy,
    ) -> StatementTable {
        let rows: Vec<StatementRow> = ledger
            .sorted_entries(SortOrder::OldestFirst)
            .into_iter()
            .filter(|entry| range.contains(entry.date))
            .enumerate()
            .map(|(position, entry)| {
                let direction = if entry.is_gave() {
                    BalanceDirection::WillPay
                } else {
                    BalanceDirection::WillGet
                };
                StatementRow {
                    index: position + 1,
                    date: entry.date,
                    details: entry.details.clone(),
                    received: entry.is_got().then_some(entry.amount),
                    given: entry.is_gave().then_some(entry.amount),
                    net: NetBalance {
                        amount: entry.amount,
                        direction,
                    },
                }
            })
            .collect();

        let received: Money = rows.iter().filter_map(|row| row.received).sum();
        let given: Money = rows.iter().filter_map(|row| row.given).sum();
        let totals = StatementTotals {
            received,
            given,
            net: NetBalance::from_totals(
                Totals {
                    gave: given,
                    got: received,
                },
                policy,
            ),
        };

        let start = range.start().or_else(|| rows.first().map(|row| row.date));
        let end = range.end().or_else(|| rows.last().map(|row| row.date));
        let period = start.zip(end);

        StatementTable {
            caption: ledger.customer.name.to_string(),
            period,
            rows,
            totals,
        }
    }

    /// Whole-khatabook export: one table per customer with at least one
    /// entry surviving the filter, customers with none are left out.
    pub fn for_book(
        ledgers: &[CustomerLedger],
        range: &DateRange,
        policy: NetBalancePolicy,
    ) -> Vec<StatementTable> {
        ledgers
            .iter()
            .map(|ledger| StatementTable::for_customer(ledger, range, policy))
            .filter(|table| !table.rows.is_empty())
            .collect()
    }
}

pub fn direction_label(labels: &StatementLabels, direction: BalanceDirection) -> &'static str {
    match direction {
        BalanceDirection::WillGet => labels.will_get,
        BalanceDirection::WillPay => labels.will_pay,
    }
}

/// Screen-style headline, currency symbol and direction included.
pub fn headline(labels: &StatementLabels, net: NetBalance) -> String {
    format!(
        "{}{} {}",
        labels.currency,
        net.amount,
        direction_label(labels, net.direction)
    )
}
