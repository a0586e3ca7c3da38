use crate::locale::StatementLabels;
use crate::statement::{direction_label, StatementTable};
use crate::types::Money;
use chrono::NaiveDate;

const CELL_BORDER: &str = "border: 1px solid black;";
const INNER_TABLE_STYLE: &str = "font-family: Arial, Helvetica, sans-serif;\
border-collapse: collapse;width: 100%;border: 1px solid black;";

/// Renders one statement table to the markup the PDF converter consumes:
/// caption, heading with the date span, six header cells, a data row per
/// entry and a closing totals row.
pub fn render_statement(table: &StatementTable, labels: &StatementLabels) -> String {
    let mut out = String::new();
    out.push_str("<table style=\"width: 100%;\">");
    out.push_str(&format!(
        "<caption style=\"font-style: italic;font-size:30px\">{}</caption>",
        escape(&table.caption)
    ));
    out.push_str(&format!(
        "<tr><td style=\"text-align: center;width:100%\">{}{}</td></tr>",
        labels.heading,
        period_span(table.period)
    ));

    out.push_str(&format!("<tr><table style=\"{}\">", INNER_TABLE_STYLE));
    out.push_str("<tr>");
    for label in [
        labels.serial,
        labels.date,
        labels.details,
        labels.received,
        labels.given,
        labels.net_column,
    ] {
        out.push_str(&format!("<th style=\"{}\">{}</th>", CELL_BORDER, label));
    }
    out.push_str("</tr>");

    for row in &table.rows {
        out.push_str("<tr>");
        out.push_str(&centered(&row.index.to_string()));
        out.push_str(&centered(&format_date(row.date)));
        out.push_str(&left(&escape(row.details.as_deref().unwrap_or(""))));
        out.push_str(&amount_cell(row.received, "color: green;"));
        out.push_str(&amount_cell(row.given, "color: red;"));
        out.push_str(&right(&format!(
            "{} {}",
            row.net.amount,
            direction_label(labels, row.net.direction)
        )));
        out.push_str("</tr>");
    }

    out.push_str("<tr>");
    out.push_str(&centered(""));
    out.push_str(&centered(""));
    out.push_str(&centered(labels.total_row));
    out.push_str(&amount_cell(Some(table.totals.received), "color: green;"));
    out.push_str(&amount_cell(Some(table.totals.given), "color: red;"));
    out.push_str(&right(&format!(
        "{} {}",
        table.totals.net.amount,
        direction_label(labels, table.totals.net.direction)
    )));
    out.push_str("</tr>");

    out.push_str("</table></tr></table>");
    out
}

/// Joins per-customer tables into one document, the whole-khatabook
/// export shape.
pub fn render_document(tables: &[StatementTable], labels: &StatementLabels) -> String {
    tables
        .iter()
        .map(|table| render_statement(table, labels))
        .collect::<Vec<_>>()
        .join("<br/><br/><br/>")
}

fn period_span(period: Option<(NaiveDate, NaiveDate)>) -> String {
    match period {
        Some((start, end)) => format!("({}-{})", format_date(start), format_date(end)),
        None => String::new(),
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

fn centered(content: &str) -> String {
    format!(
        "<td style=\"{}text-align: center\">{}</td>",
        CELL_BORDER, content
    )
}

fn left(content: &str) -> String {
    format!(
        "<td style=\"{}text-align:left\">{}</td>",
        CELL_BORDER, content
    )
}

fn right(content: &str) -> String {
    format!(
        "<td style=\"{}text-align:right\">{}</td>",
        CELL_BORDER, content
    )
}

fn amount_cell(amount: Option<Money>, color: &str) -> String {
    let content = amount.map(|m| m.to_string()).unwrap_or_default();
    format!(
        "<td style=\"{}text-align:right;{}\">{}</td>",
        CELL_BORDER, color, content
    )
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{
        Customer, CustomerLedger, DateRange, EntryDraft, NetBalancePolicy,
    };
    use crate::locale::Locale;
    use crate::types::{EntryId, NodeKey, Timestamp};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn table_for(name: &str, entries: &[(i64, bool, NaiveDate)]) -> StatementTable {
        let key = NodeKey::try_from(name.to_owned()).unwrap();
        let mut ledger = CustomerLedger::new(Customer::new(key, Timestamp::from_millis(0)));
        for (at, (rupees, is_got, date)) in entries.iter().enumerate() {
            let amount = Money::from_rupees(*rupees);
            let draft = if *is_got {
                EntryDraft::got(amount, *date)
            } else {
                EntryDraft::gave(amount, *date)
            };
            ledger.add_entry(draft.into_entry(EntryId::new(), Timestamp::from_millis(at as u64)));
        }
        StatementTable::for_customer(
            &ledger,
            &DateRange::unbounded(),
            NetBalancePolicy::Difference,
        )
    }

    #[test]
    fn renders_caption_heading_and_headers() {
        let table = table_for("Raju", &[(100, true, d(2024, 1, 5))]);
        let html = render_statement(&table, Locale::Gujarati.labels());
        assert!(html.contains(">Raju</caption>"));
        assert!(html.contains("ગ્રાહક વ્યવહાર ઇતિહાસ(05/01/2024-05/01/2024)"));
        assert!(html.contains(">તારીખ</th>"));
        assert!(html.contains(">તમને મળયા(+)</th>"));
        assert!(html.contains(">તમે આપ્યા(-)</th>"));
        assert!(html.contains(">કુલ(લેવાના/ચુકવશો)</th>"));
    }

    #[test]
    fn data_row_puts_amount_in_the_direction_column() {
        let table = table_for("Raju", &[(100, true, d(2024, 1, 5))]);
        let html = render_statement(&table, Locale::Gujarati.labels());
        assert!(html.contains("color: green;\">100</td>"));
        assert!(html.contains("100 લેવાના</td>"));
    }

    #[test]
    fn empty_table_still_carries_a_zero_totals_row() {
        let table = table_for("Raju", &[]);
        let html = render_statement(&table, Locale::Gujarati.labels());
        assert!(html.contains(">Total</td>"));
        assert!(html.contains("color: green;\">0</td>"));
        assert!(html.contains("color: red;\">0</td>"));
    }

    #[test]
    fn free_text_is_escaped() {
        let key = NodeKey::try_from("A&B <shop>".to_owned()).unwrap();
        let mut ledger = CustomerLedger::new(Customer::new(key, Timestamp::from_millis(0)));
        ledger.add_entry(
            EntryDraft::got(Money::from_rupees(1), d(2024, 1, 5))
                .with_details("5kg <sugar> & tea")
                .into_entry(EntryId::new(), Timestamp::from_millis(1)),
        );
        let table = StatementTable::for_customer(
            &ledger,
            &DateRange::unbounded(),
            NetBalancePolicy::Difference,
        );
        let html = render_statement(&table, Locale::Gujarati.labels());
        assert!(html.contains("A&amp;B &lt;shop&gt;"));
        assert!(html.contains("5kg &lt;sugar&gt; &amp; tea"));
        assert!(!html.contains("<sugar>"));
    }

    #[test]
    fn document_joins_tables_with_breaks() {
        let tables = vec![
            table_for("Raju", &[(10, true, d(2024, 1, 1))]),
            table_for("Mina", &[(20, false, d(2024, 1, 2))]),
        ];
        let html = render_document(&tables, Locale::Gujarati.labels());
        assert!(html.contains("<br/><br/><br/>"));
        assert!(html.contains(">Raju</caption>"));
        assert!(html.contains(">Mina</caption>"));
    }
}
