use serde::{Deserialize, Serialize};

/// Statement label language. The app ships Gujarati first; English is the
/// fallback for embedders that want latin-script exports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "gu")]
    Gujarati,
    #[serde(rename = "en")]
    English,
}

/// Fixed strings for the six statement columns, the direction labels and
/// the table heading.
#[derive(Debug)]
pub struct StatementLabels {
    pub heading: &'static str,
    pub serial: &'static str,
    pub date: &'static str,
    pub details: &'static str,
    pub received: &'static str,
    pub given: &'static str,
    pub net_column: &'static str,
    pub will_get: &'static str,
    pub will_pay: &'static str,
    pub total_row: &'static str,
    pub currency: &'static str,
}

const GUJARATI: StatementLabels = StatementLabels {
    heading: "ગ્રાહક વ્યવહાર ઇતિહાસ",
    serial: "S.No",
    date: "તારીખ",
    details: "વિગત",
    received: "તમને મળયા(+)",
    given: "તમે આપ્યા(-)",
    net_column: "કુલ(લેવાના/ચુકવશો)",
    will_get: "લેવાના",
    will_pay: "ચુકવશો",
    // The totals-row marker stays English in every locale.
    total_row: "Total",
    currency: "₹",
};

const ENGLISH: StatementLabels = StatementLabels {
    heading: "Customer transaction history",
    serial: "S.No",
    date: "Date",
    details: "Details",
    received: "You got(+)",
    given: "You gave(-)",
    net_column: "Total(to receive/to pay)",
    will_get: "to receive",
    will_pay: "to pay",
    total_row: "Total",
    currency: "₹",
};

impl Locale {
    pub fn labels(&self) -> &'static StatementLabels {
        match self {
            Locale::Gujarati => &GUJARATI,
            Locale::English => &ENGLISH,
        }
    }
}
