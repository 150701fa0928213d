//! Data model for reconstructed statement lines.

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Horizontal column layout of one statement format, in layout points.
///
/// A fragment's role on the page is decided purely by where its paragraph
/// sits: the two date columns are exact positions, amounts start past fixed
/// thresholds, and everything in between is description text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementLayout {
    pub entry_date_left: u32,
    pub value_date_left: u32,
    pub credited_min_left: u32,
    pub balance_min_left: u32,
}

impl StatementLayout {
    /// Column positions observed on Kontoudskrift account statements.
    pub const KONTOUDSKRIFT: StatementLayout = StatementLayout {
        entry_date_left: 57,
        value_date_left: 98,
        credited_min_left: 390,
        balance_min_left: 490,
    };
}

impl Default for StatementLayout {
    fn default() -> Self {
        Self::KONTOUDSKRIFT
    }
}

/// Date range a statement page covers, taken from its period header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// A record still being assembled while walking a page; fields land one
/// fragment at a time in column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftEntry {
    pub entry_date: Option<NaiveDate>,
    pub value_date: Option<NaiveDate>,
    pub description: Vec<String>,
    pub credited: Option<BigDecimal>,
    pub balance: Option<BigDecimal>,
}

impl DraftEntry {
    pub fn is_complete(&self) -> bool {
        self.entry_date.is_some()
            && self.value_date.is_some()
            && !self.description.is_empty()
            && self.credited.is_some()
            && self.balance.is_some()
    }

    /// Promote the draft to a finalized entry, or `None` while any field is
    /// still missing.
    pub fn finish(self) -> Option<BankEntry> {
        if self.description.is_empty() {
            return None;
        }
        Some(BankEntry {
            entry_date: self.entry_date?,
            value_date: self.value_date?,
            description: self.description,
            credited: self.credited?,
            balance: self.balance?,
        })
    }
}

/// One normalized statement line. Only complete drafts become entries, so
/// every field is always present here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankEntry {
    /// Booking date as printed by the bank.
    pub entry_date: NaiveDate,
    /// Settlement date; printed within a week of the entry date.
    pub value_date: NaiveDate,
    pub description: Vec<String>,
    pub credited: BigDecimal,
    pub balance: BigDecimal,
}

impl BankEntry {
    /// Row layout of the ledger export: entry date twice, then description,
    /// credited amount and running balance.
    pub fn as_row(&self) -> [String; 5] {
        let date = self.entry_date.format("%Y/%m/%d").to_string();
        [
            date.clone(),
            date,
            self.description.join(" "),
            format_amount(&self.credited),
            format_amount(&self.balance),
        ]
    }
}

/// Two-decimal display form used in CSV rows.
pub fn format_amount(amount: &BigDecimal) -> String {
    amount.with_scale(2).to_string()
}
