//! Parse failures that abort a statement document.

use chrono::NaiveDate;
use thiserror::Error;

/// Anything unexpected is treated as evidence that the layout heuristics no
/// longer hold for this statement; there is no skip-and-continue.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown end character on currency {0:?}")]
    MalformedCurrency(String),

    #[error("timestamp {text:?} could not be assigned within range {start} - {end}")]
    DateOutOfRange {
        text: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("value timestamp {text:?} is not within a week of entry date {entry_date}")]
    ValueDateUnresolved { text: String, entry_date: NaiveDate },

    #[error("no left position in paragraph style ({0})")]
    MissingLayoutOffset(String),

    #[error("could not read statement period from {0:?}")]
    MalformedPeriod(String),

    #[error("incomplete record found new entry timestamp {0}")]
    IncompleteRecordOnNewEntry(NaiveDate),

    #[error("page ended on incomplete record dated {0}")]
    IncompletePageEnd(NaiveDate),
}
