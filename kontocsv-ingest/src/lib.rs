//! kontocsv-ingest: statement reconstruction from positioned page text and
//! the Kontoudskrift account statement parser.

pub mod currency;
pub mod dates;
pub mod error;
pub mod html;
pub mod parsers;
pub mod types;

pub use error::ParseError;
pub use html::Fragment;
pub use types::{BankEntry, DraftEntry, StatementLayout, StatementPeriod};
