//! Kontoudskrift account statement parser (positioned page text).
//!
//! Statement pages carry no table structure; each transaction is a soup of
//! absolutely positioned paragraphs. Records are rebuilt by walking the
//! fragments in emission order and classifying each one by its horizontal
//! offset: entry date, value date, description, credited amount or balance.
//!
//! Expected page shape, after the period header:
//!   15.10   16.10   Payment received           100,00+      1.500,00+
//!   ^57pt   ^98pt   ^description band          ^>390pt      ^>490pt

use std::sync::LazyLock;

use regex::Regex;

use crate::currency::decode_amount;
use crate::dates::{resolve_entry_date, resolve_value_date};
use crate::error::ParseError;
use crate::html::{document_pages, page_fragments, Fragment};
use crate::types::{BankEntry, DraftEntry, StatementLayout, StatementPeriod};

/// Body text on these statements is 9pt; spans in any other size are
/// headings, footers and page furniture.
const BODY_FONT: &str = "font-size:9pt";

/// Header line that opens the transaction section and anchors all dates:
/// "Period this statement relates to: 01.09.2016 to 30.11.2016"
const PERIOD_MARKER: &str = "Period this statement relates to";

static DAY_MONTH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d\d\.\d\d$").unwrap());

enum PageState {
    /// Before the period header; nothing on the page is classified yet.
    Seeking,
    /// Between the period header and the closing balance line.
    Recording {
        period: StatementPeriod,
        open: Option<DraftEntry>,
    },
    /// After the closing balance line; the rest of the page is ignored, but a
    /// record still open at that point is settled at end of page.
    Closed { open: Option<DraftEntry> },
}

/// Reconstruct the transaction records of one page, sorted by entry date.
pub fn parse_page(
    fragments: &[Fragment],
    layout: &StatementLayout,
) -> Result<Vec<BankEntry>, ParseError> {
    let mut entries = Vec::new();
    let mut state = PageState::Seeking;

    for fragment in fragments {
        if !fragment.span_style.contains(BODY_FONT) {
            continue;
        }
        state = match state {
            PageState::Seeking => seek(fragment)?,
            PageState::Recording { period, open } => {
                record(fragment, period, open, layout, &mut entries)?
            }
            closed @ PageState::Closed { .. } => closed,
        };
    }

    let open = match state {
        PageState::Seeking => None,
        PageState::Recording { open, .. } => open,
        PageState::Closed { open } => open,
    };
    if let Some(draft) = open {
        let entry_date = draft.entry_date;
        match draft.finish() {
            Some(done) => entries.push(done),
            None => {
                if let Some(entry_date) = entry_date {
                    return Err(ParseError::IncompletePageEnd(entry_date));
                }
                // a dangling draft without even an entry date is stray noise
            }
        }
    }

    entries.sort_by_key(|entry| entry.entry_date);
    Ok(entries)
}

/// Parse every page of a statement dump independently and merge the results,
/// sorted by entry date (stable, so same-day entries keep page order).
pub fn parse_document(
    html: &str,
    layout: &StatementLayout,
) -> Result<Vec<BankEntry>, ParseError> {
    let mut entries = Vec::new();
    for page in document_pages(html) {
        entries.extend(parse_page(&page_fragments(&page), layout)?);
    }
    entries.sort_by_key(|entry| entry.entry_date);
    Ok(entries)
}

fn seek(fragment: &Fragment) -> Result<PageState, ParseError> {
    if !fragment.text.starts_with(PERIOD_MARKER) {
        return Ok(PageState::Seeking);
    }

    let malformed = || ParseError::MalformedPeriod(fragment.text.clone());
    let (_, range) = fragment.text.split_once(": ").ok_or_else(malformed)?;
    let (start, end) = range.split_once(" to ").ok_or_else(malformed)?;
    let start = chrono::NaiveDate::parse_from_str(start, "%d.%m.%Y").map_err(|_| malformed())?;
    let end = chrono::NaiveDate::parse_from_str(end, "%d.%m.%Y").map_err(|_| malformed())?;

    Ok(PageState::Recording {
        period: StatementPeriod { start, end },
        open: None,
    })
}

fn record(
    fragment: &Fragment,
    period: StatementPeriod,
    mut open: Option<DraftEntry>,
    layout: &StatementLayout,
    entries: &mut Vec<BankEntry>,
) -> Result<PageState, ParseError> {
    // "Balance as at 30. 11. 2016" means there is no more useful info
    let closing = format!("Balance as at {}", period.end.format("%d. %m. %Y"));
    if fragment.text.starts_with(&closing) {
        return Ok(PageState::Closed { open });
    }

    let left = fragment.left_offset()?;

    if left == layout.entry_date_left {
        // Non-date text shares this column (headers, carried-over markers).
        if DAY_MONTH.is_match(&fragment.text) {
            if let Some(entry_date) = resolve_entry_date(&fragment.text, &period)? {
                // A new entry date starts the next record; the previous one
                // must be fully assembled by now.
                if let Some(previous) = open.take() {
                    match previous.finish() {
                        Some(done) => entries.push(done),
                        None => return Err(ParseError::IncompleteRecordOnNewEntry(entry_date)),
                    }
                }
                open = Some(DraftEntry {
                    entry_date: Some(entry_date),
                    ..DraftEntry::default()
                });
            }
        }
        return Ok(PageState::Recording { period, open });
    }

    if left == layout.value_date_left {
        if DAY_MONTH.is_match(&fragment.text) {
            if let Some(draft) = open.as_mut() {
                if let Some(entry_date) = draft.entry_date {
                    draft.value_date = Some(resolve_value_date(&fragment.text, entry_date)?);
                }
            }
        }
        return Ok(PageState::Recording { period, open });
    }

    // Amounts and description only attach once the value date is in place;
    // anything before that point on the line is inter-record noise.
    if let Some(draft) = open.as_mut() {
        if draft.value_date.is_some() {
            if left > layout.balance_min_left {
                draft.balance = Some(decode_amount(&fragment.text)?);
            } else if left > layout.credited_min_left {
                draft.credited = Some(decode_amount(&fragment.text)?);
            } else {
                draft.description.push(fragment.text.clone());
            }
        }
    }

    Ok(PageState::Recording { period, open })
}
