//! Listing commands: `contacts list` and `contacts birthdays`.

use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDate;

use contact_book_core::clock::{Clock, FixedClock, SystemClock};
use contact_book_core::filter::ListQuery;

use crate::book::Book;
use crate::config::Config;
use crate::render;

/// Options for `contacts list`, before the limit is resolved.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub skip: u32,
    pub limit: Option<u32>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub json: bool,
}

/// CLI entry point for `contacts list`.
pub async fn run_list(config: &Config, opts: ListOptions) -> Result<()> {
    let query = ListQuery {
        skip: opts.skip,
        limit: config.paging.resolve_limit(opts.limit)?,
        first_name: opts.first_name,
        last_name: opts.last_name,
        email: opts.email,
    };

    let book = Book::open(config, Arc::new(SystemClock)).await?;
    let result = book.service().list(query).await;
    book.close().await;

    let contacts = result?;
    if opts.json {
        return render::print_json(&contacts);
    }
    render::print_contact_table(&contacts, "No contacts found.");
    Ok(())
}

/// CLI entry point for `contacts birthdays`.
///
/// `today` pins the clock; without it the host's local date is used.
pub async fn run_birthdays(
    config: &Config,
    skip: u32,
    limit: Option<u32>,
    today: Option<NaiveDate>,
    json: bool,
) -> Result<()> {
    let limit = config.paging.resolve_limit(limit)?;
    let clock: Arc<dyn Clock> = match today {
        Some(date) => Arc::new(FixedClock(date)),
        None => Arc::new(SystemClock),
    };

    let book = Book::open(config, clock).await?;
    let result = book.service().upcoming_birthdays(skip, limit).await;
    book.close().await;

    let contacts = result?;
    if json {
        return render::print_json(&contacts);
    }
    render::print_contact_table(&contacts, "No upcoming birthdays.");
    Ok(())
}
