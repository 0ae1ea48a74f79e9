//! Mutating commands: `add`, `update`, `remove`, plus the `check`
//! duplicate probe `add` relies on.
//!
//! `update` and `remove` only touch contacts owned by the caller; a
//! contact owned by someone else is reported exactly like a missing one.

use std::sync::Arc;

use anyhow::{bail, Result};

use contact_book_core::clock::SystemClock;
use contact_book_core::models::{Contact, ContactId, ContactPayload, UserId};

use crate::book::Book;
use crate::config::Config;
use crate::render;

/// Validate and create a contact, refusing emails or phones already in use.
pub async fn add_contact(book: &Book, payload: &ContactPayload, owner: UserId) -> Result<Contact> {
    let service = book.service();
    payload.validate(service.clock().today())?;

    if let Some(taken) = service
        .verify_email_phone(&payload.email, &payload.phone)
        .await?
    {
        bail!("contact with {} already exists", taken);
    }

    service.create(payload, owner).await
}

/// CLI entry point for `contacts add`.
pub async fn run_add(config: &Config, payload: ContactPayload, owner: UserId) -> Result<()> {
    let book = Book::open(config, Arc::new(SystemClock)).await?;
    let result = add_contact(&book, &payload, owner).await;
    book.close().await;

    let contact = result?;
    println!("Created contact {}", contact.id);
    render::print_contact(&contact);
    Ok(())
}

/// CLI entry point for `contacts update <id>`.
pub async fn run_update(
    config: &Config,
    id: ContactId,
    payload: ContactPayload,
    owner: UserId,
) -> Result<()> {
    let book = Book::open(config, Arc::new(SystemClock)).await?;
    if let Err(e) = payload.validate(book.service().clock().today()) {
        book.close().await;
        return Err(e.into());
    }
    let result = book.service().update(id, &payload, owner).await;
    book.close().await;

    match result? {
        Some(contact) => {
            println!("Updated contact {}", contact.id);
            render::print_contact(&contact);
            Ok(())
        }
        None => bail!("contact not found: {}", id),
    }
}

/// CLI entry point for `contacts remove <id>`.
pub async fn run_remove(config: &Config, id: ContactId, owner: UserId) -> Result<()> {
    let book = Book::open(config, Arc::new(SystemClock)).await?;
    let result = book.service().remove(id, owner).await;
    book.close().await;

    match result? {
        Some(contact) => {
            println!("Removed contact {}", contact.id);
            render::print_contact(&contact);
            Ok(())
        }
        None => bail!("contact not found: {}", id),
    }
}

/// CLI entry point for `contacts check`.
pub async fn run_check(config: &Config, email: &str, phone: &str) -> Result<()> {
    let book = Book::open(config, Arc::new(SystemClock)).await?;
    let result = book.service().verify_email_phone(email, phone).await;
    book.close().await;

    match result? {
        Some(taken) => println!("taken: {}", taken),
        None => println!("available"),
    }
    Ok(())
}
