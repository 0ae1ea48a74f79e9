//! Terminal and JSON rendering of contacts.

use anyhow::Result;
use serde::Serialize;

use contact_book_core::models::Contact;

pub fn print_contact(contact: &Contact) {
    println!("--- Contact ---");
    println!("id:            {}", contact.id);
    println!("first_name:    {}", contact.first_name);
    println!("last_name:     {}", contact.last_name);
    println!("email:         {}", contact.email);
    println!("phone:         {}", contact.phone);
    println!("date_of_birth: {}", contact.date_of_birth);
    println!("owner:         {}", contact.user_id);
}

/// One line per contact, or `empty` when there are none.
pub fn print_contact_table(contacts: &[Contact], empty: &str) {
    if contacts.is_empty() {
        println!("{}", empty);
        return;
    }
    println!(
        "{:<6} {:<16} {:<16} {:<28} {:<16} {:<10} OWNER",
        "ID", "FIRST", "LAST", "EMAIL", "PHONE", "BIRTHDAY"
    );
    for c in contacts {
        println!(
            "{:<6} {:<16} {:<16} {:<28} {:<16} {:<10} {}",
            c.id, c.first_name, c.last_name, c.email, c.phone, c.date_of_birth, c.user_id
        );
    }
    println!();
    println!("{} contact(s)", contacts.len());
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
