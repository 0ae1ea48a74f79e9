//! Upcoming-birthday window.
//!
//! The window is bounded by the current calendar month: a birthday counts
//! as upcoming when it falls in today's month on a day between today and
//! [`WINDOW_DAYS`] days later. Birthdays early next month never count,
//! even when fewer than [`WINDOW_DAYS`] days away.

use chrono::{Datelike, NaiveDate};

use crate::models::Contact;

/// Width of the window, in days after today (inclusive).
pub const WINDOW_DAYS: u32 = 7;

/// Whether a person born on `date_of_birth` has a birthday in the window
/// starting at `today`.
pub fn in_window(date_of_birth: NaiveDate, today: NaiveDate) -> bool {
    if date_of_birth.month() != today.month() {
        return false;
    }
    let day = date_of_birth.day();
    day >= today.day() && day - today.day() <= WINDOW_DAYS
}

/// Keep the contacts whose birthday falls in the window, preserving order.
pub fn retain_upcoming(contacts: Vec<Contact>, today: NaiveDate) -> Vec<Contact> {
    contacts
        .into_iter()
        .filter(|c| in_window(c.date_of_birth, today))
        .collect()
}
