//! Contact listing filters.
//!
//! A [`ListQuery`] is what a caller asks for; a [`ContactFilter`] is the
//! single branch the store actually runs. Branches never combine: the
//! first present field decides the shape of the whole query, and paging
//! only applies when no field is present.
//!
//! | Present fields | Branch | Predicate |
//! |---|---|---|
//! | first (+ last and/or email) | [`ContactFilter::FirstName`] | `first AND (last OR email)` |
//! | first only | [`ContactFilter::FirstName`] | `first` |
//! | last (+ email) | [`ContactFilter::LastName`] | `last AND email` |
//! | last only | [`ContactFilter::LastName`] | `last` |
//! | email | [`ContactFilter::Email`] | `email` |
//! | none | [`ContactFilter::Page`] | `OFFSET skip LIMIT limit` |

use crate::models::Contact;

/// Raw listing request as decoded from a caller.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub skip: u32,
    pub limit: u32,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

/// The one branch a listing resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactFilter {
    /// Exact first name. When either alternative is set, the contact must
    /// also match at least one of the alternatives that are set.
    FirstName {
        first_name: String,
        last_name: Option<String>,
        email: Option<String>,
    },
    /// Exact last name, and exact email when set.
    LastName {
        last_name: String,
        email: Option<String>,
    },
    /// Exact email.
    Email { email: String },
    /// No predicate; an offset/limit slice ordered by id.
    Page { skip: u32, limit: u32 },
}

/// Empty strings mean "not given".
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl From<ListQuery> for ContactFilter {
    fn from(query: ListQuery) -> Self {
        let first_name = present(query.first_name);
        let last_name = present(query.last_name);
        let email = present(query.email);

        match (first_name, last_name, email) {
            (Some(first_name), last_name, email) => ContactFilter::FirstName {
                first_name,
                last_name,
                email,
            },
            (None, Some(last_name), email) => ContactFilter::LastName { last_name, email },
            (None, None, Some(email)) => ContactFilter::Email { email },
            (None, None, None) => ContactFilter::Page {
                skip: query.skip,
                limit: query.limit,
            },
        }
    }
}

impl ContactFilter {
    /// An unfiltered slice.
    pub fn page(skip: u32, limit: u32) -> Self {
        ContactFilter::Page { skip, limit }
    }

    /// Whether `contact` satisfies the branch predicate.
    ///
    /// Paging is not a predicate, so [`ContactFilter::Page`] matches
    /// everything; backends apply `skip`/`limit` themselves.
    pub fn matches(&self, contact: &Contact) -> bool {
        match self {
            ContactFilter::FirstName {
                first_name,
                last_name,
                email,
            } => {
                if contact.first_name != *first_name {
                    return false;
                }
                if last_name.is_none() && email.is_none() {
                    return true;
                }
                last_name.as_deref() == Some(contact.last_name.as_str())
                    || email.as_deref() == Some(contact.email.as_str())
            }
            ContactFilter::LastName { last_name, email } => {
                contact.last_name == *last_name
                    && email.as_deref().map_or(true, |e| contact.email == e)
            }
            ContactFilter::Email { email } => contact.email == *email,
            ContactFilter::Page { .. } => true,
        }
    }
}
