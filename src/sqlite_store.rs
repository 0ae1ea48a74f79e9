//! SQLite-backed [`ContactStore`] implementation.
//!
//! Each [`ContactFilter`] branch becomes one `SELECT` built with
//! [`QueryBuilder`]; owner-scoped mutations look the row up and change it
//! inside a single transaction. Dates are stored as `YYYY-MM-DD` text.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

use contact_book_core::filter::ContactFilter;
use contact_book_core::models::{Contact, ContactId, ContactPayload, UserId};
use contact_book_core::store::ContactStore;

const DATE_FORMAT: &str = "%Y-%m-%d";

const SELECT_CONTACT: &str =
    "SELECT id, first_name, last_name, email, phone, date_of_birth, user_id FROM contacts";

const SELECT_BY_ID: &str = "SELECT id, first_name, last_name, email, phone, date_of_birth, user_id \
     FROM contacts WHERE id = ?";

const SELECT_OWNED: &str = "SELECT id, first_name, last_name, email, phone, date_of_birth, user_id \
     FROM contacts WHERE id = ? AND user_id = ?";

/// SQLite implementation of the [`ContactStore`] trait.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn row_to_contact(row: &SqliteRow) -> Result<Contact> {
    let raw_date: String = row.get("date_of_birth");
    let date_of_birth = NaiveDate::parse_from_str(&raw_date, DATE_FORMAT)
        .with_context(|| format!("invalid date_of_birth in database: '{}'", raw_date))?;
    Ok(Contact {
        id: row.get("id"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        email: row.get("email"),
        phone: row.get("phone"),
        date_of_birth,
        user_id: UserId(row.get("user_id")),
    })
}

/// Append the `WHERE`/`ORDER BY`/`LIMIT` clauses for one filter branch.
fn push_filter<'a>(qb: &mut QueryBuilder<'a, Sqlite>, filter: &'a ContactFilter) {
    match filter {
        ContactFilter::FirstName {
            first_name,
            last_name,
            email,
        } => {
            qb.push(" WHERE first_name = ").push_bind(first_name.as_str());
            let alternatives: Vec<(&str, &str)> = [("last_name", last_name), ("email", email)]
                .into_iter()
                .filter_map(|(column, value)| value.as_deref().map(|v| (column, v)))
                .collect();
            if !alternatives.is_empty() {
                qb.push(" AND (");
                for (i, (column, value)) in alternatives.into_iter().enumerate() {
                    if i > 0 {
                        qb.push(" OR ");
                    }
                    qb.push(column).push(" = ").push_bind(value);
                }
                qb.push(")");
            }
            qb.push(" ORDER BY id");
        }
        ContactFilter::LastName { last_name, email } => {
            qb.push(" WHERE last_name = ").push_bind(last_name.as_str());
            if let Some(email) = email {
                qb.push(" AND email = ").push_bind(email.as_str());
            }
            qb.push(" ORDER BY id");
        }
        ContactFilter::Email { email } => {
            qb.push(" WHERE email = ").push_bind(email.as_str());
            qb.push(" ORDER BY id");
        }
        ContactFilter::Page { skip, limit } => {
            qb.push(" ORDER BY id LIMIT ")
                .push_bind(i64::from(*limit))
                .push(" OFFSET ")
                .push_bind(i64::from(*skip));
        }
    }
}

#[async_trait]
impl ContactStore for SqliteStore {
    async fn get_contact(&self, id: ContactId) -> Result<Option<Contact>> {
        let row = sqlx::query(SELECT_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_contact).transpose()
    }

    async fn list_contacts(&self, filter: &ContactFilter) -> Result<Vec<Contact>> {
        let mut qb = QueryBuilder::<Sqlite>::new(SELECT_CONTACT);
        push_filter(&mut qb, filter);

        let rows = qb.build().fetch_all(&self.pool).await?;
        rows.iter().map(row_to_contact).collect()
    }

    async fn find_email(&self, email: &str) -> Result<Option<String>> {
        let found: Option<String> =
            sqlx::query_scalar("SELECT email FROM contacts WHERE email = ? ORDER BY id LIMIT 1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(found)
    }

    async fn find_phone(&self, phone: &str) -> Result<Option<String>> {
        let found: Option<String> =
            sqlx::query_scalar("SELECT phone FROM contacts WHERE phone = ? ORDER BY id LIMIT 1")
            .bind(phone)
            .fetch_optional(&self.pool)
            .await?;
        Ok(found)
    }

    async fn insert_contact(&self, payload: &ContactPayload, owner: UserId) -> Result<Contact> {
        let result = sqlx::query(
            r#"
            INSERT INTO contacts (first_name, last_name, email, phone, date_of_birth, user_id)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&payload.first_name)
        .bind(&payload.last_name)
        .bind(&payload.email)
        .bind(&payload.phone)
        .bind(format_date(payload.date_of_birth))
        .bind(owner.0)
        .execute(&self.pool)
        .await?;

        Ok(Contact::from_payload(result.last_insert_rowid(), payload, owner))
    }

    async fn update_owned(
        &self,
        id: ContactId,
        payload: &ContactPayload,
        owner: UserId,
    ) -> Result<Option<Contact>> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(SELECT_OWNED)
            .bind(id)
            .bind(owner.0)
            .fetch_optional(&mut *tx)
            .await?;
        let mut contact = match row {
            Some(row) => row_to_contact(&row)?,
            None => return Ok(None),
        };

        sqlx::query(
            r#"
            UPDATE contacts
            SET first_name = ?, last_name = ?, email = ?, phone = ?, date_of_birth = ?
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(&payload.first_name)
        .bind(&payload.last_name)
        .bind(&payload.email)
        .bind(&payload.phone)
        .bind(format_date(payload.date_of_birth))
        .bind(id)
        .bind(owner.0)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        contact.apply(payload);
        Ok(Some(contact))
    }

    async fn delete_owned(&self, id: ContactId, owner: UserId) -> Result<Option<Contact>> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(SELECT_OWNED)
            .bind(id)
            .bind(owner.0)
            .fetch_optional(&mut *tx)
            .await?;
        let contact = match row {
            Some(row) => row_to_contact(&row)?,
            None => return Ok(None),
        };

        sqlx::query("DELETE FROM contacts WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(owner.0)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(contact))
    }
}
