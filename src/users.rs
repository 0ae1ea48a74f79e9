//! Minimal user registry.
//!
//! Contacts reference `users(id)`, so a user row must exist before it can
//! own anything. Authentication and everything else about users lives
//! outside this crate.

use anyhow::{bail, Result};
use sqlx::{Row, SqlitePool};
use tracing::info;

use contact_book_core::models::{User, UserId};
use contact_book_core::validate::validate_email;

use crate::config::Config;
use crate::db;

pub async fn create_user(pool: &SqlitePool, username: &str, email: &str) -> Result<User> {
    if username.trim().is_empty() {
        bail!("username cannot be empty");
    }
    validate_email(email)?;

    let created_at = chrono::Utc::now().timestamp();
    let result = sqlx::query("INSERT INTO users (username, email, created_at) VALUES (?, ?, ?)")
        .bind(username)
        .bind(email)
        .bind(created_at)
        .execute(pool)
        .await?;
    info!(user_id = result.last_insert_rowid(), "registered user");

    Ok(User {
        id: UserId(result.last_insert_rowid()),
        username: username.to_string(),
        email: email.to_string(),
        created_at,
    })
}

pub async fn list_users(pool: &SqlitePool) -> Result<Vec<User>> {
    let rows = sqlx::query("SELECT id, username, email, created_at FROM users ORDER BY id")
        .fetch_all(pool)
        .await?;

    Ok(rows
        .iter()
        .map(|row| User {
            id: UserId(row.get("id")),
            username: row.get("username"),
            email: row.get("email"),
            created_at: row.get("created_at"),
        })
        .collect())
}

/// CLI entry point for `contacts users add`.
pub async fn run_users_add(config: &Config, username: &str, email: &str) -> Result<()> {
    let pool = db::connect(config).await?;
    let result = create_user(&pool, username, email).await;
    pool.close().await;

    let user = result?;
    println!("Created user {} ({}) with id {}", user.username, user.email, user.id);
    Ok(())
}

/// CLI entry point for `contacts users list`.
pub async fn run_users_list(config: &Config) -> Result<()> {
    let pool = db::connect(config).await?;
    let result = list_users(&pool).await;
    pool.close().await;

    let users = result?;
    if users.is_empty() {
        println!("No users.");
        return Ok(());
    }
    println!("{:<6} {:<20} EMAIL", "ID", "USERNAME");
    for user in &users {
        println!("{:<6} {:<20} {}", user.id.0, user.username, user.email);
    }
    Ok(())
}
