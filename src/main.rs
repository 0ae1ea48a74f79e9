//! # contact-book CLI (`contacts`)
//!
//! ## Usage
//!
//! ```bash
//! contacts --config ./config/contacts.toml [--user <id>] <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `contacts init` | Create the SQLite database and run schema migrations |
//! | `contacts users add <username> <email>` | Register a user |
//! | `contacts users list` | List registered users |
//! | `contacts add ...` | Create a contact owned by `--user` |
//! | `contacts get <id>` | Show one contact |
//! | `contacts list` | List contacts, optionally filtered by name or email |
//! | `contacts birthdays` | Contacts with a birthday in the next week of this month |
//! | `contacts check --email --phone` | Report whether an email or phone is taken |
//! | `contacts update <id> ...` | Overwrite a contact owned by `--user` |
//! | `contacts remove <id>` | Delete a contact owned by `--user` |
//!
//! ## Examples
//!
//! ```bash
//! contacts init
//! contacts users add alice alice@example.com
//! contacts --user 1 add --first-name Tom --last-name Soyer \
//!     --email tom@example.com --phone +31462454652 --birthday 2018-04-30
//! contacts list --first-name Tom --email tom@example.com
//! contacts birthdays --today 2024-04-25
//! ```

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use contact_book::list::ListOptions;
use contact_book::{config, edit, get, list, logging, migrate, users};
use contact_book_core::models::{ContactPayload, UserId};

/// contact-book: store, search, and retrieve personal contacts.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. Commands that change a contact also need `--user`.
#[derive(Parser)]
#[command(
    name = "contacts",
    about = "contact-book: store, search, and retrieve personal contacts",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/contacts.toml")]
    config: PathBuf,

    /// Id of the user issuing the command.
    ///
    /// Required by `add`, `update`, and `remove`; contacts can only be
    /// changed by the user that owns them.
    #[arg(long, global = true)]
    user: Option<i64>,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema.
    ///
    /// Idempotent: running it multiple times is safe.
    Init,

    /// Manage the users that own contacts.
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },

    /// Create a contact owned by `--user`.
    ///
    /// Fails when another contact already uses the email or phone.
    Add(ContactArgs),

    /// Show a contact by id.
    Get {
        id: i64,

        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// List contacts.
    ///
    /// The first filter given decides the query: `--first-name` (also
    /// requiring a matching `--last-name` or `--email` when those are
    /// given), else `--last-name` (and `--email`), else `--email`.
    /// `--skip` and `--limit` only apply when no filter is given.
    List {
        #[arg(long, default_value_t = 0)]
        skip: u32,

        /// Defaults to `paging.default_limit`.
        #[arg(long)]
        limit: Option<u32>,

        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// List contacts whose birthday is within 7 days, in the current month.
    ///
    /// The `--skip`/`--limit` slice is taken first and then filtered.
    Birthdays {
        #[arg(long, default_value_t = 0)]
        skip: u32,

        /// Defaults to `paging.default_limit`.
        #[arg(long)]
        limit: Option<u32>,

        /// Evaluate as of this date (YYYY-MM-DD) instead of today.
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Report whether an email or phone is already used by a contact.
    Check {
        #[arg(long)]
        email: String,

        #[arg(long)]
        phone: String,
    },

    /// Overwrite every field of a contact owned by `--user`.
    Update {
        id: i64,

        #[command(flatten)]
        contact: ContactArgs,
    },

    /// Delete a contact owned by `--user`.
    Remove { id: i64 },
}

/// User registry subcommands.
#[derive(Subcommand)]
enum UsersAction {
    /// Register a user and print its id.
    Add { username: String, email: String },
    /// List registered users.
    List,
}

/// The editable fields of a contact.
#[derive(Args)]
struct ContactArgs {
    #[arg(long)]
    first_name: String,

    #[arg(long)]
    last_name: String,

    #[arg(long)]
    email: String,

    #[arg(long)]
    phone: String,

    /// Date of birth (YYYY-MM-DD).
    #[arg(long)]
    birthday: NaiveDate,
}

impl From<ContactArgs> for ContactPayload {
    fn from(args: ContactArgs) -> Self {
        ContactPayload {
            first_name: args.first_name,
            last_name: args.last_name,
            email: args.email,
            phone: args.phone,
            date_of_birth: args.birthday,
        }
    }
}

fn require_user(user: Option<i64>) -> Result<UserId> {
    user.map(UserId)
        .context("--user is required for this command")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let cfg = config::load_config(&cli.config)?;
    logging::init(&cfg.logging)?;

    match cli.command {
        Commands::Init => {
            migrate::run_migrations(&cfg).await?;
            println!("Database initialized successfully.");
        }
        Commands::Users { action } => match action {
            UsersAction::Add { username, email } => {
                users::run_users_add(&cfg, &username, &email).await?;
            }
            UsersAction::List => {
                users::run_users_list(&cfg).await?;
            }
        },
        Commands::Add(contact) => {
            let owner = require_user(cli.user)?;
            edit::run_add(&cfg, contact.into(), owner).await?;
        }
        Commands::Get { id, json } => {
            get::run_get(&cfg, id, json).await?;
        }
        Commands::List {
            skip,
            limit,
            first_name,
            last_name,
            email,
            json,
        } => {
            let opts = ListOptions {
                skip,
                limit,
                first_name,
                last_name,
                email,
                json,
            };
            list::run_list(&cfg, opts).await?;
        }
        Commands::Birthdays {
            skip,
            limit,
            today,
            json,
        } => {
            list::run_birthdays(&cfg, skip, limit, today, json).await?;
        }
        Commands::Check { email, phone } => {
            edit::run_check(&cfg, &email, &phone).await?;
        }
        Commands::Update { id, contact } => {
            let owner = require_user(cli.user)?;
            edit::run_update(&cfg, id, contact.into(), owner).await?;
        }
        Commands::Remove { id } => {
            let owner = require_user(cli.user)?;
            edit::run_remove(&cfg, id, owner).await?;
        }
    }

    Ok(())
}
