use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use vmail_lib::AliasChange;

#[derive(Parser)]
#[command(name = "vmail-cli", version, about = "Manage mail domains, mailboxes and aliases")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,

    /// connect to this database (SQLite file)
    #[arg(long, env = "VMAIL_DB", default_value = "vmail.sqlite", global = true)]
    pub database: PathBuf,

    /// format: human|json
    #[arg(long, default_value = "human", global = true)]
    pub format: String,

    /// verbosité des logs (-v, -vv); RUST_LOG prend le pas
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List domains, optionally only those containing FILTER
    Domains { filter: Option<String> },
    /// Display mailboxes and aliases of a domain
    Show { domain: String },
    /// Create domains, mailboxes and aliases
    #[command(subcommand)]
    Create(CreateCommands),
    /// Delete domains, mailboxes and aliases
    #[command(subcommand)]
    Delete(DeleteCommands),
    /// Reset the password of a mailbox
    Password {
        /// mailbox (user@domain)
        mailbox: String,
        #[command(flatten)]
        password: PasswordArgs,
    },
    /// Toggle flags on every destination of an alias
    Modify {
        /// alias source (user@domain or *@domain)
        alias: String,
        #[command(flatten)]
        flags: ModifyFlags,
    },
}

#[derive(Subcommand)]
pub enum CreateCommands {
    /// Create a new domain
    Domain { name: String },
    /// Create a new mailbox
    Mailbox {
        /// mailbox (user@domain)
        mailbox: String,
        /// grant this mailbox BYTES (0 = unlimited)
        #[arg(long, default_value_t = 0)]
        quota: u64,
        /// do not receive mail for this account
        #[arg(long)]
        send_only: bool,
        #[command(flatten)]
        password: PasswordArgs,
    },
    /// Create an alias (one row per destination)
    Alias {
        /// source address, `*@domain` for a catchall
        source: String,
        #[arg(required = true)]
        destinations: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum DeleteCommands {
    /// Delete a domain with all its mailboxes and aliases
    Domain { name: String },
    /// Delete a mailbox
    Mailbox { mailbox: String },
    /// Delete an alias; without DEST all destinations are removed
    Alias {
        source: String,
        destinations: Vec<String>,
    },
}

#[derive(Args, Debug, Default)]
pub struct PasswordArgs {
    /// use PWD as the password
    #[arg(long, value_name = "PWD", conflicts_with = "password_hash")]
    pub password: Option<String>,
    /// use HASH as the password (already hashed)
    #[arg(long, value_name = "HASH")]
    pub password_hash: Option<String>,
    /// do not check the password hash format
    #[arg(long, requires = "password_hash")]
    pub raw_password_hash: bool,
}

#[derive(Args, Debug, Default)]
pub struct ModifyFlags {
    #[arg(long, conflicts_with = "disable")]
    pub enable: bool,
    #[arg(long)]
    pub disable: bool,
    /// mark destinations as blacklisted
    #[arg(long, conflicts_with = "unblacklist")]
    pub blacklist: bool,
    #[arg(long)]
    pub unblacklist: bool,
}

impl ModifyFlags {
    pub fn change(&self) -> AliasChange {
        AliasChange {
            enabled: flag(self.enable, self.disable),
            blacklisted: flag(self.blacklist, self.unblacklist),
        }
    }
}

fn flag(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}
