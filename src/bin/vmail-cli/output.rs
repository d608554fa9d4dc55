use anyhow::{Result, bail};
use vmail_lib::{Account, Domain, DomainReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Human,
    Json,
}

pub fn format_from_str(s: &str) -> Result<Format> {
    match s {
        "human" => Ok(Format::Human),
        "json" => Ok(Format::Json),
        other => bail!("unknown --format '{other}', use: human|json"),
    }
}

pub fn print_domains(domains: &[Domain], format: Format) -> Result<()> {
    match format {
        Format::Human => {
            for d in domains {
                println!("{}", d.name);
            }
            Ok(())
        }
        Format::Json => print_json(domains),
    }
}

pub fn print_report(report: &DomainReport, format: Format) -> Result<()> {
    match format {
        Format::Human => {
            print_accounts(&report.accounts);
            if !report.accounts.is_empty() && !report.aliases.is_empty() {
                println!();
            }
            for group in &report.aliases {
                println!("{group}");
            }
            Ok(())
        }
        Format::Json => print_json(report),
    }
}

fn print_accounts(accounts: &[Account]) {
    if accounts.is_empty() {
        return;
    }
    let rows: Vec<(String, String)> = accounts
        .iter()
        .map(|a| {
            // quota 0 = illimité, colonne vide
            let quota = if a.has_quota() {
                a.quota.to_string()
            } else {
                String::new()
            };
            (a.mailbox().to_string(), quota)
        })
        .collect();
    let width = rows
        .iter()
        .map(|(mailbox, _)| mailbox.len())
        .max()
        .unwrap_or(0)
        .max("Mailbox".len());

    println!("{:<width$}  {:>12}  {:<7}  Send-only", "Mailbox", "Quota", "Enabled");
    for (account, (mailbox, quota)) in accounts.iter().zip(&rows) {
        println!(
            "{:<width$}  {:>12}  {:<7}  {}",
            mailbox, quota, account.enabled, account.send_only
        );
    }
}

#[cfg(feature = "with-serde")]
fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(not(feature = "with-serde"))]
fn print_json<T: ?Sized>(_value: &T) -> Result<()> {
    bail!("format=json nécessite la feature 'with-serde'")
}
