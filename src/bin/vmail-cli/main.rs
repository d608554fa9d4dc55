mod args;
mod output;
mod prompt;

use anyhow::{Context, Result, bail};
use tracing_subscriber::EnvFilter;
use vmail_lib::{
    Directory, Mailbox, NewAccount, PasswordPolicy, SourceAddress, StoreOptions,
};

use crate::args::{Cli, Commands, CreateCommands, DeleteCommands};
use crate::output::{Format, format_from_str, print_domains, print_report};

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn parse_mailboxes(addresses: &[String]) -> Result<Vec<Mailbox>> {
    addresses
        .iter()
        .map(|a| Mailbox::parse(a).map_err(Into::into))
        .collect()
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let format = format_from_str(&cli.format)?;

    let mut dir = Directory::open(&cli.database, &StoreOptions::default())
        .with_context(|| format!("connect to {}", cli.database.display()))?;
    let policy = PasswordPolicy::default();

    run(cli.cmd, &mut dir, &policy, format)
}

fn run(cmd: Commands, dir: &mut Directory, policy: &PasswordPolicy, format: Format) -> Result<()> {
    match cmd {
        Commands::Domains { filter } => {
            let domains = dir.find_all_domains(filter.as_deref().unwrap_or(""))?;
            print_domains(&domains, format)?;
        }
        Commands::Show { domain } => {
            let report = dir.show_domain(&domain)?;
            print_report(&report, format)?;
        }
        Commands::Create(CreateCommands::Domain { name }) => {
            dir.create_domain(&name)
                .with_context(|| format!("creating domain {name} failed"))?;
            println!("domain {name} created");
        }
        Commands::Create(CreateCommands::Mailbox {
            mailbox,
            quota,
            send_only,
            password,
        }) => {
            let target = Mailbox::parse(&mailbox)?;
            let hash = prompt::password_input(&password, policy)?.into_hash(policy)?;
            let account = NewAccount::new(target, hash)
                .with_quota(quota)
                .send_only(send_only);
            dir.create_account(&account)
                .with_context(|| format!("creating mailbox {mailbox} failed"))?;
            println!("mailbox {mailbox} created");
        }
        Commands::Create(CreateCommands::Alias {
            source,
            destinations,
        }) => {
            let src = SourceAddress::parse(&source)?;
            let dests = parse_mailboxes(&destinations)?;
            dir.create_aliases(&src, &dests)
                .with_context(|| format!("creating alias {src} failed"))?;
            println!("alias created successfully");
        }
        Commands::Delete(DeleteCommands::Domain { name }) => {
            let removal = dir
                .delete_domain(&name)
                .with_context(|| format!("error deleting domain {name}"))?;
            println!(
                "domain {name} deleted ({} mailboxes, {} aliases)",
                removal.accounts, removal.aliases
            );
        }
        Commands::Delete(DeleteCommands::Mailbox { mailbox }) => {
            let target = Mailbox::parse(&mailbox)?;
            dir.delete_mailbox(&target)
                .with_context(|| format!("error deleting mailbox {mailbox}"))?;
            println!("mailbox {mailbox} deleted");
        }
        Commands::Delete(DeleteCommands::Alias {
            source,
            destinations,
        }) => {
            let src = SourceAddress::parse(&source)?;
            if destinations.is_empty() {
                dir.delete_alias_all(&src)
                    .with_context(|| format!("delete all aliases for {src} failed"))?;
            } else {
                let dests = parse_mailboxes(&destinations)?;
                dir.delete_aliases(&src, &dests)
                    .with_context(|| format!("delete alias {src} failed"))?;
            }
            println!("alias deleted successfully");
        }
        Commands::Password { mailbox, password } => {
            let target = Mailbox::parse(&mailbox)?;
            let hash = prompt::password_input(&password, policy)?.into_hash(policy)?;
            dir.update_account_password(&target, &hash)
                .with_context(|| format!("updating password for {mailbox} failed"))?;
            println!("password for {mailbox} updated");
        }
        Commands::Modify { alias, flags } => {
            let change = flags.change();
            if change.is_empty() {
                bail!("nothing to modify: pass --enable, --disable, --blacklist or --unblacklist");
            }
            let src = SourceAddress::parse(&alias)?;
            let updated = dir.modify_aliases(&src, &change)?;
            println!("successfully updated {updated} aliases");
        }
    }
    Ok(())
}
