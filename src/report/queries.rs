use rusqlite::{OptionalExtension, params};

use super::{DomainReport, group_aliases};
use crate::address::Mailbox;
use crate::store::{
    Account, Alias, Directory, Domain, Entity, StoreError, account_from_row, alias_from_row,
    domain_from_row,
};

impl Directory {
    /// Domains whose name contains `filter` (case-sensitive), by name.
    pub fn find_all_domains(&self, filter: &str) -> Result<Vec<Domain>, StoreError> {
        let mut stmt = self
            .connection()
            .prepare("SELECT id, domain FROM domains WHERE ?1 = '' OR instr(domain, ?1) > 0 ORDER BY domain")
            .map_err(StoreError::during("listing domains"))?;
        let rows = stmt
            .query_map(params![filter], domain_from_row)
            .and_then(|rows| rows.collect::<Result<Vec<_>, _>>())
            .map_err(StoreError::during("listing domains"))?;
        tracing::debug!(filter, count = rows.len(), "domains listed");
        Ok(rows)
    }

    pub fn find_domain(&self, name: &str) -> Result<Domain, StoreError> {
        self.connection()
            .query_row(
                "SELECT id, domain FROM domains WHERE domain = ?1",
                params![name],
                domain_from_row,
            )
            .optional()
            .map_err(StoreError::during("looking up domain"))?
            .ok_or_else(|| StoreError::not_found(Entity::Domain, name))
    }

    /// Accounts of `domain` ordered by id.
    pub fn find_all_accounts(&self, domain: &str) -> Result<Vec<Account>, StoreError> {
        let mut stmt = self
            .connection()
            .prepare(
                "SELECT id, username, domain, password, quota, enabled, sendonly
                 FROM accounts WHERE domain = ?1 ORDER BY id",
            )
            .map_err(StoreError::during("listing mailboxes"))?;
        let rows = stmt
            .query_map(params![domain], account_from_row)
            .and_then(|rows| rows.collect::<Result<Vec<_>, _>>())
            .map_err(StoreError::during("listing mailboxes"))?;
        Ok(rows)
    }

    pub fn find_account(&self, mailbox: &Mailbox) -> Result<Account, StoreError> {
        self.connection()
            .query_row(
                "SELECT id, username, domain, password, quota, enabled, sendonly
                 FROM accounts WHERE username = ?1 AND domain = ?2",
                params![mailbox.user, mailbox.domain],
                account_from_row,
            )
            .optional()
            .map_err(StoreError::during("looking up mailbox"))?
            .ok_or_else(|| StoreError::not_found(Entity::Mailbox, mailbox.to_string()))
    }

    /// Aliases of `domain`, catchall rows first (NULL sorts first).
    pub fn find_all_aliases(&self, domain: &str) -> Result<Vec<Alias>, StoreError> {
        let mut stmt = self
            .connection()
            .prepare(
                "SELECT id, source_username, source_domain, destination_username,
                        destination_domain, enabled, blacklisted
                 FROM aliases WHERE source_domain = ?1
                 ORDER BY source_username, destination_username, destination_domain",
            )
            .map_err(StoreError::during("listing aliases"))?;
        let rows = stmt
            .query_map(params![domain], alias_from_row)
            .and_then(|rows| rows.collect::<Result<Vec<_>, _>>())
            .map_err(StoreError::during("listing aliases"))?;
        Ok(rows)
    }

    /// Domain, mailboxes and grouped aliases; `NotFound` for unknown domains.
    pub fn show_domain(&self, name: &str) -> Result<DomainReport, StoreError> {
        let domain = self.find_domain(name)?;
        let accounts = self.find_all_accounts(name)?;
        let aliases = self.find_all_aliases(name)?;
        Ok(DomainReport {
            aliases: group_aliases(name, &aliases),
            domain,
            accounts,
        })
    }
}
