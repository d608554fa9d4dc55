use rusqlite::{Row, params};

use super::error::{Constraint, constraint_of};
use super::{Directory, Domain, DomainRemoval, Entity, StoreError};

pub(crate) fn domain_from_row(row: &Row<'_>) -> rusqlite::Result<Domain> {
    Ok(Domain {
        id: row.get("id")?,
        name: row.get("domain")?,
    })
}

impl Directory {
    pub fn create_domain(&self, name: &str) -> Result<i64, StoreError> {
        if name.is_empty() {
            return Err(StoreError::EmptyName);
        }
        self.connection()
            .execute("INSERT INTO domains (domain) VALUES (?1)", params![name])
            .map_err(|err| match constraint_of(&err) {
                Some(Constraint::Unique) => StoreError::DuplicateName {
                    name: name.to_string(),
                },
                _ => StoreError::unavailable("creating domain", err),
            })?;
        let id = self.connection().last_insert_rowid();
        tracing::info!(domain = name, id, "domain created");
        Ok(id)
    }

    /// Supprime comptes, alias puis le domaine, dans une seule transaction.
    pub fn delete_domain(&mut self, name: &str) -> Result<DomainRemoval, StoreError> {
        let tx = self
            .conn
            .transaction()
            .map_err(StoreError::during("starting transaction"))?;

        let accounts = tx
            .execute("DELETE FROM accounts WHERE domain = ?1", params![name])
            .map_err(StoreError::during("removing mailboxes"))?;
        let aliases = tx
            .execute("DELETE FROM aliases WHERE source_domain = ?1", params![name])
            .map_err(StoreError::during("removing aliases"))?;
        let domains = tx
            .execute("DELETE FROM domains WHERE domain = ?1", params![name])
            .map_err(StoreError::during("removing domain"))?;

        if domains == 0 {
            // drop => rollback
            return Err(StoreError::not_found(Entity::Domain, name));
        }
        tx.commit()
            .map_err(StoreError::during("committing domain removal"))?;

        let removal = DomainRemoval { accounts, aliases };
        tracing::info!(domain = name, accounts, aliases, "domain deleted");
        Ok(removal)
    }
}
