use rusqlite::{Row, params};

use super::error::{Constraint, constraint_of};
use super::{Account, Directory, Entity, NewAccount, StoreError};
use crate::address::Mailbox;
use crate::password::PasswordHash;

pub(crate) fn account_from_row(row: &Row<'_>) -> rusqlite::Result<Account> {
    let quota: i64 = row.get("quota")?;
    Ok(Account {
        id: row.get("id")?,
        username: row.get("username")?,
        domain: row.get("domain")?,
        password: row.get("password")?,
        // CHECK (quota >= 0) dans le schéma
        quota: u64::try_from(quota).unwrap_or_default(),
        enabled: row.get("enabled")?,
        send_only: row.get("sendonly")?,
    })
}

impl Directory {
    pub fn create_account(&self, account: &NewAccount) -> Result<i64, StoreError> {
        let mailbox = &account.mailbox;
        let quota = i64::try_from(account.quota).map_err(|_| StoreError::QuotaOutOfRange {
            quota: account.quota,
        })?;

        self.connection()
            .execute(
                "INSERT INTO accounts (username, domain, password, quota, enabled, sendonly)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    mailbox.user,
                    mailbox.domain,
                    account.password.as_str(),
                    quota,
                    true,
                    account.send_only,
                ],
            )
            .map_err(|err| match constraint_of(&err) {
                Some(Constraint::Unique) => StoreError::DuplicateMailbox {
                    mailbox: mailbox.to_string(),
                },
                Some(Constraint::ForeignKey) => StoreError::UnknownDomain {
                    domain: mailbox.domain.clone(),
                },
                None => StoreError::unavailable("creating mailbox", err),
            })?;

        let id = self.connection().last_insert_rowid();
        tracing::info!(%mailbox, id, quota, send_only = account.send_only, "mailbox created");
        Ok(id)
    }

    /// Replaces only the password column.
    pub fn update_account_password(
        &self,
        mailbox: &Mailbox,
        hash: &PasswordHash,
    ) -> Result<(), StoreError> {
        let updated = self
            .connection()
            .execute(
                "UPDATE accounts SET password = ?1 WHERE username = ?2 AND domain = ?3",
                params![hash.as_str(), mailbox.user, mailbox.domain],
            )
            .map_err(StoreError::during("updating password"))?;
        if updated == 0 {
            return Err(StoreError::not_found(Entity::Mailbox, mailbox.to_string()));
        }
        tracing::info!(%mailbox, "password updated");
        Ok(())
    }

    pub fn delete_mailbox(&self, mailbox: &Mailbox) -> Result<(), StoreError> {
        let deleted = self
            .connection()
            .execute(
                "DELETE FROM accounts WHERE username = ?1 AND domain = ?2",
                params![mailbox.user, mailbox.domain],
            )
            .map_err(StoreError::during("removing mailbox"))?;
        if deleted == 0 {
            return Err(StoreError::not_found(Entity::Mailbox, mailbox.to_string()));
        }
        tracing::info!(%mailbox, "mailbox deleted");
        Ok(())
    }
}
