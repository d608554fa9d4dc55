use rusqlite::types::ToSql;
use rusqlite::{Connection, Row, params};

use super::error::{Constraint, constraint_of};
use super::{Alias, AliasChange, Directory, Entity, NewAlias, StoreError};
use crate::address::{Mailbox, SourceAddress, SourceLocal};

const ALIAS_COLUMNS: &str = "id, source_username, source_domain, destination_username, \
                             destination_domain, enabled, blacklisted";

pub(crate) fn alias_from_row(row: &Row<'_>) -> rusqlite::Result<Alias> {
    Ok(Alias {
        id: row.get("id")?,
        source: SourceLocal::from_column(row.get("source_username")?),
        source_domain: row.get("source_domain")?,
        destination: Mailbox::new(
            row.get::<_, String>("destination_username")?,
            row.get::<_, String>("destination_domain")?,
        ),
        enabled: row.get("enabled")?,
        blacklisted: row.get("blacklisted")?,
    })
}

type NamedParams<'a> = Vec<(&'static str, &'a dyn ToSql)>;

/// WHERE fragment selecting one alias source.
///
/// `= NULL` ne matche jamais en SQL : le catchall passe par `IS NULL`.
struct SourceFilter<'a> {
    clause: String,
    params: NamedParams<'a>,
}

impl<'a> SourceFilter<'a> {
    fn new(source: &'a SourceAddress) -> Self {
        let mut params: NamedParams<'a> = Vec::with_capacity(4);
        params.push((":source_domain", &source.domain as &dyn ToSql));
        let clause = match &source.local {
            SourceLocal::Catchall => "source_username IS NULL AND source_domain = :source_domain",
            SourceLocal::Local(local) => {
                params.push((":source_username", local as &dyn ToSql));
                "source_username = :source_username AND source_domain = :source_domain"
            }
        };
        Self {
            clause: clause.to_string(),
            params,
        }
    }

    fn destination(mut self, destination: &'a Mailbox) -> Self {
        self.clause.push_str(
            " AND destination_username = :destination_username \
             AND destination_domain = :destination_domain",
        );
        self.params
            .push((":destination_username", &destination.user as &dyn ToSql));
        self.params
            .push((":destination_domain", &destination.domain as &dyn ToSql));
        self
    }

    fn delete(&self, conn: &Connection) -> rusqlite::Result<usize> {
        let sql = format!("DELETE FROM aliases WHERE {}", self.clause);
        conn.execute(&sql, self.params.as_slice())
    }

    fn select(&self, conn: &Connection) -> rusqlite::Result<Vec<Alias>> {
        let sql = format!(
            "SELECT {ALIAS_COLUMNS} FROM aliases WHERE {} \
             ORDER BY destination_username, destination_domain",
            self.clause
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(self.params.as_slice(), alias_from_row)?;
        rows.collect()
    }
}

fn insert_alias(conn: &Connection, alias: &NewAlias) -> Result<i64, StoreError> {
    let NewAlias {
        source,
        destination,
    } = alias;
    conn.execute(
        "INSERT INTO aliases
         (source_username, source_domain, destination_username, destination_domain, enabled, blacklisted)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            source.local.as_column(),
            source.domain,
            destination.user,
            destination.domain,
            true,
            false,
        ],
    )
    .map_err(|err| match constraint_of(&err) {
        Some(Constraint::Unique) => StoreError::DuplicateAlias {
            alias: source.to_string(),
            destination: destination.to_string(),
        },
        Some(Constraint::ForeignKey) => StoreError::UnknownDomain {
            domain: source.domain.clone(),
        },
        None => StoreError::unavailable("creating alias", err),
    })?;
    Ok(conn.last_insert_rowid())
}

fn delete_alias_pair(
    conn: &Connection,
    source: &SourceAddress,
    destination: &Mailbox,
) -> Result<(), StoreError> {
    let deleted = SourceFilter::new(source)
        .destination(destination)
        .delete(conn)
        .map_err(StoreError::during("removing alias"))?;
    if deleted == 0 {
        return Err(StoreError::not_found(
            Entity::Alias,
            format!("{source} -> {destination}"),
        ));
    }
    Ok(())
}

fn update_alias_flags(conn: &Connection, alias: &Alias) -> Result<(), StoreError> {
    let updated = conn
        .execute(
            "UPDATE aliases SET enabled = ?1, blacklisted = ?2 WHERE id = ?3",
            params![alias.enabled, alias.blacklisted, alias.id],
        )
        .map_err(StoreError::during("updating alias"))?;
    if updated == 0 {
        return Err(StoreError::not_found(Entity::Alias, format!("#{}", alias.id)));
    }
    Ok(())
}

impl Directory {
    pub fn create_alias(&self, alias: &NewAlias) -> Result<i64, StoreError> {
        let id = insert_alias(self.connection(), alias)?;
        tracing::info!(
            source = %alias.source,
            destination = %alias.destination,
            id,
            "alias created"
        );
        Ok(id)
    }

    /// Fan-out: one row per destination, all or nothing.
    pub fn create_aliases(
        &mut self,
        source: &SourceAddress,
        destinations: &[Mailbox],
    ) -> Result<Vec<i64>, StoreError> {
        let tx = self
            .conn
            .transaction()
            .map_err(StoreError::during("starting transaction"))?;
        let mut ids = Vec::with_capacity(destinations.len());
        for destination in destinations {
            let alias = NewAlias::new(source.clone(), destination.clone());
            ids.push(insert_alias(&tx, &alias)?);
        }
        tx.commit().map_err(StoreError::during("committing aliases"))?;
        tracing::info!(%source, count = ids.len(), "aliases created");
        Ok(ids)
    }

    /// Deletes exactly one (source, destination) row.
    pub fn delete_alias(
        &self,
        source: &SourceAddress,
        destination: &Mailbox,
    ) -> Result<(), StoreError> {
        delete_alias_pair(self.connection(), source, destination)?;
        tracing::info!(%source, %destination, "alias deleted");
        Ok(())
    }

    /// Deletes the listed destinations of `source`; any missing pair aborts
    /// the whole batch.
    pub fn delete_aliases(
        &mut self,
        source: &SourceAddress,
        destinations: &[Mailbox],
    ) -> Result<(), StoreError> {
        let tx = self
            .conn
            .transaction()
            .map_err(StoreError::during("starting transaction"))?;
        for destination in destinations {
            delete_alias_pair(&tx, source, destination)?;
        }
        tx.commit()
            .map_err(StoreError::during("committing alias removal"))?;
        tracing::info!(%source, count = destinations.len(), "aliases deleted");
        Ok(())
    }

    /// Deletes every destination of `source`. Returns the number of rows.
    pub fn delete_alias_all(&self, source: &SourceAddress) -> Result<usize, StoreError> {
        let deleted = SourceFilter::new(source)
            .delete(self.connection())
            .map_err(StoreError::during("removing aliases"))?;
        if deleted == 0 {
            return Err(StoreError::not_found(Entity::Alias, source.to_string()));
        }
        tracing::info!(%source, deleted, "all aliases deleted");
        Ok(deleted)
    }

    /// Rewrites the enabled/blacklisted flags of the row with `alias.id`.
    pub fn update_alias(&self, alias: &Alias) -> Result<(), StoreError> {
        update_alias_flags(self.connection(), alias)?;
        tracing::debug!(
            id = alias.id,
            enabled = alias.enabled,
            blacklisted = alias.blacklisted,
            "alias updated"
        );
        Ok(())
    }

    /// Every row whose source is exactly `source`, ordered by destination.
    pub fn find_aliases(&self, source: &SourceAddress) -> Result<Vec<Alias>, StoreError> {
        SourceFilter::new(source)
            .select(self.connection())
            .map_err(StoreError::during("looking up aliases"))
    }

    /// Applies `change` to every row sharing `source`, in one transaction.
    pub fn modify_aliases(
        &mut self,
        source: &SourceAddress,
        change: &AliasChange,
    ) -> Result<usize, StoreError> {
        let tx = self
            .conn
            .transaction()
            .map_err(StoreError::during("starting transaction"))?;
        let mut aliases = SourceFilter::new(source)
            .select(&tx)
            .map_err(StoreError::during("looking up aliases"))?;
        if aliases.is_empty() {
            return Err(StoreError::not_found(Entity::Alias, source.to_string()));
        }
        for alias in &mut aliases {
            change.apply(alias);
            update_alias_flags(&tx, alias)?;
        }
        tx.commit()
            .map_err(StoreError::during("committing alias update"))?;
        tracing::info!(%source, updated = aliases.len(), ?change, "aliases modified");
        Ok(aliases.len())
    }
}
