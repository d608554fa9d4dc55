use std::collections::BTreeMap;

use super::{AliasDestination, AliasGroup};
use crate::address::SourceLocal;
use crate::store::Alias;

/// Groups alias rows of one domain by source local-part. The catchall group
/// comes first, then literal local-parts in byte order; destinations keep
/// the order of `aliases`.
pub fn group_aliases(domain: &str, aliases: &[Alias]) -> Vec<AliasGroup> {
    let mut groups: BTreeMap<&SourceLocal, Vec<AliasDestination>> = BTreeMap::new();
    for alias in aliases {
        groups
            .entry(&alias.source)
            .or_default()
            .push(AliasDestination {
                id: alias.id,
                address: alias.destination.clone(),
                enabled: alias.enabled,
                blacklisted: alias.blacklisted,
            });
    }

    groups
        .into_iter()
        .map(|(source, destinations)| AliasGroup {
            source: source.clone(),
            domain: domain.to_string(),
            destinations,
        })
        .collect()
}
