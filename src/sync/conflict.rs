//! Reconciliation of a remote collection into the local one
//!
//! Policy: local always wins. Remote entries whose text is unknown locally
//! are appended in remote order; remote entries whose text is already present
//! are discarded without any field-level merge. Re-merging the same remote
//! collection is therefore a no-op.

use std::collections::{HashMap, HashSet};

use super::types::{Conflict, MergeResult};
use crate::quotes::{Collection, Quote};

/// Stateless merge engine
pub struct Reconciler;

impl Reconciler {
    /// Fold `remote` into `local`
    ///
    /// The merged collection starts with `local` in its original order,
    /// followed by the genuinely new remote entries in their remote order.
    /// Only the first occurrence of a text within `remote` is considered.
    pub fn merge(local: &Collection, remote: &[Quote]) -> MergeResult {
        let mut merged = local.clone();
        let mut added_from_remote = Vec::new();
        let mut conflicts = Vec::new();
        let mut unchanged = 0;

        // text -> category, local entries only
        let retained: HashMap<&str, &str> = local
            .iter()
            .map(|q| (q.text.as_str(), q.category.as_str()))
            .collect();
        let mut seen_remote: HashSet<&str> = HashSet::new();

        for quote in remote.iter().filter(|q| q.validate().is_ok()) {
            match retained.get(quote.text.as_str()) {
                // Repeats within the payload are not conflicts with local data
                None if !seen_remote.insert(quote.text.as_str()) => unchanged += 1,
                None => {
                    merged.push(quote.clone());
                    added_from_remote.push(quote.clone());
                }
                Some(category) if *category == quote.category => unchanged += 1,
                Some(category) => conflicts.push(Conflict {
                    text: quote.text.clone(),
                    local_category: category.to_string(),
                    remote_category: quote.category.clone(),
                }),
            }
        }

        MergeResult {
            merged,
            added_from_remote,
            conflicts,
            unchanged,
        }
    }
}
