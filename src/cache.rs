//! Process-scoped roster cache
//!
//! Rosters come from an external import and change rarely. The cache is an
//! explicit value owned by the caller and passed where needed; entries expire
//! after `ttl` and can be invalidated per store or wholesale.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use crate::errors::Result;
use crate::schemas::Roster;
use crate::store::RosterSource;

#[derive(Debug, Clone)]
struct CachedRoster {
    fetched_at: DateTime<Utc>,
    roster: Option<Roster>,
}

/// Roster cache with an explicit time-to-live
#[derive(Debug, Clone)]
pub struct RosterCache {
    ttl: Duration,
    entries: HashMap<String, CachedRoster>,
}

impl RosterCache {
    pub fn new(ttl: Duration) -> Self {
        RosterCache {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// Build a cache from a TTL in seconds, as stored in configuration
    pub fn with_ttl_seconds(seconds: u64) -> Self {
        let seconds = i64::try_from(seconds).unwrap_or(i64::MAX);
        Self::new(Duration::try_seconds(seconds).unwrap_or(Duration::MAX))
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn is_fresh(&self, entry: &CachedRoster, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(entry.fetched_at) < self.ttl
    }

    /// Return the cached roster for `store`, fetching from `source` when the
    /// entry is missing or expired.
    pub fn roster<S: RosterSource + ?Sized>(
        &mut self,
        source: &S,
        store: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Roster>> {
        if let Some(entry) = self.entries.get(store) {
            if self.is_fresh(entry, now) {
                tracing::debug!(store, "roster cache hit");
                return Ok(entry.roster.clone());
            }
        }

        tracing::debug!(store, "roster cache miss");
        let roster = source.roster(store)?;
        self.entries.insert(
            store.to_string(),
            CachedRoster {
                fetched_at: now,
                roster: roster.clone(),
            },
        );
        Ok(roster)
    }

    /// Drop the entry for one store
    pub fn invalidate(&mut self, store: &str) {
        self.entries.remove(store);
    }

    /// Drop every entry
    pub fn invalidate_all(&mut self) {
        self.entries.clear();
    }

    /// Remove expired entries
    pub fn evict_expired(&mut self, now: DateTime<Utc>) {
        let ttl = self.ttl;
        self.entries
            .retain(|_, entry| now.signed_duration_since(entry.fetched_at) < ttl);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
