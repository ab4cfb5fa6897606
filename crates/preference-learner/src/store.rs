use dashmap::DashMap;
use tracing::debug;

use crate::{InteractionEvent, UserProfile};

/// In-memory profile registry.
///
/// The map's per-key entry lock serializes concurrent `learn` calls against
/// the same user, which is the only write path the ranking system needs.
/// Persistence across processes stays with the caller.
#[derive(Debug, Default)]
pub struct ProfileStore {
    profiles: DashMap<String, UserProfile>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self {
            profiles: DashMap::new(),
        }
    }

    /// Snapshot of a profile, if one exists.
    pub fn get(&self, user_id: &str) -> Option<UserProfile> {
        self.profiles.get(user_id).map(|entry| entry.clone())
    }

    /// Snapshot of a profile, creating a fresh one on first sight.
    pub fn get_or_create(&self, user_id: &str) -> UserProfile {
        self.profiles
            .entry(user_id.to_string())
            .or_insert_with(|| UserProfile::new(user_id))
            .clone()
    }

    /// Replace a stored profile wholesale (e.g. after an onboarding quiz).
    pub fn upsert(&self, profile: UserProfile) {
        self.profiles.insert(profile.user_id.clone(), profile);
    }

    /// Fold an interaction into a user's profile and return the updated
    /// snapshot. Creates the profile if the user is new.
    pub fn learn(&self, user_id: &str, event: InteractionEvent) -> UserProfile {
        debug!(
            user_id,
            market_id = %event.market_id,
            action = event.action.as_str(),
            "recording interaction"
        );

        let mut entry = self
            .profiles
            .entry(user_id.to_string())
            .or_insert_with(|| UserProfile::new(user_id));
        entry.record_interaction(event);
        entry.clone()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
