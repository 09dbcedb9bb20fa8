use cratedigger_core::UserProfile;
use cratedigger_storage::keys;
use tracing::{debug, instrument};

use crate::Marketplace;

const ONBOARDING_SEEN: &str = "true";

impl Marketplace {
    pub fn profile(&self) -> UserProfile {
        self.store.read_json(keys::USER_PROFILE)
    }

    #[instrument(skip(self, profile), fields(name = %profile.name))]
    pub fn save_profile(&mut self, profile: &UserProfile) {
        self.store.write_json(keys::USER_PROFILE, profile);
        debug!("profile saved");
    }

    pub fn has_seen_onboarding(&self) -> bool {
        self.store.get(keys::HAS_SEEN_ONBOARDING).as_deref() == Some(ONBOARDING_SEEN)
    }

    pub fn complete_onboarding(&mut self) {
        self.store.set(keys::HAS_SEEN_ONBOARDING, ONBOARDING_SEEN);
    }
}
