use serde::{Deserialize, Serialize};

pub const DEFAULT_PROFILE_NAME: &str = "John Doe";
pub const DEFAULT_PROFILE_BIO: &str = "Vinyl enthusiast since 2020";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub name: String,
    pub bio: String,
    pub avatar: String,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: DEFAULT_PROFILE_NAME.into(),
            bio: DEFAULT_PROFILE_BIO.into(),
            avatar: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let profile: UserProfile = serde_json::from_str(r#"{"name":"Ada"}"#).unwrap();
        assert_eq!(profile.name, "Ada");
        assert_eq!(profile.bio, DEFAULT_PROFILE_BIO);
        assert_eq!(profile.avatar, "");
    }
}
