//! Profile record edited by the demo form

use super::forms::FormValues;
use serde::{Deserialize, Serialize};

/// Profile information
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub website: String,
    pub bio: String,
    pub published: bool,
}

impl Profile {
    /// Profile the editor opens with
    pub fn sample() -> Self {
        Self {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            website: "https://example.com/ada".to_string(),
            bio: "Writes notes on the analytical engine.".to_string(),
            published: false,
        }
    }

    /// Apply submitted form values verbatim; missing keys keep their
    /// current value
    pub fn apply(&mut self, values: &FormValues) {
        let fields = [
            ("name", &mut self.name),
            ("email", &mut self.email),
            ("website", &mut self.website),
            ("bio", &mut self.bio),
        ];
        for (key, slot) in fields {
            if let Some(value) = values.get(key) {
                slot.clone_from(value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_apply_overwrites_present_keys_verbatim() {
        let mut profile = Profile::sample();
        let mut values = FormValues::new();
        values.insert("name".to_string(), "Grace Hopper  ".to_string());
        profile.apply(&values);
        assert_eq!(profile.name, "Grace Hopper  ");
        assert_eq!(profile.email, Profile::sample().email);
    }
}
