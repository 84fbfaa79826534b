//! Account and Preferences
//!
//! The account is a local mock: nothing here authenticates anyone.

use serde::{Deserialize, Serialize};

use super::entity::{require, DomainError, DomainResult};

/// Signed-in user as persisted under `smartPantryUser`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
}

impl UserProfile {
    pub fn new(name: &str, email: &str) -> DomainResult<Self> {
        require("name", name)?;
        require("email", email)?;
        Ok(Self {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
        })
    }

    /// Avatar initial shown next to the profile
    pub fn initial(&self) -> Option<char> {
        self.name.chars().next().map(|c| c.to_ascii_uppercase())
    }
}

/// Onboarding answers used by the shopping suggestions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPreferences {
    pub dietary_restrictions: Vec<String>,
    pub goals: Vec<String>,
}

impl UserPreferences {
    pub fn is_vegetarian(&self) -> bool {
        self.dietary_restrictions
            .iter()
            .any(|r| r.eq_ignore_ascii_case("vegetarian") || r.eq_ignore_ascii_case("vegan"))
    }

    pub fn has_goal(&self, goal: &str) -> bool {
        self.goals.iter().any(|g| g.eq_ignore_ascii_case(goal))
    }
}

/// Password fields of the profile form: all three or none
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PasswordChange {
    pub current: String,
    pub new: String,
    pub confirm: String,
}

impl PasswordChange {
    pub fn is_empty(&self) -> bool {
        self.current.is_empty() && self.new.is_empty() && self.confirm.is_empty()
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.is_empty() {
            return Ok(());
        }
        if self.current.is_empty() || self.new.is_empty() || self.confirm.is_empty() {
            return Err(DomainError::InvalidInput(
                "fill in all password fields to change password".to_string(),
            ));
        }
        if self.new != self.confirm {
            return Err(DomainError::InvalidInput("new passwords do not match".to_string()));
        }
        Ok(())
    }
}
