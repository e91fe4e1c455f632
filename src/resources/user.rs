use serde::{Deserialize, Serialize};

use crate::resources::{
    DraftMode, Resource, ResourceKind, Validate, contains_ignore_case,
    validation::{email, is_blank},
};

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub user_id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub mail: String,
    pub contact: Option<String>,
    pub is_active: Option<bool>,
}

impl User {
    pub fn display_name(&self) -> String {
        let name = format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or_default(),
            self.last_name.as_deref().unwrap_or_default()
        );

        match name.trim() {
            "" => "N/A".to_string(),
            name => name.to_string(),
        }
    }

    /// Missing activity flag reads as active, matching the backend default.
    pub fn active(&self) -> bool {
        self.is_active.unwrap_or(true)
    }
}

impl From<&User> for UserDraft {
    fn from(user: &User) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            mail: user.mail.clone(),
            contact: user.contact.clone(),
            is_active: user.is_active,
            password: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserDraft {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub mail: String,
    pub contact: Option<String>,
    pub is_active: Option<bool>,
    /// Left out of the payload when unset or empty so an update keeps the
    /// old password.
    #[serde(skip_serializing_if = "no_password")]
    pub password: Option<String>,
}

fn no_password(password: &Option<String>) -> bool {
    password.as_deref().is_none_or(str::is_empty)
}

impl Validate for UserDraft {
    fn validate(&self, mode: DraftMode) -> Vec<String> {
        let mut hints = vec![];

        if is_blank(self.first_name.as_deref()) {
            hints.push("Please enter first name".to_string());
        }
        if is_blank(self.last_name.as_deref()) {
            hints.push("Please enter last name".to_string());
        }

        if self.mail.trim().is_empty() {
            hints.push("Please enter email".to_string());
        } else if !email().is_match(self.mail.trim()) {
            hints.push("Please enter a valid email".to_string());
        }

        match self.password.as_deref() {
            None | Some("") if mode == DraftMode::Create => {
                hints.push("Please enter password".to_string());
            }
            Some(password) if !password.is_empty() && password.chars().count() < MIN_PASSWORD_LEN => {
                hints.push(format!(
                    "Password must be at least {MIN_PASSWORD_LEN} characters"
                ));
            }
            _ => {}
        }

        hints
    }
}

impl Resource for User {
    type Draft = UserDraft;

    const KIND: ResourceKind = ResourceKind::User;

    fn id(&self) -> i64 {
        self.user_id
    }

    fn matches(&self, query: &str) -> bool {
        contains_ignore_case(self.first_name.as_deref(), query)
            || contains_ignore_case(self.last_name.as_deref(), query)
            || contains_ignore_case(Some(self.mail.as_str()), query)
            || self
                .contact
                .as_deref()
                .map(|contact| contact.contains(query))
                .unwrap_or(false)
    }
}
