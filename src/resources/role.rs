use serde::{Deserialize, Serialize};

use crate::resources::{
    DraftMode, Resource, ResourceKind, Validate, contains_ignore_case, validation::is_blank,
};

pub const MIN_ROLE_NAME_LEN: usize = 2;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Role {
    pub role_id: i64,
    pub role_name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RoleDraft {
    pub role_name: String,
}

impl From<&Role> for RoleDraft {
    fn from(role: &Role) -> Self {
        Self {
            role_name: role.role_name.clone(),
        }
    }
}

impl Validate for RoleDraft {
    fn validate(&self, _mode: DraftMode) -> Vec<String> {
        if is_blank(Some(self.role_name.as_str())) {
            vec!["Please enter role name".to_string()]
        } else if self.role_name.chars().count() < MIN_ROLE_NAME_LEN {
            vec![format!(
                "Role name must be at least {MIN_ROLE_NAME_LEN} characters"
            )]
        } else {
            vec![]
        }
    }
}

impl Resource for Role {
    type Draft = RoleDraft;

    const KIND: ResourceKind = ResourceKind::Role;

    fn id(&self) -> i64 {
        self.role_id
    }

    fn matches(&self, query: &str) -> bool {
        contains_ignore_case(Some(self.role_name.as_str()), query)
    }
}
