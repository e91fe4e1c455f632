use serde::{Deserialize, Serialize};

use crate::resources::{
    DraftMode, Resource, ResourceKind, Validate, contains_ignore_case, validation::is_blank,
};

pub const MIN_GROUP_NAME_LEN: usize = 2;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PermissionGroup {
    pub group_id: i64,
    pub group_name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PermissionGroupDraft {
    pub group_name: String,
}

impl From<&PermissionGroup> for PermissionGroupDraft {
    fn from(group: &PermissionGroup) -> Self {
        Self {
            group_name: group.group_name.clone(),
        }
    }
}

impl Validate for PermissionGroupDraft {
    fn validate(&self, _mode: DraftMode) -> Vec<String> {
        if is_blank(Some(self.group_name.as_str())) {
            vec!["Please enter group name".to_string()]
        } else if self.group_name.chars().count() < MIN_GROUP_NAME_LEN {
            vec![format!(
                "Group name must be at least {MIN_GROUP_NAME_LEN} characters"
            )]
        } else {
            vec![]
        }
    }
}

impl Resource for PermissionGroup {
    type Draft = PermissionGroupDraft;

    const KIND: ResourceKind = ResourceKind::PermissionGroup;

    fn id(&self) -> i64 {
        self.group_id
    }

    fn matches(&self, query: &str) -> bool {
        contains_ignore_case(Some(self.group_name.as_str()), query)
    }
}
