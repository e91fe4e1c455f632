use serde::{Deserialize, Serialize};

use crate::resources::{
    DraftMode, Resource, ResourceKind, Validate, contains_ignore_case,
    validation::{is_blank, permission_code},
};

pub const MIN_CODE_LEN: usize = 3;
pub const MAX_DESCRIPTION_LEN: usize = 500;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Permission {
    pub permission_id: i64,
    pub permission_code: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PermissionDraft {
    pub permission_code: String,
    pub description: Option<String>,
}

impl From<&Permission> for PermissionDraft {
    fn from(permission: &Permission) -> Self {
        Self {
            permission_code: permission.permission_code.clone(),
            description: permission.description.clone(),
        }
    }
}

impl Validate for PermissionDraft {
    fn validate(&self, _mode: DraftMode) -> Vec<String> {
        let mut hints = vec![];

        if is_blank(Some(self.permission_code.as_str())) {
            hints.push("Please enter permission code".to_string());
        } else {
            if self.permission_code.chars().count() < MIN_CODE_LEN {
                hints.push(format!(
                    "Permission code must be at least {MIN_CODE_LEN} characters"
                ));
            }
            if !permission_code().is_match(&self.permission_code) {
                hints.push(
                    "Permission code should be uppercase with underscores (e.g., USER_CREATE)"
                        .to_string(),
                );
            }
        }

        let description_len = self
            .description
            .as_deref()
            .map(|d| d.chars().count())
            .unwrap_or(0);
        if description_len > MAX_DESCRIPTION_LEN {
            hints.push(format!(
                "Description cannot exceed {MAX_DESCRIPTION_LEN} characters"
            ));
        }

        hints
    }
}

impl Resource for Permission {
    type Draft = PermissionDraft;

    const KIND: ResourceKind = ResourceKind::Permission;

    fn id(&self) -> i64 {
        self.permission_id
    }

    fn matches(&self, query: &str) -> bool {
        contains_ignore_case(Some(self.permission_code.as_str()), query)
            || contains_ignore_case(self.description.as_deref(), query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_code_and_description() {
        let permission = Permission {
            permission_id: 4,
            permission_code: "USER_CREATE".to_string(),
            description: Some("Create new accounts".to_string()),
        };

        assert!(permission.matches("user_c"));
        assert!(permission.matches("ACCOUNTS"));
        assert!(!permission.matches("delete"));
    }

    #[test]
    fn test_validate() {
        let draft = PermissionDraft {
            permission_code: "ab".to_string(),
            description: Some("x".repeat(501)),
        };

        assert_eq!(
            draft.validate(DraftMode::Create),
            vec![
                "Permission code must be at least 3 characters".to_string(),
                "Permission code should be uppercase with underscores (e.g., USER_CREATE)"
                    .to_string(),
                "Description cannot exceed 500 characters".to_string(),
            ]
        );

        let draft = PermissionDraft {
            permission_code: "ROLE_ASSIGN".to_string(),
            description: None,
        };
        assert!(draft.validate(DraftMode::Update).is_empty());
    }
}
