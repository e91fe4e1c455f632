use serde::{Serialize, de::DeserializeOwned};

pub mod permission;
pub mod permission_group;
pub mod role;
pub mod user;
pub mod validation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    User,
    Role,
    Permission,
    PermissionGroup,
}

impl ResourceKind {
    pub fn collection_path(&self) -> &'static str {
        match self {
            ResourceKind::User => "/users/",
            ResourceKind::Role => "/roles/",
            ResourceKind::Permission => "/permissions/",
            ResourceKind::PermissionGroup => "/permission-groups/",
        }
    }

    /// Capitalised singular, as used in notices ("Role created successfully!").
    pub fn title(&self) -> &'static str {
        match self {
            ResourceKind::User => "User",
            ResourceKind::Role => "Role",
            ResourceKind::Permission => "Permission",
            ResourceKind::PermissionGroup => "Permission group",
        }
    }

    pub fn singular(&self) -> &'static str {
        match self {
            ResourceKind::User => "user",
            ResourceKind::Role => "role",
            ResourceKind::Permission => "permission",
            ResourceKind::PermissionGroup => "permission group",
        }
    }

    pub fn plural(&self) -> &'static str {
        match self {
            ResourceKind::User => "users",
            ResourceKind::Role => "roles",
            ResourceKind::Permission => "permissions",
            ResourceKind::PermissionGroup => "permission groups",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftMode {
    Create,
    Update,
}

/// Client-side form hints. These never replace backend validation.
pub trait Validate {
    fn validate(&self, mode: DraftMode) -> Vec<String>;
}

pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    type Draft: Serialize + Validate + Send + Sync;

    const KIND: ResourceKind;

    fn id(&self) -> i64;

    /// Search predicate for the panel filter. `query` is never empty.
    fn matches(&self, query: &str) -> bool;
}

pub(crate) fn contains_ignore_case(haystack: Option<&str>, needle: &str) -> bool {
    haystack
        .map(|h| h.to_lowercase().contains(&needle.to_lowercase()))
        .unwrap_or(false)
}
