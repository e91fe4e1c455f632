use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Logout,
    Users,
    Roles,
    Permissions,
    PermissionGroups,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
    Admin,
}

impl Route {
    pub const ALL: [Route; 8] = [
        Route::Home,
        Route::Login,
        Route::Logout,
        Route::Users,
        Route::Roles,
        Route::Permissions,
        Route::PermissionGroups,
        Route::Admin,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Logout => "/logout",
            Route::Users => "/users",
            Route::Roles => "/roles",
            Route::Permissions => "/permissions",
            Route::PermissionGroups => "/permission-groups",
            Route::Admin => "/admin",
        }
    }

    /// Matches a location path; a trailing slash is ignored. Unknown paths
    /// return `None` and are sent home by the console.
    pub fn from_path(path: &str) -> Option<Route> {
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };

        Route::ALL.into_iter().find(|route| route.path() == path)
    }

    pub fn access(&self) -> Access {
        match self {
            Route::Login | Route::Logout => Access::Public,
            Route::Admin => Access::Admin,
            _ => Access::Authenticated,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationMode {
    /// In-app route change; client state survives.
    ClientSide,
    /// Full reload of the console; all client state is dropped.
    FullPage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Render(Route),
    /// Access is still being decided; show a placeholder, do not redirect.
    Loading(Route),
    Redirect {
        to: Route,
        from: Option<Route>,
        mode: NavigationMode,
    },
    /// The identity check could not finish in time. Access is withheld
    /// without sending the user back to login.
    Unavailable(Route),
}

impl Navigation {
    pub fn redirect(to: Route, mode: NavigationMode) -> Self {
        Navigation::Redirect {
            to,
            from: None,
            mode,
        }
    }

    /// Where the user ends up once this navigation settles.
    pub fn destination(&self) -> Route {
        match self {
            Navigation::Render(route)
            | Navigation::Loading(route)
            | Navigation::Unavailable(route) => *route,
            Navigation::Redirect { to, .. } => *to,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(Route::from_path("/"), Some(Route::Home));
        assert_eq!(Route::from_path(""), Some(Route::Home));
        assert_eq!(Route::from_path("/users"), Some(Route::Users));
        assert_eq!(Route::from_path("/users/"), Some(Route::Users));
        assert_eq!(
            Route::from_path("/permission-groups"),
            Some(Route::PermissionGroups)
        );
        assert_eq!(Route::from_path("/nowhere"), None);
        assert_eq!(Route::from_path("/users/12"), None);
    }

    #[test]
    fn test_paths_round_trip() {
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
    }

    #[test]
    fn test_access() {
        assert_eq!(Route::Login.access(), Access::Public);
        assert_eq!(Route::Logout.access(), Access::Public);
        assert_eq!(Route::Home.access(), Access::Authenticated);
        assert_eq!(Route::Roles.access(), Access::Authenticated);
        assert_eq!(Route::Admin.access(), Access::Admin);
    }
}
