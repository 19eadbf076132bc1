//! Screen routes, navigation order and breadcrumb trails.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A top-level screen of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Route {
    #[default]
    Dashboard,
    Interventions,
    Clients,
    Activities,
    States,
    Users,
    Account,
    Settings,
}

impl Route {
    /// Navigation order, also the `1`-`8` shortcut order.
    pub const ALL: [Self; 8] = [
        Self::Dashboard,
        Self::Interventions,
        Self::Clients,
        Self::Activities,
        Self::States,
        Self::Users,
        Self::Account,
        Self::Settings,
    ];

    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Dashboard => "/",
            Self::Interventions => "/interventions",
            Self::Clients => "/clients",
            Self::Activities => "/activities",
            Self::States => "/states",
            Self::Users => "/users",
            Self::Account => "/account",
            Self::Settings => "/settings",
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Interventions => "Interventions",
            Self::Clients => "Clients",
            Self::Activities => "Activities",
            Self::States => "States",
            Self::Users => "Users",
            Self::Account => "Account",
            Self::Settings => "Settings",
        }
    }

    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.path() == path)
    }

    #[must_use]
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|r| *r == self).unwrap_or(0)
    }

    /// Maps the `1`-`8` shortcut keys.
    #[must_use]
    pub fn from_digit(c: char) -> Option<Self> {
        let n = c.to_digit(10)? as usize;
        n.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    #[must_use]
    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// One element of a breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
    pub label: String,
    pub path: String,
}

/// Builds the trail for `path`: always `Home`, then one crumb per segment.
///
/// Known paths use their screen title; other segments are capitalized.
///
/// ```
/// use zentask::screens::route::breadcrumbs;
///
/// let labels: Vec<_> = breadcrumbs("/clients/new-entry")
///     .into_iter()
///     .map(|c| c.label)
///     .collect();
/// assert_eq!(labels, ["Home", "Clients", "New-entry"]);
/// ```
#[must_use]
pub fn breadcrumbs(path: &str) -> Vec<Crumb> {
    let mut trail = vec![Crumb {
        label: "Home".to_string(),
        path: "/".to_string(),
    }];

    let mut current = String::new();
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        current.push('/');
        current.push_str(segment);
        let label = Route::from_path(&current).map_or_else(|| capitalize(segment), |r| r.title().to_string());
        trail.push(Crumb {
            label,
            path: current.clone(),
        });
    }
    trail
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_just_home() {
        let trail = breadcrumbs("/");
        assert_eq!(trail.len(), 1);
        assert_eq!(trail[0].label, "Home");
    }

    #[test]
    fn known_paths_use_titles() {
        let trail = breadcrumbs(Route::Settings.path());
        assert_eq!(trail[1].label, "Settings");
        assert_eq!(trail[1].path, "/settings");
    }

    #[test]
    fn navigation_wraps() {
        assert_eq!(Route::Settings.next(), Route::Dashboard);
        assert_eq!(Route::Dashboard.previous(), Route::Settings);
        assert_eq!(Route::from_digit('2'), Some(Route::Interventions));
        assert_eq!(Route::from_digit('0'), None);
        assert_eq!(Route::from_digit('9'), None);
    }
}
