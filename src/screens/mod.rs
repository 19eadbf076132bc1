//! Page screens and navigation.
//!
//! # Modules
//!
//! - [`route`]: Routes, navigation order and breadcrumbs
//! - [`page`]: Generic table screen ([`EntityPage`]) and its toolbar, popovers and sheets
//! - [`interventions`], [`clients`], [`activities`], [`states`], [`users`]: Entity lists
//! - [`form_screen`]: Full-page forms, used by [`account`] and [`settings`]
//! - [`dashboard`]: Landing counts

pub mod account;
pub mod activities;
pub mod clients;
pub mod dashboard;
pub mod form_screen;
pub mod interventions;
pub mod page;
pub mod route;
pub mod settings;
pub mod states;
pub mod users;

pub use dashboard::{Dashboard, DashboardStats};
pub use form_screen::{FormScreen, Restricted};
pub use page::{EntityPage, PageInfo, PageMeta, PageSettings, TableScreen};
pub use route::{breadcrumbs, Crumb, Route};

use crate::domain::{AuthContext, RecordSet};

/// Every screen of the plugin, built once at load.
pub struct Screens {
    dashboard: Dashboard,
    tables: Vec<Box<dyn TableScreen>>,
    account: FormScreen,
    settings: FormScreen,
}

impl Screens {
    #[must_use]
    pub fn new(page_settings: &PageSettings, auth: &AuthContext) -> Self {
        Self {
            dashboard: Dashboard::default(),
            tables: vec![
                Box::new(interventions::page(page_settings)) as Box<dyn TableScreen>,
                Box::new(clients::page(page_settings)),
                Box::new(activities::page(page_settings)),
                Box::new(states::page(page_settings)),
                Box::new(users::page(page_settings)),
            ],
            account: account::screen(auth),
            settings: settings::screen(auth),
        }
    }

    /// Hands the worker's records to every screen.
    pub fn load(&mut self, records: &RecordSet) {
        self.dashboard.load(records);
        for table in &mut self.tables {
            table.load(records);
        }
    }

    #[must_use]
    pub const fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    #[must_use]
    pub fn table(&self, route: Route) -> Option<&(dyn TableScreen + 'static)> {
        self.tables.iter().find(|t| t.route() == route).map(|t| &**t)
    }

    pub fn table_mut(&mut self, route: Route) -> Option<&mut (dyn TableScreen + 'static)> {
        self.tables
            .iter_mut()
            .find(|t| t.route() == route)
            .map(|t| &mut **t)
    }

    #[must_use]
    pub fn form(&self, route: Route) -> Option<&FormScreen> {
        match route {
            Route::Account => Some(&self.account),
            Route::Settings => Some(&self.settings),
            _ => None,
        }
    }

    pub fn form_mut(&mut self, route: Route) -> Option<&mut FormScreen> {
        match route {
            Route::Account => Some(&mut self.account),
            Route::Settings => Some(&mut self.settings),
            _ => None,
        }
    }
}

impl std::fmt::Debug for Screens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Screens")
            .field("tables", &self.tables.len())
            .field("dashboard", &self.dashboard)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures;

    #[test]
    fn every_table_route_has_a_screen() {
        let mut screens = Screens::new(&PageSettings::default(), &AuthContext::default());
        screens.load(&fixtures::record_set());
        for route in Route::ALL {
            let has_table = screens.table(route).is_some();
            let has_form = screens.form(route).is_some();
            match route {
                Route::Dashboard => assert!(!has_table && !has_form),
                Route::Account | Route::Settings => assert!(has_form),
                _ => assert!(screens.table(route).is_some_and(|t| !t.is_loading())),
            }
        }
    }
}
