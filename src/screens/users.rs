//! Staff accounts.

use super::page::{EntityPage, PageConfig, PageMeta, PageSettings};
use super::Route;
use crate::domain::{RecordSet, Role, User};
use crate::sheet::{FieldSpec, FormData, FormSpec};
use crate::table::{
    Cell, CellStyle, CellValue, Column, ColumnSchema, FilterOption, SortDirection, SortState,
};
use crate::ui::grid::{Card, EmptyState};

fn role_options() -> Vec<FilterOption> {
    [Role::Operator, Role::Admin, Role::SuperAdmin]
        .into_iter()
        .map(|r| FilterOption::new(r.label(), r.as_str()))
        .collect()
}

/// Two-letter avatar.
fn initials(u: &User) -> String {
    u.first_name
        .chars()
        .take(1)
        .chain(u.last_name.chars().take(1))
        .flat_map(char::to_uppercase)
        .collect()
}

#[must_use]
pub fn schema() -> ColumnSchema<User> {
    ColumnSchema::new(vec![
        Column::new("avatar", "", |u: &User| CellValue::text(initials(u)))
            .cell(|u| Cell::styled(initials(u), CellStyle::Badge))
            .unsortable()
            .pinned()
            .width(4),
        Column::new("fullName", "Name", |u: &User| CellValue::text(u.full_name()))
            .searchable()
            .pinned(),
        Column::new("email", "Email", |u: &User| CellValue::text(&u.email)).searchable(),
        Column::new("role", "Role", |u: &User| CellValue::text(u.role.as_str()))
            .cell(|u| Cell::styled(u.role.label(), CellStyle::Badge))
            .multi_select("Role", role_options()),
    ])
}

fn card(u: &User) -> Card {
    Card::new(u.full_name())
        .subtitle(&u.email)
        .badge(Cell::styled(u.role.label(), CellStyle::Badge))
}

#[must_use]
pub fn form(_records: &RecordSet) -> FormSpec {
    FormSpec::new("New User")
        .description("Invite a new staff member")
        .field(FieldSpec::text("firstName", "First name").required())
        .field(FieldSpec::text("lastName", "Last name").required())
        .field(FieldSpec::email("email", "Email").required())
        .field(FieldSpec::select("role", "Role", role_options()).required())
        .field(FieldSpec::password("password", "Temporary password").required())
        .submit_label("Create User")
}

fn prefill(u: &User) -> FormData {
    [
        ("firstName", u.first_name.as_str()),
        ("lastName", u.last_name.as_str()),
        ("email", u.email.as_str()),
        ("role", u.role.as_str()),
    ]
    .into_iter()
    .collect()
}

#[must_use]
pub fn page(settings: &PageSettings) -> EntityPage<User> {
    EntityPage::new(
        PageConfig {
            route: Route::Users,
            meta: PageMeta {
                title: "Users",
                description: "Staff accounts and their roles",
                new_label: "New User",
                edit_title: "Edit User",
            },
            schema: schema(),
            sort: SortState::by("fullName", SortDirection::Ascending),
            empty: EmptyState::new("No users found").description("Invite your first staff member"),
            cards: Box::new(card),
            form,
            prefill,
            select: |set| set.users.clone(),
            flag: None,
        },
        settings,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures;
    use crate::screens::page::{PopoverKind, TableScreen};

    fn loaded() -> EntityPage<User> {
        let mut page = page(&PageSettings::default());
        page.load(&fixtures::record_set());
        page
    }

    #[test]
    fn initials_are_uppercase() {
        let user = &fixtures::users()[1];
        assert_eq!(initials(user), "LV");
    }

    #[test]
    fn role_facet_counts() {
        let mut page = loaded();
        page.open_popover(PopoverKind::Facet("role"));
        let view = page.popover().unwrap();
        let counts: Vec<_> = view.items.iter().map(|i| i.detail.as_deref()).collect();
        assert_eq!(counts, [Some("2"), Some("1"), Some("0")]);
    }

    #[test]
    fn sort_popover_cycles_name() {
        let mut page = loaded();
        page.open_popover(PopoverKind::Sort);
        let view = page.popover().unwrap();
        assert!(view.query.is_none());
        let name = view.items.iter().position(|i| i.label == "Name").unwrap();
        assert!(view.items[name].checked);
        for _ in 0..name {
            page.popover_move(true);
        }
        page.popover_activate(false);
        let first = page.adapter().visible_rows()[0].full_name();
        assert_eq!(first, "Mario Rossi");
    }
}
