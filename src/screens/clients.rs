//! Clients list.

use super::page::{EntityPage, PageConfig, PageMeta, PageSettings};
use super::Route;
use crate::domain::{Client, ClientKind, RecordSet};
use crate::sheet::{FieldSpec, FormData, FormSpec};
use crate::table::{
    Cell, CellStyle, CellValue, Column, ColumnSchema, FilterOption, SortDirection, SortState,
};
use crate::ui::grid::{Card, EmptyState};

fn kind_options() -> Vec<FilterOption> {
    [ClientKind::Private, ClientKind::Company]
        .into_iter()
        .map(|k| FilterOption::new(k.label(), k.as_str()))
        .collect()
}

#[must_use]
pub fn schema() -> ColumnSchema<Client> {
    ColumnSchema::new(vec![
        Column::new("name", "Name", |c: &Client| CellValue::text(&c.name))
            .searchable()
            .pinned()
            .width(25),
        Column::new("type", "Type", |c: &Client| CellValue::text(c.kind.as_str()))
            .cell(|c| Cell::styled(c.kind.label(), CellStyle::Badge))
            .multi_select("Type", kind_options()),
        Column::new("phone", "Phone", |c: &Client| CellValue::text(&c.phone))
            .cell(|c| Cell::styled(&c.phone, CellStyle::Mono))
            .searchable(),
        Column::new("email", "Email", |c: &Client| CellValue::text(&c.email)).searchable(),
        Column::new("notes", "Notes", |c: &Client| CellValue::optional(c.notes.as_deref()))
            .cell(|c| Cell::styled(c.notes.as_deref().unwrap_or("-"), CellStyle::Dim))
            .unsortable(),
    ])
}

fn card(c: &Client) -> Card {
    let card = Card::new(&c.name)
        .badge(Cell::styled(c.kind.label(), CellStyle::Badge))
        .field("Phone", Cell::styled(&c.phone, CellStyle::Mono))
        .field("Email", Cell::plain(&c.email));
    match &c.notes {
        Some(notes) => card.subtitle(notes),
        None => card,
    }
}

#[must_use]
pub fn form(_records: &RecordSet) -> FormSpec {
    FormSpec::new("New Client")
        .description("Add a new client to the registry")
        .field(FieldSpec::select("type", "Type", kind_options()).required())
        .field(FieldSpec::text("name", "Name").required().placeholder("Company or full name"))
        .field(FieldSpec::phone("phone", "Phone").placeholder("+39 ..."))
        .field(FieldSpec::email("email", "Email").placeholder("name@example.com"))
        .field(FieldSpec::multiline("notes", "Notes"))
        .submit_label("Create Client")
}

fn prefill(c: &Client) -> FormData {
    [
        ("type", c.kind.as_str().to_string()),
        ("name", c.name.clone()),
        ("phone", c.phone.clone()),
        ("email", c.email.clone()),
        ("notes", c.notes.clone().unwrap_or_default()),
    ]
    .into_iter()
    .collect()
}

#[must_use]
pub fn page(settings: &PageSettings) -> EntityPage<Client> {
    EntityPage::new(
        PageConfig {
            route: Route::Clients,
            meta: PageMeta {
                title: "Clients",
                description: "Manage your client registry",
                new_label: "New Client",
                edit_title: "Edit Client",
            },
            schema: schema(),
            sort: SortState::by("name", SortDirection::Ascending),
            empty: EmptyState::new("No clients found")
                .description("Add your first client to get started")
                .icon("☖"),
            cards: Box::new(card),
            form,
            prefill,
            select: |set| set.clients.clone(),
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
    use crate::ui::grid::GridView;

    fn loaded() -> EntityPage<Client> {
        let mut page = page(&PageSettings::default());
        page.load(&fixtures::record_set());
        page
    }

    #[test]
    fn sorted_by_name() {
        let page = loaded();
        let names: Vec<_> = page.adapter().visible_rows().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Azienda ABC S.r.l.", "Mario Bianchi", "Studio Legale XYZ"]);
    }

    #[test]
    fn type_filter_combines_kinds() {
        let mut page = loaded();
        page.open_popover(PopoverKind::Facet("type"));
        page.popover_activate(false);
        assert_eq!(page.page_info().filtered, 1);
        page.popover_move(true);
        page.popover_activate(false);
        assert_eq!(page.page_info().filtered, 3);
        page.popover_activate(false);
        assert_eq!(page.page_info().filtered, 1);
    }

    #[test]
    fn narrow_view_renders_cards_with_badge() {
        let page = loaded();
        let GridView::Cards(cards) = page.grid(60, 100) else {
            panic!("expected cards");
        };
        assert_eq!(cards[0].card.title, "Azienda ABC S.r.l.");
        assert_eq!(cards[0].card.badge.as_ref().map(|b| b.text.as_str()), Some("Company"));
    }
}
