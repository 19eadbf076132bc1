//! Interventions list: the main screen of the plugin.

use super::page::{EntityPage, PageConfig, PageMeta, PageSettings};
use super::Route;
use crate::domain::{Intervention, RecordSet};
use crate::sheet::{FieldSpec, FormData, FormSpec, SheetSize};
use crate::table::{
    Cell, CellStyle, CellValue, Column, ColumnSchema, FilterOption, SortState,
};
use crate::ui::grid::{Card, EmptyState};

pub const STATUSES: [&str; 4] = ["In corso", "Completato", "Programmato", "Sospeso"];
pub const CLIENTS: [&str; 4] = [
    "Azienda ABC S.r.l.",
    "Studio Legale XYZ",
    "Farmacia Centrale",
    "Negozio Elettronica",
];
pub const EMPLOYEES: [&str; 3] = ["Mario Rossi", "Luigi Verdi", "Anna Bianchi"];
pub const ACTIVITIES: [&str; 4] = ["Installazione", "Manutenzione", "Riparazione", "Consulenza"];

fn status_icon(status: &str) -> &'static str {
    match status {
        "In corso" => "◐",
        "Completato" => "●",
        "Programmato" => "○",
        _ => "◌",
    }
}

fn status_options() -> Vec<FilterOption> {
    STATUSES
        .iter()
        .map(|s| FilterOption::new(*s, *s).with_icon(status_icon(s)))
        .collect()
}

#[must_use]
pub fn schema() -> ColumnSchema<Intervention> {
    ColumnSchema::new(vec![
        Column::new("code", "ID", |i: &Intervention| CellValue::text(&i.code))
            .cell(|i| Cell::styled(&i.code, CellStyle::Mono))
            .searchable()
            .pinned()
            .width(12),
        Column::new("urgent", "Urgent", |i: &Intervention| CellValue::Flag(i.urgent))
            .toggle("Urgent only")
            .hidden()
            .pinned(),
        Column::new("activity", "Activity", |i: &Intervention| CellValue::text(&i.activity))
            .multi_select("Activity", FilterOption::same(ACTIVITIES))
            .hidden()
            .pinned(),
        Column::new("description", "Description", |i: &Intervention| {
            CellValue::text(&i.description)
        })
        .cell(|i| Cell::plain(format!("[{}] {}", i.activity, i.description)))
        .searchable()
        .unsortable(),
        Column::new("client", "Client", |i: &Intervention| CellValue::text(&i.client))
            .multi_select("Client", FilterOption::same(CLIENTS))
            .searchable(),
        Column::new("status", "Status", |i: &Intervention| CellValue::text(&i.status))
            .cell(|i| Cell::styled(&i.status, CellStyle::Badge))
            .multi_select("Status", status_options()),
        Column::new("employee", "Employee", |i: &Intervention| CellValue::text(&i.employee))
            .cell(|i| Cell::styled(&i.employee, CellStyle::Badge))
            .multi_select("Employee", FilterOption::same(EMPLOYEES)),
        Column::new("startDate", "Date", |i: &Intervention| CellValue::Date(i.start_date)),
        Column::new("duration", "Duration", |i: &Intervention| CellValue::text(&i.duration))
            .cell(|i| Cell::styled(&i.duration, CellStyle::Mono)),
    ])
}

fn is_urgent(i: &Intervention) -> bool {
    i.urgent
}

fn card(i: &Intervention) -> Card {
    let mut card = Card::new(&i.code)
        .subtitle(&i.description)
        .badge(Cell::styled(&i.status, CellStyle::Badge));
    if i.urgent {
        card = card.field("Priority", Cell::styled("Urgent", CellStyle::Danger));
    }
    card.field("Client", Cell::plain(&i.client))
        .field("Employee", Cell::plain(&i.employee))
        .field("Duration", Cell::styled(&i.duration, CellStyle::Mono))
}

/// Select options from the loaded lists, or the static lists before load.
fn names_or(loaded: Vec<String>, fallback: &[&str]) -> Vec<FilterOption> {
    if loaded.is_empty() {
        FilterOption::same(fallback.iter().copied())
    } else {
        FilterOption::same(loaded)
    }
}

#[must_use]
pub fn form(records: &RecordSet) -> FormSpec {
    let clients = names_or(records.clients.iter().map(|c| c.name.clone()).collect(), &CLIENTS);
    let activities = names_or(
        records.activities.iter().map(|a| a.name.clone()).collect(),
        &ACTIVITIES,
    );
    FormSpec::new("New Intervention")
        .description("Create a new intervention for a client")
        .size(SheetSize::Large)
        .field(FieldSpec::select("client", "Client", clients).required())
        .field(FieldSpec::select("activity", "Activity", activities).required())
        .field(
            FieldSpec::multiline("description", "Description")
                .required()
                .placeholder("Describe the intervention"),
        )
        .field(FieldSpec::date("startDate", "Start date").required())
        .field(FieldSpec::duration("duration", "Duration"))
        .field(FieldSpec::multiline("notes", "Notes").placeholder("Additional notes"))
        .submit_label("Create Intervention")
}

fn prefill(i: &Intervention) -> FormData {
    [
        ("client", i.client.clone()),
        ("activity", i.activity.clone()),
        ("description", i.description.clone()),
        ("startDate", i.start_date.format("%Y-%m-%d").to_string()),
        ("duration", i.duration.clone()),
        ("notes", i.notes.clone().unwrap_or_default()),
    ]
    .into_iter()
    .collect()
}

#[must_use]
pub fn page(settings: &PageSettings) -> EntityPage<Intervention> {
    EntityPage::new(
        PageConfig {
            route: Route::Interventions,
            meta: PageMeta {
                title: "Interventions",
                description: "Manage all company interventions",
                new_label: "New Intervention",
                edit_title: "Edit Intervention",
            },
            schema: schema(),
            sort: SortState::default(),
            empty: EmptyState::new("No interventions found")
                .description("Start by creating your first intervention")
                .icon("⚒"),
            cards: Box::new(card),
            form,
            prefill,
            select: |set| set.interventions.clone(),
            flag: Some(is_urgent),
        },
        settings,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures;
    use crate::screens::page::{PopoverKind, TableScreen, ToolbarItem};

    fn loaded() -> EntityPage<Intervention> {
        let mut page = page(&PageSettings::default());
        page.load(&fixtures::record_set());
        page
    }

    #[test]
    fn urgent_toggle_filters_rows() {
        let mut page = loaded();
        let toolbar = page.toolbar();
        assert!(matches!(toolbar.items[0], ToolbarItem::Toggle { on: false, .. }));
        page.activate_toolbar();
        assert_eq!(page.page_info().filtered, 2);
        assert!(matches!(page.toolbar().items.last(), Some(ToolbarItem::Reset)));
    }

    #[test]
    fn status_facet_counts_respect_other_filters() {
        let mut page = loaded();
        page.activate_toolbar();
        page.open_popover(PopoverKind::Facet("status"));
        let view = page.popover().unwrap();
        let counts: Vec<_> = view
            .items
            .iter()
            .map(|i| (i.label.as_str(), i.detail.clone().unwrap_or_default()))
            .collect();
        assert_eq!(
            counts,
            [("In corso", "2".to_string()), ("Completato", "0".into()), ("Programmato", "0".into()), ("Sospeso", "0".into())]
        );
    }

    #[test]
    fn filter_only_columns_stay_hidden() {
        let page = loaded();
        assert!(!page.adapter().is_column_visible("urgent"));
        assert!(!page.adapter().is_column_visible("activity"));
        assert!(page.adapter().is_column_visible("code"));
    }

    #[test]
    fn edit_prefills_iso_date() {
        let mut page = loaded();
        page.open_edit();
        let data = page.sheet().unwrap().session.data();
        assert_eq!(data.get("startDate"), Some("2025-07-07"));
        assert_eq!(data.get("client"), Some("Azienda ABC S.r.l."));
    }

    #[test]
    fn search_covers_code_description_and_client() {
        let mut page = loaded();
        for c in "farmacia".chars() {
            page.search_input(c, std::time::Instant::now());
        }
        page.commit_search();
        assert_eq!(page.page_info().filtered, 1);
    }
}
