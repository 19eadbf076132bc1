//! Activity types an intervention can be filed under.

use super::page::{EntityPage, PageConfig, PageMeta, PageSettings};
use super::Route;
use crate::domain::{Activity, RecordSet};
use crate::sheet::{FieldSpec, FormData, FormSpec, SheetSize};
use crate::table::{CellValue, Column, ColumnSchema, SortDirection, SortState};
use crate::ui::grid::{Card, EmptyState};

#[must_use]
pub fn schema() -> ColumnSchema<Activity> {
    ColumnSchema::new(vec![Column::new("name", "Name", |a: &Activity| {
        CellValue::text(&a.name)
    })
    .searchable()
    .pinned()])
}

#[must_use]
pub fn form(_records: &RecordSet) -> FormSpec {
    FormSpec::new("New Activity")
        .description("Add a new activity type")
        .size(SheetSize::Small)
        .field(FieldSpec::text("name", "Name").required().placeholder("e.g. Installazione"))
        .submit_label("Create Activity")
}

#[must_use]
pub fn page(settings: &PageSettings) -> EntityPage<Activity> {
    EntityPage::new(
        PageConfig {
            route: Route::Activities,
            meta: PageMeta {
                title: "Activities",
                description: "Activity types used to classify interventions",
                new_label: "New Activity",
                edit_title: "Edit Activity",
            },
            schema: schema(),
            sort: SortState::by("name", SortDirection::Ascending),
            empty: EmptyState::new("No activities found")
                .description("Create the first activity type"),
            cards: Box::new(|a: &Activity| Card::new(&a.name)),
            form,
            prefill: |a| [("name", a.name.as_str())].into_iter().collect::<FormData>(),
            select: |set| set.activities.clone(),
            flag: None,
        },
        settings,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures;
    use crate::screens::page::TableScreen;
    use crate::worker::{SheetKind, WorkerMessage};

    #[test]
    fn create_submission_carries_form_values() {
        let mut page = page(&PageSettings::default());
        page.load(&fixtures::record_set());
        assert!(page.open_create());
        let session = page.sheet_session_mut().unwrap();
        for c in "Collaudo".chars() {
            session.input(c);
        }
        match page.submit_sheet().unwrap() {
            WorkerMessage::SubmitForm { route, sheet, data, record_id, .. } => {
                assert_eq!(route, Route::Activities);
                assert_eq!(sheet, SheetKind::Create);
                assert_eq!(record_id, None);
                assert_eq!(data.get("name"), Some("Collaudo"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
