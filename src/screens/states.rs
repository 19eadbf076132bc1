//! Workflow states with their badge colours.

use super::page::{EntityPage, PageConfig, PageMeta, PageSettings};
use super::Route;
use crate::domain::{RecordSet, WorkflowState};
use crate::sheet::{FieldSpec, FormData, FormSpec, SheetSize};
use crate::table::{
    Cell, CellStyle, CellValue, Column, ColumnSchema, SortDirection, SortState,
};
use crate::ui::grid::{Card, EmptyState};

#[must_use]
pub fn schema() -> ColumnSchema<WorkflowState> {
    ColumnSchema::new(vec![
        Column::new("name", "Name", |s: &WorkflowState| CellValue::text(&s.name))
            .cell(|s| Cell::styled(&s.name, CellStyle::Swatch(s.color.clone())))
            .searchable()
            .pinned(),
        Column::new("color", "Color", |s: &WorkflowState| CellValue::text(&s.color))
            .cell(|s| Cell::styled(&s.color, CellStyle::Mono))
            .unsortable(),
    ])
}

fn card(s: &WorkflowState) -> Card {
    Card::new(&s.name).field("Color", Cell::styled(&s.color, CellStyle::Swatch(s.color.clone())))
}

#[must_use]
pub fn form(_records: &RecordSet) -> FormSpec {
    FormSpec::new("New State")
        .description("Add a workflow state")
        .size(SheetSize::Small)
        .field(FieldSpec::text("name", "Name").required())
        .field(FieldSpec::color("color", "Color").required().default_value("#3b82f6"))
        .submit_label("Create State")
}

fn prefill(s: &WorkflowState) -> FormData {
    [("name", s.name.as_str()), ("color", s.color.as_str())]
        .into_iter()
        .collect()
}

#[must_use]
pub fn page(settings: &PageSettings) -> EntityPage<WorkflowState> {
    EntityPage::new(
        PageConfig {
            route: Route::States,
            meta: PageMeta {
                title: "States",
                description: "Workflow states an intervention moves through",
                new_label: "New State",
                edit_title: "Edit State",
            },
            schema: schema(),
            sort: SortState::by("name", SortDirection::Ascending),
            empty: EmptyState::new("No states found").description("Create the first workflow state"),
            cards: Box::new(card),
            form,
            prefill,
            select: |set| set.states.clone(),
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
    use crate::ui::grid::GridView;

    #[test]
    fn swatch_cells_carry_colour() {
        let mut page = page(&PageSettings::default());
        page.load(&fixtures::record_set());
        let GridView::Table(table) = page.grid(120, 100) else {
            panic!("expected table");
        };
        assert_eq!(table.rows[0].cells[0].text, "Completato");
        assert_eq!(table.rows[0].cells[0].style, CellStyle::Swatch("#10b981".into()));
    }
}
