//! Generic table screen shared by every entity list.
//!
//! An [`EntityPage`] composes a [`TableAdapter`] with the toolbar, grid,
//! popovers, create/edit sheets and the delete confirmation. Screens of
//! different record types are driven through the object-safe
//! [`TableScreen`] trait.

use crate::domain::{Record, RecordSet};
use crate::screens::Route;
use crate::sheet::{
    Controlled, FormData, FormSession, FormSheet, FormSpec, OpenChange, OpenControl, SheetSize,
    SubmitOutcome, SubmitRejected, Uncontrolled,
};
use crate::table::{
    ColumnSchema, Debouncer, FilterVariant, SortState, TableAdapter, DEFAULT_DEBOUNCE,
    DEFAULT_PAGE_SIZE,
};
use crate::ui::grid::{layout_grid, CardLayout, EmptyState, GridInput, GridView};
use crate::worker::{SheetKind, WorkerMessage};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::time::{Duration, Instant};

/// Table settings shared by every page, resolved from the plugin config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSettings {
    pub page_size: usize,
    pub debounce: Duration,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

/// Static copy of a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMeta {
    pub title: &'static str,
    pub description: &'static str,
    /// Label of the "new" action, e.g. `New Client`.
    pub new_label: &'static str,
    pub edit_title: &'static str,
}

/// Everything an entity module supplies to build its page.
pub struct PageConfig<T: Record> {
    pub route: Route,
    pub meta: PageMeta,
    pub schema: ColumnSchema<T>,
    pub sort: SortState,
    pub empty: EmptyState,
    pub cards: Box<dyn CardLayout<T>>,
    /// Sheet form; select options may come from the loaded records.
    pub form: fn(&RecordSet) -> FormSpec,
    /// Edit sheet values for a record.
    pub prefill: fn(&T) -> FormData,
    /// Picks this page's list out of the loaded records.
    pub select: fn(&RecordSet) -> Vec<T>,
    /// Rows rendered with the urgent marker.
    pub flag: Option<fn(&T) -> bool>,
}

/// A toolbar control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolbarItem {
    /// Select or multi-select column; opens the faceted popover.
    Facet {
        id: &'static str,
        title: String,
        /// Labels of the selected options.
        selected: Vec<String>,
    },
    Toggle {
        id: &'static str,
        title: String,
        on: bool,
    },
    /// Only present while a column filter is active.
    Reset,
}

impl ToolbarItem {
    /// Chip text.
    ///
    /// ```
    /// use zentask::screens::page::ToolbarItem;
    ///
    /// let chip = ToolbarItem::Facet {
    ///     id: "status",
    ///     title: "Status".into(),
    ///     selected: vec!["A".into(), "B".into(), "C".into()],
    /// };
    /// assert_eq!(chip.label(), "Status: 3 selected");
    /// ```
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Facet { title, selected, .. } => match selected.len() {
                0 => format!("+ {title}"),
                1 | 2 => format!("{title}: {}", selected.join(", ")),
                n => format!("{title}: {n} selected"),
            },
            Self::Toggle { title, on, .. } => {
                format!("[{}] {title}", if *on { "x" } else { " " })
            }
            Self::Reset => "Reset ✕".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarView {
    pub query: String,
    pub items: Vec<ToolbarItem>,
    pub focus: usize,
}

/// What activating a toolbar control did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarOutcome {
    Nothing,
    OpenedPopover,
    Changed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopoverKind {
    /// Checklist with live counts for one column.
    Facet(&'static str),
    /// Column visibility.
    Columns,
    Sort,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopoverCommand {
    Pick(String),
    ClearFilter,
    ToggleColumn(&'static str),
    Sort(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopoverItem {
    pub label: String,
    pub icon: Option<String>,
    /// Count for facets, direction for sorts.
    pub detail: Option<String>,
    pub checked: bool,
    pub command: PopoverCommand,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopoverView {
    pub title: String,
    /// `None` for popovers without a search box.
    pub query: Option<String>,
    pub items: Vec<PopoverItem>,
    pub cursor: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Popover {
    kind: PopoverKind,
    query: String,
    cursor: usize,
}

/// Open form ready for rendering.
#[derive(Debug, Clone, Copy)]
pub struct SheetView<'a> {
    pub kind: SheetKind,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub size: SheetSize,
    pub session: &'a FormSession,
    pub submit_label: &'a str,
    pub cancel_label: &'a str,
}

impl<'a> SheetView<'a> {
    fn of<C: OpenControl>(sheet: &'a FormSheet<C>, kind: SheetKind) -> Self {
        let spec = sheet.session().spec();
        Self {
            kind,
            title: sheet.title(),
            description: spec.description.as_deref(),
            size: sheet.size(),
            session: sheet.session(),
            submit_label: sheet.submit_label(),
            cancel_label: &spec.cancel_label,
        }
    }
}

/// Record awaiting delete confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub id: String,
    pub label: String,
    pub detail: Option<String>,
}

/// Pagination footer numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    /// One-based.
    pub page: usize,
    pub pages: usize,
    pub filtered: usize,
    pub total: usize,
    pub can_previous: bool,
    pub can_next: bool,
}

impl PageInfo {
    #[must_use]
    pub fn page_label(&self) -> String {
        format!("Page {} of {}", self.page, self.pages)
    }

    #[must_use]
    pub fn rows_label(&self) -> String {
        format!("{} of {} rows", self.filtered, self.total)
    }
}

/// Object-safe surface of a table screen.
pub trait TableScreen {
    fn route(&self) -> Route;
    fn meta(&self) -> &PageMeta;
    fn is_loading(&self) -> bool;
    /// Installs this page's records and leaves the loading state.
    fn load(&mut self, records: &RecordSet);

    fn selected(&self) -> usize;
    fn select_next(&mut self);
    fn select_previous(&mut self);
    fn next_page(&mut self) -> bool;
    fn previous_page(&mut self) -> bool;
    fn page_info(&self) -> PageInfo;
    fn grid(&self, cols: usize, breakpoint: usize) -> GridView;

    fn search_query(&self) -> &str;
    /// Appends to the search box; returns the debounce delay to wait.
    fn search_input(&mut self, c: char, now: Instant) -> Duration;
    fn search_backspace(&mut self, now: Instant) -> Duration;
    /// Applies the debounced query if it is due.
    fn poll_search(&mut self, now: Instant) -> bool;
    fn search_remaining(&self, now: Instant) -> Option<Duration>;
    /// Applies the pending query immediately.
    fn commit_search(&mut self);
    fn clear_search(&mut self);

    fn toolbar(&self) -> ToolbarView;
    fn move_toolbar_focus(&mut self, forward: bool);
    fn activate_toolbar(&mut self) -> ToolbarOutcome;
    fn reset_filters(&mut self) -> bool;

    fn open_popover(&mut self, kind: PopoverKind) -> bool;
    fn popover(&self) -> Option<PopoverView>;
    fn has_popover(&self) -> bool;
    fn popover_input(&mut self, c: char);
    fn popover_backspace(&mut self);
    fn popover_move(&mut self, forward: bool);
    fn popover_activate(&mut self, additive: bool) -> bool;
    fn close_popover(&mut self);

    fn open_create(&mut self) -> bool;
    fn open_edit(&mut self) -> bool;
    fn sheet(&self) -> Option<SheetView<'_>>;
    fn sheet_session_mut(&mut self) -> Option<&mut FormSession>;
    /// Starts submitting the open sheet.
    ///
    /// # Errors
    ///
    /// Returns why the submit did not start.
    fn submit_sheet(&mut self) -> Result<WorkerMessage, SubmitRejected>;
    fn cancel_sheet(&mut self) -> bool;
    fn dismiss_sheet(&mut self) -> bool;
    fn complete_submission(
        &mut self,
        sheet: SheetKind,
        ticket: u64,
        result: Result<(), String>,
    ) -> SubmitOutcome;

    fn request_delete(&mut self) -> bool;
    fn pending_delete(&self) -> Option<&PendingDelete>;
    fn confirm_delete(&mut self) -> Option<WorkerMessage>;
    fn cancel_delete(&mut self);
}

pub struct EntityPage<T: Record> {
    route: Route,
    meta: PageMeta,
    adapter: TableAdapter<T>,
    empty: EmptyState,
    cards: Box<dyn CardLayout<T>>,
    create_sheet: FormSheet<Uncontrolled>,
    edit_sheet: FormSheet<Controlled>,
    editing: Option<String>,
    deleting: Option<PendingDelete>,
    loading: bool,
    search: Debouncer<String>,
    search_text: String,
    selected: usize,
    toolbar_focus: usize,
    popover: Option<Popover>,
    form: fn(&RecordSet) -> FormSpec,
    prefill: fn(&T) -> FormData,
    select: fn(&RecordSet) -> Vec<T>,
    flag: Option<fn(&T) -> bool>,
}

fn edit_spec(mut spec: FormSpec, title: &str) -> FormSpec {
    title.clone_into(&mut spec.title);
    spec
}

impl<T: Record> EntityPage<T> {
    /// A page in the loading state with no records.
    #[must_use]
    pub fn new(config: PageConfig<T>, settings: &PageSettings) -> Self {
        let spec = (config.form)(&RecordSet::default());
        let edit = edit_spec(spec.clone(), config.meta.edit_title);
        Self {
            route: config.route,
            meta: config.meta,
            adapter: TableAdapter::new(config.schema, Vec::new())
                .with_page_size(settings.page_size)
                .with_sort(config.sort),
            empty: config.empty,
            cards: config.cards,
            create_sheet: FormSheet::uncontrolled(spec),
            edit_sheet: FormSheet::controlled(edit, false),
            editing: None,
            deleting: None,
            loading: true,
            search: Debouncer::new(settings.debounce),
            search_text: String::new(),
            selected: 0,
            toolbar_focus: 0,
            popover: None,
            form: config.form,
            prefill: config.prefill,
            select: config.select,
            flag: config.flag,
        }
    }

    #[must_use]
    pub const fn adapter(&self) -> &TableAdapter<T> {
        &self.adapter
    }

    /// Id of the record in the edit sheet.
    #[must_use]
    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    #[must_use]
    pub fn selected_record(&self) -> Option<&T> {
        self.adapter.visible_rows().get(self.selected).copied()
    }

    fn clamp_selection(&mut self) {
        let rows = self.adapter.visible_rows().len();
        self.selected = self.selected.min(rows.saturating_sub(1));
    }

    fn apply_query(&mut self, query: String) {
        tracing::debug!(screen = %self.route, query = %query, "global search applied");
        self.adapter.set_global_filter(query);
        self.clamp_selection();
    }

    fn set_edit_open(&mut self, open: bool) {
        self.edit_sheet.sync_open(open);
        if !open {
            self.editing = None;
        }
    }

    fn apply_edit_change(&mut self, change: OpenChange) -> bool {
        match change {
            OpenChange::Requested(open) => {
                self.set_edit_open(open);
                true
            }
            OpenChange::Changed => true,
            OpenChange::Ignored => false,
        }
    }

    fn toolbar_items(&self) -> Vec<ToolbarItem> {
        let filters = self.adapter.filters();
        let mut items: Vec<ToolbarItem> = self
            .adapter
            .schema()
            .filterable()
            .filter_map(|column| {
                let filter = column.filter.as_ref()?;
                Some(match filter.variant {
                    FilterVariant::Toggle => ToolbarItem::Toggle {
                        id: column.id,
                        title: filter.title.clone(),
                        on: filters.is_flag_set(column.id),
                    },
                    FilterVariant::Select | FilterVariant::MultiSelect => {
                        let chosen = filters.selected(column.id);
                        ToolbarItem::Facet {
                            id: column.id,
                            title: filter.title.clone(),
                            selected: filter
                                .options
                                .iter()
                                .filter(|o| chosen.contains(&o.value))
                                .map(|o| o.label.clone())
                                .collect(),
                        }
                    }
                })
            })
            .collect();
        if filters.has_column_filters() {
            items.push(ToolbarItem::Reset);
        }
        items
    }

    fn popover_items(&self, popover: &Popover) -> Vec<PopoverItem> {
        let matcher = SkimMatcherV2::default();
        let query = popover.query.trim();
        let keep = |label: &str| query.is_empty() || matcher.fuzzy_match(label, query).is_some();

        match popover.kind {
            PopoverKind::Facet(id) => {
                let options = self.adapter.option_counts(id);
                let any_selected = options.iter().any(|o| o.selected);
                let mut items: Vec<PopoverItem> = options
                    .into_iter()
                    .filter(|o| keep(&o.option.label))
                    .map(|o| PopoverItem {
                        label: o.option.label,
                        icon: o.option.icon,
                        detail: Some(o.count.to_string()),
                        checked: o.selected,
                        command: PopoverCommand::Pick(o.option.value),
                    })
                    .collect();
                if any_selected {
                    items.push(PopoverItem {
                        label: "Clear filters".to_string(),
                        icon: None,
                        detail: None,
                        checked: false,
                        command: PopoverCommand::ClearFilter,
                    });
                }
                items
            }
            PopoverKind::Columns => self
                .adapter
                .schema()
                .iter()
                .filter(|c| c.hideable && keep(&c.header))
                .map(|c| PopoverItem {
                    label: c.header.clone(),
                    icon: None,
                    detail: None,
                    checked: self.adapter.is_column_visible(c.id),
                    command: PopoverCommand::ToggleColumn(c.id),
                })
                .collect(),
            PopoverKind::Sort => {
                let keys = self.adapter.sort().keys();
                self.adapter
                    .schema()
                    .iter()
                    .filter(|c| c.sortable && keep(&c.header))
                    .map(|c| {
                        let position = keys.iter().position(|k| k.column == c.id);
                        PopoverItem {
                            label: c.header.clone(),
                            icon: None,
                            detail: position.map(|p| format!("{} {}", p + 1, keys[p].direction.arrow())),
                            checked: position.is_some(),
                            command: PopoverCommand::Sort(c.id),
                        }
                    })
                    .collect()
            }
        }
    }

    fn popover_title(&self, kind: PopoverKind) -> String {
        match kind {
            PopoverKind::Facet(id) => self
                .adapter
                .schema()
                .get(id)
                .and_then(|c| c.filter.as_ref())
                .map_or_else(|| id.to_string(), |f| f.title.clone()),
            PopoverKind::Columns => "Columns".to_string(),
            PopoverKind::Sort => "Sort".to_string(),
        }
    }
}

impl<T: Record> TableScreen for EntityPage<T> {
    fn route(&self) -> Route {
        self.route
    }

    fn meta(&self) -> &PageMeta {
        &self.meta
    }

    fn is_loading(&self) -> bool {
        self.loading
    }

    fn load(&mut self, records: &RecordSet) {
        let list = (self.select)(records);
        tracing::debug!(screen = %self.route, count = list.len(), "page records loaded");
        self.adapter.set_records(list);
        if self.sheet().is_none() {
            let spec = (self.form)(records);
            let edit = edit_spec(spec.clone(), self.meta.edit_title);
            self.create_sheet = FormSheet::uncontrolled(spec);
            self.edit_sheet = FormSheet::controlled(edit, false);
        }
        self.loading = false;
        self.clamp_selection();
    }

    fn selected(&self) -> usize {
        self.selected
    }

    fn select_next(&mut self) {
        let rows = self.adapter.visible_rows().len();
        if rows > 0 {
            self.selected = (self.selected + 1) % rows;
        }
    }

    fn select_previous(&mut self) {
        let rows = self.adapter.visible_rows().len();
        if rows > 0 {
            self.selected = (self.selected + rows - 1) % rows;
        }
    }

    fn next_page(&mut self) -> bool {
        let moved = self.adapter.next_page();
        if moved {
            self.selected = 0;
        }
        moved
    }

    fn previous_page(&mut self) -> bool {
        let moved = self.adapter.previous_page();
        if moved {
            self.selected = 0;
        }
        moved
    }

    fn page_info(&self) -> PageInfo {
        let pagination = self.adapter.pagination();
        let filtered = self.adapter.filtered_count();
        PageInfo {
            page: pagination.page_index() + 1,
            pages: self.adapter.page_count(),
            filtered,
            total: self.adapter.records().len(),
            can_previous: pagination.can_previous(),
            can_next: pagination.can_next(filtered),
        }
    }

    fn grid(&self, cols: usize, breakpoint: usize) -> GridView {
        layout_grid(&GridInput {
            adapter: &self.adapter,
            loading: self.loading,
            empty: &self.empty,
            cards: &*self.cards,
            cols,
            breakpoint,
            selected: self.selected,
            flag: self.flag,
        })
    }

    fn search_query(&self) -> &str {
        &self.search_text
    }

    fn search_input(&mut self, c: char, now: Instant) -> Duration {
        self.search_text.push(c);
        self.search.push(self.search_text.clone(), now)
    }

    fn search_backspace(&mut self, now: Instant) -> Duration {
        self.search_text.pop();
        self.search.push(self.search_text.clone(), now)
    }

    fn poll_search(&mut self, now: Instant) -> bool {
        match self.search.poll(now) {
            Some(query) => {
                self.apply_query(query);
                true
            }
            None => false,
        }
    }

    fn search_remaining(&self, now: Instant) -> Option<Duration> {
        self.search.remaining(now)
    }

    fn commit_search(&mut self) {
        if let Some(query) = self.search.flush() {
            self.apply_query(query);
        }
    }

    fn clear_search(&mut self) {
        self.search.cancel();
        self.search_text.clear();
        self.apply_query(String::new());
    }

    fn toolbar(&self) -> ToolbarView {
        let items = self.toolbar_items();
        ToolbarView {
            query: self.search_text.clone(),
            focus: self.toolbar_focus.min(items.len().saturating_sub(1)),
            items,
        }
    }

    fn move_toolbar_focus(&mut self, forward: bool) {
        let len = self.toolbar_items().len();
        if len == 0 {
            return;
        }
        let current = self.toolbar_focus.min(len - 1);
        self.toolbar_focus = if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
    }

    fn activate_toolbar(&mut self) -> ToolbarOutcome {
        let items = self.toolbar_items();
        let Some(item) = items.get(self.toolbar_focus.min(items.len().saturating_sub(1))) else {
            return ToolbarOutcome::Nothing;
        };
        match item {
            ToolbarItem::Facet { id, .. } => {
                self.open_popover(PopoverKind::Facet(*id));
                ToolbarOutcome::OpenedPopover
            }
            ToolbarItem::Toggle { id, .. } => {
                self.adapter.toggle_flag_filter(id);
                self.clamp_selection();
                ToolbarOutcome::Changed
            }
            ToolbarItem::Reset => {
                self.reset_filters();
                self.toolbar_focus = 0;
                ToolbarOutcome::Changed
            }
        }
    }

    fn reset_filters(&mut self) -> bool {
        let filters = self.adapter.filters();
        if !filters.has_column_filters() && filters.global().is_empty() && self.search_text.is_empty() {
            return false;
        }
        tracing::debug!(screen = %self.route, "filters reset");
        self.search.cancel();
        self.search_text.clear();
        self.adapter.reset_filters();
        self.clamp_selection();
        true
    }

    fn open_popover(&mut self, kind: PopoverKind) -> bool {
        if let PopoverKind::Facet(id) = kind {
            let is_facet = self
                .adapter
                .schema()
                .get(id)
                .and_then(|c| c.filter_variant())
                .is_some_and(|v| v != FilterVariant::Toggle);
            if !is_facet {
                return false;
            }
        }
        self.popover = Some(Popover {
            kind,
            query: String::new(),
            cursor: 0,
        });
        true
    }

    fn popover(&self) -> Option<PopoverView> {
        let popover = self.popover.as_ref()?;
        let items = self.popover_items(popover);
        Some(PopoverView {
            title: self.popover_title(popover.kind),
            query: (popover.kind != PopoverKind::Sort).then(|| popover.query.clone()),
            cursor: popover.cursor.min(items.len().saturating_sub(1)),
            items,
        })
    }

    fn has_popover(&self) -> bool {
        self.popover.is_some()
    }

    fn popover_input(&mut self, c: char) {
        let Some(popover) = self.popover.as_mut() else {
            return;
        };
        if popover.kind == PopoverKind::Sort {
            if matches!(c, ' ' | '+') {
                self.popover_activate(true);
            }
            return;
        }
        popover.query.push(c);
        popover.cursor = 0;
    }

    fn popover_backspace(&mut self) {
        if let Some(popover) = self.popover.as_mut() {
            popover.query.pop();
            popover.cursor = 0;
        }
    }

    fn popover_move(&mut self, forward: bool) {
        let Some(popover) = self.popover.clone() else {
            return;
        };
        let len = self.popover_items(&popover).len();
        if len == 0 {
            return;
        }
        let current = popover.cursor.min(len - 1);
        let next = if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        if let Some(open) = self.popover.as_mut() {
            open.cursor = next;
        }
    }

    fn popover_activate(&mut self, additive: bool) -> bool {
        let Some(popover) = self.popover.clone() else {
            return false;
        };
        let items = self.popover_items(&popover);
        let Some(item) = items.get(popover.cursor.min(items.len().saturating_sub(1))) else {
            return false;
        };
        match (&item.command, popover.kind) {
            (PopoverCommand::Pick(value), PopoverKind::Facet(id)) => {
                self.adapter.pick_filter_option(id, value);
            }
            (PopoverCommand::ClearFilter, PopoverKind::Facet(id)) => {
                self.adapter.clear_filter(id);
            }
            (PopoverCommand::ToggleColumn(id), _) => {
                self.adapter.toggle_column_visibility(id);
            }
            (PopoverCommand::Sort(id), _) => {
                self.adapter.cycle_sort(id, additive);
            }
            _ => return false,
        }
        self.clamp_selection();
        true
    }

    fn close_popover(&mut self) {
        self.popover = None;
    }

    fn open_create(&mut self) -> bool {
        if self.loading || self.sheet().is_some() {
            return false;
        }
        self.create_sheet.open() == OpenChange::Changed
    }

    fn open_edit(&mut self) -> bool {
        if self.loading || self.sheet().is_some() {
            return false;
        }
        let Some(record) = self.selected_record() else {
            return false;
        };
        let id = record.record_id().to_string();
        let data = (self.prefill)(record);
        tracing::debug!(screen = %self.route, record_id = %id, "editing record");
        self.edit_sheet.session_mut().load(&data);
        self.editing = Some(id);
        self.set_edit_open(true);
        true
    }

    fn sheet(&self) -> Option<SheetView<'_>> {
        if self.create_sheet.is_open() {
            Some(SheetView::of(&self.create_sheet, SheetKind::Create))
        } else if self.edit_sheet.is_open() {
            Some(SheetView::of(&self.edit_sheet, SheetKind::Edit))
        } else {
            None
        }
    }

    fn sheet_session_mut(&mut self) -> Option<&mut FormSession> {
        if self.create_sheet.is_open() {
            Some(self.create_sheet.session_mut())
        } else if self.edit_sheet.is_open() {
            Some(self.edit_sheet.session_mut())
        } else {
            None
        }
    }

    fn submit_sheet(&mut self) -> Result<WorkerMessage, SubmitRejected> {
        if self.create_sheet.is_open() {
            let submission = self.create_sheet.submit()?;
            return Ok(WorkerMessage::submit_form(
                self.route,
                SheetKind::Create,
                submission.ticket,
                None,
                submission.data,
            ));
        }
        let submission = self.edit_sheet.submit()?;
        Ok(WorkerMessage::submit_form(
            self.route,
            SheetKind::Edit,
            submission.ticket,
            self.editing.clone(),
            submission.data,
        ))
    }

    fn cancel_sheet(&mut self) -> bool {
        if self.create_sheet.is_open() {
            return self.create_sheet.cancel() != OpenChange::Ignored;
        }
        let change = self.edit_sheet.cancel();
        self.apply_edit_change(change)
    }

    fn dismiss_sheet(&mut self) -> bool {
        if self.create_sheet.is_open() {
            return self.create_sheet.dismiss_outside() != OpenChange::Ignored;
        }
        let change = self.edit_sheet.dismiss_outside();
        self.apply_edit_change(change)
    }

    fn complete_submission(
        &mut self,
        sheet: SheetKind,
        ticket: u64,
        result: Result<(), String>,
    ) -> SubmitOutcome {
        match sheet {
            SheetKind::Create => self.create_sheet.complete(ticket, result).0,
            SheetKind::Edit => {
                let (outcome, change) = self.edit_sheet.complete(ticket, result);
                self.apply_edit_change(change);
                outcome
            }
            SheetKind::Page => SubmitOutcome::Stale,
        }
    }

    fn request_delete(&mut self) -> bool {
        if self.loading || self.sheet().is_some() {
            return false;
        }
        let Some(record) = self.selected_record() else {
            return false;
        };
        self.deleting = Some(PendingDelete {
            id: record.record_id().to_string(),
            label: record.record_label(),
            detail: record.record_detail(),
        });
        true
    }

    fn pending_delete(&self) -> Option<&PendingDelete> {
        self.deleting.as_ref()
    }

    fn confirm_delete(&mut self) -> Option<WorkerMessage> {
        let pending = self.deleting.take()?;
        tracing::debug!(screen = %self.route, record_id = %pending.id, "delete confirmed");
        Some(WorkerMessage::delete_record(self.route, pending.id, pending.label))
    }

    fn cancel_delete(&mut self) {
        self.deleting = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{fixtures, Activity};
    use crate::sheet::FieldSpec;
    use crate::table::{CellValue, Column, FilterOption};
    use crate::ui::grid::Card;

    fn activity_page() -> EntityPage<Activity> {
        let schema = ColumnSchema::new(vec![
            Column::new("name", "Name", |a: &Activity| CellValue::text(&a.name))
                .searchable()
                .multi_select("Name", FilterOption::same(["Installazione", "Manutenzione", "Riparazione"])),
        ]);
        EntityPage::new(
            PageConfig {
                route: Route::Activities,
                meta: PageMeta {
                    title: "Activities",
                    description: "",
                    new_label: "New Activity",
                    edit_title: "Edit Activity",
                },
                schema,
                sort: SortState::default(),
                empty: EmptyState::new("No activities found"),
                cards: Box::new(|a: &Activity| Card::new(a.name.clone())),
                form: |_| FormSpec::new("New Activity").field(FieldSpec::text("name", "Name")),
                prefill: |a| [("name", a.name.as_str())].into_iter().collect(),
                select: |set| set.activities.clone(),
                flag: None,
            },
            &PageSettings::default(),
        )
    }

    fn loaded() -> EntityPage<Activity> {
        let mut page = activity_page();
        page.load(&fixtures::record_set());
        page
    }

    #[test]
    fn starts_loading_until_records_arrive() {
        let mut page = activity_page();
        assert!(page.grid(120, 100).is_loading());
        assert!(!page.open_create());
        page.load(&fixtures::record_set());
        assert!(!page.is_loading());
        assert_eq!(page.page_info().rows_label(), "3 of 3 rows");
    }

    #[test]
    fn search_is_debounced() {
        let mut page = loaded();
        let t0 = Instant::now();
        for c in "ripa".chars() {
            page.search_input(c, t0);
        }
        assert_eq!(page.page_info().filtered, 3);
        assert!(!page.poll_search(t0 + Duration::from_millis(100)));
        assert!(page.poll_search(t0 + DEFAULT_DEBOUNCE));
        assert_eq!(page.page_info().filtered, 1);
    }

    #[test]
    fn reset_clears_search_and_facets() {
        let mut page = loaded();
        assert!(page.open_popover(PopoverKind::Facet("name")));
        assert!(page.popover_activate(false));
        assert_eq!(page.toolbar().items.last(), Some(&ToolbarItem::Reset));
        assert!(page.reset_filters());
        assert_eq!(page.page_info().filtered, 3);
        assert!(!page.reset_filters());
    }

    #[test]
    fn facet_popover_counts_and_clear_item() {
        let mut page = loaded();
        page.open_popover(PopoverKind::Facet("name"));
        page.popover_activate(false);
        let view = page.popover().unwrap();
        assert_eq!(view.items[0].detail.as_deref(), Some("1"));
        assert!(view.items[0].checked);
        assert_eq!(view.items.last().map(|i| &i.command), Some(&PopoverCommand::ClearFilter));

        page.popover_input('m');
        page.popover_input('a');
        page.popover_input('n');
        let labels: Vec<_> = page.popover().unwrap().items.into_iter().map(|i| i.label).collect();
        assert_eq!(labels, ["Manutenzione", "Clear filters"]);
    }

    #[test]
    fn edit_sheet_is_parent_controlled() {
        let mut page = loaded();
        assert!(page.open_edit());
        assert_eq!(page.editing(), Some("1"));
        let view = page.sheet().unwrap();
        assert_eq!(view.kind, SheetKind::Edit);
        assert_eq!(view.title, "Edit Activity");
        assert_eq!(view.session.data().get("name"), Some("Installazione"));

        assert!(page.cancel_sheet());
        assert!(page.sheet().is_none());
        assert_eq!(page.editing(), None);

        assert!(page.open_edit());
        assert!(page.dismiss_sheet());
        assert!(page.sheet().is_none());
        assert_eq!(page.editing(), None);
        assert!(page.open_edit());
    }

    #[test]
    fn failed_edit_submission_keeps_sheet() {
        let mut page = loaded();
        page.open_edit();
        let WorkerMessage::SubmitForm { ticket, record_id, .. } = page.submit_sheet().unwrap() else {
            panic!("expected submit");
        };
        assert_eq!(record_id.as_deref(), Some("1"));
        assert_eq!(page.submit_sheet(), Err(SubmitRejected::AlreadyPending));
        assert!(!page.cancel_sheet());

        let outcome = page.complete_submission(SheetKind::Edit, ticket, Err("offline".into()));
        assert_eq!(outcome, SubmitOutcome::Failed("offline".into()));
        assert!(page.sheet().is_some());

        let retry = page.submit_sheet().unwrap();
        let WorkerMessage::SubmitForm { ticket, .. } = retry else {
            panic!("expected submit");
        };
        page.complete_submission(SheetKind::Edit, ticket, Ok(()));
        assert!(page.sheet().is_none());
    }

    #[test]
    fn delete_needs_confirmation() {
        let mut page = loaded();
        page.select_next();
        assert!(page.request_delete());
        assert_eq!(page.pending_delete().map(|d| d.label.as_str()), Some("Manutenzione"));
        let message = page.confirm_delete().unwrap();
        assert!(matches!(message, WorkerMessage::DeleteRecord { ref id, .. } if id == "2"));
        assert!(page.pending_delete().is_none());
    }

    #[test]
    fn columns_popover_lists_hideable_columns() {
        let mut page = loaded();
        page.open_popover(PopoverKind::Columns);
        page.popover_activate(false);
        assert!(!page.adapter().is_column_visible("name"));
    }
}
