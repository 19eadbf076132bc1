//! View model types representing renderable UI state.
//!
//! View models are created by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They hold display-ready strings and flags only; nothing in
//! here mutates state or knows about key handling.
//!
//! # Example
//!
//! ```rust
//! use zentask::ui::viewmodel::{BodyView, FooterInfo, HeaderInfo, UIViewModel};
//!
//! let vm = UIViewModel {
//!     header: HeaderInfo {
//!         title: "ZenTask".to_string(),
//!         crumbs: vec!["Home".to_string()],
//!         user: "Mario Rossi · Admin".to_string(),
//!     },
//!     nav: vec![],
//!     body: BodyView::Dashboard(Default::default()),
//!     footer: FooterInfo {
//!         keybindings: "q: quit".to_string(),
//!         toast: None,
//!     },
//! };
//! assert!(vm.footer.toast.is_none());
//! ```

use crate::screens::page::{PageInfo, PopoverView, ToolbarView};
use crate::screens::Restricted;
use crate::ui::grid::GridView;

#[derive(Debug, Clone)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    /// Screen tabs in navigation order.
    pub nav: Vec<NavItem>,

    pub body: BodyView,

    pub footer: FooterInfo,
}

#[derive(Debug, Clone)]
pub struct HeaderInfo {
    pub title: String,

    /// Breadcrumb labels, `Home` first.
    pub crumbs: Vec<String>,

    /// Signed-in user and role.
    pub user: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    /// Shortcut digit.
    pub key: char,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub enum BodyView {
    Dashboard(DashboardView),
    Table(Box<TableScreenView>),
    Form(FormScreenView),
}

#[derive(Debug, Clone, Default)]
pub struct DashboardView {
    /// `None` while records are loading.
    pub tiles: Option<Vec<(&'static str, usize)>>,
    pub recent: Vec<RecentItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentItem {
    pub code: String,
    pub description: String,
    pub client: String,
    pub status: String,
    pub urgent: bool,
}

/// Everything a table screen draws, overlays included.
#[derive(Debug, Clone)]
pub struct TableScreenView {
    pub title: String,
    pub description: String,
    pub new_label: String,
    pub toolbar: ToolbarView,
    pub search_focused: bool,
    pub toolbar_focused: bool,
    /// Search text typed but not yet applied.
    pub search_pending: bool,
    pub grid: GridView,
    pub page: PageInfo,
    pub popover: Option<PopoverView>,
    pub sheet: Option<SheetPanel>,
    pub confirm: Option<ConfirmDialog>,
}

/// Side panel hosting a create or edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetPanel {
    pub title: String,
    pub description: Option<String>,
    /// Panel width in columns.
    pub width: usize,
    pub fields: Vec<FieldView>,
    pub error: Option<String>,
    pub submit_label: String,
    pub cancel_label: String,
    pub pending: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldControl {
    Input,
    /// Cycled with ←/→.
    Select,
    /// Path input plus attached files.
    Upload,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    /// Label with the required marker.
    pub label: String,
    pub value: String,
    pub placeholder: Option<String>,
    pub control: FieldControl,
    pub focused: bool,
    /// Limits line under upload fields.
    pub hint: Option<String>,
    /// Attached files, `name (size)`.
    pub files: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDialog {
    pub title: String,
    pub message: String,
    pub detail: Option<String>,
}

/// Account and Settings.
#[derive(Debug, Clone)]
pub struct FormScreenView {
    pub title: String,
    pub description: String,
    pub restricted: Option<Restricted>,
    pub sections: Vec<SectionView>,
    /// Keys go to the focused section.
    pub editing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionView {
    pub title: String,
    pub description: Option<String>,
    pub fields: Vec<FieldView>,
    pub submit_label: String,
    pub error: Option<String>,
    pub focused: bool,
    pub pending: bool,
}

#[derive(Debug, Clone)]
pub struct FooterInfo {
    pub keybindings: String,

    /// Replaces the keybindings line until the next key press.
    pub toast: Option<Toast>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }
}
