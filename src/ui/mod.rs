//! User interface rendering layer with component-based architecture.
//!
//! # Architecture
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`grid`]: Grid layout decision (skeleton, empty, table or cards)
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Cursor placement, truncation and cell styling
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation

pub mod components;
pub mod grid;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use grid::{layout_grid, Card, CardLayout, EmptyState, GridView};
pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{BodyView, FooterInfo, HeaderInfo, Toast, ToastKind, UIViewModel};
