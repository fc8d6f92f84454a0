//! User interface layer.
//!
//! ```text
//! ViewStateStore ──project──> ResultsPane ──compute_viewmodel──> UIViewModel ──render──> ANSI
//! ```
//!
//! - [`projector`]: Pure mapping from view state to a render branch
//! - [`viewmodel`]: Display-ready frame description
//! - [`renderer`]: Entry point called from the plugin's `render`
//! - [`components`]: Per-region renderers
//! - [`helpers`]: Cursor, highlighting and text layout utilities
//! - [`theme`]: Color schemes and ANSI escapes

pub mod components;
pub mod helpers;
pub mod projector;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use projector::{project, BookRow, Projection, RenderBranch};
pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{BookCard, EmptyState, FooterInfo, HeaderInfo, NoticeInfo, SearchBarInfo, UIViewModel};
