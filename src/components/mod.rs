//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod confirm_dialog;
pub mod date_filter_dialog;
pub mod detail_dialog;
pub mod edit_dialog;
pub mod help_dialog;
pub mod home;
pub mod layout;
pub mod status_filter_dialog;
pub mod summary;
pub mod table;

pub use confirm_dialog::ConfirmDialog;
pub use date_filter_dialog::DateFilterDialog;
pub use detail_dialog::DetailDialog;
pub use edit_dialog::EditDialog;
pub use help_dialog::HelpDialog;
pub use home::{draw_home_screen, HomeComponent, HomeRenderContext};
pub use layout::{calculate_main_layout, centered_popup};
pub use status_filter_dialog::StatusFilterDialog;
