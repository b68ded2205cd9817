//! Root application component
//!
//! The App struct implements the Component trait, acting as the root component
//! that delegates event handling and rendering to child components.
//! App coordinates between components and the session; filtering, paging,
//! and mutation rules live in the model and engine.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    draw_home_screen, ConfirmDialog, DateFilterDialog, DetailDialog, EditDialog, HelpDialog,
    HomeComponent, HomeRenderContext, StatusFilterDialog,
};
use crate::config::Config;
use crate::model::modal::{Modal, ModalStack};
use crate::model::query::QueryState;
use crate::model::record::{EventRecord, RecordId};
use crate::model::session::{Mutation, Session};
use crate::services::export::{self, ExportDocument};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::{layout::Rect, Frame};
use std::path::PathBuf;
use tracing::{debug, info, warn};

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

/// Main application state - coordinates between components
pub struct App {
    /// Records, query state, and detail selection
    pub session: Session,

    /// Effective settings (config file merged with flags)
    pub config: Config,

    /// Modal overlay stack
    pub modals: ModalStack,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Error message to display
    pub error: Option<String>,

    /// Status message to display
    pub status_message: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub home: HomeComponent,
    pub detail_dialog: DetailDialog,
    pub edit_dialog: EditDialog,
    pub confirm_dialog: ConfirmDialog,
    pub status_filter_dialog: StatusFilterDialog,
    pub date_filter_dialog: DateFilterDialog,
    pub help_dialog: HelpDialog,
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    /// Create a new App over `records`
    pub fn new(records: Vec<EventRecord>, config: Config) -> App {
        let query = QueryState::new(config.page_size, config.sort_order);
        let mut app = App {
            session: Session::new(records, query),
            config,
            modals: ModalStack::new(),
            should_quit: false,
            error: None,
            status_message: None,
            home: HomeComponent::new(),
            detail_dialog: DetailDialog::default(),
            edit_dialog: EditDialog::default(),
            confirm_dialog: ConfirmDialog::quit(),
            status_filter_dialog: StatusFilterDialog::new(),
            date_filter_dialog: DateFilterDialog::default(),
            help_dialog: HelpDialog::default(),
        };
        app.reset_cursor();
        app
    }

    fn page_row_count(&self) -> usize {
        self.session.page().rows.len()
    }

    /// Id of the highlighted row on the current page
    fn highlighted_id(&self) -> Option<RecordId> {
        let index = self.home.table.selected_index()?;
        self.session.page().rows.get(index).map(|r| r.id)
    }

    /// Move the highlight to the first row after the page contents change
    fn reset_cursor(&mut self) {
        let rows = self.page_row_count();
        self.home.table.select_first(rows);
    }

    /// Re-derive after a query change
    fn query_changed(&mut self) {
        debug!(
            search = %self.session.query.search,
            status = ?self.session.query.status_filter,
            date = ?self.session.query.date_filter,
            sort = ?self.session.query.sort_order,
            "query changed"
        );
        self.reset_cursor();
    }

    /// Report a mutation and close the whole detail view
    fn after_mutation(&mut self, mutation: Mutation, id: RecordId, changed: bool) {
        self.modals.close_detail();
        if changed {
            self.status_message = Some(format!("{} event #{}", mutation.label(), id));
        } else {
            self.error = Some(format!("Event #{} no longer exists", id));
        }
        let rows = self.page_row_count();
        self.home.table.clamp(rows);
    }

    fn pop_modal_if(&mut self, modal: &Modal) {
        if self.modals.top() == Some(modal) {
            self.modals.pop();
        }
    }

    /// Write the full filtered set to the export directory
    fn export(&mut self) {
        let document = ExportDocument::from_records(&self.session.filtered());
        let dir = PathBuf::from(&self.config.export_dir);

        match export::save(
            &document,
            &dir,
            self.config.export_format,
            self.config.rows_per_document_page,
        ) {
            Ok(path) => {
                info!(path = %path.display(), rows = document.len(), "exported table");
                self.status_message = Some(format!(
                    "Exported {} events to {}",
                    document.len(),
                    path.display()
                ));
            }
            Err(e) => {
                warn!(error = %e, "export failed");
                self.error = Some(format!("Export failed: {:#}", e));
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(Some(Action::ForceQuit));
        }

        // Messages last until the next key press
        self.error = None;
        self.status_message = None;

        if let Some(modal) = self.modals.top().cloned() {
            self.handle_modal_key_event(&modal, key)
        } else {
            self.home.handle_key_event(key)
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if self.modals.is_empty() {
            self.home.handle_mouse_event(mouse)
        } else {
            Ok(None)
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if action != Action::Tick {
            debug!(%action, "update");
        }

        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick | Action::Resize(_, _) => {}
            Action::ForceQuit => {
                info!("quitting");
                self.should_quit = true;
            }

            // ─────────────────────────────────────────────────────────────────
            // Table Navigation
            // ─────────────────────────────────────────────────────────────────
            Action::NextRow => {
                let rows = self.page_row_count();
                self.home.table.next(rows);
            }
            Action::PrevRow => {
                let rows = self.page_row_count();
                self.home.table.previous(rows);
            }
            Action::FirstRow => self.reset_cursor(),
            Action::LastRow => {
                let rows = self.page_row_count();
                self.home.table.select_last(rows);
            }
            Action::NextPage => {
                let total = self.session.page().total_pages;
                self.session.query.next_page(total);
                self.reset_cursor();
            }
            Action::PrevPage => {
                self.session.query.prev_page();
                self.reset_cursor();
            }
            Action::GoToPage(index) => {
                let total = self.session.page().total_pages;
                if self.session.query.go_to_page(index, total) {
                    self.reset_cursor();
                } else {
                    self.status_message = Some(format!("Page {} does not exist", index + 1));
                }
            }
            Action::ToggleRowExpansion => {
                if let Some(id) = self.highlighted_id() {
                    self.home.table.toggle_expansion(id);
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => {
                self.confirm_dialog = ConfirmDialog::quit();
                self.modals.push(Modal::QuitConfirm);
            }
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.push(Modal::Help);
            }
            Action::CloseModal => {
                if let Some(Modal::RowDetail { .. }) = self.modals.pop() {
                    self.session.close_detail();
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Row Interaction
            // ─────────────────────────────────────────────────────────────────
            Action::OpenDetail => return Ok(self.highlighted_id().map(Action::OpenDetailFor)),
            Action::OpenDetailFor(id) => {
                if self.session.open_detail(id) {
                    self.detail_dialog.set_record(id);
                    self.modals.push(Modal::RowDetail { id });
                }
            }
            Action::StartEdit => {
                if let Some(record) = self.session.selected() {
                    let id = record.id;
                    self.edit_dialog.load(record);
                    self.modals.push(Modal::EditRecord { id });
                }
            }
            Action::SubmitEdit(record) => {
                let id = record.id;
                let changed = self.session.edit(record);
                self.after_mutation(Mutation::Edit, id, changed);
            }
            Action::RequestDelete => {
                if let Some(record) = self.session.selected() {
                    let id = record.id;
                    self.confirm_dialog = ConfirmDialog::delete(record);
                    self.modals.push(Modal::DeleteConfirm { id });
                }
            }
            Action::DeleteRecord(id) => {
                let changed = self.session.delete(id);
                self.home.table.expanded.remove(&id);
                self.after_mutation(Mutation::Delete, id, changed);
            }
            Action::MarkComplete(id) => {
                let changed = self.session.mark_complete(id);
                self.after_mutation(Mutation::MarkComplete, id, changed);
            }

            // ─────────────────────────────────────────────────────────────────
            // Search
            // ─────────────────────────────────────────────────────────────────
            Action::EnterSearchMode => self.home.search_mode = true,
            Action::ExitSearchMode => self.home.search_mode = false,
            Action::SearchInput(c) => {
                self.session.query.push_search_char(c);
                self.query_changed();
            }
            Action::SearchBackspace => {
                self.session.query.pop_search_char();
                self.query_changed();
            }
            Action::ClearSearch => {
                if !self.session.query.search.is_empty() {
                    self.session.query.clear_search();
                    self.query_changed();
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Filters & Sorting
            // ─────────────────────────────────────────────────────────────────
            Action::OpenStatusFilter => {
                self.status_filter_dialog
                    .open(self.session.query.status_filter);
                self.modals.push(Modal::StatusFilter);
            }
            Action::SetStatusFilter(status) => {
                self.session.query.set_status_filter(Some(status));
                self.pop_modal_if(&Modal::StatusFilter);
                self.query_changed();
            }
            Action::ClearStatusFilter => {
                self.session.query.set_status_filter(None);
                self.pop_modal_if(&Modal::StatusFilter);
                self.query_changed();
            }
            Action::OpenDateFilter => {
                self.date_filter_dialog.open(self.session.query.date_filter);
                self.modals.push(Modal::DateFilter);
            }
            Action::SetDateFilter(date) => {
                self.session.query.set_date_filter(Some(date));
                self.pop_modal_if(&Modal::DateFilter);
                self.query_changed();
            }
            Action::ClearDateFilter => {
                self.session.query.set_date_filter(None);
                self.pop_modal_if(&Modal::DateFilter);
                self.query_changed();
            }
            Action::ToggleSortOrder => {
                self.session.query.toggle_sort_order();
                self.status_message =
                    Some(format!("Sorted {}", self.session.query.sort_order.label().to_lowercase()));
                self.query_changed();
            }
            Action::ClearFilters => {
                self.session.query.clear_filters();
                self.home.search_mode = false;
                self.query_changed();
            }

            // ─────────────────────────────────────────────────────────────────
            // Export
            // ─────────────────────────────────────────────────────────────────
            Action::Export => self.export(),
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let page = self.session.page();
        let ctx = HomeRenderContext {
            page: &page,
            query: &self.session.query,
            summary: self.session.summary(),
            error: self.error.as_deref(),
            status_message: self.status_message.as_deref(),
        };

        draw_home_screen(frame, area, &mut self.home, &ctx)?;

        // Overlays bottom to top so the edit form sits above the detail view
        let modals: Vec<Modal> = self.modals.iter().cloned().collect();
        for modal in &modals {
            self.draw_modal(frame, area, modal)?;
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helper Methods
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    fn handle_modal_key_event(&mut self, modal: &Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm | Modal::DeleteConfirm { .. } => {
                self.confirm_dialog.handle_key_event(key)
            }
            Modal::Help => self.help_dialog.handle_key_event(key),
            Modal::RowDetail { .. } => self.detail_dialog.handle_key_event(key),
            Modal::EditRecord { .. } => self.edit_dialog.handle_key_event(key),
            Modal::StatusFilter => self.status_filter_dialog.handle_key_event(key),
            Modal::DateFilter => self.date_filter_dialog.handle_key_event(key),
        }
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: &Modal) -> Result<()> {
        match modal {
            Modal::QuitConfirm | Modal::DeleteConfirm { .. } => {
                self.confirm_dialog.draw(frame, area)?
            }
            Modal::Help => self.help_dialog.draw(frame, area)?,
            Modal::RowDetail { id } => {
                if let Some(record) = self.session.get(*id) {
                    self.detail_dialog.draw_with_record(frame, area, record)?;
                }
            }
            Modal::EditRecord { .. } => self.edit_dialog.draw(frame, area)?,
            Modal::StatusFilter => self.status_filter_dialog.draw(frame, area)?,
            Modal::DateFilter => self.date_filter_dialog.draw(frame, area)?,
        }
        Ok(())
    }
}
