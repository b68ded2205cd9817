//! Model layer - centralized state management
//!
//! This module contains all state-related types:
//! - `EventRecord` - One event row and its status
//! - `QueryState` - Search, filters, sort order, and page cursor
//! - `Session` - Owner of the record set and the detail selection
//! - `ModalStack` - Modal overlay management

pub mod modal;
pub mod query;
pub mod record;
pub mod session;
pub mod summary;

pub use summary::Summary;
