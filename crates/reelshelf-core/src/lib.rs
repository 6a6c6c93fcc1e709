//! Catalog view-model for a remote movie collection.
//!
//! [`Catalog`] owns the in-memory cache, the search text, the add/edit form
//! drafts and the queue of user-facing notices. Front-ends drive it either
//! through the sequential operations in [`ops`] or, when network calls run on
//! their own tasks, through the `prepare_*` / `finish_*` pairs directly.

pub mod catalog;
pub mod error;
pub mod filter;
pub mod forms;
pub mod ids;
pub mod notice;
pub mod ops;
pub mod render;

pub use catalog::{Catalog, RowState};
pub use error::OpError;
pub use forms::{AddForm, EditForm, FormField};
pub use ids::{ClientTimestampIds, IdSource, ServerAssignedIds, id_source_for};
pub use notice::{Notice, NoticeKind};
pub use render::{ListView, RowView};
