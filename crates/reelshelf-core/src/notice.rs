//! Blocking notifications surfaced to the user.

/// What raised the notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Local validation rejected a draft.
    Validation,
    /// A create/update/delete call failed.
    Request,
    /// An action referenced an id missing from the cache.
    NotFound,
}

/// Notification that must be acknowledged before continuing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Short heading for the notice.
    pub fn title(&self) -> &'static str {
        match self.kind {
            NoticeKind::Validation => "Invalid input",
            NoticeKind::Request => "Request failed",
            NoticeKind::NotFound => "Not found",
        }
    }
}
