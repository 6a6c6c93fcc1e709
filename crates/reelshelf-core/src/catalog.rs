//! The catalog view-model: cache, search, drafts and notices.

use crate::error::OpError;
use crate::filter;
use crate::forms::{AddForm, EditForm};
use crate::ids::IdSource;
use crate::notice::{Notice, NoticeKind};
use crate::render::{LOAD_FAILED_MESSAGE, ListView, RowView};
use log::{debug, error, info};
use reelshelf_protocol::{ApiError, Movie, MovieId, NewMovie, ValidationError};
use std::collections::{HashMap, VecDeque};

/// Question shown before a delete is sent.
pub const DELETE_CONFIRM_PROMPT: &str = "Delete this movie?";

/// Per-row lifecycle between a confirmed write and the next reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowState {
    #[default]
    Displayed,
    /// An update for this row is in flight.
    PendingUpdate,
    /// A delete for this row is in flight.
    PendingDelete,
    /// The last write failed; the row shows old data until a reload.
    Stale,
}

/// State owned by one catalog screen.
///
/// The cache is only replaced by [`Catalog::apply_fetch`]. Writes never patch
/// it; a successful write is followed by a full reload.
#[derive(Debug, Default)]
pub struct Catalog {
    movies: Vec<Movie>,
    loaded: bool,
    search: String,
    failure: Option<String>,
    edit: Option<EditForm>,
    pending_delete: Option<MovieId>,
    notices: VecDeque<Notice>,
    row_states: HashMap<MovieId, RowState>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last fetched collection, in service order.
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// Whether at least one fetch has succeeded.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn find(&self, id: &MovieId) -> Option<&Movie> {
        self.movies.iter().find(|movie| movie.id == *id)
    }

    /// Inline failure from the last fetch, if it is still displayed.
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Apply the outcome of a list call.
    ///
    /// On failure the cache is kept as-is and the list shows the inline
    /// failure message instead of rows.
    pub fn apply_fetch(
        &mut self,
        result: Result<Vec<Movie>, ApiError>,
    ) -> Result<usize, ApiError> {
        match result {
            Ok(movies) => {
                let count = movies.len();
                self.movies = movies;
                self.loaded = true;
                self.failure = None;
                let movies = &self.movies;
                self.row_states.retain(|id, state| {
                    matches!(state, RowState::PendingUpdate | RowState::PendingDelete)
                        && movies.iter().any(|movie| movie.id == *id)
                });
                info!("movies loaded (count={count})");
                Ok(count)
            }
            Err(err) => {
                error!("failed to load movies (error={err})");
                self.failure = Some(LOAD_FAILED_MESSAGE.to_string());
                Err(err)
            }
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Replace the search text. Filtering is local; the list re-renders from
    /// the cache, which also replaces a displayed fetch failure.
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
        self.failure = None;
    }

    /// Cached records matching the current search.
    pub fn visible(&self) -> Vec<&Movie> {
        filter::filter(&self.movies, &self.search)
    }

    pub fn row_state(&self, id: &MovieId) -> RowState {
        self.row_states.get(id).copied().unwrap_or_default()
    }

    /// What the list area currently shows.
    pub fn view(&self) -> ListView {
        if let Some(message) = &self.failure {
            return ListView::Failed(message.clone());
        }
        let visible = self.visible();
        if visible.is_empty() {
            return ListView::Empty;
        }
        ListView::Rows(
            visible
                .into_iter()
                .map(|movie| RowView::from_movie(movie, self.row_state(&movie.id)))
                .collect(),
        )
    }

    /// Validate the add form into a create request.
    ///
    /// A rejected draft queues a validation notice; nothing is sent.
    pub fn prepare_create(
        &mut self,
        form: &AddForm,
        ids: &dyn IdSource,
    ) -> Result<NewMovie, ValidationError> {
        match form.draft() {
            Ok(draft) => Ok(draft.into_new(ids.next_id())),
            Err(err) => {
                debug!("create rejected (reason={err})");
                self.notify(Notice::new(
                    NoticeKind::Validation,
                    "Please provide a valid title and year.",
                ));
                Err(err)
            }
        }
    }

    /// Apply the outcome of a create call. The form is cleared only on
    /// success so a failed submission can be retried.
    pub fn finish_create(
        &mut self,
        result: Result<Movie, ApiError>,
        form: &mut AddForm,
    ) -> Result<Movie, OpError> {
        match result {
            Ok(created) => {
                info!("movie created (id={}, title={})", created.id, created.title);
                form.clear();
                Ok(created)
            }
            Err(err) => {
                error!("failed to add movie (error={err})");
                self.notify(Notice::new(
                    NoticeKind::Request,
                    format!("Error adding movie: {err}"),
                ));
                Err(err.into())
            }
        }
    }

    /// Open the edit form for a cached record.
    pub fn begin_edit(&mut self, id: &MovieId) -> Result<(), OpError> {
        let Some(movie) = self.find(id) else {
            self.notify(Notice::new(NoticeKind::NotFound, "Movie not found."));
            return Err(OpError::NotFound(id.clone()));
        };
        self.edit = Some(EditForm::from_movie(movie));
        Ok(())
    }

    pub fn edit(&self) -> Option<&EditForm> {
        self.edit.as_ref()
    }

    pub fn edit_mut(&mut self) -> Option<&mut EditForm> {
        self.edit.as_mut()
    }

    /// Drop the edit draft. No request is made and the cache is untouched.
    pub fn cancel_edit(&mut self) -> Option<EditForm> {
        let form = self.edit.take();
        if let Some(form) = &form {
            debug!("edit cancelled (id={})", form.id);
        }
        form
    }

    /// Validate the open edit form into a full replacement record.
    ///
    /// On success the form closes and the row is marked pending. On a
    /// validation failure the form stays open with its draft intact.
    pub fn prepare_update(&mut self) -> Result<Movie, OpError> {
        let Some(form) = &self.edit else {
            return Err(OpError::NoEdit);
        };
        match form.to_movie() {
            Ok(movie) => {
                self.edit = None;
                self.row_states.insert(movie.id.clone(), RowState::PendingUpdate);
                Ok(movie)
            }
            Err(err) => {
                debug!("update rejected (id={}, reason={err})", form.id);
                self.notify(Notice::new(NoticeKind::Validation, "Invalid title or year."));
                Err(err.into())
            }
        }
    }

    /// Apply the outcome of an update call for `id`.
    pub fn finish_update(
        &mut self,
        id: &MovieId,
        result: Result<Movie, ApiError>,
    ) -> Result<Movie, OpError> {
        match result {
            Ok(updated) => {
                info!("movie updated (id={id})");
                self.row_states.remove(id);
                Ok(updated)
            }
            Err(err) => {
                error!("failed to update movie (id={id}, error={err})");
                self.row_states.insert(id.clone(), RowState::Stale);
                self.notify(Notice::new(
                    NoticeKind::Request,
                    format!("Error updating movie: {err}"),
                ));
                Err(err.into())
            }
        }
    }

    /// Ask for confirmation before deleting `id`.
    pub fn request_delete(&mut self, id: MovieId) {
        self.pending_delete = Some(id);
    }

    /// Id awaiting delete confirmation.
    pub fn pending_delete(&self) -> Option<&MovieId> {
        self.pending_delete.as_ref()
    }

    /// Confirm the pending delete; returns the id to send.
    pub fn confirm_delete(&mut self) -> Option<MovieId> {
        let id = self.pending_delete.take()?;
        self.row_states.insert(id.clone(), RowState::PendingDelete);
        Some(id)
    }

    pub fn cancel_delete(&mut self) -> Option<MovieId> {
        self.pending_delete.take()
    }

    /// Apply the outcome of a delete call for `id`. On failure the cache is
    /// left unchanged.
    pub fn finish_delete(
        &mut self,
        id: &MovieId,
        result: Result<(), ApiError>,
    ) -> Result<(), OpError> {
        match result {
            Ok(()) => {
                info!("movie deleted (id={id})");
                self.row_states.remove(id);
                Ok(())
            }
            Err(err) => {
                error!("failed to delete movie (id={id}, error={err})");
                self.row_states.insert(id.clone(), RowState::Stale);
                self.notify(Notice::new(
                    NoticeKind::Request,
                    format!("Error deleting movie: {err}"),
                ));
                Err(err.into())
            }
        }
    }

    pub fn notify(&mut self, notice: Notice) {
        self.notices.push_back(notice);
    }

    /// Oldest unacknowledged notice.
    pub fn current_notice(&self) -> Option<&Notice> {
        self.notices.front()
    }

    /// Acknowledge the oldest notice.
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notices.pop_front()
    }

    pub fn notice_count(&self) -> usize {
        self.notices.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ServerAssignedIds;
    use crate::render::html;
    use pretty_assertions::assert_eq;
    use reelshelf_test_utils::{dune_pair, movie};

    fn loaded(movies: Vec<Movie>) -> Catalog {
        let mut catalog = Catalog::new();
        catalog.apply_fetch(Ok(movies)).expect("fetch");
        catalog
    }

    fn titles(view: &ListView) -> Vec<String> {
        view.rows().iter().map(|row| row.title.clone()).collect()
    }

    #[test]
    fn search_filters_the_cache() {
        let mut catalog = loaded(dune_pair());
        catalog.set_search("dun");
        assert_eq!(titles(&catalog.view()), vec!["Dune", "Duna"]);

        catalog.set_search("1984");
        assert_eq!(catalog.view(), ListView::Empty);
        assert_eq!(
            html(&catalog.view()),
            "<p>No movies found matching your criteria.</p>"
        );

        catalog.set_search("");
        assert_eq!(catalog.visible().len(), 2);
    }

    #[test]
    fn narrowing_then_widening_uses_full_cache() {
        let mut catalog = loaded(dune_pair());
        catalog.set_search("dune");
        assert_eq!(titles(&catalog.view()), vec!["Dune"]);
        catalog.set_search("du");
        assert_eq!(titles(&catalog.view()), vec!["Dune", "Duna"]);
    }

    #[test]
    fn failed_fetch_keeps_cache_and_shows_message() {
        let mut catalog = loaded(dune_pair());
        let err = catalog
            .apply_fetch(Err(ApiError::Network("refused".to_string())))
            .unwrap_err();

        assert_eq!(err, ApiError::Network("refused".to_string()));
        assert_eq!(catalog.movies(), dune_pair().as_slice());
        assert_eq!(
            catalog.view(),
            ListView::Failed(LOAD_FAILED_MESSAGE.to_string())
        );

        catalog.set_search("duna");
        assert_eq!(titles(&catalog.view()), vec!["Duna"]);
    }

    #[test]
    fn empty_collection_renders_no_results() {
        let catalog = loaded(Vec::new());
        assert!(catalog.is_loaded());
        assert_eq!(catalog.view(), ListView::Empty);
    }

    #[test]
    fn invalid_add_form_queues_notice() {
        let mut catalog = Catalog::new();
        let err = catalog
            .prepare_create(&AddForm::new("", "", "2016"), &ServerAssignedIds)
            .unwrap_err();
        assert_eq!(err, ValidationError::EmptyTitle);

        let notice = catalog.take_notice().expect("notice");
        assert_eq!(notice.kind, NoticeKind::Validation);
        assert_eq!(notice.message, "Please provide a valid title and year.");
        assert!(catalog.take_notice().is_none());
    }

    #[test]
    fn failed_create_keeps_form_for_retry() {
        let mut catalog = Catalog::new();
        let mut form = AddForm::new("Arrival", "Sci-Fi", "2016");
        let result = catalog.finish_create(
            Err(ApiError::Status {
                status: 500,
                body: "boom".to_string(),
            }),
            &mut form,
        );

        assert!(matches!(result, Err(OpError::Api(_))));
        assert_eq!(form, AddForm::new("Arrival", "Sci-Fi", "2016"));
        assert_eq!(
            catalog.current_notice().map(|notice| notice.message.as_str()),
            Some("Error adding movie: HTTP 500: boom")
        );
    }

    #[test]
    fn successful_create_clears_form() {
        let mut catalog = Catalog::new();
        let mut form = AddForm::new("Arrival", "Sci-Fi", "2016");
        catalog
            .finish_create(Ok(movie(3, "Arrival", 2016, "Sci-Fi")), &mut form)
            .expect("create");
        assert_eq!(form, AddForm::default());
        assert_eq!(catalog.notice_count(), 0);
    }

    #[test]
    fn begin_edit_unknown_id_is_not_found() {
        let mut catalog = loaded(dune_pair());
        let err = catalog.begin_edit(&MovieId::Number(9)).unwrap_err();
        assert_eq!(err, OpError::NotFound(MovieId::Number(9)));
        assert!(catalog.edit().is_none());
        assert_eq!(
            catalog.take_notice(),
            Some(Notice::new(NoticeKind::NotFound, "Movie not found."))
        );
    }

    #[test]
    fn cancel_edit_leaves_everything_untouched() {
        let mut catalog = loaded(dune_pair());
        catalog.begin_edit(&MovieId::Number(1)).expect("edit");
        if let Some(form) = catalog.edit_mut() {
            form.title = "Changed".to_string();
        }
        let dropped = catalog.cancel_edit().expect("form");

        assert_eq!(dropped.title, "Changed");
        assert!(catalog.edit().is_none());
        assert_eq!(catalog.movies(), dune_pair().as_slice());
        assert_eq!(catalog.row_state(&MovieId::Number(1)), RowState::Displayed);
        assert_eq!(catalog.notice_count(), 0);
    }

    #[test]
    fn invalid_edit_keeps_form_open() {
        let mut catalog = loaded(dune_pair());
        catalog.begin_edit(&MovieId::Number(2)).expect("edit");
        if let Some(form) = catalog.edit_mut() {
            form.year = "soon".to_string();
        }

        let err = catalog.prepare_update().unwrap_err();
        assert_eq!(
            err,
            OpError::Validation(ValidationError::InvalidYear("soon".to_string()))
        );
        assert_eq!(catalog.edit().map(|form| form.year.as_str()), Some("soon"));
        assert_eq!(catalog.row_state(&MovieId::Number(2)), RowState::Displayed);
        assert_eq!(
            catalog.take_notice().map(|notice| notice.message),
            Some("Invalid title or year.".to_string())
        );
    }

    #[test]
    fn update_without_form_is_rejected() {
        let mut catalog = loaded(dune_pair());
        assert_eq!(catalog.prepare_update(), Err(OpError::NoEdit));
    }

    #[test]
    fn update_row_walks_pending_then_stale_on_failure() {
        let mut catalog = loaded(dune_pair());
        let id = MovieId::Number(1);
        catalog.begin_edit(&id).expect("edit");
        let replacement = catalog.prepare_update().expect("valid");
        assert_eq!(replacement, movie(1, "Dune", 1984, "Sci-Fi"));
        assert_eq!(catalog.row_state(&id), RowState::PendingUpdate);
        assert!(catalog.edit().is_none());

        let err = catalog
            .finish_update(&id, Err(ApiError::Network("reset".to_string())))
            .unwrap_err();
        assert!(matches!(err, OpError::Api(ApiError::Network(_))));
        assert_eq!(catalog.row_state(&id), RowState::Stale);
        assert_eq!(catalog.view().rows()[0].state, RowState::Stale);
        assert_eq!(catalog.movies()[0].title, "Dune");

        catalog.apply_fetch(Ok(dune_pair())).expect("reload");
        assert_eq!(catalog.row_state(&id), RowState::Displayed);
    }

    #[test]
    fn delete_needs_confirmation() {
        let mut catalog = loaded(dune_pair());
        assert_eq!(catalog.confirm_delete(), None);

        catalog.request_delete(MovieId::Number(2));
        assert_eq!(catalog.pending_delete(), Some(&MovieId::Number(2)));
        assert_eq!(catalog.cancel_delete(), Some(MovieId::Number(2)));
        assert_eq!(catalog.confirm_delete(), None);
        assert_eq!(catalog.row_state(&MovieId::Number(2)), RowState::Displayed);

        catalog.request_delete(MovieId::Number(2));
        assert_eq!(catalog.confirm_delete(), Some(MovieId::Number(2)));
        assert_eq!(catalog.row_state(&MovieId::Number(2)), RowState::PendingDelete);
    }

    #[test]
    fn failed_delete_leaves_cache_unchanged() {
        let mut catalog = loaded(dune_pair());
        catalog.request_delete(MovieId::Number(1));
        let id = catalog.confirm_delete().expect("confirmed");

        let result = catalog.finish_delete(
            &id,
            Err(ApiError::Status {
                status: 404,
                body: "missing".to_string(),
            }),
        );
        assert!(result.is_err());
        assert_eq!(catalog.movies(), dune_pair().as_slice());
        assert_eq!(titles(&catalog.view()), vec!["Dune", "Duna"]);
        assert_eq!(catalog.row_state(&MovieId::Number(2)), RowState::Displayed);
        assert_eq!(catalog.current_notice().map(|n| n.kind), Some(NoticeKind::Request));
    }

    #[test]
    fn reload_keeps_in_flight_markers_for_present_rows() {
        let mut catalog = loaded(dune_pair());
        catalog.request_delete(MovieId::Number(1));
        catalog.confirm_delete().expect("confirmed");
        catalog.begin_edit(&MovieId::Number(2)).expect("edit");
        catalog.prepare_update().expect("valid");

        catalog
            .apply_fetch(Ok(vec![movie(2, "Duna", 2021, "Sci-Fi")]))
            .expect("reload");
        assert_eq!(catalog.row_state(&MovieId::Number(1)), RowState::Displayed);
        assert_eq!(catalog.row_state(&MovieId::Number(2)), RowState::PendingUpdate);
    }

    #[test]
    fn notices_are_acknowledged_in_order() {
        let mut catalog = Catalog::new();
        catalog.notify(Notice::new(NoticeKind::Request, "first"));
        catalog.notify(Notice::new(NoticeKind::Validation, "second"));
        assert_eq!(catalog.notice_count(), 2);
        assert_eq!(catalog.take_notice().map(|n| n.message), Some("first".to_string()));
        assert_eq!(catalog.current_notice().map(|n| n.message.as_str()), Some("second"));
    }
}
