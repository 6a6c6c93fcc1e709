//! Catalog operations against a recording fake of the collection service.

use pretty_assertions::assert_eq;
use reelshelf_core::render::{LOAD_FAILED_MESSAGE, html};
use reelshelf_core::{
    AddForm, Catalog, ClientTimestampIds, ListView, NoticeKind, OpError, ServerAssignedIds, ops,
};
use reelshelf_protocol::{ApiError, MovieId, ValidationError};
use reelshelf_test_utils::{ApiCall, ApiOp, InMemoryMovieApi, dune_pair, movie};

async fn loaded(api: &InMemoryMovieApi) -> Catalog {
    let mut catalog = Catalog::new();
    ops::reload(&mut catalog, api).await.expect("reload");
    api.clear_calls();
    catalog
}

#[tokio::test]
async fn invalid_create_never_reaches_the_network() {
    let api = InMemoryMovieApi::with_movies(dune_pair());
    let mut catalog = loaded(&api).await;

    let mut blank_title = AddForm::new("", "Sci-Fi", "2016");
    let err = ops::create(&mut catalog, &api, &mut blank_title, &ServerAssignedIds)
        .await
        .unwrap_err();
    assert_eq!(err, OpError::Validation(ValidationError::EmptyTitle));

    let mut bad_year = AddForm::new("Arrival", "Sci-Fi", "abc");
    let err = ops::create(&mut catalog, &api, &mut bad_year, &ServerAssignedIds)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        OpError::Validation(ValidationError::InvalidYear("abc".to_string()))
    );

    assert!(api.calls().is_empty());
    assert_eq!(bad_year, AddForm::new("Arrival", "Sci-Fi", "abc"));
    assert_eq!(catalog.notice_count(), 2);
}

#[tokio::test]
async fn created_record_appears_after_full_reload() {
    let api = InMemoryMovieApi::with_movies(dune_pair());
    let mut catalog = loaded(&api).await;
    let ids = ClientTimestampIds::with_clock(|| 1_700_000_000_000);

    let mut form = AddForm::new("Arrival", "Sci-Fi", "2016");
    let created = ops::create(&mut catalog, &api, &mut form, &ids)
        .await
        .expect("create");

    assert_eq!(created, movie(1_700_000_000_000, "Arrival", 2016, "Sci-Fi"));
    assert_eq!(form, AddForm::default());
    assert_eq!(
        api.calls().iter().map(ApiCall::op).collect::<Vec<_>>(),
        vec![ApiOp::Create, ApiOp::List]
    );
    let titles: Vec<_> = catalog.view().rows().iter().map(|row| row.title.clone()).collect();
    assert_eq!(titles, vec!["Dune", "Duna", "Arrival"]);
    assert!(html(&catalog.view()).contains("<strong>Arrival</strong> (2016) - Sci-Fi"));
}

#[tokio::test]
async fn server_assigned_create_omits_the_id() {
    let api = InMemoryMovieApi::new();
    let mut catalog = loaded(&api).await;

    let mut form = AddForm::new("Heat", "", "1995");
    let created = ops::create(&mut catalog, &api, &mut form, &ServerAssignedIds)
        .await
        .expect("create");

    match &api.calls()[0] {
        ApiCall::Create(request) => assert_eq!(request.id, None),
        other => panic!("unexpected call {other:?}"),
    }
    assert_eq!(catalog.find(&created.id), Some(&created));
}

#[tokio::test]
async fn failed_create_surfaces_notice_and_skips_reload() {
    let api = InMemoryMovieApi::new();
    let mut catalog = loaded(&api).await;
    api.fail_next(
        ApiOp::Create,
        ApiError::Status {
            status: 500,
            body: "db down".to_string(),
        },
    );

    let mut form = AddForm::new("Arrival", "Sci-Fi", "2016");
    let err = ops::create(&mut catalog, &api, &mut form, &ServerAssignedIds)
        .await
        .unwrap_err();

    assert!(matches!(err, OpError::Api(ApiError::Status { status: 500, .. })));
    assert_eq!(api.call_count(ApiOp::List), 0);
    assert_eq!(form.title, "Arrival");
    let notice = catalog.take_notice().expect("notice");
    assert_eq!(notice.kind, NoticeKind::Request);
    assert_eq!(notice.message, "Error adding movie: HTTP 500: db down");
}

#[tokio::test]
async fn update_sends_full_record_and_reloads() {
    let api = InMemoryMovieApi::with_movies(dune_pair());
    let mut catalog = loaded(&api).await;

    catalog.begin_edit(&MovieId::Number(2)).expect("edit");
    if let Some(form) = catalog.edit_mut() {
        form.title = "Dune: Part One".to_string();
        form.genre = "Adventure".to_string();
    }
    let updated = ops::update(&mut catalog, &api).await.expect("update");

    let replacement = movie(2, "Dune: Part One", 2021, "Adventure");
    assert_eq!(updated, replacement);
    assert_eq!(
        api.calls(),
        vec![ApiCall::Update(replacement.clone()), ApiCall::List]
    );
    assert_eq!(catalog.find(&MovieId::Number(2)), Some(&replacement));
}

#[tokio::test]
async fn cancelled_edit_has_no_side_effects() {
    let api = InMemoryMovieApi::with_movies(dune_pair());
    let mut catalog = loaded(&api).await;

    catalog.begin_edit(&MovieId::Number(1)).expect("edit");
    if let Some(form) = catalog.edit_mut() {
        form.title = "Something else".to_string();
    }
    catalog.cancel_edit();

    assert_eq!(ops::update(&mut catalog, &api).await, Err(OpError::NoEdit));
    assert!(api.calls().is_empty());
    assert_eq!(api.movies(), dune_pair());
    assert_eq!(catalog.movies(), dune_pair().as_slice());
}

#[tokio::test]
async fn delete_requires_confirmation() {
    let api = InMemoryMovieApi::with_movies(dune_pair());
    let mut catalog = loaded(&api).await;

    catalog.request_delete(MovieId::Number(1));
    catalog.cancel_delete();
    assert_eq!(
        ops::delete(&mut catalog, &api).await,
        Err(OpError::NotConfirmed)
    );
    assert!(api.calls().is_empty());

    catalog.request_delete(MovieId::Number(1));
    let deleted = ops::delete(&mut catalog, &api).await.expect("delete");
    assert_eq!(deleted, MovieId::Number(1));
    assert_eq!(catalog.movies(), &[movie(2, "Duna", 2021, "Sci-Fi")]);
}

#[tokio::test]
async fn deleting_missing_id_keeps_cache_and_other_rows() {
    let api = InMemoryMovieApi::with_movies(dune_pair());
    let mut catalog = loaded(&api).await;

    catalog.request_delete(MovieId::Number(99));
    let err = ops::delete(&mut catalog, &api).await.unwrap_err();

    assert!(matches!(&err, OpError::Api(api_err) if api_err.is_not_found()));
    assert_eq!(api.calls(), vec![ApiCall::Delete(MovieId::Number(99))]);
    assert_eq!(catalog.movies(), dune_pair().as_slice());
    let ids: Vec<_> = catalog.view().rows().iter().map(|row| row.id.clone()).collect();
    assert_eq!(ids, vec![MovieId::Number(1), MovieId::Number(2)]);
    assert_eq!(
        catalog.take_notice().map(|notice| notice.kind),
        Some(NoticeKind::Request)
    );
}

#[tokio::test]
async fn reload_failure_after_write_still_reports_success() {
    let api = InMemoryMovieApi::with_movies(dune_pair());
    let mut catalog = loaded(&api).await;
    api.fail_next(ApiOp::List, ApiError::Network("reset".to_string()));

    catalog.request_delete(MovieId::Number(2));
    ops::delete(&mut catalog, &api).await.expect("delete");

    assert_eq!(api.movies(), vec![movie(1, "Dune", 1984, "Sci-Fi")]);
    assert_eq!(
        catalog.view(),
        ListView::Failed(LOAD_FAILED_MESSAGE.to_string())
    );
    assert_eq!(catalog.movies(), dune_pair().as_slice());
}

#[tokio::test]
async fn offline_service_shows_inline_failure() {
    let api = InMemoryMovieApi::new();
    api.set_offline(true);
    let mut catalog = Catalog::new();

    let err = ops::reload(&mut catalog, &api).await.unwrap_err();
    assert!(matches!(err, OpError::Api(ApiError::Network(_))));
    assert!(!catalog.is_loaded());
    assert_eq!(
        html(&catalog.view()),
        "<p style=\"color:darkred\">Failed to load movies. Is the movie service running?</p>"
    );
}
