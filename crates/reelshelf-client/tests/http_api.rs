//! HTTP client integration tests against a local REST server.

use pretty_assertions::assert_eq;
use reelshelf_client::HttpMovieApi;
use reelshelf_protocol::{ApiError, MovieApi, MovieId, NewMovie};
use reelshelf_test_utils::{dune_pair, movie, spawn_movie_server, spawn_raw_list_server};

#[tokio::test]
async fn lists_the_collection() {
    let server = spawn_movie_server(dune_pair()).await;
    let api = HttpMovieApi::new(&server.collection_url(), None).expect("client");

    let movies = api.list().await.expect("list");
    assert_eq!(movies, dune_pair());
}

#[tokio::test]
async fn create_posts_client_assigned_id() {
    let server = spawn_movie_server(Vec::new()).await;
    let api = HttpMovieApi::new(&server.collection_url(), None).expect("client");

    let created = api
        .create(&NewMovie {
            id: Some(MovieId::Number(1700000000123)),
            title: "Arrival".to_string(),
            genre: "Sci-Fi".to_string(),
            year: 2016,
        })
        .await
        .expect("create");

    assert_eq!(created, movie(1700000000123, "Arrival", 2016, "Sci-Fi"));
    assert_eq!(server.movies(), vec![created]);
}

#[tokio::test]
async fn create_without_id_lets_server_assign() {
    let server = spawn_movie_server(Vec::new()).await;
    let api = HttpMovieApi::new(&server.collection_url(), None).expect("client");

    let created = api
        .create(&NewMovie {
            id: None,
            title: "Arrival".to_string(),
            genre: String::new(),
            year: 2016,
        })
        .await
        .expect("create");

    assert!(matches!(created.id, MovieId::Text(ref id) if id.starts_with("srv-")));
}

#[tokio::test]
async fn update_replaces_record() {
    let server = spawn_movie_server(dune_pair()).await;
    let api = HttpMovieApi::new(&server.collection_url(), None).expect("client");

    let replacement = movie(2, "Dune: Part One", 2021, "Adventure");
    let updated = api.update(&replacement).await.expect("update");

    assert_eq!(updated, replacement);
    assert_eq!(server.movies()[1], replacement);
}

#[tokio::test]
async fn delete_missing_id_is_a_status_error() {
    let server = spawn_movie_server(dune_pair()).await;
    let api = HttpMovieApi::new(&server.collection_url(), None).expect("client");

    let err = api.delete(&MovieId::Number(99)).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(server.movies().len(), 2);

    api.delete(&MovieId::Number(1)).await.expect("delete");
    assert_eq!(server.movies(), vec![movie(2, "Duna", 2021, "Sci-Fi")]);
}

#[tokio::test]
async fn unreachable_service_is_a_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let api = HttpMovieApi::new(
        &format!("http://{addr}/movies"),
        Some(std::time::Duration::from_secs(2)),
    )
    .expect("client");
    let err = api.list().await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
}

#[tokio::test]
async fn unrouted_collection_is_a_status_error() {
    let server = spawn_movie_server(Vec::new()).await;
    let api = HttpMovieApi::new(&format!("{}/shows", server.base_url), None).expect("client");
    let err = api.list().await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 404, .. }));
}

#[tokio::test]
async fn malformed_records_are_skipped() {
    let server = spawn_raw_list_server(serde_json::json!([
        { "id": 1, "title": "Dune", "year": 1984, "genre": "Sci-Fi" },
        { "id": 2, "title": "Duna", "year": "2021", "genre": "Sci-Fi" },
        { "id": -3, "title": "Negative", "year": 2000 },
        { "id": "a7", "title": "Arrival", "year": 2016 },
    ]))
    .await;
    let api = HttpMovieApi::new(&server.collection_url(), None).expect("client");

    let movies = api.list().await.expect("list");
    let titles: Vec<&str> = movies.iter().map(|movie| movie.title.as_str()).collect();
    assert_eq!(titles, vec!["Dune", "Arrival"]);
}

#[tokio::test]
async fn non_array_body_is_a_decode_error() {
    let server = spawn_raw_list_server(serde_json::json!({ "movies": [] })).await;
    let api = HttpMovieApi::new(&server.collection_url(), None).expect("client");

    let err = api.list().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}
