// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::{Router, http::StatusCode};
use serde_json::{Value, json};

use super::{
    TestResponse, create_id, create_test_app, create_test_app_with, delete, get, patch_json,
    post_json, require_force_config,
};

async fn seed_matrix(app: &Router) -> (i64, i64, i64) {
    let genre_id: i64 = create_id(app, "/genres", &json!({"name": "Science Fiction"})).await;
    let actor_id: i64 = create_id(
        app,
        "/actors",
        &json!({"name": "Keanu Reeves", "birthDate": "1964-09-02"}),
    )
    .await;
    let movie_id: i64 = create_id(
        app,
        "/movies",
        &json!({
            "title": "The Matrix",
            "releaseYear": 1999,
            "duration": 136,
            "genres": [{"id": genre_id}],
            "actors": [{"id": actor_id}]
        }),
    )
    .await;
    (genre_id, actor_id, movie_id)
}

#[tokio::test]
async fn test_create_movie_returns_nested_relationships() {
    let app: Router = create_test_app();
    let (genre_id, actor_id, movie_id) = seed_matrix(&app).await;

    let movie: Value = get(&app, &format!("/movies/{movie_id}")).await.json();
    assert_eq!(
        movie,
        json!({
            "id": movie_id,
            "title": "The Matrix",
            "releaseYear": 1999,
            "duration": 136,
            "genres": [{"id": genre_id, "name": "Science Fiction"}],
            "actors": [{"id": actor_id, "name": "Keanu Reeves", "birthDate": "1964-09-02"}]
        })
    );
}

#[tokio::test]
async fn test_create_movie_with_missing_genre_is_not_found() {
    let app: Router = create_test_app();

    let response: TestResponse = post_json(
        &app,
        "/movies",
        &json!({
            "title": "Ghost Movie",
            "releaseYear": 2001,
            "duration": 90,
            "genres": [{"id": 999}]
        }),
    )
    .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body, "Genre not found: 999");
    assert_eq!(get(&app, "/movies").await.json(), json!([]));
}

#[tokio::test]
async fn test_create_movie_without_genres_is_a_field_error() {
    let app: Router = create_test_app();

    let response: TestResponse = post_json(
        &app,
        "/movies",
        &json!({"title": "Nothing", "releaseYear": 2001, "duration": 90}),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json(),
        json!({"genres": "Movie must have at least one genre"})
    );
}

#[tokio::test]
async fn test_movie_filters_and_pages() {
    let app: Router = create_test_app();
    let (genre_id, actor_id, _) = seed_matrix(&app).await;
    create_id(
        &app,
        "/movies",
        &json!({
            "title": "the matrix resurrections",
            "releaseYear": 2021,
            "duration": 148,
            "genres": [{"id": genre_id}]
        }),
    )
    .await;

    let by_title: Value = get(&app, "/movies?title=MATRIX").await.json();
    assert_eq!(by_title.as_array().unwrap().len(), 2);

    let by_year: Value = get(&app, &format!("/movies?year=2021&actor={actor_id}")).await.json();
    assert_eq!(by_year[0]["title"], "the matrix resurrections");

    let by_actor: Value = get(&app, &format!("/movies?actor={actor_id}")).await.json();
    assert_eq!(by_actor.as_array().unwrap().len(), 1);

    let page: Value = get(&app, &format!("/movies?genre={genre_id}&page=1&size=1"))
        .await
        .json();
    assert_eq!(page["page"], 1);
    assert_eq!(page["totalElements"], 2);
    assert_eq!(page["hasPrevious"], true);
    assert_eq!(page["hasNext"], false);

    let search: Value = get(&app, "/movies/search?title=resurrect").await.json();
    assert_eq!(search.as_array().unwrap().len(), 1);

    let unknown: TestResponse = get(&app, "/movies?genre=404").await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
    assert_eq!(unknown.body, "Genre not found with id: 404");
}

#[tokio::test]
async fn test_empty_numeric_query_values_are_ignored() {
    let app: Router = create_test_app();
    seed_matrix(&app).await;

    let response: TestResponse = get(&app, "/movies?genre=&year=&actor=&title=matrix").await;
    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    assert_eq!(response.json()[0]["title"], "The Matrix");

    let response: TestResponse = get(&app, "/movies?page=&size=").await;
    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    assert_eq!(response.json().as_array().unwrap().len(), 1);

    let response: TestResponse = get(&app, "/movies/search?title=matrix&page=&size=2").await;
    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    assert_eq!(response.json()["totalElements"], 1);

    let response: TestResponse = get(&app, "/actors?name=keanu&page=&size=").await;
    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    assert_eq!(response.json()[0]["name"], "Keanu Reeves");
}

#[tokio::test]
async fn test_patch_movie_replaces_actors() {
    let app: Router = create_test_app();
    let (_, _, movie_id) = seed_matrix(&app).await;
    let other: i64 = create_id(
        &app,
        "/actors",
        &json!({"name": "Hugo Weaving", "birthDate": "1960-04-04"}),
    )
    .await;

    let response: TestResponse = patch_json(
        &app,
        &format!("/movies/{movie_id}"),
        &json!({"actors": [{"id": other}], "duration": 137}),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    let movie: Value = response.json();
    assert_eq!(movie["duration"], 137);
    assert_eq!(movie["actors"][0]["id"], other);
    assert_eq!(movie["actors"].as_array().unwrap().len(), 1);

    let missing: TestResponse = patch_json(
        &app,
        &format!("/movies/{movie_id}"),
        &json!({"actors": [{"id": 12345}]}),
    )
    .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body, "Actor not found: 12345");
}

#[tokio::test]
async fn test_delete_movie_default_policy() {
    let app: Router = create_test_app();
    let (_, _, movie_id) = seed_matrix(&app).await;

    let response: TestResponse = delete(&app, &format!("/movies/{movie_id}")).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert_eq!(
        get(&app, &format!("/movies/{movie_id}")).await.status,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_delete_movie_require_force_policy() {
    let app: Router = create_test_app_with(require_force_config());
    let (_, _, movie_id) = seed_matrix(&app).await;

    let blocked: TestResponse = delete(&app, &format!("/movies/{movie_id}")).await;
    assert_eq!(blocked.status, StatusCode::BAD_REQUEST);

    let forced: TestResponse = delete(&app, &format!("/movies/{movie_id}?force=true")).await;
    assert_eq!(forced.status, StatusCode::NO_CONTENT);
}
