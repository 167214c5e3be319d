// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeMap;
use time::{Date, Month};

use super::{date, test_today};
use crate::{
    Actor, ActorDraft, ActorPatch, DomainError, Genre, GenreDraft, GenrePatch, Movie, MovieDraft,
    MoviePatch, validate_actor_name, validate_birth_date, validate_duration, validate_genre_name,
    validate_release_year, validate_title,
};

fn field_errors(err: DomainError) -> BTreeMap<String, String> {
    match err {
        DomainError::InvalidFields(errors) => errors,
        other => panic!("expected InvalidFields, got {other:?}"),
    }
}

fn message_of<T: std::fmt::Debug>(result: Result<T, DomainError>) -> String {
    match result {
        Err(DomainError::InvalidField { message, .. }) => message,
        other => panic!("expected InvalidField, got {other:?}"),
    }
}

#[test]
fn test_actor_name_accepts_punctuation() {
    let name: String = validate_actor_name(Some("  Mary-Kate O'Neil Jr.  ")).unwrap();
    assert_eq!(name, "Mary-Kate O'Neil Jr.");
}

#[test]
fn test_actor_name_rejects_blank_short_long_and_digits() {
    assert_eq!(message_of(validate_actor_name(None)), "Name is required");
    assert_eq!(message_of(validate_actor_name(Some("   "))), "Name is required");
    assert_eq!(
        message_of(validate_actor_name(Some("K"))),
        "Name must be between 2 and 100 characters"
    );
    let long: String = "a".repeat(101);
    assert_eq!(
        message_of(validate_actor_name(Some(long.as_str()))),
        "Name must be between 2 and 100 characters"
    );
    assert_eq!(
        message_of(validate_actor_name(Some("Agent 47"))),
        "Name can only contain letters, spaces, dots, apostrophes and hyphens"
    );
}

#[test]
fn test_birth_date_must_be_strictly_before_today() {
    let today: Date = test_today();
    assert!(validate_birth_date(Some(date(1964, Month::September, 2)), today).is_ok());
    assert_eq!(
        message_of(validate_birth_date(Some(today), today)),
        "Birth date must be in the past"
    );
    assert_eq!(
        message_of(validate_birth_date(None, today)),
        "Birth date is required"
    );
}

#[test]
fn test_genre_name_rules() {
    assert_eq!(validate_genre_name(Some(" Film Noir ")).unwrap(), "Film Noir");
    assert_eq!(
        message_of(validate_genre_name(Some("Sci-Fi"))),
        "Genre name can only contain letters and spaces"
    );
    let long: String = "a".repeat(51);
    assert_eq!(
        message_of(validate_genre_name(Some(long.as_str()))),
        "Genre name must be between 2 and 50 characters"
    );
    assert_eq!(message_of(validate_genre_name(Some(""))), "Genre name is required");
}

#[test]
fn test_movie_scalar_bounds() {
    assert_eq!(validate_release_year(Some(1888)).unwrap(), 1888);
    assert_eq!(validate_release_year(Some(2100)).unwrap(), 2100);
    assert_eq!(
        message_of(validate_release_year(Some(1887))),
        "Release year cannot be before 1888 (first movie year)"
    );
    assert_eq!(
        message_of(validate_release_year(Some(2101))),
        "Release year cannot be after 2100"
    );

    assert_eq!(validate_duration(Some(600)).unwrap(), 600);
    assert_eq!(message_of(validate_duration(Some(0))), "Duration must be positive");
    assert_eq!(
        message_of(validate_duration(Some(601))),
        "Duration cannot exceed 600 minutes (10 hours)"
    );

    assert_eq!(message_of(validate_title(Some("X"))), "Title must be between 2 and 100 characters");
    assert_eq!(message_of(validate_title(None)), "Movie title is required");
}

#[test]
fn test_actor_draft_reports_every_failing_field() {
    let err: DomainError = ActorDraft::validate(Some("1"), None, test_today()).unwrap_err();
    let errors: BTreeMap<String, String> = field_errors(err);

    assert_eq!(errors.len(), 2);
    assert!(errors.contains_key("name"));
    assert_eq!(errors["birthDate"], "Birth date is required");
}

#[test]
fn test_actor_draft_trims_name() {
    let draft: ActorDraft = ActorDraft::validate(
        Some(" Keanu Reeves "),
        Some(date(1964, Month::September, 2)),
        test_today(),
    )
    .unwrap();
    assert_eq!(draft.name, "Keanu Reeves");
}

#[test]
fn test_movie_draft_requires_a_genre() {
    let err: DomainError =
        MovieDraft::validate(Some("The Matrix"), Some(1999), Some(136), 0).unwrap_err();
    let errors: BTreeMap<String, String> = field_errors(err);

    assert_eq!(errors.len(), 1);
    assert_eq!(errors["genres"], "Movie must have at least one genre");
}

#[test]
fn test_movie_draft_collects_all_scalar_errors() {
    let err: DomainError = MovieDraft::validate(None, Some(1800), Some(-5), 1).unwrap_err();
    let errors: BTreeMap<String, String> = field_errors(err);

    let keys: Vec<&str> = errors.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["duration", "releaseYear", "title"]);
}

#[test]
fn test_actor_patch_ignores_blank_name_and_keeps_birth_date() {
    let actor: Actor = Actor::new(1, String::from("Keanu Reeves"), date(1964, Month::September, 2));

    let blank: ActorPatch = ActorPatch::validate(Some("  "), None, test_today()).unwrap();
    assert_eq!(blank, ActorPatch::default());
    assert!(blank.apply(&actor).same_values(&actor));

    let renamed: ActorPatch = ActorPatch::validate(Some("New Name"), None, test_today()).unwrap();
    let patched: Actor = renamed.apply(&actor);
    assert_eq!(patched.name, "New Name");
    assert_eq!(patched.birth_date, actor.birth_date);
}

#[test]
fn test_actor_patch_rejects_future_birth_date() {
    let err: DomainError =
        ActorPatch::validate(None, Some(date(2030, Month::January, 1)), test_today()).unwrap_err();
    assert_eq!(field_errors(err)["birthDate"], "Birth date must be in the past");
}

#[test]
fn test_genre_draft_and_patch() {
    assert_eq!(GenreDraft::validate(Some("Drama")).unwrap().name, "Drama");
    assert!(GenreDraft::validate(None).is_err());

    let genre: Genre = Genre::new(4, String::from("Drama"));
    let patch: GenrePatch = GenrePatch::validate(Some(" Thriller ")).unwrap();
    assert_eq!(patch.apply(&genre).name, "Thriller");
    assert!(GenrePatch::validate(Some("R2D2")).is_err());
}

#[test]
fn test_movie_patch_applies_present_fields_only() {
    let mut movie: Movie = Movie::new(9, String::from("Heat"), 1995, 170);
    movie.genres.insert(Genre::new(1, String::from("Crime")));

    let patch: MoviePatch = MoviePatch::validate(None, Some(1996), None).unwrap();
    let patched: Movie = patch.apply(&movie);

    assert_eq!(patched.title, "Heat");
    assert_eq!(patched.release_year, 1996);
    assert_eq!(patched.duration, 170);
    assert_eq!(patched.genre_ids().collect::<Vec<_>>(), vec![1]);
}

#[test]
fn test_movie_patch_uses_creation_year_range() {
    let err: DomainError = MoviePatch::validate(None, Some(2101), None).unwrap_err();
    assert_eq!(
        field_errors(err)["releaseYear"],
        "Release year cannot be after 2100"
    );
    assert!(MoviePatch::validate(None, Some(2100), None).is_ok());
}
