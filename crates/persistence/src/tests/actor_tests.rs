// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::{Date, Month};

use reelbase_domain::{Actor, ActorDraft, Genre, PaginationPolicy};

use super::{create_test_actor, create_test_genre, create_test_movie, create_test_persistence};
use crate::{ActorCriteria, PageWindow, Persistence, PersistenceError};

#[test]
fn test_actor_round_trips_name_and_birth_date() {
    let mut persistence: Persistence = create_test_persistence();
    let draft: ActorDraft = ActorDraft {
        name: String::from("Keanu Reeves"),
        birth_date: Date::from_calendar_date(1964, Month::September, 2).unwrap(),
    };

    let created: Actor = persistence.create_actor(&draft).unwrap();
    let fetched: Actor = persistence.get_actor(created.id).unwrap().unwrap();

    assert_eq!(fetched.name, "Keanu Reeves");
    assert_eq!(
        fetched.birth_date,
        Date::from_calendar_date(1964, Month::September, 2).unwrap()
    );
}

#[test]
fn test_name_filter_is_case_insensitive_substring() {
    let mut persistence: Persistence = create_test_persistence();
    create_test_actor(&mut persistence, "Keanu Reeves", 1964);
    create_test_actor(&mut persistence, "George Reeves", 1914);
    create_test_actor(&mut persistence, "Laurence Fishburne", 1961);

    let criteria: ActorCriteria = ActorCriteria::NameContains(String::from("REEVES"));
    let names: Vec<String> = persistence
        .list_actors(&criteria, None)
        .unwrap()
        .into_iter()
        .map(|a| a.name)
        .collect();

    assert_eq!(names, vec!["Keanu Reeves", "George Reeves"]);
    assert_eq!(persistence.count_actors(&criteria).unwrap(), 2);
    assert_eq!(persistence.count_actors(&ActorCriteria::All).unwrap(), 3);
}

#[test]
fn test_like_wildcards_match_literally() {
    let mut persistence: Persistence = create_test_persistence();
    create_test_actor(&mut persistence, "Anne Smith", 1970);

    for fragment in ["%", "_", "!"] {
        let criteria: ActorCriteria = ActorCriteria::NameContains(fragment.to_string());
        assert!(persistence.list_actors(&criteria, None).unwrap().is_empty());
    }
}

#[test]
fn test_name_filter_folds_non_ascii_case() {
    let mut persistence: Persistence = create_test_persistence();
    create_test_actor(&mut persistence, "ÉMILE ZOLA", 1940);
    create_test_actor(&mut persistence, "Emil Jannings", 1884);

    for fragment in ["émile", "ÉMILE", "Émile"] {
        let criteria: ActorCriteria = ActorCriteria::NameContains(fragment.to_string());
        let names: Vec<String> = persistence
            .list_actors(&criteria, None)
            .unwrap()
            .into_iter()
            .map(|a| a.name)
            .collect();
        assert_eq!(names, vec!["ÉMILE ZOLA"], "{fragment}");
        assert_eq!(persistence.count_actors(&criteria).unwrap(), 1);
    }
}

#[test]
fn test_list_actors_window() {
    let mut persistence: Persistence = create_test_persistence();
    let created: Vec<Actor> = ["Aa", "Bb", "Cc", "Dd", "Ee"]
        .iter()
        .map(|name| create_test_actor(&mut persistence, name, 1980))
        .collect();

    let request = PaginationPolicy::default().validate(1, 2).unwrap();
    let page: Vec<Actor> = persistence
        .list_actors(&ActorCriteria::All, Some(PageWindow::from(request)))
        .unwrap();

    let ids: Vec<i64> = page.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![created[2].id, created[3].id]);
}

#[test]
fn test_update_actor_overwrites_fields() {
    let mut persistence: Persistence = create_test_persistence();
    let actor: Actor = create_test_actor(&mut persistence, "Old Name", 1970);

    let renamed: Actor = Actor::new(actor.id, String::from("New Name"), actor.birth_date);
    persistence.update_actor(&renamed).unwrap();

    let fetched: Actor = persistence.get_actor(actor.id).unwrap().unwrap();
    assert!(fetched.same_values(&renamed));
}

#[test]
fn test_delete_actor_clears_movie_links_when_asked() {
    let mut persistence: Persistence = create_test_persistence();
    let genre: Genre = create_test_genre(&mut persistence, "Action");
    let actor: Actor = create_test_actor(&mut persistence, "Keanu Reeves", 1964);
    let movie = create_test_movie(&mut persistence, "The Matrix", 1999, &[&genre], &[&actor]);

    assert_eq!(persistence.count_movies_for_actor(actor.id).unwrap(), 1);
    assert!(persistence.delete_actor(actor.id, false).is_err());
    assert!(persistence.get_actor(actor.id).unwrap().is_some());

    assert_eq!(persistence.delete_actor(actor.id, true).unwrap(), 1);
    assert!(persistence.get_actor(actor.id).unwrap().is_none());
    assert!(persistence.list_actors_for_movie(movie.id).unwrap().is_empty());
}

#[test]
fn test_list_actors_for_movie() {
    let mut persistence: Persistence = create_test_persistence();
    let genre: Genre = create_test_genre(&mut persistence, "Action");
    let neo: Actor = create_test_actor(&mut persistence, "Keanu Reeves", 1964);
    let trinity: Actor = create_test_actor(&mut persistence, "Carrie-Anne Moss", 1967);
    create_test_actor(&mut persistence, "Unrelated Person", 1950);
    let movie = create_test_movie(
        &mut persistence,
        "The Matrix",
        1999,
        &[&genre],
        &[&trinity, &neo],
    );

    let ids: Vec<i64> = persistence
        .list_actors_for_movie(movie.id)
        .unwrap()
        .iter()
        .map(|a| a.id)
        .collect();
    assert_eq!(ids, vec![neo.id, trinity.id]);
}

#[test]
fn test_update_missing_actor_is_not_found() {
    let mut persistence: Persistence = create_test_persistence();
    let ghost: Actor = Actor::new(
        77,
        String::from("Nobody"),
        Date::from_calendar_date(1990, Month::May, 5).unwrap(),
    );
    assert!(matches!(
        persistence.update_actor(&ghost),
        Err(PersistenceError::NotFound(_))
    ));
}
