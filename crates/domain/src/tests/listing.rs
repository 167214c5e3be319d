// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde_json::{Value, json};

use crate::{Listing, Page, PageRequest, PaginationPolicy};

fn request(page: i64, size: i64) -> PageRequest {
    PaginationPolicy::default().validate(page, size).unwrap()
}

#[test]
fn test_page_metadata_for_middle_page() {
    let page: Page<i32> = Page::new(vec![4, 5, 6], request(1, 3), 10);

    assert_eq!(page.total_pages, 4);
    assert!(page.has_next);
    assert!(page.has_previous);
}

#[test]
fn test_page_metadata_for_last_and_empty_pages() {
    let last: Page<i32> = Page::new(vec![10], request(3, 3), 10);
    assert!(!last.has_next);
    assert!(last.has_previous);

    let empty: Page<i32> = Page::new(Vec::new(), request(0, 20), 0);
    assert_eq!(empty.total_pages, 0);
    assert!(!empty.has_next);
    assert!(!empty.has_previous);
}

#[test]
fn test_page_serialises_camel_case() {
    let page: Page<&str> = Page::new(vec!["a"], request(0, 1), 2);
    let value: Value = serde_json::to_value(&page).unwrap();

    assert_eq!(
        value,
        json!({
            "content": ["a"],
            "page": 0,
            "size": 1,
            "totalElements": 2,
            "totalPages": 2,
            "hasNext": true,
            "hasPrevious": false
        })
    );
}

#[test]
fn test_unpaged_listing_serialises_as_array() {
    let listing: Listing<i32> = Listing::All(vec![1, 2]);
    assert_eq!(serde_json::to_value(&listing).unwrap(), json!([1, 2]));
}

#[test]
fn test_listing_map_keeps_shape() {
    let paged: Listing<i32> = Listing::Page(Page::new(vec![1, 2], request(0, 2), 5));
    let mapped: Listing<String> = paged.map(|n| n.to_string());

    match mapped {
        Listing::Page(page) => {
            assert_eq!(page.content, vec![String::from("1"), String::from("2")]);
            assert_eq!(page.total_elements, 5);
        }
        Listing::All(_) => panic!("expected a page"),
    }

    let all: Listing<i32> = Listing::All(vec![3]);
    assert_eq!(all.map(|n| n * 2).items(), &[6]);
}
