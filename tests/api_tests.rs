//! API integration tests
//!
//! These run against a live server seeded with a staff account
//! (admin/admin) and at least one author (id 1).
//! Run with: cargo test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};
use std::time::{SystemTime, UNIX_EPOCH};

const BASE_URL: &str = "http://localhost:8080/api/v1";

fn client() -> Client {
    // Cookie store keeps the session cookie across favorites requests
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to build client")
}

fn unique_username(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .subsec_nanos();
    format!("{}_{}", prefix, nanos)
}

/// Log in as the seeded staff account
async fn get_staff_token(client: &Client) -> String {
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": "admin"
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

/// Sign up a fresh non-staff account and return its token
async fn get_reader_token(client: &Client) -> String {
    let response = client
        .post(format!("{}/auth/signup", BASE_URL))
        .json(&json!({
            "username": unique_username("reader"),
            "password": "readerpass"
        }))
        .send()
        .await
        .expect("Failed to send signup request");

    let body: Value = response.json().await.expect("Failed to parse signup response");
    body["token"].as_str().expect("No token in response").to_string()
}

/// Create a book as staff and return its id
async fn create_test_book(client: &Client, token: &str, title: &str, popularity: i32) -> i64 {
    let response = client
        .post(format!("{}/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "title": title,
            "author_id": 1,
            "isbn": "978-0-00-000000-0",
            "popularity": popularity
        }))
        .send()
        .await
        .expect("Failed to send create request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No book ID")
}

async fn delete_test_book(client: &Client, token: &str, id: i64) {
    let _ = client
        .delete(format!("{}/books/{}", BASE_URL, id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_health_check() {
    let client = client();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_readiness_probes_backing_stores() {
    let client = client();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    // The live test server has both Postgres and Redis up
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
#[ignore]
async fn test_signup_and_me() {
    let client = client();
    let username = unique_username("signup");

    let response = client
        .post(format!("{}/auth/signup", BASE_URL))
        .json(&json!({
            "username": username,
            "password": "somepass"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["user"]["is_staff"], false);
    let token = body["token"].as_str().expect("No token").to_string();

    // Auto-login: the returned token is immediately usable
    let response = client
        .get(format!("{}/auth/me", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["username"], username);
}

#[tokio::test]
#[ignore]
async fn test_signup_rejects_short_username() {
    let client = client();

    let response = client
        .post(format!("{}/auth/signup", BASE_URL))
        .json(&json!({
            "username": "ab",
            "password": "somepass"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = client();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_list_books_default_sort_label() {
    let client = client();

    let response = client
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["books"].is_array());
    assert!(body["authors"].is_array());
    // Absent sort parameter keeps the historical "asc" label
    assert_eq!(body["sort"], "asc");
}

#[tokio::test]
#[ignore]
async fn test_list_books_sorted_by_popularity() {
    let client = client();

    for (param, expected_label) in [("asc", "asc"), ("desc", "desc"), ("banana", "asc")] {
        let response = client
            .get(format!("{}/books?sort={}", BASE_URL, param))
            .send()
            .await
            .expect("Failed to send request");

        assert!(response.status().is_success());
        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["sort"], expected_label);

        let popularity: Vec<i64> = body["books"]
            .as_array()
            .unwrap()
            .iter()
            .map(|b| b["popularity"].as_i64().unwrap())
            .collect();
        match param {
            "asc" => assert!(popularity.windows(2).all(|w| w[0] <= w[1])),
            "desc" => assert!(popularity.windows(2).all(|w| w[0] >= w[1])),
            _ => {}
        }
    }
}

#[tokio::test]
#[ignore]
async fn test_list_books_title_search() {
    let client = client();
    let token = get_staff_token(&client).await;
    let id = create_test_book(&client, &token, "Dune Messiah", 3).await;

    let response = client
        .get(format!("{}/books?q=dune", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    let books = body["books"].as_array().unwrap();
    assert!(!books.is_empty());
    assert!(books
        .iter()
        .all(|b| b["title"].as_str().unwrap().to_lowercase().contains("dune")));

    delete_test_book(&client, &token, id).await;
}

#[tokio::test]
#[ignore]
async fn test_create_book_requires_authentication() {
    let client = client();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "Anonymous Book",
            "author_id": 1,
            "isbn": "978-0-00-000000-0",
            "popularity": 1
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_create_book_forbidden_for_non_staff() {
    let client = client();
    let token = get_reader_token(&client).await;

    let response = client
        .post(format!("{}/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "title": "Reader Book",
            "author_id": 1,
            "isbn": "978-0-00-000000-0",
            "popularity": 1
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 403);

    // Nothing was created
    let response = client
        .get(format!("{}/books?q=Reader%20Book", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["books"].as_array().unwrap().is_empty());
}

#[tokio::test]
#[ignore]
async fn test_create_book_validation_errors() {
    let client = client();
    let token = get_staff_token(&client).await;

    // Missing title
    let response = client
        .post(format!("{}/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "title": "",
            "author_id": 1,
            "isbn": "978-0-00-000000-0",
            "popularity": 1
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["fields"]["title"].is_array());

    // Nonexistent author
    let response = client
        .post(format!("{}/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "title": "Orphan Book",
            "author_id": 999999,
            "isbn": "978-0-00-000000-0",
            "popularity": 1
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["fields"]["author_id"].is_array());
}

#[tokio::test]
#[ignore]
async fn test_create_book_accepts_popularity_string() {
    let client = client();
    let token = get_staff_token(&client).await;

    let response = client
        .post(format!("{}/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "title": "Stringly Popular",
            "author_id": 1,
            "isbn": "978-0-00-000000-0",
            "popularity": "7"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["popularity"], 7);

    delete_test_book(&client, &token, body["id"].as_i64().unwrap()).await;
}

#[tokio::test]
#[ignore]
async fn test_update_and_delete_book() {
    let client = client();
    let token = get_staff_token(&client).await;
    let id = create_test_book(&client, &token, "Mutable Book", 2).await;

    // Update
    let response = client
        .put(format!("{}/books/{}", BASE_URL, id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "title": "Mutable Book, 2nd ed.",
            "author_id": 1,
            "isbn": "978-0-00-000000-1",
            "popularity": 9
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["title"], "Mutable Book, 2nd ed.");
    assert_eq!(body["popularity"], 9);

    // Delete
    let response = client
        .delete(format!("{}/books/{}", BASE_URL, id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 204);

    // Deleting again is NotFound
    let response = client
        .delete(format!("{}/books/{}", BASE_URL, id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_update_nonexistent_book() {
    let client = client();
    let token = get_staff_token(&client).await;

    let response = client
        .put(format!("{}/books/999999", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "title": "Ghost Book",
            "author_id": 1,
            "isbn": "978-0-00-000000-0",
            "popularity": 1
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_authors_list_and_detail() {
    let client = client();

    let response = client
        .get(format!("{}/authors", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let authors: Value = response.json().await.expect("Failed to parse response");
    let first = &authors.as_array().unwrap()[0];
    let id = first["id"].as_i64().unwrap();
    let name = first["name"].as_str().unwrap().to_string();

    let response = client
        .get(format!("{}/authors/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["author"]["name"], name.as_str());
    assert!(body["books"].is_array());

    // Legacy name URL redirects to the canonical detail route
    let response = client
        .get(format!("{}/authors/by-name/{}", BASE_URL, name))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["author"]["id"].as_i64().unwrap(), id);
}

#[tokio::test]
#[ignore]
async fn test_author_not_found() {
    let client = client();

    let response = client
        .get(format!("{}/authors/999999", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_favorites_empty_by_default() {
    let client = client();

    let response = client
        .get(format!("{}/favorites", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["books"].as_array().unwrap().is_empty());
}

#[tokio::test]
#[ignore]
async fn test_favorites_add_and_remove() {
    let client = client();
    let token = get_staff_token(&client).await;
    let id = create_test_book(&client, &token, "Favorite Material", 5).await;

    // Add
    let response = client
        .post(format!("{}/favorites", BASE_URL))
        .json(&json!({ "book_id": id.to_string() }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["books"].as_array().unwrap().len(), 1);

    // Remove
    let response = client
        .delete(format!("{}/favorites", BASE_URL))
        .json(&json!({ "book_id": id.to_string() }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["books"].as_array().unwrap().is_empty());

    // Removing again is a silent no-op, not an error
    let response = client
        .delete(format!("{}/favorites", BASE_URL))
        .json(&json!({ "book_id": id.to_string() }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    delete_test_book(&client, &token, id).await;
}

#[tokio::test]
#[ignore]
async fn test_favorites_duplicate_add_survives_one_remove() {
    let client = client();
    let token = get_staff_token(&client).await;
    let id = create_test_book(&client, &token, "Twice Favorited", 5).await;

    // Add the same id twice: the session holds two entries
    for _ in 0..2 {
        let response = client
            .post(format!("{}/favorites", BASE_URL))
            .json(&json!({ "book_id": id.to_string() }))
            .send()
            .await
            .expect("Failed to send request");
        assert!(response.status().is_success());
    }

    // One remove takes out only the first occurrence
    let response = client
        .delete(format!("{}/favorites", BASE_URL))
        .json(&json!({ "book_id": id.to_string() }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["books"].as_array().unwrap().len(), 1);

    delete_test_book(&client, &token, id).await;
}

#[tokio::test]
#[ignore]
async fn test_favorites_stale_entry_is_filtered() {
    let client = client();
    let token = get_staff_token(&client).await;
    let kept = create_test_book(&client, &token, "Kept Favorite", 4).await;
    let doomed = create_test_book(&client, &token, "Doomed Favorite", 6).await;

    for id in [kept, doomed] {
        let response = client
            .post(format!("{}/favorites", BASE_URL))
            .json(&json!({ "book_id": id.to_string() }))
            .send()
            .await
            .expect("Failed to send request");
        assert!(response.status().is_success());
    }

    // Staff deletes one of the favorited books
    let response = client
        .delete(format!("{}/books/{}", BASE_URL, doomed))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);

    // The stale id drops out of the rendered list
    let response = client
        .get(format!("{}/favorites", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    let ids: Vec<i64> = body["books"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![kept]);

    delete_test_book(&client, &token, kept).await;
}
