// tests/api_tests.rs

use std::sync::Arc;

use bookmatch::{
    books::StaticBooks,
    catalog::Catalog,
    config::Config,
    models::{book::Book, personality::Genre},
    routes,
    state::AppState,
    store::MemoryStudentStore,
};

fn history_book() -> Book {
    Book {
        title: "SPQR".to_string(),
        author: "Mary Beard".to_string(),
        description: "A history of ancient Rome.".to_string(),
        image: "https://img.example.com/spqr.jpg".to_string(),
        link: "https://books.example.com/spqr".to_string(),
        genre: Genre::History,
    }
}

/// Helper function to spawn the app on a random port for testing.
/// Returns the API base URL (e.g., "http://127.0.0.1:12345/api/v1").
async fn spawn_app_with(catalog: Catalog, question_count: usize) -> String {
    // 1. Create test configuration
    let config = Config {
        rust_log: "error".to_string(),
        question_count,
        quiz_seed: Some(42),
        ..Config::default()
    };

    // 2. In-memory store and fixed books instead of Postgres and the live catalog
    let state = AppState::new(
        config,
        catalog,
        Arc::new(MemoryStudentStore::new()),
        Arc::new(StaticBooks::new(vec![history_book()])),
    );

    // 3. Create the router with the app state
    let app = routes::create_router(state);

    // 4. Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}/api/v1", port);

    // 5. Spawn the server in the background
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

async fn spawn_app() -> String {
    spawn_app_with(Catalog::builtin().unwrap(), 2).await
}

/// A catalog whose only question is the "unexpected day off" question.
fn day_off_catalog() -> Catalog {
    let builtin = Catalog::builtin().unwrap();
    let raw = serde_json::json!({ "questions": [&builtin.bank.questions()[0]] });
    Catalog::from_json(&raw.to_string()).unwrap()
}

fn unique_name() -> String {
    format!("u_{}", &uuid::Uuid::new_v4().to_string()[..8])
}

async fn initiate(client: &reqwest::Client, address: &str, name: &str) -> reqwest::Response {
    client
        .post(&format!("{}/student", address))
        .json(&serde_json::json!({ "name": name }))
        .send()
        .await
        .expect("Failed to execute request")
}

async fn submit(
    client: &reqwest::Client,
    address: &str,
    name: &str,
    answers: serde_json::Value,
) -> reqwest::Response {
    client
        .put(&format!("{}/student", address))
        .json(&serde_json::json!({ "name": name, "answers": answers }))
        .send()
        .await
        .expect("Failed to execute request")
}

#[tokio::test]
async fn health_check_404() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .get(&format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn server_ready_and_openapi() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let ready = client.get(&address).send().await.unwrap();
    assert_eq!(ready.status().as_u16(), 200);
    assert!(ready.text().await.unwrap().contains("/api/v1"));

    let doc: serde_json::Value = client
        .get(&format!("{}/openapi.json", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(doc["paths"]["/student"].is_object());
}

#[tokio::test]
async fn initiate_creates_then_finds_student() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let name = unique_name();

    // Act: first contact
    let response = initiate(&client, &address, &format!("  {}  ", name.to_uppercase())).await;

    // Assert
    assert_eq!(response.status().as_u16(), 201);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["student"]["name"], name);
    let questions = body["student"]["questions"].as_array().unwrap().clone();
    assert_eq!(questions.len(), 2);
    assert_ne!(questions[0]["question"], questions[1]["question"]);
    assert_eq!(questions[0]["options"].as_array().unwrap().len(), 3);
    // Option weights stay on the server
    assert!(questions[0]["options"][0].is_string());
    assert!(body.get("result").is_none());

    // Act: second contact keeps the same questions
    let response = initiate(&client, &address, &name).await;
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["student"]["questions"], serde_json::Value::Array(questions));
    assert!(body.get("result").is_none());
}

#[tokio::test]
async fn initiate_rejects_blank_name() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = initiate(&client, &address, "   ").await;

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["code"], "INPUT_ERROR");
}

#[tokio::test]
async fn submit_answers_matches_history() {
    // Arrange
    let address = spawn_app_with(day_off_catalog(), 1).await;
    let client = reqwest::Client::new();
    let name = unique_name();
    assert_eq!(initiate(&client, &address, &name).await.status().as_u16(), 201);

    // Act: "Reading a book and exploring creative hobbies."
    let response = submit(&client, &address, &name, serde_json::json!([[0]])).await;

    // Assert
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    let result = &body["result"];
    assert_eq!(result["genre"], "history");
    assert_eq!(
        result["traits"],
        serde_json::json!(["creative", "independent", "confident", "intelligent", "judgment"])
    );
    assert_eq!(result["student_vector"], serde_json::json!([8, 6, 4, 7, 5]));
    assert_eq!(result["genre_vector"], serde_json::json!([7, 5, 6, 8, 4]));
    assert_eq!(result["books"][0]["title"], "SPQR");
    assert_eq!(body["student"]["answers"], serde_json::json!([[0]]));

    // A returning student gets the result straight away
    let response = initiate(&client, &address, &name).await;
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["result"]["genre"], "history");
}

#[tokio::test]
async fn submit_answers_replaces_previous_answers() {
    let address = spawn_app_with(day_off_catalog(), 1).await;
    let client = reqwest::Client::new();
    let name = unique_name();
    initiate(&client, &address, &name).await;

    submit(&client, &address, &name, serde_json::json!([[0]])).await;
    // (8,6,4,7,5) + (5,8,6,7,4) = (13,14,10,14,9) / 2 -> (6,7,5,7,4)
    let response = submit(&client, &address, &name, serde_json::json!([[0, 1]])).await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["student"]["answers"], serde_json::json!([[0, 1]]));
    assert_eq!(body["result"]["student_vector"], serde_json::json!([6, 7, 5, 7, 4]));
    assert_eq!(body["result"]["genre"], "history");
}

#[tokio::test]
async fn submit_answers_validation() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let name = unique_name();
    initiate(&client, &address, &name).await;

    let invalid = [
        serde_json::json!([[0]]),           // too few answers
        serde_json::json!([[0], [1], [2]]), // too many answers
        serde_json::json!([[0], []]),       // empty selection
        serde_json::json!([[0], [3]]),      // out of range
        serde_json::json!([[0], ["1"]]),    // not numeric
        serde_json::json!([[0], [-1]]),     // negative
        serde_json::json!("0,1"),           // not an array
    ];

    for answers in invalid {
        // Act
        let response = submit(&client, &address, &name, answers.clone()).await;

        // Assert
        assert_eq!(response.status().as_u16(), 400, "accepted {}", answers);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    // Nothing was stored
    let body: serde_json::Value = initiate(&client, &address, &name).await.json().await.unwrap();
    assert!(body["student"]["answers"].is_null());
    assert!(body.get("result").is_none());
}

#[tokio::test]
async fn submit_answers_unknown_student() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = submit(&client, &address, &unique_name(), serde_json::json!([[0], [0]])).await;

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn malformed_bodies_get_json_errors() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let name = unique_name();
    initiate(&client, &address, &name).await;

    // Act: submit without an answers field
    let response = client
        .put(&format!("{}/student", address))
        .json(&serde_json::json!({ "name": name }))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["code"], "VALIDATION_ERROR");

    // Act: a name that is not a string
    let response = client
        .post(&format!("{}/student", address))
        .json(&serde_json::json!({ "name": 5 }))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["code"], "INPUT_ERROR");
    assert!(body["error"].is_string());

    // Act: not JSON at all
    let response = client
        .post(&format!("{}/student", address))
        .header("content-type", "application/json")
        .body("{name:")
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["code"], "INPUT_ERROR");
}

#[tokio::test]
async fn concurrent_first_contact_creates_once() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let name = unique_name();

    let (a, b) = tokio::join!(
        initiate(&client, &address, &name),
        initiate(&client, &address, &name)
    );
    let mut statuses = [a.status().as_u16(), b.status().as_u16()];
    statuses.sort();
    assert_eq!(statuses, [200, 201]);

    let a: serde_json::Value = a.json().await.unwrap();
    let b: serde_json::Value = b.json().await.unwrap();
    assert_eq!(a["student"]["questions"], b["student"]["questions"]);
}
