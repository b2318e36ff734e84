use axum_test::TestServer;
use chrono::{Duration, Utc};
use serde_json::{json, Value};

use leaflog::{api, Database};

fn test_server() -> TestServer {
    let db = Database::open_memory().expect("Failed to create test database");
    db.migrate().expect("Failed to migrate test database");
    TestServer::new(api::create_router(db)).expect("Failed to start test server")
}

async fn create_plant(server: &TestServer, body: Value) -> Value {
    let response = server.post("/api/plants").json(&body).await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}

#[tokio::test]
async fn creating_a_plant_returns_its_detail() {
    let server = test_server();

    let plant = create_plant(&server, json!({ "name": "Boston fern" })).await;

    assert_eq!(plant["name"], "Boston fern");
    assert_eq!(plant["group_name"], "Uncategorized");
    assert_eq!(plant["is_alive"], true);
    // watering, fertilizing and repotting defaults
    assert_eq!(plant["frequencies"].as_array().unwrap().len(), 3);
    // purchased today, nothing can be overdue yet
    assert!(plant["warnings"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn filter_matches_plant_or_group_name_case_insensitively() {
    let server = test_server();

    let group = server.post("/api/groups").json(&json!({ "name": "Ferns" })).await;
    group.assert_status(axum::http::StatusCode::CREATED);
    let group_id = group.json::<Value>()["id"].as_str().unwrap().to_string();

    create_plant(&server, json!({ "name": "Boston fern" })).await;
    create_plant(&server, json!({ "name": "Monstera", "group_id": group_id })).await;
    create_plant(&server, json!({ "name": "Cactus" })).await;

    let response = server.get("/api/plants").add_query_param("filter", "FERN").await;
    response.assert_status_ok();
    let page = response.json::<Value>();
    assert_eq!(page["total"], 2);

    // no matches is an empty page, not an error
    let response = server.get("/api/plants").add_query_param("filter", "orchid").await;
    response.assert_status_ok();
    let page = response.json::<Value>();
    assert_eq!(page["total"], 0);
    assert!(page["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_ids_return_not_found() {
    let server = test_server();
    let id = uuid::Uuid::new_v4();

    server
        .get(&format!("/api/plants/{id}"))
        .await
        .assert_status(axum::http::StatusCode::NOT_FOUND);
    server
        .delete(&format!("/api/history/{id}"))
        .await
        .assert_status(axum::http::StatusCode::NOT_FOUND);
    server
        .get(&format!("/api/groups/{id}"))
        .await
        .assert_status(axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn overdue_watering_warns_until_the_task_is_performed() {
    let server = test_server();
    let purchased = Utc::now().date_naive() - Duration::days(20);

    let plant = create_plant(
        &server,
        json!({
            "name": "Thirsty fern",
            "purchased_on": purchased.to_string(),
            "frequencies": [
                { "task_type": "watering", "frequency_days": 7 },
                { "task_type": "fertilizing", "frequency_days": null },
                { "task_type": "repotting", "frequency_days": null },
            ],
        }),
    )
    .await;
    let plant_id = plant["id"].as_str().unwrap().to_string();

    // never watered: due 7 days after purchase, overdue by 13
    let warnings = server.get("/api/warnings").await.json::<Value>();
    assert_eq!(warnings.as_array().unwrap().len(), 1);
    assert_eq!(warnings[0]["task_type"], "watering");
    assert_eq!(warnings[0]["days_overdue"], 13);

    let listing = server.get("/api/plants").await.json::<Value>();
    assert_eq!(listing["items"][0]["needs_care"], true);

    let overview = server.get("/api/overview").await.json::<Value>();
    assert_eq!(overview["plants_needing_care"], 1);

    let response = server
        .post("/api/tasks/perform")
        .json(&json!({ "plant_ids": [plant_id], "task_types": ["watering"] }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["created"], 1);

    let warnings = server.get("/api/warnings").await.json::<Value>();
    assert!(warnings.as_array().unwrap().is_empty());

    let listing = server.get("/api/plants").await.json::<Value>();
    assert_eq!(listing["items"][0]["needs_care"], false);
}

#[tokio::test]
async fn invalid_plant_input_is_rejected() {
    let server = test_server();

    server
        .post("/api/plants")
        .json(&json!({ "name": "   " }))
        .await
        .assert_status(axum::http::StatusCode::UNPROCESSABLE_ENTITY);

    server
        .post("/api/plants")
        .json(&json!({
            "name": "Zero",
            "frequencies": [{ "task_type": "watering", "frequency_days": 0 }],
        }))
        .await
        .assert_status(axum::http::StatusCode::UNPROCESSABLE_ENTITY);

    let tomorrow = Utc::now().date_naive() + Duration::days(1);
    server
        .post("/api/plants")
        .json(&json!({ "name": "Tomorrow", "purchased_on": tomorrow.to_string() }))
        .await
        .assert_status(axum::http::StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn marking_dead_moves_the_plant_to_the_graveyard() {
    let server = test_server();
    let plant = create_plant(&server, json!({ "name": "Ficus" })).await;
    let plant_id = plant["id"].as_str().unwrap().to_string();

    let first = server
        .post(&format!("/api/plants/{plant_id}/death"))
        .json(&json!({ "cause_of_death": "pest_infestation" }))
        .await
        .json::<Value>();

    let listing = server.get("/api/plants").await.json::<Value>();
    assert_eq!(listing["total"], 0);

    let graveyard = server.get("/api/graveyard").await.json::<Value>();
    assert_eq!(graveyard.as_array().unwrap().len(), 1);
    assert_eq!(graveyard[0]["cause_of_death"], "pest_infestation");

    // marking dead twice returns the original record unchanged
    let second = server
        .post(&format!("/api/plants/{plant_id}/death"))
        .json(&json!({}))
        .await
        .json::<Value>();
    assert_eq!(first["id"], second["id"]);
    assert_eq!(second["cause_of_death"], "pest_infestation");
}

#[tokio::test]
async fn the_default_group_is_protected() {
    let server = test_server();

    let groups = server.get("/api/groups").await.json::<Value>();
    let default_id = groups
        .as_array()
        .unwrap()
        .iter()
        .find(|g| g["name"] == "Uncategorized")
        .unwrap()["id"]
        .as_str()
        .unwrap()
        .to_string();

    server
        .delete(&format!("/api/groups/{default_id}"))
        .await
        .assert_status(axum::http::StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn deleting_a_group_reassigns_its_plants() {
    let server = test_server();

    let group = server
        .post("/api/groups")
        .json(&json!({ "name": "Balcony" }))
        .await
        .json::<Value>();
    let group_id = group["id"].as_str().unwrap().to_string();

    let plant = create_plant(&server, json!({ "name": "Geranium", "group_id": group_id })).await;
    let plant_id = plant["id"].as_str().unwrap().to_string();

    server
        .delete(&format!("/api/groups/{group_id}"))
        .await
        .assert_status(axum::http::StatusCode::NO_CONTENT);

    let detail = server.get(&format!("/api/plants/{plant_id}")).await.json::<Value>();
    assert_eq!(detail["group_name"], "Uncategorized");
}

#[tokio::test]
async fn history_supports_time_windows_and_edits() {
    let server = test_server();
    let plant = create_plant(&server, json!({ "name": "Ivy" })).await;
    let plant_id = plant["id"].as_str().unwrap().to_string();

    let long_ago = (Utc::now() - Duration::days(10)).to_rfc3339();
    server
        .post("/api/tasks/perform")
        .json(&json!({
            "plant_ids": [plant_id],
            "task_types": ["watering"],
            "performed_at": long_ago,
        }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);
    server
        .post("/api/tasks/perform")
        .json(&json!({ "plant_ids": [plant_id], "task_types": ["watering"] }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let all = server.get("/api/history").await.json::<Value>();
    assert_eq!(all["total"], 2);

    let recent = server.get("/api/history").add_query_param("time", "week").await.json::<Value>();
    assert_eq!(recent["total"], 1);

    let entry_id = all["items"][0]["id"].as_str().unwrap().to_string();
    let updated = server
        .put(&format!("/api/history/{entry_id}"))
        .json(&json!({ "task_type": "fertilizing" }))
        .await
        .json::<Value>();
    assert_eq!(updated["task_type"], "fertilizing");

    server
        .delete(&format!("/api/history/{entry_id}"))
        .await
        .assert_status(axum::http::StatusCode::NO_CONTENT);
    let remaining = server.get("/api/history").await.json::<Value>();
    assert_eq!(remaining["total"], 1);
}

#[tokio::test]
async fn perform_tasks_rejects_dead_or_unknown_plants() {
    let server = test_server();
    let plant = create_plant(&server, json!({ "name": "Ghost" })).await;
    let plant_id = plant["id"].as_str().unwrap().to_string();
    server
        .post(&format!("/api/plants/{plant_id}/death"))
        .json(&json!({}))
        .await
        .assert_status_ok();

    server
        .post("/api/tasks/perform")
        .json(&json!({ "plant_ids": [plant_id], "task_types": ["watering"] }))
        .await
        .assert_status(axum::http::StatusCode::UNPROCESSABLE_ENTITY);

    server
        .post("/api/tasks/perform")
        .json(&json!({ "plant_ids": [uuid::Uuid::new_v4()], "task_types": ["watering"] }))
        .await
        .assert_status(axum::http::StatusCode::UNPROCESSABLE_ENTITY);

    server
        .post("/api/tasks/perform")
        .json(&json!({ "plant_ids": [], "task_types": ["watering"] }))
        .await
        .assert_status(axum::http::StatusCode::UNPROCESSABLE_ENTITY);
}
