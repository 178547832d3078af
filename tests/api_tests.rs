use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use listarr::config::Config;
use tower::ServiceExt;

async fn spawn_app() -> Router {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.general.max_db_connections = 1;
    config.catalog.enrich_on_create = false;

    let state = listarr::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    listarr::api::router(state).await
}

async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

async fn seed_list(app: &Router, name: &str) -> i64 {
    let (status, body) = send_json(app, "POST", "/api/lists", serde_json::json!({"name": name})).await;
    assert_eq!(status, StatusCode::OK);
    body["data"]["id"].as_i64().unwrap()
}

async fn seed_line(app: &Router, list_id: i64, line: serde_json::Value) -> i64 {
    let mut line = line;
    line["list_id"] = serde_json::json!(list_id);
    let (status, body) = send_json(app, "POST", "/api/lines", line).await;
    assert_eq!(status, StatusCode::OK);
    body["data"]["id"].as_i64().unwrap()
}

fn line_payload(name: &str, content: &str, status: &str, opinion: &str, tags: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "content": content,
        "status": status,
        "opinion": opinion,
        "episode": "1",
        "tags": tags,
    })
}

#[tokio::test]
async fn test_system_status() {
    let app = spawn_app().await;

    let (status, body) = get_json(&app, "/api/system/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["database"], "ok");
    assert_eq!(body["data"]["lists"], 0);
}

#[tokio::test]
async fn test_list_crud_and_series_order() {
    let app = spawn_app().await;
    let list_id = seed_list(&app, "Animes").await;

    seed_line(&app, list_id, line_payload("Show III", "Anime", "Vendo", "Bom", "")).await;
    seed_line(&app, list_id, line_payload("Show", "Anime", "Concluido", "Bom", "")).await;
    seed_line(&app, list_id, line_payload("Another", "Anime", "Vendo", "Bom", "")).await;

    let (status, body) = get_json(&app, &format!("/api/lists/{list_id}/lines")).await;
    assert_eq!(status, StatusCode::OK);

    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|line| line["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Another", "Show", "Show III"]);

    let (status, _) = get_json(&app, "/api/lists/9999/lines").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_line_dto_derives_class_and_icons() {
    let app = spawn_app().await;
    let list_id = seed_list(&app, "Mangas").await;
    seed_line(
        &app,
        list_id,
        line_payload(
            "Kaguya",
            "Manga",
            "Lendo",
            "Favorito",
            "Goat, Beijo, Romance do bom, Namoro",
        ),
    )
    .await;

    let (_, body) = get_json(&app, &format!("/api/lists/{list_id}/lines")).await;
    let line = &body["data"][0];
    assert_eq!(line["extra_class"], "best-love");
    assert_eq!(line["status_icon"], "fa-eye");
    assert_eq!(line["opinion_icon"], "fa-star");
    assert_eq!(line["episode_label"], "Capítulos");
    assert_eq!(line["tags"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_query_filters_and_sorts() {
    let app = spawn_app().await;
    let list_id = seed_list(&app, "Tudo").await;

    seed_line(&app, list_id, line_payload("Alpha", "Anime", "Vendo", "Ruim", "Magia")).await;
    seed_line(&app, list_id, line_payload("Beta", "Manga", "Lendo", "Favorito", "Magia,Drama")).await;
    seed_line(&app, list_id, line_payload("Gamma", "Anime", "Dropado", "Mediano", "Drama")).await;

    // Tag include is AND semantics; only Beta carries both tags.
    let (status, body) = send_json(
        &app,
        "POST",
        &format!("/api/lists/{list_id}/lines/query"),
        serde_json::json!({
            "filter": {"tags": {"include": ["Magia", "Drama"]}}
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["name"], "Beta");

    // Status exclude plus opinion-priority ordering.
    let (_, body) = send_json(
        &app,
        "POST",
        &format!("/api/lists/{list_id}/lines/query"),
        serde_json::json!({
            "filter": {"status": {"exclude": ["Dropado"]}},
            "sort": "opinion-priority"
        }),
    )
    .await;
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|line| line["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Beta", "Alpha"]);
}

#[tokio::test]
async fn test_censor_rule_hides_adult_manhwa() {
    let app = spawn_app().await;
    let list_id = seed_list(&app, "Manhwas").await;

    seed_line(
        &app,
        list_id,
        line_payload("Spicy", "Manhwa", "Lendo", "Mediano", "Ecchi,Nudez,Vida Escolar"),
    )
    .await;
    seed_line(&app, list_id, line_payload("Tame", "Manhwa", "Lendo", "Bom", "Drama")).await;

    let (_, body) = send_json(
        &app,
        "POST",
        &format!("/api/lists/{list_id}/lines/query"),
        serde_json::json!({"filter": {}}),
    )
    .await;
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|line| line["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Tame"]);

    let (_, body) = send_json(
        &app,
        "POST",
        &format!("/api/lists/{list_id}/lines/query"),
        serde_json::json!({"filter": {"censor_adult": true}}),
    )
    .await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_line_update_and_delete() {
    let app = spawn_app().await;
    let list_id = seed_list(&app, "Edit").await;
    let line_id = seed_line(&app, list_id, line_payload("Old", "Anime", "Vendo", "Bom", "")).await;

    let (status, body) = send_json(
        &app,
        "PUT",
        &format!("/api/lines/{line_id}"),
        serde_json::json!({
            "name": "New",
            "content": "Anime",
            "status": "Concluido",
            "opinion": "Favorito",
            "episode": "24",
            "tags": "Magia",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "New");
    assert_eq!(body["data"]["status"], "Concluido");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/lines/{line_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (_, body) = get_json(&app, &format!("/api/lists/{list_id}/lines")).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_image_update_rejects_placeholder() {
    let app = spawn_app().await;
    let list_id = seed_list(&app, "Covers").await;
    let line_id = seed_line(&app, list_id, line_payload("Frieren", "Anime", "Vendo", "Bom", "")).await;

    let (status, _) = send_json(
        &app,
        "PUT",
        &format!("/api/lines/{line_id}/image"),
        serde_json::json!({"image_url": "https://via.placeholder.com/300x450.png?text=Sem+Capa"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send_json(
        &app,
        "PUT",
        &format!("/api/lines/{line_id}/image"),
        serde_json::json!({"image_url": "https://img.anili.st/media/1.jpg"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_details_update_accepts_string_encoded_synonyms() {
    let app = spawn_app().await;
    let list_id = seed_list(&app, "Details").await;
    let line_id = seed_line(&app, list_id, line_payload("Frieren", "Anime", "Vendo", "Bom", "")).await;

    let (status, _) = send_json(
        &app,
        "PUT",
        &format!("/api/lines/{line_id}/details"),
        serde_json::json!({
            "synonyms": "[\"Sousou no Frieren\",\"Frieren\",\"葬送のフリーレン\"]",
            "synopsis": "A mage outlives her party.",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get_json(&app, &format!("/api/lists/{list_id}/lines")).await;
    let line = &body["data"][0];
    assert_eq!(line["synonyms"].as_array().unwrap().len(), 3);
    assert_eq!(line["needs_details"], false);
}

#[tokio::test]
async fn test_sequence_lifecycle() {
    let app = spawn_app().await;
    let list_id = seed_list(&app, "Seasons").await;
    let first = seed_line(&app, list_id, line_payload("Show", "Anime", "Concluido", "Bom", "")).await;
    let second = seed_line(&app, list_id, line_payload("Show II", "Anime", "Vendo", "Bom", "")).await;
    let third = seed_line(&app, list_id, line_payload("Show III", "Anime", "Assistir", "Não vi", "")).await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/sequences",
        serde_json::json!({"name": "Show Sequence", "description": "Seasons in order"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let sequence_id = body["data"]["id"].as_i64().unwrap();

    for line_id in [first, second, third] {
        let (status, _) = send_json(
            &app,
            "POST",
            &format!("/api/sequences/{sequence_id}/items"),
            serde_json::json!({"line_id": line_id}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    // Duplicate membership is a conflict.
    let (status, _) = send_json(
        &app,
        "POST",
        &format!("/api/sequences/{sequence_id}/items"),
        serde_json::json!({"line_id": first}),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, body) = get_json(&app, &format!("/api/sequences/{sequence_id}")).await;
    assert_eq!(body["data"]["total_items"], 3);
    let positions: Vec<i64> = body["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["position"].as_i64().unwrap())
        .collect();
    assert_eq!(positions, vec![1, 2, 3]);

    // The middle season knows its predecessor.
    let (_, body) = get_json(&app, &format!("/api/lines/{second}/sequences")).await;
    assert_eq!(body["data"]["total_sequences"], 1);
    assert_eq!(body["data"]["sequence_note"], "Sequência após Show");

    // Removal keeps the survivors' positions as they are.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/sequences/{sequence_id}/items/{second}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (_, body) = get_json(&app, &format!("/api/sequences/{sequence_id}")).await;
    let positions: Vec<i64> = body["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["position"].as_i64().unwrap())
        .collect();
    assert_eq!(positions, vec![1, 3]);

    // Reorder is atomic and rejects unknown members.
    let (status, _) = send_json(
        &app,
        "PUT",
        &format!("/api/sequences/{sequence_id}/order"),
        serde_json::json!([
            {"line_id": third, "position": 1},
            {"line_id": first, "position": 2},
        ]),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send_json(
        &app,
        "PUT",
        &format!("/api/sequences/{sequence_id}/order"),
        serde_json::json!([{"line_id": second, "position": 9}]),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Deleting the sequence keeps the lines.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/sequences/{sequence_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (_, body) = get_json(&app, &format!("/api/lists/{list_id}/lines")).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_line_delete_cascades_sequence_membership() {
    let app = spawn_app().await;
    let list_id = seed_list(&app, "Cascade").await;
    let line_id = seed_line(&app, list_id, line_payload("Solo", "Anime", "Vendo", "Bom", "")).await;

    let (_, body) = send_json(
        &app,
        "POST",
        "/api/sequences",
        serde_json::json!({"name": "Solo Sequence"}),
    )
    .await;
    let sequence_id = body["data"]["id"].as_i64().unwrap();
    send_json(
        &app,
        "POST",
        &format!("/api/sequences/{sequence_id}/items"),
        serde_json::json!({"line_id": line_id}),
    )
    .await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/lines/{line_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (_, body) = get_json(&app, &format!("/api/sequences/{sequence_id}")).await;
    assert_eq!(body["data"]["total_items"], 0);
}

#[tokio::test]
async fn test_navigate_grid() {
    let app = spawn_app().await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/lines/navigate",
        serde_json::json!({"ids": [1,2,3,4,5,6,7,8,9,10], "current": 2, "direction": "down"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["target_id"], 7);

    // Off-grid moves are no-ops.
    let (_, body) = send_json(
        &app,
        "POST",
        "/api/lines/navigate",
        serde_json::json!({"ids": [1,2,3,4,5,6,7,8,9,10], "current": 1, "direction": "left"}),
    )
    .await;
    assert_eq!(body["data"]["target_id"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_highlights_and_verification() {
    let app = spawn_app().await;
    let list_id = seed_list(&app, "Watching").await;

    seed_line(&app, list_id, line_payload("Frieren", "Anime", "Vendo", "Favorito", "")).await;
    seed_line(&app, list_id, line_payload("Berserk", "Manga", "Lendo", "Bom", "")).await;
    // Completed entries never surface for verification.
    seed_line(&app, list_id, line_payload("Done", "Anime", "Concluido", "Bom", "")).await;

    let (status, body) = get_json(&app, &format!("/api/lists/{list_id}/highlights")).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|line| line["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Berserk", "Frieren"]);

    let frieren_id = body["data"][1]["id"].as_i64().unwrap();
    let (status, _) = send_json(
        &app,
        "POST",
        &format!("/api/lines/{frieren_id}/verified"),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get_json(&app, &format!("/api/lists/{list_id}/highlights")).await;
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|line| line["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Berserk"]);
}

#[tokio::test]
async fn test_export_fans_out_tags() {
    let app = spawn_app().await;
    let list_id = seed_list(&app, "Export").await;
    seed_line(&app, list_id, line_payload("Berserk", "Manga", "Lendo", "Favorito", "Ação,Drama,Gore")).await;
    seed_line(&app, list_id, line_payload("Untagged", "Anime", "Vendo", "Bom", "")).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/export")
                .header("Content-Type", "application/json")
                .body(Body::from(
                    serde_json::json!({"list_id": list_id, "filename": "Minha Lista.xml"})
                        .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response
        .headers()
        .get("content-disposition")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("Minha Lista.xml"));

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let xml = String::from_utf8(bytes.to_vec()).unwrap();
    // Three tag rows for Berserk, one blank-tag row for Untagged, one header.
    assert_eq!(xml.matches("<Row>").count(), 5);
    assert_eq!(xml.matches(">Berserk<").count(), 3);
    assert!(xml.contains("mso-application"));
}

#[tokio::test]
async fn test_tags_vocabulary() {
    let app = spawn_app().await;

    let (status, body) = get_json(&app, "/api/tags").await;
    assert_eq!(status, StatusCode::OK);

    let all = body["data"]["all"].as_array().unwrap();
    assert!(all.iter().any(|t| t == "Goat"));
    assert!(all.iter().any(|t| t == "Romance do bom"));
    assert!(!body["data"]["groups"].as_array().unwrap().is_empty());
}
