use axum::Router;
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use chrono::NaiveDate;
use rover_gallery::FetchCause;
use rover_gallery::api::{MarsPhotosApi, PhotoSource};
use rover_gallery::config::ApiOptions;
use serde_json::json;
use std::collections::HashMap;
use std::time::Duration;

const KEY: &str = "test-key";

async fn photos(
    Path(rover): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if query.get("api_key").map(String::as_str) != Some(KEY) {
        return StatusCode::FORBIDDEN.into_response();
    }
    let page: u64 = match query.get("page").and_then(|p| p.parse().ok()) {
        Some(page) => page,
        None => return StatusCode::BAD_REQUEST.into_response(),
    };
    let date = query.get("earth_date").cloned().unwrap_or_default();
    match date.as_str() {
        "2015-05-30" => axum::Json(json!({
            "photos": [{
                "id": page,
                "sol": 1000,
                "camera": {"id": 20, "name": "FHAZ", "rover_id": 5, "full_name": "Front Hazard Avoidance Camera"},
                "img_src": format!("https://images.test/{rover}/2015-05-30.jpg"),
                "earth_date": "2015-05-30",
                "rover": {
                    "id": 5, "name": "Curiosity", "landing_date": "2012-08-06",
                    "launch_date": "2011-11-26", "status": "active",
                    "max_sol": 4102, "max_date": "2024-02-19", "total_photos": 695670
                }
            }]
        }))
        .into_response(),
        "2015-05-31" => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        "2015-06-01" => axum::Json(json!({})).into_response(),
        "2015-06-02" => "over rate limit".into_response(),
        "2015-06-03" => {
            tokio::time::sleep(Duration::from_secs(5)).await;
            axum::Json(json!({"photos": []})).into_response()
        }
        _ => axum::Json(json!({"photos": []})).into_response(),
    }
}

async fn spawn_server() -> String {
    let router = Router::new().route("/api/v1/rovers/{rover}/photos", get(photos));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/api/v1/")
}

async fn client() -> MarsPhotosApi {
    let options = ApiOptions {
        base_url: spawn_server().await,
        key: KEY.to_string(),
        request_timeout: Duration::from_millis(500),
    };
    MarsPhotosApi::new(&options).unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[tokio::test]
async fn fetches_and_decodes_a_page() {
    let api = client().await;

    let photos = api
        .fetch_page("curiosity", date("2015-05-30"), 2)
        .await
        .unwrap();

    assert_eq!(photos.len(), 1);
    assert_eq!(photos[0].id, 2, "page parameter forwarded");
    assert_eq!(
        photos[0].img_src,
        "https://images.test/curiosity/2015-05-30.jpg"
    );
    assert_eq!(photos[0].rover.name, "Curiosity");
}

#[tokio::test]
async fn non_success_status_is_a_fetch_failure() {
    let api = client().await;

    let failure = api
        .fetch_page("curiosity", date("2015-05-31"), 1)
        .await
        .unwrap_err();

    assert_eq!(failure.date, date("2015-05-31"));
    assert_eq!(failure.page, 1);
    assert!(matches!(failure.cause, FetchCause::Status(500)));
    assert_eq!(
        failure.to_string(),
        "failed to fetch photos for 2015-05-31 (page 1)"
    );
}

#[tokio::test]
async fn missing_photos_field_is_an_empty_page() {
    let api = client().await;

    let photos = api
        .fetch_page("curiosity", date("2015-06-01"), 1)
        .await
        .unwrap();

    assert!(photos.is_empty());
}

#[tokio::test]
async fn non_json_body_is_a_decode_failure() {
    let api = client().await;

    let failure = api
        .fetch_page("curiosity", date("2015-06-02"), 1)
        .await
        .unwrap_err();

    assert!(matches!(failure.cause, FetchCause::Decode(_)));
}

#[tokio::test]
async fn slow_response_times_out_as_transport_failure() {
    let api = client().await;

    let failure = api
        .fetch_page("curiosity", date("2015-06-03"), 1)
        .await
        .unwrap_err();

    assert!(matches!(failure.cause, FetchCause::Transport(_)));
}

#[tokio::test]
async fn wrong_key_is_rejected_by_status() {
    let options = ApiOptions {
        base_url: spawn_server().await,
        key: "other".to_string(),
        request_timeout: Duration::from_secs(2),
    };
    let api = MarsPhotosApi::new(&options).unwrap();

    let failure = api
        .fetch_page("curiosity", date("2015-05-30"), 1)
        .await
        .unwrap_err();

    assert!(matches!(failure.cause, FetchCause::Status(403)));
}
