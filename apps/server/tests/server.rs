use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use confhub_database::Database;
use confhub_kernel::server::auth::issue_token;
use confhub_server::Server;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn call(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

fn request(method: &str, uri: &str, bearer: &str, body: Option<&Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri).header(header::AUTHORIZATION, bearer);
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn server() -> (Server, Router) {
    let database =
        Database::builder().url("mem://").session("test", "server").init().await.unwrap();
    let server = Server::builder().database(database).build().await.unwrap();
    let app = server.router();
    (server, app)
}

fn bearer(server: &Server, user_id: &str, name: &str) -> String {
    let jwt = &server.state().config.security.jwt;
    let token = issue_token(jwt, user_id, &format!("{user_id}@example.com"), Some(name)).unwrap();
    format!("Bearer {token}")
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn health_and_docs_are_served() {
    let (server, app) = server().await;

    let response =
        app.clone().oneshot(Request::get("/health").body(Body::empty()).unwrap()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(Request::get("/api").body(Body::empty()).unwrap()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    confhub::shutdown(server.state());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn organizer_and_attendee_walk_through_a_conference() {
    let (server, app) = server().await;
    let ada = bearer(&server, "u-ada", "Ada");
    let bob = bearer(&server, "u-bob", "Bob");

    let (status, profile) = call(
        &app,
        request("POST", "/profile", &bob, Some(&json!({ "displayName": "Bobby", "teeShirtSize": "xl_m" }))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["displayName"], "Bobby");
    assert_eq!(profile["teeShirtSize"], "XL_M");

    let (status, conference) = call(
        &app,
        request(
            "POST",
            "/conference",
            &ada,
            Some(&json!({ "name": "RustConf", "city": "Montreal", "maxAttendees": 2 })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let key = conference["websafeKey"].as_str().unwrap().to_owned();

    let (status, session) = call(
        &app,
        request(
            "POST",
            &format!("/conference/{key}/session"),
            &ada,
            Some(&json!({
                "name": "Ownership in practice",
                "speaker": "Grace",
                "sessionType": "WORKSHOP",
                "startTime": "14:30",
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let session_key = session["websafeKey"].as_str().unwrap().to_owned();

    let (status, body) = call(&app, request("POST", &format!("/conference/{key}"), &bob, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], true);

    let (_, attending) = call(&app, request("GET", "/conferences/attending", &bob, None)).await;
    assert_eq!(attending["items"][0]["name"], "RustConf");
    assert_eq!(attending["items"][0]["seatsAvailable"], 1);

    let (status, _) = call(
        &app,
        request("POST", "/addSessionToWishlist", &bob, Some(&json!({ "websafeSessionKey": session_key }))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, wishlist) = call(&app, request("GET", "/sessions/wishlist", &bob, None)).await;
    assert_eq!(wishlist["items"][0]["speaker"], "Grace");

    let (status, body) =
        call(&app, request("DELETE", &format!("/conference/{key}"), &bob, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], true);

    let (_, attending) = call(&app, request("GET", "/conferences/attending", &bob, None)).await;
    assert_eq!(attending["items"], json!([]));

    confhub::shutdown(server.state());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn protected_routes_require_a_bearer_token() {
    let server = Server::builder().port(0).build().await.unwrap();
    assert_eq!(server.address().port(), 0);
    let app = server.router();

    let response = app
        .oneshot(Request::get("/conferences/attending").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    confhub::shutdown(server.state());
}
