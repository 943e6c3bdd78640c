use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use confhub_conferences::model::{ConferenceForm, ConferenceQueryForm, ConferenceQueryForms};
use confhub_conferences::{Conferences, init, router};
use confhub_database::Database;
use confhub_domain::config::ApiConfig;
use confhub_domain::events::ConferenceCreated;
use confhub_event_bus::{DEFAULT_CAPACITY, EventBus};
use confhub_kernel::prelude::*;
use confhub_kernel::server::auth::issue_token;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn database() -> Database {
    Database::builder().url("mem://").session("test", "conferences").init().await.unwrap()
}

fn user(id: &str, name: &str) -> CurrentUser {
    CurrentUser {
        user_id: id.to_owned(),
        email: format!("{id}@example.com"),
        nickname: name.to_owned(),
    }
}

fn named(name: &str) -> ConferenceForm {
    ConferenceForm { name: Some(name.to_owned()), ..ConferenceForm::default() }
}

async fn slice() -> (Conferences, EventBus) {
    let events = EventBus::new();
    let conferences = Conferences::build(&ApiConfig::default(), &database().await, &events);
    (conferences, events)
}

#[tokio::test]
async fn create_applies_defaults_and_queues_mail() {
    let (conferences, events) = slice().await;
    let mut mails = events.consume::<ConferenceCreated>(DEFAULT_CAPACITY).unwrap();
    let ada = user("u-ada", "Ada");

    let created = conferences.create_conference(&ada, named("RustConf")).await.unwrap();
    assert_eq!(created.city.as_deref(), Some("Tokyo"));
    assert_eq!(created.max_attendees, Some(10));
    assert_eq!(created.seats_available, Some(10));
    assert_eq!(created.month, Some(0));
    assert_eq!(created.topics, ["Web Technologies", "Programming Languages"]);
    assert_eq!(created.organizer_user_id.as_deref(), Some("u-ada"));
    assert_eq!(created.organizer_display_name.as_deref(), Some("Ada"));

    let key = created.websafe_key.clone().unwrap();
    assert!(key.starts_with("conference:"));
    assert_eq!(conferences.get_conference(&key).await.unwrap(), created);

    let mail = mails.recv().await.unwrap();
    assert_eq!(mail.conference_key, key);
    assert_eq!(mail.organizer_email, "u-ada@example.com");
}

#[tokio::test]
async fn create_validates_name_and_dates() {
    let (conferences, _events) = slice().await;
    let ada = user("u-ada", "Ada");

    let err = conferences.create_conference(&ada, ConferenceForm::default()).await.unwrap_err();
    assert_eq!(err.message(), "Conference 'name' field required");

    let form = ConferenceForm { start_date: Some("next week".to_owned()), ..named("Bad") };
    let err = conferences.create_conference(&ada, form).await.unwrap_err();
    assert!(matches!(err, ApiError::BadRequest { .. }));

    let form = ConferenceForm {
        start_date: Some("2026-07-14T09:00:00Z".to_owned()),
        end_date: Some("2026-07-16".to_owned()),
        max_attendees: Some(0),
        city: Some("Lyon".to_owned()),
        ..named("Summer")
    };
    let created = conferences.create_conference(&ada, form).await.unwrap();
    assert_eq!(created.start_date.as_deref(), Some("2026-07-14"));
    assert_eq!(created.month, Some(7));
    assert_eq!(created.seats_available, Some(0));
    assert_eq!(created.city.as_deref(), Some("Lyon"));
}

#[tokio::test]
async fn only_the_owner_can_update() {
    let (conferences, _events) = slice().await;
    let ada = user("u-ada", "Ada");
    let created = conferences.create_conference(&ada, named("RustConf")).await.unwrap();
    let key = created.websafe_key.unwrap();

    let err = conferences
        .update_conference(&user("u-bob", "Bob"), &key, named("Hijacked"))
        .await
        .unwrap_err();
    assert_eq!(err.message(), "Only the owner can update the conference.");

    let err = conferences
        .update_conference(&ada, "conference:missing", named("Ghost"))
        .await
        .unwrap_err();
    assert_eq!(err.message(), "No conference found with key: conference:missing");

    conferences.register(&user("u-bob", "Bob"), &key).await.unwrap();
    let form = ConferenceForm {
        start_date: Some("2026-03-01".to_owned()),
        max_attendees: Some(4),
        ..ConferenceForm::default()
    };
    let updated = conferences.update_conference(&ada, &key, form).await.unwrap();
    assert_eq!(updated.name.as_deref(), Some("RustConf"));
    assert_eq!(updated.month, Some(3));
    assert_eq!(updated.max_attendees, Some(4));
    assert_eq!(updated.seats_available, Some(3));

    let form = ConferenceForm { max_attendees: Some(0), ..ConferenceForm::default() };
    let updated = conferences.update_conference(&ada, &key, form).await.unwrap();
    assert_eq!(updated.seats_available, Some(0));
}

#[tokio::test]
async fn registration_tracks_seats() {
    let (conferences, _events) = slice().await;
    let ada = user("u-ada", "Ada");
    let form = ConferenceForm { max_attendees: Some(1), ..named("Tiny") };
    let key = conferences.create_conference(&ada, form).await.unwrap().websafe_key.unwrap();

    let bob = user("u-bob", "Bob");
    assert!(conferences.register(&bob, &key).await.unwrap());
    let err = conferences.register(&bob, &key).await.unwrap_err();
    assert_eq!(err.message(), "You have already registered for this conference");

    let err = conferences.register(&user("u-eve", "Eve"), &key).await.unwrap_err();
    assert_eq!(err.message(), "There are no seats available.");
    assert_eq!(conferences.get_conference(&key).await.unwrap().seats_available, Some(0));

    let attending = conferences.conferences_to_attend(&bob).await.unwrap();
    assert_eq!(attending.items.len(), 1);
    assert_eq!(attending.items[0].organizer_display_name.as_deref(), Some("Ada"));

    assert!(conferences.unregister(&bob, &key).await.unwrap());
    assert!(!conferences.unregister(&bob, &key).await.unwrap());
    assert_eq!(conferences.get_conference(&key).await.unwrap().seats_available, Some(1));
    assert!(conferences.conferences_to_attend(&bob).await.unwrap().items.is_empty());

    let err = conferences.register(&bob, "conference:missing").await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound { .. }));
}

#[tokio::test]
async fn concurrent_registrations_never_oversell() {
    let (conferences, _events) = slice().await;
    let form = ConferenceForm { max_attendees: Some(3), ..named("Popular") };
    let key = conferences
        .create_conference(&user("u-ada", "Ada"), form)
        .await
        .unwrap()
        .websafe_key
        .unwrap();

    let mut tasks = Vec::new();
    for n in 0..8 {
        let conferences = conferences.clone();
        let key = key.clone();
        tasks.push(tokio::spawn(async move {
            conferences.register(&user(&format!("u-{n}"), "Attendee"), &key).await.is_ok()
        }));
    }

    let mut registered = 0;
    for task in tasks {
        if task.await.unwrap() {
            registered += 1;
        }
    }
    assert_eq!(registered, 3);
    assert_eq!(conferences.get_conference(&key).await.unwrap().seats_available, Some(0));
}

#[tokio::test]
async fn created_and_queried_lists() {
    let (conferences, _events) = slice().await;
    let ada = user("u-ada", "Ada");
    for (name, city, month) in [("Gamma", "London", "05"), ("Alpha", "Paris", "02"), ("Beta", "London", "09")] {
        let form = ConferenceForm {
            city: Some(city.to_owned()),
            start_date: Some(format!("2026-{month}-10")),
            ..named(name)
        };
        conferences.create_conference(&ada, form).await.unwrap();
    }
    conferences.create_conference(&user("u-bob", "Bob"), named("Other")).await.unwrap();

    let created = conferences.conferences_created(&ada).await.unwrap();
    assert_eq!(created.items.len(), 3);

    let filter = |field: &str, operator: &str, value: &str| ConferenceQueryForm {
        field: field.to_owned(),
        operator: operator.to_owned(),
        value: value.to_owned(),
    };
    let query = ConferenceQueryForms {
        filters: vec![filter("CITY", "EQ", "London"), filter("MONTH", "GT", "4")],
    };
    let found = conferences.query_conferences(&query).await.unwrap();
    let names: Vec<_> = found.items.iter().filter_map(|c| c.name.as_deref()).collect();
    assert_eq!(names, ["Gamma", "Beta"]);

    let all = conferences.query_conferences(&ConferenceQueryForms::default()).await.unwrap();
    let names: Vec<_> = all.items.iter().filter_map(|c| c.name.as_deref()).collect();
    assert_eq!(names, ["Alpha", "Beta", "Gamma", "Other"]);
}

async fn app() -> (Router, ApiConfig) {
    let cfg = ApiConfig::default();
    let db = database().await;
    let events = EventBus::new();
    let state = ApiState::builder()
        .config(cfg.clone())
        .register_slice(init(&cfg, &db, &events))
        .db(db)
        .events(events)
        .build()
        .unwrap();
    let (app, _) = router().with_state(state).split_for_parts();
    (app, cfg)
}

async fn call(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

fn json_request(method: &str, uri: &str, bearer: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder =
        Request::builder().method(method).uri(uri).header(header::CONTENT_TYPE, "application/json");
    if let Some(bearer) = bearer {
        builder = builder.header(header::AUTHORIZATION, bearer);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

#[tokio::test]
async fn conference_endpoints_over_http() {
    let (app, cfg) = app().await;
    let token = issue_token(&cfg.security.jwt, "u-ada", "ada@example.com", Some("Ada")).unwrap();
    let bearer = format!("Bearer {token}");

    let (status, body) =
        call(&app, json_request("POST", "/conference", Some(&bearer), &json!({ "name": "RustConf" })))
            .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["organizerDisplayName"], "Ada");
    let key = body["websafeKey"].as_str().unwrap().to_owned();

    let (status, body) = call(&app, Request::get(format!("/conference/{key}")).body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "RustConf");

    let (status, body) =
        call(&app, json_request("POST", &format!("/conference/{key}"), Some(&bearer), &json!(null))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], true);

    let (status, body) =
        call(&app, json_request("POST", &format!("/conference/{key}"), Some(&bearer), &json!(null))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "You have already registered for this conference");

    let (status, body) = call(
        &app,
        Request::get("/conferences/attending")
            .header(header::AUTHORIZATION, &bearer)
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"][0]["websafeKey"], key.as_str());

    let (status, body) = call(
        &app,
        json_request(
            "POST",
            "/queryConferences",
            None,
            &json!({ "filters": [{ "field": "CITY", "operator": "GT", "value": "A" },
                                 { "field": "MONTH", "operator": "NE", "value": "3" }] }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Inequality filter is allowed on only one field.");

    let (status, _) = call(
        &app,
        json_request("PUT", &format!("/conference/{key}"), None, &json!({ "name": "Anonymous" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) =
        call(&app, Request::get("/conference/session:abc").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}
