use axum::Router;
use confhub::features::conferences::Conferences;
use confhub::kernel::server::ApiState;
use confhub_database::Database;
use confhub_domain::config::ApiConfig;
use confhub_event_bus::EventBus;

async fn state() -> ApiState {
    let cfg = ApiConfig::default();
    let db = Database::builder().url("mem://").session("test", "facade").init().await.unwrap();
    let events = EventBus::new();
    let slices = confhub::init(&cfg, &db, &events).unwrap();

    ApiState::builder().config(cfg).db(db).events(events).register_slices(slices).build().unwrap()
}

#[tokio::test]
async fn init_registers_every_slice() {
    let state = state().await;

    assert_eq!(state.slice_count(), confhub::features::ENABLED.len());
    assert!(state.get_slice::<Conferences>().is_some());
    assert!(confhub::features::is_enabled("sessions"));
    assert!(!confhub::features::is_enabled("billing"));

    confhub::shutdown(&state);
}

#[tokio::test]
async fn second_init_on_the_same_bus_fails() {
    let cfg = ApiConfig::default();
    let db = Database::builder().url("mem://").session("test", "facade").init().await.unwrap();
    let events = EventBus::new();

    let _first = confhub::init(&cfg, &db, &events).unwrap();
    let err = confhub::init(&cfg, &db, &events).unwrap_err();
    assert!(matches!(err, confhub::BootstrapError::EventBus { .. }));

    events.shutdown();
}

#[tokio::test]
async fn router_documents_all_operations() {
    let state = state().await;
    let (_, api): (Router, _) = confhub::router().with_state(state.clone()).split_for_parts();

    let operations: Vec<String> = api
        .paths
        .paths
        .values()
        .flat_map(|item| {
            [&item.get, &item.post, &item.put, &item.delete]
                .into_iter()
                .flatten()
                .filter_map(|op| op.operation_id.clone())
                .collect::<Vec<_>>()
        })
        .collect();

    for expected in [
        "getProfile",
        "saveProfile",
        "createConference",
        "updateConference",
        "getConference",
        "getConferencesCreated",
        "getConferencesToAttend",
        "queryConferences",
        "registerForConference",
        "unregisterFromConference",
        "createSession",
        "getConferenceSessions",
        "getConferenceSessionsByType",
        "getSessionsBySpeaker",
        "getSessionsBySpeakerOfType",
        "getSessionsStartingAfter",
        "getSessionsBeforeTimeExcludingType",
        "addSessionToWishlist",
        "getSessionsInWishList",
        "removeSessionFromWishList",
        "getAnnouncement",
        "getFeaturedSpeaker",
    ] {
        assert!(operations.iter().any(|op| op == expected), "missing operation {expected}");
    }

    confhub::shutdown(&state);
}
