use super::*;
use chrono::TimeZone;
use shared::protocol::{CommandData, InteractionData, MessageData};

fn command(id: &str) -> InteractionEnvelope {
    InteractionEnvelope::new(
        id,
        InteractionData::ApplicationCommand(CommandData {
            name: "poll".to_string(),
            options: Vec::new(),
        }),
    )
}

fn reply(text: &str) -> InteractionResponse {
    InteractionResponse::Message(MessageData::text(text))
}

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).single().expect("timestamp")
}

#[test]
fn returns_record_within_retention_window() {
    let store = CorrelationStore::default();
    store.record_at(command("a"), reply("hello"), t0());

    let found = store
        .lookup_at(&InteractionId::from("a"), t0() + Duration::seconds(899))
        .expect("record");
    assert_eq!(found.request, command("a"));
    assert_eq!(found.response, reply("hello"));
    assert_eq!(found.timestamp, t0());
}

#[test]
fn expired_record_is_gone_for_good() {
    let store = CorrelationStore::default();
    store.record_at(command("a"), reply("hello"), t0());

    let err = store
        .lookup_at(&InteractionId::from("a"), t0() + Duration::seconds(901))
        .expect_err("expired");
    assert_eq!(
        err,
        StoreError::NotFound {
            id: InteractionId::from("a")
        }
    );
    assert!(store.is_empty());

    let again = store.lookup_at(&InteractionId::from("a"), t0());
    assert!(again.is_err());
}

#[test]
fn record_exactly_at_retention_boundary_is_expired() {
    let store = CorrelationStore::default();
    store.record_at(command("a"), reply("hello"), t0());

    let result = store.lookup_at(&InteractionId::from("a"), t0() + Duration::seconds(900));
    assert!(result.is_err());
}

#[test]
fn lookup_sweeps_every_expired_record() {
    let store = CorrelationStore::default();
    store.record_at(command("old-1"), reply("1"), t0());
    store.record_at(command("old-2"), reply("2"), t0() + Duration::seconds(10));
    store.record_at(command("fresh"), reply("3"), t0() + Duration::seconds(600));
    assert_eq!(store.len(), 3);

    let found = store
        .lookup_at(&InteractionId::from("fresh"), t0() + Duration::seconds(1000))
        .expect("fresh record");
    assert_eq!(found.response, reply("3"));
    assert_eq!(store.len(), 1);
}

#[test]
fn missing_id_still_sweeps() {
    let store = CorrelationStore::default();
    store.record_at(command("old"), reply("1"), t0());

    let err = store
        .lookup_at(&InteractionId::from("never-seen"), t0() + Duration::hours(1))
        .expect_err("missing");
    assert_eq!(err.to_string(), "interaction never-seen does not exist");
    assert!(store.is_empty());
}

#[test]
fn custom_retention_is_honoured() {
    let store = CorrelationStore::new(Duration::seconds(5));
    assert_eq!(store.retention(), Duration::seconds(5));
    store.record_at(command("a"), reply("1"), t0());

    assert!(store
        .lookup_at(&InteractionId::from("a"), t0() + Duration::seconds(4))
        .is_ok());
    assert!(store
        .lookup_at(&InteractionId::from("a"), t0() + Duration::seconds(5))
        .is_err());
}

#[test]
fn record_with_wall_clock_is_found_immediately() {
    let store = CorrelationStore::default();
    store.record(command("now"), reply("1"));
    assert!(store.lookup(&InteractionId::from("now")).is_ok());
}

#[test]
fn record_serializes_with_rfc3339_timestamp() {
    let record = CorrelationRecord {
        request: command("a"),
        response: reply("hi"),
        timestamp: t0(),
    };
    let value = serde_json::to_value(&record).expect("json");
    assert_eq!(value["timestamp"], "2024-05-01T12:00:00Z");
    assert_eq!(value["request"]["id"], "a");
    assert_eq!(value["response"]["type"], "message");
}
