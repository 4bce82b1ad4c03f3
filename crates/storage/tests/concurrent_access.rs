use std::{sync::Arc, thread};

use chrono::{Duration, Utc};
use shared::{
    domain::{ComponentType, InteractionId},
    protocol::{
        ComponentData, InteractionData, InteractionEnvelope, InteractionResponse, MessageData,
    },
};
use storage::CorrelationStore;

fn click(id: String) -> InteractionEnvelope {
    InteractionEnvelope::new(
        id,
        InteractionData::MessageComponent(ComponentData {
            custom_id: "poll:button:0".to_string(),
            component_type: ComponentType::Button,
            values: Vec::new(),
        }),
    )
}

#[test]
fn concurrent_records_survive_interleaved_sweeps() {
    let store = Arc::new(CorrelationStore::default());
    let stale = Utc::now() - Duration::hours(1);
    for n in 0..50 {
        store.record_at(
            click(format!("stale-{n}")),
            InteractionResponse::DeferredMessage,
            stale,
        );
    }

    thread::scope(|scope| {
        for worker in 0..4 {
            let store = Arc::clone(&store);
            scope.spawn(move || {
                for n in 0..100 {
                    store.record(
                        click(format!("w{worker}-{n}")),
                        InteractionResponse::Message(MessageData::text(n.to_string())),
                    );
                }
            });
        }
        for _ in 0..2 {
            let store = Arc::clone(&store);
            scope.spawn(move || {
                for _ in 0..100 {
                    let _ = store.lookup(&InteractionId::from("stale-0"));
                }
            });
        }
    });

    assert!(store.lookup(&InteractionId::from("stale-0")).is_err());
    assert_eq!(store.len(), 400);
    for worker in 0..4 {
        let record = store
            .lookup(&InteractionId(format!("w{worker}-99")))
            .expect("fresh record");
        assert_eq!(
            record.response,
            InteractionResponse::Message(MessageData::text("99"))
        );
    }
}
