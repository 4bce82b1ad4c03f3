use super::*;
use serde_json::json;

#[test]
fn parses_application_command_envelope() {
    let envelope: InteractionEnvelope = serde_json::from_value(json!({
        "id": "i-1",
        "type": "application_command",
        "data": { "name": "poll" },
        "guild_id": "g-1"
    }))
    .expect("envelope");

    assert_eq!(envelope.id, InteractionId::from("i-1"));
    assert_eq!(envelope.interaction_type(), InteractionType::ApplicationCommand);
    assert_eq!(envelope.candidate(), "poll");
    assert_eq!(envelope.guild_id, Some(GuildId::from("g-1")));
}

#[test]
fn component_candidate_is_custom_id() {
    let envelope: InteractionEnvelope = serde_json::from_value(json!({
        "id": "i-2",
        "type": "message_component",
        "data": { "custom_id": "poll:button:1", "component_type": "button" }
    }))
    .expect("envelope");

    assert_eq!(envelope.candidate(), "poll:button:1");
    let InteractionData::MessageComponent(component) = &envelope.data else {
        panic!("expected component data");
    };
    assert_eq!(component.component_type, ComponentType::Button);
    assert!(component.values.is_empty());
}

#[test]
fn rejects_data_that_does_not_fit_the_type() {
    let result = serde_json::from_value::<InteractionEnvelope>(json!({
        "id": "i-3",
        "type": "modal_submit",
        "data": { "name": "poll" }
    }));
    assert!(result.is_err());
}

#[test]
fn rejects_unknown_interaction_type() {
    let result = serde_json::from_value::<InteractionEnvelope>(json!({
        "id": "i-4",
        "type": "ping",
        "data": {}
    }));
    assert!(result.is_err());
}

#[test]
fn envelope_serializes_back_to_wire_shape() {
    let envelope = InteractionEnvelope::new(
        "i-5",
        InteractionData::MessageComponent(ComponentData {
            custom_id: "poll:button:0".to_string(),
            component_type: ComponentType::Button,
            values: Vec::new(),
        }),
    );
    let value = serde_json::to_value(&envelope).expect("json");
    assert_eq!(value["type"], "message_component");
    assert_eq!(value["data"]["custom_id"], "poll:button:0");
    assert!(value.get("guild_id").is_none());
}

#[test]
fn modal_field_lookup_uses_custom_id() {
    let modal = ModalSubmitData {
        custom_id: "poll:modal:modal".to_string(),
        components: vec![
            SubmittedRow {
                components: vec![SubmittedField {
                    custom_id: "poll:text:description".to_string(),
                    value: "Favorite color?".to_string(),
                }],
            },
            SubmittedRow {
                components: vec![SubmittedField {
                    custom_id: "poll:text:options".to_string(),
                    value: "Red\nGreen".to_string(),
                }],
            },
        ],
    };

    assert_eq!(modal.field("poll:text:options"), Some("Red\nGreen"));
    assert_eq!(modal.field("poll:text:description"), Some("Favorite color?"));
    assert_eq!(modal.field("poll:text:missing"), None);
}

#[test]
fn response_is_tagged_by_type() {
    let response = InteractionResponse::Message(MessageData::text("1"));
    let value = serde_json::to_value(&response).expect("json");
    assert_eq!(value, json!({ "type": "message", "data": { "content": "1" } }));

    let deferred = serde_json::to_value(InteractionResponse::DeferredMessage).expect("json");
    assert_eq!(deferred, json!({ "type": "deferred_message" }));
}

#[test]
fn components_carry_their_type_tag() {
    let row = ActionRow {
        components: vec![Component::Button(Button {
            custom_id: "poll:button:0".to_string(),
            label: "Red".to_string(),
            style: ButtonStyle::Success,
        })],
    };
    let value = serde_json::to_value(&row).expect("json");
    assert_eq!(value["components"][0]["type"], "button");
    assert_eq!(value["components"][0]["style"], "success");
    assert_eq!(row.components[0].component_type(), ComponentType::Button);
}

#[test]
fn string_select_reads_back_from_wire_shape() {
    let wire = json!({
        "type": "string_select",
        "custom_id": "poll:select:0",
        "options": [
            { "label": "Red", "value": "0" },
            { "label": "Blue", "value": "1" }
        ]
    });
    let component: Component = serde_json::from_value(wire.clone()).expect("select");
    assert_eq!(component.component_type(), ComponentType::StringSelect);
    assert_eq!(component.custom_id(), "poll:select:0");
    match &component {
        Component::StringSelect(select) => {
            assert_eq!(select.placeholder, None);
            assert_eq!(
                select.options[1],
                SelectOption {
                    label: "Blue".to_string(),
                    value: "1".to_string(),
                }
            );
        }
        other => panic!("expected a select, got {other:?}"),
    }
    assert_eq!(serde_json::to_value(&component).expect("json"), wire);
}

#[test]
fn route_pattern_serializes_only_the_relevant_globs() {
    let command = RoutePattern::names(InteractionType::ApplicationCommand, ["poll*"]);
    let value = serde_json::to_value(&command).expect("json");
    assert_eq!(value, json!({ "type": "application_command", "names": ["poll*"] }));
    assert_eq!(command.globs(), ["poll*".to_string()]);

    let modal = RoutePattern::ids(InteractionType::ModalSubmit, ["poll:*"]);
    assert_eq!(modal.globs(), ["poll:*".to_string()]);
    assert!(RoutePattern::names(InteractionType::ModalSubmit, ["poll"])
        .globs()
        .is_empty());
}
