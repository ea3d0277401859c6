use esto_client::ClientError;
use esto_integration_tests::TestService;
use esto_types::wire::STORE_RECORD_PATH;
use esto_types::{EntityId, EntityType, Event, EventName};
use futures::TryStreamExt;
use serde_json::{Value, json};

fn labels(event_name: &str) -> (EntityType, EventName) {
    (
        EntityType::try_new("MyThing").unwrap(),
        EventName::try_new(event_name).unwrap(),
    )
}

#[tokio::test]
async fn write_returns_status_message_from_service() {
    let service = TestService::start().await;
    let (entity_type, event_name) = labels("ThingDoneToMyThing");

    let message = service
        .client
        .write(
            EntityId::generate(),
            entity_type,
            event_name,
            &json!({ "a": 1, "b": 2 }),
        )
        .await
        .unwrap();

    assert_eq!(message, "Event ThingDoneToMyThing!");
    assert_eq!(service.storage.record_count(), 1);
}

#[tokio::test]
async fn read_yields_written_events_in_order() {
    let service = TestService::start().await;
    let entity_id: EntityId = "95C6D7EF-58E1-4C32-A1C6-7A11CB63C759".parse().unwrap();

    for (seq, name) in ["Created", "Renamed", "Archived"].iter().enumerate() {
        let (entity_type, event_name) = labels(name);
        service
            .client
            .write(entity_id, entity_type, event_name, &json!({ "seq": seq }))
            .await
            .unwrap();
    }

    let events: Vec<Event> = service.client.read(entity_id).try_collect().await.unwrap();

    let names: Vec<&str> = events.iter().map(|e| e.event_name.as_ref()).collect();
    assert_eq!(names, ["Created", "Renamed", "Archived"]);

    let payloads: Vec<Value> = events.iter().map(|e| e.event_data.parse().unwrap()).collect();
    assert_eq!(
        payloads,
        [json!({ "seq": 0 }), json!({ "seq": 1 }), json!({ "seq": 2 })]
    );

    assert!(events.iter().all(|e| e.entity_id == entity_id));
    assert!(events
        .windows(2)
        .all(|pair| pair[0].timestamp <= pair[1].timestamp));
}

#[tokio::test]
async fn reading_unknown_entity_yields_nothing() {
    let service = TestService::start().await;

    let events: Vec<Event> = service
        .client
        .read(EntityId::generate())
        .try_collect()
        .await
        .unwrap();

    assert!(events.is_empty());
}

#[tokio::test]
async fn read_can_be_restarted() {
    let service = TestService::start().await;
    let entity_id = EntityId::generate();
    let (entity_type, event_name) = labels("Created");
    service
        .client
        .write(entity_id, entity_type, event_name, &json!({}))
        .await
        .unwrap();

    let first: Vec<Event> = service.client.read(entity_id).try_collect().await.unwrap();

    let (entity_type, event_name) = labels("Updated");
    service
        .client
        .write(entity_id, entity_type, event_name, &json!({}))
        .await
        .unwrap();

    let second: Vec<Event> = service.client.read(entity_id).try_collect().await.unwrap();

    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 2);
    assert_eq!(second[0], first[0]);
}

#[tokio::test]
async fn entities_are_read_independently() {
    let service = TestService::start().await;
    let left = EntityId::generate();
    let right = EntityId::generate();

    for entity_id in [left, right, left] {
        let (entity_type, event_name) = labels("Touched");
        service
            .client
            .write(entity_id, entity_type, event_name, &json!({}))
            .await
            .unwrap();
    }

    let left_events = service.client.read_record(left).await.unwrap().events;
    let right_events = service.client.read_record(right).await.unwrap().events;

    assert_eq!(left_events.len(), 2);
    assert_eq!(right_events.len(), 1);
    assert_eq!(service.storage.entity_count(), 2);
}

#[tokio::test]
async fn malformed_request_is_rejected_with_client_error_status() {
    let service = TestService::start().await;

    let response = reqwest::Client::new()
        .post(format!("{}{STORE_RECORD_PATH}", service.endpoint()))
        .json(&json!({
            "entity_id": "95c6d7ef-58e1-4c32-a1c6-7a11cb63c759",
            "entity_type": "",
            "event_name": "ThingDoneToMyThing",
            "event_data": "{}",
        }))
        .send()
        .await
        .unwrap();

    assert!(response.status().is_client_error());
    assert_eq!(service.storage.record_count(), 0);
}

#[tokio::test]
async fn unreachable_service_surfaces_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = esto_client::Client::connect(&format!("http://{addr}")).unwrap();
    let (entity_type, event_name) = labels("Lost");
    let error = client
        .write(EntityId::generate(), entity_type, event_name, &json!({}))
        .await
        .unwrap_err();

    assert!(matches!(error, ClientError::Transport(_)));
}
