//! Parameter shapes and result decoding of the service methods.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use serde_json::json;
use webmail::calendar::{Attendee, AttendeeRole, PartStatus, PartStatusResponse};
use webmail::changes::{ChangeType, ItemType, SyncKey};
use webmail::contacts::Contact;
use webmail::filters::{FilterAction, FilterActionType, FilterCondition, FilterRule};
use webmail::im::{ContactId, ConversationId, Message};
use webmail::tasks::Task;
use webmail::{Client, KId, SearchQuery, UtcDateTime, Watermark};
use webmail_rpc::testing::{MockResponse, MockServer};

async fn setup() -> (MockServer, Client) {
    let server = MockServer::start().await.unwrap();
    let client = Client::new(server.config()).unwrap();
    (server, client)
}

#[tokio::test]
async fn test_batch_create_partial_failure() {
    let (server, client) = setup().await;
    server.push_result(json!({
        "errors": [{
            "inputIndex": 1,
            "code": 4001,
            "message": "Invalid address %1",
            "messageParameters": {"positionalParameters": ["not-an-address"], "plurality": 1}
        }],
        "result": [
            {"inputIndex": 0, "id": "c-100", "watermark": 11},
            {"inputIndex": 2, "id": "c-102", "watermark": 12}
        ]
    }));

    let folder = KId::new("contacts");
    let contacts = vec![
        Contact::new(folder.clone(), "Ada", "Lovelace", "ada@example.com"),
        Contact::new(folder.clone(), "Bad", "Input", "not-an-address"),
        Contact::new(folder, "Alan", "Turing", "alan@example.com"),
    ];
    let outcome = client.contacts().create(&contacts).await.unwrap();

    assert!(!outcome.is_complete());
    assert_eq!(outcome.failed_indices(), vec![1]);
    assert_eq!(outcome.error_for(1).unwrap().render(), "Invalid address not-an-address");
    assert_eq!(outcome.created(0).unwrap().id.as_str(), "c-100");
    assert_eq!(outcome.created(2).unwrap().watermark, Watermark(12));
    assert!(outcome.created(1).is_none());

    let params = server.last_request().unwrap().params().cloned().unwrap();
    assert_eq!(params["contacts"].as_array().unwrap().len(), 3);
    assert_eq!(params["contacts"][1]["emailAddresses"][0]["address"], "not-an-address");
}

#[tokio::test]
async fn test_folder_listing_params() {
    let (server, client) = setup().await;
    server.push_result(json!({"list": [{"id": "t1", "summary": "Ship"}], "totalItems": 40}));

    let query = SearchQuery::new().fields(["id", "summary"]).page(0, 1);
    let page = client
        .tasks()
        .get(&[KId::new("tasks-folder")], &query)
        .await
        .unwrap();
    assert_eq!(page.total_items, 40);
    assert_eq!(page.list[0].summary, "Ship");

    let request = server.last_request().unwrap();
    assert_eq!(request.rpc_method(), Some("Tasks.get"));
    let params = request.params().unwrap();
    assert_eq!(params["folderIds"], json!(["tasks-folder"]));
    assert_eq!(params["query"]["fields"], json!(["id", "summary"]));
    assert_eq!(params["query"]["limit"], 1);
}

#[tokio::test]
async fn test_events_get_uses_ids_key() {
    let (server, client) = setup().await;
    server.push_result(json!({"list": [], "totalItems": 0}));

    client
        .events()
        .get(&[KId::new("cal")], &SearchQuery::new())
        .await
        .unwrap();

    let params = server.last_request().unwrap().params().cloned().unwrap();
    assert_eq!(params["ids"], json!(["cal"]));
    assert_eq!(params["query"]["limit"], -1);
    assert!(params.get("folderIds").is_none());
}

#[tokio::test]
async fn test_move_and_copy_params() {
    let (server, client) = setup().await;
    server.push_result(json!({"errors": [], "result": [{"inputIndex": 0, "id": "n2"}]}));
    server.push_result(json!({"errors": [], "result": []}));

    let ids = [KId::new("n1")];
    let moved = client
        .notes()
        .move_to(&ids, &KId::new("archive"))
        .await
        .unwrap();
    assert_eq!(moved.created(0).unwrap().id.as_str(), "n2");
    client.mails().copy(&ids, &KId::new("archive")).await.unwrap();

    let requests = server.requests();
    assert_eq!(requests[0].rpc_method(), Some("Notes.move"));
    assert_eq!(requests[1].rpc_method(), Some("Mails.copy"));
    for request in &requests {
        assert_eq!(request.params(), Some(&json!({"ids": ["n1"], "folder": "archive"})));
    }
}

#[tokio::test]
async fn test_remove_returns_item_errors() {
    let (server, client) = setup().await;
    server.push_result(json!({"errors": [{"inputIndex": 0, "code": 1000, "message": "Not found"}]}));

    let errors = client.tasks().remove(&[KId::new("gone")]).await.unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].render(), "Not found");
}

#[tokio::test]
async fn test_set_part_status() {
    let (server, client) = setup().await;
    server.push_result(json!({}));

    let response = PartStatusResponse {
        status: PartStatus::Accepted,
        message: "See you".to_string(),
    };
    client
        .occurrences()
        .set_part_status(&KId::new("occ-1"), &response)
        .await
        .unwrap();

    assert_eq!(
        server.last_request().unwrap().params(),
        Some(&json!({"id": "occ-1", "response": {"status": "PartAccepted", "message": "See you"}}))
    );
}

#[tokio::test]
async fn test_task_create_with_attendee() {
    let (server, client) = setup().await;
    server.push_result(json!({"result": [{"inputIndex": 0, "id": "t9", "watermark": 1}]}));

    let mut task = Task::new(KId::new("tasks"), "Review");
    task.attendees
        .push(Attendee::new("boss@example.com", AttendeeRole::RequiredAttendee));
    let outcome = client.tasks().create(&[task]).await.unwrap();
    assert!(outcome.is_complete());

    let params = server.last_request().unwrap().params().cloned().unwrap();
    assert_eq!(params["tasks"][0]["attendees"][0]["role"], "RoleRequiredAttendee");
}

#[tokio::test]
async fn test_changes_long_poll() {
    let (server, client) = setup().await;
    server.push(
        MockResponse::result(json!({
            "list": [{"type": "chtNewMail", "itemType": "itMail", "itemId": "m1"}],
            "syncKey": {"id": 1, "version": 1, "watermark": 101, "publicFolder": 0}
        }))
        .with_delay(Duration::from_millis(200)),
    );

    let last = SyncKey {
        watermark: Watermark(100),
        ..SyncKey::default()
    };
    let changes = client.changes().get(&last, 30).await.unwrap();
    assert_eq!(changes.list.len(), 1);
    assert_eq!(changes.list[0].kind, ChangeType::NewMail);
    assert_eq!(changes.sync_key.watermark, Watermark(101));

    let params = server.last_request().unwrap().params().cloned().unwrap();
    assert_eq!(params["timeout"], 30);
    assert_eq!(params["lastSyncKey"]["watermark"], 100);
}

#[tokio::test]
async fn test_changes_with_unknown_kinds() {
    let (server, client) = setup().await;
    server.push_result(json!({
        "list": [
            {"type": "chtArchived", "itemType": "itMail", "itemId": "m7"},
            {"type": "chtModified", "itemType": "itBoard", "itemId": "b1", "folderId": null}
        ],
        "syncKey": {"id": 1, "version": 1, "watermark": 102, "publicFolder": 0}
    }));

    let changes = client.changes().get(&SyncKey::default(), 5).await.unwrap();
    assert_eq!(changes.list.len(), 2);
    assert_eq!(changes.list[0].kind, ChangeType::Unknown);
    assert_eq!(changes.list[0].item_type, ItemType::Mail);
    assert_eq!(changes.list[1].kind, ChangeType::Modified);
    assert_eq!(changes.list[1].item_type, ItemType::Unknown);
    assert_eq!(changes.sync_key.watermark, Watermark(102));
}

#[tokio::test]
async fn test_null_members_read_as_empty() {
    let (server, client) = setup().await;
    server.push_result(json!({
        "errors": null,
        "result": [{"inputIndex": 0, "id": "t-1", "watermark": 3}]
    }));
    server.push_result(json!({"list": null, "totalItems": null}));

    let task = Task::new(KId::new("tasks"), "Water plants");
    let outcome = client.tasks().create(&[task]).await.unwrap();
    assert!(outcome.is_complete());
    assert_eq!(outcome.created(0).unwrap().id.as_str(), "t-1");

    let page = client
        .tasks()
        .get(&[KId::new("tasks")], &SearchQuery::default())
        .await
        .unwrap();
    assert!(page.list.is_empty());
    assert_eq!(page.total_items, 0);
}

#[tokio::test]
async fn test_error_with_null_members_keeps_code() {
    let (server, client) = setup().await;
    server.push(MockResponse::raw(
        r#"{"jsonrpc":"2.0","id":1,"error":{"code":1002,"message":"No such entity","data":{"messageParameters":{"positionalParameters":null,"plurality":null}}}}"#,
    ));
    server.push(MockResponse::raw(
        r#"{"jsonrpc":"2.0","id":2,"error":{"code":1004,"message":null}}"#,
    ));

    let err = client.mails().get_by_id(&[KId::new("m-9")]).await.unwrap_err();
    assert_eq!(err.code(), Some(webmail::ErrorCode::NoSuchEntity));
    assert_eq!(err.as_remote().unwrap().message, "No such entity");

    let err = client.folders().get().await.unwrap_err();
    assert_eq!(err.code(), Some(webmail::ErrorCode::AccessDenied));
}

#[tokio::test]
async fn test_filters_data_stamp() {
    let (server, client) = setup().await;
    server.push_result(json!({"dataStamp": 7, "filters": []}));
    server.push_result(json!({"newDataStamp": 8}));

    let current = client.filters().get().await.unwrap();
    assert_eq!(current.data_stamp, 7);

    let rule = FilterRule {
        is_enabled: true,
        conditions: vec![FilterCondition::all()],
        actions: vec![FilterAction::new(FilterActionType::SetReadFlag, Vec::<String>::new())],
        ..FilterRule::default()
    };
    let stamp = client
        .filters()
        .set(current.data_stamp, &[rule])
        .await
        .unwrap();
    assert_eq!(stamp, 8);

    let params = server.last_request().unwrap().params().cloned().unwrap();
    assert_eq!(params["currentDataStamp"], 7);
    assert_eq!(params["filters"][0]["actions"][0]["type"], "FaSetReadFlag");
}

#[tokio::test]
async fn test_free_busy_sequences() {
    let (server, client) = setup().await;
    server.push_result(json!({"list": [
        [{"status": "Busy", "start": "20250101T090000+0000", "end": "20250101T100000+0000"}],
        []
    ]}));

    let addresses = ["a@example.com".to_string(), "b@example.com".to_string()];
    let list = client
        .free_busy()
        .get(
            &addresses,
            &UtcDateTime::new("20250101T000000+0000"),
            &UtcDateTime::new("20250102T000000+0000"),
        )
        .await
        .unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].len(), 1);
    assert!(list[1].is_empty());
}

#[tokio::test]
async fn test_im_lowercase_interface() {
    let (server, client) = setup().await;
    server.push_result(json!({"conversation": {"conversationId": 5, "contacts": ["a@example.com"]}}));
    server.push_result(json!({"messageId": 12, "time": "20250101T120000+0000"}));

    let conversation = client
        .im()
        .create_conversation(&[ContactId::from("a@example.com")])
        .await
        .unwrap();
    assert_eq!(conversation.conversation_id, ConversationId(5));

    let (id, time) = client
        .im()
        .send_message(&Message::text(conversation.conversation_id, "hello"), true)
        .await
        .unwrap();
    assert_eq!(id.0, 12);
    assert_eq!(time.as_str(), "20250101T120000+0000");

    let methods: Vec<_> = server
        .requests()
        .iter()
        .filter_map(|r| r.rpc_method().map(ToString::to_string))
        .collect();
    assert_eq!(methods, vec!["im.createConversation", "im.sendMessage"]);
}

#[tokio::test]
async fn test_remote_error_surfaces() {
    let (server, client) = setup().await;
    server.push(MockResponse::error(1004, "Access denied"));

    let err = client.folders().get().await.unwrap_err();
    assert_eq!(err.code(), Some(webmail::ErrorCode::AccessDenied));
    assert_eq!(err.as_remote().unwrap().message, "Access denied");
}
