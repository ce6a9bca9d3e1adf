#![cfg(test)]
use nono_common::config::Rules;
use nono_common::contact::{BatchEntry, Contact, ContactId, PhoneNumber};
use nono_common::error::ContactsError;
use nono_common::service::ContactsService;
use nono_core::people::PeopleApi;
use nono_core::scanner::ContactScanner;
use nono_core::testing::ScriptedConfirm;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "test-token";

fn person(id: &str, name: &str, numbers: &[&str]) -> Value {
    json!({
        "resourceName": id,
        "etag": format!("etag-{id}"),
        "names": [{ "displayName": name }],
        "phoneNumbers": numbers.iter().map(|n| json!({ "value": n })).collect::<Vec<_>>(),
        "memberships": [
            { "contactGroupMembership": { "contactGroupResourceName": "contactGroups/myContacts" } }
        ]
    })
}

async fn mount_connections(server: &MockServer, people: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path("/v1/people/me/connections"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "connections": people })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn listing_follows_every_page_at_max_size() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/people/me/connections"))
        .and(query_param("pageToken", "page-2"))
        .and(query_param("pageSize", "1000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "connections": [person("people/c2", "Bia", &["1188887777"])]
        })))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/people/me/connections"))
        .and(query_param("pageSize", "1000"))
        .and(query_param("personFields", "names,phoneNumbers,memberships"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "connections": [person("people/c1", "Ana", &["1199998877"])],
            "nextPageToken": "page-2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = PeopleApi::new(server.uri(), TOKEN);
    let contacts = api.fetch_all_contacts(None).await.unwrap();

    let names: Vec<&str> = contacts.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Ana", "Bia"]);
    assert_eq!(contacts[0].etag.as_deref(), Some("etag-people/c1"));
}

#[tokio::test]
async fn group_filter_is_applied_locally() {
    let server = MockServer::start().await;
    let outsider = json!({
        "resourceName": "people/c3",
        "names": [{ "displayName": "Other" }],
        "phoneNumbers": [{ "value": "1199998877" }]
    });
    mount_connections(&server, vec![person("people/c1", "Ana", &[]), outsider]).await;

    let api = PeopleApi::new(server.uri(), TOKEN);

    let mine = api
        .fetch_all_contacts(Some("contactGroups/myContacts"))
        .await
        .unwrap();
    let all = api.fetch_all_contacts(None).await.unwrap();

    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].name, "Ana");
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn rejected_token_is_an_authentication_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "code": 401, "message": "Request had invalid authentication credentials.", "status": "UNAUTHENTICATED" }
        })))
        .mount(&server)
        .await;

    let api = PeopleApi::new(server.uri(), "expired");
    let err = api.fetch_all_contacts(None).await.unwrap_err();

    assert!(err.is_authentication());
    assert!(err.to_string().contains("invalid authentication credentials"));
}

#[tokio::test]
async fn server_errors_are_transport_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("backend unavailable"))
        .mount(&server)
        .await;

    let api = PeopleApi::new(server.uri(), TOKEN);
    let err = api.fetch_contact(&ContactId::new("people/c1")).await.unwrap_err();

    match err {
        ContactsError::Transport(message) => assert!(message.contains("backend unavailable")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn garbage_bodies_are_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let api = PeopleApi::new(server.uri(), TOKEN);
    let err = api.fetch_all_contacts(None).await.unwrap_err();

    assert!(matches!(err, ContactsError::Malformed(_)));
}

#[tokio::test]
async fn single_contact_by_resource_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/people/c1"))
        .and(query_param("personFields", "names,phoneNumbers,memberships"))
        .respond_with(ResponseTemplate::new(200).set_body_json(person("people/c1", "Ana", &["1199998877"])))
        .expect(1)
        .mount(&server)
        .await;

    let api = PeopleApi::new(server.uri(), TOKEN);
    let contact = api.fetch_contact(&ContactId::new("people/c1")).await.unwrap();

    assert_eq!(contact.name, "Ana");
    assert_eq!(contact.phone_numbers, vec![PhoneNumber::new("1199998877")]);
}

#[tokio::test]
async fn batch_outcomes_follow_submission_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/people:batchUpdateContacts"))
        .and(body_partial_json(json!({
            "updateMask": "phoneNumbers",
            "contacts": {
                "people/c1": { "etag": "e1", "phoneNumbers": [{ "value": "11999998877" }] }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "updateResult": {
                "people/c2": {
                    "httpStatusCode": 400,
                    "status": { "code": 9, "message": "etag mismatch" }
                },
                "people/c1": {
                    "person": person("people/c1", "Ana Souza", &["11999998877"]),
                    "httpStatusCode": 200
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut ana = Contact::new("people/c1", "Ana").with_phone(PhoneNumber::new("11999998877"));
    ana.etag = Some("e1".into());
    let bia = Contact::new("people/c2", "Bia").with_phone(PhoneNumber::new("11988887777"));
    let caio = Contact::new("people/c3", "Caio");
    let entries: Vec<BatchEntry> = [ana, bia, caio].into_iter().map(BatchEntry::update).collect();

    let api = PeopleApi::new(server.uri(), TOKEN);
    let outcomes = api.submit_batch(&entries).await.unwrap();

    let summary: Vec<(&str, &str, u16, &str)> = outcomes
        .iter()
        .map(|o| {
            (
                o.correlation_id.as_str(),
                o.contact_name.as_str(),
                o.status_code,
                o.reason.as_str(),
            )
        })
        .collect();
    assert_eq!(
        summary,
        vec![
            ("update", "Ana Souza", 200, "OK"),
            ("update", "Bia", 400, "etag mismatch"),
            ("update", "Caio", 0, "no result returned"),
        ]
    );
}

#[tokio::test]
async fn scan_round_trip_over_http() {
    let server = MockServer::start().await;
    mount_connections(
        &server,
        vec![
            person("people/c1", "Maria Silva", &["1199998877", "1144445555"]),
            person("people/c2", "Ok Already", &["11999998877"]),
        ],
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/v1/people/c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(person(
            "people/c1",
            "Maria Silva",
            &["1199998877", "1144445555"],
        )))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/people:batchUpdateContacts"))
        .and(body_partial_json(json!({
            "contacts": {
                "people/c1": {
                    "etag": "etag-people/c1",
                    "phoneNumbers": [{ "value": "11999998877" }, { "value": "1144445555" }]
                }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "updateResult": { "people/c1": { "httpStatusCode": 200 } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = PeopleApi::new(server.uri(), TOKEN);
    let confirm = ScriptedConfirm::default();
    let rules = Rules::default();

    let report = ContactScanner::new(&api, &confirm, &rules).run().await.unwrap();

    assert_eq!(report.total_contacts, 2);
    assert_eq!(report.queued_contacts, 1);
    assert_eq!(report.outcomes.len(), 1);
    assert!(report.outcomes[0].is_success());
}
