//! # Google People API adapter
//!
//! Implements [`ContactsService`] on top of the People API v1:
//!
//! * `people/me/connections` for the full listing, paged at the maximum size,
//! * `{resourceName}` for a single contact,
//! * `people:batchUpdateContacts` for batched updates with per-item status.
//!
//! Group filtering is done locally on the `memberships` of each person.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use nono_common::contact::{BatchEntry, BatchOutcome, Contact, ContactId, PhoneNumber};
use nono_common::error::ContactsError;
use nono_common::service::ContactsService;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Largest page the connections listing accepts. The default is 100.
pub const MAX_PAGE_SIZE: u32 = 1000;

const PERSON_FIELDS: &str = "names,phoneNumbers,memberships";
const UPDATE_MASK: &str = "phoneNumbers";
const READ_MASK: &str = "names,phoneNumbers";

pub struct PeopleApi {
    client: reqwest::Client,
    base: String,
    token: String,
}

impl PeopleApi {
    /// `base` is the API root, e.g. `https://people.googleapis.com`.
    pub fn new(base: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base, token)
    }

    pub fn with_client(client: reqwest::Client, base: impl Into<String>, token: impl Into<String>) -> Self {
        let base = base.into().trim_end_matches('/').to_string();
        Self {
            client,
            base,
            token: token.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1/{}", self.base, path)
    }

    async fn list_page(&self, page_token: Option<&str>) -> Result<ListConnectionsResponse, ContactsError> {
        let page_size = MAX_PAGE_SIZE.to_string();
        let mut query = vec![("personFields", PERSON_FIELDS), ("pageSize", page_size.as_str())];
        if let Some(token) = page_token {
            query.push(("pageToken", token));
        }

        let request = self
            .client
            .get(self.url("people/me/connections"))
            .bearer_auth(&self.token)
            .query(&query);
        send(request).await
    }
}

#[async_trait]
impl ContactsService for PeopleApi {
    async fn fetch_all_contacts(&self, group: Option<&str>) -> Result<Vec<Contact>, ContactsError> {
        let mut contacts = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let page = self.list_page(page_token.as_deref()).await?;
            debug!(count = page.connections.len(), "connections page received");

            contacts.extend(
                page.connections
                    .into_iter()
                    .map(Contact::from)
                    .filter(|c| group.is_none_or(|g| c.in_group(g))),
            );

            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(next) => page_token = Some(next),
                None => break,
            }
        }

        Ok(contacts)
    }

    async fn fetch_contact(&self, id: &ContactId) -> Result<Contact, ContactsError> {
        let request = self
            .client
            .get(self.url(id.as_str()))
            .bearer_auth(&self.token)
            .query(&[("personFields", PERSON_FIELDS)]);
        let person: Person = send(request).await?;
        Ok(person.into())
    }

    async fn submit_batch(&self, entries: &[BatchEntry]) -> Result<Vec<BatchOutcome>, ContactsError> {
        let body = BatchUpdateRequest {
            contacts: entries
                .iter()
                .map(|entry| (entry.contact.id.as_str(), PersonUpdate::from(&entry.contact)))
                .collect(),
            update_mask: UPDATE_MASK,
            read_mask: READ_MASK,
        };

        let request = self
            .client
            .post(self.url("people:batchUpdateContacts"))
            .bearer_auth(&self.token)
            .json(&body);
        let mut response: BatchUpdateResponse = send(request).await?;

        Ok(entries
            .iter()
            .map(|entry| {
                let result = response.update_result.remove(entry.contact.id.as_str());
                outcome(entry, result)
            })
            .collect())
    }
}

async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ContactsError> {
    let response = request
        .send()
        .await
        .map_err(|e| ContactsError::Transport(e.to_string()))?;
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ContactsError::Transport(e.to_string()))?;

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(ContactsError::Authentication(format!("{status}: {}", error_message(&body))));
    }
    if !status.is_success() {
        return Err(ContactsError::Transport(format!("{status}: {}", error_message(&body))));
    }

    serde_json::from_str(&body).map_err(|e| ContactsError::Malformed(e.to_string()))
}

/// Pulls `error.message` out of a Google error body, falling back to the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error.message)
        .unwrap_or_else(|| body.trim().to_string())
}

fn outcome(entry: &BatchEntry, result: Option<PersonResponse>) -> BatchOutcome {
    let (status_code, reason, name) = match result {
        Some(result) => {
            let code = result.status_code();
            let reason = result.reason(code);
            let name = result.person.and_then(|p| p.display_name());
            (code, reason, name)
        }
        None => (0, "no result returned".to_string(), None),
    };

    BatchOutcome {
        correlation_id: entry.correlation_id.clone(),
        contact_id: entry.contact.id.clone(),
        contact_name: name.unwrap_or_else(|| entry.contact.name.clone()),
        status_code,
        reason,
    }
}

// Wire types. Only the fields this tool reads or writes are modelled.

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListConnectionsResponse {
    #[serde(default)]
    connections: Vec<Person>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Person {
    resource_name: String,
    etag: Option<String>,
    #[serde(default)]
    names: Vec<Name>,
    #[serde(default)]
    phone_numbers: Vec<PhoneNumberDto>,
    #[serde(default)]
    memberships: Vec<Membership>,
}

impl Person {
    fn display_name(&self) -> Option<String> {
        self.names
            .iter()
            .find_map(|n| n.display_name.clone())
            .filter(|n| !n.is_empty())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Name {
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PhoneNumberDto {
    #[serde(default)]
    value: String,
    /// Free text or a canonical type (`mobile`, `home`, ...).
    #[serde(rename = "type")]
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Membership {
    contact_group_membership: Option<GroupMembership>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroupMembership {
    contact_group_resource_name: Option<String>,
}

impl From<Person> for Contact {
    fn from(person: Person) -> Self {
        let name = person
            .display_name()
            .unwrap_or_else(|| person.resource_name.clone());

        Contact {
            id: ContactId::new(person.resource_name),
            etag: person.etag,
            name,
            phone_numbers: person
                .phone_numbers
                .into_iter()
                .map(|p| PhoneNumber {
                    value: p.value,
                    label: p.kind,
                })
                .collect(),
            groups: person
                .memberships
                .into_iter()
                .filter_map(|m| m.contact_group_membership?.contact_group_resource_name)
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchUpdateRequest<'a> {
    contacts: BTreeMap<&'a str, PersonUpdate<'a>>,
    update_mask: &'static str,
    read_mask: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PersonUpdate<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    etag: Option<&'a str>,
    phone_numbers: Vec<PhoneNumberUpdate<'a>>,
}

#[derive(Debug, Serialize)]
struct PhoneNumberUpdate<'a> {
    value: &'a str,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    kind: Option<&'a str>,
}

impl<'a> From<&'a Contact> for PersonUpdate<'a> {
    fn from(contact: &'a Contact) -> Self {
        Self {
            etag: contact.etag.as_deref(),
            phone_numbers: contact
                .phone_numbers
                .iter()
                .map(|p| PhoneNumberUpdate {
                    value: &p.value,
                    kind: p.label.as_deref(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BatchUpdateResponse {
    #[serde(default)]
    update_result: HashMap<String, PersonResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersonResponse {
    person: Option<Person>,
    http_status_code: Option<u16>,
    status: Option<RpcStatus>,
}

impl PersonResponse {
    fn status_code(&self) -> u16 {
        if let Some(code) = self.http_status_code {
            return code;
        }
        match self.status.as_ref().and_then(|s| s.code) {
            None | Some(0) => 200,
            Some(_) => 500,
        }
    }

    fn reason(&self, code: u16) -> String {
        self.status
            .as_ref()
            .and_then(|s| s.message.clone())
            .filter(|m| !m.is_empty())
            .or_else(|| {
                StatusCode::from_u16(code)
                    .ok()
                    .and_then(|s| s.canonical_reason())
                    .map(str::to_string)
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct RpcStatus {
    code: Option<i32>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}
