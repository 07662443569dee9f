//! In-memory REST backend used by the crate's tests.
//!
//! Speaks the same paths, bodies and status codes as the real server for the
//! operations the client uses. Every request is recorded so tests can assert on
//! headers and on whether the network was touched at all.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::json;
use store::{
    MemoryStore, Person, PersonCreate, PersonUpdate, RecurringMeeting, RecurringMeetingCreate,
    RecurringMeetingUpdate, Report, ReportAttachment, ReportCreate, ReportParticipant,
    ReportUpdate,
};

use crate::auth::{Session, SessionManager};
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::middleware::AuthMiddleware;
use crate::models::{LoginResponse, UserInfo};
use crate::transport::{Body, HttpRequest, HttpResponse, Method, Transport};

pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "secret";
pub const TOKEN: &str = "tok-admin";

#[derive(Default)]
struct State {
    next_id: i64,
    token_valid: bool,
    persons: BTreeMap<i64, Person>,
    meetings: BTreeMap<i64, RecurringMeeting>,
    reports: BTreeMap<i64, Report>,
    downloads: HashMap<i64, Vec<u8>>,
}

impl State {
    fn id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Fake REST API. Clones share state.
#[derive(Clone, Default)]
pub struct FakeBackend {
    state: Rc<RefCell<State>>,
    requests: Rc<RefCell<Vec<HttpRequest>>>,
    offline: Rc<Cell<bool>>,
}

fn now() -> NaiveDateTime {
    store::models::datetime::parse("2024-05-07T09:00:00").expect("valid timestamp")
}

fn json_response<T: Serialize>(status: u16, value: &T) -> HttpResponse {
    let mut response = HttpResponse::new(status, serde_json::to_vec(value).unwrap_or_default());
    response.content_type = Some("application/json".to_string());
    response
}

fn detail(status: u16, message: &str) -> HttpResponse {
    json_response(status, &json!({ "detail": message }))
}

fn decode<T: serde::de::DeserializeOwned>(body: &Body) -> Result<T, HttpResponse> {
    match body {
        Body::Json(value) => serde_json::from_value(value.clone()).map_err(|e| {
            json_response(
                422,
                &json!({ "detail": [{ "loc": ["body"], "msg": e.to_string() }] }),
            )
        }),
        _ => Err(detail(422, "JSON body required")),
    }
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every request sent so far, in order.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    /// Make the server reject the current token from now on.
    pub fn expire_token(&self) {
        self.state.borrow_mut().token_valid = false;
    }

    /// Fail every request with a network error.
    pub fn set_offline(&self, offline: bool) {
        self.offline.set(offline);
    }

    fn authorized(&self, request: &HttpRequest) -> bool {
        let state = self.state.borrow();
        state.token_valid && request.bearer.as_deref() == Some(TOKEN)
    }

    fn route(&self, request: &HttpRequest) -> HttpResponse {
        let segments: Vec<&str> = request.path.trim_matches('/').split('/').collect();

        match (request.method, segments.as_slice()) {
            (Method::Post, ["auth", "login"]) => return self.login(request),
            (Method::Get, ["health"]) => return json_response(200, &json!({ "status": "healthy" })),
            _ => {}
        }
        if !self.authorized(request) {
            return detail(401, "Could not validate credentials");
        }

        let result = match (request.method, segments.as_slice()) {
            (Method::Post, ["auth", "logout"]) => {
                Ok(json_response(200, &json!({ "message": "Successfully logged out" })))
            }
            (Method::Get, ["auth", "me"]) => Ok(json_response(200, &user())),

            (Method::Get, ["persons"]) => Ok(self.list::<Person>(request, |s| s.persons.values().cloned().collect())),
            (Method::Post, ["persons"]) => self.create_person(&request.body),
            (Method::Get, ["persons", id]) => self.get(id, "Person", |s, id| s.persons.get(&id).cloned()),
            (Method::Put, ["persons", id]) => self.update_person(id, &request.body),
            (Method::Delete, ["persons", id]) => {
                self.remove(id, "Person", |s, id| s.persons.remove(&id).is_some())
            }

            (Method::Get, ["recurring-meetings"]) => {
                Ok(self.list::<RecurringMeeting>(request, |s| s.meetings.values().cloned().collect()))
            }
            (Method::Get, ["recurring-meetings", "leader", id]) => {
                let id = id.parse::<i64>().unwrap_or_default();
                let state = self.state.borrow();
                let meetings: Vec<&RecurringMeeting> = state
                    .meetings
                    .values()
                    .filter(|m| m.leader_person_id == id)
                    .collect();
                Ok(json_response(200, &meetings))
            }
            (Method::Post, ["recurring-meetings"]) => self.create_meeting(&request.body),
            (Method::Get, ["recurring-meetings", id]) => {
                self.get(id, "Recurring meeting", |s, id| s.meetings.get(&id).cloned())
            }
            (Method::Put, ["recurring-meetings", id]) => self.update_meeting(id, &request.body),
            (Method::Delete, ["recurring-meetings", id]) => {
                let id = id.parse::<i64>().unwrap_or_default();
                if self.state.borrow_mut().meetings.remove(&id).is_some() {
                    Ok(HttpResponse::new(204, Vec::new()))
                } else {
                    Err(detail(404, "Recurring meeting not found"))
                }
            }

            (Method::Get, ["reports"]) => Ok(self.list::<Report>(request, |s| s.reports.values().cloned().collect())),
            (Method::Post, ["reports"]) => self.create_report(&request.body),
            (Method::Get, ["reports", id]) => self.get(id, "Report", |s, id| s.reports.get(&id).cloned()),
            (Method::Put, ["reports", id]) => self.update_report(id, &request.body),
            (Method::Delete, ["reports", id]) => {
                self.remove(id, "Report", |s, id| s.reports.remove(&id).is_some())
            }
            (Method::Post, ["reports", id, "attachments"]) => self.upload(id, &request.body),
            (Method::Delete, ["reports", report_id, "attachments", id]) => {
                self.delete_attachment(report_id, id)
            }
            (Method::Get, ["reports", _, "attachments", id, "download"]) => {
                let id = id.parse::<i64>().unwrap_or_default();
                match self.state.borrow().downloads.get(&id) {
                    Some(bytes) => {
                        let mut response = HttpResponse::new(200, bytes.clone());
                        response.content_type = Some("application/pdf".to_string());
                        Ok(response)
                    }
                    None => Err(detail(404, "Attachment not found")),
                }
            }
            _ => Err(detail(404, "Not Found")),
        };
        result.unwrap_or_else(|response| response)
    }

    fn login(&self, request: &HttpRequest) -> HttpResponse {
        let credentials: crate::models::LoginRequest = match decode(&request.body) {
            Ok(c) => c,
            Err(response) => return response,
        };
        if credentials.username != USERNAME || credentials.password != PASSWORD {
            return detail(401, "Invalid username or password");
        }
        self.state.borrow_mut().token_valid = true;
        json_response(
            200,
            &LoginResponse {
                access_token: TOKEN.to_string(),
                token_type: "bearer".to_string(),
                user_info: user(),
            },
        )
    }

    fn list<T: Serialize>(&self, request: &HttpRequest, all: impl Fn(&State) -> Vec<T>) -> HttpResponse {
        let query = |key: &str| {
            request
                .query
                .iter()
                .find(|(k, _)| k == key)
                .and_then(|(_, v)| v.parse::<usize>().ok())
        };
        let skip = query("skip").unwrap_or(0);
        let limit = query("limit").unwrap_or(100);
        let items: Vec<T> = all(&self.state.borrow()).into_iter().skip(skip).take(limit).collect();
        json_response(200, &items)
    }

    fn get<T: Serialize>(
        &self,
        id: &str,
        kind: &str,
        find: impl Fn(&State, i64) -> Option<T>,
    ) -> Result<HttpResponse, HttpResponse> {
        let id = id.parse::<i64>().unwrap_or_default();
        find(&self.state.borrow(), id)
            .map(|item| json_response(200, &item))
            .ok_or_else(|| detail(404, &format!("{kind} not found")))
    }

    fn remove(
        &self,
        id: &str,
        kind: &str,
        remove: impl Fn(&mut State, i64) -> bool,
    ) -> Result<HttpResponse, HttpResponse> {
        let id = id.parse::<i64>().unwrap_or_default();
        if remove(&mut self.state.borrow_mut(), id) {
            Ok(json_response(200, &json!({ "message": format!("{kind} deleted successfully") })))
        } else {
            Err(detail(404, &format!("{kind} not found")))
        }
    }

    fn create_person(&self, body: &Body) -> Result<HttpResponse, HttpResponse> {
        let payload: PersonCreate = decode(body)?;
        let mut state = self.state.borrow_mut();
        let id = state.id();
        let person = Person {
            id,
            first_name: payload.first_name,
            last_name: payload.last_name,
            birth_date: payload.birth_date,
            phone: payload.phone,
            home_address: payload.home_address,
            google_maps_link: payload.google_maps_link,
            created_at: now(),
            updated_at: now(),
        };
        state.persons.insert(id, person.clone());
        Ok(json_response(200, &person))
    }

    fn update_person(&self, id: &str, body: &Body) -> Result<HttpResponse, HttpResponse> {
        let patch: PersonUpdate = decode(body)?;
        let id = id.parse::<i64>().unwrap_or_default();
        let mut state = self.state.borrow_mut();
        let person = state
            .persons
            .get_mut(&id)
            .ok_or_else(|| detail(404, "Person not found"))?;
        if let Some(v) = patch.first_name {
            person.first_name = v;
        }
        if let Some(v) = patch.last_name {
            person.last_name = v;
        }
        if let Some(v) = patch.birth_date {
            person.birth_date = v;
        }
        if let Some(v) = patch.phone {
            person.phone = v;
        }
        if let Some(v) = patch.home_address {
            person.home_address = v;
        }
        if patch.google_maps_link.is_some() {
            person.google_maps_link = patch.google_maps_link;
        }
        Ok(json_response(200, &*person))
    }

    fn create_meeting(&self, body: &Body) -> Result<HttpResponse, HttpResponse> {
        let payload: RecurringMeetingCreate = decode(body)?;
        let mut state = self.state.borrow_mut();
        let leader = state
            .persons
            .get(&payload.leader_person_id)
            .cloned()
            .ok_or_else(|| detail(400, "Leader person not found"))?;
        let id = state.id();
        let meeting = RecurringMeeting {
            id,
            meeting_datetime: payload.meeting_datetime,
            leader_person_id: payload.leader_person_id,
            report_type: payload.report_type,
            location: payload.location,
            description: payload.description,
            periodicity: payload.periodicity,
            google_maps_link: payload.google_maps_link,
            created_at: now(),
            updated_at: now(),
            leader: Some(leader),
        };
        state.meetings.insert(id, meeting.clone());
        Ok(json_response(201, &meeting))
    }

    fn update_meeting(&self, id: &str, body: &Body) -> Result<HttpResponse, HttpResponse> {
        let patch: RecurringMeetingUpdate = decode(body)?;
        let id = id.parse::<i64>().unwrap_or_default();
        let mut state = self.state.borrow_mut();
        let meeting = state
            .meetings
            .get_mut(&id)
            .ok_or_else(|| detail(404, "Recurring meeting not found"))?;
        if let Some(v) = patch.meeting_datetime {
            meeting.meeting_datetime = v;
        }
        if let Some(v) = patch.location {
            meeting.location = v;
        }
        if let Some(v) = patch.periodicity {
            meeting.periodicity = v;
        }
        if let Some(v) = patch.report_type {
            meeting.report_type = v;
        }
        if patch.description.is_some() {
            meeting.description = patch.description;
        }
        Ok(json_response(200, &*meeting))
    }

    fn create_report(&self, body: &Body) -> Result<HttpResponse, HttpResponse> {
        let payload: ReportCreate = decode(body)?;
        let mut state = self.state.borrow_mut();
        let id = state.id();
        let participants = payload
            .participants
            .into_iter()
            .map(|p| ReportParticipant {
                id: state.id(),
                report_id: Some(id),
                participant_name: p.participant_name,
                participant_type: p.participant_type,
                created_at: now(),
                updated_at: now(),
            })
            .collect();
        let report = Report {
            id,
            registration_date: payload.registration_date,
            meeting_datetime: payload.meeting_datetime,
            recurring_meeting_id: payload.recurring_meeting_id,
            leader_person_id: payload.leader_person_id,
            leader_phone: payload.leader_phone,
            collaborator: payload.collaborator,
            location: payload.location,
            collection_amount: payload.collection_amount,
            currency: payload.currency,
            attendees_count: payload.attendees_count,
            google_maps_link: payload.google_maps_link,
            created_at: now(),
            updated_at: now(),
            recurring_meeting: None,
            leader: None,
            participants,
            attachments: Vec::new(),
        };
        state.reports.insert(id, report.clone());
        Ok(json_response(200, &report))
    }

    fn update_report(&self, id: &str, body: &Body) -> Result<HttpResponse, HttpResponse> {
        let patch: ReportUpdate = decode(body)?;
        let id = id.parse::<i64>().unwrap_or_default();
        let mut state = self.state.borrow_mut();
        if !state.reports.contains_key(&id) {
            return Err(detail(404, "Report not found"));
        }
        let participants = patch.participants.map(|list| {
            list.into_iter()
                .map(|p| ReportParticipant {
                    id: state.id(),
                    report_id: Some(id),
                    participant_name: p.participant_name,
                    participant_type: p.participant_type,
                    created_at: now(),
                    updated_at: now(),
                })
                .collect::<Vec<_>>()
        });
        let report = state
            .reports
            .get_mut(&id)
            .ok_or_else(|| detail(404, "Report not found"))?;
        if let Some(v) = patch.attendees_count {
            report.attendees_count = v;
        }
        if let Some(v) = patch.collection_amount {
            report.collection_amount = v;
        }
        if let Some(v) = patch.currency {
            report.currency = v;
        }
        if let Some(v) = patch.location {
            report.location = v;
        }
        if let Some(v) = participants {
            report.participants = v;
        }
        Ok(json_response(200, &*report))
    }

    fn upload(&self, report_id: &str, body: &Body) -> Result<HttpResponse, HttpResponse> {
        let Body::File(file) = body else {
            return Err(json_response(
                422,
                &json!({ "detail": [{ "loc": ["body", "file"], "msg": "field required" }] }),
            ));
        };
        let report_id = report_id.parse::<i64>().unwrap_or_default();
        let mut state = self.state.borrow_mut();
        if !state.reports.contains_key(&report_id) {
            return Err(detail(404, "Report not found"));
        }
        let id = state.id();
        let attachment = ReportAttachment {
            id,
            report_id: Some(report_id),
            file_name: file.name.clone(),
            file_key: format!("reports/{report_id}/{}", file.name),
            file_size: file.size(),
            content_type: file.content_type.clone(),
            created_at: now(),
            updated_at: now(),
        };
        state.downloads.insert(id, file.bytes.clone());
        if let Some(report) = state.reports.get_mut(&report_id) {
            report.attachments.push(attachment);
        }
        Ok(json_response(
            200,
            &json!({ "message": "File uploaded successfully", "attachment_id": id }),
        ))
    }

    fn delete_attachment(&self, report_id: &str, id: &str) -> Result<HttpResponse, HttpResponse> {
        let report_id = report_id.parse::<i64>().unwrap_or_default();
        let id = id.parse::<i64>().unwrap_or_default();
        let mut state = self.state.borrow_mut();
        let report = state
            .reports
            .get_mut(&report_id)
            .ok_or_else(|| detail(404, "Attachment not found"))?;
        let before = report.attachments.len();
        report.attachments.retain(|a| a.id != id);
        if report.attachments.len() == before {
            return Err(detail(404, "Attachment not found"));
        }
        Ok(json_response(200, &json!({ "message": "Attachment deleted successfully" })))
    }
}

impl Transport for FakeBackend {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.borrow_mut().push(request.clone());
        if self.offline.get() {
            return Err(ApiError::Network("connection refused".to_string()));
        }
        Ok(self.route(&request))
    }
}

pub fn user() -> UserInfo {
    UserInfo {
        username: USERNAME.to_string(),
        email: Some("admin@example.org".to_string()),
        attributes: BTreeMap::from([("name".to_string(), "Admin User".to_string())]),
    }
}

/// Everything a test needs, wired the way the app wires it.
pub struct Harness {
    pub backend: FakeBackend,
    pub store: MemoryStore,
    pub client: ApiClient<AuthMiddleware<FakeBackend, MemoryStore>>,
    pub manager: SessionManager<AuthMiddleware<FakeBackend, MemoryStore>, MemoryStore>,
    pub redirects: Rc<Cell<usize>>,
}

impl Harness {
    pub fn new() -> Self {
        let backend = FakeBackend::new();
        let store = MemoryStore::new();
        let redirects = Rc::new(Cell::new(0));
        let counter = Rc::clone(&redirects);
        let middleware = AuthMiddleware::new(
            backend.clone(),
            Session::new(store.clone()),
            Rc::new(move || counter.set(counter.get() + 1)),
        );
        let client = ApiClient::new(middleware);
        let manager = SessionManager::new(client.clone(), Session::new(store.clone()));
        Self {
            backend,
            store,
            client,
            manager,
            redirects,
        }
    }

    /// Harness with a logged-in session.
    pub async fn logged_in() -> Self {
        let harness = Self::new();
        let _ = harness
            .manager
            .login(&crate::models::LoginRequest::new(USERNAME, PASSWORD))
            .await;
        harness
    }

    pub fn session(&self) -> Session<MemoryStore> {
        Session::new(self.store.clone())
    }
}
