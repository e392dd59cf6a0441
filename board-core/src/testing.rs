//! Подделки транспорта и экрана для тестов контроллеров.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Notify;

use crate::board::Board;
use crate::client::{ApiClient, Method, RawResponse, Transport};
use crate::error::{ApiError, ApiResult};
use crate::form::PostForm;
use crate::models::{Post, SessionState};
use crate::pagination::Pagination;
use crate::storage::MemoryTokenStore;
use crate::view::{BoardView, PostTable, Route};

#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) body: Option<Value>,
    pub(crate) token: Option<String>,
}

enum Reply {
    Response(RawResponse),
    NoResponse,
}

#[derive(Default)]
pub(crate) struct FakeTransport {
    replies: Mutex<HashMap<String, VecDeque<Reply>>>,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

fn route_key(method: Method, path: &str) -> String {
    format!("{} {path}", method.as_str())
}

impl FakeTransport {
    pub(crate) fn respond(&self, method: Method, path: &str, status: u16, body: &str) {
        self.push(
            method,
            path,
            Reply::Response(RawResponse {
                status,
                body: body.to_string(),
            }),
        );
    }

    pub(crate) fn fail(&self, method: Method, path: &str) {
        self.push(method, path, Reply::NoResponse);
    }

    /// Ответ на маршрут будет отдан только после `notify_one()`.
    pub(crate) fn gate(&self, method: Method, path: &str) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.gates
            .lock()
            .expect("gates mutex poisoned")
            .insert(route_key(method, path), notify.clone());
        notify
    }

    pub(crate) fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("calls mutex poisoned").clone()
    }

    pub(crate) fn count(&self, method: Method, path: &str) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.method == method && call.path == path)
            .count()
    }

    fn push(&self, method: Method, path: &str, reply: Reply) {
        self.replies
            .lock()
            .expect("replies mutex poisoned")
            .entry(route_key(method, path))
            .or_default()
            .push_back(reply);
    }
}

#[async_trait(?Send)]
impl Transport for FakeTransport {
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        token: Option<&str>,
    ) -> ApiResult<RawResponse> {
        let key = route_key(method, path);
        self.calls
            .lock()
            .expect("calls mutex poisoned")
            .push(RecordedCall {
                method,
                path: path.to_string(),
                body: body.cloned(),
                token: token.map(str::to_string),
            });

        let gate = self
            .gates
            .lock()
            .expect("gates mutex poisoned")
            .get(&key)
            .cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let reply = self
            .replies
            .lock()
            .expect("replies mutex poisoned")
            .get_mut(&key)
            .and_then(VecDeque::pop_front);

        match reply {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::NoResponse) => Err(ApiError::Network("connection refused".to_string())),
            None => Err(ApiError::Network(format!("no fake reply for {key}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ViewEvent {
    Session(SessionState),
    User(String),
    Posts(PostTable),
    Pagination(Option<Pagination>),
    Details(Post),
    DetailsHidden,
    Form(PostForm),
    Notify(String),
    Error(String),
    Failure(String),
    Confirm(String),
    Navigate(Route),
}

pub(crate) struct RecordingView {
    events: RefCell<Vec<ViewEvent>>,
    confirm_answer: Cell<bool>,
}

impl Default for RecordingView {
    fn default() -> Self {
        Self {
            events: RefCell::new(Vec::new()),
            confirm_answer: Cell::new(true),
        }
    }
}

impl RecordingView {
    pub(crate) fn answer_confirm(&self, answer: bool) {
        self.confirm_answer.set(answer);
    }

    pub(crate) fn events(&self) -> Vec<ViewEvent> {
        self.events.borrow().clone()
    }

    pub(crate) fn tables(&self) -> Vec<PostTable> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ViewEvent::Posts(table) => Some(table),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn paginations(&self) -> Vec<Option<Pagination>> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ViewEvent::Pagination(pagination) => Some(pagination),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn notifications(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ViewEvent::Notify(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn errors(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ViewEvent::Error(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn failures(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ViewEvent::Failure(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    fn record(&self, event: ViewEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl BoardView for RecordingView {
    fn show_session(&self, session: &SessionState) {
        self.record(ViewEvent::Session(session.clone()));
    }

    fn show_user(&self, user_id: &str) {
        self.record(ViewEvent::User(user_id.to_string()));
    }

    fn render_posts(&self, table: &PostTable) {
        self.record(ViewEvent::Posts(table.clone()));
    }

    fn render_pagination(&self, pagination: Option<&Pagination>) {
        self.record(ViewEvent::Pagination(pagination.cloned()));
    }

    fn show_post_details(&self, post: &Post) {
        self.record(ViewEvent::Details(post.clone()));
    }

    fn hide_post_details(&self) {
        self.record(ViewEvent::DetailsHidden);
    }

    fn render_form(&self, form: &PostForm) {
        self.record(ViewEvent::Form(form.clone()));
    }

    fn notify(&self, message: &str) {
        self.record(ViewEvent::Notify(message.to_string()));
    }

    fn report_error(&self, message: &str) {
        self.record(ViewEvent::Error(message.to_string()));
    }

    fn log_failure(&self, message: &str) {
        self.record(ViewEvent::Failure(message.to_string()));
    }

    fn confirm(&self, message: &str) -> bool {
        self.record(ViewEvent::Confirm(message.to_string()));
        self.confirm_answer.get()
    }

    fn navigate(&self, route: Route) {
        self.record(ViewEvent::Navigate(route));
    }
}

pub(crate) type TestBoard = Board<FakeTransport, RecordingView>;

pub(crate) fn board() -> TestBoard {
    Board::new(
        ApiClient::new(FakeTransport::default()),
        RecordingView::default(),
        Rc::new(MemoryTokenStore::default()),
    )
}

pub(crate) fn sample_post(id: i64, title: &str) -> Post {
    Post {
        id,
        title: title.to_string(),
        content: format!("content of {id}"),
        author: "alice".to_string(),
        created_at: "2024-05-01 10:00:00".to_string(),
    }
}

pub(crate) fn page_json(posts: &[Post], total_pages: u32) -> String {
    serde_json::json!({ "posts": posts, "totalPages": total_pages }).to_string()
}
