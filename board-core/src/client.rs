use std::cell::RefCell;

use async_trait::async_trait;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, warn};
use url::form_urlencoded;

use crate::error::{ApiError, ApiResult};
use crate::models::{LoginOutcome, PageResult, Post, SessionState};
use crate::state::ListQuery;

/// Размер страницы списка постов.
pub const PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// HTTP-метод запроса к API.
pub enum Method {
    /// GET.
    Get,
    /// POST.
    Post,
    /// PUT.
    Put,
    /// DELETE.
    Delete,
}

impl Method {
    /// Имя метода в HTTP.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Сырой ответ сервера.
pub struct RawResponse {
    /// HTTP-статус.
    pub status: u16,
    /// Тело ответа как текст (может быть пустым).
    pub body: String,
}

impl RawResponse {
    /// Статус в диапазоне 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Транспорт до API.
///
/// Реализация сериализует `body` в JSON с `Content-Type: application/json`,
/// добавляет `Authorization: Bearer <token>` при наличии токена и возвращает
/// любой полученный ответ. Если ответа нет, возвращается
/// [`ApiError::Network`].
#[async_trait(?Send)]
pub trait Transport {
    /// Отправляет один запрос.
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        token: Option<&str>,
    ) -> ApiResult<RawResponse>;
}

#[derive(Debug, Serialize)]
struct CredentialsDto<'a> {
    userid: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct NewPostDto<'a> {
    title: &'a str,
    content: &'a str,
    author: &'a str,
}

#[derive(Debug, Serialize)]
struct PostPatchDto<'a> {
    title: &'a str,
    content: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct LoginResponseDto {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct MessageDto {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct UserDto {
    #[serde(default)]
    user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PageResultDto {
    #[serde(default)]
    posts: Option<Vec<Post>>,
    #[serde(default, rename = "totalPages")]
    total_pages: i64,
}

impl From<LoginResponseDto> for LoginOutcome {
    fn from(value: LoginResponseDto) -> Self {
        match value.token.filter(|token| !token.trim().is_empty()) {
            Some(token) => Self::Token(token),
            None => Self::Session {
                message: value.message,
            },
        }
    }
}

impl From<PageResultDto> for PageResult {
    fn from(value: PageResultDto) -> Self {
        Self {
            posts: value.posts.unwrap_or_default(),
            total_pages: value.total_pages.clamp(0, i64::from(u32::MAX)) as u32,
        }
    }
}

/// Путь списка постов: `/api/posts?page=<page>&limit=10[&search=<search>]`.
pub fn list_path(query: &ListQuery) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    serializer
        .append_pair("page", &query.page.to_string())
        .append_pair("limit", &PAGE_SIZE.to_string());
    if !query.search.is_empty() {
        serializer.append_pair("search", &query.search);
    }
    format!("/api/posts?{}", serializer.finish())
}

/// Клиент REST API доски поверх произвольного [`Transport`].
///
/// Хранит bearer-токен и прикладывает его ко всем запросам.
#[derive(Debug)]
pub struct ApiClient<T> {
    transport: T,
    token: RefCell<Option<String>>,
}

impl<T: Transport> ApiClient<T> {
    /// Создаёт клиент без токена.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            token: RefCell::new(None),
        }
    }

    /// Используемый транспорт.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Устанавливает bearer-токен.
    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.borrow_mut() = Some(token.into());
    }

    /// Текущий токен.
    pub fn token(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    /// Забывает токен.
    pub fn clear_token(&self) {
        *self.token.borrow_mut() = None;
    }

    /// Выполняет запрос и возвращает тело ответа как JSON.
    ///
    /// Ответ вне 2xx превращается в [`ApiError::Http`]; пустое тело превращается в
    /// `Value::Null`.
    pub async fn request(&self, method: Method, path: &str, body: Option<Value>) -> ApiResult<Value> {
        let (_, value) = self.request_with_status(method, path, body).await?;
        Ok(value)
    }

    /// То же, что [`ApiClient::request`], но вместе со статусом ответа.
    pub async fn request_with_status(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> ApiResult<(u16, Value)> {
        let token = self.token();
        debug!(method = method.as_str(), path, "sending api request");

        let response = self
            .transport
            .send(method, path, body.as_ref(), token.as_deref())
            .await?;

        if !response.is_success() {
            let err = ApiError::from_status(response.status, &response.body);
            warn!(method = method.as_str(), path, status = response.status, error = %err, "api request failed");
            return Err(err);
        }

        let value = decode_body(&response.body)?;
        Ok((response.status, value))
    }

    /// `POST /api/login`.
    pub async fn login(&self, userid: &str, password: &str) -> ApiResult<LoginOutcome> {
        let payload = to_value(&CredentialsDto { userid, password })?;
        let value = self.request(Method::Post, "/api/login", Some(payload)).await?;
        let dto: LoginResponseDto = decode_or_default(value)?;
        Ok(dto.into())
    }

    /// `POST /api/register`; возвращает сообщение сервера.
    pub async fn register(&self, userid: &str, password: &str) -> ApiResult<Option<String>> {
        let payload = to_value(&CredentialsDto { userid, password })?;
        let value = self
            .request(Method::Post, "/api/register", Some(payload))
            .await?;
        let dto: MessageDto = decode_or_default(value)?;
        Ok(dto.message)
    }

    /// `POST /api/logout`; возвращает сообщение сервера.
    pub async fn logout(&self) -> ApiResult<Option<String>> {
        let value = self.request(Method::Post, "/api/logout", None).await?;
        let dto: MessageDto = decode_or_default(value)?;
        Ok(dto.message)
    }

    /// `GET /api/is_logged_in`.
    pub async fn is_logged_in(&self) -> ApiResult<SessionState> {
        let value = self.request(Method::Get, "/api/is_logged_in", None).await?;
        decode(value)
    }

    /// `GET /api/get_user`; `None`, если пользователь не известен.
    pub async fn get_user(&self) -> ApiResult<Option<String>> {
        let value = self.request(Method::Get, "/api/get_user", None).await?;
        let dto: UserDto = decode_or_default(value)?;
        Ok(dto.user_id.filter(|user_id| !user_id.trim().is_empty()))
    }

    /// `GET /api/posts?page&limit&search`.
    pub async fn list_posts(&self, query: &ListQuery) -> ApiResult<PageResult> {
        let value = self.request(Method::Get, &list_path(query), None).await?;
        let dto: PageResultDto = decode(value)?;
        Ok(dto.into())
    }

    /// `GET /api/posts/{id}`.
    pub async fn get_post(&self, id: i64) -> ApiResult<Post> {
        let value = self
            .request(Method::Get, &format!("/api/posts/{id}"), None)
            .await?;
        decode(value)
    }

    /// `GET /api/posts/edit?id=`: пост для формы редактирования.
    pub async fn get_post_for_edit(&self, id: i64) -> ApiResult<Post> {
        let value = self
            .request(Method::Get, &format!("/api/posts/edit?id={id}"), None)
            .await?;
        decode(value)
    }

    /// `POST /api/posts`. Успехом считается только статус 201.
    pub async fn create_post(&self, title: &str, content: &str, author: &str) -> ApiResult<()> {
        let payload = to_value(&NewPostDto {
            title,
            content,
            author,
        })?;
        let (status, _) = self
            .request_with_status(Method::Post, "/api/posts", Some(payload))
            .await?;

        if status != 201 {
            warn!(status, "post creation answered without 201");
            return Err(ApiError::Http {
                status,
                error_code: None,
                message: format!("Пост не создан: сервер ответил статусом {status}"),
            });
        }
        Ok(())
    }

    /// `PUT /api/posts/update?id=`.
    pub async fn update_post(&self, id: i64, title: &str, content: &str) -> ApiResult<()> {
        let payload = to_value(&PostPatchDto { title, content })?;
        self.request(
            Method::Put,
            &format!("/api/posts/update?id={id}"),
            Some(payload),
        )
        .await?;
        Ok(())
    }

    /// `DELETE /api/posts/delete?id=`.
    pub async fn delete_post(&self, id: i64) -> ApiResult<()> {
        self.request(Method::Delete, &format!("/api/posts/delete?id={id}"), None)
            .await?;
        Ok(())
    }

    /// `GET /api/protected` с bearer-токеном.
    pub async fn fetch_protected(&self) -> ApiResult<Value> {
        self.request(Method::Get, "/api/protected", None).await
    }
}

fn to_value<S: Serialize>(payload: &S) -> ApiResult<Value> {
    serde_json::to_value(payload).map_err(|err| ApiError::Decode(err.to_string()))
}

fn decode_body(body: &str) -> ApiResult<Value> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(body).map_err(|err| ApiError::Decode(err.to_string()))
}

fn decode<D: DeserializeOwned>(value: Value) -> ApiResult<D> {
    serde_json::from_value(value).map_err(|err| ApiError::Decode(err.to_string()))
}

fn decode_or_default<D: DeserializeOwned + Default>(value: Value) -> ApiResult<D> {
    if value.is_null() {
        return Ok(D::default());
    }
    decode(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeTransport;

    fn client() -> ApiClient<FakeTransport> {
        ApiClient::new(FakeTransport::default())
    }

    #[test]
    fn list_path_omits_empty_search() {
        assert_eq!(list_path(&ListQuery::new(2, "")), "/api/posts?page=2&limit=10");
    }

    #[test]
    fn list_path_encodes_search() {
        assert_eq!(
            list_path(&ListQuery::new(1, "a&b c")),
            "/api/posts?page=1&limit=10&search=a%26b+c"
        );
    }

    #[tokio::test]
    async fn list_posts_accepts_null_posts() {
        let client = client();
        client.transport().respond(
            Method::Get,
            "/api/posts?page=1&limit=10",
            200,
            r#"{"posts":null,"totalPages":0}"#,
        );

        let page = client
            .list_posts(&ListQuery::default())
            .await
            .expect("list must succeed");
        assert!(page.posts.is_empty());
        assert_eq!(page.total_pages, 0);
    }

    #[tokio::test]
    async fn token_is_attached_once_set() {
        let client = client();
        client
            .transport()
            .respond(Method::Get, "/api/protected", 200, r#"{"ok":true}"#);
        client.set_token("abc");

        let value = client.fetch_protected().await.expect("protected call");
        assert_eq!(value["ok"], Value::Bool(true));

        let calls = client.transport().calls();
        assert_eq!(calls[0].token.as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn create_post_requires_201() {
        let client = client();
        client.transport().respond(Method::Post, "/api/posts", 200, "");

        let err = client
            .create_post("t", "c", "a")
            .await
            .expect_err("200 is not a creation");
        assert_eq!(err.status(), Some(200));
    }

    #[tokio::test]
    async fn create_post_sends_json_body() {
        let client = client();
        client.transport().respond(Method::Post, "/api/posts", 201, "");

        client
            .create_post("t", "c", "alice")
            .await
            .expect("create must succeed");

        let calls = client.transport().calls();
        let body = calls[0].body.clone().expect("body");
        assert_eq!(body["title"], "t");
        assert_eq!(body["author"], "alice");
    }

    #[tokio::test]
    async fn non_json_success_body_is_decode_error() {
        let client = client();
        client
            .transport()
            .respond(Method::Get, "/api/posts/1", 200, "<html>");

        let err = client.get_post(1).await.expect_err("html is not a post");
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn login_without_token_relies_on_session() {
        let client = client();
        client
            .transport()
            .respond(Method::Post, "/api/login", 200, r#"{"message":"ok"}"#);

        let outcome = client.login("u", "p").await.expect("login");
        assert_eq!(
            outcome,
            LoginOutcome::Session {
                message: Some("ok".to_string())
            }
        );
    }

    #[tokio::test]
    async fn get_user_treats_blank_id_as_absent() {
        let client = client();
        client
            .transport()
            .respond(Method::Get, "/api/get_user", 200, r#"{"user_id":""}"#);

        assert_eq!(client.get_user().await, Ok(None));
    }

    #[tokio::test]
    async fn transport_failure_is_network_error() {
        let client = client();
        client.transport().fail(Method::Get, "/api/is_logged_in");

        let err = client.is_logged_in().await.expect_err("no response");
        assert!(matches!(err, ApiError::Network(_)));
    }
}
