//! Контроллер сессии: статус входа, вход, выход, регистрация.

use std::rc::Rc;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::client::{ApiClient, Transport};
use crate::error::{ApiError, ApiResult};
use crate::messages;
use crate::models::{LoginOutcome, SessionState};
use crate::state::BoardState;
use crate::storage::TokenStore;
use crate::view::{BoardView, Route};

/// Вход, выход, регистрация и статус сессии.
pub struct SessionController<T, V> {
    client: Rc<ApiClient<T>>,
    view: Rc<V>,
    state: Rc<BoardState>,
    tokens: Rc<dyn TokenStore>,
}

impl<T, V> Clone for SessionController<T, V> {
    fn clone(&self) -> Self {
        Self {
            client: Rc::clone(&self.client),
            view: Rc::clone(&self.view),
            state: Rc::clone(&self.state),
            tokens: Rc::clone(&self.tokens),
        }
    }
}

/// Сообщение об ошибке регистрации по `error_code` сервера.
pub fn register_failure_message(err: &ApiError) -> String {
    match err.error_code() {
        Some("USER_EXISTS") => messages::USER_EXISTS.to_string(),
        Some("DB_ERROR") => messages::DATABASE_ERROR.to_string(),
        Some(_) => messages::UNKNOWN_ERROR.to_string(),
        None => match err {
            ApiError::Http { .. } => messages::GENERIC_ERROR.to_string(),
            other => other.user_message(),
        },
    }
}

fn login_failure_message(err: &ApiError) -> String {
    match err {
        ApiError::Http {
            status: 401,
            error_code: None,
            message,
        } if message == &crate::error::fallback_message(401) => {
            messages::INVALID_CREDENTIALS.to_string()
        }
        other => other.user_message(),
    }
}

impl<T: Transport, V: BoardView> SessionController<T, V> {
    /// Собирает контроллер вокруг общего клиента, экрана и состояния.
    pub fn new(
        client: Rc<ApiClient<T>>,
        view: Rc<V>,
        state: Rc<BoardState>,
        tokens: Rc<dyn TokenStore>,
    ) -> Self {
        Self {
            client,
            view,
            state,
            tokens,
        }
    }

    /// Подхватывает сохранённый токен. Возвращает `true`, если токен был.
    pub fn restore_token(&self) -> bool {
        match self.tokens.load() {
            Some(token) => {
                self.client.set_token(token);
                true
            }
            None => false,
        }
    }

    /// Спрашивает сервер о статусе входа и переключает области экрана.
    ///
    /// Любая ошибка запроса показывается как «не вошёл».
    pub async fn check_login_status(&self) -> SessionState {
        let session = match self.client.is_logged_in().await {
            Ok(session) => session,
            Err(err) => {
                warn!(error = %err, "login status check failed, showing anonymous view");
                self.view
                    .log_failure(&format!("{}: {err}", messages::STATUS_CHECK_FAILED));
                SessionState::default()
            }
        };

        self.state.set_session(session.clone());
        self.view.show_session(&session);
        session
    }

    /// Идентификатор текущего пользователя; подставляется автором новых постов.
    ///
    /// Отсутствие пользователя (401/403) ошибкой не считается.
    pub async fn get_current_user(&self) -> Option<String> {
        let user_id = match self.client.get_user().await {
            Ok(user_id) => user_id,
            Err(err) if matches!(err.status(), Some(401 | 403)) => {
                debug!(error = %err, "current user is not available");
                None
            }
            Err(err) => {
                warn!(error = %err, "current user request failed");
                self.view
                    .log_failure(&format!("{}: {err}", messages::CURRENT_USER_FAILED));
                None
            }
        };

        if let Some(user_id) = &user_id {
            self.view.show_user(user_id);
        }
        self.state.set_default_author(user_id.clone());
        user_id
    }

    /// Вход. При успехе сохраняет токен (если сервер его выдал) и уводит на главную.
    pub async fn login(&self, userid: &str, password: &str) -> ApiResult<LoginOutcome> {
        let userid = userid.trim();
        if userid.is_empty() || password.is_empty() {
            return Err(self.reject(messages::LOGIN_FIELDS_REQUIRED));
        }

        let outcome = match self.client.login(userid, password).await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(userid, error = %err, "login failed");
                self.view.notify(&format!(
                    "{}: {}",
                    messages::LOGIN_FAILED,
                    login_failure_message(&err)
                ));
                return Err(err);
            }
        };

        if let LoginOutcome::Token(token) = &outcome {
            self.client.set_token(token.clone());
            if let Err(err) = self.tokens.save(token) {
                warn!(error = %err, "token is kept in memory only");
                self.view.report_error(&err.to_string());
            }
        }

        info!(userid, "logged in");
        self.view.notify(messages::LOGIN_SUCCESS);
        self.view.navigate(Route::Home);
        Ok(outcome)
    }

    /// Выход. При успехе забывает токен и уводит на страницу гостя.
    pub async fn logout(&self) -> ApiResult<()> {
        if let Err(err) = self.client.logout().await {
            warn!(error = %err, "logout failed");
            self.view.notify(&format!(
                "{}: {}",
                messages::LOGOUT_FAILED,
                err.user_message()
            ));
            return Err(err);
        }

        self.client.clear_token();
        if let Err(err) = self.tokens.clear() {
            warn!(error = %err, "failed to clear stored token");
        }

        let session = SessionState::default();
        self.state.set_session(session.clone());
        self.state.set_default_author(None);
        self.view.show_session(&session);

        info!("logged out");
        self.view.notify(messages::LOGOUT_SUCCESS);
        self.view.navigate(Route::Landing);
        Ok(())
    }

    /// Регистрация. Совпадение паролей проверяется до обращения к сети.
    pub async fn register(
        &self,
        userid: &str,
        password: &str,
        confirm_password: &str,
    ) -> ApiResult<()> {
        let userid = userid.trim();
        if userid.is_empty() || password.is_empty() {
            return Err(self.reject(messages::REGISTER_FIELDS_REQUIRED));
        }
        if password != confirm_password {
            return Err(self.reject(messages::PASSWORD_MISMATCH));
        }

        if let Err(err) = self.client.register(userid, password).await {
            warn!(userid, error = %err, "registration failed");
            self.view.notify(&format!(
                "{}: {}",
                messages::REGISTER_FAILED,
                register_failure_message(&err)
            ));
            return Err(err);
        }

        info!(userid, "registered");
        self.view.notify(messages::REGISTER_SUCCESS);
        self.view.navigate(Route::Home);
        Ok(())
    }

    /// Обращение к защищённому эндпоинту с bearer-токеном.
    pub async fn fetch_protected(&self) -> ApiResult<Value> {
        self.client.fetch_protected().await.inspect_err(|err| {
            warn!(error = %err, "protected request failed");
            self.view.notify(&format!(
                "{}: {}",
                messages::PROTECTED_FAILED,
                err.user_message()
            ));
        })
    }

    fn reject(&self, message: &str) -> ApiError {
        self.view.notify(message);
        ApiError::Validation(message.to_string())
    }
}
