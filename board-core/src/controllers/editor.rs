//! Контроллер деталей поста и общей формы создания/редактирования.

use std::rc::Rc;

use tracing::{error, info, warn};

use crate::client::{ApiClient, Transport};
use crate::controllers::posts::PostListController;
use crate::error::{ApiError, ApiResult};
use crate::form::{FormError, Submission};
use crate::messages;
use crate::models::Post;
use crate::state::{BoardState, ListQuery};
use crate::view::BoardView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Чем закончилось удаление.
pub enum DeleteOutcome {
    /// Пост удалён.
    Deleted,
    /// Пользователь не подтвердил удаление, запросов не было.
    Cancelled,
}

/// Детали поста и операции создания/редактирования/удаления.
pub struct PostEditorController<T, V> {
    client: Rc<ApiClient<T>>,
    view: Rc<V>,
    state: Rc<BoardState>,
    posts: PostListController<T, V>,
}

impl<T, V> Clone for PostEditorController<T, V> {
    fn clone(&self) -> Self {
        Self {
            client: Rc::clone(&self.client),
            view: Rc::clone(&self.view),
            state: Rc::clone(&self.state),
            posts: self.posts.clone(),
        }
    }
}

fn require_fields(fields: &[&str]) -> Result<(), &'static str> {
    if fields.iter().any(|field| field.trim().is_empty()) {
        return Err(messages::POST_FIELDS_REQUIRED);
    }
    Ok(())
}

impl<T: Transport, V: BoardView> PostEditorController<T, V> {
    /// Собирает контроллер; после изменений он обновляет список через `posts`.
    pub fn new(
        client: Rc<ApiClient<T>>,
        view: Rc<V>,
        state: Rc<BoardState>,
        posts: PostListController<T, V>,
    ) -> Self {
        Self {
            client,
            view,
            state,
            posts,
        }
    }

    /// Загружает пост и показывает его в панели деталей.
    ///
    /// При ошибке панель остаётся как была.
    pub async fn fetch_post_details(&self, post_id: i64) -> ApiResult<Post> {
        match self.client.get_post(post_id).await {
            Ok(post) => {
                self.view.show_post_details(&post);
                Ok(post)
            }
            Err(err) => {
                error!(post_id, error = %err, "failed to load post details");
                self.view.report_error(&format!(
                    "{}: {}",
                    messages::LOAD_POST_FAILED,
                    err.user_message()
                ));
                Err(err)
            }
        }
    }

    /// Открывает пустую форму создания с автором по умолчанию.
    pub fn new_post(&self) -> ApiResult<()> {
        let author = self.state.default_author();
        if let Err(err) = self.state.update_form(|form| form.open_create(author)) {
            warn!(error = %err, "create form is busy");
            return Err(self.reject(messages::FORM_BUSY));
        }

        self.render_form();
        Ok(())
    }

    /// Связывает ввод пользователя с открытой формой.
    pub fn set_draft(&self, title: &str, content: &str, author: Option<&str>) -> Result<(), FormError> {
        self.state
            .update_form(|form| form.set_draft(title, content, author))
    }

    /// Закрывает форму, поля очищаются.
    pub fn cancel(&self) {
        self.state.update_form(|form| form.close());
        self.render_form();
    }

    /// Создаёт пост. При успехе закрывает форму и один раз обновляет список
    /// (первая страница, тот же поиск).
    pub async fn create_post(&self, title: &str, content: &str, author: &str) -> ApiResult<()> {
        if let Err(message) = require_fields(&[title, content, author]) {
            return Err(self.reject(message));
        }

        if let Err(err) = self.client.create_post(title, content, author).await {
            error!(error = %err, "failed to create post");
            self.view.notify(&format!(
                "{}: {}",
                messages::POST_CREATE_FAILED,
                err.user_message()
            ));
            return Err(err);
        }

        info!(author, "post created");
        self.view.notify(messages::POST_CREATED);
        self.close_form();
        let search = self.state.visible_query().search;
        self.refresh_list(ListQuery::new(1, search)).await;
        Ok(())
    }

    /// Загружает пост в форму и переключает её в режим редактирования.
    pub async fn edit_post(&self, post_id: i64) -> ApiResult<Post> {
        let post = match self.client.get_post_for_edit(post_id).await {
            Ok(post) => post,
            Err(err) => {
                error!(post_id, error = %err, "failed to load post for editing");
                self.view.report_error(&format!(
                    "{}: {}",
                    messages::LOAD_POST_FAILED,
                    err.user_message()
                ));
                return Err(err);
            }
        };

        if let Err(err) = self.state.update_form(|form| form.open_edit(&post)) {
            warn!(post_id, error = %err, "edit form is busy");
            return Err(self.reject(messages::FORM_BUSY));
        }

        self.render_form();
        Ok(post)
    }

    /// Сохраняет изменения поста. При успехе закрывает форму и обновляет
    /// текущую страницу списка.
    pub async fn update_post(&self, post_id: i64, title: &str, content: &str) -> ApiResult<()> {
        if let Err(message) = require_fields(&[title, content]) {
            return Err(self.reject(message));
        }

        if let Err(err) = self.client.update_post(post_id, title, content).await {
            error!(post_id, error = %err, "failed to update post");
            self.view.notify(&format!(
                "{}: {}",
                messages::POST_UPDATE_FAILED,
                err.user_message()
            ));
            return Err(err);
        }

        info!(post_id, "post updated");
        self.view.notify(messages::POST_UPDATED);
        self.close_form();
        self.refresh_list(self.state.visible_query()).await;
        Ok(())
    }

    /// Удаляет пост после подтверждения пользователя.
    ///
    /// Ошибка удаления только журналируется, без блокирующего уведомления.
    pub async fn delete_post(&self, post_id: i64) -> ApiResult<DeleteOutcome> {
        if !self.view.confirm(messages::POST_DELETE_CONFIRM) {
            return Ok(DeleteOutcome::Cancelled);
        }

        if let Err(err) = self.client.delete_post(post_id).await {
            error!(post_id, error = %err, "failed to delete post");
            self.view.report_error(&format!(
                "{}: {}",
                messages::POST_DELETE_FAILED,
                err.user_message()
            ));
            return Err(err);
        }

        info!(post_id, "post deleted");
        self.view.notify(messages::POST_DELETED);
        self.refresh_list(self.state.visible_query()).await;
        Ok(DeleteOutcome::Deleted)
    }

    /// Сабмит общей формы: обновление, если в форме есть `post_id`, иначе создание.
    pub async fn create_or_update_post(&self) -> ApiResult<()> {
        let submission = self.state.form().submission().map_err(ApiError::from)?;

        match submission {
            Submission::Create {
                title,
                content,
                author,
            } => self.create_post(&title, &content, &author).await,
            Submission::Update {
                post_id,
                title,
                content,
            } => self.update_post(post_id, &title, &content).await,
        }
    }

    fn close_form(&self) {
        self.state.update_form(|form| form.close());
        self.render_form();
    }

    fn render_form(&self) {
        let form = self.state.form().clone();
        self.view.render_form(&form);
    }

    async fn refresh_list(&self, query: ListQuery) {
        // Ошибку загрузки список показывает сам.
        let _ = self.posts.load_posts(query.page, &query.search).await;
    }

    fn reject(&self, message: &str) -> ApiError {
        self.view.notify(message);
        ApiError::Validation(message.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Method;
    use crate::form::{FormMode, PostForm};
    use crate::testing::{ViewEvent, board, page_json, sample_post};
    use crate::view::{PostRow, PostTable};

    const FIRST_PAGE: &str = "/api/posts?page=1&limit=10";

    #[tokio::test]
    async fn create_success_reloads_list_once_and_clears_form() {
        let board = board();
        let transport = board.client().transport();
        transport.respond(Method::Post, "/api/posts", 201, "");
        transport.respond(
            Method::Get,
            FIRST_PAGE,
            200,
            &page_json(&[sample_post(5, "fresh")], 1),
        );

        board.editor.new_post().expect("hidden -> create");
        board
            .editor
            .set_draft("fresh", "body", Some("alice"))
            .expect("form is open");
        board
            .editor
            .create_or_update_post()
            .await
            .expect("create must succeed");

        assert_eq!(transport.count(Method::Get, FIRST_PAGE), 1);
        assert_eq!(*board.state().form(), PostForm::default());
        assert!(
            board
                .view()
                .events()
                .contains(&ViewEvent::Form(PostForm::default()))
        );
        assert_eq!(
            board.view().notifications(),
            vec![messages::POST_CREATED.to_string()]
        );
    }

    #[tokio::test]
    async fn create_with_non_201_fails_and_keeps_form() {
        let board = board();
        board
            .client()
            .transport()
            .respond(Method::Post, "/api/posts", 200, r#"{"id":9}"#);

        board.editor.new_post().expect("hidden -> create");
        board
            .editor
            .set_draft("t", "c", Some("alice"))
            .expect("form is open");
        let err = board
            .editor
            .create_or_update_post()
            .await
            .expect_err("200 is not 201");

        assert_eq!(err.status(), Some(200));
        assert_eq!(board.state().form().mode(), FormMode::Create);
        assert_eq!(board.client().transport().count(Method::Get, FIRST_PAGE), 0);
    }

    #[tokio::test]
    async fn create_with_blank_title_sends_nothing() {
        let board = board();

        let err = board
            .editor
            .create_post(" ", "c", "alice")
            .await
            .expect_err("blank title");

        assert!(matches!(err, ApiError::Validation(_)));
        assert!(board.client().transport().calls().is_empty());
    }

    #[tokio::test]
    async fn new_post_prefills_current_user() {
        let board = board();
        board.client().transport().respond(
            Method::Get,
            "/api/get_user",
            200,
            r#"{"user_id":"alice"}"#,
        );
        board.session.get_current_user().await;

        board.editor.new_post().expect("hidden -> create");

        assert_eq!(board.state().form().author(), "alice");
    }

    #[tokio::test]
    async fn edit_then_submit_updates_and_reloads_current_page() {
        let board = board();
        let transport = board.client().transport();
        transport.respond(
            Method::Get,
            "/api/posts?page=2&limit=10",
            200,
            &page_json(&[sample_post(7, "old")], 2),
        );
        transport.respond(
            Method::Get,
            "/api/posts/edit?id=7",
            200,
            r#"{"id":7,"title":"old","content":"body","author":"alice"}"#,
        );
        transport.respond(Method::Put, "/api/posts/update?id=7", 200, "");
        transport.respond(
            Method::Get,
            "/api/posts?page=2&limit=10",
            200,
            &page_json(&[sample_post(7, "new")], 2),
        );

        board.posts.load_posts(2, "").await.expect("page 2");
        let post = board.editor.edit_post(7).await.expect("edit");
        assert_eq!(post.title, "old");
        assert_eq!(board.state().form().mode(), FormMode::Edit);
        assert_eq!(board.state().form().heading(), "Редактирование поста");

        board
            .editor
            .set_draft("new", "body", None)
            .expect("form is open");
        board
            .editor
            .create_or_update_post()
            .await
            .expect("update must succeed");

        let update = transport
            .calls()
            .into_iter()
            .find(|call| call.method == Method::Put)
            .expect("update call");
        let body = update.body.expect("patch body");
        assert_eq!(body["title"], "new");
        assert!(body.get("author").is_none());
        assert_eq!(transport.count(Method::Get, "/api/posts?page=2&limit=10"), 2);
        assert!(!board.state().form().is_open());
        assert_eq!(transport.count(Method::Post, "/api/posts"), 0);
    }

    #[tokio::test]
    async fn edit_is_rejected_while_another_post_is_edited() {
        let board = board();
        let transport = board.client().transport();
        for id in [1, 2] {
            transport.respond(
                Method::Get,
                &format!("/api/posts/edit?id={id}"),
                200,
                &serde_json::to_string(&sample_post(id, "p")).expect("json"),
            );
        }

        board.editor.edit_post(1).await.expect("first edit");
        let err = board.editor.edit_post(2).await.expect_err("form busy");

        assert!(matches!(err, ApiError::Validation(_)));
        assert_eq!(board.state().form().post_id(), Some(1));
    }

    #[test]
    fn second_new_post_is_rejected_with_readable_message() {
        let board = board();
        board.editor.new_post().expect("hidden -> create");

        let err = board.editor.new_post().expect_err("form is already open");

        assert_eq!(err, ApiError::Validation(messages::FORM_BUSY.to_string()));
        assert_eq!(
            board.view().notifications(),
            vec![messages::FORM_BUSY.to_string()]
        );
        assert_eq!(board.state().form().mode(), FormMode::Create);
    }

    #[tokio::test]
    async fn delete_without_confirmation_sends_nothing() {
        let board = board();
        board.view().answer_confirm(false);

        let outcome = board.editor.delete_post(3).await.expect("cancelled");

        assert_eq!(outcome, DeleteOutcome::Cancelled);
        assert!(board.client().transport().calls().is_empty());
    }

    #[tokio::test]
    async fn confirmed_delete_reloads_list() {
        let board = board();
        let transport = board.client().transport();
        transport.respond(Method::Delete, "/api/posts/delete?id=3", 200, "");
        transport.respond(Method::Get, FIRST_PAGE, 200, &page_json(&[], 0));

        let outcome = board.editor.delete_post(3).await.expect("delete");

        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert_eq!(transport.count(Method::Get, FIRST_PAGE), 1);
    }

    #[tokio::test]
    async fn delete_after_failed_page_change_reloads_page_on_screen() {
        let board = board();
        let transport = board.client().transport();
        transport.respond(
            Method::Get,
            FIRST_PAGE,
            200,
            &page_json(&[sample_post(1, "one"), sample_post(2, "two")], 2),
        );
        transport.respond(Method::Get, "/api/posts?page=2&limit=10", 500, "");
        transport.respond(Method::Delete, "/api/posts/delete?id=1", 200, "");
        transport.respond(
            Method::Get,
            FIRST_PAGE,
            200,
            &page_json(&[sample_post(2, "two")], 1),
        );

        board.posts.load_posts(1, "").await.expect("page 1");
        board.posts.load_posts(2, "").await.expect_err("page 2 fails");
        board.editor.delete_post(1).await.expect("delete");

        assert_eq!(transport.count(Method::Get, FIRST_PAGE), 2);
        assert_eq!(transport.count(Method::Get, "/api/posts?page=2&limit=10"), 1);
        assert_eq!(
            board.view().tables().last(),
            Some(&PostTable::Rows(vec![PostRow::from(&sample_post(2, "two"))]))
        );
    }

    #[tokio::test]
    async fn failed_delete_is_reported_without_alert() {
        let board = board();
        board
            .client()
            .transport()
            .respond(Method::Delete, "/api/posts/delete?id=3", 500, "");

        board.editor.delete_post(3).await.expect_err("500");

        assert!(board.view().notifications().is_empty());
        assert_eq!(board.view().errors().len(), 1);
    }

    #[tokio::test]
    async fn details_failure_keeps_previous_panel() {
        let board = board();
        let transport = board.client().transport();
        transport.respond(
            Method::Get,
            "/api/posts/1",
            200,
            &serde_json::to_string(&sample_post(1, "one")).expect("json"),
        );
        transport.respond(Method::Get, "/api/posts/2", 404, "");

        board.editor.fetch_post_details(1).await.expect("details");
        board.editor.fetch_post_details(2).await.expect_err("404");

        let details: Vec<_> = board
            .view()
            .events()
            .into_iter()
            .filter(|event| matches!(event, ViewEvent::Details(_)))
            .collect();
        assert_eq!(details, vec![ViewEvent::Details(sample_post(1, "one"))]);
    }

    #[tokio::test]
    async fn submit_with_hidden_form_is_rejected() {
        let board = board();

        let err = board
            .editor
            .create_or_update_post()
            .await
            .expect_err("hidden form");

        assert!(matches!(err, ApiError::Validation(_)));
        assert!(board.client().transport().calls().is_empty());
    }

    #[tokio::test]
    async fn cancel_hides_form() {
        let board = board();
        board.editor.new_post().expect("hidden -> create");

        board.editor.cancel();

        assert_eq!(
            board.view().events().last(),
            Some(&ViewEvent::Form(PostForm::default()))
        );
    }
}
