use std::rc::Rc;

use tracing::debug;

use crate::client::{ApiClient, Transport};
use crate::controllers::editor::PostEditorController;
use crate::controllers::posts::PostListController;
use crate::controllers::session::SessionController;
use crate::state::BoardState;
use crate::storage::TokenStore;
use crate::view::BoardView;

/// Экран доски: три контроллера вокруг общего клиента, экрана и состояния.
///
/// Создаётся при монтировании экрана и выбрасывается при уходе с него.
pub struct Board<T, V> {
    /// Вход, выход, регистрация.
    pub session: SessionController<T, V>,
    /// Список постов и пагинация.
    pub posts: PostListController<T, V>,
    /// Детали поста и CRUD.
    pub editor: PostEditorController<T, V>,
    client: Rc<ApiClient<T>>,
    view: Rc<V>,
    state: Rc<BoardState>,
    tokens: Rc<dyn TokenStore>,
}

impl<T, V> Clone for Board<T, V> {
    fn clone(&self) -> Self {
        Self {
            session: self.session.clone(),
            posts: self.posts.clone(),
            editor: self.editor.clone(),
            client: Rc::clone(&self.client),
            view: Rc::clone(&self.view),
            state: Rc::clone(&self.state),
            tokens: Rc::clone(&self.tokens),
        }
    }
}

impl<T: Transport, V: BoardView> Board<T, V> {
    /// Собирает экран с чистым состоянием.
    pub fn new(client: ApiClient<T>, view: V, tokens: Rc<dyn TokenStore>) -> Self {
        let client = Rc::new(client);
        let view = Rc::new(view);
        let state = Rc::new(BoardState::new());

        let session = SessionController::new(
            Rc::clone(&client),
            Rc::clone(&view),
            Rc::clone(&state),
            Rc::clone(&tokens),
        );
        let posts = PostListController::new(Rc::clone(&client), Rc::clone(&view), Rc::clone(&state));
        let editor = PostEditorController::new(
            Rc::clone(&client),
            Rc::clone(&view),
            Rc::clone(&state),
            posts.clone(),
        );

        Self {
            session,
            posts,
            editor,
            client,
            view,
            state,
            tokens,
        }
    }

    /// Первичная загрузка экрана: токен, статус входа, пользователь, первая страница.
    pub async fn mount(&self) {
        let restored = self.session.restore_token();
        debug!(restored, "mounting board");

        self.session.check_login_status().await;
        self.session.get_current_user().await;
        // Ошибку загрузки список показывает сам.
        let _ = self.posts.load_posts(1, "").await;
    }

    /// Клиент API.
    pub fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    /// Экран.
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Общее состояние.
    pub fn state(&self) -> &BoardState {
        &self.state
    }

    /// Хранилище токена.
    pub fn tokens(&self) -> &dyn TokenStore {
        self.tokens.as_ref()
    }
}
