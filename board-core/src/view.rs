use crate::form::PostForm;
use crate::models::{Post, SessionState};
use crate::pagination::Pagination;

/// Число колонок таблицы постов: id, заголовок, автор, дата, действия.
pub const TABLE_COLUMNS: usize = 5;

/// Текст строки-заглушки пустой таблицы.
pub const EMPTY_TABLE_TEXT: &str = "Постов не найдено";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Строка таблицы постов.
pub struct PostRow {
    /// Идентификатор поста (для кнопок «изменить»/«удалить» и ссылки на детали).
    pub id: i64,
    /// Заголовок.
    pub title: String,
    /// Автор.
    pub author: String,
    /// Дата создания, уже отформатированная.
    pub created_at: String,
}

impl From<&Post> for PostRow {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
            author: post.author.clone(),
            created_at: post.created_at_display(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Содержимое таблицы постов целиком.
pub enum PostTable {
    /// Одна строка-заглушка «ничего не найдено» на все колонки.
    Empty {
        /// Сколько колонок занимает заглушка.
        columns: usize,
    },
    /// По строке на пост.
    Rows(Vec<PostRow>),
}

impl PostTable {
    /// Таблица для страницы постов.
    pub fn from_posts(posts: &[Post]) -> Self {
        if posts.is_empty() {
            return Self::Empty {
                columns: TABLE_COLUMNS,
            };
        }
        Self::Rows(posts.iter().map(PostRow::from).collect())
    }

    /// Сколько строк окажется в таблице.
    pub fn row_count(&self) -> usize {
        match self {
            Self::Empty { .. } => 1,
            Self::Rows(rows) => rows.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Куда уводить пользователя после входа/выхода.
pub enum Route {
    /// Главная страница с доской.
    Home,
    /// Страница для гостя.
    Landing,
}

impl Route {
    /// Путь страницы.
    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Landing => "/index",
        }
    }
}

/// То, что контроллеры делают с экраном.
///
/// Реализации: сигналы Leptos в `board-wasm`, вывод в терминал в `board-cli`.
pub trait BoardView {
    /// Переключает области «вошёл» / «гость».
    fn show_session(&self, session: &SessionState);

    /// Показывает идентификатор текущего пользователя.
    fn show_user(&self, user_id: &str);

    /// Полностью перерисовывает таблицу постов.
    fn render_posts(&self, table: &PostTable);

    /// Полностью перерисовывает пагинацию; `None` очищает её.
    fn render_pagination(&self, pagination: Option<&Pagination>);

    /// Показывает панель с деталями поста.
    fn show_post_details(&self, post: &Post);

    /// Скрывает панель деталей.
    fn hide_post_details(&self);

    /// Перерисовывает форму создания/редактирования.
    fn render_form(&self, form: &PostForm);

    /// Блокирующее уведомление (alert).
    fn notify(&self, message: &str);

    /// Неблокирующее сообщение об ошибке загрузки.
    fn report_error(&self, message: &str);

    /// Записывает сбой, который на экране не показывается
    /// (проверка статуса, текущий пользователь).
    fn log_failure(&self, message: &str);

    /// Запрашивает подтверждение у пользователя.
    fn confirm(&self, message: &str) -> bool;

    /// Переход на другую страницу.
    fn navigate(&self, route: Route);
}
