use std::cell::{Cell, Ref, RefCell};

use crate::form::PostForm;
use crate::models::SessionState;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Параметры, с которыми запрошена страница списка.
pub struct ListQuery {
    /// Номер страницы, начиная с 1.
    pub page: u32,
    /// Строка поиска; пустая строка означает без фильтра.
    pub search: String,
}

impl ListQuery {
    /// Создаёт запрос; номер страницы меньше 1 поднимается до 1.
    pub fn new(page: u32, search: impl Into<String>) -> Self {
        Self {
            page: page.max(1),
            search: search.into(),
        }
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new(1, String::new())
    }
}

/// Общее состояние экрана доски.
///
/// Создаётся при монтировании экрана и передаётся всем контроллерам.
/// Живёт в одном потоке UI, поэтому обходится `Cell`/`RefCell`.
#[derive(Debug, Default)]
pub struct BoardState {
    session: RefCell<SessionState>,
    default_author: RefCell<Option<String>>,
    form: RefCell<PostForm>,
    list_generation: Cell<u64>,
    last_query: RefCell<ListQuery>,
    rendered_query: RefCell<Option<ListQuery>>,
}

impl BoardState {
    /// Пустое состояние: гость, форма скрыта, список не загружен.
    pub fn new() -> Self {
        Self::default()
    }

    /// Последнее известное состояние сессии.
    pub fn session(&self) -> SessionState {
        self.session.borrow().clone()
    }

    pub(crate) fn set_session(&self, session: SessionState) {
        *self.session.borrow_mut() = session;
    }

    /// Автор по умолчанию для новых постов (текущий пользователь).
    pub fn default_author(&self) -> Option<String> {
        self.default_author.borrow().clone()
    }

    pub(crate) fn set_default_author(&self, author: Option<String>) {
        *self.default_author.borrow_mut() = author;
    }

    /// Текущее состояние формы создания/редактирования.
    pub fn form(&self) -> Ref<'_, PostForm> {
        self.form.borrow()
    }

    pub(crate) fn update_form<R>(&self, f: impl FnOnce(&mut PostForm) -> R) -> R {
        f(&mut self.form.borrow_mut())
    }

    /// Регистрирует новую загрузку списка и возвращает её поколение.
    pub(crate) fn begin_list_load(&self, query: ListQuery) -> u64 {
        let generation = self.list_generation.get().wrapping_add(1);
        self.list_generation.set(generation);
        *self.last_query.borrow_mut() = query;
        generation
    }

    /// Ответ поколения `generation` ещё актуален (после него загрузок не было).
    pub(crate) fn is_latest_list_load(&self, generation: u64) -> bool {
        self.list_generation.get() == generation
    }

    /// Запрос последней начатой загрузки списка.
    pub fn last_query(&self) -> ListQuery {
        self.last_query.borrow().clone()
    }

    pub(crate) fn mark_rendered(&self, query: ListQuery) {
        *self.rendered_query.borrow_mut() = Some(query);
    }

    /// Запрос, результат которого сейчас отрисован.
    pub fn rendered_query(&self) -> Option<ListQuery> {
        self.rendered_query.borrow().clone()
    }

    /// Запрос списка, который сейчас на экране; до первой отрисовки
    /// совпадает с последним начатым.
    pub fn visible_query(&self) -> ListQuery {
        self.rendered_query().unwrap_or_else(|| self.last_query())
    }
}
