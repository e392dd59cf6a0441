//! Контроллер списка постов: загрузка страницы, поиск, пагинация.

use std::rc::Rc;

use tracing::{debug, error};

use crate::client::{ApiClient, Transport};
use crate::error::ApiResult;
use crate::messages;
use crate::models::PageResult;
use crate::pagination::Pagination;
use crate::state::{BoardState, ListQuery};
use crate::view::{BoardView, PostTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Чем закончилась загрузка списка.
pub enum ListOutcome {
    /// Таблица и пагинация перерисованы.
    Rendered {
        /// Строк в таблице (заглушка тоже строка).
        rows: usize,
        /// Всего страниц по ответу сервера.
        total_pages: u32,
    },
    /// Пока шёл запрос, начали более новую загрузку; ответ отброшен.
    Stale,
}

/// Список постов с поиском и пагинацией.
pub struct PostListController<T, V> {
    client: Rc<ApiClient<T>>,
    view: Rc<V>,
    state: Rc<BoardState>,
}

impl<T, V> Clone for PostListController<T, V> {
    fn clone(&self) -> Self {
        Self {
            client: Rc::clone(&self.client),
            view: Rc::clone(&self.view),
            state: Rc::clone(&self.state),
        }
    }
}

impl<T: Transport, V: BoardView> PostListController<T, V> {
    /// Собирает контроллер вокруг общего клиента, экрана и состояния.
    pub fn new(client: Rc<ApiClient<T>>, view: Rc<V>, state: Rc<BoardState>) -> Self {
        Self {
            client,
            view,
            state,
        }
    }

    /// Загружает страницу `page` с поиском `search` и перерисовывает таблицу.
    ///
    /// При ошибке прежняя таблица остаётся на экране. Если до прихода ответа
    /// была начата другая загрузка, ответ отбрасывается.
    pub async fn load_posts(&self, page: u32, search: &str) -> ApiResult<ListOutcome> {
        let query = ListQuery::new(page, search);
        let generation = self.state.begin_list_load(query.clone());
        debug!(page = query.page, search = %query.search, generation, "loading posts");

        let result = self.client.list_posts(&query).await;

        if !self.state.is_latest_list_load(generation) {
            debug!(
                page = query.page,
                search = %query.search,
                generation,
                "discarding stale post list response"
            );
            return Ok(ListOutcome::Stale);
        }

        match result {
            Ok(page_result) => Ok(self.render(query, page_result)),
            Err(err) => {
                error!(page = query.page, search = %query.search, error = %err, "failed to load posts");
                self.view.report_error(&format!(
                    "{}: {}",
                    messages::LOAD_POSTS_FAILED,
                    err.user_message()
                ));
                Err(err)
            }
        }
    }

    /// Перестраивает пагинацию целиком и отдаёт её экрану.
    pub fn create_pagination(
        &self,
        total_pages: u32,
        current_page: u32,
        search: &str,
    ) -> Option<Pagination> {
        let pagination = Pagination::build(total_pages, current_page, search);
        self.view.render_pagination(pagination.as_ref());
        pagination
    }

    /// Переход по пагинации: прячет детали поста и грузит страницу.
    pub async fn open_page(&self, page: u32, search: &str) -> ApiResult<ListOutcome> {
        self.view.hide_post_details();
        self.load_posts(page, search).await
    }

    /// Поиск: первая страница с новой строкой поиска.
    pub async fn search(&self, term: &str) -> ApiResult<ListOutcome> {
        self.open_page(1, term).await
    }

    /// Повторяет последнюю начатую загрузку.
    pub async fn reload(&self) -> ApiResult<ListOutcome> {
        let query = self.state.last_query();
        self.load_posts(query.page, &query.search).await
    }

    fn render(&self, query: ListQuery, result: PageResult) -> ListOutcome {
        let table = PostTable::from_posts(&result.posts);
        self.view.render_posts(&table);

        if result.posts.is_empty() {
            self.view.render_pagination(None);
        } else {
            self.create_pagination(result.total_pages, query.page, &query.search);
        }

        self.state.mark_rendered(query);
        ListOutcome::Rendered {
            rows: table.row_count(),
            total_pages: result.total_pages,
        }
    }
}
