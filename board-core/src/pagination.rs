use crate::state::ListQuery;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Вид элемента пагинации.
pub enum ControlKind {
    /// «Предыдущая страница».
    Previous,
    /// Номер страницы.
    Page(u32),
    /// «Следующая страница».
    Next,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Один элемент пагинации.
pub struct PageControl {
    /// Вид элемента.
    pub kind: ControlKind,
    /// Страница, которую откроет элемент.
    pub target: u32,
    /// Элемент соответствует текущей странице.
    pub active: bool,
    /// Элемент неактивен (первая/последняя страница).
    pub disabled: bool,
}

impl PageControl {
    /// Подпись элемента.
    pub fn label(&self) -> String {
        match self.kind {
            ControlKind::Previous => "«".to_string(),
            ControlKind::Page(page) => page.to_string(),
            ControlKind::Next => "»".to_string(),
        }
    }
}

/// Пагинация, построенная для одной отрисовки списка.
///
/// Хранит строку поиска, с которой был загружен список: все переходы
/// открывают страницы с тем же поиском.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    /// Текущая страница.
    pub current_page: u32,
    /// Всего страниц.
    pub total_pages: u32,
    /// Строка поиска загруженного списка.
    pub search: String,
    /// Элементы слева направо: «, 1..=N, ».
    pub controls: Vec<PageControl>,
}

impl Pagination {
    /// Строит пагинацию. Для `total_pages <= 1` возвращает `None`.
    ///
    /// `current_page` прижимается к диапазону `1..=total_pages`.
    pub fn build(total_pages: u32, current_page: u32, search: &str) -> Option<Self> {
        if total_pages <= 1 {
            return None;
        }

        let current_page = current_page.clamp(1, total_pages);
        let mut controls = Vec::with_capacity(total_pages as usize + 2);

        controls.push(PageControl {
            kind: ControlKind::Previous,
            target: current_page.saturating_sub(1).max(1),
            active: false,
            disabled: current_page == 1,
        });

        controls.extend((1..=total_pages).map(|page| PageControl {
            kind: ControlKind::Page(page),
            target: page,
            active: page == current_page,
            disabled: false,
        }));

        controls.push(PageControl {
            kind: ControlKind::Next,
            target: (current_page + 1).min(total_pages),
            active: false,
            disabled: current_page == total_pages,
        });

        Some(Self {
            current_page,
            total_pages,
            search: search.to_string(),
            controls,
        })
    }

    /// Только номера страниц.
    pub fn page_links(&self) -> impl Iterator<Item = &PageControl> {
        self.controls
            .iter()
            .filter(|control| matches!(control.kind, ControlKind::Page(_)))
    }

    /// Запрос, который выполнит элемент; `None` для неактивного.
    pub fn query_for(&self, control: &PageControl) -> Option<ListQuery> {
        if control.disabled {
            return None;
        }
        Some(ListQuery::new(control.target, self.search.clone()))
    }
}
