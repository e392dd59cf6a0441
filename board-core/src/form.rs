use thiserror::Error;

use crate::error::ApiError;
use crate::models::Post;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Режим общей формы создания/редактирования поста.
pub enum FormMode {
    /// Форма скрыта.
    #[default]
    Hidden,
    /// Создание нового поста.
    Create,
    /// Редактирование существующего поста.
    Edit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Ошибки переходов формы.
pub enum FormError {
    /// Переход между режимами не разрешён.
    #[error("form transition {from:?} -> {to:?} is not allowed")]
    InvalidTransition {
        /// Текущий режим.
        from: FormMode,
        /// Запрошенный режим.
        to: FormMode,
    },

    /// Действие требует открытой формы.
    #[error("post form is not open")]
    NotOpen,
}

impl From<FormError> for ApiError {
    fn from(value: FormError) -> Self {
        ApiError::Validation(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Что отправить при сабмите формы.
pub enum Submission {
    /// Создать пост.
    Create {
        /// Заголовок.
        title: String,
        /// Текст.
        content: String,
        /// Автор.
        author: String,
    },
    /// Обновить пост `post_id`.
    Update {
        /// Идентификатор редактируемого поста.
        post_id: i64,
        /// Новый заголовок.
        title: String,
        /// Новый текст.
        content: String,
    },
}

/// Общая форма создания/редактирования поста.
///
/// Режим определяется только наличием `post_id` (есть значит обновление, нет значит
/// создание). Переходы: `Hidden -> Create`, `Hidden | Create -> Edit`,
/// `Create | Edit -> Hidden`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostForm {
    mode: FormMode,
    post_id: Option<i64>,
    title: String,
    content: String,
    author: String,
}

impl PostForm {
    /// Текущий режим.
    pub fn mode(&self) -> FormMode {
        self.mode
    }

    /// Идентификатор редактируемого поста.
    pub fn post_id(&self) -> Option<i64> {
        self.post_id
    }

    /// Заголовок в форме.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Текст в форме.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Автор в форме.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Видна ли форма.
    pub fn is_open(&self) -> bool {
        self.mode != FormMode::Hidden
    }

    /// Заголовок формы для текущего режима.
    pub fn heading(&self) -> &'static str {
        match self.mode {
            FormMode::Hidden => "",
            FormMode::Create => "Новый пост",
            FormMode::Edit => "Редактирование поста",
        }
    }

    /// Подпись кнопки отправки.
    pub fn submit_label(&self) -> &'static str {
        if self.post_id.is_some() {
            "Сохранить"
        } else {
            "Опубликовать"
        }
    }

    /// `Hidden -> Create`: очищает поля и подставляет автора.
    pub fn open_create(&mut self, author: Option<String>) -> Result<(), FormError> {
        if self.mode != FormMode::Hidden {
            return Err(FormError::InvalidTransition {
                from: self.mode,
                to: FormMode::Create,
            });
        }

        *self = Self {
            mode: FormMode::Create,
            author: author.unwrap_or_default(),
            ..Self::default()
        };
        Ok(())
    }

    /// `Hidden | Create -> Edit`: загружает поля поста.
    pub fn open_edit(&mut self, post: &Post) -> Result<(), FormError> {
        if self.mode == FormMode::Edit {
            return Err(FormError::InvalidTransition {
                from: self.mode,
                to: FormMode::Edit,
            });
        }

        *self = Self {
            mode: FormMode::Edit,
            post_id: Some(post.id),
            title: post.title.clone(),
            content: post.content.clone(),
            author: post.author.clone(),
        };
        Ok(())
    }

    /// Обновляет поля открытой формы. `author = None` оставляет автора как есть.
    pub fn set_draft(
        &mut self,
        title: &str,
        content: &str,
        author: Option<&str>,
    ) -> Result<(), FormError> {
        if !self.is_open() {
            return Err(FormError::NotOpen);
        }

        self.title = title.to_string();
        self.content = content.to_string();
        if let Some(author) = author {
            self.author = author.to_string();
        }
        Ok(())
    }

    /// Что отправлять: обновление при наличии `post_id`, иначе создание.
    pub fn submission(&self) -> Result<Submission, FormError> {
        if !self.is_open() {
            return Err(FormError::NotOpen);
        }

        Ok(match self.post_id {
            Some(post_id) => Submission::Update {
                post_id,
                title: self.title.clone(),
                content: self.content.clone(),
            },
            None => Submission::Create {
                title: self.title.clone(),
                content: self.content.clone(),
                author: self.author.clone(),
            },
        })
    }

    /// Скрывает форму и очищает поля. Для скрытой формы ничего не делает.
    pub fn close(&mut self) {
        *self = Self::default();
    }
}
