use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Пост доски в том виде, в каком его отдаёт сервер.
pub struct Post {
    /// Идентификатор поста (назначается сервером).
    pub id: i64,
    /// Заголовок.
    pub title: String,
    /// Текст поста.
    pub content: String,
    /// Идентификатор автора.
    #[serde(default)]
    pub author: String,
    /// Время создания в том формате, в каком его прислал сервер.
    ///
    /// Эндпоинт редактирования это поле не присылает.
    #[serde(default)]
    pub created_at: String,
}

impl Post {
    /// Время создания для отображения (`YYYY-MM-DD HH:MM`).
    ///
    /// Если строка не похожа ни на RFC 3339, ни на `YYYY-MM-DD HH:MM:SS`,
    /// возвращается как есть.
    pub fn created_at_display(&self) -> String {
        let raw = self.created_at.trim();

        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return ts.format("%Y-%m-%d %H:%M").to_string();
        }
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
            return ts.format("%Y-%m-%d %H:%M").to_string();
        }

        raw.to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Одна страница списка постов.
pub struct PageResult {
    /// Посты текущей страницы в порядке сервера.
    pub posts: Vec<Post>,
    /// Общее число страниц.
    pub total_pages: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Состояние сессии, как его видит клиент.
pub struct SessionState {
    /// Выполнен ли вход.
    #[serde(default)]
    pub is_logged_in: bool,
    /// Идентификатор текущего пользователя.
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Результат успешного входа.
pub enum LoginOutcome {
    /// Сервер выдал bearer-токен.
    Token(String),
    /// Токена нет, сервер держит сессию сам.
    Session {
        /// Сообщение сервера, если было.
        message: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post(created_at: &str) -> Post {
        Post {
            id: 1,
            title: "Hi".to_string(),
            content: "c".to_string(),
            author: "alice".to_string(),
            created_at: created_at.to_string(),
        }
    }

    #[test]
    fn created_at_display_formats_mysql_datetime() {
        let post = sample_post("2024-03-01 09:15:42");
        assert_eq!(post.created_at_display(), "2024-03-01 09:15");
    }

    #[test]
    fn created_at_display_formats_rfc3339() {
        let post = sample_post("2024-03-01T09:15:42Z");
        assert_eq!(post.created_at_display(), "2024-03-01 09:15");
    }

    #[test]
    fn created_at_display_keeps_unknown_format() {
        let post = sample_post("yesterday");
        assert_eq!(post.created_at_display(), "yesterday");
    }

    #[test]
    fn post_without_created_at_deserializes() {
        let raw = r#"{"id":7,"title":"t","content":"c","author":"bob"}"#;
        let post: Post = serde_json::from_str(raw).expect("post should parse");

        assert_eq!(post.id, 7);
        assert!(post.created_at.is_empty());
    }
}
