use std::io::{self, BufRead, Write};

use board_core::{
    BoardView, EMPTY_TABLE_TEXT, Pagination, Post, PostForm, PostTable, Route, SessionState,
};

/// Вывод контроллеров в терминал.
pub struct TerminalView {
    assume_yes: bool,
}

impl TerminalView {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl BoardView for TerminalView {
    fn show_session(&self, session: &SessionState) {
        println!("{}", format_session(session));
    }

    fn show_user(&self, user_id: &str) {
        println!("Пользователь: {user_id}");
    }

    fn render_posts(&self, table: &PostTable) {
        println!("{}", format_table(table));
    }

    fn render_pagination(&self, pagination: Option<&Pagination>) {
        if let Some(pagination) = pagination {
            println!("{}", format_pagination(pagination));
        }
    }

    fn show_post_details(&self, post: &Post) {
        println!("{}", format_post(post));
    }

    fn hide_post_details(&self) {}

    fn render_form(&self, form: &PostForm) {
        if form.is_open() {
            println!("{}: {}", form.heading(), form.title());
        }
    }

    fn notify(&self, message: &str) {
        println!("{message}");
    }

    fn report_error(&self, message: &str) {
        eprintln!("{message}");
    }

    // Такие сбои уже пишет подписчик tracing.
    fn log_failure(&self, _message: &str) {}

    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        print!("{message} [y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(_) => false,
        }
    }

    fn navigate(&self, _route: Route) {}
}

fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "д" | "да"
    )
}

pub fn format_session(session: &SessionState) -> String {
    match (session.is_logged_in, session.user_id.as_deref()) {
        (true, Some(user_id)) => format!("Вход выполнен: {user_id}"),
        (true, None) => "Вход выполнен".to_string(),
        (false, _) => "Гость".to_string(),
    }
}

pub fn format_table(table: &PostTable) -> String {
    match table {
        PostTable::Empty { .. } => EMPTY_TABLE_TEXT.to_string(),
        PostTable::Rows(rows) => rows
            .iter()
            .map(|row| {
                format!(
                    "{:>5}  {}  ({}, {})",
                    row.id, row.title, row.author, row.created_at
                )
            })
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

pub fn format_pagination(pagination: &Pagination) -> String {
    pagination
        .controls
        .iter()
        .map(|control| {
            if control.disabled {
                "·".to_string()
            } else if control.active {
                format!("[{}]", control.label())
            } else {
                control.label()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn format_post(post: &Post) -> String {
    format!(
        "#{} {}\nавтор: {}\nдата: {}\n\n{}",
        post.id,
        post.title,
        post.author,
        post.created_at_display(),
        post.content
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use board_core::PostRow;

    fn post() -> Post {
        Post {
            id: 7,
            title: "Hello".to_string(),
            content: "World".to_string(),
            author: "alice".to_string(),
            created_at: "2024-05-01 10:00:00".to_string(),
        }
    }

    #[test]
    fn first_page_strip_dims_previous() {
        let pagination = Pagination::build(3, 1, "").expect("pagination");
        assert_eq!(format_pagination(&pagination), "· [1] 2 3 »");
    }

    #[test]
    fn last_page_strip_dims_next() {
        let pagination = Pagination::build(3, 3, "").expect("pagination");
        assert_eq!(format_pagination(&pagination), "« 1 2 [3] ·");
    }

    #[test]
    fn middle_page_strip_has_both_arrows() {
        let pagination = Pagination::build(3, 2, "x").expect("pagination");
        assert_eq!(format_pagination(&pagination), "« 1 [2] 3 »");
    }

    #[test]
    fn empty_table_prints_placeholder() {
        let table = PostTable::from_posts(&[]);
        assert_eq!(format_table(&table), EMPTY_TABLE_TEXT);
    }

    #[test]
    fn rows_print_one_line_per_post() {
        let table = PostTable::Rows(vec![PostRow::from(&post())]);
        assert_eq!(
            format_table(&table),
            "    7  Hello  (alice, 2024-05-01 10:00)"
        );
    }

    #[test]
    fn post_details_include_content() {
        let text = format_post(&post());
        assert!(text.starts_with("#7 Hello"));
        assert!(text.ends_with("World"));
    }

    #[test]
    fn session_line_shows_user() {
        let session = SessionState {
            is_logged_in: true,
            user_id: Some("alice".to_string()),
        };
        assert_eq!(format_session(&session), "Вход выполнен: alice");
        assert_eq!(format_session(&SessionState::default()), "Гость");
    }

    #[test]
    fn confirmation_accepts_yes_variants() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" Да "));
        assert!(!is_yes(""));
        assert!(!is_yes("nope"));
    }
}
