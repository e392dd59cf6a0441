use std::error::Error;
use std::fmt;
use std::path::PathBuf;
use std::process;
use std::rc::Rc;

use anyhow::{Context, Result, anyhow};
use board_client::{FileTokenStore, HttpTransport, connect};
use board_core::{ApiError, Board, DeleteOutcome};
use clap::{Parser, Subcommand};

mod logging;
mod settings;
mod terminal;

use logging::init_logging;
use settings::Settings;
use terminal::TerminalView;

type CliBoard = Board<HttpTransport, TerminalView>;

#[derive(Debug, Parser)]
#[command(name = "board-cli", version, about = "CLI клиент доски объявлений")]
struct Cli {
    /// Адрес сервера (перекрывает BOARD_SERVER).
    #[arg(long, global = true)]
    server: Option<String>,

    /// Файл с токеном (перекрывает BOARD_TOKEN_FILE).
    #[arg(long, global = true)]
    token_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Статус входа.
    Status,
    /// Текущий пользователь.
    Whoami,
    /// Вход пользователя.
    Login {
        #[arg(long)]
        userid: String,
        #[arg(long)]
        password: String,
    },
    /// Выход.
    Logout,
    /// Регистрация пользователя.
    Register {
        #[arg(long)]
        userid: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    /// Страница списка постов.
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Пост по id.
    Show {
        #[arg(long)]
        id: i64,
    },
    /// Создание поста.
    ///
    /// Без `--author` автором становится текущий пользователь.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        #[arg(long)]
        author: Option<String>,
    },
    /// Обновление поста.
    ///
    /// Если `--content` не указан, используется текущее содержимое поста.
    Update {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: Option<String>,
    },
    /// Удаление поста (без `--yes` спрашивает подтверждение).
    Delete {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        yes: bool,
    },
    /// Запрос к защищённому эндпоинту с токеном.
    Protected,
}

impl Command {
    fn assume_yes(&self) -> bool {
        matches!(self, Self::Delete { yes: true, .. })
    }

    /// Вход и регистрация сами сообщают о неверных данных.
    fn suggests_login(&self) -> bool {
        !matches!(self, Self::Login { .. } | Self::Register { .. })
    }
}

const LOGIN_HINT: &str = "требуется авторизация: выполните `board-cli login ...`";

/// Ошибка API, о которой экран уже сообщил пользователю.
#[derive(Debug)]
struct Shown {
    source: ApiError,
    hint: Option<&'static str>,
}

impl fmt::Display for Shown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source.user_message())
    }
}

impl Error for Shown {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(err) = run().await {
        if let Some(report) = failure_report(&err) {
            eprintln!("{report}");
        }
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let settings = Settings::from_env()?.with_overrides(cli.server, cli.token_file);

    init_logging(&settings.log_level)?;

    let client = connect(settings.server.clone(), settings.timeouts())
        .with_context(|| format!("не удалось создать клиент для {}", settings.server))?;
    let tokens = Rc::new(FileTokenStore::new(settings.token_file.clone()));
    let board = Board::new(client, TerminalView::new(cli.command.assume_yes()), tokens);
    board.session.restore_token();

    execute(&board, cli.command).await
}

async fn execute(board: &CliBoard, command: Command) -> Result<()> {
    let suggests_login = command.suggests_login();
    let map_api_error = move |err: ApiError| shown_error(err, suggests_login);

    match command {
        Command::Status => {
            board.session.check_login_status().await;
        }
        Command::Whoami => {
            if board.session.get_current_user().await.is_none() {
                println!("Пользователь не определён");
            }
        }
        Command::Login { userid, password } => {
            board
                .session
                .login(&userid, &password)
                .await
                .map_err(map_api_error)?;
        }
        Command::Logout => {
            board.session.logout().await.map_err(map_api_error)?;
        }
        Command::Register {
            userid,
            password,
            confirm_password,
        } => {
            board
                .session
                .register(&userid, &password, &confirm_password)
                .await
                .map_err(map_api_error)?;
        }
        Command::List { page, search } => {
            board
                .posts
                .load_posts(page, &search)
                .await
                .map_err(map_api_error)?;
        }
        Command::Show { id } => {
            board
                .editor
                .fetch_post_details(id)
                .await
                .map_err(map_api_error)?;
        }
        Command::Create {
            title,
            content,
            author,
        } => {
            let author = match author {
                Some(author) => author,
                None => board
                    .session
                    .get_current_user()
                    .await
                    .ok_or_else(|| anyhow!("автор не указан: передайте --author или войдите"))?,
            };
            board
                .editor
                .create_post(&title, &content, &author)
                .await
                .map_err(map_api_error)?;
        }
        Command::Update { id, title, content } => {
            let current = board.editor.edit_post(id).await.map_err(map_api_error)?;
            let content = content.unwrap_or(current.content);
            board
                .editor
                .update_post(id, &title, &content)
                .await
                .map_err(map_api_error)?;
        }
        Command::Delete { id, .. } => {
            let outcome = board.editor.delete_post(id).await.map_err(map_api_error)?;
            if outcome == DeleteOutcome::Cancelled {
                println!("Удаление отменено");
            }
        }
        Command::Protected => {
            let value = board
                .session
                .fetch_protected()
                .await
                .map_err(map_api_error)?;
            let pretty = serde_json::to_string_pretty(&value).context("не удалось вывести ответ")?;
            println!("{pretty}");
        }
    }

    Ok(())
}

fn shown_error(err: ApiError, suggests_login: bool) -> anyhow::Error {
    let hint = (suggests_login && matches!(err.status(), Some(401 | 403))).then_some(LOGIN_HINT);
    anyhow::Error::new(Shown { source: err, hint })
}

/// Что напечатать в stderr перед выходом с кодом 1.
///
/// Ошибки API экран уже показал, от них остаётся только подсказка.
fn failure_report(err: &anyhow::Error) -> Option<String> {
    match err.downcast_ref::<Shown>() {
        Some(shown) => shown.hint.map(str::to_string),
        None => Some(format!("Ошибка: {err:#}")),
    }
}
