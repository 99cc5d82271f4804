use std::io::{self, BufRead, IsTerminal, Write};
use std::process;

use anyhow::{Context, Result, anyhow};
use board_client::{DEFAULT_CONNECT_TIMEOUT, HttpClient};
use board_core::{
    BOARD_TITLE, BoardApi, BoardError, BoardFooter, ComposeDraft, FeedPhase, Genre, LoginForm,
    NO_SESSION_MESSAGE, NavState, POST_CREATED_MESSAGE, Post, PostFeed, Route, Session,
    SessionStore, sign_in, sign_out, submit_post,
};
use clap::{Parser, Subcommand};
use tracing::debug;

mod logging;
mod settings;
mod storage;

use logging::init_logging;
use settings::Settings;
use storage::FileStorage;

const CONTENT_PREVIEW_CHARS: usize = 80;

#[derive(Debug, Parser)]
#[command(name = "board-cli", version, about = "CLI клиент доски объявлений")]
struct Cli {
    /// Адрес бэкенда; перекрывает `BOARD_API_URL`.
    #[arg(long, global = true)]
    server: Option<String>,

    /// Размер страницы ленты; перекрывает `BOARD_PAGE_SIZE`.
    #[arg(long, global = true, value_parser = clap::value_parser!(u32).range(1..))]
    page_size: Option<u32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Вход; после успеха показывает доску.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Выход: удаляет сохранённую сессию.
    Logout,
    /// Лента постов.
    ///
    /// Без `--pages` в терминале спрашивает, грузить ли следующую страницу.
    Board {
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        pages: Option<u32>,
    },
    /// Список жанров.
    Genres,
    /// Публикация поста (требует вход).
    Write {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        /// Идентификатор жанра из `board-cli genres`.
        #[arg(long)]
        genre: Option<i64>,
    },
    /// Текущая сессия и состояние навигации.
    Whoami,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageMode {
    /// Загрузить не больше N страниц.
    Fixed(u32),
    /// Спрашивать перед каждой следующей страницей.
    Interactive,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("오류: {err}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let settings = Settings::from_env()?.with_overrides(cli.server, cli.page_size);
    init_logging(&settings.log_level)?;
    debug!(
        api_url = %settings.api_url,
        page_size = settings.page_size,
        session_dir = %settings.session_dir.display(),
        "settings loaded"
    );

    let api = HttpClient::with_timeouts(
        settings.api_url.clone(),
        DEFAULT_CONNECT_TIMEOUT.min(settings.http_timeout()),
        settings.http_timeout(),
    )
    .map_err(map_client_error)?;
    let store = SessionStore::new(FileStorage::new(settings.session_dir.clone()));

    match cli.command {
        Command::Login { email, password } => {
            let session = sign_in(&api, &store, &LoginForm::new(email, password))
                .await
                .map_err(map_client_error)?;
            println!("로그인 성공");
            show_board(&api, Some(&session), settings.page_size, page_mode(None)).await?;
        }
        Command::Logout => {
            sign_out(&store)
                .map_err(BoardError::from)
                .map_err(map_client_error)?;
            println!("로그아웃되었습니다. ({})", Route::Login.path());
        }
        Command::Board { pages } => {
            let session = store.get();
            show_board(&api, session.as_ref(), settings.page_size, page_mode(pages)).await?;
        }
        Command::Genres => {
            let genres = api.list_genres().await.map_err(map_client_error)?.genres;
            print_genres(&genres);
        }
        Command::Write {
            title,
            content,
            genre,
        } => {
            let Some(session) = store.get() else {
                return Err(anyhow!(NO_SESSION_MESSAGE));
            };
            print_shell(Some(&session));

            let genres = api.list_genres().await.map_err(map_client_error)?.genres;
            let draft = ComposeDraft::new(title, content, genre);
            match submit_post(&api, &draft, Some(&session), &genres).await {
                Ok(post) => debug!(post_id = post.id, "post published"),
                Err(err @ BoardError::Validation { field: "genre_id", .. }) => {
                    print_genres(&genres);
                    return Err(map_client_error(err));
                }
                Err(err) => return Err(map_client_error(err)),
            }

            println!("{POST_CREATED_MESSAGE}");
            tokio::time::sleep(settings.redirect_delay).await;
            show_board(&api, Some(&session), settings.page_size, page_mode(None)).await?;
        }
        Command::Whoami => {
            let session = store.get();
            print_shell(session.as_ref());
            match &session {
                Some(session) => print_session(session),
                None => println!("세션이 없습니다."),
            }
            let route = if session.is_some() {
                Route::Board
            } else {
                Route::Login
            };
            println!("route: {}", route.path());
        }
    }

    Ok(())
}

fn page_mode(pages: Option<u32>) -> PageMode {
    match pages {
        Some(pages) => PageMode::Fixed(pages),
        None if io::stdin().is_terminal() => PageMode::Interactive,
        None => PageMode::Fixed(1),
    }
}

async fn show_board(
    api: &HttpClient,
    session: Option<&Session>,
    page_size: u32,
    mode: PageMode,
) -> Result<()> {
    print_shell(session);
    if let Some(session) = session {
        println!("{}", session.greeting());
    }

    let feed = PostFeed::new(page_size);
    feed.open(api).await.map_err(map_client_error)?;
    let mut printed = print_new_posts(feed.snapshot().posts(), 0);
    let mut loaded_pages = 1;

    while feed.phase() == FeedPhase::Idle {
        let wants_more = match mode {
            PageMode::Fixed(pages) => loaded_pages < pages,
            PageMode::Interactive => prompt_load_more()?,
        };
        if !wants_more {
            break;
        }

        match feed.load_next(api).await {
            Ok(_) => loaded_pages += 1,
            // Лента осталась в Idle, в интерактивном режиме можно повторить.
            Err(err) if mode == PageMode::Interactive => eprintln!("{}", err.user_message()),
            Err(err) => return Err(map_client_error(err)),
        }
        printed = print_new_posts(feed.snapshot().posts(), printed);
    }

    println!("{}", footer_line(feed.footer()));
    Ok(())
}

fn prompt_load_more() -> Result<bool> {
    print!("{}? [Enter / q] ", BoardFooter::LoadMore.label());
    io::stdout().flush().context("не удалось записать в stdout")?;

    let mut answer = String::new();
    let read = io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("не удалось прочитать stdin")?;
    if read == 0 {
        return Ok(false);
    }
    Ok(wants_more(&answer))
}

fn wants_more(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "" | "y" | "yes")
}

fn map_client_error(err: BoardError) -> anyhow::Error {
    let message = match &err {
        BoardError::Auth(message) => message.clone(),
        BoardError::Validation { field, message } => format!("{message} ({field})"),
        BoardError::Network(detail) | BoardError::Storage(detail) => {
            format!("{} ({detail})", err.user_message())
        }
    };
    anyhow!(message)
}

fn print_shell(session: Option<&Session>) {
    println!("{BOARD_TITLE} | {}", NavState::from_session(session).label());
}

fn print_session(session: &Session) {
    println!("{}", session.greeting());
    println!("  id: {}", session.id);
    println!("  nickname: {}", session.nickname);
    if let Some(email) = &session.email {
        println!("  email: {email}");
    }
}

fn print_new_posts(posts: &[Post], already_printed: usize) -> usize {
    for post in posts.iter().skip(already_printed) {
        println!("{}", format_post(post));
    }
    posts.len()
}

fn print_genres(genres: &[Genre]) {
    if genres.is_empty() {
        println!("장르가 없습니다.");
        return;
    }
    for genre in genres {
        println!("- [{}] {}", genre.id, genre.name);
    }
}

fn format_post(post: &Post) -> String {
    let mut meta = vec![post.author_name().to_string()];
    if let Some(genre) = &post.genre {
        meta.push(genre.name.clone());
    }
    if let Some(created_at) = post.created_at {
        meta.push(created_at.format("%Y-%m-%d %H:%M").to_string());
    }

    format!(
        "- [{}] {} ({})\n    {}",
        post.id,
        post.title,
        meta.join(", "),
        preview(&post.content)
    )
}

fn preview(content: &str) -> String {
    let line = content.lines().next().unwrap_or_default();
    if line.chars().count() <= CONTENT_PREVIEW_CHARS && content.lines().nth(1).is_none() {
        return line.to_string();
    }
    let cut: String = line.chars().take(CONTENT_PREVIEW_CHARS).collect();
    format!("{cut}...")
}

fn footer_line(footer: BoardFooter) -> String {
    match footer {
        BoardFooter::LoadMore => format!("[{}] board --pages N", footer.label()),
        other => format!("[{}]", other.label()),
    }
}
