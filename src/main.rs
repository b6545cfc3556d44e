use std::io::Write as _;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};

use lawchat::category::{Category, CategoryError};
use lawchat::download::{self, DEFAULT_FILE_NAME, DownloadError};
use lawchat::format::{self, APOLOGY_TEXT};
use lawchat::transport::{ChatConfig, ConfigError, HttpChatTransport, TransportError};
use lawchat::view::{ChatView, Submission};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Category(#[from] CategoryError),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Download(#[from] DownloadError),
    #[error("no answer: {0}")]
    Rejected(lawchat::SessionError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "lawchat", about = "AI 법률 상담 chat client")]
struct Cli {
    /// Chat API base URL (overrides the built-in default).
    #[arg(long, env = "LAWCHAT_API_BASE_URL")]
    base_url: Option<String>,

    /// Log debug output to stderr.
    #[arg(long, short, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive chat.
    Chat {
        /// labor, housing, consumer or traffic (default labor).
        #[arg(long)]
        category: Option<String>,

        /// Write the conversation as HTML to this file after every turn.
        #[arg(long)]
        transcript: Option<PathBuf>,
    },
    /// Ask a single question and print the answer.
    Ask {
        #[arg(long)]
        category: Option<String>,

        question: String,
    },
    /// List the consultation categories.
    Categories,
    /// Save the statute dataset served by the API.
    DownloadLaws {
        #[arg(long, default_value = DEFAULT_FILE_NAME)]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    let level = if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let mut config = ChatConfig::from_env()?;
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url);
    }
    let transport = HttpChatTransport::new(&config)?;
    tracing::debug!(base_url = transport.base_url(), "transport ready");

    match cli.command {
        Command::Chat { category, transcript } => {
            let category = Category::from_query(category.as_deref())?;
            run_chat(&transport, category, transcript.as_deref()).await
        }
        Command::Ask { category, question } => {
            let category = Category::from_query(category.as_deref())?;
            run_ask(&transport, category, &question).await
        }
        Command::Categories => {
            run_categories();
            Ok(())
        }
        Command::DownloadLaws { output } => {
            let bytes = download::download_laws(transport.client(), transport.base_url(), &output).await?;
            println!("saved {bytes} bytes to {}", output.display());
            Ok(())
        }
    }
}

fn run_categories() {
    for category in Category::ALL {
        println!("{:<10} {} ({})", category.slug(), category.display_name(), category.summary());
    }
}

async fn run_ask(transport: &HttpChatTransport, category: Category, question: &str) -> Result<(), CliError> {
    let mut view = ChatView::new(category);
    match view.submit(question, transport).await {
        Submission::Answered(reply) => {
            println!("{}", format::format_text(&reply));
            Ok(())
        }
        Submission::Failed(e) => {
            println!("{APOLOGY_TEXT}");
            Err(e.into())
        }
        Submission::Ignored(e) => Err(CliError::Rejected(e)),
    }
}

async fn run_chat(transport: &HttpChatTransport, category: Category, transcript: Option<&Path>) -> Result<(), CliError> {
    let mut view = ChatView::new(category);
    print_welcome(&view);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt(&view)?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();

        if let Some(command) = input.strip_prefix('/') {
            match parse_command(command) {
                ReplCommand::Quit => break,
                ReplCommand::Help => print_help(),
                ReplCommand::Examples => print_examples(&view),
                ReplCommand::Category(slug) => match slug.parse::<Category>() {
                    Ok(next) => {
                        if view.change_category(next) {
                            print_welcome(&view);
                        }
                    }
                    Err(e) => println!("{e}"),
                },
                ReplCommand::Example(n) => match n.checked_sub(1).and_then(|i| view.example(i)) {
                    Some(question) => {
                        println!("나> {question}");
                        send(&mut view, transport, question).await;
                    }
                    None => println!("예시 질문 번호가 올바르지 않습니다."),
                },
                ReplCommand::Unknown => print_help(),
            }
        } else {
            send(&mut view, transport, input).await;
        }

        if let Some(path) = transcript {
            tokio::fs::write(path, view.render_document()).await?;
        }
    }
    Ok(())
}

async fn send(view: &mut ChatView, transport: &HttpChatTransport, text: &str) {
    match view.submit(text, transport).await {
        Submission::Answered(reply) => println!("\nAI> {}\n", format::format_text(&reply)),
        Submission::Failed(_) => println!("\nAI> {APOLOGY_TEXT}\n"),
        Submission::Ignored(_) => {}
    }
}

// =============================================================================
// REPL COMMANDS
// =============================================================================

#[derive(Debug, PartialEq, Eq)]
enum ReplCommand<'a> {
    Quit,
    Help,
    Examples,
    Category(&'a str),
    Example(usize),
    Unknown,
}

fn parse_command(command: &str) -> ReplCommand<'_> {
    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("quit" | "exit"), None) => ReplCommand::Quit,
        (Some("help"), None) => ReplCommand::Help,
        (Some("examples"), None) => ReplCommand::Examples,
        (Some("category"), Some(slug)) => ReplCommand::Category(slug),
        (Some(n), None) => n.parse().map_or(ReplCommand::Unknown, ReplCommand::Example),
        _ => ReplCommand::Unknown,
    }
}

fn prompt(view: &ChatView) -> std::io::Result<()> {
    let name = view
        .session()
        .category()
        .map_or("", Category::display_name);
    print!("[{name}] 나> ");
    std::io::stdout().flush()
}

fn print_welcome(view: &ChatView) {
    if let Some(category) = view.session().category() {
        println!("\n== {} 상담 ==\n{}\n", category.display_name(), category.intro_message());
    }
    print_examples(view);
}

fn print_examples(view: &ChatView) {
    let Some(category) = view.session().category() else {
        return;
    };
    println!("예시 질문 (/번호 로 보내기):");
    for (i, example) in category.examples().iter().enumerate() {
        println!("  /{} {} - {}", i + 1, example.label, example.question);
    }
    println!();
}

fn print_help() {
    println!("/category <labor|housing|consumer|traffic>  상담 분야 변경");
    println!("/examples                                   예시 질문 보기");
    println!("/<번호>                                      예시 질문 보내기");
    println!("/quit                                       종료");
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
