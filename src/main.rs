mod completion;
mod console;
mod credentials;
mod error;
mod quiz;
mod session;

use std::io::{BufRead, Write};
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use dotenv::dotenv;
use log::{debug, error, info};

use completion::{ChatGptCompleter, DEFAULT_MODEL};
use console::Console;
use credentials::DEFAULT_API_KEY_VAR;
use quiz::ai_helper::QuizHelper;
use session::SessionReport;

const MISSING_KEY_BANNER: &str = "No OpenAI API key found — running in DEMO MODE.";
const FORCED_DEMO_BANNER: &str = "Running in DEMO MODE.";

#[derive(Parser)]
#[command(name = "quiz-bot")]
#[command(version, about = "AI Quiz Bot - generated questions, judged answers")]
struct Cli {
    /// Model used for both generating questions and judging answers
    #[arg(long, env = "QUIZ_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Environment variable holding the API key
    #[arg(long, default_value = DEFAULT_API_KEY_VAR)]
    api_key_env: String,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    timeout: u64,

    /// Play the offline demo quiz even if an API key is available
    #[arg(long)]
    demo: bool,
}

#[derive(Debug, PartialEq, Eq)]
enum Mode {
    Demo { banner: &'static str },
    Live { api_key: String },
}

fn select_mode(force_demo: bool, api_key: Option<String>) -> Mode {
    match api_key {
        _ if force_demo => Mode::Demo {
            banner: FORCED_DEMO_BANNER,
        },
        Some(api_key) => Mode::Live { api_key },
        None => Mode::Demo {
            banner: MISSING_KEY_BANNER,
        },
    }
}

async fn run<R: BufRead, W: Write>(
    cli: &Cli,
    mode: Mode,
    console: &mut Console<R, W>,
) -> error::Result<SessionReport> {
    match mode {
        Mode::Demo { banner } => {
            info!("Starting demo quiz");
            console.say(banner)?;
            quiz::demo::run_demo(console)
        }
        Mode::Live { api_key } => {
            info!("Starting quiz with model {}", cli.model);
            let completer =
                ChatGptCompleter::new(&api_key, &cli.model, Duration::from_secs(cli.timeout))?;
            let helper = QuizHelper::new(completer);
            session::run_quiz(&helper, console).await
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Loaded before the logger so RUST_LOG may come from .env too.
    let dotenv_result = dotenv();
    pretty_env_logger::init();
    if let Err(err) = dotenv_result {
        debug!("No .env loaded: {err}");
    }

    let cli = Cli::parse();
    let mode = select_mode(cli.demo, credentials::resolve_api_key(&cli.api_key_env));

    let stdin = std::io::stdin();
    let mut console = Console::new(stdin.lock(), std::io::stdout());

    match run(&cli, mode, &mut console).await {
        Ok(report) => {
            debug!("Session ended: {report:?}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("Quiz failed: {err}");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
