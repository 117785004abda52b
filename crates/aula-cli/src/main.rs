//! aula CLI — register, sign in, and browse course content from a terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "aula", version, about = "Learning portal: accounts, courses and quizzes")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter config and sample course content
    Init,

    /// Create a new account
    Register {
        #[arg(long)]
        username: String,

        #[arg(long)]
        password: String,
    },

    /// Sign in and keep the session
    Login {
        #[arg(long)]
        username: String,

        #[arg(long)]
        password: String,
    },

    /// Sign out
    Logout,

    /// Show who is signed in
    Whoami,

    /// List courses
    Courses,

    /// List the topics of a course
    Topics {
        /// Course slug
        course: String,
    },

    /// Show a topic
    Topic {
        /// Course slug
        course: String,

        /// Topic slug
        topic: String,
    },

    /// Show a topic's quiz
    Quiz {
        /// Course slug
        course: String,

        /// Topic slug
        topic: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = QuizFormat::Text)]
        format: QuizFormat,
    },

    /// Score a finished quiz
    Score {
        /// Number of correct answers (non-numbers count as 0)
        #[arg(long, default_value = "0")]
        correct: String,

        /// Number of questions (non-numbers count as 0)
        #[arg(long, default_value = "0")]
        total: String,
    },

    /// Check course content for duplicate slugs and empty topics
    Validate,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum QuizFormat {
    Text,
    Json,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("aula=info,aula_core=info")),
        )
        .init();

    let cli = Cli::parse();

    let result = aula_core::load_config_from(cli.config.as_deref()).and_then(|config| {
        match cli.command {
            Commands::Init => commands::init::execute(&config),
            Commands::Register { username, password } => {
                commands::account::register(&config, &username, &password)
            }
            Commands::Login { username, password } => {
                commands::account::login(&config, &username, &password)
            }
            Commands::Logout => commands::account::logout(&config),
            Commands::Whoami => commands::account::whoami(&config),
            Commands::Courses => commands::browse::courses(&config),
            Commands::Topics { course } => commands::browse::topics(&config, &course),
            Commands::Topic { course, topic } => commands::browse::topic(&config, &course, &topic),
            Commands::Quiz {
                course,
                topic,
                format,
            } => commands::quiz::show(&config, &course, &topic, format),
            Commands::Score { correct, total } => commands::quiz::score(&config, &correct, &total),
            Commands::Validate => commands::validate::execute(&config),
        }
    });

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
