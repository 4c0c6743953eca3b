#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

use std::env;
use std::io;
use std::path;
use std::process;

use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ChatHistory;
use crate::domain::models::QueryPrompt;
use crate::domain::models::LLM_TYPES;
use crate::domain::services::actions::help_text;
use crate::infrastructure::backends::BackendManager;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    process::exit(0);
}

fn log_dir() -> path::PathBuf {
    if let Ok(dir) = env::var("RAGCONSOLE_LOG_DIR") {
        return path::PathBuf::from(dir);
    }

    return dirs::cache_dir()
        .unwrap_or_else(|| return path::PathBuf::from("."))
        .join("ragconsole");
}

pub fn log_path() -> path::PathBuf {
    return log_dir().join("debug.log");
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(&config_file_path).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

/// Relative paths would resolve against the server's working directory, so
/// they are refused before any request is made.
pub fn validate_index_path(project_path: &str) -> Result<()> {
    if !path::Path::new(project_path).is_absolute() {
        bail!("Please provide an absolute path for indexing.");
    }

    return Ok(());
}

/// Line printed when a headless command fails. Failures of these commands are
/// expected outcomes, not crashes, so they skip the crash report.
pub fn failure_message(err: &anyhow::Error) -> String {
    return format!("Error: {err:#}");
}

fn exit_on_failure(res: Result<()>) {
    if let Err(err) = res {
        tracing::error!(error = ?err, "Headless command failed");
        eprintln!("{}", Paint::red(failure_message(&err)));
        process::exit(1);
    }
}

async fn run_index(project_path: &str) -> Result<()> {
    validate_index_path(project_path)?;

    println!("{}", Paint::yellow("Indexing..."));
    let res = BackendManager::get().index(project_path).await?;
    if !res.is_success() {
        bail!(res.message);
    }

    println!("{}", Paint::green(res.message));
    return Ok(());
}

async fn run_query(question: &str) -> Result<()> {
    let prompt = QueryPrompt::new(
        question,
        &Config::get(ConfigKey::LlmType),
        Config::get_bool(ConfigKey::Rerank),
        &ChatHistory::default(),
    );

    let res = BackendManager::get().query(&prompt).await?;
    println!("{}\n", res.answer);

    if res.sources.is_empty() {
        return Ok(());
    }

    println!("{}", Paint::new("SOURCES").bold().underline());
    for (idx, source) in res.sources.iter().enumerate() {
        println!("\n{}", Paint::cyan(format!("({})", idx + 1)));
        println!("{}", source.as_lines().join("\n"));
    }

    return Ok(());
}

async fn run_settings() -> Result<()> {
    let snapshot = BackendManager::get().get_config().await?;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_debug() -> Command {
    return Command::new("debug")
        .about("Debug helpers for RAG Console")
        .hide(true)
        .subcommand(
            Command::new("log-path").about("Output path to debug log file generated when running RAG Console with environment variable RUST_LOG=ragconsole")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        );
}

fn subcommand_index() -> Command {
    return Command::new("index")
        .about("Indexes the documents under an absolute path on the server, then exits.")
        .arg(
            Arg::new("path")
                .short('p')
                .long("path")
                .help("Absolute path of the project to index.")
                .num_args(1)
                .required(true),
        );
}

fn subcommand_query() -> Command {
    return Command::new("query")
        .about("Asks a single question without chat history, prints the answer and its sources, then exits.")
        .arg(
            Arg::new("question")
                .help("Question to ask.")
                .num_args(1..)
                .required(true),
        );
}

fn arg_health_check_timeout() -> Arg {
    return Arg::new(ConfigKey::HealthCheckTimeout.to_string())
        .long(ConfigKey::HealthCheckTimeout.to_string())
        .env("RAGCONSOLE_HEALTH_CHECK_TIMEOUT")
        .num_args(1)
        .help(format!(
            "Milliseconds to wait for the server to answer the start-up configuration request. [default: {}]",
            Config::default(ConfigKey::HealthCheckTimeout)
        ))
        .global(true);
}

fn arg_llm_type() -> Arg {
    return Arg::new(ConfigKey::LlmType.to_string())
        .short('l')
        .long(ConfigKey::LlmType.to_string())
        .env("RAGCONSOLE_LLM_TYPE")
        .num_args(1)
        .help("LLM variant to answer questions with. Leave empty to use the server default.")
        .value_parser(PossibleValuesParser::new(LLM_TYPES))
        .global(true);
}

fn arg_rerank() -> Arg {
    return Arg::new(ConfigKey::Rerank.to_string())
        .short('r')
        .long(ConfigKey::Rerank.to_string())
        .env("RAGCONSOLE_RERANK")
        .num_args(1)
        .help(format!(
            "Rerank retrieved sources before answering. [default: {}]",
            Config::default(ConfigKey::Rerank)
        ))
        .value_parser(PossibleValuesParser::new(["true", "false"]))
        .global(true);
}

fn arg_server_url() -> Arg {
    return Arg::new(ConfigKey::ServerURL.to_string())
        .short('u')
        .long(ConfigKey::ServerURL.to_string())
        .env("RAGCONSOLE_SERVER_URL")
        .num_args(1)
        .help(format!(
            "Base URL of the RAG server. [default: {}]",
            Config::default(ConfigKey::ServerURL)
        ))
        .global(true);
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("COMMANDS:")
                || line.starts_with("HOTKEYS:")
                || line.starts_with("SETTINGS PANEL:")
            {
                return Paint::new(format!("CHAT {line}"))
                    .underline()
                    .bold()
                    .to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}\nCommit: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    );

    return Command::new("ragconsole")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(Command::new("chat").about("Start the interactive console. This is the default."))
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .subcommand(subcommand_index())
        .subcommand(subcommand_query())
        .subcommand(Command::new("settings").about("Prints the server's current configuration as JSON, then exits."))
        .arg(arg_health_check_timeout())
        .arg(arg_llm_type())
        .arg(arg_rerank())
        .arg(arg_server_url())
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("RAGCONSOLE_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        );
}

/// Parses the command line and runs any headless subcommand. Returns true when
/// the interactive console should start.
pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("log-path", _)) => {
                    println!("{}", log_path().to_string_lossy());
                }
                Some(("enum-config", _)) => {
                    println!("{}", ConfigKey::VARIANTS.join("\n"));
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }

            return Ok(false);
        }
        Some(("chat", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
            return Ok(false);
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        Some(("index", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            if let Some(project_path) = subcmd_matches.get_one::<String>("path") {
                exit_on_failure(run_index(project_path).await);
            }
            return Ok(false);
        }
        Some(("query", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            let question = subcmd_matches
                .get_many::<String>("question")
                .into_iter()
                .flatten()
                .map(|word| return word.as_str())
                .collect::<Vec<&str>>()
                .join(" ");
            exit_on_failure(run_query(&question).await);
            return Ok(false);
        }
        Some(("settings", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            exit_on_failure(run_settings().await);
            return Ok(false);
        }
        _ => {
            Config::load(build(), vec![&matches]).await?;
        }
    }

    return Ok(true);
}
