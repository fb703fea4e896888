/// Version injected at compile time via USERCACHE_VERSION env var (set by CI/CD),
/// or "dev" for local builds.
pub const VERSION: &str = match option_env!("USERCACHE_VERSION") {
    Some(v) => v,
    None => "dev",
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use usercache::api::http::format_api_error;
use usercache::api::{ClientConfig, ClientError, ResourceClient};
use usercache::config::Config;
use usercache::output::OutputFormat;
use usercache::resource::ResourceManager;

/// Typed client and cache for the user API
#[derive(Parser, Debug)]
#[command(name = "usercache", version, about, long_about = None)]
struct Args {
    /// API base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// API key
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Log in with this username before running the command
    #[arg(short, long, global = true)]
    username: Option<String>,

    /// Password used together with --username
    #[arg(short, long, global = true)]
    password: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "json", global = true)]
    format: OutputFormat,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    /// Save the effective base URL, API key and username to the config file
    #[arg(long, global = true)]
    remember: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Walk through login, caching, lookup, creation and summaries
    Demo,
    /// List users
    List {
        /// Only active users
        #[arg(long)]
        active: bool,
    },
    /// Find a user by email
    Find { email: String },
    /// Search users by name or email
    Search { term: String },
    /// Create a user
    Create { name: String, email: String },
    /// Summary statistics about users
    Summary,
    /// Client statistics
    Stats,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let Some(tracing_level) = level.to_tracing_level() else {
        return Ok(None);
    };

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {:?}", log_path))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("usercache {} started with log level: {:?}", VERSION, level);
    tracing::info!("Log file: {:?}", log_path);

    Ok(Some(guard))
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("usercache").join("usercache.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".usercache").join("usercache.log");
    }
    PathBuf::from("usercache.log")
}

fn main() -> Result<()> {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level)?;

    let mut config = Config::load();
    if let Some(base_url) = &args.base_url {
        config.base_url = Some(base_url.clone());
    }
    if let Some(api_key) = &args.api_key {
        config.api_key = Some(api_key.clone());
    }
    if let Some(username) = &args.username {
        config.username = Some(username.clone());
    }

    let base_url = config.effective_base_url();
    tracing::info!("Using base URL: {}", base_url);

    let client = ResourceClient::simulated(
        ClientConfig::new(&base_url).with_api_key(config.effective_api_key()),
    );
    let mut manager = ResourceManager::new(client);

    if let (Some(username), Some(password)) = (&config.username, &args.password) {
        let ok = manager.client_mut().login(username, password);
        eprintln!("Login {}: {}", username, if ok { "successful" } else { "failed" });
    }

    if args.remember {
        config.base_url = Some(base_url.clone());
        config.save().context("Failed to save configuration")?;
    }

    let result = match args.command.unwrap_or(Command::Demo) {
        Command::Demo => run_demo(&mut manager, args.format),
        Command::List { active } => {
            let users = if active {
                manager.active_users()
            } else {
                manager.refresh().map(|_| manager.cached().to_vec())
            };
            print_result(users, args.format)
        }
        Command::Find { email } => print_result(manager.find_by_email(&email), args.format),
        Command::Search { term } => print_result(manager.search(&term), args.format),
        Command::Create { name, email } => {
            print_result(manager.create_and_cache(&name, &email), args.format)
        }
        Command::Summary => print_result(manager.summary(), args.format),
        Command::Stats => {
            println!("{}", args.format.render(&manager.client().stats())?);
            Ok(())
        }
    };

    if let Err(err) = &result {
        tracing::error!("Command failed: {:?}", err);
    }
    result
}

/// Print a client result, or turn its error into a user-facing one
fn print_result<T: serde::Serialize>(result: Result<T, ClientError>, format: OutputFormat) -> Result<()> {
    match result {
        Ok(value) => {
            println!("{}", format.render(&value)?);
            Ok(())
        }
        Err(e) => {
            let message = format_api_error(&e);
            Err(anyhow::Error::new(e).context(message))
        }
    }
}

fn run_demo(manager: &mut ResourceManager, format: OutputFormat) -> Result<()> {
    println!("=== usercache demo ===\n");

    println!("1. Authentication:");
    if manager.client().is_authenticated() {
        println!("Already logged in\n");
    } else {
        let ok = manager.client_mut().login("admin", "secret");
        println!("Login result: {}\n", ok);
    }

    println!("2. Fetching users:");
    manager.refresh().context("Failed to fetch users")?;
    println!("Refreshed {} users", manager.cached().len());
    let active = manager.active_users()?;
    let names: Vec<&str> = active.iter().map(|u| u.name.as_str()).collect();
    println!("Active users: {:?}\n", names);

    println!("3. Finding user:");
    match manager.find_by_email("alice@example.com")? {
        Some(alice) => println!("Found user: {} (ID: {})\n", alice.name, alice.id),
        None => println!("alice@example.com not found\n"),
    }

    println!("4. Creating new user:");
    match manager.create_and_cache("David", "david@example.com") {
        Ok(user) => println!("New user created:\n{}\n", format.render(&user)?),
        Err(e) => println!("Error creating user: {}\n", format_api_error(&e)),
    }

    println!("5. User summary:");
    println!("{}\n", format.render(&manager.summary()?)?);

    println!("6. Client statistics:");
    println!("{}", format.render(&manager.client().stats())?);

    Ok(())
}
