//! pkConnector CLI - scriptable access to the admin console session

use clap::{Parser, Subcommand};
use pkconnector_core::auth::{submit_login, LoginOutcome, MockCredentialStore, SessionStore};
use pkconnector_core::config::Config;
use pkconnector_core::forms::LoginForm;
use pkconnector_core::routing::{NavigationOutcome, Router, USERS_PATH};
use pkconnector_core::storage::FileStore;
use pkconnector_core::users::{role_badge, User, UserRegistry};
use serde_json::json;
use tracing::debug;

#[derive(Parser)]
#[command(name = "pkconnector")]
#[command(author, version, about = "pkConnector admin console", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with one of the console accounts
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
        /// Where to go after signing in (e.g. /users)
        #[arg(long)]
        return_url: Option<String>,
    },

    /// Sign out and forget the persisted session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Navigate to a console URL and report where it leads
    Open { url: String },

    /// Browse the user directory
    Users {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// List users
    List {
        /// Only users whose name, email or company contains this text
        #[arg(short, long)]
        filter: Option<String>,
    },
    /// Show one user
    Show { id: u64 },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Get a configuration value
    Get { key: String },
    /// Set a configuration value
    Set { key: String, value: String },
    /// List configuration values and the resolved session store path
    List,
    /// Show config file path
    Path,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so `--format json` output stays parseable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pkconnector=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Login {
            email,
            password,
            return_url,
        } => cmd_login(&email, &password, return_url.as_deref(), cli.format, cli.quiet),
        Commands::Logout => cmd_logout(cli.format, cli.quiet),
        Commands::Whoami => cmd_whoami(cli.format),
        Commands::Open { url } => cmd_open(&url, cli.format),
        Commands::Users { action } => cmd_users(action, cli.format, cli.quiet),
        Commands::Config { action } => cmd_config(action, cli.format, cli.quiet),
    }
}

// ============================================================================
// Command Implementations
// ============================================================================

fn open_session(config: &Config) -> anyhow::Result<SessionStore<FileStore>> {
    let data_dir = config.data_dir()?;
    debug!(data_dir = %data_dir.display(), "Opening session store");
    Ok(SessionStore::new(
        FileStore::in_dir(data_dir),
        MockCredentialStore::demo(),
    ))
}

fn user_json(user: &User) -> serde_json::Value {
    json!({
        "id": user.id,
        "name": user.name,
        "email": user.email,
        "company": user.company,
        "role": user.role,
        "status": user.status,
        "badge": role_badge(user.role).as_str(),
    })
}

fn cmd_login(
    email: &str,
    password: &str,
    return_url: Option<&str>,
    format: OutputFormat,
    quiet: bool,
) -> anyhow::Result<()> {
    let config = Config::load()?;
    let mut session = open_session(&config)?;
    let mut router = Router::new();

    let form = LoginForm::new(email, password);
    match submit_login(&mut session, &mut router, &form, return_url)? {
        LoginOutcome::Invalid(errors) => Err(anyhow::anyhow!("{}", errors)),
        LoginOutcome::Rejected { message } => Err(anyhow::anyhow!("{}", message)),
        LoginOutcome::Succeeded { destination } => {
            let user = session
                .current_user()
                .ok_or_else(|| anyhow::anyhow!("Signed in but no user was restored"))?;
            match format {
                OutputFormat::Json => {
                    let out = json!({
                        "user": user_json(user),
                        "destination": destination.to_string(),
                    });
                    println!("{}", serde_json::to_string_pretty(&out)?);
                }
                OutputFormat::Text => {
                    if !quiet {
                        println!("Signed in as {} ({})", user.name, user.role);
                        println!("Redirected to {}", destination);
                    }
                }
            }
            Ok(())
        }
    }
}

fn cmd_logout(format: OutputFormat, quiet: bool) -> anyhow::Result<()> {
    let config = Config::load()?;
    let mut session = open_session(&config)?;
    let mut router = Router::new();
    let was_signed_in = session.is_logged_in();

    session.logout(&mut router)?;

    let destination = router
        .current()
        .map(|n| n.to_string())
        .unwrap_or_default();
    match format {
        OutputFormat::Json => {
            let out = json!({ "was_signed_in": was_signed_in, "destination": destination });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => {
            if !quiet {
                if was_signed_in {
                    println!("Signed out.");
                } else {
                    println!("No active session.");
                }
                println!("Redirected to {}", destination);
            }
        }
    }
    Ok(())
}

fn cmd_whoami(format: OutputFormat) -> anyhow::Result<()> {
    let config = Config::load()?;
    let session = open_session(&config)?;

    match (format, session.current_user()) {
        (OutputFormat::Json, user) => {
            let out = json!({
                "authenticated": session.is_logged_in(),
                "user": user.map(user_json),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        (OutputFormat::Text, Some(user)) => {
            println!("{} <{}>", user.name, user.email);
            println!("  Company: {}", user.company);
            println!("  Role: {}", user.role);
            println!("  Status: {}", user.status);
        }
        (OutputFormat::Text, None) => {
            println!("Not signed in.");
            println!("\nSign in with: pkconnector login --email <email> --password <password>");
        }
    }
    Ok(())
}

fn cmd_open(url: &str, format: OutputFormat) -> anyhow::Result<()> {
    let config = Config::load()?;
    let session = open_session(&config)?;
    let mut router = Router::new();

    let outcome = router.navigate_by_url(&session, url);
    let (kind, location) = match &outcome {
        NavigationOutcome::Entered(route) => ("entered", route.path().to_string()),
        NavigationOutcome::Blocked { redirect } => ("blocked", redirect.to_string()),
        NavigationOutcome::Redirected { to } => ("redirected", to.to_string()),
    };

    match format {
        OutputFormat::Json => {
            let out = json!({ "url": url, "outcome": kind, "location": location });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => match outcome {
            NavigationOutcome::Entered(route) => {
                println!("{} ({})", route.title(), route.path());
            }
            NavigationOutcome::Blocked { .. } => {
                println!("Sign in required. Redirected to {}", location);
            }
            NavigationOutcome::Redirected { .. } => {
                println!("No page at {}. Redirected to {}", url, location);
            }
        },
    }
    Ok(())
}

fn cmd_users(action: UserAction, format: OutputFormat, quiet: bool) -> anyhow::Result<()> {
    let config = Config::load()?;
    let session = open_session(&config)?;
    let mut router = Router::new();

    if let NavigationOutcome::Blocked { redirect } = router.navigate_by_url(&session, USERS_PATH) {
        return Err(anyhow::anyhow!(
            "Not signed in (redirected to {}). Run `pkconnector login` first.",
            redirect
        ));
    }

    let registry = UserRegistry::seeded();
    match action {
        UserAction::List { filter } => {
            let users: Vec<&User> = match filter.as_deref() {
                Some(query) => registry.filter(query),
                None => registry.list().iter().collect(),
            };
            match format {
                OutputFormat::Json => {
                    let out: Vec<_> = users.iter().map(|u| user_json(u)).collect();
                    println!("{}", serde_json::to_string_pretty(&out)?);
                }
                OutputFormat::Text => {
                    if users.is_empty() {
                        if !quiet {
                            println!("No users found.");
                        }
                    } else {
                        if !quiet {
                            println!("Users:");
                        }
                        for u in users {
                            println!(
                                "  {} - {} <{}> {} [{}] {}",
                                u.id, u.name, u.email, u.company, u.role, u.status
                            );
                        }
                    }
                }
            }
        }
        UserAction::Show { id } => {
            let user = registry.get(id).ok_or_else(|| {
                anyhow::anyhow!(
                    "User {} not found. Run `pkconnector users list` to see all users.",
                    id
                )
            })?;
            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&user_json(user))?);
                }
                OutputFormat::Text => {
                    println!("User: {}", user.name);
                    println!("  ID: {}", user.id);
                    println!("  Email: {}", user.email);
                    println!("  Company: {}", user.company);
                    println!("  Role: {}", user.role);
                    println!("  Status: {}", user.status);
                }
            }
        }
    }
    Ok(())
}

fn cmd_config(action: ConfigAction, format: OutputFormat, quiet: bool) -> anyhow::Result<()> {
    let mut config = Config::load()?;
    match action {
        ConfigAction::Get { key } => {
            let value = config.get(&key)?;
            match format {
                OutputFormat::Json => {
                    println!("{}", json!({ "key": key, "value": value }));
                }
                OutputFormat::Text => println!("{}", value),
            }
        }
        ConfigAction::Set { key, value } => {
            let store_before = FileStore::in_dir(config.data_dir()?);
            config.set(&key, &value)?;
            config.save()?;
            let store_after = FileStore::in_dir(config.data_dir()?);
            if !quiet {
                println!("Set {} = {}", key, config.get(&key)?);
                if store_after.path() != store_before.path() {
                    println!(
                        "Sessions are now stored in {}. Sign in again to use it.",
                        store_after.path().display()
                    );
                }
            }
        }
        ConfigAction::List => {
            let mut items = config.list()?;
            // Where the session actually lives once env and platform defaults apply
            let store = FileStore::in_dir(config.data_dir()?);
            items.push(("storage.path".to_string(), store.path().display().to_string()));
            match format {
                OutputFormat::Json => {
                    let out: serde_json::Map<String, serde_json::Value> = items
                        .into_iter()
                        .map(|(k, v)| (k, serde_json::Value::String(v)))
                        .collect();
                    println!("{}", serde_json::to_string_pretty(&out)?);
                }
                OutputFormat::Text => {
                    for (key, value) in items {
                        println!("{} = {}", key, value);
                    }
                }
            }
        }
        ConfigAction::Path => {
            println!("{}", Config::config_path()?.display());
        }
    }
    Ok(())
}
