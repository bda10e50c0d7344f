//! Saahaz server binary: HTTP API plus operator commands.

use clap::{Args, Parser, Subcommand};
use saahaz_auth::config::DEFAULT_VERIFIER_URL;
use saahaz_auth::{AuthConfig, AuthService, HttpIdentityVerifier};
use saahaz_db::repository::{SurrealSessionRepository, SurrealUserRepository};
use saahaz_db::{DbConfig, DbManager};
use saahaz_server::config::ServerConfig;
use saahaz_server::{AppState, router};
use saahaz_shop::PricingPolicy;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "saahaz", about = "Saahaz storefront backend")]
struct Cli {
    #[command(flatten)]
    db: DbArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API.
    Serve(ServeArgs),
    /// Grant the admin role to an existing account.
    PromoteAdmin {
        #[arg(long)]
        email: String,
    },
}

#[derive(Args, Debug)]
struct DbArgs {
    /// SurrealDB endpoint (`ws://host:port` or `mem://`).
    #[arg(long, env = "SURREAL_URL", default_value = "ws://127.0.0.1:8000", global = true)]
    db_url: String,

    #[arg(long, env = "SURREAL_NS", default_value = "saahaz", global = true)]
    db_namespace: String,

    #[arg(long, env = "SURREAL_DB", default_value = "main", global = true)]
    db_name: String,

    #[arg(long, env = "SURREAL_USER", global = true)]
    db_user: Option<String>,

    #[arg(long, env = "SURREAL_PASS", global = true)]
    db_pass: Option<String>,
}

impl DbArgs {
    fn config(&self) -> DbConfig {
        DbConfig {
            url: self.db_url.clone(),
            namespace: self.db_namespace.clone(),
            database: self.db_name.clone(),
            username: self.db_user.clone(),
            password: self.db_pass.clone(),
        }
    }
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Address to listen on.
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8001")]
    bind_addr: String,

    /// HS256 signing secret for bearer tokens.
    #[arg(long, env = "JWT_SECRET", hide_env_values = true, value_parser = non_empty_secret)]
    jwt_secret: String,

    /// Bearer token lifetime; tokens never expire when unset.
    #[arg(long, env = "BEARER_TOKEN_TTL_SECS")]
    bearer_ttl_secs: Option<u64>,

    /// Optional pepper mixed into password hashes.
    #[arg(long, env = "PASSWORD_PEPPER", hide_env_values = true)]
    pepper: Option<String>,

    /// External identity verifier endpoint.
    #[arg(long, env = "IDENTITY_VERIFIER_URL", default_value = DEFAULT_VERIFIER_URL)]
    verifier_url: String,

    /// Refuse client-supplied order totals.
    #[arg(long, env = "REJECT_TOTAL_OVERRIDE", default_value_t = false)]
    reject_total_override: bool,
}

fn non_empty_secret(value: &str) -> Result<String, String> {
    if value.trim().is_empty() {
        return Err("secret must not be empty".into());
    }
    Ok(value.to_string())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("saahaz=info".parse()?))
        .json()
        .init();

    let cli = Cli::parse();
    let db = DbManager::connect(&cli.db.config()).await?;
    saahaz_db::run_migrations(db.client()).await?;

    match cli.command {
        Command::Serve(args) => serve(db, args).await,
        Command::PromoteAdmin { email } => promote_admin(db, &email).await,
    }
}

async fn serve(db: DbManager, args: ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig {
        bind_addr: args.bind_addr,
        auth: AuthConfig {
            jwt_secret: args.jwt_secret,
            bearer_token_lifetime_secs: args.bearer_ttl_secs,
            pepper: args.pepper,
            verifier_url: args.verifier_url,
            ..Default::default()
        },
        pricing: PricingPolicy {
            allow_total_override: !args.reject_total_override,
        },
    };

    let state = AppState::new(db.client().clone(), &config);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "Saahaz API listening");

    axum::serve(listener, app).await?;
    Ok(())
}

async fn promote_admin(db: DbManager, email: &str) -> Result<(), Box<dyn std::error::Error>> {
    // No secret is needed: this path never issues or checks tokens.
    let config = AuthConfig::default();
    let auth = AuthService::new(
        SurrealUserRepository::new(db.client().clone()),
        SurrealSessionRepository::new(db.client().clone()),
        HttpIdentityVerifier::from_config(&config),
        config,
    );

    let profile = auth.promote_by_email(email).await?;
    info!(user_id = %profile.id, email = %profile.email, "Admin role granted");
    Ok(())
}
