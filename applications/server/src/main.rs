/// Meetings Server - meeting records over HTTP
use clap::{Parser, Subcommand};
use meetings_core::types::{CreateUser, UserId, UserRole};
use meetings_server::{config::ServerConfig, create_router, services::AuthService, state::AppState};
use meetings_storage::LocalStorageContext;
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "meetings-server")]
#[command(about = "Meeting records server", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./config.toml when present)
    #[arg(short, long, global = true, env = "MEETINGS_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Add a user to the directory
    AddUser {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        /// Grant the superAdmin role
        #[arg(long)]
        super_admin: bool,
    },
    /// List all users
    ListUsers,
    /// Mint an access token for a user
    IssueToken {
        /// User ID the token is issued to
        user_id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "meetings_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::load_from(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve => {
            serve(config).await?;
        }
        Commands::AddUser {
            first_name,
            last_name,
            email,
            super_admin,
        } => {
            let role = if super_admin {
                UserRole::SuperAdmin
            } else {
                UserRole::User
            };
            add_user(
                &config,
                CreateUser {
                    first_name,
                    last_name,
                    email,
                    role,
                },
            )
            .await?;
        }
        Commands::ListUsers => {
            list_users(&config).await?;
        }
        Commands::IssueToken { user_id } => {
            issue_token(&config, &user_id).await?;
        }
    }

    Ok(())
}

/// Open the configured database and bring its schema up to date
async fn open_storage(config: &ServerConfig) -> anyhow::Result<LocalStorageContext> {
    let pool = meetings_storage::create_pool(&config.storage.database_url).await?;
    meetings_storage::run_migrations(&pool).await?;
    Ok(LocalStorageContext::new(pool))
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    config.validate()?;

    tracing::info!("Starting Meetings Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let storage = Arc::new(open_storage(&config).await?);
    tracing::info!("Database connected");

    let auth_service = Arc::new(AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.jwt_expiration_hours,
    ));

    let app = create_router(AppState::new(storage, auth_service));

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn add_user(config: &ServerConfig, user: CreateUser) -> anyhow::Result<()> {
    let storage = open_storage(config).await?;

    let user = meetings_storage::users::create(storage.pool(), user).await?;
    tracing::info!(user_id = %user.id, "User created");

    println!("{} ({} {}, {})", user.id, user.first_name, user.last_name, user.role.as_str());

    Ok(())
}

async fn list_users(config: &ServerConfig) -> anyhow::Result<()> {
    let storage = open_storage(config).await?;

    let users = meetings_storage::users::get_all(storage.pool()).await?;

    println!("Users:");
    for user in users {
        println!(
            "  {} - {} {} <{}> [{}]",
            user.id,
            user.first_name,
            user.last_name,
            user.email,
            user.role.as_str()
        );
    }

    Ok(())
}

async fn issue_token(config: &ServerConfig, raw_id: &str) -> anyhow::Result<()> {
    config.validate()?;
    let storage = open_storage(config).await?;

    let user_id = UserId::parse(raw_id)?;
    let user = meetings_storage::users::require(storage.pool(), &user_id).await?;

    let auth_service = AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.jwt_expiration_hours,
    );
    let token = auth_service.create_access_token(&user.id)?;

    println!("{token}");

    Ok(())
}
