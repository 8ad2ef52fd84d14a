use actix_web::{web, App, HttpResponse, HttpServer};
use anyhow::Context;
use cb_api::{
    middleware::auth::{AuthenticatorWrapper, JwtAuth},
    routes::{self, auth::AppState},
};
use cb_core::{
    repositories::{InMemoryUserRepository, UserRepository},
    services::{
        seed_default_users, AuthService, AuthServiceConfig, BcryptCredentialVerifier,
        RequestAuthenticator, TokenCodec,
    },
};
use cb_infra::{DatabasePool, MySqlUserRepository};
use cb_shared::{config::LogFormat, AppConfig, DirectoryBackend, ErrorResponse, LoggingConfig};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("Invalid configuration")?;
    init_tracing(&config.logging);

    info!("Starting Collabrium API Server ({})", config.environment);

    config
        .check_production()
        .context("Refusing to start with development settings")?;
    if config.auth.jwt.is_using_default_secret() {
        warn!("JWT_SECRET is not set, falling back to the development secret");
    }

    // No request is served without a usable signing key
    let codec = TokenCodec::from_config(&config.auth.jwt)
        .context("Failed to initialise the token signing key")?;
    info!(
        algorithm = %config.auth.jwt.algorithm,
        ttl_seconds = codec.token_ttl().num_seconds(),
        "Token signing key initialised"
    );
    let codec = Arc::new(codec);

    match config.directory {
        DirectoryBackend::Memory => {
            let users = Arc::new(InMemoryUserRepository::new());
            let credentials = BcryptCredentialVerifier::new(Arc::clone(&users));
            seed_default_users(users.as_ref(), &credentials)
                .await
                .context("Failed to seed development users")?;

            info!("Using in-memory user directory");
            serve(&config, users, codec, None).await
        }
        DirectoryBackend::MySql => {
            let pool = DatabasePool::new(config.database.clone())
                .await
                .context("Failed to connect to the database")?;
            pool.run_migrations()
                .await
                .context("Failed to run database migrations")?;

            info!("Using MySQL user directory: {}", pool.get_statistics());
            let users = Arc::new(MySqlUserRepository::new(pool.get_pool().clone()));
            let pool = web::Data::new(pool);
            let result = serve(&config, users, codec, Some(pool.clone())).await;
            pool.close().await;
            result
        }
    }
}

/// Install the global subscriber
///
/// `RUST_LOG` wins over the configured level when set.
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Compact => builder.compact().init(),
    }
}

async fn serve<U>(
    config: &AppConfig,
    users: Arc<U>,
    codec: Arc<TokenCodec>,
    pool: Option<web::Data<DatabasePool>>,
) -> anyhow::Result<()>
where
    U: UserRepository + 'static,
{
    let credentials = Arc::new(BcryptCredentialVerifier::new(Arc::clone(&users)));
    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&users),
        credentials,
        Arc::clone(&codec),
        AuthServiceConfig::from(&config.auth),
    ));
    let state = web::Data::new(AppState::new(auth_service));

    let authenticator: Arc<dyn AuthenticatorWrapper> =
        Arc::new(RequestAuthenticator::new(users, codec));

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || {
        let mut app = App::new().app_data(state.clone());
        if let Some(pool) = &pool {
            app = app.app_data(pool.clone());
        }

        app.wrap(JwtAuth::new(Arc::clone(&authenticator)))
            .wrap(TracingLogger::default())
            .configure(routes::configure::<U, BcryptCredentialVerifier<U>>)
            .default_service(web::route().to(|| async {
                HttpResponse::NotFound().json(ErrorResponse::new(
                    "NOT_FOUND",
                    "The requested resource was not found",
                ))
            }))
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await?;

    Ok(())
}
