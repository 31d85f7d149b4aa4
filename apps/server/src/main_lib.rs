use std::sync::Arc;

use crate::{
    auth::{decode_secret_key, AuthConfig, AuthManager},
    config::Config,
    mail::{HttpRelayMailTransport, LogMailTransport},
};
use charity_core::{
    categories::{CategoryService, CategoryServiceTrait},
    contact::{ContactService, ContactServiceTrait, MailTransport},
    donations::{DonationService, DonationServiceTrait},
    institutions::{InstitutionService, InstitutionServiceTrait},
    landing::{LandingService, LandingServiceTrait},
    users::{UserService, UserServiceTrait},
};
use charity_storage_sqlite::{
    categories::CategoryRepository,
    db::{self, write_actor},
    donations::DonationRepository,
    institutions::InstitutionRepository,
    users::UserRepository,
};
use rand::{rngs::OsRng, RngCore};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait + Send + Sync>,
    pub institution_service: Arc<dyn InstitutionServiceTrait + Send + Sync>,
    pub category_service: Arc<dyn CategoryServiceTrait + Send + Sync>,
    pub donation_service: Arc<dyn DonationServiceTrait + Send + Sync>,
    pub landing_service: Arc<dyn LandingServiceTrait + Send + Sync>,
    pub contact_service: Arc<dyn ContactServiceTrait + Send + Sync>,
    pub auth: Arc<AuthManager>,
}

pub fn init_tracing() {
    let log_format = std::env::var("CHARITY_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

fn jwt_secret(config: &Config) -> anyhow::Result<Vec<u8>> {
    match config.secret_key.as_deref() {
        Some(raw) => decode_secret_key(raw),
        None => {
            tracing::warn!("CHARITY_SECRET_KEY is not set; sessions will not survive a restart");
            let mut bytes = vec![0u8; 32];
            OsRng.fill_bytes(&mut bytes);
            Ok(bytes)
        }
    }
}

fn build_mail_transport(config: &Config) -> anyhow::Result<Arc<dyn MailTransport>> {
    let transport: Arc<dyn MailTransport> = match config.mail_relay_url.as_deref() {
        Some(url) => {
            tracing::info!("Contact mails are relayed to {}", url);
            Arc::new(HttpRelayMailTransport::new(url, config.mail_from.as_str())?)
        }
        None => Arc::new(LogMailTransport),
    };
    Ok(transport)
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone());

    let user_repository = Arc::new(UserRepository::new(pool.clone(), writer.clone()));
    let institution_repository = Arc::new(InstitutionRepository::new(pool.clone(), writer.clone()));
    let category_repository = Arc::new(CategoryRepository::new(pool.clone(), writer.clone()));
    let donation_repository = Arc::new(DonationRepository::new(pool.clone(), writer.clone()));

    let user_service = Arc::new(UserService::new(user_repository.clone()));
    if let Some(admin) = &config.admin {
        let user = user_service
            .ensure_superuser(&admin.email, &admin.password)
            .await?;
        tracing::info!("Administrator account ready: {}", user.email);
    }

    let institution_service = Arc::new(InstitutionService::new(institution_repository.clone()));
    let category_service = Arc::new(CategoryService::new(category_repository.clone()));
    let donation_service = Arc::new(DonationService::new(
        donation_repository,
        institution_repository,
        category_repository,
    ));
    let landing_service = Arc::new(LandingService::new(
        donation_service.clone(),
        institution_service.clone(),
    ));
    let contact_service = Arc::new(ContactService::new(
        user_repository,
        build_mail_transport(config)?,
    ));

    let auth = Arc::new(AuthManager::new(&AuthConfig {
        jwt_secret: jwt_secret(config)?,
        session_ttl: config.session_ttl,
        confirm_ttl: config.confirm_ttl,
        cookie_secure: config.cookie_secure,
    }));

    Ok(Arc::new(AppState {
        user_service,
        institution_service,
        category_service,
        donation_service,
        landing_service,
        contact_service,
        auth,
    }))
}
