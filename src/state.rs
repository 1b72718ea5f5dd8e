use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AuthService, MenuService, NotificationService, ReportService, SeaOrmAuthService,
    SeaOrmMenuService, SeaOrmNotificationService, SeaOrmReportService, SeaOrmUserService,
    SeaOrmWellnessService, TokenService, UserService, WellnessService,
};

/// Long-lived handles shared by every request.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub tokens: Arc<TokenService>,

    pub auth_service: Arc<dyn AuthService>,

    pub user_service: Arc<dyn UserService>,

    pub notification_service: Arc<dyn NotificationService>,

    pub report_service: Arc<dyn ReportService>,

    pub wellness_service: Arc<dyn WellnessService>,

    pub menu_service: Arc<dyn MenuService>,
}

impl SharedState {
    /// Opens the database (running migrations) and wires the services.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_url,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Ok(Self::with_store(config, store))
    }

    #[must_use]
    pub fn with_store(config: Config, store: Store) -> Self {
        let tokens = Arc::new(TokenService::from_config(&config.auth));

        let auth_service = Arc::new(SeaOrmAuthService::new(
            store.clone(),
            tokens.clone(),
            config.security.clone(),
            config.auth.password_min_length,
        )) as Arc<dyn AuthService>;

        let notification_service =
            Arc::new(SeaOrmNotificationService::new(store.clone())) as Arc<dyn NotificationService>;

        let report_service = Arc::new(SeaOrmReportService::new(
            store.clone(),
            notification_service.clone(),
        )) as Arc<dyn ReportService>;

        let wellness_service = Arc::new(SeaOrmWellnessService::new(
            store.clone(),
            notification_service.clone(),
        )) as Arc<dyn WellnessService>;

        let user_service = Arc::new(SeaOrmUserService::new(store.clone())) as Arc<dyn UserService>;
        let menu_service = Arc::new(SeaOrmMenuService::new(store.clone())) as Arc<dyn MenuService>;

        Self {
            config: Arc::new(config),
            store,
            tokens,
            auth_service,
            user_service,
            notification_service,
            report_service,
            wellness_service,
            menu_service,
        }
    }
}
