pub mod token_service;
pub use token_service::{Claims, TokenError, TokenKind, TokenPair, TokenService};

pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, AuthService, AuthSession};
pub use auth_service_impl::SeaOrmAuthService;

pub mod user_service;
pub mod user_service_impl;
pub use user_service::{UserError, UserService};
pub use user_service_impl::SeaOrmUserService;

pub mod notification_service;
pub mod notification_service_impl;
pub use notification_service::{NotificationError, NotificationService};
pub use notification_service_impl::SeaOrmNotificationService;

pub mod report_service;
pub mod report_service_impl;
pub use report_service::{CreateReport, ReportError, ReportService};
pub use report_service_impl::SeaOrmReportService;

pub mod wellness_service;
pub mod wellness_service_impl;
pub use wellness_service::{CreateWellnessRecord, WellnessError, WellnessService};
pub use wellness_service_impl::SeaOrmWellnessService;

pub mod menu_service;
pub mod menu_service_impl;
pub use menu_service::{MenuError, MenuService};
pub use menu_service_impl::SeaOrmMenuService;
