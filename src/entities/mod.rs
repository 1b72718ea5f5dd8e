pub mod prelude;

pub mod facilities;
pub mod menu_ratings;
pub mod menus;
pub mod notifications;
pub mod reports;
pub mod roles;
pub mod sla_policies;
pub mod user_roles;
pub mod users;
pub mod wellness_records;
