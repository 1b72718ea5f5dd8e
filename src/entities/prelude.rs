pub use super::facilities::Entity as Facilities;
pub use super::menu_ratings::Entity as MenuRatings;
pub use super::menus::Entity as Menus;
pub use super::notifications::Entity as Notifications;
pub use super::reports::Entity as Reports;
pub use super::roles::Entity as Roles;
pub use super::sla_policies::Entity as SlaPolicies;
pub use super::user_roles::Entity as UserRoles;
pub use super::users::Entity as Users;
pub use super::wellness_records::Entity as WellnessRecords;
