pub mod facility;
pub mod menu;
pub mod notification;
pub mod report;
pub mod user;
pub mod wellness;
