//! Domain service for cafeteria menus and their ratings.

use thiserror::Error;

use crate::db::StoreError;
use crate::domain::ValidationError;
use crate::models::menu::{Menu, MenuItems, MenuPatch, MenuRating, RatingSummary};
use crate::models::user::AuthenticatedUser;

#[derive(Debug, Error)]
pub enum MenuError {
    #[error("Menu not found")]
    NotFound,

    #[error("{0}")]
    Validation(ValidationError),

    #[error("{0} already exists")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ValidationError> for MenuError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

impl From<StoreError> for MenuError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(what) => Self::Duplicate(what),
            StoreError::NotFound { .. } => Self::NotFound,
            StoreError::Database(e) => Self::Database(e.to_string()),
            StoreError::Internal(e) => Self::Internal(e.to_string()),
        }
    }
}

#[async_trait::async_trait]
pub trait MenuService: Send + Sync {
    /// # Errors
    ///
    /// Returns [`MenuError::Duplicate`] if the date already has a menu.
    async fn create(&self, date: &str, items: MenuItems) -> Result<Menu, MenuError>;

    async fn get(&self, id: i32) -> Result<Menu, MenuError>;

    async fn get_by_date(&self, date: &str) -> Result<Menu, MenuError>;

    /// Menu for the server's current local date.
    async fn today(&self) -> Result<Menu, MenuError>;

    /// Menus between two optional `YYYY-MM-DD` bounds, inclusive, oldest first.
    async fn list(&self, from: Option<&str>, to: Option<&str>) -> Result<Vec<Menu>, MenuError>;

    async fn update(&self, id: i32, patch: MenuPatch) -> Result<Menu, MenuError>;

    /// # Errors
    ///
    /// Returns [`MenuError::Validation`] for a rating outside 1 to 5 and
    /// [`MenuError::Duplicate`] if the caller already rated this menu.
    async fn rate(
        &self,
        actor: &AuthenticatedUser,
        menu_id: i32,
        rating: i32,
        comments: Option<String>,
    ) -> Result<MenuRating, MenuError>;

    async fn ratings(&self, menu_id: i32) -> Result<RatingSummary, MenuError>;
}
