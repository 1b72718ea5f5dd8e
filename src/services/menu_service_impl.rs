//! `SeaORM` implementation of the `MenuService` trait.

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::info;

use crate::db::Store;
use crate::domain::{ValidationError, optional_text};
use crate::models::menu::{
    Menu, MenuItems, MenuItemsPatch, MenuPatch, MenuRating, RATING_RANGE, RatingSummary,
};
use crate::models::user::AuthenticatedUser;
use crate::services::menu_service::{MenuError, MenuService};

const DATE_FORMAT: &str = "%Y-%m-%d";
const ITEM_MAX_LEN: usize = 500;
const COMMENTS_MAX_LEN: usize = 1000;

/// Parses a calendar date and returns it in canonical `YYYY-MM-DD` form.
pub fn parse_menu_date(raw: &str, field: &'static str) -> Result<String, ValidationError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map(|d| d.format(DATE_FORMAT).to_string())
        .map_err(|_| ValidationError::new(field, "Date must be a valid YYYY-MM-DD date"))
}

fn clean_items(items: MenuItems) -> Result<MenuItems, ValidationError> {
    Ok(MenuItems {
        breakfast: optional_text(items.breakfast.as_deref(), "breakfast", ITEM_MAX_LEN)?,
        lunch: optional_text(items.lunch.as_deref(), "lunch", ITEM_MAX_LEN)?,
        dinner: optional_text(items.dinner.as_deref(), "dinner", ITEM_MAX_LEN)?,
        snack: optional_text(items.snack.as_deref(), "snack", ITEM_MAX_LEN)?,
    })
}

/// Cleans the meals an update touches. A blank text clears the meal.
fn clean_patch(items: MenuItemsPatch) -> Result<MenuItemsPatch, ValidationError> {
    let clean = |value: Option<Option<String>>, field: &'static str| {
        value
            .map(|text| optional_text(text.as_deref(), field, ITEM_MAX_LEN))
            .transpose()
    };

    Ok(MenuItemsPatch {
        breakfast: clean(items.breakfast, "breakfast")?,
        lunch: clean(items.lunch, "lunch")?,
        dinner: clean(items.dinner, "dinner")?,
        snack: clean(items.snack, "snack")?,
    })
}

pub struct SeaOrmMenuService {
    store: Store,
}

impl SeaOrmMenuService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl MenuService for SeaOrmMenuService {
    async fn create(&self, date: &str, items: MenuItems) -> Result<Menu, MenuError> {
        let date = parse_menu_date(date, "date")?;
        let items = clean_items(items)?;

        let menu = self.store.menus().create(&date, items).await?;

        info!(menu_id = menu.id, date = %menu.date, "Menu created");
        Ok(menu)
    }

    async fn get(&self, id: i32) -> Result<Menu, MenuError> {
        self.store.menus().get(id).await?.ok_or(MenuError::NotFound)
    }

    async fn get_by_date(&self, date: &str) -> Result<Menu, MenuError> {
        let date = parse_menu_date(date, "date")?;
        self.store
            .menus()
            .get_by_date(&date)
            .await?
            .ok_or(MenuError::NotFound)
    }

    async fn today(&self) -> Result<Menu, MenuError> {
        let today = chrono::Local::now().date_naive().format(DATE_FORMAT).to_string();
        self.get_by_date(&today).await
    }

    async fn list(&self, from: Option<&str>, to: Option<&str>) -> Result<Vec<Menu>, MenuError> {
        let from = from.map(|d| parse_menu_date(d, "from")).transpose()?;
        let to = to.map(|d| parse_menu_date(d, "to")).transpose()?;

        if matches!((&from, &to), (Some(from), Some(to)) if from > to) {
            return Err(ValidationError::new("from", "Start date must not be after end date").into());
        }

        Ok(self
            .store
            .menus()
            .list(from.as_deref(), to.as_deref())
            .await?)
    }

    async fn update(&self, id: i32, patch: MenuPatch) -> Result<Menu, MenuError> {
        let date = patch
            .date
            .as_deref()
            .map(|d| parse_menu_date(d, "date"))
            .transpose()?;
        let items = clean_patch(patch.items)?;

        let menu = self
            .store
            .menus()
            .update(id, MenuPatch { date, items })
            .await?;

        info!(menu_id = menu.id, "Menu updated");
        Ok(menu)
    }

    async fn rate(
        &self,
        actor: &AuthenticatedUser,
        menu_id: i32,
        rating: i32,
        comments: Option<String>,
    ) -> Result<MenuRating, MenuError> {
        if !RATING_RANGE.contains(&rating) {
            return Err(ValidationError::new(
                "rating",
                format!(
                    "Rating must be between {} and {}",
                    RATING_RANGE.start(),
                    RATING_RANGE.end()
                ),
            )
            .into());
        }
        let comments = optional_text(comments.as_deref(), "comments", COMMENTS_MAX_LEN)?;

        let menus = self.store.menus();
        if menus.get(menu_id).await?.is_none() {
            return Err(MenuError::NotFound);
        }

        Ok(menus.add_rating(menu_id, actor.id, rating, comments).await?)
    }

    async fn ratings(&self, menu_id: i32) -> Result<RatingSummary, MenuError> {
        let menus = self.store.menus();
        if menus.get(menu_id).await?.is_none() {
            return Err(MenuError::NotFound);
        }

        Ok(menus.rating_summary(menu_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_menu_date() {
        assert_eq!(parse_menu_date("2026-03-01", "date").unwrap(), "2026-03-01");
        assert_eq!(parse_menu_date(" 2026-3-1 ", "date").unwrap(), "2026-03-01");
        assert_eq!(parse_menu_date("2026-02-30", "date").unwrap_err().field, "date");
        assert!(parse_menu_date("tomorrow", "from").is_err());
    }

    #[test]
    fn test_clean_items_drops_blanks() {
        let items = clean_items(MenuItems {
            breakfast: Some("  Oatmeal ".to_string()),
            lunch: Some("   ".to_string()),
            dinner: None,
            snack: None,
        })
        .unwrap();
        assert_eq!(items.breakfast.as_deref(), Some("Oatmeal"));
        assert!(items.lunch.is_none());
    }

    #[test]
    fn test_clean_patch_keeps_absent_and_clears_blank() {
        let patch = clean_patch(MenuItemsPatch {
            breakfast: None,
            lunch: Some(Some("  ".to_string())),
            dinner: Some(None),
            snack: Some(Some(" Apple ".to_string())),
        })
        .unwrap();
        assert_eq!(patch.breakfast, None);
        assert_eq!(patch.lunch, Some(None));
        assert_eq!(patch.dinner, Some(None));
        assert_eq!(patch.snack, Some(Some("Apple".to_string())));
    }
}
