use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use crate::db::{StoreError, StoreResult};
use crate::entities::{menu_ratings, menus, prelude::*};
use crate::models::menu::{Menu, MenuItems, MenuPatch, MenuRating, RatingSummary};

#[derive(Debug, FromQueryResult)]
struct RatingStats {
    rating_count: i64,
    average: Option<f64>,
}

pub struct MenuRepository {
    conn: DatabaseConnection,
}

impl From<menus::Model> for Menu {
    fn from(model: menus::Model) -> Self {
        Self {
            id: model.id,
            date: model.date,
            breakfast: model.breakfast,
            lunch: model.lunch,
            dinner: model.dinner,
            snack: model.snack,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<menu_ratings::Model> for MenuRating {
    fn from(model: menu_ratings::Model) -> Self {
        Self {
            id: model.id,
            menu_id: model.menu_id,
            user_id: model.user_id,
            rating: model.rating,
            comments: model.comments,
            created_at: model.created_at,
        }
    }
}

impl MenuRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn create(&self, date: &str, items: MenuItems) -> StoreResult<Menu> {
        let now = chrono::Utc::now().to_rfc3339();

        let model = menus::ActiveModel {
            date: Set(date.to_string()),
            breakfast: Set(items.breakfast),
            lunch: Set(items.lunch),
            dinner: Set(items.dinner),
            snack: Set(items.snack),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .map_err(|e| StoreError::from_write(e, "Menu for this date"))?;

        Ok(model.into())
    }

    pub async fn get(&self, id: i32) -> StoreResult<Option<Menu>> {
        Ok(Menus::find_by_id(id).one(&self.conn).await?.map(Menu::from))
    }

    pub async fn get_by_date(&self, date: &str) -> StoreResult<Option<Menu>> {
        Ok(Menus::find()
            .filter(menus::Column::Date.eq(date))
            .one(&self.conn)
            .await?
            .map(Menu::from))
    }

    /// Menus in `[from, to]`, oldest first. Either bound may be open.
    ///
    /// Dates are stored as `YYYY-MM-DD`, so text comparison orders them correctly.
    pub async fn list(&self, from: Option<&str>, to: Option<&str>) -> StoreResult<Vec<Menu>> {
        let mut query = Menus::find();
        if let Some(from) = from {
            query = query.filter(menus::Column::Date.gte(from));
        }
        if let Some(to) = to {
            query = query.filter(menus::Column::Date.lte(to));
        }

        let models = query
            .order_by_asc(menus::Column::Date)
            .all(&self.conn)
            .await?;

        Ok(models.into_iter().map(Menu::from).collect())
    }

    pub async fn update(&self, id: i32, patch: MenuPatch) -> StoreResult<Menu> {
        let model = Menus::find_by_id(id)
            .one(&self.conn)
            .await?
            .ok_or(StoreError::not_found("Menu", id))?;

        let mut active: menus::ActiveModel = model.into();
        if let Some(date) = patch.date {
            active.date = Set(date);
        }
        if let Some(breakfast) = patch.items.breakfast {
            active.breakfast = Set(breakfast);
        }
        if let Some(lunch) = patch.items.lunch {
            active.lunch = Set(lunch);
        }
        if let Some(dinner) = patch.items.dinner {
            active.dinner = Set(dinner);
        }
        if let Some(snack) = patch.items.snack {
            active.snack = Set(snack);
        }
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let model = active
            .update(&self.conn)
            .await
            .map_err(|e| StoreError::from_write(e, "Menu for this date"))?;

        Ok(model.into())
    }

    /// Adds a rating. A second rating by the same user for the same menu is a conflict.
    pub async fn add_rating(
        &self,
        menu_id: i32,
        user_id: i32,
        rating: i32,
        comments: Option<String>,
    ) -> StoreResult<MenuRating> {
        let model = menu_ratings::ActiveModel {
            menu_id: Set(menu_id),
            user_id: Set(user_id),
            rating: Set(rating),
            comments: Set(comments),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .map_err(|e| StoreError::from_write(e, "Rating for this menu"))?;

        Ok(model.into())
    }

    /// Newest first.
    pub async fn list_ratings(&self, menu_id: i32) -> StoreResult<Vec<MenuRating>> {
        let models = MenuRatings::find()
            .filter(menu_ratings::Column::MenuId.eq(menu_id))
            .order_by_desc(menu_ratings::Column::CreatedAt)
            .order_by_desc(menu_ratings::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(models.into_iter().map(MenuRating::from).collect())
    }

    /// Ratings of a menu with their count and average.
    pub async fn rating_summary(&self, menu_id: i32) -> StoreResult<RatingSummary> {
        let stats = MenuRatings::find()
            .select_only()
            .column_as(menu_ratings::Column::Id.count(), "rating_count")
            .column_as(
                SimpleExpr::from(Func::avg(Expr::col(menu_ratings::Column::Rating))),
                "average",
            )
            .filter(menu_ratings::Column::MenuId.eq(menu_id))
            .into_model::<RatingStats>()
            .one(&self.conn)
            .await?;

        let (count, average) = stats.map_or((0, None), |s| {
            (usize::try_from(s.rating_count).unwrap_or_default(), s.average)
        });

        Ok(RatingSummary {
            menu_id,
            count,
            average,
            ratings: self.list_ratings(menu_id).await?,
        })
    }
}
