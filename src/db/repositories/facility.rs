use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::db::{StoreError, StoreResult};
use crate::entities::{facilities, prelude::*};
use crate::models::report::Facility;

pub struct FacilityRepository {
    conn: DatabaseConnection,
}

impl From<facilities::Model> for Facility {
    fn from(model: facilities::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            location: model.location,
            created_at: model.created_at,
        }
    }
}

impl FacilityRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn create(&self, name: &str, location: Option<&str>) -> StoreResult<Facility> {
        let model = facilities::ActiveModel {
            name: Set(name.to_string()),
            location: Set(location.map(str::to_string)),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .map_err(|e| StoreError::from_write(e, "Facility name"))?;

        Ok(model.into())
    }

    pub async fn get(&self, id: i32) -> StoreResult<Option<Facility>> {
        let model = Facilities::find_by_id(id).one(&self.conn).await?;
        Ok(model.map(Facility::from))
    }

    pub async fn list(&self) -> StoreResult<Vec<Facility>> {
        let models = Facilities::find()
            .order_by_asc(facilities::Column::Name)
            .all(&self.conn)
            .await?;

        Ok(models.into_iter().map(Facility::from).collect())
    }
}
