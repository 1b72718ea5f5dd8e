use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "reports")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub facility_id: i32,
    pub user_id: i32,
    pub priority_id: i32,
    pub description: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
    /// `created_at` plus the SLA response window
    pub due_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::facilities::Entity",
        from = "Column::FacilityId",
        to = "super::facilities::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Facilities,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Users,
    #[sea_orm(
        belongs_to = "super::sla_policies::Entity",
        from = "Column::PriorityId",
        to = "super::sla_policies::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    SlaPolicies,
}

impl Related<super::facilities::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Facilities.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::sla_policies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SlaPolicies.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
