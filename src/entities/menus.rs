use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "menus")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Calendar date as `YYYY-MM-DD`, one menu per date
    #[sea_orm(unique)]
    pub date: String,

    pub breakfast: Option<String>,
    pub lunch: Option<String>,
    pub dinner: Option<String>,
    pub snack: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::menu_ratings::Entity")]
    MenuRatings,
}

impl Related<super::menu_ratings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MenuRatings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
