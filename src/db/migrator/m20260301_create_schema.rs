use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    #[allow(clippy::too_many_lines)]
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Roles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Roles::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Roles::Name).string().not_null().unique_key())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(
                        ColumnDef::new(Users::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Users::CreatedAt).string().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).string().not_null())
                    .col(ColumnDef::new(Users::DeletedAt).string().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserRoles::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UserRoles::UserId).integer().not_null())
                    .col(ColumnDef::new(UserRoles::RoleId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(UserRoles::UserId)
                            .col(UserRoles::RoleId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_roles_user_id")
                            .from(UserRoles::Table, UserRoles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_roles_role_id")
                            .from(UserRoles::Table, UserRoles::RoleId)
                            .to(Roles::Table, Roles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Facilities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Facilities::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Facilities::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Facilities::Location).string().null())
                    .col(ColumnDef::new(Facilities::CreatedAt).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SlaPolicies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SlaPolicies::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SlaPolicies::Priority)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(SlaPolicies::ResponseHours)
                            .integer()
                            .not_null(),
                    )
                    .check(Expr::col(SlaPolicies::ResponseHours).gt(0))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Reports::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reports::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Reports::FacilityId).integer().not_null())
                    .col(ColumnDef::new(Reports::UserId).integer().not_null())
                    .col(ColumnDef::new(Reports::PriorityId).integer().not_null())
                    .col(ColumnDef::new(Reports::Description).text().not_null())
                    .col(
                        ColumnDef::new(Reports::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Reports::CreatedAt).string().not_null())
                    .col(ColumnDef::new(Reports::UpdatedAt).string().not_null())
                    .col(ColumnDef::new(Reports::DueAt).string().not_null())
                    .check(Expr::col(Reports::Status).is_in([
                        "pending",
                        "in_progress",
                        "resolved",
                        "verified",
                        "escalated",
                    ]))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reports_facility_id")
                            .from(Reports::Table, Reports::FacilityId)
                            .to(Facilities::Table, Facilities::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reports_user_id")
                            .from(Reports::Table, Reports::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reports_priority_id")
                            .from(Reports::Table, Reports::PriorityId)
                            .to(SlaPolicies::Table, SlaPolicies::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reports_user_id")
                    .table(Reports::Table)
                    .col(Reports::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(WellnessRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WellnessRecords::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(WellnessRecords::UserId).integer().not_null())
                    .col(
                        ColumnDef::new(WellnessRecords::StressLevel)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WellnessRecords::SleepHours)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WellnessRecords::DietQuality)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(WellnessRecords::Comments).text().null())
                    .col(
                        ColumnDef::new(WellnessRecords::CreatedAt)
                            .string()
                            .not_null(),
                    )
                    .check(Expr::col(WellnessRecords::StressLevel).between(0, 5))
                    .check(Expr::col(WellnessRecords::SleepHours).between(0, 24))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_wellness_records_user_id")
                            .from(WellnessRecords::Table, WellnessRecords::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_wellness_records_user_id")
                    .table(WellnessRecords::Table)
                    .col(WellnessRecords::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Menus::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Menus::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Menus::Date).string().not_null().unique_key())
                    .col(ColumnDef::new(Menus::Breakfast).text().null())
                    .col(ColumnDef::new(Menus::Lunch).text().null())
                    .col(ColumnDef::new(Menus::Dinner).text().null())
                    .col(ColumnDef::new(Menus::Snack).text().null())
                    .col(ColumnDef::new(Menus::CreatedAt).string().not_null())
                    .col(ColumnDef::new(Menus::UpdatedAt).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MenuRatings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MenuRatings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MenuRatings::MenuId).integer().not_null())
                    .col(ColumnDef::new(MenuRatings::UserId).integer().not_null())
                    .col(ColumnDef::new(MenuRatings::Rating).integer().not_null())
                    .col(ColumnDef::new(MenuRatings::Comments).text().null())
                    .col(ColumnDef::new(MenuRatings::CreatedAt).string().not_null())
                    .check(Expr::col(MenuRatings::Rating).between(1, 5))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_menu_ratings_menu_id")
                            .from(MenuRatings::Table, MenuRatings::MenuId)
                            .to(Menus::Table, Menus::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_menu_ratings_user_id")
                            .from(MenuRatings::Table, MenuRatings::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_menu_ratings_menu_user")
                    .table(MenuRatings::Table)
                    .col(MenuRatings::MenuId)
                    .col(MenuRatings::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Notifications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Notifications::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Notifications::UserId).integer().not_null())
                    .col(ColumnDef::new(Notifications::Kind).string().not_null())
                    .col(ColumnDef::new(Notifications::Title).string().not_null())
                    .col(ColumnDef::new(Notifications::Message).text().not_null())
                    .col(
                        ColumnDef::new(Notifications::Read)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Notifications::CreatedAt).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_notifications_user_id")
                            .from(Notifications::Table, Notifications::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_notifications_user_id")
                    .table(Notifications::Table)
                    .col(Notifications::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Notifications::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MenuRatings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Menus::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(WellnessRecords::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Reports::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SlaPolicies::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Facilities::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserRoles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Roles::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Roles {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Name,
    Email,
    PasswordHash,
    Active,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum UserRoles {
    Table,
    UserId,
    RoleId,
}

#[derive(DeriveIden)]
enum Facilities {
    Table,
    Id,
    Name,
    Location,
    CreatedAt,
}

#[derive(DeriveIden)]
enum SlaPolicies {
    Table,
    Id,
    Priority,
    ResponseHours,
}

#[derive(DeriveIden)]
enum Reports {
    Table,
    Id,
    FacilityId,
    UserId,
    PriorityId,
    Description,
    Status,
    CreatedAt,
    UpdatedAt,
    DueAt,
}

#[derive(DeriveIden)]
enum WellnessRecords {
    Table,
    Id,
    UserId,
    StressLevel,
    SleepHours,
    DietQuality,
    Comments,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Menus {
    Table,
    Id,
    Date,
    Breakfast,
    Lunch,
    Dinner,
    Snack,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum MenuRatings {
    Table,
    Id,
    MenuId,
    UserId,
    Rating,
    Comments,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Notifications {
    Table,
    Id,
    UserId,
    Kind,
    Title,
    Message,
    Read,
    CreatedAt,
}
