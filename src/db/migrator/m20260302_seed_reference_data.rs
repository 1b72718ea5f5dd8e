use crate::domain::{Priority, Role};
use crate::entities::prelude::*;
use crate::entities::{facilities, roles, sla_policies};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Facilities available to report against on a fresh install.
const DEFAULT_FACILITIES: &[(&str, &str)] = &[
    ("Main Library", "Central campus"),
    ("Science Building", "North wing"),
    ("Gymnasium", "Sports complex"),
    ("Cafeteria", "Student center"),
    ("Dormitory A", "Residence area"),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut insert_roles = Query::insert()
            .into_table(Roles)
            .columns([roles::Column::Name])
            .to_owned();
        for role in Role::ALL {
            insert_roles.values_panic([role.as_str().into()]);
        }
        manager.exec_stmt(insert_roles).await?;

        let mut insert_sla = Query::insert()
            .into_table(SlaPolicies)
            .columns([
                sla_policies::Column::Priority,
                sla_policies::Column::ResponseHours,
            ])
            .to_owned();
        for priority in Priority::ALL {
            insert_sla.values_panic([
                priority.as_str().into(),
                priority.default_response_hours().into(),
            ]);
        }
        manager.exec_stmt(insert_sla).await?;

        let now = chrono::Utc::now().to_rfc3339();
        let mut insert_facilities = Query::insert()
            .into_table(Facilities)
            .columns([
                facilities::Column::Name,
                facilities::Column::Location,
                facilities::Column::CreatedAt,
            ])
            .to_owned();
        for (name, location) in DEFAULT_FACILITIES {
            insert_facilities.values_panic([
                (*name).into(),
                (*location).into(),
                now.clone().into(),
            ]);
        }
        manager.exec_stmt(insert_facilities).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .exec_stmt(Query::delete().from_table(Facilities).to_owned())
            .await?;
        manager
            .exec_stmt(Query::delete().from_table(SlaPolicies).to_owned())
            .await?;
        manager
            .exec_stmt(Query::delete().from_table(Roles).to_owned())
            .await?;
        Ok(())
    }
}
