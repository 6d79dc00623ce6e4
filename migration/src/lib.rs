pub use sea_orm_migration::prelude::*;

mod m20261001_000001_create_invite_role_binding_table;
mod m20261001_000002_create_restriction_table;
mod m20261001_000003_create_voice_monitor_config_table;
mod m20261001_000004_create_restriction_role_config_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261001_000001_create_invite_role_binding_table::Migration),
            Box::new(m20261001_000002_create_restriction_table::Migration),
            Box::new(m20261001_000003_create_voice_monitor_config_table::Migration),
            Box::new(m20261001_000004_create_restriction_role_config_table::Migration),
        ]
    }
}
