//! Create `player` table.
//! Level columns are derived from experience by the service, never by SQL.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Player::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Player::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string_len(Player::Name, 12).not_null())
                    .col(string_len(Player::Title, 30).not_null())
                    .col(string_len(Player::Race, 20).not_null())
                    .col(string_len(Player::Profession, 20).not_null())
                    .col(timestamp_with_time_zone(Player::Birthday).not_null())
                    .col(integer(Player::Experience).not_null())
                    .col(integer(Player::Level).not_null())
                    .col(integer(Player::UntilNextLevel).not_null())
                    .col(boolean(Player::Banned).not_null().default(false))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Player::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Player {
    Table,
    Id,
    Name,
    Title,
    Race,
    Profession,
    Birthday,
    Experience,
    Level,
    UntilNextLevel,
    Banned,
}
