use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum DiningGroup {
    Table,
    Id,
    Name,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Membership {
    Table,
    GroupId,
    UserId,
    Role,
    JoinedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.create_table(
            Table::create()
                .table(DiningGroup::Table)
                .col(ColumnDef::new(DiningGroup::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(DiningGroup::Name).string().not_null())
                .col(ColumnDef::new(DiningGroup::CreatedBy).uuid().not_null())
                .col(ColumnDef::new(DiningGroup::CreatedAt).timestamp_with_time_zone().not_null())
                .col(ColumnDef::new(DiningGroup::UpdatedAt).timestamp_with_time_zone().not_null())
                .to_owned(),
        )
        .await?;

        // One row per (group, user); acceptance paths rely on this PK for
        // idempotence.
        m.create_table(
            Table::create()
                .table(Membership::Table)
                .col(ColumnDef::new(Membership::GroupId).uuid().not_null())
                .col(ColumnDef::new(Membership::UserId).uuid().not_null())
                .col(ColumnDef::new(Membership::Role).string_len(16).not_null())
                .col(
                    ColumnDef::new(Membership::JoinedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                        .default(Expr::current_timestamp()),
                )
                .primary_key(
                    Index::create()
                        .name("pk_membership")
                        .col(Membership::GroupId)
                        .col(Membership::UserId),
                )
                .to_owned(),
        )
        .await?;

        m.alter_table(
            Table::alter()
                .table(Membership::Table)
                .add_foreign_key(
                    TableForeignKey::new()
                        .name("fk_membership_user")
                        .from_tbl(Membership::Table)
                        .from_col(Membership::UserId)
                        .to_tbl(User::Table)
                        .to_col(User::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .add_foreign_key(
                    TableForeignKey::new()
                        .name("fk_membership_group")
                        .from_tbl(Membership::Table)
                        .from_col(Membership::GroupId)
                        .to_tbl(DiningGroup::Table)
                        .to_col(DiningGroup::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        )
        .await?;

        m.create_index(
            Index::create()
                .name("idx_membership_user")
                .table(Membership::Table)
                .col(Membership::UserId)
                .to_owned(),
        )
        .await?;

        Ok(())
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.drop_table(Table::drop().table(Membership::Table).if_exists().to_owned())
            .await?;
        m.drop_table(Table::drop().table(DiningGroup::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}
