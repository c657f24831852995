use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Invitation {
    Table,
    Id,
    GroupId,
    InviteCode,
    InvitedEmail,
    Status,
    CreatedBy,
    CreatedAt,
    ExpiresAt,
    AcceptedAt,
    AcceptedBy,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum DiningGroup {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.create_table(
            Table::create()
                .table(Invitation::Table)
                .col(ColumnDef::new(Invitation::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(Invitation::GroupId).uuid().not_null())
                .col(ColumnDef::new(Invitation::InviteCode).string().not_null())
                .col(ColumnDef::new(Invitation::InvitedEmail).string().null())
                .col(ColumnDef::new(Invitation::Status).string_len(16).not_null())
                .col(ColumnDef::new(Invitation::CreatedBy).uuid().not_null())
                .col(ColumnDef::new(Invitation::CreatedAt).timestamp_with_time_zone().not_null())
                .col(ColumnDef::new(Invitation::ExpiresAt).timestamp_with_time_zone().not_null())
                .col(ColumnDef::new(Invitation::AcceptedAt).timestamp_with_time_zone().null())
                .col(ColumnDef::new(Invitation::AcceptedBy).uuid().null())
                .col(ColumnDef::new(Invitation::UpdatedAt).timestamp_with_time_zone().not_null())
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_invitation_group")
                        .from(Invitation::Table, Invitation::GroupId)
                        .to(DiningGroup::Table, DiningGroup::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        )
        .await?;

        // Codes are unguessable but must still be unique across every group;
        // the insert path retries on violation.
        m.create_index(
            Index::create()
                .name("idx_invitation_code")
                .table(Invitation::Table)
                .col(Invitation::InviteCode)
                .unique()
                .to_owned(),
        )
        .await?;

        m.create_index(
            Index::create()
                .name("idx_invitation_group")
                .table(Invitation::Table)
                .col(Invitation::GroupId)
                .to_owned(),
        )
        .await?;

        Ok(())
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.drop_table(Table::drop().table(Invitation::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}
