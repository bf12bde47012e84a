//! Initial schema: travels, their albums, and companions shared across travels
//!
//! Albums and junction rows cascade away with their travel; companies are left in place.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
	async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
		manager
			.create_table(
				Table::create()
					.table(Travels::Table)
					.if_not_exists()
					.col(
						ColumnDef::new(Travels::Id)
							.integer()
							.not_null()
							.auto_increment()
							.primary_key(),
					)
					.col(ColumnDef::new(Travels::Title).text().not_null())
					.col(ColumnDef::new(Travels::Description).text().not_null())
					.col(ColumnDef::new(Travels::Locality).text().not_null())
					.col(ColumnDef::new(Travels::InitialDate).date().not_null())
					.col(ColumnDef::new(Travels::FinalDate).date().not_null())
					.col(
						ColumnDef::new(Travels::CreatedAt)
							.timestamp_with_time_zone()
							.not_null(),
					)
					.col(
						ColumnDef::new(Travels::UpdatedAt)
							.timestamp_with_time_zone()
							.not_null(),
					)
					.to_owned(),
			)
			.await?;

		manager
			.create_table(
				Table::create()
					.table(Albums::Table)
					.if_not_exists()
					.col(
						ColumnDef::new(Albums::Id)
							.integer()
							.not_null()
							.auto_increment()
							.primary_key(),
					)
					.col(ColumnDef::new(Albums::TravelId).integer().not_null())
					.col(ColumnDef::new(Albums::Url).text().not_null())
					.foreign_key(
						ForeignKey::create()
							.name("fk_albums_travel")
							.from(Albums::Table, Albums::TravelId)
							.to(Travels::Table, Travels::Id)
							.on_delete(ForeignKeyAction::Cascade)
							.on_update(ForeignKeyAction::Cascade),
					)
					.to_owned(),
			)
			.await?;

		manager
			.create_index(
				Index::create()
					.name("idx_albums_travel_id")
					.table(Albums::Table)
					.col(Albums::TravelId)
					.to_owned(),
			)
			.await?;

		manager
			.create_table(
				Table::create()
					.table(Companies::Table)
					.if_not_exists()
					.col(
						ColumnDef::new(Companies::Id)
							.integer()
							.not_null()
							.auto_increment()
							.primary_key(),
					)
					.col(ColumnDef::new(Companies::Name).text().not_null().unique_key())
					.to_owned(),
			)
			.await?;

		manager
			.create_table(
				Table::create()
					.table(TravelCompanies::Table)
					.if_not_exists()
					.col(ColumnDef::new(TravelCompanies::TravelId).integer().not_null())
					.col(ColumnDef::new(TravelCompanies::CompanyId).integer().not_null())
					.col(
						ColumnDef::new(TravelCompanies::Position)
							.integer()
							.not_null()
							.default(0),
					)
					.primary_key(
						Index::create()
							.col(TravelCompanies::TravelId)
							.col(TravelCompanies::CompanyId),
					)
					.foreign_key(
						ForeignKey::create()
							.name("fk_travel_companies_travel")
							.from(TravelCompanies::Table, TravelCompanies::TravelId)
							.to(Travels::Table, Travels::Id)
							.on_delete(ForeignKeyAction::Cascade)
							.on_update(ForeignKeyAction::Cascade),
					)
					.foreign_key(
						ForeignKey::create()
							.name("fk_travel_companies_company")
							.from(TravelCompanies::Table, TravelCompanies::CompanyId)
							.to(Companies::Table, Companies::Id)
							.on_delete(ForeignKeyAction::Cascade)
							.on_update(ForeignKeyAction::Cascade),
					)
					.to_owned(),
			)
			.await?;

		manager
			.create_index(
				Index::create()
					.name("idx_travel_companies_company_id")
					.table(TravelCompanies::Table)
					.col(TravelCompanies::CompanyId)
					.to_owned(),
			)
			.await?;

		Ok(())
	}

	async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
		manager
			.drop_table(Table::drop().table(TravelCompanies::Table).to_owned())
			.await?;
		manager
			.drop_table(Table::drop().table(Companies::Table).to_owned())
			.await?;
		manager
			.drop_table(Table::drop().table(Albums::Table).to_owned())
			.await?;
		manager
			.drop_table(Table::drop().table(Travels::Table).to_owned())
			.await
	}
}

#[derive(DeriveIden)]
enum Travels {
	Table,
	Id,
	Title,
	Description,
	Locality,
	InitialDate,
	FinalDate,
	CreatedAt,
	UpdatedAt,
}

#[derive(DeriveIden)]
enum Albums {
	Table,
	Id,
	TravelId,
	Url,
}

#[derive(DeriveIden)]
enum Companies {
	Table,
	Id,
	Name,
}

#[derive(DeriveIden)]
enum TravelCompanies {
	Table,
	TravelId,
	CompanyId,
	Position,
}
