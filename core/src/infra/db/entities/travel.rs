//! Travel entity - the scalar part of a travel post

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "travels")]
pub struct Model {
	#[sea_orm(primary_key)]
	pub id: i32,
	pub title: String,
	pub description: String,
	pub locality: String,
	pub initial_date: Date,
	pub final_date: Date,
	pub created_at: DateTimeUtc,
	pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
	#[sea_orm(has_many = "super::album::Entity")]
	Album,

	#[sea_orm(has_many = "super::travel_company::Entity")]
	TravelCompany,
}

impl Related<super::album::Entity> for Entity {
	fn to() -> RelationDef {
		Relation::Album.def()
	}
}

impl Related<super::travel_company::Entity> for Entity {
	fn to() -> RelationDef {
		Relation::TravelCompany.def()
	}
}

impl Related<super::company::Entity> for Entity {
	fn to() -> RelationDef {
		super::travel_company::Relation::Company.def()
	}

	fn via() -> Option<RelationDef> {
		Some(super::travel_company::Relation::Travel.def().rev())
	}
}

impl ActiveModelBehavior for ActiveModel {}
