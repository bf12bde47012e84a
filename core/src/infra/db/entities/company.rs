//! Company entity
//!
//! Companion names are shared by every travel that mentions them and are never
//! removed when a travel is updated or deleted.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "companies")]
pub struct Model {
	#[sea_orm(primary_key)]
	pub id: i32,
	#[sea_orm(unique)]
	pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
	#[sea_orm(has_many = "super::travel_company::Entity")]
	TravelCompany,
}

impl Related<super::travel_company::Entity> for Entity {
	fn to() -> RelationDef {
		Relation::TravelCompany.def()
	}
}

impl ActiveModelBehavior for ActiveModel {}
