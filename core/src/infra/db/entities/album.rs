//! Album entity - one image URL of a travel

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "albums")]
pub struct Model {
	#[sea_orm(primary_key)]
	pub id: i32,
	pub travel_id: i32,
	pub url: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
	#[sea_orm(
		belongs_to = "super::travel::Entity",
		from = "Column::TravelId",
		to = "super::travel::Column::Id",
		on_delete = "Cascade"
	)]
	Travel,
}

impl Related<super::travel::Entity> for Entity {
	fn to() -> RelationDef {
		Relation::Travel.def()
	}
}

impl ActiveModelBehavior for ActiveModel {}
