//! Travel <-> company junction table

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "travel_companies")]
pub struct Model {
	#[sea_orm(primary_key, auto_increment = false)]
	pub travel_id: i32,

	#[sea_orm(primary_key, auto_increment = false)]
	pub company_id: i32,

	/// Index of the companion in the post's `company` list
	pub position: i32,
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

	#[sea_orm(
		belongs_to = "super::company::Entity",
		from = "Column::CompanyId",
		to = "super::company::Column::Id",
		on_delete = "Cascade"
	)]
	Company,
}

impl Related<super::travel::Entity> for Entity {
	fn to() -> RelationDef {
		Relation::Travel.def()
	}
}

impl Related<super::company::Entity> for Entity {
	fn to() -> RelationDef {
		Relation::Company.def()
	}
}

impl ActiveModelBehavior for ActiveModel {}
