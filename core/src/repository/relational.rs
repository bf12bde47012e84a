//! SQLite-backed repository
//!
//! Reads issue one left-joined query and fold the rows back into posts. Writes run in a
//! single [`DatabaseTransaction`]; every early return drops it uncommitted, which rolls
//! the whole operation back and releases the pooled connection.

use super::fold::{fold_rows, JoinedRow};
use super::PostRepository;
use crate::domain::post::{PostDraft, TravelPost};
use crate::error::{PostError, Result};
use crate::infra::db::{
	entities::{album, company, travel, travel_company},
	Database,
};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
	ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseTransaction,
	EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
	TransactionTrait,
};
use std::collections::HashSet;
use tracing::{debug, info};

pub struct SqlPostRepository {
	db: Database,
}

impl SqlPostRepository {
	pub fn new(db: Database) -> Self {
		Self { db }
	}

	pub fn database(&self) -> &Database {
		&self.db
	}
}

/// Run the travel join, optionally restricted to one travel id
async fn load_posts<C: ConnectionTrait>(conn: &C, id: Option<i32>) -> Result<Vec<TravelPost>> {
	let mut query = travel::Entity::find()
		.select_only()
		.columns([
			travel::Column::Id,
			travel::Column::Title,
			travel::Column::Description,
			travel::Column::Locality,
			travel::Column::InitialDate,
			travel::Column::FinalDate,
			travel::Column::CreatedAt,
			travel::Column::UpdatedAt,
		])
		.column_as(album::Column::Url, "album_url")
		.column_as(company::Column::Name, "company_name")
		.join(JoinType::LeftJoin, travel::Relation::Album.def())
		.join(JoinType::LeftJoin, travel::Relation::TravelCompany.def())
		.join(JoinType::LeftJoin, travel_company::Relation::Company.def());

	if let Some(id) = id {
		query = query.filter(travel::Column::Id.eq(id));
	}

	let rows = query
		.order_by_asc(travel::Column::Id)
		.order_by_asc(album::Column::Id)
		.order_by_asc(travel_company::Column::Position)
		.into_model::<JoinedRow>()
		.all(conn)
		.await?;

	Ok(fold_rows(rows))
}

async fn load_post<C: ConnectionTrait>(conn: &C, id: i32) -> Result<Option<TravelPost>> {
	Ok(load_posts(conn, Some(id)).await?.into_iter().next())
}

/// Insert the album rows and companion links of travel `travel_id`.
///
/// Companions are matched by exact name; a missing one gets a new `companies` row.
/// Repeated names within one post link once.
async fn insert_children(txn: &DatabaseTransaction, travel_id: i32, draft: &PostDraft) -> Result<()> {
	album::Entity::insert_many(draft.album.iter().map(|url| album::ActiveModel {
		travel_id: Set(travel_id),
		url: Set(url.clone()),
		..Default::default()
	}))
	.exec(txn)
	.await?;

	let mut linked = HashSet::new();
	for (position, name) in draft.company.iter().enumerate() {
		let company_id = match company::Entity::find()
			.filter(company::Column::Name.eq(name.as_str()))
			.one(txn)
			.await?
		{
			Some(existing) => existing.id,
			None => {
				let created = company::ActiveModel {
					name: Set(name.clone()),
					..Default::default()
				}
				.insert(txn)
				.await?;
				debug!("Created company {:?} with id {}", name, created.id);
				created.id
			}
		};

		if !linked.insert(company_id) {
			continue;
		}

		travel_company::Entity::insert(travel_company::ActiveModel {
			travel_id: Set(travel_id),
			company_id: Set(company_id),
			position: Set(position as i32),
		})
		.exec_without_returning(txn)
		.await?;
	}

	Ok(())
}

#[async_trait]
impl PostRepository for SqlPostRepository {
	async fn get_posts(&self) -> Result<Vec<TravelPost>> {
		load_posts(self.db.conn(), None).await
	}

	async fn get_post_by_id(&self, id: i32) -> Result<Option<TravelPost>> {
		load_post(self.db.conn(), id).await
	}

	async fn create_post(&self, draft: PostDraft) -> Result<TravelPost> {
		draft.ensure_album()?;

		let txn = self.db.conn().begin().await?;
		let now = Utc::now();

		let travel = travel::ActiveModel {
			title: Set(draft.title.clone()),
			description: Set(draft.description.clone()),
			locality: Set(draft.locality.clone()),
			initial_date: Set(draft.initial_date),
			final_date: Set(draft.final_date),
			created_at: Set(now),
			updated_at: Set(now),
			..Default::default()
		}
		.insert(&txn)
		.await?;

		insert_children(&txn, travel.id, &draft).await?;

		let post = load_post(&txn, travel.id).await?.ok_or(PostError::NotFound)?;
		txn.commit().await?;

		info!("Created travel post {} ({:?})", post.id, post.title);
		Ok(post)
	}

	async fn update_post(&self, id: i32, draft: PostDraft) -> Result<TravelPost> {
		draft.ensure_album()?;

		let txn = self.db.conn().begin().await?;

		let existing = travel::Entity::find_by_id(id)
			.one(&txn)
			.await?
			.ok_or(PostError::NotFound)?;

		let mut active: travel::ActiveModel = existing.into();
		active.title = Set(draft.title.clone());
		active.description = Set(draft.description.clone());
		active.locality = Set(draft.locality.clone());
		active.initial_date = Set(draft.initial_date);
		active.final_date = Set(draft.final_date);
		active.updated_at = Set(Utc::now());
		active.update(&txn).await?;

		// Albums and links are rebuilt from scratch; companies themselves are kept.
		album::Entity::delete_many()
			.filter(album::Column::TravelId.eq(id))
			.exec(&txn)
			.await?;
		travel_company::Entity::delete_many()
			.filter(travel_company::Column::TravelId.eq(id))
			.exec(&txn)
			.await?;

		insert_children(&txn, id, &draft).await?;

		let post = load_post(&txn, id).await?.ok_or(PostError::NotFound)?;
		txn.commit().await?;

		info!("Updated travel post {}", id);
		Ok(post)
	}

	async fn delete_post(&self, id: i32) -> Result<()> {
		// albums and travel_companies rows go with it through ON DELETE CASCADE
		let result = travel::Entity::delete_by_id(id).exec(self.db.conn()).await?;
		if result.rows_affected == 0 {
			return Err(PostError::NotFound);
		}

		info!("Deleted travel post {}", id);
		Ok(())
	}
}
