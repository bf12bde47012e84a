//! Folding of the travels/albums/companies join back into posts

use crate::domain::post::{first_seen, TravelPost};
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::FromQueryResult;
use std::collections::HashMap;

/// One row of `travels LEFT JOIN albums LEFT JOIN travel_companies LEFT JOIN companies`
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct JoinedRow {
	pub id: i32,
	pub title: String,
	pub description: String,
	pub locality: String,
	pub initial_date: NaiveDate,
	pub final_date: NaiveDate,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
	pub album_url: Option<String>,
	pub company_name: Option<String>,
}

/// Group rows by travel id, keeping groups in order of first appearance
pub fn group_rows(rows: impl IntoIterator<Item = JoinedRow>) -> Vec<Vec<JoinedRow>> {
	let mut groups: Vec<Vec<JoinedRow>> = Vec::new();
	let mut index: HashMap<i32, usize> = HashMap::new();

	for row in rows {
		match index.get(&row.id) {
			Some(&slot) => groups[slot].push(row),
			None => {
				index.insert(row.id, groups.len());
				groups.push(vec![row]);
			}
		}
	}

	groups
}

/// Project one group into a post.
///
/// Album URLs and company names are deduplicated in first-seen order; `NULL`s from
/// the outer joins are skipped, so a travel without albums or companions still
/// yields a post with empty lists.
pub fn project(group: Vec<JoinedRow>) -> Option<TravelPost> {
	let first = group.first()?;
	let mut post = TravelPost {
		id: first.id,
		title: first.title.clone(),
		description: first.description.clone(),
		locality: first.locality.clone(),
		initial_date: first.initial_date,
		final_date: first.final_date,
		created_at: first.created_at,
		updated_at: first.updated_at,
		album: Vec::new(),
		company: Vec::new(),
	};

	let (album, company): (Vec<_>, Vec<_>) = group
		.into_iter()
		.map(|row| (row.album_url, row.company_name))
		.unzip();
	post.album = first_seen(album.into_iter().flatten().collect());
	post.company = first_seen(company.into_iter().flatten().collect());

	Some(post)
}

pub fn fold_rows(rows: impl IntoIterator<Item = JoinedRow>) -> Vec<TravelPost> {
	group_rows(rows).into_iter().filter_map(project).collect()
}
