//! Travel post records

use super::date::{parse_wire_date, wire_date};
use crate::error::{PostError, Result, MSG_INVALID_INPUTS, MSG_MISSING_INPUTS};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// A travel post as exchanged with clients and stored in the JSON file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelPost {
	pub id: i32,
	pub title: String,
	pub description: String,
	pub locality: String,
	#[serde(with = "wire_date")]
	pub initial_date: NaiveDate,
	#[serde(with = "wire_date")]
	pub final_date: NaiveDate,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
	/// Image URLs, in insertion order
	pub album: Vec<String>,
	/// Companion names
	pub company: Vec<String>,
}

impl TravelPost {
	pub fn from_draft(id: i32, draft: PostDraft, created_at: DateTime<Utc>) -> Self {
		Self {
			id,
			title: draft.title,
			description: draft.description,
			locality: draft.locality,
			initial_date: draft.initial_date,
			final_date: draft.final_date,
			created_at,
			updated_at: created_at,
			album: first_seen(draft.album),
			company: first_seen(draft.company),
		}
	}

	/// Replace every writable field and refresh `updated_at`
	pub fn apply(&mut self, draft: PostDraft, now: DateTime<Utc>) {
		self.title = draft.title;
		self.description = draft.description;
		self.locality = draft.locality;
		self.initial_date = draft.initial_date;
		self.final_date = draft.final_date;
		self.album = first_seen(draft.album);
		self.company = first_seen(draft.company);
		self.updated_at = now;
	}
}

/// Drop repeated entries, keeping the first occurrence of each
pub(crate) fn first_seen(items: Vec<String>) -> Vec<String> {
	let mut seen = HashSet::new();
	items
		.into_iter()
		.filter(|item| seen.insert(item.clone()))
		.collect()
}

/// The complete set of writable fields of a post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
	pub title: String,
	pub description: String,
	pub locality: String,
	pub initial_date: NaiveDate,
	pub final_date: NaiveDate,
	pub album: Vec<String>,
	pub company: Vec<String>,
}

impl PostDraft {
	/// Build a draft from a request payload; every field must be present.
	pub fn from_payload(payload: &Map<String, Value>) -> Result<Self> {
		PostPatch::from_payload(payload)?.into_draft()
	}

	/// A post must always keep at least one album entry
	pub fn ensure_album(&self) -> Result<()> {
		if self.album.is_empty() {
			return Err(PostError::empty_album());
		}
		Ok(())
	}
}

/// Partial update: absent fields keep their stored value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostPatch {
	pub title: Option<String>,
	pub description: Option<String>,
	pub locality: Option<String>,
	pub initial_date: Option<NaiveDate>,
	pub final_date: Option<NaiveDate>,
	pub album: Option<Vec<String>>,
	pub company: Option<Vec<String>>,
}

impl PostPatch {
	/// Read the known fields out of a request payload.
	///
	/// Values of the wrong shape are reported under `invalidTypes`, dates that are not
	/// `DD/MM/YYYY` under `invalidDates`. Unknown keys are ignored; rejecting them is the
	/// job of the allowed-fields validator.
	pub fn from_payload(payload: &Map<String, Value>) -> Result<Self> {
		let mut reader = FieldReader::new(payload);

		let patch = Self {
			title: reader.string("title"),
			description: reader.string("description"),
			locality: reader.string("locality"),
			initial_date: reader.date("initialDate"),
			final_date: reader.date("finalDate"),
			album: reader.strings("album"),
			company: reader.strings("company"),
		};

		reader.finish()?;
		Ok(patch)
	}

	/// Overlay this patch on an existing post.
	///
	/// `album` and `company` are replaced wholesale when supplied.
	pub fn merge(self, existing: &TravelPost) -> PostDraft {
		PostDraft {
			title: self.title.unwrap_or_else(|| existing.title.clone()),
			description: self.description.unwrap_or_else(|| existing.description.clone()),
			locality: self.locality.unwrap_or_else(|| existing.locality.clone()),
			initial_date: self.initial_date.unwrap_or(existing.initial_date),
			final_date: self.final_date.unwrap_or(existing.final_date),
			album: self.album.unwrap_or_else(|| existing.album.clone()),
			company: self.company.unwrap_or_else(|| existing.company.clone()),
		}
	}

	/// Promote to a full draft, failing with `missingInputs` if any field is absent
	pub fn into_draft(self) -> Result<PostDraft> {
		let missing: Vec<String> = [
			("title", self.title.is_none()),
			("locality", self.locality.is_none()),
			("album", self.album.is_none()),
			("description", self.description.is_none()),
			("company", self.company.is_none()),
			("initialDate", self.initial_date.is_none()),
			("finalDate", self.final_date.is_none()),
		]
		.into_iter()
		.filter_map(|(name, absent)| absent.then(|| name.to_string()))
		.collect();

		match self {
			Self {
				title: Some(title),
				description: Some(description),
				locality: Some(locality),
				initial_date: Some(initial_date),
				final_date: Some(final_date),
				album: Some(album),
				company: Some(company),
			} => Ok(PostDraft {
				title,
				description,
				locality,
				initial_date,
				final_date,
				album,
				company,
			}),
			_ => Err(PostError::validation(
				MSG_MISSING_INPUTS,
				"missingInputs",
				missing,
			)),
		}
	}
}

struct FieldReader<'a> {
	payload: &'a Map<String, Value>,
	invalid_types: Vec<String>,
	invalid_dates: Vec<String>,
}

impl<'a> FieldReader<'a> {
	fn new(payload: &'a Map<String, Value>) -> Self {
		Self {
			payload,
			invalid_types: Vec::new(),
			invalid_dates: Vec::new(),
		}
	}

	fn string(&mut self, key: &str) -> Option<String> {
		match self.payload.get(key)? {
			Value::String(s) => Some(s.clone()),
			_ => {
				self.invalid_types.push(key.to_string());
				None
			}
		}
	}

	fn strings(&mut self, key: &str) -> Option<Vec<String>> {
		let items = match self.payload.get(key)? {
			Value::Array(items) => items,
			_ => {
				self.invalid_types.push(key.to_string());
				return None;
			}
		};

		let strings: Option<Vec<String>> = items
			.iter()
			.map(|item| item.as_str().map(str::to_string))
			.collect();

		if strings.is_none() {
			self.invalid_types.push(key.to_string());
		}
		strings
	}

	fn date(&mut self, key: &str) -> Option<NaiveDate> {
		let raw = self.string(key)?;
		let date = parse_wire_date(&raw);
		if date.is_none() {
			self.invalid_dates.push(key.to_string());
		}
		date
	}

	fn finish(self) -> Result<()> {
		if !self.invalid_types.is_empty() {
			return Err(PostError::validation(
				MSG_INVALID_INPUTS,
				"invalidTypes",
				self.invalid_types,
			));
		}
		if !self.invalid_dates.is_empty() {
			return Err(PostError::validation(
				MSG_INVALID_INPUTS,
				"invalidDates",
				self.invalid_dates,
			));
		}
		Ok(())
	}
}
