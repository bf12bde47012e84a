//! Request payload validators
//!
//! Each validator inspects (and, for sanitizers, rewrites) a JSON object body. They are
//! composed into a [`Pipeline`] that stops at the first failing stage; within a stage,
//! every offending field is collected into the error details.

use crate::error::{PostError, Result, MSG_INVALID_INPUTS, MSG_MISSING_INPUTS};
use serde_json::{Map, Value};

pub type Payload = Map<String, Value>;

/// Writable fields of a travel post, in their canonical order
pub const POST_FIELDS: [&str; 7] = [
	"title",
	"locality",
	"album",
	"description",
	"company",
	"initialDate",
	"finalDate",
];

const TRIMMED_FIELDS: [&str; 5] = ["title", "locality", "description", "initialDate", "finalDate"];

pub trait Validator: Send + Sync {
	fn apply(&self, payload: &mut Payload) -> Result<()>;
}

/// Fails with `missingInputs` when any named field is absent.
///
/// Only presence is checked: `null`, `""` and `[]` all count as present.
#[derive(Debug, Clone)]
pub struct RequiredInputs(pub Vec<String>);

impl Validator for RequiredInputs {
	fn apply(&self, payload: &mut Payload) -> Result<()> {
		let missing: Vec<String> = self
			.0
			.iter()
			.filter(|field| !payload.contains_key(field.as_str()))
			.cloned()
			.collect();

		if !missing.is_empty() {
			return Err(PostError::validation(MSG_MISSING_INPUTS, "missingInputs", missing));
		}
		Ok(())
	}
}

/// Fails with `notAllowed` when the payload carries keys outside the allow-list
#[derive(Debug, Clone)]
pub struct AllowedFields(pub Vec<String>);

impl Validator for AllowedFields {
	fn apply(&self, payload: &mut Payload) -> Result<()> {
		let not_allowed: Vec<String> = payload
			.keys()
			.filter(|key| !self.0.contains(key))
			.cloned()
			.collect();

		if !not_allowed.is_empty() {
			return Err(PostError::validation(MSG_INVALID_INPUTS, "notAllowed", not_allowed));
		}
		Ok(())
	}
}

/// Runtime type of a JSON value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonType {
	String,
	Number,
	Boolean,
	/// JavaScript `typeof` semantics: objects, arrays and `null`
	Object,
	/// Arrays only
	Array,
}

impl JsonType {
	pub fn matches(self, value: &Value) -> bool {
		match self {
			Self::String => value.is_string(),
			Self::Number => value.is_number(),
			Self::Boolean => value.is_boolean(),
			Self::Object => value.is_object() || value.is_array() || value.is_null(),
			Self::Array => value.is_array(),
		}
	}
}

/// Fails with `invalidTypes` for present fields whose type differs from the schema.
///
/// Absent fields are skipped so the same schema serves partial updates.
#[derive(Debug, Clone)]
pub struct ValidateTypes(pub Vec<(String, JsonType)>);

impl Validator for ValidateTypes {
	fn apply(&self, payload: &mut Payload) -> Result<()> {
		let invalid: Vec<String> = self
			.0
			.iter()
			.filter(|(field, expected)| {
				payload
					.get(field.as_str())
					.is_some_and(|value| !expected.matches(value))
			})
			.map(|(field, _)| field.clone())
			.collect();

		if !invalid.is_empty() {
			return Err(PostError::validation(MSG_INVALID_INPUTS, "invalidTypes", invalid));
		}
		Ok(())
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SanitizeRule {
	/// Strip leading and trailing whitespace from strings
	Trim,
	/// Unrecognised rule, accepted and ignored
	Other(String),
}

impl From<&str> for SanitizeRule {
	fn from(s: &str) -> Self {
		match s {
			"trim" => Self::Trim,
			other => Self::Other(other.to_string()),
		}
	}
}

/// Rewrites fields in place; never fails
#[derive(Debug, Clone)]
pub struct SanitizeInputs(pub Vec<(String, SanitizeRule)>);

impl Validator for SanitizeInputs {
	fn apply(&self, payload: &mut Payload) -> Result<()> {
		for (field, rule) in &self.0 {
			let Some(value) = payload.get_mut(field.as_str()) else {
				continue;
			};

			// Rules other than `trim` are reserved and currently leave the value untouched.
			if let (SanitizeRule::Trim, Value::String(s)) = (rule, value) {
				let trimmed = s.trim();
				if trimmed.len() != s.len() {
					*s = trimmed.to_string();
				}
			}
		}
		Ok(())
	}
}

/// Ordered chain of validators
#[derive(Default)]
pub struct Pipeline {
	stages: Vec<Box<dyn Validator>>,
}

impl Pipeline {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn stage(mut self, validator: impl Validator + 'static) -> Self {
		self.stages.push(Box::new(validator));
		self
	}

	pub fn required(self, fields: &[&str]) -> Self {
		self.stage(RequiredInputs(to_owned(fields)))
	}

	pub fn allowed(self, fields: &[&str]) -> Self {
		self.stage(AllowedFields(to_owned(fields)))
	}

	pub fn types(self, schema: &[(&str, JsonType)]) -> Self {
		self.stage(ValidateTypes(
			schema.iter().map(|(f, t)| (f.to_string(), *t)).collect(),
		))
	}

	pub fn sanitize(self, rules: &[(&str, &str)]) -> Self {
		self.stage(SanitizeInputs(
			rules
				.iter()
				.map(|(f, rule)| (f.to_string(), SanitizeRule::from(*rule)))
				.collect(),
		))
	}

	/// Run every stage in order, stopping at the first failure
	pub fn run(&self, payload: &mut Payload) -> Result<()> {
		self.stages.iter().try_for_each(|stage| stage.apply(payload))
	}
}

fn to_owned(fields: &[&str]) -> Vec<String> {
	fields.iter().map(|f| f.to_string()).collect()
}

fn post_schema() -> [(&'static str, JsonType); 7] {
	[
		("title", JsonType::String),
		("locality", JsonType::String),
		("album", JsonType::Array),
		("description", JsonType::String),
		("company", JsonType::Array),
		("initialDate", JsonType::String),
		("finalDate", JsonType::String),
	]
}

fn trim_rules() -> Vec<(&'static str, &'static str)> {
	TRIMMED_FIELDS.iter().map(|f| (*f, "trim")).collect()
}

/// Checks applied to a creation body
pub fn store_pipeline() -> Pipeline {
	Pipeline::new()
		.required(&POST_FIELDS)
		.allowed(&POST_FIELDS)
		.sanitize(&trim_rules())
		.types(&post_schema())
}

/// Checks applied to a partial update body
pub fn modify_pipeline() -> Pipeline {
	Pipeline::new()
		.allowed(&POST_FIELDS)
		.sanitize(&trim_rules())
		.types(&post_schema())
}
