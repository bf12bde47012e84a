//! `DD/MM/YYYY` wire dates

use chrono::{Datelike, NaiveDate};

/// Parse a `DD/MM/YYYY` date.
///
/// Day and month must be zero-padded to two digits and the year written with four,
/// so that every accepted string formats back to itself.
pub fn parse_wire_date(value: &str) -> Option<NaiveDate> {
	let mut parts = value.split('/');
	let (day, month, year) = (parts.next()?, parts.next()?, parts.next()?);
	if parts.next().is_some() {
		return None;
	}

	let digits = |s: &str, len: usize| s.len() == len && s.bytes().all(|b| b.is_ascii_digit());
	if !digits(day, 2) || !digits(month, 2) || !digits(year, 4) {
		return None;
	}

	NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

pub fn format_wire_date(date: NaiveDate) -> String {
	format!("{:02}/{:02}/{:04}", date.day(), date.month(), date.year())
}

/// Serde adapter for `NaiveDate` fields stored as `DD/MM/YYYY`
pub mod wire_date {
	use chrono::NaiveDate;
	use serde::{de::Error, Deserialize, Deserializer, Serializer};

	pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(&super::format_wire_date(*date))
	}

	pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
		let raw = String::deserialize(deserializer)?;
		super::parse_wire_date(&raw)
			.ok_or_else(|| D::Error::custom(format!("invalid date `{raw}`, expected DD/MM/YYYY")))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn round_trips_padded_dates() {
		let date = parse_wire_date("01/01/2024").unwrap();
		assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
		assert_eq!(format_wire_date(date), "01/01/2024");

		let date = parse_wire_date("29/02/2024").unwrap();
		assert_eq!(format_wire_date(date), "29/02/2024");
	}

	#[test]
	fn rejects_malformed_dates() {
		for raw in [
			"",
			"1/1/2024",
			"2024-01-01",
			"31/02/2024",
			"29/02/2023",
			"01/13/2024",
			"01/01/24",
			"01/01/2024/",
			"aa/01/2024",
		] {
			assert!(parse_wire_date(raw).is_none(), "{raw} should be rejected");
		}
	}
}
