use std::cmp::Ordering;

use icu_collator::{Collator, CollatorOptions, Strength};
use serde::{Deserialize, Serialize};

use crate::app::{
	field::{Field, FieldValue},
	library::TrackRecord,
	Error,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
	#[default]
	#[serde(alias = "asc")]
	Ascending,
	#[serde(alias = "desc")]
	Descending,
}

impl SortDirection {
	pub fn toggled(self) -> Self {
		match self {
			SortDirection::Ascending => SortDirection::Descending,
			SortDirection::Descending => SortDirection::Ascending,
		}
	}
}

pub fn make_collator() -> Result<Collator, Error> {
	let options = {
		let mut o = CollatorOptions::new();
		o.strength = Some(Strength::Tertiary);
		o
	};
	Collator::try_new(&Default::default(), options).map_err(|_| Error::Collator)
}

/// Multi-valued fields compare by their first element, an empty list standing
/// in for the empty string or zero.
pub fn compare(collator: &Collator, a: FieldValue<'_>, b: FieldValue<'_>) -> Ordering {
	match (a, b) {
		(FieldValue::TextList(a), FieldValue::TextList(b)) => {
			let a = a.first().map(String::as_str).unwrap_or_default();
			let b = b.first().map(String::as_str).unwrap_or_default();
			collator.compare(a, b)
		}
		(FieldValue::NumberList(a), FieldValue::NumberList(b)) => {
			let a = a.first().copied().unwrap_or_default();
			let b = b.first().copied().unwrap_or_default();
			a.cmp(&b)
		}
		(FieldValue::Text(a), FieldValue::Text(b)) => collator.compare(a, b),
		(FieldValue::Number(a), FieldValue::Number(b)) => a.cmp(&b),
		_ => Ordering::Equal,
	}
}

/// Stable: records with equal keys keep their input order in both directions.
/// Without a sort field the input order is kept as is.
pub fn sort_records(
	collator: &Collator,
	records: &mut [&TrackRecord],
	field: Option<Field>,
	direction: SortDirection,
) {
	let Some(field) = field else {
		return;
	};
	records.sort_by(|a, b| {
		let ordering = compare(collator, a.get(field), b.get(field));
		match direction {
			SortDirection::Ascending => ordering,
			SortDirection::Descending => ordering.reverse(),
		}
	});
}
