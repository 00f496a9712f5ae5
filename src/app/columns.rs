use std::{fmt, str::FromStr};

use enum_map::{Enum, EnumMap};

use crate::app::{
	field::{Field, FieldValue},
	library::TrackRecord,
	Error,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Enum)]
pub enum Category {
	Basic,
	Technical,
	Additional,
	Custom,
	File,
}

impl Category {
	pub fn name(self) -> &'static str {
		match self {
			Category::Basic => "basic",
			Category::Technical => "technical",
			Category::Additional => "additional",
			Category::Custom => "custom",
			Category::File => "file",
		}
	}
}

impl fmt::Display for Category {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for Category {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"basic" => Ok(Category::Basic),
			"technical" => Ok(Category::Technical),
			"additional" => Ok(Category::Additional),
			"custom" => Ok(Category::Custom),
			"file" => Ok(Category::File),
			_ => Err(Error::UnknownCategory(s.to_owned())),
		}
	}
}

/// How a column turns a field into display text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Render {
	PlainText,
	JoinedList(&'static str),
	StarRating(u8),
	FirstOfList,
}

impl Render {
	pub fn apply(self, value: FieldValue<'_>) -> String {
		match (self, value) {
			(Render::StarRating(max), FieldValue::Number(n)) => {
				let max = max as usize;
				let filled = n.clamp(0, max as i64) as usize;
				let mut stars = "★".repeat(filled);
				stars.push_str(&"☆".repeat(max - filled));
				stars
			}
			(Render::FirstOfList, FieldValue::TextList(l)) => l.first().cloned().unwrap_or_default(),
			(Render::FirstOfList, FieldValue::NumberList(l)) => {
				l.first().map(|n| n.to_string()).unwrap_or_default()
			}
			(Render::JoinedList(separator), value) => join(value, separator),
			(_, value) => join(value, ", "),
		}
	}
}

fn join(value: FieldValue<'_>, separator: &str) -> String {
	match value {
		FieldValue::Text(s) => s.to_owned(),
		FieldValue::Number(n) => n.to_string(),
		FieldValue::TextList(l) => l.join(separator),
		FieldValue::NumberList(l) => l
			.iter()
			.map(|n| n.to_string())
			.collect::<Vec<_>>()
			.join(separator),
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnDescriptor {
	pub key: Field,
	pub label: &'static str,
	pub category: Category,
	pub default_visible: bool,
	pub render: Render,
}

impl ColumnDescriptor {
	const fn new(
		key: Field,
		label: &'static str,
		category: Category,
		default_visible: bool,
		render: Render,
	) -> Self {
		Self {
			key,
			label,
			category,
			default_visible,
			render,
		}
	}

	pub fn render(&self, record: &TrackRecord) -> String {
		self.render.apply(record.get(self.key))
	}
}

pub fn default_descriptors() -> Vec<ColumnDescriptor> {
	use Category::*;
	use Render::*;
	vec![
		ColumnDescriptor::new(Field::Title, "Title", Basic, true, PlainText),
		ColumnDescriptor::new(Field::Artists, "Artists", Basic, true, JoinedList(", ")),
		ColumnDescriptor::new(Field::AlbumArtist, "Album Artist", Basic, false, PlainText),
		ColumnDescriptor::new(Field::Albums, "Albums", Basic, true, JoinedList(", ")),
		ColumnDescriptor::new(Field::Years, "Years", Basic, true, JoinedList(", ")),
		ColumnDescriptor::new(Field::Genres, "Genres", Basic, true, JoinedList(", ")),
		ColumnDescriptor::new(Field::TrackNumber, "Track #", Basic, false, PlainText),
		ColumnDescriptor::new(Field::DiscNumber, "Disc #", Basic, false, PlainText),
		ColumnDescriptor::new(Field::Duration, "Duration", Technical, true, PlainText),
		ColumnDescriptor::new(Field::Bitrate, "Bitrate", Technical, false, PlainText),
		ColumnDescriptor::new(Field::SampleRate, "Sample Rate", Technical, false, PlainText),
		ColumnDescriptor::new(Field::Channels, "Channels", Technical, false, PlainText),
		ColumnDescriptor::new(Field::Encoder, "Encoder", Technical, false, PlainText),
		ColumnDescriptor::new(Field::FileSize, "File Size", Technical, false, PlainText),
		ColumnDescriptor::new(Field::Composers, "Composers", Additional, false, JoinedList(", ")),
		ColumnDescriptor::new(Field::Conductors, "Conductors", Additional, false, JoinedList(", ")),
		ColumnDescriptor::new(Field::Publisher, "Publisher", Additional, false, PlainText),
		ColumnDescriptor::new(Field::Copyright, "Copyright", Additional, false, PlainText),
		ColumnDescriptor::new(Field::Isrc, "ISRC", Additional, false, PlainText),
		ColumnDescriptor::new(Field::Bpm, "BPM", Additional, false, PlainText),
		ColumnDescriptor::new(Field::Key, "Key", Additional, false, PlainText),
		ColumnDescriptor::new(Field::Mood, "Mood", Additional, false, PlainText),
		ColumnDescriptor::new(Field::Language, "Language", Additional, false, PlainText),
		ColumnDescriptor::new(Field::Comments, "Comments", Custom, false, PlainText),
		ColumnDescriptor::new(Field::Lyrics, "Lyrics", Custom, false, PlainText),
		ColumnDescriptor::new(Field::Paths, "Path", File, false, FirstOfList),
		ColumnDescriptor::new(Field::LastModified, "Last Modified", File, false, PlainText),
		ColumnDescriptor::new(Field::PlayCount, "Play Count", File, false, PlainText),
		ColumnDescriptor::new(Field::Rating, "Rating", File, true, StarRating(5)),
	]
}

/// Column keys of each category, in declaration order.
pub fn columns_by_category(descriptors: &[ColumnDescriptor]) -> EnumMap<Category, Vec<Field>> {
	let mut categories = EnumMap::<Category, Vec<Field>>::default();
	for descriptor in descriptors {
		categories[descriptor.category].push(descriptor.key);
	}
	categories
}
