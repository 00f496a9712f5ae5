use std::{collections::HashSet, path::Path};

use log::info;
use serde::{Deserialize, Serialize};

use crate::app::Error;

/// One row of the music library.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackRecord {
	// Basic metadata
	pub id: String,
	pub title: String,
	pub artists: Vec<String>,
	pub album_artist: String,
	pub albums: Vec<String>,
	pub years: Vec<i64>,
	pub genres: Vec<String>,
	pub track_number: i64,
	pub disc_number: i64,

	// Technical metadata
	pub duration: String,
	pub bitrate: String,
	pub sample_rate: String,
	pub channels: i64,
	pub encoder: String,
	pub file_size: String,

	// Additional metadata
	pub composers: Vec<String>,
	pub conductors: Vec<String>,
	pub publisher: String,
	pub copyright: String,
	pub isrc: String,
	pub bpm: i64,
	pub key: String,
	pub mood: String,
	pub language: String,

	// Comments and custom tags
	pub comments: String,
	pub lyrics: String,

	// File information
	pub paths: Vec<String>,
	pub last_modified: String,
	pub play_count: i64,
	pub rating: i64,
}

/// Immutable list of records for the lifetime of a session.
#[derive(Clone, Debug, Default)]
pub struct Library {
	records: Vec<TrackRecord>,
}

impl Library {
	pub fn new(records: Vec<TrackRecord>) -> Result<Self, Error> {
		let mut seen = HashSet::with_capacity(records.len());
		for record in &records {
			if !seen.insert(record.id.as_str()) {
				return Err(Error::DuplicateTrackId(record.id.clone()));
			}
		}
		Ok(Self { records })
	}

	pub fn from_path(path: &Path) -> Result<Self, Error> {
		let content = std::fs::read(path).map_err(|e| Error::Io(path.to_owned(), e))?;
		let records = serde_json::from_slice::<Vec<TrackRecord>>(&content)
			.map_err(|e| Error::LibraryDeserialization(path.to_owned(), e))?;
		let library = Self::new(records)?;
		info!(
			"Loaded {} tracks from `{}`",
			library.records.len(),
			path.to_string_lossy()
		);
		Ok(library)
	}

	pub fn records(&self) -> &[TrackRecord] {
		&self.records
	}

	pub fn len(&self) -> usize {
		self.records.len()
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::test::{prepare_test_directory, write_test_file};
	use crate::test_name;

	#[test]
	fn can_load_library_file() {
		let directory = prepare_test_directory(test_name!());
		let path = write_test_file(
			&directory,
			"library.json",
			r#"[
				{ "id": "1", "title": "Kai", "artists": ["FSOL"], "years": [1994], "trackNumber": 3 },
				{ "id": "2", "title": "Fantasy", "artists": ["Stratovarius"], "playCount": 12 }
			]"#,
		);

		let library = Library::from_path(&path).unwrap();
		assert_eq!(library.len(), 2);
		assert_eq!(library.records()[0].title, "Kai");
		assert_eq!(library.records()[0].years, vec![1994]);
		assert_eq!(library.records()[0].track_number, 3);
		assert_eq!(library.records()[1].play_count, 12);
		assert!(library.records()[1].albums.is_empty());
	}

	#[test]
	fn rejects_duplicate_ids() {
		let records = vec![
			TrackRecord {
				id: "a".to_owned(),
				..Default::default()
			},
			TrackRecord {
				id: "a".to_owned(),
				..Default::default()
			},
		];
		assert!(matches!(
			Library::new(records),
			Err(Error::DuplicateTrackId(id)) if id == "a"
		));
	}

	#[test]
	fn reports_malformed_files() {
		let directory = prepare_test_directory(test_name!());
		let path = write_test_file(&directory, "library.json", "{ not json");
		assert!(matches!(
			Library::from_path(&path),
			Err(Error::LibraryDeserialization(_, _))
		));
	}

	#[test]
	fn reports_missing_files() {
		let directory = prepare_test_directory(test_name!());
		let path = directory.join("missing.json");
		assert!(matches!(Library::from_path(&path), Err(Error::Io(_, _))));
	}
}
