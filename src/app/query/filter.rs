use std::collections::HashSet;

use crate::app::library::TrackRecord;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Facet {
	Genre,
	Artist,
	Album,
	Year,
}

/// Selected value per facet. `None` means the facet does not filter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Facets {
	pub genre: Option<String>,
	pub artist: Option<String>,
	pub album: Option<String>,
	pub year: Option<String>,
}

impl Facets {
	pub fn get(&self, facet: Facet) -> Option<&str> {
		match facet {
			Facet::Genre => self.genre.as_deref(),
			Facet::Artist => self.artist.as_deref(),
			Facet::Album => self.album.as_deref(),
			Facet::Year => self.year.as_deref(),
		}
	}

	pub fn set(&mut self, facet: Facet, value: Option<String>) {
		let slot = match facet {
			Facet::Genre => &mut self.genre,
			Facet::Artist => &mut self.artist,
			Facet::Album => &mut self.album,
			Facet::Year => &mut self.year,
		};
		*slot = value;
	}

	pub fn is_empty(&self) -> bool {
		self.genre.is_none() && self.artist.is_none() && self.album.is_none() && self.year.is_none()
	}
}

/// Distinct facet values across a whole library.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FacetOptions {
	pub genres: Vec<String>,
	pub artists: Vec<String>,
	pub albums: Vec<String>,
	pub years: Vec<i64>,
}

/// Text values keep first-seen order, years are listed newest first.
pub fn facet_options(records: &[TrackRecord]) -> FacetOptions {
	let mut options = FacetOptions::default();
	let mut seen_genres = HashSet::new();
	let mut seen_artists = HashSet::new();
	let mut seen_albums = HashSet::new();
	let mut seen_years = HashSet::new();

	for record in records {
		for genre in &record.genres {
			if seen_genres.insert(genre.as_str()) {
				options.genres.push(genre.clone());
			}
		}
		for artist in &record.artists {
			if seen_artists.insert(artist.as_str()) {
				options.artists.push(artist.clone());
			}
		}
		for album in &record.albums {
			if seen_albums.insert(album.as_str()) {
				options.albums.push(album.clone());
			}
		}
		for year in &record.years {
			if seen_years.insert(*year) {
				options.years.push(*year);
			}
		}
	}

	options.years.sort_by(|a, b| b.cmp(a));
	options
}

/// Lower-cased search needle, computed once per query.
pub struct Needle(String);

impl Needle {
	pub fn new(search_text: &str) -> Self {
		Self(search_text.to_lowercase())
	}

	fn is_found_in(&self, haystack: &str) -> bool {
		haystack.to_lowercase().contains(&self.0)
	}

	pub fn matches(&self, record: &TrackRecord) -> bool {
		self.0.is_empty()
			|| self.is_found_in(&record.title)
			|| record.artists.iter().any(|a| self.is_found_in(a))
			|| record.albums.iter().any(|a| self.is_found_in(a))
	}
}

pub fn matches_facets(record: &TrackRecord, facets: &Facets) -> bool {
	let contains = |values: &[String], selected: &Option<String>| match selected {
		None => true,
		Some(selected) => values.iter().any(|v| v == selected),
	};

	let matches_year = match &facets.year {
		None => true,
		Some(selected) => record.years.iter().any(|y| y.to_string() == *selected),
	};

	contains(&record.genres, &facets.genre)
		&& contains(&record.artists, &facets.artist)
		&& contains(&record.albums, &facets.album)
		&& matches_year
}
