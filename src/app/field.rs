use std::{fmt, str::FromStr};

use crate::app::{library::TrackRecord, Error};

/// Names one key of a [`TrackRecord`]. String forms match the camelCase keys
/// used in library files, configuration and on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
	Id,
	Title,
	Artists,
	AlbumArtist,
	Albums,
	Years,
	Genres,
	TrackNumber,
	DiscNumber,
	Duration,
	Bitrate,
	SampleRate,
	Channels,
	Encoder,
	FileSize,
	Composers,
	Conductors,
	Publisher,
	Copyright,
	Isrc,
	Bpm,
	Key,
	Mood,
	Language,
	Comments,
	Lyrics,
	Paths,
	LastModified,
	PlayCount,
	Rating,
}

impl Field {
	pub const ALL: [Field; 30] = [
		Field::Id,
		Field::Title,
		Field::Artists,
		Field::AlbumArtist,
		Field::Albums,
		Field::Years,
		Field::Genres,
		Field::TrackNumber,
		Field::DiscNumber,
		Field::Duration,
		Field::Bitrate,
		Field::SampleRate,
		Field::Channels,
		Field::Encoder,
		Field::FileSize,
		Field::Composers,
		Field::Conductors,
		Field::Publisher,
		Field::Copyright,
		Field::Isrc,
		Field::Bpm,
		Field::Key,
		Field::Mood,
		Field::Language,
		Field::Comments,
		Field::Lyrics,
		Field::Paths,
		Field::LastModified,
		Field::PlayCount,
		Field::Rating,
	];

	pub fn name(self) -> &'static str {
		match self {
			Field::Id => "id",
			Field::Title => "title",
			Field::Artists => "artists",
			Field::AlbumArtist => "albumArtist",
			Field::Albums => "albums",
			Field::Years => "years",
			Field::Genres => "genres",
			Field::TrackNumber => "trackNumber",
			Field::DiscNumber => "discNumber",
			Field::Duration => "duration",
			Field::Bitrate => "bitrate",
			Field::SampleRate => "sampleRate",
			Field::Channels => "channels",
			Field::Encoder => "encoder",
			Field::FileSize => "fileSize",
			Field::Composers => "composers",
			Field::Conductors => "conductors",
			Field::Publisher => "publisher",
			Field::Copyright => "copyright",
			Field::Isrc => "isrc",
			Field::Bpm => "bpm",
			Field::Key => "key",
			Field::Mood => "mood",
			Field::Language => "language",
			Field::Comments => "comments",
			Field::Lyrics => "lyrics",
			Field::Paths => "paths",
			Field::LastModified => "lastModified",
			Field::PlayCount => "playCount",
			Field::Rating => "rating",
		}
	}
}

impl fmt::Display for Field {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for Field {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Field::ALL
			.iter()
			.copied()
			.find(|field| field.name() == s)
			.ok_or_else(|| Error::UnknownField(s.to_owned()))
	}
}

/// Borrowed view of a single field of a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldValue<'a> {
	Text(&'a str),
	Number(i64),
	TextList(&'a [String]),
	NumberList(&'a [i64]),
}

impl TrackRecord {
	pub fn get(&self, field: Field) -> FieldValue<'_> {
		use FieldValue::*;
		match field {
			Field::Id => Text(&self.id),
			Field::Title => Text(&self.title),
			Field::Artists => TextList(&self.artists),
			Field::AlbumArtist => Text(&self.album_artist),
			Field::Albums => TextList(&self.albums),
			Field::Years => NumberList(&self.years),
			Field::Genres => TextList(&self.genres),
			Field::TrackNumber => Number(self.track_number),
			Field::DiscNumber => Number(self.disc_number),
			Field::Duration => Text(&self.duration),
			Field::Bitrate => Text(&self.bitrate),
			Field::SampleRate => Text(&self.sample_rate),
			Field::Channels => Number(self.channels),
			Field::Encoder => Text(&self.encoder),
			Field::FileSize => Text(&self.file_size),
			Field::Composers => TextList(&self.composers),
			Field::Conductors => TextList(&self.conductors),
			Field::Publisher => Text(&self.publisher),
			Field::Copyright => Text(&self.copyright),
			Field::Isrc => Text(&self.isrc),
			Field::Bpm => Number(self.bpm),
			Field::Key => Text(&self.key),
			Field::Mood => Text(&self.mood),
			Field::Language => Text(&self.language),
			Field::Comments => Text(&self.comments),
			Field::Lyrics => Text(&self.lyrics),
			Field::Paths => TextList(&self.paths),
			Field::LastModified => Text(&self.last_modified),
			Field::PlayCount => Number(self.play_count),
			Field::Rating => Number(self.rating),
		}
	}
}
