use std::{
	num::NonZeroUsize,
	path::{Path, PathBuf},
};

use log::warn;

use crate::app::{
	auth,
	columns::ColumnDescriptor,
	field::Field,
	query::{QueryState, SortDirection, DEFAULT_PAGE_SIZE},
	Error,
};

pub mod raw;

pub const UPLOAD_URL_VARIABLE: &str = "SONGTABLE_UPLOAD_URL";
pub const REGISTER_URL_VARIABLE: &str = "SONGTABLE_REGISTER_URL";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
	pub library_path: Option<PathBuf>,
	pub page_size: NonZeroUsize,
	pub upload_url: Option<String>,
	pub register_url: Option<String>,
	pub auth_secret: Option<auth::Secret>,
	pub visible_columns: Option<Vec<Field>>,
	pub sort_field: Option<Field>,
	pub sort_direction: SortDirection,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			library_path: None,
			page_size: NonZeroUsize::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroUsize::MIN),
			upload_url: None,
			register_url: None,
			auth_secret: None,
			visible_columns: None,
			sort_field: Some(Field::Title),
			sort_direction: SortDirection::Ascending,
		}
	}
}

impl TryFrom<raw::Config> for Config {
	type Error = Error;

	fn try_from(raw: raw::Config) -> Result<Self, Self::Error> {
		let defaults = Config::default();

		let page_size = match raw.page_size {
			None => defaults.page_size,
			Some(n) => NonZeroUsize::new(n).ok_or(Error::InvalidPageSize)?,
		};

		let visible_columns = raw
			.visible_columns
			.map(|names| {
				names
					.iter()
					.map(|n| n.parse::<Field>())
					.collect::<Result<Vec<_>, _>>()
			})
			.transpose()?;

		let auth_secret = raw
			.auth_secret
			.as_deref()
			.map(auth::Secret::try_from)
			.transpose()?;

		let (sort_field, sort_direction) = match raw.sort {
			None => (defaults.sort_field, defaults.sort_direction),
			Some(sort) => {
				let field = match sort.field.as_deref() {
					None => defaults.sort_field,
					Some(name) => match name.parse::<Field>() {
						Ok(field) => Some(field),
						Err(e) => {
							warn!("Ignoring configured sort field: {}", e);
							None
						}
					},
				};
				(field, sort.direction)
			}
		};

		Ok(Config {
			library_path: raw.library.map(PathBuf::from),
			page_size,
			upload_url: raw.upload_url,
			register_url: raw.register_url,
			auth_secret,
			visible_columns,
			sort_field,
			sort_direction,
		})
	}
}

impl Config {
	pub fn from_path(path: &Path) -> Result<Self, Error> {
		raw::Config::from_path(path)?.try_into()
	}

	/// Non-empty variables take precedence over the submission URLs from the file.
	pub fn override_urls<F>(&mut self, lookup: F)
	where
		F: Fn(&str) -> Option<String>,
	{
		let read = |name: &str| lookup(name).filter(|v| !v.is_empty());
		if let Some(url) = read(UPLOAD_URL_VARIABLE) {
			self.upload_url = Some(url);
		}
		if let Some(url) = read(REGISTER_URL_VARIABLE) {
			self.register_url = Some(url);
		}
	}

	pub fn initial_query_state(&self, descriptors: &[ColumnDescriptor]) -> QueryState {
		let mut state = QueryState::new(descriptors, self.page_size);
		state.set_sort(self.sort_field, self.sort_direction);
		if let Some(columns) = &self.visible_columns {
			state.set_visible_columns(columns.iter().copied());
		}
		state
	}
}

#[cfg(test)]
mod test {
	use std::collections::HashMap;

	use super::*;
	use crate::app::columns::default_descriptors;
	use crate::test::{prepare_test_directory, write_test_file};
	use crate::test_name;

	#[test]
	fn can_read_config_file() {
		let directory = prepare_test_directory(test_name!());
		let path = write_test_file(
			&directory,
			"songtable.toml",
			r#"
				library = "/home/music/library.json"
				page_size = 50
				upload_url = "https://example.com/upload"
				visible_columns = ["title", "rating"]

				[sort]
				field = "playCount"
				direction = "desc"
			"#,
		);

		let config = Config::from_path(&path).unwrap();
		assert_eq!(
			config.library_path,
			Some(PathBuf::from("/home/music/library.json"))
		);
		assert_eq!(config.page_size.get(), 50);
		assert_eq!(
			config.upload_url.as_deref(),
			Some("https://example.com/upload")
		);
		assert_eq!(config.register_url, None);
		assert_eq!(
			config.visible_columns,
			Some(vec![Field::Title, Field::Rating])
		);
		assert_eq!(config.sort_field, Some(Field::PlayCount));
		assert_eq!(config.sort_direction, SortDirection::Descending);
	}

	#[test]
	fn empty_config_uses_defaults() {
		let config: Config = raw::Config::default().try_into().unwrap();
		assert_eq!(config, Config::default());
		assert_eq!(config.page_size.get(), DEFAULT_PAGE_SIZE);
	}

	#[test]
	fn rejects_zero_page_size() {
		let raw = raw::Config {
			page_size: Some(0),
			..Default::default()
		};
		assert!(matches!(
			Config::try_from(raw),
			Err(Error::InvalidPageSize)
		));
	}

	#[test]
	fn rejects_unknown_columns() {
		let raw = raw::Config {
			visible_columns: Some(vec!["title".to_owned(), "tempo".to_owned()]),
			..Default::default()
		};
		assert!(matches!(
			Config::try_from(raw),
			Err(Error::UnknownField(name)) if name == "tempo"
		));
	}

	#[test]
	fn unknown_sort_field_is_not_fatal() {
		let raw = raw::Config {
			sort: Some(raw::Sort {
				field: Some("tempo".to_owned()),
				direction: SortDirection::Ascending,
			}),
			..Default::default()
		};
		let config = Config::try_from(raw).unwrap();
		assert_eq!(config.sort_field, None);
	}

	#[test]
	fn environment_overrides_urls() {
		let mut config = Config {
			upload_url: Some("https://file.example/upload".to_owned()),
			register_url: Some("https://file.example/register".to_owned()),
			..Default::default()
		};
		let variables = HashMap::from([
			(UPLOAD_URL_VARIABLE, "https://env.example/upload".to_owned()),
			(REGISTER_URL_VARIABLE, String::new()),
		]);
		config.override_urls(|name| variables.get(name).cloned());
		assert_eq!(
			config.upload_url.as_deref(),
			Some("https://env.example/upload")
		);
		assert_eq!(
			config.register_url.as_deref(),
			Some("https://file.example/register")
		);
	}

	#[test]
	fn initial_state_reflects_config() {
		let config = Config {
			visible_columns: Some(vec![Field::Bpm]),
			sort_field: Some(Field::Years),
			sort_direction: SortDirection::Descending,
			..Default::default()
		};
		let state = config.initial_query_state(&default_descriptors());
		assert_eq!(state.sort_field(), Some(Field::Years));
		assert_eq!(state.sort_direction(), SortDirection::Descending);
		assert!(state.is_column_visible(Field::Bpm));
		assert!(!state.is_column_visible(Field::Title));
		assert_eq!(state.current_page(), 1);
	}
}
