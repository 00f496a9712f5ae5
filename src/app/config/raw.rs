use std::{io::Read, path::Path};

use serde::{Deserialize, Serialize};

use crate::app::{query::SortDirection, Error};

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Sort {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub field: Option<String>,
	#[serde(default)]
	pub direction: SortDirection,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Config {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub library: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub page_size: Option<usize>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub upload_url: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub register_url: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub auth_secret: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub visible_columns: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub sort: Option<Sort>,
}

impl Config {
	pub fn from_path(path: &Path) -> Result<Self, Error> {
		let mut config_file =
			std::fs::File::open(path).map_err(|e| Error::Io(path.to_owned(), e))?;
		let mut config_file_content = String::new();
		config_file
			.read_to_string(&mut config_file_content)
			.map_err(|e| Error::Io(path.to_owned(), e))?;
		let config = toml::de::from_str::<Self>(&config_file_content)?;
		Ok(config)
	}
}
