use std::path::PathBuf;

use crate::options::CLIOptions;

pub struct Paths {
	pub config_file_path: Option<PathBuf>,
	pub library_file_path: Option<PathBuf>,
	pub log_file_path: Option<PathBuf>,
	pub token_file_path: PathBuf,
}

impl Default for Paths {
	fn default() -> Self {
		Self {
			config_file_path: None,
			library_file_path: None,
			log_file_path: None,
			token_file_path: [".", "songtable.token"].iter().collect(),
		}
	}
}

impl Paths {
	fn from_build() -> Self {
		let defaults = Self::default();
		Self {
			config_file_path: option_env!("SONGTABLE_CONFIG_DIR")
				.map(PathBuf::from)
				.map(|p| p.join("songtable.toml")),
			library_file_path: None,
			log_file_path: option_env!("SONGTABLE_LOG_DIR")
				.map(PathBuf::from)
				.map(|p| p.join("songtable.log")),
			token_file_path: option_env!("SONGTABLE_DATA_DIR")
				.map(PathBuf::from)
				.map(|p| p.join("songtable.token"))
				.unwrap_or(defaults.token_file_path),
		}
	}

	pub fn new(cli_options: &CLIOptions) -> Self {
		let mut paths = Self::from_build();
		if let Some(path) = &cli_options.config_file_path {
			paths.config_file_path = Some(path.clone());
		}
		if let Some(path) = &cli_options.library_file_path {
			paths.library_file_path = Some(path.clone());
		}
		if let Some(path) = &cli_options.log_file_path {
			paths.log_file_path = Some(path.clone());
		}
		if let Some(path) = &cli_options.token_file_path {
			paths.token_file_path = path.clone();
		}
		paths
	}
}
