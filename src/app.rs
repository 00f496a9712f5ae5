use std::path::PathBuf;

use log::info;

use crate::paths::Paths;

pub mod auth;
pub mod columns;
pub mod config;
pub mod field;
pub mod library;
pub mod query;
pub mod submit;


#[derive(thiserror::Error, Debug)]
pub enum Error {
	#[error("Filesystem error for `{0}`: `{1}`")]
	Io(PathBuf, std::io::Error),
	#[error(transparent)]
	ConfigDeserialization(#[from] toml::de::Error),
	#[error("Could not parse library file `{0}`: `{1}`")]
	LibraryDeserialization(PathBuf, serde_json::Error),
	#[error("No library file was specified")]
	LibraryNotSpecified,
	#[error("Track id `{0}` appears more than once")]
	DuplicateTrackId(String),
	#[error("Page size must be at least 1")]
	InvalidPageSize,
	#[error("Unknown field `{0}`")]
	UnknownField(String),
	#[error("Unknown column category `{0}`")]
	UnknownCategory(String),
	#[error("Could not load collation data")]
	Collator,
	#[error("Auth secret must be exactly 32 bytes")]
	InvalidAuthSecret,
	#[error("Invalid auth token")]
	InvalidAuthToken,
	#[error("You must be logged in to do this")]
	NotLoggedIn,
	#[error("Only MP3 files can be uploaded: `{0}`")]
	UnsupportedUploadFormat(PathBuf),
	#[error("Please fill in all fields")]
	MissingRegistrationField,
	#[error("Password must be at least {0} characters long")]
	PasswordTooShort(usize),
	#[error("Failed to encode registration")]
	RegistrationEncoding,
	#[error("Failed to encode upload: {0}")]
	UploadEncoding(std::io::Error),
	#[error("No server URL is configured for {0}")]
	ServerUrlNotConfigured(&'static str),
	#[error("Server rejected the submission with HTTP status code `{0}`: {1}")]
	SubmissionRejected(u16, String),
	#[error("Could not reach the server: {0}")]
	SubmissionTransport(String),
}

/// One open library view: its inputs and the collaborators it talks to.
pub struct App {
	pub config: config::Config,
	pub library: library::Library,
	pub descriptors: Vec<columns::ColumnDescriptor>,
	pub engine: query::Engine,
	pub session: Option<auth::SessionContext>,
	pub submitter: submit::HttpSubmitter,
}

impl App {
	pub fn new(paths: Paths) -> Result<Self, Error> {
		let mut config = match &paths.config_file_path {
			Some(path) => config::Config::from_path(path)?,
			None => config::Config::default(),
		};
		config.override_urls(|name| std::env::var(name).ok());

		let library_path = paths
			.library_file_path
			.clone()
			.or_else(|| config.library_path.clone())
			.ok_or(Error::LibraryNotSpecified)?;
		let library = library::Library::from_path(&library_path)?;

		let session = config
			.auth_secret
			.as_ref()
			.and_then(|secret| auth::read_session(&paths.token_file_path, secret));
		match &session {
			Some(s) if s.is_valid() => info!(
				"Logged in as `{}` until {:?}",
				s.username(),
				s.expires_at()
			),
			Some(s) => info!("Session of `{}` has expired", s.username()),
			None => info!("Not logged in"),
		}

		let submitter = submit::HttpSubmitter::new(&config);

		Ok(Self {
			config,
			library,
			descriptors: columns::default_descriptors(),
			engine: query::Engine::new()?,
			session,
			submitter,
		})
	}

	pub fn initial_query_state(&self) -> query::QueryState {
		self.config.initial_query_state(&self.descriptors)
	}

	pub fn is_logged_in(&self) -> bool {
		self.session.as_ref().is_some_and(auth::SessionContext::is_valid)
	}
}
