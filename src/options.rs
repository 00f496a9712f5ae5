use simplelog::LevelFilter;
use std::path::PathBuf;

#[derive(Debug, Default)]
pub struct CLIOptions {
	pub show_help: bool,
	pub config_file_path: Option<PathBuf>,
	pub library_file_path: Option<PathBuf>,
	pub log_file_path: Option<PathBuf>,
	pub log_level: Option<LevelFilter>,
	pub token_file_path: Option<PathBuf>,
	pub search: Option<String>,
	pub genre: Option<String>,
	pub artist: Option<String>,
	pub album: Option<String>,
	pub year: Option<String>,
	pub sort_field: Option<String>,
	pub descending: bool,
	pub page: Option<usize>,
	pub columns: Option<Vec<String>>,
	pub categories: Vec<String>,
	pub show_facets: bool,
	pub upload_file_path: Option<PathBuf>,
	pub register_name: Option<String>,
	pub register_email: Option<String>,
	pub register_password: Option<String>,
	pub logout: bool,
}

impl CLIOptions {
	pub fn wants_registration(&self) -> bool {
		self.register_name.is_some()
			|| self.register_email.is_some()
			|| self.register_password.is_some()
	}
}

pub struct Manager {
	protocol: getopts::Options,
}

impl Manager {
	pub fn new() -> Self {
		Self {
			protocol: get_options(),
		}
	}

	pub fn parse(&self, input: &[String]) -> Result<CLIOptions, getopts::Fail> {
		let matches = self.protocol.parse(input)?;

		Ok(CLIOptions {
			show_help: matches.opt_present("h"),
			config_file_path: matches.opt_str("c").map(PathBuf::from),
			library_file_path: matches.opt_str("l").map(PathBuf::from),
			log_file_path: matches.opt_str("log").map(PathBuf::from),
			log_level: matches.opt_str("log-level").and_then(|l| l.parse().ok()),
			token_file_path: matches.opt_str("token").map(PathBuf::from),
			search: matches.opt_str("s"),
			genre: matches.opt_str("genre"),
			artist: matches.opt_str("artist"),
			album: matches.opt_str("album"),
			year: matches.opt_str("year"),
			sort_field: matches.opt_str("sort"),
			descending: matches.opt_present("descending"),
			page: matches.opt_str("page").and_then(|p| p.parse().ok()),
			columns: matches.opt_str("columns").map(|c| {
				c.split(',')
					.map(str::trim)
					.filter(|c| !c.is_empty())
					.map(str::to_owned)
					.collect()
			}),
			categories: matches.opt_strs("category"),
			show_facets: matches.opt_present("facets"),
			upload_file_path: matches.opt_str("upload").map(PathBuf::from),
			register_name: matches.opt_str("register-name"),
			register_email: matches.opt_str("register-email"),
			register_password: matches.opt_str("register-password"),
			logout: matches.opt_present("logout"),
		})
	}

	pub fn usage(&self, brief: &str) -> String {
		self.protocol.usage(brief)
	}
}

fn get_options() -> getopts::Options {
	let mut options = getopts::Options::new();
	options.optopt("c", "config", "set the configuration file", "FILE");
	options.optopt("l", "library", "set the library file (JSON)", "FILE");
	options.optopt("", "log", "set the path to the log file", "FILE");
	options.optopt(
		"",
		"log-level",
		"set the log level (off, error, warn, info, debug, trace)",
		"LEVEL",
	);
	options.optopt("", "token", "set the session token file", "FILE");
	options.optopt("s", "search", "only list songs matching this text", "TEXT");
	options.optopt("", "genre", "only list songs of this genre", "GENRE");
	options.optopt("", "artist", "only list songs by this artist", "ARTIST");
	options.optopt("", "album", "only list songs from this album", "ALBUM");
	options.optopt("", "year", "only list songs from this year", "YEAR");
	options.optopt("", "sort", "sort by this field", "FIELD");
	options.optflag("", "descending", "sort in descending order");
	options.optopt("", "page", "show this page of results", "N");
	options.optopt("", "columns", "comma-separated columns to show", "FIELDS");
	options.optmulti("", "category", "show every column of this category", "NAME");
	options.optflag("", "facets", "list the values available for each filter");
	options.optopt("", "upload", "upload an MP3 file", "FILE");
	options.optopt("", "register-name", "name for a new account", "NAME");
	options.optopt("", "register-email", "email for a new account", "EMAIL");
	options.optopt("", "register-password", "password for a new account", "PASSWORD");
	options.optflag("", "logout", "forget the stored session token");
	options.optflag("h", "help", "print this help menu");
	options
}
