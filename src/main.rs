use std::{fs, path::Path};

use log::info;
use simplelog::{
	ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, SharedLogger, TermLogger,
	TerminalMode, WriteLogger,
};

mod app;
mod options;
mod paths;
mod utils;

use app::{
	auth,
	columns::Category,
	field::Field,
	query::{self, Facet, QueryResult, QueryState, SortDirection},
	submit, App,
};

#[derive(thiserror::Error, Debug)]
enum Error {
	#[error(transparent)]
	App(#[from] app::Error),
	#[error("Could not parse command line arguments:\n\n{0}")]
	CliArgsParsing(getopts::Fail),
	#[error("Could not create log file `{0}`:\n\n{1}")]
	LogFileCreation(std::path::PathBuf, std::io::Error),
	#[error("Could not initialize log system:\n\n{0}")]
	LogInitialization(log::SetLoggerError),
}

fn init_logging(log_level: LevelFilter, log_file_path: Option<&Path>) -> Result<(), Error> {
	let log_config = ConfigBuilder::new()
		.set_location_level(LevelFilter::Error)
		.build();

	let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
		log_level,
		log_config.clone(),
		TerminalMode::Stderr,
		ColorChoice::Auto,
	)];

	if let Some(path) = log_file_path {
		if let Some(parent) = path.parent() {
			fs::create_dir_all(parent).map_err(|e| Error::LogFileCreation(path.to_owned(), e))?;
		}
		let file = fs::File::create(path).map_err(|e| Error::LogFileCreation(path.to_owned(), e))?;
		loggers.push(WriteLogger::new(log_level, log_config, file));
	}

	CombinedLogger::init(loggers).map_err(Error::LogInitialization)
}

fn main() {
	if let Err(e) = run() {
		eprintln!("Error: {}", e);
		std::process::exit(1);
	}
}

fn run() -> Result<(), Error> {
	let args: Vec<String> = std::env::args().collect();
	let options_manager = options::Manager::new();
	let cli_options = options_manager
		.parse(args.get(1..).unwrap_or_default())
		.map_err(Error::CliArgsParsing)?;

	if cli_options.show_help {
		let program = args.first().map(String::as_str).unwrap_or("songtable");
		let brief = format!("Usage: {} [options]", program);
		print!("{}", options_manager.usage(&brief));
		return Ok(());
	}

	let paths = paths::Paths::new(&cli_options);
	init_logging(
		cli_options.log_level.unwrap_or(LevelFilter::Info),
		paths.log_file_path.as_deref(),
	)?;

	if cli_options.logout {
		auth::logout(&paths.token_file_path)?;
		return Ok(());
	}

	info!("Starting up songtable");
	let app = App::new(paths)?;

	if cli_options.wants_registration() {
		let registration = submit::Registration::new(
			cli_options.register_name.as_deref().unwrap_or_default(),
			cli_options.register_email.as_deref().unwrap_or_default(),
			cli_options.register_password.as_deref().unwrap_or_default(),
		)?;
		submit::register(&app.submitter, registration)?;
		println!("Registration submitted.");
		return Ok(());
	}

	if let Some(path) = &cli_options.upload_file_path {
		submit::upload(&app.submitter, app.session.as_ref(), path)?;
		println!("File uploaded successfully!");
		return Ok(());
	}

	if cli_options.show_facets {
		print_facets(&query::facet_options(app.library.records()));
		return Ok(());
	}

	let mut state = app.initial_query_state();
	apply_cli_options(&app, &cli_options, &mut state)?;

	if let Some(page) = cli_options.page {
		let total_pages = app.engine.run(app.library.records(), &state).total_pages;
		state.go_to_page(page, total_pages);
	}

	let result = app.engine.run(app.library.records(), &state);
	print_result(&app, &state, &result);
	Ok(())
}

fn apply_cli_options(
	app: &App,
	cli_options: &options::CLIOptions,
	state: &mut QueryState,
) -> Result<(), app::Error> {
	if let Some(columns) = &cli_options.columns {
		let fields = columns
			.iter()
			.map(|c| c.parse::<Field>())
			.collect::<Result<Vec<_>, _>>()?;
		state.set_visible_columns(fields);
	}

	for name in &cli_options.categories {
		let category = name.parse::<Category>()?;
		state.set_category_visible(&app.descriptors, category, true);
	}

	if let Some(field) = &cli_options.sort_field {
		state.set_sort_field_name(field);
	}
	if cli_options.descending {
		state.set_sort(state.sort_field(), SortDirection::Descending);
	}

	if let Some(search) = &cli_options.search {
		state.set_search_text(search.as_str());
	}
	for (facet, value) in [
		(Facet::Genre, &cli_options.genre),
		(Facet::Artist, &cli_options.artist),
		(Facet::Album, &cli_options.album),
		(Facet::Year, &cli_options.year),
	] {
		if value.is_some() {
			state.set_facet(facet, value.clone());
		}
	}

	Ok(())
}

fn print_facets(options: &query::FacetOptions) {
	println!("Genres:\t{}", options.genres.join(", "));
	println!("Artists:\t{}", options.artists.join(", "));
	println!("Albums:\t{}", options.albums.join(", "));
	let years = options
		.years
		.iter()
		.map(|y| y.to_string())
		.collect::<Vec<_>>();
	println!("Years:\t{}", years.join(", "));
}

fn print_result(app: &App, state: &QueryState, result: &QueryResult<'_>) {
	let columns = state.visible_columns_in_order(&app.descriptors);

	let header = columns.iter().map(|c| c.label).collect::<Vec<_>>();
	println!("{}", header.join("\t"));
	for record in &result.page {
		let cells = columns.iter().map(|c| c.render(record)).collect::<Vec<_>>();
		println!("{}", cells.join("\t"));
	}

	println!();
	println!("{}", result.summary());

	if state.has_filters() {
		let mut filters = Vec::new();
		if !state.search_text().is_empty() {
			filters.push(format!("search={:?}", state.search_text()));
		}
		for (facet, name) in [
			(Facet::Genre, "genre"),
			(Facet::Artist, "artist"),
			(Facet::Album, "album"),
			(Facet::Year, "year"),
		] {
			if let Some(value) = state.facets().get(facet) {
				filters.push(format!("{}={:?}", name, value));
			}
		}
		println!("Filters: {}", filters.join(" "));
	}

	if result.total_pages > 1 {
		let mut buttons = query::page_window(state.current_page(), result.total_pages)
			.into_iter()
			.map(|page| match page == state.current_page() {
				true => format!("[{}]", page),
				false => page.to_string(),
			})
			.collect::<Vec<_>>();
		if query::shows_last_page_shortcut(state.current_page(), result.total_pages) {
			buttons.push("...".to_owned());
			buttons.push(result.total_pages.to_string());
		}
		println!("Pages: {}", buttons.join(" "));
	}
}
