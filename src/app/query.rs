use std::{collections::HashSet, num::NonZeroUsize};

use icu_collator::Collator;
use log::{debug, warn};

use crate::app::{
	columns::{columns_by_category, Category, ColumnDescriptor},
	field::Field,
	library::TrackRecord,
	Error,
};

mod filter;
mod pagination;
mod sort;

pub use filter::{facet_options, Facet, FacetOptions, Facets};
pub use pagination::{page_window, shows_last_page_shortcut, Pagination};
pub use sort::SortDirection;

pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Everything the user has chosen in one library view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryState {
	search_text: String,
	facets: Facets,
	sort_field: Option<Field>,
	sort_direction: SortDirection,
	visible_columns: HashSet<Field>,
	current_page: usize,
	page_size: NonZeroUsize,
}

impl QueryState {
	pub fn new(descriptors: &[ColumnDescriptor], page_size: NonZeroUsize) -> Self {
		Self {
			search_text: String::new(),
			facets: Facets::default(),
			sort_field: Some(Field::Title),
			sort_direction: SortDirection::Ascending,
			visible_columns: descriptors
				.iter()
				.filter(|d| d.default_visible)
				.map(|d| d.key)
				.collect(),
			current_page: 1,
			page_size,
		}
	}

	pub fn search_text(&self) -> &str {
		&self.search_text
	}

	pub fn set_search_text<S: Into<String>>(&mut self, search_text: S) {
		self.search_text = search_text.into();
		self.current_page = 1;
	}

	pub fn facets(&self) -> &Facets {
		&self.facets
	}

	pub fn set_facet(&mut self, facet: Facet, value: Option<String>) {
		self.facets.set(facet, value);
		self.current_page = 1;
	}

	pub fn reset_filters(&mut self) {
		self.search_text.clear();
		self.facets = Facets::default();
		self.current_page = 1;
	}

	pub fn has_filters(&self) -> bool {
		!self.search_text.is_empty() || !self.facets.is_empty()
	}

	pub fn sort_field(&self) -> Option<Field> {
		self.sort_field
	}

	pub fn sort_direction(&self) -> SortDirection {
		self.sort_direction
	}

	pub fn set_sort(&mut self, field: Option<Field>, direction: SortDirection) {
		self.sort_field = field;
		self.sort_direction = direction;
	}

	/// Unknown names leave the records in input order.
	pub fn set_sort_field_name(&mut self, name: &str) {
		self.sort_field = match name.parse::<Field>() {
			Ok(field) => Some(field),
			Err(e) => {
				warn!("Cannot sort by `{}`: {}", name, e);
				None
			}
		};
	}

	/// Clicking the active column flips the direction, any other column
	/// becomes the sort key in ascending order.
	pub fn sort_by(&mut self, field: Field) {
		if self.sort_field == Some(field) {
			self.sort_direction = self.sort_direction.toggled();
		} else {
			self.sort_field = Some(field);
			self.sort_direction = SortDirection::Ascending;
		}
	}

	pub fn current_page(&self) -> usize {
		self.current_page
	}

	pub fn page_size(&self) -> NonZeroUsize {
		self.page_size
	}

	/// Sets the page without validation.
	pub fn set_current_page(&mut self, page: usize) {
		self.current_page = page;
	}

	pub fn go_to_page(&mut self, page: usize, total_pages: usize) {
		self.current_page = page.clamp(1, total_pages.max(1));
	}

	pub fn next_page(&mut self, total_pages: usize) {
		self.go_to_page(self.current_page.saturating_add(1), total_pages);
	}

	pub fn previous_page(&mut self) {
		self.current_page = self.current_page.saturating_sub(1).max(1);
	}

	pub fn visible_columns(&self) -> &HashSet<Field> {
		&self.visible_columns
	}

	pub fn set_visible_columns<I: IntoIterator<Item = Field>>(&mut self, columns: I) {
		self.visible_columns = columns.into_iter().collect();
	}

	pub fn is_column_visible(&self, field: Field) -> bool {
		self.visible_columns.contains(&field)
	}

	pub fn toggle_column(&mut self, field: Field) {
		if !self.visible_columns.remove(&field) {
			self.visible_columns.insert(field);
		}
	}

	/// Descriptors of the visible columns, in declaration order.
	pub fn visible_columns_in_order<'a>(
		&self,
		descriptors: &'a [ColumnDescriptor],
	) -> Vec<&'a ColumnDescriptor> {
		descriptors
			.iter()
			.filter(|d| self.visible_columns.contains(&d.key))
			.collect()
	}

	pub fn is_category_checked(&self, descriptors: &[ColumnDescriptor], category: Category) -> bool {
		columns_by_category(descriptors)[category]
			.iter()
			.all(|field| self.visible_columns.contains(field))
	}

	pub fn set_category_visible(
		&mut self,
		descriptors: &[ColumnDescriptor],
		category: Category,
		visible: bool,
	) {
		let fields = &columns_by_category(descriptors)[category];
		if visible {
			self.visible_columns.extend(fields.iter().copied());
		} else {
			self.visible_columns.retain(|field| !fields.contains(field));
		}
	}

	pub fn toggle_category(&mut self, descriptors: &[ColumnDescriptor], category: Category) {
		let checked = self.is_category_checked(descriptors, category);
		self.set_category_visible(descriptors, category, !checked);
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryResult<'a> {
	pub page: Vec<&'a TrackRecord>,
	pub total_count: usize,
	pub total_pages: usize,
	pub page_start_index: usize,
	pub page_end_index: usize,
}

impl QueryResult<'_> {
	pub fn summary(&self) -> String {
		if self.total_count == 0 {
			"No songs found matching your filters.".to_owned()
		} else {
			format!(
				"Showing {}-{} of {} songs",
				self.page_start_index + 1,
				self.page_end_index,
				self.total_count
			)
		}
	}
}

/// Filters, sorts and paginates records. Holds no state between queries.
pub struct Engine {
	collator: Collator,
}

impl Engine {
	pub fn new() -> Result<Self, Error> {
		Ok(Self {
			collator: sort::make_collator()?,
		})
	}

	pub fn run<'a>(&self, records: &'a [TrackRecord], state: &QueryState) -> QueryResult<'a> {
		let needle = filter::Needle::new(&state.search_text);
		let mut matches = records
			.iter()
			.filter(|r| needle.matches(r) && filter::matches_facets(r, &state.facets))
			.collect::<Vec<_>>();

		sort::sort_records(
			&self.collator,
			&mut matches,
			state.sort_field,
			state.sort_direction,
		);

		let pagination = Pagination::new(matches.len(), state.page_size, state.current_page);
		debug!(
			"Query matched {} of {} tracks, showing page {} of {}",
			pagination.total_count,
			records.len(),
			state.current_page,
			pagination.total_pages
		);

		let page = matches[pagination.range()].to_vec();
		QueryResult {
			page,
			total_count: pagination.total_count,
			total_pages: pagination.total_pages,
			page_start_index: pagination.start_index,
			page_end_index: pagination.end_index,
		}
	}
}
