use std::num::NonZeroUsize;

/// Number of page buttons offered around the current page.
pub const PAGE_WINDOW_WIDTH: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
	pub total_count: usize,
	pub total_pages: usize,
	pub start_index: usize,
	pub end_index: usize,
}

impl Pagination {
	/// `current_page` is 1-based and is not clamped: past the last page the
	/// range is empty.
	pub fn new(total_count: usize, page_size: NonZeroUsize, current_page: usize) -> Self {
		let page_size = page_size.get();
		let total_pages = total_count.div_ceil(page_size).max(1);
		let start_index = current_page.saturating_sub(1).saturating_mul(page_size);
		let end_index = start_index.saturating_add(page_size).min(total_count);
		Self {
			total_count,
			total_pages,
			start_index,
			end_index,
		}
	}

	pub fn range(&self) -> std::ops::Range<usize> {
		let start = self.start_index.min(self.total_count);
		start..self.end_index.max(start)
	}
}

/// Page numbers to offer as buttons, centered on the current page when possible.
/// A current page outside `1..=total_pages` is treated as the nearest valid one.
pub fn page_window(current_page: usize, total_pages: usize) -> Vec<usize> {
	let total_pages = total_pages.max(1);
	let current_page = current_page.clamp(1, total_pages);
	let width = PAGE_WINDOW_WIDTH.min(total_pages);
	let first = if total_pages <= PAGE_WINDOW_WIDTH || current_page <= 3 {
		1
	} else if current_page.saturating_add(2) >= total_pages {
		total_pages + 1 - PAGE_WINDOW_WIDTH
	} else {
		current_page - 2
	};
	(first..first + width).collect()
}

/// Whether a jump to the last page is offered after the window.
pub fn shows_last_page_shortcut(current_page: usize, total_pages: usize) -> bool {
	total_pages > PAGE_WINDOW_WIDTH && current_page.max(1).saturating_add(2) < total_pages
}

#[cfg(test)]
mod test {
	use super::*;

	fn size(n: usize) -> NonZeroUsize {
		NonZeroUsize::new(n).unwrap()
	}

	#[test]
	fn empty_results_have_one_page() {
		let pagination = Pagination::new(0, size(20), 1);
		assert_eq!(pagination.total_pages, 1);
		assert_eq!(pagination.start_index, 0);
		assert_eq!(pagination.end_index, 0);
		assert!(pagination.range().is_empty());
	}

	#[test]
	fn last_page_is_partial() {
		let pagination = Pagination::new(45, size(20), 3);
		assert_eq!(pagination.total_pages, 3);
		assert_eq!(pagination.start_index, 40);
		assert_eq!(pagination.end_index, 45);
		assert_eq!(pagination.range(), 40..45);
	}

	#[test]
	fn exact_multiple_has_no_trailing_page() {
		assert_eq!(Pagination::new(40, size(20), 1).total_pages, 2);
	}

	#[test]
	fn page_past_the_end_is_empty_but_not_corrected() {
		let pagination = Pagination::new(5, size(20), 4);
		assert_eq!(pagination.start_index, 60);
		assert_eq!(pagination.end_index, 5);
		assert!(pagination.range().is_empty());
	}

	#[test]
	fn pages_cover_every_index_once() {
		for page_size in 1..=7 {
			let total = 23;
			let pages = Pagination::new(total, size(page_size), 1).total_pages;
			let covered = (1..=pages)
				.flat_map(|page| Pagination::new(total, size(page_size), page).range())
				.collect::<Vec<_>>();
			assert_eq!(covered, (0..total).collect::<Vec<_>>());
		}
	}

	#[test]
	fn window_shows_all_pages_when_few() {
		assert_eq!(page_window(2, 3), vec![1, 2, 3]);
		assert_eq!(page_window(1, 1), vec![1]);
		assert!(!shows_last_page_shortcut(2, 3));
	}

	#[test]
	fn window_follows_current_page() {
		assert_eq!(page_window(2, 10), vec![1, 2, 3, 4, 5]);
		assert_eq!(page_window(6, 10), vec![4, 5, 6, 7, 8]);
		assert_eq!(page_window(9, 10), vec![6, 7, 8, 9, 10]);
		assert_eq!(page_window(8, 10), vec![6, 7, 8, 9, 10]);
	}

	#[test]
	fn last_page_shortcut_hides_near_the_end() {
		assert!(shows_last_page_shortcut(1, 10));
		assert!(shows_last_page_shortcut(7, 10));
		assert!(!shows_last_page_shortcut(8, 10));
	}

	#[test]
	fn window_tolerates_pages_out_of_range() {
		assert_eq!(page_window(usize::MAX, 10), vec![6, 7, 8, 9, 10]);
		assert_eq!(page_window(0, 10), vec![1, 2, 3, 4, 5]);
		assert_eq!(page_window(4, 0), vec![1]);
		assert!(!shows_last_page_shortcut(usize::MAX, 10));
		assert!(shows_last_page_shortcut(0, 10));
	}
}
