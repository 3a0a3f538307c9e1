//! Pure filtering and pagination for the list pages.
//!
//! The backend returns full collections; narrowing happens here, after the
//! fetch, exactly as the pages display it: every displayed field is joined
//! into one lowercase haystack and matched by substring.

use crate::models::{Category, Site, UserRow};

/// Rows per page on the paginated lists.
pub const PAGE_SIZE: usize = 10;

/// A row that can be matched against a free-text filter.
pub trait Searchable {
    /// All displayed fields of the row, joined for substring matching.
    fn search_text(&self) -> String;
}

/// Keep the rows whose displayed fields contain the query,
/// case-insensitively. An empty or whitespace query keeps everything.
pub fn filter_rows<T: Searchable>(rows: Vec<T>, query: &str) -> Vec<T> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return rows;
    }
    rows.into_iter()
        .filter(|row| row.search_text().to_lowercase().contains(&needle))
        .collect()
}

/// One page of a filtered collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// The rows on this page.
    pub items: Vec<T>,
    /// Current page, 1-based, clamped to the available range.
    pub number: usize,
    /// Total number of pages (at least 1).
    pub total_pages: usize,
    /// Total number of rows across all pages.
    pub total_items: usize,
}

impl<T> Page<T> {
    /// Whether a previous page exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.number > 1
    }

    /// Whether a next page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.number < self.total_pages
    }
}

/// Slice the rows into the requested page of [`PAGE_SIZE`].
///
/// A page number past the end is clamped to the last page, so shrinking the
/// filter never strands the viewer on an empty page.
pub fn paginate<T>(rows: Vec<T>, page: usize) -> Page<T> {
    let total_items = rows.len();
    let total_pages = total_items.div_ceil(PAGE_SIZE).max(1);
    let number = page.clamp(1, total_pages);

    let start = (number - 1) * PAGE_SIZE;
    let items = rows
        .into_iter()
        .skip(start)
        .take(PAGE_SIZE)
        .collect();

    Page {
        items,
        number,
        total_pages,
        total_items,
    }
}

fn yes_no(value: bool) -> &'static str {
    if value { "sí" } else { "no" }
}

impl Searchable for Category {
    fn search_text(&self) -> String {
        format!(
            "{} {} {} {} {}",
            self.id,
            self.name,
            self.image_url.as_deref().unwrap_or(""),
            self.color.as_deref().unwrap_or(""),
            yes_no(self.bookable),
        )
    }
}

impl Searchable for Site {
    fn search_text(&self) -> String {
        format!(
            "{} {} {} {} {} {} {} {} {} {} {} {} {} {}",
            self.id,
            self.name,
            self.image_url.as_deref().unwrap_or(""),
            self.phone.as_deref().unwrap_or(""),
            self.state,
            self.city,
            self.postal_code,
            self.neighborhood,
            self.street,
            self.latitude,
            self.longitude,
            self.platform_percentage,
            self.transport_percentage,
            self.venue_percentage,
        )
    }
}

impl Searchable for UserRow {
    fn search_text(&self) -> String {
        format!(
            "{} {} {} {} {} {}",
            self.id,
            self.email,
            self.first_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or(""),
            self.phone.as_deref().unwrap_or(""),
            yes_no(self.validated),
        )
    }
}

#[cfg(test)]
mod tests {
    use barrio_core::CategoryId;

    use super::*;

    fn category(id: i64, name: &str, color: Option<&str>) -> Category {
        Category {
            id: CategoryId::new(id),
            name: name.to_string(),
            image_url: None,
            color: color.map(String::from),
            bookable: false,
        }
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let rows = vec![
            category(1, "Comida", None),
            category(2, "Servicios", None),
        ];
        let filtered = filter_rows(rows, "COMIDA");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Comida");
    }

    #[test]
    fn test_filter_matches_any_displayed_field() {
        let rows = vec![
            category(1, "Comida", Some("#FF9900")),
            category(2, "Servicios", None),
        ];
        let filtered = filter_rows(rows, "#ff99");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id.as_i64(), 1);
    }

    #[test]
    fn test_empty_query_keeps_everything() {
        let rows = vec![category(1, "Comida", None), category(2, "Servicios", None)];
        assert_eq!(filter_rows(rows, "   ").len(), 2);
    }

    #[test]
    fn test_paginate_slices_ten_per_page() {
        let rows: Vec<i32> = (0..25).collect();
        let page = paginate(rows, 2);
        assert_eq!(page.items, (10..20).collect::<Vec<_>>());
        assert_eq!(page.number, 2);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_items, 25);
        assert!(page.has_previous());
        assert!(page.has_next());
    }

    #[test]
    fn test_paginate_clamps_out_of_range_page() {
        let rows: Vec<i32> = (0..25).collect();
        let page = paginate(rows, 99);
        assert_eq!(page.number, 3);
        assert_eq!(page.items, (20..25).collect::<Vec<_>>());

        let page = paginate((0..5).collect::<Vec<i32>>(), 0);
        assert_eq!(page.number, 1);
    }

    #[test]
    fn test_paginate_empty_collection() {
        let page = paginate(Vec::<i32>::new(), 1);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
        assert!(!page.has_previous());
        assert!(!page.has_next());
    }
}
