//! Pagination, search, category filtering and quiz selection over a
//! collection already fetched from storage. Nothing here performs I/O.

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("page {page} is out of range (last page is {last_page})")]
    PageOutOfRange { page: usize, last_page: usize },
}

pub trait Identified {
    fn id(&self) -> i32;
}

pub trait Searchable {
    fn searchable_text(&self) -> &str;
}

pub trait Categorized {
    fn category_id(&self) -> i32;
}

/// Number of pages needed to show `count` items, `page_size` per page
pub fn page_count(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(page_size)
}

/// Items `[(page-1)*page_size, page*page_size)`. Pages are 1-based and an
/// empty collection has no valid page.
pub fn paginate<T>(all: &[T], page: usize, page_size: usize) -> Result<&[T], QueryError> {
    let last_page = page_count(all.len(), page_size);
    if page == 0 || page > last_page {
        return Err(QueryError::PageOutOfRange { page, last_page });
    }
    Ok(page_window(all, page, page_size))
}

/// Lenient slice for result sets where an overshooting page is just empty
pub fn page_window<T>(all: &[T], page: usize, page_size: usize) -> &[T] {
    let start = page.saturating_sub(1).saturating_mul(page_size).min(all.len());
    let end = start.saturating_add(page_size).min(all.len());
    &all[start..end]
}

/// Case-insensitive substring match; an empty term matches everything
pub fn search_by_text<'a, T: Searchable>(all: &'a [T], term: &str) -> Vec<&'a T> {
    let needle = term.to_lowercase();
    all.iter()
        .filter(|item| item.searchable_text().to_lowercase().contains(&needle))
        .collect()
}

pub fn filter_by_category<T: Categorized>(all: &[T], category_id: i32) -> Vec<&T> {
    all.iter().filter(|item| item.category_id() == category_id).collect()
}

/// Category `0` means any category.
pub const ANY_CATEGORY: i32 = 0;

/// Pick one not-yet-asked item uniformly at random. `None` once the pool is exhausted.
pub fn pick_quiz_question<'a, T, R>(all: &'a [T], category_id: i32, exclude: &[i32], rng: &mut R) -> Option<&'a T>
where
    T: Identified + Categorized,
    R: Rng + ?Sized,
{
    let candidates: Vec<&T> = all
        .iter()
        .filter(|item| category_id == ANY_CATEGORY || item.category_id() == category_id)
        .filter(|item| !exclude.contains(&item.id()))
        .collect();

    candidates.choose(rng).copied()
}
