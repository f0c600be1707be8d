pub mod categories;
pub mod questions;
pub mod quizzes;

use std::collections::BTreeMap;

use crate::database::models::Category;

/// `{"1": "Science", ...}` as the frontend expects it
pub(crate) fn category_map(categories: &[Category]) -> BTreeMap<i32, String> {
    categories.iter().map(|c| (c.id, c.kind.clone())).collect()
}
