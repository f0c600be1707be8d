use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::database::store::Entity;
use crate::query::Identified;

/// Categories every fresh trivia database starts with, in id order
pub const DEFAULT_CATEGORIES: [&str; 6] = ["Science", "Art", "Geography", "History", "Entertainment", "Sports"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i32,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDraft {
    pub kind: String,
}

impl CategoryDraft {
    pub fn defaults() -> Vec<CategoryDraft> {
        DEFAULT_CATEGORIES
            .iter()
            .map(|kind| CategoryDraft { kind: kind.to_string() })
            .collect()
    }
}

impl Entity for Category {
    type Draft = CategoryDraft;

    const KIND: &'static str = "category";

    fn from_draft(id: i32, draft: CategoryDraft) -> Self {
        Self { id, kind: draft.kind }
    }
}

impl Identified for Category {
    fn id(&self) -> i32 {
        self.id
    }
}
