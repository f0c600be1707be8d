use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::database::store::Entity;
use crate::query::{Categorized, Identified, Searchable};

/// A trivia question as stored and as sent over the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: i32,
    pub question: String,
    pub answer: String,
    pub category: i32,
    pub difficulty: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub question: String,
    pub answer: String,
    pub category: i32,
    pub difficulty: i32,
}

impl Entity for Question {
    type Draft = QuestionDraft;

    const KIND: &'static str = "question";

    fn from_draft(id: i32, draft: QuestionDraft) -> Self {
        Self {
            id,
            question: draft.question,
            answer: draft.answer,
            category: draft.category,
            difficulty: draft.difficulty,
        }
    }
}

impl Identified for Question {
    fn id(&self) -> i32 {
        self.id
    }
}

impl Searchable for Question {
    fn searchable_text(&self) -> &str {
        &self.question
    }
}

impl Categorized for Question {
    fn category_id(&self) -> i32 {
        self.category
    }
}
