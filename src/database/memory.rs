use async_trait::async_trait;
use tokio::sync::RwLock;

use super::store::{Entity, Store, StoreError};

struct Table<T> {
    rows: Vec<T>,
    next_id: i32,
}

/// Process-local store used for development and tests.
///
/// Rows stay ordered by id because ids are only ever appended. Each mutation
/// holds the write lock for its whole duration.
pub struct MemoryStore<T: Entity> {
    table: RwLock<Table<T>>,
}

impl<T: Entity> MemoryStore<T> {
    pub fn new() -> Self {
        Self::seeded(Vec::new())
    }

    pub fn seeded(drafts: impl IntoIterator<Item = T::Draft>) -> Self {
        let rows: Vec<T> = drafts
            .into_iter()
            .zip(1..)
            .map(|(draft, id)| T::from_draft(id, draft))
            .collect();
        let next_id = rows.len() as i32 + 1;

        Self {
            table: RwLock::new(Table { rows, next_id }),
        }
    }
}

impl<T: Entity> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> Store<T> for MemoryStore<T> {
    async fn all(&self) -> Result<Vec<T>, StoreError> {
        Ok(self.table.read().await.rows.clone())
    }

    async fn find_one(&self, id: i32) -> Result<Option<T>, StoreError> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|row| row.id() == id).cloned())
    }

    async fn insert(&self, draft: T::Draft) -> Result<T, StoreError> {
        let mut table = self.table.write().await;
        let entity = T::from_draft(table.next_id, draft);

        if table.rows.iter().any(|row| row.conflicts_with(&entity)) {
            return Err(StoreError::Conflict(format!("{} already exists", T::KIND)));
        }

        table.next_id += 1;
        table.rows.push(entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: T) -> Result<T, StoreError> {
        let mut table = self.table.write().await;

        if table
            .rows
            .iter()
            .any(|row| row.id() != entity.id() && row.conflicts_with(&entity))
        {
            return Err(StoreError::Conflict(format!("{} already exists", T::KIND)));
        }

        let slot = table
            .rows
            .iter_mut()
            .find(|row| row.id() == entity.id())
            .ok_or_else(|| T::not_found(entity.id()))?;
        *slot = entity.clone();
        Ok(entity)
    }

    async fn delete(&self, id: i32) -> Result<(), StoreError> {
        let mut table = self.table.write().await;
        let position = table
            .rows
            .iter()
            .position(|row| row.id() == id)
            .ok_or_else(|| T::not_found(id))?;
        table.rows.remove(position);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{Drink, DrinkDraft, Ingredient, Question, QuestionDraft};

    fn draft(text: &str) -> QuestionDraft {
        QuestionDraft {
            question: text.to_string(),
            answer: "42".to_string(),
            category: 1,
            difficulty: 2,
        }
    }

    #[tokio::test]
    async fn assigns_increasing_ids() {
        let store = MemoryStore::<Question>::seeded(vec![draft("a"), draft("b")]);
        let created = store.insert(draft("c")).await.unwrap();
        assert_eq!(created.id, 3);

        let ids: Vec<i32> = store.all().await.unwrap().iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = MemoryStore::<Question>::seeded(vec![draft("a"), draft("b")]);
        store.delete(2).await.unwrap();
        let created = store.insert(draft("c")).await.unwrap();
        assert_eq!(created.id, 3);
    }

    #[tokio::test]
    async fn delete_and_update_missing_rows() {
        let store = MemoryStore::<Question>::new();
        assert!(matches!(store.delete(5).await, Err(StoreError::NotFound(_))));

        let ghost = Question::from_draft(5, draft("ghost"));
        assert!(matches!(store.update(ghost).await, Err(StoreError::NotFound(_))));
        assert!(matches!(store.get_404(5).await, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn duplicate_titles_conflict_without_partial_writes() {
        let water = |title: &str| DrinkDraft {
            title: title.to_string(),
            recipe: vec![Ingredient {
                name: "water".to_string(),
                color: "blue".to_string(),
                parts: 1,
            }],
        };
        let store = MemoryStore::<Drink>::seeded(vec![water("water"), water("latte")]);

        assert!(matches!(store.insert(water("water")).await, Err(StoreError::Conflict(_))));
        assert_eq!(store.count().await.unwrap(), 2);

        let mut latte = store.get_404(2).await.unwrap();
        latte.title = "water".to_string();
        assert!(matches!(store.update(latte).await, Err(StoreError::Conflict(_))));
        assert_eq!(store.get_404(2).await.unwrap().title, "latte");

        let mut latte = store.get_404(2).await.unwrap();
        latte.title = "flat white".to_string();
        assert_eq!(store.update(latte).await.unwrap().title, "flat white");
    }
}
