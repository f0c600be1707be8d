use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};

use super::models::{Category, CategoryDraft, Drink, DrinkDraft, Ingredient, Question, QuestionDraft};
use super::store::{Entity, Store, StoreError};

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::Conflict(db.message().to_string()),
            sqlx::Error::RowNotFound => StoreError::NotFound("record not found".to_string()),
            _ => StoreError::Backend(err.to_string()),
        }
    }
}

async fn ping(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

async fn delete_by_id<T: Entity>(pool: &PgPool, table: &str, id: i32) -> Result<(), StoreError> {
    let sql = format!("DELETE FROM {} WHERE id = $1", table);
    let result = sqlx::query(&sql).bind(id).execute(pool).await?;
    if result.rows_affected() == 0 {
        return Err(T::not_found(id));
    }
    Ok(())
}

pub struct PgQuestionStore {
    pool: PgPool,
}

impl PgQuestionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store<Question> for PgQuestionStore {
    async fn all(&self) -> Result<Vec<Question>, StoreError> {
        let rows = sqlx::query_as::<_, Question>(
            "SELECT id, question, answer, category, difficulty FROM questions ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_one(&self, id: i32) -> Result<Option<Question>, StoreError> {
        let row = sqlx::query_as::<_, Question>(
            "SELECT id, question, answer, category, difficulty FROM questions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn insert(&self, draft: QuestionDraft) -> Result<Question, StoreError> {
        let row = sqlx::query_as::<_, Question>(
            "INSERT INTO questions (question, answer, category, difficulty)
             VALUES ($1, $2, $3, $4)
             RETURNING id, question, answer, category, difficulty",
        )
        .bind(&draft.question)
        .bind(&draft.answer)
        .bind(draft.category)
        .bind(draft.difficulty)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, entity: Question) -> Result<Question, StoreError> {
        sqlx::query_as::<_, Question>(
            "UPDATE questions SET question = $2, answer = $3, category = $4, difficulty = $5
             WHERE id = $1
             RETURNING id, question, answer, category, difficulty",
        )
        .bind(entity.id)
        .bind(&entity.question)
        .bind(&entity.answer)
        .bind(entity.category)
        .bind(entity.difficulty)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Question::not_found(entity.id))
    }

    async fn delete(&self, id: i32) -> Result<(), StoreError> {
        delete_by_id::<Question>(&self.pool, "questions", id).await
    }

    async fn count(&self) -> Result<usize, StoreError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM questions")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.max(0) as usize)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        ping(&self.pool).await
    }
}

pub struct PgCategoryStore {
    pool: PgPool,
}

impl PgCategoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store<Category> for PgCategoryStore {
    async fn all(&self) -> Result<Vec<Category>, StoreError> {
        let rows = sqlx::query_as::<_, Category>("SELECT id, type FROM categories ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_one(&self, id: i32) -> Result<Option<Category>, StoreError> {
        let row = sqlx::query_as::<_, Category>("SELECT id, type FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert(&self, draft: CategoryDraft) -> Result<Category, StoreError> {
        let row = sqlx::query_as::<_, Category>("INSERT INTO categories (type) VALUES ($1) RETURNING id, type")
            .bind(&draft.kind)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(&self, entity: Category) -> Result<Category, StoreError> {
        sqlx::query_as::<_, Category>("UPDATE categories SET type = $2 WHERE id = $1 RETURNING id, type")
            .bind(entity.id)
            .bind(&entity.kind)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Category::not_found(entity.id))
    }

    async fn delete(&self, id: i32) -> Result<(), StoreError> {
        delete_by_id::<Category>(&self.pool, "categories", id).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        ping(&self.pool).await
    }
}

#[derive(FromRow)]
struct DrinkRow {
    id: i32,
    title: String,
    recipe: Json<Vec<Ingredient>>,
}

impl From<DrinkRow> for Drink {
    fn from(row: DrinkRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            recipe: row.recipe.0,
        }
    }
}

pub struct PgDrinkStore {
    pool: PgPool,
}

impl PgDrinkStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store<Drink> for PgDrinkStore {
    async fn all(&self) -> Result<Vec<Drink>, StoreError> {
        let rows = sqlx::query_as::<_, DrinkRow>("SELECT id, title, recipe FROM drinks ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Drink::from).collect())
    }

    async fn find_one(&self, id: i32) -> Result<Option<Drink>, StoreError> {
        let row = sqlx::query_as::<_, DrinkRow>("SELECT id, title, recipe FROM drinks WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Drink::from))
    }

    async fn insert(&self, draft: DrinkDraft) -> Result<Drink, StoreError> {
        let row = sqlx::query_as::<_, DrinkRow>(
            "INSERT INTO drinks (title, recipe) VALUES ($1, $2) RETURNING id, title, recipe",
        )
        .bind(&draft.title)
        .bind(Json(&draft.recipe))
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn update(&self, entity: Drink) -> Result<Drink, StoreError> {
        sqlx::query_as::<_, DrinkRow>(
            "UPDATE drinks SET title = $2, recipe = $3 WHERE id = $1 RETURNING id, title, recipe",
        )
        .bind(entity.id)
        .bind(&entity.title)
        .bind(Json(&entity.recipe))
        .fetch_optional(&self.pool)
        .await?
        .map(Drink::from)
        .ok_or_else(|| Drink::not_found(entity.id))
    }

    async fn delete(&self, id: i32) -> Result<(), StoreError> {
        delete_by_id::<Drink>(&self.pool, "drinks", id).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        ping(&self.pool).await
    }
}
