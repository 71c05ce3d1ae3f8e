use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use sqlx::{sqlite::{SqlitePoolOptions, SqliteRow}, Pool, Row, Sqlite};

use crate::domain::{
    id::{IdProvider, TokenIds},
    repository::TodoRepository,
    todo::{CreateTodo, Todo, TodoId},
};

/// Durable store: one table of rows keyed by a string primary identifier.
#[derive(Clone)]
pub struct SqliteTodoRepository {
    pool: Arc<Pool<Sqlite>>,
    ids: Arc<dyn IdProvider>,
}

impl SqliteTodoRepository {
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        Ok(Self { pool: Arc::new(pool), ids: Arc::new(TokenIds) })
    }

    pub fn with_ids(mut self, ids: Arc<dyn IdProvider>) -> Self {
        self.ids = ids;
        self
    }
}

#[async_trait]
impl TodoRepository for SqliteTodoRepository {
    async fn init(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS todos (
                id TEXT PRIMARY KEY,
                content TEXT NOT NULL
            )",
        )
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    async fn create(&self, input: CreateTodo) -> Result<Todo> {
        let id = self.ids.next_id();
        // The insert is awaited so durability is confirmed before the item
        // is handed back.
        sqlx::query("INSERT INTO todos (id, content) VALUES (?1, ?2)")
            .bind(id.to_string())
            .bind(&input.content)
            .execute(&*self.pool)
            .await?;
        Ok(Todo { id, content: input.content })
    }

    async fn list(&self) -> Result<Vec<Todo>> {
        // Natural storage order; no sort applied.
        let rows = sqlx::query("SELECT id, content FROM todos")
            .fetch_all(&*self.pool)
            .await?;
        rows.into_iter().map(row_to_todo).collect()
    }

    async fn delete(&self, id: TodoId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ?1")
            .bind(id.to_string())
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn row_to_todo(row: SqliteRow) -> Result<Todo> {
    let id: String = row.get("id");
    let content: String = row.get("content");
    let id = TodoId::parse(&id).ok_or_else(|| anyhow::anyhow!("malformed id in store: {id}"))?;
    Ok(Todo { id, content })
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn repo() -> SqliteTodoRepository {
        let repo = SqliteTodoRepository::connect("sqlite::memory:").await.unwrap();
        repo.init().await.unwrap();
        repo
    }

    #[tokio::test]
    async fn create_assigns_token_ids_and_round_trips_content() {
        let repo = repo().await;
        let created = repo.create(CreateTodo { content: "buy milk".into() }).await.unwrap();
        assert!(matches!(created.id, TodoId::Token(_)));
        let listed = repo.list().await.unwrap();
        assert_eq!(listed, vec![created]);
    }

    #[tokio::test]
    async fn serial_ids_can_back_the_durable_store() {
        use crate::domain::id::SerialIds;
        let repo = repo().await.with_ids(Arc::new(SerialIds::default()));
        let created = repo.create(CreateTodo { content: "x".into() }).await.unwrap();
        assert_eq!(created.id, TodoId::Serial(1));
        // round-trips through the text key column
        assert_eq!(repo.list().await.unwrap(), vec![created]);
    }

    #[tokio::test]
    async fn delete_reports_deleted_count() {
        let repo = repo().await;
        let created = repo.create(CreateTodo { content: "x".into() }).await.unwrap();
        assert!(repo.delete(created.id).await.unwrap());
        assert!(!repo.delete(created.id).await.unwrap());
        assert!(repo.list().await.unwrap().is_empty());
    }
}
