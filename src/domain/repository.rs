use async_trait::async_trait;
use super::todo::{CreateTodo, Todo, TodoId};

#[async_trait]
pub trait TodoRepository: Send + Sync + 'static {
    async fn init(&self) -> anyhow::Result<()>;
    async fn create(&self, input: CreateTodo) -> anyhow::Result<Todo>;
    async fn list(&self) -> anyhow::Result<Vec<Todo>>;
    /// Returns whether an item with `id` existed and was removed.
    async fn delete(&self, id: TodoId) -> anyhow::Result<bool>;
}
