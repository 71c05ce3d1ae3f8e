use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::{
    id::{IdProvider, SerialIds},
    repository::TodoRepository,
    todo::{CreateTodo, Todo, TodoId},
};

/// Process-local store: an ordered sequence guarded by a mutex. Nothing
/// survives a restart. The lock is never held across an await point.
#[derive(Clone)]
pub struct MemoryTodoRepository {
    items: Arc<Mutex<Vec<Todo>>>,
    ids: Arc<dyn IdProvider>,
}

impl MemoryTodoRepository {
    pub fn new() -> Self {
        Self::with_ids(Arc::new(SerialIds::default()))
    }

    pub fn with_ids(ids: Arc<dyn IdProvider>) -> Self {
        Self { items: Arc::new(Mutex::new(Vec::new())), ids }
    }
}

impl Default for MemoryTodoRepository {
    fn default() -> Self { Self::new() }
}

#[async_trait]
impl TodoRepository for MemoryTodoRepository {
    async fn init(&self) -> Result<()> { Ok(()) }

    async fn create(&self, input: CreateTodo) -> Result<Todo> {
        let todo = Todo { id: self.ids.next_id(), content: input.content };
        self.items.lock().unwrap().push(todo.clone());
        Ok(todo)
    }

    async fn list(&self) -> Result<Vec<Todo>> {
        Ok(self.items.lock().unwrap().clone())
    }

    async fn delete(&self, id: TodoId) -> Result<bool> {
        let mut items = self.items.lock().unwrap();
        match items.iter().position(|t| t.id == id) {
            Some(idx) => {
                items.remove(idx);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
