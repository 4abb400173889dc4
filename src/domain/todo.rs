use crate::domain::todo::driven_ports::{TodoReader, TodoWriter};
use crate::domain::todo::driving_ports::TodoError;
use crate::external_connections::ExternalConnectivity;
use anyhow::Context;

/// A single persisted todo item
#[derive(PartialEq, Eq, Debug)]
#[cfg_attr(test, derive(Clone))]
pub struct TodoItem {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
}

/// The full user-writable representation of a todo item. Used both when creating
/// an item and when replacing an existing one, as updates overwrite every mutable field.
#[cfg_attr(test, derive(Clone, Debug, PartialEq, Eq))]
pub struct TodoContent {
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
}

impl TodoItem {
    fn from_content(id: i32, content: &TodoContent) -> TodoItem {
        TodoItem {
            id,
            title: content.title.clone(),
            description: content.description.clone(),
            completed: content.completed,
        }
    }
}

pub mod driven_ports {
    use super::*;
    use crate::external_connections::ExternalConnectivity;

    pub trait TodoReader {
        /// Fetch todos in storage order, skipping the first [skip] and returning at most [limit]
        async fn all(
            &self,
            skip: i64,
            limit: i64,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Vec<TodoItem>, anyhow::Error>;

        async fn by_id(
            &self,
            todo_id: i32,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Option<TodoItem>, anyhow::Error>;
    }

    pub trait TodoWriter {
        /// Insert a new todo, returning its generated ID
        async fn insert(
            &self,
            content: &TodoContent,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<i32, anyhow::Error>;

        /// Overwrite every mutable field of an existing todo
        async fn replace(
            &self,
            todo_id: i32,
            content: &TodoContent,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<(), anyhow::Error>;

        async fn delete(
            &self,
            todo_id: i32,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<(), anyhow::Error>;
    }
}

pub mod driving_ports {
    use super::*;
    use crate::external_connections::ExternalConnectivity;
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum TodoError {
        #[error("the requested todo does not exist")]
        NotFound,
        #[error(transparent)]
        PortError(#[from] anyhow::Error),
    }


    pub trait TodoPort {
        async fn list_todos(
            &self,
            skip: i64,
            limit: i64,
            ext_cxn: &mut impl ExternalConnectivity,
            todo_read: &impl driven_ports::TodoReader,
        ) -> Result<Vec<TodoItem>, anyhow::Error>;

        async fn todo_by_id(
            &self,
            todo_id: i32,
            ext_cxn: &mut impl ExternalConnectivity,
            todo_read: &impl driven_ports::TodoReader,
        ) -> Result<TodoItem, TodoError>;

        async fn create_todo(
            &self,
            content: &TodoContent,
            ext_cxn: &mut impl ExternalConnectivity,
            todo_write: &impl driven_ports::TodoWriter,
        ) -> Result<TodoItem, anyhow::Error>;

        async fn replace_todo(
            &self,
            todo_id: i32,
            content: &TodoContent,
            ext_cxn: &mut impl ExternalConnectivity,
            todo_read: &impl driven_ports::TodoReader,
            todo_write: &impl driven_ports::TodoWriter,
        ) -> Result<TodoItem, TodoError>;

        async fn delete_todo(
            &self,
            todo_id: i32,
            ext_cxn: &mut impl ExternalConnectivity,
            todo_read: &impl driven_ports::TodoReader,
            todo_write: &impl driven_ports::TodoWriter,
        ) -> Result<TodoItem, TodoError>;
    }
}

pub struct TodoService {}

impl driving_ports::TodoPort for TodoService {
    async fn list_todos(
        &self,
        skip: i64,
        limit: i64,
        ext_cxn: &mut impl ExternalConnectivity,
        todo_read: &impl TodoReader,
    ) -> Result<Vec<TodoItem>, anyhow::Error> {
        let todos = todo_read
            .all(skip, limit, &mut *ext_cxn)
            .await
            .context("listing todos")?;

        Ok(todos)
    }

    async fn todo_by_id(
        &self,
        todo_id: i32,
        ext_cxn: &mut impl ExternalConnectivity,
        todo_read: &impl TodoReader,
    ) -> Result<TodoItem, TodoError> {
        let todo = todo_read.by_id(todo_id, &mut *ext_cxn).await?;

        todo.ok_or(TodoError::NotFound)
    }

    async fn create_todo(
        &self,
        content: &TodoContent,
        ext_cxn: &mut impl ExternalConnectivity,
        todo_write: &impl TodoWriter,
    ) -> Result<TodoItem, anyhow::Error> {
        let new_id = todo_write
            .insert(content, &mut *ext_cxn)
            .await
            .context("creating a todo")?;

        Ok(TodoItem::from_content(new_id, content))
    }

    async fn replace_todo(
        &self,
        todo_id: i32,
        content: &TodoContent,
        ext_cxn: &mut impl ExternalConnectivity,
        todo_read: &impl TodoReader,
        todo_write: &impl TodoWriter,
    ) -> Result<TodoItem, TodoError> {
        // A replace never creates a record, so the todo has to exist up front
        let existing = todo_read.by_id(todo_id, &mut *ext_cxn).await?;
        if existing.is_none() {
            return Err(TodoError::NotFound);
        }

        todo_write
            .replace(todo_id, content, &mut *ext_cxn)
            .await
            .context("replacing a todo")?;

        Ok(TodoItem::from_content(todo_id, content))
    }

    async fn delete_todo(
        &self,
        todo_id: i32,
        ext_cxn: &mut impl ExternalConnectivity,
        todo_read: &impl TodoReader,
        todo_write: &impl TodoWriter,
    ) -> Result<TodoItem, TodoError> {
        let existing = todo_read
            .by_id(todo_id, &mut *ext_cxn)
            .await?
            .ok_or(TodoError::NotFound)?;

        todo_write
            .delete(todo_id, &mut *ext_cxn)
            .await
            .context("deleting a todo")?;

        // Clients receive the representation the todo had just before deletion
        Ok(existing)
    }
}
