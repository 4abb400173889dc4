use crate::domain;
use crate::domain::todo::{TodoContent, TodoItem};
use crate::external_connections::{ConnectionHandle, ExternalConnectivity};
use anyhow::{Context, Error};
use sqlx::{query, query_as};

pub struct DbTodoReader;

#[derive(sqlx::FromRow)]
struct TodoItemRow {
    id: i32,
    title: String,
    description: Option<String>,
    completed: bool,
}

impl From<TodoItemRow> for TodoItem {
    fn from(value: TodoItemRow) -> Self {
        TodoItem {
            id: value.id,
            title: value.title,
            description: value.description,
            completed: value.completed,
        }
    }
}

impl domain::todo::driven_ports::TodoReader for DbTodoReader {
    async fn all(
        &self,
        skip: i64,
        limit: i64,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Vec<TodoItem>, Error> {
        let mut cxn = ext_cxn.database_cxn().await.map_err(super::anyhowify)?;

        // No ORDER BY on purpose, clients get storage-natural order
        let todos: Vec<TodoItem> = query_as::<_, TodoItemRow>(
            "SELECT ti.id, ti.title, ti.description, ti.completed FROM todo_item ti \
             OFFSET $1 LIMIT $2",
        )
        .bind(skip)
        .bind(limit)
        .fetch_all(cxn.borrow_connection())
        .await
        .context("trying to fetch a page of todos")?
        .into_iter()
        .map(TodoItem::from)
        .collect();

        Ok(todos)
    }

    async fn by_id(
        &self,
        todo_id: i32,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Option<TodoItem>, Error> {
        let mut cxn = ext_cxn.database_cxn().await.map_err(super::anyhowify)?;

        let todo = query_as::<_, TodoItemRow>(
            "SELECT ti.id, ti.title, ti.description, ti.completed FROM todo_item ti \
             WHERE ti.id = $1",
        )
        .bind(todo_id)
        .fetch_optional(cxn.borrow_connection())
        .await
        .context("trying to fetch a todo by ID")?;

        Ok(todo.map(TodoItem::from))
    }
}

pub struct DbTodoWriter;

impl domain::todo::driven_ports::TodoWriter for DbTodoWriter {
    async fn insert(
        &self,
        content: &TodoContent,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<i32, Error> {
        let mut cxn = ext_cxn.database_cxn().await.map_err(super::anyhowify)?;

        let new_id = query_as::<_, super::NewId>(
            "INSERT INTO todo_item(title, description, completed) VALUES ($1, $2, $3) \
             RETURNING todo_item.id",
        )
        .bind(&content.title)
        .bind(&content.description)
        .bind(content.completed)
        .fetch_one(cxn.borrow_connection())
        .await
        .context("trying to insert a new todo into the database")?;

        Ok(new_id.id)
    }

    async fn replace(
        &self,
        todo_id: i32,
        content: &TodoContent,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<(), Error> {
        let mut cxn = ext_cxn.database_cxn().await.map_err(super::anyhowify)?;

        query("UPDATE todo_item SET title = $1, description = $2, completed = $3 WHERE id = $4")
            .bind(&content.title)
            .bind(&content.description)
            .bind(content.completed)
            .bind(todo_id)
            .execute(cxn.borrow_connection())
            .await
            .context("trying to replace a todo in the database")?;

        Ok(())
    }

    async fn delete(
        &self,
        todo_id: i32,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<(), Error> {
        let mut cxn = ext_cxn.database_cxn().await.map_err(super::anyhowify)?;

        query("DELETE FROM todo_item WHERE id = $1")
            .bind(todo_id)
            .execute(cxn.borrow_connection())
            .await
            .context("trying to remove a todo from the database")?;

        Ok(())
    }
}
