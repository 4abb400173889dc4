use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::ErrorResponse;
use axum::routing::{delete, get, post, put};
use std::sync::Arc;
use tracing::{error, info};
use utoipa::OpenApi;
use validator::Validate;

use crate::domain::todo::driving_ports::{TodoError, TodoPort};
use crate::external_connections::{
    ExternalConnectivity, TransactableExternalConnectivity, TransactionHandle,
};
use crate::routing_utils::{
    ErrorDetail, GenericErrorResponse, Json, NotFoundResponse, ValidationErrorResponse,
};
use crate::{AppState, SharedData, domain, dto, persistence};

/// Registers the todo endpoints with utoipa
#[derive(OpenApi)]
#[openapi(paths(create_todo, list_todos, get_todo, replace_todo, delete_todo))]
pub struct TodoApi;

/// The message returned whenever a referenced todo ID doesn't match a record
const TODO_NOT_FOUND: &str = "Todo not found";

/// Builds the router for everything under "/todos"
pub fn todo_routes() -> Router<Arc<SharedData>> {
    Router::new()
        .route(
            "/",
            post(
                |State(app_state): AppState, Json(new_todo): Json<dto::NewTodo>| async move {
                    let ext_cxn = app_state.ext_cxn.clone();
                    let todo_service = domain::todo::TodoService {};

                    create_todo(new_todo, ext_cxn, &todo_service).await
                },
            ),
        )
        .route(
            "/",
            get(
                |State(app_state): AppState, Query(page): Query<dto::TodoPage>| async move {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let todo_service = domain::todo::TodoService {};

                    list_todos(page, &mut ext_cxn, &todo_service).await
                },
            ),
        )
        .route(
            "/:todo_id",
            get(
                |State(app_state): AppState, Path(todo_id): Path<i32>| async move {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let todo_service = domain::todo::TodoService {};

                    get_todo(todo_id, &mut ext_cxn, &todo_service).await
                },
            ),
        )
        .route(
            "/:todo_id",
            put(
                |State(app_state): AppState,
                 Path(todo_id): Path<i32>,
                 Json(todo_data): Json<dto::NewTodo>| async move {
                    let ext_cxn = app_state.ext_cxn.clone();
                    let todo_service = domain::todo::TodoService {};

                    replace_todo(todo_id, todo_data, ext_cxn, &todo_service).await
                },
            ),
        )
        .route(
            "/:todo_id",
            delete(
                |State(app_state): AppState, Path(todo_id): Path<i32>| async move {
                    let ext_cxn = app_state.ext_cxn.clone();
                    let todo_service = domain::todo::TodoService {};

                    delete_todo(todo_id, ext_cxn, &todo_service).await
                },
            ),
        )
}

/// Maps a domain todo failure onto the wire error contract
fn todo_error_response(ctx: &str, err: TodoError) -> ErrorResponse {
    match err {
        TodoError::NotFound => NotFoundResponse(TODO_NOT_FOUND).into(),
        TodoError::PortError(cause) => {
            error!("{ctx}: {cause}");
            GenericErrorResponse(cause).into()
        }
    }
}

/// Creates a new todo item
#[utoipa::path(
    post,
    path = "/",
    context_path = "/todos",
    tag = "todos",
    request_body = dto::NewTodo,
    responses(
        (status = 201, description = "Todo successfully created", body = dto::TodoItem),
        (status = 422, description = "The submitted todo content was invalid"),
    ),
)]
async fn create_todo(
    new_todo: dto::NewTodo,
    ext_cxn: impl TransactableExternalConnectivity,
    todo_service: &impl TodoPort,
) -> Result<(StatusCode, Json<dto::TodoItem>), ErrorResponse> {
    info!("Creating a new todo");
    new_todo
        .validate()
        .map_err(ValidationErrorResponse::from)?;

    let content = domain::todo::TodoContent::from(new_todo);
    let todo_writer = persistence::db_todo_driven_ports::DbTodoWriter {};

    let mut txn = ext_cxn.start_transaction().await.map_err(|err| {
        error!("Could not open a transaction to create a todo: {err}");
        GenericErrorResponse(err)
    })?;
    let created = todo_service
        .create_todo(&content, &mut txn, &todo_writer)
        .await;
    match created {
        Ok(todo) => {
            txn.commit().await.map_err(|err| {
                error!("Could not commit todo creation: {err}");
                GenericErrorResponse(err)
            })?;
            Ok((StatusCode::CREATED, Json(todo.into())))
        }
        Err(create_err) => {
            error!("Todo create failure: {create_err}");
            Err(GenericErrorResponse(create_err).into())
        }
    }
}

/// Lists todos in storage order, paged by the skip/limit query parameters
#[utoipa::path(
    get,
    path = "/",
    context_path = "/todos",
    tag = "todos",
    params(dto::TodoPage),
    responses(
        (status = 200, description = "A page of todos", body = [dto::TodoItem]),
        (status = 422, description = "Invalid paging parameters"),
    ),
)]
async fn list_todos(
    page: dto::TodoPage,
    ext_cxn: &mut impl ExternalConnectivity,
    todo_service: &impl TodoPort,
) -> Result<Json<Vec<dto::TodoItem>>, ErrorResponse> {
    info!("Listing todos (skip {}, limit {})", page.skip, page.limit);
    page.validate().map_err(ValidationErrorResponse::from)?;

    let todo_reader = persistence::db_todo_driven_ports::DbTodoReader {};
    let todos = todo_service
        .list_todos(page.skip, page.limit, &mut *ext_cxn, &todo_reader)
        .await
        .map_err(|err| {
            error!("Could not list todos: {err}");
            GenericErrorResponse(err)
        })?;

    Ok(Json(todos.into_iter().map(dto::TodoItem::from).collect()))
}

/// Retrieves a single todo by its ID
#[utoipa::path(
    get,
    path = "/{todo_id}",
    context_path = "/todos",
    tag = "todos",
    params(("todo_id" = i32, Path, description = "ID of the todo to fetch")),
    responses(
        (status = 200, description = "The requested todo", body = dto::TodoItem),
        (status = 404, description = "No todo has the given ID", body = ErrorDetail),
    ),
)]
async fn get_todo(
    todo_id: i32,
    ext_cxn: &mut impl ExternalConnectivity,
    todo_service: &impl TodoPort,
) -> Result<Json<dto::TodoItem>, ErrorResponse> {
    info!("Fetching todo {todo_id}");
    let todo_reader = persistence::db_todo_driven_ports::DbTodoReader {};

    let todo = todo_service
        .todo_by_id(todo_id, &mut *ext_cxn, &todo_reader)
        .await
        .map_err(|err| todo_error_response("Fetch todo", err))?;

    Ok(Json(todo.into()))
}

/// Replaces every mutable field of an existing todo. Partial updates are not
/// supported, the body carries the todo's full new representation.
#[utoipa::path(
    put,
    path = "/{todo_id}",
    context_path = "/todos",
    tag = "todos",
    params(("todo_id" = i32, Path, description = "ID of the todo to replace")),
    request_body = dto::NewTodo,
    responses(
        (status = 200, description = "The updated todo", body = dto::TodoItem),
        (status = 404, description = "No todo has the given ID", body = ErrorDetail),
        (status = 422, description = "The submitted todo content was invalid"),
    ),
)]
async fn replace_todo(
    todo_id: i32,
    todo_data: dto::NewTodo,
    ext_cxn: impl TransactableExternalConnectivity,
    todo_service: &impl TodoPort,
) -> Result<Json<dto::TodoItem>, ErrorResponse> {
    info!("Replacing todo {todo_id}");
    todo_data
        .validate()
        .map_err(ValidationErrorResponse::from)?;

    let content = domain::todo::TodoContent::from(todo_data);
    let todo_reader = persistence::db_todo_driven_ports::DbTodoReader {};
    let todo_writer = persistence::db_todo_driven_ports::DbTodoWriter {};

    let mut txn = ext_cxn.start_transaction().await.map_err(|err| {
        error!("Could not open a transaction to replace todo {todo_id}: {err}");
        GenericErrorResponse(err)
    })?;
    let replaced = todo_service
        .replace_todo(todo_id, &content, &mut txn, &todo_reader, &todo_writer)
        .await;
    match replaced {
        Ok(todo) => {
            txn.commit().await.map_err(|err| {
                error!("Could not commit todo replacement: {err}");
                GenericErrorResponse(err)
            })?;
            Ok(Json(todo.into()))
        }
        Err(replace_err) => Err(todo_error_response("Replace todo", replace_err)),
    }
}

/// Deletes a todo, returning the representation it had just before deletion
#[utoipa::path(
    delete,
    path = "/{todo_id}",
    context_path = "/todos",
    tag = "todos",
    params(("todo_id" = i32, Path, description = "ID of the todo to delete")),
    responses(
        (status = 200, description = "The deleted todo", body = dto::TodoItem),
        (status = 404, description = "No todo has the given ID", body = ErrorDetail),
    ),
)]
async fn delete_todo(
    todo_id: i32,
    ext_cxn: impl TransactableExternalConnectivity,
    todo_service: &impl TodoPort,
) -> Result<Json<dto::TodoItem>, ErrorResponse> {
    info!("Deleting todo {todo_id}");
    let todo_reader = persistence::db_todo_driven_ports::DbTodoReader {};
    let todo_writer = persistence::db_todo_driven_ports::DbTodoWriter {};

    let mut txn = ext_cxn.start_transaction().await.map_err(|err| {
        error!("Could not open a transaction to delete todo {todo_id}: {err}");
        GenericErrorResponse(err)
    })?;
    let deleted = todo_service
        .delete_todo(todo_id, &mut txn, &todo_reader, &todo_writer)
        .await;
    match deleted {
        Ok(todo) => {
            txn.commit().await.map_err(|err| {
                error!("Could not commit todo deletion: {err}");
                GenericErrorResponse(err)
            })?;
            Ok(Json(todo.into()))
        }
        Err(delete_err) => Err(todo_error_response("Delete todo", delete_err)),
    }
}
