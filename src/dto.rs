use crate::domain;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, OpenApi, ToSchema};
use validator::Validate;

/// Registers dto schemas with utoipa
#[derive(OpenApi)]
#[openapi(components(schemas(NewTodo, TodoItem)))]
pub struct OpenApiSchemas;

/// DTO for creating or fully replacing a todo via the API
#[derive(Deserialize, Validate, ToSchema)]
#[cfg_attr(test, derive(Serialize))]
pub struct NewTodo {
    #[validate(length(min = 1))]
    #[schema(example = "Buy milk")]
    pub title: String,
    #[serde(default)]
    #[schema(example = "2% if they have it")]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

impl From<NewTodo> for domain::todo::TodoContent {
    fn from(value: NewTodo) -> Self {
        domain::todo::TodoContent {
            title: value.title,
            description: value.description,
            completed: value.completed,
        }
    }
}

/// DTO for a returned todo on the API
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Deserialize, Debug, PartialEq, Eq))]
pub struct TodoItem {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Buy milk")]
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
}

impl From<domain::todo::TodoItem> for TodoItem {
    fn from(value: domain::todo::TodoItem) -> Self {
        TodoItem {
            id: value.id,
            title: value.title,
            description: value.description,
            completed: value.completed,
        }
    }
}

/// Query parameters accepted when listing todos
#[derive(Deserialize, Validate, IntoParams)]
#[cfg_attr(test, derive(Serialize))]
pub struct TodoPage {
    /// Number of records to skip from the start of storage order
    #[serde(default)]
    #[validate(range(min = 0))]
    pub skip: i64,
    /// Maximum number of records to return
    #[serde(default = "TodoPage::default_limit")]
    pub limit: i64,
}

impl TodoPage {
    fn default_limit() -> i64 {
        100
    }
}

impl Default for TodoPage {
    fn default() -> Self {
        TodoPage {
            skip: 0,
            limit: Self::default_limit(),
        }
    }
}
