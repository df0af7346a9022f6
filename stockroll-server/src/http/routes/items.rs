//! Item list and registration form

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Form, Json, Router,
};
use serde::Serialize;

use stockroll_core::{Item, ItemForm, NewItem};

use crate::http::error::ApiError;
use crate::registry::{self, CreateOutcome};
use crate::state::AppState;

/// Data handed to the list view
#[derive(Debug, Serialize)]
pub struct ItemListView {
    pub items: Vec<Item>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// GET / - all items
async fn list_items(State(state): State<AppState>) -> Result<Json<ItemListView>, ApiError> {
    let items = state
        .store()
        .scoped(|db| Box::pin(registry::list_items(db)))
        .await?;

    Ok(Json(ItemListView {
        items,
        error_message: None,
    }))
}

/// POST / - register an item, then send the client back to the list
async fn create_item(
    State(state): State<AppState>,
    Form(form): Form<ItemForm>,
) -> Result<Response, ApiError> {
    let item = NewItem::from(form);
    let outcome = state
        .store()
        .scoped(move |db| Box::pin(registry::create_item(db, item)))
        .await?;

    let response = match outcome {
        CreateOutcome::Created(_) => Redirect::to("/").into_response(),
        CreateOutcome::Rejected { message, items } => Json(ItemListView {
            items,
            error_message: Some(message.to_string()),
        })
        .into_response(),
    };

    Ok(response)
}

/// Item routes
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_items).post(create_item))
}
