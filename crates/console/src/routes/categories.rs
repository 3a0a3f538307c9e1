//! Category CRUD handlers.
//!
//! List with free-text filter, create/edit forms, and delete. Every form
//! is validated before any backend call; after a successful mutation the
//! browser is redirected back to the list, which re-fetches in full.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use barrio_core::{CategoryId, validate};
use serde::Deserialize;
use tracing::instrument;

use crate::backend::BackendError;
use crate::components::filter_rows;
use crate::error::AppError;
use crate::models::{Category, CategoryInput};
use crate::state::AppState;

/// Query parameters for the category list.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub q: Option<String>,
}

/// Category create/edit form data.
#[derive(Debug, Deserialize)]
pub struct CategoryForm {
    pub name: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub color: String,
    /// Checkbox: present when checked.
    #[serde(default)]
    pub bookable: Option<String>,
}

/// One row of the category list, pre-formatted for the template.
pub struct CategoryRow {
    pub id: String,
    pub name: String,
    pub image_url: String,
    pub color: String,
    pub bookable_label: String,
}

/// Category list template.
#[derive(Template, WebTemplate)]
#[template(path = "categories/index.html")]
pub struct IndexTemplate {
    pub rows: Vec<CategoryRow>,
    pub q: String,
    pub error: String,
}

/// Category form template, shared by create and edit.
#[derive(Template, WebTemplate)]
#[template(path = "categories/form.html")]
pub struct FormTemplate {
    pub title: String,
    pub action: String,
    pub name: String,
    pub image_url: String,
    pub color: String,
    pub bookable: bool,
    pub error: String,
}

fn to_row(category: &Category) -> CategoryRow {
    CategoryRow {
        id: category.id.to_string(),
        name: category.name.clone(),
        image_url: category.image_url.clone().unwrap_or_default(),
        color: category.color.clone().unwrap_or_default(),
        bookable_label: if category.bookable { "Sí" } else { "No" }.to_string(),
    }
}

fn backend_message(err: &BackendError) -> String {
    match err {
        BackendError::Api { message, .. } if !message.is_empty() => message.clone(),
        _ => "No pudimos completar la operación. Intenta de nuevo.".to_string(),
    }
}

/// Validate the form before any network call. Returns a message on failure.
fn validate_form(form: &CategoryForm) -> Option<String> {
    if !validate::is_present(&form.name) {
        return Some("El nombre es obligatorio.".to_string());
    }
    if !validate::is_valid_hex_color(form.color.trim()) {
        return Some("El color debe tener el formato #RRGGBB.".to_string());
    }
    if !validate::is_valid_url(form.image_url.trim()) {
        return Some("La imagen debe ser una URL válida.".to_string());
    }
    None
}

fn to_input(form: &CategoryForm) -> CategoryInput {
    let none_if_empty = |s: &str| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    };

    CategoryInput {
        name: form.name.trim().to_string(),
        image_url: none_if_empty(&form.image_url),
        color: none_if_empty(&form.color),
        bookable: form.bookable.is_some(),
    }
}

fn form_template(title: &str, action: String, form: &CategoryForm, error: String) -> FormTemplate {
    FormTemplate {
        title: title.to_string(),
        action,
        name: form.name.clone(),
        image_url: form.image_url.clone(),
        color: form.color.clone(),
        bookable: form.bookable.is_some(),
        error,
    }
}

/// Display the category list.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>, Query(query): Query<ListQuery>) -> Response {
    let q = query.q.unwrap_or_default();

    match state.backend().list_categories().await {
        Ok(categories) => {
            let rows = filter_rows(categories, &q).iter().map(to_row).collect();
            IndexTemplate {
                rows,
                q,
                error: String::new(),
            }
            .into_response()
        }
        Err(err) => IndexTemplate {
            rows: Vec::new(),
            q,
            error: backend_message(&err),
        }
        .into_response(),
    }
}

/// Display the empty create form.
pub async fn new() -> impl IntoResponse {
    FormTemplate {
        title: "Nueva categoría".to_string(),
        action: "/admin/categories".to_string(),
        name: String::new(),
        image_url: String::new(),
        color: String::new(),
        bookable: false,
        error: String::new(),
    }
}

/// Create a category.
#[instrument(skip(state, form))]
pub async fn create(State(state): State<AppState>, Form(form): Form<CategoryForm>) -> Response {
    let action = "/admin/categories".to_string();

    if let Some(message) = validate_form(&form) {
        return form_template("Nueva categoría", action, &form, message).into_response();
    }

    match state.backend().create_category(&to_input(&form)).await {
        Ok(_) => Redirect::to("/admin/categories").into_response(),
        Err(err) => {
            form_template("Nueva categoría", action, &form, backend_message(&err)).into_response()
        }
    }
}

/// Display the edit form for one category.
#[instrument(skip(state))]
pub async fn edit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<FormTemplate, AppError> {
    let id = CategoryId::new(id);
    let categories = state.backend().list_categories().await?;
    let category = categories
        .into_iter()
        .find(|c| c.id == id)
        .ok_or_else(|| AppError::NotFound(format!("category {id}")))?;

    Ok(FormTemplate {
        title: "Editar categoría".to_string(),
        action: format!("/admin/categories/{id}"),
        name: category.name,
        image_url: category.image_url.unwrap_or_default(),
        color: category.color.unwrap_or_default(),
        bookable: category.bookable,
        error: String::new(),
    })
}

/// Update a category.
#[instrument(skip(state, form))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<CategoryForm>,
) -> Response {
    let id = CategoryId::new(id);
    let action = format!("/admin/categories/{id}");

    if let Some(message) = validate_form(&form) {
        return form_template("Editar categoría", action, &form, message).into_response();
    }

    match state.backend().update_category(id, &to_input(&form)).await {
        Ok(_) => Redirect::to("/admin/categories").into_response(),
        Err(err) => {
            form_template("Editar categoría", action, &form, backend_message(&err)).into_response()
        }
    }
}

/// Delete a category, then return to the re-fetched list.
#[instrument(skip(state))]
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match state.backend().delete_category(CategoryId::new(id)).await {
        Ok(()) => Redirect::to("/admin/categories").into_response(),
        Err(err) => {
            let rows = match state.backend().list_categories().await {
                Ok(categories) => categories.iter().map(to_row).collect(),
                Err(_) => Vec::new(),
            };
            IndexTemplate {
                rows,
                q: String::new(),
                error: backend_message(&err),
            }
            .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, image_url: &str, color: &str) -> CategoryForm {
        CategoryForm {
            name: name.to_string(),
            image_url: image_url.to_string(),
            color: color.to_string(),
            bookable: None,
        }
    }

    #[test]
    fn test_validate_requires_name() {
        assert!(validate_form(&form("  ", "", "")).is_some());
        assert!(validate_form(&form("Comida", "", "")).is_none());
    }

    #[test]
    fn test_validate_rejects_bad_url_before_network() {
        let result = validate_form(&form("Comida", "not-a-url", ""));
        assert!(result.is_some_and(|m| m.contains("URL")));
    }

    #[test]
    fn test_validate_rejects_bad_color() {
        assert!(validate_form(&form("Comida", "", "FF9900")).is_some());
        assert!(validate_form(&form("Comida", "", "#FF9900")).is_none());
    }

    #[test]
    fn test_to_input_empties_become_none() {
        let input = to_input(&form("  Comida  ", "", "  "));
        assert_eq!(input.name, "Comida");
        assert!(input.image_url.is_none());
        assert!(input.color.is_none());
        assert!(!input.bookable);
    }

    #[test]
    fn test_to_input_checkbox() {
        let mut f = form("Comida", "", "");
        f.bookable = Some("on".to_string());
        assert!(to_input(&f).bookable);
    }
}
