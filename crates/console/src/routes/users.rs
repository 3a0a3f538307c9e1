//! Read-only user list handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use crate::backend::BackendError;
use crate::components::filter_rows;
use crate::models::UserRow;
use crate::state::AppState;

/// Query parameters for the user list.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub q: Option<String>,
}

/// One row of the user list, pre-formatted for the template.
pub struct UserRowView {
    pub id: String,
    pub email: String,
    pub name: String,
    pub phone: String,
    pub validated_label: String,
}

/// User list template.
#[derive(Template, WebTemplate)]
#[template(path = "users/index.html")]
pub struct IndexTemplate {
    pub rows: Vec<UserRowView>,
    pub q: String,
    pub error: String,
}

fn to_row(user: &UserRow) -> UserRowView {
    let name = format!(
        "{} {}",
        user.first_name.as_deref().unwrap_or(""),
        user.last_name.as_deref().unwrap_or(""),
    )
    .trim()
    .to_string();

    UserRowView {
        id: user.id.to_string(),
        email: user.email.clone(),
        name,
        phone: user.phone.clone().unwrap_or_default(),
        validated_label: if user.validated { "Sí" } else { "No" }.to_string(),
    }
}

fn backend_message(err: &BackendError) -> String {
    match err {
        BackendError::Api { message, .. } if !message.is_empty() => message.clone(),
        _ => "No pudimos completar la operación. Intenta de nuevo.".to_string(),
    }
}

/// Display the user list.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>, Query(query): Query<ListQuery>) -> Response {
    let q = query.q.unwrap_or_default();

    match state.backend().list_users().await {
        Ok(users) => {
            let rows = filter_rows(users, &q).iter().map(to_row).collect();
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

#[cfg(test)]
mod tests {
    use barrio_core::UserId;

    use super::*;

    #[test]
    fn test_to_row_joins_name_parts() {
        let user = UserRow {
            id: UserId::new(7),
            email: "a@b.com".to_string(),
            first_name: Some("Ana".to_string()),
            last_name: None,
            phone: None,
            validated: true,
        };
        let row = to_row(&user);
        assert_eq!(row.name, "Ana");
        assert_eq!(row.validated_label, "Sí");
        assert_eq!(row.phone, "");
    }
}
