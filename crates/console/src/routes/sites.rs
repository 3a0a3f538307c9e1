//! Site CRUD handlers.
//!
//! The list supports a free-text filter, a category filter, and page-10
//! pagination. Create and edit are multipart forms: text fields plus an
//! optional main image and any number of secondary images, all streamed
//! through to the backend unchanged. Image storage is the backend's
//! concern; the console never touches the bytes.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Multipart, Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use barrio_core::{CategoryId, SiteId, validate};
use serde::Deserialize;
use tracing::instrument;

use crate::backend::BackendError;
use crate::components::{Page, filter_rows, paginate};
use crate::error::AppError;
use crate::models::{Category, Site};
use crate::state::AppState;

/// Query parameters for the site list.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub q: Option<String>,
    pub category: Option<i64>,
    pub page: Option<usize>,
}

/// One row of the site list, pre-formatted for the template.
pub struct SiteRow {
    pub id: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub phone: String,
}

/// An option in the category dropdowns.
pub struct CategoryOption {
    pub id: String,
    pub name: String,
    pub selected: bool,
}

/// An existing secondary image shown on the edit form.
pub struct ImageRow {
    pub id: String,
    pub url: String,
}

/// Site list template.
#[derive(Template, WebTemplate)]
#[template(path = "sites/index.html")]
pub struct IndexTemplate {
    pub rows: Vec<SiteRow>,
    pub q: String,
    pub categories: Vec<CategoryOption>,
    pub page_number: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub has_previous: bool,
    pub has_next: bool,
    pub prev_page: usize,
    pub next_page: usize,
    pub error: String,
}

/// Site form template, shared by create and edit.
#[derive(Template, WebTemplate)]
#[template(path = "sites/form.html")]
pub struct FormTemplate {
    pub title: String,
    pub action: String,
    pub name: String,
    pub phone: String,
    pub state: String,
    pub city: String,
    pub postal_code: String,
    pub neighborhood: String,
    pub street: String,
    pub latitude: String,
    pub longitude: String,
    pub platform_percentage: String,
    pub transport_percentage: String,
    pub venue_percentage: String,
    pub categories: Vec<CategoryOption>,
    pub existing_images: Vec<ImageRow>,
    pub error: String,
}

/// A file lifted out of the incoming multipart body.
struct UploadedFile {
    file_name: String,
    content_type: String,
    bytes: Vec<u8>,
}

/// Text fields and files collected from the site form.
#[derive(Default)]
struct SiteFormData {
    name: String,
    phone: String,
    state: String,
    city: String,
    postal_code: String,
    neighborhood: String,
    street: String,
    latitude: String,
    longitude: String,
    category_id: String,
    platform_percentage: String,
    transport_percentage: String,
    venue_percentage: String,
    remove_image_ids: Vec<String>,
    main_image: Option<UploadedFile>,
    images: Vec<UploadedFile>,
}

impl SiteFormData {
    /// Copy of the text fields, for re-rendering the form after a backend
    /// rejection. File inputs cannot be re-populated and are dropped.
    fn text_snapshot(&self) -> Self {
        Self {
            name: self.name.clone(),
            phone: self.phone.clone(),
            state: self.state.clone(),
            city: self.city.clone(),
            postal_code: self.postal_code.clone(),
            neighborhood: self.neighborhood.clone(),
            street: self.street.clone(),
            latitude: self.latitude.clone(),
            longitude: self.longitude.clone(),
            category_id: self.category_id.clone(),
            platform_percentage: self.platform_percentage.clone(),
            transport_percentage: self.transport_percentage.clone(),
            venue_percentage: self.venue_percentage.clone(),
            ..Self::default()
        }
    }
}

/// Drain the multipart body into [`SiteFormData`].
async fn read_form(mut multipart: Multipart) -> Result<SiteFormData, AppError> {
    let mut data = SiteFormData::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "image" | "images" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                if file_name.is_empty() {
                    // An untouched file input submits an empty part
                    continue;
                }
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?
                    .to_vec();
                let file = UploadedFile {
                    file_name,
                    content_type,
                    bytes,
                };
                if name == "image" {
                    data.main_image = Some(file);
                } else {
                    data.images.push(file);
                }
            }
            _ => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                match name.as_str() {
                    "name" => data.name = value,
                    "phone" => data.phone = value,
                    "state" => data.state = value,
                    "city" => data.city = value,
                    "postal_code" => data.postal_code = value,
                    "neighborhood" => data.neighborhood = value,
                    "street" => data.street = value,
                    "latitude" => data.latitude = value,
                    "longitude" => data.longitude = value,
                    "category_id" => data.category_id = value,
                    "platform_percentage" => data.platform_percentage = value,
                    "transport_percentage" => data.transport_percentage = value,
                    "venue_percentage" => data.venue_percentage = value,
                    "remove_image_ids" => data.remove_image_ids.push(value),
                    _ => {}
                }
            }
        }
    }

    Ok(data)
}

/// Validate the form before any network call. Returns a message on failure.
fn validate_form(data: &SiteFormData) -> Option<String> {
    let required = [
        (&data.name, "El nombre es obligatorio."),
        (&data.state, "El estado es obligatorio."),
        (&data.city, "La ciudad es obligatoria."),
        (&data.postal_code, "El código postal es obligatorio."),
        (&data.neighborhood, "La colonia es obligatoria."),
        (&data.street, "La calle es obligatoria."),
    ];
    for (value, message) in required {
        if !validate::is_present(value) {
            return Some((*message).to_string());
        }
    }

    if data.category_id.trim().parse::<i64>().is_err() {
        return Some("Selecciona una categoría.".to_string());
    }

    if !validate::is_valid_coordinate_pair(&data.latitude, &data.longitude) {
        return Some("Latitud y longitud deben ser números válidos.".to_string());
    }

    let percentages = [
        &data.platform_percentage,
        &data.transport_percentage,
        &data.venue_percentage,
    ];
    if percentages.iter().any(|p| !validate::is_valid_percentage(p)) {
        return Some("Los porcentajes deben ser números válidos.".to_string());
    }

    None
}

/// Assemble the outgoing multipart body, files passed through unchanged.
fn build_backend_form(data: SiteFormData) -> Result<reqwest::multipart::Form, BackendError> {
    let mut form = reqwest::multipart::Form::new()
        .text("name", data.name.trim().to_string())
        .text("phone", data.phone.trim().to_string())
        .text("state", data.state.trim().to_string())
        .text("city", data.city.trim().to_string())
        .text("postalCode", data.postal_code.trim().to_string())
        .text("neighborhood", data.neighborhood.trim().to_string())
        .text("street", data.street.trim().to_string())
        .text("latitude", data.latitude.trim().to_string())
        .text("longitude", data.longitude.trim().to_string())
        .text("categoryId", data.category_id.trim().to_string())
        .text("platformPercentage", data.platform_percentage.trim().to_string())
        .text("transportPercentage", data.transport_percentage.trim().to_string())
        .text("venuePercentage", data.venue_percentage.trim().to_string());

    for id in data.remove_image_ids {
        form = form.text("removeImageIds", id);
    }

    if let Some(file) = data.main_image {
        form = form.part("image", to_part(file)?);
    }
    for file in data.images {
        form = form.part("images", to_part(file)?);
    }

    Ok(form)
}

fn to_part(file: UploadedFile) -> Result<reqwest::multipart::Part, BackendError> {
    reqwest::multipart::Part::bytes(file.bytes)
        .file_name(file.file_name)
        .mime_str(&file.content_type)
        .map_err(BackendError::from)
}

fn category_options(categories: &[Category], selected: Option<CategoryId>) -> Vec<CategoryOption> {
    categories
        .iter()
        .map(|c| CategoryOption {
            id: c.id.to_string(),
            name: c.name.clone(),
            selected: selected == Some(c.id),
        })
        .collect()
}

fn to_row(site: &Site) -> SiteRow {
    SiteRow {
        id: site.id.to_string(),
        name: site.name.clone(),
        address: format!("{}, {}", site.street, site.neighborhood),
        city: format!("{}, {}", site.city, site.state),
        phone: site.phone.clone().unwrap_or_default(),
    }
}

fn backend_message(err: &BackendError) -> String {
    match err {
        BackendError::Api { message, .. } if !message.is_empty() => message.clone(),
        _ => "No pudimos completar la operación. Intenta de nuevo.".to_string(),
    }
}

fn index_template(
    page: Page<SiteRow>,
    q: String,
    categories: Vec<CategoryOption>,
    error: String,
) -> IndexTemplate {
    IndexTemplate {
        has_previous: page.has_previous(),
        has_next: page.has_next(),
        prev_page: page.number.saturating_sub(1),
        next_page: page.number + 1,
        page_number: page.number,
        total_pages: page.total_pages,
        total_items: page.total_items,
        rows: page.items,
        q,
        categories,
        error,
    }
}

fn form_template_from_data(
    title: &str,
    action: String,
    data: &SiteFormData,
    categories: Vec<CategoryOption>,
    error: String,
) -> FormTemplate {
    FormTemplate {
        title: title.to_string(),
        action,
        name: data.name.clone(),
        phone: data.phone.clone(),
        state: data.state.clone(),
        city: data.city.clone(),
        postal_code: data.postal_code.clone(),
        neighborhood: data.neighborhood.clone(),
        street: data.street.clone(),
        latitude: data.latitude.clone(),
        longitude: data.longitude.clone(),
        platform_percentage: data.platform_percentage.clone(),
        transport_percentage: data.transport_percentage.clone(),
        venue_percentage: data.venue_percentage.clone(),
        categories,
        existing_images: Vec::new(),
        error,
    }
}

/// Display the site list.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>, Query(query): Query<ListQuery>) -> Response {
    let q = query.q.unwrap_or_default();
    let selected = query.category.map(CategoryId::new);
    let page_number = query.page.unwrap_or(1);

    let fetched = tokio::try_join!(
        state.backend().list_sites(selected),
        state.backend().list_categories(),
    );

    match fetched {
        Ok((sites, categories)) => {
            let rows: Vec<SiteRow> = filter_rows(sites, &q).iter().map(to_row).collect();
            let page = paginate(rows, page_number);
            index_template(page, q, category_options(&categories, selected), String::new())
                .into_response()
        }
        Err(err) => index_template(
            paginate(Vec::new(), 1),
            q,
            Vec::new(),
            backend_message(&err),
        )
        .into_response(),
    }
}

/// Display the empty create form.
#[instrument(skip(state))]
pub async fn new(State(state): State<AppState>) -> Result<FormTemplate, AppError> {
    let categories = state.backend().list_categories().await?;
    Ok(form_template_from_data(
        "Nuevo sitio",
        "/admin/sites".to_string(),
        &SiteFormData::default(),
        category_options(&categories, None),
        String::new(),
    ))
}

/// Create a site from the submitted multipart form.
#[instrument(skip(state, multipart))]
pub async fn create(State(state): State<AppState>, multipart: Multipart) -> Response {
    submit(state, None, multipart).await
}

/// Display the edit form for one site.
#[instrument(skip(state))]
pub async fn edit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<FormTemplate, AppError> {
    let id = SiteId::new(id);
    let (sites, categories) = tokio::try_join!(
        state.backend().list_sites(None),
        state.backend().list_categories(),
    )?;

    let site = sites
        .into_iter()
        .find(|s| s.id == id)
        .ok_or_else(|| AppError::NotFound(format!("site {id}")))?;

    let existing_images = site
        .images
        .unwrap_or_default()
        .iter()
        .map(|image| ImageRow {
            id: image.id.to_string(),
            url: image.url.clone(),
        })
        .collect();

    Ok(FormTemplate {
        title: "Editar sitio".to_string(),
        action: format!("/admin/sites/{id}"),
        name: site.name,
        phone: site.phone.unwrap_or_default(),
        state: site.state,
        city: site.city,
        postal_code: site.postal_code,
        neighborhood: site.neighborhood,
        street: site.street,
        latitude: site.latitude.to_string(),
        longitude: site.longitude.to_string(),
        platform_percentage: site.platform_percentage.to_string(),
        transport_percentage: site.transport_percentage.to_string(),
        venue_percentage: site.venue_percentage.to_string(),
        categories: category_options(&categories, Some(site.category_id)),
        existing_images,
        error: String::new(),
    })
}

/// Update a site from the submitted multipart form.
#[instrument(skip(state, multipart))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Response {
    submit(state, Some(SiteId::new(id)), multipart).await
}

/// Shared create/update path: read, validate, relay, redirect.
async fn submit(state: AppState, id: Option<SiteId>, multipart: Multipart) -> Response {
    let (title, action) = match id {
        Some(id) => ("Editar sitio", format!("/admin/sites/{id}")),
        None => ("Nuevo sitio", "/admin/sites".to_string()),
    };

    let data = match read_form(multipart).await {
        Ok(data) => data,
        Err(err) => return err.into_response(),
    };

    if let Some(message) = validate_form(&data) {
        let categories = state.backend().list_categories().await.unwrap_or_default();
        let selected = data.category_id.trim().parse::<i64>().ok().map(CategoryId::new);
        return form_template_from_data(
            title,
            action,
            &data,
            category_options(&categories, selected),
            message,
        )
        .into_response();
    }

    let snapshot = data.text_snapshot();
    let form = match build_backend_form(data) {
        Ok(form) => form,
        Err(err) => return AppError::Backend(err).into_response(),
    };

    let outcome = match id {
        Some(id) => state.backend().update_site(id, form).await,
        None => state.backend().create_site(form).await,
    };

    match outcome {
        Ok(_) => Redirect::to("/admin/sites").into_response(),
        Err(err) => {
            let categories = state.backend().list_categories().await.unwrap_or_default();
            let selected = snapshot
                .category_id
                .trim()
                .parse::<i64>()
                .ok()
                .map(CategoryId::new);
            form_template_from_data(
                title,
                action,
                &snapshot,
                category_options(&categories, selected),
                backend_message(&err),
            )
            .into_response()
        }
    }
}

/// Delete a site, then return to the re-fetched list.
#[instrument(skip(state))]
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match state.backend().delete_site(SiteId::new(id)).await {
        Ok(()) => Redirect::to("/admin/sites").into_response(),
        Err(err) => index_template(
            paginate(Vec::new(), 1),
            String::new(),
            Vec::new(),
            backend_message(&err),
        )
        .into_response(),
    }
}
