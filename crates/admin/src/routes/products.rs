//! Product catalog route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Json, Router,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use nexus_portal_core::{Price, ProductId, ProductStatus};

use crate::{
    error::AppError,
    filters,
    middleware::{RequireCatalogEditor, RequireScreen},
    models::{Product, ProductDraft, ProductPatch, filter_products},
    services::{RouteGuard, Screen},
    state::AppState,
};

use super::dashboard::{NavItem, UserView, navigation};

/// Category choices offered by the product form.
pub const CATEGORIES: [&str; 3] = ["Electronics", "Peripherals", "Accessories"];

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// A `<select>` option with its selected state.
#[derive(Debug, Clone)]
pub struct OptionView {
    pub value: &'static str,
    pub selected: bool,
}

fn options(values: &[&'static str], current: &str) -> Vec<OptionView> {
    values
        .iter()
        .map(|&value| OptionView {
            value,
            selected: value == current,
        })
        .collect()
}

fn status_values() -> Vec<&'static str> {
    ProductStatus::ALL.iter().map(ProductStatus::as_str).collect()
}

/// Product view for templates.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: String,
    /// Plain amount for form inputs.
    pub price_input: String,
    pub stock: u32,
    pub is_low_stock: bool,
    pub description: String,
    pub status: &'static str,
    pub status_class: &'static str,
    pub updated_at: String,
    pub category_options: Vec<OptionView>,
    pub status_options: Vec<OptionView>,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        let status_class = match product.status {
            ProductStatus::Active => "bg-green-100 text-green-700",
            ProductStatus::Draft => "bg-yellow-100 text-yellow-700",
            ProductStatus::Archived => "bg-gray-100 text-gray-700",
        };

        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            category: product.category.clone(),
            price: product.price.to_string(),
            price_input: product.price.amount().round_dp(2).to_string(),
            stock: product.stock,
            is_low_stock: product.is_low_stock(),
            description: product.description.clone(),
            status: product.status.as_str(),
            status_class,
            updated_at: product.updated_at.format("%Y-%m-%d %H:%M").to_string(),
            category_options: options(&CATEGORIES, &product.category),
            status_options: options(&status_values(), product.status.as_str()),
        }
    }
}

/// Products list page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub user: UserView,
    pub nav: Vec<NavItem>,
    pub products: Vec<ProductView>,
    pub total: usize,
    pub search_query: String,
    pub can_edit: bool,
    pub categories: Vec<&'static str>,
    pub statuses: Vec<&'static str>,
}

/// New product form data. Missing fields are caught by validation.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProductForm {
    pub name: String,
    pub category: String,
    pub price: String,
    pub stock: String,
    pub description: String,
    pub status: String,
}

impl ProductForm {
    /// Validate into a draft. Category defaults to Electronics, status to active.
    fn into_draft(self) -> Result<ProductDraft, AppError> {
        let name = required("name", &self.name)?;
        let category = non_blank(&self.category).unwrap_or(CATEGORIES[0]).to_string();

        Ok(ProductDraft {
            name,
            category,
            price: parse_price(&self.price)?,
            stock: parse_stock(&self.stock)?,
            description: self.description.trim().to_string(),
            status: non_blank(&self.status)
                .map(parse_status)
                .transpose()?
                .unwrap_or_default(),
        })
    }
}

/// Edit form data; blank fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct ProductPatchForm {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<String>,
    pub stock: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

impl ProductPatchForm {
    fn into_patch(self) -> Result<ProductPatch, AppError> {
        let field = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        Ok(ProductPatch {
            name: field(self.name).map(|v| v.trim().to_string()),
            category: field(self.category).map(|v| v.trim().to_string()),
            price: field(self.price).map(|v| parse_price(&v)).transpose()?,
            stock: field(self.stock).map(|v| parse_stock(&v)).transpose()?,
            // An empty description is a legitimate value, so only absence skips it.
            description: self.description.map(|v| v.trim().to_string()),
            status: field(self.status).map(|v| parse_status(&v)).transpose()?,
        })
    }
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn required(field: &str, value: &str) -> Result<String, AppError> {
    non_blank(value)
        .map(str::to_string)
        .ok_or_else(|| AppError::BadRequest(format!("{field} is required")))
}

fn parse_price(raw: &str) -> Result<Price, AppError> {
    raw.trim()
        .parse::<Price>()
        .map_err(|e| AppError::BadRequest(format!("price: {e}")))
}

fn parse_stock(raw: &str) -> Result<u32, AppError> {
    raw.trim()
        .parse::<u32>()
        .map_err(|e| AppError::BadRequest(format!("stock: {e}")))
}

fn parse_status(raw: &str) -> Result<ProductStatus, AppError> {
    raw.trim()
        .parse::<ProductStatus>()
        .map_err(AppError::BadRequest)
}

/// Body of a description request.
#[derive(Debug, Deserialize)]
pub struct DescribeRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
}

/// Body of a description response.
#[derive(Debug, Serialize, Deserialize)]
pub struct DescribeResponse {
    pub description: String,
}

/// Build the products router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(index).post(create))
        .route("/products/{id}", post(update))
        .route("/products/{id}/delete", post(delete))
        .route("/api/products/describe", post(describe))
}

/// Products list page handler.
///
/// GET /products?q=
#[instrument(skip(identity, state), fields(user_id = %identity.id))]
async fn index(
    RequireScreen(identity): RequireScreen,
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> impl IntoResponse {
    let all = state.catalog().list();
    let search_query = query.q.unwrap_or_default();
    let products = filter_products(&all, &search_query)
        .into_iter()
        .map(ProductView::from)
        .collect();

    ProductsIndexTemplate {
        user: UserView::from(&identity),
        nav: navigation(&identity, Screen::Products),
        products,
        total: all.len(),
        search_query,
        can_edit: RouteGuard::can_edit_catalog(&identity),
        categories: CATEGORIES.to_vec(),
        statuses: status_values(),
    }
}

/// Add a product.
///
/// POST /products
#[instrument(skip(identity, state, form), fields(user_id = %identity.id))]
async fn create(
    RequireCatalogEditor(identity): RequireCatalogEditor,
    State(state): State<AppState>,
    Form(form): Form<ProductForm>,
) -> Result<Redirect, AppError> {
    let draft = form.into_draft()?;
    state.catalog().add(draft);
    Ok(Redirect::to(Screen::Products.path()))
}

/// Update a product. Unknown IDs are ignored.
///
/// POST /products/{id}
#[instrument(skip(identity, state, form), fields(user_id = %identity.id))]
async fn update(
    RequireCatalogEditor(identity): RequireCatalogEditor,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<ProductPatchForm>,
) -> Result<Redirect, AppError> {
    let patch = form.into_patch()?;
    state.catalog().update(&ProductId::new(id), patch);
    Ok(Redirect::to(Screen::Products.path()))
}

/// Delete a product. Unknown IDs are ignored.
///
/// POST /products/{id}/delete
#[instrument(skip(identity, state), fields(user_id = %identity.id))]
async fn delete(
    RequireCatalogEditor(identity): RequireCatalogEditor,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Redirect {
    state.catalog().delete(&ProductId::new(id));
    Redirect::to(Screen::Products.path())
}

/// Draft a marketing description.
///
/// POST /api/products/describe
#[instrument(skip(identity, state, request), fields(user_id = %identity.id))]
async fn describe(
    RequireCatalogEditor(identity): RequireCatalogEditor,
    State(state): State<AppState>,
    Json(request): Json<DescribeRequest>,
) -> Result<Json<DescribeResponse>, AppError> {
    let name = required("name", &request.name)?;
    let category = required("category", &request.category)?;

    let description = state.descriptions().generate(&name, &category).await;
    Ok(Json(DescribeResponse { description }))
}
