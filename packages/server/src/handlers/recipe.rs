use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{Recipe, RecipeForm, search};
use tracing::{info, instrument};

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::{AppJson, AppQuery};
use crate::models::recipe::*;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Recipes",
    operation_id = "listRecipes",
    summary = "List recipes",
    description = "Fetches the whole catalog (newest first), then filters it by `q` against title, \
        description and ingredients (case-insensitive) and orders the matches by `sort`.",
    params(RecipeListQuery),
    responses(
        (status = 200, description = "Matching recipes", body = RecipeListResponse),
        (status = 400, description = "Invalid sort mode (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query), fields(q = ?query.q, sort = ?query.sort))]
pub async fn list_recipes(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<RecipeListQuery>,
) -> Result<Json<RecipeListResponse>, AppError> {
    let collection = state.recipes.list_all().await?;

    let data: Vec<Recipe> = search::apply(
        &collection,
        query.q.as_deref().unwrap_or_default(),
        query.sort.unwrap_or_default(),
    )
    .into_iter()
    .cloned()
    .collect();

    Ok(Json(RecipeListResponse {
        total: collection.len(),
        matched: data.len(),
        data,
    }))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Recipes",
    operation_id = "createRecipe",
    summary = "Create a recipe",
    description = "Maps the submitted form onto a recipe: one ingredient or step per line, blank \
        lines dropped, empty numeric fields left unset.",
    request_body = RecipeForm,
    responses(
        (status = 201, description = "Recipe created", body = Recipe),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, form), fields(title = %form.title))]
pub async fn create_recipe(
    State(state): State<AppState>,
    AppJson(form): AppJson<RecipeForm>,
) -> Result<impl IntoResponse, AppError> {
    let fields = form.to_record()?;
    validate_recipe_fields(&fields)?;

    let recipe = state.recipes.insert(fields).await?;
    info!(id = %recipe.id, "Created recipe");

    Ok((StatusCode::CREATED, Json(recipe)))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Recipes",
    operation_id = "getRecipe",
    summary = "Get a recipe by ID",
    params(("id" = String, Path, description = "Recipe ID")),
    responses(
        (status = 200, description = "Recipe details", body = RecipeDetail),
        (status = 404, description = "Recipe not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RecipeDetail>, AppError> {
    let recipe = find_recipe(&state, &id).await?;
    Ok(Json(RecipeDetail::from(recipe)))
}

#[utoipa::path(
    get,
    path = "/{id}/form",
    tag = "Recipes",
    operation_id = "getRecipeForm",
    summary = "Get a recipe as edit-form fields",
    description = "Returns the recipe rendered back into form text: lists joined with line \
        breaks and unset numbers as empty strings.",
    params(("id" = String, Path, description = "Recipe ID")),
    responses(
        (status = 200, description = "Form fields", body = RecipeForm),
        (status = 404, description = "Recipe not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_recipe_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RecipeForm>, AppError> {
    let recipe = find_recipe(&state, &id).await?;
    Ok(Json(RecipeForm::from(&recipe)))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Recipes",
    operation_id = "updateRecipe",
    summary = "Replace a recipe",
    description = "Replaces every editable field of the recipe with the submitted form. \
        Fields left empty are cleared.",
    params(("id" = String, Path, description = "Recipe ID")),
    request_body = RecipeForm,
    responses(
        (status = 200, description = "Recipe updated", body = Recipe),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Recipe not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, form))]
pub async fn update_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(form): AppJson<RecipeForm>,
) -> Result<Json<Recipe>, AppError> {
    let fields = form.to_record()?;
    validate_recipe_fields(&fields)?;

    let recipe = state.recipes.update(&id, fields).await?;
    info!("Updated recipe");

    Ok(Json(recipe))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Recipes",
    operation_id = "deleteRecipe",
    summary = "Delete a recipe",
    description = "Permanently deletes the recipe. Uploaded images are kept.",
    params(("id" = String, Path, description = "Recipe ID")),
    responses(
        (status = 204, description = "Recipe deleted"),
        (status = 404, description = "Recipe not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.recipes.delete(&id).await?;
    info!("Deleted recipe");
    Ok(StatusCode::NO_CONTENT)
}

async fn find_recipe(state: &AppState, id: &str) -> Result<Recipe, AppError> {
    state
        .recipes
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Recipe not found".into()))
}
