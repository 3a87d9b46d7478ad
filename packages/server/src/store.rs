use async_trait::async_trait;
use chrono::Utc;
use common::{Recipe, RecipeFields, RecipeStore, StoreError};
use sea_orm::*;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::entity::recipe;

/// [`RecipeStore`] backed by the `recipe` table.
#[derive(Clone)]
pub struct DbRecipeStore {
    db: DatabaseConnection,
}

impl DbRecipeStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RecipeStore for DbRecipeStore {
    #[instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<Recipe>, StoreError> {
        let models = recipe::Entity::find()
            .order_by_desc(recipe::Column::CreatedAt)
            .order_by_desc(recipe::Column::Id)
            .all(&self.db)
            .await
            .map_err(backend)?;
        debug!(count = models.len(), "fetched recipes");
        models.into_iter().map(model_to_recipe).collect()
    }

    #[instrument(skip(self))]
    async fn get(&self, id: &str) -> Result<Option<Recipe>, StoreError> {
        let Some(uuid) = parse_id(id) else {
            return Ok(None);
        };
        recipe::Entity::find_by_id(uuid)
            .one(&self.db)
            .await
            .map_err(backend)?
            .map(model_to_recipe)
            .transpose()
    }

    #[instrument(skip(self, fields), fields(title = %fields.title))]
    async fn insert(&self, fields: RecipeFields) -> Result<Recipe, StoreError> {
        let now = Utc::now();
        let mut active = recipe::ActiveModel {
            id: Set(Uuid::now_v7()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        apply_fields(&mut active, fields)?;

        let model = active.insert(&self.db).await.map_err(backend)?;
        model_to_recipe(model)
    }

    #[instrument(skip(self, fields))]
    async fn update(&self, id: &str, fields: RecipeFields) -> Result<Recipe, StoreError> {
        let uuid = parse_id(id).ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let txn = self.db.begin().await.map_err(backend)?;

        let existing = recipe::Entity::find_by_id(uuid)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(backend)?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let mut active: recipe::ActiveModel = existing.into();
        apply_fields(&mut active, fields)?;
        active.updated_at = Set(Utc::now());

        let model = active.update(&txn).await.map_err(backend)?;
        txn.commit().await.map_err(backend)?;

        model_to_recipe(model)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let uuid = parse_id(id).ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let result = recipe::Entity::delete_by_id(uuid)
            .exec(&self.db)
            .await
            .map_err(backend)?;
        if result.rows_affected == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

/// Ids that are not UUIDs cannot name a stored recipe.
fn parse_id(id: &str) -> Option<Uuid> {
    Uuid::parse_str(id).ok()
}

fn backend(err: DbErr) -> StoreError {
    StoreError::Backend(err.to_string())
}

/// Overwrite every mutable column of `active` with `fields`.
fn apply_fields(active: &mut recipe::ActiveModel, fields: RecipeFields) -> Result<(), StoreError> {
    active.title = Set(fields.title);
    active.description = Set(fields.description);
    active.ingredients = Set(serde_json::Value::from(fields.ingredients));
    active.instructions = Set(serde_json::Value::from(fields.instructions));
    active.prep_time = Set(to_column("prep_time", fields.prep_time)?);
    active.cook_time = Set(to_column("cook_time", fields.cook_time)?);
    active.servings = Set(to_column("servings", fields.servings)?);
    active.price = Set(fields.price);
    active.image_url = Set(fields.image_url);
    Ok(())
}

fn to_column(name: &str, value: Option<u32>) -> Result<Option<i32>, StoreError> {
    value
        .map(|v| {
            i32::try_from(v)
                .map_err(|_| StoreError::Backend(format!("{name} out of range for storage: {v}")))
        })
        .transpose()
}

fn from_column(name: &str, value: Option<i32>) -> Result<Option<u32>, StoreError> {
    value
        .map(|v| {
            u32::try_from(v).map_err(|_| StoreError::Backend(format!("stored {name} is negative: {v}")))
        })
        .transpose()
}

fn lines_from_json(name: &str, value: serde_json::Value) -> Result<Vec<String>, StoreError> {
    serde_json::from_value(value)
        .map_err(|e| StoreError::Backend(format!("stored {name} is not a list of strings: {e}")))
}

fn model_to_recipe(m: recipe::Model) -> Result<Recipe, StoreError> {
    Ok(Recipe {
        id: m.id.to_string(),
        title: m.title,
        description: m.description,
        ingredients: lines_from_json("ingredients", m.ingredients)?,
        instructions: lines_from_json("instructions", m.instructions)?,
        prep_time: from_column("prep_time", m.prep_time)?,
        cook_time: from_column("cook_time", m.cook_time)?,
        servings: from_column("servings", m.servings)?,
        price: m.price,
        image_url: m.image_url,
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}
