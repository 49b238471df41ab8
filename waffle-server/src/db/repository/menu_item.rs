//! Menu Item Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct MenuItemRepository {
    base: BaseRepository,
}

impl MenuItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find the whole catalog, unavailable items included
    pub async fn find_all(&self) -> RepoResult<Vec<MenuItem>> {
        let items: Vec<MenuItem> = self
            .base
            .db()
            .query("SELECT * FROM menu_item ORDER BY category, name")
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Find menu item by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<MenuItem>> {
        let thing = super::parse_scoped_id("menu_item", id)?;
        let item: Option<MenuItem> = self.base.db().select(thing).await?;
        Ok(item)
    }

    /// Find several items at once (checkout repricing)
    pub async fn find_many(&self, ids: Vec<RecordId>) -> RepoResult<Vec<MenuItem>> {
        let items: Vec<MenuItem> = self
            .base
            .db()
            .query("SELECT * FROM menu_item WHERE id IN $ids")
            .bind(("ids", ids))
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Create a new menu item
    pub async fn create(&self, data: MenuItemCreate) -> RepoResult<MenuItem> {
        let now = chrono::Utc::now().timestamp_millis();

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE menu_item SET
                    name = $name,
                    description = $description,
                    price = $price,
                    image = $image,
                    category = $category,
                    isAvailable = $is_available,
                    discount = $discount,
                    rating = $rating,
                    reviewCount = $review_count,
                    ingredients = $ingredients,
                    nutritionInfo = $nutrition_info,
                    preparationTime = $preparation_time,
                    isPopular = $is_popular,
                    createdAt = $now,
                    updatedAt = $now
                RETURN AFTER"#,
            )
            .bind(("name", data.name))
            .bind(("description", data.description.unwrap_or_default()))
            .bind(("price", data.price))
            .bind(("image", data.image.unwrap_or_default()))
            .bind(("category", data.category))
            .bind(("is_available", data.is_available.unwrap_or(true)))
            .bind(("discount", data.discount.unwrap_or(0.0)))
            .bind(("rating", data.rating.unwrap_or(4.5)))
            .bind(("review_count", data.review_count.unwrap_or(0)))
            .bind(("ingredients", data.ingredients.unwrap_or_default()))
            .bind(("nutrition_info", data.nutrition_info.unwrap_or_default()))
            .bind(("preparation_time", data.preparation_time.unwrap_or(15)))
            .bind(("is_popular", data.is_popular.unwrap_or(false)))
            .bind(("now", now))
            .await?;

        let created: Option<MenuItem> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create menu item".to_string()))
    }

    /// Update a menu item (partial)
    pub async fn update(&self, id: &str, data: MenuItemUpdate) -> RepoResult<MenuItem> {
        let thing = super::parse_scoped_id("menu_item", id)?;

        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    name = $name OR name,
                    description = IF $has_description THEN $description ELSE description END,
                    price = IF $has_price THEN $price ELSE price END,
                    image = IF $has_image THEN $image ELSE image END,
                    category = $category OR category,
                    isAvailable = IF $has_is_available THEN $is_available ELSE isAvailable END,
                    discount = IF $has_discount THEN $discount ELSE discount END,
                    rating = IF $has_rating THEN $rating ELSE rating END,
                    reviewCount = IF $has_review_count THEN $review_count ELSE reviewCount END,
                    ingredients = IF $has_ingredients THEN $ingredients ELSE ingredients END,
                    nutritionInfo = IF $has_nutrition_info THEN $nutrition_info ELSE nutritionInfo END,
                    preparationTime = IF $has_preparation_time THEN $preparation_time ELSE preparationTime END,
                    isPopular = IF $has_is_popular THEN $is_popular ELSE isPopular END,
                    updatedAt = $now
                RETURN AFTER"#,
            )
            .bind(("thing", thing))
            .bind(("now", chrono::Utc::now().timestamp_millis()))
            .bind(("name", data.name))
            .bind(("has_description", data.description.is_some()))
            .bind(("description", data.description))
            .bind(("has_price", data.price.is_some()))
            .bind(("price", data.price))
            .bind(("has_image", data.image.is_some()))
            .bind(("image", data.image))
            .bind(("category", data.category))
            .bind(("has_is_available", data.is_available.is_some()))
            .bind(("is_available", data.is_available))
            .bind(("has_discount", data.discount.is_some()))
            .bind(("discount", data.discount))
            .bind(("has_rating", data.rating.is_some()))
            .bind(("rating", data.rating))
            .bind(("has_review_count", data.review_count.is_some()))
            .bind(("review_count", data.review_count))
            .bind(("has_ingredients", data.ingredients.is_some()))
            .bind(("ingredients", data.ingredients))
            .bind(("has_nutrition_info", data.nutrition_info.is_some()))
            .bind(("nutrition_info", data.nutrition_info))
            .bind(("has_preparation_time", data.preparation_time.is_some()))
            .bind(("preparation_time", data.preparation_time))
            .bind(("has_is_popular", data.is_popular.is_some()))
            .bind(("is_popular", data.is_popular))
            .await?;

        result
            .take::<Option<MenuItem>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))
    }

    /// Hard delete a menu item
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing = super::parse_scoped_id("menu_item", id)?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))?;

        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }
}
