//! Menu Item Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Menu item ID type
pub type MenuItemId = RecordId;

/// Nutrition facts embedded in a menu item
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NutritionInfo {
    #[serde(default)]
    pub calories: i32,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fat: f64,
}

/// Menu item model matching the catalog store
///
/// `price` is the effective selling price. `discount` is a display
/// percentage clients use to render a struck-through original price;
/// checkout never applies it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<MenuItemId>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub image: String,
    pub category: String,
    #[serde(
        default = "default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_available: bool,
    #[serde(default)]
    pub discount: f64,
    #[serde(default = "default_rating")]
    pub rating: f64,
    #[serde(default)]
    pub review_count: i32,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub nutrition_info: NutritionInfo,
    #[serde(default = "default_preparation_time")]
    pub preparation_time: i32,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_popular: bool,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

fn default_true() -> bool {
    true
}

fn default_rating() -> f64 {
    4.5
}

fn default_preparation_time() -> i32 {
    15
}

/// Create menu item payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemCreate {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub image: Option<String>,
    pub category: String,
    pub is_available: Option<bool>,
    pub discount: Option<f64>,
    pub rating: Option<f64>,
    pub review_count: Option<i32>,
    pub ingredients: Option<Vec<String>>,
    pub nutrition_info: Option<NutritionInfo>,
    pub preparation_time: Option<i32>,
    pub is_popular: Option<bool>,
}

/// Update menu item payload (partial)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub image: Option<String>,
    pub category: Option<String>,
    pub is_available: Option<bool>,
    pub discount: Option<f64>,
    pub rating: Option<f64>,
    pub review_count: Option<i32>,
    pub ingredients: Option<Vec<String>>,
    pub nutrition_info: Option<NutritionInfo>,
    pub preparation_time: Option<i32>,
    pub is_popular: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_fills_catalog_defaults() {
        let item: MenuItem = serde_json::from_str(
            r#"{"name":"Classic Waffle","price":120.0,"category":"classic"}"#,
        )
        .unwrap();
        assert!(item.is_available);
        assert_eq!(item.rating, 4.5);
        assert_eq!(item.preparation_time, 15);
        assert!(!item.is_popular);
        assert_eq!(item.discount, 0.0);
        assert_eq!(item.nutrition_info.calories, 0);
    }

    #[test]
    fn test_null_availability_reads_as_available() {
        let item: MenuItem = serde_json::from_str(
            r#"{"name":"Classic Waffle","price":120.0,"category":"classic","isAvailable":null}"#,
        )
        .unwrap();
        assert!(item.is_available);
    }

    #[test]
    fn test_wire_field_names_are_camel_case() {
        let item: MenuItem = serde_json::from_str(
            r#"{"name":"Nutella Waffle","price":150.0,"category":"chocolate","reviewCount":12,"isPopular":true}"#,
        )
        .unwrap();
        assert_eq!(item.review_count, 12);
        assert!(item.is_popular);

        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("reviewCount").is_some());
        assert!(json.get("preparationTime").is_some());
        assert!(json.get("nutritionInfo").is_some());
    }
}
