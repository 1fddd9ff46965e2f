// 🥕 Food Catalog - preset + custom food names with case-insensitive identity
//
// "Apple" and "apple" are the same food. The lowercased name is the identity,
// the first-inserted casing is what gets displayed. Presets never change,
// customs only grow.

use std::collections::HashMap;

/// Built-in foods every tracker starts with.
pub const DEFAULT_FOODS: [&str; 35] = [
    "Apple",
    "Banana",
    "Orange",
    "Strawberry",
    "Blueberry",
    "Spinach",
    "Kale",
    "Carrot",
    "Broccoli",
    "Cucumber",
    "Tomato",
    "Bell Pepper",
    "Cauliflower",
    "Sweet Potato",
    "Peas",
    "Asparagus",
    "Zucchini",
    "Mango",
    "Pineapple",
    "Grapes",
    "Brussels Sprouts",
    "Green Beans",
    "Celery",
    "Radish",
    "Mushroom",
    "Lettuce",
    "Beet",
    "Cabbage",
    "Eggplant",
    "Avocado",
    "Watermelon",
    "Pear",
    "Plum",
    "Pomegranate",
    "Artichoke",
];

/// Identity key for a food name (Unicode lowercasing).
///
/// Example: "Bell Pepper" → "bell pepper"
pub fn food_key(name: &str) -> String {
    name.to_lowercase()
}

// ============================================================================
// FOOD CATALOG
// ============================================================================

/// All known foods: the preset list plus user-added customs.
///
/// Invariants:
/// - no two entries share a `food_key`
/// - `sorted()` is ascending by key, stable
/// - customs keep their insertion order (that order is what gets persisted)
#[derive(Debug, Clone)]
pub struct FoodCatalog {
    /// Every known food, kept sorted case-insensitively.
    names: Vec<String>,

    /// User-added foods, insertion order.
    customs: Vec<String>,

    /// Lowercased key → catalog spelling.
    by_key: HashMap<String, String>,
}

impl FoodCatalog {
    /// Catalog pre-loaded with the built-in foods.
    pub fn with_defaults() -> Self {
        let mut catalog = FoodCatalog {
            names: Vec::new(),
            customs: Vec::new(),
            by_key: HashMap::new(),
        };

        for food in DEFAULT_FOODS {
            catalog.insert_name(food.to_string());
        }

        catalog
    }

    /// Rebuild a catalog from persisted custom foods.
    ///
    /// Entries colliding with a preset (or with each other) are skipped:
    /// identity is case-insensitive and the first spelling wins.
    pub fn from_customs(customs: Vec<String>) -> Self {
        let mut catalog = Self::with_defaults();

        for food in customs {
            catalog.insert_custom(food);
        }

        catalog
    }

    /// Insert into the sorted name list + key map. False on a key collision.
    fn insert_name(&mut self, name: String) -> bool {
        let key = food_key(&name);
        if self.by_key.contains_key(&key) {
            return false;
        }

        self.by_key.insert(key, name.clone());
        self.names.push(name);
        self.names.sort_by(|a, b| food_key(a).cmp(&food_key(b)));
        true
    }

    /// Add a user food. Trims the name; blank or already-known names are
    /// refused. Returns true if the catalog grew.
    pub fn insert_custom(&mut self, name: String) -> bool {
        let name = name.trim().to_string();
        if name.is_empty() {
            return false;
        }

        if self.insert_name(name.clone()) {
            self.customs.push(name);
            true
        } else {
            false
        }
    }

    /// Case-insensitive lookup returning the catalog spelling.
    ///
    /// Example: resolve(" apple ") → Some("Apple")
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.by_key.get(&food_key(name.trim())).map(|s| s.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    /// All foods in display order (ascending, case-insensitive).
    pub fn sorted(&self) -> &[String] {
        &self.names
    }

    /// User-added foods in insertion order.
    pub fn customs(&self) -> &[String] {
        &self.customs
    }

    pub fn custom_count(&self) -> usize {
        self.customs.len()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for FoodCatalog {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ============================================================================
// TESTS
// ============================================================================
