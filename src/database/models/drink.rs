use serde::{Deserialize, Serialize};

use crate::database::store::Entity;
use crate::query::Identified;

/// Width of the `drinks.title` column
pub const DRINK_TITLE_MAX_LEN: usize = 80;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub color: String,
    pub name: String,
    pub parts: i32,
}

/// Ingredient without its name, which is proprietary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortIngredient {
    pub color: String,
    pub parts: i32,
}

/// The long representation: full recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drink {
    pub id: i32,
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

/// The public representation shown on the menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortDrink {
    pub id: i32,
    pub title: String,
    pub recipe: Vec<ShortIngredient>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrinkDraft {
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

impl Drink {
    pub fn short(&self) -> ShortDrink {
        ShortDrink {
            id: self.id,
            title: self.title.clone(),
            recipe: self
                .recipe
                .iter()
                .map(|i| ShortIngredient {
                    color: i.color.clone(),
                    parts: i.parts,
                })
                .collect(),
        }
    }
}

impl Entity for Drink {
    type Draft = DrinkDraft;

    const KIND: &'static str = "drink";

    fn from_draft(id: i32, draft: DrinkDraft) -> Self {
        Self {
            id,
            title: draft.title,
            recipe: draft.recipe,
        }
    }

    fn conflicts_with(&self, other: &Self) -> bool {
        self.title == other.title
    }
}

impl Identified for Drink {
    fn id(&self) -> i32 {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_view_hides_ingredient_names() {
        let drink = Drink {
            id: 1,
            title: "matcha shake".to_string(),
            recipe: vec![
                Ingredient { color: "#f7f7f7".to_string(), name: "milk".to_string(), parts: 1 },
                Ingredient { color: "green".to_string(), name: "matcha".to_string(), parts: 3 },
            ],
        };

        let short = serde_json::to_value(drink.short()).unwrap();
        assert_eq!(short["recipe"][1], serde_json::json!({"color": "green", "parts": 3}));
        assert!(short["recipe"][0].get("name").is_none());

        let long = serde_json::to_value(&drink).unwrap();
        assert_eq!(long["recipe"][1]["name"], "matcha");
    }
}
