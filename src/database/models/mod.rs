pub mod category;
pub mod drink;
pub mod question;

pub use category::{Category, CategoryDraft, DEFAULT_CATEGORIES};
pub use drink::{Drink, DrinkDraft, Ingredient, ShortDrink, ShortIngredient, DRINK_TITLE_MAX_LEN};
pub use question::{Question, QuestionDraft};
