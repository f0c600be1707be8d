use std::sync::Arc;

use crate::auth::AuthGate;
use crate::database::models::{Category, Drink, Question};
use crate::database::Store;

/// Shared state for the trivia service
#[derive(Clone)]
pub struct TriviaState {
    pub questions: Arc<dyn Store<Question>>,
    pub categories: Arc<dyn Store<Category>>,
    pub questions_per_page: usize,
}

/// Shared state for the coffee-shop service
#[derive(Clone)]
pub struct CoffeeState {
    pub drinks: Arc<dyn Store<Drink>>,
    pub gate: Arc<AuthGate>,
}
