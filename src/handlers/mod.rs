// Route handlers, one module per service.
//
// Handlers receive an already-fetched collection from the store, hand it to
// the query layer, and wrap the result with `ApiResponse`. Errors bubble up
// as `ApiError` through `?`.
pub mod coffee;
pub mod health;
pub mod trivia;
pub mod utils;
