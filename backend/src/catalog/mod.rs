pub mod items;
pub mod registry;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Name must not be empty")]
    EmptyName,
    #[error("Entry not found")]
    NotFound,
    #[error("Model {0} is already registered")]
    Duplicate(i64),
}
