pub mod delete;
pub mod list;
pub mod new;
pub mod regenerate;
pub mod show;
pub mod trash;
