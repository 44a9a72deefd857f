//! CLI command implementations.

pub mod categories;
pub mod filter;
pub mod list;
pub mod show;

pub use categories::CategoriesCommand;
pub use filter::{FilterAction, FilterCommand};
pub use list::{ListCommand, ListOverrides};
pub use show::ShowCommand;
