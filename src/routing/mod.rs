//! Request routing support: URL decomposition and selector matching.

mod path_info;
mod selectors;

pub use path_info::RequestPathInfo;
pub use selectors::{SelectorBinding, SelectorRegistry};
