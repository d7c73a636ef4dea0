pub mod toml_loader;

pub use toml_loader::{load_marker_set, parse_marker_set};
