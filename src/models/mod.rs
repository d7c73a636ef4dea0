pub mod document;
pub mod format;
pub mod loaders;
pub mod markers;

pub use document::{AnswerOption, DocumentModel, QuestionRecord, DEFAULT_TITLE};
pub use format::OutputFormat;
pub use loaders::{load_marker_set, parse_marker_set};
pub use markers::MarkerSet;
