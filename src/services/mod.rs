pub mod feedback_normalizer;
pub mod marker_resolver;

pub use feedback_normalizer::FeedbackNormalizer;
pub use marker_resolver::{DetectionTier, MarkerResolver, OptionContext, OptionVerdict};
