pub mod use_cases;

pub use use_cases::metrics::MetricsCalculator;
pub use use_cases::normalizer::Normalizer;
pub use use_cases::session::DatasetSession;
