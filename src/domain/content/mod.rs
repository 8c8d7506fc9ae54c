pub mod error;
pub mod model;
pub mod prompts;
pub mod service;

pub use error::{ResearchError, ScriptingError};
pub use model::ResearchReport;
pub use prompts::ShowProfile;
pub use service::{ContentService, ContentServiceApi};

/// Focus areas the daily research covers unless configured otherwise
pub fn default_topics() -> Vec<String> {
    [
        "Significant AI breakthroughs",
        "Cutting edge AI technology & models",
        "Market advances, M&A, and business deals",
        "New startups in the AI space",
    ]
    .iter()
    .map(|t| t.to_string())
    .collect()
}
