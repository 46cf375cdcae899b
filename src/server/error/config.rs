use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is not set.
    ///
    /// The application requires this environment variable to be defined. Check the
    /// documentation or `.env.example` file for required configuration variables.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Environment variable is set but its value cannot be used.
    #[error("Invalid value '{value}' for environment variable {name}: {reason}")]
    InvalidEnvVar {
        name: String,
        value: String,
        reason: String,
    },

    /// A role classification pattern failed to compile.
    #[error("Invalid role pattern for category '{category}': {source}")]
    InvalidRolePattern {
        category: String,
        #[source]
        source: regex::Error,
    },

    /// A role rule uses a category name reserved for the classifier's own buckets.
    #[error("Category name '{0}' is reserved")]
    ReservedCategory(String),

    /// An OAuth endpoint or redirect URL is not a valid URL.
    #[error("Invalid URL '{value}': {source}")]
    InvalidUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
}
