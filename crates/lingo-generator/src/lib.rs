pub mod content;
pub mod extract;
pub mod gemini;
pub mod prompts;
pub mod types;

pub use content::ContentGenerator;
pub use extract::{Extraction, JsonShape};
pub use gemini::GeminiClient;
pub use types::{
    Exercise, FillInBlankExercise, GrammarLesson, LearningContent, MultipleChoiceExercise,
    SentenceEntry, SentenceTranslation, TranslationExercise, VocabularyEntry, WordDetails,
    WordGloss,
};

/// Generative text provider interface
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send a prompt, get the model's text answer back
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub model: String,
    pub requires_api_key: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("API key is missing; set GEMINI_API_KEY")]
    MissingApiKey,

    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Authentication error")]
    AuthenticationError,

    #[error("Model returned no text")]
    EmptyResponse,

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
