//! Section Classifier Implementations

mod openai;

pub use openai::OpenAiSectionClassifier;
