#[cfg(feature = "provider-openai")]
pub mod openai;

#[cfg(feature = "provider-groq")]
pub mod groq;

#[cfg(feature = "provider-ollama")]
pub mod ollama;
