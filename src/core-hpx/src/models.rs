//! The catalog of backend processing profiles the user can pick from.
//!
//! Model ids are passed through to the endpoint untouched; the description is
//! only shown client-side under the selector.

/// Model id selected when nothing has been persisted yet.
pub const DEFAULT_MODEL: &str = "nous-hermes";

const CATALOG: &[(&str, &str)] = &[
    (
        "nous-hermes",
        "🧠 Very good at following instructions. Ideal for product descriptions and structured outputs.",
    ),
    ("mistral", "⚡ Fast, general-purpose model. Good for short, responsive tasks."),
    (
        "llama3",
        "🧠🧠 Great for reasoning and modern use cases. Slightly slower but more accurate.",
    ),
    (
        "openhermes",
        "🎨 Balanced summaries with a touch of creativity. Good for SEO/product listings.",
    ),
];

/// Human-readable description of a model. Unknown ids describe as the empty string.
pub fn describe(model_id: &str) -> &'static str {
    CATALOG
        .iter()
        .find(|(id, _)| *id == model_id)
        .map(|(_, description)| *description)
        .unwrap_or("")
}

pub fn is_known(model_id: &str) -> bool {
    CATALOG.iter().any(|(id, _)| *id == model_id)
}
