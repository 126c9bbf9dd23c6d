//! Prompt templates for the AI capability.

use minijinja::{Environment, context};

const CLASSIFICATION_TEMPLATE: &str = r#"Analyze the following text which is potential evidence of online harassment.
Classify the category (threat, doxxing, stalking, hate_speech, defamation, harassment, or unknown).
Determine severity (low, medium, high, critical).
Provide a confidence score (0-1).
Provide a brief 1-sentence summary of why it fits this category.

Text to analyze: "{{ text }}""#;

const SUMMARY_TEMPLATE: &str = r#"You are a forensic analyst summarizing a case of online harassment.
Review the following evidence items and write a cohesive, professional executive summary
(approx 100-150 words) describing the nature of the harassment campaign, the primary types of threats observed,
and the overall severity. Do not use bullet points, write a narrative paragraph.

Evidence:
{% for text in texts -%}
Item {{ loop.index }}: {{ text }}
{% endfor %}"#;

const METADATA_TEMPLATE: &str = r#"You are a forensic analyst. Review the following evidence items and generate a professional Title and a brief Description for a legal dossier.

Evidence:
{% for text in texts -%}
Item {{ loop.index }}: {{ text }}
{% endfor %}"#;

/// Renders the instruction text sent with each capability request.
pub struct PromptRenderer {
    env: Environment<'static>,
}

impl Default for PromptRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptRenderer {
    pub fn new() -> Self {
        Self {
            env: Environment::new(),
        }
    }

    pub fn classification(&self, text: &str) -> Result<String, minijinja::Error> {
        self.env
            .render_str(CLASSIFICATION_TEMPLATE, context! { text => text })
    }

    pub fn summary(&self, texts: &[String]) -> Result<String, minijinja::Error> {
        self.env.render_str(SUMMARY_TEMPLATE, context! { texts => texts })
    }

    pub fn metadata(&self, texts: &[String]) -> Result<String, minijinja::Error> {
        self.env.render_str(METADATA_TEMPLATE, context! { texts => texts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_prompt_embeds_text() {
        let prompt = PromptRenderer::new().classification("I know where you live").unwrap();
        assert!(prompt.contains("Text to analyze: \"I know where you live\""));
        assert!(prompt.contains("hate_speech"));
    }

    #[test]
    fn test_summary_prompt_numbers_items() {
        let texts = vec!["first".to_string(), "second".to_string()];
        let prompt = PromptRenderer::new().summary(&texts).unwrap();
        assert!(prompt.contains("Item 1: first\nItem 2: second"));
    }

    #[test]
    fn test_metadata_prompt_numbers_items() {
        let prompt = PromptRenderer::new().metadata(&["only".to_string()]).unwrap();
        assert!(prompt.contains("Item 1: only"));
        assert!(prompt.contains("legal dossier"));
    }
}
