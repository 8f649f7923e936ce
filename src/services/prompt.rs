use tera::{Context, Tera};

use crate::error::AppError;

const TEMPLATE_NAME: &str = "journal_prompt";

/// Built-in analysis prompt. The entry is inserted verbatim between triple quotes.
pub const DEFAULT_TEMPLATE: &str = r#"
You are an emotional wellness expert and motivational coach.
Analyze the following journal entry:
"""{{ entry }}"""  
Tasks:
1. Detect the emotional tone (e.g., happy, anxious, stressed, calm, etc.).
2. Identify any recurring themes or emotional patterns.
3. Suggest motivational advice personalized to the tone and themes.
Format your response in a clear and structured way.
"#;

/// Renders the analysis prompt for a journal entry.
///
/// The template is compiled once at construction, so a broken custom template is
/// reported at startup rather than on the first submission.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    tera: Tera,
}

impl PromptBuilder {
    pub fn new(template: Option<&str>) -> Result<Self, AppError> {
        let mut tera = Tera::default();
        // no html suffix on the name, so no autoescaping of the entry
        tera.add_raw_template(TEMPLATE_NAME, template.unwrap_or(DEFAULT_TEMPLATE))?;
        Ok(Self { tera })
    }

    pub fn build(&self, entry: &str) -> Result<String, tera::Error> {
        let mut ctx = Context::new();
        ctx.insert("entry", entry);
        self.tera.render(TEMPLATE_NAME, &ctx)
    }
}
