use super::types::GuideContext;
use handlebars::Handlebars;
use std::path::Path;
use thiserror::Error;
use tokio::fs;

#[derive(Error, Debug)]
pub enum GuideError {
    #[error("Guide template not found: {0}")]
    TemplateNotFound(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Template error: {0}")]
    TemplateError(#[from] handlebars::TemplateError),

    #[error("Render error: {0}")]
    RenderError(#[from] handlebars::RenderError),
}

const GUIDE_TEMPLATE_NAME: &str = "guide";

/// Built-in guide shown next to the student picker
pub const DEFAULT_GUIDE_TEMPLATE: &str = r#"## Preparing {{sheetName}}

- The spreadsheet may have a header row or none at all.
- Without a header: **column A = student**, **column B = file or link**.
- With a header, name the student column one of:{{#each studentAliases}} `{{this}}`{{/each}}
- and the file column one of:{{#each fileAliases}} `{{this}}`{{/each}}
- Column B may hold:
  - the **name of a file** inside `{{documentsDir}}/` (e.g. `Joao_Silva.pdf`);
  - a **URL** (Google Drive, OneDrive, ...).
- For **several documents** per student, repeat the row or separate them in
  column B with a **comma**, **semicolon** or **pipe** (`|`).
"#;

pub struct GuideEngine {
    handlebars: Handlebars<'static>,
}

impl GuideEngine {
    /// Engine with the built-in guide
    pub fn new() -> Result<Self, GuideError> {
        Self::with_template(DEFAULT_GUIDE_TEMPLATE)
    }

    /// Engine with a custom guide template
    pub fn with_template(template: &str) -> Result<Self, GuideError> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.register_template_string(GUIDE_TEMPLATE_NAME, template)?;
        Ok(Self { handlebars })
    }

    /// Load a custom guide from disk
    pub async fn from_file(path: &Path) -> Result<Self, GuideError> {
        if !path.exists() {
            return Err(GuideError::TemplateNotFound(path.display().to_string()));
        }
        let template = fs::read_to_string(path).await?;
        Self::with_template(&template)
    }

    pub fn render(&self, context: &GuideContext) -> Result<String, GuideError> {
        Ok(self.handlebars.render(GUIDE_TEMPLATE_NAME, context)?)
    }
}
