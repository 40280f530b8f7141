//! Text templates used for tutor prompts and suggestion questions
//!
//! Supports variable syntax: `${var:variable-name:default-value}`
//! - `${var:name}` - Required variable, error if not provided
//! - `${var:name:default}` - Optional variable with default value

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use thiserror::Error;

static VARIABLE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\{var:([a-zA-Z0-9][-_a-zA-Z0-9]*)(?::([^}]*))?\}")
        .expect("template variable pattern is valid")
});

/// Template processing errors
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TemplateError {
    #[error("Missing required variable: {name}")]
    MissingVariable { name: String },
}

/// Variable values keyed by name
pub type TemplateValues = HashMap<&'static str, String>;

/// A parsed text template
#[derive(Debug, Clone)]
pub struct Template {
    content: String,
    required: Vec<String>,
}

impl Template {
    pub fn parse(content: impl Into<String>) -> Self {
        let content = content.into();
        let mut required = Vec::new();

        for cap in VARIABLE_PATTERN.captures_iter(&content) {
            let name = cap[1].to_string();

            if cap.get(2).is_none() && !required.contains(&name) {
                required.push(name);
            }
        }

        Self { content, required }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Names of variables without a default value
    pub fn required_variables(&self) -> &[String] {
        &self.required
    }

    pub fn render(&self, values: &TemplateValues) -> Result<String, TemplateError> {
        if let Some(missing) = self
            .required
            .iter()
            .find(|name| !values.contains_key(name.as_str()))
        {
            return Err(TemplateError::MissingVariable {
                name: missing.clone(),
            });
        }

        let rendered = VARIABLE_PATTERN.replace_all(&self.content, |cap: &Captures| {
            values
                .get(&cap[1])
                .cloned()
                .or_else(|| cap.get(2).map(|m| m.as_str().to_string()))
                .unwrap_or_default()
        });

        Ok(rendered.into_owned())
    }
}

/// Render a template string directly
pub fn render_template(template: &str, values: &TemplateValues) -> Result<String, TemplateError> {
    Template::parse(template).render(values)
}
