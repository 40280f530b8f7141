//! Prompt templates with variable support

mod template;
mod tutor;

pub use template::{render_template, Template, TemplateError, TemplateValues};
pub use tutor::{TutorPrompt, TutorPromptContext};
