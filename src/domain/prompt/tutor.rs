//! System and user prompts for grade-aware answers

use std::collections::BTreeSet;

use once_cell::sync::Lazy;

use super::template::{Template, TemplateError, TemplateValues};
use crate::domain::curriculum::{Board, GradeLevel, Language};

static SYSTEM_TEMPLATE: Lazy<Template> = Lazy::new(|| {
    Template::parse(
        "You are an expert educator for grade ${var:grade} ${var:board} board students.

GRADE APPROPRIATENESS RULES:
1. You are teaching a Grade ${var:grade} student
2. If the content seems too advanced for Grade ${var:grade}, simplify it significantly or mention it will be covered in higher grades
3. Never provide content that is clearly meant for much higher grades
4. Always match the cognitive development level of a Grade ${var:grade} student

BOARD-SPECIFIC APPROACH:
${var:board_style}
${var:board_focus}

GRADE-APPROPRIATE LANGUAGE:
${var:grade_guidance}

CONTENT CONTEXT:
Available methods in the content: ${var:methods}
Content types available: ${var:content_types}
${var:exclusions}
INSTRUCTIONS:
1. Base your response ONLY on the provided context
2. Use methods and approaches that match the student's grade ${var:grade} and board ${var:board}
3. If asked about methods not appropriate for Grade ${var:grade}, mention they'll learn it in higher grades
4. Maintain consistency with the ${var:board} board's teaching methodology for Grade ${var:grade}
5. If content is in ${var:language}, respond accordingly
6. NEVER provide advanced formulas or concepts inappropriate for Grade ${var:grade}
7. If the question is about advanced topics, acknowledge their curiosity but redirect to grade-appropriate content

Context (filtered for Grade ${var:grade}):
${var:context}
",
    )
});

static USER_TEMPLATE: Lazy<Template> = Lazy::new(|| {
    Template::parse(
        "Student Question: ${var:question}

Please provide an answer appropriate for Grade ${var:grade} ${var:board} board. Remember, this student is in Grade ${var:grade}, so keep your explanation suitable for their level.",
    )
});

/// Teaching style for a board; unknown boards are taught CBSE style
fn board_instructions(board: &Board) -> (&'static str, &'static str) {
    match board {
        Board::Icse => (
            "Provide comprehensive explanations with multiple approaches.",
            "Include detailed reasoning and encourage analytical thinking.",
        ),
        Board::Ssc => (
            "Use simple, direct explanations with local context where applicable.",
            "Focus on practical understanding and textbook methods.",
        ),
        Board::Cbse | Board::Other(_) => (
            "Follow NCERT pattern with clear explanations and step-by-step solutions.",
            "Emphasize conceptual understanding and exam preparation.",
        ),
    }
}

fn grade_guidance(level: GradeLevel) -> &'static str {
    match level {
        GradeLevel::Elementary => {
            "Use very simple language appropriate for young children (ages 8-11).
- Use short sentences and familiar words
- Include fun examples and analogies
- Avoid complex mathematical terminology
- Make it engaging and easy to understand
- If a concept is too advanced, gently redirect to age-appropriate topics"
        }
        GradeLevel::MiddleSchool => {
            "Use clear explanations appropriate for middle school students (ages 11-14).
- Use proper academic terminology but explain it clearly
- Include step-by-step explanations
- Provide relatable examples
- Build concepts gradually"
        }
        GradeLevel::HighSchool => {
            "Use subject-appropriate terminology with detailed explanations for high school students.
- Include proper mathematical/scientific notation
- Provide comprehensive explanations
- Include advanced concepts where appropriate
- Prepare for board exams"
        }
    }
}

/// Everything the tutor prompt is built from
#[derive(Debug, Clone, Default)]
pub struct TutorPromptContext {
    pub grade: u32,
    pub board: Option<Board>,
    pub language: Language,
    pub method_tags: BTreeSet<String>,
    pub content_types: BTreeSet<String>,
    pub exclude_methods: Vec<String>,
    /// Retrieved chunk text, already joined
    pub context: String,
}

/// Rendered prompt pair
#[derive(Debug, Clone, PartialEq)]
pub struct TutorPrompt {
    pub system: String,
    pub user: String,
}

impl TutorPrompt {
    pub fn build(question: &str, ctx: &TutorPromptContext) -> Result<Self, TemplateError> {
        let board = ctx.board.clone().unwrap_or(Board::Cbse);
        let (style, focus) = board_instructions(&board);

        let methods = if ctx.method_tags.is_empty() {
            "general explanation".to_string()
        } else {
            join(&ctx.method_tags)
        };
        let content_types = if ctx.content_types.is_empty() {
            "general".to_string()
        } else {
            join(&ctx.content_types)
        };
        let exclusions = if ctx.exclude_methods.is_empty() {
            String::new()
        } else {
            format!(
                "Do not use these methods: {}\n",
                ctx.exclude_methods.join(", ")
            )
        };

        let mut values = TemplateValues::new();
        values.insert("grade", ctx.grade.to_string());
        values.insert("board", board.as_str().to_string());
        values.insert("board_style", style.to_string());
        values.insert("board_focus", focus.to_string());
        values.insert(
            "grade_guidance",
            grade_guidance(GradeLevel::from_grade(ctx.grade)).to_string(),
        );
        values.insert("methods", methods);
        values.insert("content_types", content_types);
        values.insert("exclusions", exclusions);
        values.insert("language", ctx.language.as_str().to_string());
        values.insert("context", ctx.context.clone());

        let system = SYSTEM_TEMPLATE.render(&values)?;

        values.insert("question", question.to_string());
        let user = USER_TEMPLATE.render(&values)?;

        Ok(Self { system, user })
    }
}

fn join(items: &BTreeSet<String>) -> String {
    items.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}
