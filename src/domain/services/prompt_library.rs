use crate::domain::{DomainError, PromptTemplate, Stage};

pub const TOPIC_VAR: &str = "topic";
pub const BULLETS_VAR: &str = "bullets";
pub const EXPANDED_VAR: &str = "expanded_blog";

const SUMMARY_TEMPLATE: &str = "
You are a writer tasked with summarizing a topic into 3 clear and concise bullet points.
Topic: {topic}
";

const EXPAND_TEMPLATE: &str = "
Expand the following bullet points into detailed paragraphs for a blog post:
{bullets}
";

const FINAL_OUTPUT_TEMPLATE: &str = "
You are a professional blog writer. Using the following expanded paragraphs, craft a complete and engaging blog post.

- Write a catchy introduction that introduces the topic and grabs the reader's attention.
- Use the expanded paragraphs as the main body of the blog post. Organize them logically.
- Conclude the blog post with a compelling summary and call-to-action if relevant.

Expanded paragraphs:
{expanded_blog}

Now, write the full blog post:
";

const BACKGROUND_TEMPLATE: &str =
    "A soft, abstract, decorative background illustration evoking the theme: {topic}. No text.";

/// The prompt templates driving each stage, validated once at construction.
#[derive(Debug, Clone)]
pub struct PromptLibrary {
    summary: PromptTemplate,
    expand: PromptTemplate,
    final_output: PromptTemplate,
    background: PromptTemplate,
}

impl PromptLibrary {
    pub fn new() -> Result<Self, DomainError> {
        Ok(Self {
            summary: PromptTemplate::new("summary", &[TOPIC_VAR], SUMMARY_TEMPLATE)?,
            expand: PromptTemplate::new("expand", &[BULLETS_VAR], EXPAND_TEMPLATE)?,
            final_output: PromptTemplate::new(
                "final_output",
                &[EXPANDED_VAR],
                FINAL_OUTPUT_TEMPLATE,
            )?,
            background: PromptTemplate::new("background", &[TOPIC_VAR], BACKGROUND_TEMPLATE)?,
        })
    }

    pub fn template(&self, stage: Stage) -> &PromptTemplate {
        match stage {
            Stage::Summarize => &self.summary,
            Stage::Expand => &self.expand,
            Stage::Assemble => &self.final_output,
            Stage::Background => &self.background,
        }
    }

    /// Name of the single variable each stage's template consumes.
    pub fn input_variable(stage: Stage) -> &'static str {
        match stage {
            Stage::Summarize | Stage::Background => TOPIC_VAR,
            Stage::Expand => BULLETS_VAR,
            Stage::Assemble => EXPANDED_VAR,
        }
    }

    /// Render the prompt for `stage` from its one input.
    pub fn render(&self, stage: Stage, input: &str) -> Result<String, DomainError> {
        self.template(stage)
            .render_with(Self::input_variable(stage), input)
    }

    pub fn all(&self) -> [&PromptTemplate; 4] {
        [&self.summary, &self.expand, &self.final_output, &self.background]
    }
}
