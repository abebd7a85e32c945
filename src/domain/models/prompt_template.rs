use std::collections::HashMap;

use serde::Serialize;

use crate::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Variable(String),
}

/// A prompt with `{name}` placeholders and an explicit list of the variables
/// it expects.
///
/// The body is parsed once at construction. Placeholders that were not
/// declared are rejected up front, so a misconfigured template fails before
/// anything is sent upstream. `{{` and `}}` produce literal braces; any other
/// brace that does not form a `{identifier}` placeholder is kept as text.
#[derive(Debug, Clone, Serialize)]
pub struct PromptTemplate {
    name: String,
    input_variables: Vec<String>,
    template: String,
    #[serde(skip)]
    segments: Vec<Segment>,
}

impl PromptTemplate {
    pub fn new(
        name: impl Into<String>,
        input_variables: &[&str],
        template: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        let template = template.into();
        let input_variables: Vec<String> = input_variables.iter().map(|v| v.to_string()).collect();
        let segments = parse_segments(&template);

        for segment in &segments {
            if let Segment::Variable(var) = segment {
                if !input_variables.iter().any(|declared| declared == var) {
                    return Err(DomainError::missing_variable(&name, var));
                }
            }
        }

        Ok(Self {
            name,
            input_variables,
            template,
            segments,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn input_variables(&self) -> &[String] {
        &self.input_variables
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Substitute every placeholder in a single pass.
    ///
    /// Values are inserted verbatim and never re-scanned, so text returned by
    /// a model may safely contain braces.
    pub fn render(&self, values: &HashMap<&str, &str>) -> Result<String, DomainError> {
        for var in &self.input_variables {
            if !values.contains_key(var.as_str()) {
                return Err(DomainError::missing_variable(&self.name, var));
            }
        }

        let mut rendered = String::with_capacity(self.template.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => rendered.push_str(text),
                Segment::Variable(var) => {
                    let value = values
                        .get(var.as_str())
                        .ok_or_else(|| DomainError::missing_variable(&self.name, var))?;
                    rendered.push_str(value);
                }
            }
        }

        Ok(rendered)
    }

    /// Shorthand for templates with a single input variable.
    pub fn render_with(&self, variable: &str, value: &str) -> Result<String, DomainError> {
        self.render(&HashMap::from([(variable, value)]))
    }
}

fn parse_segments(template: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut rest = template;

    while let Some(c) = rest.chars().next() {
        if rest.starts_with("{{") {
            literal.push('{');
            rest = &rest[2..];
            continue;
        }
        if rest.starts_with("}}") {
            literal.push('}');
            rest = &rest[2..];
            continue;
        }
        if c == '{' {
            if let Some(end) = rest.find('}') {
                let candidate = &rest[1..end];
                if is_identifier(candidate) {
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Variable(candidate.to_string()));
                    rest = &rest[end + 1..];
                    continue;
                }
            }
        }
        literal.push(c);
        rest = &rest[c.len_utf8()..];
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }

    segments
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_declared_variables() {
        let template = PromptTemplate::new("greeting", &["name"], "Hello, {name}!").unwrap();
        assert_eq!(template.render_with("name", "world").unwrap(), "Hello, world!");
    }

    #[test]
    fn repeated_placeholders_are_all_substituted() {
        let template = PromptTemplate::new("echo", &["x"], "{x} and {x}").unwrap();
        assert_eq!(template.render_with("x", "a").unwrap(), "a and a");
    }

    #[test]
    fn multiple_variables() {
        let template = PromptTemplate::new("pair", &["a", "b"], "{a}-{b}").unwrap();
        let values = HashMap::from([("a", "1"), ("b", "2")]);
        assert_eq!(template.render(&values).unwrap(), "1-2");
    }

    #[test]
    fn undeclared_placeholder_fails_at_construction() {
        let err = PromptTemplate::new("broken", &["topic"], "{topic} {bullets}").unwrap_err();
        match err {
            DomainError::MissingVariable { template, variable } => {
                assert_eq!(template, "broken");
                assert_eq!(variable, "bullets");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_value_fails_at_render() {
        let template = PromptTemplate::new("summary", &["topic"], "Topic: {topic}").unwrap();
        let err = template.render(&HashMap::new()).unwrap_err();
        assert!(matches!(
            err,
            DomainError::MissingVariable { ref variable, .. } if variable == "topic"
        ));
    }

    #[test]
    fn declared_but_unused_variable_is_still_required() {
        let template = PromptTemplate::new("static", &["unused"], "no placeholders").unwrap();
        assert!(template.render(&HashMap::new()).is_err());
        assert_eq!(
            template.render_with("unused", "x").unwrap(),
            "no placeholders"
        );
    }

    #[test]
    fn values_are_not_rescanned() {
        let template = PromptTemplate::new("expand", &["bullets"], "Points:\n{bullets}").unwrap();
        let rendered = template.render_with("bullets", "- use {bullets} braces }}").unwrap();
        assert_eq!(rendered, "Points:\n- use {bullets} braces }}");
    }

    #[test]
    fn doubled_braces_render_literally() {
        let template = PromptTemplate::new("json", &["k"], "{{\"{k}\": 1}}").unwrap();
        assert_eq!(template.render_with("k", "key").unwrap(), "{\"key\": 1}");
    }

    #[test]
    fn non_identifier_braces_are_literal() {
        let template = PromptTemplate::new("odd", &[], "a { b } {1} {").unwrap();
        assert_eq!(template.render(&HashMap::new()).unwrap(), "a { b } {1} {");
    }

    #[test]
    fn keeps_multibyte_text_intact() {
        let template = PromptTemplate::new("uni", &["t"], "→ {t} ✓").unwrap();
        assert_eq!(template.render_with("t", "café").unwrap(), "→ café ✓");
    }
}
