//! Notification text templates.

use minijinja::Environment;
use serde_json::{Map, Value};
use thiserror::Error;

/// Default title template for call notifications.
pub const DEFAULT_CALL_TITLE_TEMPLATE: &str = "Incoming call from {{ conversation_name }}";

/// Default body for call notifications.
pub const DEFAULT_CALL_BODY: &str = "Incoming call";

/// A notification template failed to render.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to render {field} template: {reason}")]
pub struct TemplateError {
    /// Which part of the notification was being rendered.
    pub field: &'static str,
    /// Renderer diagnostic.
    pub reason: String,
}

/// Title and body templates for call notifications.
///
/// Both are `minijinja` templates rendered with `conversation_name`,
/// `conversation_id`, and `call_initiator_id` in scope.
///
/// # Examples
///
/// ```
/// use flexchat::notification::services::CallTemplates;
///
/// let templates = CallTemplates::default();
/// let (title, body) = templates.render("Team", "c1", "u1").expect("renders");
/// assert_eq!(title, "Incoming call from Team");
/// assert_eq!(body, "Incoming call");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallTemplates {
    title: String,
    body: String,
}

impl Default for CallTemplates {
    fn default() -> Self {
        Self::new(DEFAULT_CALL_TITLE_TEMPLATE, DEFAULT_CALL_BODY)
    }
}

impl CallTemplates {
    /// Creates templates from their sources.
    #[must_use]
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Renders the call title and body.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] when either template is malformed.
    pub fn render(
        &self,
        conversation_name: &str,
        conversation_id: &str,
        call_initiator_id: &str,
    ) -> Result<(String, String), TemplateError> {
        let environment = Environment::new();
        let context = build_context(conversation_name, conversation_id, call_initiator_id);
        let render = |field: &'static str, source: &str| {
            environment
                .render_str(source, &context)
                .map_err(|error| TemplateError {
                    field,
                    reason: error.to_string(),
                })
        };
        Ok((render("title", &self.title)?, render("body", &self.body)?))
    }
}

fn build_context(
    conversation_name: &str,
    conversation_id: &str,
    call_initiator_id: &str,
) -> Map<String, Value> {
    let mut context = Map::new();
    context.insert(
        "conversation_name".to_owned(),
        Value::String(conversation_name.to_owned()),
    );
    context.insert(
        "conversation_id".to_owned(),
        Value::String(conversation_id.to_owned()),
    );
    context.insert(
        "call_initiator_id".to_owned(),
        Value::String(call_initiator_id.to_owned()),
    );
    context
}
