//! Application services for the notification context.

pub mod dispatcher;
pub mod templates;

pub use dispatcher::{DispatchError, DispatchResult, NotificationDispatcher};
pub use templates::{CallTemplates, DEFAULT_CALL_BODY, DEFAULT_CALL_TITLE_TEMPLATE, TemplateError};
