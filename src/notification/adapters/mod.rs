//! Push-messaging adapters.

mod fcm;
mod logging;
mod recording;

pub use fcm::{DEFAULT_FCM_ENDPOINT, DEFAULT_TOKEN_URI, FcmError, FcmPushMessenger, ServiceAccount};
pub use logging::LoggingPushMessenger;
pub use recording::RecordingPushMessenger;
