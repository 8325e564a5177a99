//! Unit tests for the notification context.

mod messenger_tests;
