//! Unit tests for credential validation.
//!
//! Rule order matters: each test pins which single error a candidate
//! surfaces.

mod error_tests;
