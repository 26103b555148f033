//! Form actions
//!
//! Each action validates its input, issues one statement through a
//! [`PromptStore`](crate::db::PromptStore) and reports what happened.
//! The web layer turns the result into a redirect or an error page.

pub mod prompts;
