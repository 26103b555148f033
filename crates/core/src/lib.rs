//! promptbase: a small web app for keeping reusable prompts
//!
//! Prompts are title/text pairs stored in PostgreSQL. The page lets you:
//! - add prompts through a validated form
//! - search by title and/or text, optionally favorites only
//! - favorite, edit in place and delete prompts
//! - fill `{placeholder}` variables and render the result
//!
//! ## Architecture
//!
//! - **db**: table schema, the filtered listing query and the stores
//! - **commands**: form actions, one statement each
//! - **web**: axum routes and HTML rendering
//! - **template**: placeholder extraction and substitution

// Module declarations
pub mod commands;
pub mod config;
pub mod db;
pub mod errors;
pub mod template;
pub mod util;
pub mod web;
