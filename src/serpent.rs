//! Main module for serpent library functionality
//!
//! Pipeline
//!
//!     source text
//!         -> [`lexing`]   master pattern built from [`config`], tokens + lexical errors
//!         -> [`parsing`]  recursive descent validation, syntax tree or first error
//!
//!     [`analyzer`] runs both stages and keeps lexical errors from reaching the parser.
//!     [`formats`] renders the results.

pub mod analyzer;
pub mod config;
pub mod formats;
pub mod lexing;
pub mod parsing;
pub mod token;
