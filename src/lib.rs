//! # serpent
//!
//! A configurable tokenizer and syntax validator for the Serpent+ teaching language.
//!
//! The language is described by plain text files (token patterns, display names, keywords,
//! builtins and block terminators). A copy of the default definition is embedded, so the
//! library works without any files on disk.
//!
//! ## Quick start
//!
//! ```ignore
//! use serpent::serpent::analyzer::Analyzer;
//! use serpent::serpent::config::LanguageConfig;
//!
//! let analyzer = Analyzer::new(LanguageConfig::embedded())?;
//! let analysis = analyzer.analyze("x = 1\nprint(x)\n")?;
//! ```

pub mod serpent;
