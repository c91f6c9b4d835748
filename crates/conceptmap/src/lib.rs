//! Conceptmap - concept maps of a book, assembled section by section.
//!
//! Each section of the book has its own concept graph. Loading a section
//! falls back to the default section and then to a built-in graph, so a
//! caller always gets something to show. Concepts that a section's links
//! point at in other sections are brought in as placeholder nodes with
//! bridging edges.
//!
//! The crate provides both a CLI application and a library.

#![forbid(unsafe_code)]

// Public modules for library usage
pub mod domain;
pub mod error;
pub mod warning;

pub mod fallback;
pub mod source;

pub mod assembler;
pub mod link_cache;
pub mod linker;
pub mod loader;

pub mod merge;
pub mod render;
pub mod sections;
pub mod style;

pub mod app;
pub mod config;
pub mod session;

// Public CLI module (needed by binary)
pub mod cli;

// Command implementations
pub mod commands;

pub mod output;
