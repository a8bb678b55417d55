#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod error;

pub mod extract;
pub mod handler;
pub mod middleware;
pub mod service;

pub use crate::error::{BoxedError, Error, ErrorKind, Result};

/// Tracing target for token and identity verification.
pub const TRACING_TARGET_AUTHENTICATION: &str = "bookmarks_server::authentication";

/// Tracing target for service construction.
pub const TRACING_TARGET_SERVICE: &str = "bookmarks_server::service";
