//! HTTP and SSE boundary for the A2UI component service.
#![allow(missing_docs)]

pub mod demo;
pub mod http;
pub mod service;
pub mod sse;
