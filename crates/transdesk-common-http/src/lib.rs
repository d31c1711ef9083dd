//! HTTP client utilities for Transdesk.
//!
//! A thin JSON client bound to the backend base URL. It carries no business
//! logic: callers get the parsed body or an error describing the transport
//! or status failure.

pub mod client;
pub mod request;
pub mod response;

pub use client::{HttpClient, HttpConfig, HttpError};
pub use request::{headers, RequestBuilder};
pub use response::{parse_json, ResponseError};
