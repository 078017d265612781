//! Client for the cats REST resource.
//!
//! # Overview
//! `CatsClient` builds `HttpRequest` values and parses `HttpResponse` values
//! without touching the network (host-does-IO pattern). `CatsService` pairs
//! it with a `Transport` to offer async get/all/create/update/delete/search.
//!
//! # Design
//! - `CatsClient` is stateless; it holds only its `ClientConfig`.
//! - Each operation is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit and the mapping is testable without a server.
//! - Any non-2xx response becomes `ApiError::Remote` carrying the server's
//!   message verbatim.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod service;
pub mod transport;
pub mod types;

pub use client::{parse_one, CatsClient};
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use service::CatsService;
pub use transport::{ReqwestTransport, Transport};
pub use types::{Cat, NewCat, SearchQuery};
