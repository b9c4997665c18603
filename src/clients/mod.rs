//! Clients and the request pipeline they share.
//!
//! # Overview
//!
//! - [`JsonApiClient`]: The JSON:API resource client
//! - [`RouterClient`]: Path translation
//! - [`GraphqlClient`]: GraphQL queries
//! - [`ApiClient`]: The pipeline every client composes: credentials,
//!   cache, serializer and logging around a [`Transport`]
//! - [`HttpRequest`] / [`HttpResponse`]: What a transport sends and returns
//! - [`ApiResponse`]: A parsed body, or a raw response paired with it
//! - [`RequestOptions`]: Per-call options
//! - [`ClientError`]: The error every operation returns
//!
//! # Request Flow
//!
//! Read operations run the same sequence: validate the resource type,
//! resolve the locale, derive the cache key, consult the cache, build the
//! URL, send through the transport, parse, deserialize, then store the result
//! when the status is below 400.
//!
//! # Example
//!
//! ```rust,ignore
//! use drupal_api_client::{ClientConfig, JsonApiClient};
//! use drupal_api_client::clients::RequestOptions;
//!
//! let client = JsonApiClient::new(&ClientConfig::new("https://cms.example.com")?);
//!
//! let response = client
//!     .get_collection("node--recipe", Some(RequestOptions::new().raw_response(true)))
//!     .await?;
//!
//! let raw = response.response().unwrap();
//! assert_eq!(raw.status, 200);
//! assert_eq!(&raw.json()?, response.json());
//! ```

mod errors;
pub mod graphql;
mod http_client;
mod http_request;
mod http_response;
pub mod json_api;
mod request_options;
pub mod router;

pub use errors::{ClientError, InvalidHttpRequestError, TransportError, UNKNOWN_ERROR_MESSAGE};
pub use http_client::{ApiClient, FetchResult, ReqwestTransport, Transport, SDK_VERSION};
pub use http_request::{Credentials, DataType, HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::{ApiResponse, HttpResponse};
pub use request_options::RequestOptions;

pub use graphql::GraphqlClient;
pub use json_api::JsonApiClient;
pub use router::RouterClient;
