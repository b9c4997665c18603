//! GraphQL client.
//!
//! [`GraphqlClient`] posts `{"query": ..., "variables": ...}` documents to
//! `{baseUrl}/graphql` through the shared request pipeline.
//!
//! # Response Structure
//!
//! GraphQL responses contain these fields in the body:
//!
//! - `data`: The query result data
//! - `errors`: Any GraphQL errors (still HTTP 200)

mod client;

pub use client::GraphqlClient;
