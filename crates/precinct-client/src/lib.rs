//! Client side of Precinct: the HTTP wrapper, the server-state cache, and
//! the workflows the operator console drives.

pub mod announcements;
pub mod api;
pub mod cache;
pub mod client;
pub mod error;
pub mod workflow;

#[cfg(test)]
mod fake;
#[cfg(test)]
mod tests;

pub use self::{
  api::SocietyApi,
  cache::QueryCache,
  client::{ApiClient, ApiConfig},
  error::{ClientError, WorkflowError},
};
