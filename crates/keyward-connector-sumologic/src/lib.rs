//! # Sumo Logic Connector
//!
//! Syncs users, service accounts, roles and role memberships from the Sumo
//! Logic REST API, and provisions accounts and role assignments back.
//!
//! ## Example
//!
//! ```ignore
//! use keyward_connector::prelude::*;
//! use keyward_connector_sumologic::{
//!     SumoLogicConfig, SumoLogicConnector, SumoLogicCredentials, SumoLogicDeployment,
//! };
//!
//! let config = SumoLogicConfig::builder()
//!     .deployment(SumoLogicDeployment::Eu)
//!     .build()?;
//! let credentials = SumoLogicCredentials::new("access-id", "access-key");
//! let connector = SumoLogicConnector::new(config, &credentials)?;
//!
//! connector.validate().await?;
//! let users = list_all(&connector.users(), None).await?;
//! ```
//!
//! ## Layers
//!
//! - [`transport`] - Authenticated requests, error bodies, rate-limit headers
//! - [`url_builder`] - Path templates and query strings
//! - [`client`] - One method per API operation ([`SumoLogicApi`])
//! - [`mapper`] - API records to resources
//! - [`users`], [`roles`] - Syncers and provisioning

pub mod client;
pub mod config;
pub mod connector;
pub mod error;
pub mod mapper;
pub mod models;
pub mod rate_limit;
pub mod roles;
pub mod transport;
pub mod url_builder;
pub mod users;

#[cfg(test)]
mod mock;

pub use client::{SumoLogicApi, SumoLogicClient};
pub use config::{SumoLogicConfig, SumoLogicConfigBuilder, SumoLogicCredentials, SumoLogicDeployment};
pub use connector::SumoLogicConnector;
pub use error::{SumoLogicError, SumoLogicResult};
pub use mapper::{map_account, map_role, Account, ResourceTypes};
pub use roles::{RoleSyncer, ROLE_ASSIGNMENT_ENTITLEMENT};
pub use transport::{HttpTransport, RateLimited};
pub use users::UserSyncer;
