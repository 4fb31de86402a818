//! User registry service: role-gated CRUD over user records.
//!
//! Layout follows a hexagonal split: [`domain`] holds types, ports and the
//! user service; [`inbound`] adapts HTTP onto the driving ports; [`outbound`]
//! implements the driven ports; [`server`] wires everything together.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
