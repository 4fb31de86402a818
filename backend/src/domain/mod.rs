//! Domain primitives, ports, and services.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers. Keep types immutable and document invariants in each
//! type's Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User / UserId / NewUser / UserExample: the user aggregate.
//! - LoginCredentials / Principal / Role: authentication primitives.
//! - UserService: the use-case service behind the driving ports.

pub mod auth;
pub mod error;
pub mod ports;
pub mod user;
pub mod user_service;

pub use self::auth::{LoginCredentials, LoginValidationError, Principal, Role, UnknownRoleError};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::user::{NewUser, User, UserExample, UserId, UserValidationError};
pub use self::user_service::UserService;
