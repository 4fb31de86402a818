//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Wraps the Actix session so handlers deal only in principals and roles.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, Principal, Role};

pub(crate) const USERNAME_KEY: &str = "username";
pub(crate) const ROLE_KEY: &str = "role";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store the authenticated principal in the session cookie.
    pub fn persist_principal(&self, principal: &Principal) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USERNAME_KEY, principal.username())
            .and_then(|()| self.0.insert(ROLE_KEY, principal.role().as_str()))
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Forget the current principal.
    pub fn clear(&self) {
        self.0.purge();
    }

    /// The logged-in principal, if any.
    ///
    /// A session holding an unknown role is treated as anonymous.
    pub fn principal(&self) -> Result<Option<Principal>, Error> {
        let read = |key: &str| {
            self.0
                .get::<String>(key)
                .map_err(|error| Error::internal(format!("failed to read session: {error}")))
        };
        let (Some(username), Some(role)) = (read(USERNAME_KEY)?, read(ROLE_KEY)?) else {
            return Ok(None);
        };
        match role.parse::<Role>() {
            Ok(role) => Ok(Some(Principal::new(username, role))),
            Err(error) => {
                tracing::warn!("invalid role in session cookie: {error}");
                Ok(None)
            }
        }
    }

    /// Require a logged-in principal or return `401 Unauthorized`.
    pub fn require_principal(&self) -> Result<Principal, Error> {
        self.principal()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Require a principal holding `role`: `401` when anonymous, `403` when
    /// the role is insufficient.
    pub fn require_role(&self, role: Role) -> Result<Principal, Error> {
        let principal = self.require_principal()?;
        if principal.role().satisfies(role) {
            Ok(principal)
        } else {
            Err(Error::forbidden(format!("{role} role required")))
        }
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
