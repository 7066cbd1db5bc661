//! Mock endpoint router
//!
//! Dispatches `(method, path)` pairs over an ordered static route table.
//! Each handler is a plain function of the router state, the captured path
//! parameters and the raw request body. The router never fails: every
//! outcome, including internal faults, becomes a [`Reply`].

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::error::{Error, Result};
use crate::models::{
    BusinessDraft, ProfileUpdate, ReservationAction, StallAssignment, User, VendorDraft,
};
use crate::profile::derive_profile;
use crate::store::MockStore;

/// HTTP request method
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
    Other(String),
}

impl Method {
    /// Parse a method name, case-insensitively
    pub fn parse(name: &str) -> Self {
        match name.to_ascii_uppercase().as_str() {
            "GET" => Method::Get,
            "POST" => Method::Post,
            "PUT" => Method::Put,
            "PATCH" => Method::Patch,
            "DELETE" => Method::Delete,
            "HEAD" => Method::Head,
            "OPTIONS" => Method::Options,
            other => Method::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
            Method::Other(name) => name,
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status code plus JSON payload produced by the router
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: u16,
    pub body: Value,
}

impl Reply {
    pub fn json<T: Serialize>(status: u16, value: &T) -> Result<Self> {
        Ok(Self {
            status,
            body: serde_json::to_value(value)?,
        })
    }

    pub fn ok<T: Serialize>(value: &T) -> Result<Self> {
        Self::json(200, value)
    }

    pub fn created<T: Serialize>(value: &T) -> Result<Self> {
        Self::json(201, value)
    }

    pub fn from_error(err: &Error) -> Self {
        Self {
            status: err.status(),
            body: err.payload(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Path parameters captured by `:name` pattern segments
#[derive(Debug, Default)]
pub struct Params<'a> {
    values: Vec<(&'static str, &'a str)>,
}

impl<'a> Params<'a> {
    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.values
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
    }
}

/// Mutable state the handlers operate on
#[derive(Debug, Default)]
pub struct RouterState {
    pub store: MockStore,
    /// Set by the auth side channel; takes precedence on `GET profile`
    pub current_user: Option<User>,
}

type Handler = fn(&mut RouterState, &Params<'_>, Option<&str>) -> Result<Reply>;

/// Answer for a recognized path with an unsupported method
enum Mismatch {
    /// 405 with a route-specific message
    Reject(&'static str),
    /// Action endpoints: GET is not found, anything else is 405
    ActionOnly,
}

impl Mismatch {
    fn error(&self, method: &Method) -> Error {
        match self {
            Mismatch::Reject(msg) => Error::MethodNotAllowed((*msg).to_string()),
            Mismatch::ActionOnly if *method == Method::Get => Error::NotFound("Not found".into()),
            Mismatch::ActionOnly => Error::MethodNotAllowed(GENERIC_NOT_IMPLEMENTED.into()),
        }
    }
}

struct RouteDef {
    pattern: &'static str,
    methods: &'static [&'static str],
    handler: Handler,
    mismatch: Mismatch,
}

const GENERIC_NOT_IMPLEMENTED: &str = "Method not implemented in mock.";

static ROUTES: [RouteDef; 12] = [
    RouteDef {
        pattern: "profile",
        methods: &["GET"],
        handler: get_profile,
        mismatch: Mismatch::Reject("Method not implemented in mock for profile."),
    },
    RouteDef {
        pattern: "profile",
        methods: &["PUT", "PATCH", "POST"],
        handler: update_profile,
        mismatch: Mismatch::Reject("Method not implemented in mock for profile."),
    },
    RouteDef {
        pattern: "business/all",
        methods: &["GET"],
        handler: list_businesses,
        mismatch: Mismatch::Reject("Method not implemented in mock for business/all."),
    },
    RouteDef {
        pattern: "business",
        methods: &["POST"],
        handler: create_business,
        mismatch: Mismatch::Reject("Method not implemented in mock for business."),
    },
    RouteDef {
        pattern: "vendors",
        methods: &["GET"],
        handler: list_vendors,
        mismatch: Mismatch::Reject(GENERIC_NOT_IMPLEMENTED),
    },
    RouteDef {
        pattern: "vendors",
        methods: &["POST"],
        handler: create_vendor,
        mismatch: Mismatch::Reject(GENERIC_NOT_IMPLEMENTED),
    },
    RouteDef {
        pattern: "stalls",
        methods: &["GET"],
        handler: list_stalls,
        mismatch: Mismatch::Reject(GENERIC_NOT_IMPLEMENTED),
    },
    RouteDef {
        pattern: "stalls/:id/assign",
        methods: &["POST"],
        handler: assign_stall,
        mismatch: Mismatch::ActionOnly,
    },
    RouteDef {
        pattern: "reservations",
        methods: &["GET"],
        handler: list_reservations,
        mismatch: Mismatch::Reject(GENERIC_NOT_IMPLEMENTED),
    },
    RouteDef {
        pattern: "reservations/:id/:action",
        methods: &["POST"],
        handler: decide_reservation,
        mismatch: Mismatch::ActionOnly,
    },
    RouteDef {
        pattern: "reservations/:id",
        methods: &["POST"],
        handler: decide_reservation,
        mismatch: Mismatch::ActionOnly,
    },
    RouteDef {
        pattern: "dashboard",
        methods: &["GET"],
        handler: get_dashboard,
        mismatch: Mismatch::Reject(GENERIC_NOT_IMPLEMENTED),
    },
];

/// Match `path` against a pattern of literal and `:name` segments
fn match_pattern<'a>(pattern: &'static str, path: &'a str) -> Option<Params<'a>> {
    let mut params = Params::default();
    let mut pattern_segments = pattern.split('/');
    let mut path_segments = path.split('/');

    loop {
        match (pattern_segments.next(), path_segments.next()) {
            (None, None) => return Some(params),
            (Some(expected), Some(actual)) => {
                if let Some(name) = expected.strip_prefix(':') {
                    if actual.is_empty() {
                        return None;
                    }
                    params.values.push((name, actual));
                } else if expected != actual {
                    return None;
                }
            }
            _ => return None,
        }
    }
}

/// Parse a request body; a missing or empty body reads as `{}`
fn parse_body<T: DeserializeOwned>(body: Option<&str>) -> Result<T> {
    let text = match body {
        Some(text) if !text.is_empty() => text,
        _ => "{}",
    };
    serde_json::from_str(text).map_err(|e| Error::InvalidBody(e.to_string()))
}

fn get_profile(state: &mut RouterState, _: &Params<'_>, _: Option<&str>) -> Result<Reply> {
    if let Some(user) = &state.current_user {
        return Reply::ok(&derive_profile(user));
    }
    let profile = state
        .store
        .profile
        .as_ref()
        .ok_or_else(|| Error::NotFound("Profile not found".into()))?;
    Reply::ok(profile)
}

fn update_profile(state: &mut RouterState, _: &Params<'_>, body: Option<&str>) -> Result<Reply> {
    let update: ProfileUpdate = parse_body(body)?;
    let profile = state.store.update_profile(update)?;
    Reply::ok(profile)
}

fn list_businesses(state: &mut RouterState, _: &Params<'_>, _: Option<&str>) -> Result<Reply> {
    Reply::ok(&state.store.businesses)
}

fn create_business(state: &mut RouterState, _: &Params<'_>, body: Option<&str>) -> Result<Reply> {
    let draft: BusinessDraft = parse_body(body)?;
    Reply::created(&state.store.add_business(draft))
}

fn list_vendors(state: &mut RouterState, _: &Params<'_>, _: Option<&str>) -> Result<Reply> {
    Reply::ok(&state.store.vendors)
}

fn create_vendor(state: &mut RouterState, _: &Params<'_>, body: Option<&str>) -> Result<Reply> {
    let draft: VendorDraft = parse_body(body)?;
    Reply::created(&state.store.add_vendor(draft))
}

fn list_stalls(state: &mut RouterState, _: &Params<'_>, _: Option<&str>) -> Result<Reply> {
    Reply::ok(&state.store.stalls)
}

fn assign_stall(state: &mut RouterState, params: &Params<'_>, body: Option<&str>) -> Result<Reply> {
    let assignment: StallAssignment = parse_body(body)?;
    let stall_id = params.get("id").unwrap_or_default();
    let stall = state
        .store
        .assign_stall(stall_id, assignment.vendor_id.as_deref())?;
    Reply::ok(&stall)
}

fn list_reservations(state: &mut RouterState, _: &Params<'_>, _: Option<&str>) -> Result<Reply> {
    Reply::ok(&state.store.reservations)
}

fn decide_reservation(
    state: &mut RouterState,
    params: &Params<'_>,
    _: Option<&str>,
) -> Result<Reply> {
    let reservation_id = params.get("id").unwrap_or_default();
    if state.store.reservation(reservation_id).is_none() {
        return Err(Error::NotFound("Reservation not found".into()));
    }

    let action = params
        .get("action")
        .and_then(ReservationAction::from_token)
        .ok_or_else(|| Error::MethodNotAllowed("Action not implemented".into()))?;

    Reply::ok(&state.store.decide_reservation(reservation_id, action)?)
}

fn get_dashboard(state: &mut RouterState, _: &Params<'_>, _: Option<&str>) -> Result<Reply> {
    Reply::ok(&state.store.dashboard)
}

/// Routes mock API requests onto an owned in-memory store
#[derive(Debug, Default)]
pub struct MockRouter {
    state: RouterState,
}

impl MockRouter {
    pub fn new(store: MockStore) -> Self {
        Self {
            state: RouterState {
                store,
                current_user: None,
            },
        }
    }

    /// Router over the standard seed data
    pub fn seeded() -> Self {
        Self::new(MockStore::seeded())
    }

    pub fn store(&self) -> &MockStore {
        &self.state.store
    }

    pub fn store_mut(&mut self) -> &mut MockStore {
        &mut self.state.store
    }

    pub fn current_user(&self) -> Option<&User> {
        self.state.current_user.as_ref()
    }

    /// Auth side channel: set after login, cleared (None) after logout
    pub fn set_authenticated_user(&mut self, user: Option<User>) {
        debug!(
            user_id = ?user.as_ref().map(|u| u.user_id),
            "Mock authenticated user updated"
        );
        self.state.current_user = user;
    }

    /// Handle a request. `path` has the mock prefix, query and fragment removed.
    pub fn handle(&mut self, method: &Method, path: &str, body: Option<&str>) -> Reply {
        match self.dispatch(method, path, body) {
            Ok(reply) => {
                debug!(method = %method, path, status = reply.status, "Mock request handled");
                reply
            }
            Err(e) => {
                let reply = Reply::from_error(&e);
                if reply.status >= 500 {
                    error!(method = %method, path, error = %e, "Mock handler fault");
                } else {
                    warn!(method = %method, path, status = reply.status, error = %e, "Mock request rejected");
                }
                reply
            }
        }
    }

    fn dispatch(&mut self, method: &Method, path: &str, body: Option<&str>) -> Result<Reply> {
        let mut recognized: Option<&RouteDef> = None;

        for route in ROUTES.iter() {
            let Some(params) = match_pattern(route.pattern, path) else {
                continue;
            };
            if route.methods.contains(&method.as_str()) {
                return (route.handler)(&mut self.state, &params, body);
            }
            recognized.get_or_insert(route);
        }

        match recognized {
            Some(route) => Err(route.mismatch.error(method)),
            None => Err(Error::NotFound("Not found".into())),
        }
    }
}
