//! Authentication view model
//!
//! Only admins may sign in. A successful login persists the session and
//! points the mock's `profile` route at the signed-in user.

use bookfair_core::{User, UserRole};
use bookfair_net::Transport;
use tracing::{info, warn};

use crate::session::SessionError;
use crate::state::AppState;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Access denied: {0} accounts cannot use the admin dashboard")]
    AccessDenied(UserRole),
    #[error("{0}")]
    Api(#[from] bookfair_net::Error),
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Restore a persisted session, if any
pub async fn restore<I: Transport>(state: &mut AppState<I>) -> Result<Option<User>, AuthError> {
    let Some(session) = state.sessions.load()? else {
        return Ok(None);
    };

    if session.user.role != UserRole::Admin {
        warn!(user_id = session.user.user_id, role = %session.user.role, "Stored session is not an admin, clearing");
        state.sessions.clear()?;
        return Ok(None);
    }

    info!(user_id = session.user.user_id, "Session restored");
    adopt(state, session.token, session.user.clone()).await;
    Ok(Some(session.user))
}

/// Sign in against the backend
pub async fn login<I: Transport>(
    state: &mut AppState<I>,
    email: &str,
    password: &str,
) -> Result<User, AuthError> {
    let response = state.client.login(email, password).await?;

    if response.user.role != UserRole::Admin {
        warn!(user_id = response.user.user_id, role = %response.user.role, "Non-admin login rejected");
        return Err(AuthError::AccessDenied(response.user.role));
    }

    state.sessions.save(&response.token, &response.user)?;
    info!(user_id = response.user.user_id, "Logged in");
    adopt(state, response.token, response.user.clone()).await;
    Ok(response.user)
}

/// Sign out and forget the persisted session
pub async fn logout<I: Transport>(state: &mut AppState<I>) -> Result<(), AuthError> {
    state.sessions.clear()?;
    state.client.set_token(None);
    state.current_user = None;
    state.fetch().set_authenticated_user(None).await;
    info!("Logged out");
    Ok(())
}

async fn adopt<I: Transport>(state: &mut AppState<I>, token: String, user: User) {
    state.client.set_token(Some(token));
    state.fetch().set_authenticated_user(Some(user.clone())).await;
    state.current_user = Some(user);
}
