use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthResponse, LoginRequest, PublicUser, RefreshRequest, RegisterRequest},
        repo_types::Account,
        services::{hash_password, validate_registration, verify_password, AuthUser, JwtKeys},
    },
    error::internal,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

fn public(account: Account) -> PublicUser {
    PublicUser {
        id: account.id,
        username: account.username,
    }
}

fn issue_tokens(state: &AppState, account: Account) -> Result<AuthResponse, (StatusCode, String)> {
    let keys = JwtKeys::from_ref(state);
    let access_token = keys.sign_access(account.id).map_err(internal)?;
    let refresh_token = keys.sign_refresh(account.id).map_err(internal)?;
    Ok(AuthResponse {
        access_token,
        refresh_token,
        user: public(account),
    })
}

/// Sign-up. Does not log the caller in.
#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<PublicUser>), (StatusCode, String)> {
    let username = validate_registration(
        &payload.username,
        &payload.password,
        &payload.confirm_password,
    )
    .map_err(|e| {
        warn!(error = %e, "registration rejected");
        <(StatusCode, String)>::from(e)
    })?;

    let hash = hash_password(&payload.password).map_err(internal)?;

    let account = match state.accounts.create(&username, &hash).await {
        Ok(Some(a)) => a,
        Ok(None) => {
            warn!(username = %username, "username already exists");
            return Err((StatusCode::CONFLICT, "Username already exists".into()));
        }
        Err(e) => {
            error!(error = %e, "create account failed");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()));
        }
    };

    info!(user_id = %account.id, username = %account.username, "user registered");
    Ok((StatusCode::CREATED, Json(public(account))))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, (StatusCode, String)> {
    let username = payload.username.trim();
    if username.is_empty() || payload.password.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "Username and password are required".into(),
        ));
    }

    let account = match state.accounts.find_by_username(username).await {
        Ok(Some(a)) => a,
        Ok(None) => {
            warn!(username = %username, "login unknown username");
            return Err((StatusCode::UNAUTHORIZED, "Invalid credentials".into()));
        }
        Err(e) => {
            error!(error = %e, "find_by_username failed");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()));
        }
    };

    let valid = verify_password(&payload.password, &account.password_hash)
        .map_err(internal)?;
    if !valid {
        warn!(username = %username, user_id = %account.id, "login invalid password");
        return Err((StatusCode::UNAUTHORIZED, "Invalid credentials".into()));
    }

    info!(user_id = %account.id, username = %account.username, "user logged in");
    Ok(Json(issue_tokens(&state, account)?))
}

#[instrument(skip(state, payload))]
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<AuthResponse>, (StatusCode, String)> {
    let keys = JwtKeys::from_ref(&state);
    let claims = keys
        .verify_refresh(&payload.refresh_token)
        .map_err(|e| (StatusCode::UNAUTHORIZED, e.to_string()))?;

    let account = state
        .accounts
        .find_by_id(claims.sub)
        .await
        .map_err(internal)?
        .ok_or((StatusCode::UNAUTHORIZED, "User not found".to_string()))?;

    Ok(Json(issue_tokens(&state, account)?))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<PublicUser>, (StatusCode, String)> {
    let account = state
        .accounts
        .find_by_id(user_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| {
            error!(user_id = %user_id, "user not found");
            (StatusCode::UNAUTHORIZED, "User not found".to_string())
        })?;

    Ok(Json(public(account)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_req(username: &str, password: &str, confirm: &str) -> Json<RegisterRequest> {
        Json(RegisterRequest {
            username: username.into(),
            password: password.into(),
            confirm_password: confirm.into(),
        })
    }

    #[tokio::test]
    async fn register_login_me_flow() {
        let state = AppState::fake();

        let (status, Json(user)) = register(
            State(state.clone()),
            register_req("alice", "secret1", "secret1"),
        )
        .await
        .expect("register");
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(user.username, "alice");

        let Json(auth) = login(
            State(state.clone()),
            Json(LoginRequest {
                username: "alice".into(),
                password: "secret1".into(),
            }),
        )
        .await
        .expect("login");
        assert_eq!(auth.user.id, user.id);

        let Json(me) = get_me(State(state.clone()), AuthUser(user.id))
            .await
            .expect("me");
        assert_eq!(me.username, "alice");

        let Json(rotated) = refresh(
            State(state),
            Json(RefreshRequest {
                refresh_token: auth.refresh_token,
            }),
        )
        .await
        .expect("refresh");
        assert_eq!(rotated.user.id, user.id);
    }

    #[tokio::test]
    async fn register_rejects_duplicates_and_bad_forms() {
        let state = AppState::fake();
        register(
            State(state.clone()),
            register_req("bob", "secret1", "secret1"),
        )
        .await
        .unwrap();

        let err = register(
            State(state.clone()),
            register_req("bob", "secret1", "secret1"),
        )
        .await
        .unwrap_err();
        assert_eq!(err.0, StatusCode::CONFLICT);

        let err = register(State(state), register_req("carol", "abc", "abc"))
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn login_rejects_wrong_password() {
        let state = AppState::fake();
        register(
            State(state.clone()),
            register_req("dave", "secret1", "secret1"),
        )
        .await
        .unwrap();
        let err = login(
            State(state),
            Json(LoginRequest {
                username: "dave".into(),
                password: "nope-nope".into(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.0, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn public_user_serialization() {
        let response = PublicUser {
            id: uuid::Uuid::new_v4(),
            username: "tester".to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("tester"));
        assert!(json.contains("id"));
    }
}
