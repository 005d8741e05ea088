use std::collections::HashMap;

use axum::{
    extract::{FromRef, Path, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::{
        extractors::{AuthUser, TOKEN_HEADER},
        jwt::JwtKeys,
    },
    error::{ApiError, Result},
    profile::{
        dto::{
            EducationRequest, ExperienceRequest, MessageResponse, ProfileResponse,
            UpsertProfileRequest,
        },
        repo_types::Profile,
    },
    state::AppState,
    users::repo_types::User,
};

const NO_PROFILE: &str = "There is no profile for this user";

async fn profile_with_owner(state: &AppState, profile: Profile) -> Result<ProfileResponse> {
    let owner = User::find_by_id(&state.db, profile.user_id)
        .await?
        .ok_or(ApiError::Unauthorized("User not found"))?;
    Ok(ProfileResponse::from_parts(profile, &owner))
}

async fn own_profile(state: &AppState, user_id: Uuid) -> Result<ProfileResponse> {
    let profile = Profile::find_by_user(&state.db, user_id)
        .await?
        .ok_or(ApiError::NotFound(NO_PROFILE))?;
    profile_with_owner(state, profile).await
}

async fn all_profiles(state: &AppState) -> Result<Vec<ProfileResponse>> {
    let profiles = Profile::list(&state.db).await?;
    let owner_ids: Vec<Uuid> = profiles.iter().map(|p| p.user_id).collect();
    let owners: HashMap<Uuid, User> = User::find_by_ids(&state.db, &owner_ids)
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();

    Ok(profiles
        .into_iter()
        .filter_map(|p| {
            let owner = owners.get(&p.user_id)?;
            Some(ProfileResponse::from_parts(p, owner))
        })
        .collect())
}

/// GET /profile/me doubles as two operations (a quirk preserved from the
/// observed route table): with a token it returns the caller's own profile,
/// without one it returns the public list of all profiles.
#[instrument(skip(state, headers))]
pub async fn own_or_all(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response> {
    match headers.get(TOKEN_HEADER).and_then(|v| v.to_str().ok()) {
        Some(token) => {
            let keys = JwtKeys::from_ref(&state);
            let claims = keys.verify(token).map_err(|_| {
                warn!("invalid or expired token");
                ApiError::Unauthorized("Token is not valid")
            })?;
            let profile = own_profile(&state, claims.user.id).await?;
            Ok(Json(profile).into_response())
        }
        None => {
            let profiles = all_profiles(&state).await?;
            Ok(Json(profiles).into_response())
        }
    }
}

#[instrument(skip(state, payload))]
pub async fn upsert_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<UpsertProfileRequest>,
) -> Result<Json<ProfileResponse>> {
    let update = payload.into_update()?;

    let profile = match Profile::find_by_user(&state.db, user_id).await? {
        Some(mut existing) => {
            update.apply(&mut existing);
            Profile::save(&state.db, &mut existing).await?;
            info!(user_id = %user_id, "profile updated");
            existing
        }
        None => {
            let created = Profile::new(user_id, update);
            Profile::insert(&state.db, &created).await?;
            info!(user_id = %user_id, "profile created");
            created
        }
    };

    Ok(Json(profile_with_owner(&state, profile).await?))
}

#[instrument(skip(state))]
pub async fn profile_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ProfileResponse>> {
    let profile = Profile::find_by_user(&state.db, user_id)
        .await?
        .ok_or(ApiError::NotFound("Profile not found"))?;
    let owner = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or(ApiError::NotFound("Profile not found"))?;
    Ok(Json(ProfileResponse::from_parts(profile, &owner)))
}

#[instrument(skip(state))]
pub async fn delete_account(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<MessageResponse>> {
    Profile::delete_by_user(&state.db, user_id).await?;
    User::delete(&state.db, user_id).await?;
    info!(user_id = %user_id, "user deleted");
    Ok(Json(MessageResponse {
        msg: "User deleted",
    }))
}

#[instrument(skip(state, payload))]
pub async fn add_experience(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<ExperienceRequest>,
) -> Result<Json<ProfileResponse>> {
    let entry = payload.into_entry()?;
    let mut profile = Profile::find_by_user(&state.db, user_id)
        .await?
        .ok_or(ApiError::NotFound(NO_PROFILE))?;
    profile.add_experience(entry);
    Profile::save(&state.db, &mut profile).await?;
    info!(user_id = %user_id, "experience added");
    Ok(Json(profile_with_owner(&state, profile).await?))
}

/// Removing an unknown id is a silent no-op: the profile is written back and
/// returned unchanged (observed behavior, kept as-is).
#[instrument(skip(state))]
pub async fn remove_experience(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(exp_id): Path<Uuid>,
) -> Result<Json<ProfileResponse>> {
    let mut profile = Profile::find_by_user(&state.db, user_id)
        .await?
        .ok_or(ApiError::NotFound(NO_PROFILE))?;
    profile.remove_experience(exp_id);
    Profile::save(&state.db, &mut profile).await?;
    info!(user_id = %user_id, exp_id = %exp_id, "experience removed");
    Ok(Json(profile_with_owner(&state, profile).await?))
}

#[instrument(skip(state, payload))]
pub async fn add_education(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<EducationRequest>,
) -> Result<Json<ProfileResponse>> {
    let entry = payload.into_entry()?;
    let mut profile = Profile::find_by_user(&state.db, user_id)
        .await?
        .ok_or(ApiError::NotFound(NO_PROFILE))?;
    profile.add_education(entry);
    Profile::save(&state.db, &mut profile).await?;
    info!(user_id = %user_id, "education added");
    Ok(Json(profile_with_owner(&state, profile).await?))
}

#[instrument(skip(state))]
pub async fn remove_education(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(edu_id): Path<Uuid>,
) -> Result<Json<ProfileResponse>> {
    let mut profile = Profile::find_by_user(&state.db, user_id)
        .await?
        .ok_or(ApiError::NotFound(NO_PROFILE))?;
    profile.remove_education(edu_id);
    Profile::save(&state.db, &mut profile).await?;
    info!(user_id = %user_id, edu_id = %edu_id, "education removed");
    Ok(Json(profile_with_owner(&state, profile).await?))
}
