use crate::errors::AppError;
use crate::metrics::{self, BodyMetrics, MetricsRequest};
use crate::models::{
    AddHabitRequest, AppData, ChatMessage, ChatRequest, ChatResponse, ChatRole,
    CredentialsRequest, HabitSummary, MonthQuery, MonthViewResponse, PhotoRequest, PhotoResponse,
    ResetPasswordRequest, SessionResponse, SetMarkRequest, SetMarkResponse, UserAccount,
    VoiceSetting,
};
use crate::state::AppState;
use crate::stats;
use crate::trainer::{self, Locale};
use crate::ui::render_index;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use chrono::{Local, NaiveDate};

const MAX_PHOTO_BYTES: usize = 2 * 1024 * 1024;

pub async fn index() -> Html<&'static str> {
    Html(render_index())
}

fn today_date() -> NaiveDate {
    Local::now().date_naive()
}

/// The access-control gate: protected endpoints answer 401 when there is
/// no active session instead of redirecting.
fn require_user(data: &AppData) -> Result<&UserAccount, AppError> {
    let username = data
        .auth_user
        .as_deref()
        .ok_or_else(|| AppError::unauthorized("not logged in"))?;
    data.users
        .get(username)
        .ok_or_else(|| AppError::unauthorized("session user no longer exists"))
}

fn require_user_mut(data: &mut AppData) -> Result<&mut UserAccount, AppError> {
    let username = data
        .auth_user
        .clone()
        .ok_or_else(|| AppError::unauthorized("not logged in"))?;
    data.users
        .get_mut(&username)
        .ok_or_else(|| AppError::unauthorized("session user no longer exists"))
}

pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let username = payload.username.trim().to_string();
    if username.is_empty() {
        return Err(AppError::bad_request("username cannot be empty"));
    }
    if payload.password.is_empty() {
        return Err(AppError::bad_request("password cannot be empty"));
    }

    let mut data = state.data.lock().await;
    if data.users.contains_key(&username) {
        return Err(AppError::conflict("username already exists"));
    }
    data.users
        .insert(username.clone(), UserAccount::new(payload.password));

    state.persist(&data).await?;
    Ok((StatusCode::CREATED, Json(SessionResponse { username })))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let username = payload.username.trim().to_string();
    let mut data = state.data.lock().await;

    let user = data
        .users
        .get(&username)
        .ok_or_else(|| AppError::not_found("user not found"))?;
    if user.password != payload.password {
        return Err(AppError::unauthorized("incorrect password"));
    }

    data.auth_user = Some(username.clone());
    state.persist(&data).await?;
    Ok(Json(SessionResponse { username }))
}

pub async fn logout(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    let mut data = state.data.lock().await;
    data.auth_user = None;
    state.persist(&data).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn reset_password(
    State(state): State<AppState>,
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<StatusCode, AppError> {
    if payload.new_password.is_empty() {
        return Err(AppError::bad_request("password cannot be empty"));
    }

    let mut data = state.data.lock().await;
    let user = data
        .users
        .get_mut(payload.username.trim())
        .ok_or_else(|| AppError::not_found("user not found"))?;
    user.password = payload.new_password;

    state.persist(&data).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn session(State(state): State<AppState>) -> Result<Json<SessionResponse>, AppError> {
    let data = state.data.lock().await;
    let username = data
        .auth_user
        .clone()
        .ok_or_else(|| AppError::unauthorized("not logged in"))?;
    Ok(Json(SessionResponse { username }))
}

pub async fn list_habits(
    State(state): State<AppState>,
) -> Result<Json<Vec<HabitSummary>>, AppError> {
    let data = state.data.lock().await;
    let user = require_user(&data)?;
    let today = today_date();

    let habits = user
        .habits
        .iter()
        .map(|habit| HabitSummary {
            id: habit.id,
            name: habit.name.clone(),
            streak: stats::streak(user, habit.id, today),
        })
        .collect();
    Ok(Json(habits))
}

pub async fn add_habit(
    State(state): State<AppState>,
    Json(payload): Json<AddHabitRequest>,
) -> Result<(StatusCode, Json<HabitSummary>), AppError> {
    let mut data = state.data.lock().await;
    let user = require_user_mut(&mut data)?;
    let habit = stats::add_habit(user, &payload.name)?;

    state.persist(&data).await?;
    Ok((
        StatusCode::CREATED,
        Json(HabitSummary {
            id: habit.id,
            name: habit.name,
            streak: 0,
        }),
    ))
}

pub async fn delete_habit(
    State(state): State<AppState>,
    Path(habit_id): Path<u64>,
) -> Result<StatusCode, AppError> {
    let mut data = state.data.lock().await;
    let user = require_user_mut(&mut data)?;
    stats::delete_habit(user, habit_id)?;

    state.persist(&data).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn set_mark(
    State(state): State<AppState>,
    Json(payload): Json<SetMarkRequest>,
) -> Result<Json<SetMarkResponse>, AppError> {
    let date = NaiveDate::from_ymd_opt(payload.year, payload.month, payload.day)
        .ok_or_else(|| AppError::bad_request("invalid date"))?;

    let mut data = state.data.lock().await;
    let user = require_user_mut(&mut data)?;
    let response = stats::set_mark(user, date, payload.habit_id, payload.done)?;

    state.persist(&data).await?;
    Ok(Json(response))
}

pub async fn month_view(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<MonthViewResponse>, AppError> {
    let data = state.data.lock().await;
    let user = require_user(&data)?;
    let view = stats::build_month_view(user, query.year, query.month, today_date())?;
    Ok(Json(view))
}

pub async fn get_metrics(State(state): State<AppState>) -> Result<Json<BodyMetrics>, AppError> {
    let data = state.data.lock().await;
    let user = require_user(&data)?;
    user.metrics
        .clone()
        .map(Json)
        .ok_or_else(|| AppError::not_found("metrics not recorded yet"))
}

pub async fn set_metrics(
    State(state): State<AppState>,
    Json(payload): Json<MetricsRequest>,
) -> Result<Json<BodyMetrics>, AppError> {
    let snapshot = metrics::compute(&payload)?;

    let mut data = state.data.lock().await;
    let user = require_user_mut(&mut data)?;
    // Wholesale replacement; no history is kept.
    user.metrics = Some(snapshot.clone());

    state.persist(&data).await?;
    Ok(Json(snapshot))
}

pub async fn get_chat(State(state): State<AppState>) -> Result<Json<Vec<ChatMessage>>, AppError> {
    let data = state.data.lock().await;
    let user = require_user(&data)?;
    Ok(Json(user.chat.clone()))
}

pub async fn post_chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let message = payload.message.trim().to_string();
    if message.is_empty() {
        return Err(AppError::bad_request("message cannot be empty"));
    }
    let locale = Locale::parse(payload.lang.as_deref().unwrap_or("en"));

    let mut data = state.data.lock().await;
    let user = require_user_mut(&mut data)?;
    let reply = trainer::respond(user, &message, locale, today_date());
    user.chat.push(ChatMessage {
        text: message,
        role: ChatRole::User,
    });
    user.chat.push(ChatMessage {
        text: reply.clone(),
        role: ChatRole::Bot,
    });

    state.persist(&data).await?;
    Ok(Json(ChatResponse { reply }))
}

/// Plain-text report for the external PDF packager.
pub async fn report(State(state): State<AppState>) -> Result<String, AppError> {
    let data = state.data.lock().await;
    let user = require_user(&data)?;
    Ok(trainer::build_report(user, today_date()))
}

pub async fn get_voice(State(state): State<AppState>) -> Json<VoiceSetting> {
    let data = state.data.lock().await;
    Json(VoiceSetting {
        enabled: data.voice_enabled,
    })
}

pub async fn set_voice(
    State(state): State<AppState>,
    Json(payload): Json<VoiceSetting>,
) -> Result<Json<VoiceSetting>, AppError> {
    let mut data = state.data.lock().await;
    data.voice_enabled = payload.enabled;
    state.persist(&data).await?;
    Ok(Json(VoiceSetting {
        enabled: payload.enabled,
    }))
}

pub async fn get_photo(State(state): State<AppState>) -> Result<Json<PhotoResponse>, AppError> {
    let data = state.data.lock().await;
    let user = require_user(&data)?;
    Ok(Json(PhotoResponse {
        image: user.profile_img.clone(),
    }))
}

pub async fn set_photo(
    State(state): State<AppState>,
    Json(payload): Json<PhotoRequest>,
) -> Result<StatusCode, AppError> {
    if payload.image.len() > MAX_PHOTO_BYTES {
        return Err(AppError::bad_request("image too large (max 2 MB)"));
    }

    let mut data = state.data.lock().await;
    let user = require_user_mut(&mut data)?;
    user.profile_img = Some(payload.image);

    state.persist(&data).await?;
    Ok(StatusCode::NO_CONTENT)
}
