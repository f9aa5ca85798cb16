use std::collections::BTreeMap;

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post, put},
};

use crate::{
    dto::accounts::{
        ChangePasswordRequest, ChangePasswordResponse, ClientResponse, LoggedAdmin, LoggedUser,
        LoginRequest, LoginResponse, ResetPasswordRequest, ResetPasswordResponse,
        UpdateProfileRequest, UserCount, UserForm,
    },
    error::AppResult,
    models::User,
    response::{ErrorBody, MessageResponse},
    services::account_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cadastro_usuario", post(register))
        .route("/login", post(login))
        .route("/login_admin", post(login_admin))
        .route("/get_usuario/{id}", get(get_user))
        .route("/update_usuario/{id}", put(update_profile))
        .route("/update_senha/{id}", put(change_password))
        .route("/reset_password", post(reset_password))
        .route("/debug_tentativas", get(list_reset_attempts))
        .route("/limpar_tentativas/{email}", post(clear_reset_attempts))
        .route("/usuario", get(list_users))
        .route("/usuario/{id}", put(edit_user).delete(delete_user))
        .route("/adicionar_usuario/{admin_id}", post(add_user))
        .route("/cliente/{cpf}", get(get_client).delete(delete_client))
        .route("/usuarios/count", get(count_users))
}

#[utoipa::path(
    post,
    path = "/cadastro_usuario",
    request_body = UserForm,
    responses(
        (status = 200, description = "Account created", body = MessageResponse),
        (status = 400, description = "Missing field", body = ErrorBody),
        (status = 409, description = "Email or CPF already registered", body = ErrorBody),
    ),
    tag = "Accounts"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<UserForm>,
) -> AppResult<Json<MessageResponse>> {
    account_service::register_user(&state.pool, payload, None).await?;
    Ok(Json(MessageResponse::new("Usuário cadastrado com sucesso")))
}

#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse<LoggedUser>),
        (status = 401, description = "Invalid credentials", body = ErrorBody),
        (status = 403, description = "Account locked", body = ErrorBody),
    ),
    tag = "Accounts"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse<LoggedUser>>> {
    let user = account_service::login_user(&state.pool, payload).await?;
    Ok(Json(LoginResponse {
        message: "Login realizado com sucesso".to_string(),
        user,
    }))
}

#[utoipa::path(
    post,
    path = "/login_admin",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse<LoggedAdmin>),
        (status = 401, description = "Invalid credentials", body = ErrorBody),
    ),
    tag = "Accounts"
)]
pub async fn login_admin(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse<LoggedAdmin>>> {
    let admin = account_service::login_admin(&state.pool, payload).await?;
    Ok(Json(LoginResponse {
        message: "Login realizado com sucesso".to_string(),
        user: admin,
    }))
}

#[utoipa::path(
    get,
    path = "/get_usuario/{id}",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User profile", body = User),
        (status = 404, description = "User not found", body = ErrorBody),
    ),
    tag = "Accounts"
)]
pub async fn get_user(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<Json<User>> {
    let user = account_service::get_user(&state.pool, id).await?;
    Ok(Json(user))
}

#[utoipa::path(
    put,
    path = "/update_usuario/{id}",
    params(("id" = i64, Path, description = "User ID")),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = MessageResponse),
        (status = 404, description = "User not found", body = ErrorBody),
    ),
    tag = "Accounts"
)]
pub async fn update_profile(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateProfileRequest>,
) -> AppResult<Json<MessageResponse>> {
    account_service::update_profile(&state.pool, id, payload).await?;
    Ok(Json(MessageResponse::new("Perfil atualizado com sucesso")))
}

#[utoipa::path(
    put,
    path = "/update_senha/{id}",
    params(("id" = i64, Path, description = "User ID")),
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = ChangePasswordResponse),
        (status = 400, description = "Weak or missing password", body = ErrorBody),
        (status = 401, description = "Wrong current password", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody),
    ),
    tag = "Accounts"
)]
pub async fn change_password(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ChangePasswordRequest>,
) -> AppResult<Json<ChangePasswordResponse>> {
    account_service::change_password(&state.pool, id, payload).await?;
    Ok(Json(ChangePasswordResponse {
        success: true,
        message: "Senha alterada com sucesso".to_string(),
    }))
}

#[utoipa::path(
    post,
    path = "/reset_password",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password reset", body = ResetPasswordResponse),
        (status = 401, description = "Data mismatch, attempts remaining", body = ErrorBody),
        (status = 403, description = "Account locked", body = ErrorBody),
        (status = 404, description = "Email not registered", body = ErrorBody),
    ),
    tag = "Accounts"
)]
pub async fn reset_password(
    State(state): State<AppState>,
    Json(payload): Json<ResetPasswordRequest>,
) -> AppResult<Json<ResetPasswordResponse>> {
    let usuario =
        account_service::reset_password(&state.pool, state.config.max_reset_attempts, payload)
            .await?;
    Ok(Json(ResetPasswordResponse {
        message: "Senha redefinida com sucesso".to_string(),
        usuario,
    }))
}

#[utoipa::path(
    get,
    path = "/debug_tentativas",
    responses((status = 200, description = "Failed reset attempts per email", body = BTreeMap<String, i32>)),
    tag = "Accounts"
)]
pub async fn list_reset_attempts(
    State(state): State<AppState>,
) -> AppResult<Json<BTreeMap<String, i32>>> {
    let attempts = account_service::list_reset_attempts(&state.pool).await?;
    Ok(Json(attempts))
}

#[utoipa::path(
    post,
    path = "/limpar_tentativas/{email}",
    params(("email" = String, Path, description = "Account email")),
    responses((status = 200, description = "Counter cleared", body = MessageResponse)),
    tag = "Accounts"
)]
pub async fn clear_reset_attempts(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let cleared = account_service::clear_reset_attempts(&state.pool, &email).await?;
    let message = if cleared {
        format!("Tentativas de {email} resetadas")
    } else {
        format!("Nenhuma tentativa registrada para {email}")
    };
    Ok(Json(MessageResponse::new(message)))
}

#[utoipa::path(
    get,
    path = "/usuario",
    responses((status = 200, description = "Every registered user", body = Vec<User>)),
    tag = "Admin"
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    let users = account_service::list_users(&state.pool).await?;
    Ok(Json(users))
}

#[utoipa::path(
    put,
    path = "/usuario/{id}",
    params(("id" = i64, Path, description = "User ID")),
    request_body = UserForm,
    responses(
        (status = 200, description = "User updated", body = MessageResponse),
        (status = 400, description = "Missing field", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody),
    ),
    tag = "Admin"
)]
pub async fn edit_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UserForm>,
) -> AppResult<Json<MessageResponse>> {
    account_service::edit_user(&state.pool, id, payload).await?;
    Ok(Json(MessageResponse::new("Usuário atualizado com sucesso")))
}

#[utoipa::path(
    delete,
    path = "/usuario/{id}",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User removed", body = MessageResponse),
        (status = 404, description = "User not found", body = ErrorBody),
    ),
    tag = "Admin"
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    account_service::delete_user(&state.pool, id).await?;
    Ok(Json(MessageResponse::new("Usuário removido com sucesso")))
}

#[utoipa::path(
    post,
    path = "/adicionar_usuario/{admin_id}",
    params(("admin_id" = i64, Path, description = "ID of the administrator creating the account")),
    request_body = UserForm,
    responses(
        (status = 200, description = "Account created", body = MessageResponse),
        (status = 400, description = "Missing field", body = ErrorBody),
        (status = 409, description = "Email or CPF already registered", body = ErrorBody),
    ),
    tag = "Admin"
)]
pub async fn add_user(
    State(state): State<AppState>,
    Path(admin_id): Path<i64>,
    Json(payload): Json<UserForm>,
) -> AppResult<Json<MessageResponse>> {
    account_service::register_user(&state.pool, payload, Some(admin_id)).await?;
    Ok(Json(MessageResponse::new("Usuário cadastrado com sucesso")))
}

#[utoipa::path(
    get,
    path = "/cliente/{cpf}",
    params(("cpf" = String, Path, description = "Client CPF, with or without punctuation")),
    responses(
        (status = 200, description = "Client found", body = ClientResponse),
        (status = 404, description = "Client not found", body = ErrorBody),
    ),
    tag = "Admin"
)]
pub async fn get_client(
    State(state): State<AppState>,
    Path(cpf): Path<String>,
) -> AppResult<Json<ClientResponse>> {
    let cliente = account_service::find_client_by_cpf(&state.pool, &cpf).await?;
    Ok(Json(ClientResponse { cliente }))
}

#[utoipa::path(
    delete,
    path = "/cliente/{cpf}",
    params(("cpf" = String, Path, description = "Client CPF, with or without punctuation")),
    responses(
        (status = 200, description = "Client removed", body = MessageResponse),
        (status = 404, description = "Client not found", body = ErrorBody),
    ),
    tag = "Admin"
)]
pub async fn delete_client(
    State(state): State<AppState>,
    Path(cpf): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    account_service::delete_client_by_cpf(&state.pool, &cpf).await?;
    Ok(Json(MessageResponse::new("Cliente removido com sucesso")))
}

#[utoipa::path(
    get,
    path = "/usuarios/count",
    responses((status = 200, description = "Number of registered users", body = UserCount)),
    tag = "Admin"
)]
pub async fn count_users(State(state): State<AppState>) -> AppResult<Json<UserCount>> {
    let quantidade = account_service::count_users(&state.pool).await?;
    Ok(Json(UserCount { quantidade }))
}
