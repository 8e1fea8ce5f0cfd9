//! Account API handlers.
//!
//! ```text
//! POST /api/register {"email":"a@x.com","name":"A","password":"pw1"}
//! POST /api/login {"email":"a@x.com","password":"pw1"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::RegistrationRequest;
use crate::domain::{
    AccountProfile, ApiResult, Credentials, CredentialsValidationError, DisplayName, EmailAddress,
    Error, INVALID_CREDENTIALS_MESSAGE, Password, UNKNOWN_ACCOUNT_MESSAGE,
};
use crate::inbound::http::state::HttpState;

/// Presence-check failure message for registration.
pub const MISSING_PARAMETERS_MESSAGE: &str =
    "Missing parameters. Please enter email, name, and password.";

/// Registration request body for `POST /api/register`.
///
/// Fields are optional at the serde layer so an absent key and a blank value
/// fail the presence check identically.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Login request body for `POST /api/login`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Envelope returned on successful registration and login.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    #[schema(example = "User created")]
    pub message: &'static str,
    pub user: AccountProfile,
}

fn present(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.trim().is_empty())
}

impl TryFrom<RegisterRequest> for RegistrationRequest {
    type Error = Error;

    fn try_from(value: RegisterRequest) -> Result<Self, Self::Error> {
        let (Some(email), Some(name), Some(password)) = (
            present(value.email.as_ref()),
            present(value.name.as_ref()),
            present(value.password.as_ref()),
        ) else {
            return Err(Error::invalid_request(MISSING_PARAMETERS_MESSAGE));
        };
        let email =
            EmailAddress::new(email).map_err(|_| Error::invalid_request(MISSING_PARAMETERS_MESSAGE))?;
        let display_name =
            DisplayName::new(name).map_err(|err| Error::invalid_request(err.to_string()))?;
        let password =
            Password::new(password).map_err(|_| Error::invalid_request(MISSING_PARAMETERS_MESSAGE))?;
        Ok(Self {
            email,
            display_name,
            password,
        })
    }
}

impl TryFrom<LoginRequest> for Credentials {
    type Error = Error;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Credentials::try_from_parts(
            value.email.as_deref().unwrap_or_default(),
            value.password.as_deref().unwrap_or_default(),
        )
        .map_err(map_credentials_validation_error)
    }
}

/// Blank fields take the same rejection path the lookup and the digest check
/// would: the account cannot exist for an empty email, and an empty password
/// never verifies.
fn map_credentials_validation_error(err: CredentialsValidationError) -> Error {
    match err {
        CredentialsValidationError::EmptyEmail => Error::unknown_account(UNKNOWN_ACCOUNT_MESSAGE),
        CredentialsValidationError::EmptyPassword => {
            Error::invalid_credentials(INVALID_CREDENTIALS_MESSAGE)
        }
    }
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = AccountResponse),
        (status = 400, description = "Missing parameters", body = Error),
        (status = 409, description = "Email already registered", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "register"
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let request = RegistrationRequest::try_from(payload.into_inner())?;
    let user = state.registration.register(request).await?;
    Ok(HttpResponse::Created().json(AccountResponse {
        message: "User created",
        user,
    }))
}

/// Authenticate an account by email and password.
///
/// No session or token is issued; the success envelope is where one would be
/// attached.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = AccountResponse),
        (status = 400, description = "Unknown email or incorrect password", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "login"
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = Credentials::try_from(payload.into_inner())?;
    let user = state.login.authenticate(&credentials).await?;
    // The original spells the success message this way.
    Ok(HttpResponse::Ok().json(AccountResponse {
        message: "User logged in succesfully",
        user,
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, test as actix_test, web};
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::{
        DUPLICATE_EMAIL_MESSAGE, LoginWorkflow, RegistrationWorkflow, WallWorkflow,
    };
    use crate::outbound::memory::{MemoryAccountRepository, MemoryWallRepository};

    fn test_state() -> HttpState {
        let accounts = Arc::new(MemoryAccountRepository::default());
        let posts = Arc::new(MemoryWallRepository::new(Arc::clone(&accounts)));
        HttpState::new(
            Arc::new(RegistrationWorkflow::new(accounts.clone())),
            Arc::new(LoginWorkflow::new(accounts)),
            Arc::new(WallWorkflow::new(posts)),
        )
    }

    fn test_app(
        state: HttpState,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(state))
            .service(web::scope("/api").service(register).service(login))
    }

    async fn post_json(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
        uri: &str,
        body: Value,
    ) -> (actix_web::http::StatusCode, Value) {
        let request = actix_test::TestRequest::post()
            .uri(uri)
            .set_json(body)
            .to_request();
        let response = actix_test::call_service(app, request).await;
        let status = response.status();
        let body = actix_test::read_body(response).await;
        let value = serde_json::from_slice(&body).expect("JSON body");
        (status, value)
    }

    #[rstest]
    #[case(json!({ "name": "A", "password": "pw1" }))]
    #[case(json!({ "email": "a@x.com", "password": "pw1" }))]
    #[case(json!({ "email": "a@x.com", "name": "A" }))]
    #[case(json!({ "email": "  ", "name": "A", "password": "pw1" }))]
    #[actix_web::test]
    async fn register_rejects_missing_parameters(#[case] body: Value) {
        let app = actix_test::init_service(test_app(test_state())).await;
        let (status, value) = post_json(&app, "/api/register", body).await;
        assert_eq!(status, actix_web::http::StatusCode::BAD_REQUEST);
        assert_eq!(
            value.get("message").and_then(Value::as_str),
            Some(MISSING_PARAMETERS_MESSAGE)
        );
    }

    #[actix_web::test]
    async fn register_returns_created_profile() {
        let app = actix_test::init_service(test_app(test_state())).await;
        let (status, value) = post_json(
            &app,
            "/api/register",
            json!({ "email": "a@x.com", "name": "A", "password": "pw1" }),
        )
        .await;
        assert_eq!(status, actix_web::http::StatusCode::CREATED);
        assert_eq!(
            value.get("message").and_then(Value::as_str),
            Some("User created")
        );
        let user = value.get("user").expect("user payload");
        assert_eq!(user.get("name").and_then(Value::as_str), Some("A"));
        assert!(user.get("id").and_then(Value::as_str).is_some());
        // Secrets stay inside the domain.
        assert!(user.get("salt").is_none());
        assert!(user.get("password").is_none());
    }

    #[actix_web::test]
    async fn register_rejects_duplicate_email_with_conflict() {
        let app = actix_test::init_service(test_app(test_state())).await;
        let body = json!({ "email": "a@x.com", "name": "A", "password": "pw1" });
        let (first, _) = post_json(&app, "/api/register", body.clone()).await;
        assert_eq!(first, actix_web::http::StatusCode::CREATED);
        let (second, value) = post_json(&app, "/api/register", body).await;
        assert_eq!(second, actix_web::http::StatusCode::CONFLICT);
        assert_eq!(
            value.get("message").and_then(Value::as_str),
            Some(DUPLICATE_EMAIL_MESSAGE)
        );
    }

    #[actix_web::test]
    async fn login_round_trips_registration() {
        let app = actix_test::init_service(test_app(test_state())).await;
        let (_, registered) = post_json(
            &app,
            "/api/register",
            json!({ "email": "a@x.com", "name": "A", "password": "pw1" }),
        )
        .await;
        let registered_id = registered["user"]["id"].as_str().expect("id").to_owned();

        let (status, value) = post_json(
            &app,
            "/api/login",
            json!({ "email": "a@x.com", "password": "pw1" }),
        )
        .await;
        assert_eq!(status, actix_web::http::StatusCode::OK);
        assert_eq!(
            value.get("message").and_then(Value::as_str),
            Some("User logged in succesfully")
        );
        assert_eq!(
            value["user"]["id"].as_str(),
            Some(registered_id.as_str()),
            "login must resolve the registered account"
        );
    }

    #[rstest]
    #[case(json!({ "email": "a@x.com", "password": "wrong" }), INVALID_CREDENTIALS_MESSAGE)]
    #[case(json!({ "email": "a@x.com" }), INVALID_CREDENTIALS_MESSAGE)]
    #[case(json!({ "email": "b@x.com", "password": "pw1" }), UNKNOWN_ACCOUNT_MESSAGE)]
    #[case(json!({ "password": "pw1" }), UNKNOWN_ACCOUNT_MESSAGE)]
    #[actix_web::test]
    async fn login_rejects_bad_credentials(#[case] body: Value, #[case] expected: &str) {
        let app = actix_test::init_service(test_app(test_state())).await;
        let (_, _) = post_json(
            &app,
            "/api/register",
            json!({ "email": "a@x.com", "name": "A", "password": "pw1" }),
        )
        .await;

        let (status, value) = post_json(&app, "/api/login", body).await;
        assert_eq!(status, actix_web::http::StatusCode::BAD_REQUEST);
        assert_eq!(value.get("message").and_then(Value::as_str), Some(expected));
    }
}
