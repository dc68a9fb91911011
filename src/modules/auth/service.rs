use tasknest_auth::{TokenError, create_session_token};
use tasknest_config::JwtConfig;
use tasknest_core::{hash_password, verify_password};
use tasknest_db::StoreError;
use tracing::instrument;

use crate::modules::users::model::{NewUser, User};
use crate::modules::users::service::UserStore;

use super::model::{LoginForm, RegisterForm};

#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("the email is already in use")]
    EmailTaken,

    #[error("could not hash the password: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error(transparent)]
    Store(StoreError),
}

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("there is no user with that email")]
    UnknownEmail,

    #[error("Incorrect password")]
    WrongPassword,

    #[error("could not verify the password: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("could not get the JWT: {0}")]
    Token(#[from] TokenError),

    #[error(transparent)]
    Store(StoreError),
}

/// A verified login: the account and its freshly issued session token.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub token: String,
}

pub struct AuthService;

impl AuthService {
    #[instrument(skip_all, fields(email = %form.email))]
    pub async fn register_user(
        users: &dyn UserStore,
        form: RegisterForm,
    ) -> Result<User, RegisterError> {
        let password_hash = hash_password(&form.password)?;

        users
            .create_user(NewUser {
                email: form.email,
                password_hash,
                username: form.username,
            })
            .await
            .map_err(|err| match err {
                StoreError::Conflict(_) => RegisterError::EmailTaken,
                other => RegisterError::Store(other),
            })
    }

    /// Checks the credentials and issues a token carrying `tzone`.
    #[instrument(skip_all, fields(email = %form.email))]
    pub async fn login_user(
        users: &dyn UserStore,
        jwt_config: &JwtConfig,
        form: LoginForm,
        tzone: &str,
    ) -> Result<Session, LoginError> {
        let user = users
            .find_by_email(&form.email)
            .await
            .map_err(|err| match err {
                StoreError::NotFound => LoginError::UnknownEmail,
                other => LoginError::Store(other),
            })?;

        if !verify_password(&form.password, &user.password)? {
            return Err(LoginError::WrongPassword);
        }

        let token = create_session_token(user.id, &user.username, tzone, jwt_config)?;

        Ok(Session { user, token })
    }
}
