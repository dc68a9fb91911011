use serde::Deserialize;
use validator::Validate;

pub const EMPTY_FIELDS: &str = "Fields cannot be empty";

#[derive(Debug, Default, Deserialize, Validate)]
pub struct RegisterForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Fields cannot be empty"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Fields cannot be empty"))]
    pub password: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Fields cannot be empty"))]
    pub username: String,
}

impl RegisterForm {
    pub fn trimmed(self) -> Self {
        Self {
            email: self.email.trim().to_string(),
            password: self.password.trim().to_string(),
            username: self.username.trim().to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct LoginForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Fields cannot be empty"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Fields cannot be empty"))]
    pub password: String,
}

impl LoginForm {
    pub fn trimmed(self) -> Self {
        Self {
            email: self.email.trim().to_string(),
            password: self.password.trim().to_string(),
        }
    }
}
