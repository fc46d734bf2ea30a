/*
 * Responsibility
 * - request/response DTOs for POST /login
 * - length limits are checked in chars, not bytes
 */
use serde::{Deserialize, Serialize};

const USERNAME_MAX: usize = 128;
const PASSWORD_MAX: usize = 256;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        let username = self.username.chars().count();
        if username == 0 || username > USERNAME_MAX {
            return Err("username must be 1..=128 characters");
        }
        let password = self.password.chars().count();
        if password == 0 || password > PASSWORD_MAX {
            return Err("password must be 1..=256 characters");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub status: &'static str,
    pub token: Option<String>,
}
