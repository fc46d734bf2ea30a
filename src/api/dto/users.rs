/*
 * Responsibility
 * - request/response DTOs for /user
 * - validate() for shape checks (positive id)
 */
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub id: u64,
}

impl UserQuery {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.id == 0 {
            return Err("id must be a positive integer");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: u64,
    pub name: String,
}
