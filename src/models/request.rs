use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub phone: String,
    pub nickname: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub phone: String,
    pub password: String,
}
