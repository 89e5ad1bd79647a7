use serde::{Deserialize, Serialize};

/// A user created during the run, kept to parameterize later cases
/// and enumerated in the report footer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserFixture {
    pub id: i64,
    pub phone: String,
    pub nickname: String,
    pub password: String,
}

/// A room created during the run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomFixture {
    pub id: i64,
    pub code: String,
    pub room_type: String,
}
