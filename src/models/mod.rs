mod case;
mod fixture;
mod request;
mod stats;

pub use case::TestCase;
pub use fixture::{RoomFixture, UserFixture};
pub use request::{LoginRequest, RegisterRequest};
pub use stats::RunStats;
