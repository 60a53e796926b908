// tests/support/mocks/mod.rs
//! テスト用モックの再エクスポート

pub mod identity;
pub mod store;
pub mod time;

pub use identity::{REJECTED_TOKEN, StaticIdentity, bearer};
pub use store::InMemoryStore;
pub use time::{FixedClock, fixed_now};
