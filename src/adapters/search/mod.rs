//! Search provider adapters.

mod fixture;
pub mod mock;

pub use fixture::{FixtureSearchProvider, SearchFixtures};
pub use mock::{samples, MockSearchCall, MockSearchProvider};
