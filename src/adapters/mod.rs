//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the booking flow to external systems:
//! - `search` - Search providers (mock, YAML fixtures)
//! - `store` - Travel request stores (in-memory, filesystem)
//! - `document` - Trip document generators (markdown)
//! - `conversation` - Conversation state repositories (in-memory)

pub mod conversation;
pub mod document;
pub mod search;
pub mod store;

pub use conversation::InMemoryConversationRepository;
pub use document::MarkdownItineraryGenerator;
pub use search::{FixtureSearchProvider, MockSearchProvider};
pub use store::{FileTravelRequestStore, InMemoryTravelRequestStore};
