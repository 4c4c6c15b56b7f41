//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the booking flow and the outside world. Adapters implement these ports.
//!
//! ## Collaborator Ports
//!
//! - `SearchProvider` - Flight and hotel offer search
//! - `PersistentStore` - Travel request persistence and token lookup
//! - `DocumentGenerator` - Trip document generation
//! - `ConversationRepository` - Per-conversation state between turns

mod conversation_repository;
mod document_generator;
mod persistent_store;
mod search_provider;

pub use conversation_repository::ConversationRepository;
pub use document_generator::{DocumentError, DocumentGenerator, DocumentReference};
pub use persistent_store::PersistentStore;
pub use search_provider::{
    ConversionTable, FlightQuery, FlightSearchResponse, HotelCityQuery, SearchProvider,
    SearchProviderError,
};
