//! Document adapters - Implementations for trip document generation.
//!
//! - `MarkdownItineraryGenerator` - Writes a markdown itinerary per request

mod markdown_itinerary;

pub use markdown_itinerary::MarkdownItineraryGenerator;
