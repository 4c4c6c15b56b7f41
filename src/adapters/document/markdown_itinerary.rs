//! Markdown itinerary generator adapter.
//!
//! Renders a saved travel request as a markdown itinerary, writes it to the
//! output directory and returns a download URL under the public base URL.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::booking::{FlightRecord, TripDocument};
use crate::ports::{DocumentError, DocumentGenerator, DocumentReference};

/// Markdown implementation of `DocumentGenerator`.
#[derive(Debug, Clone)]
pub struct MarkdownItineraryGenerator {
    output_dir: PathBuf,
    base_url: String,
}

impl MarkdownItineraryGenerator {
    pub fn new(output_dir: impl AsRef<Path>, base_url: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Renders the itinerary text.
    pub fn render(&self, doc: &TripDocument) -> String {
        let mut out = format!("# Travel Itinerary {}\n\n", doc.request_number);

        out.push_str("## Traveller\n\n");
        let traveller = &doc.traveller;
        push_field(&mut out, "Name", Some(traveller.name.as_str()).filter(|n| !n.is_empty()));
        push_field(&mut out, "Email", traveller.email.as_deref());
        push_field(&mut out, "Department", traveller.department.as_deref());
        push_field(&mut out, "Employee ID", traveller.employee_id.as_deref());
        push_field(&mut out, "Phone", traveller.phone.as_deref());
        out.push('\n');

        out.push_str(&format!(
            "## Flights ({})\n\n",
            doc.flight.trip_type.label()
        ));
        out.push_str(&flight_section("Outbound", &doc.flight.outbound_flight));
        if let Some(ret) = &doc.flight.return_flight {
            out.push_str(&flight_section("Return", ret));
        }
        if !doc.flight.layovers.is_empty() {
            out.push_str("### Layovers\n\n");
            for layover in &doc.flight.layovers {
                out.push_str(&format!("- {} ({})\n", layover.airport, layover.duration));
            }
            out.push('\n');
        }

        let hotel = &doc.hotel;
        out.push_str("## Hotel\n\n");
        out.push_str(&format!("- **Hotel:** {}\n", hotel.hotel_name));
        out.push_str(&format!("- **City:** {}\n", hotel.city));
        out.push_str(&format!("- **Room:** {}\n", hotel.room_type));
        out.push_str(&format!(
            "- **Stay:** {} to {} ({} nights)\n",
            hotel.check_in, hotel.check_out, hotel.nights
        ));
        out.push_str(&format!(
            "- **Price:** {} total ({} per night)\n",
            hotel.total_price, hotel.price_per_night
        ));
        if hotel.rating > 0 {
            out.push_str(&format!("- **Rating:** {}★\n", hotel.rating));
        }
        out.push('\n');

        out.push_str(&format!("## Total cost\n\n**{}**\n", doc.total_cost));
        out
    }
}

fn push_field(out: &mut String, label: &str, value: Option<&str>) {
    out.push_str(&format!("- **{}:** {}\n", label, value.unwrap_or("N/A")));
}

fn flight_section(title: &str, flight: &FlightRecord) -> String {
    format!(
        "### {}\n\n\
         - **Flight:** {} ({})\n\
         - **Class:** {}\n\
         - **Departure:** {}\n\
         - **Arrival:** {}\n\
         - **Duration:** {}\n\
         - **Price:** {}\n\n",
        title,
        flight.flight_number,
        flight.airline,
        flight.cabin_class,
        flight.departure_datetime.format("%Y-%m-%d %H:%M"),
        flight.arrival_datetime.format("%Y-%m-%d %H:%M"),
        flight.duration,
        flight.price,
    )
}

#[async_trait]
impl DocumentGenerator for MarkdownItineraryGenerator {
    async fn generate(&self, document: &TripDocument) -> Result<DocumentReference, DocumentError> {
        if document.request_number.trim().is_empty() {
            return Err(DocumentError::missing_data("request_number"));
        }

        let file_name = format!("{}.md", document.request_number);
        fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| DocumentError::storage(format!("Failed to create directory: {}", e)))?;
        fs::write(self.output_dir.join(&file_name), self.render(document))
            .await
            .map_err(|e| DocumentError::storage(format!("Failed to write itinerary: {}", e)))?;

        Ok(DocumentReference {
            url: format!("{}/{}", self.base_url, file_name),
            file_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::store::in_memory::test_support::{identity, request};
    use tempfile::TempDir;

    #[test]
    fn render_includes_traveller_flight_and_hotel() {
        let generator = MarkdownItineraryGenerator::new("/tmp", "http://localhost");
        let request = request();
        let doc = TripDocument::new(&request, Some(&identity()));

        let text = generator.render(&doc);

        assert!(text.starts_with(&format!("# Travel Itinerary {}", request.request_number)));
        assert!(text.contains("- **Name:** Aisha Rahman"));
        assert!(text.contains("- **Phone:** N/A"));
        assert!(text.contains("- **Flight:** MH 650 (Malaysia Airlines)"));
        assert!(text.contains("(2 nights)"));
        assert!(text.contains("**750.00 MYR**"));
        assert!(!text.contains("### Return"));
    }

    #[tokio::test]
    async fn generate_writes_file_and_returns_url() {
        let temp_dir = TempDir::new().unwrap();
        let generator = MarkdownItineraryGenerator::new(temp_dir.path(), "https://docs.example.com/");
        let request = request();
        let doc = TripDocument::new(&request, None);

        let reference = generator.generate(&doc).await.unwrap();

        assert_eq!(reference.file_name, format!("{}.md", request.request_number));
        assert_eq!(
            reference.url,
            format!("https://docs.example.com/{}.md", request.request_number)
        );
        assert!(temp_dir.path().join(&reference.file_name).exists());
    }

    #[tokio::test]
    async fn blank_request_number_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let generator = MarkdownItineraryGenerator::new(temp_dir.path(), "http://localhost");
        let mut doc = TripDocument::new(&request(), None);
        doc.request_number = " ".into();

        assert!(matches!(
            generator.generate(&doc).await,
            Err(DocumentError::MissingData { .. })
        ));
    }
}
