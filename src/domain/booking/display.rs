//! User-facing text for options and previews.
//!
//! Pure projections of the structured records. Nothing parses this text back.

use super::assembler::TravelRequestPreview;
use super::options::{FlightOption, HotelOption, ListedOption};
use super::trip::Leg;

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";
const DESCRIPTION_LIMIT: usize = 100;

pub const UNFORMATTABLE_FLIGHT: &str = "Error formatting flight details";
pub const UNFORMATTABLE_HOTEL: &str = "Error formatting hotel details";

pub fn flight_details(flight: &FlightOption) -> String {
    let mut price = flight.price.to_string();
    if let Some(converted) = &flight.display_price {
        price.push_str(&format!(" (≈ {})", converted));
    }

    let mut text = format!(
        "🛩️ Flight: {} ({})\n\
         💺 Class: {}\n\
         💰 Price: {}\n\
         ⏱️ Duration: {}\n\
         🛫 Departure: {}\n\
         🛬 Arrival: {}\n\
         📍 From: {} to {}",
        flight.flight_code(),
        flight.carrier_name,
        flight.cabin_class,
        price,
        flight.duration,
        flight.departure_at.format(DATETIME_FORMAT),
        flight.arrival_at.format(DATETIME_FORMAT),
        flight.origin,
        flight.destination,
    );

    if flight.is_direct() {
        text.push_str("\n🔁 Direct flight");
    } else {
        let stops: Vec<String> = flight
            .layovers
            .iter()
            .map(|l| format!("{} ({})", l.airport, l.duration))
            .collect();
        text.push_str(&format!("\n🔁 Layovers: {}", stops.join(", ")));
    }
    text
}

pub fn hotel_details(hotel: &HotelOption) -> String {
    let rating = hotel
        .rating
        .map(|r| format!("{}★", r))
        .unwrap_or_else(|| "N/A".to_string());
    let address = hotel.address.as_deref().unwrap_or("N/A");

    format!(
        "🏨 Hotel: {}\n\
         🛏️ Room: {}\n\
         💰 Price: {} total ({} per night)\n\
         ⭐ Rating: {}\n\
         📅 Stay: {} to {}\n\
         📍 Address: {}\n\
         📝 Description: {}",
        hotel.name,
        humanize_code(&hotel.room_category),
        hotel.total_price,
        hotel.nightly_price,
        rating,
        hotel.check_in,
        hotel.check_out,
        address,
        truncate(&hotel.description, DESCRIPTION_LIMIT),
    )
}

pub fn listed_flight(entry: &ListedOption<FlightOption>) -> String {
    match entry {
        ListedOption::Available { option } => flight_details(option),
        ListedOption::Unformattable { .. } => UNFORMATTABLE_FLIGHT.to_string(),
    }
}

pub fn listed_hotel(entry: &ListedOption<HotelOption>) -> String {
    match entry {
        ListedOption::Available { option } => hotel_details(option),
        ListedOption::Unformattable { .. } => UNFORMATTABLE_HOTEL.to_string(),
    }
}

/// Short one-line label for a selection button.
pub fn flight_button_title(index: usize, entry: &ListedOption<FlightOption>) -> String {
    match entry {
        ListedOption::Available { option } => format!(
            "{}. {} · {} · {}",
            index + 1,
            option.flight_code(),
            option.departure_at.format("%H:%M"),
            option.price
        ),
        ListedOption::Unformattable { .. } => format!("{}. Unavailable", index + 1),
    }
}

pub fn hotel_button_title(index: usize, entry: &ListedOption<HotelOption>) -> String {
    match entry {
        ListedOption::Available { option } => {
            format!("{}. {} · {}", index + 1, option.name, option.total_price)
        }
        ListedOption::Unformattable { .. } => format!("{}. Unavailable", index + 1),
    }
}

pub fn options_header(leg: Leg, count: usize, from: &str, to: Option<&str>) -> String {
    match (leg, to) {
        (Leg::Hotel, _) => format!(
            "🏨 Found {} hotels in {}.\nHere are the top options:",
            count, from
        ),
        (_, Some(to)) => format!(
            "✈️ Found {} {} options from {} to {}.\nHere are the top options:",
            count,
            leg.label(),
            from,
            to
        ),
        (_, None) => format!("✈️ Found {} {} options.", count, leg.label()),
    }
}

pub fn preview_summary(preview: &TravelRequestPreview) -> String {
    let mut lines = vec!["🧾 Travel request preview".to_string(), String::new()];

    lines.push(format!("Outbound:\n{}", flight_details(&preview.outbound)));
    if let Some(ret) = &preview.return_flight {
        lines.push(String::new());
        lines.push(format!("Return:\n{}", flight_details(ret)));
    }
    lines.push(String::new());
    lines.push(format!("Stay:\n{}", hotel_details(&preview.hotel)));
    lines.push(String::new());
    lines.push(format!(
        "🌙 Nights: {} at {} per night",
        preview.nights, preview.nightly_rate
    ));
    lines.push(format!("💵 Total cost: {}", preview.total_cost));
    if let Some(converted) = &preview.display_total {
        lines.push(format!("   (≈ {})", converted));
    }
    lines.join("\n")
}

fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let cut: String = text.chars().take(limit).collect();
    format!("{}...", cut.trim_end())
}

/// `STANDARD_ROOM` becomes `Standard Room`.
fn humanize_code(code: &str) -> String {
    code.split(['_', ' '])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let lower = w.to_ascii_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::duration::TravelDuration;
    use crate::domain::booking::options::fixtures::{flight, hotel};
    use crate::domain::booking::options::Layover;
    use crate::domain::foundation::Money;

    #[test]
    fn flight_details_show_labelled_fields() {
        let text = flight_details(&flight(450, "MYR"));
        assert!(text.contains("🛩️ Flight: MH 650 (Malaysia Airlines)"));
        assert!(text.contains("💰 Price: 450.00 MYR"));
        assert!(text.contains("⏱️ Duration: 1h 5m"));
        assert!(text.contains("🛫 Departure: 2030-05-01 08:00"));
        assert!(text.contains("📍 From: KUL to SIN"));
        assert!(text.contains("Direct flight"));
    }

    #[test]
    fn flight_details_list_layovers() {
        let mut f = flight(520, "MYR");
        f.layovers.push(Layover {
            airport: "PEN".to_string(),
            duration: TravelDuration::from_minutes(90),
        });
        assert!(flight_details(&f).contains("🔁 Layovers: PEN (1h 30m)"));
    }

    #[test]
    fn converted_price_is_display_only_suffix() {
        let mut f = flight(100, "EUR");
        f.display_price = Some(Money::from_major(475, "MYR").unwrap());
        assert!(flight_details(&f).contains("100.00 EUR (≈ 475.00 MYR)"));
    }

    #[test]
    fn hotel_details_truncate_description() {
        let mut h = hotel(300, 2, "SGD");
        h.description = "x".repeat(150);
        let text = hotel_details(&h);
        assert!(text.contains("🛏️ Room: Standard Room"));
        assert!(text.contains("300.00 SGD total (150.00 SGD per night)"));
        assert!(text.contains(&format!("{}...", "x".repeat(100))));
    }

    #[test]
    fn placeholders_render_fixed_text() {
        let entry: ListedOption<FlightOption> = ListedOption::Unformattable {
            reason: "bad".to_string(),
        };
        assert_eq!(listed_flight(&entry), UNFORMATTABLE_FLIGHT);
        assert_eq!(flight_button_title(2, &entry), "3. Unavailable");
    }
}
