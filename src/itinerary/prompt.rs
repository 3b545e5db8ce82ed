//! Prompt construction for generative itinerary synthesis

use crate::itinerary::fallback::tips_block;
use crate::models::{Place, TravelStyle};

/// Places embedded into the prompt are capped at this count
pub(crate) const MAX_PROMPT_PLACES: usize = 20;

/// Pacing guidance lines, one per travel style
static STYLE_GUIDELINES: &[(TravelStyle, &str)] = &[
    (
        TravelStyle::Budget,
        "Focus on free or cheap activities, local transport, street food, hostels",
    ),
    (
        TravelStyle::Moderate,
        "Mix of paid attractions and free activities, mid-range dining",
    ),
    (
        TravelStyle::Luxury,
        "High-end experiences, fine dining, premium accommodations",
    ),
    (
        TravelStyle::Relaxed,
        "2-3 activities per day, longer breaks, leisurely pace",
    ),
    (
        TravelStyle::Packed,
        "4-6 activities per day, efficient scheduling, maximize experiences",
    ),
    (
        TravelStyle::Adventure,
        "Outdoor activities, unique experiences, off-the-beaten-path",
    ),
];

/// Build the synthesis system prompt embedding the available places
pub(crate) fn build_system_prompt(
    destination: &str,
    duration_days: u32,
    places: &[Place],
    interests: &[String],
    travel_style: TravelStyle,
) -> String {
    let mut prompt = format!(
        "You are an expert travel planner with deep knowledge of destinations worldwide. \
         Create a detailed, engaging, and practical {duration_days}-day itinerary for {destination}.\n\n"
    );

    prompt.push_str("User Profile:\n");
    prompt.push_str(&format!("- Destination: {destination}\n"));
    prompt.push_str(&format!("- Duration: {duration_days} days\n"));
    prompt.push_str(&format!("- Interests: {}\n", interests.join(", ")));
    prompt.push_str(&format!("- Travel Style: {}\n\n", travel_style.as_str()));

    prompt.push_str("Travel Style Guidelines:\n");
    for (style, guidance) in STYLE_GUIDELINES {
        prompt.push_str(&format!("- {}: {}\n", title_case(style.as_str()), guidance));
    }

    prompt.push_str("\nAvailable Places and Attractions:\n");
    prompt.push_str(&format_places(places));

    prompt.push_str(
        "\n\nInstructions:\n\
         1. Create a day-by-day plan with specific times\n\
         2. Include morning, afternoon, and evening activities\n\
         3. Suggest specific restaurants or cafes for meals\n\
         4. Add transportation tips between locations\n\
         5. Include cultural insights and local tips\n\
         6. Consider opening hours and travel distances\n\
         7. Add budget estimates where relevant\n\n\
         Format Requirements:\n\
         - Use markdown formatting with headers and bullet points\n\
         - Structure each day with Morning, Lunch, Afternoon and Evening sections\n\
         - Add practical tips and insider knowledge\n\
         - End with general tips and recommendations\n\n\
         Make it personal, engaging, and actionable. Include specific details that show local expertise.",
    );

    prompt
}

/// Build the synthesis user prompt
pub(crate) fn build_user_prompt(
    destination: &str,
    duration_days: u32,
    interests: &[String],
    travel_style: TravelStyle,
) -> String {
    format!(
        "Create a comprehensive {duration_days}-day itinerary for {destination} that focuses on {}.\n\n\
         Travel style: {}\n\n\
         Make it detailed, practical, and exciting. Include specific recommendations, timing, and local insights.",
        interests.join(", "),
        travel_style.as_str()
    )
}

/// Wrap an implausibly short generated document with a header and the
/// deterministic tips block instead of discarding it.
pub(crate) fn pad_short_document(
    document: &str,
    destination: &str,
    duration_days: u32,
    interests: &[String],
) -> String {
    let mut padded = format!("# {duration_days}-Day Itinerary for {destination}\n\n");
    padded.push_str(&format!(
        "**Interests:** {} | **Style:** Comprehensive\n\n",
        interests.join(", ")
    ));
    padded.push_str(document);
    padded.push_str("\n\n---\n\n");
    padded.push_str(&tips_block(destination, interests));
    padded
}

/// Render the numbered place list embedded in the system prompt
fn format_places(places: &[Place]) -> String {
    if places.is_empty() {
        return "No specific places provided - please suggest popular attractions.".to_string();
    }

    places
        .iter()
        .take(MAX_PROMPT_PLACES)
        .enumerate()
        .map(|(i, place)| {
            let mut entry = format!("{}. **{}**", i + 1, place.name);
            if !place.category.is_empty() {
                entry.push_str(&format!(" ({})", title_case(&place.category.replace('_', " "))));
            }
            if let Some(rating) = place.rating {
                entry.push_str(&format!(" - Rating: {rating}/5"));
            }
            if !place.description.is_empty() {
                entry.push_str(&format!("\n   Description: {}", place.description));
            }
            if !place.address.is_empty() {
                entry.push_str(&format!("\n   Location: {}", place.address));
            }
            entry
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Uppercase the first letter of each whitespace-separated word
pub(crate) fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
