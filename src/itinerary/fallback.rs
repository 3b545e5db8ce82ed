//! Deterministic itinerary construction
//!
//! Builds a day-by-day plan from the discovered places without any
//! generative help. Places are bucketed into coarse groups, restaurants are
//! reserved for lunch rotation, and the remaining pool is windowed across
//! days by the style's activity density.
//!
//! The day window advances by `places_per_day` but spans
//! `activities_per_day` entries, so days can revisit or skip places when the
//! two differ; tests pin this windowing.

use crate::itinerary::prompt::title_case;
use crate::models::{AfternoonSlot, DayPlan, Place, TravelStyle};

/// Interest-specific advice appended to every itinerary
static INTEREST_TIPS: &[(&str, &str)] = &[
    (
        "food",
        "**Food:** Try street food, visit local markets, book food tours",
    ),
    (
        "history",
        "**History:** Consider guided tours, audio guides, museum passes",
    ),
    (
        "nature",
        "**Nature:** Bring appropriate gear, check weather, book eco-tours",
    ),
    (
        "art",
        "**Art:** Check museum schedules, book special exhibitions in advance",
    ),
    (
        "adventure",
        "**Adventure:** Book activities in advance, check safety requirements",
    ),
    (
        "relaxation",
        "**Relaxation:** Book spa treatments early, find quiet spots",
    ),
];

/// Build the full fallback itinerary document
pub fn build_itinerary(
    destination: &str,
    duration_days: u32,
    places: &[Place],
    interests: &[String],
    travel_style: TravelStyle,
) -> String {
    if places.is_empty() {
        return generic_framework(destination, interests, travel_style);
    }

    let day_plans = plan_days(places, duration_days, travel_style);
    render_itinerary(
        destination,
        duration_days,
        places.len(),
        interests,
        travel_style,
        &day_plans,
    )
}

/// Partition places across days into structured day plans
pub fn plan_days(
    places: &[Place],
    duration_days: u32,
    travel_style: TravelStyle,
) -> Vec<DayPlan> {
    let duration_days = duration_days.max(1);

    let mut restaurants: Vec<Place> = Vec::new();
    let mut nature: Vec<Place> = Vec::new();
    let mut culture: Vec<Place> = Vec::new();
    let mut attractions: Vec<Place> = Vec::new();
    let mut general: Vec<Place> = Vec::new();

    for place in places {
        let category = place.category.to_lowercase();
        let name = place.name.to_lowercase();

        if category.contains("restaurant") || category.contains("cafe") || name.contains("food") {
            restaurants.push(place.clone());
        } else if category.contains("park")
            || category.contains("nature")
            || name.contains("garden")
        {
            nature.push(place.clone());
        } else if category.contains("museum")
            || category.contains("gallery")
            || category.contains("church")
        {
            culture.push(place.clone());
        } else if category.contains("tourist_attraction") {
            attractions.push(place.clone());
        } else {
            general.push(place.clone());
        }
    }

    // Restaurants stay out of the sightseeing pool; they rotate through the
    // lunch slot instead
    let pool: Vec<Place> = attractions
        .into_iter()
        .chain(culture)
        .chain(nature)
        .chain(general)
        .collect();

    let activities_per_day = travel_style.activities_per_day();
    let places_per_day = (pool.len() / duration_days as usize).max(1);

    let mut day_plans = Vec::with_capacity(duration_days as usize);
    for day in 1..=duration_days {
        let start = (day as usize - 1) * places_per_day;
        let window: &[Place] = if start < pool.len() {
            &pool[start..(start + activities_per_day).min(pool.len())]
        } else {
            &[]
        };

        let lunch = if restaurants.is_empty() {
            None
        } else {
            Some(restaurants[(day as usize - 1) % restaurants.len()].clone())
        };

        let afternoon = match window.len() {
            0 => AfternoonSlot::FreeTime,
            1 => AfternoonSlot::ContinueMorning(window[0].name.clone()),
            _ => AfternoonSlot::Visit(window[1].clone()),
        };

        day_plans.push(DayPlan {
            day,
            morning: window.first().cloned(),
            lunch,
            afternoon,
            evening: window.get(2).cloned(),
        });
    }

    day_plans
}

/// Render structured day plans into the final document
fn render_itinerary(
    destination: &str,
    duration_days: u32,
    place_count: usize,
    interests: &[String],
    travel_style: TravelStyle,
    day_plans: &[DayPlan],
) -> String {
    let mut doc = format!("# {duration_days}-Day Itinerary for {destination}\n\n");
    doc.push_str(&format!(
        "**Travel Style:** {} | **Interests:** {}\n",
        title_case(travel_style.as_str()),
        interests.join(", ")
    ));
    doc.push_str(&format!("**Total Places to Visit:** {place_count}\n\n"));

    for plan in day_plans {
        doc.push_str(&render_day(plan, duration_days));
    }

    doc.push_str(&tips_block(destination, interests));
    doc.push_str("\n**Have an amazing trip!**\n");
    doc
}

fn render_day(plan: &DayPlan, duration_days: u32) -> String {
    let mut section = format!("## Day {}\n\n", plan.day);

    section.push_str("### Morning (9:00 AM - 12:00 PM)\n");
    match &plan.morning {
        Some(place) => section.push_str(&place_lines("Visit", place, true)),
        None => section.push_str("- Free time for exploration\n"),
    }

    section.push_str("\n### Lunch (12:00 PM - 1:30 PM)\n");
    match &plan.lunch {
        Some(restaurant) => section.push_str(&place_lines_short(restaurant)),
        None => {
            section.push_str("- Local restaurant (explore the area for dining options)\n");
        }
    }

    section.push_str("\n### Afternoon (1:30 PM - 5:00 PM)\n");
    match &plan.afternoon {
        AfternoonSlot::Visit(place) => section.push_str(&place_lines("Explore", place, false)),
        AfternoonSlot::ContinueMorning(name) => {
            section.push_str(&format!("- Continue exploring the {name} area\n"));
            section.push_str("- Walk around the neighborhood and discover hidden gems\n");
        }
        AfternoonSlot::FreeTime => {
            section.push_str("- Free time for shopping or relaxation\n");
        }
    }

    section.push_str("\n### Evening (5:00 PM onwards)\n");
    match &plan.evening {
        Some(place) => section.push_str(&place_lines("Visit", place, false)),
        None => {
            section.push_str("- Dinner at a local restaurant\n");
            section.push_str("- Evening stroll or local entertainment\n");
        }
    }

    section.push_str("\n**Day Tips:**\n");
    if plan.day == 1 {
        section.push_str("- Arrive early to make the most of your first day\n");
        section.push_str("- Get a local SIM card or check WiFi options\n");
    } else if plan.day == duration_days {
        section.push_str("- Pack and prepare for departure\n");
        section.push_str("- Buy souvenirs and last-minute shopping\n");
    } else {
        section.push_str("- Wear comfortable walking shoes\n");
        section.push_str("- Carry water and snacks\n");
    }

    section.push('\n');
    section.push_str(&"-".repeat(50));
    section.push_str("\n\n");
    section
}

/// Headline, rating and detail lines for an activity slot
fn place_lines(verb: &str, place: &Place, with_details: bool) -> String {
    let mut lines = format!("**{} {}**", verb, place.name);
    match place.rating {
        Some(rating) => lines.push_str(&format!(" ({rating}/5)\n")),
        None => lines.push('\n'),
    }
    if !place.description.is_empty() {
        lines.push_str(&format!("- {}\n", place.description));
    }
    if with_details {
        lines.push_str(&format!(
            "- Type: {}\n",
            title_case(&place.category.replace('_', " "))
        ));
        if !place.address.is_empty() {
            lines.push_str(&format!("- Location: {}\n", place.address));
        }
    }
    lines
}

/// Name, rating and description only, used for the lunch slot
fn place_lines_short(place: &Place) -> String {
    let mut lines = format!("**{}**", place.name);
    match place.rating {
        Some(rating) => lines.push_str(&format!(" ({rating}/5)\n")),
        None => lines.push('\n'),
    }
    if !place.description.is_empty() {
        lines.push_str(&format!("- {}\n", place.description));
    }
    lines
}

/// Fixed framework emitted when discovery found nothing at all
fn generic_framework(destination: &str, interests: &[String], travel_style: TravelStyle) -> String {
    let interests_joined = interests.join(", ");
    let mut doc = format!(
        "# Itinerary for {destination}\n\n\
         **Travel Style:** {}\n\
         **Interests:** {interests_joined}\n\n\
         No specific places were found for this destination. Here's a general framework:\n\n\
         ## Day 1\n\
         **Morning (9:00 AM - 12:00 PM)**\n\
         - Arrive and check into accommodation\n\
         - Get oriented with the city center\n\n\
         **Lunch (12:00 PM - 1:30 PM)**\n\
         - Try local cuisine at a nearby restaurant\n\n\
         **Afternoon (1:30 PM - 5:00 PM)**\n\
         - Explore main attractions and landmarks\n\
         - Visit tourist information center\n\n\
         **Evening (5:00 PM onwards)**\n\
         - Dinner at a recommended local restaurant\n\
         - Evening stroll through the city\n\n\
         ## Day 2\n\
         **Morning:** Visit major cultural sites or museums\n\
         **Afternoon:** Explore local markets or shopping areas\n\
         **Evening:** Experience local nightlife or entertainment\n\n\
         Continue this pattern for the remaining days, focusing on your interests: {interests_joined}.\n\n",
        title_case(travel_style.as_str())
    );
    doc.push_str(&tips_block(destination, interests));
    doc.push_str("\n**Have an amazing trip!**\n");
    doc
}

/// Fixed general-travel, interest-specific and app-suggestion tips
pub fn tips_block(destination: &str, interests: &[String]) -> String {
    let mut tips = format!("## Additional Tips for {destination}\n\n");

    tips.push_str("### General Travel Tips\n");
    tips.push_str("- Download offline maps before you go\n");
    tips.push_str("- Learn basic local phrases\n");
    tips.push_str("- Keep digital and physical copies of important documents\n");
    tips.push_str("- Research local customs and etiquette\n");
    tips.push_str("- Check visa requirements and vaccination needs\n\n");

    let matched: Vec<&str> = interests
        .iter()
        .filter_map(|interest| {
            INTEREST_TIPS
                .iter()
                .find(|(name, _)| name == interest)
                .map(|(_, tip)| *tip)
        })
        .collect();
    if !matched.is_empty() {
        tips.push_str("### Based on Your Interests\n");
        for tip in matched {
            tips.push_str(&format!("- {tip}\n"));
        }
        tips.push('\n');
    }

    tips.push_str("### Useful Apps\n");
    tips.push_str("- Google Translate for language help\n");
    tips.push_str("- Google Maps for navigation\n");
    tips.push_str("- Local transport apps\n");
    tips.push_str("- Currency converter\n");
    tips.push_str("- Weather forecast app\n");

    tips
}
