//! Prompt composition for plan generation
//!
//! The prompt is deterministic for a given `TripRequest` so the single
//! upstream call is reproducible and the expected section headings are fixed
//! for the parser.

use crate::models::{Section, TripRequest};

/// Build the plan-generation prompt for a validated request
#[must_use]
pub fn build_plan_prompt(request: &TripRequest) -> String {
    let budget = request.budget.description();
    let duration = request.duration_days();
    let start = request.start_date.format("%Y-%m-%d");
    let end = request.end_date.format("%Y-%m-%d");

    format!(
        "As a travel planning AI, create a complete trip plan for a journey from \
{origin} to {destination}.\n\
The trip starts on {start} and ends on {end}, lasting {duration} days. \
All suggestions must fit a **{budget} budget**.\n\n\
Structure the response as Markdown with exactly these five top-level headings, \
in this order:\n\n\
## {flights}\n\
Suggest a few possible airlines, potential layover cities and a general idea \
of flight duration and typical costs for this route and budget. Emphasize \
that these are suggestions based on general knowledge and that travelers \
should perform a real-time flight search for accurate prices.\n\n\
## {itinerary}\n\
Provide a day-by-day plan with one subheading per day in the form \
'Day N: <theme>' and a bulleted list of morning, afternoon and evening \
activities suitable for a {budget} budget, mentioning cost implications \
where relevant.\n\n\
## {restaurants}\n\
List the top 5 restaurants in {destination} that fit a {budget} budget, one \
bullet each, with neighborhood or address and cuisine type.\n\n\
## {hotels}\n\
List the top 5 hotels in {destination} that fit a {budget} budget, one \
bullet each, with neighborhood or address and approximate cost per night.\n\n\
## {weather}\n\
Give a day-by-day outlook for {destination} between {start} and {end}, one \
bullet per day starting with the date in YYYY-MM-DD format, covering \
temperature range, precipitation and wind, followed by a short clothing \
suggestion.",
        origin = request.origin.trim(),
        destination = request.destination.trim(),
        flights = Section::Flights.heading(),
        itinerary = Section::Itinerary.heading(),
        restaurants = Section::Restaurants.heading(),
        hotels = Section::Hotels.heading(),
        weather = Section::Weather.heading(),
    )
}
