//! Data models for the trip planner
//!
//! A `TripRequest` is constructed per user submission and discarded after the
//! response; a `TravelPlan` lives only for one request/response cycle.

use crate::{PlannerError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Budget tier selected by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetTier {
    Low,
    Medium,
    High,
}

impl BudgetTier {
    /// Human-readable description used in prompts
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            BudgetTier::Low => "Budget-Friendly",
            BudgetTier::Medium => "Mid-Range",
            BudgetTier::High => "Luxury",
        }
    }
}

/// Structured user input describing a desired trip
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripRequest {
    /// Departure city
    pub origin: String,
    /// Destination city
    pub destination: String,
    /// Budget tier for the whole trip
    pub budget: BudgetTier,
    /// First day of the trip
    pub start_date: NaiveDate,
    /// Last day of the trip
    pub end_date: NaiveDate,
}

impl TripRequest {
    /// Validate the request, naming the offending field on failure
    pub fn validate(&self) -> Result<()> {
        if self.origin.trim().is_empty() {
            return Err(PlannerError::validation("origin", "must not be empty"));
        }

        if self.destination.trim().is_empty() {
            return Err(PlannerError::validation("destination", "must not be empty"));
        }

        if self.end_date < self.start_date {
            return Err(PlannerError::validation(
                "end_date",
                "must not be before start_date",
            ));
        }

        Ok(())
    }

    /// Trip length in days, inclusive of both endpoints
    #[must_use]
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

/// Named sections of a travel plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Flights,
    Itinerary,
    Restaurants,
    Hotels,
    Weather,
}

impl Section {
    /// All sections a complete plan carries, in rendering order
    pub const ALL: [Section; 5] = [
        Section::Flights,
        Section::Itinerary,
        Section::Restaurants,
        Section::Hotels,
        Section::Weather,
    ];

    /// Heading the model is asked to emit for this section
    #[must_use]
    pub fn heading(self) -> &'static str {
        match self {
            Section::Flights => "Flight Suggestions",
            Section::Itinerary => "Itinerary",
            Section::Restaurants => "Restaurant Recommendations",
            Section::Hotels => "Hotel Recommendations",
            Section::Weather => "Weather Forecast",
        }
    }
}

/// One day of the itinerary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayPlan {
    /// 1-based day number within the trip
    pub day: u32,
    /// Short title or theme for the day, when the model provides one
    pub title: Option<String>,
    /// Planned activities in order
    pub activities: Vec<String>,
}

/// One entry of the weather forecast
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherEntry {
    /// Forecast date, when one could be parsed from the model output
    pub date: Option<NaiveDate>,
    /// Forecast conditions as free text
    pub conditions: String,
}

/// Whether all plan sections could be recovered from the model output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum PlanCompleteness {
    /// All five sections were found
    Full,
    /// Some sections were missing or empty in the model output
    Partial { missing: Vec<Section> },
}

/// Structured output document with flight, itinerary, dining, lodging and
/// weather sections
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelPlan {
    /// Flight suggestions as free-text entries
    pub flights: Vec<String>,
    /// Ordered day-by-day plan
    pub itinerary: Vec<DayPlan>,
    /// Restaurant recommendations
    pub restaurants: Vec<String>,
    /// Hotel recommendations
    pub hotels: Vec<String>,
    /// Weather forecast entries
    pub weather: Vec<WeatherEntry>,
    /// Whether the model output covered every section
    pub completeness: PlanCompleteness,
}

impl TravelPlan {
    /// True when every section was recovered from the model output
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completeness == PlanCompleteness::Full
    }
}
