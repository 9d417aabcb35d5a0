//! Best-effort segmentation of model output into plan sections
//!
//! The model is asked for Markdown with five fixed headings, but the output
//! has no guaranteed schema. Heading matching is a heuristic: a plan is
//! always produced, with `PlanCompleteness::Partial` naming sections that
//! could not be recovered.

use chrono::NaiveDate;
use tracing::warn;

use crate::models::{DayPlan, PlanCompleteness, Section, TravelPlan, WeatherEntry};

/// Parse free-text model output into a structured travel plan
#[must_use]
pub fn parse_plan(text: &str) -> TravelPlan {
    let mut buckets: [Vec<&str>; 5] = Default::default();
    let mut current: Option<usize> = None;

    for line in text.lines() {
        if let Some(section) = match_heading(line) {
            current = Some(section_index(section));
            continue;
        }
        if let Some(idx) = current {
            buckets[idx].push(line);
        }
    }

    let flights = collect_entries(&buckets[section_index(Section::Flights)]);
    let itinerary = parse_itinerary(&buckets[section_index(Section::Itinerary)]);
    let restaurants = collect_entries(&buckets[section_index(Section::Restaurants)]);
    let hotels = collect_entries(&buckets[section_index(Section::Hotels)]);
    let weather = parse_weather(&buckets[section_index(Section::Weather)]);

    let missing: Vec<Section> = Section::ALL
        .into_iter()
        .filter(|section| match section {
            Section::Flights => flights.is_empty(),
            Section::Itinerary => itinerary.is_empty(),
            Section::Restaurants => restaurants.is_empty(),
            Section::Hotels => hotels.is_empty(),
            Section::Weather => weather.is_empty(),
        })
        .collect();

    let completeness = if missing.is_empty() {
        PlanCompleteness::Full
    } else {
        warn!("Plan is missing sections: {missing:?}");
        PlanCompleteness::Partial { missing }
    };

    TravelPlan {
        flights,
        itinerary,
        restaurants,
        hotels,
        weather,
        completeness,
    }
}

fn section_index(section: Section) -> usize {
    Section::ALL.iter().position(|s| *s == section).unwrap_or(0)
}

/// Match a line against the known section headings
///
/// Accepts Markdown headings of any level as well as bold standalone lines,
/// and keys on section words rather than exact heading text.
fn match_heading(line: &str) -> Option<Section> {
    let trimmed = line.trim();
    let looks_like_heading = trimmed.starts_with('#')
        || (trimmed.starts_with("**") && trimmed.trim_end_matches(':').ends_with("**"));
    if !looks_like_heading {
        return None;
    }

    let cleaned = trimmed
        .trim_start_matches('#')
        .trim_matches(|c: char| c == '*' || c == ':' || c.is_whitespace())
        .to_lowercase();

    // Day subheadings inside the itinerary must not reset the section
    if cleaned.starts_with("day ") {
        return None;
    }

    if cleaned.contains("flight") {
        Some(Section::Flights)
    } else if cleaned.contains("itinerary") {
        Some(Section::Itinerary)
    } else if cleaned.contains("restaurant") || cleaned.contains("dining") {
        Some(Section::Restaurants)
    } else if cleaned.contains("hotel") || cleaned.contains("lodging") {
        Some(Section::Hotels)
    } else if cleaned.contains("weather") {
        Some(Section::Weather)
    } else {
        None
    }
}

/// Strip a leading list marker ("- ", "* ", "3. ") from a line
fn strip_bullet(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    if let Some(rest) = trimmed.strip_prefix("- ") {
        return Some(rest.trim());
    }
    if let Some(rest) = trimmed.strip_prefix("* ") {
        return Some(rest.trim());
    }

    let digits = trimmed.chars().take_while(char::is_ascii_digit).count();
    if digits > 0
        && let Some(rest) = trimmed[digits..].strip_prefix(". ")
    {
        return Some(rest.trim());
    }

    None
}

/// Collect free-text entries, preferring list items over prose lines
fn collect_entries(lines: &[&str]) -> Vec<String> {
    let bullets: Vec<String> = lines
        .iter()
        .filter_map(|line| strip_bullet(line))
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect();

    if !bullets.is_empty() {
        return bullets;
    }

    lines
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a "Day N: title" subheading
fn parse_day_header(line: &str) -> Option<(u32, Option<String>)> {
    let cleaned = line
        .trim()
        .trim_start_matches('#')
        .trim_matches(|c: char| c == '*' || c.is_whitespace());

    let rest = cleaned.strip_prefix("Day ").or_else(|| {
        cleaned.strip_prefix("day ")
    })?;

    let digits = rest.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let day: u32 = rest[..digits].parse().ok()?;

    let title = rest[digits..]
        .trim_start_matches(|c: char| c == ':' || c == '-' || c.is_whitespace())
        .trim_end_matches('*')
        .trim();
    let title = if title.is_empty() {
        None
    } else {
        Some(title.to_string())
    };

    Some((day, title))
}

/// Split the itinerary into ordered day plans
///
/// Falls back to a single unnumbered day when no "Day N" markers are found.
fn parse_itinerary(lines: &[&str]) -> Vec<DayPlan> {
    let mut days: Vec<DayPlan> = Vec::new();

    for line in lines {
        if let Some((day, title)) = parse_day_header(line) {
            days.push(DayPlan {
                day,
                title,
                activities: Vec::new(),
            });
            continue;
        }

        let Some(entry) = strip_bullet(line) else {
            continue;
        };
        if entry.is_empty() {
            continue;
        }

        if let Some(current) = days.last_mut() {
            current.activities.push(entry.to_string());
        } else {
            days.push(DayPlan {
                day: 1,
                title: None,
                activities: vec![entry.to_string()],
            });
        }
    }

    days
}

/// Parse weather entries, extracting a leading YYYY-MM-DD date when present
fn parse_weather(lines: &[&str]) -> Vec<WeatherEntry> {
    collect_entries(lines)
        .into_iter()
        .map(|entry| {
            let candidate = entry.get(..10).unwrap_or("");
            match candidate.parse::<NaiveDate>() {
                Ok(date) => {
                    let conditions = entry[10..]
                        .trim_start_matches(|c: char| {
                            c == ':' || c == '-' || c == ',' || c.is_whitespace()
                        })
                        .to_string();
                    WeatherEntry {
                        date: Some(date),
                        conditions,
                    }
                }
                Err(_) => WeatherEntry {
                    date: None,
                    conditions: entry,
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str = "\
Here is your trip plan.

## Flight Suggestions
- Air France, direct from JFK, around $600 round trip
- Delta with a layover in Amsterdam

## Itinerary
### Day 1: Arrival
- Morning: check in near the Marais
- Evening: walk along the Seine
### Day 2: Museums
- Morning: Louvre
- Afternoon: Musee d'Orsay

## Restaurant Recommendations
- Le Comptoir, Saint-Germain, bistro
- Breizh Cafe, Marais, creperie

## Hotel Recommendations
- Hotel des Arts, Montmartre, ~$150/night

## Weather Forecast
- 2025-06-01: High 22C / Low 14C, light rain, light wind
- 2025-06-02: High 24C / Low 15C, sunny
";

    #[test]
    fn test_well_formed_response_is_full() {
        let plan = parse_plan(WELL_FORMED);
        assert_eq!(plan.completeness, PlanCompleteness::Full);
        assert_eq!(plan.flights.len(), 2);
        assert_eq!(plan.restaurants.len(), 2);
        assert_eq!(plan.hotels.len(), 1);
        assert!(plan.flights[0].contains("Air France"));
    }

    #[test]
    fn test_itinerary_days_are_structured() {
        let plan = parse_plan(WELL_FORMED);
        assert_eq!(plan.itinerary.len(), 2);
        assert_eq!(plan.itinerary[0].day, 1);
        assert_eq!(plan.itinerary[0].title.as_deref(), Some("Arrival"));
        assert_eq!(plan.itinerary[0].activities.len(), 2);
        assert_eq!(plan.itinerary[1].day, 2);
        assert_eq!(plan.itinerary[1].title.as_deref(), Some("Museums"));
    }

    #[test]
    fn test_weather_dates_are_parsed() {
        let plan = parse_plan(WELL_FORMED);
        assert_eq!(plan.weather.len(), 2);
        assert_eq!(
            plan.weather[0].date,
            Some("2025-06-01".parse().unwrap())
        );
        assert!(plan.weather[0].conditions.contains("light rain"));
        assert!(!plan.weather[0].conditions.starts_with(':'));
    }

    #[test]
    fn test_missing_sections_are_reported() {
        let text = "## Flight Suggestions\n- one option\n\n## Itinerary\n- do things\n";
        let plan = parse_plan(text);
        assert_eq!(plan.flights.len(), 1);
        match plan.completeness {
            PlanCompleteness::Partial { ref missing } => {
                assert_eq!(
                    missing,
                    &vec![Section::Restaurants, Section::Hotels, Section::Weather]
                );
            }
            PlanCompleteness::Full => panic!("expected partial plan"),
        }
    }

    #[test]
    fn test_unstructured_text_yields_all_missing() {
        let plan = parse_plan("The model rambled without any headings at all.");
        match plan.completeness {
            PlanCompleteness::Partial { ref missing } => {
                assert_eq!(missing.len(), 5);
            }
            PlanCompleteness::Full => panic!("expected partial plan"),
        }
    }

    #[test]
    fn test_bold_headings_are_accepted() {
        let text = "**Flight Suggestions**\n- budget airline\n";
        let plan = parse_plan(text);
        assert_eq!(plan.flights, vec!["budget airline".to_string()]);
    }

    #[test]
    fn test_numbered_lists_are_accepted() {
        let text = "## Hotel Recommendations\n1. First hotel\n2. Second hotel\n";
        let plan = parse_plan(text);
        assert_eq!(plan.hotels.len(), 2);
        assert_eq!(plan.hotels[0], "First hotel");
    }

    #[test]
    fn test_itinerary_without_day_markers_falls_back() {
        let text = "## Itinerary\n- visit the old town\n- eat local food\n";
        let plan = parse_plan(text);
        assert_eq!(plan.itinerary.len(), 1);
        assert_eq!(plan.itinerary[0].day, 1);
        assert_eq!(plan.itinerary[0].activities.len(), 2);
    }

    #[test]
    fn test_prose_section_without_bullets_is_kept() {
        let text = "## Weather Forecast\nExpect mild days and cool evenings.\n";
        let plan = parse_plan(text);
        assert_eq!(plan.weather.len(), 1);
        assert!(plan.weather[0].date.is_none());
    }

    #[test]
    fn test_day_header_variants() {
        assert_eq!(
            parse_day_header("### Day 3: Coast"),
            Some((3, Some("Coast".to_string())))
        );
        assert_eq!(parse_day_header("**Day 1**"), Some((1, None)));
        assert_eq!(parse_day_header("- just a bullet"), None);
    }
}
