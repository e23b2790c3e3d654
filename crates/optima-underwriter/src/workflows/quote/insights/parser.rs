use super::AiInsights;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InsightField {
    DriverRisk,
    PricingRationale,
    UnderwritingExplanation,
    ImprovementSuggestions,
}

impl InsightField {
    const ALL: [InsightField; 4] = [
        InsightField::DriverRisk,
        InsightField::PricingRationale,
        InsightField::UnderwritingExplanation,
        InsightField::ImprovementSuggestions,
    ];

    const fn heading(self) -> &'static str {
        match self {
            InsightField::DriverRisk => "driver risk",
            InsightField::PricingRationale => "pricing rationale",
            InsightField::UnderwritingExplanation => "underwriting explanation",
            InsightField::ImprovementSuggestions => "improvement suggestions",
        }
    }

    const fn keys(self) -> [&'static str; 2] {
        match self {
            InsightField::DriverRisk => ["driverRisk", "driver_risk"],
            InsightField::PricingRationale => ["pricingRationale", "pricing_rationale"],
            InsightField::UnderwritingExplanation => {
                ["underwritingExplanation", "underwriting_explanation"]
            }
            InsightField::ImprovementSuggestions => {
                ["improvementSuggestions", "improvement_suggestions"]
            }
        }
    }

    fn slot(self, insights: &mut AiInsights) -> &mut Option<String> {
        match self {
            InsightField::DriverRisk => &mut insights.driver_risk,
            InsightField::PricingRationale => &mut insights.pricing_rationale,
            InsightField::UnderwritingExplanation => &mut insights.underwriting_explanation,
            InsightField::ImprovementSuggestions => &mut insights.improvement_suggestions,
        }
    }
}

/// Parse raw collaborator output into the fixed insight fields.
///
/// A JSON object (optionally inside a code fence) is read by key. Anything else is scanned for
/// the four section headings. Output that matches neither yields all-`null` fields.
pub fn parse_ai_output(raw: Option<&str>) -> AiInsights {
    let Some(text) = raw.map(str::trim).filter(|text| !text.is_empty()) else {
        return AiInsights::default();
    };

    if let Ok(Value::Object(object)) = serde_json::from_str::<Value>(strip_code_fence(text)) {
        return from_object(&object);
    }

    from_sections(text)
}

fn strip_code_fence(text: &str) -> &str {
    let Some(body) = text.strip_prefix("```") else {
        return text;
    };
    let body = body.strip_suffix("```").unwrap_or(body);
    // Drop the info string ("json") on the opening fence line.
    match body.split_once('\n') {
        Some((info, rest)) if !info.trim_start().starts_with('{') => rest.trim(),
        _ => body.trim(),
    }
}

fn from_object(object: &Map<String, Value>) -> AiInsights {
    let mut insights = AiInsights::default();
    for field in InsightField::ALL {
        *field.slot(&mut insights) = field
            .keys()
            .iter()
            .find_map(|key| object.get(*key).and_then(text_of));
    }
    insights.narrative = object
        .get("narrative")
        .and_then(text_of)
        .or_else(|| compose_narrative(&insights));
    insights
}

fn text_of(value: &Value) -> Option<String> {
    let text = match value {
        Value::Null => return None,
        Value::String(text) => text.trim().to_string(),
        Value::Array(items) => items
            .iter()
            .filter_map(text_of)
            .collect::<Vec<_>>()
            .join("\n"),
        other => other.to_string(),
    };
    (!text.is_empty()).then_some(text)
}

fn from_sections(text: &str) -> AiInsights {
    let mut bodies: [Option<Vec<&str>>; 4] = Default::default();
    let mut current: Option<usize> = None;

    for line in text.lines() {
        if let Some((index, rest)) = heading(line) {
            current = Some(index);
            let body = bodies[index].get_or_insert_with(Vec::new);
            if !rest.is_empty() {
                body.push(rest);
            }
            continue;
        }
        if let Some(body) = current.and_then(|index| bodies[index].as_mut()) {
            body.push(line.trim());
        }
    }

    let mut insights = AiInsights::default();
    for (field, body) in InsightField::ALL.into_iter().zip(bodies) {
        *field.slot(&mut insights) = body
            .map(|lines| lines.join("\n").trim().to_string())
            .filter(|text| !text.is_empty());
    }
    insights.narrative = compose_narrative(&insights);
    insights
}

const HEADING_MARKERS: [char; 5] = [':', '*', '#', '-', '_'];

/// Trailing title words allowed after a field name, as in `Driver Risk Assessment`.
const MAX_TITLE_WORDS: usize = 3;

/// Recognize a section heading line such as `## Driver Risk`, `**Pricing Rationale:**`,
/// `### Driver Risk Assessment` or `1. Improvement Suggestions - ...`. Returns the field index
/// and any text after the heading.
fn heading(line: &str) -> Option<(usize, &str)> {
    let trimmed = line.trim().trim_start_matches(|c: char| {
        matches!(c, '#' | '*' | '-' | '.' | ')' | '_') || c.is_ascii_digit() || c.is_whitespace()
    });
    let lower = trimmed.to_ascii_lowercase();

    let index = InsightField::ALL
        .iter()
        .position(|field| lower.starts_with(field.heading()))?;
    let after = &trimmed[InsightField::ALL[index].heading().len()..];
    let marker = after.trim_start();

    let remainder = if marker.is_empty() || marker.starts_with(HEADING_MARKERS) {
        marker
    } else if after.starts_with(char::is_whitespace) {
        let (title, remainder) = match marker.find(HEADING_MARKERS) {
            Some(position) => marker.split_at(position),
            None => (marker, ""),
        };
        if !is_title_tail(title) {
            return None;
        }
        remainder
    } else {
        return None;
    };

    let rest = remainder
        .trim_start_matches(|c: char| HEADING_MARKERS.contains(&c) || c.is_whitespace())
        .trim_end();
    Some((index, rest))
}

/// A few capitalized words with no sentence punctuation, so prose like
/// `Driver risk is high.` stays body text.
fn is_title_tail(title: &str) -> bool {
    let words: Vec<&str> = title.split_whitespace().collect();
    !words.is_empty()
        && words.len() <= MAX_TITLE_WORDS
        && words.iter().all(|word| {
            word.chars().all(|c| c.is_alphabetic() || c == '&')
                && word.chars().next().is_some_and(char::is_uppercase)
        })
}

fn compose_narrative(insights: &AiInsights) -> Option<String> {
    let parts: Vec<&str> = [
        &insights.driver_risk,
        &insights.pricing_rationale,
        &insights.underwriting_explanation,
        &insights.improvement_suggestions,
    ]
    .into_iter()
    .filter_map(|part| part.as_deref())
    .collect();

    (!parts.is_empty()).then(|| parts.join("\n\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_blank_output_is_all_null() {
        assert!(parse_ai_output(None).is_empty());
        assert!(parse_ai_output(Some("   \n")).is_empty());
    }

    #[test]
    fn garbage_output_is_all_null() {
        let insights = parse_ai_output(Some("<<<%%% not a report %%%>>>"));
        assert!(insights.is_empty());
        assert_eq!(insights.narrative, None);
    }

    #[test]
    fn reads_json_object_with_mixed_key_styles() {
        let raw = r#"{
            "driverRisk": "Low",
            "pricing_rationale": "Clean history",
            "underwritingExplanation": ["Two drivers", "One vehicle"],
            "improvementSuggestions": null,
            "narrative": "Solid risk."
        }"#;
        let insights = parse_ai_output(Some(raw));

        assert_eq!(insights.driver_risk.as_deref(), Some("Low"));
        assert_eq!(insights.pricing_rationale.as_deref(), Some("Clean history"));
        assert_eq!(
            insights.underwriting_explanation.as_deref(),
            Some("Two drivers\nOne vehicle")
        );
        assert_eq!(insights.improvement_suggestions, None);
        assert_eq!(insights.narrative.as_deref(), Some("Solid risk."));
    }

    #[test]
    fn reads_fenced_json_and_composes_narrative() {
        let raw = "```json\n\
                   {\"driverRisk\": \"Moderate\", \"pricingRationale\": \"Urban zip\"}\n\
                   ```";
        let insights = parse_ai_output(Some(raw));

        assert_eq!(insights.driver_risk.as_deref(), Some("Moderate"));
        assert_eq!(
            insights.narrative.as_deref(),
            Some("Moderate\n\nUrban zip")
        );
    }

    #[test]
    fn reads_heading_delimited_sections() {
        let raw = "## Driver Risk\nOne minor accident.\n\n\
                   **Pricing Rationale:** Base rate applies.\n\
                   1. Underwriting Explanation - Referred for missing VIN.\n\
                   Improvement Suggestions:\n- Provide VIN\n- Add telematics";
        let insights = parse_ai_output(Some(raw));

        assert_eq!(insights.driver_risk.as_deref(), Some("One minor accident."));
        assert_eq!(insights.pricing_rationale.as_deref(), Some("Base rate applies."));
        assert_eq!(
            insights.underwriting_explanation.as_deref(),
            Some("Referred for missing VIN.")
        );
        assert_eq!(
            insights.improvement_suggestions.as_deref(),
            Some("- Provide VIN\n- Add telematics")
        );
        assert!(insights.narrative.is_some());
    }

    #[test]
    fn prose_mentioning_a_heading_is_not_a_section() {
        let insights = parse_ai_output(Some("Driver risk is hard to judge here."));
        assert!(insights.is_empty());
    }

    #[test]
    fn headings_with_trailing_title_words_open_sections() {
        let raw = "### Driver Risk Assessment\nOne at-fault accident.\n\
                   ### Pricing Rationale\nUrban ZIP.\n\
                   **Underwriting Explanation Summary:** Within appetite.\n\
                   Improvement Suggestions For The Insured\n- Add telematics";
        let insights = parse_ai_output(Some(raw));

        assert_eq!(insights.driver_risk.as_deref(), Some("One at-fault accident."));
        assert_eq!(insights.pricing_rationale.as_deref(), Some("Urban ZIP."));
        assert_eq!(
            insights.underwriting_explanation.as_deref(),
            Some("Within appetite.")
        );
        assert_eq!(
            insights.improvement_suggestions.as_deref(),
            Some("- Add telematics")
        );
    }

    #[test]
    fn long_title_tails_stay_in_the_current_section() {
        let raw = "## Driver Risk\nLow.\nImprovement Suggestions For The Named Insured";
        let insights = parse_ai_output(Some(raw));

        assert_eq!(
            insights.driver_risk.as_deref(),
            Some("Low.\nImprovement Suggestions For The Named Insured")
        );
        assert_eq!(insights.improvement_suggestions, None);
    }

    #[test]
    fn lowercase_continuations_are_not_headings() {
        let insights =
            parse_ai_output(Some("Driver risk is high\nPricing Rationale Notes\nFair."));
        assert_eq!(insights.driver_risk, None);
        assert_eq!(insights.pricing_rationale.as_deref(), Some("Fair."));
    }
}
