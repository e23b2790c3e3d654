use super::super::extractor::ExtractedQuote;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Statutory auto minimums for one state. Limits are in thousands of dollars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateRequirements {
    pub bodily_injury_per_person: u32,
    pub bodily_injury_per_accident: u32,
    pub property_damage: u32,
    pub uninsured_motorist_required: bool,
    pub no_fault: bool,
}

impl StateRequirements {
    const fn new(per_person: u32, per_accident: u32, property: u32) -> Self {
        Self {
            bodily_injury_per_person: per_person,
            bodily_injury_per_accident: per_accident,
            property_damage: property,
            uninsured_motorist_required: false,
            no_fault: false,
        }
    }

    const fn with_uninsured_motorist(mut self) -> Self {
        self.uninsured_motorist_required = true;
        self
    }

    const fn with_no_fault(mut self) -> Self {
        self.no_fault = true;
        self
    }

    pub fn minimum_liability(&self) -> String {
        format!(
            "{}/{}/{}",
            self.bodily_injury_per_person, self.bodily_injury_per_accident, self.property_damage
        )
    }
}

static STATE_REQUIREMENTS: OnceLock<HashMap<&'static str, StateRequirements>> = OnceLock::new();

fn requirements_table() -> &'static HashMap<&'static str, StateRequirements> {
    STATE_REQUIREMENTS.get_or_init(|| {
        HashMap::from([
            ("AZ", StateRequirements::new(25, 50, 15)),
            ("CA", StateRequirements::new(30, 60, 15)),
            ("FL", StateRequirements::new(10, 20, 10).with_no_fault()),
            ("GA", StateRequirements::new(25, 50, 25)),
            (
                "IL",
                StateRequirements::new(25, 50, 20).with_uninsured_motorist(),
            ),
            (
                "MA",
                StateRequirements::new(25, 50, 30)
                    .with_uninsured_motorist()
                    .with_no_fault(),
            ),
            ("MI", StateRequirements::new(50, 100, 10).with_no_fault()),
            (
                "NJ",
                StateRequirements::new(35, 70, 25)
                    .with_uninsured_motorist()
                    .with_no_fault(),
            ),
            (
                "NY",
                StateRequirements::new(25, 50, 10)
                    .with_uninsured_motorist()
                    .with_no_fault(),
            ),
            ("OH", StateRequirements::new(25, 50, 25)),
            ("PA", StateRequirements::new(15, 30, 5).with_no_fault()),
            ("TX", StateRequirements::new(30, 60, 25)),
            ("WA", StateRequirements::new(25, 50, 10)),
        ])
    })
}

/// Look up a state by its postal code, case-insensitively.
pub fn requirements_for(state: &str) -> Option<&'static StateRequirements> {
    requirements_table().get(state.trim().to_ascii_uppercase().as_str())
}

/// State code carried by a JSON value, if it is a non-blank string.
pub(crate) fn state_code(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_ascii_uppercase)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateComplianceBlock {
    pub state: Value,
    pub known: bool,
    pub minimum_liability: Option<String>,
    pub uninsured_motorist_required: Option<bool>,
    pub no_fault: Option<bool>,
    pub notes: String,
}

/// Statutory reference for the rating state, falling back to the customer's address state.
pub fn build_state_compliance(extracted: &ExtractedQuote) -> StateComplianceBlock {
    let code = state_code(&extracted.state)
        .or_else(|| extracted.customer.get("state").and_then(state_code));
    let Some(code) = code else {
        return StateComplianceBlock {
            state: Value::Null,
            known: false,
            minimum_liability: None,
            uninsured_motorist_required: None,
            no_fault: None,
            notes: "rating state not provided".to_string(),
        };
    };

    match requirements_for(&code) {
        Some(requirements) => {
            let mut notes = format!(
                "{code} requires {} minimum liability",
                requirements.minimum_liability()
            );
            if requirements.uninsured_motorist_required {
                notes.push_str("; uninsured motorist coverage required");
            }
            if requirements.no_fault {
                notes.push_str("; no-fault (PIP) state");
            }
            StateComplianceBlock {
                state: Value::String(code),
                known: true,
                minimum_liability: Some(requirements.minimum_liability()),
                uninsured_motorist_required: Some(requirements.uninsured_motorist_required),
                no_fault: Some(requirements.no_fault),
                notes,
            }
        }
        None => StateComplianceBlock {
            notes: format!("no statutory reference on file for {code}"),
            state: Value::String(code),
            known: false,
            minimum_liability: None,
            uninsured_motorist_required: None,
            no_fault: None,
        },
    }
}
