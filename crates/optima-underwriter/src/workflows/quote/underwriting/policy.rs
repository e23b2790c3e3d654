use super::super::domain::{CanonicalDriver, CanonicalVehicle};
use super::super::resolver::{as_flag, as_number, is_blank};
use super::config::UnderwritingConfig;
use super::rules::count;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Underwriting classification of a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Eligibility {
    Eligible,
    Referred,
    Ineligible,
}

impl Eligibility {
    pub const fn label(self) -> &'static str {
        match self {
            Eligibility::Eligible => "Eligible",
            Eligibility::Referred => "Referred",
            Eligibility::Ineligible => "Ineligible",
        }
    }
}

impl fmt::Display for Eligibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classifier outcome together with the reasons that drove it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityDecision {
    pub eligibility: Eligibility,
    pub reasons: Vec<String>,
}

pub(crate) fn decide_eligibility(
    drivers: &[CanonicalDriver],
    vehicles: &[CanonicalVehicle],
    config: &UnderwritingConfig,
) -> EligibilityDecision {
    let mut ineligible = Vec::new();
    let mut referred = Vec::new();

    if drivers.is_empty() {
        referred.push("no drivers listed".to_string());
    }
    if vehicles.is_empty() {
        referred.push("no vehicles listed".to_string());
    }

    for (index, driver) in drivers.iter().enumerate() {
        let fields = &driver.normalized;
        let position = index + 1;

        if as_flag(&fields.major_violation) {
            ineligible.push(format!("driver {position} has a major violation"));
        }

        let accidents = count(&fields.accidents);
        if accidents >= config.max_accidents {
            ineligible.push(format!(
                "driver {position} has {accidents} accidents (cutoff {})",
                config.max_accidents
            ));
        } else if accidents + count(&fields.violations) >= config.referral_incidents {
            referred.push(format!("driver {position} incident history needs review"));
        }

        match as_number(&fields.age) {
            Some(age) if age < config.minimum_driver_age as f64 => {
                ineligible.push(format!("driver {position} is under the minimum licensing age"));
            }
            Some(_) => {}
            None => referred.push(format!("driver {position} age not provided")),
        }

        if is_blank(&fields.license_number) {
            referred.push(format!("driver {position} license number missing"));
        }
    }

    for (index, vehicle) in vehicles.iter().enumerate() {
        if is_blank(&vehicle.normalized.vin) {
            referred.push(format!("vehicle {} VIN missing", index + 1));
        }
    }

    if !ineligible.is_empty() {
        EligibilityDecision {
            eligibility: Eligibility::Ineligible,
            reasons: ineligible,
        }
    } else if !referred.is_empty() {
        EligibilityDecision {
            eligibility: Eligibility::Referred,
            reasons: referred,
        }
    } else {
        EligibilityDecision {
            eligibility: Eligibility::Eligible,
            reasons: Vec::new(),
        }
    }
}
