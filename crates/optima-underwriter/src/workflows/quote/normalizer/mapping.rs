use crate::workflows::quote::resolver::FieldDefault::{
    EmptyList, EmptyString, False, Null, Text, Zero,
};
use crate::workflows::quote::resolver::FieldRule;

/// Top-level keys that may hold the customer sub-tree, in priority order.
pub(crate) const CUSTOMER_ROOTS: &[&str] = &["customer", "insured", "applicant", "policyHolder"];

pub(crate) const COVERAGE_TYPE_FALLBACK: &str = "Standard Auto";

// Customer
pub(crate) const CUSTOMER_FIRST_NAME: FieldRule = FieldRule::new(
    "firstName",
    &[
        "customer.firstName",
        "insured.givenName",
        "applicant.firstName",
        "policyHolder.firstName",
    ],
    EmptyString,
);
pub(crate) const CUSTOMER_LAST_NAME: FieldRule = FieldRule::new(
    "lastName",
    &[
        "customer.lastName",
        "insured.familyName",
        "applicant.lastName",
        "policyHolder.lastName",
    ],
    EmptyString,
);
pub(crate) const CUSTOMER_AGE: FieldRule = FieldRule::new(
    "age",
    &["customer.age", "insured.age", "applicant.age"],
    Null,
);
pub(crate) const CUSTOMER_LICENSE: FieldRule = FieldRule::new(
    "licenseNumber",
    &[
        "customer.licenseNumber",
        "insured.license",
        "applicant.licenseNumber",
    ],
    EmptyString,
);
pub(crate) const ADDRESS_STREET: FieldRule = FieldRule::new(
    "address.street",
    &[
        "customer.address.street",
        "insured.location.street",
        "riskLocation.street",
    ],
    EmptyString,
);
pub(crate) const ADDRESS_CITY: FieldRule = FieldRule::new(
    "address.city",
    &[
        "customer.address.city",
        "insured.location.city",
        "riskLocation.city",
    ],
    EmptyString,
);
pub(crate) const ADDRESS_STATE: FieldRule = FieldRule::new(
    "address.state",
    &[
        "customer.address.state",
        "insured.location.stateCd",
        "riskLocation.state",
    ],
    EmptyString,
);
pub(crate) const ADDRESS_ZIP: FieldRule = FieldRule::new(
    "address.zip",
    &[
        "customer.address.zip",
        "insured.location.postalCode",
        "riskLocation.zipCode",
    ],
    EmptyString,
);

// Applicant (report only, direct keys of `applicant`)
pub(crate) const APPLICANT_NAME: FieldRule = FieldRule::new("name", &["name"], EmptyString);
pub(crate) const APPLICANT_STATE: FieldRule = FieldRule::new("state", &["state"], EmptyString);
pub(crate) const APPLICANT_ZIP: FieldRule = FieldRule::new("zip", &["zip"], EmptyString);
pub(crate) const APPLICANT_ADDRESS: FieldRule =
    FieldRule::new("address", &["address"], EmptyString);

// Drivers
pub(crate) const DRIVER_LISTS: FieldRule = FieldRule::new(
    "drivers",
    &["drivers", "operatorList", "driverInfo", "riskDrivers"],
    EmptyList,
);
pub(crate) const DRIVER_FIRST_NAME: FieldRule =
    FieldRule::new("firstName", &["firstName", "fname", "givenName"], EmptyString);
pub(crate) const DRIVER_LAST_NAME: FieldRule =
    FieldRule::new("lastName", &["lastName", "lname", "familyName"], EmptyString);
pub(crate) const DRIVER_AGE: FieldRule = FieldRule::new("age", &["age"], Null);
pub(crate) const DRIVER_LICENSE: FieldRule =
    FieldRule::new("licenseNumber", &["licenseNumber", "license"], EmptyString);
pub(crate) const DRIVER_ACCIDENTS: FieldRule = FieldRule::new(
    "accidents",
    &["accHist", "accidents", "accidentCount"],
    Zero,
);
pub(crate) const DRIVER_VIOLATIONS: FieldRule =
    FieldRule::new("violations", &["violations", "violationCount"], Zero);
pub(crate) const DRIVER_MAJOR_VIOLATION: FieldRule =
    FieldRule::new("majorViolation", &["majorViolation", "majorViol"], False);

// Vehicles
pub(crate) const VEHICLE_LISTS: FieldRule = FieldRule::new(
    "vehicles",
    &["vehicles", "autos", "riskVehicles", "vehicleList"],
    EmptyList,
);
pub(crate) const VEHICLE_VIN: FieldRule = FieldRule::new("vin", &["vin", "VIN", "vehicleId"], Null);
pub(crate) const VEHICLE_YEAR: FieldRule = FieldRule::new("year", &["year", "modelYear"], Null);
pub(crate) const VEHICLE_MAKE: FieldRule =
    FieldRule::new("make", &["make", "manufacturer"], Null);
pub(crate) const VEHICLE_MODEL: FieldRule =
    FieldRule::new("model", &["model", "vehicleModel"], Null);
pub(crate) const VEHICLE_MILEAGE: FieldRule =
    FieldRule::new("annualMileage", &["annualMileage", "mileage"], Null);

// Policy
pub(crate) const POLICY_STATE: FieldRule = FieldRule::new(
    "state",
    &[
        "policy.state",
        "insured.location.stateCd",
        "riskLocation.state",
    ],
    Null,
);
pub(crate) const POLICY_EFFECTIVE_DATE: FieldRule = FieldRule::new(
    "effectiveDate",
    &["policy.effectiveDate", "transaction.effectiveDate"],
    Null,
);
pub(crate) const POLICY_EXPIRATION_DATE: FieldRule = FieldRule::new(
    "expirationDate",
    &["policy.expirationDate", "transaction.expirationDate"],
    Null,
);
pub(crate) const POLICY_TRANSACTION_ID: FieldRule = FieldRule::new(
    "transactionId",
    &["policy.transactionId", "transaction.id"],
    Null,
);
pub(crate) const POLICY_SOURCE_SYSTEM: FieldRule =
    FieldRule::new("sourceSystem", &["sourceSystem", "system", "origin"], Null);

// Coverage: direct keys of `coverage` are consulted before these cross-tree paths.
pub(crate) const COVERAGE_LIABILITY: FieldRule = FieldRule::new(
    "liabilityLimit",
    &[
        "coverage.liabilityLimit",
        "limits.liability",
        "policy.coverage.liability",
        "liabilityLimit",
    ],
    Null,
);
pub(crate) const COVERAGE_COLLISION: FieldRule = FieldRule::new(
    "collisionDeductible",
    &[
        "coverage.collisionDeductible",
        "deductibles.collision",
        "collisionDeductible",
    ],
    Null,
);
pub(crate) const COVERAGE_COMPREHENSIVE: FieldRule = FieldRule::new(
    "comprehensiveDeductible",
    &[
        "coverage.comprehensiveDeductible",
        "deductibles.comprehensive",
        "comprehensiveDeductible",
    ],
    Null,
);
pub(crate) const COVERAGE_DEDUCTIBLE: FieldRule = FieldRule::new(
    "deductible",
    &[
        "coverage.deductible",
        "deductible",
        "deductibles.collision",
        "coverage.collisionDeductible",
    ],
    Null,
);
pub(crate) const COVERAGE_TYPE: FieldRule = FieldRule::new(
    "coverageType",
    &[
        "coverage.coverageType",
        "coverage.type",
        "policy.coverage.type",
        "coverageType",
    ],
    Text(COVERAGE_TYPE_FALLBACK),
);

// Risk (report only)
pub(crate) const RISK_SCORE: FieldRule = FieldRule::new(
    "score",
    &[
        "risk.score",
        "underwriting.riskScore",
        "uw.risk.score",
        "score",
    ],
    Null,
);
pub(crate) const RISK_ELIGIBILITY: FieldRule = FieldRule::new(
    "eligibility",
    &[
        "risk.eligibility",
        "underwriting.eligibility",
        "uw.eligibility",
        "eligibility",
    ],
    Null,
);
pub(crate) const RISK_TOP_DRIVERS: FieldRule = FieldRule::new(
    "topDrivers",
    &[
        "risk.topDrivers",
        "underwriting.topRiskDrivers",
        "uw.riskDrivers",
    ],
    EmptyList,
);

// Pricing (report only)
pub(crate) const PRICING_FINAL: FieldRule = FieldRule::new(
    "finalPremium",
    &[
        "pricing.finalPremium",
        "premium.final",
        "premium.total",
        "finalPremium",
    ],
    Null,
);
pub(crate) const PRICING_BASE: FieldRule = FieldRule::new(
    "base",
    &["pricing.base", "premium.base", "basePremium"],
    Null,
);
pub(crate) const PRICING_DRIVER_IMPACT: FieldRule = FieldRule::new(
    "driverImpact",
    &["pricing.driverImpact", "premium.driverImpact"],
    Null,
);
pub(crate) const PRICING_VEHICLE_IMPACT: FieldRule = FieldRule::new(
    "vehicleImpact",
    &["pricing.vehicleImpact", "premium.vehicleImpact"],
    Null,
);
pub(crate) const PRICING_ZIP_IMPACT: FieldRule = FieldRule::new(
    "zipImpact",
    &["pricing.zipImpact", "premium.zipImpact"],
    Null,
);
pub(crate) const PRICING_COVERAGE_IMPACT: FieldRule = FieldRule::new(
    "coverageImpact",
    &["pricing.coverageImpact", "premium.coverageImpact"],
    Null,
);
pub(crate) const PRICING_DISCOUNTS: FieldRule = FieldRule::new(
    "discounts",
    &["pricing.discounts", "premium.discounts"],
    Null,
);
pub(crate) const PRICING_NARRATIVE: FieldRule = FieldRule::new(
    "narrative",
    &["pricing.narrative", "premium.narrative", "pricingNotes"],
    Null,
);
pub(crate) const PRICING_TOP_FACTORS: FieldRule = FieldRule::new(
    "topPricingFactors",
    &[
        "pricing.topPricingFactors",
        "pricing.factors",
        "underwriting.pricingFactors",
    ],
    EmptyList,
);

// Summary (report only)
pub(crate) const SUMMARY_NARRATIVE: FieldRule = FieldRule::new(
    "narrative",
    &[
        "summary.narrative",
        "underwriting.summary",
        "uw.summary",
        "executiveSummary",
        "narrative",
    ],
    Null,
);

// Compliance (report only)
pub(crate) const COMPLIANCE_STATE: FieldRule = FieldRule::new(
    "state",
    &[
        "compliance.state",
        "policy.state",
        "riskLocation.state",
        "insured.location.stateCd",
    ],
    Null,
);
pub(crate) const COMPLIANCE_STATUS: FieldRule = FieldRule::new(
    "overallStatus",
    &[
        "compliance.overallStatus",
        "compliance.status",
        "uw.complianceStatus",
        "underwriting.complianceStatus",
    ],
    Null,
);
pub(crate) const COMPLIANCE_NOTES: FieldRule = FieldRule::new(
    "notes",
    &[
        "compliance.notes",
        "compliance.message",
        "uw.complianceNotes",
        "underwriting.complianceNotes",
    ],
    Null,
);
pub(crate) const COMPLIANCE_RULES: FieldRule = FieldRule::new(
    "rulesChecked",
    &[
        "compliance.rulesChecked",
        "compliance.rules",
        "uw.rulesChecked",
        "underwriting.rules",
    ],
    EmptyList,
);

// AI insights (report only)
pub(crate) const INSIGHT_DRIVER_RISK: FieldRule = FieldRule::new(
    "driverRisk",
    &[
        "aiInsights.driverRisk",
        "insights.driverRisk",
        "underwriting.driverRisk",
        "uw.driverRisk",
    ],
    Null,
);
pub(crate) const INSIGHT_PRICING_RATIONALE: FieldRule = FieldRule::new(
    "pricingRationale",
    &[
        "aiInsights.pricingRationale",
        "insights.pricingRationale",
        "underwriting.pricingRationale",
        "uw.pricingRationale",
    ],
    Null,
);
pub(crate) const INSIGHT_EXPLANATION: FieldRule = FieldRule::new(
    "underwritingExplanation",
    &[
        "aiInsights.underwritingExplanation",
        "insights.underwritingExplanation",
        "underwriting.explanation",
        "uw.explanation",
    ],
    Null,
);
pub(crate) const INSIGHT_SUGGESTIONS: FieldRule = FieldRule::new(
    "improvementSuggestions",
    &[
        "aiInsights.improvementSuggestions",
        "insights.improvementSuggestions",
        "underwriting.suggestions",
        "uw.suggestions",
    ],
    Null,
);
pub(crate) const INSIGHT_NARRATIVE: FieldRule = FieldRule::new(
    "narrative",
    &[
        "aiInsights.narrative",
        "insights.narrative",
        "underwriting.narrative",
        "uw.narrative",
    ],
    Null,
);

// Lineage (report only)
pub(crate) const LINEAGE_FIELDS: FieldRule = FieldRule::new(
    "fields",
    &["lineage.fields", "dataLineage.fields", "traceability.fields"],
    EmptyList,
);
pub(crate) const LINEAGE_MISSING: FieldRule = FieldRule::new(
    "missing",
    &[
        "lineage.missing",
        "dataLineage.missing",
        "traceability.missing",
    ],
    EmptyList,
);

/// Every path-driven rule, for table-level checks.
#[cfg(test)]
pub(crate) const ALL_RULES: &[FieldRule] = &[
    CUSTOMER_FIRST_NAME,
    CUSTOMER_LAST_NAME,
    CUSTOMER_AGE,
    CUSTOMER_LICENSE,
    ADDRESS_STREET,
    ADDRESS_CITY,
    ADDRESS_STATE,
    ADDRESS_ZIP,
    APPLICANT_NAME,
    APPLICANT_STATE,
    APPLICANT_ZIP,
    APPLICANT_ADDRESS,
    DRIVER_LISTS,
    DRIVER_FIRST_NAME,
    DRIVER_LAST_NAME,
    DRIVER_AGE,
    DRIVER_LICENSE,
    DRIVER_ACCIDENTS,
    DRIVER_VIOLATIONS,
    DRIVER_MAJOR_VIOLATION,
    VEHICLE_LISTS,
    VEHICLE_VIN,
    VEHICLE_YEAR,
    VEHICLE_MAKE,
    VEHICLE_MODEL,
    VEHICLE_MILEAGE,
    POLICY_STATE,
    POLICY_EFFECTIVE_DATE,
    POLICY_EXPIRATION_DATE,
    POLICY_TRANSACTION_ID,
    POLICY_SOURCE_SYSTEM,
    COVERAGE_LIABILITY,
    COVERAGE_COLLISION,
    COVERAGE_COMPREHENSIVE,
    COVERAGE_DEDUCTIBLE,
    COVERAGE_TYPE,
    RISK_SCORE,
    RISK_ELIGIBILITY,
    RISK_TOP_DRIVERS,
    PRICING_FINAL,
    PRICING_BASE,
    PRICING_DRIVER_IMPACT,
    PRICING_VEHICLE_IMPACT,
    PRICING_ZIP_IMPACT,
    PRICING_COVERAGE_IMPACT,
    PRICING_DISCOUNTS,
    PRICING_NARRATIVE,
    PRICING_TOP_FACTORS,
    SUMMARY_NARRATIVE,
    COMPLIANCE_STATE,
    COMPLIANCE_STATUS,
    COMPLIANCE_NOTES,
    COMPLIANCE_RULES,
    INSIGHT_DRIVER_RISK,
    INSIGHT_PRICING_RATIONALE,
    INSIGHT_EXPLANATION,
    INSIGHT_SUGGESTIONS,
    INSIGHT_NARRATIVE,
    LINEAGE_FIELDS,
    LINEAGE_MISSING,
];
