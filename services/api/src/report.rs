use clap::Args;
use optima_underwriter::config::AppConfig;
use optima_underwriter::error::AppError;
use optima_underwriter::workflows::quote::{
    normalize, provider_from_config, DecisionDocument, QuoteDecisionService, QuotePayload,
    RuleStatus,
};
use serde_json::Value;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub(crate) struct DecideArgs {
    /// Path to a JSON quote payload
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Print only the `{status, riskScore}` receipt
    #[arg(long, conflicts_with = "summary")]
    pub(crate) score_only: bool,
    /// Print a plain-text review summary instead of the JSON document
    #[arg(long)]
    pub(crate) summary: bool,
}

#[derive(Args, Debug)]
pub(crate) struct NormalizeArgs {
    /// Path to a JSON quote payload
    #[arg(long)]
    pub(crate) input: PathBuf,
}

pub(crate) async fn run_decide(args: DecideArgs) -> Result<(), AppError> {
    let DecideArgs {
        input,
        score_only,
        summary,
    } = args;

    let config = AppConfig::load()?;
    let payload = load_payload(&input)?;

    // The insights client is blocking, so both it and the pipeline stay off the runtime.
    let document = tokio::task::spawn_blocking(move || {
        let provider = provider_from_config(&config.insights);
        QuoteDecisionService::new(provider).decide(payload)
    })
    .await??;

    if score_only {
        println!("{}", serde_json::to_string(&document.receipt())?);
    } else if summary {
        print!("{}", render_decision(&document));
    } else {
        println!("{}", serde_json::to_string_pretty(&document)?);
    }
    Ok(())
}

pub(crate) fn run_normalize(args: NormalizeArgs) -> Result<(), AppError> {
    let payload = load_payload(&args.input)?;
    let quote = normalize(&QuotePayload::from_value(payload)?);
    println!("{}", serde_json::to_string_pretty(&quote)?);
    Ok(())
}

pub(crate) fn load_payload(path: &Path) -> Result<Value, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

pub(crate) fn render_decision(document: &DecisionDocument) -> String {
    let mut lines = Vec::new();
    let executive = &document.executive_summary;

    lines.push("Quote decision".to_string());
    lines.push(executive.headline.clone());
    lines.push(format!("Recommendation: {}", executive.recommendation));
    lines.push(format!(
        "Eligibility: {} | Compliance: {}",
        document.underwriting.eligibility, document.compliance.overall_status
    ));

    lines.push(String::new());
    lines.push("Key points".to_string());
    for point in &executive.key_points {
        lines.push(format!("- {point}"));
    }

    if !document.summary.eligibility_reasons.is_empty() {
        lines.push(String::new());
        lines.push("Eligibility reasons".to_string());
        for reason in &document.summary.eligibility_reasons {
            lines.push(format!("- {reason}"));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Compliance checks ({} passed, {} warnings, {} failed)",
        document.underwriting_summary.passed,
        document.underwriting_summary.warnings,
        document.underwriting_summary.failed
    ));
    for check in &document.compliance.rules_checked {
        lines.push(format!("- [{}] {}: {}", check.status, check.rule, check.detail));
        if check.status != RuleStatus::Pass {
            if let Some(recommendation) = &check.recommendation {
                lines.push(format!("    -> {recommendation}"));
            }
        }
    }

    let state = &document.state_compliance;
    lines.push(String::new());
    if state.known {
        lines.push(format!(
            "State {}: minimum liability {}",
            display_value(&state.state),
            state.minimum_liability.as_deref().unwrap_or("n/a")
        ));
    } else {
        lines.push(format!(
            "State {}: no reference requirements on file",
            display_value(&state.state)
        ));
    }

    lines.push(String::new());
    match &document.ai_insights.narrative {
        Some(narrative) => {
            lines.push("AI narrative".to_string());
            lines.push(narrative.clone());
        }
        None => lines.push("AI narrative unavailable".to_string()),
    }

    let mut rendered = lines.join("\n");
    rendered.push('\n');
    rendered
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "n/a".to_string(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use optima_underwriter::workflows::quote::StaticInsights;
    use serde_json::json;
    use std::sync::Arc;

    fn quote() -> Value {
        json!({
            "customer": { "firstName": "Dana", "lastName": "Reyes", "age": 45 },
            "drivers": [{ "firstName": "Dana", "age": 45, "licenseNumber": "R5550101" }],
            "vehicles": [{
                "vin": "5YJ3E1EA7KF317000",
                "year": 2019,
                "make": "Tesla",
                "model": "Model 3"
            }],
            "coverage": { "liabilityLimit": "100/300/100", "deductible": 1000 },
            "guidewire": { "state": "OH" }
        })
    }

    fn decide(insights: StaticInsights) -> DecisionDocument {
        QuoteDecisionService::new(Arc::new(insights))
            .decide(quote())
            .expect("decision")
    }

    #[test]
    fn summary_lists_headline_checks_and_state() {
        let document = decide(StaticInsights::failing("offline"));
        let rendered = render_decision(&document);

        assert!(rendered.starts_with("Quote decision\n"));
        assert!(rendered.contains(&document.executive_summary.headline));
        assert!(rendered.contains("- [Warn] ai_review_available"));
        assert!(rendered.contains("State OH: minimum liability 25/50/25"));
        assert!(rendered.contains("AI narrative unavailable"));
    }

    #[test]
    fn summary_includes_narrative_when_present() {
        let document = decide(StaticInsights::new("{\"narrative\": \"Stable household.\"}"));
        let rendered = render_decision(&document);

        assert!(rendered.contains("AI narrative\nStable household."));
    }

    #[test]
    fn load_payload_reports_missing_and_malformed_files() {
        let missing = std::env::temp_dir().join("optima-underwriter-missing-quote.json");
        assert!(matches!(load_payload(&missing), Err(AppError::Io(_))));

        let malformed = std::env::temp_dir().join(format!(
            "optima-underwriter-malformed-{}.json",
            std::process::id()
        ));
        std::fs::write(&malformed, "{ not json").expect("write temp file");
        let result = load_payload(&malformed);
        std::fs::remove_file(&malformed).ok();
        assert!(matches!(result, Err(AppError::Decode(_))));
    }

    #[test]
    fn load_payload_reads_json_documents() {
        let path = std::env::temp_dir().join(format!(
            "optima-underwriter-quote-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, serde_json::to_vec(&quote()).expect("encode")).expect("write");
        let payload = load_payload(&path);
        std::fs::remove_file(&path).ok();

        assert_eq!(payload.expect("payload")["guidewire"]["state"], json!("OH"));
    }
}
