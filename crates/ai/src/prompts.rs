//! Request DTOs for the AI endpoints and the prompts built from them.
//!
//! Each DTO renders into a [`Prompt`]: a fixed system instruction describing
//! the expected JSON answer, plus a user message listing whatever context
//! the caller supplied. Absent fields are left out rather than sent as
//! placeholders.

use std::fmt::Write as _;

use bidtrack_core::currency::format_inr;
use bidtrack_core::types::MinorUnits;
use serde::Deserialize;
use validator::Validate;

/// A chat prompt: system instruction plus user message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: &'static str,
    pub user: String,
}

/// Anything that can be sent to the completion API.
pub trait BuildPrompt {
    fn prompt(&self) -> Prompt;
}

const ANALYZE_SYSTEM: &str = "You are a bid manager for an Indian contracting company. \
Assess how well the tender fits the company. Reply with a JSON object only: \
{\"score\": <integer 0-100>, \"summary\": string, \"strengths\": [string], \
\"concerns\": [string], \"recommendation\": \"bid\" | \"no_bid\" | \"review\"}.";

const GENERATE_BID_SYSTEM: &str = "You write formal tender responses for an Indian contracting \
company. Draft the requested bid content in a professional tone. Reply with a JSON object only: \
{\"content\": string, \"sections\": [{\"heading\": string, \"body\": string}]}.";

const PRICING_SYSTEM: &str = "You are a pricing analyst for public procurement bids in India. \
Suggest a competitive quote. Amounts are in rupees. Reply with a JSON object only: \
{\"suggestedPrice\": number, \"minPrice\": number, \"maxPrice\": number, \
\"winProbability\": <integer 0-100>, \"rationale\": string}.";

const RISK_SYSTEM: &str = "You assess commercial and delivery risk of public tenders. \
Reply with a JSON object only: {\"riskLevel\": \"low\" | \"medium\" | \"high\", \
\"score\": <integer 0-100, higher is riskier>, \"risks\": [{\"risk\": string, \
\"mitigation\": string}], \"summary\": string}.";

/// `POST /api/ai/analyze-tender`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeTenderRequest {
    #[validate(length(min = 1, max = 500))]
    pub title: String,
    pub organization: Option<String>,
    #[validate(length(max = 20000))]
    pub description: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    /// Minor currency units.
    pub value: Option<MinorUnits>,
    pub deadline: Option<String>,
    #[validate(length(max = 5000))]
    pub company_profile: Option<String>,
}

/// `POST /api/ai/generate-bid`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateBidRequest {
    #[validate(length(min = 1, max = 500))]
    pub title: String,
    pub organization: Option<String>,
    #[validate(length(max = 20000))]
    pub description: Option<String>,
    #[validate(length(max = 10000))]
    pub requirements: Option<String>,
    #[validate(length(max = 5000))]
    pub company_profile: Option<String>,
    /// Which part to draft, e.g. "cover letter" or "technical proposal".
    pub section: Option<String>,
}

/// `POST /api/ai/pricing-suggestion`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PricingSuggestionRequest {
    #[validate(length(min = 1, max = 500))]
    pub title: String,
    #[validate(length(max = 20000))]
    pub description: Option<String>,
    pub category: Option<String>,
    /// Minor currency units.
    pub estimated_value: Option<MinorUnits>,
    #[validate(range(min = 0, max = 1000))]
    pub competitor_count: Option<i32>,
    /// Our cost base in minor units.
    pub cost_estimate: Option<MinorUnits>,
}

/// `POST /api/ai/risk-assessment`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessmentRequest {
    #[validate(length(min = 1, max = 500))]
    pub title: String,
    pub organization: Option<String>,
    #[validate(length(max = 20000))]
    pub description: Option<String>,
    /// Minor currency units.
    pub value: Option<MinorUnits>,
    pub emd_amount: Option<MinorUnits>,
    pub deadline: Option<String>,
}

/// Append `label: value` when the value is present and non-blank.
fn field(out: &mut String, label: &str, value: Option<&str>) {
    if let Some(v) = value.map(str::trim).filter(|v| !v.is_empty()) {
        let _ = writeln!(out, "{label}: {v}");
    }
}

fn amount(out: &mut String, label: &str, value: Option<MinorUnits>) {
    if let Some(v) = value {
        let _ = writeln!(out, "{label}: {}", format_inr(v));
    }
}

impl BuildPrompt for AnalyzeTenderRequest {
    fn prompt(&self) -> Prompt {
        let mut user = String::new();
        field(&mut user, "Tender", Some(&self.title));
        field(&mut user, "Organization", self.organization.as_deref());
        field(&mut user, "Category", self.category.as_deref());
        field(&mut user, "Location", self.location.as_deref());
        amount(&mut user, "Value", self.value);
        field(&mut user, "Deadline", self.deadline.as_deref());
        field(&mut user, "Description", self.description.as_deref());
        field(&mut user, "Company profile", self.company_profile.as_deref());
        Prompt {
            system: ANALYZE_SYSTEM,
            user,
        }
    }
}

impl BuildPrompt for GenerateBidRequest {
    fn prompt(&self) -> Prompt {
        let mut user = String::new();
        let section = self
            .section
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("complete bid response");
        let _ = writeln!(user, "Draft the {section} for this tender.");
        field(&mut user, "Tender", Some(&self.title));
        field(&mut user, "Organization", self.organization.as_deref());
        field(&mut user, "Description", self.description.as_deref());
        field(&mut user, "Requirements", self.requirements.as_deref());
        field(&mut user, "Company profile", self.company_profile.as_deref());
        Prompt {
            system: GENERATE_BID_SYSTEM,
            user,
        }
    }
}

impl BuildPrompt for PricingSuggestionRequest {
    fn prompt(&self) -> Prompt {
        let mut user = String::new();
        field(&mut user, "Tender", Some(&self.title));
        field(&mut user, "Category", self.category.as_deref());
        amount(&mut user, "Estimated value", self.estimated_value);
        amount(&mut user, "Our cost estimate", self.cost_estimate);
        if let Some(n) = self.competitor_count {
            let _ = writeln!(user, "Expected competitors: {n}");
        }
        field(&mut user, "Description", self.description.as_deref());
        Prompt {
            system: PRICING_SYSTEM,
            user,
        }
    }
}

impl BuildPrompt for RiskAssessmentRequest {
    fn prompt(&self) -> Prompt {
        let mut user = String::new();
        field(&mut user, "Tender", Some(&self.title));
        field(&mut user, "Organization", self.organization.as_deref());
        amount(&mut user, "Value", self.value);
        amount(&mut user, "EMD", self.emd_amount);
        field(&mut user, "Deadline", self.deadline.as_deref());
        field(&mut user, "Description", self.description.as_deref());
        Prompt {
            system: RISK_SYSTEM,
            user,
        }
    }
}
