//! Demo fixtures: the hard-coded home-insurance walkthrough.

use crate::catalog::CatalogData;
use crate::model::{
    ActivityLogEntry, ActivityStatus, ComparisonRow, Complexity, ConstraintType, Impact,
    Improvement, Integration, IntegrationCategory, Metric, MetricValue, ProgressStep,
    ReasoningCategory, ReasoningEntry, Recommendation, RiskLevel, Task, TaskCategory, Trend,
};

/// Annual premium of the user's current policy in the demo.
pub const CURRENT_ANNUAL_PREMIUM: u32 = 1200;

/// Build the full demo catalogue.
pub fn demo_catalog() -> CatalogData {
    CatalogData {
        tasks: tasks(),
        constraint_types: constraint_types(),
        integrations: integrations(),
        activity_log: activity_log(),
        reasoning_log: reasoning_log(),
        recommendations: recommendations(),
        comparison: comparison(),
        metrics: metrics(),
        steps: steps(),
        current_annual_premium: CURRENT_ANNUAL_PREMIUM,
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn task(
    id: &str,
    title: &str,
    description: &str,
    category: TaskCategory,
    complexity: Complexity,
    estimated_time: &str,
    success_rate: u8,
) -> Task {
    Task {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        category,
        complexity,
        estimated_time: estimated_time.to_string(),
        success_rate,
    }
}

fn tasks() -> Vec<Task> {
    vec![
        task(
            "insurance-1",
            "Find Cheaper Home Insurance",
            "Compare home insurance policies to find better coverage at lower cost",
            TaskCategory::Insurance,
            Complexity::Moderate,
            "10-15 minutes",
            95,
        ),
        task(
            "investment-1",
            "Optimize Retirement Portfolio",
            "Analyze current investments and recommend portfolio improvements",
            TaskCategory::Investment,
            Complexity::Complex,
            "20-30 minutes",
            88,
        ),
        task(
            "travel-1",
            "Plan Business Trip to Tokyo",
            "Find best flights, hotels, and create itinerary for 5-day business trip",
            TaskCategory::Travel,
            Complexity::Moderate,
            "15-20 minutes",
            92,
        ),
        task(
            "shopping-1",
            "Find Best Laptop for Development",
            "Compare laptops based on performance, price, and developer needs",
            TaskCategory::Shopping,
            Complexity::Simple,
            "8-12 minutes",
            97,
        ),
        task(
            "research-1",
            "Market Analysis for Startup",
            "Research competitive landscape and market opportunities",
            TaskCategory::Research,
            Complexity::Complex,
            "25-35 minutes",
            85,
        ),
    ]
}

fn constraint_type(id: &str, label: &str, icon: &str, placeholder: &str, description: &str) -> ConstraintType {
    ConstraintType {
        id: id.to_string(),
        label: label.to_string(),
        icon: icon.to_string(),
        placeholder: placeholder.to_string(),
        description: description.to_string(),
    }
}

fn constraint_types() -> Vec<ConstraintType> {
    vec![
        constraint_type("budget", "Budget Cap", "DollarSign", "e.g., Maximum $150/month", "Set spending limits"),
        constraint_type(
            "exclusion",
            "Company Exclusion",
            "Building",
            "e.g., Exclude State Farm",
            "Avoid specific providers",
        ),
        constraint_type(
            "requirement",
            "Feature Requirement",
            "Shield",
            "e.g., Must include fire coverage",
            "Essential features",
        ),
        constraint_type("timeline", "Timeline", "Clock", "e.g., Complete within 2 weeks", "Time constraints"),
        constraint_type("quality", "Quality Standard", "Star", "e.g., Minimum 4-star rating", "Quality requirements"),
    ]
}

fn integration(id: &str, name: &str, description: &str, icon: &str, category: IntegrationCategory) -> Integration {
    Integration {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        connected: false,
        category,
    }
}

fn integrations() -> Vec<Integration> {
    vec![
        integration("bank", "Bank Account", "Connect for payment verification", "CreditCard", IntegrationCategory::Banking),
        integration("dropbox", "Dropbox", "Access your document vault", "Cloud", IntegrationCategory::Documents),
        integration("google", "Google Drive", "Import documents and data", "Database", IntegrationCategory::Documents),
        integration("quickbooks", "QuickBooks", "Financial data integration", "DollarSign", IntegrationCategory::Banking),
        integration("salesforce", "Salesforce", "CRM data access", "Building", IntegrationCategory::Services),
    ]
}

fn activity_log() -> Vec<ActivityLogEntry> {
    vec![
        ActivityLogEntry {
            id: "1".to_string(),
            timestamp: "2:03 PM".to_string(),
            step: "Step 1/4: Initial Analysis".to_string(),
            status: ActivityStatus::Completed,
            description: "Analyzed current insurance policy".to_string(),
            details: Some(
                "Extracted coverage details, premium costs, and policy terms from uploaded document. \
                 Identified key areas for potential improvement."
                    .to_string(),
            ),
            duration: Some("2m 15s".to_string()),
            confidence: Some(98),
        },
        ActivityLogEntry {
            id: "2".to_string(),
            timestamp: "2:05 PM".to_string(),
            step: "Step 2/4: Data Collection".to_string(),
            status: ActivityStatus::Completed,
            description: "Identified 47 potential insurance providers".to_string(),
            details: Some(
                "Filtered by geographic availability, coverage requirements, and customer service ratings. \
                 Excluded State Farm per user request."
                    .to_string(),
            ),
            duration: Some("1m 45s".to_string()),
            confidence: Some(95),
        },
        ActivityLogEntry {
            id: "3".to_string(),
            timestamp: "2:07 PM".to_string(),
            step: "Step 2/4: Data Collection".to_string(),
            status: ActivityStatus::InProgress,
            description: "Gathering quotes from top 12 providers...".to_string(),
            details: Some(
                "Requesting personalized quotes based on your profile and requirements. \
                 Processing real-time pricing data."
                    .to_string(),
            ),
            duration: Some("3m 20s".to_string()),
            confidence: Some(87),
        },
        ActivityLogEntry {
            id: "4".to_string(),
            timestamp: "2:08 PM".to_string(),
            step: "Step 2/4: Data Collection".to_string(),
            status: ActivityStatus::Pending,
            description: "Validating coverage options".to_string(),
            details: None,
            duration: None,
            confidence: None,
        },
    ]
}

fn reasoning(id: &str, timestamp: &str, text: &str, confidence: u8, category: ReasoningCategory) -> ReasoningEntry {
    ReasoningEntry {
        id: id.to_string(),
        timestamp: timestamp.to_string(),
        reasoning: text.to_string(),
        confidence,
        category,
    }
}

fn reasoning_log() -> Vec<ReasoningEntry> {
    vec![
        reasoning(
            "1",
            "2:03 PM",
            "Your current policy shows $1,200 annual premium with basic coverage. Market analysis suggests \
             25-40% savings possible with comparable coverage.",
            95,
            ReasoningCategory::Analysis,
        ),
        reasoning(
            "2",
            "2:05 PM",
            "Excluded State Farm per your request. Prioritizing providers with excellent customer service \
             ratings (>4.5/5) and fire coverage inclusion.",
            88,
            ReasoningCategory::Decision,
        ),
        reasoning(
            "3",
            "2:07 PM",
            "Found 3 providers offering 30%+ savings with equivalent coverage. Verifying policy terms and \
             hidden fees before final evaluation.",
            92,
            ReasoningCategory::Optimization,
        ),
    ]
}

fn recommendations() -> Vec<Recommendation> {
    vec![
        Recommendation {
            id: "allstate".to_string(),
            provider: "Allstate".to_string(),
            annual_premium: 695,
            monthly_savings: 42,
            rating: 4.6,
            coverage_score: 95,
            recommended: true,
            features: strings(&[
                "Fire Coverage",
                "Flood Protection",
                "Personal Property",
                "Liability Coverage",
                "24/7 Claims Support",
            ]),
            pros: strings(&[
                "Highest coverage score",
                "Excellent customer service",
                "24/7 claims support",
                "No hidden fees",
            ]),
            cons: strings(&["Slightly higher deductible", "Premium pricing"]),
            ai_reasoning: strings(&[
                "Allstate offers the best balance of coverage and cost savings with 42% annual savings ($505 reduction)",
                "Enhanced fire and flood coverage significantly exceeds your current policy limits",
                "4.6/5 customer rating and 24/7 claims support provide superior service experience",
                "All your specified requirements (fire coverage, State Farm exclusion) are met",
                "Policy terms include no hidden fees and straightforward cancellation policy",
            ]),
            risk_level: RiskLevel::Low,
            processing_time: "2-3 business days".to_string(),
        },
        Recommendation {
            id: "progressive".to_string(),
            provider: "Progressive".to_string(),
            annual_premium: 780,
            monthly_savings: 35,
            rating: 4.3,
            coverage_score: 88,
            recommended: false,
            features: strings(&["Fire Coverage", "Personal Property", "Liability Coverage", "Online Management"]),
            pros: strings(&[
                "Lower deductible",
                "Easy online management",
                "Good mobile app",
                "Fast claims processing",
            ]),
            cons: strings(&["No flood protection included", "Limited coverage options"]),
            ai_reasoning: strings(&[
                "Progressive offers competitive pricing with 35% savings",
                "Excellent digital experience and mobile app functionality",
                "Lower deductible provides immediate cost relief",
                "Limited coverage compared to recommended option",
            ]),
            risk_level: RiskLevel::Medium,
            processing_time: "1-2 business days".to_string(),
        },
        Recommendation {
            id: "geico".to_string(),
            provider: "Geico".to_string(),
            annual_premium: 720,
            monthly_savings: 40,
            rating: 4.1,
            coverage_score: 82,
            recommended: false,
            features: strings(&["Fire Coverage", "Personal Property", "Basic Liability", "Multi-policy Discounts"]),
            pros: strings(&["Competitive pricing", "Fast claim processing", "Multi-policy discounts available"]),
            cons: strings(&["Limited coverage options", "Basic customer support", "Lower coverage score"]),
            ai_reasoning: strings(&[
                "Geico provides the highest cost savings at 40%",
                "Fast claims processing and competitive pricing",
                "Lower coverage score may not meet all requirements",
                "Basic customer support compared to competitors",
            ]),
            risk_level: RiskLevel::Medium,
            processing_time: "1-2 business days".to_string(),
        },
    ]
}

fn row(feature: &str, current: &str, recommended: &str, improvement: Improvement, impact: Impact) -> ComparisonRow {
    ComparisonRow {
        feature: feature.to_string(),
        current: current.to_string(),
        recommended: recommended.to_string(),
        improvement,
        impact,
    }
}

fn comparison() -> Vec<ComparisonRow> {
    use Impact::{High, Low, Medium};
    use Improvement::{Better, Worse};
    vec![
        row("Annual Premium", "$1,200", "$695", Better, High),
        row("Monthly Premium", "$100", "$58", Better, High),
        row("Deductible", "$500", "$750", Worse, Medium),
        row("Fire Coverage", "$50,000", "$75,000", Better, High),
        row("Flood Protection", "Not included", "Included", Better, High),
        row("Personal Property", "$25,000", "$40,000", Better, Medium),
        row("Liability Limit", "$100,000", "$200,000", Better, Medium),
        row("Customer Rating", "3.8/5", "4.6/5", Better, Medium),
        row("Claims Processing", "5-7 days", "24-48 hours", Better, Low),
        row("Policy Flexibility", "Standard", "Enhanced", Better, Low),
    ]
}

fn metric(label: &str, value: MetricValue, change: &str, trend: Trend, unit: &str) -> Metric {
    Metric {
        label: label.to_string(),
        value,
        change: change.to_string(),
        trend,
        unit: unit.to_string(),
    }
}

fn metrics() -> Vec<Metric> {
    vec![
        metric("Providers Analyzed", MetricValue::Count(12), "+3", Trend::Up, "companies"),
        metric("Potential Savings", MetricValue::Count(425), "+25", Trend::Up, "$/year"),
        metric("Coverage Score", MetricValue::Count(95), "+15", Trend::Up, "%"),
        metric("Processing Time", MetricValue::Text("8m 30s".to_string()), "-2m", Trend::Down, ""),
        metric("Confidence Level", MetricValue::Count(92), "+3", Trend::Up, "%"),
        metric("Options Found", MetricValue::Count(3), "+1", Trend::Up, "policies"),
    ]
}

fn steps() -> Vec<ProgressStep> {
    let step = |number: u8, name: &str, status: ActivityStatus| ProgressStep {
        number,
        name: name.to_string(),
        status,
    };
    vec![
        step(1, "Initial Analysis", ActivityStatus::Completed),
        step(2, "Data Collection", ActivityStatus::InProgress),
        step(3, "Option Evaluation", ActivityStatus::Pending),
        step(4, "Final Recommendations", ActivityStatus::Pending),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_catalog_is_valid() {
        demo_catalog().validate().expect("demo fixtures must satisfy catalogue invariants");
    }

    #[test]
    fn exactly_one_recommended() {
        let recs = recommendations();
        assert_eq!(recs.iter().filter(|r| r.recommended).count(), 1);
        assert_eq!(recs[0].id, "allstate");
    }

    #[test]
    fn every_constraint_type_has_a_placeholder() {
        for ct in constraint_types() {
            assert!(ct.placeholder.starts_with("e.g.,"), "{}", ct.id);
        }
    }
}
