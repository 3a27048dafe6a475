//! Priority assessment of a lead, shown in the internal alert.

use crate::intake::IntakeSubmission;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeadAssessment {
    pub revenue_size: RevenueSize,
    pub exit_urgency: ExitUrgency,
    pub pain_severity: PainSeverity,
    pub response_time: ResponseTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevenueSize {
    Small,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitUrgency {
    Urgent,
    Planned,
    Early,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PainSeverity {
    Low,
    Moderate,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseTime {
    HighPriority,
    MediumPriority,
    Standard,
}

impl LeadAssessment {
    pub fn assess(submission: &IntakeSubmission) -> Self {
        Self::from_parts(
            &submission.revenue_range,
            &submission.exit_timeline,
            submission.pain_points.len(),
        )
    }

    pub fn from_parts(revenue_range: &str, exit_timeline: &str, pain_points: usize) -> Self {
        let revenue_size = match revenue_range {
            "$10–25M" | "$25–50M" | ">$50M" => RevenueSize::High,
            "<$5M" => RevenueSize::Small,
            _ => RevenueSize::Medium,
        };

        let within_six_months = exit_timeline.contains("<6");
        let within_a_year = exit_timeline.contains("6–12");
        let exit_urgency = if within_six_months || within_a_year {
            ExitUrgency::Urgent
        } else if exit_timeline.contains("Exploring") {
            ExitUrgency::Early
        } else {
            ExitUrgency::Planned
        };

        let pain_severity = match pain_points {
            4.. => PainSeverity::Critical,
            2..4 => PainSeverity::Moderate,
            _ => PainSeverity::Low,
        };

        let response_time = if within_six_months || pain_points >= 4 {
            ResponseTime::HighPriority
        } else if within_a_year || pain_points >= 2 {
            ResponseTime::MediumPriority
        } else {
            ResponseTime::Standard
        };

        Self {
            revenue_size,
            exit_urgency,
            pain_severity,
            response_time,
        }
    }
}

impl RevenueSize {
    pub fn label(self) -> &'static str {
        match self {
            Self::Small => "SMALL",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

impl ExitUrgency {
    pub fn label(self) -> &'static str {
        match self {
            Self::Urgent => "URGENT",
            Self::Planned => "PLANNED",
            Self::Early => "EARLY",
        }
    }
}

impl PainSeverity {
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Moderate => "MODERATE",
            Self::Critical => "CRITICAL",
        }
    }
}

impl ResponseTime {
    pub fn label(self) -> &'static str {
        match self {
            Self::HighPriority => "<2 hours (High Priority)",
            Self::MediumPriority => "<4 hours (Medium Priority)",
            Self::Standard => "<24 hours (Standard)",
        }
    }
}
