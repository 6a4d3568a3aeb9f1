//! Business onboarding progress.

use serde::{Deserialize, Serialize};

/// A setup task the business owner has to complete before the storefront
/// is fully live (add a product, set payout details...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingStep {
    pub key: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

/// Ordered onboarding checklist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingStatus {
    #[serde(default)]
    pub steps: Vec<OnboardingStep>,
}

impl OnboardingStatus {
    pub fn completed_count(&self) -> usize {
        self.steps.iter().filter(|s| s.completed).count()
    }

    /// An empty checklist counts as complete.
    pub fn is_complete(&self) -> bool {
        self.steps.iter().all(|s| s.completed)
    }

    /// First step, in order, that is still open.
    pub fn next_step(&self) -> Option<&OnboardingStep> {
        self.steps.iter().find(|s| !s.completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(key: &str, completed: bool) -> OnboardingStep {
        OnboardingStep {
            key: key.to_string(),
            title: None,
            completed,
        }
    }

    #[test]
    fn test_progress() {
        let status = OnboardingStatus {
            steps: vec![step("profile", true), step("product", false), step("payout", false)],
        };
        assert_eq!(status.completed_count(), 1);
        assert!(!status.is_complete());
        assert_eq!(status.next_step().map(|s| s.key.as_str()), Some("product"));
    }

    #[test]
    fn test_empty_is_complete() {
        let status = OnboardingStatus::default();
        assert!(status.is_complete());
        assert!(status.next_step().is_none());
    }
}
