//! Side-channel metadata attached to connector responses.
//!
//! Annotations travel next to every sync and provisioning outcome, successful
//! or not. The only annotation currently produced is the rate-limit
//! descriptor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Rate-limit state reported by the target system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateLimitStatus {
    /// No rate-limit information was present.
    #[default]
    Unspecified,
    /// The request was within quota.
    Ok,
    /// The request was rejected for exceeding quota.
    Overlimit,
}

/// Quota information for a single request.
///
/// The zero value (`Default`) means "the response carried no rate-limit
/// information".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitDescription {
    pub status: RateLimitStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset_at: Option<DateTime<Utc>>,
}

impl RateLimitDescription {
    /// Returns true if no rate-limit information is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Returns true if the target reported the quota as exceeded.
    #[must_use]
    pub fn is_overlimit(&self) -> bool {
        self.status == RateLimitStatus::Overlimit
    }
}

/// A single annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Annotation {
    RateLimit(RateLimitDescription),
}

/// Ordered collection of annotations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Annotations(Vec<Annotation>);

impl Annotations {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records rate-limit data, replacing any previous rate-limit annotation.
    ///
    /// `None` means no response was received and leaves the collection as is.
    pub fn with_rate_limiting(&mut self, rate_limit: Option<RateLimitDescription>) -> &mut Self {
        if let Some(description) = rate_limit {
            self.update(Annotation::RateLimit(description));
        }
        self
    }

    /// Replaces the annotation of the same kind, or appends it.
    pub fn update(&mut self, annotation: Annotation) {
        let existing = self
            .0
            .iter_mut()
            .find(|a| std::mem::discriminant(*a) == std::mem::discriminant(&annotation));
        match existing {
            Some(slot) => *slot = annotation,
            None => self.0.push(annotation),
        }
    }

    /// The rate-limit annotation, if one was recorded.
    #[must_use]
    pub fn rate_limit(&self) -> Option<&RateLimitDescription> {
        self.0.iter().find_map(|a| match a {
            Annotation::RateLimit(rl) => Some(rl),
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
