//! Review resolution policies
//!
//! Items whose score falls between the two thresholds enter review. A
//! [`ReviewPolicy`] resolves them to accept or reject without blocking the
//! run on a human. The shipped [`MarkerReviewPolicy`] approximates teacher
//! adjudication with a disqualifying content marker; deployers are expected
//! to swap in their own policy.

use crate::item::entities::Item;

/// Pluggable resolution for items in the review band
pub trait ReviewPolicy: Send + Sync {
    /// Resolve a review item: `true` accepts, `false` rejects
    fn accept(&self, item: &Item) -> bool;

    /// Human-readable policy name for logs and telemetry
    fn name(&self) -> &str;
}

/// Reject review items whose content contains a disqualifying marker,
/// accept everything else.
///
/// The default-accept-on-ambiguity behavior is explicitly a placeholder for
/// a real adjudication channel.
#[derive(Debug, Clone)]
pub struct MarkerReviewPolicy {
    marker: String,
}

impl MarkerReviewPolicy {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }
}

impl Default for MarkerReviewPolicy {
    /// Default marker flags placeholder/sample content left in by generation
    fn default() -> Self {
        Self::new("[placeholder]")
    }
}

impl ReviewPolicy for MarkerReviewPolicy {
    fn accept(&self, item: &Item) -> bool {
        !item.content.contains(&self.marker)
    }

    fn name(&self) -> &str {
        "marker"
    }
}

/// Accept every review item unconditionally
pub struct AcceptAllReviewPolicy;

impl ReviewPolicy for AcceptAllReviewPolicy {
    fn accept(&self, _item: &Item) -> bool {
        true
    }

    fn name(&self) -> &str {
        "accept-all"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::entities::ItemKind;

    #[test]
    fn test_marker_rejects_flagged_content() {
        let policy = MarkerReviewPolicy::new("[placeholder]");
        let flagged = Item::new(
            ItemKind::ShortAnswer,
            "Explain [placeholder] in your own words.",
            "n/a",
        );
        assert!(!policy.accept(&flagged));
    }

    #[test]
    fn test_marker_accepts_clean_content() {
        let policy = MarkerReviewPolicy::new("[placeholder]");
        let clean = Item::new(ItemKind::ShortAnswer, "Explain supply and demand.", "...");
        assert!(policy.accept(&clean));
    }

    #[test]
    fn test_accept_all() {
        let policy = AcceptAllReviewPolicy;
        let item = Item::new(ItemKind::ShortAnswer, "[placeholder]", "x");
        assert!(policy.accept(&item));
    }
}
