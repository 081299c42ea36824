use serde::{Deserialize, Serialize};

/// Why a coalesced render is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RenderReason {
    /// The initial render after mount did not complete and must be retried.
    InitialMount,
    /// The item collection changed and the hierarchy was rebuilt.
    Data,
    /// The active language changed and labels were rebuilt.
    Language,
}

impl RenderReason {
    const fn bit(self) -> u8 {
        match self {
            Self::InitialMount => 1 << 0,
            Self::Data => 1 << 1,
            Self::Language => 1 << 2,
        }
    }
}

/// Merged set of reasons behind one pending render.
///
/// Multiple notifications arriving within one frame union into a single
/// set; the frame boundary consumes it and draws the latest state once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RenderReasons {
    bits: u8,
}

impl RenderReasons {
    const ALL_BITS: u8 = RenderReason::InitialMount.bit()
        | RenderReason::Data.bit()
        | RenderReason::Language.bit();

    #[must_use]
    pub const fn none() -> Self {
        Self { bits: 0 }
    }

    #[must_use]
    pub const fn all() -> Self {
        Self {
            bits: Self::ALL_BITS,
        }
    }

    #[must_use]
    pub const fn from_reason(reason: RenderReason) -> Self {
        Self { bits: reason.bit() }
    }

    #[must_use]
    pub const fn with_reason(self, reason: RenderReason) -> Self {
        Self {
            bits: self.bits | reason.bit(),
        }
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    #[must_use]
    pub const fn contains(self, reason: RenderReason) -> bool {
        (self.bits & reason.bit()) != 0
    }

    #[must_use]
    pub const fn is_none(self) -> bool {
        self.bits == 0
    }
}

#[cfg(test)]
mod tests {
    use super::{RenderReason, RenderReasons};

    #[test]
    fn reasons_merge_and_contain() {
        let reasons = RenderReasons::from_reason(RenderReason::Data)
            .with_reason(RenderReason::Language);
        assert!(reasons.contains(RenderReason::Data));
        assert!(reasons.contains(RenderReason::Language));
        assert!(!reasons.contains(RenderReason::InitialMount));
        assert!(!reasons.is_none());
    }

    #[test]
    fn union_of_all_reasons_matches_all() {
        let merged = RenderReasons::from_reason(RenderReason::InitialMount)
            .union(RenderReasons::from_reason(RenderReason::Data))
            .union(RenderReasons::from_reason(RenderReason::Language));
        assert_eq!(merged, RenderReasons::all());
    }
}
