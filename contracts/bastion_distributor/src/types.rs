use soroban_sdk::{contracttype, Address};

/// Scheduled per-epoch change of a recipient's rate.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RateAdjustment {
    /// Raise (`true`) or lower (`false`) the rate.
    pub add: bool,
    /// Step applied each epoch. Zero means the adjustment is finished.
    pub rate: i128,
    /// Rate at which the adjustment stops.
    pub target: i128,
}

impl RateAdjustment {
    /// No scheduled change.
    pub fn inactive() -> Self {
        RateAdjustment {
            add: false,
            rate: 0,
            target: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.rate != 0
    }
}

/// A reward stream. `rate` is in millionths of issuance supply per epoch
/// (`1_000_000` = 100%).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DistributionRecipient {
    pub recipient: Address,
    pub rate: i128,
    /// `RateAdjustment::inactive()` when nothing is scheduled.
    pub adjustment: RateAdjustment,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Treasury,
    /// Seconds per epoch.
    EpochLength,
    /// Timestamp at which the next distribution becomes due.
    NextEpochTime,
    /// Optional upper bound on a single recipient's reward per epoch.
    RewardCap,
    /// Ordered `Vec<DistributionRecipient>`.
    Recipients,
}
