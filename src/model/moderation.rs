use std::{fmt, str::FromStr};

/// Result of running the bot-signature classifier over a role set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Human,
    LikelyBot,
}

/// How an empty role set is classified.
///
/// An empty set is a subset of every watched set, so without a policy every member
/// who has not picked any roles yet would be flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyRoleSetPolicy {
    /// Treat the member as too new to classify.
    #[default]
    Skip,
    /// Treat the member as a likely bot.
    Flag,
}

impl FromStr for EmptyRoleSetPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "flag" => Ok(Self::Flag),
            other => Err(format!("expected 'skip' or 'flag', got '{}'", other)),
        }
    }
}

/// What moderation actions actually do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionMode {
    /// Only tell operators what would have happened.
    #[default]
    ReportOnly,
    /// Message the member, then remove them from the guild.
    NotifyAndRemove,
}

impl FromStr for ActionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "report-only" => Ok(Self::ReportOnly),
            "notify-and-remove" => Ok(Self::NotifyAndRemove),
            other => Err(format!(
                "expected 'report-only' or 'notify-and-remove', got '{}'",
                other
            )),
        }
    }
}

impl fmt::Display for ActionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReportOnly => f.write_str("report-only"),
            Self::NotifyAndRemove => f.write_str("notify-and-remove"),
        }
    }
}

/// Why a member is being removed. Selects notification copy and audit log reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalReason {
    LikelyBot,
    Inactive,
}

impl RemovalReason {
    /// Direct message sent to the member before removal.
    pub fn notification(self) -> &'static str {
        match self {
            Self::LikelyBot => {
                "You've been removed from the server because your account looks automated. \
                 If this is a mistake, you're welcome to rejoin and pick your roles again."
            }
            Self::Inactive => {
                "You've been removed from the server for being inactive for too long. \
                 You can rejoin and restart the verification process."
            }
        }
    }

    /// Reason recorded in the guild's audit log.
    pub fn audit_reason(self) -> &'static str {
        match self {
            Self::LikelyBot => "Likely bot account",
            Self::Inactive => "Inactive member",
        }
    }
}

/// Outcome of applying a moderation action to one member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Report-only mode: operators were told, nothing else happened.
    Reported,
    /// The member was removed from the guild.
    Removed {
        /// Whether the direct message before removal was delivered.
        notified: bool,
    },
    /// Removal was attempted and failed; the message describes why.
    Failed(String),
}

impl ActionOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Tally of one sweep firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SweepReport {
    /// Members the inactivity evaluator flagged.
    pub flagged: usize,
    /// Flagged members whose action completed (reported or removed).
    pub processed: usize,
    /// Flagged members whose removal failed.
    pub failed: usize,
}

impl SweepReport {
    pub fn from_outcomes(outcomes: &[ActionOutcome]) -> Self {
        let failed = outcomes.iter().filter(|o| o.is_failure()).count();
        Self {
            flagged: outcomes.len(),
            processed: outcomes.len() - failed,
            failed,
        }
    }
}

/// Result of one sweep firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepOutcome {
    Completed(SweepReport),
    /// The member store could not be read; nothing was evaluated.
    StorageUnavailable,
}
