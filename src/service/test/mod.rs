use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex},
    time::Duration as StdDuration,
};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use sea_orm::DatabaseConnection;
use test_utils::{builder::TestBuilder, context::TestContext};

use crate::{
    error::platform::PlatformError,
    model::{
        member::GuildMemberSnapshot,
        moderation::{ActionMode, EmptyRoleSetPolicy},
    },
    service::{
        classifier::BotSignatureClassifier, moderation::ModerationActions,
        platform::CommunityPlatform, reactor::MemberEventReactor, sweep::InactivitySweepService,
    },
    util::clock::ManualClock,
};


pub(crate) fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()
}

pub(crate) fn roles(ids: &[u64]) -> HashSet<u64> {
    ids.iter().copied().collect()
}

/// How a fake platform call should fail.
#[derive(Debug, Clone, Copy)]
pub(crate) enum FakeFailure {
    Blocked,
    Permission,
    Gone,
}

impl FakeFailure {
    fn into_error(self, member_id: u64) -> PlatformError {
        match self {
            Self::Blocked => PlatformError::NotificationBlocked(member_id),
            Self::Permission => PlatformError::InsufficientPermission("remove member".into()),
            Self::Gone => PlatformError::MemberGone(member_id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PlatformCall {
    ListMembers,
    Notify(u64),
    Remove(u64),
    Report(String),
}

/// In-memory `CommunityPlatform` recording every call in order.
#[derive(Default)]
pub(crate) struct FakePlatform {
    members: Mutex<Vec<GuildMemberSnapshot>>,
    notify_failures: Mutex<HashMap<u64, FakeFailure>>,
    remove_failures: Mutex<HashMap<u64, FakeFailure>>,
    remove_delay: Mutex<Option<StdDuration>>,
    calls: Mutex<Vec<PlatformCall>>,
}

impl FakePlatform {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_members(&self, members: Vec<GuildMemberSnapshot>) {
        *self.members.lock().unwrap() = members;
    }

    pub fn fail_notify(&self, member_id: u64, failure: FakeFailure) {
        self.notify_failures
            .lock()
            .unwrap()
            .insert(member_id, failure);
    }

    pub fn fail_remove(&self, member_id: u64, failure: FakeFailure) {
        self.remove_failures
            .lock()
            .unwrap()
            .insert(member_id, failure);
    }

    pub fn delay_removals(&self, delay: StdDuration) {
        *self.remove_delay.lock().unwrap() = Some(delay);
    }

    pub fn calls(&self) -> Vec<PlatformCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn removed(&self) -> Vec<u64> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                PlatformCall::Remove(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    pub fn notified(&self) -> Vec<u64> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                PlatformCall::Notify(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    pub fn reports(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                PlatformCall::Report(content) => Some(content),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: PlatformCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl CommunityPlatform for FakePlatform {
    async fn list_members(&self) -> Result<Vec<GuildMemberSnapshot>, PlatformError> {
        self.record(PlatformCall::ListMembers);
        Ok(self.members.lock().unwrap().clone())
    }

    async fn notify_member(&self, member_id: u64, _content: &str) -> Result<(), PlatformError> {
        self.record(PlatformCall::Notify(member_id));
        let failure = self.notify_failures.lock().unwrap().get(&member_id).copied();
        match failure {
            Some(failure) => Err(failure.into_error(member_id)),
            None => Ok(()),
        }
    }

    async fn remove_member(&self, member_id: u64, _reason: &str) -> Result<(), PlatformError> {
        let delay = *self.remove_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.record(PlatformCall::Remove(member_id));
        let failure = self.remove_failures.lock().unwrap().get(&member_id).copied();
        match failure {
            Some(failure) => Err(failure.into_error(member_id)),
            None => Ok(()),
        }
    }

    async fn send_report(&self, content: &str) -> Result<(), PlatformError> {
        self.record(PlatformCall::Report(content.to_string()));
        Ok(())
    }
}

/// Services wired over an in-memory database, a fake platform and a manual clock.
pub(crate) struct Harness {
    /// Keeps the in-memory database alive for the duration of the test.
    pub _test: TestContext,
    pub db: DatabaseConnection,
    pub platform: Arc<FakePlatform>,
    pub clock: Arc<ManualClock>,
    pub actions: Arc<ModerationActions>,
}

impl Harness {
    pub async fn new(mode: ActionMode) -> Self {
        let test = TestBuilder::new().with_member_tables().build().await.unwrap();
        Self::with_context(test, mode)
    }

    /// Harness whose database has no member table, so every store operation fails.
    pub async fn without_tables(mode: ActionMode) -> Self {
        let test = TestBuilder::new().build().await.unwrap();
        Self::with_context(test, mode)
    }

    fn with_context(test: TestContext, mode: ActionMode) -> Self {
        let db = test.db.clone().unwrap();

        let platform = FakePlatform::new();
        let clock = Arc::new(ManualClock::new(t0()));
        let actions = Arc::new(ModerationActions::new(
            db.clone(),
            platform.clone(),
            mode,
        ));

        Self {
            _test: test,
            db,
            platform,
            clock,
            actions,
        }
    }

    pub fn reactor(&self, watched_sets: &[&[u64]], policy: EmptyRoleSetPolicy) -> MemberEventReactor {
        let classifier = BotSignatureClassifier::new(
            watched_sets.iter().map(|set| roles(set)).collect(),
            policy,
        );

        MemberEventReactor::new(
            self.db.clone(),
            classifier,
            self.actions.clone(),
            self.platform.clone(),
            self.clock.clone(),
        )
    }

    pub fn sweeper(&self, threshold_days: i64, concurrency: usize) -> InactivitySweepService {
        InactivitySweepService::new(
            self.db.clone(),
            self.actions.clone(),
            self.clock.clone(),
            Duration::days(threshold_days),
            concurrency,
        )
    }
}
