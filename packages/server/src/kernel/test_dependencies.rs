// TestDependencies - in-memory/mock implementations for testing
//
// Provides doubles for every Base* trait so engine tests run without a
// database, the chat platform, or the scheduler service. MemoryStore keeps
// the production semantics that matter: conditional create rejects duplicate
// keys, deletes of absent keys succeed, range reads come back in sort-key
// order.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use discord::{Message, PostedMessage};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::common::time::parse_wall_clock;
use crate::domains::events::models::{EventRecord, MemberRecord};
use crate::domains::notices::models::{AckRecord, NoticeRecord};
use crate::kernel::{BaseChat, BaseScheduler, BaseStore, BotDeps, ReminderJob};

// =============================================================================
// MemoryStore
// =============================================================================

type Partitioned<T> = Mutex<BTreeMap<(String, String), T>>;

#[derive(Default)]
pub struct MemoryStore {
    events: Partitioned<EventRecord>,
    members: Partitioned<MemberRecord>,
    notices: Partitioned<NoticeRecord>,
    acks: Partitioned<AckRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn event_count(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn member_count(&self) -> usize {
        self.members.lock().unwrap().len()
    }

    pub fn ack_count(&self) -> usize {
        self.acks.lock().unwrap().len()
    }

    pub fn notice_count(&self) -> usize {
        self.notices.lock().unwrap().len()
    }

    /// The single stored event; panics unless exactly one exists.
    pub fn only_event(&self) -> EventRecord {
        let events = self.events.lock().unwrap();
        assert_eq!(events.len(), 1, "expected exactly one event");
        events.values().next().unwrap().clone()
    }

    /// The single stored notice; panics unless exactly one exists.
    pub fn only_notice(&self) -> NoticeRecord {
        let notices = self.notices.lock().unwrap();
        assert_eq!(notices.len(), 1, "expected exactly one notice");
        notices.values().next().unwrap().clone()
    }
}

#[async_trait]
impl BaseStore for MemoryStore {
    async fn get_event(&self, guild_id: &str, event_id: &str) -> Result<Option<EventRecord>> {
        let events = self.events.lock().unwrap();
        Ok(events
            .get(&(guild_id.to_string(), event_id.to_string()))
            .cloned())
    }

    async fn put_event(&self, event: &EventRecord) -> Result<()> {
        let mut events = self.events.lock().unwrap();
        events.insert(
            (event.guild_id.clone(), event.event_id.clone()),
            event.clone(),
        );
        Ok(())
    }

    async fn insert_member(&self, member: &MemberRecord) -> Result<bool> {
        let mut members = self.members.lock().unwrap();
        let key = (member.guild_id.clone(), member.member_key.clone());
        if members.contains_key(&key) {
            return Ok(false);
        }
        members.insert(key, member.clone());
        Ok(true)
    }

    async fn get_member(&self, guild_id: &str, member_key: &str) -> Result<Option<MemberRecord>> {
        let members = self.members.lock().unwrap();
        Ok(members
            .get(&(guild_id.to_string(), member_key.to_string()))
            .cloned())
    }

    async fn delete_member(&self, guild_id: &str, member_key: &str) -> Result<()> {
        let mut members = self.members.lock().unwrap();
        members.remove(&(guild_id.to_string(), member_key.to_string()));
        Ok(())
    }

    async fn list_members(&self, guild_id: &str, event_id: &str) -> Result<Vec<MemberRecord>> {
        let prefix = MemberRecord::event_prefix(event_id);
        let members = self.members.lock().unwrap();
        Ok(members
            .iter()
            .filter(|((g, key), _)| g == guild_id && key.starts_with(&prefix))
            .map(|(_, record)| record.clone())
            .collect())
    }

    async fn get_notice(&self, guild_id: &str, notice_id: &str) -> Result<Option<NoticeRecord>> {
        let notices = self.notices.lock().unwrap();
        Ok(notices
            .get(&(guild_id.to_string(), notice_id.to_string()))
            .cloned())
    }

    async fn put_notice(&self, notice: &NoticeRecord) -> Result<()> {
        let mut notices = self.notices.lock().unwrap();
        notices.insert(
            (notice.guild_id.clone(), notice.notice_id.clone()),
            notice.clone(),
        );
        Ok(())
    }

    async fn list_notices(&self, guild_id: &str, event_id: &str) -> Result<Vec<NoticeRecord>> {
        let prefix = NoticeRecord::event_prefix(event_id);
        let notices = self.notices.lock().unwrap();
        let mut found: Vec<NoticeRecord> = notices
            .values()
            .filter(|n| n.guild_id == guild_id && n.event_sk.starts_with(&prefix))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.event_sk.cmp(&b.event_sk));
        Ok(found)
    }

    async fn insert_ack(&self, ack: &AckRecord) -> Result<bool> {
        let mut acks = self.acks.lock().unwrap();
        let key = (ack.guild_id.clone(), ack.ack_key.clone());
        if acks.contains_key(&key) {
            return Ok(false);
        }
        acks.insert(key, ack.clone());
        Ok(true)
    }

    async fn list_acks(&self, guild_id: &str, notice_id: &str) -> Result<Vec<AckRecord>> {
        let prefix = AckRecord::notice_prefix(notice_id);
        let acks = self.acks.lock().unwrap();
        Ok(acks
            .iter()
            .filter(|((g, key), _)| g == guild_id && key.starts_with(&prefix))
            .map(|(_, record)| record.clone())
            .collect())
    }
}

// =============================================================================
// MockChat
// =============================================================================

pub struct MockChat {
    next_message_id: AtomicU64,
    posts: Mutex<Vec<(String, Message)>>,
    edits: Mutex<Vec<(String, String, Message)>>,
    followups: Mutex<Vec<(String, String, Message)>>,
    fail_sends: AtomicBool,
}

impl MockChat {
    pub fn new() -> Self {
        Self {
            next_message_id: AtomicU64::new(1),
            posts: Mutex::new(Vec::new()),
            edits: Mutex::new(Vec::new()),
            followups: Mutex::new(Vec::new()),
            fail_sends: AtomicBool::new(false),
        }
    }

    /// Make post and edit calls fail (follow-ups still succeed).
    pub fn with_failing_sends(self) -> Self {
        self.fail_sends.store(true, Ordering::SeqCst);
        self
    }

    /// All (channel_id, message) pairs posted so far.
    pub fn posts(&self) -> Vec<(String, Message)> {
        self.posts.lock().unwrap().clone()
    }

    /// All (channel_id, message_id, message) edits so far.
    pub fn edits(&self) -> Vec<(String, String, Message)> {
        self.edits.lock().unwrap().clone()
    }

    /// All (application_id, token, message) follow-ups so far.
    pub fn followups(&self) -> Vec<(String, String, Message)> {
        self.followups.lock().unwrap().clone()
    }

    pub fn last_edit(&self) -> Option<(String, String, Message)> {
        self.edits.lock().unwrap().last().cloned()
    }
}

impl Default for MockChat {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseChat for MockChat {
    async fn post_message(&self, channel_id: &str, message: &Message) -> Result<PostedMessage> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(anyhow!("mock chat: post failure"));
        }
        let id = self.next_message_id.fetch_add(1, Ordering::SeqCst);
        self.posts
            .lock()
            .unwrap()
            .push((channel_id.to_string(), message.clone()));
        Ok(PostedMessage {
            id: format!("msg-{id}"),
        })
    }

    async fn edit_message(
        &self,
        channel_id: &str,
        message_id: &str,
        message: &Message,
    ) -> Result<()> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(anyhow!("mock chat: edit failure"));
        }
        self.edits.lock().unwrap().push((
            channel_id.to_string(),
            message_id.to_string(),
            message.clone(),
        ));
        Ok(())
    }

    async fn followup(&self, application_id: &str, token: &str, message: &Message) -> Result<()> {
        self.followups.lock().unwrap().push((
            application_id.to_string(),
            token.to_string(),
            message.clone(),
        ));
        Ok(())
    }
}

// =============================================================================
// MockScheduler
// =============================================================================

pub struct MockScheduler {
    upserts: Mutex<Vec<(String, DateTime<FixedOffset>, ReminderJob)>>,
    deletes: Mutex<Vec<String>>,
    fail_upserts: AtomicBool,
}

impl MockScheduler {
    pub fn new() -> Self {
        Self {
            upserts: Mutex::new(Vec::new()),
            deletes: Mutex::new(Vec::new()),
            fail_upserts: AtomicBool::new(false),
        }
    }

    pub fn with_failing_upserts(self) -> Self {
        self.fail_upserts.store(true, Ordering::SeqCst);
        self
    }

    pub fn upserts(&self) -> Vec<(String, DateTime<FixedOffset>, ReminderJob)> {
        self.upserts.lock().unwrap().clone()
    }

    pub fn deletes(&self) -> Vec<String> {
        self.deletes.lock().unwrap().clone()
    }
}

impl Default for MockScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseScheduler for MockScheduler {
    async fn upsert(
        &self,
        name: &str,
        run_at: DateTime<FixedOffset>,
        payload: &ReminderJob,
    ) -> Result<()> {
        if self.fail_upserts.load(Ordering::SeqCst) {
            return Err(anyhow!("mock scheduler: upsert failure"));
        }
        self.upserts
            .lock()
            .unwrap()
            .push((name.to_string(), run_at, payload.clone()));
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<()> {
        self.deletes.lock().unwrap().push(name.to_string());
        Ok(())
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Bundle of doubles plus the BotDeps view the engines consume.
pub struct TestDependencies {
    pub store: Arc<MemoryStore>,
    pub chat: Arc<MockChat>,
    pub scheduler: Arc<MockScheduler>,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            store: Arc::new(MemoryStore::new()),
            chat: Arc::new(MockChat::new()),
            scheduler: Arc::new(MockScheduler::new()),
        }
    }

    pub fn with_chat(mut self, chat: MockChat) -> Self {
        self.chat = Arc::new(chat);
        self
    }

    pub fn with_scheduler(mut self, scheduler: MockScheduler) -> Self {
        self.scheduler = Arc::new(scheduler);
        self
    }

    pub fn deps(&self) -> BotDeps {
        BotDeps::new(
            self.store.clone(),
            self.chat.clone(),
            self.scheduler.clone(),
        )
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Sample records
// =============================================================================

pub fn sample_event(guild_id: &str, event_id: &str, creator_id: &str) -> EventRecord {
    let start_at = parse_wall_clock("2026-01-19 21:00").unwrap();
    EventRecord {
        guild_id: guild_id.to_string(),
        event_id: event_id.to_string(),
        title: "Raid night".to_string(),
        creator_id: creator_id.to_string(),
        creator_name: "organizer".to_string(),
        created_at: Utc::now(),
        status: EventRecord::STATUS_OPEN.to_string(),
        recruit_channel_id: "recruit-chan".to_string(),
        recruit_message_id: Some("recruit-msg".to_string()),
        notice_channel_id: "notice-chan".to_string(),
        start_at,
        remind_at: start_at - chrono::Duration::days(1),
        remind_schedule: None,
    }
}

pub fn sample_notice(guild_id: &str, notice_id: &str, event_id: &str, creator_id: &str) -> NoticeRecord {
    let created_at = Utc::now();
    NoticeRecord {
        guild_id: guild_id.to_string(),
        notice_id: notice_id.to_string(),
        event_id: event_id.to_string(),
        event_sk: NoticeRecord::sort_key(event_id, &created_at, notice_id),
        status: NoticeRecord::STATUS_OPEN.to_string(),
        hidden: false,
        channel_id: "notice-chan".to_string(),
        message_id: Some("notice-msg".to_string()),
        title: "Bring supplies".to_string(),
        body: "Potions and food, please.".to_string(),
        creator_id: creator_id.to_string(),
        creator_name: "organizer".to_string(),
        created_at,
        closed_at: None,
        remind_at: None,
        remind_schedule: None,
    }
}

pub fn sample_member(guild_id: &str, event_id: &str, user_id: &str) -> MemberRecord {
    MemberRecord {
        guild_id: guild_id.to_string(),
        member_key: MemberRecord::key(event_id, user_id),
        event_id: event_id.to_string(),
        user_id: user_id.to_string(),
        username: format!("user-{user_id}"),
        joined_at: Utc::now(),
    }
}

pub fn sample_ack(guild_id: &str, notice_id: &str, event_id: &str, user_id: &str) -> AckRecord {
    AckRecord {
        guild_id: guild_id.to_string(),
        ack_key: AckRecord::key(notice_id, user_id),
        notice_id: notice_id.to_string(),
        event_id: event_id.to_string(),
        user_id: user_id.to_string(),
        username: format!("user-{user_id}"),
        acked_at: Utc::now(),
    }
}
