use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use tempfile::TempDir;
use uuid::Uuid;

use quest_board::board::QuestBoard;
use quest_board::error::{BoardError, Result};
use quest_board::quest::{
    Quest, QuestChanges, QuestDraft, QuestGateway, QuestId, QuestRank, QuestUpdate, ScoredDraft,
    StatWeights, SubTask, SubTaskId,
};
use quest_board::util::database::Database;
use quest_board::util::io::bus::{messages, MessageBus};

/// Database-backed gateway whose reads or writes can be switched to fail.
#[derive(Debug, Clone)]
struct FlakyGateway {
    inner: Database,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
}

impl FlakyGateway {
    fn new(inner: Database) -> Self {
        Self {
            inner,
            fail_reads: Arc::new(AtomicBool::new(false)),
            fail_writes: Arc::new(AtomicBool::new(false)),
        }
    }

    fn read(&self) -> Result<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(BoardError::Io(std::io::Error::new(std::io::ErrorKind::Other, "backend unreachable")));
        }
        Ok(())
    }

    fn write(&self) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(BoardError::Io(std::io::Error::new(std::io::ErrorKind::Other, "backend rejected write")));
        }
        Ok(())
    }
}

impl QuestGateway for FlakyGateway {
    fn list_active_quests(&self, owner_id: Uuid) -> Result<Vec<Quest>> {
        self.read()?;
        self.inner.list_active_quests(owner_id)
    }

    fn get_quest(&self, owner_id: Uuid, quest_id: QuestId) -> Result<Option<Quest>> {
        self.read()?;
        self.inner.get_quest(owner_id, quest_id)
    }

    fn list_sub_tasks(&self, quest_id: QuestId) -> Result<Vec<SubTask>> {
        self.read()?;
        self.inner.list_sub_tasks(quest_id)
    }

    fn create_quest(&self, owner_id: Uuid, draft: &ScoredDraft) -> Result<Quest> {
        self.write()?;
        self.inner.create_quest(owner_id, draft)
    }

    fn update_quest(&self, owner_id: Uuid, quest_id: QuestId, update: &QuestUpdate) -> Result<()> {
        self.write()?;
        self.inner.update_quest(owner_id, quest_id, update)
    }

    fn complete_quest(&self, quest_id: QuestId, owner_id: Uuid) -> Result<()> {
        self.write()?;
        self.inner.complete_quest(quest_id, owner_id)
    }

    fn create_sub_task(&self, quest_id: QuestId, title: &str) -> Result<SubTask> {
        self.write()?;
        self.inner.create_sub_task(quest_id, title)
    }

    fn toggle_sub_task(&self, owner_id: Uuid, sub_task_id: SubTaskId) -> Result<SubTask> {
        self.write()?;
        self.inner.toggle_sub_task(owner_id, sub_task_id)
    }

    fn delete_sub_task(&self, owner_id: Uuid, sub_task_id: SubTaskId) -> Result<()> {
        self.write()?;
        self.inner.delete_sub_task(owner_id, sub_task_id)
    }
}

fn draft(title: &str, int: i32, wlt: i32, str_: i32) -> QuestDraft {
    QuestDraft::new(title, StatWeights::new(int, wlt, str_))
}

fn in_memory_board() -> (QuestBoard<Database>, quest_board::util::io::bus::BusReceiver) {
    let (bus, rx) = MessageBus::new();
    let board = QuestBoard::new(Database::open_in_memory().unwrap(), Uuid::new_v4(), 25, bus);
    (board, rx)
}

#[tokio::test]
async fn test_board_flow_end_to_end() {
    let (mut board, mut rx) = in_memory_board();

    let legendary = board.create_quest(draft("Launch side project", 10, 3, 4)).await.unwrap();
    assert_eq!(legendary.score(), 17);
    assert_eq!(legendary.rank(), QuestRank::Legendary);

    let epic = board.create_quest(draft("Read two books", 8, 0, 3)).await.unwrap();
    let common = board.create_quest(draft("Walk daily", 0, 0, 5)).await.unwrap();

    let summary = board.summary();
    let ids: Vec<QuestId> = summary.top_quests.iter().map(|q| q.id).collect();
    assert_eq!(ids, vec![legendary.id, epic.id, common.id]);
    assert_eq!(summary.average_progress, 0);

    for title in ["Pick a stack", "Build MVP", "Write docs", "Ship"] {
        board.add_sub_task(legendary.id, title).await.unwrap();
    }
    let tasks = board.quest_detail(legendary.id).unwrap().sub_tasks;
    assert_eq!(tasks.iter().map(|t| t.title.as_str()).collect::<Vec<_>>(), vec![
        "Pick a stack",
        "Build MVP",
        "Write docs",
        "Ship"
    ]);
    for task in &tasks[..3] {
        board.toggle_sub_task(task.id).await.unwrap();
    }

    let summary = board.summary();
    assert_eq!(summary.completion_of(legendary.id), 75);
    // Quests without sub-tasks are left out of the average
    assert_eq!(summary.average_progress, 75);

    board.complete_quest(legendary.id).await.unwrap();
    let summary = board.summary();
    assert!(summary.top_quests.iter().all(|q| q.id != legendary.id));
    assert_eq!(summary.top_quests.len(), 2);

    let detail = board.quest_detail(legendary.id).unwrap();
    assert!(detail.quest.is_completed);
    assert!(detail.quest.completed_at.is_some());

    let mut topics = Vec::new();
    while let Ok(msg) = rx.try_recv() {
        topics.push(msg.topic);
    }
    assert_eq!(topics.iter().filter(|t| *t == messages::QUEST_CREATED).count(), 3);
    assert_eq!(topics.iter().filter(|t| *t == messages::SUBTASK_CREATED).count(), 4);
    assert_eq!(topics.iter().filter(|t| *t == messages::SUBTASK_TOGGLED).count(), 3);
    assert_eq!(topics.last().map(String::as_str), Some(messages::QUEST_COMPLETED));
}

#[tokio::test]
async fn test_board_limit_and_tie_break() {
    let (bus, _rx) = MessageBus::new();
    let mut board = QuestBoard::new(Database::open_in_memory().unwrap(), Uuid::nil(), 3, bus);

    let first = board.create_quest(draft("A", 4, 4, 4)).await.unwrap();
    let second = board.create_quest(draft("B", 6, 6, 0)).await.unwrap();
    board.create_quest(draft("C", 1, 0, 0)).await.unwrap();
    let top = board.create_quest(draft("D", 20, 0, 0)).await.unwrap();

    let ids: Vec<QuestId> = board.summary().top_quests.iter().map(|q| q.id).collect();
    assert_eq!(ids, vec![top.id, first.id, second.id]);
}

#[tokio::test]
async fn test_update_recomputes_and_persists_score() {
    let (mut board, _rx) = in_memory_board();
    let quest = board.create_quest(draft("Refactor", 3, 3, 3)).await.unwrap();
    assert_eq!(quest.rank(), QuestRank::Common);

    let deadline = NaiveDate::from_ymd_opt(2026, 6, 30).unwrap();
    board
        .update_quest(
            quest.id,
            QuestChanges {
                title: Some("  Refactor the parser ".to_string()),
                deadline: Some(Some(deadline)),
                weights: Some(StatWeights::new(9, 3, 0)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let stored = board.quest_detail(quest.id).unwrap().quest;
    assert_eq!(stored.title, "Refactor the parser");
    assert_eq!(stored.score(), 12);
    assert_eq!(stored.rank(), QuestRank::Epic);
    assert_eq!(stored.deadline, Some(deadline));
    assert_eq!(board.summary().nearest_deadline.as_ref().map(|q| q.id), Some(quest.id));

    board
        .update_quest(
            quest.id,
            QuestChanges {
                deadline: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let stored = board.quest_detail(quest.id).unwrap().quest;
    assert_eq!(stored.deadline, None);
    assert_eq!(stored.score(), 12);
}

#[tokio::test]
async fn test_invalid_writes_are_rejected() {
    let (mut board, _rx) = in_memory_board();

    let err = board.create_quest(draft("   ", 1, 1, 1)).await.unwrap_err();
    assert!(matches!(err, BoardError::Validation(_)));

    let quest = board.create_quest(draft("Valid", 1, 1, 1)).await.unwrap();
    let err = board.update_quest(quest.id, QuestChanges::default()).await.unwrap_err();
    assert!(matches!(err, BoardError::Validation(_)));

    let err = board.update_quest(9999, QuestChanges {
        title: Some("ghost".to_string()),
        ..Default::default()
    })
    .await
    .unwrap_err();
    assert!(matches!(err, BoardError::NotFound { id: 9999, .. }));

    board.complete_quest(quest.id).await.unwrap();
    assert!(board.complete_quest(quest.id).await.is_err());
}

#[tokio::test]
async fn test_owners_are_isolated() {
    let database = Database::open_in_memory().unwrap();
    let (bus, _rx) = MessageBus::new();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    let mut alice_board = QuestBoard::new(database.clone(), alice, 25, bus.clone());
    let mut bob_board = QuestBoard::new(database, bob, 25, bus);

    let quest = alice_board.create_quest(draft("Alice's quest", 5, 5, 5)).await.unwrap();
    bob_board.refresh().unwrap();
    assert!(bob_board.summary().is_empty());

    assert!(bob_board.quest_detail(quest.id).is_err());
    assert!(bob_board.add_sub_task(quest.id, "Sneaky").await.is_err());
    assert!(bob_board.complete_quest(quest.id).await.is_err());

    let first = alice_board.add_sub_task(quest.id, "Water plants").await.unwrap();
    let second = alice_board.add_sub_task(quest.id, "Feed cat").await.unwrap();
    let err = bob_board.toggle_sub_task(first.id).await.unwrap_err();
    assert!(matches!(err, BoardError::NotFound { .. }));
    let err = bob_board.delete_sub_task(second.id).await.unwrap_err();
    assert!(matches!(err, BoardError::NotFound { .. }));

    let detail = alice_board.quest_detail(quest.id).unwrap();
    assert_eq!(detail.sub_tasks.len(), 2);
    assert!(detail.sub_tasks.iter().all(|t| !t.is_completed));

    alice_board.refresh().unwrap();
    assert_eq!(alice_board.summary().top_quests.len(), 1);
}

#[tokio::test]
async fn test_failed_refresh_keeps_previous_summary() {
    let gateway = FlakyGateway::new(Database::open_in_memory().unwrap());
    let fail_reads = gateway.fail_reads.clone();
    let (bus, _rx) = MessageBus::new();
    let mut board = QuestBoard::new(gateway, Uuid::nil(), 25, bus);

    let quest = board.create_quest(draft("Stay consistent", 7, 7, 0)).await.unwrap();
    let before = board.summary().clone();
    assert_eq!(before.top_quests.len(), 1);

    fail_reads.store(true, Ordering::SeqCst);
    assert!(board.refresh().is_err());
    assert_eq!(board.summary(), &before);

    // A write that lands while reads fail still leaves the old summary in place
    board.gateway().inner.create_quest(Uuid::nil(), &draft("Hidden", 1, 0, 0).score().unwrap()).unwrap();
    assert!(board.refresh().is_err());
    assert_eq!(board.summary().top_quests[0].id, quest.id);
    assert_eq!(board.summary().top_quests.len(), 1);

    fail_reads.store(false, Ordering::SeqCst);
    assert_eq!(board.refresh().unwrap().top_quests.len(), 2);
}

#[tokio::test]
async fn test_failed_write_leaves_state_untouched() {
    let gateway = FlakyGateway::new(Database::open_in_memory().unwrap());
    let fail_writes = gateway.fail_writes.clone();
    let (bus, mut rx) = MessageBus::new();
    let mut board = QuestBoard::new(gateway, Uuid::nil(), 25, bus);

    let quest = board.create_quest(draft("Original", 2, 2, 2)).await.unwrap();
    while rx.try_recv().is_ok() {}
    let before = board.summary().clone();

    fail_writes.store(true, Ordering::SeqCst);
    assert!(board.create_quest(draft("Never stored", 9, 9, 0)).await.is_err());
    assert!(board
        .update_quest(quest.id, QuestChanges {
            weights: Some(StatWeights::new(20, 20, 20)),
            ..Default::default()
        })
        .await
        .is_err());
    assert!(board.complete_quest(quest.id).await.is_err());

    assert_eq!(board.summary(), &before);
    assert!(rx.try_recv().is_err(), "no event for a failed write");

    fail_writes.store(false, Ordering::SeqCst);
    board.refresh().unwrap();
    assert_eq!(board.summary().top_quests[0].score(), 6);
}

#[tokio::test]
async fn test_write_stands_when_reread_fails() {
    let gateway = FlakyGateway::new(Database::open_in_memory().unwrap());
    let fail_reads = gateway.fail_reads.clone();
    let (bus, _rx) = MessageBus::new();
    let mut board = QuestBoard::new(gateway, Uuid::nil(), 25, bus);

    board.create_quest(draft("Before outage", 3, 0, 0)).await.unwrap();
    let before = board.summary().clone();

    fail_reads.store(true, Ordering::SeqCst);
    let quest = board.create_quest(draft("During outage", 9, 9, 0)).await.unwrap();
    assert_eq!(board.summary(), &before);

    fail_reads.store(false, Ordering::SeqCst);
    let summary = board.refresh().unwrap();
    assert_eq!(summary.top_quests[0].id, quest.id);
    assert_eq!(summary.top_quests.len(), 2);
}

#[tokio::test]
async fn test_data_survives_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("board.db");
    let owner = Uuid::new_v4();

    {
        let (bus, _rx) = MessageBus::new();
        let mut board = QuestBoard::new(Database::open(&path).unwrap(), owner, 25, bus);
        let quest = board.create_quest(draft("Persist me", 10, 3, 4)).await.unwrap();
        board.add_sub_task(quest.id, "Step one").await.unwrap();
    }

    let (bus, _rx) = MessageBus::new();
    let mut board = QuestBoard::new(Database::open(&path).unwrap(), owner, 25, bus);
    let summary = board.refresh().unwrap();
    assert_eq!(summary.top_quests.len(), 1);
    assert_eq!(summary.top_quests[0].rank(), QuestRank::Legendary);
    assert_eq!(summary.task_counts[&summary.top_quests[0].id].total, 1);
}
