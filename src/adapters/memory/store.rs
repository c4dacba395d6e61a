use crate::domain::{
    Booking, BookingFilter, BookingId, BookingStatus, BookingWindow, Comment, CommentId, Item,
    ItemId, ItemRequest, NewBooking, NewComment, NewItem, NewItemRequest, NewUser, RequestId,
    User, UserId, Viewpoint, matches_search,
};
use crate::ports::{
    BookingInsertOutcome, BookingRepository, CommentInsertOutcome, CommentRepository,
    DecisionOutcome, ItemRepository, ItemRequestRepository, Result, UserRepository,
    UserWriteOutcome,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

/// 予約の行（参照はIDのみ）
#[derive(Debug, Clone)]
struct BookingRow {
    booking_id: BookingId,
    window: BookingWindow,
    booker_id: UserId,
    item_id: ItemId,
    status: BookingStatus,
}

/// コメントの行
#[derive(Debug, Clone)]
struct CommentRow {
    comment_id: CommentId,
    text: String,
    item_id: ItemId,
    author_id: UserId,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Tables {
    last_id: i64,
    users: BTreeMap<UserId, User>,
    items: BTreeMap<ItemId, Item>,
    bookings: BTreeMap<BookingId, BookingRow>,
    comments: BTreeMap<CommentId, CommentRow>,
    requests: BTreeMap<RequestId, ItemRequest>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    /// 行から借り手とアイテムを解決した予約を組み立てる
    fn hydrate(&self, row: &BookingRow) -> Option<Booking> {
        let booker = self.users.get(&row.booker_id)?;
        let item = self.items.get(&row.item_id)?;
        Some(Booking {
            booking_id: row.booking_id,
            window: row.window,
            booker: booker.clone(),
            item: item.clone(),
            status: row.status,
        })
    }

    fn hydrate_all<'a>(&self, rows: impl Iterator<Item = &'a BookingRow>) -> Vec<Booking> {
        rows.filter_map(|row| self.hydrate(row)).collect()
    }

    fn approved_for_item(&self, item_id: ItemId) -> impl Iterator<Item = &BookingRow> {
        self.bookings
            .values()
            .filter(move |row| row.item_id == item_id && row.status == BookingStatus::Approved)
    }

    fn email_taken(&self, email: &str, except: Option<UserId>) -> bool {
        self.users
            .values()
            .any(|u| u.email == email && Some(u.user_id) != except)
    }

    /// アイテムと、それにぶら下がる予約・コメントを削除する
    fn remove_item_cascade(&mut self, item_id: ItemId) -> bool {
        self.bookings.retain(|_, row| row.item_id != item_id);
        self.comments.retain(|_, row| row.item_id != item_id);
        self.items.remove(&item_id).is_some()
    }
}

/// 全リポジトリポートのインメモリ実装
///
/// 1つのミューテックスで全テーブルを保護するため、各操作は自然に原子的になる。
/// 削除時の連鎖はPostgreSQLスキーマの外部キーと同じ振る舞いをする。
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| "memory store mutex poisoned".into())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, user_id: UserId) -> Result<Option<User>> {
        Ok(self.lock()?.users.get(&user_id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>> {
        Ok(self.lock()?.users.values().cloned().collect())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool> {
        Ok(self.lock()?.users.values().any(|u| u.email == email))
    }

    async fn insert(&self, user: NewUser) -> Result<UserWriteOutcome<User>> {
        let mut tables = self.lock()?;
        if tables.email_taken(&user.email, None) {
            return Ok(UserWriteOutcome::DuplicateEmail);
        }
        let user = user.persisted(UserId::new(tables.next_id()));
        tables.users.insert(user.user_id, user.clone());
        Ok(UserWriteOutcome::Saved(user))
    }

    async fn update(&self, user: &User) -> Result<UserWriteOutcome<()>> {
        let mut tables = self.lock()?;
        if tables.email_taken(&user.email, Some(user.user_id)) {
            return Ok(UserWriteOutcome::DuplicateEmail);
        }
        match tables.users.get_mut(&user.user_id) {
            Some(stored) => {
                *stored = user.clone();
                Ok(UserWriteOutcome::Saved(()))
            }
            None => Err(format!("user {} does not exist", user.user_id).into()),
        }
    }

    async fn delete(&self, user_id: UserId) -> Result<bool> {
        let mut tables = self.lock()?;
        if tables.users.remove(&user_id).is_none() {
            return Ok(false);
        }

        // リクエストを参照していたアイテムは参照を外す（ON DELETE SET NULL）
        let removed_requests: Vec<RequestId> = tables
            .requests
            .values()
            .filter(|r| r.requestor_id == user_id)
            .map(|r| r.request_id)
            .collect();
        tables.requests.retain(|_, r| r.requestor_id != user_id);
        for item in tables.items.values_mut() {
            if item
                .request_id
                .is_some_and(|id| removed_requests.contains(&id))
            {
                item.request_id = None;
            }
        }

        let owned: Vec<ItemId> = tables
            .items
            .values()
            .filter(|i| i.owner_id == user_id)
            .map(|i| i.item_id)
            .collect();
        for item_id in owned {
            tables.remove_item_cascade(item_id);
        }

        tables.bookings.retain(|_, row| row.booker_id != user_id);
        tables.comments.retain(|_, row| row.author_id != user_id);
        Ok(true)
    }
}

#[async_trait]
impl ItemRepository for MemoryStore {
    async fn find_by_id(&self, item_id: ItemId) -> Result<Option<Item>> {
        Ok(self.lock()?.items.get(&item_id).cloned())
    }

    async fn find_by_owner(&self, owner_id: UserId) -> Result<Vec<Item>> {
        Ok(self
            .lock()?
            .items
            .values()
            .filter(|i| i.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn search_available(&self, text: &str) -> Result<Vec<Item>> {
        Ok(self
            .lock()?
            .items
            .values()
            .filter(|i| matches_search(i, text))
            .cloned()
            .collect())
    }

    async fn find_by_request(&self, request_id: RequestId) -> Result<Vec<Item>> {
        Ok(self
            .lock()?
            .items
            .values()
            .filter(|i| i.request_id == Some(request_id))
            .cloned()
            .collect())
    }

    async fn insert(&self, item: NewItem) -> Result<Item> {
        let mut tables = self.lock()?;
        if !tables.users.contains_key(&item.owner_id) {
            return Err(format!("owner {} does not exist", item.owner_id).into());
        }
        let item = item.persisted(ItemId::new(tables.next_id()));
        tables.items.insert(item.item_id, item.clone());
        Ok(item)
    }

    async fn update(&self, item: &Item) -> Result<()> {
        let mut tables = self.lock()?;
        match tables.items.get_mut(&item.item_id) {
            Some(stored) => {
                *stored = item.clone();
                Ok(())
            }
            None => Err(format!("item {} does not exist", item.item_id).into()),
        }
    }

    async fn delete(&self, item_id: ItemId) -> Result<bool> {
        Ok(self.lock()?.remove_item_cascade(item_id))
    }
}

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn insert(&self, comment: NewComment) -> Result<CommentInsertOutcome> {
        let mut tables = self.lock()?;
        let author_name = tables
            .users
            .get(&comment.author_id)
            .map(|u| u.name.clone())
            .ok_or_else(|| format!("author {} does not exist", comment.author_id))?;
        let completed = tables.approved_for_item(comment.item_id).any(|row| {
            row.booker_id == comment.author_id && row.window.has_ended_before(comment.created_at)
        });
        if !completed {
            return Ok(CommentInsertOutcome::NoCompletedBooking);
        }
        let comment_id = CommentId::new(tables.next_id());
        tables.comments.insert(
            comment_id,
            CommentRow {
                comment_id,
                text: comment.text.clone(),
                item_id: comment.item_id,
                author_id: comment.author_id,
                created_at: comment.created_at,
            },
        );
        Ok(CommentInsertOutcome::Inserted(Comment {
            comment_id,
            text: comment.text,
            item_id: comment.item_id,
            author_id: comment.author_id,
            author_name,
            created_at: comment.created_at,
        }))
    }

    async fn find_by_item(&self, item_id: ItemId) -> Result<Vec<Comment>> {
        let tables = self.lock()?;
        let mut comments: Vec<Comment> = tables
            .comments
            .values()
            .filter(|row| row.item_id == item_id)
            .filter_map(|row| {
                let author = tables.users.get(&row.author_id)?;
                Some(Comment {
                    comment_id: row.comment_id,
                    text: row.text.clone(),
                    item_id: row.item_id,
                    author_id: row.author_id,
                    author_name: author.name.clone(),
                    created_at: row.created_at,
                })
            })
            .collect();
        comments.sort_by_key(|c| (c.created_at, c.comment_id));
        Ok(comments)
    }
}

#[async_trait]
impl ItemRequestRepository for MemoryStore {
    async fn insert(&self, request: NewItemRequest) -> Result<ItemRequest> {
        let mut tables = self.lock()?;
        if !tables.users.contains_key(&request.requestor_id) {
            return Err(format!("requestor {} does not exist", request.requestor_id).into());
        }
        let request = request.persisted(RequestId::new(tables.next_id()));
        tables.requests.insert(request.request_id, request.clone());
        Ok(request)
    }

    async fn find_by_id(&self, request_id: RequestId) -> Result<Option<ItemRequest>> {
        Ok(self.lock()?.requests.get(&request_id).cloned())
    }

    async fn find_by_requestor(&self, requestor_id: UserId) -> Result<Vec<ItemRequest>> {
        let mut requests: Vec<ItemRequest> = self
            .lock()?
            .requests
            .values()
            .filter(|r| r.requestor_id == requestor_id)
            .cloned()
            .collect();
        requests.sort_by(|a, b| (b.created_at, b.request_id).cmp(&(a.created_at, a.request_id)));
        Ok(requests)
    }

    async fn find_all(&self) -> Result<Vec<ItemRequest>> {
        let mut requests: Vec<ItemRequest> = self.lock()?.requests.values().cloned().collect();
        requests.sort_by(|a, b| (b.created_at, b.request_id).cmp(&(a.created_at, a.request_id)));
        Ok(requests)
    }
}

#[async_trait]
impl BookingRepository for MemoryStore {
    async fn insert(&self, booking: &NewBooking) -> Result<BookingInsertOutcome> {
        let mut tables = self.lock()?;
        if !tables.users.contains_key(&booking.booker.user_id) {
            return Err(format!("booker {} does not exist", booking.booker.user_id).into());
        }
        match tables.items.get(&booking.item.item_id) {
            Some(item) if !item.available => return Ok(BookingInsertOutcome::ItemUnavailable),
            Some(_) => {}
            None => return Err(format!("item {} does not exist", booking.item.item_id).into()),
        }
        let booking_id = BookingId::new(tables.next_id());
        tables.bookings.insert(
            booking_id,
            BookingRow {
                booking_id,
                window: booking.window,
                booker_id: booking.booker.user_id,
                item_id: booking.item.item_id,
                status: booking.status(),
            },
        );
        Ok(BookingInsertOutcome::Inserted(booking_id))
    }

    async fn find_by_id(&self, booking_id: BookingId) -> Result<Option<Booking>> {
        let tables = self.lock()?;
        Ok(tables
            .bookings
            .get(&booking_id)
            .and_then(|row| tables.hydrate(row)))
    }

    async fn find_for_user(
        &self,
        user_id: UserId,
        viewpoint: Viewpoint,
        filter: BookingFilter,
    ) -> Result<Vec<Booking>> {
        let tables = self.lock()?;
        let mut bookings: Vec<Booking> = tables
            .hydrate_all(tables.bookings.values())
            .into_iter()
            .filter(|b| viewpoint.key_of(b) == user_id && filter.matches(b))
            .collect();
        bookings.sort_by(|a, b| (b.start(), b.booking_id).cmp(&(a.start(), a.booking_id)));
        Ok(bookings)
    }

    async fn find_last_approved(
        &self,
        item_id: ItemId,
        now: DateTime<Utc>,
    ) -> Result<Option<Booking>> {
        let tables = self.lock()?;
        let row = tables
            .approved_for_item(item_id)
            .filter(|row| row.window.start() < now)
            .max_by_key(|row| (row.window.start(), row.booking_id));
        Ok(row.and_then(|row| tables.hydrate(row)))
    }

    async fn find_next_approved(
        &self,
        item_id: ItemId,
        now: DateTime<Utc>,
    ) -> Result<Option<Booking>> {
        let tables = self.lock()?;
        let row = tables
            .approved_for_item(item_id)
            .filter(|row| row.window.start() > now)
            .min_by_key(|row| (row.window.start(), row.booking_id));
        Ok(row.and_then(|row| tables.hydrate(row)))
    }

    async fn apply_decision(&self, booking: &Booking) -> Result<DecisionOutcome> {
        let mut tables = self.lock()?;

        let (item_id, window, status) = match tables.bookings.get(&booking.booking_id) {
            Some(row) => (row.item_id, row.window, row.status),
            None => return Err(format!("booking {} does not exist", booking.booking_id).into()),
        };
        if !status.is_waiting() {
            return Ok(DecisionOutcome::AlreadyDecided);
        }

        if booking.status == BookingStatus::Approved {
            let overlaps = tables
                .approved_for_item(item_id)
                .any(|row| row.booking_id != booking.booking_id && row.window.overlaps(&window));
            if overlaps {
                return Ok(DecisionOutcome::OverlapsApproved);
            }
            if let Some(item) = tables.items.get_mut(&item_id) {
                item.available = false;
            }
        }

        if let Some(row) = tables.bookings.get_mut(&booking.booking_id) {
            row.status = booking.status;
        }
        Ok(DecisionOutcome::Applied)
    }
}
