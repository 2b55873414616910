use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use migration::{Migrator, MigratorTrait};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectOptions, ConnectionTrait, Database,
    DatabaseBackend, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, Statement, TransactionTrait,
};
use tracing::{debug, info};

use super::sea_orm_entity::follows::{
    Column as FollowColumn, Entity as FollowEntity, Model as FollowModel,
};
use super::sea_orm_entity::messages::{
    ActiveModel as MessageActiveModel, Column as MessageColumn, Entity as MessageEntity,
    Model as MessageModel,
};
use super::sea_orm_entity::users::{
    ActiveModel as UserActiveModel, Column as UserColumn, Entity as UserEntity,
    Model as UserModel,
};
use crate::config::{ConfigError, DirectoryConfig};
use crate::modules::user::application::domain::entities::{
    Message, MessageId, NewMessage, NewUser, User, UserId,
};
use crate::modules::user::application::ports::outgoing::{
    FollowRepository, MessageRepository, RepositoryError, StoreTransaction, UniqueField,
    UserRepository, UserStore,
};

#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Database connection failed: {0}")]
    Database(String),

    #[error("Migration failed: {0}")]
    Migration(String),
}

#[derive(Clone, Debug)]
pub struct PostgresUserStore {
    db: Arc<DatabaseConnection>,
}

impl PostgresUserStore {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Open a pool from configuration and bring the schema up to date.
    #[cfg(not(tarpaulin_include))]
    pub async fn connect(config: &DirectoryConfig) -> Result<Self, ConnectError> {
        let db_url = config.require_database_url()?;

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(config.max_connections)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(5))
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false);

        let conn = Database::connect(opt)
            .await
            .map_err(|e| ConnectError::Database(e.to_string()))?;

        if config.run_migrations {
            Migrator::up(&conn, None)
                .await
                .map_err(|e| ConnectError::Migration(e.to_string()))?;
            info!("User directory migrations applied");
        }

        info!(
            max_connections = config.max_connections,
            "Connected to user database"
        );

        Ok(Self::new(Arc::new(conn)))
    }
}

#[async_trait]
impl UserStore for PostgresUserStore {
    type Transaction = PostgresTransaction;

    async fn begin(&self) -> Result<PostgresTransaction, RepositoryError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;
        Ok(PostgresTransaction { txn })
    }
}

/// Open database transaction. SeaORM rolls it back when dropped uncommitted.
pub struct PostgresTransaction {
    txn: DatabaseTransaction,
}

// =====================================================
// Error mapping
// =====================================================

fn map_db_err(e: DbErr) -> RepositoryError {
    RepositoryError::DatabaseError(e.to_string())
}

/// Translate constraint failures raised by INSERT into domain errors.
fn map_insert_err(e: DbErr) -> RepositoryError {
    let err_str = e.to_string().to_lowercase();

    if err_str.contains("23505")
        || err_str.contains("duplicate key")
        || err_str.contains("unique constraint")
    {
        if err_str.contains("username") {
            return RepositoryError::UniqueViolation(UniqueField::Username);
        }
        if err_str.contains("email") {
            return RepositoryError::UniqueViolation(UniqueField::Email);
        }
    }

    if err_str.contains("23503") || err_str.contains("foreign key") {
        return RepositoryError::UserNotFound;
    }

    RepositoryError::DatabaseError(e.to_string())
}

// =====================================================
// Model mapping
// =====================================================

fn map_to_message(model: MessageModel) -> Message {
    Message {
        id: MessageId::from(model.id),
        text: model.text,
        timestamp: model.timestamp.with_timezone(&Utc),
        user_id: UserId::from(model.user_id),
    }
}

fn map_to_user(model: UserModel, edges: Vec<FollowModel>, messages: Vec<MessageModel>) -> User {
    let mut following = BTreeSet::new();
    let mut followers = BTreeSet::new();

    for edge in edges {
        if edge.follower_id == model.id {
            following.insert(UserId::from(edge.followed_id));
        }
        if edge.followed_id == model.id {
            followers.insert(UserId::from(edge.follower_id));
        }
    }

    User {
        id: UserId::from(model.id),
        email: model.email,
        username: model.username,
        image_url: model.image_url,
        header_image_url: model.header_image_url,
        bio: model.bio,
        location: model.location,
        password_hash: model.password_hash,
        created_at: model.created_at.with_timezone(&Utc),
        messages: messages.into_iter().map(map_to_message).collect(),
        following,
        followers,
    }
}

impl PostgresTransaction {
    /// Load edges and messages for a user row.
    async fn hydrate(&self, model: UserModel) -> Result<User, RepositoryError> {
        let edges = FollowEntity::find()
            .filter(
                Condition::any()
                    .add(FollowColumn::FollowerId.eq(model.id))
                    .add(FollowColumn::FollowedId.eq(model.id)),
            )
            .all(&self.txn)
            .await
            .map_err(map_db_err)?;

        let messages = MessageEntity::find()
            .filter(MessageColumn::UserId.eq(model.id))
            .order_by_desc(MessageColumn::Timestamp)
            .order_by_desc(MessageColumn::Id)
            .all(&self.txn)
            .await
            .map_err(map_db_err)?;

        Ok(map_to_user(model, edges, messages))
    }

    async fn hydrate_optional(
        &self,
        model: Option<UserModel>,
    ) -> Result<Option<User>, RepositoryError> {
        match model {
            Some(model) => self.hydrate(model).await.map(Some),
            None => Ok(None),
        }
    }

    /// Insert the edge only when both users exist; an existing edge is left alone.
    fn guarded_follow_stmt(follower: i32, followed: i32) -> Statement {
        Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            r#"
            INSERT INTO follows (follower_id, followed_id)
            SELECT f.id, t.id
            FROM users f
            JOIN users t
              ON t.id = $2
            WHERE f.id = $1
            ON CONFLICT (follower_id, followed_id) DO NOTHING
            "#,
            vec![follower.into(), followed.into()],
        )
    }

    fn follow_probe_stmt(follower: i32, followed: i32) -> Statement {
        Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            r#"
            SELECT
              EXISTS (SELECT 1 FROM users WHERE id = $1) AS follower_ok,
              EXISTS (SELECT 1 FROM users WHERE id = $2) AS followed_ok,
              EXISTS (
                SELECT 1
                FROM follows
                WHERE follower_id = $1
                  AND followed_id = $2
              ) AS edge_exists
            "#,
            vec![follower.into(), followed.into()],
        )
    }

    /// Resolve why the guarded insert affected 0 rows.
    async fn resolve_follow_failure(
        &self,
        follower: i32,
        followed: i32,
    ) -> Result<(), RepositoryError> {
        let row = self
            .txn
            .query_one(Self::follow_probe_stmt(follower, followed))
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| {
                RepositoryError::DatabaseError("Follow probe returned no rows".to_string())
            })?;

        let follower_ok: bool = row.try_get("", "follower_ok").unwrap_or(false);
        let followed_ok: bool = row.try_get("", "followed_ok").unwrap_or(false);
        let edge_exists: bool = row.try_get("", "edge_exists").unwrap_or(false);

        if !follower_ok || !followed_ok {
            return Err(RepositoryError::UserNotFound);
        }
        if edge_exists {
            return Ok(());
        }

        Err(RepositoryError::DatabaseError(
            "Unexpected follow resolution state".to_string(),
        ))
    }
}

#[async_trait]
impl StoreTransaction for PostgresTransaction {
    async fn commit(self) -> Result<(), RepositoryError> {
        self.txn.commit().await.map_err(map_db_err)?;
        debug!("Postgres transaction committed");
        Ok(())
    }

    async fn rollback(self) -> Result<(), RepositoryError> {
        self.txn.rollback().await.map_err(map_db_err)?;
        debug!("Postgres transaction rolled back");
        Ok(())
    }
}

#[async_trait]
impl UserRepository for PostgresTransaction {
    async fn create_user(&self, user: NewUser) -> Result<User, RepositoryError> {
        let active_user = UserActiveModel {
            id: NotSet,
            email: Set(user.email),
            username: Set(user.username),
            image_url: Set(user.image_url),
            header_image_url: Set(user.header_image_url),
            bio: Set(None),
            location: Set(None),
            password_hash: Set(user.password_hash),
            created_at: Set(Utc::now().into()),
        };

        let inserted = active_user.insert(&self.txn).await.map_err(map_insert_err)?;

        Ok(map_to_user(inserted, Vec::new(), Vec::new()))
    }

    async fn find_by_id(&self, user_id: UserId) -> Result<Option<User>, RepositoryError> {
        let user = UserEntity::find_by_id(user_id.value())
            .one(&self.txn)
            .await
            .map_err(map_db_err)?;

        self.hydrate_optional(user).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        let user = UserEntity::find()
            .filter(UserColumn::Username.eq(username))
            .one(&self.txn)
            .await
            .map_err(map_db_err)?;

        self.hydrate_optional(user).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let user = UserEntity::find()
            .filter(UserColumn::Email.eq(email))
            .one(&self.txn)
            .await
            .map_err(map_db_err)?;

        self.hydrate_optional(user).await
    }

    async fn delete_user(&self, user_id: UserId) -> Result<(), RepositoryError> {
        // messages and follows cascade through their foreign keys
        let result = UserEntity::delete_by_id(user_id.value())
            .exec(&self.txn)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::UserNotFound);
        }

        Ok(())
    }
}

#[async_trait]
impl FollowRepository for PostgresTransaction {
    async fn add_follow(
        &self,
        follower: UserId,
        followed: UserId,
    ) -> Result<(), RepositoryError> {
        let (follower, followed) = (follower.value(), followed.value());

        let result = self
            .txn
            .execute(Self::guarded_follow_stmt(follower, followed))
            .await
            .map_err(map_db_err)?;

        if result.rows_affected() == 1 {
            return Ok(());
        }

        // 0 affected => a user is missing or the edge already existed
        self.resolve_follow_failure(follower, followed).await
    }

    async fn remove_follow(
        &self,
        follower: UserId,
        followed: UserId,
    ) -> Result<(), RepositoryError> {
        FollowEntity::delete_many()
            .filter(FollowColumn::FollowerId.eq(follower.value()))
            .filter(FollowColumn::FollowedId.eq(followed.value()))
            .exec(&self.txn)
            .await
            .map_err(map_db_err)?;

        Ok(())
    }

    async fn is_following(
        &self,
        follower: UserId,
        followed: UserId,
    ) -> Result<bool, RepositoryError> {
        let edge = FollowEntity::find_by_id((follower.value(), followed.value()))
            .one(&self.txn)
            .await
            .map_err(map_db_err)?;

        Ok(edge.is_some())
    }

    async fn following_of(&self, user_id: UserId) -> Result<BTreeSet<UserId>, RepositoryError> {
        let edges = FollowEntity::find()
            .filter(FollowColumn::FollowerId.eq(user_id.value()))
            .all(&self.txn)
            .await
            .map_err(map_db_err)?;

        Ok(edges
            .into_iter()
            .map(|edge| UserId::from(edge.followed_id))
            .collect())
    }

    async fn followers_of(&self, user_id: UserId) -> Result<BTreeSet<UserId>, RepositoryError> {
        let edges = FollowEntity::find()
            .filter(FollowColumn::FollowedId.eq(user_id.value()))
            .all(&self.txn)
            .await
            .map_err(map_db_err)?;

        Ok(edges
            .into_iter()
            .map(|edge| UserId::from(edge.follower_id))
            .collect())
    }
}

#[async_trait]
impl MessageRepository for PostgresTransaction {
    async fn create_message(&self, message: NewMessage) -> Result<Message, RepositoryError> {
        let active_message = MessageActiveModel {
            id: NotSet,
            text: Set(message.text),
            timestamp: Set(message.timestamp.into()),
            user_id: Set(message.user_id.value()),
        };

        let inserted = active_message
            .insert(&self.txn)
            .await
            .map_err(map_insert_err)?;

        Ok(map_to_message(inserted))
    }

    async fn find_message(
        &self,
        message_id: MessageId,
    ) -> Result<Option<Message>, RepositoryError> {
        let message = MessageEntity::find_by_id(message_id.value())
            .one(&self.txn)
            .await
            .map_err(map_db_err)?;

        Ok(message.map(map_to_message))
    }

    async fn messages_of(&self, user_id: UserId) -> Result<Vec<Message>, RepositoryError> {
        let messages = MessageEntity::find()
            .filter(MessageColumn::UserId.eq(user_id.value()))
            .order_by_desc(MessageColumn::Timestamp)
            .order_by_desc(MessageColumn::Id)
            .all(&self.txn)
            .await
            .map_err(map_db_err)?;

        Ok(messages.into_iter().map(map_to_message).collect())
    }

    async fn delete_message(&self, message_id: MessageId) -> Result<(), RepositoryError> {
        let result = MessageEntity::delete_by_id(message_id.value())
            .exec(&self.txn)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::MessageNotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::sea_query::Value;
    use sea_orm::{MockDatabase, MockExecResult};
    use std::collections::BTreeMap;

    fn ok_exec(rows: u64) -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected: rows,
        }
    }

    fn probe_row(follower_ok: bool, followed_ok: bool, edge_exists: bool) -> BTreeMap<String, Value> {
        BTreeMap::from([
            ("follower_ok".to_string(), Value::Bool(Some(follower_ok))),
            ("followed_ok".to_string(), Value::Bool(Some(followed_ok))),
            ("edge_exists".to_string(), Value::Bool(Some(edge_exists))),
        ])
    }

    fn user_model(id: i32, username: &str, email: &str) -> UserModel {
        UserModel {
            id,
            email: email.to_string(),
            username: username.to_string(),
            image_url: "/static/images/default-pic.png".to_string(),
            header_image_url: "/static/images/warbler-hero.jpg".to_string(),
            bio: None,
            location: None,
            password_hash: "hashed_password".to_string(),
            created_at: Utc::now().into(),
        }
    }

    fn new_user() -> NewUser {
        NewUser {
            email: "user1".to_string(),
            username: "testuser1".to_string(),
            image_url: "/static/images/default-pic.png".to_string(),
            header_image_url: "/static/images/warbler-hero.jpg".to_string(),
            password_hash: "hashed_password".to_string(),
        }
    }

    async fn transaction_over(db: MockDatabase) -> PostgresTransaction {
        let store = PostgresUserStore::new(Arc::new(db.into_connection()));
        store.begin().await.unwrap()
    }

    // =====================================================
    // users
    // =====================================================

    #[tokio::test]
    async fn test_create_user_success() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user_model(1, "testuser1", "user1")]])
            .append_exec_results([ok_exec(1)]);
        let tx = transaction_over(db).await;

        let user = tx.create_user(new_user()).await.unwrap();

        assert_eq!(user.id, UserId::from(1));
        assert_eq!(user.username, "testuser1");
        assert_eq!(user.email, "user1");
        assert!(user.messages.is_empty());
        assert!(user.followers.is_empty());
        assert!(user.following.is_empty());
    }

    #[tokio::test]
    async fn test_create_user_duplicate_username() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).append_query_errors([
            DbErr::Custom(
                "duplicate key value violates unique constraint \"users_username_key\"".to_string(),
            ),
        ]);
        let tx = transaction_over(db).await;

        let result = tx.create_user(new_user()).await;

        assert_eq!(
            result,
            Err(RepositoryError::UniqueViolation(UniqueField::Username))
        );
    }

    #[tokio::test]
    async fn test_create_user_duplicate_email() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).append_query_errors([
            DbErr::Custom(
                "duplicate key value violates unique constraint \"users_email_key\"".to_string(),
            ),
        ]);
        let tx = transaction_over(db).await;

        let result = tx.create_user(new_user()).await;

        assert_eq!(
            result,
            Err(RepositoryError::UniqueViolation(UniqueField::Email))
        );
    }

    #[tokio::test]
    async fn test_create_user_database_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection timeout".to_string())]);
        let tx = transaction_over(db).await;

        match tx.create_user(new_user()).await {
            Err(RepositoryError::DatabaseError(msg)) => assert!(msg.contains("connection timeout")),
            other => panic!("Expected DatabaseError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_find_by_username_hydrates_relations() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user_model(1, "testuser1", "user1")]])
            .append_query_results([vec![
                FollowModel {
                    follower_id: 1,
                    followed_id: 2,
                },
                FollowModel {
                    follower_id: 3,
                    followed_id: 1,
                },
            ]])
            .append_query_results([vec![MessageModel {
                id: 10,
                text: "hello".to_string(),
                timestamp: Utc::now().into(),
                user_id: 1,
            }]]);
        let tx = transaction_over(db).await;

        let user = tx.find_by_username("testuser1").await.unwrap().unwrap();

        assert_eq!(user.following, BTreeSet::from([UserId::from(2)]));
        assert_eq!(user.followers, BTreeSet::from([UserId::from(3)]));
        assert_eq!(user.messages.len(), 1);
        assert_eq!(user.messages[0].id, MessageId::from(10));
        assert_eq!(user.to_string(), "<User #1: testuser1, user1>");
    }

    #[tokio::test]
    async fn test_find_by_id_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<UserModel>::new()]);
        let tx = transaction_over(db).await;

        let result = tx.find_by_id(UserId::from(404)).await;

        assert_eq!(result, Ok(None));
    }

    #[tokio::test]
    async fn test_delete_user_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).append_exec_results([ok_exec(0)]);
        let tx = transaction_over(db).await;

        let result = tx.delete_user(UserId::from(404)).await;

        assert_eq!(result, Err(RepositoryError::UserNotFound));
    }

    #[tokio::test]
    async fn test_delete_user_success() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).append_exec_results([ok_exec(1)]);
        let tx = transaction_over(db).await;

        assert!(tx.delete_user(UserId::from(1)).await.is_ok());
    }

    // =====================================================
    // follows
    // =====================================================

    #[tokio::test]
    async fn test_add_follow_success() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).append_exec_results([ok_exec(1)]);
        let tx = transaction_over(db).await;

        let result = tx.add_follow(UserId::from(1), UserId::from(2)).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_add_follow_idempotent_existing_edge() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([ok_exec(0)])
            .append_query_results([vec![probe_row(true, true, true)]]);
        let tx = transaction_over(db).await;

        let result = tx.add_follow(UserId::from(1), UserId::from(2)).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_add_follow_missing_user() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([ok_exec(0)])
            .append_query_results([vec![probe_row(true, false, false)]]);
        let tx = transaction_over(db).await;

        let result = tx.add_follow(UserId::from(1), UserId::from(99)).await;

        assert_eq!(result, Err(RepositoryError::UserNotFound));
    }

    #[tokio::test]
    async fn test_add_follow_database_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_errors([DbErr::Custom("connection error".to_string())]);
        let tx = transaction_over(db).await;

        let result = tx.add_follow(UserId::from(1), UserId::from(2)).await;

        assert!(matches!(result, Err(RepositoryError::DatabaseError(_))));
    }

    #[tokio::test]
    async fn test_is_following() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![FollowModel {
                follower_id: 1,
                followed_id: 2,
            }]])
            .append_query_results([Vec::<FollowModel>::new()]);
        let tx = transaction_over(db).await;

        assert_eq!(tx.is_following(UserId::from(1), UserId::from(2)).await, Ok(true));
        assert_eq!(tx.is_following(UserId::from(2), UserId::from(1)).await, Ok(false));
    }

    #[tokio::test]
    async fn test_followers_of() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).append_query_results([vec![
            FollowModel {
                follower_id: 4,
                followed_id: 1,
            },
            FollowModel {
                follower_id: 5,
                followed_id: 1,
            },
        ]]);
        let tx = transaction_over(db).await;

        let followers = tx.followers_of(UserId::from(1)).await.unwrap();

        assert_eq!(followers, BTreeSet::from([UserId::from(4), UserId::from(5)]));
    }

    // =====================================================
    // messages
    // =====================================================

    #[tokio::test]
    async fn test_create_message_unknown_author() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).append_query_errors([
            DbErr::Custom(
                "insert or update on table \"messages\" violates foreign key constraint".to_string(),
            ),
        ]);
        let tx = transaction_over(db).await;

        let result = tx
            .create_message(NewMessage {
                text: "hello".to_string(),
                timestamp: Utc::now(),
                user_id: UserId::from(42),
            })
            .await;

        assert_eq!(result, Err(RepositoryError::UserNotFound));
    }

    #[tokio::test]
    async fn test_delete_message_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).append_exec_results([ok_exec(0)]);
        let tx = transaction_over(db).await;

        let result = tx.delete_message(MessageId::from(7)).await;

        assert_eq!(result, Err(RepositoryError::MessageNotFound));
    }

    // =====================================================
    // transaction scope
    // =====================================================

    #[tokio::test]
    async fn test_commit_and_rollback() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let store = PostgresUserStore::new(Arc::new(db));

        let tx = store.begin().await.unwrap();
        assert!(tx.commit().await.is_ok());

        let tx = store.begin().await.unwrap();
        assert!(tx.rollback().await.is_ok());
    }

    #[test]
    fn test_map_insert_err_passes_through_other_errors() {
        let err = map_insert_err(DbErr::Custom("disk full".to_string()));
        assert!(matches!(err, RepositoryError::DatabaseError(msg) if msg.contains("disk full")));
    }
}
