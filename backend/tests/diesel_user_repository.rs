//! Integration tests for `DieselUserRepository` against embedded PostgreSQL.
//!
//! Each test gets its own database cloned from a migrated template, so the
//! unique constraints and row mapping run exactly as in production.

use chrono::{DateTime, TimeZone, Utc};
use notes_backend::domain::ports::{UserPersistenceError, UserRepository};
use notes_backend::domain::{EmailAddress, NewUser, PasswordDigest, UserId, Username};
use notes_backend::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
use pg_embedded_setup_unpriv::TemporaryDatabase;
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;

#[path = "support/pg_embed.rs"]
mod pg_embed;

mod support;

use pg_embed::shared_cluster;
use support::{handle_cluster_setup_failure, provision_template_database};

struct TestContext {
    /// Tokio runtime reused for all async operations in this test.
    runtime: Runtime,
    repository: DieselUserRepository,
    _database: TemporaryDatabase,
}

fn setup_test_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = shared_cluster()?;
    let temp_db = provision_template_database(cluster)?;

    let config = PoolConfig::new(temp_db.url())
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(async { DbPool::new(config).await })
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        runtime,
        repository: DieselUserRepository::new(pool),
        _database: temp_db,
    })
}

#[fixture]
fn diesel_users() -> Option<TestContext> {
    match setup_test_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn registered_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0)
        .single()
        .expect("valid time")
}

fn new_user(username: &str, email: &str) -> NewUser {
    NewUser {
        username: Username::new(username).expect("valid username"),
        email: EmailAddress::new(email).expect("valid email"),
        password_digest: PasswordDigest::new("$pbkdf2-sha256$i=1000,l=32$c2FsdA$ZGlnZXN0"),
        created_at: registered_at(),
    }
}

#[rstest]
fn inserted_users_read_back_by_name_and_id(diesel_users: Option<TestContext>) {
    let Some(ctx) = diesel_users else {
        eprintln!("SKIP-TEST-CLUSTER: inserted_users_read_back_by_name_and_id skipped");
        return;
    };

    ctx.runtime.block_on(async {
        let alice = ctx
            .repository
            .insert(&new_user("alice", "a@example.com"))
            .await
            .expect("insert alice");
        let bob = ctx
            .repository
            .insert(&new_user("bob", "b@example.com"))
            .await
            .expect("insert bob");
        assert_ne!(alice.id(), bob.id());
        assert_eq!(alice.username().as_ref(), "alice");
        assert_eq!(alice.created_at(), registered_at());

        let by_name = ctx
            .repository
            .find_by_username(alice.username())
            .await
            .expect("lookup succeeds");
        assert_eq!(by_name, Some(alice));

        let by_id = ctx.repository.find_by_id(bob.id()).await.expect("lookup succeeds");
        assert_eq!(by_id, Some(bob));

        let missing = ctx
            .repository
            .find_by_id(UserId::new(i64::MAX))
            .await
            .expect("lookup succeeds");
        assert_eq!(missing, None);
    });
}

#[rstest]
#[case(new_user("alice", "other@example.com"), "username")]
#[case(new_user("other", "a@example.com"), "email")]
fn unique_constraints_name_the_duplicate_field(
    diesel_users: Option<TestContext>,
    #[case] second: NewUser,
    #[case] field: &str,
) {
    let Some(ctx) = diesel_users else {
        eprintln!("SKIP-TEST-CLUSTER: unique_constraints_name_the_duplicate_field skipped");
        return;
    };

    ctx.runtime.block_on(async {
        ctx.repository
            .insert(&new_user("alice", "a@example.com"))
            .await
            .expect("first insert");
        let err = ctx
            .repository
            .insert(&second)
            .await
            .expect_err("second insert must violate a unique constraint");
        assert_eq!(err, UserPersistenceError::duplicate(field));
    });
}

#[rstest]
#[case("Alice", "b@example.com")]
#[case(" alice", "c@example.com")]
fn usernames_match_exactly(
    diesel_users: Option<TestContext>,
    #[case] username: &str,
    #[case] email: &str,
) {
    let Some(ctx) = diesel_users else {
        eprintln!("SKIP-TEST-CLUSTER: usernames_match_exactly skipped");
        return;
    };

    ctx.runtime.block_on(async {
        let alice = ctx
            .repository
            .insert(&new_user("alice", "a@example.com"))
            .await
            .expect("insert alice");
        let other = ctx
            .repository
            .insert(&new_user(username, email))
            .await
            .expect("a differently spelled name is a distinct account");
        assert_ne!(alice.id(), other.id());
        assert_eq!(other.username().as_ref(), username);

        let found = ctx
            .repository
            .find_by_username(other.username())
            .await
            .expect("lookup succeeds")
            .expect("account exists");
        assert_eq!(found.id(), other.id());
    });
}
