use benefitdesk_backend::db::connection::create_pool;
use sqlx::PgPool;

mod support;

async fn ensure_test_db() -> String {
    let _pool = support::test_pool().await;
    std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL set")
}

async fn ping(pool: &PgPool) {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .expect("ping database");
}

#[tokio::test]
async fn create_pool_connects_and_serves_queries() {
    let url = ensure_test_db().await;
    let pool = create_pool(&url).await.expect("create pool");
    ping(&pool).await;
}
