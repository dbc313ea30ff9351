//! Document storage against a live PostgreSQL.
//!
//! Run with `PLAYGROUND_TEST_DATABASE_URL=postgres://... cargo test -- --ignored`.

use serde_json::json;
use sqlx::PgPool;

use playground::adapters::postgres::{PostgresToolRepository, PostgresUserToolStateRepository};
use playground::domain::foundation::UserId;
use playground::domain::playground::{NewTool, Tool, UserToolState};
use playground::ports::{ToolRepository, UserToolStateRepository};

async fn pool() -> PgPool {
    let url = std::env::var("PLAYGROUND_TEST_DATABASE_URL")
        .expect("PLAYGROUND_TEST_DATABASE_URL must be set");
    let pool = PgPool::connect(&url).await.unwrap();
    sqlx::migrate!("./migrations").run(&pool).await.unwrap();
    pool
}

#[tokio::test]
#[ignore]
async fn documents_keep_key_order() {
    let pool = pool().await;
    let tools = PostgresToolRepository::new(pool.clone());
    let states = PostgresUserToolStateRepository::new(pool);

    let tool = Tool::create(NewTool {
        configuration: json!({"z": 1, "a": 2}),
        ..NewTool::named(format!("Order Check {}", uuid::Uuid::new_v4().simple()))
    })
    .unwrap();
    tools.save(&tool).await.unwrap();

    let user = UserId::new("order-check").unwrap();
    let mut state = UserToolState::empty(user.clone(), *tool.id());
    states.create(&state).await.unwrap();
    state.replace_saved_data(json!({"zeta": [3, 1], "alpha": {"y": 0, "b": 1}})).unwrap();
    states.update(&state).await.unwrap();

    let stored = tools.find_by_id(tool.id()).await.unwrap().unwrap();
    assert_eq!(stored.configuration().to_string(), r#"{"z":1,"a":2}"#);

    let updated = tools
        .replace_configuration(tool.id(), &json!({"y": true, "b": false}))
        .await
        .unwrap();
    assert_eq!(updated.configuration().to_string(), r#"{"y":true,"b":false}"#);

    let saved = UserToolStateRepository::find(&states, &user, tool.id())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        saved.saved_data().to_string(),
        r#"{"zeta":[3,1],"alpha":{"y":0,"b":1}}"#
    );

    ToolRepository::delete(&tools, tool.id()).await.unwrap();
}
