use serde_json::Value;

use opsdash_config::Postgres;
use opsdash_storage::{
	DataSource, Query,
	db::{Db, PgSource},
};
use opsdash_testkit::TestDatabase;

#[tokio::test]
#[ignore = "Requires external Postgres. Set OPSDASH_PG_DSN to run."]
async fn pg_source_filters_orders_and_limits() {
	let Some(base_dsn) = opsdash_testkit::env_dsn() else {
		eprintln!("Skipping pg_source_filters_orders_and_limits; set OPSDASH_PG_DSN to run this test.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");

	test_db.install_schema().await.expect("Failed to install schema.");

	let cfg = Postgres { dsn: test_db.dsn().to_string(), pool_max_conns: 1 };
	let db = Db::connect(&cfg).await.expect("Failed to connect to Postgres.");

	sqlx::query(
		"\
INSERT INTO deals (deal_name, project_status, start_date, end_date)
VALUES
	('Oak Ave', 'active', '2024-02-01', '2024-03-01'),
	('Elm St', 'completed', '2024-03-01', '2024-04-01'),
	('Pine Rd', 'delayed', '2024-01-15', '2024-02-15')",
	)
	.execute(&db.pool)
	.await
	.expect("Failed to seed deals.");

	let source = PgSource::new(db);
	let query = Query::table("deals")
		.neq("project_status", "completed")
		.order_by("start_date", true)
		.limit(10);
	let rows = source.query(&query).await.expect("Query failed.");
	let names: Vec<&str> =
		rows.iter().filter_map(|row| row.get("deal_name").and_then(Value::as_str)).collect();

	assert_eq!(names, vec!["Oak Ave", "Pine Rd"]);
	assert_eq!(rows[0]["start_date"], "2024-02-01");

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set OPSDASH_PG_DSN to run."]
async fn pg_source_reads_metric_view_numerics() {
	let Some(base_dsn) = opsdash_testkit::env_dsn() else {
		eprintln!("Skipping pg_source_reads_metric_view_numerics; set OPSDASH_PG_DSN to run this test.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");

	test_db.install_schema().await.expect("Failed to install schema.");

	let cfg = Postgres { dsn: test_db.dsn().to_string(), pool_max_conns: 1 };
	let db = Db::connect(&cfg).await.expect("Failed to connect to Postgres.");

	sqlx::query(
		"\
INSERT INTO dashboard_metrics (metric_name, metric_value, change_percentage, trend)
VALUES ('units_completed', 42, 5, 'up'), ('completion_rate', 87.5, -2, 'down')",
	)
	.execute(&db.pool)
	.await
	.expect("Failed to seed metrics.");

	let source = PgSource::new(db);
	let query = Query::table("dashboard_metrics_view").order_by("metric_name", false);
	let rows = source.query(&query).await.expect("Query failed.");

	assert_eq!(rows.len(), 2);
	assert_eq!(rows[0]["metric_name"], "completion_rate");
	assert_eq!(rows[0]["metric_value"].as_f64(), Some(87.5));

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
