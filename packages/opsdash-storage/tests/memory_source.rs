use serde_json::{Value, json};

use opsdash_storage::{DataSource, Error, Query, memory::MemorySource};
use opsdash_testkit::fixtures;

fn deals() -> Vec<Value> {
	vec![
		fixtures::deal_row("Oak Ave", "active", "2024-02-01", "2024-03-01"),
		fixtures::deal_row("Elm St", "completed", "2024-03-01", "2024-04-01"),
		fixtures::deal_row("Pine Rd", "delayed", "2024-01-15", "2024-02-15"),
		json!({ "deal_name": "No Status", "project_status": null, "start_date": null }),
	]
}

fn names(rows: &[Value]) -> Vec<&str> {
	rows.iter().filter_map(|row| row.get("deal_name").and_then(Value::as_str)).collect()
}

#[tokio::test]
async fn neq_filter_skips_matches_and_nulls() {
	let source = MemorySource::new().with_table("deals", deals());
	let query = Query::table("deals").neq("project_status", "completed");
	let rows = source.query(&query).await.expect("query failed");

	assert_eq!(names(&rows), vec!["Oak Ave", "Pine Rd"]);
}

#[tokio::test]
async fn orders_descending_with_nulls_first_then_limits() {
	let source = MemorySource::new().with_table("deals", deals());
	let query = Query::table("deals").order_by("start_date", true).limit(3);
	let rows = source.query(&query).await.expect("query failed");

	assert_eq!(names(&rows), vec!["No Status", "Elm St", "Oak Ave"]);
}

#[tokio::test]
async fn orders_ascending_with_nulls_last() {
	let source = MemorySource::new().with_table("deals", deals());
	let query = Query::table("deals").order_by("start_date", false);
	let rows = source.query(&query).await.expect("query failed");

	assert_eq!(names(&rows), vec!["Pine Rd", "Oak Ave", "Elm St", "No Status"]);
}

#[tokio::test]
async fn eq_filter_compares_numbers_as_text() {
	let source = MemorySource::new().with_table(
		"recent_activity",
		vec![
			fixtures::activity_row("2024-05-10T10:00:00Z", 7, "start", "R-1", "Ana"),
			fixtures::activity_row("2024-05-10T11:00:00Z", 8, "issue", "R-2", "Ben"),
		],
	);
	let query = Query::table("recent_activity").eq("deal_id", "8");
	let rows = source.query(&query).await.expect("query failed");

	assert_eq!(rows.len(), 1);
	assert_eq!(rows[0]["performed_by"], "Ben");
}

#[tokio::test]
async fn projects_selected_columns() {
	let source = MemorySource::new().with_table("deals", deals());
	let query = Query::table("deals").select("deal_name, missing").limit(1);
	let rows = source.query(&query).await.expect("query failed");

	assert_eq!(rows, vec![json!({ "deal_name": "Oak Ave", "missing": null })]);
}

#[tokio::test]
async fn unknown_table_is_an_error() {
	let source = MemorySource::new();
	let err = source.query(&Query::table("deals")).await.expect_err("expected failure");

	assert!(matches!(err, Error::InvalidArgument(_)), "Unexpected error: {err:?}.");
}

#[tokio::test]
async fn removing_a_table_makes_later_queries_fail() {
	let source = MemorySource::new().with_table("deals", deals());

	assert!(source.query(&Query::table("deals")).await.is_ok());
	assert_eq!(source.remove_table("deals").map(|rows| rows.len()), Some(4));
	assert!(source.query(&Query::table("deals")).await.is_err());
}
