//! Behavioural tests for a full reminder pass against a mock GitHub API.

use std::cell::RefCell;
use std::rc::Rc;

use camino::Utf8PathBuf;
use chrono::{TimeDelta, Utc};
use review_nudge::{
    PersonalAccessToken, ReminderError, ReminderSettings, RepositoryLocator, RunSummary, run,
};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};
use serde_json::{Value, json};
use tempfile::TempDir;
use tokio::runtime::Runtime;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CATEGORY: &str = "Reviews";
const TITLE: &str = "Pending reviews";

/// Shared runtime wrapper that can be stored in rstest-bdd Slot.
#[derive(Clone)]
struct SharedRuntime(Rc<RefCell<Runtime>>);

impl SharedRuntime {
    fn new(runtime: Runtime) -> Self {
        Self(Rc::new(RefCell::new(runtime)))
    }

    fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.0.borrow().block_on(future)
    }
}

/// Template file kept alive for the duration of a scenario.
struct TemplateFile {
    _dir: TempDir,
    path: Utf8PathBuf,
}

#[derive(ScenarioState, Default)]
struct ReminderState {
    runtime: Slot<SharedRuntime>,
    server: Slot<MockServer>,
    template: Slot<Rc<TemplateFile>>,
    summary: Slot<RunSummary>,
    error: Slot<ReminderError>,
}

#[fixture]
fn reminder_state() -> ReminderState {
    ReminderState::default()
}

fn io_error(context: &str, error: &impl std::fmt::Display) -> ReminderError {
    ReminderError::Io {
        message: format!("{context}: {error}"),
    }
}

/// Ensures the runtime, mock server, and template exist in `ReminderState`.
fn ensure_environment(state: &ReminderState) -> Result<SharedRuntime, ReminderError> {
    if state.runtime.with_ref(|_| ()).is_none() {
        let runtime =
            Runtime::new().map_err(|error| io_error("failed to create Tokio runtime", &error))?;
        state.runtime.set(SharedRuntime::new(runtime));
    }
    let runtime = state.runtime.get().ok_or_else(|| ReminderError::Api {
        message: "runtime not initialised".to_owned(),
    })?;

    if state.server.with_ref(|_| ()).is_none() {
        state.server.set(runtime.block_on(MockServer::start()));
    }

    if state.template.with_ref(|_| ()).is_none() {
        let dir = TempDir::new().map_err(|error| io_error("failed to create temp dir", &error))?;
        let path = Utf8PathBuf::from_path_buf(dir.path().join("TEMPLATE.md"))
            .map_err(|_| io_error("temp path", &"not UTF-8"))?;
        std::fs::write(&path, "{{ username }}\n{{ pr_list }}")
            .map_err(|error| io_error("failed to write template", &error))?;
        state
            .template
            .set(Rc::new(TemplateFile { _dir: dir, path }));
    }

    Ok(runtime)
}

fn mount(state: &ReminderState, runtime: &SharedRuntime, mock: Mock) -> Result<(), ReminderError> {
    state
        .server
        .with_ref(|server| runtime.block_on(mock.mount(server)))
        .ok_or_else(|| ReminderError::Api {
            message: "mock server not initialised".to_owned(),
        })
}

fn page(route: String, page_number: u32, body: Value) -> Mock {
    Mock::given(method("GET"))
        .and(path(route))
        .and(query_param("page", page_number.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
}

fn graphql(marker: &str, data: Value) -> Mock {
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains(marker))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": data })))
}

fn assigned(login: &str, hours: u32) -> Value {
    json!({
        "event": "assigned",
        "assignee": { "login": login },
        "created_at": (Utc::now() - TimeDelta::hours(i64::from(hours))).to_rfc3339(),
    })
}

#[given(
    "two open pull requests where alice waited {alice_first:u32} and {alice_second:u32} hours \
     and bob waited {bob_first:u32} and {bob_second:u32} hours"
)]
fn seed_pull_requests(
    reminder_state: &ReminderState,
    alice_first: u32,
    alice_second: u32,
    bob_first: u32,
    bob_second: u32,
) -> Result<(), ReminderError> {
    let runtime = ensure_environment(reminder_state)?;

    let pulls = json!([
        {
            "number": 1,
            "html_url": "https://github.com/org/repo/pull/1",
            "title": "First",
            "user": { "login": "carol" },
            "assignees": [{ "login": "alice" }, { "login": "bob" }, { "login": "carol" }]
        },
        {
            "number": 2,
            "html_url": "https://github.com/org/repo/pull/2",
            "title": "Second",
            "user": { "login": "dave" },
            "assignees": [{ "login": "alice" }, { "login": "dave" }, { "login": "bob" }]
        }
    ]);
    mount(
        reminder_state,
        &runtime,
        page("/repos/org/repo/pulls".to_owned(), 1, pulls),
    )?;
    mount(
        reminder_state,
        &runtime,
        page("/repos/org/repo/pulls".to_owned(), 2, json!([])),
    )?;

    for (number, alice, bob) in [(1, alice_first, bob_first), (2, alice_second, bob_second)] {
        let route = format!("/repos/org/repo/issues/{number}/timeline");
        let events = json!([
            { "event": "labeled", "created_at": Utc::now().to_rfc3339() },
            assigned("alice", alice),
            assigned("bob", bob),
        ]);
        mount(reminder_state, &runtime, page(route.clone(), 1, events))?;
        mount(reminder_state, &runtime, page(route, 2, json!([])))?;
    }
    Ok(())
}

#[given("the reminder discussion exists")]
fn seed_discussion(reminder_state: &ReminderState) -> Result<(), ReminderError> {
    let runtime = ensure_environment(reminder_state)?;

    let mocks = [
        graphql(
            "discussionCategories",
            json!({ "repository": { "discussionCategories": {
                "nodes": [{ "id": "CAT_1", "name": CATEGORY }]
            } } }),
        ),
        graphql(
            "discussions(categoryId",
            json!({ "repository": { "discussions": {
                "nodes": [{ "id": "D_1", "title": TITLE, "number": 7 }],
                "pageInfo": { "hasNextPage": false, "endCursor": null }
            } } }),
        ),
        graphql(
            "viewerDidAuthor",
            json!({ "repository": { "discussion": { "comments": {
                "nodes": [],
                "pageInfo": { "hasNextPage": false, "endCursor": null }
            } } } }),
        ),
        graphql(
            "addDiscussionComment",
            json!({ "addDiscussionComment": { "comment": { "id": "C_new" } } }),
        ),
    ];
    for mock in mocks {
        mount(reminder_state, &runtime, mock)?;
    }
    Ok(())
}

#[given("the repository has no discussion categories")]
fn seed_no_categories(reminder_state: &ReminderState) -> Result<(), ReminderError> {
    let runtime = ensure_environment(reminder_state)?;
    mount(
        reminder_state,
        &runtime,
        graphql(
            "discussionCategories",
            json!({ "repository": { "discussionCategories": { "nodes": [] } } }),
        ),
    )
}

#[when("the reminder pass runs with a threshold of {hours:u32} hours")]
fn run_pass(reminder_state: &ReminderState, hours: u32) -> Result<(), ReminderError> {
    let runtime = ensure_environment(reminder_state)?;
    let server_url = reminder_state
        .server
        .with_ref(MockServer::uri)
        .ok_or_else(|| ReminderError::InvalidUrl("mock server URL missing".to_owned()))?;
    let template_path = reminder_state
        .template
        .with_ref(|template| template.path.clone())
        .ok_or_else(|| io_error("template", &"not initialised"))?;

    let settings = ReminderSettings {
        token: PersonalAccessToken::new("valid-token")?,
        locator: RepositoryLocator::from_slug("org/repo")?.with_api_base(&server_url)?,
        category: CATEGORY.to_owned(),
        title: TITLE.to_owned(),
        max_wait_hours: hours,
        template_path,
        dry_run: false,
    };

    match runtime.block_on(run(&settings)) {
        Ok(summary) => {
            drop(reminder_state.error.take());
            reminder_state.summary.set(summary);
        }
        Err(error) => {
            drop(reminder_state.summary.take());
            reminder_state.error.set(error);
        }
    }
    Ok(())
}

/// Bodies of every `addDiscussionComment` mutation the server received.
fn posted_bodies(reminder_state: &ReminderState) -> Result<Vec<String>, ReminderError> {
    let runtime = ensure_environment(reminder_state)?;
    let requests = reminder_state
        .server
        .with_ref(|server| runtime.block_on(server.received_requests()))
        .flatten()
        .ok_or_else(|| ReminderError::Api {
            message: "request recording disabled".to_owned(),
        })?;

    Ok(requests
        .iter()
        .filter_map(|request| serde_json::from_slice::<Value>(&request.body).ok())
        .filter(|payload| {
            payload["query"]
                .as_str()
                .is_some_and(|query| query.contains("addDiscussionComment"))
        })
        .filter_map(|payload| payload["variables"]["body"].as_str().map(str::to_owned))
        .collect())
}

#[then("{count:u64} reminders are posted")]
fn assert_post_count(reminder_state: &ReminderState, count: u64) -> Result<(), ReminderError> {
    let bodies = posted_bodies(reminder_state)?;
    if bodies.len() as u64 == count {
        Ok(())
    } else {
        Err(ReminderError::Api {
            message: format!("expected {count} reminders, got {bodies:?}"),
        })
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[then("the reminder for {reviewer} lists pull requests {numbers}")]
fn assert_reminder_lists(
    reminder_state: &ReminderState,
    reviewer: String,
    numbers: String,
) -> Result<(), ReminderError> {
    let greeting = format!("@{reviewer}\n");
    let bodies = posted_bodies(reminder_state)?;
    let body = bodies
        .iter()
        .find(|body| body.starts_with(&greeting))
        .ok_or_else(|| ReminderError::Api {
            message: format!("no reminder for {reviewer} in {bodies:?}"),
        })?;

    let expected: Vec<String> = numbers
        .split(',')
        .map(|number| format!("- [#{}](", number.trim()))
        .collect();
    let listed = body
        .lines()
        .filter(|line| line.starts_with("- [#"))
        .count();
    let all_present = expected.iter().all(|entry| body.contains(entry.as_str()));

    if all_present && listed == expected.len() {
        Ok(())
    } else {
        Err(ReminderError::Api {
            message: format!("reminder for {reviewer} should list {numbers}: {body}"),
        })
    }
}

#[then("the run fails because the discussion category is missing")]
fn assert_missing_category(reminder_state: &ReminderState) -> Result<(), ReminderError> {
    let error = reminder_state
        .error
        .with_ref(Clone::clone)
        .ok_or_else(|| ReminderError::Api {
            message: "expected the run to fail".to_owned(),
        })?;

    if error
        == (ReminderError::DiscussionCategoryNotFound {
            category: CATEGORY.to_owned(),
        })
    {
        Ok(())
    } else {
        Err(ReminderError::Api {
            message: format!("expected DiscussionCategoryNotFound, got {error:?}"),
        })
    }
}

#[scenario(path = "tests/features/pending_review_reminder.feature", index = 0)]
fn overdue_reviewers_are_reminded(reminder_state: ReminderState) {
    let _ = reminder_state;
}

#[scenario(path = "tests/features/pending_review_reminder.feature", index = 1)]
fn missing_category_stops_the_run(reminder_state: ReminderState) {
    let _ = reminder_state;
}
