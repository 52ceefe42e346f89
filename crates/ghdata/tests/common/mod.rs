#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use ghdata::GhData;
use ghdata::models::{RepositoryId, UserId};
use ghdata::sqlite::SqliteStore;
use rusqlite::Connection;

pub const RAILS_ID: i64 = 78852;
pub const QUIET_ID: i64 = 78860;
pub const DHH_ID: i64 = 2;
pub const TENDERLOVE_ID: i64 = 3;
pub const OUTSIDER_ID: i64 = 4;

/// A small GHTorrent-shaped dataset: `rails/rails` with two forks, members
/// `rails` and `dhh`, outside contributors `tenderlove` and `outsider`, and a
/// second project `quietowner/quiet` with member-only activity.
pub const FIXTURE_SQL: &str = r#"
CREATE TABLE users (
    id INTEGER PRIMARY KEY,
    login TEXT NOT NULL,
    location TEXT,
    created_at TEXT NOT NULL
);
CREATE TABLE projects (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    owner_id INTEGER NOT NULL,
    forked_from INTEGER,
    created_at TEXT NOT NULL
);
CREATE TABLE commits (
    id INTEGER PRIMARY KEY,
    sha TEXT NOT NULL,
    author_id INTEGER,
    committer_id INTEGER,
    project_id INTEGER,
    created_at TEXT NOT NULL
);
CREATE TABLE project_commits (project_id INTEGER NOT NULL, commit_id INTEGER NOT NULL);
CREATE TABLE watchers (repo_id INTEGER NOT NULL, user_id INTEGER NOT NULL, created_at TEXT NOT NULL);
CREATE TABLE project_members (repo_id INTEGER NOT NULL, user_id INTEGER NOT NULL, created_at TEXT);
CREATE TABLE issues (
    id INTEGER PRIMARY KEY,
    repo_id INTEGER,
    reporter_id INTEGER,
    issue_id TEXT,
    created_at TEXT NOT NULL
);
CREATE TABLE issue_events (
    event_id INTEGER PRIMARY KEY,
    issue_id INTEGER NOT NULL,
    actor_id INTEGER,
    action TEXT NOT NULL,
    created_at TEXT NOT NULL
);
CREATE TABLE issue_comments (
    comment_id INTEGER PRIMARY KEY,
    issue_id INTEGER NOT NULL,
    user_id INTEGER NOT NULL,
    created_at TEXT NOT NULL
);
CREATE TABLE pull_requests (
    id INTEGER PRIMARY KEY,
    head_repo_id INTEGER,
    base_repo_id INTEGER NOT NULL,
    pullreq_id INTEGER NOT NULL
);
CREATE TABLE pull_request_history (
    id INTEGER PRIMARY KEY,
    pull_request_id INTEGER NOT NULL,
    action TEXT NOT NULL,
    actor_id INTEGER,
    created_at TEXT NOT NULL
);
CREATE TABLE pull_request_comments (
    comment_id INTEGER PRIMARY KEY,
    pull_request_id INTEGER NOT NULL,
    user_id INTEGER NOT NULL,
    created_at TEXT NOT NULL
);
CREATE TABLE commit_comments (
    id INTEGER PRIMARY KEY,
    commit_id INTEGER NOT NULL,
    user_id INTEGER NOT NULL,
    created_at TEXT NOT NULL
);

INSERT INTO users (id, login, location, created_at) VALUES
    (1, 'rails', NULL, '2008-04-11 00:00:00'),
    (2, 'dhh', 'Chicago', '2008-02-20 00:00:00'),
    (3, 'tenderlove', 'Seattle', '2008-03-01 00:00:00'),
    (4, 'outsider', 'Berlin', '2012-06-01 00:00:00'),
    (5, 'quietowner', NULL, '2013-01-01 00:00:00');

INSERT INTO projects (id, name, owner_id, forked_from, created_at) VALUES
    (78852, 'rails', 1, NULL, '2009-05-20 00:00:00'),
    (78853, 'rails', 4, 78852, '2015-03-02 10:00:00'),
    (78854, 'rails', 3, 78852, '2015-03-04 10:00:00'),
    (78860, 'quiet', 5, NULL, '2014-12-01 00:00:00');

INSERT INTO commits (id, sha, author_id, committer_id, project_id, created_at) VALUES
    (1, 'c1', 2, 2, 78852, '2015-03-02 09:00:00'),
    (2, 'c2', 2, 2, 78852, '2015-03-04 12:00:00'),
    (3, 'c3', 3, 3, 78852, '2015-03-08 23:59:59'),
    (4, 'c4', 4, 4, 78852, '2015-03-09 08:00:00'),
    (5, 'c5', 5, 5, 78860, '2015-01-05 10:00:00');

INSERT INTO project_commits (project_id, commit_id) VALUES
    (78852, 1), (78852, 2), (78852, 3), (78852, 4), (78860, 5);

INSERT INTO watchers (repo_id, user_id, created_at) VALUES
    (78852, 2, '2015-03-02 08:00:00'),
    (78852, 3, '2015-03-03 08:00:00'),
    (78852, 4, '2016-01-10 08:00:00');

INSERT INTO project_members (repo_id, user_id, created_at) VALUES
    (78852, 1, '2009-05-20 00:00:00'),
    (78852, 2, '2009-05-20 00:00:00'),
    (78860, 5, '2014-12-01 00:00:00');

INSERT INTO issues (id, repo_id, reporter_id, issue_id, created_at) VALUES
    (100, 78852, 4, '19000', '2015-03-03 10:00:00'),
    (101, 78852, 2, '19001', '2015-03-04 09:00:00'),
    (102, 78860, 5, '1', '2015-01-06 10:00:00');

INSERT INTO issue_events (event_id, issue_id, actor_id, action, created_at) VALUES
    (500, 100, 2, 'closed', '2015-03-06 10:00:00'),
    (501, 101, 2, 'referenced', '2015-03-05 10:00:00');

INSERT INTO issue_comments (comment_id, issue_id, user_id, created_at) VALUES
    (1000, 100, 4, '2015-03-03 11:00:00'),
    (1001, 100, 2, '2015-03-04 10:00:00'),
    (1002, 101, 3, '2015-03-05 22:00:00'),
    (1003, 102, 5, '2015-01-07 10:00:00');

INSERT INTO pull_requests (id, head_repo_id, base_repo_id, pullreq_id) VALUES
    (200, 78853, 78852, 1), (201, 78854, 78852, 2), (202, 78853, 78852, 3),
    (203, 78852, 78852, 4), (204, 78853, 78852, 5), (205, 78854, 78852, 6);

INSERT INTO pull_request_history (id, pull_request_id, action, actor_id, created_at) VALUES
    (300, 200, 'opened', 4, '2015-03-10 09:00:00'),
    (301, 201, 'opened', 3, '2015-03-10 09:30:00'),
    (302, 202, 'opened', 4, '2015-03-10 10:00:00'),
    (303, 203, 'opened', 2, '2015-03-10 11:00:00'),
    (304, 204, 'opened', 4, '2015-03-12 09:00:00'),
    (305, 205, 'opened', 3, '2015-03-01 09:00:00'),
    (306, 200, 'merged', 2, '2015-03-10 15:00:00'),
    (307, 201, 'merged', 2, '2015-03-10 16:00:00'),
    (308, 205, 'merged', 3, '2015-03-13 09:00:00');

INSERT INTO pull_request_comments (comment_id, pull_request_id, user_id, created_at) VALUES
    (400, 200, 2, '2015-03-10 12:00:00'),
    (401, 200, 4, '2015-03-10 13:00:00'),
    (402, 201, 3, '2015-03-10 14:00:00');

INSERT INTO commit_comments (id, commit_id, user_id, created_at) VALUES
    (600, 1, 3, '2015-03-02 18:00:00'),
    (601, 4, 2, '2015-03-09 18:00:00');
"#;

pub fn seeded_connection() -> Connection {
    let connection = Connection::open_in_memory().expect("in-memory sqlite should open");
    connection
        .execute_batch(FIXTURE_SQL)
        .expect("fixture should load");
    connection
}

pub fn seeded_store() -> SqliteStore {
    SqliteStore::from_connection(seeded_connection()).expect("bucket functions should register")
}

pub fn catalog() -> GhData<SqliteStore> {
    GhData::new(seeded_store())
}

pub fn rails() -> RepositoryId {
    RepositoryId::new(RAILS_ID).expect("fixture id is positive")
}

pub fn quiet() -> RepositoryId {
    RepositoryId::new(QUIET_ID).expect("fixture id is positive")
}

pub fn user(id: i64) -> UserId {
    UserId::new(id).expect("fixture id is positive")
}

/// Write the fixture to an on-disk database for tests that run the binary.
pub fn write_fixture_database(path: &Path) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("fixture directory should be creatable");
    }
    let connection = Connection::open(path).expect("fixture database should open");
    connection
        .execute_batch(FIXTURE_SQL)
        .expect("fixture should load");
}

pub fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time should be after unix epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("{prefix}-{}-{nanos}", std::process::id()))
}
