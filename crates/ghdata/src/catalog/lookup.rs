use super::GhData;
use crate::error::Result;
use crate::models::{RepositoryId, ResultTable, UserId};
use crate::sqlite::DataStore;

const REPOSITORY_ID_SQL: &str = "SELECT projects.id AS \"id\" FROM projects \
     INNER JOIN users ON projects.owner_id = users.id \
     WHERE projects.name = :repo AND users.login = :owner \
     ORDER BY projects.id LIMIT 1";

const USER_ID_SQL: &str = "SELECT users.id AS \"id\" FROM users \
     WHERE users.login = :login \
     ORDER BY users.id LIMIT 1";

const REPOSITORY_PATH_SQL: &str = "SELECT users.login AS \"owner\", projects.name AS \"name\" \
     FROM projects \
     INNER JOIN users ON projects.owner_id = users.id \
     WHERE projects.id = :repoid";

impl<S: DataStore> GhData<S> {
    /// Id of `github.com/<owner>/<name>`, or `None` when no such project is
    /// recorded.
    pub fn repository_id(&self, owner: &str, name: &str) -> Result<Option<RepositoryId>> {
        let table = self.fetch(
            "repository_id",
            REPOSITORY_ID_SQL,
            &[("owner", owner.into()), ("repo", name.into())],
        )?;
        Ok(first_id(&table).and_then(RepositoryId::new))
    }

    /// Id of the user with `login`, or `None`.
    pub fn user_id(&self, login: &str) -> Result<Option<UserId>> {
        let table = self.fetch("user_id", USER_ID_SQL, &[("login", login.into())])?;
        Ok(first_id(&table).and_then(UserId::new))
    }

    /// `github.com/<owner>/<name>` for a project id.
    pub fn repository_url(&self, repo: RepositoryId) -> Result<Option<String>> {
        let table = self.fetch_for_repo("repository_url", REPOSITORY_PATH_SQL, repo)?;
        let owner = table.cell(0, "owner").and_then(|cell| cell.as_str());
        let name = table.cell(0, "name").and_then(|cell| cell.as_str());
        Ok(owner
            .zip(name)
            .map(|(owner, name)| format!("github.com/{owner}/{name}")))
    }
}

fn first_id(table: &ResultTable) -> Option<i64> {
    table.cell(0, "id").and_then(|cell| cell.as_i64())
}
