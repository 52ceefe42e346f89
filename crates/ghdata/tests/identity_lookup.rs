mod common;

use ghdata::models::{RepositoryId, UserId};

use common::{DHH_ID, QUIET_ID, RAILS_ID, catalog, rails};

#[test]
fn resolves_owner_and_name_to_project_id() {
    let catalog = catalog();
    assert_eq!(
        catalog.repository_id("rails", "rails").expect("lookup should run"),
        RepositoryId::new(RAILS_ID)
    );
    assert_eq!(
        catalog.repository_id("quietowner", "quiet").expect("lookup should run"),
        RepositoryId::new(QUIET_ID)
    );
}

#[test]
fn forks_with_the_same_name_resolve_by_owner() {
    let catalog = catalog();
    assert_eq!(
        catalog.repository_id("outsider", "rails").expect("lookup should run"),
        RepositoryId::new(78853)
    );
    assert_eq!(
        catalog.repository_id("tenderlove", "rails").expect("lookup should run"),
        RepositoryId::new(78854)
    );
}

#[test]
fn unknown_pairs_resolve_to_none() {
    let catalog = catalog();
    for (owner, name) in [
        ("rails", "nonexistent"),
        ("nobody", "rails"),
        ("", ""),
        ("dhh", "quiet"),
    ] {
        assert_eq!(
            catalog.repository_id(owner, name).expect("lookup should run"),
            None,
            "{owner}/{name}"
        );
    }
}

#[test]
fn lookups_bind_values_instead_of_interpolating_them() {
    let catalog = catalog();
    assert_eq!(
        catalog
            .repository_id("rails' OR '1'='1", "rails")
            .expect("lookup should run"),
        None
    );
    assert_eq!(
        catalog.user_id("x' OR 1=1 --").expect("lookup should run"),
        None
    );
}

#[test]
fn resolves_logins_to_user_ids() {
    let catalog = catalog();
    assert_eq!(
        catalog.user_id("dhh").expect("lookup should run"),
        UserId::new(DHH_ID)
    );
    assert_eq!(catalog.user_id("ghost").expect("lookup should run"), None);
}

#[test]
fn repository_url_joins_owner_login_and_name() {
    let catalog = catalog();
    assert_eq!(
        catalog.repository_url(rails()).expect("lookup should run").as_deref(),
        Some("github.com/rails/rails")
    );

    let missing = RepositoryId::new(1).expect("positive id");
    assert_eq!(catalog.repository_url(missing).expect("lookup should run"), None);
}
