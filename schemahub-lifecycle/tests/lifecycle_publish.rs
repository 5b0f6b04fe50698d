//! Lifecycle Publish Tests
//!
//! Covers publication and the derived catalog snapshot:
//! - exactly one PUBLISHED version at a time, always the highest
//! - every lower version ends DEPRECATED
//! - the available-versions map mirrors the rows after every operation

use anyhow::Result;
use schemahub_lifecycle::VersionState;

mod common;

/// Test 1: Publishing the first version flips it to PUBLISHED
///
/// **What:** Creates a schema and publishes it.
/// **Why:** The single DRAFT row is the highest version and becomes the
/// published definition; the snapshot follows.
#[tokio::test]
async fn publish_first_version() -> Result<()> {
    let (engine, _registry) = common::setup_engine();

    engine
        .create(
            "orders.order-created",
            common::base_content(),
            common::order_attributes(),
            "alice",
        )
        .await?;
    engine.publish("orders.order-created", "alice").await?;

    let projection = engine.get("orders.order-created", None).await?;
    assert_eq!(projection.version, 1);
    assert_eq!(projection.state, VersionState::Published);
    assert_eq!(
        projection.available_versions.get("1"),
        Some(&VersionState::Published)
    );

    Ok(())
}

/// Test 2: Publishing a newer version deprecates the old one
///
/// **What:** Publishes version 1, drafts version 2, publishes again.
/// **Why:** Publication promotes the highest row and demotes every other
/// row; the previously published version must end DEPRECATED.
#[tokio::test]
async fn publish_newer_version_deprecates_previous() -> Result<()> {
    let (engine, _registry) = common::setup_engine();

    engine
        .create(
            "orders.order-created",
            common::base_content(),
            common::order_attributes(),
            "alice",
        )
        .await?;
    engine.publish("orders.order-created", "alice").await?;
    engine
        .update(
            "orders.order-created",
            common::order_attributes(),
            common::semantic_content(),
            "bob",
        )
        .await?;
    engine.publish("orders.order-created", "bob").await?;

    let latest = engine.get("orders.order-created", None).await?;
    assert_eq!(latest.version, 2);
    assert_eq!(latest.state, VersionState::Published);

    let previous = engine.get("orders.order-created", Some(1)).await?;
    assert_eq!(previous.state, VersionState::Deprecated);

    assert_eq!(
        latest.available_versions.get("1"),
        Some(&VersionState::Deprecated)
    );
    assert_eq!(
        latest.available_versions.get("2"),
        Some(&VersionState::Published)
    );

    Ok(())
}

/// Test 3: Exactly one PUBLISHED version across a longer history
///
/// **What:** Chains three publish/update rounds and checks every row.
/// **Why:** However long the history grows, one row is PUBLISHED (the
/// highest) and all the rest are DEPRECATED.
#[tokio::test]
async fn single_published_version_invariant() -> Result<()> {
    let (engine, _registry) = common::setup_engine();

    engine
        .create(
            "orders.order-created",
            common::base_content(),
            common::order_attributes(),
            "alice",
        )
        .await?;
    engine.publish("orders.order-created", "alice").await?;
    engine
        .update(
            "orders.order-created",
            common::order_attributes(),
            common::semantic_content(),
            "alice",
        )
        .await?;
    engine.publish("orders.order-created", "alice").await?;
    engine
        .update(
            "orders.order-created",
            common::order_attributes(),
            common::semantic_content_v3(),
            "alice",
        )
        .await?;
    engine.publish("orders.order-created", "alice").await?;

    let states: Vec<VersionState> = {
        let mut states = Vec::new();
        for version in engine.list_versions("orders.order-created").await? {
            states.push(
                engine
                    .get("orders.order-created", Some(version))
                    .await?
                    .state,
            );
        }
        states
    };
    assert_eq!(
        states,
        vec![
            VersionState::Deprecated,
            VersionState::Deprecated,
            VersionState::Published
        ]
    );

    let snapshot = engine.get("orders.order-created", None).await?;
    assert_eq!(snapshot.version_count, 3);
    assert_eq!(
        snapshot.available_versions.get("3"),
        Some(&VersionState::Published)
    );

    Ok(())
}

/// Test 4: The snapshot map mirrors the rows after every operation
///
/// **What:** Walks a create/publish/update sequence and compares the map to
/// the individually fetched row states at each step.
/// **Why:** The catalog's available-versions map is derived state; any
/// successful operation must leave it equal to the actual rows.
#[tokio::test]
async fn available_versions_mirror_rows() -> Result<()> {
    let (engine, _registry) = common::setup_engine();

    engine
        .create(
            "orders.order-created",
            common::base_content(),
            common::order_attributes(),
            "alice",
        )
        .await?;

    for step in 0..3 {
        match step {
            0 => engine.publish("orders.order-created", "alice").await?,
            1 => {
                engine
                    .update(
                        "orders.order-created",
                        common::order_attributes(),
                        common::semantic_content(),
                        "alice",
                    )
                    .await?;
            }
            _ => engine.publish("orders.order-created", "alice").await?,
        }

        let snapshot = engine.get("orders.order-created", None).await?;
        for version in engine.list_versions("orders.order-created").await? {
            let row = engine.get("orders.order-created", Some(version)).await?;
            assert_eq!(
                snapshot.available_versions.get(&version.to_string()),
                Some(&row.state),
                "snapshot diverged at step {} version {}",
                step,
                version
            );
        }
        assert_eq!(
            snapshot.version_count as usize,
            snapshot.available_versions.len()
        );
    }

    Ok(())
}

/// Test 5: Re-publishing an already published version is accepted
///
/// **What:** Publishes the same single version twice.
/// **Why:** Publish enforces no DRAFT precondition; repeating it rewrites
/// the same states and succeeds.
#[tokio::test]
async fn republish_is_permissive() -> Result<()> {
    let (engine, _registry) = common::setup_engine();

    engine
        .create(
            "orders.order-created",
            common::base_content(),
            common::order_attributes(),
            "alice",
        )
        .await?;
    engine.publish("orders.order-created", "alice").await?;
    engine.publish("orders.order-created", "bob").await?;

    let projection = engine.get("orders.order-created", None).await?;
    assert_eq!(projection.state, VersionState::Published);
    assert_eq!(projection.version_count, 1);

    Ok(())
}

/// Test 6: Publishing an unknown schema is not found
///
/// **What:** Publishes a name with no version rows.
/// **Why:** There is nothing to promote; the caller gets a not-found.
#[tokio::test]
async fn publish_unknown_schema_is_not_found() -> Result<()> {
    let (engine, _registry) = common::setup_engine();

    let result = engine.publish("orders.ghost", "alice").await;
    assert!(matches!(
        result,
        Err(schemahub_lifecycle::LifecycleError::NotFound(_))
    ));

    Ok(())
}
