//! End-to-end runs of the processor against a temp repository and a mock API.

mod common;

use common::harness::TEST_TOKEN;
use common::TestRepo;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use yamlsync::git::ChangedFile;
use yamlsync::record::RecordError;
use yamlsync::{ReservedKeyPolicy, SyncError};

const ABOUT_EN: &str = "data/jalgaon/yawal/atraval/en/about.yaml";
const ABOUT_MR: &str = "data/jalgaon/yawal/atraval/mr/about.yaml";
const SCHEMES: &str = "data/pune/haveli/wagholi/en/schemes.yml";

fn seeded_repo() -> TestRepo {
    let repo = TestRepo::new();
    repo.write("README.md", "# village data\n");
    repo.write(ABOUT_EN, "title: Old\n");
    repo.commit("initial");
    repo
}

fn bulk_put(resource: &str) -> wiremock::MockBuilder {
    Mock::given(method("PUT"))
        .and(path(format!("/api/v1/bulk/{}", resource)))
        .and(query_param("upsert", "true"))
        .and(header("authorization", format!("Bearer {}", TEST_TOKEN).as_str()))
        .and(header("content-type", "application/json"))
}

#[tokio::test]
async fn test_changed_files_are_upserted_per_resource() {
    let repo = seeded_repo();
    repo.write(ABOUT_EN, "title: Hello\n");
    repo.write(ABOUT_MR, "title: Namaskar\nid: ignored\n");
    repo.write(SCHEMES, "name: PMAY\nbeneficiaries: 42\n");
    repo.write("docs/notes.md", "not yaml\n");
    repo.commit("update villages");

    let server = MockServer::start().await;
    bulk_put("about")
        .and(body_json(json!([
            {
                "id": "jalgaon-yawal-en-atraval",
                "data": {
                    "title": "Hello",
                    "districtID": "jalgaon",
                    "talukaID": "yawal",
                    "villageID": "atraval",
                    "langID": "en",
                    "id": "jalgaon-yawal-en-atraval"
                }
            },
            {
                "id": "jalgaon-yawal-mr-atraval",
                "data": {
                    "title": "Namaskar",
                    "districtID": "jalgaon",
                    "talukaID": "yawal",
                    "villageID": "atraval",
                    "langID": "mr",
                    "id": "jalgaon-yawal-mr-atraval"
                }
            }
        ])))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    bulk_put("schemes")
        .and(body_json(json!([
            {
                "id": "pune-haveli-en-wagholi",
                "data": {
                    "name": "PMAY",
                    "beneficiaries": 42,
                    "districtID": "pune",
                    "talukaID": "haveli",
                    "villageID": "wagholi",
                    "langID": "en",
                    "id": "pune-haveli-en-wagholi"
                }
            }
        ])))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let report = repo
        .pipeline(&server.uri(), ReservedKeyPolicy::Overwrite)
        .run()
        .await
        .unwrap();

    assert_eq!(report.changed.len(), 3);
    assert_eq!(report.prepared.len(), 3);
    assert!(report.is_success(), "unexpected failures: {:?}", report);

    let resources: Vec<&str> = report.uploaded.iter().map(|r| r.resource.as_str()).collect();
    assert_eq!(resources, vec!["about", "schemes"]);
    assert_eq!(report.records_uploaded(), 3);
}

#[tokio::test]
async fn test_bad_files_are_skipped_and_reported() {
    let repo = seeded_repo();
    repo.write(ABOUT_EN, "title: Hello\n");
    repo.write("notdata/x/y/z/en/f.yaml", "k: v\n");
    repo.write("data/a/b/c/en/broken.yaml", "title: [unclosed\n");
    repo.commit("mixed changes");

    let server = MockServer::start().await;
    bulk_put("about")
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let report = repo
        .pipeline(&server.uri(), ReservedKeyPolicy::Overwrite)
        .run()
        .await
        .unwrap();

    assert_eq!(report.prepared, vec![ChangedFile::from(ABOUT_EN)]);
    assert_eq!(report.uploaded.len(), 1);
    assert_eq!(report.file_failures.len(), 2);
    assert!(report.has_failures());

    let failed: Vec<&str> = report.file_failures.iter().map(|f| f.file.as_str()).collect();
    assert!(failed.contains(&"notdata/x/y/z/en/f.yaml"));
    assert!(failed.contains(&"data/a/b/c/en/broken.yaml"));
}

#[tokio::test]
async fn test_failed_resource_does_not_block_others() {
    let repo = seeded_repo();
    repo.write(ABOUT_EN, "title: Hello\n");
    repo.write(SCHEMES, "name: PMAY\n");
    repo.commit("two resources");

    let server = MockServer::start().await;
    bulk_put("about")
        .respond_with(ResponseTemplate::new(500).set_body_string("database down"))
        .expect(2)
        .mount(&server)
        .await;
    bulk_put("schemes")
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let report = repo
        .pipeline(&server.uri(), ReservedKeyPolicy::Overwrite)
        .run()
        .await
        .unwrap();

    assert_eq!(report.uploaded.len(), 1);
    assert_eq!(report.uploaded[0].resource, "schemes");
    assert_eq!(report.upload_failures.len(), 1);

    let failure = &report.upload_failures[0];
    assert_eq!(failure.resource, "about");
    assert_eq!(failure.records, 1);
    let message = failure.error.to_string();
    assert!(message.contains("status 500"), "{}", message);
    assert!(message.contains("database down"), "{}", message);
}

#[tokio::test]
async fn test_no_yaml_changes_sends_nothing() {
    let repo = seeded_repo();
    repo.write("README.md", "# village data, revised\n");
    repo.commit("docs only");

    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let report = repo
        .pipeline(&server.uri(), ReservedKeyPolicy::Overwrite)
        .run()
        .await
        .unwrap();

    assert!(report.changed.is_empty());
    assert!(report.is_success());
}

#[tokio::test]
async fn test_deleted_file_is_a_read_failure() {
    let repo = seeded_repo();
    repo.remove(ABOUT_EN);
    repo.commit("remove village");

    let server = MockServer::start().await;
    let report = repo
        .pipeline(&server.uri(), ReservedKeyPolicy::Overwrite)
        .run()
        .await
        .unwrap();

    assert_eq!(report.changed, vec![ChangedFile::from(ABOUT_EN)]);
    assert_eq!(report.file_failures.len(), 1);
    assert!(matches!(
        report.file_failures[0].error,
        SyncError::ReadFile { .. }
    ));
    assert!(report.uploaded.is_empty());
}

#[tokio::test]
async fn test_reject_policy_skips_conflicting_file() {
    let repo = seeded_repo();
    repo.write(ABOUT_EN, "title: Hello\nlangID: mr\n");
    repo.commit("conflicting key");

    let server = MockServer::start().await;
    let report = repo
        .pipeline(&server.uri(), ReservedKeyPolicy::Reject)
        .run()
        .await
        .unwrap();

    assert_eq!(report.file_failures.len(), 1);
    match &report.file_failures[0].error {
        SyncError::Record(RecordError::ReservedKeyConflict { key, .. }) => {
            assert_eq!(key, "langID")
        }
        other => panic!("expected reserved key conflict, got {:?}", other),
    }
}

#[tokio::test]
async fn test_single_commit_history_is_fatal() {
    let repo = TestRepo::new();
    repo.write(ABOUT_EN, "title: Hello\n");
    repo.commit("only commit");

    let server = MockServer::start().await;
    let err = repo
        .pipeline(&server.uri(), ReservedKeyPolicy::Overwrite)
        .run()
        .await
        .unwrap_err();

    assert!(err.is_fatal());
    assert!(matches!(err, SyncError::Git(_)));
}
