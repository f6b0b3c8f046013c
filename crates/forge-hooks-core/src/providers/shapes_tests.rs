use super::*;
use serde_json::json;

fn fits<T: serde::de::DeserializeOwned>(body: Value) -> bool {
    T::deserialize(body).is_ok()
}

mod git_push_tests {
    use super::*;

    #[test]
    fn test_partial_push_fits() {
        assert!(fits::<GitPush>(json!({})));
        assert!(fits::<GitPush>(json!({"ref": "refs/heads/main", "zen": 1})));
        assert!(fits::<GitPush>(json!({"ref": null, "commits": null})));
    }

    #[test]
    fn test_wrong_field_types_do_not_fit() {
        assert!(!fits::<GitPush>(json!({"ref": 12})));
        assert!(!fits::<GitPush>(json!({"commits": "nope"})));
        assert!(!fits::<GitPush>(json!({"commits": [1, 2]})));
        assert!(!fits::<GitPush>(json!({"repository": "octo/cat"})));
    }

    #[test]
    fn test_fields_bind() {
        let push = GitPush::deserialize(json!({
            "ref": "refs/heads/main",
            "after": "abc",
            "commits": [{"id": "abc"}]
        }))
        .unwrap();

        assert_eq!(push.git_ref.as_deref(), Some("refs/heads/main"));
        assert_eq!(push.after.as_deref(), Some("abc"));
        assert_eq!(push.commits.map(|c| c.len()), Some(1));
        assert!(push.before.is_none());
    }
}

mod gitlab_tests {
    use super::*;

    #[test]
    fn test_push_counts_must_be_numbers() {
        assert!(fits::<GitLabPush>(json!({"total_commits_count": 2, "checkout_sha": null})));
        assert!(!fits::<GitLabPush>(json!({"total_commits_count": "2"})));
        assert!(!fits::<GitLabPush>(json!({"project": []})));
    }

    #[test]
    fn test_job_ids_must_be_numbers() {
        assert!(fits::<GitLabJob>(json!({"object_kind": "build", "build_id": 1977})));
        assert!(!fits::<GitLabJob>(json!({"build_id": "1977"})));
    }
}

mod envelope_provider_tests {
    use super::*;

    #[test]
    fn test_azure_push_resource() {
        let push = AzureGitPush::deserialize(json!({
            "eventType": "git.push",
            "resource": {"pushId": 14, "refUpdates": []}
        }))
        .unwrap();

        assert_eq!(push.event_type.as_deref(), Some("git.push"));
        assert_eq!(push.resource.and_then(|r| r.push_id), Some(14));
        assert!(!fits::<AzureGitPush>(json!({"resource": {"pushId": "14"}})));
    }

    #[test]
    fn test_docker_push_data() {
        assert!(fits::<DockerPush>(json!({"push_data": {"tag": "latest", "pushed_at": 1417566161}})));
        assert!(!fits::<DockerPush>(json!({"push_data": {"tag": 7}})));
    }

    #[test]
    fn test_bitbucket_changes_must_be_a_list() {
        assert!(fits::<BitbucketPush>(json!({"push": {"changes": []}})));
        assert!(!fits::<BitbucketPush>(json!({"push": {"changes": {}}})));
    }
}
