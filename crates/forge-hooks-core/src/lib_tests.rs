use super::*;

mod event_tests {
    use super::*;

    #[test]
    fn test_static_and_owned_events_compare_by_value() {
        const PUSH: Event = Event::from_static("push");

        assert_eq!(PUSH, Event::new("push"));
        assert_eq!(PUSH, Event::from("push".to_string()));
        assert_ne!(PUSH, Event::new("Push"));
    }

    #[test]
    fn test_event_equality_does_not_trim() {
        assert_ne!(Event::new("push"), Event::new("push "));
    }

    #[test]
    fn test_event_serializes_as_plain_string() {
        let json = serde_json::to_string(&Event::new("repo:push")).unwrap();
        assert_eq!(json, "\"repo:push\"");

        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(back.as_str(), "repo:push");
    }

    #[test]
    fn test_event_display_is_raw_identifier() {
        assert_eq!(Event::new("Merge Request Hook").to_string(), "Merge Request Hook");
    }
}

mod provider_kind_tests {
    use super::*;

    #[test]
    fn test_every_provider_parses_from_its_name() {
        for kind in ProviderKind::ALL {
            assert_eq!(kind.as_str().parse::<ProviderKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_provider_name_parsing_ignores_case() {
        assert_eq!("GitHub".parse::<ProviderKind>().unwrap(), ProviderKind::GitHub);
        assert_eq!(
            "Azure-DevOps".parse::<ProviderKind>().unwrap(),
            ProviderKind::AzureDevOps
        );
    }

    #[test]
    fn test_unknown_provider_name_is_rejected() {
        let err = "sourcehut".parse::<ProviderKind>().unwrap_err();
        assert_eq!(err.name, "sourcehut");
        assert!(err.to_string().contains("sourcehut"));
    }

    #[test]
    fn test_provider_serde_uses_config_names() {
        let json = serde_json::to_string(&ProviderKind::BitbucketServer).unwrap();
        assert_eq!(json, "\"bitbucket-server\"");

        let kind: ProviderKind = serde_json::from_str("\"docker-hub\"").unwrap();
        assert_eq!(kind, ProviderKind::DockerHub);
    }
}
