//! Property-based tests using proptest

use proptest::prelude::*;
use service_poller::registry::ServiceRegistry;
use service_poller::types::ServiceStatus;

proptest! {
    /// http(s)://[www.] に許可文字だけが続くURLは常に有効
    #[test]
    fn allowed_characters_are_always_valid(
        secure in any::<bool>(),
        www in any::<bool>(),
        rest in "[a-zA-Z0-9./-]{0,64}",
    ) {
        let url = format!(
            "http{}://{}{}",
            if secure { "s" } else { "" },
            if www { "www." } else { "" },
            rest
        );
        prop_assert!(ServiceRegistry::is_valid_url(&url), "{} should be valid", url);
    }

    /// 許可されない文字を1つでも含むと無効
    #[test]
    fn disallowed_character_is_invalid(
        head in "[a-z0-9.]{0,16}",
        bad in "[:?#@ _!%&=+]",
        tail in "[a-z0-9./]{0,16}",
    ) {
        let url = format!("http://{}{}{}", head, bad, tail);
        prop_assert!(!ServiceRegistry::is_valid_url(&url), "{:?} should be invalid", url);
    }

    /// http/https以外のスキームは無効
    #[test]
    fn non_http_scheme_is_invalid(
        scheme in "[a-z]{1,8}".prop_filter("not http(s)", |s| s != "http" && s != "https"),
        rest in "[a-z0-9./]{0,32}",
    ) {
        let url = format!("{}://{}", scheme, rest);
        prop_assert!(!ServiceRegistry::is_valid_url(&url));
    }

    /// ステータス文字列は往復で一致する
    #[test]
    fn status_string_roundtrip(index in 0usize..3) {
        let status = [ServiceStatus::Unknown, ServiceStatus::Ok, ServiceStatus::Failed][index];
        let parsed: ServiceStatus = status.as_str().parse().unwrap();
        prop_assert_eq!(parsed, status);
    }
}
