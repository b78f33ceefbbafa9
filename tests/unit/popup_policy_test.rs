use rstest::rstest;

use tabshell::managers::popup_policy::{decide, has_host, resolve};
use tabshell::types::options::PopupOverride;
use tabshell::types::popup::{Disposition, PopupDecision, PopupRequest};

#[rstest]
#[case("https://example.com/page", true)]
#[case("http://localhost:8080/", true)]
#[case("about:blank", false)]
#[case("data:text/html,hi", false)]
#[case("javascript:void(0)", false)]
#[case("not a url", false)]
#[case("", false)]
fn test_has_host(#[case] url: &str, #[case] expected: bool) {
    assert_eq!(has_host(url), expected);
}

#[rstest]
#[case(Disposition::NewWindow, PopupDecision::SeparateWindow)]
#[case(Disposition::ForegroundTab, PopupDecision::OpenTab { placeholder: true })]
#[case(Disposition::BackgroundTab, PopupDecision::OpenTab { placeholder: false })]
#[case(Disposition::Default, PopupDecision::OpenTab { placeholder: false })]
fn test_decide_by_disposition(#[case] disposition: Disposition, #[case] expected: PopupDecision) {
    let request = PopupRequest::new("https://example.com/", disposition);
    assert_eq!(decide(&request), expected);
}

#[rstest]
#[case(Disposition::NewWindow)]
#[case(Disposition::ForegroundTab)]
#[case(Disposition::BackgroundTab)]
#[case(Disposition::Default)]
fn test_hostless_targets_go_to_platform(#[case] disposition: Disposition) {
    let request = PopupRequest::new("about:blank", disposition);
    assert_eq!(decide(&request), PopupDecision::PlatformDefault);
}

#[test]
fn test_override_replaces_builtin_policy() {
    let custom = PopupOverride::new(|_| PopupDecision::SeparateWindow);
    let request = PopupRequest::new("https://example.com/", Disposition::ForegroundTab);
    assert_eq!(resolve(&request, Some(&custom)), PopupDecision::SeparateWindow);
    assert_eq!(
        resolve(&request, None),
        PopupDecision::OpenTab { placeholder: true }
    );
}
