use super::*;

#[test]
fn theme_values_match_cookie_contract() {
    assert_eq!(theme_value(true), "dark");
    assert_eq!(theme_value(false), "light");
}

#[test]
fn theme_value_round_trips() {
    assert!(is_dark(theme_value(true)));
    assert!(!is_dark(theme_value(false)));
}

#[test]
fn unknown_cookie_value_falls_back_to_light() {
    assert!(!is_dark("solarized"));
    assert!(!is_dark(""));
    assert!(!is_dark("Dark"));
}
