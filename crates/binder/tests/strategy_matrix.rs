use std::sync::Arc;

use json_bind::{
    from_value, model, to_value, CaseForm, CoerceDelegate, CoerceStrategy, KeyStrategy, Node,
    Path, Strategies,
};
use serde_json::json;

model! {
    #[derive(Debug, Clone, PartialEq, Default)]
    struct Profile {
        user_name: String,
        signup_count: i64,
    }
}

#[test]
fn camel_key_strategy_reads_camel_sources() {
    let strategies = Strategies::new().with_key(KeyStrategy::Camel(CaseForm::Standard));
    let profile: Profile = from_value(
        &json!({"userName": "ada", "signupCount": 3}),
        &strategies,
    )
    .unwrap();
    assert_eq!(profile.user_name, "ada");
    assert_eq!(profile.signup_count, 3);
}

#[test]
fn camel_key_strategy_writes_camel_keys() {
    let strategies = Strategies::new().with_key(KeyStrategy::Camel(CaseForm::Standard));
    let profile = Profile {
        user_name: "ada".to_owned(),
        signup_count: 3,
    };
    let value = to_value(&profile, &strategies).unwrap();
    assert_eq!(value, json!({"userName": "ada", "signupCount": 3}));
}

#[test]
fn snake_upper_key_strategy() {
    let strategies = Strategies::new().with_key(KeyStrategy::Snake(CaseForm::Upper));
    let profile: Profile = from_value(
        &json!({"USER_NAME": "ada", "SIGNUP_COUNT": 2}),
        &strategies,
    )
    .unwrap();
    assert_eq!(profile.user_name, "ada");
    assert_eq!(profile.signup_count, 2);
}

#[test]
fn unmatched_key_strategy_substitutes_defaults() {
    // declared names miss the pascal-cased source entirely
    let strategies = Strategies::new();
    let profile: Profile = from_value(
        &json!({"UserName": "ada", "SignupCount": 3}),
        &strategies,
    )
    .unwrap();
    assert_eq!(profile, Profile::default());
}

#[test]
fn custom_key_strategy_sees_the_path() {
    let strategies = Strategies::new().with_key(KeyStrategy::Custom(Arc::new(
        |path: &Path, declared: &str| {
            // prefix nested fields by depth
            format!("{}{}", "_".repeat(path.len().saturating_sub(1)), declared)
        },
    )));
    let profile: Profile = from_value(
        &json!({"user_name": "ada", "signup_count": 5}),
        &strategies,
    )
    .unwrap();
    assert_eq!(profile.user_name, "ada");
    assert_eq!(profile.signup_count, 5);
}

struct Redact;

impl CoerceDelegate for Redact {
    fn coerce_text(&self, path: &Path, node: &Node) -> Option<String> {
        if path.render().ends_with("[:]user_name") {
            return Some("***".to_owned());
        }
        let _ = node;
        None
    }
}

#[test]
fn delegate_supersedes_only_claimed_sites() {
    let strategies =
        Strategies::new().with_coerce(CoerceStrategy::UseDelegate(Arc::new(Redact)));
    let profile: Profile = from_value(
        &json!({"user_name": "ada", "signup_count": 4}),
        &strategies,
    )
    .unwrap();
    assert_eq!(profile.user_name, "***");
    assert_eq!(profile.signup_count, 4);
}

struct NullAsValue;

impl CoerceDelegate for NullAsValue {
    fn null_is_value(&self, _path: &Path) -> bool {
        true
    }
}

model! {
    #[derive(Debug, PartialEq)]
    struct Sparse {
        note: Option<String>,
        count: Option<i64>,
    }
}

#[test]
fn null_remap_makes_optionals_present_with_defaults() {
    let source = json!({"note": null, "count": null});
    let plain: Sparse = from_value(&source, &Strategies::new()).unwrap();
    assert_eq!(plain, Sparse { note: None, count: None });

    let strategies =
        Strategies::new().with_coerce(CoerceStrategy::UseDelegate(Arc::new(NullAsValue)));
    let remapped: Sparse = from_value(&source, &strategies).unwrap();
    assert_eq!(
        remapped,
        Sparse {
            note: Some("null".to_owned()),
            count: Some(0)
        }
    );
    // absence is still absence under the remap
    let absent: Sparse = from_value(&json!({}), &strategies).unwrap();
    assert_eq!(absent, Sparse { note: None, count: None });
}

#[test]
fn start_path_reroots_before_decoding() {
    let source = json!({
        "status": "ok",
        "data": {
            "profiles": [
                {"user_name": "ada", "signup_count": 1},
                {"user_name": "grace", "signup_count": 2}
            ]
        }
    });
    let strategies = Strategies::new().with_start_path("/data/profiles/1");
    let profile: Profile = from_value(&source, &strategies).unwrap();
    assert_eq!(profile.user_name, "grace");

    let strategies = Strategies::new().with_start_path("/data/profiles");
    let profiles: Vec<Profile> = from_value(&source, &strategies).unwrap();
    assert_eq!(profiles.len(), 2);

    // unresolved start path behaves like an absent payload
    let strategies = Strategies::new().with_start_path("/data/missing");
    let profile: Profile = from_value(&source, &strategies).unwrap();
    assert_eq!(profile, Profile::default());
}

#[test]
fn roundtrip_with_declared_keys_and_default_strategies() {
    let profile = Profile {
        user_name: "ada".to_owned(),
        signup_count: 42,
    };
    let strategies = Strategies::new();
    let back: Profile =
        from_value(&to_value(&profile, &strategies).unwrap(), &strategies).unwrap();
    assert_eq!(back, profile);
}
