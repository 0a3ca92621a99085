use crate::{KeyCode, MacroError, TriggerBindings, TriggerKey, TriggerRole};

/// WHAT: Defaults are F6, F7, F8
/// WHY: Matches the documented out-of-the-box keys
#[test]
fn given_default_bindings_when_reading_then_f6_f7_f8() {
    let bindings = TriggerBindings::default();

    assert_eq!(bindings.key(TriggerRole::Start), TriggerKey::F6);
    assert_eq!(bindings.key(TriggerRole::Play), TriggerKey::F7);
    assert_eq!(bindings.key(TriggerRole::Stop), TriggerKey::F8);
}

/// WHAT: Constructing bindings with a repeated key fails
/// WHY: Two roles can never share a key
#[test]
fn given_repeated_key_when_constructing_then_duplicate_error() {
    let result = TriggerBindings::new(TriggerKey::F1, TriggerKey::F2, TriggerKey::F1);

    assert!(matches!(
        result,
        Err(MacroError::DuplicateTriggerKey {
            key: TriggerKey::F1,
            role: TriggerRole::Start,
            ..
        })
    ));
}

/// WHAT: Rebinding to a key held by another role fails and changes nothing
/// WHY: Keeps the three keys pairwise distinct
#[test]
fn given_key_of_other_role_when_rebinding_then_rejected() {
    // Given: Default bindings
    let mut bindings = TriggerBindings::default();

    // When: Binding Play to Stop's key
    let result = bindings.rebind(TriggerRole::Play, TriggerKey::F8);

    // Then: Rejected and unchanged
    assert!(matches!(
        result,
        Err(MacroError::DuplicateTriggerKey {
            role: TriggerRole::Stop,
            ..
        })
    ));
    assert_eq!(bindings, TriggerBindings::default());
}

/// WHAT: Rebinding to a free key or the same key succeeds
/// WHY: Users may pick any key nobody else holds
#[test]
#[allow(clippy::unwrap_used)]
fn given_free_key_when_rebinding_then_applied() {
    let mut bindings = TriggerBindings::default();

    bindings.rebind(TriggerRole::Start, TriggerKey::Tilde).unwrap();
    bindings.rebind(TriggerRole::Play, TriggerKey::F7).unwrap();

    assert_eq!(bindings.key(TriggerRole::Start), TriggerKey::Tilde);
    assert_eq!(bindings.role_for(TriggerKey::F6), None);
    assert_eq!(bindings.role_for(TriggerKey::Tilde), Some(TriggerRole::Start));
}

/// WHAT: Each selector offers every key except those bound elsewhere
/// WHY: Narrowing the choices prevents collisions before they happen
#[test]
fn given_bindings_when_listing_available_then_other_roles_excluded() {
    let bindings = TriggerBindings::default();

    let start = bindings.available_for(TriggerRole::Start);

    assert_eq!(start.len(), TriggerKey::ALL.len() - 2);
    assert!(start.contains(&TriggerKey::F6));
    assert!(!start.contains(&TriggerKey::F7));
    assert!(!start.contains(&TriggerKey::F8));
    for role in TriggerRole::ALL {
        for other in TriggerRole::ALL.into_iter().filter(|other| *other != role) {
            assert!(!bindings
                .available_for(role)
                .contains(&bindings.key(other)));
        }
    }
}

/// WHAT: Key labels parse back, case-insensitively, with tilde aliases
/// WHY: Config files and menu ids store labels
#[test]
#[allow(clippy::unwrap_used)]
fn given_labels_when_parsing_then_keys_resolved() {
    for key in TriggerKey::ALL {
        assert_eq!(key.label().parse::<TriggerKey>().unwrap(), key);
    }
    assert_eq!("f10".parse::<TriggerKey>().unwrap(), TriggerKey::F10);
    assert_eq!("`".parse::<TriggerKey>().unwrap(), TriggerKey::Tilde);
    assert_eq!("ctrl".parse::<TriggerKey>().unwrap(), TriggerKey::Ctrl);
    assert!(matches!(
        "F13".parse::<TriggerKey>(),
        Err(MacroError::UnknownTriggerKey { .. })
    ));
}

/// WHAT: Trigger key codes cover all three bound keys
/// WHY: The recorder filters these out of the macro
#[test]
fn given_bindings_when_collecting_key_codes_then_all_three() {
    let bindings = TriggerBindings::new(TriggerKey::Ctrl, TriggerKey::Tilde, TriggerKey::F12);

    let codes = match bindings {
        Ok(b) => b.key_codes(),
        Err(e) => unreachable!("distinct keys rejected: {}", e),
    };

    assert_eq!(
        codes,
        vec![KeyCode::Control, KeyCode::Char('`'), KeyCode::Function(12)]
    );
}
