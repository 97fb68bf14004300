//! Administrative surface tests: authorization gating, adminship transfer,
//! upgrade validation, fail-atomicity.

use super::fixtures::*;
use crate::{Error, Output, Version};
use swivel_core::Value;

// =============================================================================
// Reads
// =============================================================================

#[test]
fn test_admin_reads_own_state() {
    let facade = car_facade();

    let out = facade
        .invoke(call("admin/get_admin", Value::Null, &alice()))
        .unwrap();
    match out {
        Output::Admin(admin) => {
            assert_eq!(admin.value.as_str(), "alice");
            assert_eq!(admin.version, Version::control(1));
        }
        other => panic!("expected Admin output, got {:?}", other),
    }

    let out = facade
        .invoke(call("admin/get_implementation", Value::Null, &alice()))
        .unwrap();
    match out {
        Output::Implementation(imp) => {
            assert_eq!(imp.value.as_str(), "car-v1");
            assert_eq!(imp.version, Version::control(1));
        }
        other => panic!("expected Implementation output, got {:?}", other),
    }
}

#[test]
fn test_native_admin_reads_are_gated() {
    let facade = car_facade();

    assert!(facade.admin().get_admin(&alice()).is_ok());
    assert!(matches!(
        facade.admin().get_admin(&bob()),
        Err(Error::Unauthorized { .. })
    ));
    assert!(matches!(
        facade.admin().get_implementation(&bob()),
        Err(Error::Unauthorized { .. })
    ));
}

// =============================================================================
// change_admin
// =============================================================================

#[test]
fn test_change_admin_by_non_admin_fails_without_effect() {
    let facade = car_facade();

    let result = facade.admin().change_admin(&bob(), bob());
    match result {
        Err(Error::Unauthorized { selector, caller }) => {
            assert_eq!(selector, "admin/change_admin");
            assert_eq!(caller, "bob");
        }
        other => panic!("expected Unauthorized, got {:?}", other),
    }

    // Adminship and control version are untouched
    let admin = facade.admin().get_admin(&alice()).unwrap();
    assert_eq!(admin.value.as_str(), "alice");
    assert_eq!(admin.version, Version::control(1));
}

#[test]
fn test_change_admin_by_admin_transfers_authority() {
    let facade = car_facade();

    let out = facade
        .invoke(call("admin/change_admin", field("new_admin", "bob"), &alice()))
        .unwrap();
    assert_eq!(out, Output::ControlVersion(Version::control(2)));

    // bob now holds the surface, alice does not
    let admin = facade.admin().get_admin(&bob()).unwrap();
    assert_eq!(admin.value.as_str(), "bob");
    assert!(matches!(
        facade.admin().get_admin(&alice()),
        Err(Error::Unauthorized { .. })
    ));
}

#[test]
fn test_previous_admin_cannot_reclaim() {
    let facade = car_facade();
    facade.admin().change_admin(&alice(), bob()).unwrap();

    // alice tries to take adminship back
    let result = facade.admin().change_admin(&alice(), alice());
    assert!(matches!(result, Err(Error::Unauthorized { .. })));

    let admin = facade.admin().get_admin(&bob()).unwrap();
    assert_eq!(admin.value.as_str(), "bob");
}

#[test]
fn test_change_admin_with_malformed_payload() {
    let facade = car_facade();

    // Missing field
    let result = facade.invoke(call(
        "admin/change_admin",
        Value::Object(Default::default()),
        &alice(),
    ));
    match result {
        Err(Error::MalformedCall { selector, .. }) => {
            assert_eq!(selector, "admin/change_admin");
        }
        other => panic!("expected MalformedCall, got {:?}", other),
    }

    // Empty identity
    let result = facade.invoke(call(
        "admin/change_admin",
        field("new_admin", ""),
        &alice(),
    ));
    assert!(matches!(
        result,
        Err(Error::MalformedCall { reason, .. }) if reason == "empty_identity"
    ));

    // State untouched by either failure
    assert_eq!(
        facade.admin().get_admin(&alice()).unwrap().version,
        Version::control(1)
    );
}

// =============================================================================
// upgrade_implementation
// =============================================================================

#[test]
fn test_upgrade_by_admin_repoints() {
    let facade = car_facade();

    let out = facade
        .invoke(call(
            "admin/upgrade_implementation",
            field("reference", "car-v2"),
            &alice(),
        ))
        .unwrap();
    assert_eq!(out, Output::ControlVersion(Version::control(2)));

    let imp = facade.admin().get_implementation(&alice()).unwrap();
    assert_eq!(imp.value.as_str(), "car-v2");
}

#[test]
fn test_upgrade_by_non_admin_fails_without_effect() {
    let facade = car_facade();

    let result = facade.invoke(call(
        "admin/upgrade_implementation",
        field("reference", "car-v2"),
        &bob(),
    ));
    // Default policy forwards non-admin calls; car-v1 doesn't serve this
    // selector, so the caller sees the implementation's failure, not the
    // admin surface.
    assert!(matches!(result, Err(Error::Forwarded { .. })));

    let imp = facade.admin().get_implementation(&alice()).unwrap();
    assert_eq!(imp.value.as_str(), "car-v1");
    assert_eq!(imp.version, Version::control(1));
}

#[test]
fn test_upgrade_to_unregistered_target_fails_without_effect() {
    let facade = car_facade();

    let result = facade.admin().upgrade_implementation(&alice(), impl_id("car-v9"));
    match result {
        Err(Error::InvalidTarget { reference, reason }) => {
            assert_eq!(reference, "car-v9");
            assert_eq!(reason, "unregistered");
        }
        other => panic!("expected InvalidTarget, got {:?}", other),
    }

    let imp = facade.admin().get_implementation(&alice()).unwrap();
    assert_eq!(imp.value.as_str(), "car-v1");
    assert_eq!(imp.version, Version::control(1));
}

#[test]
fn test_upgrade_rejects_descriptor_mismatch() {
    use crate::{Facade, FacadeOptions, Registry};
    use std::sync::Arc;

    let shifty = Shapeshifter::new();
    let mut registry = Registry::new();
    registry.register(Arc::new(CarV1)).unwrap();
    registry.register(shifty.clone()).unwrap();
    let facade = Facade::new(
        Arc::new(registry),
        impl_id("car-v1"),
        alice(),
        FacadeOptions::new(),
    )
    .unwrap();

    // Honest descriptor: upgrade succeeds
    facade
        .admin()
        .upgrade_implementation(&alice(), impl_id("shapeshifter"))
        .unwrap();

    // Roll back, then make the descriptor lie
    facade
        .admin()
        .upgrade_implementation(&alice(), impl_id("car-v1"))
        .unwrap();
    shifty.turn_dishonest();

    let result = facade
        .admin()
        .upgrade_implementation(&alice(), impl_id("shapeshifter"));
    assert!(matches!(
        result,
        Err(Error::InvalidTarget { reason, .. }) if reason == "descriptor_mismatch"
    ));
    assert_eq!(
        facade.admin().get_implementation(&alice()).unwrap().value.as_str(),
        "car-v1"
    );
}

#[test]
fn test_authorization_has_precedence_over_target_validation() {
    let facade = car_facade();

    // bob + unregistered target: bob must not learn whether it exists
    let result = facade.admin().upgrade_implementation(&bob(), impl_id("car-v9"));
    assert!(matches!(result, Err(Error::Unauthorized { .. })));
}

// =============================================================================
// Fail-atomicity across a whole failed sequence
// =============================================================================

#[test]
fn test_failed_operations_never_advance_control_version() {
    let facade = car_facade();

    let _ = facade.admin().change_admin(&bob(), bob());
    let _ = facade.admin().upgrade_implementation(&bob(), impl_id("car-v2"));
    let _ = facade.admin().upgrade_implementation(&alice(), impl_id("car-v9"));
    let _ = facade.invoke(call("admin/change_admin", Value::Int(1), &alice()));

    let admin = facade.admin().get_admin(&alice()).unwrap();
    assert_eq!(admin.version, Version::control(1));
    assert_eq!(admin.value.as_str(), "alice");
}
