//! Model-based property tests for the control-state invariants.
//!
//! A tiny reference model tracks who the admin is and which implementation
//! is active. Arbitrary operation sequences are replayed against a real
//! facade, and every step must agree with the model:
//! - administrative writes succeed iff the caller is the model's admin
//! - failed operations leave the model state unchanged
//! - the control version equals 1 + the number of successful mutations
//! - forwarded calls behave according to the model's active implementation

use proptest::prelude::*;
use std::sync::Arc;
use swivel_facade::{
    Call, CallFailure, Descriptor, Error, Facade, FacadeOptions, Identity, Implementation,
    ImplementationId, Output, Registry, Selector, StateContext, Value, Version,
};

// =============================================================================
// Fixtures
// =============================================================================

struct Honker {
    id: &'static str,
    noise: &'static str,
}

impl Implementation for Honker {
    fn descriptor(&self) -> Descriptor {
        Descriptor::new(
            ImplementationId::new(self.id).unwrap(),
            "1.0.0",
            vec![Selector::new("car/honk").unwrap()],
        )
    }

    fn handle(&self, call: &Call, _: &dyn StateContext) -> Result<Value, CallFailure> {
        match call.selector.as_str() {
            "car/honk" => Ok(Value::String(self.noise.into())),
            other => Err(CallFailure::new(
                "unknown_selector",
                &format!("{} does not handle '{other}'", self.id),
            )),
        }
    }
}

const IMPLEMENTATIONS: [(&str, &str); 3] = [
    ("car-v1", "beep"),
    ("car-v2", "BEEP BEEP"),
    ("car-v3", "honk"),
];

fn registry() -> Arc<Registry> {
    let mut registry = Registry::new();
    for (id, noise) in IMPLEMENTATIONS {
        registry.register(Arc::new(Honker { id, noise })).unwrap();
    }
    Arc::new(registry)
}

fn identity(name: &str) -> Identity {
    Identity::new(name).unwrap()
}

fn admin_write(selector: &str, field: &str, value: &str, caller: &str) -> Call {
    let mut map = std::collections::HashMap::new();
    map.insert(field.to_string(), Value::String(value.to_string()));
    Call::new(
        Selector::new(selector).unwrap(),
        Value::Object(map),
        identity(caller),
    )
}

// =============================================================================
// Operations and model
// =============================================================================

#[derive(Debug, Clone)]
enum Op {
    ChangeAdmin { caller: String, new_admin: String },
    Upgrade { caller: String, target: String },
    Honk { caller: String },
}

fn caller_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("alice".to_string()),
        Just("bob".to_string()),
        Just("carol".to_string()),
    ]
}

fn target_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("car-v1".to_string()),
        Just("car-v2".to_string()),
        Just("car-v3".to_string()),
        Just("ghost".to_string()),
    ]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (caller_strategy(), caller_strategy())
            .prop_map(|(caller, new_admin)| Op::ChangeAdmin { caller, new_admin }),
        (caller_strategy(), target_strategy())
            .prop_map(|(caller, target)| Op::Upgrade { caller, target }),
        caller_strategy().prop_map(|caller| Op::Honk { caller }),
    ]
}

struct Model {
    admin: String,
    implementation: String,
    successful_mutations: u64,
}

impl Model {
    fn noise(&self) -> &'static str {
        IMPLEMENTATIONS
            .iter()
            .find(|(id, _)| *id == self.implementation)
            .map(|(_, noise)| *noise)
            .expect("model only holds registered implementations")
    }
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn facade_agrees_with_reference_model(ops in proptest::collection::vec(op_strategy(), 1..40)) {
        let facade = Facade::new(
            registry(),
            ImplementationId::new("car-v1").unwrap(),
            identity("alice"),
            FacadeOptions::new(),
        )
        .unwrap();

        let mut model = Model {
            admin: "alice".to_string(),
            implementation: "car-v1".to_string(),
            successful_mutations: 0,
        };

        for op in ops {
            match op {
                Op::ChangeAdmin { caller, new_admin } => {
                    let result = facade.invoke(admin_write(
                        "admin/change_admin",
                        "new_admin",
                        &new_admin,
                        &caller,
                    ));
                    if caller == model.admin {
                        prop_assert!(result.is_ok());
                        model.admin = new_admin;
                        model.successful_mutations += 1;
                    } else {
                        // Forward policy: non-admin callers fall through to
                        // the implementation, which does not serve this
                        // selector.
                        prop_assert!(matches!(result, Err(Error::Forwarded { .. })));
                    }
                }
                Op::Upgrade { caller, target } => {
                    let result = facade.invoke(admin_write(
                        "admin/upgrade_implementation",
                        "reference",
                        &target,
                        &caller,
                    ));
                    if caller == model.admin && target != "ghost" {
                        prop_assert!(result.is_ok());
                        model.implementation = target;
                        model.successful_mutations += 1;
                    } else if caller == model.admin {
                        prop_assert!(matches!(result, Err(Error::InvalidTarget { .. })));
                    } else {
                        prop_assert!(matches!(result, Err(Error::Forwarded { .. })));
                    }
                }
                Op::Honk { caller } => {
                    let out = facade
                        .invoke(Call::new(
                            Selector::new("car/honk").unwrap(),
                            Value::Null,
                            identity(&caller),
                        ))
                        .unwrap();
                    prop_assert_eq!(out, Output::Forwarded(Value::String(model.noise().into())));
                }
            }

            // The admin surface always reflects the model, and only the
            // model's admin can read it.
            let admin_view = facade.admin().get_admin(&identity(&model.admin)).unwrap();
            prop_assert_eq!(admin_view.value.as_str(), model.admin.as_str());
            prop_assert_eq!(
                admin_view.version,
                Version::control(1 + model.successful_mutations)
            );

            let impl_view = facade
                .admin()
                .get_implementation(&identity(&model.admin))
                .unwrap();
            prop_assert_eq!(impl_view.value.as_str(), model.implementation.as_str());
        }
    }

    #[test]
    fn non_admin_callers_never_mutate_control_state(
        callers in proptest::collection::vec(caller_strategy(), 1..30),
    ) {
        let facade = Facade::new(
            registry(),
            ImplementationId::new("car-v1").unwrap(),
            identity("admin-only"),
            FacadeOptions::new(),
        )
        .unwrap();

        for caller in callers {
            // None of these identities is the admin; whatever they try,
            // the control pair stays at its seed.
            let _ = facade.invoke(admin_write(
                "admin/change_admin",
                "new_admin",
                &caller,
                &caller,
            ));
            let _ = facade.invoke(admin_write(
                "admin/upgrade_implementation",
                "reference",
                "car-v2",
                &caller,
            ));
        }

        let admin = facade.admin().get_admin(&identity("admin-only")).unwrap();
        prop_assert_eq!(admin.version, Version::control(1));
        prop_assert_eq!(admin.value.as_str(), "admin-only");
        let implementation = facade
            .admin()
            .get_implementation(&identity("admin-only"))
            .unwrap();
        prop_assert_eq!(implementation.value.as_str(), "car-v1");
    }
}
