//! Tests for the `Object` reflection built-ins, called through the global
//! `Object` constructor the way scripts reach them

mod common;
use common::*;
use pretty_assertions::assert_eq;
use quicksilver_objects::runtime::json;
use quicksilver_objects::{PropertyKey, Realm, Symbol, Value, WellKnownSymbol};
use std::sync::Arc;

fn obj(value: &Value) -> quicksilver_objects::ObjectRef {
    value.as_object().expect("object expected").clone()
}

mod descriptors {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_define_then_describe_merges_defaults() {
        let realm = Realm::new();
        let target = Value::Object(realm.new_object());
        let desc = descriptor(&realm, &[("value", Value::from(1)), ("enumerable", Value::from(true))]);
        object_call(&realm, "defineProperty", &[target.clone(), Value::from("x"), desc]).unwrap();

        let described =
            object_call(&realm, "getOwnPropertyDescriptor", &[target, Value::from("x")]).unwrap();
        assert_eq!(prop(&realm, &described, "value"), Value::from(1));
        assert_eq!(prop(&realm, &described, "writable"), Value::from(false));
        assert_eq!(prop(&realm, &described, "enumerable"), Value::from(true));
        assert_eq!(prop(&realm, &described, "configurable"), Value::from(false));
        assert_eq!(
            to_strings(&realm, &object_call(&realm, "keys", &[described]).unwrap()),
            vec!["value", "writable", "enumerable", "configurable"]
        );
    }

    #[test]
    fn test_accessor_descriptor_shape() {
        let realm = Realm::new();
        let getter = realm.new_function("g", 0, |_: &Realm, _: &Value, _: &[Value]| {
            Ok(Value::from(7))
        });
        let target = Value::Object(realm.new_object());
        let desc = descriptor(&realm, &[("get", Value::Object(getter.clone()))]);
        object_call(&realm, "defineProperty", &[target.clone(), Value::from("g"), desc]).unwrap();

        assert_eq!(prop(&realm, &target, "g"), Value::from(7));
        let described =
            object_call(&realm, "getOwnPropertyDescriptor", &[target, Value::from("g")]).unwrap();
        assert!(Arc::ptr_eq(prop(&realm, &described, "get").as_object().unwrap(), &getter));
        assert_eq!(prop(&realm, &described, "set"), Value::Undefined);
        assert_eq!(
            to_strings(&realm, &object_call(&realm, "keys", &[described]).unwrap()),
            vec!["get", "set", "enumerable", "configurable"]
        );
    }

    #[test]
    fn test_absent_key_is_undefined() {
        let realm = Realm::new();
        let target = Value::Object(realm.new_object());
        assert_eq!(
            object_call(&realm, "getOwnPropertyDescriptor", &[target, Value::from("nope")]).unwrap(),
            Value::Undefined
        );
    }

    #[test]
    fn test_absent_to_string_tag_is_synthetic_accessor() {
        let realm = Realm::new();
        let target = Value::Object(realm.new_object());
        let tag = WellKnownSymbol::ToStringTag.symbol();
        let described = object_call(
            &realm,
            "getOwnPropertyDescriptor",
            &[target.clone(), Value::Symbol(tag)],
        )
        .unwrap();
        assert!(described.is_object());
        assert!(prop(&realm, &described, "get").is_callable());
        assert_eq!(prop(&realm, &described, "set"), Value::Undefined);
        // The property itself is still absent
        assert!(!obj(&target).has_own_property(&WellKnownSymbol::ToStringTag.into()));
    }

    #[test]
    fn test_prevent_extensions_then_define_fails() {
        let realm = Realm::new();
        let target = Value::Object(realm.new_object());
        object_call(&realm, "preventExtensions", &[target.clone()]).unwrap();
        let desc = descriptor(&realm, &[("value", Value::from(1))]);
        let err = object_call(&realm, "defineProperty", &[target, Value::from("new"), desc])
            .unwrap_err();
        assert!(err.is_type_error());
    }

    #[test]
    fn test_read_only_put_is_ignored() {
        let realm = Realm::new();
        let target = Value::Object(realm.new_object());
        let desc = descriptor(&realm, &[("value", Value::from(1)), ("writable", Value::from(false))]);
        object_call(&realm, "defineProperty", &[target.clone(), Value::from("x"), desc]).unwrap();
        obj(&target)
            .put(&realm, &"x".into(), Value::from(2), false)
            .unwrap();
        assert_eq!(prop(&realm, &target, "x"), Value::from(1));
    }

    #[test]
    fn test_define_properties_is_all_or_nothing_on_bad_descriptor() {
        let realm = Realm::new();
        let target = Value::Object(realm.new_object());
        let props = object_from(
            &realm,
            &[
                ("good", descriptor(&realm, &[("value", Value::from(1))])),
                ("bad", Value::from(3)),
            ],
        );
        assert!(object_call(&realm, "defineProperties", &[target.clone(), props])
            .unwrap_err()
            .is_type_error());
        assert!(!obj(&target).has_own_property(&"good".into()));
    }

    #[test]
    fn test_non_object_targets_rejected() {
        let realm = Realm::new();
        for method in [
            "getPrototypeOf",
            "setPrototypeOf",
            "defineProperty",
            "getOwnPropertyDescriptor",
            "keys",
            "seal",
            "freeze",
            "preventExtensions",
            "isSealed",
            "isFrozen",
            "isExtensible",
        ] {
            let err = object_call(&realm, method, &[Value::from(1), Value::Null]).unwrap_err();
            assert!(err.is_type_error(), "{} accepted a primitive", method);
        }
    }
}

mod prototypes {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_create_links_prototype_and_applies_properties() {
        let realm = Realm::new();
        let proto = Value::Object(realm.new_object());
        let props = object_from(
            &realm,
            &[("x", descriptor(&realm, &[("value", Value::from(1)), ("enumerable", Value::from(true))]))],
        );
        let created = object_call(&realm, "create", &[proto.clone(), props]).unwrap();
        let link = object_call(&realm, "getPrototypeOf", &[created.clone()]).unwrap();
        assert!(Arc::ptr_eq(link.as_object().unwrap(), proto.as_object().unwrap()));
        assert_eq!(prop(&realm, &created, "x"), Value::from(1));

        let orphan = object_call(&realm, "create", &[Value::Null]).unwrap();
        assert_eq!(object_call(&realm, "getPrototypeOf", &[orphan]).unwrap(), Value::Null);

        assert!(object_call(&realm, "create", &[Value::from(1)])
            .unwrap_err()
            .is_type_error());
    }

    #[test]
    fn test_set_prototype_of() {
        let realm = Realm::new();
        let target = Value::Object(realm.new_object());
        let proto = object_from(&realm, &[("inherited", Value::from(true))]);
        object_call(&realm, "setPrototypeOf", &[target.clone(), proto]).unwrap();
        assert_eq!(prop(&realm, &target, "inherited"), Value::from(true));

        assert!(object_call(&realm, "setPrototypeOf", &[target.clone(), Value::from(1)])
            .unwrap_err()
            .is_type_error());
        object_call(&realm, "setPrototypeOf", &[target.clone(), Value::Null]).unwrap();
        assert!(obj(&target).prototype().is_none());
    }

    #[test]
    fn test_cycle_forming_link_rejected() {
        let realm = Realm::new();
        let a = Value::Object(realm.new_object());
        let b = Value::Object(realm.new_object_with_prototype(Some(obj(&a))));
        let err = object_call(&realm, "setPrototypeOf", &[a.clone(), b]).unwrap_err();
        assert!(err.is_type_error());
        assert!(object_call(&realm, "setPrototypeOf", &[a.clone(), a])
            .unwrap_err()
            .is_type_error());
    }

    #[test]
    fn test_is_prototype_of() {
        let realm = Realm::new();
        let proto = Value::Object(realm.new_object());
        let child = Value::Object(realm.new_object_with_prototype(Some(obj(&proto))));
        assert_eq!(invoke(&realm, &proto, "isPrototypeOf", &[child.clone()]).unwrap(), Value::from(true));
        assert_eq!(invoke(&realm, &child, "isPrototypeOf", &[proto]).unwrap(), Value::from(false));
        assert_eq!(invoke(&realm, &child, "isPrototypeOf", &[Value::from(1)]).unwrap(), Value::from(false));
    }
}

mod integrity {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_freeze_idempotent() {
        let realm = Realm::new();
        let target = object_from(&realm, &[("a", Value::from(1)), ("b", Value::from(2))]);
        object_call(&realm, "freeze", &[target.clone()]).unwrap();
        let first: Vec<_> = ["a", "b"]
            .iter()
            .map(|k| obj(&target).get_own_property(&PropertyKey::from(*k)))
            .collect();
        object_call(&realm, "freeze", &[target.clone()]).unwrap();
        let second: Vec<_> = ["a", "b"]
            .iter()
            .map(|k| obj(&target).get_own_property(&PropertyKey::from(*k)))
            .collect();
        assert_eq!(first, second);
        assert_eq!(object_call(&realm, "isFrozen", &[target]).unwrap(), Value::from(true));
    }

    #[test]
    fn test_seal_blocks_delete() {
        let realm = Realm::new();
        let target = object_from(&realm, &[("a", Value::from(1))]);
        object_call(&realm, "seal", &[target.clone()]).unwrap();
        assert_eq!(object_call(&realm, "isSealed", &[target.clone()]).unwrap(), Value::from(true));
        assert_eq!(object_call(&realm, "isFrozen", &[target.clone()]).unwrap(), Value::from(false));
        assert_eq!(object_call(&realm, "isExtensible", &[target.clone()]).unwrap(), Value::from(false));

        let o = obj(&target);
        assert!(!o.delete(&"a".into(), false).unwrap());
        assert_eq!(prop(&realm, &target, "a"), Value::from(1));
        // Sealed data stays writable
        o.put(&realm, &"a".into(), Value::from(5), true).unwrap();
        assert_eq!(prop(&realm, &target, "a"), Value::from(5));
    }

    #[test]
    fn test_empty_non_extensible_is_frozen() {
        let realm = Realm::new();
        let target = Value::Object(realm.new_object());
        assert_eq!(object_call(&realm, "isFrozen", &[target.clone()]).unwrap(), Value::from(false));
        object_call(&realm, "preventExtensions", &[target.clone()]).unwrap();
        assert_eq!(object_call(&realm, "isFrozen", &[target.clone()]).unwrap(), Value::from(true));
        assert_eq!(object_call(&realm, "isSealed", &[target]).unwrap(), Value::from(true));
    }

    #[test]
    fn test_frozen_accessor_keeps_setter() {
        let realm = Realm::new();
        let target = Value::Object(realm.new_object());
        let setter = realm.new_function("s", 1, |_: &Realm, _: &Value, _: &[Value]| {
            Ok(Value::Undefined)
        });
        invoke(&realm, &target, "__defineSetter__", &[Value::from("s"), Value::Object(setter)])
            .unwrap();
        object_call(&realm, "freeze", &[target.clone()]).unwrap();
        assert_eq!(object_call(&realm, "isFrozen", &[target.clone()]).unwrap(), Value::from(true));
        assert!(obj(&target).can_put(&"s".into()));
    }

    #[test]
    fn test_freeze_array_locks_length() {
        let realm = Realm::new();
        let arr = realm.new_array(vec![Value::from(1), Value::from(2)]);
        let target = Value::Object(arr.clone());
        object_call(&realm, "freeze", &[target.clone()]).unwrap();
        assert_eq!(object_call(&realm, "isFrozen", &[target.clone()]).unwrap(), Value::from(true));

        let length = arr.get_own_property(&"length".into()).unwrap();
        assert!(!length.is_writable() && !length.is_configurable());
        assert!(arr.put(&realm, &"2".into(), Value::from(3), true).is_err());
        assert!(arr.put(&realm, &"length".into(), Value::from(0), true).is_err());
        assert_eq!(prop(&realm, &target, "length"), Value::from(2));
        assert_eq!(prop(&realm, &target, "1"), Value::from(2));
    }

    #[test]
    fn test_seal_covers_symbol_keys() {
        let realm = Realm::new();
        let o = realm.new_object();
        let sym = quicksilver_objects::Symbol::new(Some("s".to_string()));
        o.put(&realm, &PropertyKey::Symbol(sym.clone()), Value::from(1), true).unwrap();
        object_call(&realm, "seal", &[Value::Object(o.clone())]).unwrap();
        let desc = o.get_own_property(&PropertyKey::Symbol(sym)).unwrap();
        assert!(!desc.is_configurable() && desc.is_writable());
    }
}

mod enumeration {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_keys_follow_insertion_order() {
        let realm = Realm::new();
        let target = object_from(&realm, &[("a", Value::from(1)), ("b", Value::from(2)), ("c", Value::from(3))]);
        let keys = |t: &Value| to_strings(&realm, &object_call(&realm, "keys", &[t.clone()]).unwrap());
        assert_eq!(keys(&target), vec!["a", "b", "c"]);

        obj(&target).delete(&"b".into(), true).unwrap();
        obj(&target).put(&realm, &"b".into(), Value::from(4), true).unwrap();
        assert_eq!(keys(&target), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_symbol_keys_excluded_everywhere() {
        let realm = Realm::new();
        let sym = Symbol::new(Some("secret".into()));
        let target = object_from(&realm, &[("visible", Value::from(1))]);
        obj(&target)
            .put(&realm, &PropertyKey::Symbol(sym.clone()), Value::from(2), true)
            .unwrap();

        for method in ["keys", "getOwnPropertyNames"] {
            let names = to_strings(&realm, &object_call(&realm, method, &[target.clone()]).unwrap());
            assert_eq!(names, vec!["visible"], "{}", method);
        }
        let values = to_vec(&realm, &object_call(&realm, "values", &[target.clone()]).unwrap());
        assert_eq!(values, vec![Value::from(1)]);
        let entries = to_vec(&realm, &object_call(&realm, "entries", &[target.clone()]).unwrap());
        assert_eq!(entries.len(), 1);
        assert_eq!(
            json::stringify(&realm, &target).unwrap().unwrap(),
            r#"{"visible":1}"#
        );

        // Still reachable directly
        assert_eq!(
            obj(&target).get(&realm, &PropertyKey::Symbol(sym)).unwrap(),
            Value::from(2)
        );
    }

    #[test]
    fn test_entries_pairs() {
        let realm = Realm::new();
        let target = object_from(&realm, &[("a", Value::from(1)), ("b", Value::from(2))]);
        let entries = to_vec(&realm, &object_call(&realm, "entries", &[target]).unwrap());
        let pairs: Vec<Vec<Value>> = entries.iter().map(|e| to_vec(&realm, e)).collect();
        assert_eq!(
            pairs,
            vec![
                vec![Value::from("a"), Value::from(1)],
                vec![Value::from("b"), Value::from(2)],
            ]
        );
    }

    #[test]
    fn test_from_entries() {
        let realm = Realm::new();
        let pair = |k: &str, v: i32| Value::Object(realm.new_array(vec![Value::from(k), Value::from(v)]));
        let source = Value::Object(realm.new_array(vec![pair("a", 1), pair("b", 2)]));
        let built = object_call(&realm, "fromEntries", &[source]).unwrap();
        assert_eq!(
            to_strings(&realm, &object_call(&realm, "keys", &[built.clone()]).unwrap()),
            vec!["a", "b"]
        );
        assert_eq!(
            to_vec(&realm, &object_call(&realm, "values", &[built]).unwrap()),
            vec![Value::from(1), Value::from(2)]
        );
    }

    #[test]
    fn test_from_entries_rejects_malformed_input() {
        let realm = Realm::new();
        assert!(object_call(&realm, "fromEntries", &[Value::from(1)])
            .unwrap_err()
            .is_type_error());
        let bad = Value::Object(realm.new_array(vec![Value::from("ab")]));
        assert!(object_call(&realm, "fromEntries", &[bad])
            .unwrap_err()
            .is_type_error());
    }

    #[test]
    fn test_from_entries_requires_array_likes() {
        let realm = Realm::new();
        // A plain object is not a list of entries
        let plain = object_from(&realm, &[]);
        assert!(object_call(&realm, "fromEntries", &[plain])
            .unwrap_err()
            .is_type_error());

        // Nor is a plain object an entry
        let entries = Value::Object(realm.new_array(vec![object_from(&realm, &[])]));
        assert!(object_call(&realm, "fromEntries", &[entries])
            .unwrap_err()
            .is_type_error());
    }

    #[test]
    fn test_from_entries_accepts_array_like_objects() {
        let realm = Realm::new();
        let entry = object_from(
            &realm,
            &[("0", Value::from("k")), ("1", Value::from("v")), ("length", Value::from(2))],
        );
        let source = object_from(&realm, &[("0", entry), ("length", Value::from(1))]);
        let built = object_call(&realm, "fromEntries", &[source]).unwrap();
        assert_eq!(prop(&realm, &built, "k"), Value::from("v"));
        assert_eq!(
            to_strings(&realm, &object_call(&realm, "keys", &[built]).unwrap()),
            vec!["k"]
        );
    }
}

mod prototype_methods {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_has_own_and_enumerable() {
        let realm = Realm::new();
        let target = object_from(&realm, &[("a", Value::from(1))]);
        assert_eq!(invoke(&realm, &target, "hasOwnProperty", &[Value::from("a")]).unwrap(), Value::from(true));
        assert_eq!(
            invoke(&realm, &target, "hasOwnProperty", &[Value::from("hasOwnProperty")]).unwrap(),
            Value::from(false)
        );
        assert_eq!(
            invoke(&realm, &target, "propertyIsEnumerable", &[Value::from("a")]).unwrap(),
            Value::from(true)
        );
        let proto = realm.global_value("Object").unwrap();
        let proto = prop(&realm, &proto, "prototype");
        assert_eq!(
            invoke(&realm, &proto, "propertyIsEnumerable", &[Value::from("toString")]).unwrap(),
            Value::from(false)
        );
    }

    #[test]
    fn test_to_string_and_locale() {
        let realm = Realm::new();
        let target = Value::Object(realm.new_object());
        assert_eq!(invoke(&realm, &target, "toString", &[]).unwrap(), Value::from("[object Object]"));
        assert_eq!(
            invoke(&realm, &target, "toLocaleString", &[]).unwrap(),
            Value::from("[object Object]")
        );
        let func = Value::Object(realm.new_function("f", 0, |_: &Realm, _: &Value, _: &[Value]| {
            Ok(Value::Undefined)
        }));
        assert_eq!(invoke(&realm, &func, "toString", &[]).unwrap(), Value::from("[object Function]"));

        obj(&target).put(&realm, &"toString".into(), Value::from(1), true).unwrap();
        assert!(invoke(&realm, &target, "toLocaleString", &[])
            .unwrap_err()
            .is_type_error());
    }

    #[test]
    fn test_define_getter_and_setter_helpers() {
        let realm = Realm::new();
        let target = Value::Object(realm.new_object());
        let getter = realm.new_function("g", 0, |_: &Realm, _: &Value, _: &[Value]| Ok(Value::from(3)));
        let returned =
            invoke(&realm, &target, "__defineGetter__", &[Value::from("x"), Value::Object(getter)])
                .unwrap();
        assert!(Arc::ptr_eq(returned.as_object().unwrap(), &obj(&target)));
        assert_eq!(prop(&realm, &target, "x"), Value::from(3));
        let desc = obj(&target).get_own_property(&"x".into()).unwrap();
        assert!(desc.is_enumerable() && desc.is_configurable());

        assert!(invoke(&realm, &target, "__defineSetter__", &[Value::from("x"), Value::from(1)])
            .unwrap_err()
            .is_type_error());
    }
}
