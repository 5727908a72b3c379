use f77tool_types::{
    ActionKind, ConflictPolicy, Detection, ObjectKind, Suffix, SuffixPartition, SuffixSet,
    ToolReport, VarValue,
};
use pretty_assertions::assert_eq;

fn partition() -> SuffixPartition {
    SuffixPartition::new(
        [".f", ".for"].into_iter().collect::<SuffixSet>(),
        [".fpp", ".FPP", ".F"].into_iter().collect::<SuffixSet>(),
    )
    .expect("disjoint")
}

#[test]
fn action_kind_serializes_with_action_names() {
    let values: Vec<_> = ActionKind::ALL
        .iter()
        .map(|a| serde_json::to_value(a).expect("serialize"))
        .collect();
    assert_eq!(
        values,
        vec![
            serde_json::json!("F77Action"),
            serde_json::json!("ShF77Action"),
            serde_json::json!("F77PPAction"),
            serde_json::json!("ShF77PPAction"),
        ]
    );
}

#[test]
fn object_kind_and_policy_serialize_snake_case() {
    assert_eq!(
        serde_json::to_value(ObjectKind::Shared).expect("serialize"),
        serde_json::json!("shared")
    );
    let policy: ConflictPolicy = serde_json::from_str("\"overwrite\"").expect("deserialize");
    assert_eq!(policy, ConflictPolicy::Overwrite);
}

#[test]
fn detection_serializes_tagged() {
    assert_eq!(
        serde_json::to_value(Detection::Found("f77".into())).expect("serialize"),
        serde_json::json!({ "status": "found", "name": "f77" })
    );
    assert_eq!(
        serde_json::to_value(Detection::NotFound).expect("serialize"),
        serde_json::json!({ "status": "not_found" })
    );
}

#[test]
fn var_value_is_untagged() {
    assert_eq!(
        serde_json::to_value(VarValue::from("f77")).expect("serialize"),
        serde_json::json!("f77")
    );
    assert_eq!(
        serde_json::to_value(VarValue::clvar("$F77FLAGS")).expect("serialize"),
        serde_json::json!(["$F77FLAGS"])
    );
    let parsed: VarValue = serde_json::from_str(r#"["-O2","-g"]"#).expect("deserialize");
    assert_eq!(parsed, VarValue::clvar("-O2 -g"));
}

#[test]
fn partition_serializes_as_ordered_lists() {
    let value = serde_json::to_value(partition()).expect("serialize");
    assert_eq!(
        value,
        serde_json::json!({
            "plain": [".f", ".for"],
            "preprocessed": [".fpp", ".FPP", ".F"],
        })
    );
}

#[test]
fn partition_deserialization_enforces_disjointness() {
    let bad = r#"{ "plain": [".f", ".F"], "preprocessed": [".F"] }"#;
    let err = serde_json::from_str::<SuffixPartition>(bad).expect_err("overlap must fail");
    assert!(err.to_string().contains(".F"));
}

#[test]
fn report_uses_builder_names_as_keys() {
    let mut report = ToolReport::new(true, Detection::NotFound, "f77".into(), partition());
    report
        .bindings
        .static_obj
        .insert(Suffix::from(".f"), ActionKind::F77);
    report
        .bindings
        .shared_obj
        .insert(Suffix::from(".f"), ActionKind::ShF77);

    let value = serde_json::to_value(&report).expect("serialize");
    assert_eq!(value["bindings"]["static"][".f"], "F77Action");
    assert_eq!(value["bindings"]["shared"][".f"], "ShF77Action");
    assert!(value.get("expanded").is_none());

    let back: ToolReport = serde_json::from_value(value).expect("deserialize");
    assert_eq!(back, report);
}
