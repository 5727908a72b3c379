use f77tool_types::vars;
use f77tool_types::{
    ActionKind, ConflictPolicy, Detection, ObjectKind, SourceKind, SuffixPartition, ToolReport,
};

#[test]
fn tool_report_new_sets_schema_and_defaults() {
    let partition = SuffixPartition::new(
        [".f", ".for", ".F"].into_iter().collect(),
        [".fpp", ".FPP"].into_iter().collect(),
    )
    .expect("disjoint");

    let report = ToolReport::new(false, Detection::NotFound, "f77".into(), partition.clone());

    assert_eq!(report.schema, f77tool_types::schema::F77TOOL_REPORT_V1);
    assert_eq!(report.tool, "f77");
    assert!(!report.case_sensitive);
    assert_eq!(report.program, "f77");
    assert_eq!(report.suffixes, partition);
    assert!(report.bindings.static_obj.is_empty());
    assert!(report.bindings.shared_obj.is_empty());
    assert!(report.vars.is_empty());
    assert!(report.expanded.is_empty());
}

#[test]
fn conflict_policy_defaults_to_reject() {
    assert_eq!(ConflictPolicy::default(), ConflictPolicy::Reject);
}

#[test]
fn produced_vars_cover_every_action_template() {
    for action in ActionKind::ALL {
        assert!(
            vars::PRODUCED.contains(&action.command_var()),
            "{} missing from PRODUCED",
            action.command_var()
        );
    }
}

#[test]
fn action_matrix_is_complete() {
    let combos = [
        (SourceKind::Plain, ObjectKind::Static, "F77Action"),
        (SourceKind::Plain, ObjectKind::Shared, "ShF77Action"),
        (SourceKind::Preprocessed, ObjectKind::Static, "F77PPAction"),
        (SourceKind::Preprocessed, ObjectKind::Shared, "ShF77PPAction"),
    ];
    for (source, object, name) in combos {
        assert_eq!(ActionKind::new(source, object).name(), name);
    }
}
