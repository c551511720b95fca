//! Workbench registration and webview editor contributions

use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use trustgate::config::ProductConfig;
use trustgate::domains::CONFIGURE_TRUSTED_DOMAINS_COMMAND;
use trustgate::storage::InMemoryStorage;
use trustgate::workbench::{CollectReport, CustomEditorDiscretion, Workbench, CUSTOM_EDITOR_SETTING};

fn workbench() -> Result<Workbench> {
    Ok(Workbench::new(
        ProductConfig::default(),
        Arc::new(InMemoryStorage::new()),
    )?)
}

#[test]
fn test_registrations_present_after_startup() -> Result<()> {
    let workbench = workbench()?;

    let point = workbench
        .extensions()
        .get("webviewEditors")
        .expect("webviewEditors point registered");
    assert_eq!(point.deps, vec!["languages".to_string()]);

    let editor = workbench
        .editors()
        .get("workbench.editors.customEditor")
        .expect("custom editor registered");
    assert_eq!(editor.inputs, vec!["CustomFileEditorInput".to_string()]);

    let nodes = workbench.configuration().nodes();
    assert_eq!((nodes[0].order, nodes[0].title.as_str()), (7, "Workbench"));
    assert_eq!(
        workbench.configuration().property(CUSTOM_EDITOR_SETTING).map(|p| &p.default),
        Some(&json!({}))
    );

    assert!(workbench.commands().get(CONFIGURE_TRUSTED_DOMAINS_COMMAND).is_some());
    Ok(())
}

#[test]
fn test_valid_contributions_become_custom_editors() -> Result<()> {
    let mut workbench = workbench()?;
    let manifest = json!({
        "contributes": {
            "webviewEditors": [
                {
                    "viewType": "acme.preview",
                    "displayName": "Acme Preview",
                    "filenamePatterns": ["*.acme", "**/docs/*.md"],
                    "discretion": "option"
                },
                { "viewType": "acme.hex", "displayName": "Hex" }
            ]
        }
    });

    let report = workbench.add_extension("acme.tools", &manifest);

    assert_eq!(report.accepted, 2);
    assert!(report.issues.is_empty());

    let preview = workbench
        .custom_editors()
        .get("acme.preview")
        .expect("preview editor");
    assert_eq!(preview.discretion, CustomEditorDiscretion::Option);
    assert_eq!(preview.extension_id, "acme.tools");

    let hex = workbench.custom_editors().get("acme.hex").expect("hex editor");
    assert_eq!(hex.discretion, CustomEditorDiscretion::Default);
    assert!(hex.filename_patterns.is_empty());
    Ok(())
}

#[test]
fn test_malformed_entries_are_skipped() -> Result<()> {
    let mut workbench = workbench()?;
    let manifest = json!({
        "contributes": {
            "webviewEditors": [
                { "displayName": "No view type" },
                { "viewType": "", "displayName": "Empty" },
                { "viewType": "bad.glob", "displayName": "Bad", "filenamePatterns": ["[a-"] },
                { "viewType": "ok.one", "displayName": "Ok" }
            ]
        }
    });

    let report = workbench.add_extension("mixed", &manifest);

    assert_eq!(report.accepted, 1);
    let indices: Vec<usize> = report.issues.iter().map(|i| i.index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
    assert_eq!(workbench.custom_editors().editors().count(), 1);
    Ok(())
}

#[test]
fn test_duplicate_view_types_across_extensions() -> Result<()> {
    let mut workbench = workbench()?;
    let manifest = |name: &str| {
        json!({
            "contributes": {
                "webviewEditors": [{ "viewType": "shared.view", "displayName": name }]
            }
        })
    };

    assert_eq!(workbench.add_extension("first", &manifest("First")).accepted, 1);
    let second = workbench.add_extension("second", &manifest("Second"));

    assert_eq!(second.accepted, 0);
    assert_eq!(second.issues.len(), 1);
    assert_eq!(
        workbench.custom_editors().get("shared.view").map(|e| e.extension_id.as_str()),
        Some("first")
    );
    Ok(())
}

#[test]
fn test_non_array_contribution_is_one_issue() -> Result<()> {
    let mut workbench = workbench()?;

    let report = workbench.add_extension(
        "odd",
        &json!({ "contributes": { "webviewEditors": { "viewType": "x" } } }),
    );
    assert_eq!(report.accepted, 0);
    assert_eq!(report.issues.len(), 1);

    let report = workbench.add_extension("quiet", &json!({ "name": "quiet" }));
    assert_eq!(report, CollectReport::default());
    Ok(())
}
