//! End-to-end runs of the trusted domain decision flow

mod common;

use anyhow::Result;
use common::{list, raw_stored, storage_with, store_over};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use trustgate::domains::{
    ConfigureTrustedDomainAction, DomainSource, FlowOutcome, TrustDecisionFlow,
    TrustedDomainList, TrustedDomainService,
};
use trustgate::quickinput::{ScriptedAnswer, ScriptedQuickInput, ShownPrompt};
use trustgate::storage::JsonFileStorage;

fn pick(id: &str) -> ScriptedAnswer {
    ScriptedAnswer::Pick(Some(id.to_string()))
}

fn stored_list(text: Option<String>) -> TrustedDomainList {
    TrustedDomainList::from_json(&text.expect("a value was stored")).expect("stored JSON")
}

#[tokio::test]
async fn test_toggle_all_twice_restores_content() -> Result<()> {
    let storage = storage_with(Some(r#"["https://a.com","https://b.com"]"#));
    let store = store_over(storage.clone(), None);

    for _ in 0..2 {
        let input = ScriptedQuickInput::new([pick("toggleAll")]);
        TrustDecisionFlow::new(&store, &input).run().await?;
    }

    assert_eq!(
        stored_list(raw_stored(storage.as_ref())),
        list(&["https://a.com", "https://b.com"])
    );
    Ok(())
}

#[tokio::test]
async fn test_toggle_all_never_duplicates_wildcard() -> Result<()> {
    let storage = storage_with(Some(r#"["*","https://a.com","*"]"#));
    let store = store_over(storage.clone(), None);

    for expected_wildcards in [0, 1, 0, 1] {
        let input = ScriptedQuickInput::new([pick("toggleAll")]);
        TrustDecisionFlow::new(&store, &input).run().await?;

        let stored = stored_list(raw_stored(storage.as_ref()));
        let wildcards = stored.entries().iter().filter(|e| *e == "*").count();
        assert_eq!(wildcards, expected_wildcards);
    }
    Ok(())
}

#[tokio::test]
async fn test_toggle_label_reflects_wildcard() -> Result<()> {
    let storage = storage_with(Some(r#"["*"]"#));
    let store = store_over(storage, None);
    let input = ScriptedQuickInput::new([ScriptedAnswer::Pick(None)]);

    TrustDecisionFlow::new(&store, &input).run().await?;

    match &input.shown()[0] {
        ShownPrompt::Pick(items) => {
            let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
            assert_eq!(ids, vec!["toggleAll", "add", "configure", "reset"]);
            assert_eq!(items[0].label, "Open all links with prompt");
        }
        other => panic!("unexpected first prompt {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_add_appends_domain() -> Result<()> {
    let storage = storage_with(Some(r#"["https://a.com"]"#));
    let store = store_over(storage.clone(), None);
    let input = ScriptedQuickInput::new([
        pick("add"),
        ScriptedAnswer::Input(Some("  https://example.com ".to_string())),
    ]);

    let outcome = TrustDecisionFlow::new(&store, &input).run().await?;

    let expected = list(&["https://a.com", "https://example.com"]);
    assert_eq!(outcome, FlowOutcome::Persisted(expected.clone()));
    assert_eq!(stored_list(raw_stored(storage.as_ref())), expected);
    assert_eq!(
        input.shown()[1],
        ShownPrompt::Input {
            placeholder: "https://www.microsoft.com".to_string()
        }
    );
    Ok(())
}

#[tokio::test]
async fn test_configure_drops_deselected_domain_and_keeps_wildcard() -> Result<()> {
    let storage = storage_with(Some(r#"["https://a.com","https://b.com","*"]"#));
    let store = store_over(storage.clone(), None);
    let input = ScriptedQuickInput::new([
        pick("configure"),
        ScriptedAnswer::PickMany(Some(vec!["0".to_string()])),
    ]);

    TrustDecisionFlow::new(&store, &input).run().await?;

    assert_eq!(
        stored_list(raw_stored(storage.as_ref())),
        list(&["https://a.com", "*"])
    );

    // The wildcard is not offered as a domain
    match &input.shown()[1] {
        ShownPrompt::PickMany(items) => {
            let labels: Vec<&str> = items.iter().map(|i| i.label.as_str()).collect();
            assert_eq!(labels, vec!["https://a.com", "https://b.com"]);
            assert!(items.iter().all(|i| i.picked));
        }
        other => panic!("unexpected second prompt {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_reset_persists_product_defaults() -> Result<()> {
    let storage = storage_with(Some(r#"["https://a.com","*"]"#));
    let store = store_over(storage.clone(), Some(&["https://trusted.example"]));
    let input = ScriptedQuickInput::new([pick("reset")]);

    let outcome = TrustDecisionFlow::new(&store, &input).run().await?;

    assert_eq!(
        outcome,
        FlowOutcome::Persisted(list(&["https://trusted.example"]))
    );
    assert_eq!(
        raw_stored(storage.as_ref()),
        Some(r#"["https://trusted.example"]"#.to_string())
    );
    Ok(())
}

#[tokio::test]
async fn test_reset_without_defaults_is_unchanged() -> Result<()> {
    let storage = storage_with(Some(r#"["https://a.com"]"#));
    let store = store_over(storage.clone(), None);
    let input = ScriptedQuickInput::new([pick("reset")]);

    let outcome = TrustDecisionFlow::new(&store, &input).run().await?;

    assert_eq!(outcome, FlowOutcome::Unchanged);
    assert_eq!(
        raw_stored(storage.as_ref()),
        Some(r#"["https://a.com"]"#.to_string())
    );
    Ok(())
}

#[tokio::test]
async fn test_corrupt_storage_behaves_as_default() -> Result<()> {
    let storage = storage_with(Some("{not json"));
    let store = store_over(storage.clone(), Some(&["https://d.com"]));

    assert_eq!(
        store.read()?,
        (list(&["https://d.com"]), DomainSource::ProductDefault)
    );

    let input = ScriptedQuickInput::new([pick("toggleAll")]);
    TrustDecisionFlow::new(&store, &input).run().await?;

    assert_eq!(
        stored_list(raw_stored(storage.as_ref())),
        list(&["https://d.com", "*"])
    );
    Ok(())
}

#[tokio::test]
async fn test_top_level_cancel_leaves_storage_untouched() -> Result<()> {
    let original = r#"[ "https://a.com" ,"*"]"#;
    let storage = storage_with(Some(original));
    let store = store_over(storage.clone(), Some(&["https://d.com"]));
    let input = ScriptedQuickInput::new([ScriptedAnswer::Pick(None)]);

    let outcome = TrustDecisionFlow::new(&store, &input).run().await?;

    assert_eq!(outcome, FlowOutcome::Cancelled);
    assert_eq!(raw_stored(storage.as_ref()), Some(original.to_string()));
    Ok(())
}

#[tokio::test]
async fn test_sub_prompt_cancel_persists_nothing() -> Result<()> {
    let original = r#"["https://a.com","https://b.com"]"#;

    let cases = [
        vec![pick("add"), ScriptedAnswer::Input(None)],
        vec![pick("add"), ScriptedAnswer::Input(Some("   ".to_string()))],
        vec![pick("configure"), ScriptedAnswer::PickMany(None)],
    ];

    for answers in cases {
        let storage = storage_with(Some(original));
        let store = store_over(storage.clone(), None);
        let input = ScriptedQuickInput::new(answers);

        let outcome = TrustDecisionFlow::new(&store, &input).run().await?;

        assert_eq!(outcome, FlowOutcome::Cancelled);
        assert_eq!(raw_stored(storage.as_ref()), Some(original.to_string()));
    }
    Ok(())
}

#[tokio::test]
async fn test_add_validation_permissive_and_strict() -> Result<()> {
    let answers = || {
        [
            pick("add"),
            ScriptedAnswer::Input(Some("example.com".to_string())),
        ]
    };

    let storage = storage_with(Some(r#"["https://a.com"]"#));
    let store = store_over(storage.clone(), None);
    let input = ScriptedQuickInput::new(answers());
    TrustDecisionFlow::new(&store, &input).run().await?;
    assert_eq!(
        stored_list(raw_stored(storage.as_ref())),
        list(&["https://a.com", "example.com"])
    );

    let storage = storage_with(Some(r#"["https://a.com"]"#));
    let store = store_over(storage.clone(), None);
    let input = ScriptedQuickInput::new(answers());
    let outcome = TrustDecisionFlow::new(&store, &input)
        .with_strict_add(true)
        .run()
        .await?;
    assert_eq!(outcome, FlowOutcome::Unchanged);
    assert_eq!(
        raw_stored(storage.as_ref()),
        Some(r#"["https://a.com"]"#.to_string())
    );
    Ok(())
}

#[tokio::test]
async fn test_concurrent_invocations_do_not_lose_updates() -> Result<()> {
    let storage = storage_with(Some(r#"["https://a.com"]"#));
    let service = Arc::new(TrustedDomainService::new(storage.clone(), None, false));

    let mut tasks = Vec::new();
    for domain in ["https://b.com", "https://c.com", "https://d.com"] {
        let service = service.clone();
        tasks.push(tokio::spawn(async move {
            let input = ScriptedQuickInput::new([
                pick(ConfigureTrustedDomainAction::Add.id()),
                ScriptedAnswer::Input(Some(domain.to_string())),
            ]);
            service.configure(&input).await
        }));
    }
    for task in tasks {
        task.await??;
    }

    let stored = stored_list(raw_stored(storage.as_ref()));
    assert_eq!(stored.len(), 4);
    for domain in ["https://a.com", "https://b.com", "https://c.com", "https://d.com"] {
        assert!(stored.entries().iter().any(|e| e == domain), "missing {domain}");
    }
    Ok(())
}

#[tokio::test]
async fn test_flow_over_file_storage_survives_reopen() -> Result<()> {
    let temp_dir = tempfile::TempDir::new()?;

    {
        let storage = Arc::new(JsonFileStorage::new(temp_dir.path())?);
        let service = TrustedDomainService::new(storage, Some(list(&["https://d.com"])), false);
        let input = ScriptedQuickInput::new([
            pick("add"),
            ScriptedAnswer::Input(Some("https://e.com".to_string())),
        ]);
        service.configure(&input).await?;
    }

    let storage = Arc::new(JsonFileStorage::new(temp_dir.path())?);
    let service = TrustedDomainService::new(storage, Some(list(&["https://d.com"])), false);
    assert_eq!(
        service.current()?,
        (list(&["https://d.com", "https://e.com"]), DomainSource::Stored)
    );
    assert!(service.is_trusted("https://e.com/path")?);
    assert!(!service.is_trusted("https://evil.com")?);
    Ok(())
}

#[tokio::test]
async fn test_long_lived_service_sees_writes_from_another_instance() -> Result<()> {
    let temp_dir = tempfile::TempDir::new()?;
    let first =
        TrustedDomainService::new(Arc::new(JsonFileStorage::new(temp_dir.path())?), None, false);
    let second =
        TrustedDomainService::new(Arc::new(JsonFileStorage::new(temp_dir.path())?), None, false);

    assert_eq!(first.current()?, (list(&[]), DomainSource::Empty));

    let input = ScriptedQuickInput::new([
        pick("add"),
        ScriptedAnswer::Input(Some("https://b.com".to_string())),
    ]);
    second.configure(&input).await?;

    assert_eq!(first.current()?, (list(&["https://b.com"]), DomainSource::Stored));

    // The first instance builds on the second's write
    let input = ScriptedQuickInput::new([pick("toggleAll")]);
    first.configure(&input).await?;
    assert_eq!(second.current()?.0, list(&["https://b.com", "*"]));
    Ok(())
}
