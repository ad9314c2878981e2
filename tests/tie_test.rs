//! Tests for the `Tie` facade: render, iterate, render_tree and locale switching

use rstest::{fixture, rstest};

use ::tie::domain::walker::Child;
use ::tie::domain::{NodeRef, RenderError};
use ::tie::infrastructure::parser::from_yaml_str;
use ::tie::util::testing;
use ::tie::{Args, Placeholder, RenderedNode, Tie, TieOptions};

const CATALOG: &str = r#"
tie:
  version: "0.1"
  default_locale: en
$greeting:
  en: Hello
  fr: Bonjour
$brand: Tie
subscribe:
  wrap: "👋 {greeting}! {}!"
  en-US: "Subscribe to {channel} channel"
  fr: "Abonnez-vous à {channel}"
+menu:
  open:
    en: Open
    fr: Ouvrir
    ja: 開く
  close:
    en: Close {brand}
  +file:
    save:
      en: Save {}
welcome:
  en: "Welcome, {name}"
  defaults:
    name: guest
"#;

#[fixture]
fn tie() -> Tie {
    testing::init_test_setup();
    let document = from_yaml_str(CATALOG).expect("parse catalog");
    Tie::from_document(&document).expect("build tie")
}

#[rstest]
fn given_wrapped_entry_when_rendering_en_us_then_greeting_and_inner_combined(tie: Tie) {
    // Arrange
    let args = Args::new().with("channel", "X");

    // Act
    let text = tie.render("subscribe", Some("en-US"), &args).unwrap();

    // Assert
    assert_eq!(text, "👋 Hello! Subscribe to X channel!");
}

#[rstest]
fn given_wrapped_entry_when_rendering_fr_then_global_follows_locale(tie: Tie) {
    let args = Args::new().with("channel", "Y");

    let text = tie.render("subscribe", Some("fr-FR"), &args).unwrap();

    assert_eq!(text, "👋 Bonjour! Abonnez-vous à Y!");
}

#[rstest]
fn given_argument_with_braces_when_rendering_wrap_then_value_not_rescanned(tie: Tie) {
    let args = Args::new().with("channel", "{greeting}");

    let text = tie.render("subscribe", Some("en-US"), &args).unwrap();

    assert_eq!(text, "👋 Hello! Subscribe to {greeting} channel!");
}

#[rstest]
fn given_missing_argument_when_rendering_then_unresolved_placeholder(tie: Tie) {
    let err = tie
        .render("subscribe", Some("en-US"), &Args::new())
        .unwrap_err();

    assert_eq!(
        err.placeholder(),
        Some(&Placeholder::Named("channel".to_string()))
    );
}

#[rstest]
fn given_default_value_when_rendering_then_args_override_defaults(tie: Tie) {
    assert_eq!(
        tie.render("welcome", None, &Args::new()).unwrap(),
        "Welcome, guest"
    );
    assert_eq!(
        tie.render("welcome", None, &Args::new().with("name", "Ann"))
            .unwrap(),
        "Welcome, Ann"
    );
}

#[rstest]
fn given_nested_path_when_rendering_then_positional_and_globals_resolved(tie: Tie) {
    assert_eq!(
        tie.render("menu.file.save", None, &Args::new().arg("draft"))
            .unwrap(),
        "Save draft"
    );
    assert_eq!(
        tie.render("menu.close", None, &Args::new()).unwrap(),
        "Close Tie"
    );
}

#[rstest]
fn given_unknown_locale_when_rendering_then_falls_back_to_default(tie: Tie) {
    let text = tie.render("menu.open", Some("de-CH"), &Args::new()).unwrap();

    assert_eq!(text, "Open");
}

#[rstest]
#[case("menu.missing")]
#[case("nope")]
#[case("welcome.name")]
fn given_bad_path_when_rendering_then_path_not_found(tie: Tie, #[case] path: &str) {
    let err = tie.render(path, None, &Args::new()).unwrap_err();

    assert!(
        matches!(err, RenderError::PathNotFound { .. }),
        "unexpected error: {err:?}"
    );
}

#[rstest]
fn given_section_path_when_rendering_then_not_renderable(tie: Tie) {
    let err = tie.render("menu", None, &Args::new()).unwrap_err();

    assert!(matches!(err, RenderError::NotRenderable { .. }));
}

#[rstest]
fn given_paths_when_navigating_then_typed_nodes(tie: Tie) {
    assert!(matches!(tie.navigate("").unwrap(), NodeRef::Section(_)));
    assert!(matches!(tie.navigate("menu.file").unwrap(), NodeRef::Section(_)));
    assert!(matches!(tie.navigate("menu.open").unwrap(), NodeRef::Entry(_)));
}

#[rstest]
fn given_section_when_iterating_then_indices_follow_document_order(tie: Tie) {
    // Act
    let children: Vec<(usize, String, bool)> = tie
        .iterate("menu", None)
        .unwrap()
        .map(|(i, child)| (i, child.key().to_string(), child.is_section()))
        .collect();

    // Assert
    assert_eq!(
        children,
        [
            (0, "open".to_string(), false),
            (1, "close".to_string(), false),
            (2, "file".to_string(), true),
        ]
    );
}

#[rstest]
fn given_iteration_when_restarted_then_fresh_sequence(tie: Tie) {
    let first: Vec<usize> = tie.iterate("", None).unwrap().map(|(i, _)| i).collect();
    let second: Vec<usize> = tie.iterate("", None).unwrap().map(|(i, _)| i).collect();

    assert_eq!(first, second);
    assert_eq!(first, [0, 1, 2]);
}

#[rstest]
fn given_iteration_started_when_locale_changes_then_captured_locale_kept(mut tie: Tie) {
    // Arrange
    tie.set_locale("fr");
    let children: Vec<_> = tie.iterate("menu", None).unwrap().collect();
    let open = children[0].1.as_renderable().cloned().unwrap();

    // Act
    let switched = tie.with_locale("ja");

    // Assert
    assert_eq!(open.render(&Args::new()).unwrap(), "Ouvrir");
    assert_eq!(switched.render("menu.open", None, &Args::new()).unwrap(), "開く");
}

#[rstest]
fn given_nested_section_child_when_iterating_further_then_entries_renderable(tie: Tie) {
    let file = tie
        .iterate("menu", None)
        .unwrap()
        .find_map(|(_, child)| match child {
            Child::Section(view) => Some(view),
            Child::Entry(_) => None,
        })
        .unwrap();

    let texts: Vec<String> = file
        .iter()
        .filter_map(|(_, child)| child.as_renderable().map(|r| r.render(&Args::new().arg(1))))
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(texts, ["Save 1"]);
}

#[rstest]
fn given_tree_when_rendering_whole_tree_then_matches_single_renders(tie: Tie) {
    // Arrange
    let args = Args::new().with("channel", "X").arg("doc");
    let tie = tie.with_locale("en-US");

    // Act
    let rendered = tie.render_tree(&args).unwrap();

    // Assert
    for (path, text) in rendered.leaves() {
        if path.starts_with('$') {
            continue;
        }
        assert_eq!(tie.render(&path, None, &args).unwrap(), text, "path {path}");
    }
    assert_eq!(
        rendered.get_path(["menu", "file", "save"]),
        Some(&RenderedNode::Text("Save doc".to_string()))
    );
    assert_eq!(rendered.get("$brand").and_then(RenderedNode::as_text), Some("Tie"));
}

#[rstest]
fn given_missing_arg_when_rendering_whole_tree_then_fails_atomically(tie: Tie) {
    let result = tie.with_locale("en-US").render_tree(&Args::new());

    assert!(matches!(
        result,
        Err(RenderError::UnresolvedPlaceholder { .. })
    ));
}

#[rstest]
fn given_same_inputs_when_rendering_twice_then_identical(tie: Tie) {
    let args = Args::new().with("channel", "X").arg("doc");
    let tie = tie.with_locale("en-US");

    let first = tie.render_tree(&args).unwrap();
    let second = tie.render_tree(&args).unwrap();

    assert_eq!(first, second);
}

#[rstest]
fn given_subtree_when_rendering_at_path_then_only_that_section(tie: Tie) {
    let rendered = tie
        .render_tree_at("menu.file", &Args::new().arg("x"))
        .unwrap();

    assert_eq!(
        serde_json::to_string(&rendered).unwrap(),
        r#"{"save":"Save x"}"#
    );
}

#[rstest]
fn given_facade_when_setting_locale_then_chainable(mut tie: Tie) {
    let locale = tie.set_locale("fr").set_locale("ja").locale().to_string();

    assert_eq!(locale, "ja");
    assert_eq!(tie.default_locale(), "en");
}

#[rstest]
fn given_malformed_tag_when_try_setting_locale_then_rejected(mut tie: Tie) {
    let err = tie.try_set_locale("English").unwrap_err();

    assert_eq!(err, RenderError::InvalidLocale("English".to_string()));
    assert_eq!(tie.locale(), "en");
}

#[rstest]
fn given_bare_locale_when_only_tagged_variant_exists_then_missing_translation(tie: Tie) {
    let err = tie
        .render("subscribe", Some("en"), &Args::new().with("channel", "X"))
        .unwrap_err();

    assert!(matches!(err, RenderError::MissingTranslation { .. }));
}

#[rstest]
fn given_document_when_listing_locales_then_sorted_union(tie: Tie) {
    let locales: Vec<String> = tie.available_locales().into_iter().collect();

    assert_eq!(locales, ["en", "en-US", "fr", "ja"]);
}

#[test]
fn given_explicit_default_locale_when_building_then_overrides_document() {
    // Arrange
    let document = from_yaml_str(CATALOG).unwrap();
    let options = TieOptions {
        default_locale: Some("fr".to_string()),
        locale: Some("de".to_string()),
        ..TieOptions::default()
    };

    // Act
    let tie = Tie::with_options(&document, &options).unwrap();

    // Assert
    assert_eq!(tie.default_locale(), "fr");
    assert_eq!(tie.locale(), "de");
    assert_eq!(tie.render("menu.open", None, &Args::new()).unwrap(), "Ouvrir");
}

#[test]
fn given_shared_tie_when_rendering_from_threads_then_consistent() {
    let document = from_yaml_str(CATALOG).unwrap();
    let tie = Tie::from_document(&document).unwrap();

    let results: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = ["en", "fr", "ja"]
            .into_iter()
            .map(|locale| {
                let tie = &tie;
                scope.spawn(move || tie.render("menu.open", Some(locale), &Args::new()).unwrap())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(results, ["Open", "Ouvrir", "開く"]);
}
