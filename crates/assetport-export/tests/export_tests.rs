//! End-to-end exports over a recorded scene snapshot.

use assetport_core::{AssetError, NodeId, Scene};
use assetport_export::{
    closing_message, run, AssetBundle, Command, Content, ExportOptions, ExportTarget, Outcome,
    SUCCESS_MESSAGE,
};
use assetport_manifest::{ColorEncoding, JsonStyle};
use serde_json::Value;

const FIXTURE: &str = include_str!("fixtures/mobile.json");

fn load() -> (Scene, ExportTarget) {
    let scene = Scene::from_json(FIXTURE).unwrap();
    let target = ExportTarget::first_page(&scene).unwrap();
    (scene, target)
}

fn find(scene: &Scene, name: &str) -> NodeId {
    scene
        .find_one(scene.roots()[0], |node| node.name == name)
        .unwrap()
}

fn complete(command: Command, scene: &Scene, target: &ExportTarget, options: &ExportOptions) -> AssetBundle {
    let result = pollster::block_on(run(command, scene, scene, target, options));
    assert_eq!(closing_message(&result), SUCCESS_MESSAGE);
    match result {
        Ok(Outcome::Completed(bundle)) => bundle,
        other => panic!("unexpected outcome: {:?}", other),
    }
}

fn json(bundle: &AssetBundle, path: &str) -> Value {
    let text = bundle
        .get(path)
        .and_then(Content::as_text)
        .unwrap_or_else(|| panic!("missing {}", path));
    serde_json::from_str(text).unwrap()
}

#[test]
fn test_frame_export_paths() {
    let (scene, target) = load();
    let target = target.with_selection(vec![find(&scene, "Illustrations")]);
    let bundle = complete(Command::ExportToXcode, &scene, &target, &ExportOptions::new());

    assert_eq!(bundle.output_name(), "Illustrations.xcassets");
    let paths: Vec<&str> = bundle.paths().collect();
    assert_eq!(
        paths,
        vec![
            "Illustrations.xcassets/Onboarding/welcome.imageset/Contents.json",
            "Illustrations.xcassets/Onboarding/hero.imageset/Contents.json",
            "Illustrations.xcassets/badge.imageset/Contents.json",
            "Illustrations.xcassets/Onboarding/welcome.imageset/welcome.pdf",
            "Illustrations.xcassets/Onboarding/hero.imageset/hero-light.pdf",
            "Illustrations.xcassets/Onboarding/hero.imageset/hero-dark.pdf",
            "Illustrations.xcassets/badge.imageset/badge.pdf",
        ]
    );

    let hero = json(&bundle, "Illustrations.xcassets/Onboarding/hero.imageset/Contents.json");
    assert_eq!(hero["images"][0]["filename"], "hero-light.pdf");
    assert_eq!(hero["images"][1]["appearances"][0]["value"], "dark");
    assert_eq!(hero["properties"]["preserves-vector-representation"], true);
    assert_eq!(hero["info"]["author"], "xcode");
    assert_eq!(
        bundle
            .get("Illustrations.xcassets/badge.imageset/badge.pdf")
            .map(Content::as_bytes),
        Some(&[6u8][..])
    );
}

#[test]
fn test_frame_export_requires_frame_selection() {
    let (scene, target) = load();
    let target = target.with_selection(vec![find(&scene, "welcome")]);
    let result = pollster::block_on(run(
        Command::ExportToXcode,
        &scene,
        &scene,
        &target,
        &ExportOptions::new(),
    ));
    assert_eq!(closing_message(&result), "Please select a frame to export.");
}

#[test]
fn test_icon_image_sets() {
    let (scene, target) = load();
    let bundle = complete(Command::ExportIconsToXcode, &scene, &target, &ExportOptions::new());

    assert_eq!(bundle.output_name(), "Mobile.xcassets");
    let back = json(&bundle, "Mobile/Icons/Navigation/back.imageset/Contents.json");
    let images = back["images"].as_array().unwrap();
    assert_eq!(images.len(), 3);
    assert_eq!(images[0]["filename"], "back-light.pdf");
    assert_eq!(images[0]["language-direction"], "left-to-right");
    assert_eq!(images[1]["filename"], "back-dark.pdf");
    assert_eq!(images[1]["language-direction"], "left-to-right");
    assert_eq!(images[2]["filename"], "back-rtl-light.pdf");
    assert_eq!(images[2]["language-direction"], "right-to-left");

    let close = json(&bundle, "Mobile/Icons/Close.imageset/Contents.json");
    assert_eq!(close["images"][1]["filename"], "Close-de-light.pdf");
    assert_eq!(close["images"][1]["locale"], "de");
    assert!(close["images"][0].get("language-direction").is_none());

    assert!(bundle.get("Mobile/Icons/Navigation/back.imageset/back-rtl-dark.pdf").is_none());
    assert_eq!(
        bundle
            .get("Mobile/Icons/Navigation/back.imageset/back-dark.pdf")
            .map(Content::as_bytes),
        Some(&b"%PDF-d"[..])
    );
}

#[test]
fn test_icon_manifest_uses_xcode_json_style() {
    let (scene, target) = load();
    let bundle = complete(Command::ExportIconsToXcode, &scene, &target, &ExportOptions::new());
    let text = bundle
        .get("Mobile/Icons/Close.imageset/Contents.json")
        .and_then(Content::as_text)
        .unwrap();
    assert!(text.contains("\"filename\" : \"Close-light.pdf\""));
    assert!(!text.contains("\":"));
}

#[test]
fn test_android_drawables() {
    let (scene, target) = load();
    let bundle = complete(Command::ExportIconsToAndroid, &scene, &target, &ExportOptions::new());

    assert_eq!(bundle.output_name(), "Mobile-android");
    let paths: Vec<&str> = bundle.paths().collect();
    assert_eq!(
        paths,
        vec![
            "res/drawable/back.xml",
            "res/drawable-night/back.xml",
            "res/drawable/close.xml",
            "res/drawable-de/close.xml",
        ]
    );

    let back = bundle.get("res/drawable/back.xml").and_then(Content::as_text).unwrap();
    insta::assert_snapshot!(back, @r###"
    <vector xmlns:android="http://schemas.android.com/apk/res/android"
        android:width="24dp"
        android:height="24dp"
        android:viewportWidth="24"
        android:viewportHeight="24"
        android:autoMirrored="true">
        <path
            android:pathData="M15 18l-6-6 6-6"
            android:strokeColor="#000000"
            android:strokeWidth="2"/>
    </vector>
    "###);

    let close = bundle.get("res/drawable/close.xml").and_then(Content::as_text).unwrap();
    assert!(close.contains(r#"android:fillAlpha="0.8""#));
    assert!(!close.contains("autoMirrored"));
}

#[test]
fn test_xcode_color_sets() {
    let (scene, target) = load();
    let options = ExportOptions::new()
        .with_json_style(JsonStyle::Standard)
        .with_color_encoding(ColorEncoding::Hex);
    let bundle = complete(Command::ExportColorsToXcode, &scene, &target, &options);

    let paths: Vec<&str> = bundle.paths().collect();
    assert_eq!(
        paths,
        vec![
            "Mobile/Colors/Primary.colorset/Contents.json",
            "Mobile/Colors/Surfaces/Background.colorset/Contents.json",
        ]
    );

    let primary = json(&bundle, "Mobile/Colors/Primary.colorset/Contents.json");
    let light = &primary["colors"][0];
    let dark = &primary["colors"][1];
    assert_eq!(light["appearances"][0]["value"], "light");
    assert_eq!(light["color"]["color-space"], "srgb");
    assert_eq!(light["color"]["components"]["red"], "0xFF");
    assert_eq!(light["color"]["components"]["green"], "0x80");
    assert_eq!(dark["appearances"][0]["value"], "dark");
    assert_eq!(dark["color"]["components"]["alpha"], "0.500");
}

#[test]
fn test_android_colors() {
    let (scene, target) = load();
    let bundle = complete(Command::ExportColorsToAndroid, &scene, &target, &ExportOptions::new());

    let light = bundle.get("res/values/colors.xml").and_then(Content::as_text).unwrap();
    insta::assert_snapshot!(light, @r###"
    <?xml version="1.0" encoding="utf-8"?>
    <resources>
        <color name="primary">#FF8000</color>
        <color name="background">#FFFFFF</color>
    </resources>
    "###);
    let dark = bundle.get("res/values-night/colors.xml").and_then(Content::as_text).unwrap();
    assert!(dark.contains(r#"<color name="primary">#80000000</color>"#));
    assert!(dark.contains(r#"<color name="background">#000000</color>"#));
}

#[test]
fn test_duplicate_color_names_abort_run() {
    let doubled = FIXTURE.replace("\"Background\"", "\"Primary\"");
    let scene = Scene::from_json(&doubled).unwrap();
    let target = ExportTarget::first_page(&scene).unwrap();

    for command in [Command::ExportColorsToXcode, Command::ExportColorsToAndroid] {
        let result = pollster::block_on(run(command, &scene, &scene, &target, &ExportOptions::new()));
        assert!(matches!(&result, Err(AssetError::DuplicateNames { names }) if names == &["Primary".to_string()]
            || names == &["primary".to_string()]));
    }
    let result = pollster::block_on(run(
        Command::ExportColorsToXcode,
        &scene,
        &scene,
        &target,
        &ExportOptions::new(),
    ));
    assert_eq!(closing_message(&result), "Duplicate color names: Primary");
}

#[test]
fn test_nothing_to_export_without_icons_frame() {
    let renamed = FIXTURE.replace("\"name\": \"Icons\"", "\"name\": \"Glyphs\"");
    let scene = Scene::from_json(&renamed).unwrap();
    let target = ExportTarget::first_page(&scene).unwrap();

    let result = pollster::block_on(run(
        Command::ExportIconsToAndroid,
        &scene,
        &scene,
        &target,
        &ExportOptions::new(),
    ));
    assert!(matches!(result, Ok(Outcome::NothingToExport(_))));
    assert!(closing_message(&result).starts_with("Nothing to export"));

    let options = ExportOptions::from_json(r#"{"icons-frame": "Glyphs"}"#).unwrap();
    let bundle = complete(Command::ExportIconsToAndroid, &scene, &target, &options);
    assert_eq!(bundle.len(), 4);
}

#[test]
fn test_export_failure_aborts_batch() {
    // The hidden $rtl-dark layer has no recorded payload; unhide it so it joins the batch.
    let unhidden = FIXTURE.replace("\"visible\": false,", "");
    let scene = Scene::from_json(&unhidden).unwrap();
    let target = ExportTarget::first_page(&scene).unwrap();

    let result = pollster::block_on(run(
        Command::ExportIconsToXcode,
        &scene,
        &scene,
        &target,
        &ExportOptions::new(),
    ));
    assert!(matches!(result, Err(AssetError::Export { .. })));
    assert_eq!(closing_message(&result), "Error exporting layers.");
}
