//! Full option-to-graph runs through `generate`.

use std::borrow::Cow;
use std::sync::Arc;

use async_trait::async_trait;
use crx_bundler::{
    CrxPlugin, OutputFormat, PluginPhase, SharedPlugin, generate, output_file_name,
    resolve_content_entries,
};
use crx_config::{ExtensionOptions, Mode};
use serde_json::json;

fn scenario() -> ExtensionOptions {
    ExtensionOptions::from_value(json!({
        "name": "scenario",
        "background": ["bg/index.ts"],
        "content": [{ "matches": ["<all_urls>"], "js": ["content/entry.ts"] }],
        "outDir": "dist"
    }))
    .unwrap()
    .with_root("/work/ext")
}

#[test]
fn scenario_produces_expected_graph() {
    let generated = generate(&scenario(), Vec::new(), Mode::Production).unwrap();

    assert_eq!(
        generated.background_entries.iter().collect::<Vec<_>>(),
        [("bg", "bg/index.ts")]
    );
    assert_eq!(
        generated.manifest["content_scripts"],
        json!([{ "matches": ["<all_urls>"], "js": ["entry.js"] }])
    );
    assert_eq!(
        generated.manifest["background"],
        json!({ "page": "background.html" })
    );
    assert!(
        generated
            .background_html
            .contains(r#"<script type="module" src="bg.js"></script>"#)
    );
    assert_eq!(generated.out_dir, std::path::PathBuf::from("/work/ext/dist"));
}

#[test]
fn builds_are_content_first_background_last() {
    let options = ExtensionOptions::from_value(json!({
        "background": ["bg/index.ts", "bg/worker.ts"],
        "content": ["a/index.ts", "b/index.ts"]
    }))
    .unwrap();
    let generated = generate(&options, Vec::new(), Mode::Production).unwrap();

    let formats: Vec<_> = generated
        .builds
        .iter()
        .map(|build| build.output.format)
        .collect();
    assert_eq!(
        formats,
        [OutputFormat::Cjs, OutputFormat::Cjs, OutputFormat::Esm]
    );

    let background = generated.background_build().unwrap();
    assert_eq!(background.output_files(), ["bg.js", "worker.js"]);
}

#[test]
fn manifest_and_build_file_names_agree() {
    let content = json!([
        { "matches": ["https://a.dev/*"], "js": ["a/index.ts", "shared/util.ts"] },
        { "matches": ["https://b.dev/*"], "js": ["b/main.ts"] }
    ]);
    let options = ExtensionOptions::from_value(json!({ "content": content })).unwrap();
    let generated = generate(&options, Vec::new(), Mode::Production).unwrap();

    let built: Vec<String> = generated
        .builds
        .iter()
        .flat_map(|build| build.output_files())
        .collect();

    let declared: Vec<String> = generated.manifest["content_scripts"]
        .as_array()
        .unwrap()
        .iter()
        .flat_map(|group| group["js"].as_array().cloned().unwrap_or_default())
        .map(|file| file.as_str().unwrap().to_string())
        .collect();

    assert_eq!(built, declared);

    let names = resolve_content_entries(options.content.as_ref().unwrap());
    for name in names.names() {
        assert!(declared.contains(&output_file_name(name)));
    }
}

#[test]
fn unrecognized_shapes_still_generate() {
    let options = ExtensionOptions::from_value(json!({
        "background": { "service_worker": "sw.ts" },
        "content": 12
    }))
    .unwrap();
    let generated = generate(&options, Vec::new(), Mode::Production).unwrap();

    assert!(generated.builds.is_empty());
    assert_eq!(generated.manifest["content_scripts"], json!([]));
    assert!(!generated.background_html.contains("<script"));
}

struct Minify;

#[async_trait]
impl CrxPlugin for Minify {
    fn name(&self) -> Cow<'static, str> {
        Cow::Borrowed("minify")
    }

    async fn transform(&self, code: &str, _id: &str) -> crx_bundler::Result<Option<String>> {
        Ok(Some(code.replace("  ", "")))
    }
}

struct Resolver;

#[async_trait]
impl CrxPlugin for Resolver {
    fn name(&self) -> Cow<'static, str> {
        Cow::Borrowed("resolver")
    }

    fn phase(&self) -> PluginPhase {
        PluginPhase::Resolve
    }
}

#[test]
fn user_plugins_are_ordered_and_shared_by_every_build() {
    let plugins: Vec<SharedPlugin> = vec![Arc::new(Minify), Arc::new(Resolver)];
    let options = ExtensionOptions::from_value(json!({
        "background": "bg.ts",
        "content": "c.ts"
    }))
    .unwrap();
    let generated = generate(&options, plugins, Mode::Development).unwrap();

    assert_eq!(
        generated.builds[0].plugin_names(),
        ["resolver", "minify", "crx:reload"]
    );
    assert_eq!(
        generated.builds[1].plugin_names(),
        ["resolver", "minify", "crx:reload"]
    );

    let serialized: serde_json::Value =
        serde_json::from_str(&generated.builds_json().unwrap()).unwrap();
    assert_eq!(
        serialized[1]["plugins"],
        json!(["resolver", "minify", "crx:reload"])
    );
}
