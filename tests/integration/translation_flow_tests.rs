/*!
 * End-to-end locale translation tests
 *
 * These tests run the full pipeline through the controller with the offline
 * script-conversion provider, so no network access is needed.
 */

use mptranslate::app_config::{Config, TranslationConfig, TranslationProvider};
use mptranslate::app_controller::Controller;
use mptranslate::document::{DocumentFormat, DocumentNode};

use crate::common;

fn script_config(target_language: &str) -> Config {
    Config {
        target_language: target_language.to_string(),
        translation: TranslationConfig {
            provider: TranslationProvider::Script,
            ..TranslationConfig::default()
        },
        ..Config::default()
    }
}

/// Test one YAML file goes in simplified and comes out traditional with all
/// structure and reserved tokens intact
#[tokio::test]
async fn test_run_withYamlLocale_shouldConvertAndPreserveStructure() {
    let temp_dir = common::create_temp_dir().unwrap();
    let dir = temp_dir.path().to_path_buf();
    let input = common::create_test_file(
        &dir,
        "messages.yml",
        "error: \"&c错误: 无法开门\"\ngreeting: \"你好 %player_name%\"\nslots: 27\n",
    )
    .unwrap();

    let output_dir = dir.join("out");
    let controller = Controller::with_config(script_config("zh-TW")).unwrap();
    controller.run(input, output_dir.clone(), false).await.unwrap();

    let written = std::fs::read_to_string(output_dir.join("messages.zh-TW.yml")).unwrap();
    let doc = DocumentNode::parse(&written, DocumentFormat::Yaml).unwrap();
    let DocumentNode::Mapping(pairs) = &doc else { panic!("expected mapping") };

    let keys: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, vec!["error", "greeting", "slots"]);
    assert_eq!(pairs[0].1, DocumentNode::Text("&c错誤: 無法開門".to_string()));
    assert_eq!(pairs[1].1, DocumentNode::Text("你好 %player_name%".to_string()));
    assert_eq!(pairs[2].1, DocumentNode::Int(27));
}

/// Test JSON locale files run through the same pipeline
#[tokio::test]
async fn test_run_withJsonLocale_shouldConvertText() {
    let temp_dir = common::create_temp_dir().unwrap();
    let dir = temp_dir.path().to_path_buf();
    let input = common::create_test_file(
        &dir,
        "zh_cn.json",
        "{\"item.sword\": \"开门钥匙\", \"count\": 3}\n",
    )
    .unwrap();

    let output_dir = dir.join("out");
    let controller = Controller::with_config(script_config("zh-TW")).unwrap();
    controller.run(input, output_dir.clone(), false).await.unwrap();

    let written = std::fs::read_to_string(output_dir.join("zh_cn.zh-TW.json")).unwrap();
    assert!(written.contains("開門鑰匙") || written.contains("開門钥匙"));
    assert!(written.contains("\"count\": 3"));
}

/// Test a folder run processes every locale file and skips unrelated ones
#[tokio::test]
async fn test_runFolder_withMixedFiles_shouldTranslateAllLocales() {
    let temp_dir = common::create_temp_dir().unwrap();
    let dir = temp_dir.path().to_path_buf();
    common::create_test_file(&dir, "a.yml", "k: 开门\n").unwrap();
    common::create_test_file(&dir, "b.yaml", "k: 无法\n").unwrap();
    common::create_test_file(&dir, "notes.txt", "ignored\n").unwrap();

    let output_dir = dir.join("out");
    let controller = Controller::with_config(script_config("zh-TW")).unwrap();
    controller
        .run_folder(dir.clone(), output_dir.clone(), false)
        .await
        .unwrap();

    assert!(output_dir.join("a.zh-TW.yml").exists());
    assert!(output_dir.join("b.zh-TW.yaml").exists());
    assert!(!output_dir.join("notes.zh-TW.txt").exists());
}

/// Test an existing translation is left untouched unless forced
#[tokio::test]
async fn test_run_withForceOverwrite_shouldReplaceExistingOutput() {
    let temp_dir = common::create_temp_dir().unwrap();
    let dir = temp_dir.path().to_path_buf();
    let input = common::create_test_file(&dir, "messages.yml", "k: 开门\n").unwrap();

    let output_dir = dir.join("out");
    std::fs::create_dir_all(&output_dir).unwrap();
    let existing = output_dir.join("messages.zh-TW.yml");
    std::fs::write(&existing, "k: stale\n").unwrap();

    let controller = Controller::with_config(script_config("zh-TW")).unwrap();

    // Without force: skipped
    controller.run(input.clone(), output_dir.clone(), false).await.unwrap();
    assert_eq!(std::fs::read_to_string(&existing).unwrap(), "k: stale\n");

    // With force: replaced
    controller.run(input, output_dir, true).await.unwrap();
    assert!(std::fs::read_to_string(&existing).unwrap().contains("開門"));
}

/// Test the protected key subtree survives a full file run verbatim
#[tokio::test]
async fn test_run_withProtectedSubtree_shouldCopyItVerbatim() {
    let temp_dir = common::create_temp_dir().unwrap();
    let dir = temp_dir.path().to_path_buf();
    let input = common::create_test_locale(&dir, "menu.yml").unwrap();

    let output_dir = dir.join("out");
    let controller = Controller::with_config(script_config("zh-TW")).unwrap();
    controller.run(input, output_dir.clone(), false).await.unwrap();

    let written = std::fs::read_to_string(output_dir.join("menu.zh-TW.yml")).unwrap();
    assert!(written.contains("!has permission"));
    assert!(written.contains("%player_name%"));
    assert!(written.contains("[close]"));
}
