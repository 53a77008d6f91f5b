/*!
 * Tests for file system operations
 */

use std::path::PathBuf;

use mptranslate::file_utils::FileManager;

use crate::common;

/// Test output path generation inserts the language tag before the extension
#[test]
fn test_generateOutputPath_withVariousInputs_shouldInsertLanguageTag() {
    let path = FileManager::generate_output_path("plugins/Shop/messages.yml", "out", "zh-TW");
    assert_eq!(path, PathBuf::from("out/messages.zh-TW.yml"));

    let path = FileManager::generate_output_path("lang/en_us.json", "lang", "fr");
    assert_eq!(path, PathBuf::from("lang/en_us.fr.json"));
}

/// Test locale file discovery walks nested directories and sorts results
#[test]
fn test_findLocaleFiles_withNestedTree_shouldReturnSortedLocaleFilesOnly() {
    let temp_dir = common::create_temp_dir().unwrap();
    let dir = temp_dir.path().to_path_buf();

    common::create_test_file(&dir, "zz.yml", "k: v").unwrap();
    common::create_test_file(&dir, "aa.json", "{}").unwrap();
    common::create_test_file(&dir, "readme.txt", "not a locale").unwrap();
    std::fs::create_dir(dir.join("sub")).unwrap();
    common::create_test_file(&dir.join("sub"), "mid.yaml", "k: v").unwrap();

    let files = FileManager::find_locale_files(&dir).unwrap();
    assert_eq!(files.len(), 3);
    // Sorted, so the run order over a folder is deterministic
    let names: Vec<String> = files.iter()
        .map(|p| p.strip_prefix(&dir).unwrap().to_string_lossy().to_string())
        .collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
}

/// Test existence helpers distinguish files from directories
#[test]
fn test_existenceChecks_shouldDistinguishFilesAndDirs() {
    let temp_dir = common::create_temp_dir().unwrap();
    let dir = temp_dir.path().to_path_buf();
    let file = common::create_test_file(&dir, "a.yml", "k: v").unwrap();

    assert!(FileManager::file_exists(&file));
    assert!(!FileManager::file_exists(&dir));
    assert!(FileManager::dir_exists(&dir));
    assert!(!FileManager::dir_exists(&file));
}

/// Test write creates missing parent directories
#[test]
fn test_writeToFile_withMissingParents_shouldCreateThem() {
    let temp_dir = common::create_temp_dir().unwrap();
    let target = temp_dir.path().join("a/b/c/messages.yml");

    FileManager::write_to_file(&target, "key: value").unwrap();
    assert_eq!(FileManager::read_to_string(&target).unwrap(), "key: value");
}
