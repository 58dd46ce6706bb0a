use stagehand_core::properties::{interpolate, load_properties};
use std::collections::BTreeMap;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn load_properties_with_comments_and_blank_lines() {
    let mut tmp = NamedTempFile::new().unwrap();
    write!(
        tmp,
        "# repository credentials\n\
         repositoryUsername=deployer\n\
         \n\
         repositoryPassword=s3cret\n\
         # signing\n\
         signingPassword  =  hunter2\n"
    )
    .unwrap();
    tmp.flush().unwrap();

    let props = load_properties(tmp.path()).unwrap();
    assert_eq!(
        props.get("repositoryUsername"),
        Some(&"deployer".to_string())
    );
    assert_eq!(props.get("repositoryPassword"), Some(&"s3cret".to_string()));
    assert_eq!(props.get("signingPassword"), Some(&"hunter2".to_string()));
    assert_eq!(props.len(), 3);
}

#[test]
fn load_properties_nonexistent_path_returns_empty_map() {
    let path = std::path::Path::new("/nonexistent/path/to/.stagehand.env");
    let props = load_properties(path).unwrap();
    assert!(props.is_empty());
}

#[test]
fn interpolate_prefers_properties_file() {
    let mut props = BTreeMap::new();
    props.insert("REPO_URL".to_string(), "https://props.example".to_string());
    std::env::set_var("REPO_URL", "https://env.example");

    let result = interpolate("url = ${env:REPO_URL}", &props);
    assert_eq!(result, "url = https://props.example");

    std::env::remove_var("REPO_URL");
}

#[test]
fn interpolate_missing_reference_becomes_empty() {
    let props = BTreeMap::new();
    let result = interpolate("key=${env:STAGEHAND_UNSET_VAR_99999}", &props);
    assert_eq!(result, "key=");
}

#[test]
fn interpolate_multiple_references() {
    let mut props = BTreeMap::new();
    props.insert("USER".to_string(), "deploy".to_string());
    props.insert("PASS".to_string(), "s3cret".to_string());

    let result = interpolate("u=${env:USER} p=${env:PASS}", &props);
    assert_eq!(result, "u=deploy p=s3cret");
}

#[test]
fn interpolate_without_placeholders_is_identity() {
    let props = BTreeMap::new();
    let input = "plain text with no placeholders";
    assert_eq!(interpolate(input, &props), input);
}
