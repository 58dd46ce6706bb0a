use stagehand_util::hash::{md5_bytes, sha1_bytes, sha256_bytes, sha256_file};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn sha256_known_vector() {
    assert_eq!(
        sha256_bytes(b"hello world"),
        "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
    );
}

#[test]
fn sha1_known_vector() {
    assert_eq!(
        sha1_bytes(b"hello world"),
        "2aae6c35c94fcfb415dbe95f408b9ce91ee846ed"
    );
}

#[test]
fn md5_known_vector() {
    assert_eq!(md5_bytes(b"hello world"), "5eb63bbbe01eeed093cb22bb8f5acdc3");
}

#[test]
fn file_and_bytes_digests_agree() {
    let mut tmp = NamedTempFile::new().unwrap();
    tmp.write_all(b"artifact payload").unwrap();
    tmp.flush().unwrap();

    assert_eq!(
        sha256_file(tmp.path()).unwrap(),
        sha256_bytes(b"artifact payload")
    );
}

#[test]
fn empty_input() {
    assert_eq!(
        sha256_bytes(b""),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}
