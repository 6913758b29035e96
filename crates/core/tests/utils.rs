#![allow(dead_code)]

use flate2::Compression;
use flate2::write::GzEncoder;
use goenv_core::GoEnvironment;
use sha2::{Digest, Sha256};
use std::path::Path;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const ARCHIVE_PATH: &str = "/golang/go1.20.linux-amd64.tar.gz";

/// Build a tiny tarball that looks like a Go distribution.
pub fn create_go_archive(version: &str) -> Vec<u8> {
    let mut builder = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::default()));

    append_file(&mut builder, "go/VERSION", format!("go{version}").as_bytes(), 0o644);
    append_file(&mut builder, "go/bin/go", b"#!/bin/sh\necho go\n", 0o755);
    append_file(&mut builder, "go/src/runtime/runtime.go", b"package runtime\n", 0o644);

    builder.into_inner().unwrap().finish().unwrap()
}

fn append_file<W: std::io::Write>(builder: &mut tar::Builder<W>, name: &str, data: &[u8], mode: u32) {
    let mut header = tar::Header::new_gnu();
    header.set_size(data.len() as u64);
    header.set_mode(mode);
    header.set_cksum();

    builder.append_data(&mut header, name, data).unwrap();
}

pub fn sha256_hex(data: &[u8]) -> String {
    format!("{:x}", Sha256::digest(data))
}

pub fn create_env(root: &Path, server: &MockServer) -> GoEnvironment {
    let mut env = GoEnvironment::from(root);
    env.download_host = server.uri();
    env.version_url = format!("{}/VERSION", server.uri());
    env
}

pub async fn mock_archive(server: &MockServer, body: Vec<u8>, times: u64) {
    Mock::given(method("GET"))
        .and(path(ARCHIVE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
        .expect(times)
        .mount(server)
        .await;
}

pub async fn mock_checksum(server: &MockServer, body: String) {
    Mock::given(method("GET"))
        .and(path(format!("{ARCHIVE_PATH}.sha256")))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}
