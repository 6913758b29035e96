#![allow(dead_code)]

use flate2::Compression;
use flate2::write::GzEncoder;
use sha2::{Digest, Sha256};
use starbase_sandbox::Sandbox;
use std::collections::HashMap;
use std::ops::Deref;
use std::path::PathBuf;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const ARCHIVE_PATH: &str = "/golang/go1.20.linux-amd64.tar.gz";

pub struct GoenvSandbox {
    pub sandbox: Sandbox,
}

impl GoenvSandbox {
    pub fn new(mut sandbox: Sandbox, server: &MockServer) -> Self {
        apply_settings(&mut sandbox, server);

        Self { sandbox }
    }

    pub fn with_env(mut self, key: &str, value: &str) -> Self {
        self.sandbox
            .settings
            .env
            .insert(key.to_owned(), value.to_owned());
        self
    }

    /// Root of the Go environment created by the binary.
    pub fn env_root(&self) -> PathBuf {
        self.sandbox.path().join("goenv")
    }
}

impl Deref for GoenvSandbox {
    type Target = Sandbox;

    fn deref(&self) -> &Self::Target {
        &self.sandbox
    }
}

fn apply_settings(sandbox: &mut Sandbox, server: &MockServer) {
    let mut env = HashMap::new();
    env.insert("RUST_BACKTRACE", "1".to_owned());
    env.insert("NO_COLOR", "1".to_owned());
    env.insert("GOENV_LOG", "debug".to_owned());
    env.insert("GOENV_DOWNLOAD_HOST", server.uri());
    env.insert("GOENV_VERSION_URL", format!("{}/VERSION", server.uri()));
    env.insert("GOENV_PLATFORM", "linux".to_owned());
    env.insert("GOENV_ARCH", "amd64".to_owned());

    sandbox.settings.bin = "goenv".into();
    sandbox.settings.timeout = 120;

    sandbox
        .settings
        .env
        .extend(env.into_iter().map(|(k, v)| (k.to_owned(), v)));
}

pub fn create_goenv_sandbox(server: &MockServer) -> GoenvSandbox {
    GoenvSandbox::new(starbase_sandbox::create_empty_sandbox(), server)
}

pub fn output_to_string(data: &[u8]) -> String {
    String::from_utf8_lossy(data).to_string()
}

pub fn create_go_archive(version: &str) -> Vec<u8> {
    let mut builder = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::default()));

    for (name, data, mode) in [
        ("go/VERSION", format!("go{version}").into_bytes(), 0o644),
        ("go/bin/go", b"#!/bin/sh\necho go\n".to_vec(), 0o755),
    ] {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(mode);
        header.set_cksum();

        builder.append_data(&mut header, name, data.as_slice()).unwrap();
    }

    builder.into_inner().unwrap().finish().unwrap()
}

/// Serve the archive along with its published checksum.
pub async fn mock_distribution(server: &MockServer, archive: Vec<u8>, times: u64) {
    let hash = format!("{:x}", Sha256::digest(&archive));

    Mock::given(method("GET"))
        .and(path(ARCHIVE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(archive))
        .expect(times)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("{ARCHIVE_PATH}.sha256")))
        .respond_with(ResponseTemplate::new(200).set_body_string(hash))
        .mount(server)
        .await;
}
