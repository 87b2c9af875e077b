#![allow(dead_code)]

use assert_cmd::Command;
use std::io::Read;
use std::path::Path;

/// Build a `kit` command running inside the given repository directory.
pub fn kit_cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("kit").expect("failed to find kit binary");
    cmd.current_dir(dir);
    cmd
}

/// Read the current HEAD commit id, trimmed.
pub fn read_head(dir: &Path) -> String {
    std::fs::read_to_string(dir.join(".git/HEAD"))
        .expect("HEAD should exist")
        .trim()
        .to_string()
}

/// Read and decompress a stored object, returning the full
/// `<type> <len>\0<content>` envelope.
pub fn read_object(dir: &Path, oid: &str) -> Vec<u8> {
    let object_path = dir
        .join(".git/objects")
        .join(&oid[..2])
        .join(&oid[2..]);
    let compressed = std::fs::read(&object_path)
        .unwrap_or_else(|_| panic!("object {oid} should exist on disk"));

    let mut decoder = flate2::read::ZlibDecoder::new(compressed.as_slice());
    let mut envelope = Vec::new();
    decoder
        .read_to_end(&mut envelope)
        .expect("object should be zlib-compressed");
    envelope
}

/// Split a decompressed envelope into its header and content.
pub fn split_envelope(envelope: &[u8]) -> (String, Vec<u8>) {
    let nul = envelope
        .iter()
        .position(|&b| b == 0)
        .expect("envelope should contain a NUL separator");
    let header = String::from_utf8(envelope[..nul].to_vec()).unwrap();
    (header, envelope[nul + 1..].to_vec())
}
