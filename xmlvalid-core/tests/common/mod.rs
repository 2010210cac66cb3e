use std::path::{Path, PathBuf};

use libxml::parser::Parser;
use libxml::tree::Document;

#[allow(dead_code)]
pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[allow(dead_code)]
pub fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(fixture(name)).expect("read fixture")
}

#[allow(dead_code)]
pub fn parse_fixture(name: &str) -> Document {
    Parser::default()
        .parse_string(read_fixture(name))
        .expect("parse fixture XML")
}

#[allow(dead_code)]
pub fn order_schema() -> PathBuf {
    fixture("order.xsd")
}
