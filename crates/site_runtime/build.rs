use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct CountryLanguage {
    name: String,
    code: String,
    language: String,
}

#[derive(Debug, Deserialize)]
struct LanguageTable {
    schema_version: u32,
    fallback_language: String,
    country: Vec<CountryLanguage>,
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let path = crate_root.join("country_languages.toml");
    println!("cargo:rerun-if-changed={}", path.display());

    let raw = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
    let mut table: LanguageTable = toml::from_str(&raw)
        .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()));
    if table.schema_version != 1 {
        panic!(
            "language table schema mismatch in {}: expected 1 found {}",
            path.display(),
            table.schema_version
        );
    }
    if table.fallback_language.is_empty() {
        panic!("language table in {} has no fallback_language", path.display());
    }

    table
        .country
        .sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    for pair in table.country.windows(2) {
        if pair[0].name.eq_ignore_ascii_case(&pair[1].name) {
            panic!("duplicate country `{}` in {}", pair[0].name, path.display());
        }
    }

    let mut generated = String::new();
    generated.push_str("/// Build-time generated fallback search language.\n");
    generated.push_str(&format!(
        "pub const FALLBACK_LANGUAGE: &str = {:?};\n\n",
        table.fallback_language
    ));
    generated.push_str(
        "/// Build-time generated `(country name, ISO code, language)` rows, sorted by name.\n",
    );
    generated.push_str("pub const COUNTRY_LANGUAGES: &[(&str, &str, &str)] = &[\n");
    for row in &table.country {
        generated.push_str(&format!(
            "    ({:?}, {:?}, {:?}),\n",
            row.name, row.code, row.language
        ));
    }
    generated.push_str("];\n");

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("country_languages_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
