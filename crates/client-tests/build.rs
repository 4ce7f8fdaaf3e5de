use anyhow::{Context, Result};
use opgen_common::GeneratorConfig;
use opgen_generator::OperationGenerator;
use opgen_parser::{load_model, ModuleResolver};
use std::env;
use std::path::{Path, PathBuf};

const MODEL: &str = "models/s3.json";

fn main() -> Result<()> {
    println!("cargo:rerun-if-changed={}", MODEL);

    let out_dir = PathBuf::from(env::var_os("OUT_DIR").context("OUT_DIR is not set")?);
    let model = load_model(Path::new(MODEL), &ModuleResolver::new("crate::types"))
        .with_context(|| format!("Failed to load {}", MODEL))?;

    let generator = OperationGenerator::new(GeneratorConfig::default())?;
    generator.generate_to_file(&model.api, &model.operations, &out_dir.join("s3.rs"))?;
    Ok(())
}
