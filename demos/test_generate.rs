//! Test-generate demo - renders a template JSON from disk
//!
//! This example shows:
//! - Parsing a saved template
//! - Resolving image URLs against an asset directory
//! - The two export paths: tokens literal (preview) and substituted
//!
//! Run with:
//!   cargo run --example test_generate -p pdf-export -- template.json assets/ [regular.ttf] [bold.ttf]

use anyhow::{bail, Result};
use pdf_export::Exporter;
use std::collections::HashMap;
use template::DirAssets;

fn sample_bindings() -> HashMap<String, String> {
    HashMap::from([
        ("NOMBRE".to_string(), "Ana María".to_string()),
        ("APELLIDO".to_string(), "Pérez".to_string()),
        (
            "NOMBRE_COMPLETO".to_string(),
            "Ana María Pérez".to_string(),
        ),
        ("EMAIL".to_string(), "ana.perez@example.com".to_string()),
        ("CEDULA".to_string(), "1234567890".to_string()),
        ("CURSO".to_string(), "Excel Básico".to_string()),
        ("FECHA".to_string(), "30 de agosto de 2026".to_string()),
        (
            "INSTITUCION".to_string(),
            "Capacitaciones CDP".to_string(),
        ),
    ])
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let (Some(template_path), Some(assets_dir)) = (args.next(), args.next()) else {
        bail!("usage: test_generate <template.json> <assets-dir> [regular.ttf] [bold.ttf]");
    };

    let json = std::fs::read_to_string(&template_path)?;
    let template = template::parse_template(&json)?;
    println!("Template: {}", template.nombre);
    println!("Tokens: {:?}", template.used_tokens());

    let assets = DirAssets::new(assets_dir);
    let mut exporter = Exporter::new();

    if let Some(regular_path) = args.next() {
        let regular = std::fs::read(regular_path)?;
        let bold = args.next().map(std::fs::read).transpose()?;
        exporter.add_font_family("Inter", &regular, bold.as_deref())?;
    }

    std::fs::create_dir_all("output")?;

    // blank design: tokens left literal
    let preview = exporter.export_blank(&template, &assets)?;
    std::fs::write("output/preview.pdf", preview)?;
    println!("Wrote output/preview.pdf");

    // test generation with sample data
    let filled = exporter.export_with_values(&template, &assets, &sample_bindings())?;
    let path = format!("output/{}", exporter.filename(&template));
    std::fs::write(&path, filled)?;
    println!("Wrote {path}");

    Ok(())
}
