//! Export demo - builds a certificate template in code and renders it
//!
//! This example shows:
//! - Building a template programmatically
//! - Adding text elements with `{TOKEN}` placeholders
//! - Exporting with substituted values
//!
//! Run with: cargo run --example export_blank -p pdf-export -- [regular.ttf] [bold.ttf]
//!
//! Without font arguments the text elements are skipped with warnings
//! and only the page structure is produced.

use anyhow::Result;
use pdf_export::Exporter;
use std::collections::HashMap;
use template::{Align, ElementPatch, MemoryAssets, Template};

fn main() -> Result<()> {
    env_logger::init();

    std::fs::create_dir_all("output")?;

    let mut template = Template::new("Certificado Excel Básico");

    let title = template.add_text();
    template.update_element(
        &title,
        &ElementPatch {
            x: Some(800.0),
            y: Some(300.0),
            text: Some("CERTIFICADO DE PARTICIPACIÓN".to_string()),
            font_size: Some(64.0),
            align: Some(Align::Center),
            font_style: Some(template::FontStyle::Bold),
            ..Default::default()
        },
    );

    let name = template.add_text();
    template.update_element(
        &name,
        &ElementPatch {
            x: Some(800.0),
            y: Some(500.0),
            text: Some("{NOMBRE_COMPLETO}".to_string()),
            font_size: Some(48.0),
            align: Some(Align::Center),
            ..Default::default()
        },
    );

    let detail = template.add_text();
    template.update_element(
        &detail,
        &ElementPatch {
            x: Some(800.0),
            y: Some(650.0),
            text: Some("por completar el curso {CURSO} el {FECHA}".to_string()),
            font_size: Some(28.0),
            align: Some(Align::Center),
            ..Default::default()
        },
    );

    let assets = MemoryAssets::new();
    let mut exporter = Exporter::new();

    let mut args = std::env::args().skip(1);
    if let Some(regular_path) = args.next() {
        let regular = std::fs::read(regular_path)?;
        let bold = args.next().map(std::fs::read).transpose()?;
        exporter.add_font_family("Inter", &regular, bold.as_deref())?;
    } else {
        eprintln!("No font given; text elements will be skipped");
    }

    let bindings = HashMap::from([
        ("NOMBRE_COMPLETO".to_string(), "Ana María Pérez".to_string()),
        ("CURSO".to_string(), "Excel Básico".to_string()),
        ("FECHA".to_string(), "30 de agosto de 2026".to_string()),
    ]);

    let pdf = exporter.export_with_values(&template, &assets, &bindings)?;
    let path = format!("output/{}", exporter.filename(&template));
    std::fs::write(&path, pdf)?;
    println!("Wrote {path}");

    Ok(())
}
