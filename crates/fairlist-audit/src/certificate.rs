//! Renders a verified audit record into a one-page PDF certificate.
//!
//! The certificate restates the record's identifying fields, the compliance
//! score, a PASS/FAIL verdict, the condensed violation list, and the
//! record's SHA-256 signature. It is a human-readable restatement only; the
//! JSON record remains the integrity-bearing artifact.

use fairlist_types::AuditRecord;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream};

const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;

fn standard_font(base: &str) -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base,
    }
}

/// One positioned text line. Font names refer to the page resources
/// (F1 regular, F2 bold, F3 oblique, F4 mono).
fn text_line(ops: &mut Vec<Operation>, font: &str, size: i64, x: i64, y: i64, text: &str) {
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new("Tf", vec![font.into(), size.into()]));
    ops.push(Operation::new("Td", vec![x.into(), y.into()]));
    ops.push(Operation::new("Tj", vec![Object::string_literal(text)]));
    ops.push(Operation::new("ET", vec![]));
}

fn fill_color(ops: &mut Vec<Operation>, r: f32, g: f32, b: f32) {
    ops.push(Operation::new("rg", vec![r.into(), g.into(), b.into()]));
}

/// Builds the certificate document and returns its serialized bytes.
pub fn render_certificate(record: &AuditRecord) -> Result<Vec<u8>, lopdf::Error> {
    let mut ops: Vec<Operation> = Vec::new();
    let mut y: i64 = PAGE_HEIGHT - 60;

    text_line(&mut ops, "F2", 20, 120, y, "Fairlist Compliance Certificate");
    y -= 30;
    text_line(&mut ops, "F1", 10, 150, y, &format!("Audit ID: {}", record.audit_id));
    y -= 14;
    text_line(&mut ops, "F1", 10, 150, y, &format!("Timestamp: {}", record.timestamp));
    y -= 34;

    text_line(
        &mut ops,
        "F2",
        14,
        60,
        y,
        &format!("Compliance Score: {}/100", record.report.score),
    );
    y -= 36;

    let status = if record.report.is_safe { "PASS" } else { "FAIL" };
    if record.report.is_safe {
        fill_color(&mut ops, 0.0, 0.5, 0.0);
    } else {
        fill_color(&mut ops, 0.8, 0.0, 0.0);
    }
    text_line(&mut ops, "F2", 24, 260, y, status);
    fill_color(&mut ops, 0.0, 0.0, 0.0);
    y -= 44;

    if !record.report.violations.is_empty() {
        text_line(&mut ops, "F2", 12, 60, y, "Violations Found:");
        y -= 16;
        for violation in &record.report.violations {
            text_line(
                &mut ops,
                "F1",
                10,
                70,
                y,
                &format!(
                    "- [{}] {}: \"{}\"",
                    violation.severity, violation.category, violation.found_word
                ),
            );
            y -= 13;
        }
        y -= 12;
    }

    text_line(&mut ops, "F3", 8, 60, y, "Digital Signature (SHA-256):");
    y -= 11;
    text_line(&mut ops, "F4", 7, 60, y, &record.signature);

    fill_color(&mut ops, 0.5, 0.5, 0.5);
    text_line(
        &mut ops,
        "F3",
        8,
        150,
        30,
        "This certificate is cryptographically signed and tamper-evident.",
    );

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let content = Content { operations: ops };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });

    let regular = doc.add_object(standard_font("Helvetica"));
    let bold = doc.add_object(standard_font("Helvetica-Bold"));
    let oblique = doc.add_object(standard_font("Helvetica-Oblique"));
    let mono = doc.add_object(standard_font("Courier"));
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular,
            "F2" => bold,
            "F3" => oblique,
            "F4" => mono,
        },
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}
