// Multipart bodies for the two upload endpoints.
//
// Records travel as JSON file parts next to the PDF renderings. Part
// order matches what the server reads: the test form starts with its
// metadata, the permutation form ends with its record.

use crate::error::{PushError, Result};
use crate::layout::{TestDir, TEST_PDFS};
use crate::model::{Permutation, Test};
use reqwest::blocking::multipart::{Form, Part};
use serde::Serialize;

/// Field names of the two PDF parts, in upload order.
pub const PDF_FIELDS: [&str; 2] = ["pdf1", "pdf2"];

/// Form for `POST /test`: `metadata`, then `pdf1`/`pdf2` from `alln.pdf`/`alls.pdf`.
pub fn test_form(dir: &TestDir, test: &Test) -> Result<Form> {
    let form = Form::new().part("metadata", record_part("metadata", "metadata.json", test)?);
    pdf_parts(form, dir, &TEST_PDFS)
}

/// Form for `POST /test/{id}/permutation`: both index-named PDFs, then
/// the `permutation` record.
pub fn permutation_form(dir: &TestDir, perm: &Permutation) -> Result<Form> {
    let [normal, solved] = Test::permutation_pdfs(perm.index);
    let form = pdf_parts(Form::new(), dir, &[normal.as_str(), solved.as_str()])?;
    Ok(form.part(
        "permutation",
        record_part("permutation", "permutation.json", perm)?,
    ))
}

fn record_part<T: Serialize>(field: &'static str, file_name: &str, record: &T) -> Result<Part> {
    let bytes = serde_json::to_vec(record).map_err(|e| PushError::FormEncoding {
        part: field,
        reason: e.to_string(),
    })?;
    Part::bytes(bytes)
        .file_name(file_name.to_string())
        .mime_str("application/json")
        .map_err(|e| PushError::FormEncoding {
            part: field,
            reason: e.to_string(),
        })
}

fn pdf_parts(mut form: Form, dir: &TestDir, names: &[&str]) -> Result<Form> {
    for (field, name) in PDF_FIELDS.into_iter().zip(names) {
        let part = Part::bytes(dir.read_bytes(name)?)
            .file_name(name.to_string())
            .mime_str("application/pdf")
            .map_err(|e| PushError::FormEncoding {
                part: field,
                reason: e.to_string(),
            })?;
        form = form.part(field, part);
    }
    Ok(form)
}
