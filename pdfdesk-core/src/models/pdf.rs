//! PDF schema
//!
//! `file` holds either a caller-supplied reference or, for uploaded
//! documents, the object-store URL assigned at upload time.

use serde::{Deserialize, Serialize};

/// A stored PDF row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pdf {
    pub id: i32,
    pub name: String,
    pub selected: bool,
    pub file: String,
}

/// Body of `POST /pdfs/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdfRequest {
    pub name: String,
    pub selected: bool,
    pub file: String,
}

/// Body of `PUT /pdfs/{id}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdfUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl PdfUpdate {
    pub fn apply_to(&self, pdf: &mut Pdf) {
        if let Some(name) = &self.name {
            pdf.name = name.clone();
        }
        if let Some(selected) = self.selected {
            pdf.selected = selected;
        }
        if let Some(file) = &self.file {
            pdf.file = file.clone();
        }
    }
}

impl Pdf {
    pub fn from_request(id: i32, req: PdfRequest) -> Self {
        Self {
            id,
            name: req.name,
            selected: req.selected,
            file: req.file,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_requires_every_field() {
        let res = serde_json::from_str::<PdfRequest>(r#"{"name":"a.pdf","file":"x"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn update_keeps_unsupplied_fields() {
        let mut pdf = Pdf {
            id: 3,
            name: "report.pdf".into(),
            selected: false,
            file: "https://bucket.s3.amazonaws.com/report.pdf".into(),
        };
        let update: PdfUpdate = serde_json::from_str(r#"{"selected":true}"#).unwrap();
        update.apply_to(&mut pdf);

        assert!(pdf.selected);
        assert_eq!(pdf.name, "report.pdf");
        assert_eq!(pdf.file, "https://bucket.s3.amazonaws.com/report.pdf");
    }
}
