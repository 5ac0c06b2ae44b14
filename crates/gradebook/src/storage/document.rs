//! The on-disk student document.
//!
//! A document is a top-level JSON array of student objects:
//!
//! ```json
//! [{"Nombre":"Ana","Cursos":[{"Nombre":"Mathematics","Nota":95}]}]
//! ```
//!
//! There is no version field. Documents are written compact.

use std::path::Path;

use crate::error::{Error, Result};
use crate::record::Student;
use crate::store::RecordStore;

/// UTF-8 byte order mark, written by some Windows editors.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Decode a document read from `path`.
///
/// A leading UTF-8 byte order mark is skipped. Whitespace-only content
/// decodes to an empty store.
///
/// # Errors
///
/// Returns [`Error::MalformedDocument`] if the bytes are not a student array
/// (bad JSON, missing fields, out-of-range scores) and
/// [`Error::InvalidDocument`] if the students break a record invariant.
pub fn decode(path: &Path, bytes: &[u8]) -> Result<RecordStore> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(RecordStore::new());
    }

    let students: Vec<Student> =
        serde_json::from_slice(bytes).map_err(|source| Error::MalformedDocument {
            path: path.to_path_buf(),
            source,
        })?;

    RecordStore::from_students(students).map_err(|message| Error::invalid_document(path, message))
}

/// Encode students as a compact document.
///
/// # Errors
///
/// Returns [`Error::Json`] if serialization fails.
pub fn encode(students: &[Student]) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(students)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Course, Score};

    fn path() -> &'static Path {
        Path::new("DAlumnos.json")
    }

    #[test]
    fn test_encode_exact_shape() {
        let student = Student::with_course(
            "Ana",
            Course::new("Mathematics", Score::try_from(95_i64).unwrap()),
        );
        let bytes = encode(&[student]).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"[{"Nombre":"Ana","Cursos":[{"Nombre":"Mathematics","Nota":95}]}]"#
        );
    }

    #[test]
    fn test_encode_empty() {
        assert_eq!(encode(&[]).unwrap(), b"[]");
    }

    #[test]
    fn test_decode_document() {
        let json = br#"[
            {"Nombre": "Ana", "Cursos": [{"Nombre": "Physics", "Nota": 88}]},
            {"Nombre": "Luis", "Cursos": []}
        ]"#;
        let store = decode(path(), json).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.all()[1].name, "Luis");
        assert_eq!(
            store.find_student("Ana").unwrap().score_for("Physics"),
            Some(Score::try_from(88_i64).unwrap())
        );
    }

    #[test]
    fn test_decode_whitespace_is_empty() {
        assert!(decode(path(), b"").unwrap().is_empty());
        assert!(decode(path(), b" \n\t").unwrap().is_empty());
    }

    #[test]
    fn test_decode_bom() {
        let json = b"\xEF\xBB\xBF[{\"Nombre\":\"Ana\",\"Cursos\":[{\"Nombre\":\"Physics\",\"Nota\":88}]}]";
        let store = decode(path(), json).unwrap();

        assert_eq!(store.len(), 1);
        assert!(store.find_student("Ana").unwrap().has_course("Physics"));
        assert!(decode(path(), b"\xEF\xBB\xBF \n").unwrap().is_empty());
    }

    #[test]
    fn test_decode_malformed() {
        let cases: [&[u8]; 5] = [
            b"{not json",
            br#"{"Nombre":"Ana","Cursos":[]}"#,
            br#"[{"Nombre":"Ana"}]"#,
            br#"[{"Nombre":"Ana","Cursos":[{"Nombre":"Physics","Nota":101}]}]"#,
            br#"[{"Nombre":"Ana","Cursos":[{"Nombre":"Physics","Nota":"90"}]}]"#,
        ];
        for bad in cases {
            let err = decode(path(), bad).unwrap_err();
            assert!(
                matches!(err, Error::MalformedDocument { .. }),
                "expected malformed for {}",
                String::from_utf8_lossy(bad)
            );
        }
    }

    #[test]
    fn test_decode_invalid_document() {
        let json = br#"[{"Nombre":"Ana","Cursos":[]},{"Nombre":"Ana","Cursos":[]}]"#;
        let err = decode(path(), json).unwrap_err();
        assert!(matches!(err, Error::InvalidDocument { .. }));
        assert!(err.to_string().contains("DAlumnos.json"));
    }
}
