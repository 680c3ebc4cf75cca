use std::collections::HashMap;

use camino::Utf8Path;
use log::debug;
use serde_json::Value;

use crate::constants::ObjectId;
use crate::omm::omm_record::OmmRecord;
use crate::tlebins_errors::TleBinsError;

/// OMM records indexed by their `OBJECT_ID`.
pub type OmmCatalog = HashMap<ObjectId, OmmRecord>;

/// Index an OMM JSON catalog (a top-level array of objects) by `OBJECT_ID`.
///
/// Every object with a string `OBJECT_ID` is kept as is, whatever the types of its other
/// fields; anything else in the array is ignored. When an id appears several times the last
/// object wins.
///
/// Arguments
/// -----------------
/// * `content` – The JSON text of the catalog.
///
/// Return
/// ----------
/// * The indexed catalog, or [`TleBinsError::JsonError`] if the text is not a JSON array.
pub fn parse_omm_catalog(content: &str) -> Result<OmmCatalog, TleBinsError> {
    let objects: Vec<Value> = serde_json::from_str(content)?;

    let mut catalog = OmmCatalog::with_capacity(objects.len());
    for object in objects {
        let Value::Object(fields) = object else {
            continue;
        };
        let Some(record) = OmmRecord::from_fields(fields) else {
            continue;
        };

        let object_id = record.object_id().to_string();
        if catalog.insert(object_id.clone(), record).is_some() {
            debug!("Duplicate OBJECT_ID {object_id} in OMM catalog, keeping the last one");
        }
    }

    Ok(catalog)
}

/// Read an OMM JSON catalog from disk and index it by `OBJECT_ID`.
///
/// See also
/// ------------
/// * [`parse_omm_catalog`] – Indexing rules.
pub fn read_omm_catalog(path: &Utf8Path) -> Result<OmmCatalog, TleBinsError> {
    let content = std::fs::read_to_string(path)?;
    parse_omm_catalog(&content)
}

#[cfg(test)]
mod omm_catalog_test {
    use super::*;

    #[test]
    fn test_catalog_indexing() {
        let content = r#"[
            {"OBJECT_NAME": "STARLINK-1007", "OBJECT_ID": "2019-074A", "MEAN_MOTION": 15.06},
            {"OBJECT_NAME": "NO ID"},
            {"OBJECT_NAME": "NUMERIC ID", "OBJECT_ID": 12},
            "not an object",
            {"OBJECT_NAME": "STRING TYPES", "OBJECT_ID": "2019-074C", "MEAN_MOTION": "15.2"},
            {"OBJECT_NAME": "STARLINK-1007 (NEWER)", "OBJECT_ID": "2019-074A", "MEAN_MOTION": 15.07}
        ]"#;

        let catalog = parse_omm_catalog(content).unwrap();
        assert_eq!(catalog.len(), 2);

        let record = &catalog["2019-074A"];
        assert_eq!(record.object_name(), Some("STARLINK-1007 (NEWER)"));
        assert_eq!(record.number("MEAN_MOTION"), Ok(15.07));

        // Textual numbers are kept and still readable
        assert_eq!(catalog["2019-074C"].number("MEAN_MOTION"), Ok(15.2));
    }

    #[test]
    fn test_catalog_not_an_array() {
        assert!(matches!(
            parse_omm_catalog(r#"{"OBJECT_ID": "2019-074A"}"#),
            Err(TleBinsError::JsonError(_))
        ));
    }
}
