//! Export the validated course catalog to JSON for external tooling.
//!
//! Records services and web frontends need the course list of the running
//! map without linking against the game. The export is a plain JSON summary
//! written at round start, after validation, so it only ever contains
//! courses that survived.

use std::fs;
use std::path::Path;

use bevy::prelude::*;
use serde::Serialize;

use crate::catalog::MapApiData;

/// Serializable summary of the validated catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogExport {
    /// Raw schema version of the map.
    pub api_version: i32,
    /// Number of trigger records in the catalog.
    pub trigger_count: usize,
    /// The validated courses, in catalog order.
    pub courses: Vec<CourseExport>,
}

/// Serializable summary of one validated course.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseExport {
    pub number: i32,
    pub name: String,
    pub targetname: String,
    pub disable_checkpoints: bool,
    pub has_start_position: bool,
    pub split_count: i32,
    pub checkpoint_count: i32,
    pub stage_count: i32,
}

/// Build the export representation. Separated from file I/O for testing.
pub fn build_export_data(data: &MapApiData) -> CatalogExport {
    CatalogExport {
        api_version: data.api_version().raw(),
        trigger_count: data.triggers().len(),
        courses: data
            .courses()
            .iter()
            .map(|course| CourseExport {
                number: course.number,
                name: course.name.clone(),
                targetname: course.targetname.clone(),
                disable_checkpoints: course.disable_checkpoints,
                has_start_position: course.start_position.is_some(),
                split_count: course.split_count,
                checkpoint_count: course.checkpoint_count,
                stage_count: course.stage_count,
            })
            .collect(),
    }
}

/// Write the catalog summary to `path`. Failures are logged, never fatal -
/// a missing export must not take the round down with it.
pub fn export_catalog(data: &MapApiData, path: &Path) {
    let export = build_export_data(data);
    let json = match serde_json::to_string_pretty(&export) {
        Ok(json) => json,
        Err(error) => {
            error!("Failed to serialize course catalog: {error}");
            return;
        }
    };
    match fs::write(path, json) {
        Ok(()) => info!("Exported course catalog to {}", path.display()),
        Err(error) => error!(
            "Failed to export course catalog to {}: {error}",
            path.display()
        ),
    }
}
