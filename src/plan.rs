use crate::config::Catalog;
use crate::options::Configuration;
use crate::resolve::Settings;
use serde::Serialize;
use tracing::debug;

/// One source file compiled into one object file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompilationUnit {
    pub object: String,
    pub source: String,
}

/// Everything the Makefile templates need, in output order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildPlan {
    pub compiler: String,
    pub cflags: String,
    pub ldflags: String,
    pub ldlibs: String,
    pub deps: Vec<String>,
    pub units: Vec<CompilationUnit>,
    pub target: String,
    pub build_dir: String,
}

/// Directory values are joined by concatenation; a missing trailing `/` is added.
fn dir_prefix(dir: &str) -> String {
    if dir.is_empty() || dir.ends_with('/') {
        dir.to_string()
    } else {
        format!("{dir}/")
    }
}

pub fn build_plan(config: &Configuration, catalog: &Catalog, settings: Settings<'_>) -> BuildPlan {
    let src_dir = dir_prefix(&config.src_dir);
    let build_dir = dir_prefix(&config.build_dir);
    let obj_dir = format!("{build_dir}obj/");

    let deps = catalog
        .headers
        .iter()
        .map(|header| format!("{src_dir}{header}"))
        .collect();

    let mut units: Vec<CompilationUnit> = catalog
        .common
        .iter()
        .chain(settings.platform.units.iter())
        .map(|unit| {
            let stem = unit.strip_suffix(catalog.object_suffix.as_str()).unwrap_or(unit);
            CompilationUnit {
                object: format!("{obj_dir}{unit}"),
                source: format!("{src_dir}{stem}{}", catalog.source_suffix),
            }
        })
        .collect();

    if config.test_mode {
        substitute_entry_point(&mut units, catalog, &obj_dir, &src_dir);
    }

    debug!("Planned {} compilation units", units.len());

    BuildPlan {
        compiler: settings.compiler,
        cflags: settings.cflags,
        ldflags: settings.ldflags,
        ldlibs: settings.ldlibs,
        deps,
        units,
        target: format!("{build_dir}{}", config.output),
        build_dir,
    }
}

/// Swap the entry point's source for the local one, keeping its object path.
fn substitute_entry_point(units: &mut Vec<CompilationUnit>, catalog: &Catalog, obj_dir: &str, src_dir: &str) {
    let object = format!("{obj_dir}{}{}", catalog.entry_point, catalog.object_suffix);
    let source = format!("{src_dir}{}{}", catalog.entry_point, catalog.source_suffix);

    let Some(position) = units.iter().position(|u| u.object == object || u.source == source) else {
        debug!("No entry point unit to substitute");
        return;
    };
    let entry = units.remove(position);
    debug!("Building {} from {}", entry.object, catalog.local_entry_point);
    units.push(CompilationUnit {
        object: entry.object,
        source: catalog.local_entry_point.clone(),
    });
}
