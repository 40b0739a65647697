use crate::contexts::{FlagContext, HeaderContext, ObjectContext, UsageContext};
use crate::error::Result;
use crate::options::FLAGS;
use crate::plan::BuildPlan;
use crate::templates::{MAKEFILE_HEADER, MAKEFILE_OBJECT, USAGE};
use std::fs;
use std::path::Path;
use tinytemplate::{TinyTemplate, format_unescaped};

fn templates() -> Result<TinyTemplate<'static>> {
    let mut tt = TinyTemplate::new();
    tt.set_default_formatter(&format_unescaped);
    tt.add_template("header", MAKEFILE_HEADER)?;
    tt.add_template("object", MAKEFILE_OBJECT)?;
    tt.add_template("usage", USAGE)?;
    Ok(tt)
}

/// Render the whole Makefile: the header block, then one rule per unit.
pub fn render_makefile(plan: &BuildPlan) -> Result<String> {
    let tt = templates()?;

    let header = HeaderContext {
        compiler: &plan.compiler,
        cflags: &plan.cflags,
        ldflags: &plan.ldflags,
        ldlibs: &plan.ldlibs,
        deps: &plan.deps,
        target: &plan.target,
        objects: plan.units.iter().map(|u| u.object.as_str()).collect(),
        build_dir: &plan.build_dir,
    };
    let mut content = tt.render("header", &header)?;

    for unit in &plan.units {
        let ctx = ObjectContext {
            object: &unit.object,
            source: &unit.source,
        };
        content.push_str(&tt.render("object", &ctx)?);
    }

    Ok(content)
}

/// Replace the file at `path` with `content` in a single write.
pub fn write_makefile(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)?;
    Ok(())
}

pub fn render_usage(program: &str) -> Result<String> {
    let flags = FLAGS
        .iter()
        .map(|spec| {
            let usage = match spec.value {
                Some(value) => format!("{} {}", spec.name, value),
                None => spec.name.to_string(),
            };
            FlagContext {
                usage: format!("{usage:<16}"),
                description: spec.description,
            }
        })
        .collect();
    let ctx = UsageContext { program, flags };
    Ok(templates()?.render("usage", &ctx)?)
}
