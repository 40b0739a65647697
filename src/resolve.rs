use crate::config::{Catalog, PlatformEntry};
use crate::error::{ConfigureError, Result};
use crate::options::{ByteOrder, Configuration, Profile};
use regex::Regex;
use std::sync::LazyLock;

/// Characters with a meaning in Makefile syntax.
static UNSAFE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s#$\\:;%=]").expect("constant pattern"));

/// Compiler settings derived from a configuration.
#[derive(Debug, Clone)]
pub struct Settings<'a> {
    pub compiler: String,
    pub cflags: String,
    pub ldflags: String,
    pub ldlibs: String,
    pub platform: &'a PlatformEntry,
}

pub fn resolve<'a>(config: &Configuration, catalog: &'a Catalog) -> Result<Settings<'a>> {
    check_value("output name", &config.output)?;
    check_value("source directory", &config.src_dir)?;
    check_value("build directory", &config.build_dir)?;
    if config.output.is_empty() {
        return Err(ConfigureError::UnsafeValue { field: "output name", value: String::new() });
    }

    let compiler = catalog.compiler(config.compiler.name())?.to_string();
    let platform = catalog.platform(config.platform.name())?;
    let toolchain = &catalog.toolchain;

    let mut cflags: Vec<&str> = Vec::new();
    if config.profile == Profile::Debug {
        cflags.push(&toolchain.debug_cflags);
    }
    cflags.push(&toolchain.cflags);
    cflags.extend(platform.defines.iter().map(String::as_str));
    if config.byte_order == ByteOrder::Big {
        cflags.push(&toolchain.big_endian_define);
    }

    let ldflags = match config.profile {
        Profile::Release => toolchain.release_ldflags.clone(),
        Profile::Debug => toolchain.debug_ldflags.clone(),
    };

    Ok(Settings {
        compiler,
        cflags: cflags.join(" "),
        ldflags,
        ldlibs: toolchain.ldlibs.clone(),
        platform,
    })
}

fn check_value(field: &'static str, value: &str) -> Result<()> {
    if UNSAFE_CHARS.is_match(value) {
        return Err(ConfigureError::UnsafeValue { field, value: value.to_string() });
    }
    Ok(())
}
