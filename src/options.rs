use crate::error::{ConfigureError, Result};
use serde::Serialize;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Compiler {
    Clang,
    Gcc,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    Release,
    Debug,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Win32,
    Linux,
    Freebsd,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    Little,
    Big,
}

impl Compiler {
    /// Key of the compiler in the catalog.
    pub fn name(self) -> &'static str {
        match self {
            Compiler::Clang => "clang",
            Compiler::Gcc => "gcc",
        }
    }
}

impl Platform {
    /// Key of the platform in the catalog.
    pub fn name(self) -> &'static str {
        match self {
            Platform::Win32 => "win32",
            Platform::Linux => "linux",
            Platform::Freebsd => "freebsd",
        }
    }
}

/// Build options gathered from the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Configuration {
    pub compiler: Compiler,
    pub profile: Profile,
    pub platform: Platform,
    pub byte_order: ByteOrder,
    pub output: String,
    pub src_dir: String,
    pub build_dir: String,
    pub test_mode: bool,
}

impl Default for Configuration {
    // Byte order is not taken from the host so the same options give the
    // same Makefile everywhere.
    fn default() -> Self {
        Self {
            compiler: Compiler::Clang,
            profile: Profile::Release,
            platform: Platform::Win32,
            byte_order: ByteOrder::Little,
            output: "kaplar".to_string(),
            src_dir: "src/".to_string(),
            build_dir: "build/".to_string(),
            test_mode: false,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Field {
    Output,
    SourceDir,
    BuildDir,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Flag {
    Compiler(Compiler),
    Profile(Profile),
    Platform(Platform),
    ByteOrder(ByteOrder),
    TestMode,
    Value(Field),
}

/// A recognized build option, used for parsing and for the usage text.
pub struct FlagSpec {
    pub name: &'static str,
    pub value: Option<&'static str>,
    pub description: &'static str,
    flag: Flag,
}

pub const FLAGS: &[FlagSpec] = &[
    FlagSpec { name: "-o", value: Some("<name>"), description: "output binary name", flag: Flag::Value(Field::Output) },
    FlagSpec { name: "-srcdir", value: Some("<dir>"), description: "source directory", flag: Flag::Value(Field::SourceDir) },
    FlagSpec { name: "-builddir", value: Some("<dir>"), description: "build directory", flag: Flag::Value(Field::BuildDir) },
    FlagSpec { name: "-test", value: None, description: "build the local main.c instead of the server entry point", flag: Flag::TestMode },
    FlagSpec { name: "-clang", value: None, description: "compile with clang (default)", flag: Flag::Compiler(Compiler::Clang) },
    FlagSpec { name: "-gcc", value: None, description: "compile with gcc", flag: Flag::Compiler(Compiler::Gcc) },
    FlagSpec { name: "-release", value: None, description: "optimized, stripped build (default)", flag: Flag::Profile(Profile::Release) },
    FlagSpec { name: "-debug", value: None, description: "build with debug symbols", flag: Flag::Profile(Profile::Debug) },
    FlagSpec { name: "-win32", value: None, description: "target Windows (default)", flag: Flag::Platform(Platform::Win32) },
    FlagSpec { name: "-linux", value: None, description: "target Linux", flag: Flag::Platform(Platform::Linux) },
    FlagSpec { name: "-freebsd", value: None, description: "target FreeBSD", flag: Flag::Platform(Platform::Freebsd) },
    FlagSpec { name: "-le", value: None, description: "little-endian target (default)", flag: Flag::ByteOrder(ByteOrder::Little) },
    FlagSpec { name: "-be", value: None, description: "big-endian target", flag: Flag::ByteOrder(ByteOrder::Big) },
];

fn lookup(token: &str) -> Option<&'static FlagSpec> {
    FLAGS.iter().find(|spec| spec.name == token)
}

/// Parse build options left to right. Later options overwrite earlier ones.
pub fn parse_options<S: AsRef<str>>(tokens: &[S]) -> Result<Configuration> {
    let mut config = Configuration::default();
    let mut index = 0;

    while index < tokens.len() {
        let token = tokens[index].as_ref();
        let spec = lookup(token).ok_or_else(|| ConfigureError::UnknownOption(token.to_string()))?;

        match spec.flag {
            Flag::Compiler(compiler) => config.compiler = compiler,
            Flag::Profile(profile) => config.profile = profile,
            Flag::Platform(platform) => config.platform = platform,
            Flag::ByteOrder(byte_order) => config.byte_order = byte_order,
            Flag::TestMode => config.test_mode = true,
            Flag::Value(field) => {
                index += 1;
                let value = tokens
                    .get(index)
                    .ok_or_else(|| ConfigureError::MissingValue(token.to_string()))?
                    .as_ref()
                    .to_string();
                match field {
                    Field::Output => config.output = value,
                    Field::SourceDir => config.src_dir = value,
                    Field::BuildDir => config.build_dir = value,
                }
            }
        }
        index += 1;
    }

    Ok(config)
}
